use bike_geometry::config::analyze::{self, AnalyzeToolConfig};
use bike_geometry::config::{write_json_file, ConfigError};
use bike_geometry::{AnalysisResult, BikeAnalyzer};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = analyze::load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    let result = analyze_file(&config).map_err(|e| e.to_string())?;
    print_summary(&result);
    println!(
        "Saved analysis of {} segments to {}",
        result.segments.len(),
        config.output.result_json.display()
    );
    Ok(())
}

fn analyze_file(config: &AnalyzeToolConfig) -> Result<AnalysisResult, ConfigError> {
    let primitives = analyze::load_primitives(&config.input)?;
    let analyzer = BikeAnalyzer::new(config.params.clone());
    let result = analyzer.analyze_set(&primitives);
    write_json_file(&config.output.result_json, &result)?;
    Ok(result)
}

fn print_summary(result: &AnalysisResult) {
    let trace = &result.trace;
    println!(
        "circles={} groups={} pairs={} wheels={}",
        trace.input_circles,
        trace.wheel_groups,
        trace.concentric_pairs,
        result.wheels.len()
    );
    if trace.fallback {
        println!("fewer than two wheels: basic segment filter only");
    }
    println!(
        "segments kept {}/{} in {:.3} ms",
        trace.filter.kept, trace.filter.total, trace.elapsed_ms
    );
    for entry in &trace.components {
        println!("  {:?}: {}", entry.component, entry.count);
    }
    for hit in trace.rule_hits.iter().filter(|h| h.count > 0) {
        println!("  rule {}: {}", hit.rule, hit.count);
    }
}

fn usage() -> String {
    "Usage: bike_geometry_demo <config.json>".to_string()
}
