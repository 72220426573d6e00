use super::{read_json_file, ConfigError};
use crate::analyzer::params::AnalyzerParams;
use crate::types::PrimitiveSet;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config of the `bike_geometry_demo` tool.
#[derive(Debug, Deserialize)]
pub struct AnalyzeToolConfig {
    /// Primitive set JSON produced by the circle/segment detector.
    pub input: PathBuf,
    #[serde(default)]
    pub params: AnalyzerParams,
    pub output: AnalyzeOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeOutputConfig {
    pub result_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<AnalyzeToolConfig, ConfigError> {
    read_json_file(path)
}

pub fn load_primitives(path: &Path) -> Result<PrimitiveSet, ConfigError> {
    read_json_file(path)
}
