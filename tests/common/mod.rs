pub mod synthetic_bike;
