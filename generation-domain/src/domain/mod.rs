pub mod generator;
pub mod rows;

pub use generator::{FuelCategory, GenerationRecord, Generator};
pub use rows::{FileMetrics, HeatRateRow, PeakEmissionRow, TotalRow};
