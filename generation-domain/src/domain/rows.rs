use rust_decimal::Decimal;
use time::Date;

/// Total generation value for one generator: Σ(energy × price) scaled by
/// the category's value factor.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalRow {
    pub name: String,
    pub total: Decimal,
}

/// The highest single-generator emission observed on one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakEmissionRow {
    pub name: String,
    pub date: Date,
    pub emission: Decimal,
}

/// Heat rate for one coal generator. `None` when `actual_net_generation`
/// is zero — the division has no decimal result and the output document
/// carries a `NaN` sentinel instead.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatRateRow {
    pub name: String,
    pub heat_rate: Option<Decimal>,
}

/// All computed metrics for one input file, ready for serialization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileMetrics {
    pub totals: Vec<TotalRow>,
    pub peak_emissions: Vec<PeakEmissionRow>,
    pub heat_rates: Vec<HeatRateRow>,
}
