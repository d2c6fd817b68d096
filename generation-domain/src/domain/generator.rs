use std::fmt;

use rust_decimal::Decimal;
use time::Date;

/// Fuel category of a generation unit. Closed set; wind splits into
/// offshore/onshore based on the unit's reported location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelCategory {
    OffshoreWind,
    OnshoreWind,
    Gas,
    Coal,
}

impl FuelCategory {
    /// Gas and coal units carry an emissions rating; wind units do not.
    pub fn is_fossil(self) -> bool {
        matches!(self, Self::Gas | Self::Coal)
    }
}

impl fmt::Display for FuelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OffshoreWind => "OffshoreWind",
            Self::OnshoreWind => "OnshoreWind",
            Self::Gas => "Gas",
            Self::Coal => "Coal",
        };
        f.write_str(name)
    }
}

/// One day's operational data for a generator. Dates are day-granular;
/// any time-of-day component is discarded at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    pub date: Date,
    pub energy: Decimal,
    pub price: Decimal,
}

/// One physical generation unit as extracted from a single input file.
///
/// Field presence follows the category: `emissions_rating` is set for
/// gas and coal units only, `total_heat_input` and `actual_net_generation`
/// for coal units only. Instances live only for the duration of one
/// file's processing; there is no cross-file identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    pub name: String,
    pub category: FuelCategory,
    pub emissions_rating: Option<Decimal>,
    pub total_heat_input: Option<Decimal>,
    pub actual_net_generation: Option<Decimal>,
    pub daily_records: Vec<GenerationRecord>,
}
