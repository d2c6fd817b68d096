use rust_decimal::Decimal;

use crate::domain::FuelCategory;

/// Requested an emissions factor for a category that has none (wind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no emissions factor for category {0}")]
pub struct MissingFactor(pub FuelCategory);

/// Category-keyed factor tables, loaded once at startup and never
/// mutated afterwards. Constructed with the standard factors via
/// `Default`; a reference document may override individual entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub offshore_wind_value: Decimal,
    pub onshore_wind_value: Decimal,
    pub gas_value: Decimal,
    pub coal_value: Decimal,
    pub gas_emissions: Decimal,
    pub coal_emissions: Decimal,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            offshore_wind_value: Decimal::new(265, 3),
            onshore_wind_value: Decimal::new(946, 3),
            gas_value: Decimal::new(696, 3),
            coal_value: Decimal::new(696, 3),
            gas_emissions: Decimal::new(562, 3),
            coal_emissions: Decimal::new(812, 3),
        }
    }
}

impl ReferenceData {
    /// Multiplier converting a generator's Σ(energy × price) into its
    /// generation value. Defined for every category.
    pub fn value_factor(&self, category: FuelCategory) -> Decimal {
        match category {
            FuelCategory::OffshoreWind => self.offshore_wind_value,
            FuelCategory::OnshoreWind => self.onshore_wind_value,
            FuelCategory::Gas => self.gas_value,
            FuelCategory::Coal => self.coal_value,
        }
    }

    /// Multiplier converting energy × emissions rating into an emission
    /// quantity. Only fossil categories have one.
    pub fn emissions_factor(&self, category: FuelCategory) -> Result<Decimal, MissingFactor> {
        match category {
            FuelCategory::Gas => Ok(self.gas_emissions),
            FuelCategory::Coal => Ok(self.coal_emissions),
            other => Err(MissingFactor(other)),
        }
    }
}
