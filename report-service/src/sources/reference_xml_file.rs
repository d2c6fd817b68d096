use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use generation_domain::ReferenceData;
use rust_decimal::Decimal;
use serde::Deserialize;

/// XML source for the reference factor document.
///
/// Expected shape:
/// ```xml
/// <ReferenceData>
///   <ValueFactors>
///     <OffshoreWind>0.265</OffshoreWind>
///     <OnshoreWind>0.946</OnshoreWind>
///     <Gas>0.696</Gas>
///     <Coal>0.696</Coal>
///   </ValueFactors>
///   <EmissionsFactors>
///     <Gas>0.562</Gas>
///     <Coal>0.812</Coal>
///   </EmissionsFactors>
/// </ReferenceData>
/// ```
///
/// Every element is optional; present entries override the standard
/// factors, absent ones keep them. Errors here are fatal to the process
/// since no generator calculation is possible without the tables.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReferenceXml {
    #[serde(rename = "ValueFactors")]
    value_factors: FactorSetXml,
    #[serde(rename = "EmissionsFactors")]
    emissions_factors: FactorSetXml,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FactorSetXml {
    #[serde(rename = "OffshoreWind")]
    offshore_wind: Option<String>,
    #[serde(rename = "OnshoreWind")]
    onshore_wind: Option<String>,
    #[serde(rename = "Gas")]
    gas: Option<String>,
    #[serde(rename = "Coal")]
    coal: Option<String>,
}

fn parse_factor(raw: &str, element: &str) -> anyhow::Result<Decimal> {
    raw.trim()
        .parse()
        .map_err(|e| anyhow!("invalid factor <{element}> '{raw}': {e}"))
}

pub fn parse_reference_data(raw: &str) -> anyhow::Result<ReferenceData> {
    let doc: ReferenceXml =
        quick_xml::de::from_str(raw).map_err(|e| anyhow!("invalid reference document: {e}"))?;

    let mut reference = ReferenceData::default();
    if let Some(raw) = &doc.value_factors.offshore_wind {
        reference.offshore_wind_value = parse_factor(raw, "OffshoreWind")?;
    }
    if let Some(raw) = &doc.value_factors.onshore_wind {
        reference.onshore_wind_value = parse_factor(raw, "OnshoreWind")?;
    }
    if let Some(raw) = &doc.value_factors.gas {
        reference.gas_value = parse_factor(raw, "Gas")?;
    }
    if let Some(raw) = &doc.value_factors.coal {
        reference.coal_value = parse_factor(raw, "Coal")?;
    }
    if let Some(raw) = &doc.emissions_factors.gas {
        reference.gas_emissions = parse_factor(raw, "Gas")?;
    }
    if let Some(raw) = &doc.emissions_factors.coal {
        reference.coal_emissions = parse_factor(raw, "Coal")?;
    }

    Ok(reference)
}

pub fn load_reference_data(path: &Path) -> anyhow::Result<ReferenceData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read reference data file {}", path.display()))?;
    parse_reference_data(&raw)
        .with_context(|| format!("failed to parse reference data file {}", path.display()))
}
