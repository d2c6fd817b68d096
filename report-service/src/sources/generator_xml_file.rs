use generation_domain::domain::{FuelCategory, GenerationRecord, Generator};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::{format_description::FormatItem, macros::format_description, Date};

use crate::pipeline::PipelineError;

/// XML source for generation report files.
///
/// Expected elements under the document root:
/// - `WindGenerator`: Name, Location, Generation
/// - `GasGenerator`: Name, EmissionsRating, Generation
/// - `CoalGenerator`: Name, EmissionsRating, TotalHeatInput,
///   ActualNetGeneration, Generation
///
/// `Generation` holds `Day` entries, each with Date, Energy and Price.
/// A wind generator whose Location contains "Offshore" is offshore wind,
/// any other location is onshore. Extraction is all-or-nothing per file:
/// one missing or unparsable required field fails the whole document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReportXml {
    #[serde(rename = "WindGenerator")]
    wind: Vec<WindXml>,
    #[serde(rename = "GasGenerator")]
    gas: Vec<GasXml>,
    #[serde(rename = "CoalGenerator")]
    coal: Vec<CoalXml>,
}

#[derive(Debug, Deserialize)]
struct WindXml {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Location")]
    location: Option<String>,
    #[serde(rename = "Generation")]
    generation: Option<GenerationXml>,
}

#[derive(Debug, Deserialize)]
struct GasXml {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "EmissionsRating")]
    emissions_rating: Option<String>,
    #[serde(rename = "Generation")]
    generation: Option<GenerationXml>,
}

#[derive(Debug, Deserialize)]
struct CoalXml {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "EmissionsRating")]
    emissions_rating: Option<String>,
    #[serde(rename = "TotalHeatInput")]
    total_heat_input: Option<String>,
    #[serde(rename = "ActualNetGeneration")]
    actual_net_generation: Option<String>,
    #[serde(rename = "Generation")]
    generation: Option<GenerationXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerationXml {
    #[serde(rename = "Day")]
    days: Vec<DayXml>,
}

#[derive(Debug, Deserialize)]
struct DayXml {
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Energy")]
    energy: Option<String>,
    #[serde(rename = "Price")]
    price: Option<String>,
}

const DAY_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

fn require<'a>(
    value: &'a Option<String>,
    element: &str,
    field: &str,
) -> Result<&'a str, PipelineError> {
    value
        .as_deref()
        .ok_or_else(|| PipelineError::MalformedInput(format!("missing <{field}> in <{element}>")))
}

fn parse_decimal(raw: &str, element: &str, field: &str) -> Result<Decimal, PipelineError> {
    raw.trim().parse().map_err(|e| {
        PipelineError::MalformedInput(format!("invalid <{field}> '{raw}' in <{element}>: {e}"))
    })
}

fn parse_day_date(raw: &str, element: &str) -> Result<Date, PipelineError> {
    // Records are day-granular; a time-of-day suffix is discarded.
    let trimmed = raw.trim();
    let day_part = match trimmed.split_once('T') {
        Some((day, _)) => day,
        None => trimmed,
    };
    Date::parse(day_part, DAY_FORMAT).map_err(|e| {
        PipelineError::MalformedInput(format!("invalid <Date> '{raw}' in <{element}>: {e}"))
    })
}

fn daily_records(
    generation: &Option<GenerationXml>,
    element: &str,
) -> Result<Vec<GenerationRecord>, PipelineError> {
    // An absent Generation collection is a zero contribution, not an error.
    let Some(generation) = generation else {
        return Ok(Vec::new());
    };

    generation
        .days
        .iter()
        .map(|day| {
            Ok(GenerationRecord {
                date: parse_day_date(require(&day.date, element, "Date")?, element)?,
                energy: parse_decimal(require(&day.energy, element, "Energy")?, element, "Energy")?,
                price: parse_decimal(require(&day.price, element, "Price")?, element, "Price")?,
            })
        })
        .collect()
}

fn wind_generator(raw: &WindXml) -> Result<Generator, PipelineError> {
    let name = require(&raw.name, "WindGenerator", "Name")?.to_string();
    let location = require(&raw.location, "WindGenerator", "Location")?;
    let category = if location.contains("Offshore") {
        FuelCategory::OffshoreWind
    } else {
        FuelCategory::OnshoreWind
    };

    Ok(Generator {
        name,
        category,
        emissions_rating: None,
        total_heat_input: None,
        actual_net_generation: None,
        daily_records: daily_records(&raw.generation, "WindGenerator")?,
    })
}

fn gas_generator(raw: &GasXml) -> Result<Generator, PipelineError> {
    let name = require(&raw.name, "GasGenerator", "Name")?.to_string();
    let rating = parse_decimal(
        require(&raw.emissions_rating, "GasGenerator", "EmissionsRating")?,
        "GasGenerator",
        "EmissionsRating",
    )?;

    Ok(Generator {
        name,
        category: FuelCategory::Gas,
        emissions_rating: Some(rating),
        total_heat_input: None,
        actual_net_generation: None,
        daily_records: daily_records(&raw.generation, "GasGenerator")?,
    })
}

fn coal_generator(raw: &CoalXml) -> Result<Generator, PipelineError> {
    let name = require(&raw.name, "CoalGenerator", "Name")?.to_string();
    let rating = parse_decimal(
        require(&raw.emissions_rating, "CoalGenerator", "EmissionsRating")?,
        "CoalGenerator",
        "EmissionsRating",
    )?;
    let total_heat_input = parse_decimal(
        require(&raw.total_heat_input, "CoalGenerator", "TotalHeatInput")?,
        "CoalGenerator",
        "TotalHeatInput",
    )?;
    let actual_net_generation = parse_decimal(
        require(&raw.actual_net_generation, "CoalGenerator", "ActualNetGeneration")?,
        "CoalGenerator",
        "ActualNetGeneration",
    )?;

    Ok(Generator {
        name,
        category: FuelCategory::Coal,
        emissions_rating: Some(rating),
        total_heat_input: Some(total_heat_input),
        actual_net_generation: Some(actual_net_generation),
        daily_records: daily_records(&raw.generation, "CoalGenerator")?,
    })
}

/// Extracts all generator records from one report document, preserving
/// the order wind, then gas, then coal, each group in document order.
pub fn parse_generators(raw: &str) -> Result<Vec<Generator>, PipelineError> {
    let doc: ReportXml = quick_xml::de::from_str(raw)
        .map_err(|e| PipelineError::MalformedInput(format!("invalid report document: {e}")))?;

    let mut generators = Vec::with_capacity(doc.wind.len() + doc.gas.len() + doc.coal.len());
    for wind in &doc.wind {
        generators.push(wind_generator(wind)?);
    }
    for gas in &doc.gas {
        generators.push(gas_generator(gas)?);
    }
    for coal in &doc.coal {
        generators.push(coal_generator(coal)?);
    }

    Ok(generators)
}
