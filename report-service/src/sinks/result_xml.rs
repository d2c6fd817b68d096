use std::{
    fs,
    path::{Path, PathBuf},
};

use generation_domain::domain::{FileMetrics, HeatRateRow, PeakEmissionRow, TotalRow};
use rust_decimal::Decimal;
use serde::Serialize;
use time::{format_description::FormatItem, macros::format_description};

use crate::pipeline::PipelineError;

#[derive(Debug, Serialize)]
#[serde(rename = "GenerationOutput")]
struct GenerationOutputXml {
    #[serde(rename = "Totals")]
    totals: TotalsXml,
    #[serde(rename = "MaxEmissionGenerators")]
    max_emission_generators: MaxEmissionGeneratorsXml,
    #[serde(rename = "ActualHeatRates")]
    actual_heat_rates: ActualHeatRatesXml,
}

#[derive(Debug, Serialize)]
struct TotalsXml {
    #[serde(rename = "Generator")]
    generators: Vec<TotalXml>,
}

#[derive(Debug, Serialize)]
struct TotalXml {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Total")]
    total: String,
}

#[derive(Debug, Serialize)]
struct MaxEmissionGeneratorsXml {
    #[serde(rename = "Day")]
    days: Vec<DayXml>,
}

#[derive(Debug, Serialize)]
struct DayXml {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Emission")]
    emission: String,
}

#[derive(Debug, Serialize)]
struct ActualHeatRatesXml {
    #[serde(rename = "ActualHeatRate")]
    heat_rates: Vec<ActualHeatRateXml>,
}

#[derive(Debug, Serialize)]
struct ActualHeatRateXml {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "HeatRate")]
    heat_rate: String,
}

const DAY_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

// Trailing zeros from decimal scale arithmetic are stripped so that the
// same input always serializes to the same bytes.
fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

fn total_xml(row: &TotalRow) -> TotalXml {
    TotalXml {
        name: row.name.clone(),
        total: format_decimal(row.total),
    }
}

fn day_xml(row: &PeakEmissionRow) -> Result<DayXml, PipelineError> {
    Ok(DayXml {
        name: row.name.clone(),
        date: row
            .date
            .format(DAY_FORMAT)
            .map_err(|e| PipelineError::Serialize(e.to_string()))?,
        emission: format_decimal(row.emission),
    })
}

fn actual_heat_rate_xml(row: &HeatRateRow) -> ActualHeatRateXml {
    ActualHeatRateXml {
        name: row.name.clone(),
        // Zero net generation has no decimal quotient; the document
        // carries a NaN sentinel for it.
        heat_rate: match row.heat_rate {
            Some(rate) => format_decimal(rate),
            None => "NaN".to_string(),
        },
    }
}

/// Writes one `GenerationOutput` document per processed input file,
/// named `{input-stem}-Result.xml` in the configured output directory.
pub struct ResultXmlSink {
    output_dir: PathBuf,
}

impl ResultXmlSink {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn write(&self, metrics: &FileMetrics, input: &Path) -> Result<PathBuf, PipelineError> {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                PipelineError::MalformedInput(format!(
                    "input path {} has no usable file stem",
                    input.display()
                ))
            })?;
        let output_path = self.output_dir.join(format!("{stem}-Result.xml"));

        let doc = GenerationOutputXml {
            totals: TotalsXml {
                generators: metrics.totals.iter().map(total_xml).collect(),
            },
            max_emission_generators: MaxEmissionGeneratorsXml {
                days: metrics
                    .peak_emissions
                    .iter()
                    .map(day_xml)
                    .collect::<Result<_, _>>()?,
            },
            actual_heat_rates: ActualHeatRatesXml {
                heat_rates: metrics.heat_rates.iter().map(actual_heat_rate_xml).collect(),
            },
        };

        let body = quick_xml::se::to_string(&doc)
            .map_err(|e| PipelineError::Serialize(e.to_string()))?;

        if let Err(e) = fs::write(&output_path, format!("{body}\n")) {
            metrics::counter!("result_write_errors_total").increment(1);
            tracing::error!(
                output = %output_path.display(),
                error = %e,
                "failed to write result document"
            );
            return Err(PipelineError::Io(e));
        }

        Ok(output_path)
    }
}
