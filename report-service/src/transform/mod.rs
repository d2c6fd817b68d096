use std::collections::{btree_map::Entry, BTreeMap};

use generation_domain::{
    domain::{FileMetrics, FuelCategory, Generator, HeatRateRow, PeakEmissionRow, TotalRow},
    ReferenceData,
};
use rust_decimal::Decimal;
use time::Date;

use crate::pipeline::PipelineError;

/// Total generation value per generator:
/// `Σ over daily records (energy × price) × value_factor(category)`.
/// One row per generator, in parse order.
pub fn total_generation_value(
    generators: &[Generator],
    reference: &ReferenceData,
) -> Vec<TotalRow> {
    generators
        .iter()
        .map(|g| {
            let raw: Decimal = g.daily_records.iter().map(|r| r.energy * r.price).sum();
            TotalRow {
                name: g.name.clone(),
                total: raw * reference.value_factor(g.category),
            }
        })
        .collect()
}

/// Highest emission per calendar date across all gas and coal records:
/// `energy × emissions_rating × emissions_factor(category)` per record,
/// grouped by date. Strict `>` replacement keeps the first-encountered
/// record on ties. Rows come out in ascending date order; dates with no
/// fossil records are absent entirely.
pub fn daily_peak_emissions(
    generators: &[Generator],
    reference: &ReferenceData,
) -> Result<Vec<PeakEmissionRow>, PipelineError> {
    let mut by_date: BTreeMap<Date, PeakEmissionRow> = BTreeMap::new();

    for g in generators.iter().filter(|g| g.category.is_fossil()) {
        let factor = reference.emissions_factor(g.category)?;
        let rating = g.emissions_rating.unwrap_or(Decimal::ZERO);

        for record in &g.daily_records {
            let emission = record.energy * rating * factor;
            match by_date.entry(record.date) {
                Entry::Vacant(slot) => {
                    slot.insert(PeakEmissionRow {
                        name: g.name.clone(),
                        date: record.date,
                        emission,
                    });
                }
                Entry::Occupied(mut slot) => {
                    if emission > slot.get().emission {
                        slot.insert(PeakEmissionRow {
                            name: g.name.clone(),
                            date: record.date,
                            emission,
                        });
                    }
                }
            }
        }
    }

    Ok(by_date.into_values().collect())
}

/// Heat rate per coal generator: `total_heat_input / actual_net_generation`,
/// in parse order. A zero divisor yields `None` rather than an error.
pub fn actual_heat_rates(generators: &[Generator]) -> Vec<HeatRateRow> {
    generators
        .iter()
        .filter(|g| g.category == FuelCategory::Coal)
        .map(|g| {
            let heat = g.total_heat_input.unwrap_or(Decimal::ZERO);
            let net = g.actual_net_generation.unwrap_or(Decimal::ZERO);
            HeatRateRow {
                name: g.name.clone(),
                heat_rate: heat.checked_div(net),
            }
        })
        .collect()
}

/// Runs all three computations over one file's parsed generators.
pub fn calculate(
    generators: &[Generator],
    reference: &ReferenceData,
) -> Result<FileMetrics, PipelineError> {
    Ok(FileMetrics {
        totals: total_generation_value(generators, reference),
        peak_emissions: daily_peak_emissions(generators, reference)?,
        heat_rates: actual_heat_rates(generators),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use generation_domain::domain::GenerationRecord;
    use time::macros::date;

    fn wind(name: &str, category: FuelCategory, records: Vec<GenerationRecord>) -> Generator {
        Generator {
            name: name.to_string(),
            category,
            emissions_rating: None,
            total_heat_input: None,
            actual_net_generation: None,
            daily_records: records,
        }
    }

    fn gas(name: &str, rating: Decimal, records: Vec<GenerationRecord>) -> Generator {
        Generator {
            name: name.to_string(),
            category: FuelCategory::Gas,
            emissions_rating: Some(rating),
            total_heat_input: None,
            actual_net_generation: None,
            daily_records: records,
        }
    }

    fn coal(
        name: &str,
        rating: Decimal,
        heat: Decimal,
        net: Decimal,
        records: Vec<GenerationRecord>,
    ) -> Generator {
        Generator {
            name: name.to_string(),
            category: FuelCategory::Coal,
            emissions_rating: Some(rating),
            total_heat_input: Some(heat),
            actual_net_generation: Some(net),
            daily_records: records,
        }
    }

    fn day(date: Date, energy: i64, price: Decimal) -> GenerationRecord {
        GenerationRecord {
            date,
            energy: Decimal::new(energy, 0),
            price,
        }
    }

    #[test]
    fn onshore_wind_total_uses_onshore_factor() {
        // 100 × 10 × 0.946 = 946
        let generators = vec![wind(
            "W1",
            FuelCategory::OnshoreWind,
            vec![day(date!(2024 - 01 - 01), 100, Decimal::new(10, 0))],
        )];

        let totals = total_generation_value(&generators, &ReferenceData::default());
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].name, "W1");
        assert_eq!(totals[0].total, Decimal::new(946, 0));
    }

    #[test]
    fn offshore_wind_total_uses_offshore_factor() {
        // (100×10 + 50×20) × 0.265 = 530
        let generators = vec![wind(
            "W1",
            FuelCategory::OffshoreWind,
            vec![
                day(date!(2024 - 01 - 01), 100, Decimal::new(10, 0)),
                day(date!(2024 - 01 - 02), 50, Decimal::new(20, 0)),
            ],
        )];

        let totals = total_generation_value(&generators, &ReferenceData::default());
        assert_eq!(totals[0].total, Decimal::new(530, 0));
    }

    #[test]
    fn totals_preserve_parse_order_and_cover_every_generator() {
        let generators = vec![
            wind("W1", FuelCategory::OnshoreWind, vec![]),
            gas("G1", Decimal::new(4, 1), vec![]),
            coal(
                "C1",
                Decimal::new(5, 1),
                Decimal::new(100, 0),
                Decimal::new(50, 0),
                vec![],
            ),
        ];

        let totals = total_generation_value(&generators, &ReferenceData::default());
        let names: Vec<_> = totals.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["W1", "G1", "C1"]);
        // No daily records means a zero contribution, not an error.
        assert!(totals.iter().all(|t| t.total == Decimal::ZERO));
    }

    #[test]
    fn sole_coal_record_is_the_days_peak() {
        // 200 × 0.5 × 0.812 = 81.2
        let generators = vec![coal(
            "C1",
            Decimal::new(5, 1),
            Decimal::new(100, 0),
            Decimal::new(50, 0),
            vec![day(date!(2024 - 01 - 01), 200, Decimal::new(7, 0))],
        )];

        let peaks =
            daily_peak_emissions(&generators, &ReferenceData::default()).expect("should compute");
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].name, "C1");
        assert_eq!(peaks[0].date, date!(2024 - 01 - 01));
        assert_eq!(peaks[0].emission, Decimal::new(812, 1));
    }

    #[test]
    fn peak_dominates_all_candidates_for_its_date() {
        let d = date!(2024 - 01 - 01);
        let generators = vec![
            gas(
                "G1",
                Decimal::new(4, 1),
                vec![day(d, 100, Decimal::new(8, 0))],
            ),
            // 300 × 0.5 × 0.812 = 121.8, beats 100 × 0.4 × 0.562 = 22.48
            coal(
                "C1",
                Decimal::new(5, 1),
                Decimal::new(100, 0),
                Decimal::new(50, 0),
                vec![day(d, 300, Decimal::new(7, 0))],
            ),
        ];

        let peaks =
            daily_peak_emissions(&generators, &ReferenceData::default()).expect("should compute");
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].name, "C1");
        assert_eq!(peaks[0].emission, Decimal::new(1218, 1));
    }

    #[test]
    fn peak_tie_keeps_first_encountered_record() {
        let d = date!(2024 - 01 - 01);
        // Both emit 100 × 0.4 × 0.562 = 22.48.
        let generators = vec![
            gas(
                "G1",
                Decimal::new(4, 1),
                vec![day(d, 100, Decimal::new(8, 0))],
            ),
            gas(
                "G2",
                Decimal::new(4, 1),
                vec![day(d, 100, Decimal::new(8, 0))],
            ),
        ];

        let peaks =
            daily_peak_emissions(&generators, &ReferenceData::default()).expect("should compute");
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].name, "G1");
    }

    #[test]
    fn peaks_cover_distinct_dates_in_ascending_order() {
        let generators = vec![gas(
            "G1",
            Decimal::new(4, 1),
            vec![
                day(date!(2024 - 01 - 03), 100, Decimal::new(8, 0)),
                day(date!(2024 - 01 - 01), 100, Decimal::new(8, 0)),
            ],
        )];

        let peaks =
            daily_peak_emissions(&generators, &ReferenceData::default()).expect("should compute");
        let dates: Vec<_> = peaks.iter().map(|p| p.date).collect();
        assert_eq!(dates, [date!(2024 - 01 - 01), date!(2024 - 01 - 03)]);
    }

    #[test]
    fn wind_only_input_yields_no_peak_rows() {
        let generators = vec![wind(
            "W1",
            FuelCategory::OnshoreWind,
            vec![day(date!(2024 - 01 - 01), 100, Decimal::new(10, 0))],
        )];

        let peaks =
            daily_peak_emissions(&generators, &ReferenceData::default()).expect("should compute");
        assert!(peaks.is_empty());
    }

    #[test]
    fn heat_rate_divides_heat_input_by_net_generation() {
        let generators = vec![coal(
            "C1",
            Decimal::new(5, 1),
            Decimal::new(5000, 0),
            Decimal::new(2500, 0),
            vec![],
        )];

        let rates = actual_heat_rates(&generators);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].heat_rate, Some(Decimal::new(2, 0)));
    }

    #[test]
    fn zero_net_generation_yields_sentinel_not_error() {
        let generators = vec![coal(
            "C1",
            Decimal::new(5, 1),
            Decimal::new(5000, 0),
            Decimal::ZERO,
            vec![],
        )];

        let rates = actual_heat_rates(&generators);
        assert_eq!(rates[0].heat_rate, None);
    }

    #[test]
    fn heat_rates_cover_coal_generators_only() {
        let generators = vec![
            wind("W1", FuelCategory::OnshoreWind, vec![]),
            gas("G1", Decimal::new(4, 1), vec![]),
            coal(
                "C1",
                Decimal::new(5, 1),
                Decimal::new(100, 0),
                Decimal::new(50, 0),
                vec![],
            ),
        ];

        let rates = actual_heat_rates(&generators);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].name, "C1");
    }

    #[test]
    fn calculate_produces_all_three_sections() {
        let d = date!(2024 - 01 - 01);
        let generators = vec![
            wind(
                "W1",
                FuelCategory::OnshoreWind,
                vec![day(d, 100, Decimal::new(10, 0))],
            ),
            coal(
                "C1",
                Decimal::new(5, 1),
                Decimal::new(5000, 0),
                Decimal::new(2500, 0),
                vec![day(d, 200, Decimal::new(7, 0))],
            ),
        ];

        let metrics = calculate(&generators, &ReferenceData::default()).expect("should compute");
        assert_eq!(metrics.totals.len(), 2);
        assert_eq!(metrics.peak_emissions.len(), 1);
        assert_eq!(metrics.heat_rates.len(), 1);
    }
}
