use std::collections::HashSet;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use quote_core::{PlanCatalog, PricingPlan};

/// Errors that can occur when loading the pricing plan catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Duplicate plan id '{0}'")]
    DuplicatePlanId(String),

    #[error("Plan '{plan_id}' has a non-positive suggested multiplier: {value}")]
    InvalidMultiplier { plan_id: String, value: Decimal },

    #[error("The catalog file contains no plans")]
    EmptyCatalog,
}

impl From<csv::Error> for CatalogLoaderError {
    fn from(err: csv::Error) -> Self {
        CatalogLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the plan catalog CSV file.
///
/// The CSV format:
/// - `plan_id`: Stable plan identifier (e.g., `profesional`)
/// - `label`: Display name shown on the quote form
/// - `tier_rank`: Ordering rank, lowest tier first
/// - `suggested_multiplier`: Suggested project-value multiplier (e.g., 1.15)
/// - `features`: Feature labels separated by `;`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlanRecord {
    pub plan_id: String,
    pub label: String,
    pub tier_rank: i32,
    pub suggested_multiplier: Decimal,
    pub features: String,
}

/// Loader for the pricing plan catalog from CSV files.
///
/// The catalog is read-only input to the pricing engine: it is loaded once
/// at process start and handed to the engine by reference. Nothing in the
/// engine ever writes it back.
pub struct PlanCatalogLoader;

impl PlanCatalogLoader {
    /// Parse plan records from a CSV reader.
    ///
    /// Returns a vector of parsed records. The reader can be any type that
    /// implements `Read`, such as a file or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PlanRecord>, CatalogLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: PlanRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a [`PlanCatalog`] from parsed records.
    ///
    /// # Errors
    ///
    /// Rejects an empty record set, duplicate plan ids, and non-positive
    /// suggested multipliers. The first offending record wins.
    pub fn build(records: &[PlanRecord]) -> Result<PlanCatalog, CatalogLoaderError> {
        if records.is_empty() {
            return Err(CatalogLoaderError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        let mut plans = Vec::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.plan_id.as_str()) {
                return Err(CatalogLoaderError::DuplicatePlanId(record.plan_id.clone()));
            }
            if record.suggested_multiplier <= Decimal::ZERO {
                return Err(CatalogLoaderError::InvalidMultiplier {
                    plan_id: record.plan_id.clone(),
                    value: record.suggested_multiplier,
                });
            }

            plans.push(PricingPlan {
                id: record.plan_id.clone(),
                label: record.label.clone(),
                tier_rank: record.tier_rank,
                suggested_multiplier: record.suggested_multiplier,
                features: record
                    .features
                    .split(';')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .collect(),
            });
        }

        let catalog = PlanCatalog::new(plans);
        tracing::info!(plans = catalog.len(), "built plan catalog");
        Ok(catalog)
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(reader: R) -> Result<PlanCatalog, CatalogLoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const CSV: &str = "\
plan_id,label,tier_rank,suggested_multiplier,features
basico,Básico,1,1.00,catalogo de materiales;cotizaciones ilimitadas
profesional,Profesional,2,1.15,catalogo de materiales;informes; exportacion pdf
";

    #[test]
    fn parse_reads_all_records() {
        let records = PlanCatalogLoader::parse(CSV.as_bytes()).expect("Should parse CSV");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].plan_id, "basico");
        assert_eq!(records[1].suggested_multiplier, dec!(1.15));
    }

    #[test]
    fn build_splits_and_trims_features() {
        let records = PlanCatalogLoader::parse(CSV.as_bytes()).expect("Should parse CSV");

        let catalog = PlanCatalogLoader::build(&records).expect("Should build catalog");

        let plan = catalog.get("profesional").expect("plan present");
        assert_eq!(
            plan.features,
            vec!["catalogo de materiales", "informes", "exportacion pdf"]
        );
    }

    #[test]
    fn build_orders_catalog_by_tier_rank() {
        let csv = "\
plan_id,label,tier_rank,suggested_multiplier,features
empresa,Empresa,3,1.35,multiusuario
basico,Básico,1,1.00,catalogo
";
        let catalog = PlanCatalogLoader::load(csv.as_bytes()).expect("Should load");

        assert_eq!(catalog.plan_ids(), vec!["basico", "empresa"]);
    }

    #[test]
    fn build_rejects_duplicate_plan_ids() {
        let csv = "\
plan_id,label,tier_rank,suggested_multiplier,features
basico,Básico,1,1.00,catalogo
basico,Básico bis,2,1.10,catalogo
";
        let records = PlanCatalogLoader::parse(csv.as_bytes()).expect("Should parse CSV");

        let result = PlanCatalogLoader::build(&records);

        assert_eq!(
            result,
            Err(CatalogLoaderError::DuplicatePlanId("basico".to_string()))
        );
    }

    #[test]
    fn build_rejects_non_positive_multiplier() {
        let csv = "\
plan_id,label,tier_rank,suggested_multiplier,features
basico,Básico,1,0,catalogo
";
        let records = PlanCatalogLoader::parse(csv.as_bytes()).expect("Should parse CSV");

        let result = PlanCatalogLoader::build(&records);

        assert_eq!(
            result,
            Err(CatalogLoaderError::InvalidMultiplier {
                plan_id: "basico".to_string(),
                value: dec!(0),
            })
        );
    }

    #[test]
    fn build_rejects_an_empty_catalog() {
        let csv = "plan_id,label,tier_rank,suggested_multiplier,features\n";
        let records = PlanCatalogLoader::parse(csv.as_bytes()).expect("Should parse CSV");

        assert_eq!(
            PlanCatalogLoader::build(&records),
            Err(CatalogLoaderError::EmptyCatalog)
        );
    }

    #[test]
    fn parse_surfaces_malformed_rows() {
        let csv = "\
plan_id,label,tier_rank,suggested_multiplier,features
basico,Básico,not-a-rank,1.00,catalogo
";
        let result = PlanCatalogLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(CatalogLoaderError::CsvParse(_))));
    }
}
