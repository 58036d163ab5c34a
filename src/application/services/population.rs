//! World Bank population source
//!
//! Builds a three-level tree: the world, one node per region, and one leaf
//! per country sized by its population. Two JSON documents are fetched: the
//! per-country population indicator and the country list with region
//! membership. Both follow the World Bank `[meta, rows]` layout.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::application::services::TreeSource;
use crate::application::{ApplicationError, ApplicationResult, SourceResultExt};
use crate::config::PopulationConfig;
use crate::domain::{ColorSource, DatasetPaths, TreeArena, TreeBuilder};
use crate::infrastructure::traits::HttpClient;

/// Region value the World Bank uses for non-country groupings.
const AGGREGATES_REGION: &str = "aggregates";

/// Tree source backed by the World Bank API.
pub struct PopulationSource {
    http: Arc<dyn HttpClient>,
    config: PopulationConfig,
}

impl PopulationSource {
    pub fn new(config: PopulationConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { http, config }
    }

    fn fetch(&self, url: &str) -> ApplicationResult<Value> {
        self.http
            .get_json(url)
            .with_context(&format!("fetch {}", url))
    }

    /// Builds the tree from already-fetched documents.
    pub fn from_json(
        populations: &Value,
        regions: &Value,
        root_label: &str,
        colors: Box<dyn ColorSource>,
    ) -> ApplicationResult<TreeArena> {
        let populations = parse_populations(rows(populations, "population data")?);
        let regions = parse_regions(rows(regions, "region data")?);
        debug!(
            "from_json: {} countries with population, {} regions",
            populations.len(),
            regions.len()
        );

        let mut builder = TreeBuilder::new(Box::new(DatasetPaths), colors);
        let root = builder.root(root_label, 0)?;
        for (region, members) in &regions {
            let countries: Vec<&(String, u64)> = populations
                .iter()
                .filter(|(country, _)| members.contains(country))
                .collect();
            if countries.is_empty() {
                debug!("from_json: skipping region without data: {}", region);
                continue;
            }
            let region_idx = builder.child(root, region.as_str(), 0)?;
            for (country, population) in countries {
                builder.child(region_idx, country.as_str(), *population)?;
            }
        }
        Ok(builder.finish())
    }
}

impl TreeSource for PopulationSource {
    fn describe(&self) -> String {
        format!("population ({})", self.config.populations_url)
    }

    #[instrument(level = "debug", skip(self, colors))]
    fn load(&self, colors: Box<dyn ColorSource>) -> ApplicationResult<TreeArena> {
        let populations = self.fetch(&self.config.populations_url)?;
        let regions = self.fetch(&self.config.regions_url)?;
        Self::from_json(&populations, &regions, &self.config.root_label, colors)
    }
}

/// The data rows of a `[meta, rows]` document.
fn rows<'a>(document: &'a Value, what: &str) -> ApplicationResult<&'a [Value]> {
    document
        .as_array()
        .and_then(|parts| parts.get(1))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| {
            ApplicationError::unavailable(
                format!("parse {}", what),
                "expected a [meta, rows] array",
            )
        })
}

/// Countries with a positive population, in first-seen order. Later
/// duplicates of a country are ignored.
fn parse_populations(rows: &[Value]) -> Vec<(String, u64)> {
    let mut seen = HashSet::new();
    let mut countries = Vec::new();
    for row in rows {
        let Some(name) = row["country"]["value"].as_str().map(str::trim) else {
            warn!("parse_populations: row without country name");
            continue;
        };
        if seen.contains(name) {
            continue;
        }
        if let Some(population) = population_value(&row["value"]) {
            seen.insert(name.to_string());
            countries.push((name.to_string(), population));
        }
    }
    countries
}

/// Integer population from a number or numeric string; `None` if absent,
/// non-numeric or not positive.
fn population_value(value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(truncate)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    };
    parsed.filter(|&population| population > 0)
}

fn truncate(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0 && value < u64::MAX as f64).then(|| value.trunc() as u64)
}

/// Regions in first-seen order with their member country names.
fn parse_regions(rows: &[Value]) -> Vec<(String, HashSet<String>)> {
    let mut order: HashMap<String, usize> = HashMap::new();
    let mut regions: Vec<(String, HashSet<String>)> = Vec::new();
    for row in rows {
        let (Some(region), Some(name)) = (
            row["region"]["value"].as_str().map(str::trim),
            row["name"].as_str().map(str::trim),
        ) else {
            continue;
        };
        if region.is_empty() || region.eq_ignore_ascii_case(AGGREGATES_REGION) {
            continue;
        }
        let slot = *order.entry(region.to_string()).or_insert_with(|| {
            regions.push((region.to_string(), HashSet::new()));
            regions.len() - 1
        });
        regions[slot].1.insert(name.to_string());
    }
    regions
}
