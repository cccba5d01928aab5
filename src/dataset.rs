//! The bundled atlas dataset: use-case records, intervention frameworks, and
//! supporting reference collections.
//!
//! The dataset is loaded once at startup and never mutated. Every lookup is a
//! linear scan; the collections top out at a few dozen records.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{AtlasError, Result};

const BUNDLED_DATA: &str = include_str!("../data/atlas_data.json");

/// Organizational sector of a use case.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Sector {
    Private,
    Public,
    Nonprofit,
    #[serde(rename = "Public/Education")]
    PublicEducation,
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sector::Private => "Private",
            Sector::Public => "Public",
            Sector::Nonprofit => "Nonprofit",
            Sector::PublicEducation => "Public/Education",
        };
        write!(f, "{label}")
    }
}

/// A citation backing a use case. The first source in a record is treated as
/// primary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub publisher: String,
    pub footnote: String,
}

/// One documented real-world deployment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCase {
    pub id: String,
    pub organization: String,
    pub sector: Sector,
    pub industry: String,
    pub use_case_category: String,
    pub specific_application: String,
    pub challenge: String,
    pub solution: String,
    /// Display-ordered outcome statements; summary views show the first three.
    pub results: Vec<String>,
    pub key_insight: String,
    pub sources: Vec<Source>,
    pub tags: Vec<String>,
    pub last_reviewed: NaiveDate,
}

/// A category-level description of an intervention type. Use cases are
/// associated with at most one framework by heuristic text matching, not by a
/// stored key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Framework {
    pub intervention_type: String,
    pub sub_category: String,
    pub value_proposition: String,
    /// Free text scanned for a use case's category during matching.
    pub typical_use_cases: String,
    /// Free text containing one of Low/Medium/High/Very High, possibly as a
    /// compound like "Low to Medium". The raw form is load-bearing for the
    /// timeline filter and fit scorer.
    pub difficulty_level: String,
    pub technology_maturity: String,
    pub time_to_value: String,
    pub investment_level: String,
    pub key_success_factors: String,
    pub common_challenges: String,
    #[serde(rename = "ROI_timeline")]
    pub roi_timeline: String,
    /// Organization names scanned for a use case's organization during
    /// matching.
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplementationGuide {
    pub dimension: String,
    pub category: String,
    pub top_use_cases: Vec<String>,
    pub primary_value: String,
    #[serde(rename = "typical_ROI")]
    pub typical_roi: String,
    pub quick_wins: Vec<String>,
    pub strategic_plays: Vec<String>,
    pub key_sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionTaxonomy {
    pub id: String,
    pub name: String,
    pub definition: String,
    pub examples: Option<String>,
    pub typical_value: Option<String>,
    pub typical_difficulty: String,
    pub tech: Vec<String>,
    pub recommended_metrics: Option<String>,
    pub time_to_value: Option<String>,
    pub success_factors: String,
    pub last_reviewed: NaiveDate,
}

/// Raw shape of the dataset file: four top-level collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasData {
    pub use_cases: Vec<UseCase>,
    pub frameworks: Vec<Framework>,
    pub implementation_guide: Vec<ImplementationGuide>,
    pub intervention_taxonomy: Vec<InterventionTaxonomy>,
}

/// Immutable, in-memory view over the loaded collections.
#[derive(Debug, Clone)]
pub struct Dataset {
    data: AtlasData,
}

impl Dataset {
    /// Load the dataset according to configuration: an external file when
    /// `ATLAS_DATA_PATH` is set, the bundled dataset otherwise.
    pub fn load(config: &Config) -> Result<Self> {
        match &config.data_path {
            Some(path) => Self::from_path(path),
            None => Self::from_bundled(),
        }
    }

    /// Parse the dataset compiled into the binary.
    pub fn from_bundled() -> Result<Self> {
        let dataset = Self::from_json(BUNDLED_DATA)?;
        debug!(
            use_cases = dataset.use_cases().len(),
            frameworks = dataset.frameworks().len(),
            "loaded bundled dataset"
        );
        Ok(dataset)
    }

    /// Parse the dataset from an external file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| AtlasError::Dataset {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_json(&raw)
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let data: AtlasData = serde_json::from_str(raw).map_err(|e| AtlasError::Dataset {
            message: format!("malformed dataset: {e}"),
        })?;
        Ok(Self { data })
    }

    pub fn use_cases(&self) -> &[UseCase] {
        &self.data.use_cases
    }

    pub fn frameworks(&self) -> &[Framework] {
        &self.data.frameworks
    }

    pub fn implementation_guide(&self) -> &[ImplementationGuide] {
        &self.data.implementation_guide
    }

    pub fn intervention_taxonomy(&self) -> &[InterventionTaxonomy] {
        &self.data.intervention_taxonomy
    }

    /// Exact-id lookup. A miss is an empty result, never an error.
    pub fn use_case_by_id(&self, id: &str) -> Option<&UseCase> {
        self.data.use_cases.iter().find(|uc| uc.id == id)
    }

    /// All distinct industries, sorted.
    pub fn industries(&self) -> Vec<&str> {
        let mut industries: Vec<&str> = self
            .data
            .use_cases
            .iter()
            .map(|uc| uc.industry.as_str())
            .collect();
        industries.sort_unstable();
        industries.dedup();
        industries
    }

    /// All distinct sectors, sorted.
    pub fn sectors(&self) -> Vec<Sector> {
        let mut sectors: Vec<Sector> = self.data.use_cases.iter().map(|uc| uc.sector).collect();
        sectors.sort_unstable();
        sectors.dedup();
        sectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_serde_roundtrip() {
        let json = "\"Public/Education\"";
        let sector: Sector = serde_json::from_str(json).unwrap();
        assert_eq!(sector, Sector::PublicEducation);
        assert_eq!(serde_json::to_string(&sector).unwrap(), json);
    }

    #[test]
    fn test_malformed_dataset_is_a_dataset_error() {
        let result = Dataset::from_json("{ not json");
        assert!(matches!(result, Err(AtlasError::Dataset { .. })));
    }

    #[test]
    fn test_bundled_dataset_parses() {
        let dataset = Dataset::from_bundled().unwrap();
        assert!(!dataset.use_cases().is_empty());
        assert!(!dataset.frameworks().is_empty());
    }

    #[test]
    fn test_use_case_by_id_miss_is_none() {
        let dataset = Dataset::from_bundled().unwrap();
        assert!(dataset.use_case_by_id("no-such-id").is_none());
    }
}
