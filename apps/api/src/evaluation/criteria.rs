//! Criterion Registry — the immutable catalogue of weighted hiring criteria.
//!
//! Built once at startup (built-in table or `CRITERIA_PATH` JSON file) and shared
//! read-only via `Arc<CriterionRegistry>`. Reweighting requires a restart.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One weighted hiring requirement, evaluated independently of the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Stable identifier; judgments and weights are keyed by it.
    pub name: String,
    /// Human-readable requirement handed to the model.
    pub requirement: String,
    /// Query sent to the retriever to collect evidence for this criterion.
    pub retrieval_query: String,
    /// In `[0, 1]`. Weights are used as-is and need not sum to 1.
    pub weight: f64,
}

impl Criterion {
    pub fn new(name: &str, requirement: &str, retrieval_query: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            requirement: requirement.to_string(),
            retrieval_query: retrieval_query.to_string(),
            weight,
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("criterion catalogue is empty")]
    Empty,

    #[error("criterion name must not be blank")]
    BlankName,

    #[error("duplicate criterion name '{0}'")]
    DuplicateName(String),

    #[error("criterion '{name}' has weight {weight}; expected a value in [0, 1]")]
    InvalidWeight { name: String, weight: f64 },

    #[error("failed to read criteria file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse criteria file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered, validated set of criteria.
#[derive(Debug, Clone)]
pub struct CriterionRegistry {
    criteria: Vec<Criterion>,
}

impl CriterionRegistry {
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, RegistryError> {
        if criteria.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for criterion in &criteria {
            if criterion.name.trim().is_empty() {
                return Err(RegistryError::BlankName);
            }
            if !seen.insert(criterion.name.as_str()) {
                return Err(RegistryError::DuplicateName(criterion.name.clone()));
            }
            if !criterion.weight.is_finite() || !(0.0..=1.0).contains(&criterion.weight) {
                return Err(RegistryError::InvalidWeight {
                    name: criterion.name.clone(),
                    weight: criterion.weight,
                });
            }
        }

        Ok(Self { criteria })
    }

    /// Loads a catalogue from a JSON array of criteria.
    pub fn from_json_file(path: &Path) -> Result<Self, RegistryError> {
        let raw = std::fs::read_to_string(path)?;
        let criteria: Vec<Criterion> = serde_json::from_str(&raw)?;
        Self::new(criteria)
    }

    /// Criteria in evaluation order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Name → weight mapping, as stored alongside every evaluation result.
    pub fn weights(&self) -> BTreeMap<String, f64> {
        self.criteria
            .iter()
            .map(|c| (c.name.clone(), c.weight))
            .collect()
    }
}

impl Default for CriterionRegistry {
    fn default() -> Self {
        Self {
            criteria: default_criteria(),
        }
    }
}

/// The built-in hiring profile.
pub fn default_criteria() -> Vec<Criterion> {
    vec![
        Criterion::new(
            "Degree & Experience (CS Master OR CS Bachelor + 2y)",
            "Candidate has either: (a) a Master's degree in Computer Science, OR \
             (b) a Bachelor's degree in Computer Science PLUS at least 2 years of work experience.",
            "education, degree, master, bachelor, computer science, work experience duration",
            0.25,
        ),
        Criterion::new(
            "Python & OCR (>=5 years)",
            "Candidate has 5+ years professional experience with Python AND OCR development \
             (e.g., Tesseract, OpenCV, pytesseract, AWS Textract, Azure Computer Vision, Google Vision).",
            "python experience years, OCR, pytesseract, tesseract, opencv, textract, google vision, azure computer vision",
            0.35,
        ),
        Criterion::new(
            "OOP Language: C++ or Java",
            "Candidate has programming experience with object-oriented languages similar to Python \
             such as C++ or Java.",
            "C++, Java, object oriented, OOP, classes, interfaces",
            0.20,
        ),
        Criterion::new(
            "SQL & Cloud (Azure/AWS/GCP)",
            "Candidate has direct experience with SQL and at least one major cloud (Azure, AWS, or GCP).",
            "SQL, PostgreSQL, MySQL, T-SQL, BigQuery, Azure, AWS, GCP, cloud services",
            0.20,
        ),
    ]
}
