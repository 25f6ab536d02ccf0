use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{model_error, Error};
use crate::pricing::{BaseFarePredictor, FeatureVector};

/// Linear regression exported offline to JSON: an intercept, a per-km
/// distance coefficient and one weight table per categorical column. The
/// tables cover the canonical vocabularies; unknown categories (free-text
/// pickup zones mostly) contribute nothing, mirroring an encoder that
/// ignores unknown values.
#[derive(Debug, Deserialize)]
pub struct LinearFareModel {
    intercept: f64,
    distance_coefficient: f64,
    weights: HashMap<String, HashMap<String, f64>>,
}

impl LinearFareModel {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&raw)?;

        for column in FeatureVector::COLUMNS[..7].iter().copied() {
            if !model.weights.contains_key(column) {
                tracing::error!(column, "model artifact is missing a feature column");
                return Err(model_error());
            }
        }

        Ok(model)
    }

    fn weight(&self, column: &str, category: &str) -> f64 {
        self.weights
            .get(column)
            .and_then(|table| table.get(category))
            .copied()
            .unwrap_or(0.0)
    }
}

impl BaseFarePredictor for LinearFareModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, Error> {
        let mut fare = self.intercept + self.distance_coefficient * features.distance_km;

        for (column, label) in FeatureVector::COLUMNS
            .iter()
            .copied()
            .zip(features.categorical_labels())
        {
            fare += self.weight(column, label);
        }

        Ok(fare.max(0.0))
    }
}

/// Lazily loaded, process-wide model handle. The artifact is read at most
/// once; a failed load is cached too, so every later call takes the formula
/// fallback without touching the filesystem again.
pub struct LazyModel {
    path: PathBuf,
    cell: OnceLock<Option<LinearFareModel>>,
}

impl LazyModel {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cell: OnceLock::new(),
        }
    }
}

impl BaseFarePredictor for LazyModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, Error> {
        let model = self.cell.get_or_init(|| {
            match LinearFareModel::from_file(&self.path) {
                Ok(model) => {
                    tracing::info!(path = %self.path.display(), "fare model loaded");
                    Some(model)
                }
                Err(err) => {
                    tracing::error!(
                        path = %self.path.display(),
                        code = err.code,
                        "failed to load fare model"
                    );
                    None
                }
            }
        });

        match model {
            Some(model) => model.predict(features),
            None => Err(model_error()),
        }
    }
}
