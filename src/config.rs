use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Pricing policy knobs. The long-distance threshold and rates are policy
/// boundaries, not incidental constants, so they live here instead of being
/// buried in the estimator.
#[derive(Clone, Debug)]
pub struct PricingConfig {
    /// Trips longer than this are priced by formula and exempt from surge.
    pub long_distance_threshold_km: f64,
    /// Per-km rate on the long-distance branch.
    pub long_distance_rate: f64,
    /// Linear formula used when the regressor is unavailable:
    /// `fallback_base + distance * fallback_rate_per_km`.
    pub fallback_base: f64,
    pub fallback_rate_per_km: f64,
    /// Plausibility bounds on the crow-flight distance between coordinate
    /// pairs; anything outside is treated as bad geocoding.
    pub min_crow_distance_km: f64,
    pub max_crow_distance_km: f64,
    /// Safe route estimate served when every resolution strategy fails.
    pub default_distance_km: f64,
    pub default_duration_min: f64,
    /// Budget for each outbound routing/geocoding/weather call.
    pub upstream_timeout: Duration,
    pub model_path: PathBuf,
    pub metrics_path: PathBuf,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            long_distance_threshold_km: 50.0,
            long_distance_rate: 10.0,
            fallback_base: 50.0,
            fallback_rate_per_km: 12.0,
            min_crow_distance_km: 0.1,
            max_crow_distance_km: 1000.0,
            default_distance_km: 15.0,
            default_duration_min: 30.0,
            upstream_timeout: Duration::from_secs(5),
            model_path: "ml/model.json".into(),
            metrics_path: "ml/model_metrics.json".into(),
        }
    }
}

impl PricingConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("MODEL_PATH") {
            config.model_path = PathBuf::from(path);
        }

        if let Ok(path) = env::var("MODEL_METRICS_PATH") {
            config.metrics_path = PathBuf::from(path);
        }

        config
    }
}
