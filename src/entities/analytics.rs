use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DemandTrendRow {
    pub demand_level: String,
    pub avg_fare: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimePriceRow {
    pub time_of_day: String,
    pub avg_fare: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RideDistributionRow {
    pub ride_type: String,
    pub count: i64,
}

/// Offline evaluation metrics shipped next to the model artifact.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelMetrics {
    pub r2_score: f64,
    pub mae: f64,
    pub rmse: f64,
}
