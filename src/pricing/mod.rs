mod compose;
mod context;
mod estimator;
mod surge;

pub use compose::quote;
pub use context::{estimate_traffic, predict_demand, traffic_by_hour};
pub use estimator::{estimate_base_fare, BaseFarePredictor, FareStrategy, FeatureVector};
pub use surge::{final_fare, multiplier};

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
