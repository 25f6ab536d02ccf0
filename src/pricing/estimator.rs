use crate::config::PricingConfig;
use crate::entities::{
    DayType, DemandLevel, RideContext, RideType, TimeOfDay, TrafficCondition, WeatherCondition,
};
use crate::error::Error;

/// Fixed ordered feature contract between the pipeline and the learned
/// regressor. The column order is part of the contract; encoders downstream
/// rely on it and on the categoricals being canonical.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector {
    pub ride_type: RideType,
    pub time_of_day: TimeOfDay,
    pub day_type: DayType,
    pub demand_level: DemandLevel,
    pub traffic_condition: TrafficCondition,
    pub weather_condition: WeatherCondition,
    pub pickup_zone: String,
    pub distance_km: f64,
}

impl FeatureVector {
    pub const COLUMNS: [&'static str; 8] = [
        "ride_type",
        "time_of_day",
        "day_type",
        "demand_level",
        "traffic_condition",
        "weather_condition",
        "pickup_zone",
        "distance",
    ];

    pub fn from_context(context: &RideContext) -> Self {
        Self {
            ride_type: context.ride_type,
            time_of_day: context.time_of_day,
            day_type: context.day_type,
            demand_level: context.demand_level,
            traffic_condition: context.traffic_condition,
            weather_condition: context.weather_condition,
            pickup_zone: context.pickup_zone.clone(),
            distance_km: context.distance_km,
        }
    }

    /// Categorical labels in contract order, used by encoders.
    pub fn categorical_labels(&self) -> [&str; 7] {
        [
            self.ride_type.as_str(),
            self.time_of_day.as_str(),
            self.day_type.as_str(),
            self.demand_level.as_str(),
            self.traffic_condition.as_str(),
            self.weather_condition.as_str(),
            self.pickup_zone.as_str(),
        ]
    }
}

/// Opaque learned regressor. Trained and encoded offline; the pipeline only
/// owns the feature contract and the fallback behavior around it.
pub trait BaseFarePredictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64, Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FareStrategy {
    /// Intercity formula branch; surge is forced to 1.0.
    LongDistanceFormula,
    Regressor,
    /// Regressor was unavailable, linear formula served instead.
    FormulaFallback,
}

/// Picks the base-fare strategy by distance threshold. Regressor failure is
/// recovered locally via the linear formula and logged, never surfaced.
pub fn estimate_base_fare(
    config: &PricingConfig,
    context: &RideContext,
    predictor: &dyn BaseFarePredictor,
) -> (f64, FareStrategy) {
    if context.distance_km > config.long_distance_threshold_km {
        return (
            context.distance_km * config.long_distance_rate,
            FareStrategy::LongDistanceFormula,
        );
    }

    let features = FeatureVector::from_context(context);

    match predictor.predict(&features) {
        Ok(base_fare) => (base_fare, FareStrategy::Regressor),
        Err(err) => {
            tracing::warn!(code = err.code, "regressor unavailable, using formula fallback");

            (
                config.fallback_base + context.distance_km * config.fallback_rate_per_km,
                FareStrategy::FormulaFallback,
            )
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::model_error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub struct FixedPredictor {
        pub fare: f64,
        pub calls: AtomicUsize,
    }

    impl FixedPredictor {
        pub fn new(fare: f64) -> Self {
            Self {
                fare,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl BaseFarePredictor for FixedPredictor {
        fn predict(&self, _: &FeatureVector) -> Result<f64, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.fare)
        }
    }

    pub struct FailingPredictor;

    impl BaseFarePredictor for FailingPredictor {
        fn predict(&self, _: &FeatureVector) -> Result<f64, Error> {
            Err(model_error())
        }
    }

    fn context(distance_km: f64) -> RideContext {
        RideContext {
            ride_type: RideType::Taxi,
            distance_km,
            time_of_day: TimeOfDay::Afternoon,
            day_type: DayType::Weekday,
            demand_level: DemandLevel::Medium,
            traffic_condition: TrafficCondition::Moderate,
            weather_condition: WeatherCondition::Clear,
            pickup_zone: "General".into(),
        }
    }

    #[test]
    fn long_distance_uses_formula_and_skips_regressor() {
        let config = PricingConfig::default();
        let predictor = FixedPredictor::new(120.0);

        let (fare, strategy) = estimate_base_fare(&config, &context(60.0), &predictor);

        assert_eq!(fare, 600.0);
        assert_eq!(strategy, FareStrategy::LongDistanceFormula);
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn threshold_is_exclusive() {
        let config = PricingConfig::default();
        let predictor = FixedPredictor::new(420.0);

        let (fare, strategy) = estimate_base_fare(&config, &context(50.0), &predictor);

        assert_eq!(strategy, FareStrategy::Regressor);
        assert_eq!(fare, 420.0);
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn regressor_failure_falls_back_to_linear_formula() {
        let config = PricingConfig::default();

        let (fare, strategy) = estimate_base_fare(&config, &context(12.5), &FailingPredictor);

        assert_eq!(fare, 50.0 + 12.5 * 12.0);
        assert_eq!(strategy, FareStrategy::FormulaFallback);
    }

    #[test]
    fn feature_vector_preserves_contract_order() {
        let features = FeatureVector::from_context(&context(12.5));

        assert_eq!(
            FeatureVector::COLUMNS,
            [
                "ride_type",
                "time_of_day",
                "day_type",
                "demand_level",
                "traffic_condition",
                "weather_condition",
                "pickup_zone",
                "distance",
            ]
        );
        assert_eq!(
            features.categorical_labels(),
            ["Taxi", "Afternoon", "Weekday", "Medium", "Moderate", "Clear", "General"]
        );
        assert_eq!(features.distance_km, 12.5);
    }
}
