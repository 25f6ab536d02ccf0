use crate::config::PricingConfig;
use crate::entities::{Explanation, FareQuote, RideContext};
use crate::error::{validation_error, Error};
use crate::pricing::{estimator, round2, surge, FareStrategy};

/// Fare composer: a linear pipeline with a single fork at base-fare
/// computation (long-distance formula vs regressor). Only input validation
/// can fail; every downstream failure is absorbed by a fallback.
///
/// The base fare is rounded independently of the final fare, which is
/// computed from the unrounded base. The stored pair can therefore disagree
/// with `round(base_fare * multiplier, 2)` by at most 0.01; that drift is
/// accepted for compatibility and covered by a test.
pub fn quote(
    config: &PricingConfig,
    context: &RideContext,
    predictor: &dyn estimator::BaseFarePredictor,
) -> Result<FareQuote, Error> {
    if !context.distance_km.is_finite() || context.distance_km <= 0.0 {
        return Err(validation_error("distance must be greater than zero"));
    }

    let (base_fare, strategy) = estimator::estimate_base_fare(config, context, predictor);

    // Intercity trips are a policy boundary: no demand surge beyond the
    // long-distance threshold.
    let multiplier = match strategy {
        FareStrategy::LongDistanceFormula => 1.0,
        _ => surge::multiplier(
            context.demand_level,
            context.time_of_day,
            context.traffic_condition,
            context.weather_condition,
        ),
    };

    let final_fare = surge::final_fare(base_fare, multiplier);

    Ok(FareQuote::new(
        round2(base_fare),
        multiplier,
        final_fare,
        Explanation::from_context(context),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        DayType, DemandLevel, RideType, TimeOfDay, TrafficCondition, WeatherCondition,
    };
    use crate::pricing::estimator::tests::{FailingPredictor, FixedPredictor};
    use std::sync::atomic::Ordering;

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
    fn quiet_afternoon_has_no_surge() {
        let config = PricingConfig::default();
        let predictor = FixedPredictor::new(180.0);

        let quote = quote(&config, &context(12.5), &predictor).unwrap();

        assert_eq!(quote.surge_multiplier, 1.0);
        assert_eq!(quote.final_fare, quote.base_fare);
    }

    #[test]
    fn long_distance_taxi_is_formula_priced_without_surge() {
        let config = PricingConfig::default();
        let predictor = FixedPredictor::new(9999.0);

        let mut ctx = context(60.0);
        // Conditions that would normally surge must not apply intercity.
        ctx.demand_level = DemandLevel::High;
        ctx.time_of_day = TimeOfDay::Evening;
        ctx.traffic_condition = TrafficCondition::Heavy;
        ctx.weather_condition = WeatherCondition::Rainy;

        let quote = quote(&config, &ctx, &predictor).unwrap();

        assert_eq!(quote.base_fare, 600.0);
        assert_eq!(quote.surge_multiplier, 1.0);
        assert_eq!(quote.final_fare, 600.0);
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn full_surge_applies_below_threshold() {
        let config = PricingConfig::default();
        let predictor = FixedPredictor::new(100.0);

        let mut ctx = context(12.5);
        ctx.demand_level = DemandLevel::High;
        ctx.time_of_day = TimeOfDay::Evening;
        ctx.traffic_condition = TrafficCondition::Heavy;
        ctx.weather_condition = WeatherCondition::Rainy;

        let quote = quote(&config, &ctx, &predictor).unwrap();

        assert_eq!(quote.surge_multiplier, 1.53);
        assert_eq!(quote.final_fare, 153.0);
    }

    #[test]
    fn regressor_outage_never_reaches_the_caller() {
        let config = PricingConfig::default();

        let quote = quote(&config, &context(12.5), &FailingPredictor).unwrap();

        assert_eq!(quote.base_fare, 200.0);
        assert_eq!(quote.final_fare, 200.0);
    }

    #[test]
    fn final_fare_tracks_unrounded_base_within_a_cent() {
        let config = PricingConfig::default();
        // Base with a third decimal so the two roundings can disagree.
        let predictor = FixedPredictor::new(100.255);

        let mut ctx = context(10.0);
        ctx.time_of_day = TimeOfDay::Morning;

        let quote = quote(&config, &ctx, &predictor).unwrap();

        assert_eq!(quote.surge_multiplier, 1.15);
        let recomputed = (quote.base_fare * quote.surge_multiplier * 100.0).round() / 100.0;
        assert!((quote.final_fare - recomputed).abs() <= 0.01);
    }

    #[test]
    fn nonpositive_distance_is_rejected() {
        let config = PricingConfig::default();
        let predictor = FixedPredictor::new(100.0);

        let mut ctx = context(12.5);
        ctx.distance_km = 0.0;
        assert!(quote(&config, &ctx, &predictor).is_err());

        ctx.distance_km = f64::NAN;
        assert!(quote(&config, &ctx, &predictor).is_err());
    }
}
