use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{
    DayType, DemandLevel, RideContext, TimeOfDay, TrafficCondition, WeatherCondition,
};

/// Priced quote for a single ride request. Constructed once by the fare
/// composer and never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FareQuote {
    pub token: Uuid,
    pub base_fare: f64,
    pub surge_multiplier: f64,
    pub final_fare: f64,
    pub explanation: Explanation,
}

impl FareQuote {
    pub fn new(
        base_fare: f64,
        surge_multiplier: f64,
        final_fare: f64,
        explanation: Explanation,
    ) -> Self {
        Self {
            token: Uuid::new_v4(),
            base_fare,
            surge_multiplier,
            final_fare,
            explanation,
        }
    }
}

/// Human-readable factor summary. Informational only, never feeds back into
/// the computation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Explanation {
    pub traffic_impact: String,
    pub weather_impact: String,
    pub demand_impact: String,
}

impl Explanation {
    pub fn from_context(context: &RideContext) -> Self {
        Self {
            traffic_impact: format!("{} traffic", context.traffic_condition.as_str()),
            weather_impact: format!("{} conditions", context.weather_condition.as_str()),
            demand_impact: format!("{} demand", context.demand_level.as_str()),
        }
    }
}

/// Result of the auto-context pipeline: the quote plus every derived input
/// that produced it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SmartQuote {
    #[serde(flatten)]
    pub quote: FareQuote,
    pub context: TripContext,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripContext {
    pub distance_km: f64,
    pub duration_min: f64,
    pub weather: WeatherCondition,
    pub traffic: TrafficCondition,
    pub demand: DemandLevel,
    pub time_of_day: TimeOfDay,
    pub day_type: DayType,
}
