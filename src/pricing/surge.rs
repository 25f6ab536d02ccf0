use crate::entities::{DemandLevel, TimeOfDay, TrafficCondition, WeatherCondition};
use crate::pricing::round2;

/// Deterministic surge rule table. Additions are independent and cumulative:
///
/// | condition       | addition |
/// |-----------------|----------|
/// | high demand     | +0.20    |
/// | peak time       | +0.15    |
/// | heavy traffic   | +0.10    |
/// | adverse weather | +0.08    |
///
/// Ceiling is 1.53 when all four fire. Alias labels ("Very High", "Jam",
/// "Storm") are folded into the canonical values at the parsing boundary,
/// so this table only sees canonical inputs.
pub fn multiplier(
    demand_level: DemandLevel,
    time_of_day: TimeOfDay,
    traffic_condition: TrafficCondition,
    weather_condition: WeatherCondition,
) -> f64 {
    let mut multiplier = 1.0;

    if demand_level == DemandLevel::High {
        multiplier += 0.20;
    }

    if time_of_day.is_peak() {
        multiplier += 0.15;
    }

    if traffic_condition == TrafficCondition::Heavy {
        multiplier += 0.10;
    }

    if weather_condition == WeatherCondition::Rainy {
        multiplier += 0.08;
    }

    round2(multiplier)
}

pub fn final_fare(base_fare: f64, multiplier: f64) -> f64 {
    round2(base_fare * multiplier)
}
