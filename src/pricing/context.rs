use crate::entities::{DayType, DemandLevel, TimeOfDay, TrafficCondition, WeatherCondition};

/// Demand rules, in priority order:
/// weekend evening or rainy evening => High, weekday business hours =>
/// Medium, night => Low, everything else => Low.
pub fn predict_demand(
    time_of_day: TimeOfDay,
    day_type: DayType,
    weather: WeatherCondition,
) -> DemandLevel {
    let is_weekend = day_type == DayType::Weekend;
    let is_evening = time_of_day == TimeOfDay::Evening;
    let is_rain = weather == WeatherCondition::Rainy;

    if (is_weekend && is_evening) || (is_rain && is_evening) {
        return DemandLevel::High;
    }

    if matches!(time_of_day, TimeOfDay::Morning | TimeOfDay::Afternoon) && !is_weekend {
        return DemandLevel::Medium;
    }

    DemandLevel::Low
}

/// Estimates traffic from the implied route speed. Average city speed is
/// around 25-30 km/h; below 20 km/h the route is effectively congested.
pub fn estimate_traffic(
    duration_min: f64,
    distance_km: f64,
    time_of_day: TimeOfDay,
) -> TrafficCondition {
    if duration_min <= 0.0 {
        return TrafficCondition::Moderate;
    }

    let speed = distance_km / (duration_min / 60.0);

    if speed < 20.0 {
        TrafficCondition::Heavy
    } else if speed < 35.0 && time_of_day.is_peak() {
        TrafficCondition::Heavy
    } else if speed < 40.0 {
        TrafficCondition::Moderate
    } else {
        TrafficCondition::Low
    }
}

/// Fallback when no route duration is available: peak hours 8-10 and 17-20
/// are Heavy, 11-16 Moderate, the rest Low.
pub fn traffic_by_hour(hour: u32) -> TrafficCondition {
    match hour {
        8..=10 | 17..=20 => TrafficCondition::Heavy,
        11..=16 => TrafficCondition::Moderate,
        _ => TrafficCondition::Low,
    }
}
