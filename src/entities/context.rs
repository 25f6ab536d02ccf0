use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{validation_error, Error};

/// Canonical categorical values the pricing pipeline operates on.
///
/// Callers may send looser labels ("Very High", "Jam", "Storm"); the
/// `from_label` constructors fold those aliases into the canonical set so
/// nothing unrecognized ever reaches the fare estimator.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RideType {
    Taxi,
    Bike,
    Auto,
}

impl RideType {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "bike" => Self::Bike,
            "auto" => Self::Auto,
            _ => Self::Taxi,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Taxi => "Taxi",
            Self::Bike => "Bike",
            Self::Auto => "Auto",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Bucket boundaries: [0,6) and [21,24) are Night, [6,12) Morning,
    /// [12,17) Afternoon, [17,21) Evening.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "morning" => Self::Morning,
            "afternoon" => Self::Afternoon,
            "evening" => Self::Evening,
            "night" => Self::Night,
            _ => Self::Morning,
        }
    }

    pub fn is_peak(&self) -> bool {
        matches!(self, Self::Morning | Self::Evening)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn from_weekday(weekday: Weekday) -> Self {
        if weekday.num_days_from_monday() >= 5 {
            Self::Weekend
        } else {
            Self::Weekday
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "weekend" => Self::Weekend,
            _ => Self::Weekday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekday => "Weekday",
            Self::Weekend => "Weekend",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandLevel {
    Low,
    Medium,
    High,
}

impl DemandLevel {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "medium" | "moderate" => Self::Medium,
            "high" | "very high" => Self::High,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrafficCondition {
    Low,
    Moderate,
    Heavy,
}

impl TrafficCondition {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "moderate" | "medium" => Self::Moderate,
            "heavy" | "jam" => Self::Heavy,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Heavy => "Heavy",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Rainy,
    Foggy,
}

impl WeatherCondition {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "rainy" | "rain" | "drizzle" | "thunderstorm" | "storm" | "stormy" | "snow"
            | "bad" => Self::Rainy,
            "foggy" | "fog" | "cloudy" | "cloud" | "clouds" | "mist" | "haze" => Self::Foggy,
            _ => Self::Clear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Rainy => "Rainy",
            Self::Foggy => "Foggy",
        }
    }
}

/// Fully normalized pricing context. Built once per request, immutable
/// afterwards; every categorical field is guaranteed canonical.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RideContext {
    pub ride_type: RideType,
    pub distance_km: f64,
    pub time_of_day: TimeOfDay,
    pub day_type: DayType,
    pub demand_level: DemandLevel,
    pub traffic_condition: TrafficCondition,
    pub weather_condition: WeatherCondition,
    pub pickup_zone: String,
}

impl RideContext {
    pub fn from_request(request: &QuoteRequest) -> Result<Self, Error> {
        if !request.distance.is_finite() || request.distance <= 0.0 {
            return Err(validation_error("distance must be greater than zero"));
        }

        Ok(Self {
            ride_type: RideType::from_label(&request.ride_type),
            distance_km: request.distance,
            time_of_day: TimeOfDay::from_label(&request.time_of_day),
            day_type: DayType::from_label(&request.day_type),
            demand_level: DemandLevel::from_label(&request.demand_level),
            traffic_condition: TrafficCondition::from_label(&request.traffic_condition),
            weather_condition: WeatherCondition::from_label(&request.weather_condition),
            pickup_zone: normalize_zone(&request.pickup_zone),
        })
    }
}

pub fn normalize_zone(zone: &str) -> String {
    let zone = zone.trim();

    if zone.is_empty() {
        "General".into()
    } else {
        zone.into()
    }
}

/// Raw caller-supplied quoting request; labels are normalized rather than
/// rejected, only the distance is validated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub ride_type: String,
    pub distance: f64,
    pub time_of_day: String,
    pub day_type: String,
    pub demand_level: String,
    pub traffic_condition: String,
    pub weather_condition: String,
    pub pickup_zone: String,
}

/// Auto-context quoting request: the engine derives time, day, distance,
/// weather, traffic and demand itself. Coordinates are `[lat, lon]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SmartQuoteRequest {
    pub pickup: String,
    pub drop: String,
    pub ride_type: String,
    pub pickup_coords: Option<Vec<f64>>,
    pub drop_coords: Option<Vec<f64>>,
}

/// Context snapshot returned by the mobility-context endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MobilityContext {
    pub time_of_day: TimeOfDay,
    pub day_type: DayType,
    pub weather: WeatherCondition,
    pub traffic: TrafficCondition,
    pub demand: DemandLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_bucket_boundaries() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Night);
    }

    #[test]
    fn weekday_index_splits_weekend() {
        use chrono::Weekday::*;

        assert_eq!(DayType::from_weekday(Mon), DayType::Weekday);
        assert_eq!(DayType::from_weekday(Fri), DayType::Weekday);
        assert_eq!(DayType::from_weekday(Sat), DayType::Weekend);
        assert_eq!(DayType::from_weekday(Sun), DayType::Weekend);
    }

    #[test]
    fn tolerated_aliases_fold_into_canonical_values() {
        assert_eq!(DemandLevel::from_label("Very High"), DemandLevel::High);
        assert_eq!(TrafficCondition::from_label("Jam"), TrafficCondition::Heavy);
        assert_eq!(TrafficCondition::from_label("Light"), TrafficCondition::Low);
        assert_eq!(WeatherCondition::from_label("Storm"), WeatherCondition::Rainy);
        assert_eq!(WeatherCondition::from_label("Snow"), WeatherCondition::Rainy);
        assert_eq!(WeatherCondition::from_label("Haze"), WeatherCondition::Foggy);
    }

    #[test]
    fn unknown_labels_fall_back_to_defaults() {
        assert_eq!(RideType::from_label("hovercraft"), RideType::Taxi);
        assert_eq!(WeatherCondition::from_label("???"), WeatherCondition::Clear);
        assert_eq!(TrafficCondition::from_label(""), TrafficCondition::Low);
        assert_eq!(DemandLevel::from_label("surging"), DemandLevel::Low);
    }

    #[test]
    fn blank_pickup_zone_defaults_to_general() {
        assert_eq!(normalize_zone("  "), "General");
        assert_eq!(normalize_zone("City Center"), "City Center");
    }

    #[test]
    fn request_with_nonpositive_distance_is_rejected() {
        let mut request = QuoteRequest {
            ride_type: "Taxi".into(),
            distance: 0.0,
            time_of_day: "Afternoon".into(),
            day_type: "Weekday".into(),
            demand_level: "Medium".into(),
            traffic_condition: "Moderate".into(),
            weather_condition: "Clear".into(),
            pickup_zone: "City Center".into(),
        };

        assert!(RideContext::from_request(&request).is_err());

        request.distance = -3.0;
        assert!(RideContext::from_request(&request).is_err());

        request.distance = 12.5;
        let context = RideContext::from_request(&request).unwrap();
        assert_eq!(context.ride_type, RideType::Taxi);
        assert_eq!(context.pickup_zone, "City Center");
    }
}
