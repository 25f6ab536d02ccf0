use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Distance and travel-time estimate for a pickup/drop pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RouteEstimate {
    pub fn new(distance_km: f64, duration_min: f64) -> Self {
        Self {
            distance_km,
            duration_min,
            note: None,
        }
    }

    pub fn with_note(distance_km: f64, duration_min: f64, note: &str) -> Self {
        Self {
            distance_km,
            duration_min,
            note: Some(note.into()),
        }
    }
}
