mod analytics;
mod context;
mod quote;
mod route;

pub use analytics::{DemandTrendRow, ModelMetrics, RideDistributionRow, TimePriceRow};
pub use context::{
    normalize_zone, DayType, DemandLevel, MobilityContext, QuoteRequest, RideContext, RideType,
    SmartQuoteRequest, TimeOfDay, TrafficCondition, WeatherCondition,
};
pub use quote::{Explanation, FareQuote, SmartQuote, TripContext};
pub use route::{Coordinates, RouteEstimate};
