mod interface;

pub use interface::{AnalyticsAPI, ContextAPI, DynAPI, FareAPI, RouteAPI, API};
