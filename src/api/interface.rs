use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{
    DemandTrendRow, FareQuote, MobilityContext, ModelMetrics, QuoteRequest, RideDistributionRow,
    RouteEstimate, SmartQuote, SmartQuoteRequest, TimePriceRow,
};
use crate::error::Error;
use crate::routing::RouteQuery;

#[async_trait]
pub trait FareAPI {
    /// Prices a ride from a fully caller-supplied context.
    async fn create_quote(&self, request: QuoteRequest) -> Result<FareQuote, Error>;

    /// Prices a ride from pickup/drop only; time, distance, weather,
    /// traffic and demand are derived by the engine.
    async fn create_smart_quote(&self, request: SmartQuoteRequest) -> Result<SmartQuote, Error>;
}

#[async_trait]
pub trait ContextAPI {
    async fn resolve_context(&self, location: String) -> Result<MobilityContext, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn estimate_route(&self, query: RouteQuery) -> Result<RouteEstimate, Error>;

    /// Serves the static route table only; unknown pairs are a caller error.
    async fn find_route_info(
        &self,
        origin: String,
        destination: String,
    ) -> Result<RouteEstimate, Error>;
}

#[async_trait]
pub trait AnalyticsAPI {
    async fn demand_trend(&self) -> Result<Vec<DemandTrendRow>, Error>;
    async fn time_price_trend(&self) -> Result<Vec<TimePriceRow>, Error>;
    async fn ride_distribution(&self) -> Result<Vec<RideDistributionRow>, Error>;
    async fn model_metrics(&self) -> Result<ModelMetrics, Error>;
}

pub trait API: FareAPI + ContextAPI + RouteAPI + AnalyticsAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
