use super::Engine;

use async_trait::async_trait;

use crate::api::RouteAPI;
use crate::entities::RouteEstimate;
use crate::error::{not_found_error, Error};
use crate::routing::{static_route, RouteQuery};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn estimate_route(&self, query: RouteQuery) -> Result<RouteEstimate, Error> {
        self.resolver.resolve(&query).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_route_info(
        &self,
        origin: String,
        destination: String,
    ) -> Result<RouteEstimate, Error> {
        static_route(&origin, &destination)
            .ok_or_else(|| not_found_error("route not found, try Coimbatore to Pollachi"))
    }
}
