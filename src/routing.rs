use async_trait::async_trait;
use tokio::time::timeout;

use crate::config::PricingConfig;
use crate::entities::{Coordinates, RouteEstimate};
use crate::error::{validation_error, Error};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Routes served without any upstream call, mainly for offline demos.
const STATIC_ROUTES: [(&str, &str, f64, f64); 2] = [
    ("coimbatore", "pollachi", 42.0, 75.0),
    ("ukkadam", "valparai", 105.0, 180.0),
];

/// Great-circle distance between two coordinate pairs in km.
pub fn haversine(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let dphi = (b.latitude - a.latitude).to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

pub fn validate_coordinates(coords: Coordinates) -> Result<(), Error> {
    if !coords.latitude.is_finite()
        || !coords.longitude.is_finite()
        || coords.latitude.abs() > 90.0
        || coords.longitude.abs() > 180.0
    {
        return Err(validation_error("malformed coordinates"));
    }

    Ok(())
}

pub fn static_route(pickup: &str, drop: &str) -> Option<RouteEstimate> {
    let pickup = pickup.trim().to_lowercase();
    let drop = drop.trim().to_lowercase();

    STATIC_ROUTES
        .iter()
        .find(|(from, to, _, _)| {
            (*from == pickup && *to == drop) || (*from == drop && *to == pickup)
        })
        .map(|(_, _, distance_km, duration_min)| RouteEstimate::new(*distance_km, *duration_min))
}

#[derive(Clone, Debug)]
pub struct RouteQuery {
    pub pickup: String,
    pub drop: String,
    pub pickup_coords: Option<Coordinates>,
    pub drop_coords: Option<Coordinates>,
}

/// External routing capability. Providers geocode labels themselves when no
/// coordinates are supplied.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn route(&self, query: &RouteQuery) -> Result<RouteEstimate, Error>;
}

/// Ordered fallback chain over routing providers, ending in the static table
/// and a safe default. After input validation, resolution cannot fail: a
/// consumer-facing fare estimate must always get some distance to work with.
pub struct RouteResolver {
    providers: Vec<Box<dyn RouteProvider>>,
    config: PricingConfig,
}

impl RouteResolver {
    pub fn new(providers: Vec<Box<dyn RouteProvider>>, config: PricingConfig) -> Self {
        Self { providers, config }
    }

    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, query: &RouteQuery) -> Result<RouteEstimate, Error> {
        if let (Some(pickup), Some(drop)) = (query.pickup_coords, query.drop_coords) {
            validate_coordinates(pickup)?;
            validate_coordinates(drop)?;

            let crow_distance = haversine(pickup, drop);

            if crow_distance > self.config.max_crow_distance_km {
                return Err(validation_error("locations too far apart"));
            }

            if crow_distance < self.config.min_crow_distance_km {
                return Err(validation_error("locations too close"));
            }
        }

        for provider in &self.providers {
            match timeout(self.config.upstream_timeout, provider.route(query)).await {
                Ok(Ok(estimate)) => {
                    tracing::info!(provider = provider.name(), "route resolved");
                    return Ok(estimate);
                }
                Ok(Err(err)) => {
                    tracing::warn!(provider = provider.name(), code = err.code, "provider failed");
                }
                Err(_) => {
                    tracing::warn!(provider = provider.name(), "provider timed out");
                }
            }
        }

        if let Some(estimate) = static_route(&query.pickup, &query.drop) {
            tracing::info!("route served from static table");
            return Ok(estimate);
        }

        tracing::warn!("all routing strategies failed, using safe default");

        Ok(RouteEstimate::with_note(
            self.config.default_distance_km,
            self.config.default_duration_min,
            "Estimated due to routing error",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::upstream_error;
    use std::time::Duration;
    use tokio_test::block_on;

    struct StubProvider {
        estimate: Option<RouteEstimate>,
    }

    #[async_trait]
    impl RouteProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn route(&self, _: &RouteQuery) -> Result<RouteEstimate, Error> {
            self.estimate.clone().ok_or_else(upstream_error)
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl RouteProvider for SlowProvider {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn route(&self, _: &RouteQuery) -> Result<RouteEstimate, Error> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(RouteEstimate::new(1.0, 1.0))
        }
    }

    fn query(pickup: &str, drop: &str) -> RouteQuery {
        RouteQuery {
            pickup: pickup.into(),
            drop: drop.into(),
            pickup_coords: None,
            drop_coords: None,
        }
    }

    fn coords_query(pickup: Coordinates, drop: Coordinates) -> RouteQuery {
        RouteQuery {
            pickup: "a".into(),
            drop: "b".into(),
            pickup_coords: Some(pickup),
            drop_coords: Some(drop),
        }
    }

    #[test]
    fn haversine_is_symmetric() {
        let chennai = Coordinates::new(13.0827, 80.2707);
        let coimbatore = Coordinates::new(11.0168, 76.9558);

        assert_eq!(haversine(chennai, coimbatore), haversine(coimbatore, chennai));
    }

    #[test]
    fn haversine_matches_known_distance() {
        // Chennai to Coimbatore is roughly 430 km as the crow flies.
        let chennai = Coordinates::new(13.0827, 80.2707);
        let coimbatore = Coordinates::new(11.0168, 76.9558);

        let distance = haversine(chennai, coimbatore);
        assert!(distance > 400.0 && distance < 460.0, "got {distance}");
    }

    #[test]
    fn implausible_crow_distances_are_rejected() {
        let resolver = RouteResolver::new(vec![], PricingConfig::default());

        // London to Chennai, far beyond any intra-country ride.
        let too_far = coords_query(
            Coordinates::new(51.5074, -0.1278),
            Coordinates::new(13.0827, 80.2707),
        );
        assert!(block_on(resolver.resolve(&too_far)).is_err());

        // A few meters apart.
        let too_close = coords_query(
            Coordinates::new(11.0168, 76.9558),
            Coordinates::new(11.01681, 76.95581),
        );
        assert!(block_on(resolver.resolve(&too_close)).is_err());
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        let resolver = RouteResolver::new(vec![], PricingConfig::default());

        let bad_latitude = coords_query(
            Coordinates::new(123.0, 76.9558),
            Coordinates::new(11.0168, 76.9558),
        );
        assert!(block_on(resolver.resolve(&bad_latitude)).is_err());

        let not_a_number = coords_query(
            Coordinates::new(f64::NAN, 76.9558),
            Coordinates::new(11.0168, 76.9558),
        );
        assert!(block_on(resolver.resolve(&not_a_number)).is_err());
    }

    #[test]
    fn first_healthy_provider_wins() {
        let resolver = RouteResolver::new(
            vec![
                Box::new(StubProvider { estimate: None }),
                Box::new(StubProvider {
                    estimate: Some(RouteEstimate::new(42.0, 75.0)),
                }),
            ],
            PricingConfig::default(),
        );

        let estimate = block_on(resolver.resolve(&query("x", "y"))).unwrap();
        assert_eq!(estimate.distance_km, 42.0);
        assert_eq!(estimate.duration_min, 75.0);
    }

    #[test]
    fn static_table_serves_known_pairs_when_providers_fail() {
        let resolver = RouteResolver::new(
            vec![Box::new(StubProvider { estimate: None })],
            PricingConfig::default(),
        );

        let estimate = block_on(resolver.resolve(&query(" Coimbatore ", "Pollachi"))).unwrap();
        assert_eq!(estimate.distance_km, 42.0);

        // The table is symmetric.
        let reversed = block_on(resolver.resolve(&query("pollachi", "coimbatore"))).unwrap();
        assert_eq!(reversed.distance_km, 42.0);
    }

    #[test]
    fn total_failure_yields_the_safe_default() {
        let resolver = RouteResolver::new(
            vec![Box::new(StubProvider { estimate: None })],
            PricingConfig::default(),
        );

        let estimate = block_on(resolver.resolve(&query("nowhere", "elsewhere"))).unwrap();
        assert_eq!(estimate.distance_km, 15.0);
        assert_eq!(estimate.duration_min, 30.0);
        assert!(estimate.note.is_some());
    }

    #[test]
    fn slow_providers_are_cut_off_and_skipped() {
        let mut config = PricingConfig::default();
        config.upstream_timeout = Duration::from_millis(50);

        let resolver = RouteResolver::new(vec![Box::new(SlowProvider)], config);

        let estimate = block_on(resolver.resolve(&query("nowhere", "elsewhere"))).unwrap();
        assert_eq!(estimate.distance_km, 15.0);
    }
}
