pub mod open_route;
pub mod open_weather;
pub mod osrm;

pub use open_route::OpenRouteService;
pub use open_weather::{OpenWeather, WeatherProvider, WeatherQuery};
pub use osrm::Osrm;
