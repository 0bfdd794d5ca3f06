//! Current weather and a 5 day forecast for one city, rendered as an HTML
//! document for embedding in a host page.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod server;
pub mod theme;

pub use aggregate::{MAX_DAYS, aggregate_daily};
pub use config::{Config, OpenWeatherCfg, ServerCfg, load_config};
pub use error::LookupError;
pub use model::{CurrentConditions, DayAggregate, DisplayBundle, WeatherSample};
pub use pipeline::{HOURLY_LIMIT, WeatherService};
pub use render::{PageView, Renderer};
pub use theme::{Theme, select_theme};
