//! One city lookup, start to finish.

use tracing::{info, instrument, warn};

use crate::aggregate::aggregate_daily;
use crate::config::OpenWeatherCfg;
use crate::error::LookupError;
use crate::model::DisplayBundle;
use crate::provider::OpenWeatherClient;
use crate::theme::select_theme;

/// Hourly strip length: 16 three-hour samples, about 48 hours.
pub const HOURLY_LIMIT: usize = 16;

/// Runs lookups against the provider. Holds no per-lookup state, so one
/// instance can serve any number of lookups.
#[derive(Debug, Clone)]
pub struct WeatherService {
    client: OpenWeatherClient,
}

impl WeatherService {
    pub fn new(cfg: &OpenWeatherCfg) -> Result<Self, LookupError> {
        Ok(Self { client: OpenWeatherClient::new(cfg)? })
    }

    /// Current conditions first; the forecast is only requested once the
    /// provider has accepted the city.
    #[instrument(skip(self))]
    pub async fn lookup(&self, city: &str) -> Result<DisplayBundle, LookupError> {
        let city = city.trim();
        info!("weather lookup started");

        let current = match self.client.fetch_current(city).await {
            Ok(c) => c,
            Err(e) => {
                if e.is_not_found() {
                    warn!(error = %e, "provider rejected city");
                }
                return Err(e);
            }
        };

        let samples = self.client.fetch_forecast(city).await?;
        let daily = aggregate_daily(&samples);
        let theme = select_theme(&current.condition);
        let hourly: Vec<_> = samples.into_iter().take(HOURLY_LIMIT).collect();

        info!(
            hourly = hourly.len(),
            days = daily.len(),
            theme = theme.id(),
            "weather lookup finished"
        );
        Ok(DisplayBundle { current, hourly, daily, theme })
    }
}
