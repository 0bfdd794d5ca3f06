//! OpenWeather 2.5 client: current conditions and the 5 day / 3 hour forecast.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::OpenWeatherCfg;
use crate::error::LookupError;
use crate::model::{CurrentConditions, WeatherSample, title_case};

/* ============================ OpenWeather types ============================ */

/// Every OpenWeather body carries `cod`, as a number on success and
/// usually as a string on errors.
#[derive(Deserialize, Debug)]
struct Envelope {
    #[serde(default)]
    cod: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

impl Envelope {
    fn code(&self) -> Option<String> {
        self.cod.as_ref().map(json_text)
    }

    fn message_text(&self) -> Option<String> {
        self.message.as_ref().map(json_text)
    }
}

fn json_text(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Deserialize, Debug)]
struct CurrentResp {
    dt: i64,
    #[serde(default)]
    timezone: i32, // seconds from UTC
    main: Main,
    weather: Vec<Weather>,
    wind: Wind,
    #[serde(default)]
    sys: Sys,
}

#[derive(Deserialize, Debug, Clone)]
struct Main {
    temp: f64,
    feels_like: f64,
    #[serde(default)]
    humidity: i64,
}

#[derive(Deserialize, Debug, Clone)]
struct Weather {
    description: String,
    icon: String,
}

#[derive(Deserialize, Debug)]
struct Wind {
    speed: f64,
}

#[derive(Deserialize, Debug, Default)]
struct Sys {
    #[serde(default)]
    country: String,
}

#[derive(Deserialize, Debug)]
struct ForecastResp {
    #[serde(default)]
    city: Option<City>,
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Deserialize, Debug)]
struct City {
    #[serde(default)]
    timezone: i32,
}

#[derive(Deserialize, Debug)]
struct ForecastEntry {
    dt: i64,
    main: Main,
    weather: Vec<Weather>,
}

/* ============================ Client ============================ */

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(cfg: &OpenWeatherCfg) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| LookupError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }

    async fn get(&self, endpoint: &str, city: &str) -> Result<(reqwest::StatusCode, String), LookupError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;
        let status = resp.status();
        debug!(%status, endpoint, "provider responded");
        Ok((status, resp.text().await?))
    }

    /// Current conditions. A `cod` other than "200", or none at all, means
    /// the provider rejected the query and is reported as [`LookupError::CityNotFound`].
    #[instrument(skip(self))]
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, LookupError> {
        let (status, body) = self.get("weather", city).await?;

        match serde_json::from_str::<Envelope>(&body) {
            Ok(env) => {
                let code = env.code();
                if code.as_deref() != Some("200") {
                    let message = env.message_text().unwrap_or_else(|| match code {
                        Some(code) => format!("code {code}"),
                        None => "code None".to_string(),
                    });
                    return Err(LookupError::CityNotFound { city: city.to_string(), message });
                }
            }
            Err(_) if !status.is_success() => {
                return Err(LookupError::CityNotFound {
                    city: city.to_string(),
                    message: status.canonical_reason().unwrap_or("request rejected").to_lowercase(),
                });
            }
            Err(e) => return Err(LookupError::parse("current weather", e)),
        }

        let cur: CurrentResp =
            serde_json::from_str(&body).map_err(|e| LookupError::parse("current weather", e))?;
        build_current(city, cur)
    }

    /// Forecast samples in chronological order, stamped in the city's local offset.
    #[instrument(skip(self))]
    pub async fn fetch_forecast(&self, city: &str) -> Result<Vec<WeatherSample>, LookupError> {
        let (status, body) = self.get("forecast", city).await?;
        if !status.is_success() {
            let message = serde_json::from_str::<Envelope>(&body)
                .ok()
                .and_then(|env| env.message_text())
                .unwrap_or_else(|| status.to_string());
            return Err(LookupError::Provider { what: "forecast", message });
        }

        let fc: ForecastResp =
            serde_json::from_str(&body).map_err(|e| LookupError::parse("forecast", e))?;
        let offset = utc_offset(fc.city.map_or(0, |c| c.timezone));

        let samples = fc
            .list
            .into_iter()
            .map(|entry| {
                let (condition, icon) = first_weather(&entry.weather);
                Ok(WeatherSample {
                    timestamp: local_time(entry.dt, offset)?,
                    temperature: entry.main.temp,
                    feels_like: entry.main.feels_like,
                    condition,
                    icon,
                })
            })
            .collect::<Result<Vec<_>, LookupError>>()?;
        debug!(count = samples.len(), "forecast samples parsed");
        Ok(samples)
    }
}

/* ============================ builders ============================ */

fn build_current(query: &str, cur: CurrentResp) -> Result<CurrentConditions, LookupError> {
    let (condition, icon) = first_weather(&cur.weather);
    Ok(CurrentConditions {
        city: title_case(query.trim()),
        country: cur.sys.country,
        observed_at: local_time(cur.dt, utc_offset(cur.timezone))?,
        temperature: cur.main.temp,
        feels_like: cur.main.feels_like,
        condition,
        icon,
        humidity_pct: cur.main.humidity,
        wind_speed: cur.wind.speed,
    })
}

fn first_weather(weather: &[Weather]) -> (String, String) {
    weather
        .first()
        .map(|w| (title_case(&w.description), w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

fn utc_offset(secs: i32) -> FixedOffset {
    FixedOffset::east_opt(secs).unwrap_or_else(|| Utc.fix())
}

fn local_time(dt: i64, offset: FixedOffset) -> Result<DateTime<FixedOffset>, LookupError> {
    DateTime::<Utc>::from_timestamp(dt, 0)
        .map(|t| t.with_timezone(&offset))
        .ok_or_else(|| LookupError::Provider {
            what: "timestamp",
            message: format!("{dt} is out of range"),
        })
}
