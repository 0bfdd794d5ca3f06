//! Shared OpenWeather fixtures for the integration tests.
#![allow(dead_code)]

use serde_json::{Value, json};
use weather_page::OpenWeatherCfg;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const API_KEY: &str = "test-key";

/// 2024-03-01T00:00:00Z
pub const START: i64 = 1_709_251_200;

pub fn test_config(server: &MockServer) -> OpenWeatherCfg {
    OpenWeatherCfg {
        api_key: API_KEY.to_string(),
        base_url: server.uri(),
        icon_base_url: "https://openweathermap.org/img/wn".to_string(),
        timeout_secs: 5,
    }
}

pub fn current_body(temp: f64, description: &str) -> Value {
    json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 500, "main": "Rain", "description": description, "icon": "10d"}],
        "base": "stations",
        "main": {"temp": temp, "feels_like": 14.9, "temp_min": 14.0, "temp_max": 16.2, "pressure": 1012, "humidity": 81},
        "visibility": 10000,
        "wind": {"speed": 4.12, "deg": 240},
        "clouds": {"all": 75},
        "dt": START + 15 * 3600,
        "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1_709_276_000, "sunset": 1_709_315_000},
        "timezone": 0,
        "id": 2_643_743,
        "name": "London",
        "cod": 200
    })
}

/// `count` three-hour samples starting at [`START`]; temperature climbs
/// through each day and the condition alternates rain / clouds.
pub fn forecast_body(count: i64) -> Value {
    let list: Vec<Value> = (0..count)
        .map(|i| {
            let slot = i % 8;
            let (description, icon) = if slot % 2 == 0 {
                ("light rain", "10d")
            } else {
                ("overcast clouds", "04d")
            };
            json!({
                "dt": START + i * 3 * 3600,
                "main": {"temp": 5.0 + slot as f64 + 0.2, "feels_like": 3.0 + slot as f64, "humidity": 80},
                "weather": [{"id": 500, "main": "Rain", "description": description, "icon": icon}],
                "dt_txt": ""
            })
        })
        .collect();
    json!({
        "cod": "200",
        "message": 0,
        "cnt": count,
        "list": list,
        "city": {"id": 2_643_743, "name": "London", "country": "GB", "timezone": 0}
    })
}

pub async fn mount_current(server: &MockServer, city: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", city))
        .and(query_param("appid", API_KEY))
        .and(query_param("units", "metric"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_forecast(server: &MockServer, city: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", city))
        .and(query_param("appid", API_KEY))
        .and(query_param("units", "metric"))
        .respond_with(response)
        .mount(server)
        .await;
}

/// London answering 15.4°C light rain and a 40-sample forecast.
pub async fn mount_london(server: &MockServer) {
    mount_current(
        server,
        "London",
        ResponseTemplate::new(200).set_body_json(current_body(15.4, "light rain")),
    )
    .await;
    mount_forecast(
        server,
        "London",
        ResponseTemplate::new(200).set_body_json(forecast_body(40)),
    )
    .await;
}
