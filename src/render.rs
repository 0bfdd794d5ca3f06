//! HTML output: the display document and the host page that embeds it.
//!
//! Templates are compiled into the binary and rendered with Tera, with
//! auto-escaping on for `.html` names so provider text and the user's city
//! query never reach the markup raw.

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::LookupError;
use crate::model::{DisplayBundle, round_temp};
use crate::theme::Theme;

mod embedded {
    pub const DOCUMENT: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<style>
    body{font-family:Arial, sans-serif; margin:0; padding:20px; background:transparent;}
    .container{max-width:900px; margin:0 auto;}
    .card { background:#f8f9fa; border-radius:16px; padding:18px; box-shadow:0 6px 20px rgba(0,0,0,0.08); }
    .center { text-align:center; }
    .current-temp { font-size:48px; margin:6px 0;}
    .small { color: #555; font-size:14px; margin:4px 0;}
    .row { display:flex; gap:12px; align-items:center; justify-content:center; margin-top:12px; }
    .stat { text-align:center; min-width:100px; }
    .hourly { display:flex; gap:12px; overflow-x:auto; padding:12px 6px; margin-top:18px; }
    .hour-card { min-width:100px; background:#ffffff; padding:12px; border-radius:12px; text-align:center; box-shadow:0 4px 12px rgba(0,0,0,0.06);}
    .daily { display:flex; gap:14px; justify-content:center; flex-wrap:wrap; margin-top:20px; }
    .day-card { background:#ffffff; width:140px; padding:14px; border-radius:12px; text-align:center; box-shadow:0 4px 12px rgba(0,0,0,0.06); }
    .hourly::-webkit-scrollbar { height:8px; }
    .hourly::-webkit-scrollbar-track { background:transparent; }
    .hourly::-webkit-scrollbar-thumb { background:#cfd8e3; border-radius:6px; }
</style>
</head>
<body>
<div class="container">
<div class="card center" data-theme="{{ theme }}">
    <div style="display:flex;justify-content:center;align-items:center;gap:18px;flex-wrap:wrap;">
        <div><img src="{{ current.icon_url }}" width="96" alt="icon"></div>
        <div style="text-align:left;">
            <div style="font-weight:700; font-size:18px;">{{ current.place }}</div>
            <div class="small">{{ current.when }}</div>
            <div class="current-temp">{{ current.temp }}°C</div>
            <div class="small">Feels like {{ current.feels_like }}°C • {{ current.condition }}</div>
        </div>
    </div>
    <div class="row" style="margin-top:14px;">
        <div class="stat"><div style="font-weight:700;">💧 {{ current.humidity }}%</div><div class="small">Humidity</div></div>
        <div class="stat"><div style="font-weight:700;">💨 {{ current.wind }} m/s</div><div class="small">Wind</div></div>
    </div>
</div>
<h3 style="text-align:center; margin-top:22px; color:#333;">Hourly Forecast</h3>
<div class="hourly">
{%- for h in hourly %}
    <div class="hour-card">
        <div style="font-weight:700;">{{ h.day }}</div>
        <div class="small">{{ h.time }}</div>
        <img src="{{ h.icon_url }}" width="48" alt="icon">
        <div style="font-weight:700; margin-top:6px;">{{ h.temp }}°C</div>
        <div class="small">Feels {{ h.feels_like }}°C</div>
        <div class="small">{{ h.condition }}</div>
    </div>
{%- endfor %}
</div>
<h3 style="text-align:center; margin-top:28px; color:#333;">5-Day Forecast</h3>
<div class="daily">
{%- for d in daily %}
    <div class="day-card">
        <div style="font-weight:700;">{{ d.weekday }}</div>
        <img src="{{ d.icon_url }}" width="60" alt="icon">
        <div class="small" style="margin-top:6px;">{{ d.condition }}</div>
        <div style="font-weight:700; margin-top:6px;">{{ d.max }}° / {{ d.min }}°C</div>
    </div>
{%- endfor %}
</div>
</div>
</body>
</html>
"#;

    pub const PAGE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Weather App</title>
<style>
    body { margin:0; min-height:100vh; background: {{ background }}; transition: background 0.6s ease; font-family:Arial, sans-serif; }
    .main { max-width:920px; margin:0 auto; padding:24px 12px; }
    form { display:flex; flex-direction:column; gap:6px; margin:12px 0 18px; }
    input { padding:10px; font-size:16px; border-radius:8px; border:1px solid #ccc; }
    .info { background:#e8f0fe; color:#1a4a8a; padding:12px; border-radius:8px; }
    .error { background:#fdecea; color:#8a1c1c; padding:12px; border-radius:8px; }
    iframe { width:100%; border:0; }
</style>
</head>
<body data-theme="{{ theme }}">
<div class="main">
<h1 style='text-align:center; color:#4285F4; font-family:Arial;'>🌤️ Weather</h1>
<form method="get" action="/">
    <label for="city">Enter City Name</label>
    <input id="city" name="city" value="{{ city }}" placeholder="e.g. London, New York, Delhi">
</form>
{%- if error_lines %}
<div class="error">
{%- for line in error_lines %}
    <div>{{ line }}</div>
{%- endfor %}
</div>
{%- elif document %}
<iframe srcdoc="{{ document }}" height="760" scrolling="yes"></iframe>
{%- else %}
<div class="info">Type a city name above and press Enter.</div>
{%- endif %}
</div>
</body>
</html>
"#;
}

/// What the host page shows below the input field.
#[derive(Debug)]
pub enum PageView<'a> {
    Prompt,
    Display { city: &'a str, bundle: &'a DisplayBundle },
    Failure { city: &'a str, error: &'a LookupError },
}

/* ============================ view rows ============================ */

#[derive(Serialize)]
struct CurrentRow {
    place: String,
    when: String,
    temp: i64,
    feels_like: i64,
    condition: String,
    humidity: i64,
    wind: f64,
    icon_url: String,
}

#[derive(Serialize)]
struct HourRow {
    day: String,
    time: String,
    temp: i64,
    feels_like: i64,
    condition: String,
    icon_url: String,
}

#[derive(Serialize)]
struct DayRow {
    weekday: String,
    max: i64,
    min: i64,
    condition: String,
    icon_url: String,
}

/* ============================ Renderer ============================ */

pub struct Renderer {
    tera: Tera,
    icon_base_url: String,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("icon_base_url", &self.icon_base_url)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new(icon_base_url: &str) -> Result<Self, LookupError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_template("document.html", embedded::DOCUMENT)?;
        tera.add_raw_template("page.html", embedded::PAGE)?;
        Ok(Self {
            tera,
            icon_base_url: icon_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn icon(&self, code: &str, large: bool) -> String {
        if large {
            format!("{}/{code}@2x.png", self.icon_base_url)
        } else {
            format!("{}/{code}.png", self.icon_base_url)
        }
    }

    /// The display document: current card, hourly strip, daily strip.
    pub fn render_document(&self, bundle: &DisplayBundle) -> Result<String, LookupError> {
        let cur = &bundle.current;
        let place = if cur.country.is_empty() {
            cur.city.clone()
        } else {
            format!("{}, {}", cur.city, cur.country)
        };
        let current = CurrentRow {
            place,
            when: cur.observed_at.format("%A, %I:%M %p").to_string(),
            temp: round_temp(cur.temperature),
            feels_like: round_temp(cur.feels_like),
            condition: cur.condition.clone(),
            humidity: cur.humidity_pct,
            wind: cur.wind_speed,
            icon_url: self.icon(&cur.icon, true),
        };

        let hourly: Vec<HourRow> = bundle
            .hourly
            .iter()
            .map(|s| HourRow {
                day: s.timestamp.format("%a").to_string(),
                time: s.timestamp.format("%I %p").to_string(),
                temp: round_temp(s.temperature),
                feels_like: round_temp(s.feels_like),
                condition: s.condition.clone(),
                icon_url: self.icon(&s.icon, false),
            })
            .collect();

        let daily: Vec<DayRow> = bundle
            .daily
            .iter()
            .map(|d| DayRow {
                weekday: d.weekday.clone(),
                max: d.max,
                min: d.min,
                condition: d.condition.clone(),
                icon_url: self.icon(&d.icon, false),
            })
            .collect();

        let mut ctx = Context::new();
        ctx.insert("theme", bundle.theme.id());
        ctx.insert("current", &current);
        ctx.insert("hourly", &hourly);
        ctx.insert("daily", &daily);
        Ok(self.tera.render("document.html", &ctx)?)
    }

    /// Host page around the document; its background carries the theme.
    pub fn render_page(&self, view: &PageView<'_>) -> Result<String, LookupError> {
        let mut ctx = Context::new();
        ctx.insert("document", "");
        ctx.insert("error_lines", &Vec::<String>::new());
        let (city, theme) = match view {
            PageView::Prompt => ("", Theme::Default),
            PageView::Display { city, bundle } => {
                ctx.insert("document", &self.render_document(bundle)?);
                (*city, bundle.theme)
            }
            PageView::Failure { city, error } => {
                let lines: Vec<String> = error.user_message().lines().map(str::to_string).collect();
                ctx.insert("error_lines", &lines);
                (*city, Theme::Default)
            }
        };
        ctx.insert("city", city);
        ctx.insert("theme", theme.id());
        ctx.insert("background", theme.gradient());
        Ok(self.tera.render("page.html", &ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, DayAggregate, WeatherSample};
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn bundle(city: &str, condition: &str) -> DisplayBundle {
        let tz = FixedOffset::east_opt(0).unwrap();
        let ts = tz.with_ymd_and_hms(2024, 3, 1, 15, 5, 0).unwrap();
        DisplayBundle {
            current: CurrentConditions {
                city: city.into(),
                country: "GB".into(),
                observed_at: ts,
                temperature: 15.4,
                feels_like: 14.6,
                condition: condition.into(),
                icon: "10d".into(),
                humidity_pct: 81,
                wind_speed: 4.1,
            },
            hourly: vec![WeatherSample {
                timestamp: ts,
                temperature: 12.2,
                feels_like: 11.0,
                condition: "Light Rain".into(),
                icon: "10d".into(),
            }],
            daily: vec![DayAggregate {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                weekday: "Fri".into(),
                min: 8,
                max: 13,
                condition: "Light Rain".into(),
                icon: "10d".into(),
            }],
            theme: Theme::Rainy,
        }
    }

    fn renderer() -> Renderer {
        Renderer::new("https://openweathermap.org/img/wn").unwrap()
    }

    #[test]
    fn document_shows_current_and_strips() {
        let html = renderer().render_document(&bundle("London", "Light Rain")).unwrap();
        assert!(html.contains("London, GB"));
        assert!(html.contains("Friday, 03:05 PM"));
        assert!(html.contains("15°C"));
        assert!(html.contains("Feels like 15°C • Light Rain"));
        assert!(html.contains("💧 81%"));
        assert!(html.contains("💨 4.1 m/s"));
        assert!(html.contains("03 PM"));
        assert!(html.contains("13° / 8°C"));
        assert_eq!(html.matches("class=\"hour-card\"").count(), 1);
        assert_eq!(html.matches("class=\"day-card\"").count(), 1);
        assert!(html.contains("10d@2x.png"));
    }

    #[test]
    fn provider_and_user_text_is_escaped() {
        let html = renderer()
            .render_document(&bundle("<script>alert(1)</script>", "Clear"))
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn page_prompt_uses_default_background() {
        let html = renderer().render_page(&PageView::Prompt).unwrap();
        assert!(html.contains("Type a city name above and press Enter."));
        assert!(html.contains(Theme::Default.gradient()));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn page_embeds_document_with_theme() {
        let b = bundle("London", "Light Rain");
        let html = renderer()
            .render_page(&PageView::Display { city: "London", bundle: &b })
            .unwrap();
        assert!(html.contains("<iframe srcdoc=\""));
        assert!(html.contains(Theme::Rainy.gradient()));
        assert!(html.contains("data-theme=\"rainy\""));
        // embedded markup is attribute-escaped
        assert!(html.contains("&lt;div class=&quot;hour-card&quot;&gt;"));
    }

    #[test]
    fn page_failure_shows_message_on_default_background() {
        let err = LookupError::CityNotFound {
            city: "Atlantis".into(),
            message: "city not found".into(),
        };
        let html = renderer()
            .render_page(&PageView::Failure { city: "Atlantis", error: &err })
            .unwrap();
        assert!(html.contains("City not found: Atlantis — API message: city not found"));
        assert!(html.contains(Theme::Default.gradient()));
        assert!(!html.contains("<iframe"));
    }
}
