//! Per-lookup values: built fresh for one city and dropped after display.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

use crate::theme::Theme;

/// One timestamped reading from the 3-hour forecast.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WeatherSample {
    pub timestamp: DateTime<FixedOffset>,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub icon: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub observed_at: DateTime<FixedOffset>,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub icon: String,
    pub humidity_pct: i64,
    pub wind_speed: f64,
}

/// Same-day samples reduced to what the daily strip shows.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub weekday: String,
    pub min: i64,
    pub max: i64,
    pub condition: String,
    pub icon: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DisplayBundle {
    pub current: CurrentConditions,
    pub hourly: Vec<WeatherSample>,
    pub daily: Vec<DayAggregate>,
    pub theme: Theme,
}

/// Display rounding: nearest integer, halves to even.
pub fn round_temp(t: f64) -> i64 {
    t.round_ties_even() as i64
}

/// Uppercases the first letter of every word, lowercases the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("light rain"), "Light Rain");
        assert_eq!(title_case("new york, US"), "New York, Us");
        assert_eq!(title_case("o'neill"), "O'Neill");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn rounding_halves_go_to_even() {
        assert_eq!(round_temp(15.4), 15);
        assert_eq!(round_temp(2.5), 2);
        assert_eq!(round_temp(3.5), 4);
        assert_eq!(round_temp(-0.6), -1);
    }
}
