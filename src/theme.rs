//! Background theme picked from a condition description.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Foggy,
    #[default]
    Default,
}

// Checked in order; first group with a matching keyword wins.
const KEYWORDS: &[(Theme, &[&str])] = &[
    (Theme::Sunny, &["clear"]),
    (Theme::Cloudy, &["cloud"]),
    (Theme::Rainy, &["rain", "drizzle", "thunderstorm"]),
    (Theme::Snowy, &["snow"]),
    (Theme::Foggy, &["mist", "fog", "haze"]),
];

impl Theme {
    pub fn id(self) -> &'static str {
        match self {
            Theme::Sunny => "sunny",
            Theme::Cloudy => "cloudy",
            Theme::Rainy => "rainy",
            Theme::Snowy => "snowy",
            Theme::Foggy => "foggy",
            Theme::Default => "default",
        }
    }

    /// CSS background for the host page.
    pub fn gradient(self) -> &'static str {
        match self {
            Theme::Sunny => "linear-gradient(to bottom, #87CEEB, #ffffff)",
            Theme::Cloudy => "linear-gradient(to bottom, #d3d3d3, #ffffff)",
            Theme::Rainy => "linear-gradient(to bottom, #5f6a6a, #dfe6e9)",
            Theme::Snowy => "linear-gradient(to bottom, #cce7ff, #ffffff)",
            Theme::Foggy => "linear-gradient(to bottom, #bdc3c7, #ffffff)",
            Theme::Default => "linear-gradient(to bottom, #E3F2FD, #FFFFFF)",
        }
    }
}

pub fn select_theme(condition: &str) -> Theme {
    let c = condition.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| c.contains(*w)))
        .map(|(theme, _)| *theme)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_unknown_fall_back_to_default() {
        assert_eq!(select_theme(""), Theme::Default);
        assert_eq!(select_theme("volcanic ash"), Theme::Default);
    }

    #[test]
    fn keywords_map_to_themes() {
        assert_eq!(select_theme("clear sky"), Theme::Sunny);
        assert_eq!(select_theme("light rain"), Theme::Rainy);
        assert_eq!(select_theme("Light Intensity Drizzle"), Theme::Rainy);
        assert_eq!(select_theme("thunderstorm with hail"), Theme::Rainy);
        assert_eq!(select_theme("SNOW showers"), Theme::Snowy);
        assert_eq!(select_theme("Haze"), Theme::Foggy);
        assert_eq!(select_theme("overcast clouds"), Theme::Cloudy);
    }

    #[test]
    fn earlier_group_wins() {
        // both "cloud" and "rain" present
        assert_eq!(select_theme("rain clouds"), Theme::Cloudy);
        assert_eq!(select_theme("rain and snow"), Theme::Rainy);
    }

    #[test]
    fn ids_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Rainy).unwrap(), "\"rainy\"");
        assert_eq!(Theme::Foggy.id(), "foggy");
        assert_eq!(Theme::default().gradient(), "linear-gradient(to bottom, #E3F2FD, #FFFFFF)");
    }
}
