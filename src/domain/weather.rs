use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherCategory {
    #[default]
    Clear,
    Snow,
    LightSnow,
    Rain,
    Storm,
    Wind,
    Cloudy,
}

impl WeatherCategory {
    /// Selection order shown on the card; keys `1`..`7` map onto it.
    pub const ALL: [Self; 7] = [
        Self::Clear,
        Self::Snow,
        Self::LightSnow,
        Self::Rain,
        Self::Storm,
        Self::Wind,
        Self::Cloudy,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::Snow => "SNOW",
            Self::LightSnow => "LIGHT_SNOW",
            Self::Rain => "RAIN",
            Self::Storm => "STORM",
            Self::Wind => "WIND",
            Self::Cloudy => "CLOUDY",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "Sunny",
            Self::Snow => "Snowing",
            Self::LightSnow => "Light snow",
            Self::Rain => "Raining",
            Self::Storm => "Stormy",
            Self::Wind => "Windy",
            Self::Cloudy => "Cloudy",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Clear => "☀",
            Self::Snow => "❄",
            Self::LightSnow => "❅",
            Self::Rain => "☂",
            Self::Storm => "⚡",
            Self::Wind => "≋",
            Self::Cloudy => "☁",
        }
    }

    #[must_use]
    pub fn is_snowing(self) -> bool {
        matches!(self, Self::Snow | Self::LightSnow)
    }

    #[must_use]
    pub fn is_raining(self) -> bool {
        matches!(self, Self::Rain | Self::Storm)
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|category| *category == self)
            .unwrap_or_default()
    }

    /// Steps through [`Self::ALL`], wrapping at both ends.
    #[must_use]
    pub fn cycle(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let next = (self.index() as isize + delta).rem_euclid(len);
        Self::ALL[next as usize]
    }

    /// Lenient parse of a free-form condition label.
    ///
    /// Exact category names win; otherwise the first keyword found decides.
    /// Anything unrecognised falls back to [`WeatherCategory::Clear`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let text = label.trim().to_uppercase().replace(['-', ' '], "_");
        if let Some(exact) = Self::ALL.iter().find(|c| c.name() == text) {
            return *exact;
        }
        if text.contains("LIGHT_SNOW") || text.contains("FLURR") {
            Self::LightSnow
        } else if text.contains("RAIN") || text.contains("DRIZZLE") {
            Self::Rain
        } else if text.contains("SNOW") || text.contains("BLIZZARD") {
            Self::Snow
        } else if text.contains("STORM") || text.contains("THUNDER") {
            Self::Storm
        } else if text.contains("WIND") || text.contains("GUST") {
            Self::Wind
        } else if text.contains("CLOUD") || text.contains("OVERCAST") || text.contains("FOG") {
            Self::Cloudy
        } else {
            Self::Clear
        }
    }
}

/// Wind speed (km/h) at which calm skies are reported as [`WeatherCategory::Wind`].
pub const WINDY_THRESHOLD_KMH: f32 = 40.0;

/// Maps a WMO weather interpretation code onto a category.
///
/// Codes outside the WMO table are ambiguous and resolve to clear skies.
#[must_use]
pub fn weather_code_to_category(code: u8) -> WeatherCategory {
    match code {
        0 | 1 => WeatherCategory::Clear,
        2 | 3 | 45 | 48 => WeatherCategory::Cloudy,
        51..=57 | 61..=67 | 80..=82 => WeatherCategory::Rain,
        71 | 77 | 85 => WeatherCategory::LightSnow,
        73 | 75 | 86 => WeatherCategory::Snow,
        95 | 96 | 99 => WeatherCategory::Storm,
        _ => WeatherCategory::Clear,
    }
}

#[must_use]
pub fn classify_conditions(code: u8, wind_speed_kmh: Option<f32>) -> WeatherCategory {
    let category = weather_code_to_category(code);
    let windy = wind_speed_kmh.is_some_and(|speed| speed >= WINDY_THRESHOLD_KMH);
    match category {
        WeatherCategory::Clear | WeatherCategory::Cloudy if windy => WeatherCategory::Wind,
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
