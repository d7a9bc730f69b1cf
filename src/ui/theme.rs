use ratatui::style::Color;

use crate::domain::weather::WeatherCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub top: Color,
    pub bottom: Color,
    pub accent: Color,
    pub text: Color,
    pub muted_text: Color,
    pub card: Color,
    pub border: Color,
}

#[must_use]
pub fn theme_for(category: WeatherCategory) -> Theme {
    let (top, bottom, accent) = match category {
        WeatherCategory::Clear => ((96, 165, 250), (37, 99, 235), (250, 204, 21)),
        WeatherCategory::Snow => ((30, 41, 59), (15, 23, 42), (219, 234, 254)),
        WeatherCategory::LightSnow => ((51, 65, 85), (30, 41, 59), (219, 234, 254)),
        WeatherCategory::Rain => ((51, 65, 85), (30, 41, 59), (96, 165, 250)),
        WeatherCategory::Storm => ((17, 24, 39), (0, 0, 0), (192, 132, 252)),
        WeatherCategory::Wind => ((17, 94, 89), (17, 24, 39), (45, 212, 191)),
        WeatherCategory::Cloudy => ((156, 163, 175), (75, 85, 99), (209, 213, 219)),
    };
    let light_sky = category == WeatherCategory::Cloudy;

    Theme {
        top: rgb(top),
        bottom: rgb(bottom),
        accent: rgb(accent),
        text: if light_sky {
            Color::Rgb(17, 24, 39)
        } else {
            Color::Rgb(241, 245, 249)
        },
        muted_text: if light_sky {
            Color::Rgb(55, 65, 81)
        } else {
            Color::Rgb(148, 163, 184)
        },
        card: if light_sky {
            Color::Rgb(229, 231, 235)
        } else {
            Color::Rgb(15, 23, 42)
        },
        border: rgb(accent),
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_distinct_sky() {
        let skies: Vec<_> = WeatherCategory::ALL
            .iter()
            .map(|category| {
                let theme = theme_for(*category);
                (theme.top, theme.bottom, theme.accent)
            })
            .collect();
        for (i, sky) in skies.iter().enumerate() {
            assert!(!skies[i + 1..].contains(sky), "duplicate sky at {i}");
        }
    }

    #[test]
    fn cloudy_uses_dark_text_on_light_sky() {
        let theme = theme_for(WeatherCategory::Cloudy);
        assert_eq!(theme.text, Color::Rgb(17, 24, 39));
        assert_eq!(theme_for(WeatherCategory::Storm).bottom, Color::Rgb(0, 0, 0));
    }
}
