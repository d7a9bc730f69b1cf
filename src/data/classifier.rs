use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::weather::{Coordinates, WeatherCategory, classify_conditions};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const GEOIP_URL: &str = "https://ipapi.co/json/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("could not determine a location to classify")]
    NoLocation,
}

/// Resolves the local weather into a [`WeatherCategory`].
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    client: Client,
    forecast_url: String,
    geoip_url: String,
}

impl Default for ClassifierClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_urls(FORECAST_URL, GEOIP_URL)
    }

    #[must_use]
    pub fn with_urls(forecast_url: impl Into<String>, geoip_url: impl Into<String>) -> Self {
        let client = client_or_default(Client::builder().timeout(REQUEST_TIMEOUT).build());
        Self {
            client,
            forecast_url: forecast_url.into(),
            geoip_url: geoip_url.into(),
        }
    }

    /// Never fails: any problem is logged and reported as clear weather.
    pub async fn classify(&self, coordinates: Option<Coordinates>) -> WeatherCategory {
        match self.try_classify(coordinates).await {
            Ok(category) => {
                tracing::info!(category = category.name(), "weather classified");
                category
            }
            Err(err) => {
                tracing::warn!(error = %err, "weather classification failed, using CLEAR");
                WeatherCategory::Clear
            }
        }
    }

    pub async fn try_classify(
        &self,
        coordinates: Option<Coordinates>,
    ) -> Result<WeatherCategory, ClassifyError> {
        let coordinates = match coordinates {
            Some(coordinates) => coordinates,
            None => self.locate().await?,
        };

        let payload: ForecastResponse = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("current", "weather_code,wind_speed_10m".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(
            code = payload.current.weather_code,
            wind = ?payload.current.wind_speed_10m,
            "current conditions"
        );
        Ok(classify_conditions(
            payload.current.weather_code,
            payload.current.wind_speed_10m,
        ))
    }

    async fn locate(&self) -> Result<Coordinates, ClassifyError> {
        let response: IpApiResponse = self
            .client
            .get(&self.geoip_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        match (response.latitude, response.longitude) {
            (Some(latitude), Some(longitude)) => {
                tracing::debug!(latitude, longitude, "located via geo-IP");
                Ok(Coordinates {
                    latitude,
                    longitude,
                })
            }
            _ => Err(ClassifyError::NoLocation),
        }
    }
}

/// A client without the request timeout is still usable; the failure is logged.
fn client_or_default<E: std::fmt::Display>(built: Result<Client, E>) -> Client {
    built.unwrap_or_else(|err| {
        tracing::warn!(
            error = %err,
            timeout_secs = REQUEST_TIMEOUT.as_secs(),
            "http client setup failed, falling back to defaults without timeout"
        );
        Client::new()
    })
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    weather_code: u8,
    wind_speed_10m: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tracing::Level;

    use super::*;
    use crate::logging::file_subscriber;

    #[test]
    fn failed_client_setup_is_logged_before_fallback() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("classifier.log");
        let file = File::create(&path).expect("log file");

        tracing::subscriber::with_default(file_subscriber(file, Level::WARN), || {
            let _client = client_or_default(Err("tls backend unavailable"));
        });

        let written = std::fs::read_to_string(&path).expect("read log");
        assert!(written.contains("http client setup failed"));
        assert!(written.contains("tls backend unavailable"));
        assert!(written.contains("timeout_secs=10"));
    }

    #[test]
    fn current_block_tolerates_missing_wind() {
        let payload: ForecastResponse =
            serde_json::from_str(r#"{"current":{"weather_code":61}}"#).expect("payload");
        assert_eq!(payload.current.weather_code, 61);
        assert_eq!(payload.current.wind_speed_10m, None);
    }

    #[test]
    fn geoip_payload_ignores_extra_fields() {
        let payload: IpApiResponse = serde_json::from_str(
            r#"{"city":"Oslo","latitude":59.91,"longitude":10.75,"country_name":"Norway"}"#,
        )
        .expect("payload");
        assert_eq!(payload.latitude, Some(59.91));
    }
}
