//! OpenWeatherMap current-weather client.
//!
//! One GET per city, metric units, no retry. Docs:
//! <https://openweathermap.org/current>

use async_trait::async_trait;
use serde::Deserialize;
use skycast_core::{config::WeatherConfig, error::SkycastError, traits::Forecaster,
    weather::WeatherSample};
use tracing::debug;

/// OpenWeatherMap API client.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    /// Create a new client from config.
    pub fn from_config(config: &WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize)]
struct OwmResponse {
    weather: Vec<OwmCondition>,
    main: OwmMain,
    wind: OwmWind,
}

#[derive(Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Deserialize)]
struct OwmWind {
    speed: f64,
}

#[async_trait]
impl Forecaster for OpenWeatherClient {
    async fn fetch(&self, city: &str) -> Result<WeatherSample, SkycastError> {
        let url = format!("{}/weather", self.base_url);
        debug!("weather: GET /weather?q={city}");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| SkycastError::Provider(format!("weather request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(SkycastError::Provider(format!(
                "openweathermap returned {status} for '{city}'"
            )));
        }

        let parsed: OwmResponse = resp.json().await.map_err(|e| {
            SkycastError::Provider(format!("weather: failed to parse response: {e}"))
        })?;

        let description = parsed
            .weather
            .first()
            .map(|w| w.description.clone())
            .ok_or_else(|| {
                SkycastError::Provider(format!("weather response for '{city}' has no conditions"))
            })?;

        Ok(WeatherSample {
            city: city.to_string(),
            description,
            temp_c: parsed.main.temp,
            wind_kph: parsed.wind.speed,
        })
    }
}
