//! Weather observation value type.

use serde::{Deserialize, Serialize};

/// A single weather observation for one city. Ephemeral — produced per
/// request, embedded into report text, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub city: String,
    /// Condition description, e.g. "clear sky".
    pub description: String,
    /// Temperature in degrees Celsius (metric units).
    pub temp_c: f64,
    /// Wind speed in kph.
    pub wind_kph: f64,
}

impl WeatherSample {
    /// One-line summary embedded in reports and AI prompts.
    pub fn summary(&self) -> String {
        format!(
            "{}: {}, {:.1}°C, {:.1}kph",
            self.city, self.description, self.temp_c, self.wind_kph
        )
    }
}
