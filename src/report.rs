//! Report builder — combines weather data and AI commentary per city.

use crate::i18n::{MessageKey, Pack};
use skycast_core::traits::{Commentator, Forecaster};
use std::sync::Arc;
use tracing::warn;

/// Builds the multi-city report text.
///
/// Cities are processed sequentially in list order; a failed weather or
/// commentary fetch degrades that city's block to an error line without
/// aborting the rest of the report.
pub struct ReportBuilder {
    forecaster: Arc<dyn Forecaster>,
    commentator: Arc<dyn Commentator>,
}

impl ReportBuilder {
    pub fn new(forecaster: Arc<dyn Forecaster>, commentator: Arc<dyn Commentator>) -> Self {
        Self {
            forecaster,
            commentator,
        }
    }

    /// Report header with today's date.
    pub fn header(&self, pack: &Pack) -> String {
        format!(
            "📊 {} ({})\n",
            pack.get(MessageKey::WeatherReport),
            chrono::Local::now().format("%Y-%m-%d")
        )
    }

    /// One city's block: header line, weather line, commentary line.
    pub async fn city_block(&self, pack: &Pack, city: &str) -> String {
        let weather_line = match self.forecaster.fetch(city).await {
            Ok(sample) => sample.summary(),
            Err(e) => {
                warn!("report: weather fetch for '{city}' failed: {e}");
                pack.city(MessageKey::WeatherUnavailable, city)
            }
        };

        // The commentator still gets a degraded weather line; it will say
        // what it can about the missing data.
        let commentary = match self
            .commentator
            .comment(city, &weather_line, pack.get(MessageKey::AiLanguage))
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("report: commentary for '{city}' failed: {e}");
                format!(
                    "{}❌ {}",
                    pack.get(MessageKey::Ecode),
                    pack.get(MessageKey::AiError)
                )
            }
        };

        format!(
            "\n📍 {city}\n{weather_line}\n🤖 {}: {commentary}\n",
            pack.get(MessageKey::AiResponse)
        )
    }

    /// The full report: header plus one block per city, in list order.
    pub async fn build(&self, pack: &Pack, cities: &[String]) -> String {
        let mut report = self.header(pack);
        for city in cities {
            report.push_str(&self.city_block(pack, city).await);
        }
        report
    }
}
