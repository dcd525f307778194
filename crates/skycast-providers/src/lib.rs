//! # skycast-providers
//!
//! Clients for the two external data providers: OpenWeatherMap for current
//! weather and Google Gemini for report commentary.

pub mod gemini;
pub mod weather;

pub use gemini::GeminiCommentator;
pub use weather::OpenWeatherClient;
