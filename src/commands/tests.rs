use super::*;
use crate::i18n::Pack;
use async_trait::async_trait;
use skycast_core::error::SkycastError;
use skycast_core::message::CallbackQuery;
use skycast_core::traits::{Commentator, Forecaster};
use skycast_core::weather::WeatherSample;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Records every outbound call instead of talking to Telegram.
#[derive(Default)]
struct MockMessenger {
    sent: Mutex<Vec<(i64, String)>>,
    edits: Mutex<Vec<(i64, i64, String)>>,
    answered: Mutex<Vec<String>>,
    next_id: AtomicI64,
}

impl MockMessenger {
    fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }

    fn edits(&self) -> Vec<(i64, i64, String)> {
        self.edits.lock().unwrap().clone()
    }
}

#[async_trait]
impl skycast_core::traits::Messenger for MockMessenger {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i64, SkycastError> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    async fn send_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        buttons: &[(String, String)],
    ) -> Result<i64, SkycastError> {
        let rendered = format!(
            "{text} [{}]",
            buttons
                .iter()
                .map(|(label, data)| format!("{label}={data}"))
                .collect::<Vec<_>>()
                .join("|")
        );
        self.sent.lock().unwrap().push((chat_id, rendered));
        Ok(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<(), SkycastError> {
        self.edits
            .lock()
            .unwrap()
            .push((chat_id, message_id, text.to_string()));
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), SkycastError> {
        self.answered.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }
}

/// Counts fetches so tests can assert the zero-call guard.
#[derive(Default)]
struct CountingForecaster {
    calls: AtomicUsize,
}

#[async_trait]
impl Forecaster for CountingForecaster {
    async fn fetch(&self, city: &str) -> Result<WeatherSample, SkycastError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(WeatherSample {
            city: city.to_string(),
            description: "clear sky".to_string(),
            temp_c: 21.0,
            wind_kph: 3.1,
        })
    }
}

#[derive(Default)]
struct CountingCommentator {
    calls: AtomicUsize,
}

#[async_trait]
impl Commentator for CountingCommentator {
    fn name(&self) -> &str {
        "counting"
    }

    async fn comment(
        &self,
        city: &str,
        _weather_line: &str,
        language: &str,
    ) -> Result<String, SkycastError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(format!("Commentary for {city} in {language}."))
    }

    async fn is_available(&self) -> bool {
        true
    }
}

struct Fixture {
    registry: skycast_core::state::Registry,
    translations: crate::i18n::Store,
    messenger: MockMessenger,
    forecaster: Arc<CountingForecaster>,
    commentator: Arc<CountingCommentator>,
    reporter: crate::report::ReportBuilder,
}

impl Fixture {
    fn new() -> Self {
        let forecaster = Arc::new(CountingForecaster::default());
        let commentator = Arc::new(CountingCommentator::default());
        let reporter = crate::report::ReportBuilder::new(forecaster.clone(), commentator.clone());
        Self {
            registry: skycast_core::state::Registry::in_memory(),
            translations: crate::i18n::Store::new(
                Pack::from_toml(include_str!("../../languages/english.toml")).unwrap(),
                Pack::from_toml(include_str!("../../languages/persian.toml")).unwrap(),
            ),
            messenger: MockMessenger::default(),
            forecaster,
            commentator,
            reporter,
        }
    }

    fn ctx(&self) -> CommandContext<'_> {
        CommandContext {
            registry: &self.registry,
            translations: &self.translations,
            messenger: &self.messenger,
            reporter: &self.reporter,
        }
    }

    async fn run(&self, text: &str, chat_id: i64) {
        let cmd = Command::parse(text).expect("test sent an unknown command");
        handle(cmd, &self.ctx(), chat_id, text).await.unwrap();
    }
}

#[test]
fn test_parse_all_commands() {
    assert!(matches!(Command::parse("/start"), Some(Command::Start)));
    assert!(matches!(Command::parse("/report"), Some(Command::Report)));
    assert!(matches!(Command::parse("/done"), Some(Command::Done)));
    assert!(matches!(
        Command::parse("/addcity Tehran"),
        Some(Command::AddCity)
    ));
    assert!(matches!(
        Command::parse("/removecity Tehran"),
        Some(Command::RemoveCity)
    ));
    assert!(matches!(
        Command::parse("/mycities"),
        Some(Command::MyCities)
    ));
    assert!(matches!(Command::parse("/stop"), Some(Command::Stop)));
    assert!(Command::parse("/weather").is_none());
    assert!(Command::parse("hello there").is_none());
    assert!(Command::parse("").is_none());
}

#[test]
fn test_parse_commands_with_botname_suffix() {
    assert!(matches!(
        Command::parse("/report@skycast_bot"),
        Some(Command::Report)
    ));
    assert!(matches!(
        Command::parse("/addcity@skycast_bot Tehran"),
        Some(Command::AddCity)
    ));
    assert!(Command::parse("/unknown@skycast_bot").is_none());
}

#[tokio::test]
async fn test_start_subscribes_once_and_offers_both_languages() {
    let fx = Fixture::new();
    fx.run("/start", 100).await;
    fx.run("/start", 100).await;

    assert_eq!(fx.registry.subscribers(), vec![100]);
    let sent = fx.messenger.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].1.contains("فارسی=fa"));
    assert!(sent[0].1.contains("English 🇬🇧=en"));
}

#[tokio::test]
async fn test_language_callback_sets_language_and_confirms() {
    let fx = Fixture::new();
    fx.run("/start", 100).await;

    let callback = CallbackQuery {
        id: "cb-1".to_string(),
        chat_id: 100,
        message_id: 1,
        data: "fa".to_string(),
    };
    handle_language_callback(&fx.ctx(), &callback).await.unwrap();

    assert_eq!(
        fx.registry.language(100),
        Some(skycast_core::language::Language::Persian)
    );
    assert_eq!(fx.messenger.answered.lock().unwrap().as_slice(), ["cb-1"]);
    let edits = fx.messenger.edits();
    assert_eq!(edits.len(), 1);
    assert!(edits[0].2.contains("فارسی"), "confirmation should be Persian");
}

#[tokio::test]
async fn test_language_callback_unknown_code_changes_nothing() {
    let fx = Fixture::new();
    let callback = CallbackQuery {
        id: "cb-2".to_string(),
        chat_id: 100,
        message_id: 1,
        data: "tlh".to_string(),
    };
    handle_language_callback(&fx.ctx(), &callback).await.unwrap();

    assert_eq!(fx.registry.language(100), None);
    assert!(fx.messenger.edits().is_empty());
}

#[tokio::test]
async fn test_language_switch_replies_from_new_pack_only() {
    let fx = Fixture::new();
    for (i, code) in ["fa", "en"].iter().enumerate() {
        let callback = CallbackQuery {
            id: format!("cb-{i}"),
            chat_id: 100,
            message_id: 1,
            data: (*code).to_string(),
        };
        handle_language_callback(&fx.ctx(), &callback).await.unwrap();
    }

    // A missing-argument rejection must now come from the English pack.
    fx.run("/addcity", 100).await;
    let sent = fx.messenger.sent();
    let last = &sent.last().unwrap().1;
    assert!(last.contains("Please specify a city"), "got: {last}");
    assert!(!last.contains("لطفاً"), "no Persian leakage: {last}");
}

#[tokio::test]
async fn test_addcity_requires_argument() {
    let fx = Fixture::new();
    fx.run("/addcity", 100).await;

    let sent = fx.messenger.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("Please specify a city"));
    assert!(fx.registry.cities(100).is_empty());
}

#[tokio::test]
async fn test_addcity_supports_multiword_names() {
    let fx = Fixture::new();
    fx.run("/addcity Kuala Lumpur", 100).await;

    assert_eq!(fx.registry.cities(100), vec!["Kuala Lumpur"]);
    assert!(fx.messenger.sent()[0].1.contains("'Kuala Lumpur'"));
}

#[tokio::test]
async fn test_removecity_reports_not_found() {
    let fx = Fixture::new();
    fx.run("/removecity Paris", 100).await;
    assert!(fx.messenger.sent()[0].1.contains("was not found"));

    fx.run("/addcity Paris", 100).await;
    fx.run("/removecity Paris", 100).await;
    assert!(fx.messenger.sent()[2].1.contains("has been removed"));
    assert!(fx.registry.cities(100).is_empty());
}

#[tokio::test]
async fn test_mycities_lists_in_order() {
    let fx = Fixture::new();
    fx.run("/addcity Tehran", 100).await;
    fx.run("/addcity Paris", 100).await;
    fx.run("/mycities", 100).await;

    let sent = fx.messenger.sent();
    assert!(sent[2].1.contains("Tehran, Paris"));
}

#[tokio::test]
async fn test_report_without_language_is_rejected_without_provider_calls() {
    let fx = Fixture::new();
    fx.run("/addcity Tehran", 100).await;
    fx.run("/report", 100).await;

    let sent = fx.messenger.sent();
    assert_eq!(sent.len(), 2, "exactly one rejection reply");
    assert!(sent[1].1.contains("select your language"));
    assert_eq!(fx.forecaster.calls.load(Ordering::Relaxed), 0);
    assert_eq!(fx.commentator.calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_report_without_cities_is_rejected() {
    let fx = Fixture::new();
    fx.registry
        .set_language(100, skycast_core::language::Language::English);
    fx.run("/report", 100).await;

    let sent = fx.messenger.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("haven't added any cities"));
    assert_eq!(fx.forecaster.calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_report_two_cities_in_added_order_with_progress() {
    let fx = Fixture::new();
    fx.registry
        .set_language(100, skycast_core::language::Language::English);
    fx.run("/addcity Tehran", 100).await;
    fx.run("/addcity Paris", 100).await;
    fx.run("/report", 100).await;

    // One progress message, then the confirmations.
    let sent = fx.messenger.sent();
    let progress = sent.last().unwrap();
    assert!(progress.1.contains("(0%)"));

    let edits = fx.messenger.edits();
    assert_eq!(edits.len(), 2, "one mid-progress edit plus the final text");
    assert!(edits[0].2.contains("(50%)"));

    let final_text = &edits[1].2;
    assert!(final_text.contains("(100%)"));
    let tehran = final_text.find("📍 Tehran").unwrap();
    let paris = final_text.find("📍 Paris").unwrap();
    assert!(tehran < paris, "cities in the order they were added");
    assert!(final_text.contains("Tehran: clear sky, 21.0°C, 3.1kph"));
    assert!(final_text.contains("Commentary for Paris in English."));

    assert_eq!(fx.forecaster.calls.load(Ordering::Relaxed), 2);
    assert_eq!(fx.commentator.calls.load(Ordering::Relaxed), 2);
}

#[tokio::test]
async fn test_stop_replies_by_subscription_state() {
    let fx = Fixture::new();
    fx.run("/stop", 100).await;
    assert!(fx.messenger.sent()[0].1.contains("not subscribed"));

    fx.run("/start", 100).await;
    fx.run("/stop", 100).await;
    assert!(fx.messenger.sent()[2].1.contains("unsubscribed"));
    assert!(fx.registry.subscribers().is_empty());
}
