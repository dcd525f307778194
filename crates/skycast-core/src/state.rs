//! Per-chat state: language selection, tracked cities, subscription flag.
//!
//! All state is keyed by chat id and lives for the process lifetime only.
//! Handlers go through [`Registry`], which delegates to an injectable
//! [`StateBackend`] — the in-memory backend in production and tests alike,
//! with room for a persistent implementation later.

use crate::language::Language;
use std::collections::HashMap;
use std::sync::RwLock;

/// Storage backend for per-chat state.
///
/// Individual operations are serialized by the backend; composite
/// read-then-act sequences (e.g. `/addcity` racing `/report`) are
/// best-effort.
pub trait StateBackend: Send + Sync {
    /// Append a city if not already tracked (case-sensitive exact match).
    /// Returns whether the city was newly added.
    fn add_city(&self, chat_id: i64, city: &str) -> bool;
    /// Remove a city. Returns whether removal occurred.
    fn remove_city(&self, chat_id: i64, city: &str) -> bool;
    /// Tracked cities in insertion order. Empty for unknown chats.
    fn cities(&self, chat_id: i64) -> Vec<String>;
    fn set_language(&self, chat_id: i64, language: Language);
    fn language(&self, chat_id: i64) -> Option<Language>;
    /// Idempotent. Returns whether the chat was newly subscribed.
    fn subscribe(&self, chat_id: i64) -> bool;
    /// No-op if absent. Returns whether the chat was subscribed.
    fn unsubscribe(&self, chat_id: i64) -> bool;
    fn subscribers(&self) -> Vec<i64>;
}

#[derive(Debug, Default)]
struct ChatState {
    language: Option<Language>,
    cities: Vec<String>,
    subscribed: bool,
}

/// In-memory state backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    chats: RwLock<HashMap<i64, ChatState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateBackend for MemoryBackend {
    fn add_city(&self, chat_id: i64, city: &str) -> bool {
        let mut chats = self.chats.write().unwrap_or_else(|e| e.into_inner());
        let state = chats.entry(chat_id).or_default();
        if state.cities.iter().any(|c| c == city) {
            return false;
        }
        state.cities.push(city.to_string());
        true
    }

    fn remove_city(&self, chat_id: i64, city: &str) -> bool {
        let mut chats = self.chats.write().unwrap_or_else(|e| e.into_inner());
        match chats.get_mut(&chat_id) {
            Some(state) => match state.cities.iter().position(|c| c == city) {
                Some(idx) => {
                    state.cities.remove(idx);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    fn cities(&self, chat_id: i64) -> Vec<String> {
        let chats = self.chats.read().unwrap_or_else(|e| e.into_inner());
        chats
            .get(&chat_id)
            .map(|s| s.cities.clone())
            .unwrap_or_default()
    }

    fn set_language(&self, chat_id: i64, language: Language) {
        let mut chats = self.chats.write().unwrap_or_else(|e| e.into_inner());
        chats.entry(chat_id).or_default().language = Some(language);
    }

    fn language(&self, chat_id: i64) -> Option<Language> {
        let chats = self.chats.read().unwrap_or_else(|e| e.into_inner());
        chats.get(&chat_id).and_then(|s| s.language)
    }

    fn subscribe(&self, chat_id: i64) -> bool {
        let mut chats = self.chats.write().unwrap_or_else(|e| e.into_inner());
        let state = chats.entry(chat_id).or_default();
        let newly = !state.subscribed;
        state.subscribed = true;
        newly
    }

    fn unsubscribe(&self, chat_id: i64) -> bool {
        let mut chats = self.chats.write().unwrap_or_else(|e| e.into_inner());
        match chats.get_mut(&chat_id) {
            Some(state) => {
                let was = state.subscribed;
                state.subscribed = false;
                was
            }
            None => false,
        }
    }

    fn subscribers(&self) -> Vec<i64> {
        let chats = self.chats.read().unwrap_or_else(|e| e.into_inner());
        let mut ids: Vec<i64> = chats
            .iter()
            .filter(|(_, s)| s.subscribed)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// The user state registry handlers talk to.
pub struct Registry {
    backend: Box<dyn StateBackend>,
}

impl Registry {
    pub fn new(backend: Box<dyn StateBackend>) -> Self {
        Self { backend }
    }

    /// Registry over the in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    pub fn add_city(&self, chat_id: i64, city: &str) -> bool {
        self.backend.add_city(chat_id, city)
    }

    pub fn remove_city(&self, chat_id: i64, city: &str) -> bool {
        self.backend.remove_city(chat_id, city)
    }

    pub fn cities(&self, chat_id: i64) -> Vec<String> {
        self.backend.cities(chat_id)
    }

    pub fn set_language(&self, chat_id: i64, language: Language) {
        self.backend.set_language(chat_id, language);
    }

    pub fn language(&self, chat_id: i64) -> Option<Language> {
        self.backend.language(chat_id)
    }

    pub fn subscribe(&self, chat_id: i64) -> bool {
        self.backend.subscribe(chat_id)
    }

    pub fn unsubscribe(&self, chat_id: i64) -> bool {
        self.backend.unsubscribe(chat_id)
    }

    pub fn subscribers(&self) -> Vec<i64> {
        self.backend.subscribers()
    }
}
