//! Tests for the Telegram channel module.

use super::polling::translate_update;
use super::send::keyboard_markup;
use super::types::*;
use crate::utils::split_message;
use skycast_core::message::IncomingEvent;

#[test]
fn test_split_long_report() {
    let text = "📍 city\nline\n".repeat(500);
    let chunks = split_message(&text, 4096);
    assert!(chunks.len() >= 2);
    for chunk in &chunks {
        assert!(chunk.len() <= 4096);
    }
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_tg_chat_group_detection() {
    let group: TgChat = serde_json::from_str(r#"{"id": -100123, "type": "group"}"#).unwrap();
    assert_eq!(group.chat_type, "group");

    let private: TgChat = serde_json::from_str(r#"{"id": 789, "type": "private"}"#).unwrap();
    assert_eq!(private.chat_type, "private");
}

#[test]
fn test_translate_text_message() {
    let json = r#"{
        "update_id": 10,
        "message": {
            "message_id": 2,
            "from": {"id": 5, "first_name": "Sara", "username": "sara_k"},
            "chat": {"id": 100, "type": "private"},
            "text": "/addcity Tehran"
        }
    }"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    match translate_update(update) {
        Some(IncomingEvent::Message(msg)) => {
            assert_eq!(msg.chat_id, 100);
            assert_eq!(msg.text, "/addcity Tehran");
            assert_eq!(msg.sender_name.as_deref(), Some("@sara_k"));
        }
        other => panic!("expected message event, got {other:?}"),
    }
}

#[test]
fn test_translate_skips_group_messages() {
    let json = r#"{
        "update_id": 11,
        "message": {
            "message_id": 3,
            "chat": {"id": -100456, "type": "supergroup"},
            "text": "hello"
        }
    }"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    assert!(translate_update(update).is_none());
}

#[test]
fn test_translate_skips_non_text() {
    let json = r#"{
        "update_id": 12,
        "message": {
            "message_id": 4,
            "chat": {"id": 100, "type": "private"}
        }
    }"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    assert!(translate_update(update).is_none());
}

#[test]
fn test_translate_callback_query() {
    let json = r#"{
        "update_id": 13,
        "callback_query": {
            "id": "cb-77",
            "from": {"id": 5, "first_name": "Sara"},
            "message": {
                "message_id": 8,
                "chat": {"id": 100, "type": "private"},
                "text": "Please choose your language:"
            },
            "data": "fa"
        }
    }"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    match translate_update(update) {
        Some(IncomingEvent::Callback(cb)) => {
            assert_eq!(cb.id, "cb-77");
            assert_eq!(cb.chat_id, 100);
            assert_eq!(cb.message_id, 8);
            assert_eq!(cb.data, "fa");
        }
        other => panic!("expected callback event, got {other:?}"),
    }
}

#[test]
fn test_translate_callback_without_message_is_skipped() {
    let json = r#"{
        "update_id": 14,
        "callback_query": {
            "id": "cb-78",
            "from": {"id": 5, "first_name": "Sara"},
            "data": "en"
        }
    }"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    assert!(translate_update(update).is_none());
}

#[test]
fn test_keyboard_markup_one_button_per_row() {
    let buttons = vec![
        ("🇮🇷 فارسی".to_string(), "fa".to_string()),
        ("English 🇬🇧".to_string(), "en".to_string()),
    ];
    let markup = keyboard_markup(&buttons);
    let rows = markup["inline_keyboard"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0]["callback_data"], "fa");
    assert_eq!(rows[1][0]["text"], "English 🇬🇧");
}

#[test]
fn test_tg_response_envelope() {
    let json = r#"{"ok": false, "description": "Bad Request: chat not found"}"#;
    let resp: TgResponse<Vec<TgUpdate>> = serde_json::from_str(json).unwrap();
    assert!(!resp.ok);
    assert!(resp.result.is_none());
    assert_eq!(
        resp.description.as_deref(),
        Some("Bad Request: chat not found")
    );
}
