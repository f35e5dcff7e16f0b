use dersbot::models::NewMaterial;
use dersbot::{create_material, get_or_create_subject_button};
use teloxide::types::Message;

use crate::http_server::AppState;

const CAPTION_FORMAT_TEXT: &str =
    "⚠️ Please forward the file with a caption in the format: Subject; File Name";
const FILE_ADDED_TEXT: &str = "✅ File added successfully.";
const STORAGE_ERROR_TEXT: &str = "❌ Database error while adding file.";

/// The ingest path opens only for the configured administrator, and only for
/// messages that still carry their forward origin (chat and message id).
pub fn is_admin_forward(message: &Message, admin_user_id: i64) -> bool {
    let from_admin = message
        .from()
        .map(|user| user.id.0 as i64 == admin_user_id)
        .unwrap_or(false);

    from_admin
        && message.forward_from_chat().is_some()
        && message.forward_from_message_id().is_some()
}

/// Splits a `Subject; File Name` caption, trimming both halves. Captions
/// without the separator or with an empty half are malformed.
pub fn parse_caption(caption: &str) -> Option<(String, String)> {
    let (subject, file_name) = caption.split_once(';')?;
    let subject = subject.trim();
    let file_name = file_name.trim();

    if subject.is_empty() || file_name.is_empty() {
        return None;
    }

    Some((subject.to_string(), file_name.to_string()))
}

pub async fn handle_admin_forward(state: &AppState, message: &Message) {
    let chat_id = message.chat.id.0;

    tracing::info!("Admin action: received forwarded message for file addition");

    let caption = message.caption().unwrap_or("");
    let (subject, file_name) = match parse_caption(caption) {
        Some(parts) => parts,
        None => {
            tracing::warn!("Admin forward is missing a valid caption: {:?}", caption);
            state.bot.send_message(chat_id, CAPTION_FORMAT_TEXT).await;
            return;
        }
    };

    // both are present, guaranteed by is_admin_forward
    let origin_message_id = match message.forward_from_message_id() {
        Some(id) => i64::from(id),
        None => return,
    };
    let origin_chat_id = match message.forward_from_chat() {
        Some(chat) => chat.id.0,
        None => return,
    };

    let button = match get_or_create_subject_button(&state.pool, &subject) {
        Ok(button) => button,
        Err(e) => {
            tracing::error!("Failed to get or create subject '{}': {}", subject, e);
            state.bot.send_message(chat_id, STORAGE_ERROR_TEXT).await;
            return;
        }
    };

    match create_material(
        &state.pool,
        NewMaterial {
            file_name: &file_name,
            message_id: origin_message_id,
            chat_id: origin_chat_id,
            button_id: button.id,
        },
    ) {
        Ok(material) => {
            tracing::info!(
                "Admin added file '{}' (material {}) under subject '{}'",
                file_name,
                material.id,
                subject
            );
            state.bot.send_message(chat_id, FILE_ADDED_TEXT).await;
        }
        Err(e) => {
            tracing::error!(
                "Failed to store file '{}' under subject '{}': {}",
                file_name,
                subject,
                e
            );
            state.bot.send_message(chat_id, STORAGE_ERROR_TEXT).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_ID: i64 = 5833709924;

    // A document forwarded out of a channel, the shape the ingest path sees.
    fn forwarded_document(from_id: i64) -> Message {
        let payload = format!(
            r#"{{
                "message_id": 100,
                "date": 1716990000,
                "chat": {{"id": 42, "type": "private", "first_name": "Admin"}},
                "from": {{"id": {from_id}, "is_bot": false, "first_name": "Admin"}},
                "document": {{
                    "file_id": "BQACAgIAAxkBAAI",
                    "file_unique_id": "AgADwgQAAh3IWEs",
                    "file_name": "algebra.pdf",
                    "file_size": 12345
                }},
                "caption": "Math; Algebra Notes",
                "forward_from_chat": {{"id": -1001234, "type": "channel", "title": "Archive"}},
                "forward_from_message_id": 555,
                "forward_date": 1716980000
            }}"#
        );

        serde_json::from_str(&payload).expect("fixture must decode")
    }

    fn plain_text_message(from_id: i64) -> Message {
        let payload = format!(
            r#"{{
                "message_id": 101,
                "date": 1716990000,
                "chat": {{"id": 42, "type": "private", "first_name": "Admin"}},
                "from": {{"id": {from_id}, "is_bot": false, "first_name": "Admin"}},
                "text": "Math; Algebra Notes"
            }}"#
        );

        serde_json::from_str(&payload).expect("fixture must decode")
    }

    #[test]
    fn admin_forward_with_origin_is_ingestable() {
        let message = forwarded_document(ADMIN_ID);

        assert!(is_admin_forward(&message, ADMIN_ID));
        assert_eq!(message.forward_from_message_id(), Some(555));
        assert_eq!(message.forward_from_chat().map(|c| c.id.0), Some(-1001234));
    }

    #[test]
    fn non_admin_forward_is_not_ingestable() {
        let message = forwarded_document(123456);

        assert!(!is_admin_forward(&message, ADMIN_ID));
    }

    #[test]
    fn plain_message_from_admin_is_not_ingestable() {
        let message = plain_text_message(ADMIN_ID);

        assert!(!is_admin_forward(&message, ADMIN_ID));
    }

    #[test]
    fn caption_splits_and_trims() {
        assert_eq!(
            parse_caption(" Math ;  Algebra Notes "),
            Some(("Math".to_string(), "Algebra Notes".to_string()))
        );
    }

    #[test]
    fn caption_splits_on_the_first_separator_only() {
        assert_eq!(
            parse_caption("Math; Notes; v2"),
            Some(("Math".to_string(), "Notes; v2".to_string()))
        );
    }

    #[test]
    fn caption_without_separator_is_malformed() {
        assert_eq!(parse_caption("MathAlgebraNotes"), None);
    }

    #[test]
    fn caption_with_an_empty_half_is_malformed() {
        assert_eq!(parse_caption("Math;"), None);
        assert_eq!(parse_caption("; Algebra Notes"), None);
        assert_eq!(parse_caption(" ; "), None);
    }
}
