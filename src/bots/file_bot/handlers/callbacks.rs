use dersbot::models::Button;
use dersbot::{
    find_button_by_name, find_buttons_by_menu_id, find_material_by_id,
    find_materials_by_button_id,
};
use html_escape::encode_text;
use teloxide::types::CallbackQuery;

use crate::bots::file_bot::keyboards::{build_file_keyboard, build_submenu_keyboard};
use crate::http_server::AppState;

use super::commands::{send_subject_listing, SUBJECTS_PROMPT};

const FILE_NOT_FOUND_TEXT: &str = "Sorry, I couldn't find that file.";
const UNSUPPORTED_ACTION_TEXT: &str = "Sorry, I don't support that action.";
const FILES_FETCH_ERROR_TEXT: &str = "Sorry, there was an error fetching files.";

/// One decoded callback payload: `<prefix>_<data>`, split once on the first
/// separator.
#[derive(Debug, PartialEq, Eq)]
pub enum CallbackAction {
    Subject(String),
    File(i32),
    Back,
    Unknown,
}

pub fn parse_callback_data(data: &str) -> CallbackAction {
    match data.split_once('_') {
        Some(("subj", subject)) if !subject.is_empty() => {
            CallbackAction::Subject(subject.to_string())
        }
        Some(("file", id)) => match id.parse::<i32>() {
            Ok(id) => CallbackAction::File(id),
            Err(_) => CallbackAction::Unknown,
        },
        Some(("back", _)) => CallbackAction::Back,
        _ => CallbackAction::Unknown,
    }
}

pub async fn callback_handler(state: &AppState, query: CallbackQuery) {
    let data = match &query.data {
        Some(data) => data.clone(),
        None => return,
    };

    let user_id = query.from.id.0 as i64;
    tracing::info!("Callback from user {}: {}", user_id, data);

    // stop the client-side spinner before any navigation work
    state.bot.answer_callback_query(&query.id).await;

    let chat_id = match &query.message {
        Some(message) => message.chat.id.0,
        None => {
            tracing::warn!("Callback {} has no originating message to reply to", query.id);
            return;
        }
    };

    match parse_callback_data(&data) {
        CallbackAction::Subject(subject) => handle_subject(state, chat_id, &subject).await,
        CallbackAction::File(material_id) => {
            handle_file(state, chat_id, user_id, material_id).await
        }
        CallbackAction::Back => {
            tracing::info!("User {} went back to the subject listing", user_id);
            send_subject_listing(state, chat_id).await;
        }
        CallbackAction::Unknown => {
            tracing::warn!("Unsupported callback data from user {}: {}", user_id, data);
            state.bot.send_message(chat_id, UNSUPPORTED_ACTION_TEXT).await;
        }
    }
}

fn nothing_available_text(subject: &str) -> String {
    format!(
        "Sorry, there is nothing available under <b>{}</b> yet.",
        encode_text(subject)
    )
}

async fn handle_subject(state: &AppState, chat_id: i64, subject: &str) {
    let button = match find_button_by_name(&state.pool, subject) {
        Ok(button) => button,
        Err(e) => {
            tracing::error!("Database error resolving subject '{}': {}", subject, e);
            state
                .bot
                .send_message(chat_id, FILES_FETCH_ERROR_TEXT)
                .await;
            return;
        }
    };

    if let Some(button) = &button {
        if let Some(menu_id) = button.goes_to_menu_id {
            send_submenu_listing(state, chat_id, button, menu_id).await;
            return;
        }
    }

    let materials = match &button {
        Some(button) => match find_materials_by_button_id(&state.pool, button.id) {
            Ok(materials) => materials,
            Err(e) => {
                tracing::error!("Database error fetching files for '{}': {}", subject, e);
                state
                    .bot
                    .send_message(chat_id, FILES_FETCH_ERROR_TEXT)
                    .await;
                return;
            }
        },
        None => Vec::new(),
    };

    if materials.is_empty() {
        tracing::info!("No files under subject '{}'", subject);
        state
            .bot
            .send_message(chat_id, &nothing_available_text(subject))
            .await;
        return;
    }

    let prompt = format!("Files under <b>{}</b>:", encode_text(subject));
    let keyboard = build_file_keyboard(&materials);
    state
        .bot
        .send_message_with_keyboard(chat_id, &prompt, keyboard)
        .await;
}

async fn send_submenu_listing(state: &AppState, chat_id: i64, button: &Button, menu_id: i32) {
    let buttons = match find_buttons_by_menu_id(&state.pool, menu_id) {
        Ok(buttons) => buttons,
        Err(e) => {
            tracing::error!("Database error fetching sub-menu {}: {}", menu_id, e);
            state
                .bot
                .send_message(chat_id, FILES_FETCH_ERROR_TEXT)
                .await;
            return;
        }
    };

    if buttons.is_empty() {
        tracing::info!("Sub-menu {} behind '{}' is empty", menu_id, button.name);
        state
            .bot
            .send_message(chat_id, &nothing_available_text(&button.name))
            .await;
        return;
    }

    let keyboard = build_submenu_keyboard(&buttons);
    state
        .bot
        .send_message_with_keyboard(chat_id, SUBJECTS_PROMPT, keyboard)
        .await;
}

async fn handle_file(state: &AppState, chat_id: i64, user_id: i64, material_id: i32) {
    let material = match find_material_by_id(&state.pool, material_id) {
        Ok(material) => material,
        Err(e) => {
            tracing::error!("Database error fetching material {}: {}", material_id, e);
            state
                .bot
                .send_message(chat_id, FILES_FETCH_ERROR_TEXT)
                .await;
            return;
        }
    };

    match material {
        Some(material) => {
            tracing::info!("Forwarding material {} to user {}", material.id, user_id);
            state
                .bot
                .forward_message(chat_id, material.chat_id, material.message_id as i32)
                .await;
        }
        None => {
            tracing::warn!(
                "User {} requested material {} which does not exist",
                user_id,
                material_id
            );
            state.bot.send_message(chat_id, FILE_NOT_FOUND_TEXT).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_the_first_separator_only() {
        assert_eq!(
            parse_callback_data("subj_Linear_Algebra"),
            CallbackAction::Subject("Linear_Algebra".to_string())
        );
    }

    #[test]
    fn parses_file_ids() {
        assert_eq!(parse_callback_data("file_12"), CallbackAction::File(12));
    }

    #[test]
    fn back_payloads_ignore_their_argument() {
        assert_eq!(parse_callback_data("back_subjects"), CallbackAction::Back);
        assert_eq!(parse_callback_data("back_"), CallbackAction::Back);
    }

    #[test]
    fn rejects_non_numeric_file_ids() {
        assert_eq!(parse_callback_data("file_abc"), CallbackAction::Unknown);
    }

    #[test]
    fn rejects_unknown_prefixes_and_bare_payloads() {
        assert_eq!(parse_callback_data("nope_1"), CallbackAction::Unknown);
        assert_eq!(parse_callback_data("subjless"), CallbackAction::Unknown);
        assert_eq!(parse_callback_data("subj_"), CallbackAction::Unknown);
        assert_eq!(parse_callback_data(""), CallbackAction::Unknown);
    }
}
