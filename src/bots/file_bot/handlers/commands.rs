use dersbot::{find_buttons_by_menu_id, find_menu_by_name, MAIN_MENU};
use teloxide::utils::command::BotCommands;

use crate::bots::file_bot::keyboards::build_subject_keyboard;
use crate::http_server::AppState;

pub const WELCOME_TEXT: &str =
    "Welcome! Use the /files command to see the available subjects.";
pub const UNKNOWN_COMMAND_TEXT: &str = "I don't recognize that command. Try /files.";
pub const NO_FILES_TEXT: &str = "Sorry, no files have been organized yet.";
pub const SUBJECTS_PROMPT: &str = "Please select a subject:";
pub const SUBJECTS_FETCH_ERROR_TEXT: &str = "Sorry, there was an error fetching subjects.";

#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "browse the available subjects")]
    Files,
}

pub async fn command_handler(state: &AppState, chat_id: i64, text: &str) {
    match Command::parse(text, state.config.bot_name.as_str()) {
        Ok(Command::Start) => {
            tracing::info!("Start command received in chat {}", chat_id);
            state.bot.send_message(chat_id, WELCOME_TEXT).await;
        }
        Ok(Command::Files) => send_subject_listing(state, chat_id).await,
        Err(_) => {
            // only leading-slash text earns a reply; anything else is ignored
            if text.starts_with('/') {
                tracing::info!("Unknown command in chat {}: {}", chat_id, text);
                state.bot.send_message(chat_id, UNKNOWN_COMMAND_TEXT).await;
            }
        }
    }
}

/// Top-level subject listing. `/files` and the `back_` callback both land
/// here so the two produce identical output.
pub async fn send_subject_listing(state: &AppState, chat_id: i64) {
    let menu = match find_menu_by_name(&state.pool, MAIN_MENU) {
        Ok(menu) => menu,
        Err(e) => {
            tracing::error!("Database error fetching the root menu: {}", e);
            state
                .bot
                .send_message(chat_id, SUBJECTS_FETCH_ERROR_TEXT)
                .await;
            return;
        }
    };

    let buttons = match menu {
        Some(menu) => match find_buttons_by_menu_id(&state.pool, menu.id) {
            Ok(buttons) => buttons,
            Err(e) => {
                tracing::error!("Database error fetching subjects: {}", e);
                state
                    .bot
                    .send_message(chat_id, SUBJECTS_FETCH_ERROR_TEXT)
                    .await;
                return;
            }
        },
        None => Vec::new(),
    };

    if buttons.is_empty() {
        tracing::info!("Chat {} requested subjects, but none exist yet", chat_id);
        state.bot.send_message(chat_id, NO_FILES_TEXT).await;
        return;
    }

    let keyboard = build_subject_keyboard(&buttons);
    state
        .bot
        .send_message_with_keyboard(chat_id, SUBJECTS_PROMPT, keyboard)
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_start_and_files() {
        assert!(matches!(Command::parse("/start", "dersbot"), Ok(Command::Start)));
        assert!(matches!(Command::parse("/files", "dersbot"), Ok(Command::Files)));
    }

    #[test]
    fn recognizes_commands_addressed_to_the_bot() {
        assert!(matches!(
            Command::parse("/files@dersbot", "dersbot"),
            Ok(Command::Files)
        ));
    }

    #[test]
    fn rejects_unknown_commands_and_plain_text() {
        assert!(Command::parse("/frobnicate", "dersbot").is_err());
        assert!(Command::parse("hello there", "dersbot").is_err());
    }
}
