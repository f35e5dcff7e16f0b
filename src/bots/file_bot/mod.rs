use teloxide::types::{Message, Update, UpdateKind};

use crate::http_server::AppState;

mod handlers;
mod keyboards;

use handlers::{callback_handler, command_handler, handle_admin_forward, is_admin_forward};

/// Routes one decoded Telegram update to the matching handler. Each update is
/// processed end-to-end with no state retained between invocations.
pub async fn handle_update(state: &AppState, update: Update) {
    match update.kind {
        UpdateKind::Message(message) => message_handler(state, message).await,
        UpdateKind::CallbackQuery(query) => callback_handler(state, query).await,
        _ => tracing::warn!("Unhandled update type, update_id: {}", update.id),
    }
}

async fn message_handler(state: &AppState, message: Message) {
    let user = match message.from() {
        Some(user) => user,
        None => {
            tracing::warn!("Message without a sender in chat {}", message.chat.id);
            return;
        }
    };

    let user_id = user.id.0 as i64;
    let chat_id = message.chat.id.0;

    tracing::info!(
        "Message from user {} in chat {}: {:?}",
        user_id,
        chat_id,
        message.text()
    );

    if is_admin_forward(&message, state.config.admin_user_id) {
        handle_admin_forward(state, &message).await;
        return;
    }

    let text = match message.text() {
        Some(text) => text,
        None => return,
    };

    command_handler(state, chat_id, text).await;
}
