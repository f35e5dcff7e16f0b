use std::time::Duration;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::{ChatId, Requester};
use teloxide::types::{InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::Bot;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Thin client over the Telegram Bot API. Every operation is a single
/// best-effort request: failures are logged with the failing method name and
/// reported back as `false`, never as an error.
#[derive(Debug, Clone)]
pub struct BotService {
    pub bot: Bot,
}

impl BotService {
    pub fn new(token: &str) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build the telegram http client");

        BotService {
            bot: Bot::with_client(token, client),
        }
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> bool {
        tracing::info!("Sending message to {}: {}", chat_id, text);

        match self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("send_message to chat {} failed: {}", chat_id, e);
                false
            }
        }
    }

    pub async fn send_message_with_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> bool {
        tracing::info!("Sending keyboard message to {}: {}", chat_id, text);

        match self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(
                    "send_message_with_keyboard to chat {} failed: {}",
                    chat_id,
                    e
                );
                false
            }
        }
    }

    pub async fn forward_message(
        &self,
        to_chat_id: i64,
        from_chat_id: i64,
        message_id: i32,
    ) -> bool {
        match self
            .bot
            .forward_message(
                ChatId(to_chat_id),
                ChatId(from_chat_id),
                MessageId(message_id),
            )
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(
                    "forward_message of {} from chat {} to chat {} failed: {}",
                    message_id,
                    from_chat_id,
                    to_chat_id,
                    e
                );
                false
            }
        }
    }

    pub async fn answer_callback_query(&self, callback_query_id: &str) -> bool {
        match self.bot.answer_callback_query(callback_query_id).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("answer_callback_query {} failed: {}", callback_query_id, e);
                false
            }
        }
    }

    pub async fn set_webhook(&self, url: &str) -> bool {
        let url = match Url::parse(url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("set_webhook rejected invalid url {}: {}", url, e);
                return false;
            }
        };

        match self.bot.set_webhook(url).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("set_webhook failed: {}", e);
                false
            }
        }
    }
}
