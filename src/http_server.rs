use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use dersbot::db::DbPool;
use serde::Deserialize;
use teloxide::types::Update;

use crate::bots::bot_service::BotService;
use crate::bots::file_bot;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
    pub bot: BotService,
}

pub async fn run_http_server(state: AppState) -> std::io::Result<()> {
    let port = state.config.port;

    tracing::info!("Starting HTTP server on port {}", port);

    let data = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(health)
            .service(handle_telegram_webhook)
            .service(handle_webhook_admin)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[get("/health")]
async fn health() -> impl Responder {
    "I'm ok"
}

#[post("/webhook")]
pub async fn handle_telegram_webhook(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> impl Responder {
    if body.is_empty() {
        return HttpResponse::Ok().finish();
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!("Discarding undecodable update: {}", e);
            return HttpResponse::Ok().finish();
        }
    };

    file_bot::handle_update(&state, update).await;

    HttpResponse::Ok().finish()
}

#[derive(Debug, Deserialize)]
pub struct WebhookAdminQuery {
    pub action: Option<String>,
}

/// One-time operational action: `GET /webhook?action=set_webhook` registers
/// the externally reachable callback URL with the Telegram API.
#[get("/webhook")]
pub async fn handle_webhook_admin(
    state: web::Data<AppState>,
    query: web::Query<WebhookAdminQuery>,
) -> impl Responder {
    match query.action.as_deref() {
        Some("set_webhook") => {
            let callback_url = format!("{}/webhook", state.config.webhook_base_url);
            tracing::info!("Attempting to set webhook to: {}", callback_url);

            if state.bot.set_webhook(&callback_url).await {
                HttpResponse::Ok().body("Webhook set successfully!")
            } else {
                HttpResponse::InternalServerError()
                    .body("Failed to set webhook. Check the logs for details.")
            }
        }
        _ => HttpResponse::Ok().finish(),
    }
}

#[cfg(test)]
mod tests {
    use teloxide::types::{Update, UpdateKind};

    #[test]
    fn decodes_message_updates() {
        let payload = r#"{
            "update_id": 1,
            "message": {
                "message_id": 100,
                "date": 1716990000,
                "chat": {"id": 42, "type": "private", "first_name": "Student"},
                "from": {"id": 7, "is_bot": false, "first_name": "Student"},
                "text": "/files"
            }
        }"#;

        let update: Update = serde_json::from_str(payload).expect("payload must decode");
        match update.kind {
            UpdateKind::Message(message) => assert_eq!(message.text(), Some("/files")),
            other => panic!("expected a message update, got {:?}", other),
        }
    }

    #[test]
    fn decodes_callback_updates() {
        let payload = r#"{
            "update_id": 2,
            "callback_query": {
                "id": "4382",
                "from": {"id": 7, "is_bot": false, "first_name": "Student"},
                "chat_instance": "-123",
                "data": "subj_Math",
                "message": {
                    "message_id": 100,
                    "date": 1716990000,
                    "chat": {"id": 42, "type": "private", "first_name": "Student"},
                    "from": {"id": 99, "is_bot": true, "first_name": "dersbot"},
                    "text": "Please select a subject:"
                }
            }
        }"#;

        let update: Update = serde_json::from_str(payload).expect("payload must decode");
        match update.kind {
            UpdateKind::CallbackQuery(query) => {
                assert_eq!(query.data.as_deref(), Some("subj_Math"))
            }
            other => panic!("expected a callback update, got {:?}", other),
        }
    }

    #[test]
    fn rejects_bodies_that_are_not_updates() {
        assert!(serde_json::from_str::<Update>("{}").is_err());
    }
}
