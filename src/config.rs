use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub bot_name: String,
    pub admin_user_id: i64,
    pub webhook_base_url: String,
    pub database_url: String,
    pub port: u16,
}

#[derive(Debug)]
pub struct ConfigError {
    pub missing_vars: Vec<String>,
    pub invalid_vars: Vec<(String, String)>,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.missing_vars.is_empty() {
            writeln!(f, "Missing required environment variables:")?;
            for var in &self.missing_vars {
                writeln!(f, "  - {}", var)?;
            }
        }
        if !self.invalid_vars.is_empty() {
            writeln!(f, "Invalid environment variables:")?;
            for (var, err) in &self.invalid_vars {
                writeln!(f, "  - {}: {}", var, err)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {}

fn get_required(name: &str, missing: &mut Vec<String>) -> Option<String> {
    match env::var(name) {
        Ok(v) if !v.is_empty() => Some(v),
        _ => {
            missing.push(name.to_string());
            None
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let mut invalid = Vec::new();

        let bot_token = get_required("TELOXIDE_TOKEN", &mut missing);
        let webhook_base_url = get_required("WEBHOOK_BASE_URL", &mut missing);
        let database_url = get_required("DATABASE_URL", &mut missing);
        let admin_user_id_str = get_required("TELEGRAM_ADMIN_USER_ID", &mut missing);

        let admin_user_id = admin_user_id_str
            .as_ref()
            .and_then(|s| {
                s.parse::<i64>()
                    .map_err(|e| {
                        invalid.push(("TELEGRAM_ADMIN_USER_ID".into(), e.to_string()));
                    })
                    .ok()
            })
            .unwrap_or(0);

        let bot_name = env::var("BOT_NAME").unwrap_or_else(|_| "dersbot".into());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse::<u16>()
            .map_err(|e| {
                invalid.push(("PORT".into(), e.to_string()));
            })
            .unwrap_or(8080);

        if !missing.is_empty() || !invalid.is_empty() {
            return Err(ConfigError {
                missing_vars: missing,
                invalid_vars: invalid,
            });
        }

        Ok(Self {
            bot_token: bot_token.unwrap(),
            bot_name,
            admin_user_id,
            webhook_base_url: webhook_base_url.unwrap(),
            database_url: database_url.unwrap(),
            port,
        })
    }
}
