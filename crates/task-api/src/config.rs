use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub table_name: String,
    pub endpoint: Option<String>,
    pub credentials: Option<DbCredentials>,
}

#[derive(Debug, Clone)]
pub struct DbCredentials {
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3500);
        let table_name = env::var("TABLE_NAME").unwrap_or_else(|_| "tasks".to_string());
        let endpoint = env::var("DYNAMODB_ENDPOINT").ok();

        let use_db_auth = env::var("USE_DB_AUTH")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let credentials = if use_db_auth {
            match (env::var("DB_USERNAME"), env::var("DB_PASSWORD")) {
                (Ok(username), Ok(password)) => Some(DbCredentials { username, password }),
                _ => {
                    tracing::warn!("USE_DB_AUTH is set but DB_USERNAME/DB_PASSWORD are missing");
                    None
                }
            }
        } else {
            None
        };

        Self {
            port,
            table_name,
            endpoint,
            credentials,
        }
    }
}
