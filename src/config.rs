use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_url: String,
    pub poll_secs: u64,
    pub tick_secs: u64,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env(server_override: Option<String>) -> Self {
        dotenv().ok();

        Self {
            server_url: server_override
                .or_else(|| env::var("FICHAJE_SERVER").ok())
                .expect("FICHAJE_SERVER must be set (or pass --server)"),
            poll_secs: env::var("FICHAJE_POLL_SECS")
                .unwrap_or_else(|_| "30".to_string()) // default 30 s
                .parse()
                .unwrap(),
            tick_secs: env::var("FICHAJE_TICK_SECS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap(),
            http_timeout_secs: env::var("FICHAJE_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap(),
        }
    }
}
