use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub realtime_url: String,
    pub token: Option<String>,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let api_base_url = env::var("STOREFRONT_API_URL")?;
        let realtime_url = env::var("STOREFRONT_REALTIME_URL")
            .unwrap_or_else(|_| derive_ws_url(&api_base_url));
        let token = env::var("STOREFRONT_API_TOKEN").ok();
        let request_timeout = env::var("STOREFRONT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));
        Ok(Self {
            api_base_url,
            realtime_url,
            token,
            request_timeout,
        })
    }
}

fn derive_ws_url(api_base_url: &str) -> String {
    let trimmed = api_base_url.trim_end_matches('/');
    let ws = trimmed
        .replacen("https://", "wss://", 1)
        .replacen("http://", "ws://", 1);
    format!("{ws}/ws")
}
