use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub max_upload_bytes: usize,
    pub practice_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            practice_name: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
            Ok(raw) => raw
                .parse::<usize>()
                .map_err(|e| anyhow::anyhow!("MAX_UPLOAD_BYTES must be a byte count: {e}"))?,
            Err(_) => defaults.max_upload_bytes,
        };
        // optional seed for the practice name field
        let practice_name = env::var("PRACTICE_NAME")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Self {
            bind_addr,
            max_upload_bytes,
            practice_name,
        })
    }
}
