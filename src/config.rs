use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    /// Base URL stored avatar keys are appended to.
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub cors_origin: String,
    pub invite_codes: Vec<String>,
    pub cookie_secure: bool,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;

        let endpoint =
            std::env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".into());
        let bucket = std::env::var("MINIO_BUCKET").unwrap_or_else(|_| "ironprojects".into());
        let storage = StorageConfig {
            public_url: std::env::var("STORAGE_PUBLIC_URL")
                .unwrap_or_else(|_| format!("{}/{}", endpoint.trim_end_matches('/'), bucket)),
            access_key: std::env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".into()),
            secret_key: std::env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".into()),
            endpoint,
            bucket,
        };

        Ok(Self {
            database_url,
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            cors_origin: std::env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            invite_codes: parse_invite_codes(
                &std::env::var("VALID_INVITE_CODES").unwrap_or_default(),
            ),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| v == "true")
                .unwrap_or(false),
            storage,
        })
    }

    pub fn accepts_invite(&self, code: Option<&str>) -> bool {
        match code {
            Some(code) => self.invite_codes.iter().any(|c| c == code),
            None => false,
        }
    }
}

fn parse_invite_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_codes_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_invite_codes(" VALID1, VALID2 ,,"),
            vec!["VALID1".to_string(), "VALID2".to_string()]
        );
        assert!(parse_invite_codes("").is_empty());
    }

    #[test]
    fn empty_allow_list_accepts_nothing() {
        let mut config = crate::state::AppState::fake().config.as_ref().clone();
        config.invite_codes.clear();
        assert!(!config.accepts_invite(Some("")));
        assert!(!config.accepts_invite(None));
    }

    #[test]
    fn invite_match_is_exact() {
        let config = crate::state::AppState::fake().config;
        assert!(config.accepts_invite(Some("VALID1")));
        assert!(!config.accepts_invite(Some("valid1")));
        assert!(!config.accepts_invite(Some("VALID1 ")));
    }
}
