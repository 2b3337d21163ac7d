pub mod auth;

pub use auth::SupabaseAuth;

use reqwest::RequestBuilder;
use url::Url;

/// Project URL and keys shared by the auth and REST clients.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: Url,
    pub anon_key: String,
    /// Server-side key for table access. Falls back to the anon key.
    pub service_key: Option<String>,
}

impl SupabaseConfig {
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(url)?,
            anon_key: anon_key.into(),
            service_key: None,
        })
    }

    pub fn with_service_key(mut self, key: Option<String>) -> Self {
        self.service_key = key.filter(|k| !k.is_empty());
        self
    }

    /// `<project>/<path>` without doubling the slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url.as_str().trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub fn table_key(&self) -> &str {
        self.service_key.as_deref().unwrap_or(&self.anon_key)
    }

    pub fn with_key(&self, request: RequestBuilder, bearer: &str) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_cleanly() {
        let config = SupabaseConfig::new("https://abc.supabase.co/", "anon").unwrap();
        assert_eq!(config.endpoint("/rest/v1/recipes"), "https://abc.supabase.co/rest/v1/recipes");
        assert_eq!(config.table_key(), "anon");

        let config = config.with_service_key(Some("service".to_string()));
        assert_eq!(config.table_key(), "service");
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(SupabaseConfig::new("not a url", "anon").is_err());
    }
}
