use std::env;

/// What a handler does when its primary path (live provider call) fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Log the failure and serve the static mock payload with status 200.
    MockOnError,
    /// Map the failure to its HTTP status and surface it to the caller.
    FailClosed,
}

impl FallbackPolicy {
    fn parse(value: &str) -> Self {
        match value {
            "fail-closed" => FallbackPolicy::FailClosed,
            _ => FallbackPolicy::MockOnError,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Firecrawl
    pub firecrawl_api_key: String,
    pub firecrawl_api_url: String,
    pub firecrawl_concurrency_limit: usize,
    pub firecrawl_batch_delay_ms: u64,

    // OpenAI
    pub openai_api_key: String,
    pub openai_model: String,

    // Web server
    pub api_host: String,
    pub api_port: u16,
    pub fallback_policy: FallbackPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            firecrawl_api_key: required_env("FIRECRAWL_API_KEY"),
            openai_api_key: required_env("OPENAI_API_KEY"),
            ..Self::server_from_env()
        }
    }

    /// Load a config for the API server. Provider keys are optional here:
    /// without them the server runs in mock-only mode.
    pub fn server_from_env() -> Self {
        Self {
            firecrawl_api_key: env::var("FIRECRAWL_API_KEY").unwrap_or_default(),
            firecrawl_api_url: env::var("FIRECRAWL_API_URL")
                .unwrap_or_else(|_| "https://api.firecrawl.dev/v1".to_string()),
            firecrawl_concurrency_limit: env::var("FIRECRAWL_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            firecrawl_batch_delay_ms: env::var("FIRECRAWL_BATCH_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("API_PORT must be a number"),
            fallback_policy: env::var("FALLBACK_POLICY")
                .map(|v| FallbackPolicy::parse(&v))
                .unwrap_or(FallbackPolicy::MockOnError),
        }
    }

    pub fn has_firecrawl(&self) -> bool {
        !self.firecrawl_api_key.is_empty()
    }

    pub fn has_openai(&self) -> bool {
        !self.openai_api_key.is_empty()
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_policy_parses_known_values() {
        assert_eq!(FallbackPolicy::parse("fail-closed"), FallbackPolicy::FailClosed);
        assert_eq!(FallbackPolicy::parse("mock-on-error"), FallbackPolicy::MockOnError);
        // Unknown values degrade to the permissive default.
        assert_eq!(FallbackPolicy::parse("whatever"), FallbackPolicy::MockOnError);
    }
}
