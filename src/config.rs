use anyhow::Result;

// ============================================================================
// Configuration Constants
// ============================================================================

// Default listen port
const DEFAULT_PORT: u16 = 4000;

// Default locale routing values
const DEFAULT_LOCALE: &str = "en";
const DEFAULT_SUPPORTED_LOCALES: &str = "en,ka";

// Default session cookie values
const DEFAULT_SESSION_COOKIE_NAME: &str = "authToken";
const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

// Default outbound request timeout (in seconds)
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

// Default directory holding the compiled web shell
const DEFAULT_STATIC_DIR: &str = "./static";

// Default salt for hashed identifiers in logs
const DEFAULT_LOG_SALT: &str = "journey-dev-salt";

// Time conversion constants
pub const SECONDS_PER_DAY: i64 = 86400;

// ============================================================================
// Configuration Structures
// ============================================================================

/// Session cookie attributes
#[derive(Clone, Debug)]
pub struct CookieConfig {
    /// Cookie name holding the backend session token
    pub name: String,
    /// Cookie lifetime in days (Max-Age)
    pub ttl_days: i64,
    /// Whether to mark cookies as Secure (HTTPS-only deployments)
    pub secure: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the backend REST API (no trailing slash)
    pub api_base_url: String,
    /// Base URL of the image CDN, exposed to the web shell
    pub image_base_url: String,
    /// Listen port (binds 0.0.0.0)
    pub port: u16,
    /// Default locale code used when a path carries no locale
    pub default_locale: String,
    /// Supported locale codes, in preference order
    pub supported_locales: Vec<String>,
    /// Session cookie attributes
    pub cookie: CookieConfig,
    /// Timeout for outbound backend calls (seconds)
    pub backend_timeout_secs: u64,
    /// Directory holding the compiled web shell
    pub static_dir: String,
    /// Salt for hashed identifiers in logs
    pub log_salt: String,
    /// Log filter passed to the tracing subscriber
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = std::env::var("API_BASE_URL")?;
        if !is_http_url(&api_base_url) {
            anyhow::bail!("API_BASE_URL must be an http(s) URL, got: {}", api_base_url);
        }

        let default_locale = std::env::var("DEFAULT_LOCALE")
            .unwrap_or_else(|_| DEFAULT_LOCALE.to_string())
            .trim()
            .to_lowercase();
        let supported_locales = parse_supported_locales(
            &std::env::var("SUPPORTED_LOCALES")
                .unwrap_or_else(|_| DEFAULT_SUPPORTED_LOCALES.to_string()),
        );
        if !supported_locales.contains(&default_locale) {
            anyhow::bail!(
                "SUPPORTED_LOCALES ({}) must include DEFAULT_LOCALE ({})",
                supported_locales.join(","),
                default_locale
            );
        }

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            image_base_url: std::env::var("IMAGE_BASE_URL")
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            default_locale,
            supported_locales,
            cookie: CookieConfig {
                name: std::env::var("SESSION_COOKIE_NAME")
                    .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE_NAME.to_string()),
                ttl_days: std::env::var("SESSION_TTL_DAYS")
                    .ok()
                    .and_then(|d| d.parse().ok())
                    .unwrap_or(DEFAULT_SESSION_TTL_DAYS),
                secure: std::env::var("SECURE_COOKIES")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .unwrap_or(false),
            },
            backend_timeout_secs: std::env::var("BACKEND_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string()),
            log_salt: std::env::var("LOG_SALT").unwrap_or_else(|_| DEFAULT_LOG_SALT.to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Parse a comma-separated locale list, normalizing case and dropping blanks
fn parse_supported_locales(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|code| code.trim().to_lowercase())
        .filter(|code| !code.is_empty())
        .collect()
}
