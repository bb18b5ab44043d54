// ============================================================================
// Locale Module
// ============================================================================
//
// URL shape is /{locale}/{rest}: the first path segment selects the locale.
// The supported set and the default come from configuration. Paths whose
// first segment is not a supported code keep the default locale for building
// redirect targets and are rejected later by locale routing.
//
// API calls carry no locale in the path; for those the locale is negotiated
// from the Accept-Language header against the supported set.
// ============================================================================

use crate::config::Config;

/// A locale code known to be in the supported set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The configured locale set. Only source of `Locale` values.
#[derive(Debug, Clone)]
pub struct Locales {
    supported: Vec<String>,
    default: String,
}

/// A request path split into its locale and the page path behind it
#[derive(Debug, PartialEq)]
pub struct ResolvedPath<'a> {
    /// Locale from the first path segment, or the default when none matched
    pub locale: Locale,
    /// Path with the locale prefix stripped ("/" when the path was bare)
    pub page_path: &'a str,
    /// Whether the first segment actually matched a supported locale
    pub from_path: bool,
}

impl Locales {
    pub fn new(supported: Vec<String>, default: String) -> Self {
        Self { supported, default }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.supported_locales.clone(),
            config.default_locale.clone(),
        )
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.iter().any(|c| c == code)
    }

    pub fn default_locale(&self) -> Locale {
        Locale(self.default.clone())
    }

    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    /// Read the locale positionally from `/{locale}/{rest}`.
    pub fn resolve_path<'a>(&self, path: &'a str) -> ResolvedPath<'a> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let (first, rest) = match trimmed.find('/') {
            Some(pos) => (&trimmed[..pos], &trimmed[pos..]),
            None => (trimmed, ""),
        };

        if self.is_supported(first) {
            ResolvedPath {
                locale: Locale(first.to_string()),
                page_path: if rest.is_empty() { "/" } else { rest },
                from_path: true,
            }
        } else {
            ResolvedPath {
                locale: self.default_locale(),
                page_path: path,
                from_path: false,
            }
        }
    }

    /// Pick the best supported locale from an Accept-Language header value.
    ///
    /// Entries are compared by primary subtag ("en-US" matches "en") and
    /// ranked by q-value; absent or unusable headers fall back to the default.
    pub fn negotiate(&self, accept_language: Option<&str>) -> Locale {
        let Some(header) = accept_language else {
            return self.default_locale();
        };

        let mut candidates: Vec<(String, f32)> = Vec::new();
        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let tag = parts.next().unwrap_or("").trim();
            if tag.is_empty() || tag == "*" {
                continue;
            }
            let mut quality = 1.0f32;
            for param in parts {
                if let Some(q) = param.trim().strip_prefix("q=") {
                    quality = q.parse().unwrap_or(0.0);
                }
            }
            if quality <= 0.0 {
                continue;
            }
            let primary = tag.split('-').next().unwrap_or(tag).to_lowercase();
            candidates.push((primary, quality));
        }

        // Stable sort keeps header order for equal q-values
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        for (primary, _) in candidates {
            if self.is_supported(&primary) {
                return Locale(primary);
            }
        }
        self.default_locale()
    }
}
