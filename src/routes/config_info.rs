// ============================================================================
// Shell Configuration Route
// ============================================================================
//
// GET /api/config - Public; the web shell reads the image CDN base and the
// locale set from here at boot instead of baking them into the bundle.
//
// ============================================================================

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::context::AppContext;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellConfig {
    pub image_base_url: String,
    pub default_locale: String,
    pub supported_locales: Vec<String>,
}

/// GET /api/config
pub async fn shell_config(State(ctx): State<Arc<AppContext>>) -> impl IntoResponse {
    Json(ShellConfig {
        image_base_url: ctx.config.image_base_url.clone(),
        default_locale: ctx.config.default_locale.clone(),
        supported_locales: ctx.config.supported_locales.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_config_serializes_camel_case() {
        let config = ShellConfig {
            image_base_url: "https://img.journey.example".to_string(),
            default_locale: "en".to_string(),
            supported_locales: vec!["en".to_string(), "ka".to_string()],
        };

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["imageBaseUrl"], "https://img.journey.example");
        assert_eq!(value["defaultLocale"], "en");
        assert_eq!(value["supportedLocales"][1], "ka");
    }
}
