//! Backend configuration record and its wire form.

use serde::{Deserialize, Serialize};

use crate::loader::ConfigLoadError;

/// Initialization parameters for the managed backend client.
///
/// Required fields are guaranteed non-empty once a value of this type
/// exists; optional fields are carried through untouched.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    pub api_key: String,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_sender_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl BackendConfig {
    /// Build a config with only the required fields set.
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            auth_domain: None,
            storage_bucket: None,
            messaging_sender_id: None,
            app_id: None,
        }
    }

    /// Api key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let visible: String = self
            .api_key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{}", visible)
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("api_key", &self.masked_api_key())
            .field("project_id", &self.project_id)
            .field("auth_domain", &self.auth_domain)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// Config proxy response body before required fields are checked.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBackendConfig {
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub auth_domain: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
}

impl RawBackendConfig {
    /// Check required fields and produce a [`BackendConfig`].
    pub fn validate(self) -> Result<BackendConfig, ConfigLoadError> {
        let api_key = non_empty(self.api_key)
            .ok_or_else(|| ConfigLoadError::Validation("missing apiKey".to_string()))?;
        let project_id = non_empty(self.project_id)
            .ok_or_else(|| ConfigLoadError::Validation("missing projectId".to_string()))?;

        Ok(BackendConfig {
            api_key,
            project_id,
            auth_domain: self.auth_domain,
            storage_bucket: self.storage_bucket,
            messaging_sender_id: self.messaging_sender_id,
            app_id: self.app_id,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_required_fields() {
        let raw: RawBackendConfig = serde_json::from_str(
            r#"{"apiKey":"AIzaTest1234","projectId":"spa-booking","appId":"1:2:web:3"}"#,
        )
        .unwrap();
        let config = raw.validate().unwrap();
        assert_eq!(config.api_key, "AIzaTest1234");
        assert_eq!(config.project_id, "spa-booking");
        assert_eq!(config.app_id.as_deref(), Some("1:2:web:3"));
        assert_eq!(config.auth_domain, None);
    }

    #[test]
    fn test_validate_rejects_missing_project_id() {
        let raw: RawBackendConfig = serde_json::from_str(r#"{"apiKey":"AIzaTest1234"}"#).unwrap();
        let err = raw.validate().unwrap_err();
        assert_eq!(err, ConfigLoadError::Validation("missing projectId".into()));
    }

    #[test]
    fn test_validate_rejects_empty_api_key() {
        let raw: RawBackendConfig =
            serde_json::from_str(r#"{"apiKey":"","projectId":"spa-booking"}"#).unwrap();
        assert!(matches!(raw.validate(), Err(ConfigLoadError::Validation(_))));
    }

    #[test]
    fn test_serializes_camel_case_without_unset_optionals() {
        let mut config = BackendConfig::new("AIzaTest1234", "spa-booking");
        config.storage_bucket = Some("spa-booking.appspot.com".into());

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "apiKey": "AIzaTest1234",
                "projectId": "spa-booking",
                "storageBucket": "spa-booking.appspot.com"
            })
        );
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = BackendConfig::new("AIzaSecretValue9876", "spa-booking");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("AIzaSecretValue"));
        assert!(debug.contains("****9876"));
    }
}
