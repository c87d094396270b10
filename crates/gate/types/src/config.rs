use std::fmt;

use serde::{Deserialize, Serialize};

/// Key under which the existing Legend site stores the visitor email.
pub const DEFAULT_EMAIL_KEY: &str = "legend-user-email";

/// Companion key for the display name.
pub const DEFAULT_NAME_KEY: &str = "legend-user-name";

/// Route the landing page sends visitors to when they ask to sign in.
pub const DEFAULT_SIGN_IN_ROUTE: &str = "/signin";

/// Which fields the capture form asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Email only; a name is kept if given but never required.
    #[default]
    EmailOnly,
    /// Sign-in page: both name and email are required.
    NameAndEmail,
}

impl CaptureMode {
    pub fn requires_name(self) -> bool {
        matches!(self, CaptureMode::NameAndEmail)
    }
}

/// An in-app path, e.g. `/map`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn sign_in() -> Self {
        Self::new(DEFAULT_SIGN_IN_ROUTE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Route {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Storage keys for the persisted identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub email: String,
    pub name: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            email: DEFAULT_EMAIL_KEY.to_string(),
            name: DEFAULT_NAME_KEY.to_string(),
        }
    }
}

/// Configuration for the Session Gate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Fields the capture form requires (default: email only)
    pub capture: CaptureMode,
    /// Where to send an authenticated visitor, if anywhere (default: stay put)
    pub next_route: Option<Route>,
    /// Keys used in durable local storage
    pub storage_keys: StorageKeys,
}

impl GateConfig {
    /// The email-only gate wrapped around the map view.
    pub fn email_gate() -> Self {
        Self::default()
    }

    /// The name+email sign-in page that forwards to `next_route`.
    pub fn sign_in_page(next_route: impl Into<Route>) -> Self {
        Self {
            capture: CaptureMode::NameAndEmail,
            next_route: Some(next_route.into()),
            storage_keys: StorageKeys::default(),
        }
    }

    pub fn with_capture(mut self, capture: CaptureMode) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_next_route(mut self, route: impl Into<Route>) -> Self {
        self.next_route = Some(route.into());
        self
    }

    pub fn with_storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = keys;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_the_email_gate() {
        let config = GateConfig::default();
        assert_eq!(config, GateConfig::email_gate());
        assert_eq!(config.capture, CaptureMode::EmailOnly);
        assert!(config.next_route.is_none());
        assert_eq!(config.storage_keys.email, "legend-user-email");
    }

    #[test]
    fn sign_in_page_requires_name_and_redirects() {
        let config = GateConfig::sign_in_page("/map");
        assert!(config.capture.requires_name());
        assert_eq!(config.next_route, Some(Route::new("/map")));
    }

    #[test]
    fn config_parses_from_partial_toml() {
        let config: GateConfig = toml::from_str(
            r#"
            capture = "name_and_email"
            next_route = "/map"

            [storage_keys]
            name = "visitor-name"
            "#,
        )
        .unwrap();

        assert_eq!(config.capture, CaptureMode::NameAndEmail);
        assert_eq!(config.next_route.as_ref().map(Route::as_str), Some("/map"));
        assert_eq!(config.storage_keys.email, DEFAULT_EMAIL_KEY);
        assert_eq!(config.storage_keys.name, "visitor-name");
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config: GateConfig = toml::from_str("").unwrap();
        assert_eq!(config, GateConfig::default());
    }
}
