use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://52.12.70.97:27017";

const URI_VAR: &str = "MONGODB_URI";
const APP_NAME_VAR: &str = "MONGODB_APP_NAME";
const SERVER_SELECTION_TIMEOUT_VAR: &str = "MONGODB_SERVER_SELECTION_TIMEOUT_MS";

/// Connection settings for the payments database, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub uri: String,
    /// Reported to the server in the connection handshake.
    pub app_name: Option<String>,
    /// Driver default applies when `None`.
    pub server_selection_timeout: Option<Duration>,
}

impl DatabaseSettings {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            app_name: None,
            server_selection_timeout: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Builds settings from any key lookup. A set-but-empty `MONGODB_URI` is
    /// kept as is, the same as any other explicit value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let server_selection_timeout = match lookup(SERVER_SELECTION_TIMEOUT_VAR)? {
            Some(raw) => {
                let millis: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(SERVER_SELECTION_TIMEOUT_VAR.into()))?;
                Some(Duration::from_millis(millis))
            }
            None => None,
        };

        Ok(Self {
            uri: lookup(URI_VAR)?.unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
            app_name: lookup(APP_NAME_VAR)?.filter(|name| !name.trim().is_empty()),
            server_selection_timeout,
        })
    }
}

/// Unset is `None`; set but not valid UTF-8 is an error, never the default.
fn env_var(key: &str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue(key.into())),
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self::new(DEFAULT_MONGODB_URI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(
        pairs: &[(&str, &str)],
    ) -> impl Fn(&str) -> Result<Option<String>, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| Ok(vars.get(key).cloned())
    }

    #[test]
    fn test_uri_defaults_when_unset() {
        let settings = DatabaseSettings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.uri, "mongodb://52.12.70.97:27017");
        assert!(settings.app_name.is_none());
        assert!(settings.server_selection_timeout.is_none());
    }

    #[test]
    fn test_uri_taken_from_environment() {
        let settings = DatabaseSettings::from_lookup(lookup_from(&[(
            "MONGODB_URI",
            "mongodb://db.internal:27018/?replicaSet=rs0",
        )]))
        .unwrap();
        assert_eq!(settings.uri, "mongodb://db.internal:27018/?replicaSet=rs0");
    }

    #[test]
    fn test_empty_uri_is_kept() {
        let settings = DatabaseSettings::from_lookup(lookup_from(&[("MONGODB_URI", "")])).unwrap();
        assert_eq!(settings.uri, "");
    }

    #[test]
    fn test_optional_settings() {
        let settings = DatabaseSettings::from_lookup(lookup_from(&[
            ("MONGODB_APP_NAME", "payment-service"),
            ("MONGODB_SERVER_SELECTION_TIMEOUT_MS", " 2500 "),
        ]))
        .unwrap();
        assert_eq!(settings.app_name.as_deref(), Some("payment-service"));
        assert_eq!(
            settings.server_selection_timeout,
            Some(Duration::from_millis(2500))
        );
    }

    #[test]
    fn test_blank_app_name_ignored() {
        let settings =
            DatabaseSettings::from_lookup(lookup_from(&[("MONGODB_APP_NAME", "  ")])).unwrap();
        assert!(settings.app_name.is_none());
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let err = DatabaseSettings::from_lookup(lookup_from(&[(
            "MONGODB_SERVER_SELECTION_TIMEOUT_MS",
            "soon",
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue(ref key) if key == "MONGODB_SERVER_SELECTION_TIMEOUT_MS"
        ));
    }

    #[test]
    fn test_default_settings() {
        let settings = DatabaseSettings::default();
        assert_eq!(settings.uri, DEFAULT_MONGODB_URI);
        assert_eq!(settings, DatabaseSettings::new(DEFAULT_MONGODB_URI));
    }

    #[test]
    fn test_lookup_error_propagates() {
        let err = DatabaseSettings::from_lookup(|key| {
            if key == "MONGODB_URI" {
                Err(ConfigError::InvalidValue(key.into()))
            } else {
                Ok(None)
            }
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "MONGODB_URI"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_uri_rejected() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        // Only test in this binary that touches MONGODB_URI.
        env::set_var(
            "MONGODB_URI",
            OsString::from_vec(b"mongodb://h\xff:27017".to_vec()),
        );
        let result = DatabaseSettings::from_env();
        env::remove_var("MONGODB_URI");

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "MONGODB_URI"));
    }
}
