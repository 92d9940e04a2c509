//! Process configuration loaded with OrthoConfig.
//!
//! Values layer from defaults, an optional configuration file, `REGISTRY_*`
//! environment variables, and command-line flags, in increasing precedence.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Runtime settings for the registry server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct RegistrySettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; the in-process store is used when unset.
    pub database_url: Option<String>,
    /// Seed demonstration users, hospitals, departments, and patients.
    pub seed_example_data: Option<bool>,
    /// File holding the session cookie master key.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`.
    pub session_cookie_secure: Option<bool>,
    /// `SameSite` policy: `Strict`, `Lax`, or `None`.
    pub session_same_site: Option<String>,
    /// Permit a generated session key when no usable key file exists.
    pub session_allow_ephemeral: Option<bool>,
}

impl RegistrySettings {
    /// Listen address, falling back to all interfaces on port 8080.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Session key path, falling back to the mounted secret location.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether example data is seeded on startup; off unless requested.
    pub fn seed_example_data(&self) -> bool {
        self.seed_example_data.unwrap_or(false)
    }

    /// Whether session cookies carry `Secure`; on unless disabled.
    pub fn session_cookie_secure(&self) -> bool {
        self.session_cookie_secure.unwrap_or(true)
    }

    /// Whether a generated session key is acceptable; off unless requested.
    pub fn session_allow_ephemeral(&self) -> bool {
        self.session_allow_ephemeral.unwrap_or(false)
    }

    /// Database URL with surrounding whitespace removed; blank counts as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Layering of defaults and environment overrides.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "REGISTRY_BIND_ADDR",
        "REGISTRY_DATABASE_URL",
        "REGISTRY_SEED_EXAMPLE_DATA",
        "REGISTRY_SESSION_KEY_FILE",
        "REGISTRY_SESSION_COOKIE_SECURE",
        "REGISTRY_SESSION_SAME_SITE",
        "REGISTRY_SESSION_ALLOW_EPHEMERAL",
    ];

    fn load() -> RegistrySettings {
        RegistrySettings::load_from_iter([OsString::from("registry-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.database_url(), None);
        assert!(!settings.seed_example_data());
        assert!(settings.session_cookie_secure());
        assert!(!settings.session_allow_ephemeral());
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
    }

    #[rstest]
    fn single_flag_override_keeps_other_defaults() {
        let mut vars = VARS.map(|name| (name, None::<String>));
        vars[4].1 = Some("false".to_owned());
        let _guard = lock_env(vars);

        let settings = load();
        assert!(!settings.session_cookie_secure());
        assert!(!settings.seed_example_data());
        assert!(!settings.session_allow_ephemeral());
    }

    #[rstest]
    fn environment_overrides_defaults() {
        let _guard = lock_env([
            ("REGISTRY_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "REGISTRY_DATABASE_URL",
                Some("postgres://registry@localhost/registry".to_owned()),
            ),
            ("REGISTRY_SEED_EXAMPLE_DATA", Some("true".to_owned())),
            ("REGISTRY_SESSION_KEY_FILE", Some("/tmp/key".to_owned())),
            ("REGISTRY_SESSION_COOKIE_SECURE", Some("false".to_owned())),
            ("REGISTRY_SESSION_SAME_SITE", Some("Strict".to_owned())),
            ("REGISTRY_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
        ]);

        let settings = load();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9000");
        assert_eq!(
            settings.database_url(),
            Some("postgres://registry@localhost/registry")
        );
        assert!(settings.seed_example_data());
        assert!(!settings.session_cookie_secure());
        assert_eq!(settings.session_same_site.as_deref(), Some("Strict"));
        assert!(settings.session_allow_ephemeral());
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/key"));
    }

    #[rstest]
    fn blank_database_url_counts_as_unset() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "REGISTRY_DATABASE_URL").then(|| "  ".to_owned());
            (name, value)
        }));
        assert_eq!(load().database_url(), None);
    }
}
