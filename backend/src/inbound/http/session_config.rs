//! Validation of the session cookie settings.
//!
//! Debug builds tolerate missing keys and odd toggles with a warning; release
//! builds refuse to start unless the configuration is safe.

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

use crate::settings::RegistrySettings;

/// Minimum master key length accepted for cookie encryption.
pub const SESSION_KEY_MIN_LEN: usize = 64;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build profile the settings are validated for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Developer builds.
    Debug,
    /// Production builds.
    Release,
}

impl BuildMode {
    /// Mode matching `cfg!(debug_assertions)`.
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie session settings.
pub struct SessionSettings {
    /// Cookie encryption key.
    pub key: Key,
    /// Whether the cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// `SameSite` policy.
    pub same_site: SameSite,
}

/// Reasons the session configuration is rejected.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// The `SameSite` value is not recognised.
    #[error("invalid session SameSite value '{value}'; expected {expected}")]
    InvalidSameSite {
        /// Supplied value.
        value: String,
        /// Accepted spellings.
        expected: &'static str,
    },
    /// The key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        /// Key file location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The key file is shorter than [`SESSION_KEY_MIN_LEN`].
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Key file location.
        path: PathBuf,
        /// Observed length.
        length: usize,
        /// Required length.
        min_len: usize,
    },
    /// `SameSite=None` without `Secure` is rejected by browsers.
    #[error("SameSite=None requires secure session cookies")]
    InsecureSameSiteNone,
}

/// Derive session settings from the loaded configuration.
pub fn session_settings(
    settings: &RegistrySettings,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = settings.session_cookie_secure();
    if !cookie_secure {
        warn!("session cookies are not marked Secure");
    }
    let same_site = parse_same_site(settings.session_same_site.as_deref(), mode, cookie_secure)?;
    let allow_ephemeral = mode.is_debug() || settings.session_allow_ephemeral();
    let key = load_key(&settings.session_key_file(), allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn parse_same_site(
    raw: Option<&str>,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let Some(raw) = raw else {
        return Ok(SameSite::Lax);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("SameSite=None without Secure; browsers may drop the session cookie");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ if mode.is_debug() => {
            warn!(value = raw, "invalid SameSite value; using Lax");
            Ok(SameSite::Lax)
        }
        _ => Err(SessionConfigError::InvalidSameSite {
            value: raw.to_owned(),
            expected: SAMESITE_EXPECTED,
        }),
    }
}

fn ephemeral_key(path: &Path, reason: &str) -> Key {
    warn!(path = %path.display(), reason, "using temporary session key; sessions end on restart");
    Key::generate()
}

fn load_key(path: &Path, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
    let mut bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(_) if allow_ephemeral => return Ok(ephemeral_key(path, "key file unreadable")),
        Err(source) => {
            return Err(SessionConfigError::KeyRead {
                path: path.to_owned(),
                source,
            });
        }
    };
    let length = bytes.len();
    if length < SESSION_KEY_MIN_LEN {
        bytes.zeroize();
        if allow_ephemeral {
            return Ok(ephemeral_key(path, "key file too short"));
        }
        return Err(SessionConfigError::KeyTooShort {
            path: path.to_owned(),
            length,
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write as _;

    fn settings(key_file: Option<PathBuf>, secure: bool, same_site: Option<&str>) -> RegistrySettings {
        RegistrySettings {
            bind_addr: None,
            database_url: None,
            seed_example_data: None,
            session_key_file: key_file,
            session_cookie_secure: Some(secure),
            session_same_site: same_site.map(str::to_owned),
            session_allow_ephemeral: None,
        }
    }

    fn key_file(name: &str, len: usize) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "registry-session-key-{name}-{}",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).expect("create key file");
        file.write_all(&vec![b'k'; len]).expect("write key");
        path
    }

    #[rstest]
    #[case(None, SameSite::Lax)]
    #[case(Some("Strict"), SameSite::Strict)]
    #[case(Some("lax"), SameSite::Lax)]
    #[case(Some("None"), SameSite::None)]
    fn same_site_values_are_parsed(#[case] raw: Option<&str>, #[case] expected: SameSite) {
        let parsed = parse_same_site(raw, BuildMode::Release, true).expect("valid value");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn release_rejects_insecure_same_site_none() {
        let err = parse_same_site(Some("None"), BuildMode::Release, false).expect_err("insecure");
        assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
    }

    #[rstest]
    fn debug_tolerates_unknown_same_site() {
        let parsed = parse_same_site(Some("sideways"), BuildMode::Debug, true).expect("fallback");
        assert_eq!(parsed, SameSite::Lax);
        assert!(parse_same_site(Some("sideways"), BuildMode::Release, true).is_err());
    }

    #[rstest]
    fn release_requires_a_long_enough_key() {
        let path = key_file("short", 16);
        let result = session_settings(&settings(Some(path.clone()), true, None), BuildMode::Release);
        std::fs::remove_file(&path).expect("cleanup");
        assert!(matches!(
            result,
            Err(SessionConfigError::KeyTooShort { length: 16, .. })
        ));
    }

    #[rstest]
    fn release_accepts_a_64_byte_key() {
        let path = key_file("long", SESSION_KEY_MIN_LEN);
        let result = session_settings(&settings(Some(path.clone()), true, Some("Strict")), BuildMode::Release);
        std::fs::remove_file(&path).expect("cleanup");
        let settings = result.expect("valid settings");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }

    #[rstest]
    fn missing_key_is_fatal_in_release_unless_ephemeral_allowed() {
        let missing = std::env::temp_dir().join("registry-session-key-missing");
        let mut config = settings(Some(missing), true, None);
        assert!(matches!(
            session_settings(&config, BuildMode::Release),
            Err(SessionConfigError::KeyRead { .. })
        ));
        config.session_allow_ephemeral = Some(true);
        assert!(session_settings(&config, BuildMode::Release).is_ok());
        config.session_allow_ephemeral = Some(false);
        assert!(session_settings(&config, BuildMode::Debug).is_ok());
    }
}
