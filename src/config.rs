use std::fmt;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::Codec;

/// Default alphabet used to render obfuscated strings.
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Default padding floor for encoded strings.
pub const DEFAULT_MIN_LENGTH: usize = 4;

struct Shared {
    config: Config,
    codec: Option<Arc<Codec>>,
}

static SHARED: Lazy<Mutex<Shared>> = Lazy::new(|| {
    Mutex::new(Shared {
        config: Config::default(),
        codec: None,
    })
});

/// Configuring the hashseq library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) alphabet: String,
    pub(crate) min_length: usize,
    pub(crate) salt: String,
}

/// Error returned when a codec cannot be built from a configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Invalid(reason) => {
                write!(f, "Invalid codec configuration: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for Config {
    fn default() -> Self {
        Config {
            alphabet: DEFAULT_ALPHABET.to_string(),
            min_length: DEFAULT_MIN_LENGTH,
            salt: String::new(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default settings.
    /// - `alphabet` defaults to the full alphanumeric set.
    /// - `min_length` defaults to 4, so even single-digit IDs produce strings
    ///   that don't look like bare counters.
    /// - `salt` defaults to empty. Anyone using the same alphabet without a
    ///   salt gets the same encoding, so set one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alphabet used to render encoded strings. Must contain enough
    /// distinct characters for the underlying hash-id scheme; validation
    /// happens when the codec is built.
    pub fn alphabet(mut self, alphabet: &str) -> Self {
        self.alphabet = alphabet.to_string();
        self
    }

    /// Sets the minimum length of encoded strings. Shorter encodings are
    /// padded up to this length.
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Sets the secret salt parameterizing the encoding permutation.
    pub fn salt(mut self, salt: &str) -> Self {
        self.salt = salt.to_string();
        self
    }

    /// Replaces the global configuration and rebuilds the shared codec.
    ///
    /// The codec is built eagerly so that a bad configuration surfaces here,
    /// during startup, rather than on some later encode call. Call this once
    /// before any concurrent [`Id`](crate::Id) use begins; changing the
    /// configuration afterwards invalidates every previously issued string.
    pub fn set_global(config: Config) -> Result<(), ConfigError> {
        let codec = Arc::new(Codec::new(&config)?);
        let mut shared = SHARED.lock().unwrap();
        shared.config = config;
        shared.codec = Some(codec);
        Ok(())
    }

    /// Sets the salt on the global configuration, keeping the alphabet and
    /// minimum length as they are.
    ///
    /// Setting the salt to its current value is a no-op. Otherwise the shared
    /// codec is rebuilt eagerly, like [`Config::set_global`].
    pub fn set_salt(salt: &str) -> Result<(), ConfigError> {
        let mut shared = SHARED.lock().unwrap();
        if shared.config.salt == salt {
            return Ok(());
        }
        let config = shared.config.clone().salt(salt);
        let codec = Arc::new(Codec::new(&config)?);
        shared.config = config;
        shared.codec = Some(codec);
        Ok(())
    }
}

/// Returns the shared codec, building it from the current global
/// configuration on first use.
pub(crate) fn shared_codec() -> Arc<Codec> {
    let mut shared = SHARED.lock().unwrap();
    if let Some(codec) = &shared.codec {
        return codec.clone();
    }
    // Every mutation path stores an already-built codec, so this only ever
    // builds the default configuration, which is statically valid.
    let codec =
        Arc::new(Codec::new(&shared.config).expect("Default configuration should be valid"));
    shared.codec = Some(codec.clone());
    codec
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    // All tests touching the global state pin this salt, so parallel test
    // threads agree on the shared codec.
    pub(crate) const TEST_SALT: &str = "hashseq test salt";

    #[test]
    fn test_default_config_builds() {
        assert!(Codec::new(&Config::default()).is_ok());
        assert!(Codec::new(&Config::new().salt("some salt")).is_ok());
    }

    #[test]
    fn test_short_alphabet_rejected() {
        let err = Codec::new(&Config::new().alphabet("abc")).unwrap_err();
        let ConfigError::Invalid(reason) = err;
        assert!(!reason.is_empty());
    }

    #[test]
    fn test_set_salt_is_idempotent() {
        Config::set_salt(TEST_SALT).unwrap();
        let first = shared_codec().encode(42);
        Config::set_salt(TEST_SALT).unwrap();
        let second = shared_codec().encode(42);
        assert_eq!(first, second);
    }

    #[test]
    fn test_shared_codec_roundtrip() {
        Config::set_salt(TEST_SALT).unwrap();
        let codec = shared_codec();
        let encoded = codec.encode(7);
        assert_eq!(codec.decode(&encoded).unwrap(), 7);
    }
}
