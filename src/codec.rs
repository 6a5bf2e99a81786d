use std::fmt;

use harsh::Harsh;

use crate::{Config, ConfigError};

/// Error returned for decode errors.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Decoding,
    NoValue,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Decoding => {
                write!(f, "Decoding hash-id string failed")
            }
            Error::NoValue => {
                write!(f, "Hash-id string decoded to no value")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Core encoder/decoder.
///
/// Wraps the hash-id scheme: a reversible mapping between non-negative
/// integers and short strings over a configurable alphabet, parameterized by
/// a salt. The mapping is obfuscation, not encryption; see the crate docs.
#[derive(Debug)]
pub struct Codec {
    harsh: Harsh,
}

impl Codec {
    /// Builds a `Codec` from the given configuration.
    ///
    /// Fails if the configuration cannot form a codec, for example when the
    /// alphabet has too few distinct characters. Build the codec during
    /// process startup and treat a failure here as fatal; nothing later in
    /// the codec's life can fail on encode.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashseq::{Codec, Config};
    ///
    /// let codec = Codec::new(&Config::new().salt("my secret salt")).unwrap();
    /// ```
    pub fn new(config: &Config) -> Result<Codec, ConfigError> {
        let harsh = Harsh::builder()
            .salt(config.salt.as_bytes())
            .alphabet(config.alphabet.as_bytes())
            .length(config.min_length)
            .build()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(Codec { harsh })
    }

    /// Encodes a numeric value into its obfuscated string form.
    ///
    /// The output is deterministic for a given (value, salt, alphabet,
    /// minimum length) and is padded to at least the configured minimum
    /// length.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashseq::{Codec, Config};
    ///
    /// let codec = Codec::new(&Config::new().salt("my secret salt")).unwrap();
    /// let encoded = codec.encode(12345);
    /// assert!(encoded.len() >= 4);
    /// assert_eq!(codec.decode(&encoded).unwrap(), 12345);
    /// ```
    pub fn encode(&self, num: u64) -> String {
        self.harsh.encode(&[num])
    }

    /// Decodes a previously encoded string back into its original numeric
    /// value.
    ///
    /// Fails with [`Error::Decoding`] if the string contains characters
    /// outside the alphabet or was produced under a different salt or
    /// alphabet. Note that the hash-id scheme has inherent false-accept edge
    /// cases on arbitrary input; decoding validates format, not authenticity.
    pub fn decode(&self, encoded: &str) -> Result<u64, Error> {
        let values = self.harsh.decode(encoded).map_err(|_| Error::Decoding)?;
        values.first().copied().ok_or(Error::NoValue)
    }
}
