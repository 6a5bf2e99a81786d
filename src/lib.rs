//! `hashseq` offers reversible obfuscation of integer IDs as short opaque strings,
//! and an ID type to conveniently manage the process with Serde and Diesel.
//!
//! This library is designed to mask raw database IDs in your API: you keep the
//! performance benefits of monotonically increasing integer keys, while URLs and
//! JSON payloads show only an opaque string that reveals neither the sequence nor
//! the magnitude of the underlying value.
//!
//! The encoding is a hash-id scheme parameterized by a secret salt, an alphabet,
//! and a minimum output length. It is **obfuscation, not encryption**: it deters
//! casual ID enumeration, but anyone who knows or guesses the salt can decode and
//! forge IDs. If you need real secrecy or integrity, use an encrypting scheme
//! instead.
//!
//! Set the salt once during single-threaded startup, before any concurrent `Id`
//! use begins. Changing the salt later invalidates every previously issued
//! string.
//!
//! # Usage
//!
//! ## The `Id` type (recommended)
//!
//! `Id` wraps a `u64` and encodes itself automatically with Serde and Diesel.
//! JSON output carries the obfuscated string; the database stores the raw
//! integer.
//!
//! ```
//! use serde::{Serialize, Deserialize};
//! use serde_json;
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Post {
//!     pub id: hashseq::Id,
//! }
//!
//! hashseq::Config::set_salt("my secret salt").unwrap();
//! let post = Post { id: hashseq::Id::from(12345) };
//! let json = serde_json::to_string(&post).unwrap();
//! let back: Post = serde_json::from_str(&json).unwrap();
//! assert_eq!(back, post);
//! ```
//!
//! ## Low level API
//!
//! `Codec` provides a simple API to encode and decode integers with an
//! explicitly owned configuration, with no global state involved.
//!
//! ```
//! use hashseq::{Codec, Config};
//!
//! let codec = Codec::new(&Config::new().salt("my secret salt")).unwrap();
//! let encoded = codec.encode(12345);
//! assert_eq!(codec.decode(&encoded).unwrap(), 12345);
//! ```

mod codec;
mod config;
mod id;

pub use codec::{Codec, Error};
pub use config::{Config, ConfigError, DEFAULT_ALPHABET, DEFAULT_MIN_LENGTH};
pub use id::Id;
