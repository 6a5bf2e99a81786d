use std::fmt;

use diesel::deserialize::{self, FromSql, Queryable};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::shared_codec;
use crate::Error;

/// An obfuscated object ID (a wrapped `u64`).
///
/// When serialized with Serde, the number is automatically encoded into its
/// obfuscated string form; deserialization decodes the string back to the
/// integer. The raw integer never appears in JSON output.
///
/// Traits are also provided for Diesel compatibility with Postgres BigInt
/// columns. At the storage boundary the raw integer is what is written and
/// read; obfuscation happens only at the serialization boundary.
///
/// # Examples
///
/// ```
/// use serde::{Serialize, Deserialize};
/// use serde_json;
///
/// #[derive(Serialize, Deserialize, PartialEq, Debug)]
/// struct Post {
///     pub id: hashseq::Id,
/// }
///
/// hashseq::Config::set_salt("my secret salt").unwrap();
/// let post = Post { id: hashseq::Id::from(12345) };
/// let json = serde_json::to_string(&post).unwrap();
/// let back: Post = serde_json::from_str(&json).unwrap();
/// assert_eq!(back, post);
/// ```
#[derive(AsExpression, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[diesel(sql_type = BigInt)]
pub struct Id(u64);

impl Id {
    /// Returns the raw `u64` value, regardless of salt configuration.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Decodes an obfuscated string back into an `Id`.
    ///
    /// Fails if the string is malformed or was produced under a different
    /// salt or alphabet.
    pub fn decode(encoded: &str) -> Result<Id, Error> {
        shared_codec().decode(encoded).map(Id)
    }

    /// Decodes an obfuscated string, panicking on failure.
    ///
    /// For trusted, pre-validated input only; use [`Id::decode`] anywhere
    /// the string comes from the outside.
    ///
    /// # Panics
    ///
    /// Panics if the string does not decode.
    pub fn must_decode(encoded: &str) -> Id {
        match Id::decode(encoded) {
            Ok(id) => id,
            Err(err) => panic!("Decoding {:?} failed: {}", encoded, err),
        }
    }

    // BigInt storage form. Values above i64::MAX wrap to negative and wrap
    // back unchanged on read.
    fn as_bigint(self) -> i64 {
        self.0 as i64
    }

    fn from_bigint(value: i64) -> Id {
        Id(value as u64)
    }
}

impl From<u64> for Id {
    fn from(id: u64) -> Self {
        Id(id)
    }
}

impl From<Id> for u64 {
    /// Returns the raw `u64` value.
    fn from(id: Id) -> Self {
        id.0
    }
}

impl fmt::Display for Id {
    /// Renders the obfuscated string form via the shared codec.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&shared_codec().encode(self.0))
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&shared_codec().encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let id = shared_codec()
            .decode(&encoded)
            .map_err(serde::de::Error::custom)?;
        Ok(Id(id))
    }
}

impl ToSql<BigInt, Pg> for Id {
    fn to_sql(&self, out: &mut Output<'_, '_, Pg>) -> serialize::Result {
        <i64 as ToSql<BigInt, Pg>>::to_sql(&self.as_bigint(), &mut out.reborrow())
    }
}

impl FromSql<BigInt, Pg> for Id {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let id = <i64 as FromSql<BigInt, Pg>>::from_sql(bytes)?;
        Ok(Id::from_bigint(id))
    }
}

impl Queryable<BigInt, Pg> for Id {
    type Row = <i64 as Queryable<BigInt, Pg>>::Row;

    fn build(row: Self::Row) -> deserialize::Result<Self> {
        let id = i64::build(row)?;
        Ok(Id::from_bigint(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::TEST_SALT;
    use crate::Config;

    #[test]
    fn test_value_passthrough() {
        Config::set_salt(TEST_SALT).unwrap();
        let id = Id::from(42);
        assert_eq!(id.value(), 42);
        assert_eq!(u64::from(id), 42);
    }

    #[test]
    fn test_display_roundtrip() {
        Config::set_salt(TEST_SALT).unwrap();
        let id = Id::from(12345);
        let encoded = id.to_string();
        assert!(encoded.len() >= 4);
        assert_eq!(Id::decode(&encoded).unwrap(), id);
    }

    #[test]
    fn test_must_decode() {
        Config::set_salt(TEST_SALT).unwrap();
        let id = Id::from(98765);
        assert_eq!(Id::must_decode(&id.to_string()), id);
    }

    #[test]
    #[should_panic]
    fn test_must_decode_panics_on_garbage() {
        Config::set_salt(TEST_SALT).unwrap();
        Id::must_decode("*** definitely not a hash id ***");
    }

    #[test]
    fn test_json_roundtrip() {
        Config::set_salt(TEST_SALT).unwrap();
        let id = Id::from(12345);
        let json = serde_json::to_string(&id).unwrap();
        // JSON form is a string, never the raw integer.
        assert!(json.starts_with('"') && json.ends_with('"'));
        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_json_rejects_garbage_string() {
        Config::set_salt(TEST_SALT).unwrap();
        assert!(serde_json::from_str::<Id>("\"%%%\"").is_err());
    }

    #[test]
    fn test_bigint_storage_roundtrip() {
        // Storage sees the raw integer; values above i64::MAX store as a
        // negative BigInt and must read back unchanged.
        for num in [0, 1, 12345, i64::MAX as u64, 1 << 63, u64::MAX] {
            let id = Id::from(num);
            let stored = id.as_bigint();
            if num > i64::MAX as u64 {
                assert!(stored < 0, "value: {}", num);
            }
            assert_eq!(Id::from_bigint(stored), id, "value: {}", num);
            assert_eq!(Id::from_bigint(stored).value(), num, "value: {}", num);
        }
    }

    #[test]
    fn test_json_rejects_raw_integer() {
        Config::set_salt(TEST_SALT).unwrap();
        assert!(serde_json::from_str::<Id>("12345").is_err());
    }
}
