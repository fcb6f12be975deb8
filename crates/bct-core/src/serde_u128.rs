//! Serde adapter for u128 amounts.
//!
//! Neither JSON nor TOML carries 128-bit integers natively, so amounts are
//! written as decimal strings. Reading accepts a string or a plain integer,
//! which keeps hand-written config files short (`initial_reserve = 0`).
//!
//! Use with `#[serde(with = "bct_core::serde_u128")]`.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

pub fn serialize<S: Serializer>(val: &u128, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&val.to_string())
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u128, D::Error> {
    struct U128Visitor;

    impl<'de> Visitor<'de> for U128Visitor {
        type Value = u128;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a u128 as a string or integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
            v.trim().parse().map_err(E::custom)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
            Ok(v as u128)
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<u128, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
            if v >= 0 {
                Ok(v as u128)
            } else {
                Err(E::custom("negative value for u128"))
            }
        }
    }

    d.deserialize_any(U128Visitor)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Amount {
        #[serde(with = "super")]
        value: u128,
    }

    #[test]
    fn test_writes_decimal_string() {
        let json = serde_json::to_string(&Amount { value: u128::MAX }).unwrap();
        assert_eq!(json, format!("{{\"value\":\"{}\"}}", u128::MAX));
    }

    #[test]
    fn test_reads_string_or_integer() {
        let a: Amount = serde_json::from_str(r#"{"value":"1000000000000000000"}"#).unwrap();
        assert_eq!(a.value, 1_000_000_000_000_000_000);

        let b: Amount = serde_json::from_str(r#"{"value":42}"#).unwrap();
        assert_eq!(b.value, 42);
    }

    #[test]
    fn test_rejects_negative() {
        assert!(serde_json::from_str::<Amount>(r#"{"value":-1}"#).is_err());
        assert!(serde_json::from_str::<Amount>(r#"{"value":"-1"}"#).is_err());
    }
}
