//! Serde helpers shared by the model types.

use std::fmt::{Formatter, Result as FmtResult};
use std::result::Result as StdResult;

use serde::de::{Error as DeError, Visitor};

/// Generates an enum that serializes to and deserializes from its integer
/// discriminant, the way Discord tags interaction and response types on the
/// wire. Deserialization errors on values outside the listed set.
macro_rules! enum_number {
    ($(#[$outer:meta])* $name:ident { $($(#[$inner:meta])* $variant:ident = $value:literal,)* }) => {
        $(#[$outer])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub enum $name {
            $($(#[$inner])* $variant = $value,)*
        }

        impl ::serde::ser::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::ser::Serializer,
            {
                serializer.serialize_u64(*self as u64)
            }
        }

        impl<'de> ::serde::de::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::de::Deserializer<'de>,
            {
                struct Visitor;

                impl<'de> ::serde::de::Visitor<'de> for Visitor {
                    type Value = $name;

                    fn expecting(
                        &self,
                        formatter: &mut ::std::fmt::Formatter<'_>,
                    ) -> ::std::fmt::Result {
                        formatter.write_str("positive integer")
                    }

                    fn visit_u64<E>(self, value: u64) -> ::std::result::Result<$name, E>
                    where
                        E: ::serde::de::Error,
                    {
                        match value {
                            $($value => Ok($name::$variant),)*
                            _ => Err(E::custom(::std::format!(
                                concat!("unknown ", stringify!($name), " value: {}"),
                                value,
                            ))),
                        }
                    }
                }

                deserializer.deserialize_u64(Visitor)
            }
        }
    };
}

/// Deserializes a u64 from either of the wire forms Discord uses for
/// snowflakes: a JSON string or a bare integer.
pub struct U64Visitor;

impl<'de> Visitor<'de> for U64Visitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        formatter.write_str("identifier")
    }

    fn visit_str<E: DeError>(self, v: &str) -> StdResult<Self::Value, E> {
        v.parse().map_err(|_| DeError::custom(format!("invalid u64 value: {v}")))
    }

    fn visit_u64<E: DeError>(self, v: u64) -> StdResult<Self::Value, E> {
        Ok(v)
    }
}
