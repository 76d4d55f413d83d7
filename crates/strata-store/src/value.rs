//! Typed values and their kinds.
//!
//! [`Value`] is the closed set of shapes the facade persists: six primitive
//! kinds with a native entry encoding, plus [`Value::Structured`] for
//! arbitrary objects serialized through the generic serializer. The variant
//! is chosen by the caller (directly or via the `From` conversions), so the
//! encode dispatch is exhaustive and checked at compile time — a 64-bit
//! value can never be narrowed to 32 bits by a magnitude heuristic.

use std::fmt;

use serde::Serialize;

use crate::error::StoreResult;

/// The kind tag persisted with every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// UTF-8 text.
    Text,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Single-precision float.
    Float32,
    /// Double-precision float.
    Float64,
    /// Boolean.
    Bool,
    /// Serialized structured object.
    Structured,
}

impl Kind {
    /// Tag byte written ahead of the payload.
    pub(crate) const fn tag(self) -> u8 {
        match self {
            Self::Text => 1,
            Self::Int32 => 2,
            Self::Int64 => 3,
            Self::Float32 => 4,
            Self::Float64 => 5,
            Self::Bool => 6,
            Self::Structured => 7,
        }
    }

    /// Inverse of [`Kind::tag`]. Unknown bytes decode to `None`.
    pub(crate) const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Text),
            2 => Some(Self::Int32),
            3 => Some(Self::Int64),
            4 => Some(Self::Float32),
            5 => Some(Self::Float64),
            6 => Some(Self::Bool),
            7 => Some(Self::Structured),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Structured => "structured",
        };
        f.write_str(name)
    }
}

/// A value accepted by the storage facade.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text.
    Text(String),
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// Single-precision float.
    Float32(f32),
    /// Double-precision float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// Structured object, already serialized to UTF-8 JSON bytes.
    Structured(Vec<u8>),
}

impl Value {
    /// The kind this value encodes as.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Text(_) => Kind::Text,
            Self::Int32(_) => Kind::Int32,
            Self::Int64(_) => Kind::Int64,
            Self::Float32(_) => Kind::Float32,
            Self::Float64(_) => Kind::Float64,
            Self::Bool(_) => Kind::Bool,
            Self::Structured(_) => Kind::Structured,
        }
    }

    /// Serialize an arbitrary object into the structured variant.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`](crate::StoreError::Serialization)
    /// if the object cannot be serialized.
    pub fn structured<T: Serialize>(object: &T) -> StoreResult<Self> {
        Ok(Self::Structured(serde_json::to_vec(object)?))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for bool {}
}

/// A natively encoded primitive kind.
///
/// Implemented for exactly `String`, `i32`, `i64`, `f32`, `f64` and `bool`;
/// the trait is sealed. It ties each Rust type to its [`Kind`] so typed
/// reads request the matching decode path statically.
pub trait Primitive: sealed::Sealed + Sized {
    /// The kind this primitive encodes as.
    const KIND: Kind;

    /// Wrap into the corresponding [`Value`] variant.
    fn into_value(self) -> Value;

    /// Unwrap from the corresponding [`Value`] variant.
    fn from_value(value: Value) -> Option<Self>;
}

impl Primitive for String {
    const KIND: Kind = Kind::Text;

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl Primitive for i32 {
    const KIND: Kind = Kind::Int32;

    fn into_value(self) -> Value {
        Value::Int32(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int32(v) => Some(v),
            _ => None,
        }
    }
}

impl Primitive for i64 {
    const KIND: Kind = Kind::Int64;

    fn into_value(self) -> Value {
        Value::Int64(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int64(v) => Some(v),
            _ => None,
        }
    }
}

impl Primitive for f32 {
    const KIND: Kind = Kind::Float32;

    fn into_value(self) -> Value {
        Value::Float32(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float32(v) => Some(v),
            _ => None,
        }
    }
}

impl Primitive for f64 {
    const KIND: Kind = Kind::Float64;

    fn into_value(self) -> Value {
        Value::Float64(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(v),
            _ => None,
        }
    }
}

impl Primitive for bool {
    const KIND: Kind = Kind::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for kind in [
            Kind::Text,
            Kind::Int32,
            Kind::Int64,
            Kind::Float32,
            Kind::Float64,
            Kind::Bool,
            Kind::Structured,
        ] {
            assert_eq!(Kind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(Kind::from_tag(0), None);
        assert_eq!(Kind::from_tag(200), None);
    }

    #[test]
    fn conversions_pick_the_declared_width() {
        assert_eq!(Value::from(1_i32).kind(), Kind::Int32);
        assert_eq!(Value::from(1_i64).kind(), Kind::Int64);
        assert_eq!(Value::from(1.0_f32).kind(), Kind::Float32);
        assert_eq!(Value::from(1.0_f64).kind(), Kind::Float64);
        assert_eq!(Value::from("x").kind(), Kind::Text);
        assert_eq!(Value::from(true).kind(), Kind::Bool);
    }

    #[test]
    fn structured_serializes_via_json() {
        let value = Value::structured(&["x", "y"]).unwrap();
        assert_eq!(value, Value::Structured(br#"["x","y"]"#.to_vec()));
    }

    #[test]
    fn primitive_unwrap_rejects_other_variants() {
        assert_eq!(i32::from_value(Value::Int64(1)), None);
        assert_eq!(i64::from_value(Value::Int32(1)), None);
        assert_eq!(String::from_value(Value::Bool(true)), None);
    }
}
