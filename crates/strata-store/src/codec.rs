//! Entry encoding: a one-byte kind tag followed by the payload.
//!
//! Numeric kinds use little-endian fixed widths, text is raw UTF-8, booleans
//! are a single `0`/`1` byte, and structured objects are the serializer's
//! UTF-8 JSON bytes. The tag makes a mismatched read detectable instead of
//! reinterpreting the payload: decoding checks the stored tag against the
//! requested kind before touching the payload at all.

use crate::error::{StoreError, StoreResult};
use crate::value::{Kind, Value};

/// Encode a value into its persisted entry bytes.
pub(crate) fn encode(value: &Value) -> Vec<u8> {
    let mut buf = vec![value.kind().tag()];
    match value {
        Value::Text(v) => buf.extend_from_slice(v.as_bytes()),
        Value::Int32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Int64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Float32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Float64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Bool(v) => buf.push(u8::from(*v)),
        Value::Structured(v) => buf.extend_from_slice(v),
    }
    buf
}

/// Decode entry bytes, requiring the stored kind to match `requested`.
///
/// # Errors
///
/// [`StoreError::KindMismatch`] when the stored tag differs from the
/// requested kind, [`StoreError::Codec`] for an empty entry, an unknown tag,
/// a wrong-width numeric payload, or invalid UTF-8 text.
pub(crate) fn decode(bytes: &[u8], requested: Kind) -> StoreResult<Value> {
    let Some((&tag, payload)) = bytes.split_first() else {
        return Err(StoreError::Codec("empty entry".to_string()));
    };
    let stored = Kind::from_tag(tag)
        .ok_or_else(|| StoreError::Codec(format!("unknown kind tag {tag}")))?;
    if stored != requested {
        return Err(StoreError::KindMismatch { stored, requested });
    }

    match stored {
        Kind::Text => {
            let text = String::from_utf8(payload.to_vec())
                .map_err(|err| StoreError::Codec(format!("invalid utf-8 text: {err}")))?;
            Ok(Value::Text(text))
        }
        Kind::Int32 => Ok(Value::Int32(i32::from_le_bytes(fixed(payload, stored)?))),
        Kind::Int64 => Ok(Value::Int64(i64::from_le_bytes(fixed(payload, stored)?))),
        Kind::Float32 => Ok(Value::Float32(f32::from_le_bytes(fixed(payload, stored)?))),
        Kind::Float64 => Ok(Value::Float64(f64::from_le_bytes(fixed(payload, stored)?))),
        Kind::Bool => match payload {
            [0] => Ok(Value::Bool(false)),
            [1] => Ok(Value::Bool(true)),
            _ => Err(StoreError::Codec("bool payload must be one 0/1 byte".to_string())),
        },
        Kind::Structured => Ok(Value::Structured(payload.to_vec())),
    }
}

/// Exact-width payload for the fixed-size numeric kinds.
fn fixed<const N: usize>(payload: &[u8], kind: Kind) -> StoreResult<[u8; N]> {
    payload.try_into().map_err(|_| {
        StoreError::Codec(format!("{kind} payload must be {N} bytes, got {}", payload.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_kind() {
        let values = [
            Value::Text("hello".to_string()),
            Value::Int32(-42),
            Value::Int64(9_000_000_000),
            Value::Float32(1.5),
            Value::Float64(-2.25),
            Value::Bool(true),
            Value::Bool(false),
            Value::Structured(br#"{"a":1}"#.to_vec()),
        ];
        for value in values {
            let bytes = encode(&value);
            assert_eq!(decode(&bytes, value.kind()).unwrap(), value);
        }
    }

    #[test]
    fn mismatched_kind_is_a_typed_error() {
        let bytes = encode(&Value::Int64(30));
        let err = decode(&bytes, Kind::Int32).unwrap_err();
        assert!(matches!(
            err,
            StoreError::KindMismatch {
                stored: Kind::Int64,
                requested: Kind::Int32,
            }
        ));
    }

    #[test]
    fn empty_entry_is_rejected() {
        assert!(matches!(decode(&[], Kind::Text), Err(StoreError::Codec(_))));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(matches!(decode(&[99, 1, 2], Kind::Text), Err(StoreError::Codec(_))));
    }

    #[test]
    fn truncated_numeric_payload_is_rejected() {
        let mut bytes = encode(&Value::Int64(7));
        bytes.truncate(5);
        assert!(matches!(decode(&bytes, Kind::Int64), Err(StoreError::Codec(_))));
    }

    #[test]
    fn trailing_garbage_on_numeric_payload_is_rejected() {
        let mut bytes = encode(&Value::Int32(7));
        bytes.push(0);
        assert!(matches!(decode(&bytes, Kind::Int32), Err(StoreError::Codec(_))));
    }

    #[test]
    fn invalid_bool_payload_is_rejected() {
        assert!(matches!(
            decode(&[Kind::Bool.tag(), 2], Kind::Bool),
            Err(StoreError::Codec(_))
        ));
    }

    #[test]
    fn invalid_utf8_text_is_rejected() {
        assert!(matches!(
            decode(&[Kind::Text.tag(), 0xff, 0xfe], Kind::Text),
            Err(StoreError::Codec(_))
        ));
    }

    #[test]
    fn empty_text_and_empty_structured_payloads_decode() {
        assert_eq!(
            decode(&[Kind::Text.tag()], Kind::Text).unwrap(),
            Value::Text(String::new())
        );
        assert_eq!(
            decode(&[Kind::Structured.tag()], Kind::Structured).unwrap(),
            Value::Structured(Vec::new())
        );
    }
}
