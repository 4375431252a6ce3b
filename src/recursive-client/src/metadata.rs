use minicbor::data::Type;
use minicbor::Decoder;
use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("invalid hex blob: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid CBOR: {0}")]
    Cbor(#[from] minicbor::decode::Error),
}

/// Decodes the hex blob served by `/r/metadata/{id}` into a plain JSON value.
///
/// The body is a contiguous sequence of hex pairs (big-endian per byte);
/// the decoded bytes are one self-describing CBOR item. Anything after the
/// first item is ignored.
pub fn decode_hex_metadata(hex_blob: &str) -> Result<Value, MetadataError> {
    let bytes = hex::decode(hex_blob.trim())?;
    Ok(decode_metadata(&bytes)?)
}

/// Decodes one CBOR item into a `serde_json::Value` without a schema.
///
/// Maps become JSON objects (non-string keys are rendered through their JSON
/// form), byte strings become hex strings, tags are transparent, and both
/// definite and indefinite length containers are accepted.
pub fn decode_metadata(bytes: &[u8]) -> Result<Value, minicbor::decode::Error> {
    let mut decoder = Decoder::new(bytes);
    decode_value(&mut decoder)
}

fn decode_value(d: &mut Decoder<'_>) -> Result<Value, minicbor::decode::Error> {
    match d.datatype()? {
        Type::Bool => Ok(Value::Bool(d.bool()?)),
        Type::Null => {
            d.null()?;
            Ok(Value::Null)
        }
        Type::Undefined => {
            d.undefined()?;
            Ok(Value::Null)
        }
        Type::U8 | Type::U16 | Type::U32 | Type::U64 => Ok(Value::Number(Number::from(d.u64()?))),
        Type::I8 | Type::I16 | Type::I32 | Type::I64 => Ok(Value::Number(Number::from(d.i64()?))),
        Type::Int => Ok(big_int_value(i128::from(d.int()?))),
        Type::F16 => Ok(float_value(f64::from(d.f16()?))),
        Type::F32 => Ok(float_value(f64::from(d.f32()?))),
        Type::F64 => Ok(float_value(d.f64()?)),
        Type::String => Ok(Value::String(d.str()?.to_string())),
        Type::StringIndef => {
            let mut text = String::new();
            for chunk in d.str_iter()? {
                text.push_str(chunk?);
            }
            Ok(Value::String(text))
        }
        Type::Bytes => Ok(Value::String(hex::encode(d.bytes()?))),
        Type::BytesIndef => {
            let mut bytes = Vec::new();
            for chunk in d.bytes_iter()? {
                bytes.extend_from_slice(chunk?);
            }
            Ok(Value::String(hex::encode(bytes)))
        }
        Type::Array | Type::ArrayIndef => decode_array(d),
        Type::Map | Type::MapIndef => decode_map(d),
        Type::Tag => {
            d.tag()?;
            decode_value(d)
        }
        Type::Simple => Ok(Value::Number(Number::from(d.simple()?))),
        Type::Break => Err(minicbor::decode::Error::message("unexpected break")),
        other => Err(minicbor::decode::Error::message(format!(
            "unsupported CBOR type {other:?}"
        ))),
    }
}

fn decode_array(d: &mut Decoder<'_>) -> Result<Value, minicbor::decode::Error> {
    let mut items = Vec::new();
    match d.array()? {
        Some(len) => {
            for _ in 0..len {
                items.push(decode_value(d)?);
            }
        }
        None => {
            while d.datatype()? != Type::Break {
                items.push(decode_value(d)?);
            }
            consume_break(d);
        }
    }
    Ok(Value::Array(items))
}

fn decode_map(d: &mut Decoder<'_>) -> Result<Value, minicbor::decode::Error> {
    let mut object = Map::new();
    match d.map()? {
        Some(len) => {
            for _ in 0..len {
                let (key, value) = decode_entry(d)?;
                object.insert(key, value);
            }
        }
        None => {
            while d.datatype()? != Type::Break {
                let (key, value) = decode_entry(d)?;
                object.insert(key, value);
            }
            consume_break(d);
        }
    }
    Ok(Value::Object(object))
}

fn decode_entry(d: &mut Decoder<'_>) -> Result<(String, Value), minicbor::decode::Error> {
    let key = match decode_value(d)? {
        Value::String(text) => text,
        other => other.to_string(),
    };
    Ok((key, decode_value(d)?))
}

// A break is the single byte 0xff; step over it.
fn consume_break(d: &mut Decoder<'_>) {
    d.set_position(d.position() + 1);
}

fn big_int_value(n: i128) -> Value {
    if let Ok(v) = i64::try_from(n) {
        Value::Number(Number::from(v))
    } else if let Ok(v) = u64::try_from(n) {
        Value::Number(Number::from(v))
    } else {
        // 65-bit values exceed the JSON number range; keep the digits.
        Value::String(n.to_string())
    }
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}
