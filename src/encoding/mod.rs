//! # KODA binary encoder and decoder
//!
//! The binary surface is a framed byte stream: a four-byte magic, a version
//! byte, a dictionary of every object key sorted ascending by raw bytes,
//! then the root value as a tagged tree whose object entries reference keys
//! by dictionary index. The encoder is two-pass: keys are collected and
//! sorted globally before anything is emitted, so the output is canonical
//! and two values that differ only in object insertion order encode to
//! identical bytes.
//!
//! # Example
//!
//! ```
//! use koda::prelude::*;
//!
//! let value = parse(b"z: 1 a: [null, true]").unwrap();
//! let frame = encode(&value).unwrap();
//!
//! // The frame opens with the magic and version.
//! assert_eq!(&frame[..5], b"KODA\x01");
//!
//! // Decoding returns the value with object keys in dictionary order.
//! assert_eq!(decode(&frame).unwrap(), value.normalise());
//! ```

use std::collections::BTreeSet;

use bytes::{Buf, BufMut, Bytes};
use hashbrown::HashMap;

use crate::errors::Error;
use crate::limits::Limits;
use crate::vecmap::VecMap;
use crate::Value;

mod constants;
pub(crate) use constants::*;

/// Encodes a value into its canonical binary frame with the standard limits.
pub fn encode(value: &Value) -> Result<Vec<u8>, Error> {
    encode_with_limits(value, &Limits::standard())
}

/// Encodes a value into its canonical binary frame.
///
/// Fails with [`Error::Depth`] when the value nests deeper than
/// `limits.max_depth`, and with [`Error::Size`] when a string, key, or
/// element count cannot be framed in 32 bits.
pub fn encode_with_limits(value: &Value, limits: &Limits) -> Result<Vec<u8>, Error> {
    let mut keys = BTreeSet::new();
    collect_keys(value, &mut keys);
    let dictionary: Vec<Bytes> = keys.into_iter().collect();
    let index: HashMap<Bytes, u32> = dictionary
        .iter()
        .enumerate()
        .map(|(i, k)| (k.clone(), i as u32))
        .collect();

    let mut encoder = Encoder {
        out: Vec::new(),
        max_depth: limits.max_depth,
        index,
    };
    encoder.out.put_slice(&MAGIC);
    encoder.out.put_u8(VERSION);
    encoder.put_len(dictionary.len(), "dictionary")?;
    for key in &dictionary {
        encoder.put_len(key.len(), "key")?;
        encoder.out.put_slice(key);
    }
    encoder.encode_value(value, 0)?;
    Ok(encoder.out)
}

/// Collects every object key, at any depth, in ascending byte order.
fn collect_keys(value: &Value, keys: &mut BTreeSet<Bytes>) {
    match value {
        Value::Array(elements) => {
            for element in elements {
                collect_keys(element, keys);
            }
        }
        Value::Object(entries) => {
            for (key, child) in entries.iter() {
                keys.insert(key.clone());
                collect_keys(child, keys);
            }
        }
        _ => {}
    }
}

struct Encoder {
    out: Vec<u8>,
    max_depth: usize,
    index: HashMap<Bytes, u32>,
}

impl Encoder {
    /// Writes a 32-bit big-endian length or count.
    fn put_len(&mut self, len: usize, what: &'static str) -> Result<(), Error> {
        let len = u32::try_from(len).map_err(|_| Error::Size {
            what,
            actual: len,
            limit: u32::MAX as usize,
        })?;
        self.out.put_u32(len);
        Ok(())
    }

    fn encode_value(&mut self, value: &Value, depth: usize) -> Result<(), Error> {
        if depth > self.max_depth {
            return Err(Error::Depth {
                limit: self.max_depth,
            });
        }
        match value {
            Value::Null => self.out.put_u8(TAG_NULL),
            Value::Bool(true) => self.out.put_u8(TAG_TRUE),
            Value::Bool(false) => self.out.put_u8(TAG_FALSE),
            Value::Int(i) => {
                self.out.put_u8(TAG_INT);
                self.out.put_i64(*i);
            }
            Value::Float(f) => {
                self.out.put_u8(TAG_FLOAT);
                self.out.put_f64(*f);
            }
            Value::Str(s) => {
                self.out.put_u8(TAG_STR);
                self.put_len(s.len(), "string")?;
                self.out.put_slice(s);
            }
            Value::Array(elements) => {
                self.out.put_u8(TAG_ARRAY);
                self.put_len(elements.len(), "array")?;
                for element in elements {
                    self.encode_value(element, depth + 1)?;
                }
            }
            Value::Object(entries) => {
                self.out.put_u8(TAG_OBJECT);
                self.put_len(entries.len(), "object")?;
                // Entries are emitted sorted by key, not in insertion order.
                let mut sorted: Vec<&(Bytes, Value)> = entries.iter().collect();
                sorted.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
                for (key, child) in sorted {
                    let idx = self.index.get(key).copied().ok_or_else(|| {
                        Error::Format("object key missing from dictionary".into())
                    })?;
                    self.out.put_u32(idx);
                    self.encode_value(child, depth + 1)?;
                }
            }
        }
        Ok(())
    }
}

/// Decodes a binary frame with the standard limits.
pub fn decode(data: &[u8]) -> Result<Value, Error> {
    decode_with_limits(data, &Limits::standard())
}

/// Decodes a binary frame.
///
/// The whole buffer must be one frame: trailing bytes after the root value
/// fail with [`Error::Format`]. Dictionary size, string and key lengths,
/// and nesting depth are bounded by `limits`; declared sizes are checked
/// against both their bound and the bytes actually present before any large
/// allocation happens.
pub fn decode_with_limits(data: &[u8], limits: &Limits) -> Result<Value, Error> {
    let mut decoder = Decoder {
        buf: data,
        max_depth: limits.max_depth,
        max_str_len: limits.max_str_len,
        dictionary: Vec::new(),
    };

    decoder.ensure(5)?;
    if decoder.buf[..4] != MAGIC {
        return Err(Error::Format("invalid magic number".into()));
    }
    decoder.buf.advance(4);
    let version = decoder.buf.get_u8();
    if version != VERSION {
        return Err(Error::Format(format!("unsupported version {version}")));
    }

    let dict_len = decoder.read_u32()? as usize;
    if dict_len > limits.max_dict {
        return Err(Error::Size {
            what: "dictionary",
            actual: dict_len,
            limit: limits.max_dict,
        });
    }
    // Every entry takes at least a four-byte length, so the remaining buffer
    // bounds any honest entry count.
    decoder
        .dictionary
        .reserve(dict_len.min(decoder.buf.remaining() / 4));
    for _ in 0..dict_len {
        let len = decoder.read_len_bounded("key")?;
        let key = decoder.read_bytes(len)?;
        decoder.dictionary.push(key);
    }

    let value = decoder.decode_value(0)?;
    if decoder.buf.has_remaining() {
        return Err(Error::Format(format!(
            "{} trailing bytes after root value",
            decoder.buf.remaining()
        )));
    }
    Ok(value)
}

struct Decoder<'a> {
    buf: &'a [u8],
    max_depth: usize,
    max_str_len: usize,
    dictionary: Vec<Bytes>,
}

impl<'a> Decoder<'a> {
    fn ensure(&self, n: usize) -> Result<(), Error> {
        if self.buf.remaining() < n {
            return Err(Error::Format(format!(
                "truncated input: needed {} bytes, {} left",
                n,
                self.buf.remaining()
            )));
        }
        Ok(())
    }

    fn read_u8(&mut self) -> Result<u8, Error> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        self.ensure(4)?;
        Ok(self.buf.get_u32())
    }

    fn read_i64(&mut self) -> Result<i64, Error> {
        self.ensure(8)?;
        Ok(self.buf.get_i64())
    }

    fn read_f64(&mut self) -> Result<f64, Error> {
        self.ensure(8)?;
        Ok(self.buf.get_f64())
    }

    fn read_bytes(&mut self, len: usize) -> Result<Bytes, Error> {
        self.ensure(len)?;
        let out = Bytes::copy_from_slice(&self.buf[..len]);
        self.buf.advance(len);
        Ok(out)
    }

    /// Reads a string or key length, bounded by `max_str_len`.
    fn read_len_bounded(&mut self, what: &'static str) -> Result<usize, Error> {
        let len = self.read_u32()? as usize;
        if len > self.max_str_len {
            return Err(Error::Size {
                what,
                actual: len,
                limit: self.max_str_len,
            });
        }
        Ok(len)
    }

    fn decode_value(&mut self, depth: usize) -> Result<Value, Error> {
        if depth > self.max_depth {
            return Err(Error::Depth {
                limit: self.max_depth,
            });
        }
        match self.read_u8()? {
            TAG_NULL => Ok(Value::Null),
            TAG_FALSE => Ok(Value::Bool(false)),
            TAG_TRUE => Ok(Value::Bool(true)),
            TAG_INT => Ok(Value::Int(self.read_i64()?)),
            TAG_FLOAT => Ok(Value::Float(self.read_f64()?)),
            TAG_STR => {
                let len = self.read_len_bounded("string")?;
                Ok(Value::Str(self.read_bytes(len)?))
            }
            TAG_BINARY => Err(Error::Format("binary values are not supported".into())),
            TAG_ARRAY => {
                let count = self.read_u32()? as usize;
                // Every element takes at least one byte, so the remaining
                // buffer bounds any honest count.
                let mut elements = Vec::with_capacity(count.min(self.buf.remaining()));
                for _ in 0..count {
                    elements.push(self.decode_value(depth + 1)?);
                }
                Ok(Value::Array(elements))
            }
            TAG_OBJECT => {
                let count = self.read_u32()? as usize;
                let mut entries = VecMap::with_capacity(count.min(self.buf.remaining()));
                // Key uniqueness is the encoder's contract; it is not
                // re-checked here.
                for _ in 0..count {
                    let idx = self.read_u32()? as usize;
                    let key = self.dictionary.get(idx).cloned().ok_or_else(|| {
                        Error::Format(format!(
                            "key index {idx} outside dictionary of {} entries",
                            self.dictionary.len()
                        ))
                    })?;
                    entries.push(key, self.decode_value(depth + 1)?);
                }
                Ok(Value::Object(entries))
            }
            tag => Err(Error::Format(format!("unknown value tag {tag:#04x}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_frames() {
        let out = encode(&Value::Null).unwrap();
        assert_eq!(out, [0x4B, 0x4F, 0x44, 0x41, 0x01, 0, 0, 0, 0, TAG_NULL]);

        let out = encode(&Value::Bool(true)).unwrap();
        assert_eq!(out[9], TAG_TRUE);
        let out = encode(&Value::Bool(false)).unwrap();
        assert_eq!(out[9], TAG_FALSE);
    }

    #[test]
    fn int_payload_is_big_endian_twos_complement() {
        let out = encode(&Value::Int(1)).unwrap();
        assert_eq!(out[9], TAG_INT);
        assert_eq!(out[10..], [0, 0, 0, 0, 0, 0, 0, 1]);

        let out = encode(&Value::Int(-1)).unwrap();
        assert_eq!(out[10..], [0xFF; 8]);
    }

    #[test]
    fn float_payload_is_the_bit_pattern() {
        let out = encode(&Value::Float(3.5)).unwrap();
        assert_eq!(out[9], TAG_FLOAT);
        assert_eq!(out[10..], [0x40, 0x0C, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn string_frames_are_length_prefixed() {
        let out = encode(&Value::from("w")).unwrap();
        assert_eq!(out[9], TAG_STR);
        assert_eq!(out[10..14], [0, 0, 0, 1]);
        assert_eq!(out[14], b'w');
    }

    #[test]
    fn empty_dictionary_for_key_free_values() {
        let out = encode(&Value::from(vec![Value::Null])).unwrap();
        // magic + version, zero dictionary entries, then the array.
        assert_eq!(out[5..9], [0, 0, 0, 0]);
        assert_eq!(out[9], TAG_ARRAY);
    }

    #[test]
    fn object_entries_reference_the_sorted_dictionary() {
        let value = crate::text::parse(b"b: 1 a: 2").unwrap();
        let out = encode(&value).unwrap();
        // dictionary: ["a", "b"]
        assert_eq!(out[5..9], [0, 0, 0, 2]);
        assert_eq!(out[9..14], [0, 0, 0, 1, b'a']);
        assert_eq!(out[14..19], [0, 0, 0, 1, b'b']);
        // object body: count 2, then index 0 ("a") before index 1 ("b").
        assert_eq!(out[19], TAG_OBJECT);
        assert_eq!(out[20..24], [0, 0, 0, 2]);
        assert_eq!(out[24..28], [0, 0, 0, 0]);
        let b_entry = 28 + 9;
        assert_eq!(out[b_entry..b_entry + 4], [0, 0, 0, 1]);
    }

    #[test]
    fn decode_round_trips_scalars() {
        for value in [
            Value::Null,
            Value::Bool(true),
            Value::Bool(false),
            Value::Int(i64::MIN),
            Value::Float(-2.5),
            Value::from("hello"),
        ] {
            let out = encode(&value).unwrap();
            assert_eq!(decode(&out).unwrap(), value);
        }
    }

    #[test]
    fn float_bit_patterns_survive() {
        let nan = f64::from_bits(0x7FF8_0000_0000_1234);
        let out = encode(&Value::Float(nan)).unwrap();
        match decode(&out).unwrap() {
            Value::Float(f) => assert_eq!(f.to_bits(), nan.to_bits()),
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut out = encode(&Value::Null).unwrap();
        out.push(0);
        let err = decode(&out).unwrap_err();
        assert!(matches!(err, Error::Format(msg) if msg.contains("trailing")));
    }

    #[test]
    fn decoder_trusts_duplicate_keys() {
        // dictionary ["a"], object with two entries both referencing it.
        let mut frame = Vec::new();
        frame.put_slice(&MAGIC);
        frame.put_u8(VERSION);
        frame.put_u32(1);
        frame.put_u32(1);
        frame.put_u8(b'a');
        frame.put_u8(TAG_OBJECT);
        frame.put_u32(2);
        frame.put_u32(0);
        frame.put_u8(TAG_NULL);
        frame.put_u32(0);
        frame.put_u8(TAG_TRUE);
        let value = decode(&frame).unwrap();
        assert_eq!(value.to_vecmap().unwrap().len(), 2);
    }
}
