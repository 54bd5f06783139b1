pub use crate::{
    encoding::{decode, decode_with_limits, encode, encode_with_limits},
    errors::Error,
    limits::Limits,
    text::{parse, parse_with_limits, stringify},
    vecmap::VecMap,
    Bytes, Value,
};
