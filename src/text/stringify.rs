//! Compact textual rendering of values.
//!
//! This is a diagnostic facility, not a full inverse of the parser: string
//! bodies escape only `"` and `\`, control bytes are emitted literally, and
//! object keys are written raw and unquoted. Round-trip parity holds only
//! for values whose strings contain no control bytes and whose keys are
//! valid identifiers.

use crate::Value;

/// Renders a value in the compact text form.
///
/// The output is a byte string because string payloads are raw bytes.
///
/// # Example
///
/// ```
/// use koda::text::{parse, stringify};
///
/// let doc = parse(b"name: 'ada' tags: [1, 2]").unwrap();
/// assert_eq!(stringify(&doc), b"{name:\"ada\" tags:[1 2]}");
/// ```
pub fn stringify(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Int(i) => out.extend_from_slice(i.to_string().as_bytes()),
        Value::Float(f) => write_float(*f, out),
        Value::Str(s) => write_quoted(s, out),
        Value::Array(elements) => {
            out.push(b'[');
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }
                write_value(element, out);
            }
            out.push(b']');
        }
        Value::Object(entries) => {
            out.push(b'{');
            for (i, (key, child)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }
                out.extend_from_slice(key);
                out.push(b':');
                write_value(child, out);
            }
            out.push(b'}');
        }
    }
}

/// Shortest round-trip rendering, nudged so that a float never reads back as
/// an integer.
fn write_float(f: f64, out: &mut Vec<u8>) {
    let mut s = f.to_string();
    if f.is_finite() && !s.contains('.') && !s.contains('e') && !s.contains('E') {
        s.push_str(".0");
    }
    out.extend_from_slice(s.as_bytes());
}

fn write_quoted(s: &[u8], out: &mut Vec<u8>) {
    out.push(b'"');
    for &c in s {
        if c == b'"' || c == b'\\' {
            out.push(b'\\');
        }
        out.push(c);
    }
    out.push(b'"');
}
