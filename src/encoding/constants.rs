/// Frame magic, ASCII `KODA`.
pub(crate) const MAGIC: [u8; 4] = [0x4B, 0x4F, 0x44, 0x41];
/// The only frame version this codec reads or writes.
pub(crate) const VERSION: u8 = 0x01;

/// `Null` tag.
pub(crate) const TAG_NULL: u8 = 0x01;
/// `Bool(false)` tag.
pub(crate) const TAG_FALSE: u8 = 0x02;
/// `Bool(true)` tag.
pub(crate) const TAG_TRUE: u8 = 0x03;
/// `Int` tag; payload is eight bytes, big-endian two's complement.
pub(crate) const TAG_INT: u8 = 0x04;
/// `Float` tag; payload is the big-endian binary64 bit pattern.
pub(crate) const TAG_FLOAT: u8 = 0x05;
/// `Str` tag; payload is a 32-bit big-endian length, then raw bytes.
pub(crate) const TAG_STR: u8 = 0x06;
/// Reserved for a binary-blob variant this codec does not produce. The
/// decoder rejects it with a distinct unsupported-type error so future
/// format evolution is detectable.
pub(crate) const TAG_BINARY: u8 = 0x07;
/// `Array` tag; payload is a 32-bit big-endian count, then the elements.
pub(crate) const TAG_ARRAY: u8 = 0x10;
/// `Object` tag; payload is a 32-bit big-endian count, then per entry a
/// 32-bit big-endian dictionary index and the value.
pub(crate) const TAG_OBJECT: u8 = 0x11;
