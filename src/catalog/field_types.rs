//! The standard field types, ids 1 through 18.
//!
//! Ids 1-13 come from TIFF 6.0 and form the locked "Default" set. LONG8,
//! SLONG8 and IFD8 (16-18) come from the BigTIFF design and form the locked
//! "BigTIFF" set. UNICODE (14) and COMPLEX (15) have no agreed size; they sit
//! in an unlocked "Provisional" set sized from [`RegistryOptions`].

use crate::config::RegistryOptions;
use crate::format::tiff::{Rational, SRational, Value};
use crate::io::ByteOrder;
use crate::registry::{FieldType, FieldTypeSet};

pub const DEFAULT_SET: &str = "Default";
pub const BIGTIFF_SET: &str = "BigTIFF";
pub const PROVISIONAL_SET: &str = "Provisional";

pub const BYTE: u16 = 1;
pub const ASCII: u16 = 2;
pub const SHORT: u16 = 3;
pub const LONG: u16 = 4;
pub const RATIONAL: u16 = 5;
pub const SBYTE: u16 = 6;
pub const UNDEFINED: u16 = 7;
pub const SSHORT: u16 = 8;
pub const SLONG: u16 = 9;
pub const SRATIONAL: u16 = 10;
pub const FLOAT: u16 = 11;
pub const DOUBLE: u16 = 12;
pub const IFD: u16 = 13;
pub const UNICODE: u16 = 14;
pub const COMPLEX: u16 = 15;
pub const LONG8: u16 = 16;
pub const SLONG8: u16 = 17;
pub const IFD8: u16 = 18;

/// Locked set with the TIFF 6.0 types.
pub fn default_set() -> FieldTypeSet {
    let types = vec![
        FieldType::new(BYTE, "BYTE", 1, false, decode_byte, repr_byte),
        FieldType::new(ASCII, "ASCII", 1, false, decode_ascii, repr_ascii),
        FieldType::new(SHORT, "SHORT", 2, false, decode_short, repr_short),
        FieldType::new(LONG, "LONG", 4, false, decode_long, repr_long),
        FieldType::new(RATIONAL, "RATIONAL", 8, false, decode_rational, repr_rational),
        FieldType::new(SBYTE, "SBYTE", 1, true, decode_sbyte, repr_sbyte),
        FieldType::new(UNDEFINED, "UNDEFINED", 1, false, decode_undefined, repr_byte),
        FieldType::new(SSHORT, "SSHORT", 2, true, decode_sshort, repr_sshort),
        FieldType::new(SLONG, "SLONG", 4, true, decode_slong, repr_slong),
        FieldType::new(SRATIONAL, "SRATIONAL", 8, true, decode_srational, repr_srational),
        FieldType::new(FLOAT, "FLOAT", 4, true, decode_float, repr_float),
        FieldType::new(DOUBLE, "DOUBLE", 8, true, decode_double, repr_double),
        FieldType::new(IFD, "IFD", 4, false, decode_ifd, repr_long),
    ];
    FieldTypeSet::preloaded(DEFAULT_SET, 0..=u16::MAX, types, true)
}

/// Locked set with the 64-bit BigTIFF types.
pub fn bigtiff_set() -> FieldTypeSet {
    let types = vec![
        FieldType::new(LONG8, "LONG8", 8, false, decode_long8, repr_long8),
        FieldType::new(SLONG8, "SLONG8", 8, true, decode_slong8, repr_slong8),
        FieldType::new(IFD8, "IFD8", 8, false, decode_ifd8, repr_long8),
    ];
    FieldTypeSet::preloaded(BIGTIFF_SET, 0..=u16::MAX, types, true)
}

/// Unlocked set holding UNICODE and COMPLEX.
///
/// Both decode to raw bytes. A caller that knows better can register a
/// replacement with the same name and size to change the formatter.
pub fn provisional_set(options: &RegistryOptions) -> FieldTypeSet {
    let types = vec![
        FieldType::new(UNICODE, "UNICODE", options.unicode_size, false, decode_raw, repr_hex),
        FieldType::new(COMPLEX, "COMPLEX", options.complex_size, true, decode_raw, repr_hex),
    ];
    FieldTypeSet::preloaded(PROVISIONAL_SET, 0..=u16::MAX, types, false)
}

// =============================================================================
// Decoders
// =============================================================================

fn decode_byte(bytes: &[u8], _: ByteOrder) -> Value {
    Value::Byte(bytes.to_vec())
}

fn decode_undefined(bytes: &[u8], _: ByteOrder) -> Value {
    Value::Undefined(bytes.to_vec())
}

fn decode_raw(bytes: &[u8], _: ByteOrder) -> Value {
    Value::Raw(bytes.to_vec())
}

fn decode_ascii(bytes: &[u8], _: ByteOrder) -> Value {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    Value::Ascii(String::from_utf8_lossy(&bytes[..end]).into_owned())
}

fn decode_sbyte(bytes: &[u8], _: ByteOrder) -> Value {
    Value::SByte(bytes.iter().map(|&b| b as i8).collect())
}

fn decode_short(bytes: &[u8], order: ByteOrder) -> Value {
    Value::Short(bytes.chunks_exact(2).map(|c| order.read_u16(c)).collect())
}

fn decode_sshort(bytes: &[u8], order: ByteOrder) -> Value {
    Value::SShort(
        bytes
            .chunks_exact(2)
            .map(|c| order.read_u16(c) as i16)
            .collect(),
    )
}

fn decode_long(bytes: &[u8], order: ByteOrder) -> Value {
    Value::Long(bytes.chunks_exact(4).map(|c| order.read_u32(c)).collect())
}

fn decode_ifd(bytes: &[u8], order: ByteOrder) -> Value {
    Value::Ifd(bytes.chunks_exact(4).map(|c| order.read_u32(c)).collect())
}

fn decode_slong(bytes: &[u8], order: ByteOrder) -> Value {
    Value::SLong(
        bytes
            .chunks_exact(4)
            .map(|c| order.read_u32(c) as i32)
            .collect(),
    )
}

fn decode_rational(bytes: &[u8], order: ByteOrder) -> Value {
    Value::Rational(
        bytes
            .chunks_exact(8)
            .map(|c| Rational::new(order.read_u32(c), order.read_u32(&c[4..])))
            .collect(),
    )
}

fn decode_srational(bytes: &[u8], order: ByteOrder) -> Value {
    Value::SRational(
        bytes
            .chunks_exact(8)
            .map(|c| {
                SRational::new(order.read_u32(c) as i32, order.read_u32(&c[4..]) as i32)
            })
            .collect(),
    )
}

fn decode_float(bytes: &[u8], order: ByteOrder) -> Value {
    Value::Float(
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_bits(order.read_u32(c)))
            .collect(),
    )
}

fn decode_double(bytes: &[u8], order: ByteOrder) -> Value {
    Value::Double(
        bytes
            .chunks_exact(8)
            .map(|c| f64::from_bits(order.read_u64(c)))
            .collect(),
    )
}

fn decode_long8(bytes: &[u8], order: ByteOrder) -> Value {
    Value::Long8(bytes.chunks_exact(8).map(|c| order.read_u64(c)).collect())
}

fn decode_ifd8(bytes: &[u8], order: ByteOrder) -> Value {
    Value::Ifd8(bytes.chunks_exact(8).map(|c| order.read_u64(c)).collect())
}

fn decode_slong8(bytes: &[u8], order: ByteOrder) -> Value {
    Value::SLong8(
        bytes
            .chunks_exact(8)
            .map(|c| order.read_u64(c) as i64)
            .collect(),
    )
}

// =============================================================================
// Element formatters
// =============================================================================

fn repr_byte(element: &[u8], _: ByteOrder) -> String {
    element.first().map(u8::to_string).unwrap_or_default()
}

fn repr_sbyte(element: &[u8], _: ByteOrder) -> String {
    element
        .first()
        .map(|&b| (b as i8).to_string())
        .unwrap_or_default()
}

fn repr_ascii(element: &[u8], _: ByteOrder) -> String {
    String::from_utf8_lossy(element).into_owned()
}

fn repr_hex(element: &[u8], _: ByteOrder) -> String {
    element.iter().map(|b| format!("{b:02x}")).collect()
}

fn repr_short(element: &[u8], order: ByteOrder) -> String {
    order.read_u16(element).to_string()
}

fn repr_sshort(element: &[u8], order: ByteOrder) -> String {
    (order.read_u16(element) as i16).to_string()
}

fn repr_long(element: &[u8], order: ByteOrder) -> String {
    order.read_u32(element).to_string()
}

fn repr_slong(element: &[u8], order: ByteOrder) -> String {
    (order.read_u32(element) as i32).to_string()
}

// Rationals print their raw terms, a zero denominator included.
fn repr_rational(element: &[u8], order: ByteOrder) -> String {
    let tail = element.get(4..).unwrap_or_default();
    format!("{}/{}", order.read_u32(element), order.read_u32(tail))
}

fn repr_srational(element: &[u8], order: ByteOrder) -> String {
    let tail = element.get(4..).unwrap_or_default();
    format!(
        "{}/{}",
        order.read_u32(element) as i32,
        order.read_u32(tail) as i32
    )
}

fn repr_float(element: &[u8], order: ByteOrder) -> String {
    format!("{:.6}", f32::from_bits(order.read_u32(element)))
}

fn repr_double(element: &[u8], order: ByteOrder) -> String {
    format!("{:.6}", f64::from_bits(order.read_u64(element)))
}

fn repr_long8(element: &[u8], order: ByteOrder) -> String {
    order.read_u64(element).to_string()
}

fn repr_slong8(element: &[u8], order: ByteOrder) -> String {
    (order.read_u64(element) as i64).to_string()
}
