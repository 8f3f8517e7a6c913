//! Decoded field values.
//!
//! Every field type decodes its whole payload into one [`Value`] variant. The
//! variant keeps all elements, so a field with a count of 3 SHORTs becomes
//! `Value::Short(vec![a, b, c])`.

use std::fmt;

// =============================================================================
// Rational
// =============================================================================

/// Unsigned fraction made of two LONGs.
///
/// A zero denominator is stored as `0/1` so the value stays usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return Self {
                numerator: 0,
                denominator: 1,
            };
        }
        Self {
            numerator,
            denominator,
        }
    }

    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// The fraction in lowest terms.
    pub fn reduced(self) -> Self {
        let g = gcd(self.numerator as u64, self.denominator as u64).max(1);
        Self {
            numerator: (self.numerator as u64 / g) as u32,
            denominator: (self.denominator as u64 / g) as u32,
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Signed fraction made of two SLONGs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SRational {
    pub fn new(numerator: i32, denominator: i32) -> Self {
        if denominator == 0 {
            return Self {
                numerator: 0,
                denominator: 1,
            };
        }
        Self {
            numerator,
            denominator,
        }
    }

    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// The fraction in lowest terms, with the sign carried by the numerator.
    pub fn reduced(self) -> Self {
        let n = self.numerator as i64;
        let d = self.denominator as i64;
        let g = gcd(n.unsigned_abs(), d.unsigned_abs()).max(1) as i64;
        let sign = if d < 0 { -1 } else { 1 };
        Self {
            numerator: (sign * n / g) as i32,
            denominator: (sign * d / g) as i32,
        }
    }
}

impl fmt::Display for SRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

// =============================================================================
// Value
// =============================================================================

/// A field's payload decoded into native values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(Vec<u8>),
    /// Text up to the first NUL.
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<Rational>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<SRational>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Ifd(Vec<u32>),
    Long8(Vec<u64>),
    SLong8(Vec<i64>),
    Ifd8(Vec<u64>),
    /// Bytes of a type without a native decoding.
    Raw(Vec<u8>),
}

impl Value {
    /// Short name of the variant, used in conversion errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Byte(_) => "BYTE",
            Value::Ascii(_) => "ASCII",
            Value::Short(_) => "SHORT",
            Value::Long(_) => "LONG",
            Value::Rational(_) => "RATIONAL",
            Value::SByte(_) => "SBYTE",
            Value::Undefined(_) => "UNDEFINED",
            Value::SShort(_) => "SSHORT",
            Value::SLong(_) => "SLONG",
            Value::SRational(_) => "SRATIONAL",
            Value::Float(_) => "FLOAT",
            Value::Double(_) => "DOUBLE",
            Value::Ifd(_) => "IFD",
            Value::Long8(_) => "LONG8",
            Value::SLong8(_) => "SLONG8",
            Value::Ifd8(_) => "IFD8",
            Value::Raw(_) => "raw bytes",
        }
    }

    /// Number of decoded elements (characters for ASCII).
    pub fn len(&self) -> usize {
        match self {
            Value::Byte(v) | Value::Undefined(v) | Value::Raw(v) => v.len(),
            Value::Ascii(s) => s.len(),
            Value::Short(v) => v.len(),
            Value::Long(v) | Value::Ifd(v) => v.len(),
            Value::Rational(v) => v.len(),
            Value::SByte(v) => v.len(),
            Value::SShort(v) => v.len(),
            Value::SLong(v) => v.len(),
            Value::SRational(v) => v.len(),
            Value::Float(v) => v.len(),
            Value::Double(v) => v.len(),
            Value::Long8(v) | Value::Ifd8(v) => v.len(),
            Value::SLong8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All elements as unsigned integers.
    ///
    /// Only unsigned integer kinds convert; BYTE and UNDEFINED count as
    /// integers here.
    pub fn as_u64_vec(&self) -> Option<Vec<u64>> {
        let out = match self {
            Value::Byte(v) | Value::Undefined(v) => v.iter().map(|&x| x as u64).collect(),
            Value::Short(v) => v.iter().map(|&x| x as u64).collect(),
            Value::Long(v) | Value::Ifd(v) => v.iter().map(|&x| x as u64).collect(),
            Value::Long8(v) | Value::Ifd8(v) => v.clone(),
            _ => return None,
        };
        Some(out)
    }

    /// All elements as signed integers.
    ///
    /// Unsigned kinds are included when every element fits.
    pub fn as_i64_vec(&self) -> Option<Vec<i64>> {
        let out = match self {
            Value::SByte(v) => v.iter().map(|&x| x as i64).collect(),
            Value::SShort(v) => v.iter().map(|&x| x as i64).collect(),
            Value::SLong(v) => v.iter().map(|&x| x as i64).collect(),
            Value::SLong8(v) => v.clone(),
            _ => {
                return self
                    .as_u64_vec()?
                    .into_iter()
                    .map(|x| i64::try_from(x).ok())
                    .collect()
            }
        };
        Some(out)
    }

    /// All elements as floating point numbers, rationals included.
    pub fn as_f64_vec(&self) -> Option<Vec<f64>> {
        let out = match self {
            Value::Float(v) => v.iter().map(|&x| x as f64).collect(),
            Value::Double(v) => v.clone(),
            Value::Rational(v) => v.iter().map(|r| r.to_f64()).collect(),
            Value::SRational(v) => v.iter().map(|r| r.to_f64()).collect(),
            _ => self.as_i64_vec()?.into_iter().map(|x| x as f64).collect(),
        };
        Some(out)
    }

    /// First element as an unsigned integer.
    pub fn first_u64(&self) -> Option<u64> {
        self.as_u64_vec()?.first().copied()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Ascii(s) => Some(s),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
