//! Typed access to field values.
//!
//! [`FromField`] turns a field into a Rust value. Scalars take the first
//! element, `Vec`s take all of them. Integers convert between widths when
//! every element fits.

use super::field::Field;
use super::values::{Rational, SRational, Value};
use crate::error::TiffError;

/// Conversion from a resolved field.
pub trait FromField: Sized {
    fn from_field(field: &Field) -> Result<Self, TiffError>;
}

fn unresolved(field: &Field, expected: &'static str) -> TiffError {
    TiffError::UnresolvedConversion {
        tag: field.tag_id(),
        expected,
        found: format!("{} x {}", field.value().kind(), field.count()),
    }
}

fn integers<T>(field: &Field, expected: &'static str) -> Result<Vec<T>, TiffError>
where
    T: TryFrom<u64> + TryFrom<i64>,
{
    let value = field.value();
    if let Some(values) = value.as_u64_vec() {
        return values
            .into_iter()
            .map(|v| <T as TryFrom<u64>>::try_from(v).map_err(|_| unresolved(field, expected)))
            .collect();
    }
    if let Some(values) = value.as_i64_vec() {
        return values
            .into_iter()
            .map(|v| <T as TryFrom<i64>>::try_from(v).map_err(|_| unresolved(field, expected)))
            .collect();
    }
    Err(unresolved(field, expected))
}

fn first<T>(values: Vec<T>, field: &Field, expected: &'static str) -> Result<T, TiffError> {
    values
        .into_iter()
        .next()
        .ok_or_else(|| unresolved(field, expected))
}

macro_rules! impl_integer {
    ($($t:ty),*) => {$(
        impl FromField for $t {
            fn from_field(field: &Field) -> Result<Self, TiffError> {
                let expected = stringify!($t);
                first(integers::<$t>(field, expected)?, field, expected)
            }
        }

        impl FromField for Vec<$t> {
            fn from_field(field: &Field) -> Result<Self, TiffError> {
                integers::<$t>(field, concat!("Vec<", stringify!($t), ">"))
            }
        }
    )*};
}

impl_integer!(u8, u16, u32, u64, i8, i16, i32, i64);

impl FromField for Vec<f64> {
    fn from_field(field: &Field) -> Result<Self, TiffError> {
        field
            .value()
            .as_f64_vec()
            .ok_or_else(|| unresolved(field, "Vec<f64>"))
    }
}

impl FromField for f64 {
    fn from_field(field: &Field) -> Result<Self, TiffError> {
        first(Vec::<f64>::from_field(field)?, field, "f64")
    }
}

impl FromField for Vec<f32> {
    fn from_field(field: &Field) -> Result<Self, TiffError> {
        match field.value() {
            Value::Float(values) => Ok(values.clone()),
            other => other
                .as_f64_vec()
                .map(|v| v.into_iter().map(|x| x as f32).collect())
                .ok_or_else(|| unresolved(field, "Vec<f32>")),
        }
    }
}

impl FromField for f32 {
    fn from_field(field: &Field) -> Result<Self, TiffError> {
        first(Vec::<f32>::from_field(field)?, field, "f32")
    }
}

impl FromField for String {
    fn from_field(field: &Field) -> Result<Self, TiffError> {
        field
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| unresolved(field, "String"))
    }
}

impl FromField for Vec<Rational> {
    fn from_field(field: &Field) -> Result<Self, TiffError> {
        match field.value() {
            Value::Rational(values) => Ok(values.clone()),
            _ => Err(unresolved(field, "Vec<Rational>")),
        }
    }
}

impl FromField for Rational {
    fn from_field(field: &Field) -> Result<Self, TiffError> {
        first(Vec::<Rational>::from_field(field)?, field, "Rational")
    }
}

impl FromField for Vec<SRational> {
    fn from_field(field: &Field) -> Result<Self, TiffError> {
        match field.value() {
            Value::SRational(values) => Ok(values.clone()),
            _ => Err(unresolved(field, "Vec<SRational>")),
        }
    }
}

impl FromField for SRational {
    fn from_field(field: &Field) -> Result<Self, TiffError> {
        first(Vec::<SRational>::from_field(field)?, field, "SRational")
    }
}

impl FromField for Value {
    fn from_field(field: &Field) -> Result<Self, TiffError> {
        Ok(field.value().clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
