//! Numeric values that remember their original width.

use std::fmt;

/// A boxed number, tagged with the Rust primitive it came from.
///
/// Keeping the width lets comparisons between an `i32` and an `f64` be
/// observed in messages while still comparing equal by value.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Number {
    /// Widen to `f64`. Large 64-bit integers lose precision, as any
    /// double conversion would.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::I8(v) => f64::from(v),
            Self::I16(v) => f64::from(v),
            Self::I32(v) => f64::from(v),
            Self::I64(v) => v as f64,
            Self::U8(v) => f64::from(v),
            Self::U16(v) => f64::from(v),
            Self::U32(v) => f64::from(v),
            Self::U64(v) => v as f64,
            Self::F32(v) => f64::from(v),
            Self::F64(v) => v,
        }
    }

    /// True for the language default of every numeric type (`0`, `0.0`, `-0.0`).
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32(_) | Self::F64(_))
    }

    /// Name of the primitive this number was created from.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
        }
    }
}

/// Representation-level equality of two doubles.
///
/// All NaN payloads collapse to one canonical NaN, so `NaN` equals `NaN`.
/// Signed zeros keep their sign bit and therefore differ.
#[must_use]
pub fn same_double(left: f64, right: f64) -> bool {
    canonical_bits(left) == canonical_bits(right)
}

fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v:?}"),
            Self::F64(v) => write!(f, "{v:?}"),
        }
    }
}

macro_rules! number_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

number_from!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Self::U64(value as u64)
    }
}

impl From<isize> for Number {
    fn from(value: isize) -> Self {
        Self::I64(value as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_same_as_nan() {
        assert!(same_double(f64::NAN, f64::NAN));
        assert!(same_double(f64::NAN, -f64::NAN));
        assert!(!same_double(f64::NAN, 0.0));
    }

    #[test]
    fn test_infinities() {
        assert!(same_double(f64::INFINITY, f64::INFINITY));
        assert!(same_double(f64::NEG_INFINITY, f64::NEG_INFINITY));
        assert!(!same_double(f64::INFINITY, f64::NEG_INFINITY));
    }

    #[test]
    fn test_signed_zero_differs() {
        assert!(!same_double(0.0, -0.0));
        assert!(Number::F64(-0.0).is_zero());
    }

    #[test]
    fn test_mixed_width_widening() {
        assert!(same_double(Number::I32(1).as_f64(), Number::F64(1.0).as_f64()));
        assert!(same_double(Number::U8(200).as_f64(), Number::I64(200).as_f64()));
    }

    #[test]
    fn test_display_keeps_float_marker() {
        assert_eq!(Number::I32(5).to_string(), "5");
        assert_eq!(Number::F64(1.0).to_string(), "1.0");
        assert_eq!(Number::F32(2.5).to_string(), "2.5");
    }
}
