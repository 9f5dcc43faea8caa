use serde::{Deserialize, Serialize};

use crate::types::errors::ValueError;

/// Decoded value of one signal.
///
/// The codec only ever produces one of these shapes: an unscaled signal
/// (`scale == 1`, `offset == 0`) keeps its raw integer, signed or unsigned
/// per the database entry; anything scaled becomes a float. `Bool` is a
/// caller-side view of a 0/1 integer (e.g. status bits) obtained through
/// [`SignalValue::as_bool`].
///
/// Conversions are explicit and fallible: ask for the type you need and
/// handle [`ValueError::TypeMismatch`] when the stored variant cannot
/// provide it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SignalValue {
    Bool(bool),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl SignalValue {
    /// Name of the stored variant, used in error reporting.
    pub fn type_name(&self) -> &'static str {
        match self {
            SignalValue::Bool(_) => "bool",
            SignalValue::Signed(_) => "signed",
            SignalValue::Unsigned(_) => "unsigned",
            SignalValue::Float(_) => "float",
        }
    }

    /// Reads the value as a boolean.
    ///
    /// Integer variants convert as `!= 0`; a float never converts.
    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match *self {
            SignalValue::Bool(b) => Ok(b),
            SignalValue::Signed(v) => Ok(v != 0),
            SignalValue::Unsigned(v) => Ok(v != 0),
            SignalValue::Float(_) => Err(self.mismatch("bool")),
        }
    }

    /// Reads the value as a signed integer.
    ///
    /// Unsigned values convert when they fit in `i64`; floats and
    /// booleans never convert.
    pub fn as_i64(&self) -> Result<i64, ValueError> {
        match *self {
            SignalValue::Signed(v) => Ok(v),
            SignalValue::Unsigned(v) => {
                i64::try_from(v).map_err(|_| self.mismatch("signed"))
            }
            _ => Err(self.mismatch("signed")),
        }
    }

    /// Reads the value as an unsigned integer.
    ///
    /// Signed values convert when non-negative.
    pub fn as_u64(&self) -> Result<u64, ValueError> {
        match *self {
            SignalValue::Unsigned(v) => Ok(v),
            SignalValue::Signed(v) => {
                u64::try_from(v).map_err(|_| self.mismatch("unsigned"))
            }
            _ => Err(self.mismatch("unsigned")),
        }
    }

    /// Reads the value as a float. Integer variants widen; booleans never
    /// convert.
    pub fn as_f64(&self) -> Result<f64, ValueError> {
        match *self {
            SignalValue::Float(v) => Ok(v),
            SignalValue::Signed(v) => Ok(v as f64),
            SignalValue::Unsigned(v) => Ok(v as f64),
            SignalValue::Bool(_) => Err(self.mismatch("float")),
        }
    }

    fn mismatch(&self, requested: &'static str) -> ValueError {
        ValueError::TypeMismatch {
            stored: self.type_name(),
            requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_accessors() {
        let v = SignalValue::Unsigned(42);
        assert_eq!(v.as_u64(), Ok(42));
        assert_eq!(v.as_i64(), Ok(42));
        assert_eq!(v.as_f64(), Ok(42.0));
        assert_eq!(v.as_bool(), Ok(true));

        let v = SignalValue::Signed(-5);
        assert_eq!(v.as_i64(), Ok(-5));
        assert!(v.as_u64().is_err());
    }

    #[test]
    fn test_float_never_converts_to_bool() {
        let v = SignalValue::Float(0.5);
        assert_eq!(
            v.as_bool(),
            Err(ValueError::TypeMismatch {
                stored: "float",
                requested: "bool",
            })
        );
        assert!(v.as_i64().is_err());
        assert_eq!(v.as_f64(), Ok(0.5));
    }

    #[test]
    fn test_unsigned_above_i64_range() {
        let v = SignalValue::Unsigned(u64::MAX);
        assert!(v.as_i64().is_err());
        assert_eq!(v.as_u64(), Ok(u64::MAX));
    }
}
