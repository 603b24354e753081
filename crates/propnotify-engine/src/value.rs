//! Property values and the per-kind equality policy.
//!
//! The synthesized write path compares values before writing: a write that
//! does not change the value (per the policy below) is a no-op and
//! publishes nothing. The policy is:
//!
//! - exact equality for integral, boolean, and string kinds (enumerated
//!   values travel as `Int` discriminants, reference identities as `Uint`
//!   handles);
//! - tolerance-based equality for floating kinds, to absorb rounding noise
//!   from repeated accumulation: [`F64_TOLERANCE`] for doubles,
//!   [`F32_TOLERANCE`] for singles.
//!
//! # Invariants
//!
//! 1. `policy_eq` on values of different kinds is always `false`.
//! 2. For non-floating kinds, `policy_eq` coincides with `==`.
//! 3. For floating kinds, values closer than the tolerance are equal;
//!    values farther apart are not.

use std::fmt;
use std::sync::Arc;

pub use propnotify_schema::ValueKind;

/// Absolute-difference threshold under which two doubles are one value.
pub const F64_TOLERANCE: f64 = 1e-15;

/// Absolute-difference threshold under which two singles are one value.
pub const F32_TOLERANCE: f32 = 1e-8;

/// A property value in transit through the write path.
#[derive(Clone, Debug)]
pub enum Value {
    /// Signed integral (also enum discriminants).
    Int(i64),
    /// Unsigned integral (also reference-identity handles).
    Uint(u64),
    /// Boolean.
    Bool(bool),
    /// String; cheap to clone.
    Str(Arc<str>),
    /// Single-precision float.
    F32(f32),
    /// Double-precision float.
    F64(f64),
}

impl Value {
    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Uint(_) => ValueKind::Uint,
            Self::Bool(_) => ValueKind::Bool,
            Self::Str(_) => ValueKind::Str,
            Self::F32(_) => ValueKind::F32,
            Self::F64(_) => ValueKind::F64,
        }
    }

    /// Equality under the per-kind policy. Cross-kind comparisons are
    /// always unequal.
    #[must_use]
    pub fn policy_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => (a - b).abs() < F32_TOLERANCE,
            (Self::F64(a), Self::F64(b)) => (a - b).abs() < F64_TOLERANCE,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

/// Field types usable in generated models.
///
/// Ties a Rust field type to its [`ValueKind`] so the `notify_model!`
/// generator can build descriptors without naming kinds explicitly.
pub trait PropertyValue: Into<Value> + TryFrom<Value, Error = KindError> {
    /// The kind this type maps to.
    const KIND: ValueKind;
}

/// A value of the wrong kind was handed to a conversion or a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindError {
    /// Kind the target expected.
    pub expected: ValueKind,
    /// Kind actually supplied.
    pub found: ValueKind,
}

impl fmt::Display for KindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a {} value, got {}", self.expected, self.found)
    }
}

impl std::error::Error for KindError {}

macro_rules! int_value {
    ($($ty:ty),+ => $variant:ident / $kind:ident as $repr:ty) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v as $repr)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = KindError;

                fn try_from(v: Value) -> Result<Self, KindError> {
                    match v {
                        Value::$variant(inner) => Ok(inner as $ty),
                        other => Err(KindError {
                            expected: ValueKind::$kind,
                            found: other.kind(),
                        }),
                    }
                }
            }

            impl PropertyValue for $ty {
                const KIND: ValueKind = ValueKind::$kind;
            }
        )+
    };
}

int_value!(i8, i16, i32, i64 => Int / Int as i64);
int_value!(u8, u16, u32, u64 => Uint / Uint as u64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl TryFrom<Value> for bool {
    type Error = KindError;

    fn try_from(v: Value) -> Result<Self, KindError> {
        match v {
            Value::Bool(inner) => Ok(inner),
            other => Err(KindError {
                expected: ValueKind::Bool,
                found: other.kind(),
            }),
        }
    }
}

impl PropertyValue for bool {
    const KIND: ValueKind = ValueKind::Bool;
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl TryFrom<Value> for String {
    type Error = KindError;

    fn try_from(v: Value) -> Result<Self, KindError> {
        match v {
            Value::Str(inner) => Ok(inner.as_ref().to_owned()),
            other => Err(KindError {
                expected: ValueKind::Str,
                found: other.kind(),
            }),
        }
    }
}

impl PropertyValue for String {
    const KIND: ValueKind = ValueKind::Str;
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl TryFrom<Value> for f32 {
    type Error = KindError;

    fn try_from(v: Value) -> Result<Self, KindError> {
        match v {
            Value::F32(inner) => Ok(inner),
            other => Err(KindError {
                expected: ValueKind::F32,
                found: other.kind(),
            }),
        }
    }
}

impl PropertyValue for f32 {
    const KIND: ValueKind = ValueKind::F32;
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl TryFrom<Value> for f64 {
    type Error = KindError;

    fn try_from(v: Value) -> Result<Self, KindError> {
        match v {
            Value::F64(inner) => Ok(inner),
            other => Err(KindError {
                expected: ValueKind::F64,
                found: other.kind(),
            }),
        }
    }
}

impl PropertyValue for f64 {
    const KIND: ValueKind = ValueKind::F64;
}
