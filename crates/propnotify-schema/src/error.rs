//! Shape-validation error kinds.

use std::error::Error;
use std::fmt;

/// Why a model description cannot be synthesized.
///
/// Every kind is raised eagerly, during validation, never deferred to the
/// first write. A failed validation leaves no cache entry behind, so the
/// same bad descriptor fails identically every time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// No descriptor was supplied at all.
    NullType,
    /// The descriptor has no members (the universal-root analogue).
    UnsupportedType {
        /// Name of the offending model type.
        type_name: String,
    },
    /// A marked property cannot be routed through the behavior.
    NonOverridableMember {
        /// Name of the offending model type.
        type_name: String,
        /// The non-interceptable property.
        property: String,
    },
    /// A marked property's accessor is not reachable from the behavior.
    InaccessibleAccessor {
        /// Name of the offending model type.
        type_name: String,
        /// The property with a restricted accessor.
        property: String,
    },
    /// No member matches the invocator shape.
    MissingInvocator {
        /// Name of the offending model type.
        type_name: String,
    },
    /// More than one member matches the invocator shape.
    AmbiguousInvocator {
        /// Name of the offending model type.
        type_name: String,
        /// How many candidates matched.
        count: usize,
    },
    /// The single invocator candidate is declared but unimplemented.
    AbstractInvocator {
        /// Name of the offending model type.
        type_name: String,
    },
}

/// Coarse classification mirroring the original's exception split:
/// argument errors (the caller handed over an unusable type) versus
/// operation errors (the type's shape is incompatible with synthesis).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Unusable type argument.
    Argument,
    /// Shape incompatible with synthesis.
    Operation,
}

impl ModelError {
    /// Which error class this kind belongs to.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NullType | Self::UnsupportedType { .. } | Self::AbstractInvocator { .. } => {
                ErrorClass::Argument
            }
            Self::NonOverridableMember { .. }
            | Self::InaccessibleAccessor { .. }
            | Self::MissingInvocator { .. }
            | Self::AmbiguousInvocator { .. } => ErrorClass::Operation,
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullType => write!(f, "no model descriptor supplied"),
            Self::UnsupportedType { type_name } => {
                write!(f, "type '{type_name}' has no members to notify about")
            }
            Self::NonOverridableMember {
                type_name,
                property,
            } => write!(
                f,
                "property '{property}' of '{type_name}' is marked but not interceptable"
            ),
            Self::InaccessibleAccessor {
                type_name,
                property,
            } => write!(
                f,
                "property '{property}' of '{type_name}' has an accessor unreachable from the synthesized behavior"
            ),
            Self::MissingInvocator { type_name } => {
                write!(f, "type '{type_name}' has no invocator candidate")
            }
            Self::AmbiguousInvocator { type_name, count } => {
                write!(f, "type '{type_name}' has {count} invocator candidates")
            }
            Self::AbstractInvocator { type_name } => {
                write!(
                    f,
                    "invocator candidate of '{type_name}' is declared but unimplemented"
                )
            }
        }
    }
}

impl Error for ModelError {}
