//! Shape validation and marker resolution.
//!
//! [`validate`] is the gate in front of behavior synthesis: it checks a
//! descriptor against the shape rules, in a fixed order, and resolves the
//! marker state into a [`ValidatedModel`]. Pure inspection: no caching,
//! no side effects.
//!
//! Check order:
//!
//! 1. A descriptor must be present.
//! 2. It must describe a type with at least one member.
//! 3. Every effectively-marked property must be interceptable.
//! 4. Every effectively-marked property's accessors must be reachable.
//! 5. Exactly one implemented invocator candidate must exist.

use crate::descriptor::{Access, ModelDescriptor, ValueKind};
use crate::error::ModelError;

/// One property after validation: its effective notification names, in
/// declaration order. Empty names mean the property is left alone: plain,
/// suppressed, or skipped by a lenient notify-all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedProperty {
    name: String,
    kind: ValueKind,
    notify_names: Vec<String>,
}

impl ResolvedProperty {
    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The property's value kind.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Effective notification names, declaration order.
    #[must_use]
    pub fn notify_names(&self) -> &[String] {
        &self.notify_names
    }

    /// Whether writes to this property should be intercepted at all.
    #[must_use]
    pub fn is_marked(&self) -> bool {
        !self.notify_names.is_empty()
    }
}

/// A descriptor that passed every shape check, with markers resolved.
#[derive(Clone, Debug)]
pub struct ValidatedModel {
    type_name: String,
    properties: Vec<ResolvedProperty>,
}

impl ValidatedModel {
    /// The model type's name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// All properties, declaration order.
    #[must_use]
    pub fn properties(&self) -> &[ResolvedProperty] {
        &self.properties
    }
}

/// Validate a descriptor and resolve its markers.
///
/// `None` stands in for the original's null type argument and fails with
/// [`ModelError::NullType`]. See the module docs for the check order.
///
/// # Errors
///
/// One of the seven [`ModelError`] kinds; see each check above.
pub fn validate(desc: Option<&ModelDescriptor>) -> Result<ValidatedModel, ModelError> {
    let desc = desc.ok_or(ModelError::NullType)?;
    let type_name = desc.type_name().to_owned();

    if desc.member_count() == 0 {
        return Err(ModelError::UnsupportedType { type_name });
    }

    let lenient_all = desc.notify_all().is_some_and(|mode| !mode.error_on_fixed);
    let mut properties = Vec::new();
    for prop in desc.effective_properties() {
        let mut notify_names = prop.notify_names;
        if !notify_names.is_empty() {
            if !prop.interceptable {
                if prop.implied && lenient_all {
                    notify_names.clear();
                } else {
                    return Err(ModelError::NonOverridableMember {
                        type_name,
                        property: prop.name,
                    });
                }
            } else if prop.read_access != Access::Public || prop.write_access != Access::Public {
                return Err(ModelError::InaccessibleAccessor {
                    type_name,
                    property: prop.name,
                });
            }
        }
        properties.push(ResolvedProperty {
            name: prop.name,
            kind: prop.kind,
            notify_names,
        });
    }

    let candidates: Vec<_> = desc
        .all_invocators()
        .into_iter()
        .filter(|inv| inv.is_candidate())
        .collect();
    match candidates.as_slice() {
        [] => return Err(ModelError::MissingInvocator { type_name }),
        [single] => {
            if !single.is_implemented() {
                return Err(ModelError::AbstractInvocator { type_name });
            }
        }
        many => {
            return Err(ModelError::AmbiguousInvocator {
                type_name,
                count: many.len(),
            });
        }
    }

    Ok(ValidatedModel {
        type_name,
        properties,
    })
}
