#![forbid(unsafe_code)]

//! Equality-gated change notification for data models.
//!
//! Mark a model's properties for notification, construct instances
//! through [`Notifier`], and every write that actually changes a marked
//! property's value publishes its notification names to the instance's
//! subscribers, with no notification code in the model itself.
//!
//! The pipeline per model type: shape validation (`propnotify-schema`) →
//! behavior synthesis ([`behavior`]) → process-wide memoization per type
//! ([`cache`]) → instances wrapped at construction ([`Notifying`]).
//! Synthesis runs at most once per type, even under concurrent first use;
//! a failed validation caches nothing and fails identically on retry.
//!
//! Models are declared with the [`notify_model!`] generator or by
//! implementing [`Model`] by hand over a built
//! [`ModelDescriptor`].
//!
//! # Invariants
//!
//! 1. One [`SynthesizedBehavior`] per model type per process; all
//!    instances share it.
//! 2. A marked property publishes exactly once per notification name per
//!    qualifying write, in declaration order.
//! 3. Plain and suppressed properties never publish.
//! 4. Writes equal to the current value (per the kind's equality policy)
//!    are no-ops.

pub mod behavior;
pub mod cache;
pub mod hub;
mod macros;
pub mod notifier;
pub mod value;

pub use behavior::{Interceptor, SynthesizedBehavior, synthesize};
pub use cache::BehaviorCache;
pub use hub::{ChangeHub, Subscription};
pub use notifier::{Model, Notifier, Notifying, WriteError};
pub use value::{F32_TOLERANCE, F64_TOLERANCE, KindError, PropertyValue, Value};

pub use propnotify_schema::{
    Access, ErrorClass, InvocatorShape, InvocatorSpec, ModelBuilder, ModelDescriptor, ModelError,
    NotifyAllMode, NotifyMarker, PropertySpec, ResolvedProperty, ValidatedModel, ValueKind,
    validate,
};
