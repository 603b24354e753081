//! Entry point and the notifying instance wrapper.
//!
//! Construction goes *through* the synthesized behavior from the start:
//! [`Notifier::of`] builds the model value and wraps it, and
//! [`Notifier::create`] wraps a value the caller just constructed. There
//! is no post-construction retyping anywhere; [`Notifying`] owns the
//! instance for its whole observable life, so instance identity is the
//! wrapper itself and field values are never copied or reallocated after
//! wrapping.
//!
//! Every write, typed or by name, funnels through [`Notifying::set`]; an
//! indirect (by-name) write takes exactly the same path as any other, so
//! interception cannot be bypassed.
//!
//! # Usage
//!
//! ```ignore
//! notify_model! {
//!     #[derive(Default)]
//!     pub struct Sensor {
//!         notify reading: i64,
//!         plain raw: i64,
//!     }
//! }
//!
//! let mut sensor = Notifier::of::<Sensor>()?;
//! let _sub = sensor.subscribe(|name| println!("{name} changed"));
//! sensor.set("reading", 42i64)?; // publishes "reading"
//! sensor.set("reading", 42i64)?; // equal value: publishes nothing
//! assert_eq!(sensor.reading, 42);
//! ```

use std::any::TypeId;
use std::error::Error;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use propnotify_schema::{ModelDescriptor, ModelError, validate};

use crate::behavior::{SynthesizedBehavior, synthesize};
use crate::cache;
use crate::hub::{ChangeHub, Subscription};
use crate::value::{KindError, Value};

/// A model type usable with the notifier: describable, and readable /
/// writable by property name.
///
/// The `notify_model!` generator emits impls of this trait; hand-written
/// impls work the same way and are how ill-shaped descriptors are
/// exercised in tests.
pub trait Model: 'static {
    /// The model type's descriptor, built once.
    fn descriptor() -> &'static ModelDescriptor
    where
        Self: Sized;

    /// Read a property's current value; `None` for unknown names.
    fn read(&self, property: &str) -> Option<Value>;

    /// Write a property, bypassing interception. Callers outside the
    /// engine should go through [`Notifying::set`] instead.
    ///
    /// # Errors
    ///
    /// [`WriteError`] for unknown names or mismatched kinds.
    fn write(&mut self, property: &str, value: Value) -> Result<(), WriteError>;
}

/// A by-name write failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteError {
    /// No property with that name exists on the model.
    UnknownProperty {
        /// The offending name.
        property: String,
    },
    /// The supplied value's kind does not match the property's.
    KindMismatch {
        /// The property written.
        property: String,
        /// Kind the property holds.
        expected: propnotify_schema::ValueKind,
        /// Kind actually supplied.
        found: propnotify_schema::ValueKind,
    },
}

impl WriteError {
    /// Unknown-property error for `property`.
    #[must_use]
    pub fn unknown(property: &str) -> Self {
        Self::UnknownProperty {
            property: property.to_owned(),
        }
    }

    /// Kind-mismatch error for `property`, from a failed conversion.
    #[must_use]
    pub fn kind_mismatch(property: &str, err: KindError) -> Self {
        Self::KindMismatch {
            property: property.to_owned(),
            expected: err.expected,
            found: err.found,
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProperty { property } => {
                write!(f, "no property named '{property}'")
            }
            Self::KindMismatch {
                property,
                expected,
                found,
            } => write!(
                f,
                "property '{property}' holds {expected} values, got {found}"
            ),
        }
    }
}

impl Error for WriteError {}

/// A live model instance dispatching writes through its synthesized
/// behavior.
///
/// Reads pass straight through (`Notifying<T>` derefs to `&T`); writes go
/// through [`set`](Self::set), where marked properties are equality-gated
/// and published.
pub struct Notifying<T: Model> {
    instance: T,
    behavior: Arc<SynthesizedBehavior>,
    hub: ChangeHub,
}

impl<T: Model> Deref for Notifying<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.instance
    }
}

impl<T: Model> Notifying<T> {
    /// Write a property by name, routed through the behavior.
    ///
    /// For a marked property: if the new value equals the current one
    /// under the kind's equality policy, nothing happens; otherwise the
    /// value is written and every notification name is published, in
    /// declaration order. Plain and suppressed properties write through
    /// without publishing.
    ///
    /// # Errors
    ///
    /// [`WriteError`] for unknown names or mismatched kinds.
    pub fn set(&mut self, property: &str, value: impl Into<Value>) -> Result<(), WriteError> {
        let value = value.into();
        let Some(interceptor) = self.behavior.intercept(property) else {
            return self.instance.write(property, value);
        };

        if value.kind() != interceptor.kind() {
            return Err(WriteError::KindMismatch {
                property: property.to_owned(),
                expected: interceptor.kind(),
                found: value.kind(),
            });
        }
        let current = self
            .instance
            .read(property)
            .ok_or_else(|| WriteError::unknown(property))?;
        if current.policy_eq(&value) {
            return Ok(());
        }
        self.instance.write(property, value)?;
        for name in interceptor.notify_names() {
            self.hub.publish(name);
        }
        Ok(())
    }

    /// Read a property by name; `None` for unknown names.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<Value> {
        self.instance.read(property)
    }

    /// Subscribe to all change notifications on this instance.
    pub fn subscribe(&self, callback: impl Fn(&str) + 'static) -> Subscription {
        self.hub.subscribe(callback)
    }

    /// Subscribe to one notification name.
    pub fn subscribe_to(
        &self,
        property: impl Into<String>,
        callback: impl Fn() + 'static,
    ) -> Subscription {
        let property = property.into();
        self.hub.subscribe(move |changed| {
            if changed == property {
                callback();
            }
        })
    }

    /// The shared behavior artifact backing this instance.
    #[must_use]
    pub fn behavior(&self) -> &Arc<SynthesizedBehavior> {
        &self.behavior
    }

    /// Unwrap, discarding the notification machinery.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.instance
    }
}

impl<T: Model + fmt::Debug> fmt::Debug for Notifying<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifying")
            .field("instance", &self.instance)
            .field("behavior", &self.behavior.type_name())
            .finish()
    }
}

/// The entry point: validate, get-or-synthesize, wrap.
pub struct Notifier;

impl Notifier {
    /// Construct a `T` via `Default` and wrap it in its synthesized
    /// behavior.
    ///
    /// # Errors
    ///
    /// [`ModelError`] when `T`'s descriptor fails shape validation; no
    /// instance is returned and nothing is cached.
    pub fn of<T: Model + Default>() -> Result<Notifying<T>, ModelError> {
        Self::create(T::default())
    }

    /// Wrap an already-constructed instance: the construction-time
    /// variant, for models that finish their own setup before wrapping.
    ///
    /// # Errors
    ///
    /// [`ModelError`] when `T`'s descriptor fails shape validation.
    pub fn create<T: Model>(instance: T) -> Result<Notifying<T>, ModelError> {
        let validated = validate(Some(T::descriptor())).inspect_err(|err| {
            tracing::debug!(model = T::descriptor().type_name(), %err, "validation failed");
        })?;
        let behavior = cache::global()
            .get_or_build(TypeId::of::<T>(), || Ok::<_, ModelError>(synthesize(&validated)))?;
        Ok(Notifying {
            instance,
            behavior,
            hub: ChangeHub::new(),
        })
    }
}
