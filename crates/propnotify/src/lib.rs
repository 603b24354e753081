#![forbid(unsafe_code)]

//! Public facade for propnotify.
//!
//! Declare a model with [`notify_model!`], construct it through
//! [`Notifier`], subscribe, and write through [`Notifying::set`]:
//!
//! ```ignore
//! use propnotify::prelude::*;
//!
//! notify_model! {
//!     #[derive(Default)]
//!     pub struct Sensor {
//!         notify reading: i64,
//!         plain sample_count: u64,
//!     }
//! }
//!
//! let mut sensor = Notifier::of::<Sensor>()?;
//! let _sub = sensor.subscribe_to("reading", || println!("reading changed"));
//! sensor.set("reading", 42i64)?;
//! ```
//!
//! The granular crates remain available for direct use:
//! `propnotify-schema` (descriptors, markers, validation) and
//! `propnotify-engine` (synthesis, cache, entry point).

pub use propnotify_engine::{
    Access, BehaviorCache, ChangeHub, ErrorClass, F32_TOLERANCE, F64_TOLERANCE, Interceptor,
    InvocatorShape, InvocatorSpec, KindError, Model, ModelBuilder, ModelDescriptor, ModelError,
    Notifier, NotifyAllMode, NotifyMarker, Notifying, PropertySpec, PropertyValue,
    ResolvedProperty, Subscription, SynthesizedBehavior, ValidatedModel, Value, ValueKind,
    WriteError, notify_model, synthesize, validate,
};

/// Direct access to the schema layer.
pub use propnotify_schema as schema;

/// Everything a model author typically needs.
pub mod prelude {
    pub use propnotify_engine::{
        Model, ModelError, Notifier, Notifying, Subscription, Value, WriteError, notify_model,
    };
}
