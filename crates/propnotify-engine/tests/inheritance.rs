//! Marker inheritance across descriptor chains: inherited markers keep
//! working in descendants, suppression cancels them, and a descendant's
//! new marker re-activates a suppressed property.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::OnceLock;

use propnotify_engine::{
    InvocatorSpec, Model, ModelDescriptor, Notifier, PropertySpec, Value, ValueKind, WriteError,
};

fn parent_descriptor() -> &'static ModelDescriptor {
    static DESCRIPTOR: OnceLock<ModelDescriptor> = OnceLock::new();
    DESCRIPTOR.get_or_init(|| {
        ModelDescriptor::builder("ParentModel")
            .property(PropertySpec::new("reading", ValueKind::Int).notify())
            .property(PropertySpec::new("staged", ValueKind::Int))
            .invocator(InvocatorSpec::published())
            .build()
    })
}

/// Shared accessor plumbing for the two-field test models.
macro_rules! two_field_model {
    ($name:ident, $descriptor:expr) => {
        #[derive(Default)]
        struct $name {
            reading: i64,
            staged: i64,
        }

        impl Model for $name {
            fn descriptor() -> &'static ModelDescriptor {
                static DESCRIPTOR: OnceLock<ModelDescriptor> = OnceLock::new();
                DESCRIPTOR.get_or_init(|| $descriptor)
            }

            fn read(&self, property: &str) -> Option<Value> {
                match property {
                    "reading" => Some(Value::from(self.reading)),
                    "staged" => Some(Value::from(self.staged)),
                    _ => None,
                }
            }

            fn write(&mut self, property: &str, value: Value) -> Result<(), WriteError> {
                let slot = match property {
                    "reading" => &mut self.reading,
                    "staged" => &mut self.staged,
                    _ => return Err(WriteError::unknown(property)),
                };
                *slot = i64::try_from(value)
                    .map_err(|err| WriteError::kind_mismatch(property, err))?;
                Ok(())
            }
        }
    };
}

two_field_model!(
    BareChild,
    ModelDescriptor::builder("BareChild")
        .inherit(parent_descriptor())
        .property(PropertySpec::new("reading", ValueKind::Int))
        .build()
);

two_field_model!(
    SuppressingChild,
    ModelDescriptor::builder("SuppressingChild")
        .inherit(parent_descriptor())
        .property(PropertySpec::new("reading", ValueKind::Int).suppress())
        .build()
);

two_field_model!(
    RemarkingGrandchild,
    ModelDescriptor::builder("RemarkingGrandchild")
        .inherit(SuppressingChild::descriptor())
        .property(PropertySpec::new("reading", ValueKind::Int).notify_as("fresh_reading"))
        .build()
);

fn count_on<T: Model>(
    model: &propnotify_engine::Notifying<T>,
    property: &str,
) -> (Rc<Cell<u32>>, propnotify_engine::Subscription) {
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    let sub = model.subscribe_to(property, move || sink.set(sink.get() + 1));
    (count, sub)
}

#[test]
fn inherited_marker_survives_bare_redeclaration() {
    let mut model = Notifier::of::<BareChild>().expect("well-shaped model");
    let (count, _sub) = count_on(&model, "reading");

    model.set("reading", 1i64).expect("write");
    assert_eq!(count.get(), 1);
}

#[test]
fn inherited_plain_property_stays_plain_in_descendants() {
    let mut model = Notifier::of::<BareChild>().expect("well-shaped model");
    let (count, _sub) = count_on(&model, "staged");

    model.set("staged", 1i64).expect("write");
    assert_eq!(count.get(), 0);
    assert_eq!(model.staged, 1);
}

#[test]
fn suppression_cancels_the_inherited_marker() {
    let mut model = Notifier::of::<SuppressingChild>().expect("well-shaped model");
    let (count, _sub) = count_on(&model, "reading");

    model.set("reading", 1i64).expect("write");
    assert_eq!(count.get(), 0, "suppressed property must never notify");
    assert_eq!(model.reading, 1, "the write itself still lands");
}

#[test]
fn descendant_marker_reactivates_a_suppressed_property() {
    let mut model = Notifier::of::<RemarkingGrandchild>().expect("well-shaped model");
    let (fresh, _s1) = count_on(&model, "fresh_reading");
    let (own, _s2) = count_on(&model, "reading");

    model.set("reading", 1i64).expect("write");
    assert_eq!(fresh.get(), 1, "the new explicit name fires");
    assert_eq!(own.get(), 0, "the cancelled own-name marker stays gone");
}
