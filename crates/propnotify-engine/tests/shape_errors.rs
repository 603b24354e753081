//! Every shape violation fails deterministically with its documented
//! error kind, and a failed type leaves no cache entry behind.

use std::any::TypeId;

use propnotify_engine::{
    Access, ErrorClass, InvocatorShape, InvocatorSpec, Model, ModelDescriptor, ModelError,
    Notifier, PropertySpec, Value, ValueKind, WriteError, cache, validate,
};

/// Hand-written single-field models over arbitrary descriptors; this is
/// how ill-shaped descriptors are reached, since the generator only emits
/// well-shaped ones.
macro_rules! descriptor_model {
    ($name:ident, $builder:expr) => {
        #[derive(Debug, Default)]
        struct $name {
            reading: i64,
        }

        impl Model for $name {
            fn descriptor() -> &'static ModelDescriptor {
                static DESCRIPTOR: std::sync::OnceLock<ModelDescriptor> =
                    std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| $builder)
            }

            fn read(&self, property: &str) -> Option<Value> {
                (property == "reading").then(|| Value::from(self.reading))
            }

            fn write(&mut self, property: &str, value: Value) -> Result<(), WriteError> {
                if property != "reading" {
                    return Err(WriteError::unknown(property));
                }
                self.reading = i64::try_from(value)
                    .map_err(|err| WriteError::kind_mismatch(property, err))?;
                Ok(())
            }
        }
    };
}

fn marked_reading() -> PropertySpec {
    PropertySpec::new("reading", ValueKind::Int).notify()
}

descriptor_model!(
    FixedMarked,
    ModelDescriptor::builder("FixedMarked")
        .property(marked_reading().fixed())
        .invocator(InvocatorSpec::published())
        .build()
);

descriptor_model!(
    PrivateGetter,
    ModelDescriptor::builder("PrivateGetter")
        .property(marked_reading().read_access(Access::Private))
        .invocator(InvocatorSpec::published())
        .build()
);

descriptor_model!(
    CrateSetter,
    ModelDescriptor::builder("CrateSetter")
        .property(marked_reading().write_access(Access::Crate))
        .invocator(InvocatorSpec::published())
        .build()
);

descriptor_model!(
    NoInvocator,
    ModelDescriptor::builder("NoInvocator")
        .property(marked_reading())
        .build()
);

descriptor_model!(
    WrongShapeInvocator,
    ModelDescriptor::builder("WrongShapeInvocator")
        .property(marked_reading())
        .invocator(InvocatorSpec::new(InvocatorShape::Other, Access::Public, true))
        .build()
);

descriptor_model!(
    HiddenInvocator,
    ModelDescriptor::builder("HiddenInvocator")
        .property(marked_reading())
        .invocator(InvocatorSpec::new(
            InvocatorShape::NamedChange,
            Access::Crate,
            true
        ))
        .build()
);

descriptor_model!(
    TwoInvocators,
    ModelDescriptor::builder("TwoInvocators")
        .property(marked_reading())
        .invocator(InvocatorSpec::published())
        .invocator(InvocatorSpec::published())
        .build()
);

descriptor_model!(
    UnimplementedInvocator,
    ModelDescriptor::builder("UnimplementedInvocator")
        .property(marked_reading())
        .invocator(InvocatorSpec::unimplemented())
        .build()
);

descriptor_model!(
    Memberless,
    ModelDescriptor::builder("Memberless").build()
);

descriptor_model!(
    WellShaped,
    ModelDescriptor::builder("WellShaped")
        .property(marked_reading())
        .invocator(InvocatorSpec::published())
        .build()
);

#[test]
fn fixed_marked_property_is_non_overridable() {
    let err = Notifier::of::<FixedMarked>().unwrap_err();
    assert_eq!(
        err,
        ModelError::NonOverridableMember {
            type_name: "FixedMarked".into(),
            property: "reading".into(),
        }
    );
    assert_eq!(err.class(), ErrorClass::Operation);
}

#[test]
fn restricted_accessors_are_inaccessible() {
    assert!(matches!(
        Notifier::of::<PrivateGetter>().unwrap_err(),
        ModelError::InaccessibleAccessor { .. }
    ));
    assert!(matches!(
        Notifier::of::<CrateSetter>().unwrap_err(),
        ModelError::InaccessibleAccessor { .. }
    ));
}

#[test]
fn invocator_violations_each_get_their_kind() {
    assert!(matches!(
        Notifier::of::<NoInvocator>().unwrap_err(),
        ModelError::MissingInvocator { .. }
    ));
    assert!(matches!(
        Notifier::of::<WrongShapeInvocator>().unwrap_err(),
        ModelError::MissingInvocator { .. }
    ));
    assert!(matches!(
        Notifier::of::<HiddenInvocator>().unwrap_err(),
        ModelError::MissingInvocator { .. }
    ));
    assert_eq!(
        Notifier::of::<TwoInvocators>().unwrap_err(),
        ModelError::AmbiguousInvocator {
            type_name: "TwoInvocators".into(),
            count: 2,
        }
    );

    let abstract_err = Notifier::of::<UnimplementedInvocator>().unwrap_err();
    assert!(matches!(abstract_err, ModelError::AbstractInvocator { .. }));
    assert_eq!(abstract_err.class(), ErrorClass::Argument);
}

#[test]
fn memberless_type_is_unsupported() {
    let err = Notifier::of::<Memberless>().unwrap_err();
    assert!(matches!(err, ModelError::UnsupportedType { .. }));
    assert_eq!(err.class(), ErrorClass::Argument);
}

#[test]
fn absent_descriptor_is_null_type() {
    let err = validate(None).unwrap_err();
    assert_eq!(err, ModelError::NullType);
    assert_eq!(err.class(), ErrorClass::Argument);
}

#[test]
fn failures_are_deterministic_and_leave_no_cache_entry() {
    let first = Notifier::of::<FixedMarked>().unwrap_err();
    let second = Notifier::of::<FixedMarked>().unwrap_err();
    assert_eq!(first, second);
    assert!(!cache::global().contains(TypeId::of::<FixedMarked>()));
}

#[test]
fn non_public_model_type_itself_is_fine() {
    // Accessibility rules apply to accessors and the invocator, not to
    // the model type: `WellShaped` is a private test type and validates.
    let mut model = Notifier::of::<WellShaped>().expect("shape is fine");
    model.set("reading", 5i64).expect("write");
    assert_eq!(model.reading, 5);
}
