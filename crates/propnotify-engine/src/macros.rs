//! The `notify_model!` generator.
//!
//! Emits, at compile time, everything the engine needs for a model type:
//! the struct itself, its once-built [`ModelDescriptor`]
//! (crate::ModelDescriptor), and the [`Model`](crate::Model) impl with
//! name-keyed accessors. This is the build-time replacement for runtime
//! accessor-override synthesis: instances can only ever be constructed
//! with the generated shape, so nothing needs retyping later.
//!
//! # Field grammar
//!
//! - `notify field: Ty`: marked, publishes under the field's own name.
//! - `notify(NameA, NameB) field: Ty`: marked, publishes each listed
//!   name in order.
//! - `plain field: Ty`: never intercepted.
//! - `suppress field: Ty`: explicitly suppressed (matters under
//!   notify-all and inheritance; behaves like `plain` otherwise).
//!
//! # Examples
//!
//! ```ignore
//! notify_model! {
//!     /// A sensor reading.
//!     #[derive(Default)]
//!     pub struct Sensor {
//!         notify reading: i64,
//!         notify(label, caption) label: String,
//!         plain sample_count: u64,
//!     }
//! }
//! ```

/// Generate a model struct, its descriptor, and its `Model` impl.
///
/// See the module docs above for the field grammar.
#[macro_export]
macro_rules! notify_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $mode:ident $(( $($alias:ident),+ $(,)? ))? $field:ident : $fty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( pub $field: $fty, )+
        }

        impl $crate::Model for $name {
            fn descriptor() -> &'static $crate::ModelDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<$crate::ModelDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    $crate::ModelDescriptor::builder(stringify!($name))
                        $( .property($crate::notify_model!(
                            @prop $mode $(( $($alias),+ ))? $field : $fty
                        )) )+
                        .invocator($crate::InvocatorSpec::published())
                        .build()
                })
            }

            fn read(&self, property: &str) -> ::std::option::Option<$crate::Value> {
                match property {
                    $( stringify!($field) => ::std::option::Option::Some(
                        $crate::Value::from(::std::clone::Clone::clone(&self.$field)),
                    ), )+
                    _ => ::std::option::Option::None,
                }
            }

            fn write(
                &mut self,
                property: &str,
                value: $crate::Value,
            ) -> ::std::result::Result<(), $crate::WriteError> {
                match property {
                    $( stringify!($field) => {
                        self.$field =
                            <$fty as ::std::convert::TryFrom<$crate::Value>>::try_from(value)
                                .map_err(|err| $crate::WriteError::kind_mismatch(property, err))?;
                        ::std::result::Result::Ok(())
                    } )+
                    _ => ::std::result::Result::Err($crate::WriteError::unknown(property)),
                }
            }
        }
    };

    (@prop notify $field:ident : $fty:ty) => {
        $crate::PropertySpec::new(stringify!($field), <$fty as $crate::PropertyValue>::KIND)
            .notify()
    };
    (@prop notify ( $($alias:ident),+ ) $field:ident : $fty:ty) => {
        $crate::PropertySpec::new(stringify!($field), <$fty as $crate::PropertyValue>::KIND)
            $( .notify_as(stringify!($alias)) )+
    };
    (@prop plain $field:ident : $fty:ty) => {
        $crate::PropertySpec::new(stringify!($field), <$fty as $crate::PropertyValue>::KIND)
    };
    (@prop suppress $field:ident : $fty:ty) => {
        $crate::PropertySpec::new(stringify!($field), <$fty as $crate::PropertyValue>::KIND)
            .suppress()
    };
}
