//! Test doubles
//!
//! [`Behavior`] records calls and checks expectations; [`TestDouble`]
//! types wrap one and implement a capability trait. Blueprints make a
//! double type discoverable by capability:
//!
//! ```ignore
//! pub struct ClockDouble {
//!     behavior: Behavior,
//! }
//!
//! impl Clock for ClockDouble {
//!     fn now(&self) -> u64 {
//!         self.behavior.respond_or_default("now", json!([]))
//!     }
//! }
//!
//! register_double!(CLOCK_DOUBLE: dyn Clock => ClockDouble, "Clock reporting configured instants");
//! ```

pub mod behavior;
pub mod double;

pub use behavior::{Behavior, Call, Expectation, Times};
pub use double::{TestDouble, erase};

/// Register a [`TestDouble`] type as the blueprint for a capability
///
/// Expands to a `DOUBLE_BLUEPRINTS` entry collected at link time.
#[macro_export]
macro_rules! register_double {
    ($slot:ident : $capability:ty => $double:ty, $description:expr) => {
        #[$crate::linkme::distributed_slice($crate::DOUBLE_BLUEPRINTS)]
        #[linkme(crate = $crate::linkme)]
        static $slot: $crate::BlueprintEntry = $crate::BlueprintEntry {
            capability: || $crate::CapabilityId::of::<$capability>(),
            description: $description,
            factory: |request| {
                $crate::erase::<$capability, $double>(
                    request,
                    |double: ::std::sync::Arc<$double>| -> ::std::sync::Arc<$capability> { double },
                )
            },
        };
    };
}
