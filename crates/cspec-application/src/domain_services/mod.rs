//! Domain services
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`DependencyRegistry`] | Ordered, capability-tagged test doubles declared by a context |
//! | [`SubjectFactory`] | Picks the greediest constructor and wires its parameters |

pub mod registry;
pub mod wiring;

pub use registry::DependencyRegistry;
pub use wiring::{Binding, BindingSource, SubjectFactory, WiringReport};
