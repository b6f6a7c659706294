//! Application ports
//!
//! - **registry** - compile-time registration of test-double blueprints

pub mod registry;
