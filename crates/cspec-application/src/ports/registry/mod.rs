//! Blueprint Registry System
//!
//! Auto-registration infrastructure for test-double blueprints. A blueprint
//! knows how to create mocks, stubs and partial mocks of one capability.
//! Uses the `linkme` crate so blueprints declared anywhere in the test
//! binary are discoverable at runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Blueprint Registration Flow                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  1. Test declares:   register_double!(CLOCK: dyn Clock => ..)  │
//! │                              ↓                                  │
//! │  2. Registry slice:  DOUBLE_BLUEPRINTS: [BlueprintEntry]        │
//! │                              ↓                                  │
//! │  3. Factory queries: resolve_blueprint(&capability)             │
//! │                              ↓                                  │
//! │  4. Subject factory: stub synthesized for unregistered params  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod doubles;

pub use doubles::{BlueprintEntry, DOUBLE_BLUEPRINTS, list_blueprints, resolve_blueprint};
