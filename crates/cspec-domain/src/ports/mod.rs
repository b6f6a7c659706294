//! Domain Port Interfaces
//!
//! Contracts between the subject factory and its collaborators.
//!
//! - **doubles** - the mocking collaborator: creates mocks, stubs and partial
//!   mocks, and the type-erased handle they travel in
//! - **subject** - statically declared constructors of a subject under test

/// Test-double factory port and erased doubles
pub mod doubles;
/// Subject constructor declarations
pub mod subject;

pub use doubles::{DoubleFactory, DoubleRequest, ErasedDouble, Verifiable};
pub use subject::{Arguments, Constructor, DefaultDouble, Parameter, Subject};
