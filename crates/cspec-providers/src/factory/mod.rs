//! `DoubleFactory` implementations

pub mod catalog;
pub mod null;

pub use catalog::CatalogDoubleFactory;
pub use null::NullDoubleFactory;
