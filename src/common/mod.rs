//! Shared building blocks.

mod property;

pub use property::Property;
