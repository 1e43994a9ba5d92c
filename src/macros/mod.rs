//! Declarative macros for donotation.

// bind! is #[macro_export]ed at the crate root
#[macro_use]
mod bind;
