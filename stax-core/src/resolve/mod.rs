//! Dependency and fragment resolution.
//!
//! Turns a requested stack + target into the ordered stack sequence to
//! deploy, and a stack's manifest fragment list into validated file paths.

pub mod deps;
pub mod fragments;

pub use deps::resolution_order;
pub use fragments::resolve_fragments;
