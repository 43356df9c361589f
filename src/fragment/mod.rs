//! Fragment reassembly primitives.
//!
//! This module collects the domain types of the reassembly layer. Each
//! sub-module focuses on a single concept to keep the code small and easy to
//! audit while still providing a cohesive API at the crate root.

pub mod assembler;
pub mod error;
pub mod frame;

pub use assembler::FragmentAssembler;
pub use error::AssemblyError;
pub use frame::{Fragment, fragment_lines};
