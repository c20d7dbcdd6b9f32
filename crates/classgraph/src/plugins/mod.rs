//! Encoder implementations for different diagram types
//!
//! Each plugin implements [`crate::core::DiagramEncoder`] for one Mermaid
//! notation. [`EncoderRegistry`] routes requests between them.

pub mod class;
pub mod flowchart;
pub mod registry;

pub use class::*;
pub use flowchart::*;
pub use registry::*;
