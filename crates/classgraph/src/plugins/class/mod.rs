//! Class diagram plugin
//!
//! Encodes an analysis result as a Mermaid class diagram.

mod encoder;

pub use encoder::{ClassDiagramEncoder, CLASS_DIAGRAM_GENERATION_ERROR};
