//! Flowchart diagram plugin
//!
//! Encodes an analysis result as a Mermaid flowchart overview.

mod encoder;

pub use encoder::{edge_for, shape_for, FlowchartEncoder, FLOWCHART_GENERATION_ERROR};
