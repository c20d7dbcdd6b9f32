//! Core abstractions for structural analysis and diagram generation
//!
//! The model produced by extraction, the syntax tree contract a parser must
//! satisfy, the encoder contract, options, errors and logging.

mod config;
mod encoder;
mod error;
pub mod logging;
mod model;
mod syntax;
mod text;
mod types;

pub use config::*;
pub use encoder::*;
pub use error::*;
pub use logging::*;
pub use model::*;
pub use syntax::*;
pub use text::*;
pub use types::*;
