//! tabview - delimited-text ingestion and sanitized table rendering
//!
//! Raw text goes through delimiter detection, a quote-aware parser and an
//! escaping HTML renderer. A [`DocumentHandle`] owns the rendered result for
//! one document and re-runs parse + render off the calling thread as the
//! content changes, following the Elm-style `Msg -> update -> Cmd` loop.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod csv;
pub mod error;
pub mod handle;
pub mod messages;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod runtime;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EngineConfig;
pub use csv::{detect_delimiter, parse_table, Delimiter, ParseError, ParseLimits, Table};
pub use error::DocumentError;
pub use handle::DocumentHandle;
pub use messages::DocumentMsg;
pub use model::{DocumentModel, DocumentState, RenderedDocument};
pub use render::{render_table, render_table_with, RenderOptions};
