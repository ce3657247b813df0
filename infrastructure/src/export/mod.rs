//! Export adapters

mod graph_json;

pub use graph_json::{ExportError, GraphDocument, write_graph_json};
