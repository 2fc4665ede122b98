//! Intent resolution engine for infrastructure commands.
//!
//! Turns free-text operator commands ("restart kafka node on server-01") into
//! structured [`ii_protocol::Intent`]s using a declarative pattern catalog:
//! structural regex matching, heuristic confidence scoring, positional
//! parameter extraction, business-rule validation, and fuzzy suggestions
//! when nothing matches.

pub mod api_mapper;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod history;
pub mod resolver;
pub mod score;
pub mod similarity;
pub mod suggest;
pub mod validate;

// Re-export key types for convenience
pub use api_mapper::{ApiDefinition, map_definition};
pub use catalog::{Catalog, Context, Pattern};
pub use error::{CatalogError, CatalogResult};
pub use history::{CommandHistory, HistoryEntry};
pub use resolver::IntentResolver;
pub use validate::validate;
