//! BoardGameGeek catalog access.
//!
//! Covers the remote side of the note pipeline: searching and fetching game
//! details over the XML API, turning a detail document into a
//! [`GameRecord`](bgg_notes_core::GameRecord), and the optional translation
//! pass over its free text.

pub mod client;
pub mod error;
pub mod extract;
pub mod translate;
pub mod types;
pub mod xml;

pub use client::{BggClient, Catalog, first_item, parse_search_results};
pub use error::{CatalogError, ErrorKind};
pub use extract::{best_player_count, normalize};
pub use translate::{HttpTranslator, TextTranslator, translate_record};
pub use xml::{XmlElement, parse_document};

#[cfg(test)]
#[path = "tests/local_server.rs"]
mod local_server;
