//! Shared data model for bgg-notes.
//!
//! Everything here is plain data: search hits, the normalized game record
//! produced from a detail response, and the settings value every other
//! crate reads from.

pub mod record;
pub mod settings;
pub mod text;

pub use record::{Comment, GameRecord, MAX_COMMENTS, SearchResult, UNKNOWN_YEAR};
pub use settings::{ListStyle, Settings, TranslationMode};
pub use text::escape_emphasis;
