//! Note rendering and storage.

pub mod error;
pub mod obsidian;
pub mod store;

pub use error::FrontendError;
pub use obsidian::{BOARDGAME_URL, ObsidianNote, RenderedNote, sanitize_filename};
pub use store::{FsNoteStore, MemoryNoteStore, NoteStore};
