pub mod config;
pub mod diagnostics;
pub mod files;
pub mod indexmap;
pub mod numeric;

pub use files::{FileId, FileStore, InputFile};
pub use rowan::{TextRange, TextSize};
