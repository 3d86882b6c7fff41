//! Drawing file persistence.
//!
//! Serialises a stroke list (and optionally the tool it was drawn with) to a
//! JSON document, writes it to disk with locking, optional compression and a
//! backup of the previous file, and reads it back into an [`crate::InkSession`].

mod drawing;
mod options;

pub use drawing::{
    DrawingInspection, SavedDrawing, ToolStateSnapshot, inspect_drawing, load_drawing,
    save_drawing,
};
pub use options::{
    CompressionMode, DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, StorageOptions, backup_file_path,
    lock_file_path,
};
