//! Cursor and queue state shared by the scanner

pub mod cursor;
pub mod position;
pub mod queue;

pub use cursor::Cursor;
pub use position::{SourcePosition, SourceSpan};
pub use queue::LookaheadQueue;
