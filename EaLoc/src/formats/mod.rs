//! File format handlers
//!
//! - `loc` - the binary LOC container
//! - `text` - its sectioned `key=value` text form
//! - `control_codes` - control byte placeholders shared by both directions
//! - `encoding` - string payload encodings

pub mod control_codes;
pub mod encoding;
pub mod loc;
pub mod text;

pub use control_codes::{ControlCode, ControlCodeTable};
pub use encoding::{Decoded, TextEncoding};
pub use loc::{ChunkLayout, LocChunk, LocFile, LocHeader, LocIndexBlock};
pub use text::{TextDocument, TextEntry, TextSection};
