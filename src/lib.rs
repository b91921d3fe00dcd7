//! Table detection and reconstruction over structured page trees.
//!
//! Given a page already broken into text/vector/structural blocks, this
//! crate finds table-shaped regions and rewrites them in place as a
//! `Table` / `TableRow` / `TableCell` subtree, carrying a `Grid`
//! annotation describing the inferred column and row positions. It does
//! not parse documents, render pages, or run OCR — it consumes the
//! structured output of whatever upstream pipeline produced it.
//!
//! The entry point is [`detect_tables`]; [`ReconConfig`] tunes its
//! tolerances. See [`recon`] for the individual pipeline stages
//! (projection building, divider inference, grid harvesting, crossing
//! recording, simplification, transcription) if you need to assemble a
//! custom pipeline rather than running the whole thing.

pub mod error;
pub mod model;
pub mod recon;

pub use error::{ReconError, Result};
pub use model::{Block, StructuredPage};
pub use recon::{detect_tables, detect_tables_in_pages, ReconConfig};
