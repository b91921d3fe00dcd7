//! Table detection and reconstruction engine.
//!
//! [`detect_tables`] is the single entry point (spec.md §6); everything
//! else in this module is an internal pipeline stage, exposed publicly so
//! callers who need finer control (custom harvesting, a different
//! simplifier pass) can assemble their own pipeline from the same pieces.

pub mod batch;
pub mod config;
pub mod crossing;
pub mod divider;
pub mod driver;
pub mod harvester;
pub mod projection;
#[cfg(feature = "semantic")]
pub mod semantic;
pub mod simplify;
pub mod transcribe;

pub use batch::detect_tables_in_pages;
pub use config::ReconConfig;
pub use crossing::record_crossings;
pub use divider::{infer_dividers, DividerResult};
pub use driver::{detect_tables, detect_tables_in_blocks};
pub use harvester::harvest_grid_lines;
pub use projection::build_projections;
#[cfg(feature = "semantic")]
pub use semantic::export_json;
pub use simplify::simplify_grid;
pub use transcribe::transcribe_table;
