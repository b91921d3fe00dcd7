//! Optional JSON export of a page tree, gated behind the `semantic`
//! feature. This is export only — the engine itself never reads or
//! interprets cell content (spec.md §1 Non-goals: "semantic interpretation
//! of cell content").

use crate::model::StructuredPage;

/// Serializes `page`'s block tree to pretty-printed JSON. The output is a
/// plain structural dump (blocks, lines, chars, grid positions) for
/// downstream tooling; nothing about *what a table means* is inferred
/// here.
pub fn export_json(page: &StructuredPage) -> serde_json::Result<String> {
    serde_json::to_string_pretty(page)
}
