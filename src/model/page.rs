//! The structured-text page tree the engine consumes and mutates.
//!
//! This mirrors spec.md §3: an ordered tree of `Block`s, where a `Text`
//! block owns `Line`s which own `Char`s, a `Vector` block is a single
//! rectangle, and a `Struct` block is a named structural container whose
//! children form a sibling-ordered subtree. The tree is built and owned by
//! whatever upstream pipeline turned a document into structured text —
//! this crate has no parser of its own (spec.md §1 Non-goals) and takes
//! the tree as a precondition.
//!
//! Coordinates follow the rendered page's own axes: x increases rightward,
//! y increases *downward* (page top is the smaller y), matching the
//! on-screen convention a document-rendering host would hand the engine.
//! `Line::top`/`Line::bottom` and the projection builder's y-axis pushes
//! (spec.md §4.1) rely on this: a line's vertical span is `[top, bottom]`
//! with `top <= bottom`, the same as its x-axis `[left, right]`.

use crate::model::geometry::{Quad, Rect};

/// The structural role a `Struct` block plays.
///
/// `Table`, `TableRow`, and `TableCell` are the roles this engine creates;
/// `Other` preserves whatever role an upstream producer already assigned
/// (e.g. a logical "section" or "figure" container) without the engine
/// ever inspecting it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StructRole {
    Table,
    TableRow,
    TableCell,
    Other(String),
}

impl StructRole {
    pub fn is_table(&self) -> bool {
        matches!(self, StructRole::Table)
    }
}

/// Writing direction of a line of text, preserved across content migration
/// (spec.md §4.8: "Preserve line direction and writing-mode attributes").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum WritingMode {
    #[default]
    LeftToRight,
    RightToLeft,
    TopToBottom,
}

/// A single glyph: a quadrilateral bounding box and a code point.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Char {
    pub quad: Quad,
    pub code_point: char,
}

impl Char {
    pub fn new(quad: Quad, code_point: char) -> Self {
        Self { quad, code_point }
    }

    pub fn bbox(&self) -> Rect {
        self.quad.bbox()
    }

    pub fn is_space(&self) -> bool {
        self.code_point == ' '
    }
}

/// An ordered run of characters forming one line of text.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Line {
    pub chars: Vec<Char>,
    pub writing_mode: WritingMode,
}

impl Line {
    pub fn new(chars: Vec<Char>) -> Self {
        Self {
            chars,
            writing_mode: WritingMode::default(),
        }
    }

    pub fn with_writing_mode(mut self, mode: WritingMode) -> Self {
        self.writing_mode = mode;
        self
    }

    /// The line's bounding rectangle: the union of its characters' quads.
    pub fn bbox(&self) -> Rect {
        Rect::union_all(self.chars.iter().map(|c| c.bbox()).collect::<Vec<_>>().iter())
            .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Top edge: the page's y axis increases downward (the document's own
    /// rendering convention), so "top" is the minimum y across the line's
    /// characters and "bottom" the maximum — this keeps a line's vertical
    /// span a normal `[top, bottom]` interval with `top <= bottom`, which
    /// the projection builder's start/end push (spec.md §4.1) and the
    /// divider inferrer's winding count (spec.md §4.2) both depend on.
    pub fn top(&self) -> f64 {
        self.bbox().y0
    }

    /// Bottom edge: the maximum y across the line's characters.
    pub fn bottom(&self) -> f64 {
        self.bbox().y1
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// A block of text: an ordered list of lines.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct TextBlock {
    pub lines: Vec<Line>,
}

impl TextBlock {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Bounding rectangle: the union of the block's lines.
    pub fn bbox(&self) -> Rect {
        Rect::union_all(self.lines.iter().map(|l| l.bbox()).collect::<Vec<_>>().iter())
            .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0))
    }
}

/// A vector-graphics rectangle: a filled shape or hairline rule.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VectorBlock {
    pub rect: Rect,
}

impl VectorBlock {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// The final x/y divider positions of a detected table, cloned into a
/// long-lived annotation block attached to the table (spec.md §4.9 step 5).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridBlock {
    pub bbox: Rect,
    pub x_positions: Vec<crate::model::grid::GridPosition>,
    pub y_positions: Vec<crate::model::grid::GridPosition>,
}

/// A named structural container: the engine's own `Table`/`TableRow`/
/// `TableCell` nodes, or an upstream-defined container the engine recurses
/// into without otherwise touching.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StructBlock {
    pub role: StructRole,
    pub bbox: Rect,
    pub children: Vec<Block>,
    /// Position among this block's Struct siblings, strictly increasing
    /// per parent (spec.md §3, §4.8).
    pub sibling_index: u32,
}

impl StructBlock {
    pub fn new(role: StructRole, bbox: Rect) -> Self {
        Self {
            role,
            bbox,
            children: Vec::new(),
            sibling_index: 0,
        }
    }
}

/// One node of the page's block tree.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Block {
    Text(TextBlock),
    Vector(VectorBlock),
    Struct(StructBlock),
    Grid(GridBlock),
}

impl Block {
    pub fn bbox(&self) -> Rect {
        match self {
            Block::Text(t) => t.bbox(),
            Block::Vector(v) => v.rect,
            Block::Struct(s) => s.bbox,
            Block::Grid(g) => g.bbox,
        }
    }

    pub fn as_struct(&self) -> Option<&StructBlock> {
        match self {
            Block::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut StructBlock> {
        match self {
            Block::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Block::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// The root of a structured page: an ordered list of top-level blocks.
///
/// `detect_tables` treats `blocks` as the outermost subtree; recursion
/// into `Struct` children descends into their own `children` lists using
/// the same shape (spec.md §4.9).
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StructuredPage {
    pub blocks: Vec<Block>,
}

impl StructuredPage {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

/// Inserts `block` into `siblings` at `at`, renumbering every subsequent
/// `Struct` sibling's `sibling_index` so indices stay strictly increasing
/// (spec.md §4.8).
///
/// This is the one place list insertion happens; keeping it centralized is
/// what makes the "never leak/duplicate a sibling on insert" invariant
/// checkable in one spot instead of at every call site. Unlike the
/// teacher's linked-list heritage (spec.md §9's noted latent bug — setting
/// a list head unconditionally on a non-empty list), `Vec<Block>` has no
/// head pointer to corrupt; inserting at position 0 of a non-empty vector
/// simply shifts everything else down, which `Vec::insert` already
/// guarantees.
pub fn insert_struct_sibling(siblings: &mut Vec<Block>, at: usize, block: StructBlock) {
    let mut next_index = block.sibling_index;
    for sib in siblings.iter_mut().skip(at) {
        if let Block::Struct(s) = sib {
            next_index += 1;
            s.sibling_index = next_index;
        }
    }
    siblings.insert(at, Block::Struct(block));
}
