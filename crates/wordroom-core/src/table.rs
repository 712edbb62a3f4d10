//! Section/row model consumed by list renderers.
//!
//! While a search query is active the renderer sees an extra section at
//! index 0 holding a single "look up this query" row, and the real sections
//! move down by one. [`project`] and [`table_index`] are the only places that
//! know about that shift.

use std::fmt;
use std::str::FromStr;

use crate::error::VocabError;
use crate::words::Section;

/// A `(section, row)` pair in renderer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableLocation {
    pub section: usize,
    pub row: usize,
}

impl TableLocation {
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Display for TableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location '{0}', expected SECTION:ROW")]
pub struct ParseLocationError(String);

impl FromStr for TableLocation {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (section, row) = s
            .split_once(':')
            .ok_or_else(|| ParseLocationError(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse()
                .map_err(|_| ParseLocationError(s.to_string()))
        };
        Ok(Self::new(parse(section)?, parse(row)?))
    }
}

/// What a renderer section index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSection {
    /// The synthetic search suggestion section
    Suggestion,
    Words(Section),
}

pub fn section_count(query_active: bool) -> usize {
    if query_active { 3 } else { 2 }
}

/// Renderer section index to model section.
pub fn project(index: usize, query_active: bool) -> Option<TableSection> {
    match (query_active, index) {
        (true, 0) => Some(TableSection::Suggestion),
        (true, 1) | (false, 0) => Some(TableSection::Words(Section::Notes)),
        (true, 2) | (false, 1) => Some(TableSection::Words(Section::History)),
        _ => None,
    }
}

/// Model section to renderer section index.
pub fn table_index(section: Section, query_active: bool) -> usize {
    let base = match section {
        Section::Notes => 0,
        Section::History => 1,
    };
    if query_active { base + 1 } else { base }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Notes,
    History,
    Suggestion,
}

impl From<Section> for CellKind {
    fn from(section: Section) -> Self {
        match section {
            Section::Notes => CellKind::Notes,
            Section::History => CellKind::History,
        }
    }
}

/// Rendering data for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub detail: Option<String>,
    pub kind: CellKind,
}

/// Data source for a sectioned list view
pub trait TableDataSource {
    fn number_of_sections(&self) -> usize;

    /// Header text; empty for the suggestion section and unknown sections
    fn title_for_header(&self, section: usize) -> &str;

    fn number_of_rows(&self, section: usize) -> usize;

    fn cell_for_row(&self, section: usize, row: usize) -> Option<Cell>;

    fn can_delete(&self, section: usize, row: usize) -> bool;

    /// Delete the word shown at a row. Returns the deleted word, or `None`
    /// when the row does not hold a deletable word.
    fn delete_row(&mut self, section: usize, row: usize) -> Result<Option<String>, VocabError>;
}
