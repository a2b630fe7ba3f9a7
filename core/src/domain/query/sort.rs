use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::query::{errors::QueryError, fields::OrganizationField};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Sort key of a search request; priority 1 is the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortTerm {
    pub field: OrganizationField,
    pub direction: SortDirection,
    pub priority: u32,
}

impl SortTerm {
    pub fn new(field: OrganizationField, direction: SortDirection, priority: u32) -> Self {
        Self {
            field,
            direction,
            priority,
        }
    }
}

/// Parses `"field"` or `"-field"` (descending), the notation used on the command line.
impl FromStr for SortTerm {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (field, direction) = match s.strip_prefix('-') {
            Some(stripped) => (stripped, SortDirection::Desc),
            None => (s, SortDirection::Asc),
        };

        Ok(SortTerm::new(field.parse()?, direction, 1))
    }
}

/// Multi-column sort state driven by column header clicks.
///
/// Holds at most one term per field and keeps priorities a contiguous `1..=N`.
/// Terms are stored ordered by ascending priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    terms: Vec<SortTerm>,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            terms: vec![SortTerm::new(OrganizationField::Id, SortDirection::Asc, 1)],
        }
    }
}

impl SortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn terms(&self) -> &[SortTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, field: OrganizationField) -> Option<&SortTerm> {
        self.terms.iter().find(|term| term.field == field)
    }

    /// Applies a header click on `field`.
    ///
    /// A plain click on a sorted field flips its direction and makes it the primary
    /// key; on an unsorted field it replaces the whole spec. A multi-sort click flips
    /// a sorted field in place, or appends the field after the lowest-priority term.
    pub fn handle_click(&mut self, field: OrganizationField, multi_sort: bool) {
        match self.terms.iter().position(|term| term.field == field) {
            Some(position) => {
                let direction = self.terms[position].direction.toggled();
                self.terms[position].direction = direction;

                if !multi_sort {
                    let term = self.terms.remove(position);
                    self.terms.insert(0, term);
                    self.renumber();
                }
            }
            None if multi_sort => {
                let priority = self
                    .terms
                    .iter()
                    .map(|term| term.priority)
                    .max()
                    .map_or(1, |max| max + 1);
                self.terms
                    .push(SortTerm::new(field, SortDirection::Asc, priority));
            }
            None => {
                self.terms = vec![SortTerm::new(field, SortDirection::Asc, 1)];
            }
        }

        self.terms.sort_by_key(|term| term.priority);
    }

    /// Resets to the default `id asc` ordering.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn renumber(&mut self) {
        for (index, term) in self.terms.iter_mut().enumerate() {
            term.priority = index as u32 + 1;
        }
    }
}
