//! Client-side sorting of body rows.
//!
//! Rows are reordered in place with a stable sort. Each pass records the
//! pre-sort position of every row so callers can remap anything that refers
//! to row positions, such as the current selection.

mod coerce;

pub use coerce::{SortCleaner, SortType, SortValue, SortValueCache, parse_number, parse_timestamp};

use crate::model::RawRow;

/// The most recent sort applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub ascending: bool,
}

/// A sort to run against the body rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortRequest {
    /// Rendered column index.
    pub column: usize,
    /// Index of the column within each raw row.
    pub data_column: usize,
    pub sort_type: SortType,
    pub ascending: bool,
}

/// Result of a completed sort pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    /// `mapping[new_position] == old_position`.
    pub mapping: Vec<usize>,
    pub column: usize,
    pub ascending: bool,
    /// Column of the sort before this one.
    pub previous: Option<usize>,
}

#[derive(Debug, Default)]
pub struct SortEngine {
    state: Option<SortState>,
    cache: SortValueCache,
}

impl SortEngine {
    pub fn new(cache_limit: Option<usize>) -> Self {
        Self {
            state: None,
            cache: SortValueCache::new(cache_limit),
        }
    }

    pub fn state(&self) -> Option<SortState> {
        self.state
    }

    pub fn cache(&self) -> &SortValueCache {
        &self.cache
    }

    /// Direction for a sort on `column`.
    ///
    /// An explicit direction wins. Otherwise re-sorting the last sorted
    /// column flips its direction and any other column starts ascending.
    pub fn resolve_direction(&self, column: usize, explicit: Option<bool>) -> bool {
        explicit.unwrap_or(match self.state {
            Some(state) if state.column == column => !state.ascending,
            _ => true,
        })
    }

    /// Sort `rows` in place. Returns `None` for unsortable columns.
    pub fn sort(
        &mut self,
        rows: &mut Vec<RawRow>,
        request: SortRequest,
        cleaner: Option<&SortCleaner>,
    ) -> Option<SortOutcome> {
        if request.sort_type == SortType::None {
            log::debug!("[sort] column {} is not sortable", request.column);
            return None;
        }

        let cache = &mut self.cache;
        let mut indexed: Vec<(usize, RawRow)> = rows.drain(..).enumerate().collect();
        indexed.sort_by(|(_, a), (_, b)| {
            let left = a.get(request.data_column).map(String::as_str).unwrap_or("");
            let right = b.get(request.data_column).map(String::as_str).unwrap_or("");
            let ordering = cache.compare(request.sort_type, left, right, request.column, cleaner);
            if request.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

        let mapping: Vec<usize> = indexed.iter().map(|(origin, _)| *origin).collect();
        rows.extend(indexed.into_iter().map(|(_, row)| row));

        let previous = self.state.map(|s| s.column);
        self.state = Some(SortState {
            column: request.column,
            ascending: request.ascending,
        });
        log::debug!(
            "[sort] column {} {} over {} rows",
            request.column,
            if request.ascending { "asc" } else { "desc" },
            mapping.len()
        );

        Some(SortOutcome {
            mapping,
            column: request.column,
            ascending: request.ascending,
            previous,
        })
    }
}

/// Map row positions through a sort: `mapping[new] == old`.
///
/// Positions that are out of range for the mapping are dropped.
pub fn remap_positions(positions: &[usize], mapping: &[usize]) -> Vec<usize> {
    let mut old_to_new = vec![usize::MAX; mapping.len()];
    for (new, &old) in mapping.iter().enumerate() {
        if let Some(slot) = old_to_new.get_mut(old) {
            *slot = new;
        }
    }
    positions
        .iter()
        .filter_map(|&old| old_to_new.get(old).copied().filter(|n| *n != usize::MAX))
        .collect()
}
