//! Grid configuration.
//!
//! [`Options`] is the immutable record a grid is built with. Host-facing
//! configuration arrives as [`OptionOverrides`] (every field optional,
//! deserializable) and is folded over the defaults with [`Options::merged`].
//! Callbacks are attached with builder methods and never deserialized.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use splitdom::Color;

use crate::error::OptionsError;
use crate::sort::SortType;
use crate::source::SourceType;

pub use crate::sort::{SortCleaner, SortValue};

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// `(new_to_old_mapping, sorted_column, previous_sorted_column)`
pub type SortCallback = Rc<dyn Fn(&[usize], usize, Option<usize>)>;
/// `(width, height)`
pub type GridResizeCallback = Rc<dyn Fn(u32, u32)>;
/// `(column, width)`
pub type ColumnResizeCallback = Rc<dyn Fn(usize, u32)>;
/// `(added, removed, origin_row)`
pub type RowSelectCallback = Rc<dyn Fn(&[usize], &[usize], Option<usize>)>;
pub type LoadCallback = Rc<dyn Fn()>;

/// Host callbacks. Each is optional.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub on_column_sort: Option<SortCallback>,
    pub on_resize_grid: Option<GridResizeCallback>,
    pub on_resize_grid_end: Option<GridResizeCallback>,
    pub on_resize_column: Option<ColumnResizeCallback>,
    pub on_resize_column_end: Option<ColumnResizeCallback>,
    pub on_row_select: Option<RowSelectCallback>,
    pub on_load: Option<LoadCallback>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_column_sort", &self.on_column_sort.is_some())
            .field("on_resize_grid", &self.on_resize_grid.is_some())
            .field("on_resize_grid_end", &self.on_resize_grid_end.is_some())
            .field("on_resize_column", &self.on_resize_column.is_some())
            .field("on_resize_column_end", &self.on_resize_column_end.is_some())
            .field("on_row_select", &self.on_row_select.is_some())
            .field("on_load", &self.on_load.is_some())
            .finish()
    }
}

/// Resolved style and sort settings for one rendered column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSettings {
    pub align: Alignment,
    pub background: Option<Color>,
    pub sort_type: SortType,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub source_type: SourceType,
    pub allow_grid_resize: bool,
    pub allow_column_resize: bool,
    pub allow_client_sort: bool,
    pub allow_selection: bool,
    pub allow_multiple_selection: bool,
    pub show_selection_column: bool,
    /// Per data column; missing entries default to left.
    pub column_align: Vec<Alignment>,
    /// Per data column; missing entries have no background.
    pub column_background: Vec<Option<Color>>,
    /// Per data column; missing entries default to `string`.
    pub column_sort_types: Vec<SortType>,
    pub fixed_columns: usize,
    pub selected_background: Color,
    pub selected_background_fixed: Color,
    /// Cap on memoized sort values; `None` keeps every value.
    pub sort_cache_limit: Option<usize>,
    pub sort_cleaner: Option<SortCleaner>,
    pub callbacks: Callbacks,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source_type: SourceType::Table,
            allow_grid_resize: false,
            allow_column_resize: false,
            allow_client_sort: false,
            allow_selection: false,
            allow_multiple_selection: false,
            show_selection_column: false,
            column_align: Vec::new(),
            column_background: Vec::new(),
            column_sort_types: Vec::new(),
            fixed_columns: 0,
            selected_background: Color::hex(0xEAF1F7),
            selected_background_fixed: Color::hex(0xDCE7F0),
            sort_cache_limit: None,
            sort_cleaner: None,
            callbacks: Callbacks::default(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multi-selection only applies while selection is allowed at all.
    pub fn multi_selection(&self) -> bool {
        self.allow_selection && self.allow_multiple_selection
    }

    /// Check settings that cannot be honored as given.
    ///
    /// A `custom` sort type without a cleaner compares raw text.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.sort_cleaner.is_none()
            && let Some(column) = self
                .column_sort_types
                .iter()
                .position(|t| *t == SortType::Custom)
        {
            return Err(OptionsError::MissingCleaner { column });
        }
        Ok(())
    }

    /// Fold `overrides` over `self` without mutating it.
    ///
    /// This is the soft validation step: values that cannot be honored keep
    /// the value from `self` and are logged. Use [`OptionOverrides::validate`]
    /// to reject them instead.
    pub fn merged(&self, overrides: &OptionOverrides) -> Options {
        let mut out = self.clone();
        let o = overrides;

        macro_rules! take {
            ($field:ident) => {
                if let Some(value) = &o.$field {
                    out.$field = value.clone();
                }
            };
        }
        take!(source_type);
        take!(allow_grid_resize);
        take!(allow_column_resize);
        take!(allow_client_sort);
        take!(allow_selection);
        take!(allow_multiple_selection);
        take!(show_selection_column);
        take!(column_align);
        take!(column_sort_types);
        take!(fixed_columns);

        if let Some(limit) = o.sort_cache_limit {
            out.sort_cache_limit = Some(limit);
        }

        if let Some(colors) = &o.column_background {
            out.column_background = colors
                .iter()
                .map(|c| {
                    c.as_deref().and_then(|value| match Color::parse(value) {
                        Ok(color) => Some(color),
                        Err(e) => {
                            log::warn!("[options] {}", OptionsError::color("columnBackground", e));
                            None
                        }
                    })
                })
                .collect();
        }

        for (name, value, target) in [
            (
                "selectedBackground",
                &o.selected_background,
                &mut out.selected_background,
            ),
            (
                "selectedBackgroundFixed",
                &o.selected_background_fixed,
                &mut out.selected_background_fixed,
            ),
        ] {
            if let Some(value) = value {
                match Color::parse(value) {
                    Ok(color) => *target = color,
                    Err(e) => log::warn!("[options] {}", OptionsError::color(name, e)),
                }
            }
        }

        out
    }

    /// Settings for every rendered column.
    ///
    /// With a selection column, data column settings shift right by one. The
    /// selection column is left aligned, unsortable, and shares the first
    /// data column's background.
    pub fn column_settings(&self, columns: usize, selection_column: bool) -> Vec<ColumnSettings> {
        let offset = usize::from(selection_column);
        (0..columns)
            .map(|c| {
                if selection_column && c == 0 {
                    return ColumnSettings {
                        align: Alignment::Left,
                        background: self.column_background.first().cloned().flatten(),
                        sort_type: SortType::None,
                    };
                }
                let d = c - offset;
                ColumnSettings {
                    align: self.column_align.get(d).copied().unwrap_or_default(),
                    background: self.column_background.get(d).cloned().flatten(),
                    sort_type: self.column_sort_types.get(d).copied().unwrap_or_default(),
                }
            })
            .collect()
    }

    pub fn sort_cleaner(mut self, cleaner: SortCleaner) -> Self {
        self.sort_cleaner = Some(cleaner);
        self
    }

    pub fn on_column_sort(mut self, f: impl Fn(&[usize], usize, Option<usize>) + 'static) -> Self {
        self.callbacks.on_column_sort = Some(Rc::new(f));
        self
    }

    pub fn on_resize_grid(mut self, f: impl Fn(u32, u32) + 'static) -> Self {
        self.callbacks.on_resize_grid = Some(Rc::new(f));
        self
    }

    pub fn on_resize_grid_end(mut self, f: impl Fn(u32, u32) + 'static) -> Self {
        self.callbacks.on_resize_grid_end = Some(Rc::new(f));
        self
    }

    pub fn on_resize_column(mut self, f: impl Fn(usize, u32) + 'static) -> Self {
        self.callbacks.on_resize_column = Some(Rc::new(f));
        self
    }

    pub fn on_resize_column_end(mut self, f: impl Fn(usize, u32) + 'static) -> Self {
        self.callbacks.on_resize_column_end = Some(Rc::new(f));
        self
    }

    pub fn on_row_select(
        mut self,
        f: impl Fn(&[usize], &[usize], Option<usize>) + 'static,
    ) -> Self {
        self.callbacks.on_row_select = Some(Rc::new(f));
        self
    }

    pub fn on_load(mut self, f: impl Fn() + 'static) -> Self {
        self.callbacks.on_load = Some(Rc::new(f));
        self
    }
}

/// Host-provided option values. Absent fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionOverrides {
    pub source_type: Option<SourceType>,
    pub allow_grid_resize: Option<bool>,
    pub allow_column_resize: Option<bool>,
    pub allow_client_sort: Option<bool>,
    pub allow_selection: Option<bool>,
    pub allow_multiple_selection: Option<bool>,
    pub show_selection_column: Option<bool>,
    pub column_align: Option<Vec<Alignment>>,
    pub column_background: Option<Vec<Option<String>>>,
    pub column_sort_types: Option<Vec<SortType>>,
    pub fixed_columns: Option<usize>,
    pub selected_background: Option<String>,
    pub selected_background_fixed: Option<String>,
    pub sort_cache_limit: Option<usize>,
}

impl OptionOverrides {
    /// Reject values that [`Options::merged`] would otherwise skip.
    pub fn validate(&self) -> Result<(), OptionsError> {
        for value in self.column_background.iter().flatten().flatten() {
            Color::parse(value).map_err(|e| OptionsError::color("columnBackground", e))?;
        }
        if let Some(value) = &self.selected_background {
            Color::parse(value).map_err(|e| OptionsError::color("selectedBackground", e))?;
        }
        if let Some(value) = &self.selected_background_fixed {
            Color::parse(value).map_err(|e| OptionsError::color("selectedBackgroundFixed", e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unset_defaults() {
        let base = Options::default();
        let merged = base.merged(&OptionOverrides {
            fixed_columns: Some(2),
            ..Default::default()
        });
        assert_eq!(merged.fixed_columns, 2);
        assert!(!merged.allow_client_sort);
        assert!(!merged.allow_selection);
        assert!(!merged.allow_multiple_selection);
        assert_eq!(merged.selected_background, Color::hex(0xEAF1F7));
        assert_eq!(merged.selected_background_fixed, Color::hex(0xDCE7F0));
        assert_eq!(base.fixed_columns, 0);
    }

    #[test]
    fn test_multi_selection_needs_selection() {
        let options = Options {
            allow_multiple_selection: true,
            ..Default::default()
        };
        assert!(!options.multi_selection());
        let options = Options {
            allow_selection: true,
            ..options
        };
        assert!(options.multi_selection());
    }

    #[test]
    fn test_validate_custom_type_needs_cleaner() {
        let options = Options {
            column_sort_types: vec![SortType::String, SortType::Custom],
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(OptionsError::MissingCleaner { column: 1 })
        );
        let options = options.sort_cleaner(SortCleaner::new(|raw, _| SortValue::from(raw)));
        assert_eq!(options.validate(), Ok(()));
    }

    #[test]
    fn test_merge_skips_invalid_colors() {
        let merged = Options::default().merged(&OptionOverrides {
            selected_background: Some("nope".into()),
            selected_background_fixed: Some("#102030".into()),
            column_background: Some(vec![Some("#fff".into()), Some("bad".into()), None]),
            ..Default::default()
        });
        assert_eq!(merged.selected_background, Color::hex(0xEAF1F7));
        assert_eq!(merged.selected_background_fixed, Color::hex(0x102030));
        assert_eq!(
            merged.column_background,
            vec![Some(Color::rgb(255, 255, 255)), None, None]
        );
    }

    #[test]
    fn test_validate_reports_bad_color() {
        let overrides = OptionOverrides {
            selected_background: Some("nope".into()),
            ..Default::default()
        };
        assert!(matches!(
            overrides.validate(),
            Err(OptionsError::Color { option: "selectedBackground", .. })
        ));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let overrides: OptionOverrides = serde_json::from_str(
            r##"{"sourceType": "json", "columnSortTypes": ["string", "number", "weird"],
                "allowMultipleSelection": false}"##,
        )
        .unwrap();
        assert_eq!(overrides.source_type, Some(SourceType::Object));
        assert_eq!(
            overrides.column_sort_types,
            Some(vec![SortType::String, SortType::Number, SortType::Other])
        );
        assert_eq!(overrides.allow_multiple_selection, Some(false));
    }

    #[test]
    fn test_column_settings_shift_for_selection_column() {
        let options = Options {
            column_align: vec![Alignment::Right],
            column_background: vec![Some(Color::hex(0x336699))],
            column_sort_types: vec![SortType::Number],
            ..Default::default()
        };
        let settings = options.column_settings(3, true);
        assert_eq!(settings[0].sort_type, SortType::None);
        assert_eq!(settings[0].align, Alignment::Left);
        assert_eq!(settings[0].background, Some(Color::hex(0x336699)));
        assert_eq!(settings[1].background, Some(Color::hex(0x336699)));
        assert_eq!(settings[2].background, None);
        assert_eq!(settings[1].align, Alignment::Right);
        assert_eq!(settings[1].sort_type, SortType::Number);
        assert_eq!(settings[2].sort_type, SortType::String);
    }
}
