//! A mini help view rendered from a [`KeyMap`](crate::key::KeyMap).
//!
//! The model renders either a single-line summary of the essential bindings
//! or an expanded multi-column view of all of them, with adaptive styling
//! for light and dark terminals. Disabled bindings are skipped, and when a
//! width is set both views truncate with an ellipsis rather than wrap.

use crate::key::{Binding, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styling for the help views.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style for the truncation ellipsis.
    pub ellipsis: Style,
    /// Key style in the short view.
    pub short_key: Style,
    /// Description style in the short view.
    pub short_desc: Style,
    /// Separator style in the short view.
    pub short_separator: Style,
    /// Key style in the full view.
    pub full_key: Style,
    /// Description style in the full view.
    pub full_desc: Style,
    /// Separator style in the full view.
    pub full_separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });
        Self {
            ellipsis: sep_style.clone(),
            short_key: key_style.clone(),
            short_desc: desc_style.clone(),
            short_separator: sep_style.clone(),
            full_key: key_style,
            full_desc: desc_style,
            full_separator: sep_style,
        }
    }
}

/// The help model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Whether to render the expanded multi-column view.
    pub show_all: bool,
    /// Maximum render width; `0` means unconstrained.
    pub width: usize,
    /// Separator between items in the short view.
    pub short_separator: String,
    /// Separator between columns in the full view.
    pub full_separator: String,
    /// Marker appended when the short view is truncated.
    pub ellipsis: String,
    /// Styling for both views.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help model with default separators and styling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum render width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders help for a key map, honoring `show_all`.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(&keymap.full_help())
        } else {
            self.short_help_view(&keymap.short_help())
        }
    }

    /// Renders a single-line help summary of the given bindings.
    pub fn short_help_view(&self, bindings: &[&Binding]) -> String {
        if bindings.is_empty() {
            return String::new();
        }

        let mut view = String::new();
        let mut total_width = 0;
        let separator = self
            .styles
            .short_separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        for (i, binding) in bindings.iter().filter(|b| b.enabled()).enumerate() {
            let sep = if i > 0 { separator.as_str() } else { "" };
            let item = format!(
                "{}{} {}",
                sep,
                self.styles
                    .short_key
                    .clone()
                    .inline(true)
                    .render(&binding.help().key),
                self.styles
                    .short_desc
                    .clone()
                    .inline(true)
                    .render(&binding.help().desc),
            );

            let item_width = lipgloss::width_visible(&item);
            if let Some(tail) = self.should_add_item(total_width, item_width) {
                view.push_str(&tail);
                break;
            }

            total_width += item_width;
            view.push_str(&item);
        }

        view
    }

    /// Renders the expanded help view: one column per binding group, each
    /// row a key beside its description. Columns that would overflow the
    /// width are dropped for the truncation tail, like the short view's
    /// items.
    pub fn full_help_view(&self, groups: &[Vec<&Binding>]) -> String {
        if groups.is_empty() {
            return String::new();
        }

        let mut columns: Vec<String> = Vec::new();
        let mut total_width = 0;
        let separator = self
            .styles
            .full_separator
            .clone()
            .inline(true)
            .render(&self.full_separator);

        for group in groups {
            if !group.iter().any(|b| b.enabled()) {
                continue;
            }

            // Each row carries its own "key desc" space; block padding
            // would swallow it on the group's widest key.
            let rows: Vec<String> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|binding| {
                    format!(
                        "{} {}",
                        self.styles
                            .full_key
                            .clone()
                            .inline(true)
                            .render(&binding.help().key),
                        self.styles
                            .full_desc
                            .clone()
                            .inline(true)
                            .render(&binding.help().desc),
                    )
                })
                .collect();
            let column = rows.join("\n");

            let column_width = lipgloss::width_visible(&column);
            if let Some(tail) = self.should_add_item(total_width, column_width) {
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }

            total_width += column_width;
            columns.push(column);
        }

        let mut parts: Vec<&str> = Vec::with_capacity(columns.len() * 2);
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(separator.as_str());
            }
            parts.push(column.as_str());
        }

        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    /// Decides whether the next item still fits. Returns the truncation tail
    /// to append instead when it does not.
    fn should_add_item(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width > 0 && total_width + item_width > self.width {
            let tail = format!(
                " {}",
                self.styles
                    .ellipsis
                    .clone()
                    .inline(true)
                    .render(&self.ellipsis)
            );
            if total_width + lipgloss::width_visible(&tail) < self.width {
                return Some(tail);
            }
            return Some(String::new());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{new_binding, with_help, with_keys_str};
    use lipgloss_extras::lipgloss::strip_ansi;

    struct TestMap {
        start: Binding,
        adjust: Binding,
    }

    impl TestMap {
        fn new() -> Self {
            Self {
                start: new_binding(vec![with_keys_str(&["enter"]), with_help("enter", "start")]),
                adjust: new_binding(vec![
                    with_keys_str(&["up", "down"]),
                    with_help("↑/↓", "adjust"),
                ]),
            }
        }
    }

    impl KeyMap for TestMap {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.start, &self.adjust]
        }

        fn full_help(&self) -> Vec<Vec<&Binding>> {
            vec![vec![&self.start], vec![&self.adjust]]
        }
    }

    #[test]
    fn test_short_view_lists_enabled_bindings() {
        let help = Model::new();
        let out = strip_ansi(&help.view(&TestMap::new()));
        assert!(out.contains("enter start"));
        assert!(out.contains("↑/↓ adjust"));
        assert!(out.contains(" • "));
    }

    #[test]
    fn test_short_view_skips_disabled_bindings() {
        let mut map = TestMap::new();
        map.adjust.set_enabled(false);
        let out = strip_ansi(&Model::new().view(&map));
        assert!(out.contains("enter start"));
        assert!(!out.contains("adjust"));
    }

    #[test]
    fn test_short_view_truncates_at_width() {
        let help = Model::new().with_width(14);
        let out = strip_ansi(&help.view(&TestMap::new()));
        assert!(out.contains("enter start"));
        assert!(out.contains("…"));
        assert!(!out.contains("adjust"));
    }

    #[test]
    fn test_full_view_renders_columns() {
        let mut help = Model::new();
        help.show_all = true;
        let out = strip_ansi(&help.view(&TestMap::new()));
        assert!(out.contains("enter"));
        assert!(out.contains("start"));
        assert!(out.contains("adjust"));
    }

    struct NavMap {
        next: Binding,
        prev: Binding,
        start: Binding,
    }

    impl NavMap {
        fn new() -> Self {
            Self {
                next: new_binding(vec![with_keys_str(&["tab"]), with_help("tab", "next field")]),
                prev: new_binding(vec![
                    with_keys_str(&["shift+tab"]),
                    with_help("shift+tab", "prev field"),
                ]),
                start: new_binding(vec![
                    with_keys_str(&["enter"]),
                    with_help("enter", "start/stop"),
                ]),
            }
        }
    }

    impl KeyMap for NavMap {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.next, &self.start]
        }

        fn full_help(&self) -> Vec<Vec<&Binding>> {
            vec![vec![&self.next, &self.prev], vec![&self.start]]
        }
    }

    #[test]
    fn test_full_view_keeps_space_between_key_and_desc() {
        // The widest key in a group gets no column padding, so the space
        // has to survive inside the row itself.
        let map = NavMap::new();
        let out = strip_ansi(&Model::new().full_help_view(&map.full_help()));

        assert!(out.contains("tab next field"));
        assert!(out.contains("shift+tab prev field"));
        assert!(out.contains("enter start/stop"));
    }

    #[test]
    fn test_full_view_truncates_at_width() {
        let map = NavMap::new();
        let help = Model::new().with_width(30);
        let out = strip_ansi(&help.full_help_view(&map.full_help()));

        assert!(out.contains("shift+tab prev field"));
        assert!(out.contains("…"));
        assert!(!out.contains("start/stop")); // Second column dropped
    }

    #[test]
    fn test_empty_keymap_renders_nothing() {
        struct Empty;
        impl KeyMap for Empty {
            fn short_help(&self) -> Vec<&Binding> {
                Vec::new()
            }
            fn full_help(&self) -> Vec<Vec<&Binding>> {
                Vec::new()
            }
        }
        assert_eq!(Model::new().view(&Empty), "");
        let mut help = Model::new();
        help.show_all = true;
        assert_eq!(help.view(&Empty), "");
    }
}
