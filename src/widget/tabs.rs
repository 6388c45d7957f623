//! Tab bar.

use super::text::trim_string;
use super::{block_drawable, Block};
use crate::buffer::{Buffer, Cell};
use crate::layout::Point;
use crate::style::{symbols, Color, Style, Theme};
use unicode_width::UnicodeWidthStr;

/// A row of tab names separated by `│`, one of them active.
#[derive(Debug, Clone)]
pub struct Tabs {
    /// Chrome and geometry.
    pub block: Block,
    /// Tab names, left to right.
    pub names: Vec<String>,
    /// Index of the active tab.
    pub active: usize,
    /// Style of the active tab.
    pub active_style: Style,
    /// Style of the other tabs.
    pub inactive_style: Style,
}

impl Tabs {
    /// Tab bar over `names`, styled from `theme`.
    pub fn new<S: Into<String>>(theme: &Theme, names: impl IntoIterator<Item = S>) -> Self {
        Self {
            block: Block::new(theme),
            names: names.into_iter().map(Into::into).collect(),
            active: 0,
            active_style: theme.tab.active,
            inactive_style: theme.tab.inactive,
        }
    }

    /// Activate the tab to the left, if any.
    pub fn focus_left(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    /// Activate the tab to the right, if any.
    pub fn focus_right(&mut self) {
        if self.active + 1 < self.names.len() {
            self.active += 1;
        }
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let inner = self.block.inner();
        let (min, lim) = (inner.min(), inner.max());
        let separator = Cell::styled(symbols::VERTICAL_LINE, Style::new(Color::WHITE));
        let mut x = min.x;

        for (i, name) in self.names.iter().enumerate() {
            if x >= lim.x {
                break;
            }
            let style = if i == self.active {
                self.active_style
            } else {
                self.inactive_style
            };
            let room = (lim.x - x) as usize;
            buffer.set_string(&trim_string(name, room), style, Point::new(x, min.y));

            x += 1 + name.width() as i32;
            if i + 1 < self.names.len() && x < lim.x {
                buffer.set_cell(Point::new(x, min.y), separator);
            }
            x += 2;
        }
    }
}

impl Default for Tabs {
    fn default() -> Self {
        Self::new(&Theme::default(), Vec::<String>::new())
    }
}

block_drawable!(Tabs);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::{render, row};
    use pretty_assertions::assert_eq;

    fn tabs() -> Tabs {
        let mut tabs = Tabs::new(&Theme::dark(), ["cpu", "mem", "disk"]);
        tabs.block = Block::plain();
        tabs
    }

    #[test]
    fn test_names_and_separators() {
        let mut tabs = tabs();
        let buffer = render(&mut tabs, 18, 1);
        assert_eq!(row(&buffer, 0), "cpu │ mem │ disk  ");
    }

    #[test]
    fn test_active_style() {
        let mut tabs = tabs();
        tabs.active = 1;
        let buffer = render(&mut tabs, 18, 1);
        let style_at = |x| buffer.get(Point::new(x, 0)).map(|c| c.style);
        assert_eq!(style_at(6), Some(tabs.active_style));
        assert_eq!(style_at(0), Some(tabs.inactive_style));
    }

    #[test]
    fn test_focus_clamped() {
        let mut tabs = tabs();
        tabs.focus_left();
        assert_eq!(tabs.active, 0);
        tabs.focus_right();
        tabs.focus_right();
        tabs.focus_right();
        assert_eq!(tabs.active, 2);
    }

    #[test]
    fn test_last_tab_trimmed() {
        let mut tabs = tabs();
        let buffer = render(&mut tabs, 14, 1);
        assert_eq!(row(&buffer, 0), "cpu │ mem │ d…");
    }
}
