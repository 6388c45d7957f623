//! Style markup parser: `[text](fg:red,bg:blue,mod:bold)` to styled cells.
//!
//! A three-state machine. Malformed markup never fails; the buffered
//! characters are replayed as plain text in the default style and parsing
//! resumes at the character that broke the span.

use crate::buffer::Cell;
use crate::style::{Color, Modifier, Style};
use std::collections::HashMap;
use std::sync::LazyLock;

const KEY_FG: &str = "fg";
const KEY_BG: &str = "bg";
const KEY_MODIFIER: &str = "mod";

const ITEM_SEPARATOR: char = ',';
const VALUE_SEPARATOR: char = ':';

const BEGIN_TEXT: char = '[';
const END_TEXT: char = ']';
const BEGIN_STYLE: char = '(';
const END_STYLE: char = ')';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    StyledText,
    StyleItems,
}

/// Color and modifier vocabulary used to resolve style specs.
///
/// Names are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct StyleParser {
    colors: HashMap<String, Color>,
    modifiers: HashMap<String, Modifier>,
}

static DEFAULT_PARSER: LazyLock<StyleParser> = LazyLock::new(StyleParser::new);

impl StyleParser {
    /// Parser knowing the eight named colors, `clear`, and the standard modifiers.
    pub fn new() -> Self {
        let colors = [
            ("black", Color::BLACK),
            ("red", Color::RED),
            ("green", Color::GREEN),
            ("yellow", Color::YELLOW),
            ("blue", Color::BLUE),
            ("magenta", Color::MAGENTA),
            ("cyan", Color::CYAN),
            ("white", Color::WHITE),
            ("clear", Color::Clear),
        ];
        let modifiers = [
            ("bold", Modifier::BOLD),
            ("underline", Modifier::UNDERLINE),
            ("reverse", Modifier::REVERSED),
            ("dim", Modifier::DIM),
            ("italic", Modifier::ITALIC),
            ("blink", Modifier::BLINK),
            ("hidden", Modifier::HIDDEN),
            ("strikethrough", Modifier::STRIKETHROUGH),
        ];
        Self {
            colors: colors.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            modifiers: modifiers.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    /// Add or replace a color name.
    pub fn register_color(&mut self, name: &str, color: Color) {
        self.colors.insert(name.to_lowercase(), color);
    }

    /// Add or replace a modifier name.
    pub fn register_modifier(&mut self, name: &str, modifier: Modifier) {
        self.modifiers.insert(name.to_lowercase(), modifier);
    }

    /// Resolve a color name.
    pub fn color(&self, name: &str) -> Option<Color> {
        self.colors.get(&name.to_lowercase()).copied()
    }

    /// Resolve a modifier name.
    pub fn modifier(&self, name: &str) -> Option<Modifier> {
        self.modifiers.get(&name.to_lowercase()).copied()
    }

    /// Apply a `key:value,...` spec on top of `base`.
    ///
    /// Items that are not exactly `key:value`, unknown keys and unknown
    /// names are skipped.
    pub fn parse_style_string(&self, spec: &str, base: Style) -> Style {
        let mut style = base;
        for item in spec.split(ITEM_SEPARATOR) {
            let parts: Vec<&str> = item.trim().split(VALUE_SEPARATOR).collect();
            let [key, value] = parts.as_slice() else {
                continue;
            };
            match key.trim() {
                KEY_FG => {
                    if let Some(color) = self.color(value.trim()) {
                        style.fg = color;
                    }
                }
                KEY_BG => {
                    if let Some(color) = self.color(value.trim()) {
                        style.bg = color;
                    }
                }
                KEY_MODIFIER => {
                    if let Some(modifier) = self.modifier(value.trim()) {
                        style.modifier = modifier;
                    }
                }
                _ => {}
            }
        }
        style
    }

    /// Convert marked-up text into cells, one per input character that is
    /// not part of a well-formed span's delimiters.
    pub fn parse(&self, text: &str, default: Style) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(text.len());
        let mut state = State::Default;
        let mut styled_text: Vec<char> = Vec::new();
        let mut style_items: Vec<char> = Vec::new();
        let mut depth = 0usize;

        let rollback = |cells: &mut Vec<Cell>, styled_text: &mut Vec<char>, style_items: &mut Vec<char>| {
            cells.extend(
                styled_text
                    .drain(..)
                    .chain(style_items.drain(..))
                    .map(|ch| Cell::styled(ch, default)),
            );
        };

        for ch in text.chars() {
            match state {
                State::Default => {
                    if ch == BEGIN_TEXT {
                        state = State::StyledText;
                        depth = 1;
                        styled_text.push(ch);
                    } else {
                        cells.push(Cell::styled(ch, default));
                    }
                }
                State::StyledText if depth == 0 => {
                    if ch == BEGIN_STYLE {
                        state = State::StyleItems;
                        style_items.push(ch);
                    } else {
                        rollback(&mut cells, &mut styled_text, &mut style_items);
                        if ch == BEGIN_TEXT {
                            depth = 1;
                            styled_text.push(ch);
                        } else {
                            state = State::Default;
                            cells.push(Cell::styled(ch, default));
                        }
                    }
                }
                State::StyledText => {
                    match ch {
                        BEGIN_TEXT => depth += 1,
                        END_TEXT => depth -= 1,
                        _ => {}
                    }
                    styled_text.push(ch);
                }
                State::StyleItems => {
                    style_items.push(ch);
                    if ch == END_STYLE {
                        let spec: String = chop(&style_items).iter().collect();
                        let style = self.parse_style_string(&spec, default);
                        cells.extend(chop(&styled_text).iter().map(|&c| Cell::styled(c, style)));
                        styled_text.clear();
                        style_items.clear();
                        state = State::Default;
                    }
                }
            }
        }

        if state != State::Default {
            rollback(&mut cells, &mut styled_text, &mut style_items);
        }

        cells
    }
}

impl Default for StyleParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip the first and last delimiter.
fn chop(chars: &[char]) -> &[char] {
    if chars.len() < 2 {
        return chars;
    }
    &chars[1..chars.len() - 1]
}

/// Parse with the built-in color and modifier names.
pub fn parse_styles(text: &str, default: Style) -> Vec<Cell> {
    DEFAULT_PARSER.parse(text, default)
}

/// Apply a `key:value,...` spec with the built-in names.
pub fn parse_style_string(spec: &str, base: Style) -> Style {
    DEFAULT_PARSER.parse_style_string(spec, base)
}

/// Cheap check for anything that could be a markup span.
pub fn has_markup(text: &str) -> bool {
    [BEGIN_TEXT, END_TEXT, BEGIN_STYLE, END_STYLE]
        .iter()
        .all(|delim| text.contains(*delim))
}

/// The visible text: span bodies without their delimiters, malformed
/// spans verbatim.
pub fn strip_markup(text: &str) -> String {
    parse_styles(text, Style::CLEAR).iter().map(|c| c.ch).collect()
}
