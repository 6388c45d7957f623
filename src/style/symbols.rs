//! Glyphs used by the widgets.

/// Plot marker.
pub const DOT: char = '•';
/// Truncation marker.
pub const ELLIPSIS: char = '…';
/// More rows above.
pub const UP_ARROW: char = '▲';
/// More rows below.
pub const DOWN_ARROW: char = '▼';
/// Tree node with hidden children.
pub const COLLAPSED: char = '+';
/// Tree node with visible children.
pub const EXPANDED: char = '−';

/// Eighth-block ramp, index = filled eighths.
pub const BARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
/// Shading ramp from empty to full.
pub const SHADED_BLOCKS: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Horizontal rule.
pub const HORIZONTAL_LINE: char = '─';
/// Vertical rule.
pub const VERTICAL_LINE: char = '│';
/// Lower-left corner used for plot axes.
pub const BOTTOM_LEFT: char = '└';

/// Glyphs for one border flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    /// Top-left corner.
    pub top_left: char,
    /// Top-right corner.
    pub top_right: char,
    /// Bottom-left corner.
    pub bottom_left: char,
    /// Bottom-right corner.
    pub bottom_right: char,
    /// Left and right edges.
    pub vertical: char,
    /// Top and bottom edges.
    pub horizontal: char,
}

/// `┌─┐` box drawing.
pub const SINGLE: BorderSet = BorderSet {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    vertical: '│',
    horizontal: '─',
};

/// `╔═╗` box drawing.
pub const DOUBLE: BorderSet = BorderSet {
    top_left: '╔',
    top_right: '╗',
    bottom_left: '╚',
    bottom_right: '╝',
    vertical: '║',
    horizontal: '═',
};

/// `╭─╮` box drawing.
pub const ROUNDED: BorderSet = BorderSet {
    top_left: '╭',
    top_right: '╮',
    bottom_left: '╰',
    bottom_right: '╯',
    vertical: '│',
    horizontal: '─',
};
