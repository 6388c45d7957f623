//! Collapsible tree view.

use super::scroll::draw_rows;
use super::text::wrap_cells;
use super::{block_drawable, Block, ScrollState};
use crate::buffer::{Buffer, Cell};
use crate::markup::parse_styles;
use crate::style::{Style, Theme};

const INDENT: &str = "  ";

/// A tree node: display text plus ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeNode {
    /// Row text, may contain markup.
    pub value: String,
    /// Whether children are shown.
    pub expanded: bool,
    /// Child nodes, in display order.
    pub nodes: Vec<TreeNode>,
}

impl TreeNode {
    /// Leaf node.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expanded: false,
            nodes: Vec::new(),
        }
    }

    /// Builder: set the children.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<TreeNode>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Builder: start expanded.
    #[must_use]
    pub fn expanded(mut self) -> Self {
        self.expanded = true;
        self
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.nodes.is_empty()
    }

    fn walk(&self, f: &mut impl FnMut(&TreeNode) -> bool) -> bool {
        f(self) && self.nodes.iter().all(|n| n.walk(f))
    }

    fn walk_mut(&mut self, f: &mut impl FnMut(&mut TreeNode)) {
        f(self);
        for node in &mut self.nodes {
            node.walk_mut(f);
        }
    }
}

/// One visible row: the child-index path to a node and its depth.
struct Row {
    path: Vec<usize>,
    level: usize,
}

/// Nodes flattened depth-first into rows, with children of expanded nodes
/// shown indented under their parent.
///
/// Leaves are indented one step further than parents so their text lines
/// up with the text after a parent's expand glyph.
#[derive(Debug, Clone)]
pub struct Tree {
    /// Chrome and geometry.
    pub block: Block,
    /// Root nodes.
    pub nodes: Vec<TreeNode>,
    /// Style for unmarked text.
    pub text_style: Style,
    /// Style applied to every cell of the selected row.
    pub selected_row_style: Style,
    /// Glyph before a collapsed parent.
    pub collapsed_symbol: char,
    /// Glyph before an expanded parent.
    pub expanded_symbol: char,
    /// Word wrap long rows onto following lines.
    pub wrap: bool,
    /// Selection and viewport over the visible rows.
    pub scroll: ScrollState,
}

impl Tree {
    /// Empty tree styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            nodes: Vec::new(),
            text_style: theme.tree.text,
            selected_row_style: theme.tree.text,
            collapsed_symbol: theme.tree.collapsed,
            expanded_symbol: theme.tree.expanded,
            wrap: true,
            scroll: ScrollState::default(),
        }
    }

    /// Replace the root nodes and reset the selection.
    pub fn set_nodes(&mut self, nodes: Vec<TreeNode>) {
        self.nodes = nodes;
        self.scroll = ScrollState::default();
    }

    /// Index of the selected row.
    pub const fn selected(&self) -> usize {
        self.scroll.selected
    }

    /// Number of visible rows.
    pub fn visible_len(&self) -> usize {
        self.rows().len()
    }

    /// The node on the selected row.
    pub fn selected_node(&self) -> Option<&TreeNode> {
        let rows = self.rows();
        let row = rows.get(self.scroll.selected)?;
        node_at(&self.nodes, &row.path)
    }

    /// Visit every node depth-first, expanded or not, until `f` returns
    /// false.
    pub fn walk(&self, mut f: impl FnMut(&TreeNode) -> bool) {
        for node in &self.nodes {
            if !node.walk(&mut f) {
                break;
            }
        }
    }

    /// Expand the selected node if it has children.
    pub fn expand(&mut self) {
        self.with_selected(|node| {
            if !node.is_leaf() {
                node.expanded = true;
            }
        });
    }

    /// Collapse the selected node.
    pub fn collapse(&mut self) {
        self.with_selected(|node| node.expanded = false);
    }

    /// Flip the selected node if it has children.
    pub fn toggle(&mut self) {
        self.with_selected(|node| {
            if !node.is_leaf() {
                node.expanded = !node.expanded;
            }
        });
    }

    /// Expand every parent node.
    pub fn expand_all(&mut self) {
        for node in &mut self.nodes {
            node.walk_mut(&mut |n: &mut TreeNode| n.expanded = !n.is_leaf());
        }
    }

    /// Collapse every node.
    pub fn collapse_all(&mut self) {
        for node in &mut self.nodes {
            node.walk_mut(&mut |n: &mut TreeNode| n.expanded = false);
        }
        self.clamp_selection();
    }

    /// Select the previous row.
    pub fn scroll_up(&mut self) {
        let len = self.visible_len();
        self.scroll.scroll_up(len);
    }

    /// Select the next row.
    pub fn scroll_down(&mut self) {
        let len = self.visible_len();
        self.scroll.scroll_down(len);
    }

    /// Move the selection by `amount` rows.
    pub fn scroll_amount(&mut self, amount: isize) {
        let len = self.visible_len();
        self.scroll.scroll_amount(amount, len);
    }

    /// Select the top visible row, or move a page up.
    pub fn page_up(&mut self) {
        let len = self.visible_len();
        self.scroll.page_up(usize::from(self.block.inner().height), len);
    }

    /// Move a page down.
    pub fn page_down(&mut self) {
        let len = self.visible_len();
        self.scroll.page_down(usize::from(self.block.inner().height), len);
    }

    /// Select the first row.
    pub fn scroll_top(&mut self) {
        self.scroll.top();
    }

    /// Select the last row.
    pub fn scroll_bottom(&mut self) {
        let len = self.visible_len();
        self.scroll.bottom(len);
    }

    fn with_selected(&mut self, f: impl FnOnce(&mut TreeNode)) {
        let rows = self.rows();
        if let Some(row) = rows.get(self.scroll.selected) {
            if let Some(node) = node_at_mut(&mut self.nodes, &row.path) {
                f(node);
            }
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        self.scroll.scroll_amount(0, len);
    }

    fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        flatten(&self.nodes, 0, &mut Vec::new(), &mut rows);
        rows
    }

    fn row_text(&self, node: &TreeNode, level: usize) -> String {
        if node.is_leaf() {
            format!("{}{}", INDENT.repeat(level + 1), node.value)
        } else {
            let symbol = if node.expanded {
                self.expanded_symbol
            } else {
                self.collapsed_symbol
            };
            format!("{}{symbol} {}", INDENT.repeat(level), node.value)
        }
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let inner = self.block.inner();
        let rows: Vec<Vec<Cell>> = self
            .rows()
            .iter()
            .filter_map(|row| {
                let node = node_at(&self.nodes, &row.path)?;
                let cells = parse_styles(&self.row_text(node, row.level), self.text_style);
                Some(if self.wrap {
                    wrap_cells(&cells, usize::from(inner.width))
                } else {
                    cells
                })
            })
            .collect();
        draw_rows(buffer, inner, &mut self.scroll, &rows, self.selected_row_style);
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

block_drawable!(Tree);

fn flatten(nodes: &[TreeNode], level: usize, path: &mut Vec<usize>, rows: &mut Vec<Row>) {
    for (i, node) in nodes.iter().enumerate() {
        path.push(i);
        rows.push(Row {
            path: path.clone(),
            level,
        });
        if node.expanded {
            flatten(&node.nodes, level + 1, path, rows);
        }
        path.pop();
    }
}

fn node_at<'a>(nodes: &'a [TreeNode], path: &[usize]) -> Option<&'a TreeNode> {
    let (first, rest) = path.split_first()?;
    let node = nodes.get(*first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        node_at(&node.nodes, rest)
    }
}

fn node_at_mut<'a>(nodes: &'a mut [TreeNode], path: &[usize]) -> Option<&'a mut TreeNode> {
    let (first, rest) = path.split_first()?;
    let node = nodes.get_mut(*first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        node_at_mut(&mut node.nodes, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::{render, row};
    use pretty_assertions::assert_eq;

    fn sample() -> Tree {
        let mut tree = Tree::default();
        tree.block = Block::plain();
        tree.set_nodes(vec![
            TreeNode::new("src")
                .with_children(vec![
                    TreeNode::new("lib.rs"),
                    TreeNode::new("widget").with_children(vec![TreeNode::new("tree.rs")]),
                ])
                .expanded(),
            TreeNode::new("Cargo.toml"),
        ]);
        tree
    }

    #[test]
    fn test_flatten_respects_expansion() {
        let mut tree = sample();
        let buffer = render(&mut tree, 14, 5);
        assert_eq!(row(&buffer, 0), "− src         ");
        assert_eq!(row(&buffer, 1), "    lib.rs    ");
        assert_eq!(row(&buffer, 2), "  + widget    ");
        assert_eq!(row(&buffer, 3), "  Cargo.toml  ");
        assert_eq!(row(&buffer, 4), "              ");
    }

    #[test]
    fn test_expand_selected() {
        let mut tree = sample();
        tree.scroll_amount(2);
        assert_eq!(tree.selected_node().map(|n| n.value.as_str()), Some("widget"));
        tree.expand();
        assert_eq!(tree.visible_len(), 5);

        let buffer = render(&mut tree, 14, 5);
        assert_eq!(row(&buffer, 3), "      tree.rs ");
    }

    #[test]
    fn test_expand_leaf_is_noop() {
        let mut tree = sample();
        tree.scroll_down();
        tree.toggle();
        assert!(!tree.selected_node().is_some_and(|n| n.expanded));
        assert_eq!(tree.visible_len(), 4);
    }

    #[test]
    fn test_collapse_all_clamps_selection() {
        let mut tree = sample();
        tree.scroll_bottom();
        assert_eq!(tree.selected(), 3);
        tree.collapse_all();
        assert_eq!(tree.visible_len(), 2);
        assert_eq!(tree.selected(), 1);
        assert_eq!(tree.selected_node().map(|n| n.value.as_str()), Some("Cargo.toml"));
    }

    #[test]
    fn test_expand_all_then_toggle() {
        let mut tree = sample();
        tree.collapse_all();
        tree.expand_all();
        assert_eq!(tree.visible_len(), 5);
        tree.scroll_top();
        tree.toggle();
        assert_eq!(tree.visible_len(), 2);
    }

    #[test]
    fn test_walk_visits_hidden_nodes_and_stops() {
        let tree = sample();
        let mut seen = Vec::new();
        tree.walk(|n| {
            seen.push(n.value.clone());
            n.value != "widget"
        });
        assert_eq!(seen, vec!["src", "lib.rs", "widget"]);

        let mut count = 0;
        tree.walk(|_| {
            count += 1;
            true
        });
        assert_eq!(count, 5);
    }

    #[test]
    fn test_empty_tree() {
        let mut tree = Tree::default();
        tree.block = Block::plain();
        tree.scroll_down();
        tree.expand();
        assert!(tree.selected_node().is_none());
        let buffer = render(&mut tree, 4, 2);
        assert_eq!(row(&buffer, 0), "    ");
    }
}
