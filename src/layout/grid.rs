//! Grid: nested row/column ratios resolved to widget rectangles.
//!
//! The tree is resolved once, when it is set, into a flat list of leaves
//! carrying absolute ratios of the layout's inner rectangle. Drawing only
//! scales those ratios to cells; there is no tree walk per frame.

use super::{Alignment, Rect};
use crate::buffer::Buffer;
use crate::widget::{lock, Block, Drawable, SharedDrawable};

/// Rounding guard so ratios that should sum to 1.0 reach the last cell.
const EPSILON: f64 = 1e-9;

/// A node of the layout tree.
pub enum LayoutNode {
    /// Takes `ratio` of the parent's height and all of its width.
    Row {
        /// Share of the parent's height.
        ratio: f64,
        /// Nested nodes.
        children: Vec<LayoutNode>,
    },
    /// Takes `ratio` of the parent's width and all of its height.
    Column {
        /// Share of the parent's width.
        ratio: f64,
        /// Nested nodes.
        children: Vec<LayoutNode>,
    },
    /// A widget. Widgets that are direct children of a container split its
    /// extent evenly along the container's axis.
    Widget(SharedDrawable),
}

impl LayoutNode {
    /// A row node.
    pub fn row(ratio: f64, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Row {
            ratio,
            children: children.into_iter().collect(),
        }
    }

    /// A column node.
    pub fn column(ratio: f64, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Column {
            ratio,
            children: children.into_iter().collect(),
        }
    }

    /// A leaf.
    pub fn widget(widget: SharedDrawable) -> Self {
        Self::Widget(widget)
    }
}

impl std::fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Row { ratio, children } => f.debug_struct("Row").field("ratio", ratio).field("children", children).finish(),
            Self::Column { ratio, children } => f.debug_struct("Column").field("ratio", ratio).field("children", children).finish(),
            Self::Widget(_) => f.write_str("Widget"),
        }
    }
}

/// Fractions of the layout's inner rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ratios {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Ratios {
    /// Scale to cells of `inner`, clamped to it.
    ///
    /// Edges are rounded rather than sizes, so siblings that share an edge
    /// never leave a gap between them.
    pub fn to_rect(self, inner: Rect) -> Option<Rect> {
        let width = f64::from(inner.width);
        let height = f64::from(inner.height);
        let (min, max) = (inner.min(), inner.max());

        let x = (width * self.x + EPSILON).floor() as i32 + min.x;
        let y = (height * self.y + EPSILON).floor() as i32 + min.y;
        let x2 = ((width * (self.x + self.width) + EPSILON).floor() as i32 + min.x).min(max.x);
        let y2 = ((height * (self.y + self.height) + EPSILON).floor() as i32 + min.y).min(max.y);

        if x2 - x <= 0 || y2 - y <= 0 {
            return None;
        }
        Some(Rect::from_corners(x, y, x2, y2))
    }
}

/// A widget with its resolved placement.
pub struct LayoutItem {
    /// The widget.
    pub widget: SharedDrawable,
    /// Placement within the layout's inner rectangle.
    pub ratios: Ratios,
    /// Horizontal nudge applied after scaling.
    pub alignment: Alignment,
}

impl std::fmt::Debug for LayoutItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutItem")
            .field("ratios", &self.ratios)
            .field("alignment", &self.alignment)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    Rows,
    Columns,
}

/// Flatten `nodes` (children of an implicit full-size row) into leaves.
pub fn resolve(nodes: &[LayoutNode]) -> Vec<LayoutItem> {
    let mut items = Vec::new();
    let root = Ratios {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };
    resolve_children(nodes, Axis::Rows, root, &mut items);
    tracing::debug!(leaves = items.len(), "resolved layout");
    items
}

fn resolve_node(node: &LayoutNode, parent: Ratios, items: &mut Vec<LayoutItem>) {
    let (axis, own, children) = match node {
        LayoutNode::Row { ratio, children } => (
            Axis::Rows,
            Ratios { height: parent.height * ratio, ..parent },
            children,
        ),
        LayoutNode::Column { ratio, children } => (
            Axis::Columns,
            Ratios { width: parent.width * ratio, ..parent },
            children,
        ),
        LayoutNode::Widget(widget) => {
            items.push(LayoutItem {
                widget: widget.clone(),
                ratios: parent,
                alignment: Alignment::Left,
            });
            return;
        }
    };
    resolve_children(children, axis, own, items);
}

/// Place children of a container occupying `own`.
///
/// Row children stack downwards and column children left to right. A
/// container that mixes both halves its own height for every column seen
/// after a row and its own width for every row seen after a column.
fn resolve_children(children: &[LayoutNode], axis: Axis, own: Ratios, items: &mut Vec<LayoutItem>) {
    let mut container = own;
    let mut x_offset = 0.0;
    let mut y_offset = 0.0;
    let mut has_rows = false;
    let mut has_columns = false;
    let share = 1.0 / children.len().max(1) as f64;

    for child in children {
        let origin_x = container.x + container.width * x_offset;
        let origin_y = container.y + container.height * y_offset;

        match child {
            LayoutNode::Widget(widget) => {
                let ratios = match axis {
                    Axis::Rows => Ratios {
                        x: origin_x,
                        y: origin_y,
                        width: container.width,
                        height: container.height * share,
                    },
                    Axis::Columns => Ratios {
                        x: origin_x,
                        y: origin_y,
                        width: container.width * share,
                        height: container.height,
                    },
                };
                items.push(LayoutItem {
                    widget: widget.clone(),
                    ratios,
                    alignment: Alignment::Left,
                });
                match axis {
                    Axis::Rows => y_offset += share,
                    Axis::Columns => x_offset += share,
                }
            }
            LayoutNode::Column { ratio, .. } => {
                has_columns = true;
                x_offset += ratio;
                if has_rows {
                    container.height /= 2.0;
                }
                let parent = Ratios {
                    x: origin_x,
                    y: origin_y,
                    ..container
                };
                resolve_node(child, parent, items);
            }
            LayoutNode::Row { ratio, .. } => {
                has_rows = true;
                y_offset += ratio;
                if has_columns {
                    container.width /= 2.0;
                }
                let parent = Ratios {
                    x: origin_x,
                    y: origin_y,
                    ..container
                };
                resolve_node(child, parent, items);
            }
        }
    }
}

/// A drawable container that places widgets by ratio.
///
/// ```
/// use trellis::layout::{Layout, LayoutNode};
/// use trellis::widget::{shared, Gauge, Paragraph};
/// use trellis::Theme;
///
/// let theme = Theme::default();
/// let left = shared(Paragraph::new(&theme));
/// let right = shared(Gauge::new(&theme));
///
/// let mut layout = Layout::new();
/// layout.set([LayoutNode::row(1.0, [
///     LayoutNode::column(0.5, [LayoutNode::widget(left)]),
///     LayoutNode::column(0.5, [LayoutNode::widget(right)]),
/// ])]);
/// assert_eq!(layout.items().len(), 2);
/// ```
#[derive(Debug)]
pub struct Layout {
    block: Block,
    items: Vec<LayoutItem>,
}

impl Layout {
    /// An empty, borderless layout.
    pub fn new() -> Self {
        Self {
            block: Block::plain(),
            items: Vec::new(),
        }
    }

    /// An empty layout with the given chrome.
    pub const fn with_block(block: Block) -> Self {
        Self {
            block,
            items: Vec::new(),
        }
    }

    /// Replace the tree. Manually added items are dropped.
    pub fn set(&mut self, nodes: impl IntoIterator<Item = LayoutNode>) {
        let nodes: Vec<LayoutNode> = nodes.into_iter().collect();
        self.items = resolve(&nodes);
    }

    /// Place a widget at explicit ratios of the inner rectangle.
    pub fn add_item(&mut self, widget: SharedDrawable, ratios: Ratios, alignment: Alignment) {
        self.items.push(LayoutItem {
            widget,
            ratios,
            alignment,
        });
    }

    /// Resolved leaves, in draw order.
    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The layout's chrome.
    pub const fn block(&self) -> &Block {
        &self.block
    }

    /// Mutable chrome.
    pub fn block_mut(&mut self) -> &mut Block {
        &mut self.block
    }

    /// Compute every leaf's rectangle for the current area and assign it.
    ///
    /// Leaves that scale to nothing are skipped. Returns the placed widgets
    /// in draw order, ready to be rendered one by one.
    pub fn arrange(&self) -> Vec<SharedDrawable> {
        let inner = self.block.inner();
        let mut placed = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let Some(mut rect) = item.ratios.to_rect(inner) else {
                continue;
            };
            match item.alignment {
                Alignment::Left => {}
                Alignment::Center => rect.x = rect.x.saturating_add(rect.width / 4),
                Alignment::Right => rect.x = rect.x.saturating_add(rect.width / 2),
            }
            lock(&item.widget).set_area(rect);
            placed.push(item.widget.clone());
        }
        placed
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawable for Layout {
    fn area(&self) -> Rect {
        self.block.area()
    }

    fn set_area(&mut self, area: Rect) {
        self.block.set_area(area);
    }

    fn draw(&mut self, buffer: &mut Buffer) {
        self.block.draw(buffer);
        for widget in self.arrange() {
            lock(&widget).draw(buffer);
        }
    }
}
