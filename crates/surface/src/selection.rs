use serde::{Deserialize, Serialize};

use crate::dom::{Document, Node, Surface};

pub type Path = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: Path, offset: usize) -> Self {
        Self { path, offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Anchor and focus in document order.
    pub fn ordered(&self) -> (Point, Point) {
        let forward = match self.anchor.path.cmp(&self.focus.path) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => self.anchor.offset <= self.focus.offset,
        };
        if forward {
            (self.anchor.clone(), self.focus.clone())
        } else {
            (self.focus.clone(), self.anchor.clone())
        }
    }
}

/// Maps a possibly stale point onto the live tree: indices are clamped, and a
/// point that lands on an element is moved to its first text descendant.
pub fn clamp_point(doc: &Document, point: &Point) -> Point {
    if doc.children.is_empty() {
        return Point::new(Vec::new(), 0);
    }

    let mut resolved: Path = Vec::new();
    let mut children: &[Node] = &doc.children;

    for &wanted in &point.path {
        if children.is_empty() {
            break;
        }
        let ix = wanted.min(children.len() - 1);
        resolved.push(ix);
        match &children[ix] {
            Node::Text(t) => {
                return Point::new(resolved, point.offset.min(t.text.len()));
            }
            Node::Element(el) => {
                children = &el.children;
            }
        }
    }

    if let Some(point) = first_text_descendant(children, &mut resolved) {
        return point;
    }
    Point::new(resolved, 0)
}

pub fn clamp_selection(doc: &Document, selection: Selection) -> Selection {
    Selection {
        anchor: clamp_point(doc, &selection.anchor),
        focus: clamp_point(doc, &selection.focus),
    }
}

fn first_text_descendant(children: &[Node], path: &mut Path) -> Option<Point> {
    for (ix, node) in children.iter().enumerate() {
        path.push(ix);
        match node {
            Node::Text(_) => {
                return Some(Point::new(path.clone(), 0));
            }
            Node::Element(el) => {
                if let Some(point) = first_text_descendant(&el.children, path) {
                    return Some(point);
                }
            }
        }
        path.pop();
    }
    None
}

/// Platform seam for reading the current selection. One implementation per
/// selection API, resolved when the editor is constructed.
pub trait SelectionAdapter {
    fn current(&self, surface: &Surface) -> Option<Selection>;
}

/// Adapter for surfaces that store their own selection, which is the only
/// selection source a headless host has.
pub struct TreeSelectionAdapter;

impl SelectionAdapter for TreeSelectionAdapter {
    fn current(&self, surface: &Surface) -> Option<Selection> {
        surface.selection().cloned()
    }
}
