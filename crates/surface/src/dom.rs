use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::selection::{Selection, clamp_selection};

pub type Attrs = BTreeMap<String, String>;

/// Tags that form text blocks. The body root itself is not part of the tree;
/// `Document::children` are its children.
pub const BLOCK_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "li", "div"];

/// Inline wrapper tags that carry formatting and may be dropped when empty.
pub const INLINE_FORMAT_TAGS: &[&str] = &["b", "strong", "i", "em", "u", "sup", "sub", "span", "a"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Element(ElementNode),
    Text(TextNode),
}

impl Node {
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(ElementNode {
            tag: tag.into(),
            style: InlineStyle::default(),
            attrs: Attrs::default(),
            children,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode { text: text.into() })
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::element("p", vec![Node::text(text)])
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element(el) => Some(el.tag.as_str()),
            Node::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub tag: String,
    #[serde(default, skip_serializing_if = "InlineStyle::is_empty")]
    pub style: InlineStyle,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl ElementNode {
    pub fn is_block(&self) -> bool {
        BLOCK_TAGS.contains(&self.tag.as_str())
    }

    pub fn is_inline_format(&self) -> bool {
        INLINE_FORMAT_TAGS.contains(&self.tag.as_str())
    }

    pub fn text_len(&self) -> usize {
        self.children.iter().fold(0, |acc, node| match node {
            Node::Text(t) => acc + t.text.len(),
            Node::Element(el) => acc + el.text_len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InlineStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
}

impl InlineStyle {
    pub fn is_empty(&self) -> bool {
        self.font_weight.is_none()
            && self.font_style.is_none()
            && self.text_decoration.is_none()
            && self.text_align.is_none()
            && self.font_family.is_none()
            && self.font_size.is_none()
    }
}

#[derive(Debug)]
pub struct PathError(pub String);

pub fn node_ref<'a>(doc: &'a Document, path: &[usize]) -> Option<&'a Node> {
    if path.is_empty() {
        return None;
    }

    let mut node = doc.children.get(path[0])?;
    for &ix in path.iter().skip(1) {
        node = match node {
            Node::Element(el) => el.children.get(ix)?,
            Node::Text(_) => return None,
        };
    }
    Some(node)
}

pub fn node_mut<'a>(doc: &'a mut Document, path: &[usize]) -> Result<&'a mut Node, PathError> {
    fn descend<'a>(
        children: &'a mut Vec<Node>,
        path: &[usize],
        depth: usize,
    ) -> Result<&'a mut Node, PathError> {
        let ix = path[0];
        let len = children.len();
        let node = children
            .get_mut(ix)
            .ok_or_else(|| PathError(format!("Path out of bounds at depth {depth}: {ix} >= {len}")))?;
        if path.len() == 1 {
            return Ok(node);
        }
        match node {
            Node::Element(el) => descend(&mut el.children, &path[1..], depth + 1),
            Node::Text(_) => Err(PathError(format!("Non-container node at depth {depth}"))),
        }
    }

    if path.is_empty() {
        return Err(PathError("Empty path".into()));
    }
    descend(&mut doc.children, path, 0)
}

pub fn children_mut<'a>(
    doc: &'a mut Document,
    parent_path: &[usize],
) -> Result<&'a mut Vec<Node>, PathError> {
    if parent_path.is_empty() {
        return Ok(&mut doc.children);
    }
    match node_mut(doc, parent_path)? {
        Node::Element(el) => Ok(&mut el.children),
        Node::Text(_) => Err(PathError("Parent is not a container".into())),
    }
}

pub fn insert_node(doc: &mut Document, path: &[usize], node: Node) -> Result<(), PathError> {
    let (parent_path, index) = path
        .split_last()
        .map(|(ix, p)| (p, *ix))
        .ok_or_else(|| PathError("Empty insert path".into()))?;

    let children = children_mut(doc, parent_path)?;
    if index > children.len() {
        return Err(PathError(format!(
            "Insert index out of bounds: {index} > {}",
            children.len()
        )));
    }
    children.insert(index, node);
    Ok(())
}

pub fn remove_node(doc: &mut Document, path: &[usize]) -> Result<Node, PathError> {
    let (parent_path, index) = path
        .split_last()
        .map(|(ix, p)| (p, *ix))
        .ok_or_else(|| PathError("Empty remove path".into()))?;

    let children = children_mut(doc, parent_path)?;
    if index >= children.len() {
        return Err(PathError(format!(
            "Remove index out of bounds: {index} >= {}",
            children.len()
        )));
    }
    Ok(children.remove(index))
}

/// Replaces the element at `path` with its own children (splice).
pub fn unwrap_element(doc: &mut Document, path: &[usize]) -> Result<(), PathError> {
    let removed = remove_node(doc, path)?;
    let inner = match removed {
        Node::Element(el) => el.children,
        Node::Text(_) => return Err(PathError("Cannot unwrap a text node".into())),
    };

    let (parent_path, index) = path.split_last().map(|(ix, p)| (p, *ix)).unwrap();
    let children = children_mut(doc, parent_path)?;
    for (offset, node) in inner.into_iter().enumerate() {
        children.insert(index + offset, node);
    }
    Ok(())
}

/// The editable surface: one document tree, the current selection, and a
/// content-ready flag the embedding host flips once its initial content is in
/// place.
pub struct Surface {
    doc: Document,
    selection: Option<Selection>,
    content_ready: bool,
}

impl Surface {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            selection: None,
            content_ready: false,
        }
    }

    pub fn with_ready_content(doc: Document) -> Self {
        let mut surface = Self::new(doc);
        surface.content_ready = true;
        surface
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(clamp_selection(&self.doc, selection));
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn normalize_selection(&mut self) {
        if let Some(selection) = self.selection.take() {
            self.selection = Some(clamp_selection(&self.doc, selection));
        }
    }

    pub fn has_nonempty_selection(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|sel| !sel.is_collapsed())
    }

    pub fn content_ready(&self) -> bool {
        self.content_ready
    }

    pub fn mark_content_ready(&mut self) {
        self.content_ready = true;
    }
}
