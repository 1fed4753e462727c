use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::dom::{Document, ElementNode, Node, Surface};
use crate::selection::Selection;

/// Immutable tag-to-command table injected into the tracker. Hosts may extend
/// it, but the standard table covers the semantic tags the engine recognizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TagCommandMap(BTreeMap<String, String>);

impl TagCommandMap {
    pub fn standard() -> Self {
        let mut map = BTreeMap::new();
        for (tag, command) in [
            ("b", "bold"),
            ("strong", "bold"),
            ("i", "italic"),
            ("em", "italic"),
            ("u", "underline"),
            ("sup", "superscript"),
            ("sub", "subscript"),
            ("a", "createlink"),
            ("img", "insertimage"),
            ("ul", "insertunorderedlist"),
            ("ol", "insertorderedlist"),
            ("h1", "heading"),
            ("h2", "heading"),
            ("h3", "heading"),
            ("h4", "heading"),
            ("h5", "heading"),
            ("h6", "heading"),
            ("blockquote", "blockquote"),
        ] {
            map.insert(tag.to_string(), command.to_string());
        }
        Self(map)
    }

    pub fn with_mapping(mut self, tag: impl Into<String>, command: impl Into<String>) -> Self {
        self.0.insert(tag.into(), command.into());
        self
    }

    pub fn command_for(&self, tag: &str) -> Option<&str> {
        self.0.get(tag).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn from_css(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "justify" => Some(Self::Justify),
            _ => None,
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }

    pub fn command_id(self) -> &'static str {
        match self {
            Self::Left => "justifyleft",
            Self::Center => "justifycenter",
            Self::Right => "justifyright",
            Self::Justify => "justifyfull",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum BlockTag {
    #[default]
    Paragraph,
    Heading {
        level: u8,
    },
    Blockquote,
    ListItem,
}

impl BlockTag {
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::Heading { level } => Some(level),
            _ => None,
        }
    }
}

/// Snapshot of the formatting state at the current selection. Recomputed in
/// full on every node change, never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FormattingContext {
    #[serde(default)]
    pub active: BTreeSet<String>,
    #[serde(default)]
    pub block: BlockTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_source: Option<String>,
    #[serde(default)]
    pub has_selection: bool,
    /// Ancestor tag names, root first, starting at the body element.
    #[serde(default)]
    pub path: Vec<String>,
}

impl FormattingContext {
    fn at_body() -> Self {
        Self {
            path: vec!["body".to_string()],
            ..Self::default()
        }
    }

    pub fn is_active(&self, command: &str) -> bool {
        self.active.contains(command)
    }
}

pub struct NodeTracker {
    tags: TagCommandMap,
}

impl NodeTracker {
    pub fn new(tags: TagCommandMap) -> Self {
        Self { tags }
    }

    pub fn standard() -> Self {
        Self::new(TagCommandMap::standard())
    }

    pub fn tags(&self) -> &TagCommandMap {
        &self.tags
    }

    /// Derives the formatting context for the given selection by scanning the
    /// focus ancestor chain root-first. Boolean capabilities accumulate from
    /// every ancestor; value signals (fonts, alignment, block tag) are
    /// overwritten as the scan descends, so the deepest ancestor wins.
    pub fn derive(&self, surface: &Surface, selection: Option<&Selection>) -> FormattingContext {
        let mut ctx = FormattingContext::at_body();

        let Some(selection) = selection else {
            log::trace!("node change without a selection; context anchored to body");
            return ctx;
        };
        ctx.has_selection = !selection.is_collapsed();

        let Some(ancestors) = ancestor_elements(surface.doc(), &selection.focus.path) else {
            log::debug!(
                "selection focus {:?} does not resolve in the surface tree; falling back to body",
                selection.focus.path
            );
            return ctx;
        };

        for el in ancestors {
            ctx.path.push(el.tag.clone());

            if let Some(command) = self.tags.command_for(&el.tag) {
                ctx.active.insert(command.to_string());
            }

            match el.tag.as_str() {
                "p" => ctx.block = BlockTag::Paragraph,
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    let level = el.tag[1..].parse::<u8>().unwrap_or(1);
                    ctx.block = BlockTag::Heading { level };
                }
                "blockquote" => ctx.block = BlockTag::Blockquote,
                "li" => ctx.block = BlockTag::ListItem,
                "a" => ctx.link_target = el.attrs.get("href").cloned(),
                "img" => ctx.image_source = el.attrs.get("src").cloned(),
                _ => {}
            }

            if el.style.font_weight.as_deref() == Some("bold") {
                ctx.active.insert("bold".to_string());
            }
            if el.style.font_style.as_deref() == Some("italic") {
                ctx.active.insert("italic".to_string());
            }
            if el.style.text_decoration.as_deref() == Some("underline") {
                ctx.active.insert("underline".to_string());
            }
            if let Some(align) = el
                .style
                .text_align
                .as_deref()
                .and_then(Alignment::from_css)
            {
                ctx.alignment = Some(align);
            }
            if let Some(family) = &el.style.font_family {
                ctx.font_family = Some(family.clone());
            }
            if let Some(size) = &el.style.font_size {
                ctx.font_size = Some(size.clone());
            }
        }

        if let Some(align) = ctx.alignment {
            ctx.active.insert(align.command_id().to_string());
        }

        log::trace!(
            "derived context at {:?}: active={:?} block={:?}",
            ctx.path,
            ctx.active,
            ctx.block
        );
        ctx
    }
}

/// Elements along `path`, root first. The final node is included when it is
/// itself an element. Returns `None` when the path does not resolve, which
/// callers treat as "outside the editable document".
fn ancestor_elements<'a>(doc: &'a Document, path: &[usize]) -> Option<Vec<&'a ElementNode>> {
    let mut out = Vec::new();
    let mut children: &[Node] = &doc.children;

    for (depth, &ix) in path.iter().enumerate() {
        match children.get(ix)? {
            Node::Element(el) => {
                out.push(el);
                children = &el.children;
            }
            Node::Text(_) => {
                if depth + 1 < path.len() {
                    return None;
                }
            }
        }
    }
    Some(out)
}
