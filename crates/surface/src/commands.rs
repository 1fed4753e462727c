use crate::context::Alignment;
use crate::dom::{
    Attrs, BLOCK_TAGS, Document, ElementNode, InlineStyle, Node, PathError, Surface, children_mut,
    insert_node, node_mut, remove_node, unwrap_element,
};
use crate::selection::{Path, Selection};

#[derive(Debug, Clone)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<PathError> for CommandError {
    fn from(value: PathError) -> Self {
        CommandError::new(value.0)
    }
}

/// Applies a formatting action to the surface at the current selection.
///
/// Actions that need a selection and have none are best-effort no-ops rather
/// than errors; an unknown action is an error.
pub fn exec_command(
    surface: &mut Surface,
    action: &str,
    value: Option<&str>,
) -> Result<(), CommandError> {
    match action {
        "bold" => toggle_inline(surface, &["b", "strong"], "b"),
        "italic" => toggle_inline(surface, &["i", "em"], "i"),
        "underline" => toggle_inline(surface, &["u"], "u"),
        "superscript" => toggle_inline(surface, &["sup"], "sup"),
        "subscript" => toggle_inline(surface, &["sub"], "sub"),
        "justifyleft" => set_alignment(surface, Alignment::Left),
        "justifycenter" => set_alignment(surface, Alignment::Center),
        "justifyright" => set_alignment(surface, Alignment::Right),
        "justifyfull" => set_alignment(surface, Alignment::Justify),
        "heading" => set_heading(surface, required_value(action, value)?),
        "fontname" => set_font_family(surface, required_value(action, value)?),
        "fontsize" => set_font_size(surface, required_value(action, value)?),
        "createlink" => create_link(surface, required_value(action, value)?),
        "insertimage" => insert_image(surface, required_value(action, value)?),
        "insertunorderedlist" => toggle_list(surface, "ul"),
        "insertorderedlist" => toggle_list(surface, "ol"),
        other => Err(CommandError::new(format!("Unknown command: {other}"))),
    }
}

fn required_value<'a>(action: &str, value: Option<&'a str>) -> Result<&'a str, CommandError> {
    value.ok_or_else(|| CommandError::new(format!("Command {action} requires a value")))
}

struct WrapSpec {
    tag: &'static str,
    style: InlineStyle,
    attrs: Attrs,
}

impl WrapSpec {
    fn tag(tag: &'static str) -> Self {
        Self {
            tag,
            style: InlineStyle::default(),
            attrs: Attrs::default(),
        }
    }

    fn styled(tag: &'static str, style: InlineStyle) -> Self {
        Self {
            tag,
            style,
            attrs: Attrs::default(),
        }
    }

    fn with_attr(tag: &'static str, key: &str, value: &str) -> Self {
        let mut attrs = Attrs::default();
        attrs.insert(key.to_string(), value.to_string());
        Self {
            tag,
            style: InlineStyle::default(),
            attrs,
        }
    }

    fn wrap(&self, children: Vec<Node>) -> Node {
        Node::Element(ElementNode {
            tag: self.tag.to_string(),
            style: self.style.clone(),
            attrs: self.attrs.clone(),
            children,
        })
    }
}

fn toggle_inline(
    surface: &mut Surface,
    match_tags: &[&str],
    wrap_tag: &'static str,
) -> Result<(), CommandError> {
    let Some(selection) = surface.selection().cloned() else {
        log::trace!("{wrap_tag} toggle ignored: no selection");
        return Ok(());
    };

    if let Some(path) = nearest_ancestor_path(surface.doc(), &selection.focus.path, match_tags) {
        unwrap_element(surface.doc_mut(), &path)?;
        surface.normalize_selection();
        return Ok(());
    }

    if selection.is_collapsed() {
        log::trace!("{wrap_tag} toggle ignored: collapsed selection");
        return Ok(());
    }
    wrap_selection(surface, &selection, &WrapSpec::tag(wrap_tag))
}

fn set_alignment(surface: &mut Surface, align: Alignment) -> Result<(), CommandError> {
    let Some(selection) = surface.selection().cloned() else {
        log::trace!("alignment ignored: no selection");
        return Ok(());
    };
    let Some(block_path) = block_ancestor_path(surface.doc(), &selection.focus.path) else {
        log::trace!("alignment ignored: no block at selection");
        return Ok(());
    };

    if let Node::Element(el) = node_mut(surface.doc_mut(), &block_path)? {
        el.style.text_align = Some(align.css().to_string());
    }
    Ok(())
}

fn set_heading(surface: &mut Surface, value: &str) -> Result<(), CommandError> {
    let tag = match value {
        "none" => "p",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => value,
        other => {
            return Err(CommandError::new(format!("Invalid heading value: {other}")));
        }
    };

    let Some(selection) = surface.selection().cloned() else {
        log::trace!("heading ignored: no selection");
        return Ok(());
    };
    let Some(block_path) = block_ancestor_path(surface.doc(), &selection.focus.path) else {
        log::trace!("heading ignored: no block at selection");
        return Ok(());
    };

    if let Node::Element(el) = node_mut(surface.doc_mut(), &block_path)? {
        el.tag = tag.to_string();
    }
    Ok(())
}

fn set_font_family(surface: &mut Surface, family: &str) -> Result<(), CommandError> {
    let style = InlineStyle {
        font_family: Some(family.to_string()),
        ..InlineStyle::default()
    };
    set_font_style(surface, style)
}

fn set_font_size(surface: &mut Surface, size: &str) -> Result<(), CommandError> {
    let style = InlineStyle {
        font_size: Some(size.to_string()),
        ..InlineStyle::default()
    };
    set_font_style(surface, style)
}

fn set_font_style(surface: &mut Surface, style: InlineStyle) -> Result<(), CommandError> {
    let Some(selection) = surface.selection().cloned() else {
        log::trace!("font change ignored: no selection");
        return Ok(());
    };

    if !selection.is_collapsed() {
        return wrap_selection(surface, &selection, &WrapSpec::styled("span", style));
    }

    // Caret only: the style lands on the enclosing block.
    let Some(block_path) = block_ancestor_path(surface.doc(), &selection.focus.path) else {
        log::trace!("font change ignored: no block at selection");
        return Ok(());
    };
    if let Node::Element(el) = node_mut(surface.doc_mut(), &block_path)? {
        if style.font_family.is_some() {
            el.style.font_family = style.font_family;
        }
        if style.font_size.is_some() {
            el.style.font_size = style.font_size;
        }
    }
    Ok(())
}

fn create_link(surface: &mut Surface, url: &str) -> Result<(), CommandError> {
    let Some(selection) = surface.selection().cloned() else {
        log::trace!("createlink ignored: no selection");
        return Ok(());
    };
    if selection.is_collapsed() {
        log::trace!("createlink ignored: collapsed selection");
        return Ok(());
    }
    wrap_selection(surface, &selection, &WrapSpec::with_attr("a", "href", url))
}

fn insert_image(surface: &mut Surface, src: &str) -> Result<(), CommandError> {
    let Some(selection) = surface.selection().cloned() else {
        log::trace!("insertimage ignored: no selection");
        return Ok(());
    };

    let (parent_path, ix) = selection
        .focus
        .path
        .split_last()
        .map(|(ix, p)| (p.to_vec(), *ix))
        .unwrap_or((Vec::new(), surface.doc().children.len().saturating_sub(1)));

    let mut attrs = Attrs::default();
    attrs.insert("src".to_string(), src.to_string());
    let img = Node::Element(ElementNode {
        tag: "img".to_string(),
        style: InlineStyle::default(),
        attrs,
        children: Vec::new(),
    });

    let mut img_path = parent_path;
    img_path.push(ix + 1);
    insert_node(surface.doc_mut(), &img_path, img)?;
    surface.normalize_selection();
    Ok(())
}

fn toggle_list(surface: &mut Surface, list_tag: &'static str) -> Result<(), CommandError> {
    let Some(selection) = surface.selection().cloned() else {
        log::trace!("list toggle ignored: no selection");
        return Ok(());
    };

    if let Some(list_path) =
        nearest_ancestor_path(surface.doc(), &selection.focus.path, &["ul", "ol"])
    {
        // Already in a list: unwrap it, lifting the item contents back out.
        let removed = remove_node(surface.doc_mut(), &list_path)?;
        let Node::Element(list) = removed else {
            return Err(CommandError::new("List ancestor is not an element"));
        };

        let mut blocks: Vec<Node> = Vec::new();
        for item in list.children {
            match item {
                Node::Element(li) if li.tag == "li" => blocks.extend(li.children),
                other => blocks.push(other),
            }
        }

        let (parent_path, index) = list_path.split_last().map(|(ix, p)| (p, *ix)).unwrap();
        let children = children_mut(surface.doc_mut(), parent_path)?;
        for (offset, node) in blocks.into_iter().enumerate() {
            children.insert(index + offset, node);
        }
        surface.normalize_selection();
        return Ok(());
    }

    let Some(block_path) = block_ancestor_path(surface.doc(), &selection.focus.path) else {
        log::trace!("list toggle ignored: no block at selection");
        return Ok(());
    };

    let block = remove_node(surface.doc_mut(), &block_path)?;
    let list = Node::element(list_tag, vec![Node::element("li", vec![block])]);
    insert_node(surface.doc_mut(), &block_path, list)?;
    surface.normalize_selection();
    Ok(())
}

/// Wraps the selected range. Both endpoints must sit under the same parent
/// container; partial text nodes at the edges are split, covered siblings in
/// between are wrapped whole.
fn wrap_selection(
    surface: &mut Surface,
    selection: &Selection,
    spec: &WrapSpec,
) -> Result<(), CommandError> {
    let (start, end) = selection.ordered();

    let Some((start_ix, start_parent)) = start.path.split_last() else {
        return Err(CommandError::new("Selection start has an empty path"));
    };
    let Some((end_ix, end_parent)) = end.path.split_last() else {
        return Err(CommandError::new("Selection end has an empty path"));
    };
    if start_parent != end_parent {
        return Err(CommandError::new(
            "Selection endpoints are in different containers",
        ));
    }
    let (start_ix, end_ix) = (*start_ix, *end_ix);

    let mut selected_text_path: Option<Path> = None;
    let mut selected_text_len = 0usize;

    let children = children_mut(surface.doc_mut(), start_parent)?;
    let old = std::mem::take(children);
    let mut rebuilt: Vec<Node> = Vec::with_capacity(old.len() + 2);

    for (ix, node) in old.into_iter().enumerate() {
        if ix < start_ix || ix > end_ix {
            rebuilt.push(node);
            continue;
        }

        if start_ix == end_ix {
            match node {
                Node::Text(t) => {
                    let s = clamp_to_char_boundary(&t.text, start.offset);
                    let e = clamp_to_char_boundary(&t.text, end.offset.max(s));
                    if s == e {
                        rebuilt.push(Node::Text(t));
                        continue;
                    }
                    let before = &t.text[..s];
                    let mid = &t.text[s..e];
                    let after = &t.text[e..];
                    if !before.is_empty() {
                        rebuilt.push(Node::text(before));
                    }
                    let wrap_ix = rebuilt.len();
                    rebuilt.push(spec.wrap(vec![Node::text(mid)]));
                    selected_text_len = mid.len();
                    let mut path = start_parent.to_vec();
                    path.push(wrap_ix);
                    path.push(0);
                    selected_text_path = Some(path);
                    if !after.is_empty() {
                        rebuilt.push(Node::text(after));
                    }
                }
                other => rebuilt.push(spec.wrap(vec![other])),
            }
        } else if ix == start_ix {
            match node {
                Node::Text(t) => {
                    let s = clamp_to_char_boundary(&t.text, start.offset);
                    let before = &t.text[..s];
                    let covered = &t.text[s..];
                    if !before.is_empty() {
                        rebuilt.push(Node::text(before));
                    }
                    if !covered.is_empty() {
                        rebuilt.push(spec.wrap(vec![Node::text(covered)]));
                    }
                }
                other => rebuilt.push(spec.wrap(vec![other])),
            }
        } else if ix == end_ix {
            match node {
                Node::Text(t) => {
                    let e = clamp_to_char_boundary(&t.text, end.offset);
                    let covered = &t.text[..e];
                    let after = &t.text[e..];
                    if !covered.is_empty() {
                        rebuilt.push(spec.wrap(vec![Node::text(covered)]));
                    }
                    if !after.is_empty() {
                        rebuilt.push(Node::text(after));
                    }
                }
                other => rebuilt.push(spec.wrap(vec![other])),
            }
        } else {
            rebuilt.push(spec.wrap(vec![node]));
        }
    }

    *children = rebuilt;

    match selected_text_path {
        Some(path) => {
            // Keep the wrapped text selected so a follow-up toggle reverses it.
            surface.set_selection(Selection {
                anchor: crate::selection::Point::new(path.clone(), 0),
                focus: crate::selection::Point::new(path, selected_text_len),
            });
        }
        None => surface.normalize_selection(),
    }
    Ok(())
}

fn clamp_to_char_boundary(s: &str, mut ix: usize) -> usize {
    ix = ix.min(s.len());
    while ix > 0 && !s.is_char_boundary(ix) {
        ix -= 1;
    }
    ix
}

fn nearest_ancestor_path(doc: &Document, path: &[usize], tags: &[&str]) -> Option<Path> {
    let mut found: Option<Path> = None;
    let mut prefix: Path = Vec::new();
    let mut children: &[Node] = &doc.children;

    for &ix in path {
        let node = children.get(ix)?;
        prefix.push(ix);
        match node {
            Node::Element(el) => {
                if tags.contains(&el.tag.as_str()) {
                    found = Some(prefix.clone());
                }
                children = &el.children;
            }
            Node::Text(_) => break,
        }
    }
    found
}

fn block_ancestor_path(doc: &Document, path: &[usize]) -> Option<Path> {
    if let Some(found) = nearest_ancestor_path(doc, path, BLOCK_TAGS) {
        return Some(found);
    }
    // A body-level element that is not a known block still takes block-level
    // formatting, matching how loosely structured content behaves.
    match path.first().map(|&ix| doc.children.get(ix)) {
        Some(Some(Node::Element(_))) => Some(vec![path[0]]),
        _ => None,
    }
}
