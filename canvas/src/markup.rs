//! Untrusted vector markup: validation, sanitization and root resizing.
//!
//! Markup is parsed with `roxmltree` (DTDs rejected) and re-serialized from the
//! tree, so nothing reaches the output that the walker did not emit on purpose.
//! Script elements, event-handler attributes and `javascript:` links are
//! dropped; comments and processing instructions never survive re-serialization.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

use roxmltree::{Document, Node};

/// Namespace URI of SVG elements.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Error returned when markup cannot be embedded.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// The text is not well-formed XML (or declares a DTD).
    #[error("markup is not well-formed: {0}")]
    Parse(#[from] roxmltree::Error),
    /// The document root is some other element.
    #[error("root element is <{0}>, not <svg>")]
    NotSvgRoot(String),
}

/// Check that `text` is well-formed markup with a single `<svg>` root.
///
/// # Errors
///
/// Returns [`MarkupError::Parse`] for malformed text and
/// [`MarkupError::NotSvgRoot`] when the root element is not `svg`.
pub fn validate_svg(text: &str) -> Result<(), MarkupError> {
    let doc = Document::parse(text)?;
    check_root(doc.root_element())
}

/// Sanitize `text` and force its root to a `width` × `height` box.
///
/// The root's own `width`, `height` and `preserveAspectRatio` are replaced.
/// When the root declares a `viewBox`, `preserveAspectRatio="xMidYMid meet"`
/// is set so the drawing scales to fit without cropping; otherwise none is set.
///
/// # Errors
///
/// Same as [`validate_svg`].
pub fn sanitize_svg(text: &str, width: f64, height: f64) -> Result<String, MarkupError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    check_root(root)?;

    let mut out = String::with_capacity(text.len());
    out.push('<');
    out.push_str(&qualified_name(root));
    write_namespace_decls(root, &mut out);

    let mut has_view_box = false;
    for attr in root.attributes() {
        if attr.namespace().is_none() {
            match attr.name() {
                "width" | "height" | "preserveAspectRatio" => continue,
                "viewBox" => has_view_box = true,
                _ => {}
            }
        }
        write_attribute(root, &attr, &mut out);
    }
    out.push_str(&format!(" width=\"{width}\" height=\"{height}\""));
    if has_view_box {
        out.push_str(" preserveAspectRatio=\"xMidYMid meet\"");
    }

    write_children_and_close(root, &mut out);
    Ok(out)
}

/// Whether an attribute value is a link that would execute script.
#[must_use]
pub fn is_script_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take("javascript:".len())
        .collect();
    compact.eq_ignore_ascii_case("javascript:")
}

/// Escape text for use inside a double-quoted attribute value.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape character data.
#[must_use]
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================
// Serialization
// =============================================================

fn check_root(root: Node<'_, '_>) -> Result<(), MarkupError> {
    let tag = root.tag_name();
    let ns_ok = tag.namespace().is_none_or(|ns| ns == SVG_NS);
    if tag.name() == "svg" && ns_ok {
        Ok(())
    } else {
        Err(MarkupError::NotSvgRoot(tag.name().to_owned()))
    }
}

/// Elements that run script, embed foreign documents, or rewrite attributes
/// at runtime. Dropped with their whole subtree.
const DROPPED_ELEMENTS: &[&str] = &[
    "script",
    "foreignObject",
    "iframe",
    "embed",
    "object",
    "handler",
    "animate",
    "animateMotion",
    "animateTransform",
    "set",
];

fn is_executable_element(node: Node<'_, '_>) -> bool {
    let name = node.tag_name().name();
    DROPPED_ELEMENTS.iter().any(|dropped| dropped.eq_ignore_ascii_case(name))
}

fn is_unsafe_attribute(attr: &roxmltree::Attribute<'_, '_>) -> bool {
    let name = attr.name();
    if name.len() > 2 && name.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("on")) {
        return true;
    }
    // `values` lists are `;`-separated, so any entry may carry the scheme.
    attr.value().split(';').any(is_script_url)
}

fn qualified_name(node: Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace().and_then(|ns| node.lookup_prefix(ns)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", tag.name()),
        _ => tag.name().to_owned(),
    }
}

/// Emit `xmlns` declarations that are in scope here but not on the parent.
fn write_namespace_decls(node: Node<'_, '_>, out: &mut String) {
    let parent = node.parent_element();
    for ns in node.namespaces() {
        if ns.name() == Some("xml") {
            continue;
        }
        let inherited = parent.is_some_and(|p| p.namespaces().any(|pns| pns.name() == ns.name() && pns.uri() == ns.uri()));
        if inherited {
            continue;
        }
        match ns.name() {
            Some(prefix) => out.push_str(&format!(" xmlns:{prefix}=\"{}\"", escape_attr(ns.uri()))),
            None => out.push_str(&format!(" xmlns=\"{}\"", escape_attr(ns.uri()))),
        }
    }
}

fn write_attribute(node: Node<'_, '_>, attr: &roxmltree::Attribute<'_, '_>, out: &mut String) {
    if is_unsafe_attribute(attr) {
        return;
    }
    let name = match attr.namespace().and_then(|ns| node.lookup_prefix(ns)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", attr.name()),
        _ => attr.name().to_owned(),
    };
    out.push_str(&format!(" {name}=\"{}\"", escape_attr(attr.value())));
}

fn write_element(node: Node<'_, '_>, out: &mut String) {
    out.push('<');
    out.push_str(&qualified_name(node));
    write_namespace_decls(node, out);
    for attr in node.attributes() {
        write_attribute(node, &attr, out);
    }
    write_children_and_close(node, out);
}

fn write_children_and_close(node: Node<'_, '_>, out: &mut String) {
    let mut body = String::new();
    for child in node.children() {
        if child.is_element() {
            if !is_executable_element(child) {
                write_element(child, &mut body);
            }
        } else if child.is_text() {
            if let Some(text) = child.text() {
                body.push_str(&escape_text(text));
            }
        }
    }

    if body.is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');
        out.push_str(&body);
        out.push_str("</");
        out.push_str(&qualified_name(node));
        out.push('>');
    }
}
