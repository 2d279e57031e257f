//! Markup serialization for element trees and mounted nodes.

use crate::element::{Content, Element};
use crate::types::InlineStyle;

/// Tags that never carry content or a closing tag.
const VOID_TAGS: &[&str] = &["input", "br", "img", "hr"];

pub fn is_void(tag: &str) -> bool {
    VOID_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

pub(crate) fn write_open_tag(
    out: &mut String,
    tag: &str,
    id: Option<&str>,
    classes: &[String],
    attrs: &[(String, String)],
    style: &InlineStyle,
) {
    out.push('<');
    out.push_str(tag);
    if let Some(id) = id {
        out.push_str(&format!(" id=\"{}\"", escape_attr(id)));
    }
    if !classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape_attr(&classes.join(" "))));
    }
    for (name, value) in attrs {
        if value.is_empty() {
            out.push(' ');
            out.push_str(name);
        } else {
            out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
        }
    }
    if let Some(css) = style.to_css() {
        out.push_str(&format!(" style=\"{}\"", escape_attr(&css)));
    }
    out.push('>');
}

pub(crate) fn write_close_tag(out: &mut String, tag: &str) {
    if !is_void(tag) {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

pub(crate) fn write_element(out: &mut String, element: &Element) {
    write_open_tag(
        out,
        &element.tag,
        element.id.as_deref(),
        &element.classes,
        &element.attrs,
        &element.style,
    );
    if !is_void(&element.tag) {
        write_content(out, &element.content);
    }
    write_close_tag(out, &element.tag);
}

pub(crate) fn write_content(out: &mut String, content: &Content) {
    match content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape_text(text)),
        Content::Markup(markup) => out.push_str(markup),
        Content::Children(children) => {
            for child in children {
                write_element(out, child);
            }
        }
    }
}
