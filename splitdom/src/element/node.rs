use super::Content;
use crate::markup;
use crate::types::{Direction, InlineStyle};

/// An unmounted element tree.
///
/// Elements are plain values; mounting one into a [`crate::Document`] copies
/// it into the arena and hands back a handle to the mounted root.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub content: Content,
    pub style: InlineStyle,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            content: Content::None,
            style: InlineStyle::default(),
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    /// An `<input type=..>` control.
    pub fn input(kind: &str) -> Self {
        Self::new("input").attr("type", kind)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn markup(mut self, markup: impl Into<String>) -> Self {
        self.content = Content::Markup(markup.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            self = self.child(child);
        }
        self
    }

    pub fn style(mut self, style: InlineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.style.direction = direction;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Serialize the element and its subtree.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        markup::write_element(&mut out, self);
        out
    }

    /// Serialize only what is inside the element.
    pub fn inner_markup(&self) -> String {
        let mut out = String::new();
        markup::write_content(&mut out, &self.content);
        out
    }
}
