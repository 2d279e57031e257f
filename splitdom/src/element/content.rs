use super::Element;

/// What an element holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    /// Plain text, escaped when serialized.
    Text(String),
    /// Pre-rendered markup, emitted verbatim.
    Markup(String),
    Children(Vec<Element>),
}

impl Content {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
