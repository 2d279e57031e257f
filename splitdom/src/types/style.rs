use super::Direction;

/// One `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// A selector with its ordered declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    /// Builder form of [`StyleRule::set`].
    pub fn declare(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a declaration, replacing an existing one for the same property in place.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .declarations
            .iter_mut()
            .find(|d| d.property == property)
        {
            Some(existing) => existing.value = value,
            None => self.declarations.push(Declaration {
                property: property.to_string(),
                value,
            }),
        }
    }

    /// Remove a declaration. Returns true if it existed.
    pub fn remove(&mut self, property: &str) -> bool {
        let before = self.declarations.len();
        self.declarations.retain(|d| d.property != property);
        before != self.declarations.len()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn to_css(&self) -> String {
        let body: Vec<String> = self
            .declarations
            .iter()
            .map(|d| format!("{}: {};", d.property, d.value))
            .collect();
        format!("{} {{ {} }}", self.selector, body.join(" "))
    }
}

/// Ordered set of rules keyed by selector.
///
/// Later rules win over earlier ones when both match, so insertion order is
/// preserved and updates to an existing selector happen in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule(&self, selector: &str) -> Option<&StyleRule> {
        self.rules.iter().find(|r| r.selector == selector)
    }

    /// Get the rule for a selector, appending an empty one if missing.
    pub fn rule_mut(&mut self, selector: &str) -> &mut StyleRule {
        let index = match self.rules.iter().position(|r| r.selector == selector) {
            Some(index) => index,
            None => {
                self.rules.push(StyleRule::new(selector));
                self.rules.len() - 1
            }
        };
        &mut self.rules[index]
    }

    /// Insert a rule, replacing any rule with the same selector in place.
    pub fn upsert(&mut self, rule: StyleRule) {
        match self.rules.iter_mut().find(|r| r.selector == rule.selector) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn remove(&mut self, selector: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.selector != selector);
        before != self.rules.len()
    }

    pub fn retain(&mut self, f: impl FnMut(&StyleRule) -> bool) {
        self.rules.retain(f);
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn to_css(&self) -> String {
        self.rules
            .iter()
            .filter(|r| !r.is_empty())
            .map(StyleRule::to_css)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Per-node style written directly onto a mounted node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InlineStyle {
    pub margin_left: i32,
    pub margin_top: i32,
    pub left: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub direction: Direction,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn left(mut self, left: i32) -> Self {
        self.left = Some(left);
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Attribute text, or `None` when nothing is set.
    pub fn to_css(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.margin_left != 0 {
            parts.push(format!("margin-left: {}px;", self.margin_left));
        }
        if self.margin_top != 0 {
            parts.push(format!("margin-top: {}px;", self.margin_top));
        }
        if let Some(left) = self.left {
            parts.push(format!("left: {left}px;"));
        }
        if let Some(width) = self.width {
            parts.push(format!("width: {width}px;"));
        }
        if let Some(height) = self.height {
            parts.push(format!("height: {height}px;"));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Parse a pixel length such as `120px` or `120`.
pub(crate) fn parse_px(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().map(|v| v.max(0.0).round() as u32)
}
