//! Arena of mounted nodes.
//!
//! Nodes are addressed by [`NodeId`] handles. Removing a subtree frees its
//! slots for reuse; a stale handle simply resolves to `None`.

use std::collections::HashMap;

use crate::element::{Content, Element};
use crate::markup;
use crate::types::InlineStyle;

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Leaf content of a mounted node. Child elements become child nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeContent {
    #[default]
    Empty,
    Text(String),
    Markup(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub content: NodeContent,
    pub style: InlineStyle,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            content: NodeContent::Empty,
            style: InlineStyle::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    ids: HashMap<String, NodeId>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new("body"))],
            free: Vec::new(),
            ids: HashMap::new(),
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    pub fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied().filter(|n| self.contains(*n))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The node itself followed by its ancestors up to the root.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.contains(node).then_some(node), move |n| {
            self.parent(*n)
        })
    }

    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(node).any(|n| n == ancestor)
    }

    /// Preorder walk of a subtree, starting with `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        out
    }

    pub fn find_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.get(*n).is_some_and(|node| node.has_class(class)))
            .collect()
    }

    pub fn first_by_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| self.get(*n).is_some_and(|node| node.has_class(class)))
    }

    /// Mount an element tree as the last child of `parent`.
    ///
    /// Returns `None` if `parent` is not a live node.
    pub fn mount(&mut self, parent: NodeId, element: &Element) -> Option<NodeId> {
        if !self.contains(parent) {
            log::warn!("[document] mount into missing parent {parent}");
            return None;
        }
        let node = self.insert(element);
        self.attach(parent, node);
        Some(node)
    }

    fn insert(&mut self, element: &Element) -> NodeId {
        let mut node = Node::new(&element.tag);
        node.id = element.id.clone();
        node.classes = element.classes.clone();
        node.attrs = element.attrs.clone();
        node.style = element.style;
        node.content = match &element.content {
            Content::Text(text) => NodeContent::Text(text.clone()),
            Content::Markup(markup) => NodeContent::Markup(markup.clone()),
            Content::None | Content::Children(_) => NodeContent::Empty,
        };

        let id = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        };
        if let Some(dom_id) = &element.id {
            self.ids.insert(dom_id.clone(), id);
        }

        for child in element.child_elements() {
            let child_id = self.insert(child);
            self.attach(id, child_id);
        }
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Remove a node and its subtree. The root cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root || !self.contains(node) {
            return false;
        }
        if let Some(parent) = self.parent(node)
            && let Some(parent_node) = self.get_mut(parent)
        {
            parent_node.children.retain(|c| *c != node);
        }
        for id in self.descendants(node) {
            if let Some(removed) = self.nodes[id.0].take() {
                if let Some(dom_id) = removed.id
                    && self.ids.get(&dom_id) == Some(&id)
                {
                    self.ids.remove(&dom_id);
                }
                self.free.push(id.0);
            }
        }
        true
    }

    /// Remove every child of `node`, keeping the node itself.
    pub fn clear_children(&mut self, node: NodeId) {
        let children: Vec<NodeId> = self.children(node).to_vec();
        for child in children {
            self.remove(child);
        }
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.get_mut(node) {
            match n.attrs.iter_mut().find(|(k, _)| k == name) {
                Some(existing) => existing.1 = value.to_string(),
                None => n.attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> bool {
        match self.get_mut(node) {
            Some(n) => {
                let before = n.attrs.len();
                n.attrs.retain(|(k, _)| k != name);
                before != n.attrs.len()
            }
            None => false,
        }
    }

    pub fn style_mut(&mut self, node: NodeId) -> Option<&mut InlineStyle> {
        self.get_mut(node).map(|n| &mut n.style)
    }

    /// Serialize a node and its subtree.
    pub fn outer_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, node);
        out
    }

    /// Serialize only the children and content of a node.
    pub fn inner_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_inner(&mut out, node);
        out
    }

    fn write_node(&self, out: &mut String, node: NodeId) {
        let Some(n) = self.get(node) else {
            return;
        };
        markup::write_open_tag(out, &n.tag, n.id.as_deref(), &n.classes, &n.attrs, &n.style);
        if !markup::is_void(&n.tag) {
            self.write_inner(out, node);
        }
        markup::write_close_tag(out, &n.tag);
    }

    fn write_inner(&self, out: &mut String, node: NodeId) {
        let Some(n) = self.get(node) else {
            return;
        };
        match &n.content {
            NodeContent::Empty => {}
            NodeContent::Text(text) => out.push_str(&markup::escape_text(text)),
            NodeContent::Markup(markup) => out.push_str(markup),
        }
        for child in &n.children {
            self.write_node(out, *child);
        }
    }
}
