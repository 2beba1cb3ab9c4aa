//! Accessibility-tree lookup primitives.
//!
//! A [`UiNode`] is a snapshot of one control in the foreground window's
//! accessibility tree. The finders walk depth-first in child order, which
//! matches the order the platform reports children.

use regex::Regex;

/// One node of the foreground window's accessibility tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiNode {
    /// Resource id, e.g. "android:id/button1". Absent on decorative nodes.
    pub id: Option<String>,
    /// Fully qualified widget class name.
    pub class: String,
    /// Visible text, when any.
    pub text: Option<String>,
    pub children: Vec<UiNode>,
}

impl UiNode {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: UiNode) -> Self {
        self.children.push(child);
        self
    }
}

/// First node with exactly this resource id, depth-first.
pub fn find_first_by_id<'a>(root: &'a UiNode, id: &str) -> Option<&'a UiNode> {
    if root.id.as_deref() == Some(id) {
        return Some(root);
    }
    root.children
        .iter()
        .find_map(|child| find_first_by_id(child, id))
}

/// All nodes of exactly this class, depth-first.
pub fn find_by_class<'a>(root: &'a UiNode, class: &str) -> Vec<&'a UiNode> {
    let mut found = Vec::new();
    collect(root, &mut found, &|node| node.class == class);
    found
}

/// All nodes whose class matches the pattern, depth-first.
pub fn find_by_class_regex<'a>(root: &'a UiNode, pattern: &Regex) -> Vec<&'a UiNode> {
    let mut found = Vec::new();
    collect(root, &mut found, &|node| pattern.is_match(&node.class));
    found
}

fn collect<'a>(node: &'a UiNode, found: &mut Vec<&'a UiNode>, keep: &dyn Fn(&UiNode) -> bool) {
    if keep(node) {
        found.push(node);
    }
    for child in &node.children {
        collect(child, found, keep);
    }
}

/// Indented one-line-per-node rendering for debug logs.
pub fn format_tree(root: &UiNode) -> String {
    let mut out = String::new();
    render(root, 0, &mut out);
    out
}

fn render(node: &UiNode, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&node.class);
    out.push_str(" [");
    out.push_str(node.id.as_deref().unwrap_or("-"));
    out.push('(');
    out.push_str(node.text.as_deref().unwrap_or(""));
    out.push_str(")]\n");
    for child in &node.children {
        render(child, depth + 1, out);
    }
}
