//! Tree node produced by the parser and consumed by the renderer.

use std::fmt;

/// A node of an integer tree.
///
/// Only the synthetic root carries no value; it exists to hold the
/// top-level sibling list and is never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Integer payload, `None` for the synthetic root
    pub value: Option<i64>,
    /// Children in insertion order
    pub children: Vec<Node>,
}

impl Node {
    /// Create an empty synthetic root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a valued node without children.
    pub fn leaf(value: i64) -> Self {
        Self {
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn with_children(value: i64, children: Vec<Node>) -> Self {
        Self {
            value: Some(value),
            children,
        }
    }

    pub fn is_root(&self) -> bool {
        self.value.is_none()
    }

    /// Decimal representation of the value, `None` for the root.
    pub fn label(&self) -> Option<String> {
        self.value.map(|v| v.to_string())
    }

    /// Width of the label in characters, 0 for the root.
    pub fn label_width(&self) -> usize {
        self.label().map(|l| l.chars().count()).unwrap_or(0)
    }

    /// Number of levels below and including this node.
    ///
    /// The root does not count as a level, so an empty tree has depth 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0usize)];
        while let Some((node, above)) = pending.pop() {
            let level = above + usize::from(!node.is_root());
            deepest = deepest.max(level);
            pending.extend(node.children.iter().map(|child| (child, level)));
        }
        deepest
    }

    /// Number of valued nodes in this subtree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += usize::from(!node.is_root());
            pending.extend(node.children.iter());
        }
        count
    }
}

/// Unlinks descendants one by one so dropping a deep chain does not recurse.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

enum Token<'a> {
    Node(&'a Node),
    Text(&'static str),
}

/// Reconstructs the parenthesized notation the tree was parsed from.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Token::Node(self)];
        while let Some(token) = pending.pop() {
            match token {
                Token::Text(text) => f.write_str(text)?,
                Token::Node(node) => {
                    if let Some(value) = node.value {
                        write!(f, "{}", value)?;
                    }
                    if node.is_root() || !node.children.is_empty() {
                        f.write_str("(")?;
                        pending.push(Token::Text(")"));
                        for (i, child) in node.children.iter().enumerate().rev() {
                            pending.push(Token::Node(child));
                            if i > 0 {
                                pending.push(Token::Text(" "));
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
