//! Pseudographical renderer for integer trees.
//!
//! A node with children is drawn as its label, padded with dashes to the
//! widest label of its sibling group, followed by the connector. Its children
//! start in the column of the connector's last character:
//!
//! ```text
//! 1---+
//!     7-----+
//!     |     5
//!     |     6
//!     100
//! ```

use std::io::{self, Write};

use tracing::{instrument, trace};

use crate::domain::node::Node;
use crate::domain::style::RenderStyle;

/// Render `root` with the default style.
pub fn render(root: &Node) -> Vec<String> {
    render_with_style(root, &RenderStyle::default())
}

pub fn render_with_style(root: &Node, style: &RenderStyle) -> Vec<String> {
    Renderer::new(style).lines(root)
}

/// Write the rendering of `root` to `sink`, one newline-terminated line per node.
///
/// Only fails if the sink does.
pub fn write_tree<W: Write>(root: &Node, style: &RenderStyle, sink: &mut W) -> io::Result<()> {
    for line in render_with_style(root, style) {
        writeln!(sink, "{}", line)?;
    }
    Ok(())
}

/// Depth-first, pre-order tree renderer.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'s> {
    style: &'s RenderStyle,
}

impl<'s> Renderer<'s> {
    pub fn new(style: &'s RenderStyle) -> Self {
        Self { style }
    }

    /// Lines for every valued node below `root`; the root itself emits none.
    #[instrument(level = "debug", skip_all)]
    pub fn lines(&self, root: &Node) -> Vec<String> {
        let mut out = Vec::new();
        let mut pending = vec![Visit {
            node: root,
            prefix: String::new(),
            correction_width: 0,
            sibling_count: root.children.len(),
            is_last: false,
        }];
        while let Some(visit) = pending.pop() {
            self.visit(visit, &mut pending, &mut out);
        }
        out
    }

    /// Emit the line of one node and schedule its children in order.
    fn visit<'n>(&self, visit: Visit<'n>, pending: &mut Vec<Visit<'n>>, out: &mut Vec<String>) {
        let Visit {
            node,
            prefix,
            correction_width,
            sibling_count,
            is_last,
        } = visit;

        if let Some(label) = node.label() {
            let mut line = String::with_capacity(prefix.len() + correction_width + 8);
            line.push_str(&prefix);
            line.push_str(&label);
            if !node.children.is_empty() {
                let dashes = correction_width.saturating_sub(label.chars().count());
                line.extend(std::iter::repeat(self.style.dash).take(dashes));
                line.push_str(&self.style.connector);
            }
            trace!("{}", line);
            out.push(line);
        }

        let child_width = node
            .children
            .iter()
            .map(Node::label_width)
            .max()
            .unwrap_or(0);
        let child_count = node.children.len();

        let mut child_prefix = prefix;
        if !node.is_root() {
            if sibling_count > 1 && !is_last {
                child_prefix.push_str(&self.style.continuation);
            } else {
                child_prefix.push_str(&self.style.blank);
            }
        }
        child_prefix.extend(std::iter::repeat(' ').take(correction_width.saturating_sub(1)));

        // reversed so the first child is popped first
        for (i, child) in node.children.iter().enumerate().rev() {
            pending.push(Visit {
                node: child,
                prefix: child_prefix.clone(),
                correction_width: child_width,
                sibling_count: child_count,
                is_last: i + 1 == child_count,
            });
        }
    }
}

/// A node waiting to be drawn; `correction_width` is the widest label
/// among its siblings.
struct Visit<'n> {
    node: &'n Node,
    prefix: String,
    correction_width: usize,
    sibling_count: usize,
    is_last: bool,
}
