//! Parser for the parenthesized tree notation.
//!
//! ```text
//! tree     := '(' siblings
//! siblings := (node_or_sep)* ')'?
//! node     := digits ['(' siblings]
//! ```
//!
//! Any character that is neither an ASCII digit nor a parenthesis terminates
//! the pending numeral. Unbalanced parentheses are tolerated: a missing `)`
//! simply ends the scan, and text after the top-level group is ignored.

use std::str::Chars;

use tracing::{debug, instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;

/// Concatenate all lines of `text` with no separator.
///
/// Line breaks never act as sibling separators, so `"1\n2"` joins to `"12"`.
pub fn join_lines(text: &str) -> String {
    text.lines().collect()
}

/// Parse raw tree notation into a synthetic root.
///
/// Leading and trailing whitespace is trimmed and everything up to and
/// including the first `(` is discarded. Input without any `(` yields an
/// empty root. Nesting depth is only bounded by memory.
///
/// # Errors
///
/// Returns [`DomainError::NumeralConversion`] if a digit run does not fit
/// into an `i64`.
#[instrument(level = "debug", skip(raw), fields(len = raw.len()))]
pub fn parse(raw: &str) -> DomainResult<Node> {
    let text = raw.trim();

    let Some(open) = text.find('(') else {
        debug!("no opening parenthesis, empty tree");
        return Ok(Node::root());
    };

    let skipped = text[..open].chars().count() + 1;
    let mut scanner = Scanner::new(&text[open + 1..], skipped);
    let root = scanner.scan()?;

    let trailing = scanner.chars.count();
    if trailing > 0 {
        debug!("ignoring {} characters after the top-level group", trailing);
    }
    if scanner.unclosed > 0 {
        warn!("input ended with {} unclosed level(s)", scanner.unclosed);
    }
    debug!("parsed {} nodes", root.node_count());
    Ok(root)
}

/// Where a finished level hands its node back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// The top-level group; closing it ends the scan.
    Top,
    /// Child index in the enclosing level's node.
    Child(usize),
    /// Group opened without a current sibling: scanned, then dropped.
    Discard,
}

/// One open nesting level.
///
/// The digit buffer and the current sibling are local to the level.
#[derive(Debug)]
struct Frame {
    node: Node,
    slot: Slot,
    digits: String,
    digits_at: usize,
    current: Option<usize>,
}

impl Frame {
    fn new(node: Node, slot: Slot, offset: usize) -> Self {
        Self {
            node,
            slot,
            digits: String::new(),
            digits_at: offset,
            current: None,
        }
    }

    fn push_digit(&mut self, at: usize, c: char) {
        if self.digits.is_empty() {
            self.digits_at = at;
        }
        self.digits.push(c);
    }

    /// Append the pending numeral as a sibling, optionally making it current.
    fn flush(&mut self, make_current: bool) -> DomainResult<()> {
        if let Some(node) = take_numeral(&mut self.digits, self.digits_at)? {
            self.node.children.push(node);
            if make_current {
                self.current = Some(self.node.children.len() - 1);
            }
        }
        Ok(())
    }

    /// Open a level below the current sibling, detaching it while it fills.
    fn descend(&mut self, at: usize) -> Frame {
        match self.current {
            Some(i) => {
                let child = std::mem::take(&mut self.node.children[i]);
                Frame::new(child, Slot::Child(i), at + 1)
            }
            None => Frame::new(Node::root(), Slot::Discard, at + 1),
        }
    }
}

/// Forward-only character cursor driving an explicit stack of levels.
struct Scanner<'a> {
    chars: Chars<'a>,
    /// Character offset of the next character within the trimmed input
    offset: usize,
    unclosed: usize,
}

impl<'a> Scanner<'a> {
    fn new(body: &'a str, offset: usize) -> Self {
        Self {
            chars: body.chars(),
            offset,
            unclosed: 0,
        }
    }

    fn next_char(&mut self) -> Option<(usize, char)> {
        let c = self.chars.next()?;
        let at = self.offset;
        self.offset += 1;
        Some((at, c))
    }

    /// Scan until the top-level group closes or the input ends.
    fn scan(&mut self) -> DomainResult<Node> {
        let mut stack = vec![Frame::new(Node::root(), Slot::Top, self.offset)];

        while let Some((at, c)) = self.next_char() {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            match c {
                '0'..='9' => frame.push_digit(at, c),
                '(' => {
                    frame.flush(true)?;
                    let child = frame.descend(at);
                    stack.push(child);
                }
                ')' => {
                    frame.flush(false)?;
                    if let Some(root) = close(&mut stack, at) {
                        return Ok(root);
                    }
                }
                _ => frame.flush(true)?,
            }
        }

        // pending digits of unclosed levels are never converted
        self.unclosed = stack.len();
        let mut root = Node::root();
        while !stack.is_empty() {
            if let Some(top) = close(&mut stack, self.offset) {
                root = top;
            }
        }
        Ok(root)
    }
}

/// Pop the innermost level and hand its node back to the enclosing one.
///
/// Returns the root once the top-level group is closed.
fn close(stack: &mut Vec<Frame>, at: usize) -> Option<Node> {
    let frame = stack.pop()?;
    match frame.slot {
        Slot::Top => Some(frame.node),
        Slot::Child(i) => {
            if let Some(parent) = stack.last_mut() {
                parent.node.children[i] = frame.node;
            }
            None
        }
        Slot::Discard => {
            debug!(
                "dropped group ending at offset {} ({} nodes)",
                at,
                frame.node.node_count()
            );
            None
        }
    }
}

/// Convert and clear the pending digits; a blank buffer yields no node.
fn take_numeral(digits: &mut String, offset: usize) -> DomainResult<Option<Node>> {
    if digits.trim().is_empty() {
        return Ok(None);
    }
    let numeral = std::mem::take(digits);
    let value = numeral
        .parse::<i64>()
        .map_err(|source| DomainError::NumeralConversion {
            numeral,
            offset,
            source,
        })?;
    Ok(Some(Node::leaf(value)))
}
