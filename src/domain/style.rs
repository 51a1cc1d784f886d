//! Glyphs used to draw connectors and continuation lines.

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Render glyphs.
///
/// Children are indented by the width of `continuation`/`blank` and must land
/// on the last character of the parent's `connector`, so all three have to be
/// equally wide.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderStyle {
    /// Fill character padding a label up to its sibling group width
    pub dash: char,
    /// Drawn after the padded label of a node with children
    pub connector: String,
    /// Indent below a node that has later siblings
    pub continuation: String,
    /// Indent below a last or only sibling
    pub blank: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            dash: '-',
            connector: "---+".into(),
            continuation: "|   ".into(),
            blank: "    ".into(),
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> DomainResult<()> {
        let width = self.connector.chars().count();
        if width == 0 {
            return Err(DomainError::InvalidStyle {
                message: "connector must not be empty".into(),
            });
        }
        for (name, segment) in [("continuation", &self.continuation), ("blank", &self.blank)] {
            let seg_width = segment.chars().count();
            if seg_width != width {
                return Err(DomainError::InvalidStyle {
                    message: format!(
                        "{} is {} characters wide, connector is {}",
                        name, seg_width, width
                    ),
                });
            }
        }
        Ok(())
    }
}
