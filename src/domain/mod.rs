//! Domain layer: tree model, parser and renderer
//!
//! This layer is independent of external concerns (no file I/O, no CLI, no config loading).

pub mod error;
pub mod node;
pub mod parser;
pub mod renderer;
pub mod style;

pub use error::{DomainError, DomainResult};
pub use node::Node;
pub use parser::{join_lines, parse};
pub use renderer::{render, render_with_style, write_tree, Renderer};
pub use style::RenderStyle;
