//! Render a parenthesized tree of integers as a pseudographical diagram.
//!
//! ```
//! use treerender::domain::{parse, render};
//!
//! let tree = parse("(1(2)(3))").unwrap();
//! assert_eq!(render(&tree), vec!["1---+", "    2", "    3"]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{parse, render, DomainError, Node, RenderStyle};
