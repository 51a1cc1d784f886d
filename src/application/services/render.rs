//! Tree rendering service
//!
//! Handles the file-to-file use case: validate paths, read the notation,
//! parse it, render it and replace the output file.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{join_lines, parse, Node, RenderStyle, Renderer};
use crate::infrastructure::traits::FileSystem;

/// Summary of a completed rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    /// Valued nodes in the parsed tree
    pub nodes: usize,
    /// Levels in the parsed tree
    pub depth: usize,
    /// Lines written to the output
    pub lines: usize,
}

/// Service for rendering tree notation files.
pub struct RenderService {
    fs: Arc<dyn FileSystem>,
    style: RenderStyle,
}

impl RenderService {
    /// Create a new render service.
    pub fn new(fs: Arc<dyn FileSystem>, style: RenderStyle) -> Self {
        Self { fs, style }
    }

    /// Validate input and output locations before any work is done.
    ///
    /// The input must be an existing regular file. An existing output must be
    /// a writable regular file, and is only accepted when `overwrite` is set.
    pub fn check_paths(&self, input: &Path, output: &Path, overwrite: bool) -> ApplicationResult<()> {
        if !self.fs.is_file(input) {
            return Err(ApplicationError::InputUnreadable(input.to_path_buf()));
        }
        if self.fs.exists(output) {
            if !overwrite {
                return Err(ApplicationError::OutputExists(output.to_path_buf()));
            }
            if !self.fs.is_file(output)
                || !self
                    .fs
                    .is_writable(output)
                    .with_path_context("inspect output", output)?
            {
                return Err(ApplicationError::OutputNotWritable(output.to_path_buf()));
            }
        }
        Ok(())
    }

    /// Render tree notation to text, each line newline-terminated.
    pub fn render_text(&self, text: &str) -> ApplicationResult<String> {
        let (_, lines) = self.build(text)?;
        Ok(to_text(&lines))
    }

    /// Render the notation in `input` into `output`.
    ///
    /// Nothing is written unless parsing succeeds.
    #[instrument(level = "debug", skip(self))]
    pub fn render_file(
        &self,
        input: &Path,
        output: &Path,
        overwrite: bool,
    ) -> ApplicationResult<RenderReport> {
        self.check_paths(input, output, overwrite)?;

        let content = self.fs.read_to_string(input).map_err(|e| {
            debug!("read failed: {}", e);
            ApplicationError::InputUnreadable(input.to_path_buf())
        })?;

        let (tree, lines) = self.build(&content)?;
        self.fs
            .write(output, &to_text(&lines))
            .with_path_context("write output", output)?;

        let report = RenderReport {
            nodes: tree.node_count(),
            depth: tree.depth(),
            lines: lines.len(),
        };
        info!(
            "rendered {} nodes ({} levels) into {}",
            report.nodes,
            report.depth,
            output.display()
        );
        Ok(report)
    }

    fn build(&self, text: &str) -> ApplicationResult<(Node, Vec<String>)> {
        let joined = join_lines(text);
        let tree = parse(&joined)?;
        let lines = Renderer::new(&self.style).lines(&tree);
        Ok((tree, lines))
    }
}

fn to_text(lines: &[String]) -> String {
    lines.iter().fold(String::new(), |mut acc, line| {
        acc.push_str(line);
        acc.push('\n');
        acc
    })
}
