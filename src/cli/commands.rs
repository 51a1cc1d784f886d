//! Command dispatch

use std::path::Path;

use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::ServiceContainer;

/// Run the command described by `cli`.
///
/// `main` answers `--generate` and `--info` itself; any other `Cli` without
/// both paths is a usage error.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    if cli.show_config {
        output::info(&settings.to_toml()?);
        return Ok(());
    }

    match (&cli.input, &cli.output) {
        (Some(input), Some(out)) => {
            let container = ServiceContainer::new(settings);
            _render(&container, input, out, !cli.no_clobber, cli.verbose)
        }
        _ => Err(CliError::Usage(
            "expected input file name and output file name".into(),
        )),
    }
}

#[instrument(skip(container))]
fn _render(
    container: &ServiceContainer,
    input: &Path,
    out: &Path,
    clobber: bool,
    verbose: bool,
) -> CliResult<()> {
    let overwrite = container.settings.overwrite && clobber;
    let report = container.render.render_file(input, out, overwrite)?;
    if verbose {
        output::success(&format!(
            "{} -> {} ({} nodes, {} lines)",
            input.display(),
            out.display(),
            report.nodes,
            report.lines
        ));
    }
    Ok(())
}
