use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use tabview::cli::{CliArgs, Command, RenderArgs};
use tabview::{Delimiter, DocumentHandle, EngineConfig};

/// Upper bound for a single load + parse cycle
const LOAD_TIMEOUT: Duration = Duration::from_secs(300);

fn main() -> Result<()> {
    tabview::tracing::init();

    let args = CliArgs::parse();
    let config = args.load_config();

    match &args.command {
        Command::Render(render) => run_render(config, render),
        Command::Detect { path } => {
            let handle = open_document(config, path, None)?;
            let delimiter = handle
                .delimiter()
                .ok_or_else(|| anyhow!("No delimiter determined for {}", path.display()))?;
            println!("{}", delimiter.name());
            Ok(())
        }
        Command::Stats { path, delimiter } => {
            let handle = open_document(config, path, *delimiter)?;
            let table = handle
                .current_table()
                .ok_or_else(|| anyhow!("Nothing rendered for {}", path.display()))?;
            let stats = serde_json::json!({
                "path": path,
                "rows": table.row_count(),
                "columns": table.column_count(),
                "max_row_width": table.max_row_width(),
                "delimiter": table.delimiter,
                "summary": table.summary(),
            });
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        Command::InitConfig { force } => {
            let path = args
                .config_path()
                .ok_or_else(|| anyhow!("No config directory available"))?;
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            EngineConfig::default()
                .save_to(&path)
                .map_err(|e| anyhow!(e))?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn run_render(mut config: EngineConfig, render: &RenderArgs) -> Result<()> {
    render.apply_limits(&mut config);
    let handle = open_document(config, &render.path, render.delimiter)?;

    let document = handle
        .current()
        .ok_or_else(|| anyhow!("Nothing rendered for {}", render.path.display()))?;
    eprintln!("{}", document.table.summary());

    match render.output_path() {
        Some(output) => {
            std::fs::write(output, &document.markup)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Wrote {}", output.display());
            if render.open {
                open::that(output)
                    .with_context(|| format!("Failed to open {}", output.display()))?;
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(document.markup.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

/// Load `path` through the coordinator and wait for the result
fn open_document(
    config: EngineConfig,
    path: &Path,
    delimiter: Option<Delimiter>,
) -> Result<DocumentHandle> {
    let mut handle = DocumentHandle::new(config);
    handle.load(path);
    if let Some(delimiter) = delimiter {
        // Queued until the load completes, then applied as an override
        handle.change_delimiter(delimiter);
    }

    if !handle.wait_idle(LOAD_TIMEOUT) {
        bail!("Timed out loading {}", path.display());
    }
    if let Some(err) = handle.last_error() {
        bail!("{}", err.user_message());
    }
    Ok(handle)
}
