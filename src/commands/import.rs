use std::path::{Path, PathBuf};
use std::process::ExitCode;

use siteflow_lib::schema;
use siteflow_lib::session::{BatchItem, Command, Reply, Session};
use siteflow_lib::{
    ImportOutput, MemoryCanvas, Result, SiteflowError, SiteflowOutput, SITEFLOW_OUTPUT_VERSION,
};
use tracing::{debug, info, warn};

use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_import, render_error, write_output};
use crate::settings::{load_config, resolve_installed_fonts};

/// Run the import command: one file is a single import, several are a batch.
pub async fn run_import(
    config_path: Option<PathBuf>,
    format: OutputFormat,
    files: Vec<PathBuf>,
    scene_output: Option<PathBuf>,
    fonts: Option<Vec<String>>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    let installed = match resolve_installed_fonts(fonts.as_deref(), &config) {
        Ok(fonts) => fonts,
        Err(err) => return render_error(err, format, None),
    };
    let command = match build_command(&files) {
        Ok(command) => command,
        Err(err) => return render_error(err, format, None),
    };

    let mut canvas = MemoryCanvas::new(installed);
    let mut messages = Vec::new();
    let (roots, failed) = {
        let mut session = Session::new(&mut canvas, &config);
        session
            .handle(command, &mut |reply: Reply| {
                log_reply(&reply);
                messages.push(reply);
            })
            .await;
        (session.placed().to_vec(), session.failed_items())
    };

    if let Some(path) = &scene_output {
        if let Err(err) = write_scene(&canvas, path) {
            return render_error(err, format, None);
        }
    }

    let imported = roots.len();
    let body = SiteflowOutput::Import(ImportOutput {
        version: SITEFLOW_OUTPUT_VERSION.to_string(),
        inputs: files.iter().map(|p| p.display().to_string()).collect(),
        imported,
        failed,
        roots,
        messages: messages
            .into_iter()
            .filter(|m| !matches!(m, Reply::Progress { .. }))
            .collect(),
        scene_path: scene_output,
    });
    if let Err(err) = write_output(&body, format, None) {
        return render_error(SiteflowError::Unknown(err.to_string()), format, None);
    }
    exit_code_for_import(imported)
}

fn build_command(files: &[PathBuf]) -> Result<Command> {
    match files {
        [single] => {
            let document = schema::from_json(&read_input(single)?)?;
            Ok(Command::ImportJson {
                data: Some(document),
            })
        }
        many => {
            let items = many
                .iter()
                .map(|path| {
                    Ok(BatchItem {
                        name: path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.display().to_string()),
                        data: read_input(path)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Command::ImportBatch { items })
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| {
        SiteflowError::Config(format!("Failed to read {}: {}", path.display(), err))
    })
}

fn write_scene(canvas: &MemoryCanvas, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(&canvas.page())?;
    std::fs::write(path, content)?;
    Ok(())
}

fn log_reply(reply: &Reply) {
    match reply {
        Reply::Status { message } | Reply::Success { message } => info!("{message}"),
        Reply::Error { message } => warn!("{message}"),
        Reply::Progress {
            current,
            total,
            name,
        } => debug!(current, total, item = %name, "batch progress"),
    }
}
