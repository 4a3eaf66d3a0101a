use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use siteflow_lib::session::Reply;
use siteflow_lib::{ErrorOutput, SiteflowError, SiteflowOutput, SITEFLOW_OUTPUT_VERSION};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &SiteflowOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: SiteflowError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = SiteflowOutput::Error(ErrorOutput {
        version: SITEFLOW_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Exit code 2 is fatal; 1 means an import finished with nothing imported.
    ExitCode::from(2)
}

fn write_json_output(
    body: &SiteflowOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

fn write_pretty_output(body: &SiteflowOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content = serde_json::to_string_pretty(body)
        .unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &SiteflowOutput, colorize: bool) -> String {
    let mut buf = String::new();
    match body {
        SiteflowOutput::Capture(out) => {
            let header = color("[CAPTURE]", "36", colorize);
            writeln!(buf, "{header} {}", out.source.value).ok();
            if let Some(viewport) = out.viewport {
                writeln!(buf, "Viewport: {viewport}").ok();
            }
            writeln!(
                buf,
                "Document: \"{}\" ({} nodes)",
                out.document_name, out.node_count
            )
            .ok();
            writeln!(buf, "Saved to: {}", out.output_path.display()).ok();
        }
        SiteflowOutput::Import(out) => {
            let ok = out.imported > 0;
            let status = color(if ok { "OK" } else { "FAILED" }, if ok { "32" } else { "31" }, colorize);
            writeln!(
                buf,
                "{status} Imported {} of {} document(s)",
                out.imported,
                out.imported + out.failed
            )
            .ok();
            for root in &out.roots {
                let failed = if root.failed > 0 {
                    color(&format!(", {} failed", root.failed), "33", colorize)
                } else {
                    String::new()
                };
                writeln!(
                    buf,
                    "- {} ({:.0}x{:.0}): {} children{}",
                    root.name, root.width, root.height, root.created, failed
                )
                .ok();
            }
            for message in &out.messages {
                match message {
                    Reply::Error { message } => {
                        writeln!(buf, "{} {message}", color("error:", "31", colorize)).ok();
                    }
                    Reply::Success { message } | Reply::Status { message } => {
                        writeln!(buf, "{message}").ok();
                    }
                    Reply::Progress { .. } => {}
                }
            }
            if let Some(path) = &out.scene_path {
                writeln!(buf, "Scene: {}", path.display()).ok();
            }
        }
        SiteflowOutput::Error(out) => {
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or(out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
        }
    }
    buf
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Exit code for an import: success if anything was imported.
pub fn exit_code_for_import(imported: usize) -> ExitCode {
    if imported > 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
