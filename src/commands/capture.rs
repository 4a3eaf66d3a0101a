use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use siteflow_lib::{
    capture_page, capture_url, write_capture, CaptureOutput, PageSnapshot, Result,
    SiteflowError, SiteflowOutput, SourceDescriptor, SourceKind, Viewport,
    SITEFLOW_OUTPUT_VERSION,
};
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::{
    format_effective_capture, load_config, resolve_browser_options, CaptureArgs,
    CaptureFlagSources,
};

/// Run the capture command.
#[allow(clippy::too_many_arguments)]
pub async fn run_capture(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    format: OutputFormat,
    url: Option<String>,
    snapshot: Option<PathBuf>,
    viewport: Viewport,
    output_dir: PathBuf,
    output: Option<PathBuf>,
    nav_timeout: u64,
    network_idle_timeout: u64,
    process_timeout: u64,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };
    let flags = CaptureFlagSources::from_args(raw_args);
    let options = resolve_browser_options(
        CaptureArgs {
            viewport,
            nav_timeout,
            network_idle_timeout,
            process_timeout,
        },
        &config,
        &flags,
    );
    if verbose {
        debug!("{}", format_effective_capture(&options, config_path.as_deref()));
    }

    let (source, page, viewport) = match (url, snapshot) {
        (Some(url), _) => match capture_url(&url, &options).await {
            Ok(page) => (
                SourceDescriptor {
                    kind: SourceKind::Url,
                    value: url,
                },
                page,
                Some(options.viewport),
            ),
            Err(err) => return render_error(err, format, output),
        },
        (None, Some(path)) => match load_snapshot(&path) {
            Ok(page) => (
                SourceDescriptor {
                    kind: SourceKind::Snapshot,
                    value: path.display().to_string(),
                },
                page,
                None,
            ),
            Err(err) => return render_error(err, format, output),
        },
        (None, None) => {
            return render_error(
                SiteflowError::Config("Pass either --url or --snapshot".to_string()),
                format,
                output,
            )
        }
    };

    let document = capture_page(&page);
    let node_count = document.count_nodes();
    let output_path = match write_capture(
        &output_dir,
        &config.capture.file_prefix,
        &document,
        Utc::now(),
    ) {
        Ok(path) => path,
        Err(err) => return render_error(err, format, output),
    };
    info!(
        nodes = node_count,
        path = %output_path.display(),
        "captured document"
    );

    let body = SiteflowOutput::Capture(CaptureOutput {
        version: SITEFLOW_OUTPUT_VERSION.to_string(),
        source,
        viewport,
        document_name: document.name,
        node_count,
        output_path,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(SiteflowError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}

fn load_snapshot(path: &Path) -> Result<PageSnapshot> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        SiteflowError::Config(format!(
            "Failed to read snapshot {}: {}",
            path.display(),
            err
        ))
    })?;
    Ok(serde_json::from_str(&text)?)
}
