use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use siteflow_lib::session::{encode_reply, run_lines, Reply, Session};
use siteflow_lib::{MemoryCanvas, SiteflowError};
use tokio::io::BufReader;
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::formatting::render_error;
use crate::settings::{load_config, resolve_installed_fonts};

/// Run an import session over stdin/stdout, one JSON message per line.
pub async fn run_serve(
    config_path: Option<PathBuf>,
    format: OutputFormat,
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

    let mut canvas = MemoryCanvas::new(installed);
    let mut session = Session::new(&mut canvas, &config);
    info!("session ready; reading commands from stdin");

    let stdout = std::io::stdout();
    let mut emit = |reply: Reply| match encode_reply(&reply) {
        Ok(line) => {
            let mut out = stdout.lock();
            if let Err(err) = writeln!(out, "{line}").and_then(|_| out.flush()) {
                warn!(error = %err, "failed to write reply");
            }
        }
        Err(err) => warn!(error = %err, "failed to encode reply"),
    };

    let input = BufReader::new(tokio::io::stdin());
    if let Err(err) = run_lines(&mut session, input, &mut emit).await {
        return render_error(SiteflowError::Io(err), format, None);
    }
    info!(
        imported = session.placed().len(),
        failed = session.failed_items(),
        "session closed"
    );
    ExitCode::SUCCESS
}
