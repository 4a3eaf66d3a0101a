mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_capture, run_import, run_serve};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Capture {
            url,
            snapshot,
            viewport,
            output_dir,
            output,
            nav_timeout,
            network_idle_timeout,
            process_timeout,
        } => {
            run_capture(
                &raw_args,
                args.config,
                args.verbose,
                args.format,
                url,
                snapshot,
                viewport,
                output_dir,
                output,
                nav_timeout,
                network_idle_timeout,
                process_timeout,
            )
            .await
        }
        Commands::Import {
            files,
            output,
            fonts,
        } => run_import(args.config, args.format, files, output, fonts).await,
        Commands::Serve { fonts } => run_serve(args.config, args.format, fonts).await,
    }
}

/// Logs go to stderr so stdout stays machine-readable. `--verbose` forces debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
