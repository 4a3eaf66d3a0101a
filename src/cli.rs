use clap::{Parser, Subcommand, ValueEnum};
use siteflow_lib::Viewport;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "siteflow")]
#[command(
    version,
    about = "Siteflow - Capture web pages as design documents and rebuild them on a design canvas",
    long_about = "Siteflow\n\nModes:\n- capture: snapshot a live page (or a saved page snapshot) into a design document JSON file.\n- import: rebuild one or more design documents on the in-memory canvas.\n- serve: run an import session over JSON lines on stdin/stdout.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose (debug) logging on stderr")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) with [fonts]/[import]/[capture]/[canvas] defaults; CLI flags override config"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "json",
        help = "Output format"
    )]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a page into a design document file
    Capture {
        #[arg(
            long,
            required_unless_present = "snapshot",
            conflicts_with = "snapshot",
            help = "Page to load in a headless browser (http, https or file URL)"
        )]
        url: Option<String>,

        #[arg(long, value_name = "FILE", help = "Previously dumped page snapshot JSON")]
        snapshot: Option<PathBuf>,

        #[arg(
            long,
            default_value = "1440x900",
            help = "Viewport dimensions (WIDTHxHEIGHT)"
        )]
        viewport: Viewport,

        #[arg(
            long,
            value_name = "DIR",
            default_value = ".",
            help = "Directory for the captured document; created if missing"
        )]
        output_dir: PathBuf,

        #[arg(long, short, help = "Write the output record to this file (stdout if omitted)")]
        output: Option<PathBuf>,

        #[arg(long, default_value = "30", help = "Navigation timeout (seconds)")]
        nav_timeout: u64,

        #[arg(long, default_value = "10", help = "Network idle timeout (seconds)")]
        network_idle_timeout: u64,

        #[arg(
            long,
            default_value = "45",
            help = "Process timeout (seconds) for the Playwright helper"
        )]
        process_timeout: u64,
    },

    /// Rebuild design documents on the in-memory canvas
    Import {
        #[arg(required = true, value_name = "FILE", help = "Design document JSON files")]
        files: Vec<PathBuf>,

        #[arg(long, short, value_name = "SCENE", help = "Write the resulting canvas page as JSON")]
        output: Option<PathBuf>,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Installed canvas fonts as Family:Style (comma-separated); overrides [canvas]"
        )]
        fonts: Option<Vec<String>>,
    },

    /// Run an import session reading JSON-line commands from stdin
    Serve {
        #[arg(
            long,
            value_delimiter = ',',
            help = "Installed canvas fonts as Family:Style (comma-separated); overrides [canvas]"
        )]
        fonts: Option<Vec<String>>,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, OutputFormat};
    use clap::Parser;

    #[test]
    fn capture_command_uses_defaults() {
        let cli = Cli::parse_from(["siteflow", "capture", "--url", "https://example.com"]);

        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        assert!(matches!(cli.format, OutputFormat::Json));

        match cli.command {
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
                assert_eq!(url.as_deref(), Some("https://example.com"));
                assert!(snapshot.is_none());
                assert_eq!(viewport.width, 1440);
                assert_eq!(viewport.height, 900);
                assert_eq!(output_dir, std::path::PathBuf::from("."));
                assert!(output.is_none());
                assert_eq!(nav_timeout, 30);
                assert_eq!(network_idle_timeout, 10);
                assert_eq!(process_timeout, 45);
            }
            _ => panic!("expected capture command"),
        }
    }

    #[test]
    fn capture_requires_exactly_one_source() {
        assert!(Cli::try_parse_from(["siteflow", "capture"]).is_err());
        assert!(Cli::try_parse_from([
            "siteflow",
            "capture",
            "--url",
            "https://example.com",
            "--snapshot",
            "page.json",
        ])
        .is_err());
    }

    #[test]
    fn import_command_collects_files_and_fonts() {
        let cli = Cli::parse_from([
            "siteflow",
            "--verbose",
            "import",
            "a.json",
            "b.json",
            "--fonts",
            "Inter:Regular,Roboto:Bold",
            "--output",
            "scene.json",
            "--format",
            "pretty",
            "--config",
            "siteflow.toml",
        ]);

        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Pretty));
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("siteflow.toml"))
        );
        match cli.command {
            Commands::Import {
                files,
                output,
                fonts,
            } => {
                assert_eq!(files.len(), 2);
                assert_eq!(output.as_deref(), Some(std::path::Path::new("scene.json")));
                assert_eq!(
                    fonts,
                    Some(vec!["Inter:Regular".to_string(), "Roboto:Bold".to_string()])
                );
            }
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn import_requires_a_file() {
        assert!(Cli::try_parse_from(["siteflow", "import"]).is_err());
    }

    #[test]
    fn rejects_malformed_viewport() {
        assert!(Cli::try_parse_from([
            "siteflow",
            "capture",
            "--url",
            "https://example.com",
            "--viewport",
            "wide",
        ])
        .is_err());
    }
}
