use std::path::Path;
use std::time::Duration;

use siteflow_lib::config::parse_font_list;
use siteflow_lib::reconstruct::FontName;
use siteflow_lib::{BrowserOptions, Config, SiteflowError, Viewport};

/// Tracks which capture flags were explicitly provided vs. defaulted.
#[derive(Debug, Default)]
pub struct CaptureFlagSources {
    pub viewport: bool,
    pub nav_timeout: bool,
    pub network_idle_timeout: bool,
    pub process_timeout: bool,
}

impl CaptureFlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            viewport: flag_present(args, "--viewport"),
            nav_timeout: flag_present(args, "--nav-timeout"),
            network_idle_timeout: flag_present(args, "--network-idle-timeout"),
            process_timeout: flag_present(args, "--process-timeout"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Capture flags as parsed, before merging.
#[derive(Debug, Clone, Copy)]
pub struct CaptureArgs {
    pub viewport: Viewport,
    pub nav_timeout: u64,
    pub network_idle_timeout: u64,
    pub process_timeout: u64,
}

/// Merge capture flags with config, preferring CLI when flags are present.
pub fn resolve_browser_options(
    cli: CaptureArgs,
    config: &Config,
    flags: &CaptureFlagSources,
) -> BrowserOptions {
    let mut options = BrowserOptions::from_config(&config.capture);
    if flags.viewport {
        options.viewport = cli.viewport;
    }
    if flags.nav_timeout {
        options.navigation_timeout = Duration::from_secs(cli.nav_timeout);
    }
    if flags.network_idle_timeout {
        options.network_idle_timeout = Duration::from_secs(cli.network_idle_timeout);
    }
    if flags.process_timeout {
        options.process_timeout = Duration::from_secs(cli.process_timeout);
    }
    options
}

/// Canvas fonts from `--fonts`, else the `[canvas]` section.
pub fn resolve_installed_fonts(
    cli_fonts: Option<&[String]>,
    config: &Config,
) -> Result<Vec<FontName>, SiteflowError> {
    let fonts = match cli_fonts {
        Some(entries) => parse_font_list(entries),
        None => config.canvas.font_names(),
    };
    if fonts.is_empty() {
        return Err(SiteflowError::Config(
            "No canvas fonts installed; pass --fonts Family:Style".to_string(),
        ));
    }
    Ok(fonts)
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/siteflow/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, SiteflowError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        SiteflowError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        SiteflowError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective capture settings as a single-line string.
pub fn format_effective_capture(options: &BrowserOptions, config_source: Option<&Path>) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective capture config [{source}]: viewport={}, timeouts: nav={}s, network-idle={}s, process={}s, node={}",
        options.viewport,
        options.navigation_timeout.as_secs(),
        options.network_idle_timeout.as_secs(),
        options.process_timeout.as_secs(),
        options.node_command,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CaptureArgs {
        CaptureArgs {
            viewport: Viewport {
                width: 10,
                height: 20,
            },
            nav_timeout: 50,
            network_idle_timeout: 60,
            process_timeout: 70,
        }
    }

    #[test]
    fn detects_flags_with_and_without_equals() {
        let argv: Vec<String> = ["siteflow", "capture", "--viewport=800x600", "--nav-timeout", "5"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let flags = CaptureFlagSources::from_args(&argv);
        assert!(flags.viewport);
        assert!(flags.nav_timeout);
        assert!(!flags.process_timeout);
    }

    #[test]
    fn prefers_config_when_flags_absent() {
        let cfg = Config::from_toml(
            "[capture]\nviewport = \"111x222\"\nnavigation_timeout = \"5s\"\nprocess_timeout = \"7s\"\n",
        )
        .unwrap();
        let resolved = resolve_browser_options(args(), &cfg, &CaptureFlagSources::default());
        assert_eq!(resolved.viewport.width, 111);
        assert_eq!(resolved.viewport.height, 222);
        assert_eq!(resolved.navigation_timeout, Duration::from_secs(5));
        assert_eq!(resolved.network_idle_timeout, Duration::from_secs(10));
        assert_eq!(resolved.process_timeout, Duration::from_secs(7));
    }

    #[test]
    fn prefers_cli_when_flags_present() {
        let flags = CaptureFlagSources {
            viewport: true,
            nav_timeout: true,
            network_idle_timeout: true,
            process_timeout: true,
        };
        let resolved = resolve_browser_options(args(), &Config::default(), &flags);
        assert_eq!(resolved.viewport.width, 10);
        assert_eq!(resolved.navigation_timeout, Duration::from_secs(50));
        assert_eq!(resolved.network_idle_timeout, Duration::from_secs(60));
        assert_eq!(resolved.process_timeout, Duration::from_secs(70));
    }

    #[test]
    fn fonts_from_flag_override_config() {
        let cfg = Config::default();
        let fonts = resolve_installed_fonts(Some(&["Lato:Bold".to_string()]), &cfg).unwrap();
        assert_eq!(fonts, vec![FontName::new("Lato", "Bold")]);

        let fonts = resolve_installed_fonts(None, &cfg).unwrap();
        assert_eq!(fonts, cfg.canvas.font_names());
    }

    #[test]
    fn load_config_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("siteflow.toml");
        std::fs::write(&path, "[fonts]\ndefault_family = \"  \"\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Invalid config"), "got: {err}");
        assert!(err.to_string().contains("default_family"));
    }

    #[test]
    fn format_effective_capture_includes_fields() {
        let summary = format_effective_capture(
            &BrowserOptions::default(),
            Some(Path::new("siteflow.toml")),
        );
        assert!(summary.contains("viewport=1440x900"));
        assert!(summary.contains("nav=30s"));
        assert!(summary.contains("process=45s"));
        assert!(summary.contains("siteflow.toml"));
    }
}
