//! Capture host adapter: snapshot a live page through a Playwright helper and
//! persist captured documents.
//!
//! The helper is a short Node.js script run with `node -e`. It loads the page,
//! waits for the network to go idle and walks `document.body`, emitting every
//! element's rectangle, attributes and the computed style properties the capture
//! engine reads. Its stdout is a single JSON object: `{"status":"ok","snapshot":{...}}`.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};
use url::Url;

use crate::capture::PageSnapshot;
use crate::config::CaptureConfig;
use crate::schema::{self, Node};
use crate::{Result, SiteflowError, Viewport};

const SNAPSHOT_SCRIPT: &str = r#"
const [, url, width, height, navTimeout, idleTimeout] = process.argv;

const STYLE_KEYS = [
  'display', 'visibility', 'clip', 'clipPath', 'backgroundColor', 'backgroundImage',
  'borderTopWidth', 'borderTopColor', 'borderTopStyle',
  'borderRightWidth', 'borderRightColor', 'borderRightStyle',
  'borderBottomWidth', 'borderBottomColor', 'borderBottomStyle',
  'borderLeftWidth', 'borderLeftColor', 'borderLeftStyle',
  'borderRadius', 'boxShadow', 'backdropFilter', 'color', 'fontSize', 'fontWeight',
  'fontFamily', 'textAlign', 'direction', 'letterSpacing', 'lineHeight', 'fill', 'stroke'
];

async function run() {
  let browser;
  try {
    const { chromium } = require('playwright');
    browser = await chromium.launch({ headless: true });
    const context = await browser.newContext({
      viewport: { width: parseInt(width, 10), height: parseInt(height, 10) }
    });
    const page = await context.newPage();
    await page.goto(url, { waitUntil: 'networkidle', timeout: parseInt(navTimeout, 10) });
    await page.waitForLoadState('networkidle', { timeout: parseInt(idleTimeout, 10) });

    const snapshot = await page.evaluate((keys) => {
      const sx = window.scrollX;
      const sy = window.scrollY;
      const box = (r) => ({ x: r.left + sx, y: r.top + sy, width: r.width, height: r.height });
      const styleOf = (el) => {
        const cs = window.getComputedStyle(el);
        const out = {};
        for (const key of keys) {
          if (cs[key]) out[key] = cs[key];
        }
        return out;
      };
      const attrsOf = (el) => {
        const out = {};
        for (const attr of el.attributes) out[attr.name] = attr.value;
        return out;
      };
      const skipped = new Set(['script', 'style', 'noscript', 'template']);

      function element(el) {
        const children = [];
        for (const child of el.childNodes) {
          if (child.nodeType === Node.TEXT_NODE) {
            if (!child.textContent.trim()) {
              children.push({ kind: 'other' });
              continue;
            }
            const range = document.createRange();
            range.selectNodeContents(child);
            const r = range.getBoundingClientRect();
            const run = { kind: 'text', text: child.textContent };
            if (r.width > 0 || r.height > 0) run.rect = box(r);
            children.push(run);
          } else if (child.nodeType === Node.ELEMENT_NODE) {
            const tag = child.tagName.toLowerCase();
            if (skipped.has(tag)) {
              children.push({ kind: 'other' });
              continue;
            }
            if (tag === 'svg') {
              children.push({
                kind: 'svg',
                attributes: attrsOf(child),
                rect: box(child.getBoundingClientRect()),
                style: styleOf(child),
                markup: child.outerHTML
              });
            } else if (!(child instanceof SVGElement)) {
              children.push(Object.assign({ kind: 'element' }, element(child)));
            } else {
              children.push({ kind: 'other' });
            }
          } else {
            children.push({ kind: 'other' });
          }
        }
        const out = {
          tag: el.tagName.toLowerCase(),
          attributes: attrsOf(el),
          rect: box(el.getBoundingClientRect()),
          style: styleOf(el),
          children
        };
        if (typeof el.className === 'string' && el.className) out.className = el.className;
        if (el.id) out.id = el.id;
        return out;
      }

      return { url: window.location.href, title: document.title, body: element(document.body) };
    }, STYLE_KEYS);

    console.log(JSON.stringify({ status: 'ok', snapshot }));
  } catch (err) {
    const message = err && err.message ? err.message : String(err);
    console.error(JSON.stringify({ status: 'error', message }));
    process.exitCode = 1;
  } finally {
    if (browser) {
      await browser.close();
    }
  }
}

run();
"#;

const NODE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserOptions {
    pub node_command: String,
    pub viewport: Viewport,
    pub navigation_timeout: Duration,
    pub network_idle_timeout: Duration,
    pub process_timeout: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self::from_config(&CaptureConfig::default())
    }
}

impl BrowserOptions {
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            node_command: config.node_command.clone(),
            viewport: config.viewport,
            navigation_timeout: config.navigation_timeout,
            network_idle_timeout: config.network_idle_timeout,
            process_timeout: config.process_timeout,
        }
    }
}

/// Only absolute `http`, `https` and `file` URLs can be captured.
pub fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|err| SiteflowError::capture(format!("Invalid URL '{raw}': {err}")))?;
    match url.scheme() {
        "http" | "https" | "file" => Ok(url),
        scheme => Err(SiteflowError::capture(format!(
            "Invalid URL '{raw}': unsupported scheme '{scheme}'"
        ))),
    }
}

/// Load `url` in a headless browser and snapshot its styled tree.
pub async fn capture_url(url: &str, options: &BrowserOptions) -> Result<PageSnapshot> {
    let url = validate_url(url)?;
    ensure_node_available(&options.node_command).await?;
    info!(
        url = %url,
        viewport = %options.viewport,
        "launching headless browser"
    );

    let mut cmd = Command::new(&options.node_command);
    cmd.arg("-e")
        .arg(SNAPSHOT_SCRIPT)
        .arg(url.as_str())
        .arg(options.viewport.width.to_string())
        .arg(options.viewport.height.to_string())
        .arg(options.navigation_timeout.as_millis().to_string())
        .arg(options.network_idle_timeout.as_millis().to_string())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = Instant::now();
    let mut child = cmd
        .spawn()
        .map_err(|err| map_spawn_error(err, &options.node_command))?;

    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout_pipe {
            let _ = out.read_to_end(&mut buf).await;
        }
        buf
    });

    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr_pipe {
            let _ = err.read_to_end(&mut buf).await;
        }
        buf
    });

    let status = match timeout(options.process_timeout, child.wait()).await {
        Ok(Ok(status)) => status,
        Ok(Err(err)) => return Err(SiteflowError::Io(err)),
        Err(_) => {
            let _ = child.kill().await;
            let _ = child.wait().await;
            return Err(SiteflowError::capture(format!(
                "Playwright timed out after {:?}",
                options.process_timeout
            )));
        }
    };

    let stdout = stdout_task.await.unwrap_or_default();
    let stderr = stderr_task.await.unwrap_or_default();

    if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr);
        return Err(map_script_error(status.to_string(), &stderr));
    }

    let snapshot = parse_script_output(&String::from_utf8_lossy(&stdout))?;
    debug!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "page snapshot received"
    );
    Ok(snapshot)
}

#[derive(Debug, serde::Deserialize)]
struct ScriptResult {
    status: String,
    message: Option<String>,
    snapshot: Option<PageSnapshot>,
}

#[derive(Debug, serde::Deserialize)]
struct ScriptError {
    message: String,
}

fn parse_script_output(stdout: &str) -> Result<PageSnapshot> {
    let result: ScriptResult = serde_json::from_str(stdout.trim()).map_err(|err| {
        SiteflowError::capture(format!(
            "Failed to parse Playwright output: {err} - raw: {}",
            truncate(stdout.trim(), 200)
        ))
    })?;
    if result.status != "ok" {
        let detail = result.message.unwrap_or_else(|| "no additional details".into());
        return Err(classify_script_message(detail));
    }
    result.snapshot.ok_or_else(|| {
        SiteflowError::capture("Playwright returned ok status but no page snapshot")
    })
}

fn map_spawn_error(err: io::Error, command: &str) -> SiteflowError {
    if err.kind() == io::ErrorKind::NotFound {
        SiteflowError::capture(format!(
            "Unable to spawn Playwright helper; '{command}' was not found on PATH"
        ))
    } else {
        SiteflowError::Io(err)
    }
}

fn map_script_error(status_text: impl Into<String>, stderr: &str) -> SiteflowError {
    let line = stderr.lines().rev().find(|l| l.trim_start().starts_with('{'));
    if let Some(error) = line.and_then(|l| serde_json::from_str::<ScriptError>(l).ok()) {
        return classify_script_message(error.message);
    }
    if is_missing_module(stderr) {
        return missing_playwright();
    }
    SiteflowError::capture(format!(
        "Playwright exited with status {}: {}",
        status_text.into(),
        stderr.trim()
    ))
}

fn classify_script_message(message: String) -> SiteflowError {
    let lower = message.to_ascii_lowercase();
    if is_missing_module(&message) {
        missing_playwright()
    } else if lower.contains("executable doesn't exist") {
        SiteflowError::capture(format!("Chromium executable is missing: {message}"))
    } else {
        SiteflowError::capture(format!("Playwright error: {message}"))
    }
}

fn is_missing_module(text: &str) -> bool {
    text.to_ascii_lowercase()
        .contains("cannot find module 'playwright'")
}

fn missing_playwright() -> SiteflowError {
    SiteflowError::capture(
        "Playwright npm package is missing; install with `npm install playwright`.",
    )
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

async fn ensure_node_available(node_command: &str) -> Result<()> {
    let mut cmd = Command::new(node_command);
    cmd.arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let status = timeout(NODE_CHECK_TIMEOUT, cmd.status())
        .await
        .map_err(|_| {
            SiteflowError::capture(format!(
                "Timed out checking node availability after {NODE_CHECK_TIMEOUT:?}"
            ))
        })?
        .map_err(|err| map_spawn_error(err, node_command))?;

    if !status.success() {
        return Err(SiteflowError::capture(format!(
            "Node command {node_command:?} is not available (exit {status})"
        )));
    }
    Ok(())
}

/// `<prefix>-<unix-millis>.json`
pub fn capture_file_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}-{}.json", at.timestamp_millis())
}

/// Write a captured document into `dir` under a timestamped name.
pub fn write_capture(
    dir: &Path,
    prefix: &str,
    document: &Node,
    at: DateTime<Utc>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(capture_file_name(prefix, at));
    std::fs::write(&path, schema::to_json_pretty(document)?)?;
    Ok(path)
}
