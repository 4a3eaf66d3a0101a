//! Command session: decoded commands in, replies out, one document host for the
//! session's lifetime.
//!
//! Commands are handled one at a time. Within a batch, items are imported strictly
//! in order; a failing item is logged and skipped, and progress is reported after
//! every item whether it succeeded or not.

pub mod protocol;

pub use protocol::{decode_command, encode_reply, BatchItem, Command, ProtocolError, Reply};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::config::Config;
use crate::reconstruct::{DesignHost, NodeId, PlacedRoot, Reconstructor};
use crate::schema::{self, Node};

/// Whether the session keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

pub struct Session<'h> {
    host: &'h mut dyn DesignHost,
    config: &'h Config,
    placed: Vec<PlacedRoot>,
    failed_items: usize,
}

impl<'h> Session<'h> {
    pub fn new(host: &'h mut dyn DesignHost, config: &'h Config) -> Self {
        Self {
            host,
            config,
            placed: Vec::new(),
            failed_items: 0,
        }
    }

    /// Every root placed so far, in placement order.
    pub fn placed(&self) -> &[PlacedRoot] {
        &self.placed
    }

    /// Documents that could not be imported, across all commands.
    pub fn failed_items(&self) -> usize {
        self.failed_items
    }

    /// Decode and handle one raw command line. A malformed line is answered with an
    /// error and the session continues.
    pub async fn handle_line(&mut self, line: &str, emit: &mut dyn FnMut(Reply)) -> Flow {
        match decode_command(line) {
            Ok(command) => self.handle(command, emit).await,
            Err(err) => {
                warn!(error = %err, "rejected command");
                emit(Reply::error(err.to_string()));
                Flow::Continue
            }
        }
    }

    pub async fn handle(&mut self, command: Command, emit: &mut dyn FnMut(Reply)) -> Flow {
        match command {
            Command::ImportJson { data } => {
                self.import_json(data, emit).await;
                Flow::Continue
            }
            Command::ImportBatch { items } => {
                self.import_batch(&items, emit).await;
                Flow::Continue
            }
            Command::Close => Flow::Close,
        }
    }

    async fn import_json(&mut self, data: Option<Node>, emit: &mut dyn FnMut(Reply)) {
        let Some(document) = data else {
            emit(Reply::error("No JSON data provided"));
            return;
        };
        emit(Reply::status(format!(
            "Importing {} nodes...",
            document.count_nodes()
        )));

        let mut builder = Reconstructor::new(&mut *self.host, &self.config.fonts, &self.config.import);
        match builder.import_document(&document, 0.0).await {
            Ok(placed) => {
                self.placed.push(placed);
                emit(Reply::success("Import successful!"));
            }
            Err(err) => {
                warn!(document = %document.name, error = %err, "import failed");
                self.failed_items += 1;
                emit(Reply::error(format!("Import failed: {err}")));
            }
        }
    }

    async fn import_batch(&mut self, items: &[BatchItem], emit: &mut dyn FnMut(Reply)) {
        if items.is_empty() {
            emit(Reply::error("No files to import"));
            return;
        }

        let spacing = self.config.import.batch_spacing;
        let total = items.len();
        let mut offset = 0.0;
        let mut created: Vec<NodeId> = Vec::new();

        for (index, item) in items.iter().enumerate() {
            match self.import_item(item, offset).await {
                Ok(placed) => {
                    debug!(item = %item.name, offset, "imported batch item");
                    offset += placed.width + spacing;
                    created.push(placed.id);
                    self.placed.push(placed);
                }
                Err(message) => {
                    warn!(item = %item.name, error = %message, "failed to import batch item");
                    self.failed_items += 1;
                }
            }
            emit(Reply::Progress {
                current: index + 1,
                total,
                name: item.name.clone(),
            });
        }

        if created.is_empty() {
            emit(Reply::error("No slides were imported successfully"));
            return;
        }
        self.host.set_selection(&created);
        self.host.scroll_into_view(&created);
        emit(Reply::success(format!(
            "Successfully imported {} slides!",
            created.len()
        )));
    }

    async fn import_item(&mut self, item: &BatchItem, offset: f64) -> Result<PlacedRoot, String> {
        let document = schema::from_json(&item.data).map_err(|err| err.to_string())?;
        let mut builder = Reconstructor::new(&mut *self.host, &self.config.fonts, &self.config.import);
        builder
            .import_document(&document, offset)
            .await
            .map_err(|err| err.to_string())
    }
}

/// Drive a session from newline-delimited commands until `close` or end of input.
/// Blank lines are ignored.
pub async fn run_lines<R>(
    session: &mut Session<'_>,
    input: R,
    emit: &mut dyn FnMut(Reply),
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if session.handle_line(&line, emit).await == Flow::Close {
            debug!("session closed by command");
            break;
        }
    }
    Ok(())
}
