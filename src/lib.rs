//! Siteflow library
//!
//! Captures a rendered, styled web page into a portable design document (a tree of
//! frames, text, vectors and rectangles with paints, strokes and effects) and
//! rebuilds such documents as native objects on a design canvas.
//!
//! # Module Overview
//!
//! - [`style`] - Computed style value parsers (colors, gradients, shadows, lengths)
//! - [`schema`] - The design document tree and its JSON form
//! - [`capture`] - Styled page snapshot → design document
//! - [`reconstruct`] - Design document → native objects on a [`DesignHost`]
//! - [`canvas`] - In-memory design host
//! - [`session`] - Import command protocol and batch sequencing
//! - [`browser`] - Page snapshots through a headless browser
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use siteflow_lib::{capture_page, Config, MemoryCanvas, PageSnapshot, Reconstructor};
//!
//! # async fn example(snapshot: PageSnapshot) -> siteflow_lib::Result<()> {
//! let document = capture_page(&snapshot);
//!
//! let config = Config::default();
//! let mut canvas = MemoryCanvas::new(config.canvas.font_names());
//! let mut builder = Reconstructor::new(&mut canvas, &config.fonts, &config.import);
//! let placed = builder.import_document(&document, 0.0).await?;
//! println!("placed {} with {} children", placed.name, placed.created);
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod canvas;
pub mod capture;
pub mod config;
pub mod error;
pub mod output;
pub mod reconstruct;
pub mod schema;
pub mod session;
pub mod style;
pub mod viewport;

pub use browser::{capture_url, write_capture, BrowserOptions};
pub use canvas::MemoryCanvas;
pub use capture::{capture_page, PageSnapshot};
pub use config::Config;
pub use error::{ErrorCategory, ErrorPayload, Result, SiteflowError};
pub use output::{
    CaptureOutput, ErrorOutput, ImportOutput, SiteflowOutput, SourceDescriptor, SourceKind,
    SITEFLOW_OUTPUT_VERSION,
};
pub use reconstruct::{DesignHost, FontName, ImportError, PlacedRoot, Reconstructor};
pub use schema::Node;
pub use session::{Command, Reply, Session};
pub use viewport::Viewport;
