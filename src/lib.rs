//! # symkit
//!
//! Editing core of a schematic symbol editor:
//! - Undoable commands for every document change, grouped per user action
//! - A tool state machine translating input events into commands
//! - Graphics items kept in sync with the document for hit testing
//!
//! ## Architecture
//!
//! symkit is organized as a workspace with multiple crates:
//!
//! 1. **symkit-core** - Geometry value types, units, errors
//! 2. **symkit-settings** - Editor configuration and persistence
//! 3. **symkit-editor** - Document model, undo system, commands, tools
//! 4. **symkit** - Logging setup, system clipboard, session replay binary

pub mod session;
pub mod system_clipboard;

pub use symkit_core::{
    Alignment, Angle, Error, Layer, Length, LengthUnit, Orientation, Path, Point, PositiveLength,
    Result, Shared, UnsignedLength, Vertex,
};
pub use symkit_editor::clipboard::{ClipboardTransport, InMemoryClipboard, SymbolClipboardData};
pub use symkit_editor::fsm::{EditorContext, Features, HeadlessUi, SymbolEditorFsm, Tool};
pub use symkit_editor::{Circle, Pin, Polygon, Symbol, Text, UndoStack};
pub use symkit_settings::Config;

pub use session::{Session, SessionEvent, SessionReport};
pub use system_clipboard::SystemClipboard;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Environment variable switching log output to JSON lines
pub const LOG_JSON_ENV: &str = "SYMKIT_LOG_JSON";

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output to stderr, so replay results on stdout stay parseable
/// - RUST_LOG environment variable support
/// - JSON lines instead of pretty output when `SYMKIT_LOG_JSON=1`
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let json = std::env::var(LOG_JSON_ENV).is_ok_and(|v| v == "1");

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
