//! Inkboard Core Library
//!
//! Drawing controller for the Inkboard whiteboard: pointer state machine,
//! tools, style, undo history and client-side export.

pub mod board;
pub mod config;
pub mod controller;
pub mod export;
pub mod history;
pub mod input;
pub mod style;
pub mod tools;
pub mod viewport;

pub use board::{Board, Notice};
pub use config::{BoardConfig, ConfigError};
pub use controller::DrawingController;
pub use export::{ExportError, ExportResult, ExportSink, ExportedFile, MemorySink, UnavailableSink};
#[cfg(not(target_arch = "wasm32"))]
pub use export::DirectorySink;
pub use history::History;
pub use input::{PointerEvent, PointerPhase, PointerSession};
pub use style::{HexColor, PALETTE, StrokeParams, StyleError, StyleState};
pub use tools::{DragAction, ToolKind};
pub use viewport::{
    FixedBounds, SurfaceBounds, surface_offset, surface_to_viewport, viewport_to_surface,
};

pub use inkboard_render::{ImageData, RenderError, Surface};
