//! The drawing controller: pointer state machine over a raster surface.

use crate::board::{Board, Notice};
use crate::config::{BoardConfig, ConfigError};
use crate::export::{ExportResult, ExportSink, PNG_EXTENSION, PNG_MIME, UnavailableSink};
use crate::history::History;
use crate::input::{PointerEvent, PointerPhase, PointerSession};
use crate::style::{HexColor, StyleState};
use crate::tools::ToolKind;
use crate::viewport::{FixedBounds, SurfaceBounds, viewport_to_surface};
use inkboard_render::{Surface, SurfaceSnapshot};
use kurbo::Point;

/// Interprets pointer input and toolbar actions and draws onto the surface.
///
/// Everything runs synchronously on the caller's thread. Pointer-moves only
/// render while a drag is active; clear, undo and redo only run when the user
/// asks; a resize always wins and wipes the buffer.
pub struct DrawingController {
    config: BoardConfig,
    surface: Surface,
    board: Board,
    tool: ToolKind,
    style: StyleState,
    session: Option<PointerSession>,
    history: History<SurfaceSnapshot>,
    bounds: Box<dyn SurfaceBounds>,
    export_sink: Box<dyn ExportSink>,
}

impl std::fmt::Debug for DrawingController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingController")
            .field("board", &self.board)
            .field("surface", &self.surface)
            .field("tool", &self.tool)
            .field("style", &self.style)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl DrawingController {
    /// Create a controller with a fresh `width`×`height` surface.
    ///
    /// The surface sits at the viewport origin and exports are unavailable
    /// until the host provides [`with_bounds`](Self::with_bounds) and
    /// [`with_export_sink`](Self::with_export_sink).
    ///
    /// The config is taken as is; use [`try_new`](Self::try_new) for configs
    /// that did not come through [`BoardConfig::from_json`].
    pub fn new(config: BoardConfig, width: u32, height: u32) -> Self {
        let style = StyleState {
            color: config.default_color,
            stroke_width: config.clamp_stroke_width(config.default_stroke_width),
        };
        let board = Board::new(config.default_title.clone());
        log::debug!("Board {} created at {}x{}", board.id, width, height);

        Self {
            surface: Surface::new(width, height),
            board,
            tool: config.default_tool,
            style,
            session: None,
            history: History::new(config.history_limit),
            bounds: Box::new(FixedBounds::default()),
            export_sink: Box::new(UnavailableSink),
            config,
        }
    }

    /// Like [`new`](Self::new), but rejects a config that fails
    /// [`BoardConfig::validate`].
    pub fn try_new(config: BoardConfig, width: u32, height: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, width, height))
    }

    /// Set where the surface lives in the viewport.
    pub fn with_bounds(mut self, bounds: impl SurfaceBounds + 'static) -> Self {
        self.bounds = Box::new(bounds);
        self
    }

    /// Set the host's file-save capability.
    pub fn with_export_sink(mut self, sink: impl ExportSink + 'static) -> Self {
        self.export_sink = Box::new(sink);
        self
    }

    /// The raster buffer being drawn into.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The config this controller was built with.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Board metadata (id and title).
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Currently selected tool.
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Currently selected color and stroke width.
    pub fn style(&self) -> StyleState {
        self.style
    }

    /// Whether a drag is in progress.
    pub fn phase(&self) -> PointerPhase {
        if self.session.is_some() {
            PointerPhase::Dragging
        } else {
            PointerPhase::Idle
        }
    }

    /// The active drag, if any.
    pub fn session(&self) -> Option<&PointerSession> {
        self.session.as_ref()
    }

    // --- Pointer input ---

    /// Dispatch a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Leave { .. } => self.pointer_leave(),
        }
    }

    /// Start a drag at a viewport position.
    pub fn pointer_down(&mut self, viewport_point: Point) {
        let origin = viewport_to_surface(&*self.bounds, viewport_point);
        let params = self
            .tool
            .stroke_params(&self.style, self.config.eraser_width_factor);
        if self.session.is_some() {
            log::debug!("Pointer down while dragging, restarting at {:?}", origin);
        }
        self.session = Some(PointerSession::begin(origin, params));
    }

    /// Continue the drag. Ignored while idle.
    pub fn pointer_move(&mut self, viewport_point: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let current = viewport_to_surface(&*self.bounds, viewport_point);
        let params = self
            .tool
            .stroke_params(&self.style, self.config.eraser_width_factor);
        let action = self
            .tool
            .drag_action(session.origin, session.last_point, current);

        if action.mutates_surface() && !session.checkpointed {
            self.history.checkpoint(self.surface.snapshot());
            session.checkpointed = true;
        }
        action.apply(&mut self.surface, params);

        session.last_point = current;
        session.params = params;
    }

    /// End the drag. Whatever was rendered stays; there is no commit step.
    pub fn pointer_up(&mut self) {
        self.session = None;
    }

    /// The pointer left the surface; same as releasing it.
    pub fn pointer_leave(&mut self) {
        self.session = None;
    }

    /// The hosting viewport changed size.
    ///
    /// The buffer is reallocated blank and undo history is dropped. An active
    /// drag keeps going and draws on the fresh buffer from its last point.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.initialize(width, height);
        self.history.clear();
        if let Some(session) = self.session.as_mut() {
            session.checkpointed = false;
        }
        log::debug!("Board {} resized to {}x{}", self.board.id, width, height);
    }

    // --- Tool and style selection ---

    /// Select a tool. Takes effect on the next pointer-move.
    pub fn select_tool(&mut self, tool: ToolKind) {
        log::debug!("Tool: {}", tool.name());
        self.tool = tool;
    }

    /// Select the stroke color. Takes effect on the next pointer-move.
    pub fn select_color(&mut self, color: HexColor) {
        log::debug!("Color: {}", color);
        self.style.color = color;
    }

    /// Select a stroke width, clamped into the configured range. Returns the
    /// width actually applied.
    pub fn select_stroke_width(&mut self, width: u32) -> u32 {
        let clamped = self.config.clamp_stroke_width(width);
        if clamped != width {
            log::warn!("Stroke width {} clamped to {}", width, clamped);
        }
        self.style.stroke_width = clamped;
        clamped
    }

    // --- Board metadata ---

    /// Board title.
    pub fn title(&self) -> &str {
        &self.board.title
    }

    /// Rename the board. Only affects the name of exported files.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.board.title = title.into();
    }

    /// File name the next export will use.
    pub fn export_file_name(&self) -> String {
        self.board.export_file_name()
    }

    // --- Toolbar actions ---

    /// Wipe the surface back to the background.
    pub fn clear_all(&mut self) -> Notice {
        self.history.checkpoint(self.surface.snapshot());
        self.surface.clear();
        log::info!("Board {} cleared", self.board.id);
        Notice::Cleared
    }

    /// Export the surface as PNG, named after the board title.
    pub fn export_as_file(&self) -> ExportResult<Notice> {
        self.export_as(&self.board.file_stem())
    }

    /// Export the surface as `<filename_base>.png`.
    pub fn export_as(&self, filename_base: &str) -> ExportResult<Notice> {
        let file_name = format!("{}.{}", filename_base, PNG_EXTENSION);
        let bytes = self.surface.export_image_bytes()?;
        self.export_sink.save_file(&file_name, PNG_MIME, &bytes)?;
        log::info!(
            "Board {} exported as {} ({} bytes)",
            self.board.id,
            file_name,
            bytes.len()
        );
        Ok(Notice::Downloaded { file_name })
    }

    /// Report the board as saved. Nothing is persisted.
    pub fn save(&self) -> Notice {
        log::info!("Board {} saved (no backend)", self.board.id);
        Notice::Saved
    }

    /// Report a share link as copied. Nothing is shared.
    pub fn share(&self) -> Notice {
        log::info!("Board {} shared (no backend)", self.board.id);
        Notice::ShareLinkCopied
    }

    // --- History ---

    /// Whether [`undo`](Self::undo) would change anything.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether [`redo`](Self::redo) would change anything.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the surface from before the last stroke, shape or clear.
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let current = self.surface.snapshot();
        let restored = match self.history.undo(current) {
            Some(previous) => self.surface.restore(&previous),
            None => false,
        };
        self.rearm_checkpoint();
        restored
    }

    /// Re-apply the last undone change. Returns false if there was nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let current = self.surface.snapshot();
        let restored = match self.history.redo(current) {
            Some(next) => self.surface.restore(&next),
            None => false,
        };
        self.rearm_checkpoint();
        restored
    }

    /// Make the active drag checkpoint again before its next mutation, so
    /// drawing after an undo or redo starts a new history entry.
    fn rearm_checkpoint(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.checkpointed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemorySink;

    fn controller() -> DrawingController {
        DrawingController::new(BoardConfig::default(), 120, 80)
    }

    #[test]
    fn test_defaults() {
        let c = controller();
        assert_eq!(c.tool(), ToolKind::Pencil);
        assert_eq!(c.style().color, HexColor::BLACK);
        assert_eq!(c.style().stroke_width, 5);
        assert_eq!(c.title(), "Untitled Whiteboard");
        assert_eq!(c.phase(), PointerPhase::Idle);
        assert_eq!((c.surface().width(), c.surface().height()), (120, 80));
    }

    #[test]
    fn test_pointer_phases() {
        let mut c = controller();
        c.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(c.phase(), PointerPhase::Dragging);

        c.pointer_move(Point::new(20.0, 20.0));
        assert_eq!(c.phase(), PointerPhase::Dragging);
        assert_eq!(c.session().unwrap().last_point, Point::new(20.0, 20.0));

        c.pointer_up();
        assert_eq!(c.phase(), PointerPhase::Idle);

        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_leave();
        assert_eq!(c.phase(), PointerPhase::Idle);
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut c = controller();
        c.pointer_move(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(50.0, 50.0));
        assert!(c.surface().image_data().is_uniform([255; 4]));
        assert!(!c.can_undo());
    }

    #[test]
    fn test_down_while_dragging_restarts() {
        let mut c = controller();
        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(30.0, 30.0));
        c.pointer_down(Point::new(70.0, 70.0));

        let session = c.session().unwrap();
        assert_eq!(session.origin, Point::new(70.0, 70.0));
        assert_eq!(session.last_point, Point::new(70.0, 70.0));
    }

    #[test]
    fn test_eraser_params_captured_on_down() {
        let mut c = controller();
        c.select_color(HexColor::new(255, 0, 0));
        c.select_stroke_width(6);
        c.select_tool(ToolKind::Eraser);
        c.pointer_down(Point::new(10.0, 10.0));

        let params = c.session().unwrap().params;
        assert_eq!(params.color, HexColor::WHITE);
        assert_eq!(params.width, 12);
    }

    #[test]
    fn test_selection_does_not_render() {
        let mut c = controller();
        c.pointer_down(Point::new(10.0, 10.0));
        c.select_tool(ToolKind::Rectangle);
        c.select_color(HexColor::new(0, 0, 255));
        c.select_stroke_width(12);
        assert!(c.surface().image_data().is_uniform([255; 4]));
    }

    #[test]
    fn test_stroke_width_is_clamped() {
        let mut c = controller();
        assert_eq!(c.select_stroke_width(0), 1);
        assert_eq!(c.select_stroke_width(50), 20);
        assert_eq!(c.style().stroke_width, 20);
    }

    #[test]
    fn test_handle_pointer_event_dispatch() {
        let mut c = controller();
        c.handle_pointer_event(PointerEvent::Down { position: Point::new(5.0, 5.0) });
        c.handle_pointer_event(PointerEvent::Move { position: Point::new(60.0, 40.0) });
        assert!(!c.surface().image_data().is_uniform([255; 4]));
        c.handle_pointer_event(PointerEvent::Leave { position: Point::new(200.0, 40.0) });
        assert_eq!(c.phase(), PointerPhase::Idle);
    }

    #[test]
    fn test_clear_all() {
        let mut c = controller();
        c.pointer_down(Point::new(5.0, 5.0));
        c.pointer_move(Point::new(60.0, 40.0));
        c.pointer_up();

        assert_eq!(c.clear_all(), Notice::Cleared);
        assert!(c.surface().image_data().is_uniform([255; 4]));
    }

    #[test]
    fn test_export_uses_title() {
        let sink = MemorySink::new();
        let mut c = controller().with_export_sink(sink.clone());
        c.set_title("Design Review  Notes");

        let notice = c.export_as_file().unwrap();
        assert_eq!(
            notice,
            Notice::Downloaded { file_name: "design-review-notes.png".into() }
        );
        let file = sink.last().unwrap();
        assert_eq!(file.file_name, "design-review-notes.png");
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(&file.bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_export_without_sink_is_unavailable() {
        let c = controller();
        let err = c.export_as_file().unwrap_err();
        assert_eq!(err.code(), "export_unavailable");
    }

    #[test]
    fn test_save_and_share_are_stubs() {
        let c = controller();
        let before = c.surface().image_data();
        assert_eq!(c.save().message(), "Whiteboard saved");
        assert_eq!(c.share().message(), "Share link copied to clipboard");
        assert_eq!(c.surface().image_data(), before);
    }

    #[test]
    fn test_undo_redo_stroke() {
        let mut c = controller();
        assert!(!c.undo());

        c.pointer_down(Point::new(10.0, 40.0));
        c.pointer_move(Point::new(60.0, 40.0));
        c.pointer_move(Point::new(110.0, 40.0));
        c.pointer_up();
        let drawn = c.surface().image_data();

        assert!(c.undo());
        assert!(c.surface().image_data().is_uniform([255; 4]));
        assert!(!c.can_undo());

        assert!(c.redo());
        assert_eq!(c.surface().image_data(), drawn);
        assert!(!c.redo());
    }

    #[test]
    fn test_one_checkpoint_per_drag() {
        let mut c = controller();
        c.pointer_down(Point::new(10.0, 10.0));
        for i in 1..10 {
            c.pointer_move(Point::new(10.0 + f64::from(i) * 5.0, 10.0));
        }
        c.pointer_up();
        assert!(c.undo());
        assert!(!c.can_undo());
    }

    #[test]
    fn test_text_drag_records_nothing() {
        let mut c = controller();
        c.select_tool(ToolKind::Text);
        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(50.0, 50.0));
        c.pointer_up();
        assert!(!c.can_undo());
        assert!(c.surface().image_data().is_uniform([255; 4]));
    }

    #[test]
    fn test_undo_clear() {
        let mut c = controller();
        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(50.0, 50.0));
        c.pointer_up();
        let drawn = c.surface().image_data();

        c.clear_all();
        assert!(c.undo());
        assert_eq!(c.surface().image_data(), drawn);
    }

    #[test]
    fn test_history_disabled() {
        let config = BoardConfig {
            history_limit: 0,
            ..BoardConfig::default()
        };
        let mut c = DrawingController::new(config, 50, 50);
        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(40.0, 40.0));
        c.pointer_up();
        assert!(!c.can_undo());
        assert!(!c.undo());
    }

    #[test]
    fn test_drawing_after_undo_mid_drag_discards_redo() {
        let mut c = controller();
        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(100.0, 10.0));
        assert!(c.undo());
        assert!(c.can_redo());

        c.pointer_move(Point::new(100.0, 70.0));
        c.pointer_up();
        assert!(!c.can_redo());
        assert!(!c.redo());
        assert_ne!(c.surface().pixel(100, 40), Some([255; 4]));

        // The post-undo segment is its own history entry
        assert!(c.undo());
        assert!(c.surface().image_data().is_uniform([255; 4]));
    }

    #[test]
    fn test_drawing_after_redo_mid_drag_checkpoints() {
        let mut c = controller();
        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(100.0, 10.0));
        c.pointer_up();
        let first = c.surface().image_data();
        assert!(c.undo());

        c.pointer_down(Point::new(10.0, 40.0));
        assert!(c.redo());
        c.pointer_move(Point::new(100.0, 40.0));
        c.pointer_up();

        assert!(c.undo());
        assert_eq!(c.surface().image_data(), first);
    }

    #[test]
    fn test_try_new_validates_config() {
        let config = BoardConfig {
            eraser_width_factor: 0,
            ..BoardConfig::default()
        };
        assert!(matches!(
            DrawingController::try_new(config, 10, 10),
            Err(ConfigError::EraserFactor)
        ));
        assert!(DrawingController::try_new(BoardConfig::default(), 10, 10).is_ok());
    }

    #[test]
    fn test_resize_drops_history() {
        let mut c = controller();
        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(50.0, 50.0));
        c.pointer_up();
        assert!(c.can_undo());

        c.resize(200, 100);
        assert!(!c.can_undo());
        assert!(!c.can_redo());
        assert_eq!((c.surface().width(), c.surface().height()), (200, 100));
    }
}
