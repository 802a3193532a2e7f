//! Tool system for the whiteboard.
//!
//! Each tool decides two things: which paint a draw call uses and what a
//! pointer-move does to the surface. Both are exhaustive matches over
//! [`ToolKind`], so a new tool cannot be added without deciding its behavior.

use crate::style::{HexColor, StrokeParams, StyleState};
use inkboard_render::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
    Rectangle,
    Circle,
    Text,
}

impl ToolKind {
    /// All tools, in toolbar order.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Pencil,
        ToolKind::Eraser,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Text,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Eraser => "Eraser",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Text => "Text",
        }
    }

    /// Paint this tool draws with under the given style.
    ///
    /// The eraser ignores the selected color and paints the background,
    /// `eraser_factor` times wider than the selected width.
    pub fn stroke_params(self, style: &StyleState, eraser_factor: u32) -> StrokeParams {
        match self {
            ToolKind::Eraser => StrokeParams {
                color: HexColor::WHITE,
                width: style.stroke_width.saturating_mul(eraser_factor),
            },
            ToolKind::Pencil | ToolKind::Rectangle | ToolKind::Circle | ToolKind::Text => {
                StrokeParams {
                    color: style.color,
                    width: style.stroke_width,
                }
            }
        }
    }

    /// What a pointer-move to `current` renders, given the drag `origin` and
    /// the previous pointer position `last`.
    pub fn drag_action(self, origin: Point, last: Point, current: Point) -> DragAction {
        match self {
            ToolKind::Pencil | ToolKind::Eraser => DragAction::Segment {
                from: last,
                to: current,
            },
            ToolKind::Rectangle => DragAction::RectanglePreview {
                origin,
                corner: current,
            },
            ToolKind::Circle => DragAction::CirclePreview {
                center: origin,
                radius: origin.distance(current),
            },
            ToolKind::Text => DragAction::Nothing,
        }
    }
}

/// The surface effect of one pointer-move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragAction {
    /// Append a segment from the previous pointer position. Append-only.
    Segment { from: Point, to: Point },
    /// Clear the surface, then outline the rectangle spanned by the drag.
    RectanglePreview { origin: Point, corner: Point },
    /// Clear the surface, then outline a circle around the drag origin.
    CirclePreview { center: Point, radius: f64 },
    /// Nothing is rendered.
    Nothing,
}

impl DragAction {
    /// Whether applying this action changes any pixel.
    pub fn mutates_surface(&self) -> bool {
        !matches!(self, DragAction::Nothing)
    }

    /// Render onto the surface.
    ///
    /// Shape previews wipe the whole surface first, including anything drawn
    /// before the drag started: there is no separate preview layer.
    pub fn apply(self, surface: &mut Surface, params: StrokeParams) {
        let color = params.color.to_color();
        let width = params.width_px();
        match self {
            DragAction::Segment { from, to } => {
                surface.draw_line_segment(from, to, color, width);
            }
            DragAction::RectanglePreview { origin, corner } => {
                surface.clear();
                surface.draw_rectangle_outline(origin, corner, color, width);
            }
            DragAction::CirclePreview { center, radius } => {
                surface.clear();
                surface.draw_circle_outline(center, radius, color, width);
            }
            DragAction::Nothing => {}
        }
    }
}
