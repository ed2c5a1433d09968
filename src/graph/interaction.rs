use eframe::egui::{Pos2, Vec2, vec2};

use super::layout::Body;
use super::node::Node;

pub const NODE_RADIUS: f32 = 20.0;
pub const HOVERED_NODE_RADIUS: f32 = 25.0;
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 4.0;
pub const ZOOM_IN_FACTOR: f32 = 1.3;
pub const ZOOM_OUT_FACTOR: f32 = 0.7;
pub const TOOLTIP_OFFSET: Vec2 = vec2(15.0, 15.0);
const TOOLTIP_TAG_COUNT: usize = 3;

/// Pan/zoom applied on top of layout coordinates: `screen = origin + translate + world * scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub translate: Vec2,
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    pub fn world_to_screen(self, origin: Pos2, world: Vec2) -> Pos2 {
        origin + self.translate + world * self.scale
    }

    pub fn screen_to_world(self, origin: Pos2, screen: Pos2) -> Vec2 {
        (screen - origin - self.translate) / self.scale
    }

    /// Zooms by `factor` while keeping the world point under `anchor` fixed on screen.
    pub fn zoom_by(&mut self, factor: f32, origin: Pos2, anchor: Pos2) {
        let world_before = self.screen_to_world(origin, anchor);
        self.scale = (self.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.translate = anchor - origin - world_before * self.scale;
    }

    pub fn zoom_in(&mut self, origin: Pos2, viewport_center: Pos2) {
        self.zoom_by(ZOOM_IN_FACTOR, origin, viewport_center);
    }

    pub fn zoom_out(&mut self, origin: Pos2, viewport_center: Pos2) {
        self.zoom_by(ZOOM_OUT_FACTOR, origin, viewport_center);
    }

    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    pub fn wheel_factor(scroll_delta: f32) -> f32 {
        (1.0 + scroll_delta * 0.0018).clamp(0.85, 1.15)
    }
}

/// Index of the node whose disc contains `world`, nearest first.
pub fn hit_test(bodies: &[Body], world: Vec2, hovered: Option<usize>) -> Option<usize> {
    bodies
        .iter()
        .enumerate()
        .filter_map(|(index, body)| {
            let radius = if hovered == Some(index) {
                HOVERED_NODE_RADIUS
            } else {
                NODE_RADIUS
            };
            let distance_sq = (body.position - world).length_sq();
            (distance_sq <= radius * radius).then_some((index, distance_sq))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub anchor: Pos2,
    pub title: String,
    pub created: String,
    pub format: &'static str,
    pub tags: Vec<String>,
}

/// Tooltip for `node`, placed just below-right of the pointer, relative to the canvas origin.
pub fn tooltip_for(node: &Node, pointer: Pos2, canvas_origin: Pos2) -> Tooltip {
    Tooltip {
        anchor: (pointer - canvas_origin + TOOLTIP_OFFSET).to_pos2(),
        title: node.label.clone(),
        created: node.created_display.clone(),
        format: node.artifact.format_label(),
        tags: node.tags.iter().take(TOOLTIP_TAG_COUNT).cloned().collect(),
    }
}
