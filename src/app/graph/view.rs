use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use crate::graph::{HOVERED_NODE_RADIUS, NODE_RADIUS, Tooltip, tooltip_for};
use crate::util::truncate_chars;

use super::super::ArchiveView;
use super::super::render_utils::{
    LABEL_COLOR, LINK_COLOR, circle_visible, draw_background, segment_may_be_visible, with_opacity,
};

const NODE_STROKE: Color32 = Color32::WHITE;
const HOVERED_NODE_STROKE: Color32 = Color32::from_rgb(74, 82, 104);
const SELECTED_NODE_STROKE: Color32 = Color32::from_rgb(245, 206, 93);
const LABEL_CHARS: usize = 32;

impl ArchiveView {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.canvas_rect = rect;
        self.session.set_viewport(Self::canvas_viewport(rect.size()));

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_node_drag(ui, rect, &response);
        self.handle_graph_pan(&response);

        if self.session.tick() || self.session.dragging().is_some() {
            ui.ctx().request_repaint();
        }

        let pointer = ui.input(|input| input.pointer.hover_pos());
        let hovered = match self.session.dragging() {
            Some(id) => Some(id.to_owned()),
            None => pointer.and_then(|pointer| self.node_under(rect, pointer)),
        };
        self.hovered = hovered;
        if self.hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            self.selected = self.hovered.clone();
        }

        let origin = rect.min;
        let transform = self.transform;
        draw_background(&painter, rect, origin + transform.translate, transform.scale);

        let frame = self.session.frame();
        let scale = transform.scale;
        let link_width = (2.0 * scale.sqrt()).clamp(0.8, 4.0);

        for link in &frame.links {
            let start = transform.world_to_screen(origin, link.from);
            let end = transform.world_to_screen(origin, link.to);
            if !segment_may_be_visible(rect, start, end) {
                continue;
            }
            painter.line_segment(
                [start, end],
                Stroke::new(link_width, with_opacity(LINK_COLOR, link.opacity)),
            );
        }

        for node in &frame.nodes {
            let is_hovered = self.hovered.as_deref() == Some(node.id);
            let is_selected = self.selected.as_deref() == Some(node.id);
            let world_radius = if is_hovered {
                HOVERED_NODE_RADIUS
            } else {
                NODE_RADIUS
            };
            let radius = world_radius * scale;
            let position = transform.world_to_screen(origin, node.position);
            if !circle_visible(rect, position, radius + 24.0) {
                continue;
            }

            let (stroke_width, stroke_color) = if is_hovered {
                (5.0, HOVERED_NODE_STROKE)
            } else if is_selected {
                (4.0, SELECTED_NODE_STROKE)
            } else {
                (3.0, NODE_STROKE)
            };

            painter.circle_filled(position, radius, with_opacity(node.color, node.opacity));
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(
                    (stroke_width * scale.sqrt()).max(1.0),
                    with_opacity(stroke_color, node.opacity),
                ),
            );

            if let Some(date) = node.date_label {
                painter.text(
                    position + vec2(0.0, radius + 8.0),
                    Align2::CENTER_TOP,
                    date,
                    FontId::proportional(12.0),
                    with_opacity(LABEL_COLOR, node.opacity),
                );
            }

            if is_selected || (is_hovered && node.date_label.is_none()) {
                painter.text(
                    position + vec2(radius + 6.0, 0.0),
                    Align2::LEFT_CENTER,
                    truncate_chars(node.label, LABEL_CHARS),
                    FontId::proportional(13.0),
                    LABEL_COLOR,
                );
            }
        }

        let tooltip = match (&self.hovered, pointer, self.session.dragging()) {
            (Some(id), Some(pointer), None) => self
                .session
                .node(id)
                .map(|node| tooltip_for(node, pointer, origin)),
            _ => None,
        };
        if let Some(tooltip) = tooltip {
            draw_tooltip(ui, origin, &tooltip);
        }
    }
}

fn draw_tooltip(ui: &Ui, canvas_origin: egui::Pos2, tooltip: &Tooltip) {
    egui::Area::new(egui::Id::new("artifact_tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(canvas_origin + tooltip.anchor.to_vec2())
        .interactable(false)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(280.0);
                ui.strong(tooltip.title.as_str());
                ui.small(tooltip.created.as_str());
                ui.label(tooltip.format);
                if !tooltip.tags.is_empty() {
                    ui.small(tooltip.tags.join(" · "));
                }
            });
        });
}
