use eframe::egui::{self, PointerButton, Pos2, Rect, Ui};

use crate::graph::ViewTransform;

use super::super::ArchiveView;

impl ArchiveView {
    pub(in crate::app) fn draw_zoom_buttons(&mut self, ui: &mut Ui) {
        let rect = self.canvas_rect;
        let enabled = rect.is_positive();

        if ui.add_enabled(enabled, egui::Button::new("+")).on_hover_text("Zoom in").clicked() {
            self.transform.zoom_in(rect.min, rect.center());
        }
        if ui.add_enabled(enabled, egui::Button::new("-")).on_hover_text("Zoom out").clicked() {
            self.transform.zoom_out(rect.min, rect.center());
        }
        if ui.button("Reset view").clicked() {
            self.transform.reset();
        }
    }

    pub(in crate::app) fn handle_graph_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        self.transform
            .zoom_by(ViewTransform::wheel_factor(scroll), rect.min, pointer);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        let background_drag =
            response.dragged_by(PointerButton::Primary) && self.session.dragging().is_none();
        if background_drag
            || response.dragged_by(PointerButton::Secondary)
            || response.dragged_by(PointerButton::Middle)
        {
            self.transform.pan_by(response.drag_delta());
        }
    }

    /// Routes primary-button drags that start on a node to the layout's drag commands.
    pub(in crate::app) fn handle_node_drag(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if response.drag_started_by(PointerButton::Primary) {
            let press = ui.input(|input| input.pointer.press_origin());
            if let Some(id) = press.and_then(|pointer| self.node_under(rect, pointer)) {
                self.session.start_drag(&id);
            }
        }

        let Some(id) = self.session.dragging().map(str::to_owned) else {
            return;
        };

        if response.dragged_by(PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let world = self.transform.screen_to_world(rect.min, pointer);
            self.session.update_drag(&id, world);
        }

        if response.drag_stopped() {
            self.session.end_drag(&id);
        }
    }

    pub(in crate::app) fn node_under(&self, rect: Rect, pointer: Pos2) -> Option<String> {
        if !rect.contains(pointer) {
            return None;
        }
        let world = self.transform.screen_to_world(rect.min, pointer);
        self.session
            .node_at(world, self.hovered.as_deref())
            .map(str::to_owned)
    }
}
