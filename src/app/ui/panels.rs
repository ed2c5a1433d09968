use eframe::egui::{self, Align, Align2, Context, Layout, RichText};

use crate::graph::{LayoutMode, Persona};

use super::super::{ArchiveView, ReloadRequest};

impl ArchiveView {
    pub(in crate::app) fn show(&mut self, ctx: &Context, is_reloading: bool) -> Option<ReloadRequest> {
        let mut reload = None;

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Archive Graph");
                    ui.separator();
                    ui.label(format!("artifacts: {}", self.session.nodes().len()));
                    ui.label(format!("links: {}", self.session.links().len()));

                    let reload_button =
                        ui.add_enabled(!is_reloading, egui::Button::new("Reload archive"));
                    if reload_button.clicked() {
                        reload = Some(ReloadRequest::Store);
                    }

                    let timeline_label = match self.session.layout_mode() {
                        LayoutMode::Network => "Timeline view",
                        LayoutMode::Timeline => "Network view",
                    };
                    if ui
                        .button(timeline_label)
                        .on_hover_text("Arrange artifacts chronologically, or release them back to the force layout.")
                        .clicked()
                    {
                        self.session.toggle_timeline();
                        ctx.request_repaint();
                    }

                    ui.separator();
                    self.draw_zoom_buttons(ui);

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "visible: {} artifacts, {} links",
                            self.session.visible_node_count(),
                            self.session.visible_link_count()
                        ));
                        if self.session.is_simulating() {
                            ui.small(format!("settling (alpha {:.2})", self.session.alpha()));
                        }
                        if is_reloading {
                            ui.spinner();
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.is_empty() {
                if self.draw_empty_archive(ui) {
                    reload = Some(ReloadRequest::SampleData);
                }
            } else {
                self.draw_graph(ui);
            }
        });

        if !self.preferences.onboarding_complete {
            self.draw_onboarding(ctx);
        }

        reload
    }

    fn draw_empty_archive(&self, ui: &mut egui::Ui) -> bool {
        let mut requested = false;
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.heading("The archive is empty");
            ui.add_space(6.0);
            ui.label("No accepted artifacts were found.");
            ui.add_space(10.0);
            requested = ui.button("Load sample data").clicked();
        });
        requested
    }

    fn draw_onboarding(&mut self, ctx: &Context) {
        let mut chosen = None;

        egui::Window::new("Welcome")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(RichText::new("How would you like to explore the archive?").strong());
                ui.add_space(6.0);
                for persona in Persona::ALL {
                    if ui.button(persona.label()).clicked() {
                        chosen = Some(persona);
                    }
                }
                ui.add_space(6.0);
                ui.small("You can change this later from the Persona section.");
            });

        if let Some(persona) = chosen {
            self.apply_persona(persona);
            self.preferences.onboarding_complete = true;
            self.preferences_dirty = true;
        }
    }

    pub(in crate::app) fn apply_persona(&mut self, persona: Persona) {
        self.session.set_persona(persona);
        if self.preferences.persona != persona {
            self.preferences.persona = persona;
            self.preferences_dirty = true;
        }
    }
}
