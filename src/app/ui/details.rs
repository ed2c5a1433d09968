use eframe::egui::{self, RichText, Ui};

use crate::util::join_or;

use super::super::ArchiveView;

impl ArchiveView {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Artifact Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.selected.clone() else {
            ui.label("Select an artifact from the graph or the search results.");
            return;
        };

        let Some(node) = self.session.node(&selected_id) else {
            ui.label("The selected artifact is no longer in the archive.");
            return;
        };
        let artifact = node.artifact.as_ref();

        ui.label(RichText::new(node.label.as_str()).strong());
        ui.small(node.id.as_str());
        ui.add_space(6.0);

        ui.label(format!("Created: {}", node.created_display));
        ui.label(format!("Format: {}", artifact.format_label()));
        ui.label(format!(
            "Categories: {}",
            node.categories
                .iter()
                .map(|category| category.label())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        if node.categories.is_other() {
            ui.small("Uncategorised artifacts stay dimmed while category filters apply.");
        }
        ui.label(format!("Tags: {}", join_or(&node.tags, "none")));

        if let Some(submitter) = artifact.submitter_summary() {
            ui.label(format!("Submitted by: {submitter}"));
        }

        if let Some(description) = artifact.description.as_deref().filter(|text| !text.is_empty()) {
            ui.separator();
            ui.label(RichText::new("Description").strong());
            ui.label(description);
        }

        if let Some(text) = artifact.text_content.as_deref().filter(|text| !text.is_empty()) {
            ui.separator();
            ui.label(RichText::new("Text").strong());
            egui::ScrollArea::vertical()
                .id_salt("artifact_text")
                .max_height(240.0)
                .show(ui, |ui| {
                    ui.label(text);
                });
        }

        if let Some(url) = artifact.file_url.as_deref().filter(|url| !url.is_empty()) {
            ui.separator();
            ui.hyperlink_to("Open attached file", url);
        }

        ui.add_space(8.0);
        if ui.button("Clear selection").clicked() {
            self.selected = None;
        }
    }
}
