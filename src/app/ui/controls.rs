use eframe::egui::{self, RichText, Sense, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::graph::{Category, GraphSession, Persona};
use crate::util::truncate_chars;

use super::super::ArchiveView;

const SEARCH_RESULT_ROWS: usize = 30;
const RESULT_LABEL_CHARS: usize = 42;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Visible nodes ranked by fuzzy title score. Uses the filter's own search term, so the list
/// and the dimming always agree on what matches.
fn ranked_search_matches(session: &GraphSession) -> Vec<(i64, String, String)> {
    let query = session.filter().search_term();
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut ranked = session
        .nodes()
        .iter()
        .filter(|node| session.is_visible(&node.id))
        .map(|node| {
            let score = fuzzy_match_score(&matcher, &node.label, query).unwrap_or(0);
            (score, node.id.clone(), node.label.clone())
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked
}

impl ArchiveView {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Explore");
        ui.separator();
        ui.add_space(4.0);

        egui::CollapsingHeader::new("Persona")
            .default_open(true)
            .show(ui, |ui| self.draw_persona_picker(ui));

        egui::CollapsingHeader::new("Categories")
            .default_open(true)
            .show(ui, |ui| self.draw_category_toggles(ui));

        egui::CollapsingHeader::new("Tag filter")
            .default_open(true)
            .show(ui, |ui| {
                let response = ui
                    .text_edit_singleline(&mut self.tag_filter_input)
                    .on_hover_text("Show artifacts with a tag containing this text.");
                if response.changed() {
                    self.session.set_tag_filter(&self.tag_filter_input);
                }
            });

        egui::CollapsingHeader::new("Search")
            .default_open(true)
            .show(ui, |ui| {
                let response = ui
                    .text_edit_singleline(&mut self.search_input)
                    .on_hover_text("Match titles and tags.");
                if response.changed() {
                    self.session.set_search_term(&self.search_input);
                }
                self.draw_search_results(ui);
            });
    }

    fn draw_persona_picker(&mut self, ui: &mut Ui) {
        let current = self.session.filter().persona();
        let mut selected = current;

        egui::ComboBox::from_id_salt("persona")
            .selected_text(current.label())
            .show_ui(ui, |ui| {
                for persona in Persona::ALL {
                    ui.selectable_value(&mut selected, persona, persona.label());
                }
            });

        if selected != current {
            self.apply_persona(selected);
        }

        let tags = selected.tags();
        if !tags.is_empty() {
            ui.small(tags.join(", "));
        }
    }

    fn draw_category_toggles(&mut self, ui: &mut Ui) {
        for category in Category::SELECTABLE {
            let mut enabled = self.session.filter().is_category_enabled(category);
            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
                ui.painter().rect_filled(swatch, 2.0, category.color());
                if ui.checkbox(&mut enabled, category.label()).changed() {
                    self.session.set_category_enabled(category, enabled);
                }
            });
        }
    }

    fn draw_search_results(&mut self, ui: &mut Ui) {
        if self.session.filter().search_term().is_empty() {
            return;
        }
        let ranked = ranked_search_matches(&self.session);

        ui.add_space(4.0);
        ui.label(RichText::new(format!("{} matching artifacts", ranked.len())).small());

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("search_results")
            .max_height(260.0)
            .show(ui, |ui| {
                for (_, id, label) in ranked.iter().take(SEARCH_RESULT_ROWS) {
                    let is_selected = self.selected.as_deref() == Some(id.as_str());
                    if ui
                        .selectable_label(is_selected, truncate_chars(label, RESULT_LABEL_CHARS))
                        .clicked()
                    {
                        clicked = Some(id.clone());
                    }
                }
            });

        if clicked.is_some() {
            self.selected = clicked;
        }
    }
}
