use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::links::Link;
use super::node::Node;

pub const NODE_VISIBLE_OPACITY: f32 = 1.0;
pub const NODE_DIMMED_OPACITY: f32 = 0.1;
pub const LINK_VISIBLE_OPACITY: f32 = 0.3;
pub const LINK_DIMMED_OPACITY: f32 = 0.05;

/// Audience preset that narrows the graph to tags matching a fixed substring list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    #[default]
    None,
    Researcher,
    Organizer,
    Educator,
    Artist,
    Neighbor,
    Explorer,
}

impl Persona {
    pub const ALL: [Persona; 7] = [
        Persona::None,
        Persona::Researcher,
        Persona::Organizer,
        Persona::Educator,
        Persona::Artist,
        Persona::Neighbor,
        Persona::Explorer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Everyone",
            Self::Researcher => "Researcher",
            Self::Organizer => "Organizer",
            Self::Educator => "Educator",
            Self::Artist => "Artist",
            Self::Neighbor => "Neighbor",
            Self::Explorer => "Explorer",
        }
    }

    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Self::None | Self::Explorer => &[],
            Self::Researcher => &[
                "Archival / Documentation",
                "Oral Histories",
                "Knowledge Sharing",
                "Memory & Commemoration",
            ],
            Self::Organizer => &[
                "Community Organizing",
                "Community Mobilization",
                "Resistance & Protest",
                "Protest Documentation",
                "Awareness / Advocacy",
                "Grassroots Collective",
            ],
            Self::Educator => &[
                "Education & Literacy",
                "Educational Resource",
                "Everyday Learning",
                "Knowledge Sharing",
            ],
            Self::Artist => &[
                "Artistic Practice",
                "Theatre & Performance",
                "Music & Folk Traditions",
                "Storytelling / Oral Tradition",
                "Culture & Heritage",
            ],
            Self::Neighbor => &[
                "Everyday Life & Small Joys",
                "Food & Shared Spaces",
                "Neighborhood Gathering",
                "Friends & Family Networks",
            ],
        }
    }
}

/// Live filter inputs. The UI writes through the setters; visibility is derived, never stored here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    selected_categories: HashSet<Category>,
    persona: Persona,
    tag_filter: String,
    search_term: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_categories: Category::SELECTABLE.into_iter().collect(),
            persona: Persona::None,
            tag_filter: String::new(),
            search_term: String::new(),
        }
    }
}

impl FilterState {
    pub fn with_persona(persona: Persona) -> Self {
        Self {
            persona,
            ..Self::default()
        }
    }

    pub fn set_category_enabled(&mut self, category: Category, enabled: bool) {
        if category == Category::Other {
            return;
        }
        if enabled {
            self.selected_categories.insert(category);
        } else {
            self.selected_categories.remove(&category);
        }
    }

    pub fn toggle_category(&mut self, category: Category) {
        let enabled = self.is_category_enabled(category);
        self.set_category_enabled(category, !enabled);
    }

    pub fn is_category_enabled(&self, category: Category) -> bool {
        self.selected_categories.contains(&category)
    }

    pub fn set_persona(&mut self, persona: Persona) {
        self.persona = persona;
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn set_tag_filter(&mut self, value: impl Into<String>) {
        self.tag_filter = value.into();
    }

    pub fn tag_filter(&self) -> &str {
        &self.tag_filter
    }

    pub fn set_search_term(&mut self, value: impl Into<String>) {
        self.search_term = value.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    fn matches_persona(&self, node: &Node) -> bool {
        let persona_tags = self.persona.tags();
        if persona_tags.is_empty() {
            return true;
        }
        node.tags
            .iter()
            .any(|tag| persona_tags.iter().any(|wanted| tag.contains(wanted)))
    }

    fn matches_category(&self, node: &Node) -> bool {
        node.categories
            .iter()
            .any(|category| self.selected_categories.contains(&category))
    }

    fn matches_tag_filter(&self, node: &Node) -> bool {
        if self.tag_filter.is_empty() {
            return true;
        }
        let needle = self.tag_filter.to_lowercase();
        node.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }

    fn matches_search(&self, node: &Node) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        node.label.to_lowercase().contains(&needle)
            || node.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }

    pub fn is_visible(&self, node: &Node) -> bool {
        self.matches_persona(node)
            && self.matches_category(node)
            && self.matches_tag_filter(node)
            && self.matches_search(node)
    }
}

/// Evaluates every node against `filter`. Index-aligned with `nodes`.
pub fn node_visibility(nodes: &[Node], filter: &FilterState) -> Vec<bool> {
    nodes.iter().map(|node| filter.is_visible(node)).collect()
}

pub fn is_link_visible(link: &Link, visibility: &[bool]) -> bool {
    let endpoint = |index: usize| visibility.get(index).copied().unwrap_or(false);
    endpoint(link.source) && endpoint(link.target)
}

pub fn node_opacity(visible: bool) -> f32 {
    if visible {
        NODE_VISIBLE_OPACITY
    } else {
        NODE_DIMMED_OPACITY
    }
}

pub fn link_opacity(visible: bool) -> f32 {
    if visible {
        LINK_VISIBLE_OPACITY
    } else {
        LINK_DIMMED_OPACITY
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::archive::Artifact;
    use crate::graph::node::{build_node, node_id};

    fn node(title: &str, tags: &[&str]) -> Node {
        let artifact = Artifact {
            title: Some(title.to_owned()),
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            ..Artifact::default()
        };
        build_node(Arc::new(artifact), node_id(0))
    }

    fn sample() -> Node {
        node(
            "Hidden Hunger in Plain Sight",
            &["Resistance & Protest", "Awareness / Advocacy", "Text (Article, Essay, Letter)"],
        )
    }

    #[test]
    fn default_state_shows_categorised_nodes() {
        assert!(FilterState::default().is_visible(&sample()));
    }

    #[test]
    fn other_nodes_are_never_in_the_selected_set() {
        let other = node("Poster", &["Photograph"]);
        assert!(!FilterState::default().is_visible(&other));
    }

    #[test]
    fn persona_matches_tag_substrings() {
        let node = sample();
        assert!(FilterState::with_persona(Persona::Organizer).is_visible(&node));
        assert!(!FilterState::with_persona(Persona::Neighbor).is_visible(&node));
        assert!(FilterState::with_persona(Persona::Explorer).is_visible(&node));
        assert!(FilterState::with_persona(Persona::None).is_visible(&node));
    }

    #[test]
    fn persona_match_is_case_sensitive() {
        let node = node("Flyer", &["awareness / advocacy campaign", "Social Justice"]);
        assert!(!FilterState::with_persona(Persona::Organizer).is_visible(&node));
    }

    #[test]
    fn category_toggle_hides_and_restores() {
        let node = node("Flyer", &["Education & Literacy"]);
        let mut filter = FilterState::default();
        filter.toggle_category(Category::EducationWellbeing);
        assert!(!filter.is_category_enabled(Category::EducationWellbeing));
        assert!(!filter.is_visible(&node));
        filter.toggle_category(Category::EducationWellbeing);
        assert!(filter.is_visible(&node));
    }

    #[test]
    fn other_cannot_be_selected() {
        let mut filter = FilterState::default();
        filter.set_category_enabled(Category::Other, true);
        assert!(!filter.is_category_enabled(Category::Other));
    }

    #[test]
    fn tag_filter_is_case_insensitive_substring() {
        let node = sample();
        let mut filter = FilterState::default();
        filter.set_tag_filter("ADVOCACY");
        assert!(filter.is_visible(&node));
        filter.set_tag_filter("hunger");
        assert!(!filter.is_visible(&node), "tag filter ignores the label");
    }

    #[test]
    fn search_checks_label_and_tags() {
        let node = sample();
        let mut filter = FilterState::default();
        filter.set_search_term("hunger");
        assert!(filter.is_visible(&node));
        filter.set_search_term("essay");
        assert!(filter.is_visible(&node));
        filter.set_search_term("bangalore");
        assert!(!filter.is_visible(&node));
    }

    #[test]
    fn visibility_is_the_conjunction_of_all_predicates() {
        let node = sample();
        let passing = {
            let mut filter = FilterState::with_persona(Persona::Organizer);
            filter.set_tag_filter("protest");
            filter.set_search_term("plain sight");
            filter
        };
        assert!(passing.is_visible(&node));

        let mut persona_fails = passing.clone();
        persona_fails.set_persona(Persona::Artist);
        let mut category_fails = passing.clone();
        category_fails.set_category_enabled(Category::SocialJustice, false);
        category_fails.set_category_enabled(Category::PoliticsCollectiveAction, false);
        let mut tag_fails = passing.clone();
        tag_fails.set_tag_filter("music");
        let mut search_fails = passing.clone();
        search_fails.set_search_term("festival");

        for filter in [persona_fails, category_fails, tag_fails, search_fails] {
            assert!(!filter.is_visible(&node), "{filter:?}");
        }
    }

    #[test]
    fn link_visible_only_when_both_endpoints_are() {
        let link = Link { source: 0, target: 1 };
        assert!(is_link_visible(&link, &[true, true]));
        assert!(!is_link_visible(&link, &[true, false]));
        assert!(!is_link_visible(&link, &[false, true]));
        assert!(!is_link_visible(&link, &[false, false]));
        assert!(!is_link_visible(&link, &[true]));
    }

    #[test]
    fn dimmed_levels_are_distinct_and_nonzero() {
        assert!(node_opacity(false) > 0.0);
        assert!(link_opacity(false) > 0.0);
        assert!(node_opacity(false) != link_opacity(false));
        assert!(link_opacity(true) < node_opacity(true));
    }

    #[test]
    fn visibility_pass_is_idempotent() {
        let nodes = vec![sample(), node("Poster", &["Photograph"])];
        let filter = FilterState::default();
        let first = node_visibility(&nodes, &filter);
        assert_eq!(first, vec![true, false]);
        assert_eq!(node_visibility(&nodes, &filter), first);
    }
}
