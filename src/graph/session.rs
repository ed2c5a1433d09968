use std::collections::HashMap;

use eframe::egui::{Color32, Vec2};
use tracing::{debug, info};

use crate::archive::Artifact;

use super::category::Category;
use super::filter::{FilterState, Persona, is_link_visible, link_opacity, node_opacity, node_visibility};
use super::interaction::hit_test;
use super::layout::{Body, LayoutEngine, LayoutMode, SimulationConfig, TimelineConfig, Viewport};
use super::links::{Link, build_links};
use super::node::{Node, build_nodes};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderNode<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub position: Vec2,
    pub opacity: f32,
    pub color: Color32,
    pub visible: bool,
    /// Only set on the timeline.
    pub date_label: Option<&'a str>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderLink<'a> {
    pub source_id: &'a str,
    pub target_id: &'a str,
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
}

#[derive(Clone, Debug, Default)]
pub struct RenderFrame<'a> {
    pub nodes: Vec<RenderNode<'a>>,
    pub links: Vec<RenderLink<'a>>,
}

/// Everything one loaded graph owns. A reload builds a new session and drops this one.
pub struct GraphSession {
    nodes: Vec<Node>,
    links: Vec<Link>,
    index_by_id: HashMap<String, usize>,
    layout: LayoutEngine,
    filter: FilterState,
    visibility: Vec<bool>,
}

impl GraphSession {
    pub fn build(
        artifacts: Vec<Artifact>,
        filter: FilterState,
        viewport: Viewport,
        config: SimulationConfig,
        timeline: TimelineConfig,
    ) -> Self {
        let nodes = build_nodes(artifacts);
        let links = build_links(&nodes);
        let index_by_id = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect::<HashMap<_, _>>();
        let layout = LayoutEngine::new(&nodes, &links, viewport, config, timeline);
        let visibility = node_visibility(&nodes, &filter);

        info!(
            nodes = nodes.len(),
            links = links.len(),
            "built archive graph"
        );

        Self {
            nodes,
            links,
            index_by_id,
            layout,
            filter,
            visibility,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout.mode()
    }

    pub fn is_simulating(&self) -> bool {
        self.layout.is_running()
    }

    pub fn alpha(&self) -> f32 {
        self.layout.alpha()
    }

    pub fn viewport(&self) -> Viewport {
        self.layout.viewport()
    }

    /// Id of the node currently held by a drag gesture.
    pub fn dragging(&self) -> Option<&str> {
        self.layout
            .dragging()
            .map(|index| self.nodes[index].id.as_str())
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.index_of(id)
            .and_then(|index| self.visibility.get(index).copied())
            .unwrap_or(false)
    }

    pub fn visible_node_count(&self) -> usize {
        self.visibility.iter().filter(|visible| **visible).count()
    }

    pub fn visible_link_count(&self) -> usize {
        self.links
            .iter()
            .filter(|link| is_link_visible(link, &self.visibility))
            .count()
    }

    pub fn position(&self, id: &str) -> Option<Vec2> {
        self.index_of(id).and_then(|index| self.layout.position(index))
    }

    fn refilter(&mut self) {
        self.visibility = node_visibility(&self.nodes, &self.filter);
        debug!(
            visible = self.visible_node_count(),
            total = self.nodes.len(),
            "recomputed graph visibility"
        );
    }

    pub fn set_category_enabled(&mut self, category: Category, enabled: bool) {
        self.filter.set_category_enabled(category, enabled);
        self.refilter();
    }

    pub fn toggle_category(&mut self, category: Category) {
        self.filter.toggle_category(category);
        self.refilter();
    }

    pub fn set_persona(&mut self, persona: Persona) {
        self.filter.set_persona(persona);
        self.refilter();
    }

    pub fn set_tag_filter(&mut self, value: &str) {
        self.filter.set_tag_filter(value);
        self.refilter();
    }

    pub fn set_search_term(&mut self, value: &str) {
        self.filter.set_search_term(value);
        self.refilter();
    }

    pub fn toggle_timeline(&mut self) -> LayoutMode {
        let mode = self.layout.toggle();
        info!(?mode, "switched layout");
        mode
    }

    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> bool {
        self.layout.set_mode(mode)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.layout.set_viewport(viewport);
    }

    /// Advances the force layout by one frame; returns whether it wants another.
    pub fn tick(&mut self) -> bool {
        self.layout.tick()
    }

    pub fn node_at(&self, world: Vec2, hovered: Option<&str>) -> Option<&str> {
        let hovered = hovered.and_then(|id| self.index_of(id));
        hit_test(self.layout.bodies(), world, hovered).map(|index| self.nodes[index].id.as_str())
    }

    pub fn start_drag(&mut self, id: &str) -> bool {
        self.index_of(id)
            .is_some_and(|index| self.layout.start_drag(index))
    }

    pub fn update_drag(&mut self, id: &str, world: Vec2) -> bool {
        self.index_of(id)
            .is_some_and(|index| self.layout.update_drag(index, world))
    }

    pub fn end_drag(&mut self, id: &str) -> bool {
        self.index_of(id)
            .is_some_and(|index| self.layout.end_drag(index))
    }

    /// Stops the tick loop. Called on the outgoing session before it is replaced.
    pub fn teardown(&mut self) {
        self.layout.stop();
        debug!(nodes = self.nodes.len(), "tore down archive graph");
    }

    pub fn frame(&self) -> RenderFrame<'_> {
        let bodies: &[Body] = self.layout.bodies();
        let show_dates = self.layout.shows_date_labels();

        let nodes = self
            .nodes
            .iter()
            .zip(bodies)
            .zip(&self.visibility)
            .map(|((node, body), &visible)| RenderNode {
                id: node.id.as_str(),
                label: node.label.as_str(),
                position: body.position,
                opacity: node_opacity(visible),
                color: node.categories.primary().color(),
                visible,
                date_label: show_dates.then_some(node.created_display.as_str()),
            })
            .collect();

        let links = self
            .links
            .iter()
            .filter(|link| link.source < bodies.len() && link.target < bodies.len())
            .map(|link| RenderLink {
                source_id: self.nodes[link.source].id.as_str(),
                target_id: self.nodes[link.target].id.as_str(),
                from: bodies[link.source].position,
                to: bodies[link.target].position,
                opacity: link_opacity(is_link_visible(link, &self.visibility)),
            })
            .collect();

        RenderFrame { nodes, links }
    }
}
