use eframe::egui::{Vec2, vec2};

use super::Viewport;
use crate::graph::node::Node;

#[derive(Clone, Copy, Debug)]
pub struct TimelineConfig {
    /// Empty margin kept on the left and right of the timeline row.
    pub horizontal_padding: f32,
    /// Floor on the gap between neighbours. The row may overflow a narrow viewport.
    pub min_spacing: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            horizontal_padding: 80.0,
            min_spacing: 24.0,
        }
    }
}

/// Node indices in chronological order. Undated nodes go last; ties keep input order.
pub fn timeline_order(nodes: &[Node]) -> Vec<usize> {
    let mut order = (0..nodes.len()).collect::<Vec<_>>();
    order.sort_by_key(|&index| nodes[index].timeline_key());
    order
}

/// Evenly spaced positions along the vertical centre line, indexed by node index.
///
/// Rank order is always strictly left to right; when the viewport is too narrow the
/// row keeps `min_spacing` and runs past the right padding.
pub fn timeline_positions(order: &[usize], viewport: Viewport, config: TimelineConfig) -> Vec<Vec2> {
    let count = order.len();
    let mut positions = vec![Vec2::ZERO; count];
    let center = viewport.center();

    if count <= 1 {
        for &index in order {
            positions[index] = center;
        }
        return positions;
    }

    let usable = (viewport.width - config.horizontal_padding * 2.0).max(0.0);
    let spacing = (usable / (count - 1) as f32).max(config.min_spacing);
    for (rank, &index) in order.iter().enumerate() {
        positions[index] = vec2(config.horizontal_padding + spacing * rank as f32, center.y);
    }
    positions
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::archive::Artifact;
    use crate::graph::node::{build_node, node_id};

    fn dated(index: usize, date: Option<&str>) -> Node {
        let artifact = Artifact {
            date_created: date.map(str::to_owned),
            ..Artifact::default()
        };
        build_node(Arc::new(artifact), node_id(index))
    }

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        height: 600.0,
    };

    #[test]
    fn orders_by_date_with_stable_ties_and_undated_last() {
        let nodes = vec![
            dated(0, Some("2025-03-01")),
            dated(1, None),
            dated(2, Some("2024-01-01")),
            dated(3, Some("2025-03-01")),
            dated(4, Some("not a date")),
        ];
        assert_eq!(timeline_order(&nodes), vec![2, 0, 3, 1, 4]);
    }

    #[test]
    fn spreads_nodes_between_the_paddings() {
        let positions = timeline_positions(&[2, 0, 1], VIEWPORT, TimelineConfig::default());
        assert_eq!(positions[2], vec2(80.0, 300.0));
        assert_eq!(positions[0], vec2(500.0, 300.0));
        assert_eq!(positions[1], vec2(920.0, 300.0));
    }

    #[test]
    fn single_node_is_centred() {
        let positions = timeline_positions(&[0], VIEWPORT, TimelineConfig::default());
        assert_eq!(positions, vec![vec2(500.0, 300.0)]);
        assert!(timeline_positions(&[], VIEWPORT, TimelineConfig::default()).is_empty());
    }

    #[test]
    fn narrow_viewport_keeps_strict_date_order() {
        let narrow = Viewport {
            width: 100.0,
            height: 100.0,
        };
        let positions = timeline_positions(&[3, 1, 0, 2], narrow, TimelineConfig::default());
        let xs = [3, 1, 0, 2].map(|index| positions[index].x);
        assert!(xs.windows(2).all(|pair| pair[1] - pair[0] >= 24.0));
        assert_eq!(xs[0], 80.0);
    }
}
