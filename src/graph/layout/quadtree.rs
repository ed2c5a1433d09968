use eframe::egui::{Vec2, vec2};

// Below this many splits, distinct but nearly equal positions share a leaf.
const MAX_DEPTH: usize = 24;

/// Square cell spanning `min .. min + size` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Extent {
    pub(super) min: Vec2,
    pub(super) size: f32,
}

impl Extent {
    fn covering(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (lo, hi) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), point| (lo.min(*point), hi.max(*point)));
        if !(lo.is_finite() && hi.is_finite()) {
            return None;
        }

        let span = hi - lo;
        Some(Self {
            min: lo - Vec2::splat(1.0),
            size: span.x.max(span.y) + 2.0,
        })
    }

    pub(super) fn max(self) -> Vec2 {
        self.min + Vec2::splat(self.size)
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }

    /// True when every point of the cell lies farther than `reach` from `point` along some axis.
    pub(super) fn beyond(self, point: Vec2, reach: f32) -> bool {
        let max = self.max();
        self.min.x > point.x + reach
            || max.x < point.x - reach
            || self.min.y > point.y + reach
            || max.y < point.y - reach
    }

    // Bit 0 picks the right half, bit 1 the bottom half.
    fn quadrant(self, point: Vec2) -> usize {
        let half = self.size * 0.5;
        let right = point.x >= self.min.x + half;
        let bottom = point.y >= self.min.y + half;
        usize::from(right) | (usize::from(bottom) << 1)
    }

    fn child(self, quadrant: usize) -> Self {
        let half = self.size * 0.5;
        let offset = vec2(
            if quadrant & 1 == 1 { half } else { 0.0 },
            if quadrant & 2 == 2 { half } else { 0.0 },
        );
        Self {
            min: self.min + offset,
            size: half,
        }
    }
}

#[derive(Debug)]
pub(super) struct QuadCell {
    pub(super) extent: Extent,
    children: [Option<usize>; 4],
    /// Bodies stored in a leaf. They all share one position unless the depth limit was hit.
    pub(super) bodies: Vec<usize>,
    /// Sum of the body weights below this cell.
    pub(super) charge: f32,
    /// Weighted mean position of the bodies below this cell.
    pub(super) centroid: Vec2,
}

impl QuadCell {
    fn empty(extent: Extent) -> Self {
        Self {
            extent,
            children: [None; 4],
            bodies: Vec::new(),
            charge: 0.0,
            centroid: Vec2::ZERO,
        }
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

/// Point quadtree over body positions, one leaf per distinct position.
///
/// Cells live in an arena. A child is always pushed after its parent, so walking the arena
/// backwards visits children before parents.
#[derive(Debug)]
pub(super) struct QuadTree {
    cells: Vec<QuadCell>,
}

impl QuadTree {
    /// Builds the tree and aggregates `weight(index)` into every cell.
    pub(super) fn build(positions: &[Vec2], weight: impl Fn(usize) -> f32) -> Option<Self> {
        let extent = Extent::covering(positions)?;
        let mut tree = Self {
            cells: vec![QuadCell::empty(extent)],
        };
        for index in 0..positions.len() {
            tree.insert(index, positions);
        }
        tree.accumulate(positions, weight);
        Some(tree)
    }

    pub(super) fn root(&self) -> &QuadCell {
        &self.cells[0]
    }

    /// Pre-order walk from the root. Returning `true` from `visit` skips that cell's children.
    pub(super) fn visit(&self, mut visit: impl FnMut(&QuadCell) -> bool) {
        let mut stack = vec![0usize];
        while let Some(id) = stack.pop() {
            let cell = &self.cells[id];
            if visit(cell) {
                continue;
            }
            stack.extend(cell.children.iter().rev().flatten().copied());
        }
    }

    fn add_child(&mut self, parent: usize, quadrant: usize) -> usize {
        let id = self.cells.len();
        let extent = self.cells[parent].extent.child(quadrant);
        self.cells.push(QuadCell::empty(extent));
        self.cells[parent].children[quadrant] = Some(id);
        id
    }

    fn insert(&mut self, body: usize, positions: &[Vec2]) {
        let point = positions[body];
        let mut id = 0;
        let mut depth = 0;

        loop {
            if self.cells[id].is_leaf() {
                let resident = self.cells[id].bodies.first().map(|&other| positions[other]);
                match resident {
                    None => {
                        self.cells[id].bodies.push(body);
                        return;
                    }
                    Some(resident) if resident == point || depth >= MAX_DEPTH => {
                        self.cells[id].bodies.push(body);
                        return;
                    }
                    Some(resident) => {
                        // Push the residents one level down and retry this cell as a branch.
                        let quadrant = self.cells[id].extent.quadrant(resident);
                        let child = self.add_child(id, quadrant);
                        self.cells[child].bodies = std::mem::take(&mut self.cells[id].bodies);
                        continue;
                    }
                }
            }

            let quadrant = self.cells[id].extent.quadrant(point);
            id = match self.cells[id].children[quadrant] {
                Some(child) => child,
                None => {
                    let child = self.add_child(id, quadrant);
                    self.cells[child].bodies.push(body);
                    return;
                }
            };
            depth += 1;
        }
    }

    fn accumulate(&mut self, positions: &[Vec2], weight: impl Fn(usize) -> f32) {
        for id in (0..self.cells.len()).rev() {
            let mut charge = 0.0;
            let mut moment = Vec2::ZERO;
            let mut total = 0.0;

            let cell = &self.cells[id];
            if cell.is_leaf() {
                for &body in &cell.bodies {
                    let w = weight(body);
                    charge += w;
                    moment += positions[body] * w.abs();
                    total += w.abs();
                }
            } else {
                for &child in cell.children.iter().flatten() {
                    let child = &self.cells[child];
                    charge += child.charge;
                    moment += child.centroid * child.charge.abs();
                    total += child.charge.abs();
                }
            }

            let centroid = if total > 0.0 {
                moment / total
            } else {
                cell.extent.min + Vec2::splat(cell.extent.size * 0.5)
            };
            let cell = &mut self.cells[id];
            cell.charge = charge;
            cell.centroid = centroid;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(tree: &QuadTree) -> Vec<Vec<usize>> {
        let mut leaves = Vec::new();
        tree.visit(|cell| {
            if cell.is_leaf() {
                leaves.push(cell.bodies.clone());
            }
            false
        });
        leaves
    }

    #[test]
    fn empty_input_has_no_tree() {
        assert!(QuadTree::build(&[], |_| 1.0).is_none());
    }

    #[test]
    fn distinct_positions_get_their_own_leaves() {
        let positions = (0..50)
            .map(|index| vec2((index % 7) as f32 * 13.0, (index / 7) as f32 * 9.0))
            .collect::<Vec<_>>();
        let tree = QuadTree::build(&positions, |_| 1.0).unwrap();

        let mut seen = leaves(&tree).into_iter().flatten().collect::<Vec<_>>();
        seen.sort_unstable();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
        assert!(leaves(&tree).iter().all(|bodies| bodies.len() == 1));
        assert!(positions.iter().all(|position| tree.root().extent.contains(*position)));
    }

    #[test]
    fn coincident_bodies_share_a_leaf() {
        let positions = vec![vec2(4.0, 4.0), vec2(4.0, 4.0), vec2(4.0, 4.0), vec2(40.0, 4.0)];
        let tree = QuadTree::build(&positions, |_| 1.0).unwrap();
        let mut groups = leaves(&tree);
        groups.sort();
        assert_eq!(groups, vec![vec![0, 1, 2], vec![3]]);
    }

    #[test]
    fn cells_aggregate_charge_and_centroid() {
        let positions = vec![vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(0.0, 30.0)];
        let tree = QuadTree::build(&positions, |_| -40.0).unwrap();
        let root = tree.root();
        assert_eq!(root.charge, -120.0);
        assert!((root.centroid - vec2(10.0 / 3.0, 10.0)).length() < 1e-4);

        let weighted = QuadTree::build(&positions, |index| if index == 1 { 3.0 } else { 1.0 }).unwrap();
        assert!((weighted.root().centroid - vec2(6.0, 6.0)).length() < 1e-4);
    }

    #[test]
    fn visit_can_prune_subtrees() {
        let positions = (0..16)
            .map(|index| vec2(index as f32 * 20.0, (index % 4) as f32 * 20.0))
            .collect::<Vec<_>>();
        let tree = QuadTree::build(&positions, |_| 1.0).unwrap();

        let mut visited = 0;
        tree.visit(|_| {
            visited += 1;
            true
        });
        assert_eq!(visited, 1);

        let mut all = 0;
        tree.visit(|_| {
            all += 1;
            false
        });
        assert_eq!(all, tree.cells.len());
    }

    #[test]
    fn beyond_checks_each_axis() {
        let extent = Extent {
            min: vec2(0.0, 0.0),
            size: 10.0,
        };
        assert!(extent.beyond(vec2(25.0, 5.0), 10.0));
        assert!(!extent.beyond(vec2(15.0, 5.0), 10.0));
        assert!(!extent.beyond(vec2(5.0, 5.0), 0.0));
    }
}
