use super::node::Node;

const MIN_SHARED_TAGS: usize = 2;

/// Undirected relationship between two nodes, stored by index into the node list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: usize,
    pub target: usize,
}

impl Link {
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

fn shared_tag_count(a: &Node, b: &Node) -> usize {
    a.tags.iter().filter(|tag| b.tags.contains(tag)).count()
}

fn related(a: &Node, b: &Node) -> bool {
    a.categories.intersects(&b.categories) || shared_tag_count(a, b) >= MIN_SHARED_TAGS
}

/// Pairwise scan over every unordered pair; quadratic, fine for archive-sized inputs.
pub fn build_links(nodes: &[Node]) -> Vec<Link> {
    let mut links = Vec::new();
    for (source, a) in nodes.iter().enumerate() {
        for (offset, b) in nodes[source + 1..].iter().enumerate() {
            if related(a, b) {
                links.push(Link {
                    source,
                    target: source + 1 + offset,
                });
            }
        }
    }
    links
}
