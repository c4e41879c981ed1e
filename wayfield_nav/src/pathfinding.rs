// A* search over a `NodeGraph`.
//
// The open set is a bucketed `PriorityQueue` keyed by F = G + H, so nodes
// with equal F are expanded in the order they were discovered. The closed
// set is a hash set; per-node bookkeeping (G, H, parent) lives in a hash map
// filled lazily as nodes are first touched. All three are owned by the
// `PathFinder` and cleared at the start of every call, so no state leaks
// between searches while allocations are reused. Taking `&mut self` makes
// "one search at a time per finder" a compile-time rule; a built graph can
// still be searched from many threads, each with its own finder.
//
// The heuristic is the straight-line distance to the destination. That is
// admissible and consistent when edge costs are Euclidean distances, as they
// are for grid graphs.
//
// Failure is not an error. When the open set runs dry or the expansion cap
// is hit, the result holds just the start node, with
// `outcome != SearchOutcome::Found`. A one-node result therefore means
// either "start == finish" or "no path"; check `is_found()`.
//
// See also: `priority_queue.rs` for the open set, `config.rs` for
// `SearchSettings` (expansion cap and `FrontierUpdate` policy), `graph.rs`
// for the searched graph.

use crate::config::{FrontierUpdate, SearchSettings};
use crate::graph::NodeGraph;
use crate::priority_queue::PriorityQueue;
use crate::types::{NodeId, Vec3};
use log::{debug, warn};
use ordered_float::OrderedFloat;
use rustc_hash::{FxHashMap, FxHashSet};

/// Why a search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The destination was dequeued; `nodes` is a real path.
    Found,
    /// Every reachable node was expanded without meeting the destination.
    Exhausted,
    /// `SearchSettings::max_expansions` expansions ran out first.
    IterationCapReached,
}

/// The result of a search.
#[derive(Clone, Debug)]
pub struct PathResult {
    /// Start to finish inclusive, or just `[start]` on failure.
    pub nodes: Vec<NodeId>,
    /// Sum of edge costs along `nodes` (zero on failure).
    pub total_cost: f32,
    pub outcome: SearchOutcome,
    /// Number of nodes expanded.
    pub expansions: u32,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        self.outcome == SearchOutcome::Found
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }
}

/// Per-node search bookkeeping.
#[derive(Clone, Copy, Debug)]
struct PathNodeInfo {
    /// Cost of the recorded route from the start.
    g: f32,
    /// Straight-line distance to the destination.
    h: f32,
    /// Previous node on the recorded route; `None` only for the start.
    parent: Option<NodeId>,
}

impl PathNodeInfo {
    fn f(&self) -> f32 {
        self.g + self.h
    }
}

#[derive(Debug, Default)]
pub struct PathFinder {
    settings: SearchSettings,
    open: PriorityQueue<OrderedFloat<f32>, NodeId>,
    closed: FxHashSet<NodeId>,
    info: FxHashMap<NodeId, PathNodeInfo>,
}

impl PathFinder {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: SearchSettings) {
        self.settings = settings;
    }

    /// Find a path from `start` to `finish`. Both must belong to `graph`
    /// (not checked; an id from elsewhere panics on lookup).
    pub fn find_path(&mut self, graph: &NodeGraph, start: NodeId, finish: NodeId) -> PathResult {
        self.open.clear();
        self.closed.clear();
        self.info.clear();

        let goal = graph.position(finish);
        self.info.insert(
            start,
            PathNodeInfo {
                g: 0.0,
                h: 0.0,
                parent: None,
            },
        );
        self.open.enqueue(OrderedFloat(0.0), start);

        let mut expansions = 0u32;
        let outcome = loop {
            if expansions >= self.settings.max_expansions {
                break SearchOutcome::IterationCapReached;
            }
            let Some(current) = self.open.dequeue() else {
                break SearchOutcome::Exhausted;
            };
            if current == finish {
                break SearchOutcome::Found;
            }
            self.expand(graph, current, goal);
            expansions += 1;
        };

        if outcome != SearchOutcome::Found {
            warn!("can't find path from {start} to {finish}: {outcome:?} after {expansions} expansions");
            return PathResult {
                nodes: vec![start],
                total_cost: 0.0,
                outcome,
                expansions,
            };
        }

        let nodes = self.build_path(finish);
        let total_cost = graph
            .path_cost(&nodes)
            .unwrap_or_else(|| self.info[&finish].g);
        debug!(
            "path {start} -> {finish}: {} nodes, cost {total_cost:.3}, {expansions} expansions",
            nodes.len()
        );
        PathResult {
            nodes,
            total_cost,
            outcome,
            expansions,
        }
    }

    /// Close `node` and push its unclosed neighbors onto the frontier.
    fn expand(&mut self, graph: &NodeGraph, node: NodeId, goal: Vec3) {
        self.closed.insert(node);
        let node_g = self.info[&node].g;

        for edge in graph.edges(node) {
            let neighbor = edge.target;
            if self.closed.contains(&neighbor) {
                continue;
            }
            let tentative_g = node_g + edge.cost;

            if self.open.contains(&neighbor) {
                let Some(info) = self.info.get_mut(&neighbor) else {
                    continue;
                };
                if tentative_g >= info.g {
                    continue;
                }
                match self.settings.frontier_update {
                    FrontierUpdate::DecreaseKey => {
                        let old_priority = OrderedFloat(info.f());
                        info.g = tentative_g;
                        info.parent = Some(node);
                        let new_priority = OrderedFloat(info.f());
                        self.open.remove(&old_priority, &neighbor);
                        self.open.enqueue(new_priority, neighbor);
                    }
                    FrontierUpdate::ParentOnly => {
                        info.parent = Some(node);
                    }
                }
            } else {
                let info = PathNodeInfo {
                    g: tentative_g,
                    h: graph.position(neighbor).distance(goal),
                    parent: Some(node),
                };
                self.info.insert(neighbor, info);
                self.open.enqueue(OrderedFloat(info.f()), neighbor);
            }
        }
    }

    /// Walk parent links back from `finish` and return the path in
    /// start-to-finish order.
    fn build_path(&self, finish: NodeId) -> Vec<NodeId> {
        let mut nodes = vec![finish];
        let mut current = finish;
        while let Some(parent) = self.info.get(&current).and_then(|info| info.parent) {
            nodes.push(parent);
            current = parent;
        }
        nodes.reverse();
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{GraphBuilder, GridLayout};
    use crate::types::GridDims;
    use crate::visibility::Unobstructed;

    fn finder() -> PathFinder {
        PathFinder::new(SearchSettings::default())
    }

    fn grid(x_count: u32, z_count: u32) -> NodeGraph {
        let layout = GridLayout {
            dims: GridDims::new(x_count, z_count),
            spacing_x: 1.0,
            spacing_z: 1.0,
            center: Vec3::ZERO,
        };
        GraphBuilder::new().build(&layout, None, &Unobstructed)
    }

    /// Nodes at x = 0, 5, 10, ... linked in a chain.
    fn chain(len: u32) -> NodeGraph {
        let positions = (0..len).map(|i| Vec3::new(i as f32 * 5.0, 0.0, 0.0)).collect();
        let links: Vec<_> = (1..len).map(|i| (NodeId(i - 1), NodeId(i), 5.0)).collect();
        NodeGraph::from_links(positions, &links, None).unwrap()
    }

    /// Start S reaches F directly (cost 8) or via B and N (cost 4). N is first
    /// discovered through A at G = 11 and only later reached through B at
    /// G = 3. All nodes share one position so H is zero everywhere.
    fn late_shortcut_graph() -> NodeGraph {
        let (s, a, b, n, f) = (NodeId(0), NodeId(1), NodeId(2), NodeId(3), NodeId(4));
        NodeGraph::from_links(
            vec![Vec3::ZERO; 5],
            &[
                (s, a, 1.0),
                (s, b, 2.0),
                (a, n, 10.0),
                (b, n, 1.0),
                (n, f, 1.0),
                (s, f, 8.0),
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn trivial_path() {
        let graph = chain(1);
        let result = finder().find_path(&graph, NodeId(0), NodeId(0));
        assert!(result.is_found());
        assert_eq!(result.nodes, vec![NodeId(0)]);
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.expansions, 0);
    }

    #[test]
    fn simple_chain() {
        let graph = chain(3);
        let result = finder().find_path(&graph, NodeId(0), NodeId(2));
        assert!(result.is_found());
        assert_eq!(result.nodes, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(result.total_cost, 10.0);
    }

    #[test]
    fn chooses_shortest() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ];
        // Direct expensive link a-c, cheaper via b.
        let graph = NodeGraph::from_links(
            positions,
            &[
                (NodeId(0), NodeId(2), 20.0),
                (NodeId(0), NodeId(1), 5.0),
                (NodeId(1), NodeId(2), 5.0),
            ],
            None,
        )
        .unwrap();
        let result = finder().find_path(&graph, NodeId(0), NodeId(2));
        assert_eq!(result.nodes, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(result.total_cost, 10.0);
    }

    #[test]
    fn no_path_returns_start_only() {
        let graph = NodeGraph::from_links(
            vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
            &[],
            None,
        )
        .unwrap();
        let result = finder().find_path(&graph, NodeId(0), NodeId(1));
        assert!(!result.is_found());
        assert_eq!(result.outcome, SearchOutcome::Exhausted);
        assert_eq!(result.nodes, vec![NodeId(0)]);
        assert_eq!(result.start(), NodeId(0));
    }

    #[test]
    fn corner_to_corner_on_3x3_takes_the_diagonal() {
        let graph = grid(3, 3);
        let start = graph.node_at(0, 0).unwrap().id;
        let finish = graph.node_at(2, 2).unwrap().id;
        let result = finder().find_path(&graph, start, finish);
        assert!(result.is_found());
        assert_eq!(result.nodes, vec![start, graph.node_at(1, 1).unwrap().id, finish]);
        assert!((result.total_cost - 2.0 * 2.0f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn iteration_cap_stops_search() {
        let graph = chain(100);
        let mut finder = PathFinder::new(SearchSettings {
            max_expansions: 5,
            ..SearchSettings::default()
        });
        let result = finder.find_path(&graph, NodeId(0), NodeId(99));
        assert_eq!(result.outcome, SearchOutcome::IterationCapReached);
        assert_eq!(result.expansions, 5);
        assert_eq!(result.nodes, vec![NodeId(0)]);

        finder.set_settings(SearchSettings::default());
        let result = finder.find_path(&graph, NodeId(0), NodeId(99));
        assert!(result.is_found());
        assert_eq!(result.nodes.len(), 100);
    }

    #[test]
    fn decrease_key_finds_late_shortcut() {
        let graph = late_shortcut_graph();
        let result = finder().find_path(&graph, NodeId(0), NodeId(4));
        assert!(result.is_found());
        assert_eq!(result.nodes, vec![NodeId(0), NodeId(2), NodeId(3), NodeId(4)]);
        assert_eq!(result.total_cost, 4.0);
    }

    #[test]
    fn parent_only_misses_late_shortcut() {
        let graph = late_shortcut_graph();
        let mut finder = PathFinder::new(SearchSettings {
            frontier_update: FrontierUpdate::ParentOnly,
            ..SearchSettings::default()
        });
        let result = finder.find_path(&graph, NodeId(0), NodeId(4));
        assert!(result.is_found());
        // N keeps its stale G = 11 and queue slot, so F is dequeued through
        // the direct link first.
        assert_eq!(result.nodes, vec![NodeId(0), NodeId(4)]);
        assert_eq!(result.total_cost, 8.0);
    }

    #[test]
    fn parent_only_relinks_without_reordering() {
        // Same shape without the direct S-F link: the relinked parent is used
        // for the path, but the stale G delayed N's expansion.
        let (s, a, b, n, f) = (NodeId(0), NodeId(1), NodeId(2), NodeId(3), NodeId(4));
        let graph = NodeGraph::from_links(
            vec![Vec3::ZERO; 5],
            &[(s, a, 1.0), (s, b, 2.0), (a, n, 10.0), (b, n, 1.0), (n, f, 1.0)],
            None,
        )
        .unwrap();
        let mut finder = PathFinder::new(SearchSettings {
            frontier_update: FrontierUpdate::ParentOnly,
            ..SearchSettings::default()
        });
        let result = finder.find_path(&graph, s, f);
        assert_eq!(result.nodes, vec![s, b, n, f]);
        assert_eq!(result.total_cost, 4.0);
    }

    #[test]
    fn scratch_state_does_not_leak_between_calls() {
        let graph = grid(5, 5);
        let mut finder = finder();
        let first = finder.find_path(&graph, NodeId(0), NodeId(24));
        let second = finder.find_path(&graph, NodeId(24), NodeId(0));
        let fresh = PathFinder::new(SearchSettings::default()).find_path(&graph, NodeId(24), NodeId(0));
        assert!(first.is_found());
        assert_eq!(second.nodes, fresh.nodes);
        assert_eq!(second.expansions, fresh.expansions);
    }

    #[test]
    fn deterministic() {
        let graph = grid(8, 6);
        let r1 = finder().find_path(&graph, NodeId(0), NodeId(47));
        let r2 = finder().find_path(&graph, NodeId(0), NodeId(47));
        assert_eq!(r1.nodes, r2.nodes);
        assert_eq!(r1.total_cost, r2.total_cost);
    }
}
