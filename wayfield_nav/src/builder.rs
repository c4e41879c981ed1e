// Grid graph construction.
//
// `GraphBuilder::build` lays out an X×Z grid of nodes centered on a point
// and links each node to the members of its Moore neighborhood (up to 8
// surrounding cells) that it can see, according to a `VisibilityOracle`.
// Edge cost is the Euclidean distance between the two node positions.
//
// Layout: node (i, j) sits at
//   x = center.x + (i - (x_count - 1) / 2) * spacing_x
//   z = center.z + (j - (z_count - 1) / 2) * spacing_z
//   y = center.y
// and gets id `i * z_count + j`.
//
// Every pair of neighbors is tested once from each side. With a symmetric
// oracle the two answers agree, so edges come out in mirrored pairs of equal
// cost. Obstructed pairs are simply left unlinked; a grid split into several
// components is a valid result.
//
// Visibility tests dominate build time, so nodes are linked in parallel on
// rayon's pool. Results are collected in node order, so a deterministic
// oracle always yields the same graph.
//
// See also: `graph.rs` for the output type, `config.rs` for `GridSettings`
// (counts, field size, and the clamp applied before building).

use crate::config::GridSettings;
use crate::graph::{Edge, Node, NodeGraph};
use crate::types::{FrameId, GridDims, NodeId, Vec3};
use crate::visibility::VisibilityOracle;
use log::debug;
use rayon::prelude::*;
use smallvec::SmallVec;

/// Shape and placement of a node grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub dims: GridDims,
    pub spacing_x: f32,
    pub spacing_z: f32,
    pub center: Vec3,
}

impl GridLayout {
    /// Layout for the given settings after clamping them. Spacing is chosen
    /// so the outermost nodes sit on the field boundary.
    pub fn from_settings(settings: &GridSettings) -> Self {
        let s = settings.clamped();
        Self {
            dims: GridDims::new(s.nodes_x_count, s.nodes_z_count),
            spacing_x: s.spacing_x(),
            spacing_z: s.spacing_z(),
            center: s.center,
        }
    }

    /// World position of grid cell `(i, j)`.
    pub fn position(&self, i: u32, j: u32) -> Vec3 {
        let half_x = (self.dims.x_count as f32 - 1.0) * 0.5;
        let half_z = (self.dims.z_count as f32 - 1.0) * 0.5;
        Vec3::new(
            self.center.x + (i as f32 - half_x) * self.spacing_x,
            self.center.y,
            self.center.z + (j as f32 - half_z) * self.spacing_z,
        )
    }
}

/// Builds grid graphs. Holds no state between builds.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build<O>(&self, layout: &GridLayout, frame: Option<FrameId>, oracle: &O) -> NodeGraph
    where
        O: VisibilityOracle + Sync + ?Sized,
    {
        let dims = layout.dims;
        let count = dims.node_count() as u32;

        let positions: Vec<Vec3> = (0..count)
            .map(|idx| {
                let (i, j) = dims.cell_of(NodeId(idx));
                layout.position(i, j)
            })
            .collect();

        let nodes: Vec<Node> = (0..count)
            .into_par_iter()
            .map(|idx| {
                let id = NodeId(idx);
                let position = positions[id.index()];
                let edges: SmallVec<[Edge; 8]> = moore_neighbors(dims, id)
                    .filter_map(|target| {
                        let target_pos = positions[target.index()];
                        oracle.is_visible(position, target_pos).then(|| Edge {
                            origin: id,
                            target,
                            cost: position.distance(target_pos),
                        })
                    })
                    .collect();
                Node {
                    id,
                    position,
                    edges,
                }
            })
            .collect();

        let graph = NodeGraph::from_grid(nodes, dims, frame);
        debug!(
            "built {}x{} node grid: {} nodes, {} edges",
            dims.x_count,
            dims.z_count,
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }
}

/// Ids of the up-to-8 cells surrounding `id`, clipped to the grid, in
/// row-major order.
fn moore_neighbors(dims: GridDims, id: NodeId) -> impl Iterator<Item = NodeId> {
    let (i, j) = dims.cell_of(id);
    let i_range = i.saturating_sub(1)..=(i + 1).min(dims.x_count - 1);
    let j_range = j.saturating_sub(1)..=(j + 1).min(dims.z_count - 1);
    i_range
        .flat_map(move |ni| j_range.clone().map(move |nj| (ni, nj)))
        .filter(move |&(ni, nj)| (ni, nj) != (i, j))
        .map(move |(ni, nj)| dims.id_of(ni, nj))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::Unobstructed;

    fn layout(x_count: u32, z_count: u32, spacing: f32) -> GridLayout {
        GridLayout {
            dims: GridDims::new(x_count, z_count),
            spacing_x: spacing,
            spacing_z: spacing,
            center: Vec3::ZERO,
        }
    }

    #[test]
    fn grid_is_centered() {
        let graph = GraphBuilder::new().build(&layout(3, 5, 2.0), None, &Unobstructed);
        assert_eq!(graph.node_count(), 15);
        assert_eq!(graph.node_at(0, 0).unwrap().position, Vec3::new(-2.0, 0.0, -4.0));
        assert_eq!(graph.node_at(1, 2).unwrap().position, Vec3::ZERO);
        assert_eq!(graph.node_at(2, 4).unwrap().position, Vec3::new(2.0, 0.0, 4.0));
        assert_eq!(graph.node_at(1, 2).unwrap().id, NodeId(7));
    }

    #[test]
    fn grid_follows_center_height() {
        let mut l = layout(3, 3, 1.0);
        l.center = Vec3::new(10.0, 3.5, -10.0);
        let graph = GraphBuilder::new().build(&l, None, &Unobstructed);
        assert!(graph.nodes().iter().all(|n| n.position.y == 3.5));
        assert_eq!(graph.node_at(0, 0).unwrap().position, Vec3::new(9.0, 3.5, -11.0));
    }

    #[test]
    fn degree_by_grid_role() {
        let graph = GraphBuilder::new().build(&layout(4, 5, 1.0), None, &Unobstructed);
        let dims = graph.dims().unwrap();
        for node in graph.nodes() {
            let (i, j) = dims.cell_of(node.id);
            let on_x_edge = i == 0 || i == dims.x_count - 1;
            let on_z_edge = j == 0 || j == dims.z_count - 1;
            let expected = match (on_x_edge, on_z_edge) {
                (true, true) => 3,
                (true, false) | (false, true) => 5,
                (false, false) => 8,
            };
            assert_eq!(node.edges.len(), expected, "node ({i}, {j})");
        }
    }

    #[test]
    fn edge_costs_are_distances() {
        let mut l = layout(3, 3, 1.0);
        l.spacing_z = 2.0;
        let graph = GraphBuilder::new().build(&l, None, &Unobstructed);
        let corner = graph.node_at(0, 0).unwrap();
        let straight_x = corner.edge_to(graph.node_at(1, 0).unwrap().id).unwrap();
        let straight_z = corner.edge_to(graph.node_at(0, 1).unwrap().id).unwrap();
        let diagonal = corner.edge_to(graph.node_at(1, 1).unwrap().id).unwrap();
        assert_eq!(straight_x.cost, 1.0);
        assert_eq!(straight_z.cost, 2.0);
        assert!((diagonal.cost - 5.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn obstructed_pairs_are_not_linked() {
        // Wall along x = 0.5 cuts column 2 (x = 1) off from columns 0 and 1.
        let wall = |a: Vec3, b: Vec3| a.x.min(b.x) < 0.5 && a.x.max(b.x) > 0.5;
        let graph = GraphBuilder::new().build(&layout(3, 3, 1.0), None, &wall);
        let dims = graph.dims().unwrap();
        for node in graph.nodes() {
            let (i, _) = dims.cell_of(node.id);
            for edge in &node.edges {
                let (ti, _) = dims.cell_of(edge.target);
                assert_eq!(i == 2, ti == 2, "edge crosses the wall");
            }
        }
        // The center loses its three links into column 2; the middle of
        // column 2 keeps only its two vertical links.
        assert_eq!(graph.node_at(1, 1).unwrap().edges.len(), 5);
        assert_eq!(graph.node_at(2, 1).unwrap().edges.len(), 2);
    }

    #[test]
    fn frame_is_recorded() {
        let graph = GraphBuilder::new().build(&layout(3, 3, 1.0), Some(FrameId(77)), &Unobstructed);
        assert_eq!(graph.frame(), Some(FrameId(77)));
    }

    #[test]
    fn layout_from_settings_clamps_and_spans_field() {
        let settings = GridSettings {
            nodes_x_count: 1,
            nodes_z_count: 5,
            size_x: 4.0,
            size_z: 8.0,
            center: Vec3::ZERO,
        };
        let l = GridLayout::from_settings(&settings);
        assert_eq!(l.dims, GridDims::new(3, 5));
        assert_eq!(l.spacing_x, 2.0);
        assert_eq!(l.spacing_z, 2.0);
        assert_eq!(l.position(0, 0), Vec3::new(-2.0, 0.0, -4.0));
        assert_eq!(l.position(2, 4), Vec3::new(2.0, 0.0, 4.0));
    }

    #[test]
    fn moore_neighbors_of_corner_and_interior() {
        let dims = GridDims::new(3, 3);
        let corner: Vec<_> = moore_neighbors(dims, dims.id_of(0, 0)).collect();
        assert_eq!(corner, vec![NodeId(1), NodeId(3), NodeId(4)]);
        let interior: Vec<_> = moore_neighbors(dims, dims.id_of(1, 1)).collect();
        assert_eq!(interior.len(), 8);
        assert!(!interior.contains(&NodeId(4)));
    }
}
