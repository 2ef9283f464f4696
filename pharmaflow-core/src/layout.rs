use serde::Serialize;

/// Vertical lane every node sits on, in normalized [0, 1] space.
pub const LANE_Y: f64 = 0.5;

/// One step placed on the normalized canvas. `ordinal` is 1-based for
/// display; `x` and `y` are in [0, 1] with the origin at the left.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub ordinal: usize,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// Connector between consecutive nodes, by index into the node list. The
/// midpoint is where an arrow marker belongs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowEdge {
    pub from: usize,
    pub to: usize,
    pub midpoint: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowDiagram {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

/// Lays step names out as a left-to-right chain: node i of N sits at
/// x = i / (N - 1), and a single node is centered at x = 0.5. Rendering
/// backends scale the normalized coordinates to their own canvas.
pub fn layout<S: AsRef<str>>(step_names: &[S]) -> FlowDiagram {
    let count = step_names.len();
    let nodes: Vec<FlowNode> = step_names
        .iter()
        .enumerate()
        .map(|(index, name)| FlowNode {
            ordinal: index + 1,
            name: name.as_ref().to_string(),
            x: if count > 1 {
                index as f64 / (count - 1) as f64
            } else {
                0.5
            },
            y: LANE_Y,
        })
        .collect();

    let edges: Vec<FlowEdge> = nodes
        .windows(2)
        .enumerate()
        .map(|(index, pair)| FlowEdge {
            from: index,
            to: index + 1,
            midpoint: ((pair[0].x + pair[1].x) / 2.0, LANE_Y),
        })
        .collect();

    FlowDiagram { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_single_step_is_centered() {
        let diagram = layout(&["only step"]);
        assert_eq!(diagram.nodes.len(), 1);
        assert_eq!(diagram.nodes[0].x, 0.5);
        assert_eq!(diagram.nodes[0].y, LANE_Y);
        assert!(diagram.edges.is_empty());
    }

    #[test]
    fn four_steps_spread_evenly_from_zero_to_one() {
        let diagram = layout(&["a", "b", "c", "d"]);
        let xs: Vec<f64> = diagram.nodes.iter().map(|node| node.x).collect();
        assert_eq!(xs, [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
    }

    #[test]
    fn ordinals_are_one_based_and_names_carried_through() {
        let diagram = layout(&["granulation", "drying"]);
        assert_eq!(diagram.nodes[0].ordinal, 1);
        assert_eq!(diagram.nodes[1].ordinal, 2);
        assert_eq!(diagram.nodes[1].name, "drying");
    }

    #[test]
    fn edges_connect_consecutive_nodes_at_their_midpoints() {
        let diagram = layout(&["a", "b", "c"]);
        assert_eq!(diagram.edges.len(), 2);
        assert_eq!(diagram.edges[0].from, 0);
        assert_eq!(diagram.edges[0].to, 1);
        assert_eq!(diagram.edges[0].midpoint, (0.25, LANE_Y));
        assert_eq!(diagram.edges[1].midpoint, (0.75, LANE_Y));
    }

    #[test]
    fn all_nodes_share_one_lane() {
        let diagram = layout(&["a", "b", "c", "d", "e"]);
        assert!(diagram.nodes.iter().all(|node| node.y == LANE_Y));
    }
}
