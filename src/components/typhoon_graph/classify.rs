//! Per-node and per-edge display categories.
//!
//! Each element runs down an ordered rule list and takes the first category a rule
//! yields. The result depends only on the arguments.

use std::collections::{HashMap, HashSet};

use log::debug;
use serde::Serialize;

use super::components::{ComponentAnalysis, find_connected_components};
use super::graph::Graph;
use super::tracker::{assign_path_colors, assign_path_edge_colors};
use super::types::Edge;
use super::view::ViewState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "track", rename_all = "snake_case")]
pub enum NodeCategory {
	Selected,
	StartAndEnd,
	Start,
	End,
	/// Index into [`ViewState::tracks`].
	Track(usize),
	Mainland,
	Island,
	Default,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "track", rename_all = "snake_case")]
pub enum EdgeCategory {
	/// Index into [`ViewState::tracks`].
	Track(usize),
	Mainland,
	Island,
	Default,
}

/// One category per node and per edge, aligned with the graph's arrays.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
	pub nodes: Vec<NodeCategory>,
	pub edges: Vec<EdgeCategory>,
}

#[derive(Clone, Copy, Debug)]
enum NodeRule {
	Selection,
	Extremes,
	TrackedPath,
	Landmass,
}

const NODE_RULES: [NodeRule; 4] = [
	NodeRule::Selection,
	NodeRule::Extremes,
	NodeRule::TrackedPath,
	NodeRule::Landmass,
];

#[derive(Clone, Copy, Debug)]
enum EdgeRule {
	TrackedPath,
	Landmass,
}

const EDGE_RULES: [EdgeRule; 2] = [EdgeRule::TrackedPath, EdgeRule::Landmass];

struct Landmass {
	mainland: HashSet<usize>,
	island: HashSet<usize>,
}

struct Context<'a> {
	graph: &'a Graph,
	view: &'a ViewState,
	node_tracks: HashMap<usize, usize>,
	edge_tracks: Vec<Option<usize>>,
	landmass: Option<Landmass>,
}

impl NodeRule {
	fn apply(self, ctx: &Context<'_>, position: usize) -> Option<NodeCategory> {
		match self {
			NodeRule::Selection => (ctx.view.selected == Some(position)).then_some(NodeCategory::Selected),
			NodeRule::Extremes => {
				if !ctx.view.highlight_extremes {
					return None;
				}
				let node = &ctx.graph.nodes()[position];
				match (node.is_path_start(), node.is_path_end()) {
					(true, true) => Some(NodeCategory::StartAndEnd),
					(true, false) => Some(NodeCategory::Start),
					(false, true) => Some(NodeCategory::End),
					(false, false) => None,
				}
			}
			NodeRule::TrackedPath => ctx.node_tracks.get(&position).map(|&t| NodeCategory::Track(t)),
			NodeRule::Landmass => {
				let land = ctx.landmass.as_ref()?;
				if land.mainland.contains(&position) {
					Some(NodeCategory::Mainland)
				} else if land.island.contains(&position) {
					Some(NodeCategory::Island)
				} else {
					None
				}
			}
		}
	}
}

impl EdgeRule {
	fn apply(self, ctx: &Context<'_>, index: usize, edge: &Edge) -> Option<EdgeCategory> {
		match self {
			EdgeRule::TrackedPath => ctx.edge_tracks.get(index).copied().flatten().map(EdgeCategory::Track),
			EdgeRule::Landmass => {
				let land = ctx.landmass.as_ref()?;
				let inside = |set: &HashSet<usize>| set.contains(&edge.u()) && set.contains(&edge.v());
				if inside(&land.mainland) {
					Some(EdgeCategory::Mainland)
				} else if inside(&land.island) {
					Some(EdgeCategory::Island)
				} else {
					None
				}
			}
		}
	}
}

/// Classifies every node and edge of `graph` under `view`.
///
/// `components` must come from this same `graph`; it is only consulted when
/// `view.show_landmass` is set.
pub fn classify(graph: &Graph, view: &ViewState, components: Option<&ComponentAnalysis>) -> Classification {
	let tracking = !view.tracks.is_empty();
	let landmass = components.filter(|_| view.show_landmass).map(|c| Landmass {
		mainland: c.mainland_set(),
		island: c.island_set(),
	});

	let ctx = Context {
		graph,
		view,
		node_tracks: if tracking {
			assign_path_colors(&view.tracks, graph.nodes())
		} else {
			HashMap::new()
		},
		edge_tracks: if tracking {
			assign_path_edge_colors(&view.tracks, graph)
		} else {
			Vec::new()
		},
		landmass,
	};

	let nodes = (0..graph.node_count())
		.map(|position| {
			NODE_RULES
				.iter()
				.find_map(|rule| rule.apply(&ctx, position))
				.unwrap_or(NodeCategory::Default)
		})
		.collect();

	let edges = if !tracking && ctx.landmass.is_none() {
		vec![EdgeCategory::Default; graph.edge_count()]
	} else {
		graph
			.edges()
			.iter()
			.enumerate()
			.map(|(index, edge)| {
				EDGE_RULES
					.iter()
					.find_map(|rule| rule.apply(&ctx, index, edge))
					.unwrap_or(EdgeCategory::Default)
			})
			.collect()
	};

	debug!(
		"classified {} nodes and {} edges ({} tracks, landmass {})",
		graph.node_count(),
		graph.edge_count(),
		view.tracks.len(),
		ctx.landmass.is_some()
	);
	Classification { nodes, edges }
}

/// Like [`classify`], running the component analysis itself when landmass display is on.
pub fn classify_view(graph: &Graph, view: &ViewState) -> Classification {
	let components = view.show_landmass.then(|| find_connected_components(graph));
	classify(graph, view, components.as_ref())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::typhoon_graph::Node;

	fn node(i: u64) -> Node {
		Node::new(i, i as f64, 0.0, 0.0)
	}

	/// Chain 0-1-2-3 plus isolated 4. Storm X runs 1→2→3; storm Y starts and ends on 0.
	fn scenario() -> Graph {
		let nodes = vec![
			node(0).with_membership("Y", 1, 1),
			node(1).with_membership("X", 1, 3),
			node(2).with_membership("X", 2, 2),
			node(3).with_membership("X", 3, 1),
			node(4),
		];
		Graph::new(nodes, vec![Edge(0, 1), Edge(1, 2), Edge(2, 3)])
			.unwrap()
			.graph
	}

	#[test]
	fn nothing_active_is_all_default() {
		let g = scenario();
		let out = classify_view(&g, &ViewState::default());
		assert_eq!(out.nodes, vec![NodeCategory::Default; 5]);
		assert_eq!(out.edges, vec![EdgeCategory::Default; 3]);
	}

	#[test]
	fn selection_beats_track() {
		let g = scenario();
		let view = ViewState::default().with_track("X", "#e74c3c").with_selection(Some(2));
		let out = classify_view(&g, &view);
		assert_eq!(out.nodes[2], NodeCategory::Selected);
		assert_eq!(out.nodes[1], NodeCategory::Track(0));
		assert_eq!(out.nodes[3], NodeCategory::Track(0));
		assert_eq!(out.nodes[0], NodeCategory::Default);
		assert_eq!(
			out.edges,
			vec![EdgeCategory::Default, EdgeCategory::Track(0), EdgeCategory::Track(0)]
		);
	}

	#[test]
	fn extremes_beat_tracks_when_enabled() {
		let g = scenario();
		let view = ViewState::default().with_track("X", "red").with_highlight_extremes(true);
		let out = classify_view(&g, &view);
		assert_eq!(
			out.nodes,
			vec![
				NodeCategory::StartAndEnd,
				NodeCategory::Start,
				NodeCategory::Track(0),
				NodeCategory::End,
				NodeCategory::Default,
			]
		);
	}

	#[test]
	fn tracks_beat_landmass() {
		let g = scenario();
		let view = ViewState::default().with_track("X", "red").with_landmass(true);
		let out = classify_view(&g, &view);
		assert_eq!(
			out.nodes,
			vec![
				NodeCategory::Mainland,
				NodeCategory::Track(0),
				NodeCategory::Track(0),
				NodeCategory::Track(0),
				NodeCategory::Island,
			]
		);
		assert_eq!(
			out.edges,
			vec![EdgeCategory::Mainland, EdgeCategory::Track(0), EdgeCategory::Track(0)]
		);
	}

	#[test]
	fn landmass_needs_both_flag_and_data() {
		let g = scenario();
		let analysis = find_connected_components(&g);

		let off = classify(&g, &ViewState::default(), Some(&analysis));
		assert!(off.nodes.iter().all(|c| *c == NodeCategory::Default));

		let on = ViewState::default().with_landmass(true);
		let missing = classify(&g, &on, None);
		assert!(missing.nodes.iter().all(|c| *c == NodeCategory::Default));

		let present = classify(&g, &on, Some(&analysis));
		assert_eq!(present.nodes[4], NodeCategory::Island);
	}

	#[test]
	fn out_of_range_selection_is_ignored() {
		let g = scenario();
		let out = classify_view(&g, &ViewState::default().with_selection(Some(99)));
		assert!(!out.nodes.contains(&NodeCategory::Selected));
	}

	#[test]
	fn deterministic() {
		let g = scenario();
		let view = ViewState::default()
			.with_track("X", "red")
			.with_track("Y", "blue")
			.with_landmass(true)
			.with_highlight_extremes(true)
			.with_selection(Some(4));
		assert_eq!(classify_view(&g, &view), classify_view(&g, &view));
	}

	#[test]
	fn serializes_tagged() {
		let json = serde_json::to_value([NodeCategory::Track(2), NodeCategory::StartAndEnd]).unwrap();
		assert_eq!(
			json,
			serde_json::json!([{ "kind": "track", "track": 2 }, { "kind": "start_and_end" }])
		);
	}
}
