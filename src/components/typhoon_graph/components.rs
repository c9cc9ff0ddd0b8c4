use std::collections::{HashMap, HashSet};

use log::debug;
use serde::Serialize;

use super::graph::Graph;
use super::union_find::UnionFind;

/// A maximal connected set of node positions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
	/// Member positions, ascending.
	pub nodes: Vec<usize>,
	/// Edges with both endpoints in `nodes`.
	pub edge_count: usize,
}

impl Component {
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn contains(&self, position: usize) -> bool {
		self.nodes.binary_search(&position).is_ok()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStats {
	pub mainland_nodes: usize,
	pub mainland_edges: usize,
	pub island_nodes: usize,
	pub island_edges: usize,
	pub total_components: usize,
}

/// Components sorted by descending size. Equal sizes keep first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComponentAnalysis {
	pub components: Vec<Component>,
	/// `None` for an empty graph.
	pub stats: Option<ComponentStats>,
}

impl ComponentAnalysis {
	/// Largest component.
	pub fn mainland(&self) -> Option<&Component> {
		self.components.first()
	}

	/// Second-largest component.
	pub fn largest_island(&self) -> Option<&Component> {
		self.components.get(1)
	}

	/// Mainland positions as a set. Empty when there is no mainland.
	pub fn mainland_set(&self) -> HashSet<usize> {
		position_set(self.mainland())
	}

	/// Largest-island positions as a set. Empty when there is no island.
	pub fn island_set(&self) -> HashSet<usize> {
		position_set(self.largest_island())
	}
}

fn position_set(component: Option<&Component>) -> HashSet<usize> {
	component.map(|c| c.nodes.iter().copied().collect()).unwrap_or_default()
}

pub fn find_connected_components(graph: &Graph) -> ComponentAnalysis {
	let n = graph.node_count();
	if n == 0 {
		return ComponentAnalysis::default();
	}

	let mut uf = UnionFind::new(n);
	for edge in graph.edges() {
		uf.union(edge.u(), edge.v());
	}

	// Scan order fixes tie-breaks: groups are numbered by first-seen root.
	let mut group_of_root: HashMap<usize, usize> = HashMap::new();
	let mut components: Vec<Component> = Vec::new();
	for i in 0..n {
		let root = uf.find(i);
		let group = *group_of_root.entry(root).or_insert_with(|| {
			components.push(Component {
				nodes: Vec::new(),
				edge_count: 0,
			});
			components.len() - 1
		});
		components[group].nodes.push(i);
	}

	// Every edge lies inside the component its endpoints were unioned into.
	for edge in graph.edges() {
		let root = uf.find(edge.u());
		components[group_of_root[&root]].edge_count += 1;
	}

	components.sort_by(|a, b| b.len().cmp(&a.len()));

	let mainland = components.first();
	let island = components.get(1);
	let stats = ComponentStats {
		mainland_nodes: mainland.map_or(0, Component::len),
		mainland_edges: mainland.map_or(0, |c| c.edge_count),
		island_nodes: island.map_or(0, Component::len),
		island_edges: island.map_or(0, |c| c.edge_count),
		total_components: components.len(),
	};
	debug!(
		"{} components, mainland {} nodes / {} edges, island {} nodes / {} edges",
		stats.total_components, stats.mainland_nodes, stats.mainland_edges, stats.island_nodes, stats.island_edges
	);

	ComponentAnalysis {
		components,
		stats: Some(stats),
	}
}

pub fn is_node_in_component(position: usize, component: Option<&Component>) -> bool {
	component.is_some_and(|c| c.contains(position))
}
