//! Storm path reconstruction.
//!
//! A storm's path is the sequence of its visit records sorted by `order`. A state
//! the storm passes through twice contributes two records, so every lookup here
//! keeps all orders per position rather than the first one found.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::graph::Graph;
use super::types::Node;
use super::view::Track;

/// One `(position, order)` pair of a storm's path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisitRecord {
	pub position: usize,
	pub order: u32,
}

/// Every visit of `storm` across `nodes`, sorted by `order`. Equal orders keep scan order.
pub fn find_visits(storm: &str, nodes: &[Node]) -> Vec<VisitRecord> {
	let mut visits: Vec<VisitRecord> = nodes
		.iter()
		.enumerate()
		.flat_map(|(position, node)| {
			node.orders_for(storm)
				.map(move |order| VisitRecord { position, order })
		})
		.collect();
	visits.sort_by_key(|v| v.order);
	visits
}

/// Node positions along `storm`'s path. A revisited position appears once per visit.
pub fn find_typhoon_path(storm: &str, nodes: &[Node]) -> Vec<usize> {
	find_visits(storm, nodes).into_iter().map(|v| v.position).collect()
}

/// Edges joining consecutive visits of one storm. Lookups ignore direction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathEdges {
	pairs: HashSet<(usize, usize)>,
}

impl PathEdges {
	fn insert(&mut self, u: usize, v: usize) {
		self.pairs.insert((u, v));
		self.pairs.insert((v, u));
	}

	pub fn contains(&self, u: usize, v: usize) -> bool {
		self.pairs.contains(&(u, v))
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Distinct undirected pairs.
	pub fn len(&self) -> usize {
		self.pairs.iter().filter(|(u, v)| u <= v).count()
	}

	/// Both directions of every pair.
	pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.pairs.iter().copied()
	}
}

/// Edges of `graph` whose endpoints hold some pair of `storm` orders exactly one apart.
pub fn find_path_edges(storm: &str, graph: &Graph) -> PathEdges {
	let mut orders_at: HashMap<usize, Vec<u32>> = HashMap::new();
	for visit in find_visits(storm, graph.nodes()) {
		orders_at.entry(visit.position).or_default().push(visit.order);
	}

	let mut path = PathEdges::default();
	if orders_at.is_empty() {
		return path;
	}
	for edge in graph.edges() {
		let (Some(a), Some(b)) = (orders_at.get(&edge.u()), orders_at.get(&edge.v())) else {
			continue;
		};
		if a.iter().any(|&x| b.iter().any(|&y| x.abs_diff(y) == 1)) {
			path.insert(edge.u(), edge.v());
		}
	}
	debug!("storm {storm}: {} visits, {} path edges", orders_at.values().map(Vec::len).sum::<usize>(), path.len());
	path
}

/// Owning track index per node position. Earlier tracks win shared nodes.
pub fn assign_path_colors(tracks: &[Track], nodes: &[Node]) -> HashMap<usize, usize> {
	let mut owner = HashMap::new();
	for (index, track) in tracks.iter().enumerate().rev() {
		for position in find_typhoon_path(&track.id, nodes) {
			owner.insert(position, index);
		}
	}
	owner
}

/// Owning track index per edge position of `graph`. Earlier tracks win shared edges.
pub fn assign_path_edge_colors(tracks: &[Track], graph: &Graph) -> Vec<Option<usize>> {
	let mut owner = vec![None; graph.edge_count()];
	for (index, track) in tracks.iter().enumerate().rev() {
		let path = find_path_edges(&track.id, graph);
		if path.is_empty() {
			continue;
		}
		for (slot, edge) in owner.iter_mut().zip(graph.edges()) {
			if path.contains(edge.u(), edge.v()) {
				*slot = Some(index);
			}
		}
	}
	owner
}

/// Whether any node belongs to `storm`.
pub fn validate_typhoon_id(storm: &str, nodes: &[Node]) -> bool {
	nodes.iter().any(|n| n.belongs_to(storm))
}
