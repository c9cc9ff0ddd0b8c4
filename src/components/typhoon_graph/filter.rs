use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::graph::Graph;
use super::types::{Edge, Node, NodeId};

/// Inclusive numeric range. A missing bound is unconstrained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
	pub min: Option<f64>,
	pub max: Option<f64>,
}

impl Bounds {
	pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
		Self { min, max }
	}

	pub fn is_unconstrained(&self) -> bool {
		self.min.is_none() && self.max.is_none()
	}

	/// A present bound rejects a missing value.
	pub fn admits(&self, value: Option<f64>) -> bool {
		if self.is_unconstrained() {
			return true;
		}
		let Some(value) = value else {
			return false;
		};
		self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
	}
}

/// Node filter: numeric ranges plus a match-any list of storm ids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filter {
	pub rmw: Bounds,
	pub vmax: Bounds,
	pub ike: Bounds,
	pub typhoon_ids: Vec<String>,
}

impl Filter {
	pub fn is_unconstrained(&self) -> bool {
		self.rmw.is_unconstrained()
			&& self.vmax.is_unconstrained()
			&& self.ike.is_unconstrained()
			&& self.typhoon_ids.is_empty()
	}

	pub fn admits(&self, node: &Node) -> bool {
		if !self.typhoon_ids.is_empty() && !self.typhoon_ids.iter().any(|id| node.belongs_to(id)) {
			return false;
		}
		self.rmw.admits(node.rmw) && self.vmax.admits(node.vmax) && self.ike.admits(node.ike)
	}
}

/// Result of filtering a [`Graph`].
#[derive(Clone, Debug)]
pub struct FilteredGraph {
	/// Surviving nodes in original order, with edges reindexed against them.
	pub graph: Graph,
	/// Edges left out because an endpoint was filtered away.
	pub removed_edges: usize,
	/// Edges left out because an endpoint position was out of range.
	pub dropped_edges: usize,
}

/// Nodes passing `filter`, in their original order.
pub fn filter_nodes(nodes: &[Node], filter: &Filter) -> Vec<Node> {
	nodes.iter().filter(|n| filter.admits(n)).cloned().collect()
}

pub(crate) struct EdgeRemap {
	pub edges: Vec<Edge>,
	pub removed: usize,
	pub dropped: usize,
}

/// Re-expresses `edges` (indexed against `all_nodes`) against `filtered_nodes`, matching by id.
pub(crate) fn filter_edges(edges: &[Edge], filtered_nodes: &[Node], all_nodes: &[Node]) -> EdgeRemap {
	let new_index: HashMap<&NodeId, usize> = filtered_nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (&node.id, i))
		.collect();

	let mut remap = EdgeRemap {
		edges: Vec::new(),
		removed: 0,
		dropped: 0,
	};
	for edge in edges {
		let (Some(u), Some(v)) = (all_nodes.get(edge.u()), all_nodes.get(edge.v())) else {
			remap.dropped += 1;
			continue;
		};
		match (new_index.get(&u.id), new_index.get(&v.id)) {
			(Some(&u), Some(&v)) => remap.edges.push(Edge(u, v)),
			_ => remap.removed += 1,
		}
	}
	remap
}

impl Graph {
	/// Derives the view of this graph that `filter` lets through.
	pub fn filtered(&self, filter: &Filter) -> FilteredGraph {
		if filter.is_unconstrained() {
			return FilteredGraph {
				graph: self.clone(),
				removed_edges: 0,
				dropped_edges: 0,
			};
		}

		let nodes = filter_nodes(self.nodes(), filter);
		let remap = filter_edges(self.edges(), &nodes, self.nodes());
		if remap.dropped > 0 {
			warn!("dropped {} edges with out-of-range endpoints while filtering", remap.dropped);
		}
		debug!(
			"filter kept {}/{} nodes and {}/{} edges",
			nodes.len(),
			self.node_count(),
			remap.edges.len(),
			self.edge_count()
		);
		FilteredGraph {
			graph: Graph::from_parts(nodes, remap.edges),
			removed_edges: remap.removed,
			dropped_edges: remap.dropped,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nodes() -> Vec<Node> {
		vec![
			Node::new(10u64, 0.0, 0.0, 0.0)
				.with_attributes(Some(20.0), Some(35.0), Some(5.0))
				.with_membership("A", 1, 3),
			Node::new(11u64, 1.0, 0.0, 0.0)
				.with_attributes(Some(40.0), None, Some(9.0))
				.with_membership("A", 2, 2)
				.with_membership("B", 1, 2),
			Node::new(12u64, 2.0, 0.0, 0.0)
				.with_attributes(Some(60.0), Some(55.0), None)
				.with_membership("A", 3, 1),
			Node::new(13u64, 3.0, 0.0, 0.0)
				.with_attributes(Some(80.0), Some(70.0), Some(20.0))
				.with_membership("B", 2, 1),
		]
	}

	fn graph() -> Graph {
		Graph::new(nodes(), vec![Edge(0, 1), Edge(1, 2), Edge(2, 3), Edge(1, 3)])
			.unwrap()
			.graph
	}

	#[test]
	fn unconstrained_filter_is_identity() {
		let g = graph();
		let filtered = g.filtered(&Filter::default());
		assert_eq!(filtered.graph, g);
		assert_eq!(filter_nodes(g.nodes(), &Filter::default()), g.nodes());
	}

	#[test]
	fn missing_attribute_fails_a_present_bound() {
		let filter = Filter {
			vmax: Bounds::new(Some(0.0), None),
			..Filter::default()
		};
		let ids: Vec<_> = filter_nodes(&nodes(), &filter).into_iter().map(|n| n.id).collect();
		assert_eq!(ids, vec![NodeId::Number(10), NodeId::Number(12), NodeId::Number(13)]);
	}

	#[test]
	fn bounds_are_inclusive() {
		let filter = Filter {
			rmw: Bounds::new(Some(40.0), Some(60.0)),
			..Filter::default()
		};
		let ids: Vec<_> = filter_nodes(&nodes(), &filter).into_iter().map(|n| n.id).collect();
		assert_eq!(ids, vec![NodeId::Number(11), NodeId::Number(12)]);
	}

	#[test]
	fn storm_ids_match_any() {
		let filter = Filter {
			typhoon_ids: vec!["B".into(), "Z".into()],
			..Filter::default()
		};
		let ids: Vec<_> = filter_nodes(&nodes(), &filter).into_iter().map(|n| n.id).collect();
		assert_eq!(ids, vec![NodeId::Number(11), NodeId::Number(13)]);
	}

	#[test]
	fn edges_are_reindexed_against_survivors() {
		let g = graph();
		let filter = Filter {
			typhoon_ids: vec!["B".into()],
			..Filter::default()
		};
		let filtered = g.filtered(&filter);
		assert_eq!(filtered.graph.edges(), &[Edge(0, 1)]);
		assert_eq!(filtered.removed_edges, 3);
		assert_eq!(filtered.dropped_edges, 0);

		for (new, old) in filtered.graph.edges().iter().zip([Edge(1, 3)]) {
			let kept = filtered.graph.nodes();
			assert_eq!(kept[new.u()].id, g.nodes()[old.u()].id);
			assert_eq!(kept[new.v()].id, g.nodes()[old.v()].id);
		}
	}

	#[test]
	fn out_of_range_edges_are_counted() {
		let all = nodes();
		let kept = filter_nodes(&all, &Filter::default());
		let remap = filter_edges(&[Edge(0, 1), Edge(0, 99), Edge(42, 2)], &kept, &all);
		assert_eq!(remap.edges, vec![Edge(0, 1)]);
		assert_eq!(remap.dropped, 2);
		assert_eq!(remap.removed, 0);
	}

	#[test]
	fn parses_camel_case_filter() {
		let filter: Filter =
			serde_json::from_str(r#"{"vmax": {"min": 30}, "typhoonIds": ["A"]}"#).unwrap();
		assert_eq!(filter.vmax, Bounds::new(Some(30.0), None));
		assert!(filter.rmw.is_unconstrained());
		assert_eq!(filter.typhoon_ids, vec!["A".to_string()]);
	}
}
