use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable node identity. Datasets use either integers or strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
	/// Numeric id.
	Number(u64),
	/// String id.
	Text(String),
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Number(n) => write!(f, "{n}"),
			NodeId::Text(s) => f.write_str(s),
		}
	}
}

impl From<u64> for NodeId {
	fn from(n: u64) -> Self {
		NodeId::Number(n)
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		NodeId::Text(s.to_string())
	}
}

/// A single typhoon state.
///
/// `tc_id`, `order` and `reverse_orders` are parallel: entry `k` of each describes
/// the same storm membership. A storm that revisits the state appears more than once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: NodeId,
	pub x: f64,
	pub y: f64,
	pub z: f64,
	#[serde(rename = "RMW", default, skip_serializing_if = "Option::is_none")]
	pub rmw: Option<f64>,
	#[serde(rename = "Vmax", default, skip_serializing_if = "Option::is_none")]
	pub vmax: Option<f64>,
	#[serde(rename = "IKE", default, skip_serializing_if = "Option::is_none")]
	pub ike: Option<f64>,
	#[serde(rename = "TC_ID", default)]
	pub tc_id: Vec<String>,
	#[serde(default)]
	pub order: Vec<u32>,
	#[serde(default)]
	pub reverse_orders: Vec<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub info_text: Option<String>,
}

/// One entry of a node's parallel membership arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Membership<'a> {
	pub storm: &'a str,
	pub order: u32,
	pub reverse_order: u32,
}

impl Node {
	/// A node at `(x, y, z)` with no attributes and no storm memberships.
	pub fn new(id: impl Into<NodeId>, x: f64, y: f64, z: f64) -> Self {
		Self {
			id: id.into(),
			x,
			y,
			z,
			rmw: None,
			vmax: None,
			ike: None,
			tc_id: Vec::new(),
			order: Vec::new(),
			reverse_orders: Vec::new(),
			info_text: None,
		}
	}

	/// Appends a storm membership, keeping the three arrays parallel.
	pub fn with_membership(mut self, storm: &str, order: u32, reverse_order: u32) -> Self {
		self.tc_id.push(storm.to_string());
		self.order.push(order);
		self.reverse_orders.push(reverse_order);
		self
	}

	pub fn with_attributes(mut self, rmw: Option<f64>, vmax: Option<f64>, ike: Option<f64>) -> Self {
		self.rmw = rmw;
		self.vmax = vmax;
		self.ike = ike;
		self
	}

	pub fn memberships(&self) -> impl Iterator<Item = Membership<'_>> {
		self.tc_id
			.iter()
			.zip(&self.order)
			.zip(&self.reverse_orders)
			.map(|((storm, &order), &reverse_order)| Membership {
				storm,
				order,
				reverse_order,
			})
	}

	/// Every recorded `order` for `storm`, in membership order.
	pub fn orders_for<'a>(&'a self, storm: &'a str) -> impl Iterator<Item = u32> + 'a {
		self.memberships()
			.filter(move |m| m.storm == storm)
			.map(|m| m.order)
	}

	pub fn belongs_to(&self, storm: &str) -> bool {
		self.tc_id.iter().any(|id| id == storm)
	}

	/// First state of some storm.
	pub fn is_path_start(&self) -> bool {
		self.order.contains(&1)
	}

	/// Last state of some storm.
	pub fn is_path_end(&self) -> bool {
		self.reverse_orders.contains(&1)
	}

	pub(crate) fn has_parallel_memberships(&self) -> bool {
		self.tc_id.len() == self.order.len() && self.order.len() == self.reverse_orders.len()
	}

	/// Exact coordinate equality on all three axes.
	pub(crate) fn is_at(&self, x: f64, y: f64, z: f64) -> bool {
		self.x == x && self.y == y && self.z == z
	}
}

/// A temporal adjacency between two positions of the node array it was built against.
///
/// Stored directed, compared undirected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge(pub usize, pub usize);

impl Edge {
	pub fn u(&self) -> usize {
		self.0
	}

	pub fn v(&self) -> usize {
		self.1
	}

	pub(crate) fn fits(&self, node_count: usize) -> bool {
		self.0 < node_count && self.1 < node_count
	}
}

/// Flattened `(endpoint, endpoint, separator)` coordinate triples, one per edge.
/// Separators are `None` (`null` on the wire).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeCoordinates {
	pub x: Vec<Option<f64>>,
	pub y: Vec<Option<f64>>,
	pub z: Vec<Option<f64>>,
}

impl EdgeCoordinates {
	/// Number of coordinate triples, counting a trailing partial one.
	pub fn segments(&self) -> usize {
		self.x.len().min(self.y.len()).min(self.z.len()).div_ceil(3)
	}
}

/// Dataset summary carried alongside the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphMetadata {
	pub total_nodes: usize,
	pub total_edges: usize,
	pub sampled_edges: usize,
	pub sample_rate: f64,
}

impl Default for GraphMetadata {
	fn default() -> Self {
		Self {
			total_nodes: 0,
			total_edges: 0,
			sampled_edges: 0,
			sample_rate: 1.0,
		}
	}
}

impl GraphMetadata {
	/// Metadata for an unsampled graph.
	pub fn complete(nodes: usize, edges: usize) -> Self {
		Self {
			total_nodes: nodes,
			total_edges: edges,
			sampled_edges: edges,
			sample_rate: 1.0,
		}
	}
}
