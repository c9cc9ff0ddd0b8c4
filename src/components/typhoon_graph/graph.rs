use std::collections::HashSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::types::{Edge, EdgeCoordinates, GraphMetadata, Node};
use crate::error::{GraphError, Result};

/// A node array together with the edges indexed against it.
///
/// The two are only ever handed out as a pair, so an edge list can never be read
/// against a node array it was not built for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

/// A freshly ingested graph and what ingestion had to leave behind.
#[derive(Clone, Debug)]
pub struct Ingested {
	pub graph: Graph,
	pub metadata: GraphMetadata,
	/// Edges whose endpoints were out of range or could not be matched.
	pub dropped_edges: usize,
}

/// Edge payload as it arrives: explicit index pairs, or the legacy coordinate triples.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEdges {
	Pairs(Vec<Edge>),
	Coordinates(EdgeCoordinates),
}

impl Default for RawEdges {
	fn default() -> Self {
		RawEdges::Pairs(Vec::new())
	}
}

/// Decompressed, parsed dataset before any invariant has been checked.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawGraph {
	pub nodes: Vec<Node>,
	#[serde(default)]
	pub edges: RawEdges,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<GraphMetadata>,
}

impl Graph {
	/// Builds a graph from parsed nodes and index-pair edges.
	///
	/// Out-of-range edges are dropped and counted.
	pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Ingested> {
		check_nodes(&nodes)?;
		let total = edges.len();
		let edges: Vec<Edge> = edges.into_iter().filter(|e| e.fits(nodes.len())).collect();
		let dropped_edges = total - edges.len();
		if dropped_edges > 0 {
			warn!("dropped {dropped_edges} of {total} edges with out-of-range endpoints");
		}
		let metadata = GraphMetadata::complete(nodes.len(), edges.len());
		Ok(Ingested {
			graph: Graph { nodes, edges },
			metadata,
			dropped_edges,
		})
	}

	/// Builds a graph from the legacy coordinate-triple edge encoding.
	pub fn from_coordinates(nodes: Vec<Node>, coordinates: &EdgeCoordinates) -> Result<Ingested> {
		check_nodes(&nodes)?;
		let (edges, unmatched) = reconstruct_edges(coordinates, &nodes);
		let metadata = GraphMetadata::complete(nodes.len(), edges.len());
		Ok(Ingested {
			graph: Graph { nodes, edges },
			metadata,
			dropped_edges: unmatched,
		})
	}

	/// Validates a parsed dataset. Metadata present in the input is kept as is;
	/// otherwise it is synthesized from the ingested graph.
	pub fn from_raw(raw: RawGraph) -> Result<Ingested> {
		let RawGraph {
			nodes,
			edges,
			metadata,
		} = raw;
		let mut ingested = match edges {
			RawEdges::Pairs(pairs) => Graph::new(nodes, pairs)?,
			RawEdges::Coordinates(coordinates) => Graph::from_coordinates(nodes, &coordinates)?,
		};
		if let Some(metadata) = metadata {
			ingested.metadata = metadata;
		}
		Ok(ingested)
	}

	pub fn from_json(json: &str) -> Result<Ingested> {
		let raw: RawGraph = serde_json::from_str(json)?;
		Graph::from_raw(raw)
	}

	/// Assembles a graph whose edges are already known to fit `nodes`.
	pub(crate) fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		debug_assert!(edges.iter().all(|e| e.fits(nodes.len())));
		Graph { nodes, edges }
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Endpoint triples for every edge, each followed by a `None` separator.
	pub fn edge_coordinates(&self) -> EdgeCoordinates {
		let mut out = EdgeCoordinates {
			x: Vec::with_capacity(self.edges.len() * 3),
			y: Vec::with_capacity(self.edges.len() * 3),
			z: Vec::with_capacity(self.edges.len() * 3),
		};
		for edge in &self.edges {
			let (Some(a), Some(b)) = (self.nodes.get(edge.u()), self.nodes.get(edge.v())) else {
				continue;
			};
			out.x.extend([Some(a.x), Some(b.x), None]);
			out.y.extend([Some(a.y), Some(b.y), None]);
			out.z.extend([Some(a.z), Some(b.z), None]);
		}
		out
	}
}

fn check_nodes(nodes: &[Node]) -> Result<()> {
	let mut seen = HashSet::with_capacity(nodes.len());
	for node in nodes {
		if !seen.insert(&node.id) {
			return Err(GraphError::DuplicateNodeId(node.id.clone()));
		}
		if !node.has_parallel_memberships() {
			return Err(GraphError::MembershipMismatch {
				id: node.id.clone(),
				storms: node.tc_id.len(),
				orders: node.order.len(),
				reverse_orders: node.reverse_orders.len(),
			});
		}
	}
	Ok(())
}

/// Matches each coordinate triple's endpoints back to node positions.
///
/// Linear scan per endpoint with exact float equality. Returns the edges and the
/// number of triples that could not be matched.
pub(crate) fn reconstruct_edges(coordinates: &EdgeCoordinates, nodes: &[Node]) -> (Vec<Edge>, usize) {
	let EdgeCoordinates { x, y, z } = coordinates;
	let len = x.len().min(y.len()).min(z.len());
	let position = |i: usize| -> Option<usize> {
		let (px, py, pz) = (x.get(i).copied()??, y.get(i).copied()??, z.get(i).copied()??);
		nodes.iter().position(|n| n.is_at(px, py, pz))
	};

	let mut edges = Vec::with_capacity(len / 3);
	let mut unmatched = 0;
	for i in (0..len).step_by(3) {
		// Separator slot landing on an endpoint slot means the stream is misaligned here.
		if x[i].is_none() {
			continue;
		}
		match (position(i), position(i + 1)) {
			(Some(u), Some(v)) => edges.push(Edge(u, v)),
			_ => unmatched += 1,
		}
	}

	if unmatched > 0 {
		warn!("could not match {unmatched} coordinate edges to nodes");
	}
	debug!("reconstructed {} edges from {} coordinate triples", edges.len(), coordinates.segments());
	(edges, unmatched)
}
