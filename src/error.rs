//! Errors raised while ingesting a graph.
//!
//! Only ingestion can fail. Everything downstream of a built [`Graph`](crate::Graph)
//! drops what it cannot derive and reports counts instead.

use thiserror::Error;

use crate::components::typhoon_graph::NodeId;

/// Errors raised when a dataset cannot become a [`Graph`](crate::Graph).
#[derive(Error, Debug)]
pub enum GraphError {
	/// The payload was not valid JSON for the expected shape.
	#[error("malformed graph payload: {0}")]
	Json(#[from] serde_json::Error),
	/// Two nodes share an id.
	#[error("duplicate node id '{0}'")]
	DuplicateNodeId(NodeId),
	/// `TC_ID`, `order` and `reverse_orders` must have the same length.
	#[error(
		"node '{id}' has {storms} storm ids, {orders} orders and {reverse_orders} reverse orders"
	)]
	MembershipMismatch {
		/// Offending node.
		id: NodeId,
		/// Length of `TC_ID`.
		storms: usize,
		/// Length of `order`.
		orders: usize,
		/// Length of `reverse_orders`.
		reverse_orders: usize,
	},
}

/// Result alias for graph ingestion.
pub type Result<T> = std::result::Result<T, GraphError>;
