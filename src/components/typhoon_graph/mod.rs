#[cfg(target_arch = "wasm32")]
mod bindings;
mod classify;
mod components;
mod filter;
mod graph;
mod palette;
mod tracker;
mod types;
mod union_find;
mod view;

#[cfg(target_arch = "wasm32")]
pub use bindings::TyphoonGraph;
pub use classify::{Classification, EdgeCategory, NodeCategory, classify, classify_view};
pub use components::{
	Component, ComponentAnalysis, ComponentStats, find_connected_components, is_node_in_component,
};
pub use filter::{Bounds, Filter, FilteredGraph, filter_nodes};
pub use graph::{Graph, Ingested, RawEdges, RawGraph};
pub use palette::{ColorAssignment, Palette};
pub use tracker::{
	PathEdges, VisitRecord, assign_path_colors, assign_path_edge_colors, find_path_edges,
	find_typhoon_path, find_visits, validate_typhoon_id,
};
pub use union_find::UnionFind;
pub use types::{Edge, EdgeCoordinates, GraphMetadata, Membership, Node, NodeId};
pub use view::{ResolvedView, Track, ViewState};
