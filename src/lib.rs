//! Analytics engine for a temporal evolution graph of tropical-cyclone states.
//!
//! Nodes are typhoon states laid out in 3D; edges join states that follow one another
//! in some storm. The engine filters the graph, splits it into mainland and islands,
//! reconstructs storm paths and decides one display category per node and edge. It
//! holds no state: every call takes the graph and a [`ViewState`] and returns new values.
//!
//! ```
//! use typhoon_graph::{Edge, Graph, Node, NodeCategory, ViewState, classify_view};
//!
//! let nodes = vec![
//! 	Node::new(0u64, 0.0, 0.0, 0.0).with_membership("X", 1, 2),
//! 	Node::new(1u64, 1.0, 0.0, 0.0).with_membership("X", 2, 1),
//! ];
//! let graph = Graph::new(nodes, vec![Edge(0, 1)]).unwrap().graph;
//! let view = ViewState::default().with_track("X", "#e74c3c");
//! assert_eq!(classify_view(&graph, &view).nodes, vec![NodeCategory::Track(0); 2]);
//! ```

// Modules
mod components;
mod error;

pub use crate::components::typhoon_graph::*;
pub use crate::error::{GraphError, Result};

/// Initialize logging and panic hooks for the WASM target.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
	use log::{Level, info};

	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}
