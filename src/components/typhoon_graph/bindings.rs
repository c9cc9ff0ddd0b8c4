use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::classify::Classification;
use super::components::{Component, ComponentStats, find_connected_components};
use super::graph::Graph;
use super::palette::Palette;
use super::tracker::{find_path_edges, find_typhoon_path, validate_typhoon_id};
use super::types::{Edge, GraphMetadata, Node};
use super::view::ViewState;

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
	serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn parse_view(view: &str) -> Result<ViewState, JsError> {
	ViewState::from_json(view).map_err(|e| JsError::new(&e.to_string()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComponentReport<'a> {
	components: &'a [Component],
	mainland: Option<&'a Component>,
	largest_island: Option<&'a Component>,
	stats: Option<ComponentStats>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameReport<'a> {
	nodes: &'a [Node],
	edges: &'a [Edge],
	removed_edges: usize,
	dropped_edges: usize,
	node_colors: &'a [String],
	edge_colors: &'a [String],
	categories: &'a Classification,
	stats: Option<ComponentStats>,
}

/// The full dataset, held on the Rust side of the JS boundary.
#[wasm_bindgen]
pub struct TyphoonGraph {
	graph: Graph,
	metadata: GraphMetadata,
	dropped_edges: usize,
	palette: Palette,
}

#[wasm_bindgen]
impl TyphoonGraph {
	/// Parses the decompressed dataset JSON.
	#[wasm_bindgen(constructor)]
	pub fn new(json: &str) -> Result<TyphoonGraph, JsError> {
		let ingested = Graph::from_json(json)?;
		log::info!(
			"loaded {} nodes, {} edges ({} dropped)",
			ingested.graph.node_count(),
			ingested.graph.edge_count(),
			ingested.dropped_edges
		);
		Ok(Self {
			graph: ingested.graph,
			metadata: ingested.metadata,
			dropped_edges: ingested.dropped_edges,
			palette: Palette::default(),
		})
	}

	#[wasm_bindgen(js_name = setPalette)]
	pub fn set_palette(&mut self, json: &str) -> Result<(), JsError> {
		self.palette = serde_json::from_str(json)?;
		Ok(())
	}

	#[wasm_bindgen(getter, js_name = nodeCount)]
	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	#[wasm_bindgen(getter, js_name = edgeCount)]
	pub fn edge_count(&self) -> usize {
		self.graph.edge_count()
	}

	#[wasm_bindgen(getter, js_name = droppedEdges)]
	pub fn dropped_edges(&self) -> usize {
		self.dropped_edges
	}

	pub fn metadata(&self) -> Result<JsValue, JsError> {
		to_js(&self.metadata)
	}

	/// Filters, classifies and colors the graph for `view` (a `ViewState` JSON string).
	pub fn frame(&self, view: &str) -> Result<JsValue, JsError> {
		let view = parse_view(view)?;
		let resolved = view.resolve(&self.graph);
		let colors = self.palette.colors(&resolved.classification, &view.tracks);
		to_js(&FrameReport {
			nodes: resolved.filtered.graph.nodes(),
			edges: resolved.filtered.graph.edges(),
			removed_edges: resolved.filtered.removed_edges,
			dropped_edges: resolved.filtered.dropped_edges,
			node_colors: &colors.nodes,
			edge_colors: &colors.edges,
			categories: &resolved.classification,
			stats: resolved.components.as_ref().and_then(|c| c.stats),
		})
	}

	/// Plot-ready `{x, y, z}` arrays for the edges visible under `view`, `null`-separated.
	#[wasm_bindgen(js_name = edgeCoordinates)]
	pub fn edge_coordinates(&self, view: &str) -> Result<js_sys::Object, JsError> {
		let view = parse_view(view)?;
		let coordinates = self.graph.filtered(&view.filter).graph.edge_coordinates();
		let axis = |values: &[Option<f64>]| -> js_sys::Array {
			values
				.iter()
				.map(|v| v.map_or(JsValue::NULL, JsValue::from_f64))
				.collect()
		};
		let out = js_sys::Object::new();
		js_sys::Reflect::set(&out, &"x".into(), &axis(&coordinates.x)).map_err(|_| JsError::new("x"))?;
		js_sys::Reflect::set(&out, &"y".into(), &axis(&coordinates.y)).map_err(|_| JsError::new("y"))?;
		js_sys::Reflect::set(&out, &"z".into(), &axis(&coordinates.z)).map_err(|_| JsError::new("z"))?;
		Ok(out)
	}

	/// Mainland and island analysis of the graph visible under `view`.
	pub fn components(&self, view: &str) -> Result<JsValue, JsError> {
		let view = parse_view(view)?;
		let filtered = self.graph.filtered(&view.filter);
		let analysis = find_connected_components(&filtered.graph);
		to_js(&ComponentReport {
			components: &analysis.components,
			mainland: analysis.mainland(),
			largest_island: analysis.largest_island(),
			stats: analysis.stats,
		})
	}

	/// Positions along `storm`'s path in the view, in visit order.
	#[wasm_bindgen(js_name = typhoonPath)]
	pub fn typhoon_path(&self, storm: &str, view: &str) -> Result<Vec<u32>, JsError> {
		let view = parse_view(view)?;
		let filtered = self.graph.filtered(&view.filter);
		Ok(find_typhoon_path(storm, filtered.graph.nodes())
			.into_iter()
			.map(|p| p as u32)
			.collect())
	}

	/// `[u, v]` pairs of the view's edges that lie on `storm`'s path.
	#[wasm_bindgen(js_name = pathEdges)]
	pub fn path_edges(&self, storm: &str, view: &str) -> Result<JsValue, JsError> {
		let view = parse_view(view)?;
		let filtered = self.graph.filtered(&view.filter);
		let path = find_path_edges(storm, &filtered.graph);
		let edges: Vec<_> = filtered
			.graph
			.edges()
			.iter()
			.filter(|e| path.contains(e.u(), e.v()))
			.collect();
		to_js(&edges)
	}

	/// Whether `storm` exists in the view. Hosts check this before registering a track.
	#[wasm_bindgen(js_name = validateTyphoonId)]
	pub fn validate_typhoon_id(&self, storm: &str, view: &str) -> Result<bool, JsError> {
		let view = parse_view(view)?;
		let filtered = self.graph.filtered(&view.filter);
		Ok(validate_typhoon_id(storm, filtered.graph.nodes()))
	}

	/// Default color for the `n`th track.
	#[wasm_bindgen(js_name = trackColor)]
	pub fn track_color(&self, n: usize) -> String {
		self.palette.track_color(n).to_string()
	}
}
