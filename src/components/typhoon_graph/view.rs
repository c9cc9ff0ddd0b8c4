use serde::{Deserialize, Serialize};

use super::classify::{Classification, classify};
use super::components::{ComponentAnalysis, find_connected_components};
use super::filter::{Filter, FilteredGraph};
use super::graph::Graph;

/// A storm registered for path highlighting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
	pub id: String,
	pub color: String,
}

impl Track {
	pub fn new(id: impl Into<String>, color: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			color: color.into(),
		}
	}
}

/// Snapshot of everything the host lets the user change.
///
/// Passed by value into each call; the engine keeps no state between calls.
/// `tracks` is ordered by priority, first wins. `selected` is a position in the
/// filtered node array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
	pub filter: Filter,
	pub tracks: Vec<Track>,
	pub highlight_extremes: bool,
	pub show_landmass: bool,
	pub selected: Option<usize>,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct ResolvedView {
	pub filtered: FilteredGraph,
	/// Present when landmass display is on.
	pub components: Option<ComponentAnalysis>,
	pub classification: Classification,
}

impl ViewState {
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	pub fn with_filter(mut self, filter: Filter) -> Self {
		self.filter = filter;
		self
	}

	/// Appends a track at the lowest priority.
	pub fn with_track(mut self, id: impl Into<String>, color: impl Into<String>) -> Self {
		self.tracks.push(Track::new(id, color));
		self
	}

	pub fn with_selection(mut self, selected: Option<usize>) -> Self {
		self.selected = selected;
		self
	}

	pub fn with_highlight_extremes(mut self, on: bool) -> Self {
		self.highlight_extremes = on;
		self
	}

	pub fn with_landmass(mut self, on: bool) -> Self {
		self.show_landmass = on;
		self
	}

	/// Filters `graph`, analyses the result if needed and classifies it.
	pub fn resolve(&self, graph: &Graph) -> ResolvedView {
		let filtered = graph.filtered(&self.filter);
		let components = self
			.show_landmass
			.then(|| find_connected_components(&filtered.graph));
		let classification = classify(&filtered.graph, self, components.as_ref());
		ResolvedView {
			filtered,
			components,
			classification,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::typhoon_graph::{Bounds, Edge, EdgeCategory, Node, NodeCategory};

	#[test]
	fn parses_partial_json() {
		let view = ViewState::from_json(
			r##"{"tracks": [{"id": "A", "color": "#e74c3c"}], "showLandmass": true, "selected": 2}"##,
		)
		.unwrap();
		assert_eq!(view.tracks, vec![Track::new("A", "#e74c3c")]);
		assert!(view.show_landmass);
		assert!(!view.highlight_extremes);
		assert_eq!(view.selected, Some(2));
		assert_eq!(view.filter, Filter::default());
	}

	#[test]
	fn resolve_classifies_the_filtered_view() {
		let nodes = vec![
			Node::new(0u64, 0.0, 0.0, 0.0).with_attributes(None, Some(10.0), None),
			Node::new(1u64, 1.0, 0.0, 0.0).with_attributes(None, Some(50.0), None),
			Node::new(2u64, 2.0, 0.0, 0.0).with_attributes(None, Some(60.0), None),
			Node::new(3u64, 3.0, 0.0, 0.0).with_attributes(None, Some(70.0), None),
		];
		let graph = Graph::new(nodes, vec![Edge(0, 1), Edge(1, 2)]).unwrap().graph;
		let view = ViewState::default()
			.with_filter(Filter {
				vmax: Bounds::new(Some(40.0), None),
				..Filter::default()
			})
			.with_landmass(true);

		let resolved = view.resolve(&graph);
		assert_eq!(resolved.filtered.graph.node_count(), 3);
		assert_eq!(resolved.filtered.graph.edges(), &[Edge(0, 1)]);
		assert_eq!(
			resolved.classification.nodes,
			vec![NodeCategory::Mainland, NodeCategory::Mainland, NodeCategory::Island]
		);
		assert_eq!(resolved.classification.edges, vec![EdgeCategory::Mainland]);
		assert_eq!(resolved.components.unwrap().components.len(), 2);
	}

	#[test]
	fn landmass_off_skips_analysis() {
		let graph = Graph::new(vec![Node::new(0u64, 0.0, 0.0, 0.0)], vec![]).unwrap().graph;
		let resolved = ViewState::default().resolve(&graph);
		assert!(resolved.components.is_none());
		assert_eq!(resolved.classification.nodes, vec![NodeCategory::Default]);
	}
}
