use serde::{Deserialize, Serialize};

use super::classify::{Classification, EdgeCategory, NodeCategory};
use super::view::Track;

/// Colors offered to new tracks, in order.
const TRACK_COLORS: &[&str] = &[
	"#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c", "#e67e22", "#34495e",
	"#16a085", "#27ae60", "#2980b9", "#8e44ad", "#c0392b", "#d35400", "#7f8c8d",
];

/// Category to CSS color mapping handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
	pub node_default: String,
	pub selected: String,
	pub start: String,
	pub end: String,
	pub start_and_end: String,
	pub mainland: String,
	pub island: String,
	pub edge_default: String,
	pub edge_mainland: String,
	pub edge_island: String,
	pub track_cycle: Vec<String>,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			node_default: "#4a90e2".into(),
			selected: "#e74c3c".into(),
			start: "#2ecc71".into(),
			end: "#9b59b6".into(),
			start_and_end: "#f1c40f".into(),
			mainland: "#8d6e63".into(),
			island: "#26a69a".into(),
			edge_default: "rgba(150, 150, 150, 0.9)".into(),
			edge_mainland: "rgba(141, 110, 99, 0.6)".into(),
			edge_island: "rgba(38, 166, 154, 0.6)".into(),
			track_cycle: TRACK_COLORS.iter().map(|c| c.to_string()).collect(),
		}
	}
}

/// Resolved colors, aligned with the graph's node and edge arrays.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ColorAssignment {
	pub nodes: Vec<String>,
	pub edges: Vec<String>,
}

impl Palette {
	/// Suggested color for the `n`th registered track.
	pub fn track_color(&self, n: usize) -> &str {
		if self.track_cycle.is_empty() {
			return &self.node_default;
		}
		&self.track_cycle[n % self.track_cycle.len()]
	}

	pub fn node_color<'a>(&'a self, category: NodeCategory, tracks: &'a [Track]) -> &'a str {
		match category {
			NodeCategory::Selected => &self.selected,
			NodeCategory::StartAndEnd => &self.start_and_end,
			NodeCategory::Start => &self.start,
			NodeCategory::End => &self.end,
			NodeCategory::Track(t) => tracks.get(t).map_or(&self.node_default, |t| &t.color),
			NodeCategory::Mainland => &self.mainland,
			NodeCategory::Island => &self.island,
			NodeCategory::Default => &self.node_default,
		}
	}

	pub fn edge_color<'a>(&'a self, category: EdgeCategory, tracks: &'a [Track]) -> &'a str {
		match category {
			EdgeCategory::Track(t) => tracks.get(t).map_or(&self.edge_default, |t| &t.color),
			EdgeCategory::Mainland => &self.edge_mainland,
			EdgeCategory::Island => &self.edge_island,
			EdgeCategory::Default => &self.edge_default,
		}
	}

	pub fn colors(&self, classification: &Classification, tracks: &[Track]) -> ColorAssignment {
		ColorAssignment {
			nodes: classification
				.nodes
				.iter()
				.map(|&c| self.node_color(c, tracks).to_string())
				.collect(),
			edges: classification
				.edges
				.iter()
				.map(|&c| self.edge_color(c, tracks).to_string())
				.collect(),
		}
	}
}
