use serde_json::json;
use typhoon_graph::{
	Bounds, EdgeCategory, Filter, Graph, NodeCategory, Palette, ViewState, find_connected_components,
	find_path_edges, find_typhoon_path, validate_typhoon_id,
};

/// Chain A-B-C-D plus isolated E. Storm X visits B, C, D; storm W starts at A and ends at E.
fn dataset() -> String {
	json!({
		"nodes": [
			{ "id": "A", "x": 0.0, "y": 0.0, "z": 0.0, "RMW": 20.0, "Vmax": 30.0, "IKE": 4.0,
			  "TC_ID": ["W"], "order": [1], "reverse_orders": [2] },
			{ "id": "B", "x": 1.0, "y": 0.5, "z": 0.0, "RMW": 25.0, "Vmax": 45.0, "IKE": 9.0,
			  "TC_ID": ["X"], "order": [1], "reverse_orders": [3] },
			{ "id": "C", "x": 2.0, "y": 1.0, "z": 0.0, "RMW": 30.0, "Vmax": 60.0,
			  "TC_ID": ["X"], "order": [2], "reverse_orders": [2] },
			{ "id": "D", "x": 3.0, "y": 1.5, "z": 0.0, "RMW": 35.0, "Vmax": 50.0, "IKE": 12.0,
			  "TC_ID": ["X"], "order": [3], "reverse_orders": [1] },
			{ "id": "E", "x": 9.0, "y": 9.0, "z": 9.0, "Vmax": 20.0,
			  "TC_ID": ["W"], "order": [2], "reverse_orders": [1] }
		],
		"edges": [[0, 1], [1, 2], [2, 3], [3, 12]]
	})
	.to_string()
}

#[test]
fn chain_scenario_end_to_end() {
	let ingested = Graph::from_json(&dataset()).unwrap();
	assert_eq!(ingested.dropped_edges, 1);
	let graph = ingested.graph;

	let analysis = find_connected_components(&graph);
	assert_eq!(analysis.mainland().unwrap().nodes, vec![0, 1, 2, 3]);
	assert_eq!(analysis.mainland().unwrap().edge_count, 3);
	assert_eq!(analysis.largest_island().unwrap().nodes, vec![4]);
	assert_eq!(analysis.largest_island().unwrap().edge_count, 0);

	assert_eq!(find_typhoon_path("X", graph.nodes()), vec![1, 2, 3]);
	let path = find_path_edges("X", &graph);
	assert!(path.contains(1, 2) && path.contains(2, 3));
	assert!(!path.contains(0, 1));
	assert!(!validate_typhoon_id("Q", graph.nodes()));
}

#[test]
fn filtered_frame_keeps_indices_consistent() {
	let graph = Graph::from_json(&dataset()).unwrap().graph;
	let view = ViewState::default()
		.with_filter(Filter {
			vmax: Bounds::new(Some(40.0), None),
			..Filter::default()
		})
		.with_track("X", "#3498db")
		.with_selection(Some(0))
		.with_landmass(true);

	let resolved = view.resolve(&graph);
	let kept = resolved.filtered.graph.nodes();
	let ids: Vec<_> = kept.iter().map(|n| n.id.to_string()).collect();
	assert_eq!(ids, vec!["B", "C", "D"]);
	for edge in resolved.filtered.graph.edges() {
		assert!(edge.u() < kept.len() && edge.v() < kept.len());
	}

	assert_eq!(
		resolved.classification.nodes,
		vec![NodeCategory::Selected, NodeCategory::Track(0), NodeCategory::Track(0)]
	);
	assert_eq!(
		resolved.classification.edges,
		vec![EdgeCategory::Track(0), EdgeCategory::Track(0)]
	);

	let colors = Palette::default().colors(&resolved.classification, &view.tracks);
	assert_eq!(colors.nodes, vec!["#e74c3c", "#3498db", "#3498db"]);
	assert_eq!(colors.edges, vec!["#3498db", "#3498db"]);
}

#[test]
fn missing_attributes_fail_present_bounds() {
	let graph = Graph::from_json(&dataset()).unwrap().graph;
	let filter = Filter {
		ike: Bounds::new(None, Some(100.0)),
		..Filter::default()
	};
	let filtered = graph.filtered(&filter);
	let ids: Vec<_> = filtered.graph.nodes().iter().map(|n| n.id.to_string()).collect();
	assert_eq!(ids, vec!["A", "B", "D"]);
	assert_eq!(filtered.graph.edges().len(), 1);
	assert_eq!(filtered.removed_edges, 2);
}
