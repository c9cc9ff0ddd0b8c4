pub mod typhoon_graph;
