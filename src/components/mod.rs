pub mod topic_graph;
