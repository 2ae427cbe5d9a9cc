use std::collections::HashMap;

use thiserror::Error;

use super::types::{EdgeIndex, GraphData, GraphNode, NodeIndex, Position};

#[derive(Debug, Error)]
pub enum TopologyError {
	#[error("duplicate node id `{id}`")]
	DuplicateNode { id: String },
	#[error("edge {from} -> {to} references unknown node `{missing}`")]
	DanglingEdge {
		from: String,
		to: String,
		missing: String,
	},
	#[error("malformed topology: {0}")]
	Parse(#[from] serde_json::Error),
}

/// An edge with both endpoints resolved to node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopicEdge {
	pub from: NodeIndex,
	pub to: NodeIndex,
}

impl TopicEdge {
	pub fn touches(&self, node: NodeIndex) -> bool {
		self.from == node || self.to == node
	}
}

/// Validated, immutable nodes and edges for one render session.
#[derive(Clone, Debug, Default)]
pub struct Topology {
	nodes: Vec<GraphNode>,
	edges: Vec<TopicEdge>,
	id_to_idx: HashMap<String, NodeIndex>,
}

impl Topology {
	pub fn new(data: &GraphData) -> Result<Self, TopologyError> {
		let mut id_to_idx = HashMap::with_capacity(data.nodes.len());
		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.insert(node.id.clone(), NodeIndex(i)).is_some() {
				return Err(TopologyError::DuplicateNode {
					id: node.id.clone(),
				});
			}
		}

		let edges = data
			.links
			.iter()
			.map(|link| {
				let resolve = |id: &String| {
					id_to_idx
						.get(id)
						.copied()
						.ok_or_else(|| TopologyError::DanglingEdge {
							from: link.from.clone(),
							to: link.to.clone(),
							missing: id.clone(),
						})
				};
				Ok(TopicEdge {
					from: resolve(&link.from)?,
					to: resolve(&link.to)?,
				})
			})
			.collect::<Result<Vec<_>, TopologyError>>()?;

		Ok(Self {
			nodes: data.nodes.clone(),
			edges,
			id_to_idx,
		})
	}

	pub fn lookup(&self, id: &str) -> Option<NodeIndex> {
		self.id_to_idx.get(id).copied()
	}

	pub fn node(&self, idx: NodeIndex) -> Option<&GraphNode> {
		self.nodes.get(idx.0)
	}

	pub fn position(&self, idx: NodeIndex) -> Option<Position> {
		self.node(idx).map(|node| node.position)
	}

	pub fn nodes(
		&self,
	) -> impl DoubleEndedIterator<Item = (NodeIndex, &GraphNode)> + ExactSizeIterator {
		self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
	}

	pub fn edges(
		&self,
	) -> impl DoubleEndedIterator<Item = (EdgeIndex, &TopicEdge)> + ExactSizeIterator {
		self.edges.iter().enumerate().map(|(i, e)| (EdgeIndex(i), e))
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}
}
