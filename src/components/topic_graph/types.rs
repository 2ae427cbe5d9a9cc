use serde::Deserialize;

use super::topology::TopologyError;

/// Social platform a topic was collected from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
	Twitter,
	Youtube,
	Reddit,
	Google,
}

impl Platform {
	pub fn label(self) -> &'static str {
		match self {
			Platform::Twitter => "twitter",
			Platform::Youtube => "youtube",
			Platform::Reddit => "reddit",
			Platform::Google => "google",
		}
	}

	/// Glyph drawn inside the platform badge.
	pub fn icon_glyph(self) -> &'static str {
		match self {
			Platform::Twitter => "𝕏",
			Platform::Youtube => "▶",
			Platform::Reddit => "r/",
			Platform::Google => "G",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Metrics {
	pub likes: u64,
	pub dislikes: u64,
	pub shares: u64,
	pub comments: u64,
}

/// Layout-space coordinates. Supplied by the host, never computed here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	pub id: String,
	pub platform: Platform,
	pub topic: String,
	#[serde(flatten)]
	pub metrics: Metrics,
	#[serde(flatten)]
	pub position: Position,
	pub color: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GraphLink {
	pub from: String,
	pub to: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	#[serde(alias = "connections")]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	pub fn from_json(json: &str) -> Result<Self, TopologyError> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Position of a node inside a validated topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

/// Position of an edge inside a validated topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIndex(pub usize);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_flat_node_records() {
		let data = GraphData::from_json(
			r##"{
				"nodes": [
					{"id": "1", "platform": "twitter", "topic": "AI Revolution",
					 "likes": 45200, "dislikes": 1200, "shares": 8900, "comments": 3400,
					 "x": 200, "y": 150, "color": "#3B82F6"}
				],
				"connections": []
			}"##,
		)
		.unwrap();

		let node = &data.nodes[0];
		assert_eq!(node.platform, Platform::Twitter);
		assert_eq!(node.metrics.shares, 8900);
		assert_eq!(node.position, Position { x: 200.0, y: 150.0 });
		assert!(data.links.is_empty());
	}

	#[test]
	fn rejects_unknown_platform() {
		let err = GraphData::from_json(
			r##"{"nodes": [{"id": "1", "platform": "myspace", "topic": "t",
				"likes": 0, "dislikes": 0, "shares": 0, "comments": 0,
				"x": 0, "y": 0, "color": "#000"}], "links": []}"##,
		)
		.unwrap_err();
		assert!(matches!(err, TopologyError::Parse(_)));
	}
}
