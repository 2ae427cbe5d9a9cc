//! Interaction state -> visual targets. Pure: recomputed once per state
//! transition, never per frame.

use super::interaction::{InteractionState, PulseState};
use super::topology::{TopicEdge, Topology};
use super::types::NodeIndex;

pub const SCALE_CLICKED: f64 = 1.2;
pub const SCALE_HOVERED: f64 = 1.15;
pub const SCALE_REST: f64 = 1.0;
pub const GLOW_OPACITY_HOVERED: f64 = 0.8;
pub const GLOW_OPACITY_REST: f64 = 0.5;
pub const GLOW_SCALE_HOVERED: f64 = 1.6;
pub const GLOW_SCALE_REST: f64 = 1.3;
pub const EDGE_WIDTH_ACTIVE: f64 = 3.0;
pub const EDGE_WIDTH_REST: f64 = 2.0;
pub const EDGE_OPACITY_ACTIVE: f64 = 0.8;
pub const EDGE_OPACITY_REST: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DashPattern {
	Solid,
	Dashed { dash: f64, gap: f64 },
}

impl DashPattern {
	pub const INACTIVE: DashPattern = DashPattern::Dashed { dash: 5.0, gap: 5.0 };

	/// Segment list for `setLineDash`; empty means solid.
	pub fn segments(self) -> Vec<f64> {
		match self {
			DashPattern::Solid => Vec::new(),
			DashPattern::Dashed { dash, gap } => vec![dash, gap],
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeEmphasis {
	pub scale: f64,
	pub glow_opacity: f64,
	pub glow_scale: f64,
	pub badge: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeEmphasis {
	pub active: bool,
	pub stroke_width: f64,
	pub dash: DashPattern,
	pub opacity: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Emphasis {
	pub nodes: Vec<NodeEmphasis>,
	pub edges: Vec<EdgeEmphasis>,
}

pub fn node_emphasis(hovered: bool, clicked: bool) -> NodeEmphasis {
	let scale = if clicked {
		SCALE_CLICKED
	} else if hovered {
		SCALE_HOVERED
	} else {
		SCALE_REST
	};
	if hovered {
		NodeEmphasis {
			scale,
			glow_opacity: GLOW_OPACITY_HOVERED,
			glow_scale: GLOW_SCALE_HOVERED,
			badge: true,
		}
	} else {
		NodeEmphasis {
			scale,
			glow_opacity: GLOW_OPACITY_REST,
			glow_scale: GLOW_SCALE_REST,
			badge: false,
		}
	}
}

pub fn edge_emphasis(edge: &TopicEdge, hovered: Option<NodeIndex>) -> EdgeEmphasis {
	if hovered.is_some_and(|node| edge.touches(node)) {
		EdgeEmphasis {
			active: true,
			stroke_width: EDGE_WIDTH_ACTIVE,
			dash: DashPattern::Solid,
			opacity: EDGE_OPACITY_ACTIVE,
		}
	} else {
		EdgeEmphasis {
			active: false,
			stroke_width: EDGE_WIDTH_REST,
			dash: DashPattern::INACTIVE,
			opacity: EDGE_OPACITY_REST,
		}
	}
}

pub fn resolve(topology: &Topology, interaction: &InteractionState) -> Emphasis {
	let hovered = interaction.hovered();
	Emphasis {
		nodes: topology
			.nodes()
			.map(|(idx, _)| {
				node_emphasis(
					hovered == Some(idx),
					interaction.pulse_state(idx) == PulseState::Clicked,
				)
			})
			.collect(),
		edges: topology
			.edges()
			.map(|(_, edge)| edge_emphasis(edge, hovered))
			.collect(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topic_graph::topology::tests::sample_seven;

	#[test]
	fn node_targets_table() {
		let cases = [
			// (hovered, clicked) -> (scale, glow opacity, glow scale, badge)
			((false, false), (1.0, 0.5, 1.3, false)),
			((true, false), (1.15, 0.8, 1.6, true)),
			((false, true), (1.2, 0.5, 1.3, false)),
			((true, true), (1.2, 0.8, 1.6, true)),
		];
		for ((hovered, clicked), (scale, glow_opacity, glow_scale, badge)) in cases {
			assert_eq!(
				node_emphasis(hovered, clicked),
				NodeEmphasis {
					scale,
					glow_opacity,
					glow_scale,
					badge
				},
				"hovered={hovered} clicked={clicked}"
			);
		}
	}

	#[test]
	fn edge_active_iff_hovered_endpoint() {
		let topo = Topology::new(&sample_seven()).unwrap();
		let mut interaction = InteractionState::new(topo.len(), 300.0);

		let hover_states: Vec<Option<NodeIndex>> = std::iter::once(None)
			.chain(topo.nodes().map(|(idx, _)| Some(idx)))
			.collect();
		assert_eq!(hover_states.len(), 8);

		let mut checked = 0;
		for hovered in hover_states {
			interaction.set_hover(hovered);
			let emphasis = resolve(&topo, &interaction);
			for (idx, edge) in topo.edges() {
				let expected = hovered.is_some_and(|h| edge.from == h || edge.to == h);
				let got = emphasis.edges[idx.0];
				assert_eq!(got.active, expected, "edge {idx:?} hovered {hovered:?}");
				if expected {
					assert_eq!(got.opacity, EDGE_OPACITY_ACTIVE);
					assert_eq!(got.stroke_width, EDGE_WIDTH_ACTIVE);
					assert_eq!(got.dash, DashPattern::Solid);
				} else {
					assert_eq!(got.opacity, EDGE_OPACITY_REST);
					assert_eq!(got.stroke_width, EDGE_WIDTH_REST);
					assert_eq!(got.dash, DashPattern::Dashed { dash: 5.0, gap: 5.0 });
				}
				checked += 1;
			}
		}
		assert_eq!(checked, 64);
	}

	#[test]
	fn at_most_one_badge() {
		let topo = Topology::new(&sample_seven()).unwrap();
		let mut interaction = InteractionState::new(topo.len(), 300.0);
		for (idx, _) in topo.nodes() {
			interaction.set_hover(Some(idx));
			interaction.trigger_click(idx, 0.0);
			let emphasis = resolve(&topo, &interaction);
			assert_eq!(emphasis.nodes.iter().filter(|n| n.badge).count(), 1);
		}
	}

	#[test]
	fn dash_segments() {
		assert!(DashPattern::Solid.segments().is_empty());
		assert_eq!(DashPattern::INACTIVE.segments(), vec![5.0, 5.0]);
	}
}
