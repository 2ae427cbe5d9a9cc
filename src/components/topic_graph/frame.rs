//! Per-frame draw list. Built from the topology and the engine's current
//! values only; nothing here is retained between frames.

use super::animation::{AnimationEngine, LoopAnimation};
use super::emphasis::DashPattern;
use super::state::Scene;
use super::topology::Topology;
use super::types::{EdgeIndex, NodeIndex};

/// Particle travels source -> destination -> source once per period.
const PARTICLE_KEYFRAMES: [f64; 3] = [0.0, 1.0, 0.0];
const BADGE_SCALE_KEYFRAMES: [f64; 3] = [1.0, 1.5, 1.0];
const BADGE_OPACITY_KEYFRAMES: [f64; 3] = [1.0, 0.5, 1.0];

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeFrame {
	pub edge: EdgeIndex,
	pub from: (f64, f64),
	/// End of the drawn portion; equals the destination once revealed.
	pub to: (f64, f64),
	pub width: f64,
	pub opacity: f64,
	pub dash: DashPattern,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleFrame {
	pub edge: EdgeIndex,
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BadgeFrame {
	pub scale: f64,
	pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeFrame {
	pub node: NodeIndex,
	pub center: (f64, f64),
	pub scale: f64,
	pub opacity: f64,
	pub glow_opacity: f64,
	pub glow_scale: f64,
	pub badge: Option<BadgeFrame>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	pub edges: Vec<EdgeFrame>,
	pub particles: Vec<ParticleFrame>,
	pub nodes: Vec<NodeFrame>,
	pub cursor: (f64, f64),
}

pub fn ping_pong(from: (f64, f64), to: (f64, f64), anim: &LoopAnimation) -> (f64, f64) {
	let t = anim.sample(&PARTICLE_KEYFRAMES);
	(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
}

pub fn badge_keyframes(anim: &LoopAnimation) -> BadgeFrame {
	BadgeFrame {
		scale: anim.sample(&BADGE_SCALE_KEYFRAMES),
		opacity: anim.sample(&BADGE_OPACITY_KEYFRAMES),
	}
}

pub fn compose(topology: &Topology, engine: &AnimationEngine, scene: &Scene) -> Frame {
	let mut frame = Frame {
		cursor: engine.vector_value(scene.cursor),
		..Frame::default()
	};

	for ((idx, edge), binding) in topology.edges().zip(&scene.edges) {
		let (Some(a), Some(b)) = (topology.position(edge.from), topology.position(edge.to)) else {
			continue;
		};
		let (from, to) = ((a.x, a.y), (b.x, b.y));
		let reveal = engine.value(binding.reveal).clamp(0.0, 1.0);
		frame.edges.push(EdgeFrame {
			edge: idx,
			from,
			to: (from.0 + (to.0 - from.0) * reveal, from.1 + (to.1 - from.1) * reveal),
			width: engine.value(binding.stroke_width),
			opacity: engine.value(binding.opacity).clamp(0.0, 1.0),
			dash: binding.dash,
		});

		if let Some(anim) = binding.particle.and_then(|h| engine.loop_anim(h)) {
			let (x, y) = ping_pong(from, to, anim);
			frame.particles.push(ParticleFrame { edge: idx, x, y });
		}
	}

	let badge = scene
		.badge
		.and_then(|badge| engine.loop_anim(badge.pulse).map(|anim| (badge.node, badge_keyframes(anim))));

	for ((idx, node), binding) in topology.nodes().zip(&scene.nodes) {
		frame.nodes.push(NodeFrame {
			node: idx,
			center: (node.position.x, node.position.y),
			scale: engine.value(binding.scale).max(0.0),
			opacity: engine.value(binding.opacity).clamp(0.0, 1.0),
			glow_opacity: engine.value(binding.glow_opacity).clamp(0.0, 1.0),
			glow_scale: engine.value(binding.glow_scale).max(0.0),
			badge: badge.filter(|(node, _)| *node == idx).map(|(_, b)| b),
		});
	}

	frame
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topic_graph::animation::Easing;
	use crate::components::topic_graph::config::GraphConfig;
	use crate::components::topic_graph::state::TopicGraphState;
	use crate::components::topic_graph::topology::tests::sample_seven;

	fn settled_state() -> TopicGraphState {
		let mut state =
			TopicGraphState::new(&sample_seven(), GraphConfig::default(), 1000.0, 600.0).unwrap();
		let mut t = 0.0;
		while t <= 3000.0 {
			state.advance(t);
			t += 16.0;
		}
		state
	}

	#[test]
	fn particle_midway_at_quarter_period() {
		let mut anim = LoopAnimation::new(2000.0, Easing::Linear);
		anim.advance(500.0);
		assert_eq!(ping_pong((0.0, 0.0), (100.0, 40.0), &anim), (50.0, 20.0));
		anim.advance(500.0);
		assert_eq!(ping_pong((0.0, 0.0), (100.0, 40.0), &anim), (100.0, 40.0));
		anim.advance(1000.0);
		assert_eq!(ping_pong((0.0, 0.0), (100.0, 40.0), &anim), (0.0, 0.0));
	}

	#[test]
	fn badge_pulses_between_keyframes() {
		let mut anim = LoopAnimation::new(1000.0, Easing::EaseInOut);
		assert_eq!(badge_keyframes(&anim), BadgeFrame { scale: 1.0, opacity: 1.0 });
		anim.advance(500.0);
		assert_eq!(badge_keyframes(&anim), BadgeFrame { scale: 1.5, opacity: 0.5 });
	}

	#[test]
	fn idle_frame_has_no_particles_or_badge() {
		let frame = settled_state().frame();
		assert_eq!(frame.edges.len(), 8);
		assert_eq!(frame.nodes.len(), 7);
		assert!(frame.particles.is_empty());
		assert!(frame.nodes.iter().all(|n| n.badge.is_none()));
		for edge in &frame.edges {
			assert_eq!(edge.opacity, 0.3);
			assert_eq!(edge.dash, DashPattern::INACTIVE);
		}
		for node in &frame.nodes {
			assert_eq!((node.scale, node.opacity), (1.0, 1.0));
		}
	}

	#[test]
	fn hovered_frame_draws_particles_on_active_edges_only() {
		let mut state = settled_state();
		state.set_hover(Some(NodeIndex(0)));
		let frame = state.frame();

		let edges: Vec<_> = frame.particles.iter().map(|p| p.edge).collect();
		assert_eq!(edges, vec![EdgeIndex(0), EdgeIndex(1)]);
		// a fresh loop starts at the source endpoint
		assert_eq!((frame.particles[0].x, frame.particles[0].y), (200.0, 150.0));

		let badged: Vec<_> = frame.nodes.iter().filter(|n| n.badge.is_some()).map(|n| n.node).collect();
		assert_eq!(badged, vec![NodeIndex(0)]);
		// dash switches with the state change, springs catch up over frames
		assert_eq!(frame.edges[0].dash, DashPattern::Solid);
		assert_eq!(frame.edges[0].opacity, 0.3);
	}

	#[test]
	fn entrance_reveals_edges_from_source() {
		let state =
			TopicGraphState::new(&sample_seven(), GraphConfig::default(), 1000.0, 600.0).unwrap();
		let frame = state.frame();
		assert_eq!(frame.edges[0].to, frame.edges[0].from);
		assert!(frame.nodes.iter().all(|n| n.scale == 0.0 && n.opacity == 0.0));
		assert_eq!(frame.cursor, (500.0, 300.0));
	}
}
