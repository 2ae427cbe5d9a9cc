use log::{debug, info};

use super::animation::{AnimationEngine, Easing, LoopHandle, SpringHandle, VectorHandle};
use super::config::GraphConfig;
use super::emphasis::{self, DashPattern, EDGE_WIDTH_REST};
use super::frame::{self, Frame};
use super::interaction::InteractionState;
use super::topology::{Topology, TopologyError};
use super::types::{GraphData, NodeIndex};

#[derive(Clone, Copy, Debug)]
pub struct NodeBindings {
	pub scale: SpringHandle,
	pub opacity: SpringHandle,
	pub glow_opacity: SpringHandle,
	pub glow_scale: SpringHandle,
}

#[derive(Clone, Copy, Debug)]
pub struct EdgeBindings {
	pub stroke_width: SpringHandle,
	pub opacity: SpringHandle,
	/// Fraction of the edge drawn so far, for the entrance reveal.
	pub reveal: SpringHandle,
	pub dash: DashPattern,
	/// Particle loop, alive only while the edge is active.
	pub particle: Option<LoopHandle>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
	pub node: NodeIndex,
	pub pulse: LoopHandle,
}

/// Which engine handle animates which visual property.
#[derive(Clone, Debug)]
pub struct Scene {
	pub nodes: Vec<NodeBindings>,
	pub edges: Vec<EdgeBindings>,
	pub badge: Option<Badge>,
	pub cursor: VectorHandle,
}

/// Sent to the host when a node is clicked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicClicked {
	pub id: String,
	pub topic: String,
}

pub struct TopicGraphState {
	pub topology: Topology,
	pub config: GraphConfig,
	pub width: f64,
	pub height: f64,
	interaction: InteractionState,
	engine: AnimationEngine,
	scene: Scene,
	/// Set when the canvas was cleared by something other than a frame.
	repaint: bool,
	/// Clock time of the first frame; edge reveals are staggered from it.
	started_ms: Option<f64>,
	/// Edges whose reveal has begun, in topology order.
	revealed: usize,
}

impl TopicGraphState {
	pub fn new(
		data: &GraphData,
		config: GraphConfig,
		width: f64,
		height: f64,
	) -> Result<Self, TopologyError> {
		let topology = Topology::new(data)?;
		let mut engine = AnimationEngine::new();

		// Nodes grow in from nothing; glow starts at its resting look.
		let nodes = topology
			.nodes()
			.map(|_| NodeBindings {
				scale: engine.add_spring(0.0, config.node_spring),
				opacity: engine.add_spring(0.0, config.node_spring),
				glow_opacity: engine.add_spring(emphasis::GLOW_OPACITY_REST, config.node_spring),
				glow_scale: engine.add_spring(emphasis::GLOW_SCALE_REST, config.node_spring),
			})
			.collect();
		let edges = topology
			.edges()
			.map(|_| EdgeBindings {
				stroke_width: engine.add_spring(EDGE_WIDTH_REST, config.edge_spring),
				opacity: engine.add_spring(0.0, config.edge_spring),
				reveal: engine.add_spring(0.0, config.edge_spring),
				dash: DashPattern::INACTIVE,
				particle: None,
			})
			.collect();
		let cursor = engine.add_vector(width / 2.0, height / 2.0, config.cursor_spring);

		let mut state = Self {
			interaction: InteractionState::new(topology.len(), config.click_pulse_ms),
			scene: Scene {
				nodes,
				edges,
				badge: None,
				cursor,
			},
			topology,
			config,
			width,
			height,
			engine,
			repaint: true,
			started_ms: None,
			revealed: 0,
		};
		for binding in &state.scene.nodes {
			state.engine.retarget(binding.opacity, 1.0);
		}
		state.sync_emphasis();

		info!(
			"topic graph session: {} nodes, {} edges",
			state.topology.len(),
			state.topology.edge_count()
		);
		Ok(state)
	}

	/// Hover a node (or nothing). Hovering the already-hovered node leaves
	/// every spring untouched.
	pub fn set_hover(&mut self, node: Option<NodeIndex>) -> bool {
		if !self.interaction.set_hover(node) {
			return false;
		}
		debug!("hover -> {:?}", node.and_then(|idx| self.topology.node(idx)).map(|n| &n.id));
		self.sync_emphasis();
		true
	}

	pub fn set_pointer(&mut self, x: f64, y: f64) {
		if self.interaction.set_pointer(x, y) {
			self.engine.retarget_vector(self.scene.cursor, x, y);
		}
	}

	pub fn trigger_click(&mut self, node: NodeIndex, now_ms: f64) -> Option<TopicClicked> {
		if !self.interaction.trigger_click(node, now_ms) {
			return None;
		}
		self.sync_emphasis();
		let clicked = self.topology.node(node).map(|n| TopicClicked {
			id: n.id.clone(),
			topic: n.topic.clone(),
		});
		if let Some(clicked) = &clicked {
			info!("clicked node: {}", clicked.topic);
		}
		clicked
	}

	/// Topmost node whose panel contains the point. Panels are hit-tested
	/// at their resting size.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<NodeIndex> {
		let (half_w, half_h) = (self.config.panel_width / 2.0, self.config.panel_height / 2.0);
		self.topology
			.nodes()
			.rev()
			.find(|(_, node)| {
				(x - node.position.x).abs() <= half_w && (y - node.position.y).abs() <= half_h
			})
			.map(|(idx, _)| idx)
	}

	/// Per-frame entry point: fire due pulse timers, then step the engine
	/// to the display timestamp. Returns whether the frame needs painting.
	pub fn advance(&mut self, now_ms: f64) -> bool {
		self.reveal_due_edges(now_ms);
		if self.interaction.has_pending_pulses() {
			let expired = self.interaction.expire_pulses(now_ms);
			if !expired.is_empty() {
				debug!("click pulse expired for {:?}", expired);
				self.sync_emphasis();
			}
		}
		let animating = self.engine.is_animating();
		self.engine.tick(now_ms);
		std::mem::take(&mut self.repaint) || animating
	}

	pub fn frame(&self) -> Frame {
		frame::compose(&self.topology, &self.engine, &self.scene)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.repaint = true;
	}

	fn reveal_due_edges(&mut self, now_ms: f64) {
		let started = *self.started_ms.get_or_insert(now_ms);
		while let Some(binding) = self.scene.edges.get(self.revealed) {
			let due = started + self.revealed as f64 * self.config.edge_reveal_stagger_ms;
			if now_ms < due {
				break;
			}
			self.engine.retarget(binding.reveal, 1.0);
			self.revealed += 1;
		}
	}

	/// Resolve emphasis for the current interaction state and push the
	/// result into the engine. Runs synchronously inside the event that
	/// caused it, so no frame sees half an update.
	fn sync_emphasis(&mut self) {
		let emphasis = emphasis::resolve(&self.topology, &self.interaction);

		for (binding, target) in self.scene.nodes.iter().zip(&emphasis.nodes) {
			self.engine.retarget(binding.scale, target.scale);
			self.engine.retarget(binding.glow_opacity, target.glow_opacity);
			self.engine.retarget(binding.glow_scale, target.glow_scale);
		}

		for (i, (binding, target)) in self
			.scene
			.edges
			.iter_mut()
			.zip(&emphasis.edges)
			.enumerate()
		{
			self.engine.retarget(binding.stroke_width, target.stroke_width);
			self.engine.retarget(binding.opacity, target.opacity);
			binding.dash = target.dash;
			match (target.active, binding.particle) {
				(true, None) => {
					binding.particle = Some(
						self.engine
							.start_loop(self.config.particle_period_ms, Easing::Linear),
					);
					debug!("particle loop started on edge {i}");
				}
				(false, Some(handle)) => {
					self.engine.cancel_loop(handle);
					binding.particle = None;
					debug!("particle loop cancelled on edge {i}");
				}
				_ => {}
			}
		}

		let badge_node = emphasis.nodes.iter().position(|n| n.badge).map(NodeIndex);
		if self.scene.badge.map(|badge| badge.node) != badge_node {
			if let Some(old) = self.scene.badge.take() {
				self.engine.cancel_loop(old.pulse);
			}
			self.scene.badge = badge_node.map(|node| Badge {
				node,
				pulse: self
					.engine
					.start_loop(self.config.badge_period_ms, Easing::EaseInOut),
			});
		}
	}
}
