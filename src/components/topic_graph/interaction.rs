use super::types::NodeIndex;

/// Click-pulse phase of a single node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PulseState {
	#[default]
	Idle,
	Clicked,
}

/// One-shot timer behind a node's click pulse. Re-triggering moves the
/// deadline instead of arming a second timer.
#[derive(Clone, Copy, Debug, Default)]
struct PulseTimer {
	deadline: Option<f64>,
}

impl PulseTimer {
	fn state(&self) -> PulseState {
		match self.deadline {
			Some(_) => PulseState::Clicked,
			None => PulseState::Idle,
		}
	}
}

/// The single authoritative record of pointer-driven state.
#[derive(Clone, Debug)]
pub struct InteractionState {
	hovered: Option<NodeIndex>,
	pointer: (f64, f64),
	pulses: Vec<PulseTimer>,
	pulse_ms: f64,
}

impl InteractionState {
	pub fn new(node_count: usize, pulse_ms: f64) -> Self {
		Self {
			hovered: None,
			pointer: (0.0, 0.0),
			pulses: vec![PulseTimer::default(); node_count],
			pulse_ms,
		}
	}

	pub fn hovered(&self) -> Option<NodeIndex> {
		self.hovered
	}

	/// Returns `false` when `node` is already the hovered node (or is out of
	/// range), in which case nothing downstream should be retargeted.
	pub fn set_hover(&mut self, node: Option<NodeIndex>) -> bool {
		if self.hovered == node {
			return false;
		}
		if let Some(idx) = node {
			if idx.0 >= self.pulses.len() {
				return false;
			}
		}
		self.hovered = node;
		true
	}

	pub fn set_pointer(&mut self, x: f64, y: f64) -> bool {
		if self.pointer == (x, y) {
			return false;
		}
		self.pointer = (x, y);
		true
	}

	/// Enter (or re-enter) the Clicked state; the pulse ends `pulse_ms` after
	/// the most recent click.
	pub fn trigger_click(&mut self, node: NodeIndex, now_ms: f64) -> bool {
		let Some(timer) = self.pulses.get_mut(node.0) else {
			return false;
		};
		timer.deadline = Some(now_ms + self.pulse_ms);
		true
	}

	/// Fire every pulse timer whose deadline has passed. Returns the nodes
	/// that went back to Idle.
	pub fn expire_pulses(&mut self, now_ms: f64) -> Vec<NodeIndex> {
		let mut expired = Vec::new();
		for (i, timer) in self.pulses.iter_mut().enumerate() {
			if timer.deadline.is_some_and(|deadline| now_ms >= deadline) {
				timer.deadline = None;
				expired.push(NodeIndex(i));
			}
		}
		expired
	}

	pub fn pulse_state(&self, node: NodeIndex) -> PulseState {
		self.pulses
			.get(node.0)
			.map(PulseTimer::state)
			.unwrap_or_default()
	}

	pub fn has_pending_pulses(&self) -> bool {
		self.pulses.iter().any(|timer| timer.deadline.is_some())
	}
}
