//! Frame-driven animation engine: damped springs that can be retargeted
//! mid-flight, and periodic loops that can be started and destroyed.
//!
//! Every handle is owned by [`AnimationEngine`]. Callers hold opaque
//! handles, read current values, and write only through `retarget*`,
//! `start_loop` and `cancel_loop`.

/// Largest integration step. Stiff springs stay stable at 60 Hz and below.
const MAX_SUBSTEP_S: f64 = 1.0 / 240.0;
/// Frames further apart than this (tab switch, debugger pause) are clamped
/// so springs don't overshoot wildly on resume.
const MAX_FRAME_MS: f64 = 64.0;
/// Lighter springs are unstable at the substep size.
const MIN_MASS: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
	pub stiffness: f64,
	pub damping: f64,
	pub mass: f64,
	/// Distance from target under which the spring may come to rest.
	pub rest_delta: f64,
	/// Speed under which the spring may come to rest.
	pub rest_speed: f64,
}

impl SpringConfig {
	/// Node scale and glow pulses.
	pub const NODE_PULSE: SpringConfig = SpringConfig {
		stiffness: 300.0,
		damping: 20.0,
		mass: 1.0,
		rest_delta: 0.001,
		rest_speed: 0.01,
	};
	/// Slow-trailing cursor glow, in pixels.
	pub const CURSOR_FOLLOW: SpringConfig = SpringConfig {
		stiffness: 150.0,
		damping: 15.0,
		mass: 1.0,
		rest_delta: 0.1,
		rest_speed: 1.0,
	};
	/// Edge opacity, width and reveal.
	pub const EDGE: SpringConfig = SpringConfig {
		stiffness: 170.0,
		damping: 26.0,
		mass: 1.0,
		rest_delta: 0.001,
		rest_speed: 0.01,
	};
}

#[derive(Clone, Copy, Debug)]
pub struct Spring {
	value: f64,
	target: f64,
	velocity: f64,
	config: SpringConfig,
	resting: bool,
}

impl Spring {
	pub fn new(value: f64, mut config: SpringConfig) -> Self {
		config.mass = config.mass.max(MIN_MASS);
		Self {
			value,
			target: value,
			velocity: 0.0,
			config,
			resting: true,
		}
	}

	pub fn value(&self) -> f64 {
		self.value
	}

	pub fn target(&self) -> f64 {
		self.target
	}

	pub fn velocity(&self) -> f64 {
		self.velocity
	}

	pub fn is_animating(&self) -> bool {
		!self.resting
	}

	/// Point the spring at a new target. Value and velocity carry over, so
	/// the motion bends rather than jumps. Returns `false` if the target is
	/// unchanged.
	pub fn retarget(&mut self, target: f64) -> bool {
		if self.target == target {
			return false;
		}
		self.target = target;
		self.resting = false;
		true
	}

	pub fn step(&mut self, dt_s: f64) {
		if self.resting || dt_s <= 0.0 {
			return;
		}
		let SpringConfig {
			stiffness,
			damping,
			mass,
			rest_delta,
			rest_speed,
		} = self.config;

		let substeps = (dt_s / MAX_SUBSTEP_S).ceil().max(1.0);
		let h = dt_s / substeps;
		for _ in 0..substeps as usize {
			let accel = (-stiffness * (self.value - self.target) - damping * self.velocity) / mass;
			self.velocity += accel * h;
			self.value += self.velocity * h;
		}

		if (self.value - self.target).abs() < rest_delta && self.velocity.abs() < rest_speed {
			self.value = self.target;
			self.velocity = 0.0;
			self.resting = true;
		}
	}
}

/// Two springs sharing one config, for positions.
#[derive(Clone, Copy, Debug)]
pub struct SpringVec2 {
	x: Spring,
	y: Spring,
}

impl SpringVec2 {
	pub fn new(x: f64, y: f64, config: SpringConfig) -> Self {
		Self {
			x: Spring::new(x, config),
			y: Spring::new(y, config),
		}
	}

	pub fn value(&self) -> (f64, f64) {
		(self.x.value(), self.y.value())
	}

	pub fn retarget(&mut self, x: f64, y: f64) -> bool {
		let moved_x = self.x.retarget(x);
		let moved_y = self.y.retarget(y);
		moved_x || moved_y
	}

	pub fn step(&mut self, dt_s: f64) {
		self.x.step(dt_s);
		self.y.step(dt_s);
	}

	pub fn is_animating(&self) -> bool {
		self.x.is_animating() || self.y.is_animating()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
	Linear,
	EaseInOut,
}

impl Easing {
	pub fn apply(self, t: f64) -> f64 {
		let t = t.clamp(0.0, 1.0);
		match self {
			Easing::Linear => t,
			Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
		}
	}
}

/// A periodic animation that restarts for as long as it exists.
#[derive(Clone, Copy, Debug)]
pub struct LoopAnimation {
	period_ms: f64,
	easing: Easing,
	elapsed_ms: f64,
}

impl LoopAnimation {
	pub fn new(period_ms: f64, easing: Easing) -> Self {
		Self {
			period_ms: period_ms.max(f64::EPSILON),
			easing,
			elapsed_ms: 0.0,
		}
	}

	pub fn advance(&mut self, dt_ms: f64) {
		self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)) % self.period_ms;
	}

	/// Position within the current cycle, in `[0, 1)`.
	pub fn phase(&self) -> f64 {
		self.elapsed_ms / self.period_ms
	}

	/// Interpolate evenly spaced keyframes at the current phase, easing each
	/// segment independently.
	pub fn sample(&self, keyframes: &[f64]) -> f64 {
		sample_keyframes(keyframes, self.phase(), self.easing)
	}
}

pub fn sample_keyframes(keyframes: &[f64], phase: f64, easing: Easing) -> f64 {
	match keyframes {
		[] => 0.0,
		[only] => *only,
		_ => {
			let segments = (keyframes.len() - 1) as f64;
			let pos = phase.clamp(0.0, 1.0) * segments;
			let i = (pos.floor() as usize).min(keyframes.len() - 2);
			let t = easing.apply(pos - i as f64);
			keyframes[i] + (keyframes[i + 1] - keyframes[i]) * t
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpringHandle(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VectorHandle(usize);

/// Generational handle: a cancelled loop's handle never aliases a loop
/// started later in the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoopHandle {
	slot: usize,
	generation: u32,
}

#[derive(Clone, Copy, Debug, Default)]
struct LoopSlot {
	generation: u32,
	anim: Option<LoopAnimation>,
}

#[derive(Clone, Debug, Default)]
pub struct AnimationEngine {
	springs: Vec<Spring>,
	vectors: Vec<SpringVec2>,
	loops: Vec<LoopSlot>,
	free_loops: Vec<usize>,
	last_frame_ms: Option<f64>,
}

impl AnimationEngine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_spring(&mut self, value: f64, config: SpringConfig) -> SpringHandle {
		self.springs.push(Spring::new(value, config));
		SpringHandle(self.springs.len() - 1)
	}

	pub fn add_vector(&mut self, x: f64, y: f64, config: SpringConfig) -> VectorHandle {
		self.vectors.push(SpringVec2::new(x, y, config));
		VectorHandle(self.vectors.len() - 1)
	}

	pub fn retarget(&mut self, handle: SpringHandle, target: f64) -> bool {
		self.springs
			.get_mut(handle.0)
			.is_some_and(|spring| spring.retarget(target))
	}

	pub fn retarget_vector(&mut self, handle: VectorHandle, x: f64, y: f64) -> bool {
		self.vectors
			.get_mut(handle.0)
			.is_some_and(|vector| vector.retarget(x, y))
	}

	pub fn spring(&self, handle: SpringHandle) -> Option<&Spring> {
		self.springs.get(handle.0)
	}

	pub fn value(&self, handle: SpringHandle) -> f64 {
		self.spring(handle).map_or(0.0, Spring::value)
	}

	pub fn vector_value(&self, handle: VectorHandle) -> (f64, f64) {
		self.vectors
			.get(handle.0)
			.map_or((0.0, 0.0), SpringVec2::value)
	}

	pub fn start_loop(&mut self, period_ms: f64, easing: Easing) -> LoopHandle {
		let anim = Some(LoopAnimation::new(period_ms, easing));
		if let Some(slot) = self.free_loops.pop() {
			let entry = &mut self.loops[slot];
			entry.anim = anim;
			return LoopHandle {
				slot,
				generation: entry.generation,
			};
		}
		self.loops.push(LoopSlot {
			generation: 0,
			anim,
		});
		LoopHandle {
			slot: self.loops.len() - 1,
			generation: 0,
		}
	}

	/// Destroy a loop. The handle is dead afterwards; returns `false` if it
	/// already was.
	pub fn cancel_loop(&mut self, handle: LoopHandle) -> bool {
		let Some(entry) = self.loops.get_mut(handle.slot) else {
			return false;
		};
		if entry.generation != handle.generation || entry.anim.is_none() {
			return false;
		}
		entry.anim = None;
		entry.generation = entry.generation.wrapping_add(1);
		self.free_loops.push(handle.slot);
		true
	}

	pub fn loop_anim(&self, handle: LoopHandle) -> Option<&LoopAnimation> {
		self.loops
			.get(handle.slot)
			.filter(|entry| entry.generation == handle.generation)
			.and_then(|entry| entry.anim.as_ref())
	}

	pub fn active_loops(&self) -> usize {
		self.loops.iter().filter(|entry| entry.anim.is_some()).count()
	}

	/// Advance to the display timestamp `now_ms`. The first call only
	/// starts the clock.
	pub fn tick(&mut self, now_ms: f64) {
		let dt_ms = match self.last_frame_ms {
			Some(last) => (now_ms - last).max(0.0),
			None => 0.0,
		};
		self.last_frame_ms = Some(now_ms);
		self.advance(dt_ms);
	}

	pub fn advance(&mut self, dt_ms: f64) {
		let spring_dt = dt_ms.min(MAX_FRAME_MS) / 1000.0;
		for spring in self.springs.iter_mut().filter(|s| s.is_animating()) {
			spring.step(spring_dt);
		}
		for vector in self.vectors.iter_mut().filter(|v| v.is_animating()) {
			vector.step(spring_dt);
		}
		for anim in self.loops.iter_mut().filter_map(|entry| entry.anim.as_mut()) {
			anim.advance(dt_ms);
		}
	}

	/// Whether the next tick would change anything on screen.
	pub fn is_animating(&self) -> bool {
		self.springs.iter().any(Spring::is_animating)
			|| self.vectors.iter().any(SpringVec2::is_animating)
			|| self.active_loops() > 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const FRAME_MS: f64 = 1000.0 / 60.0;

	fn phase(engine: &AnimationEngine, handle: LoopHandle) -> Option<f64> {
		engine.loop_anim(handle).map(LoopAnimation::phase)
	}

	fn run(engine: &mut AnimationEngine, ms: f64) {
		let mut t = 0.0;
		while t < ms {
			engine.advance(FRAME_MS);
			t += FRAME_MS;
		}
	}

	#[test]
	fn spring_settles_on_target() {
		let mut engine = AnimationEngine::new();
		let scale = engine.add_spring(1.0, SpringConfig::NODE_PULSE);
		assert!(engine.retarget(scale, 1.15));
		run(&mut engine, 2000.0);
		assert_eq!(engine.value(scale), 1.15);
		assert!(!engine.is_animating());
	}

	#[test]
	fn retarget_with_same_target_is_noop() {
		let mut engine = AnimationEngine::new();
		let scale = engine.add_spring(1.0, SpringConfig::NODE_PULSE);
		assert!(!engine.retarget(scale, 1.0));
		assert!(!engine.is_animating());
		engine.retarget(scale, 1.15);
		assert!(!engine.retarget(scale, 1.15));
	}

	#[test]
	fn retarget_mid_flight_is_continuous() {
		let mut spring = Spring::new(1.0, SpringConfig::NODE_PULSE);
		spring.retarget(1.15);
		for _ in 0..4 {
			spring.step(FRAME_MS / 1000.0);
		}
		let before = spring.value();
		let velocity = spring.velocity();
		assert!(before > 1.0 && before < 1.15 + 0.05);
		assert!(velocity > 0.0);

		spring.retarget(1.0);
		assert_eq!(spring.value(), before);
		assert_eq!(spring.velocity(), velocity);

		// next frame continues from the carried velocity: no reversal jump
		spring.step(FRAME_MS / 1000.0);
		let after = spring.value();
		assert!((after - before).abs() < velocity.abs() * FRAME_MS / 1000.0 + 0.01);
	}

	#[test]
	fn massless_config_stays_finite() {
		let config = SpringConfig {
			mass: 0.0,
			..SpringConfig::NODE_PULSE
		};
		let mut spring = Spring::new(1.0, config);
		spring.retarget(1.2);
		for _ in 0..240 {
			spring.step(FRAME_MS / 1000.0);
		}
		assert!(spring.value().is_finite());
		assert_eq!(spring.value(), 1.2);
		assert!(!spring.is_animating());
	}

	#[test]
	fn cursor_spring_trails_pointer() {
		let mut engine = AnimationEngine::new();
		let cursor = engine.add_vector(0.0, 0.0, SpringConfig::CURSOR_FOLLOW);
		engine.retarget_vector(cursor, 100.0, 50.0);
		engine.advance(FRAME_MS);
		let (x, y) = engine.vector_value(cursor);
		assert!(x > 0.0 && x < 100.0);
		assert!(y > 0.0 && y < 50.0);
		run(&mut engine, 3000.0);
		assert_eq!(engine.vector_value(cursor), (100.0, 50.0));
	}

	#[test]
	fn loop_wraps_period() {
		let mut anim = LoopAnimation::new(2000.0, Easing::Linear);
		anim.advance(500.0);
		assert!((anim.phase() - 0.25).abs() < 1e-9);
		anim.advance(2000.0);
		assert!((anim.phase() - 0.25).abs() < 1e-9);
		assert!((anim.sample(&[0.0, 1.0, 0.0]) - 0.5).abs() < 1e-9);
	}

	#[test]
	fn keyframes_ping_pong() {
		let frames = [0.0, 1.0, 0.0];
		assert_eq!(sample_keyframes(&frames, 0.0, Easing::Linear), 0.0);
		assert_eq!(sample_keyframes(&frames, 0.5, Easing::Linear), 1.0);
		assert!((sample_keyframes(&frames, 0.75, Easing::Linear) - 0.5).abs() < 1e-9);
		assert_eq!(sample_keyframes(&frames, 1.0, Easing::Linear), 0.0);
		assert_eq!(sample_keyframes(&[1.5], 0.3, Easing::EaseInOut), 1.5);
		assert_eq!(sample_keyframes(&[], 0.3, Easing::EaseInOut), 0.0);
	}

	#[test]
	fn cancelled_loop_is_destroyed() {
		let mut engine = AnimationEngine::new();
		let particle = engine.start_loop(2000.0, Easing::Linear);
		engine.advance(100.0);
		assert!(phase(&engine, particle).is_some());
		assert_eq!(engine.active_loops(), 1);

		assert!(engine.cancel_loop(particle));
		assert!(!engine.cancel_loop(particle));
		assert_eq!(phase(&engine, particle), None);
		assert_eq!(engine.active_loops(), 0);
		assert!(!engine.is_animating());

		// slot reuse does not revive the old handle
		let next = engine.start_loop(2000.0, Easing::Linear);
		assert_ne!(next, particle);
		assert_eq!(phase(&engine, particle), None);
		assert_eq!(phase(&engine, next), Some(0.0));
	}

	#[test]
	fn tick_uses_display_clock() {
		let mut engine = AnimationEngine::new();
		let particle = engine.start_loop(2000.0, Easing::Linear);
		engine.tick(10_000.0);
		assert_eq!(phase(&engine, particle), Some(0.0));
		engine.tick(10_500.0);
		assert_eq!(phase(&engine, particle), Some(0.25));
	}
}
