use serde::{Deserialize, Deserializer};

use super::animation::SpringConfig;

/// Spring fields given in JSON; the rest come from the spring being tuned.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
struct SpringOverrides {
	stiffness: Option<f64>,
	damping: Option<f64>,
	mass: Option<f64>,
	rest_delta: Option<f64>,
	rest_speed: Option<f64>,
}

impl SpringOverrides {
	fn over(self, base: SpringConfig) -> SpringConfig {
		SpringConfig {
			stiffness: self.stiffness.unwrap_or(base.stiffness),
			damping: self.damping.unwrap_or(base.damping),
			mass: self.mass.unwrap_or(base.mass),
			rest_delta: self.rest_delta.unwrap_or(base.rest_delta),
			rest_speed: self.rest_speed.unwrap_or(base.rest_speed),
		}
	}
}

fn node_spring<'de, D: Deserializer<'de>>(de: D) -> Result<SpringConfig, D::Error> {
	SpringOverrides::deserialize(de).map(|o| o.over(SpringConfig::NODE_PULSE))
}

fn cursor_spring<'de, D: Deserializer<'de>>(de: D) -> Result<SpringConfig, D::Error> {
	SpringOverrides::deserialize(de).map(|o| o.over(SpringConfig::CURSOR_FOLLOW))
}

fn edge_spring<'de, D: Deserializer<'de>>(de: D) -> Result<SpringConfig, D::Error> {
	SpringOverrides::deserialize(de).map(|o| o.over(SpringConfig::EDGE))
}

/// Tunables for one graph widget. Every field has a default, so hosts only
/// need to override what they care about.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	#[serde(deserialize_with = "node_spring")]
	pub node_spring: SpringConfig,
	#[serde(deserialize_with = "cursor_spring")]
	pub cursor_spring: SpringConfig,
	#[serde(deserialize_with = "edge_spring")]
	pub edge_spring: SpringConfig,
	pub click_pulse_ms: f64,
	pub particle_period_ms: f64,
	pub badge_period_ms: f64,
	/// Delay between consecutive edges starting their entrance reveal.
	pub edge_reveal_stagger_ms: f64,
	pub panel_width: f64,
	pub panel_height: f64,
	pub label_max_width: f64,
	pub glow_radius: f64,
	pub particle_radius: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			node_spring: SpringConfig::NODE_PULSE,
			cursor_spring: SpringConfig::CURSOR_FOLLOW,
			edge_spring: SpringConfig::EDGE,
			click_pulse_ms: 300.0,
			particle_period_ms: 2000.0,
			badge_period_ms: 1000.0,
			edge_reveal_stagger_ms: 100.0,
			panel_width: 200.0,
			panel_height: 132.0,
			label_max_width: 120.0,
			glow_radius: 24.0,
			particle_radius: 4.0,
		}
	}
}
