use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::config::GraphConfig;
use super::format::{format_count, truncate_to_width};
use super::frame::{EdgeFrame, Frame, NodeFrame};
use super::state::TopicGraphState;
use super::types::GraphNode;

const BACKGROUND: &str = "#F8FAFC";
const EDGE_STOPS: [&str; 3] = ["#3B82F6", "#8B5CF6", "#EC4899"];
const PARTICLE_COLOR: &str = "#60A5FA";
const PANEL_RADIUS: f64 = 16.0;
const PADDING: f64 = 16.0;
const ICON_SIZE: f64 = 36.0;

/// (icon, cell background, text colour) for likes, dislikes, shares, comments.
const METRIC_STYLES: [(&str, &str, &str); 4] = [
	("▲", "#F0FDF4", "#15803D"),
	("▼", "#FEF2F2", "#B91C1C"),
	("↗", "#EFF6FF", "#1D4ED8"),
	("✉", "#FAF5FF", "#7E22CE"),
];

/// `#RRGGBB` / `#RGB` to `rgba(..)`. Anything else is returned as-is.
pub fn hex_to_rgba(color: &str, alpha: f64) -> String {
	let hex = color.trim_start_matches('#');
	let channel = |s: &str| u8::from_str_radix(s, 16).ok();
	let rgb = match hex.len() {
		_ if !hex.is_ascii() => None,
		6 => channel(&hex[0..2]).zip(channel(&hex[2..4])).zip(channel(&hex[4..6])),
		3 => {
			let double = |i: usize| channel(&hex[i..i + 1]).map(|c| c * 17);
			double(0).zip(double(1)).zip(double(2))
		}
		_ => None,
	};
	match rgb {
		Some(((r, g), b)) => format!("rgba({r}, {g}, {b}, {})", alpha.clamp(0.0, 1.0)),
		None => color.to_string(),
	}
}

pub fn render(state: &TopicGraphState, ctx: &CanvasRenderingContext2d) {
	let frame = state.frame();
	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	draw_cursor_glow(&frame, &state.config, ctx);
	for edge in &frame.edges {
		draw_edge(edge, ctx);
	}
	draw_particles(&frame, &state.config, ctx);
	for node_frame in &frame.nodes {
		if let Some(node) = state.topology.node(node_frame.node) {
			draw_node(node, node_frame, &state.config, ctx);
		}
	}
}

fn draw_cursor_glow(frame: &Frame, config: &GraphConfig, ctx: &CanvasRenderingContext2d) {
	let (x, y) = frame.cursor;
	let radius = config.glow_radius * 2.0;
	let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, radius) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, "rgba(59, 130, 246, 0.4)");
	let _ = gradient.add_color_stop(0.5, "rgba(139, 92, 246, 0.25)");
	let _ = gradient.add_color_stop(1.0, "rgba(236, 72, 153, 0)");
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

fn draw_edge(edge: &EdgeFrame, ctx: &CanvasRenderingContext2d) {
	let ((x1, y1), (x2, y2)) = (edge.from, edge.to);
	if (x2 - x1).hypot(y2 - y1) < 0.001 || edge.opacity <= 0.0 {
		return;
	}

	let gradient = ctx.create_linear_gradient(x1, y1, x2, y2);
	for (i, stop) in EDGE_STOPS.iter().enumerate() {
		let _ = gradient.add_color_stop(i as f32 / 2.0, stop);
	}

	ctx.save();
	ctx.set_global_alpha(edge.opacity);
	#[allow(deprecated)]
	ctx.set_stroke_style(&gradient);
	ctx.set_line_width(edge.width);
	ctx.set_shadow_color("rgba(139, 92, 246, 0.6)");
	ctx.set_shadow_blur(8.0);
	let dash = js_sys::Array::new();
	for segment in edge.dash.segments() {
		dash.push(&JsValue::from_f64(segment));
	}
	let _ = ctx.set_line_dash(&dash);
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2, y2);
	ctx.stroke();
	ctx.restore();
}

fn draw_particles(frame: &Frame, config: &GraphConfig, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(PARTICLE_COLOR);
	for particle in &frame.particles {
		ctx.begin_path();
		let _ = ctx.arc(particle.x, particle.y, config.particle_radius, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_node(node: &GraphNode, f: &NodeFrame, config: &GraphConfig, ctx: &CanvasRenderingContext2d) {
	if f.scale <= 0.0 || f.opacity <= 0.0 {
		return;
	}
	let (w, h) = (config.panel_width, config.panel_height);
	let (left, top) = (-w / 2.0, -h / 2.0);

	ctx.save();
	let _ = ctx.translate(f.center.0, f.center.1);
	let _ = ctx.scale(f.scale, f.scale);
	ctx.set_global_alpha(f.opacity);

	// Outer glow ring
	let glow_radius = w.max(h) / 2.0 * f.glow_scale;
	if let Ok(gradient) = ctx.create_radial_gradient(0.0, 0.0, 0.0, 0.0, 0.0, glow_radius) {
		let _ = gradient.add_color_stop(0.0, &hex_to_rgba(&node.color, 0.5));
		let _ = gradient.add_color_stop(0.5, &hex_to_rgba(&node.color, 0.25));
		let _ = gradient.add_color_stop(1.0, &hex_to_rgba(&node.color, 0.0));
		ctx.set_global_alpha(f.opacity * f.glow_opacity);
		ctx.begin_path();
		let _ = ctx.arc(0.0, 0.0, glow_radius, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
		ctx.set_global_alpha(f.opacity);
	}

	// Panel
	let fill = ctx.create_linear_gradient(left, top, left + w, top + h);
	let _ = fill.add_color_stop(0.0, "#FFFFFF");
	let _ = fill.add_color_stop(1.0, "#F8FAFC");
	ctx.set_shadow_color("rgba(15, 23, 42, 0.25)");
	ctx.set_shadow_blur(24.0);
	ctx.set_shadow_offset_y(8.0);
	rounded_rect(ctx, left, top, w, h, PANEL_RADIUS);
	#[allow(deprecated)]
	ctx.set_fill_style(&fill);
	ctx.fill();
	ctx.set_shadow_color("transparent");
	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_offset_y(0.0);
	ctx.set_stroke_style_str(&node.color);
	ctx.set_line_width(2.0);
	ctx.stroke();

	draw_header(node, config, left, top, ctx);
	draw_metrics(node, left, top + PADDING + ICON_SIZE + 16.0, w, ctx);

	if let Some(badge) = f.badge {
		ctx.set_global_alpha(f.opacity * badge.opacity);
		ctx.set_fill_style_str(&node.color);
		ctx.begin_path();
		let _ = ctx.arc(left + w - 2.0, top + 2.0, 6.0 * badge.scale, 0.0, 2.0 * PI);
		ctx.fill();
	}
	ctx.restore();
}

fn draw_header(
	node: &GraphNode,
	config: &GraphConfig,
	left: f64,
	top: f64,
	ctx: &CanvasRenderingContext2d,
) {
	let (icon_x, icon_y) = (left + PADDING, top + PADDING);
	rounded_rect(ctx, icon_x, icon_y, ICON_SIZE, ICON_SIZE, 8.0);
	ctx.set_fill_style_str(&hex_to_rgba(&node.color, 0.125));
	ctx.fill();

	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font("bold 16px sans-serif");
	ctx.set_fill_style_str(&node.color);
	let _ = ctx.fill_text(
		node.platform.icon_glyph(),
		icon_x + ICON_SIZE / 2.0,
		icon_y + ICON_SIZE / 2.0,
	);

	let text_x = icon_x + ICON_SIZE + 8.0;
	ctx.set_text_align("left");
	ctx.set_font("10px sans-serif");
	ctx.set_fill_style_str("rgba(71, 85, 105, 0.6)");
	let _ = ctx.fill_text(&node.platform.label().to_uppercase(), text_x, icon_y + 9.0);

	ctx.set_font("14px sans-serif");
	ctx.set_fill_style_str("#0F172A");
	let label = truncate_to_width(&node.topic, config.label_max_width, |s| {
		ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0)
	});
	let _ = ctx.fill_text(&label, text_x, icon_y + 26.0);

	let divider_y = icon_y + ICON_SIZE + 8.0;
	ctx.set_stroke_style_str(&hex_to_rgba(&node.color, 0.25));
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(left + PADDING, divider_y);
	ctx.line_to(left + config.panel_width - PADDING, divider_y);
	ctx.stroke();
}

fn draw_metrics(node: &GraphNode, left: f64, top: f64, width: f64, ctx: &CanvasRenderingContext2d) {
	let m = &node.metrics;
	let values = [m.likes, m.dislikes, m.shares, m.comments];
	let gap = 8.0;
	let cell_w = (width - 2.0 * PADDING - gap) / 2.0;
	let cell_h = 24.0;

	ctx.set_font("12px sans-serif");
	ctx.set_text_baseline("middle");
	ctx.set_text_align("left");
	for (i, (value, (icon, bg, fg))) in values.iter().zip(METRIC_STYLES).enumerate() {
		let x = left + PADDING + (i % 2) as f64 * (cell_w + gap);
		let y = top + (i / 2) as f64 * (cell_h + gap);
		rounded_rect(ctx, x, y, cell_w, cell_h, 8.0);
		ctx.set_fill_style_str(bg);
		ctx.fill();
		ctx.set_fill_style_str(fg);
		let _ = ctx.fill_text(icon, x + 8.0, y + cell_h / 2.0);
		let _ = ctx.fill_text(&format_count(*value), x + 26.0, y + cell_h / 2.0);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hex_colours_gain_alpha() {
		assert_eq!(hex_to_rgba("#3B82F6", 0.5), "rgba(59, 130, 246, 0.5)");
		assert_eq!(hex_to_rgba("#fff", 1.0), "rgba(255, 255, 255, 1)");
		assert_eq!(hex_to_rgba("#10B981", 2.0), "rgba(16, 185, 129, 1)");
	}

	#[test]
	fn non_hex_tokens_pass_through() {
		assert_eq!(hex_to_rgba("tomato", 0.5), "tomato");
		assert_eq!(hex_to_rgba("#12345", 0.5), "#12345");
		assert_eq!(hex_to_rgba("#GGHHII", 0.5), "#GGHHII");
		assert_eq!(hex_to_rgba("#aé", 0.5), "#aé");
	}
}
