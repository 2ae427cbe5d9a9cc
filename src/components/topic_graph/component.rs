use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::GraphConfig;
use super::input::{PointerSource, PointerSubscription, WindowPointerSource};
use super::render;
use super::state::{TopicClicked, TopicGraphState};
use super::types::GraphData;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn cursor_for(hovering: bool) -> &'static str {
	if hovering { "pointer" } else { "default" }
}

fn set_cursor(canvas: &HtmlCanvasElement, hovering: bool) {
	let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", cursor_for(hovering));
}

fn local_position(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(client_x - rect.left(), client_y - rect.top())
}

/// Canvas widget drawing a topic graph with hover emphasis, click pulses,
/// edge particles and a cursor-following glow.
#[component]
pub fn TopicGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] config: GraphConfig,
	#[prop(optional, into)] on_topic_click: Option<Callback<TopicClicked>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<TopicGraphState>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb = StoredValue::new_local(None::<Closure<dyn FnMut()>>);
	let pointer_sub = StoredValue::new_local(None::<PointerSubscription>);
	let alive = StoredValue::new(true);
	let (state_init, animate_init) = (state.clone(), animate.clone());

	on_cleanup(move || {
		alive.set_value(false);
		pointer_sub.set_value(None);
		resize_cb.update_value(|cb| {
			if let (Some(cb), Some(win)) = (cb.take(), web_sys::window()) {
				let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		});
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		// Topology is replaced wholesale whenever `data` changes.
		match TopicGraphState::new(&data.get(), config.clone(), w, h) {
			Ok(s) => *state_init.borrow_mut() = Some(s),
			Err(err) => {
				error!("rejecting topology: {err}");
				*state_init.borrow_mut() = None;
				return;
			}
		}

		if animate_init.borrow().is_some() {
			return;
		}

		let Ok(Some(ctx)) = canvas.get_context("2d") else {
			error!("2d canvas context unavailable");
			return;
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			return;
		};

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			});
			let _ = window
				.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
			resize_cb.set_value(Some(on_resize));
		}

		let (state_ptr, canvas_ptr) = (state_init.clone(), canvas.clone());
		let subscription = WindowPointerSource::new(window.clone()).subscribe_pointer_move(
			Box::new(move |client_x, client_y| {
				let (x, y) = local_position(&canvas_ptr, client_x, client_y);
				if let Some(ref mut s) = *state_ptr.borrow_mut() {
					s.set_pointer(x, y);
				}
			}),
		);
		pointer_sub.set_value(Some(subscription));

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move |now: f64| {
			if !alive.try_get_value().unwrap_or(false) {
				info!("topic graph unmounted, stopping frame loop");
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.advance(now) {
					render::render(s, &ctx);
				}
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_position(&canvas, ev.client_x() as f64, ev.client_y() as f64);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let hovered = s.node_at_position(x, y);
			if s.set_hover(hovered) {
				set_cursor(&canvas, hovered.is_some());
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.set_hover(None);
		}
		if let Some(canvas) = canvas_ref.get() {
			set_cursor(&canvas.into(), false);
		}
	};

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_position(&canvas, ev.client_x() as f64, ev.client_y() as f64);

		let clicked = state_click.borrow_mut().as_mut().and_then(|s| {
			let idx = s.node_at_position(x, y)?;
			s.trigger_click(idx, now_ms())
		});
		if let (Some(clicked), Some(callback)) = (clicked, on_topic_click) {
			callback.run(clicked);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="topic-graph-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cursor_tracks_hover() {
		assert_eq!(cursor_for(true), "pointer");
		assert_eq!(cursor_for(false), "default");
	}
}
