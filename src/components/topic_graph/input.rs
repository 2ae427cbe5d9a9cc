use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{MouseEvent, Window};

/// Anything that can stream viewport-level pointer moves.
pub trait PointerSource {
	fn subscribe_pointer_move(&self, callback: Box<dyn FnMut(f64, f64)>) -> PointerSubscription;
}

/// Live subscription; unsubscribes when dropped.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct PointerSubscription {
	release: Option<Box<dyn FnOnce()>>,
}

impl PointerSubscription {
	pub fn new(release: impl FnOnce() + 'static) -> Self {
		Self {
			release: Some(Box::new(release)),
		}
	}

	pub fn unsubscribe(mut self) {
		self.release_now();
	}

	fn release_now(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}

impl Drop for PointerSubscription {
	fn drop(&mut self) {
		self.release_now();
	}
}

/// `mousemove` on the browser window, reported in client coordinates.
pub struct WindowPointerSource {
	window: Window,
}

impl WindowPointerSource {
	pub fn new(window: Window) -> Self {
		Self { window }
	}
}

impl PointerSource for WindowPointerSource {
	fn subscribe_pointer_move(
		&self,
		mut callback: Box<dyn FnMut(f64, f64)>,
	) -> PointerSubscription {
		let listener = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			callback(ev.client_x() as f64, ev.client_y() as f64);
		});
		let _ = self
			.window
			.add_event_listener_with_callback("mousemove", listener.as_ref().unchecked_ref());
		debug!("pointer-move listener attached");

		let window = self.window.clone();
		PointerSubscription::new(move || {
			let _ = window
				.remove_event_listener_with_callback("mousemove", listener.as_ref().unchecked_ref());
			debug!("pointer-move listener removed");
		})
	}
}
