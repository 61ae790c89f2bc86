//! use_long_press

use core::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use hookshelf_reactive::on_cleanup;

use super::event_listener::use_event_listener;
use crate::callback::Callback;
use crate::platform::{self, Element, TimeoutHandle};

/// Options for [`use_long_press`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongPressOptions {
	/// How long the press must be held
	pub delay: Duration,
}

impl Default for LongPressOptions {
	fn default() -> Self {
		Self {
			delay: Duration::from_millis(300),
		}
	}
}

impl LongPressOptions {
	/// Sets how long the press must be held.
	pub fn delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}
}

const PRESS_EVENTS: [&str; 2] = ["mousedown", "touchstart"];
const RELEASE_EVENTS: [&str; 3] = ["mouseup", "mouseleave", "touchend"];

/// Calls `callback` when `element` is pressed and held for `options.delay`.
///
/// Releasing or leaving the element before the delay cancels the press.
pub fn use_long_press<F>(element: &Element, callback: F, options: LongPressOptions)
where
	F: Fn() + 'static,
{
	let callback = Callback::new(move |()| callback());
	let pending: Rc<RefCell<Option<TimeoutHandle>>> = Rc::new(RefCell::new(None));

	for event in PRESS_EVENTS {
		let callback = callback.clone();
		let pending = pending.clone();
		use_event_listener(
			event,
			move |_| {
				let callback = callback.clone();
				let handle = platform::set_timeout(options.delay, move || callback.call(()));
				let replaced = pending.borrow_mut().replace(handle);
				drop(replaced);
			},
			element,
		);
	}

	for event in RELEASE_EVENTS {
		let pending = pending.clone();
		use_event_listener(
			event,
			move |_| {
				let cleared = pending.borrow_mut().take();
				drop(cleared);
			},
			element,
		);
	}

	on_cleanup(move || {
		let cleared = pending.borrow_mut().take();
		drop(cleared);
	});
}
