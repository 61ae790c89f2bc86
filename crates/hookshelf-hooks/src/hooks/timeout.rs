//! Timer hooks: use_timeout and use_debounce

use core::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use hookshelf_reactive::on_cleanup;

use super::effect::use_changed_effect;
use crate::callback::Callback;
use crate::platform::{self, TimeoutHandle};

/// Controls for a timeout started by [`use_timeout`]
#[derive(Debug, Clone)]
pub struct UseTimeout {
	callback: Callback,
	delay: Duration,
	handle: Rc<RefCell<Option<TimeoutHandle>>>,
}

impl UseTimeout {
	fn start(&self) {
		let callback = self.callback.clone();
		let handle = platform::set_timeout(self.delay, move || callback.call(()));
		let replaced = self.handle.borrow_mut().replace(handle);
		drop(replaced);
	}

	/// Clears any pending timeout and starts a new one.
	pub fn reset(&self) {
		self.clear();
		self.start();
	}

	/// Clears the pending timeout, if any.
	pub fn clear(&self) {
		let pending = self.handle.borrow_mut().take();
		if let Some(handle) = pending {
			handle.cancel();
		}
	}
}

/// Calls `callback` once `delay` has elapsed after mount.
///
/// The timeout is cleared on unmount.
///
/// # Example
///
/// ```ignore
/// let count = Signal::new(10);
/// let timeout = use_timeout(move || count.set(0), Duration::from_secs(1));
/// // later
/// timeout.reset();
/// ```
pub fn use_timeout<F>(callback: F, delay: Duration) -> UseTimeout
where
	F: Fn() + 'static,
{
	let timeout = UseTimeout {
		callback: Callback::new(move |()| callback()),
		delay,
		handle: Rc::new(RefCell::new(None)),
	};
	crate::debug_log!("use_timeout: scheduled after {:?}", delay);
	timeout.start();
	on_cleanup({
		let timeout = timeout.clone();
		move || timeout.clear()
	});
	timeout
}

/// Calls `callback` once `deps` has stopped changing for `delay`.
///
/// Every change restarts the wait. Setting a dependency to an equal value is
/// not a change. The values seen on mount never trigger the callback.
///
/// # Example
///
/// ```ignore
/// let query = Signal::new(String::new());
/// use_debounce(
///     { let query = query.clone(); move || search(&query.get_untracked()) },
///     Duration::from_millis(300),
///     move || query.get(),
/// );
/// ```
pub fn use_debounce<F, D, C>(callback: F, delay: Duration, deps: D)
where
	F: Fn() + 'static,
	D: Fn() -> C + 'static,
	C: PartialEq + 'static,
{
	let callback = Callback::new(move |()| callback());
	use_changed_effect(deps, move |on_mount| {
		if on_mount {
			return;
		}
		let callback = callback.clone();
		let pending = platform::set_timeout(delay, move || callback.call(()));
		// Cleared when deps change again or on unmount
		on_cleanup(move || drop(pending));
	});
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{advance_time, flush, pending_timers, reset};
	use crate::{Signal, mount};
	use core::cell::Cell;
	use serial_test::serial;

	fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
		let count = Rc::new(Cell::new(0));
		let bump = {
			let count = count.clone();
			move || count.set(count.get() + 1)
		};
		(count, bump)
	}

	#[test]
	#[serial]
	fn test_timeout_fires_once_after_delay() {
		reset();
		let (fired, bump) = counter();
		let (_scope, _timeout) = mount(|| use_timeout(bump, Duration::from_millis(1000)));

		advance_time(Duration::from_millis(999));
		assert_eq!(fired.get(), 0);
		advance_time(Duration::from_millis(1));
		assert_eq!(fired.get(), 1);
		advance_time(Duration::from_millis(5000));
		assert_eq!(fired.get(), 1);
	}

	#[test]
	#[serial]
	fn test_reset_restarts_and_clear_cancels() {
		reset();
		let (fired, bump) = counter();
		let (_scope, timeout) = mount(|| use_timeout(bump, Duration::from_millis(100)));

		advance_time(Duration::from_millis(60));
		timeout.reset();
		advance_time(Duration::from_millis(60));
		assert_eq!(fired.get(), 0, "reset pushed the deadline out");
		advance_time(Duration::from_millis(40));
		assert_eq!(fired.get(), 1);

		timeout.reset();
		timeout.clear();
		advance_time(Duration::from_millis(500));
		assert_eq!(fired.get(), 1);
	}

	#[test]
	#[serial]
	fn test_unmount_clears_timeout() {
		reset();
		let (fired, bump) = counter();
		let (scope, _timeout) = mount(|| use_timeout(bump, Duration::from_millis(100)));
		assert_eq!(pending_timers(), 1);

		scope.dispose();
		assert_eq!(pending_timers(), 0);
		advance_time(Duration::from_millis(200));
		assert_eq!(fired.get(), 0);
	}

	#[test]
	#[serial]
	fn test_debounce_waits_for_quiet_period() {
		reset();
		let (fired, bump) = counter();
		let text = Signal::new(String::new());
		let (_scope, ()) = mount({
			let text = text.clone();
			move || use_debounce(bump, Duration::from_millis(300), move || text.get())
		});

		advance_time(Duration::from_millis(1000));
		assert_eq!(fired.get(), 0, "mount values never fire");

		for ch in ["h", "he", "hel"] {
			text.set(ch.to_string());
			flush();
			advance_time(Duration::from_millis(200));
		}
		assert_eq!(fired.get(), 0);

		advance_time(Duration::from_millis(100));
		assert_eq!(fired.get(), 1);
	}

	#[test]
	#[serial]
	fn test_debounce_equal_write_keeps_deadline() {
		reset();
		let (fired, bump) = counter();
		let text = Signal::new(String::new());
		let (_scope, ()) = mount({
			let text = text.clone();
			move || use_debounce(bump, Duration::from_millis(300), move || text.get())
		});

		text.set(String::new());
		flush();
		assert_eq!(pending_timers(), 0, "equal write is not a change");

		text.set("a".to_string());
		flush();
		advance_time(Duration::from_millis(200));
		text.set("a".to_string());
		flush();
		advance_time(Duration::from_millis(100));
		assert_eq!(fired.get(), 1);
	}

	#[test]
	#[serial]
	fn test_debounce_cleared_on_unmount() {
		reset();
		let (fired, bump) = counter();
		let text = Signal::new(0);
		let (scope, ()) = mount({
			let text = text.clone();
			move || use_debounce(bump, Duration::from_millis(300), move || text.get())
		});

		text.set(1);
		flush();
		scope.dispose();
		advance_time(Duration::from_millis(1000));
		assert_eq!(fired.get(), 0);
	}
}
