//! Drivers for the in-memory browser (native targets only)
//!
//! Hooks mounted on a native target talk to a simulated browser. The functions
//! here play the part of the user and the environment: they fire events, move
//! the virtual clock, change the window and answer pending requests. Every
//! driver finishes with [`flush`], so passive effects and spawned tasks have
//! settled by the time it returns.
//!
//! ## Example
//!
//! ```ignore
//! use hookshelf_hooks::{mount, testing, use_window_size};
//!
//! let (_scope, size) = mount(use_window_size);
//! testing::set_window_size(320.0, 640.0);
//! assert_eq!(size.get().width, 320.0);
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use hookshelf_reactive::with_runtime;

use crate::error::HookError;
use crate::hooks::fetch::FetchOptions;
use crate::platform::{
	self, Element, FetchResponse, Position, Rect, StorageArea, Target, WindowSize, native,
};

const MAX_SETTLE_PASSES: usize = 100;

/// Restores the browser to its initial state.
///
/// Listeners, timers, storage, cookies and canned responses are all dropped.
pub fn reset() {
	native::reset();
	flush();
}

/// Runs pending passive effects and spawned tasks until both are idle.
pub fn flush() {
	for _ in 0..MAX_SETTLE_PASSES {
		with_runtime(|rt| rt.flush_updates_enhanced());
		native::run_tasks_until_stalled();
		if !with_runtime(|rt| rt.has_pending_updates()) {
			return;
		}
	}
	crate::warn_log!("testing::flush gave up after {} passes", MAX_SETTLE_PASSES);
}

/// Moves the virtual clock forward, firing every timeout that falls due.
///
/// Timeouts fire in deadline order. A timeout scheduled by another timeout
/// also fires if its deadline is within the window.
pub fn advance_time(duration: Duration) {
	let target = native::now_ms() + duration.as_secs_f64() * 1000.0;
	while let Some(callback) = native::take_due_timer(target) {
		callback();
		flush();
	}
	native::set_now(target);
	flush();
}

/// Current time on the virtual clock, in milliseconds
pub fn now() -> f64 {
	native::now_ms()
}

/// Number of timeouts that have not fired or been cleared
pub fn pending_timers() -> usize {
	native::pending_timer_count()
}

/// Number of registered event listeners across all targets
pub fn listener_count() -> usize {
	native::listener_count()
}

/// Dispatches an event of type `event` to `target`.
pub fn dispatch(target: impl Into<Target>, event: &str) {
	native::dispatch(&target.into(), event);
	flush();
}

/// Dispatches a `click` to `element`.
pub fn click(element: &Element) {
	dispatch(element, "click");
}

/// Resizes the window and fires `resize`.
pub fn set_window_size(width: f64, height: f64) {
	native::set_window_size(WindowSize { width, height });
	dispatch(Target::Window, "resize");
}

/// Flips `navigator.onLine` and fires `online` or `offline`.
pub fn set_online(online: bool) {
	native::set_online(online);
	dispatch(Target::Window, if online { "online" } else { "offline" });
}

/// Sets whether `query` matches and fires `change` if that is new.
pub fn set_media_query(query: &str, matches: bool) {
	native::set_media_query(query, matches);
	flush();
}

/// Reports a new position to every geolocation watcher.
pub fn set_position(position: Position) {
	native::set_position(position);
	flush();
}

/// Reports a `GeolocationPositionError` to every geolocation watcher.
pub fn fail_geolocation(code: u16, message: &str) {
	native::fail_geolocation(HookError::Geolocation {
		code,
		message: message.to_string(),
	});
	flush();
}

/// Removes (or restores) `navigator.geolocation`.
pub fn set_geolocation_available(available: bool) {
	native::set_geolocation_available(available);
}

/// Reports an intersection change for `element`.
pub fn set_intersecting(element: &Element, intersecting: bool) {
	native::set_intersecting(element, intersecting);
	flush();
}

/// Gives `element` a new bounding box and notifies its resize observers.
pub fn resize_element(element: &Element, rect: Rect) {
	native::resize_element(element, rect);
	flush();
}

/// Fires `load` (or `error` when `loaded` is false) on every pending
/// `<script>` for `url`.
pub fn finish_script(url: &str, loaded: bool) {
	native::finish_script(url, loaded);
	flush();
}

/// `src` of every `<script>` appended so far, in order
pub fn appended_scripts() -> Vec<String> {
	native::appended_scripts()
}

/// Answers requests to `url` with `status` and `body`.
pub fn mock_fetch(url: &str, status: u16, body: &str) {
	native::mock_fetch(
		url,
		FetchResponse {
			status,
			body: body.to_string(),
		},
	);
}

/// Every request made so far, in order
pub fn requests() -> Vec<(String, FetchOptions)> {
	native::requests()
}

/// Makes clipboard writes fail with a permission error.
pub fn deny_clipboard(denied: bool) {
	native::deny_clipboard(denied);
}

/// Last text written to the clipboard
pub fn clipboard_text() -> Option<String> {
	native::clipboard_text()
}

/// Makes every storage write fail as if the quota were exceeded.
pub fn fail_storage_writes(fail: bool) {
	native::fail_storage_writes(fail);
}

/// Seeds a storage entry without going through a hook.
pub fn set_storage(area: StorageArea, key: &str, value: &str) {
	if let Err(err) = platform::storage_set(area, key, value) {
		crate::warn_log!("testing::set_storage({}): {}", key, err);
	}
}

/// Copy of every key/value pair in `area`
pub fn storage_snapshot(area: StorageArea) -> BTreeMap<String, String> {
	native::storage_snapshot(area)
}

/// Whether `document.body` has `class`
pub fn body_has_class(class: &str) -> bool {
	platform::body().is_some_and(|body| body.has_class(class))
}

/// Every live cookie, decoded name to raw value
pub fn cookie_jar() -> BTreeMap<String, String> {
	native::cookie_jar()
}
