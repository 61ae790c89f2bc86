//! Window hooks: use_window_size, use_media_query and use_online_status

use hookshelf_reactive::{Signal, own};

use super::event_listener::use_event_listener;
use crate::platform::{self, Target, WindowSize};

/// Inner size of the window, updated on every `resize`.
pub fn use_window_size() -> Signal<WindowSize> {
	let size = Signal::new(platform::window_size());
	use_event_listener(
		"resize",
		{
			let size = size.clone();
			move |_| size.set(platform::window_size())
		},
		Target::Window,
	);
	size
}

/// Whether the CSS media query `query` currently matches.
///
/// # Example
///
/// ```ignore
/// let is_large = use_media_query("(min-width: 200px)");
/// ```
pub fn use_media_query(query: &str) -> Signal<bool> {
	let matches = Signal::new(false);
	let list = match platform::match_media(query) {
		Ok(list) => list,
		Err(err) => {
			crate::warn_log!("use_media_query: cannot evaluate {}: {}", query, err);
			return matches;
		}
	};
	matches.set(list.matches());
	let on_change = {
		let matches = matches.clone();
		move |now_matches| matches.set(now_matches)
	};
	match list.on_change(on_change) {
		Ok(listener) => own(listener),
		Err(err) => crate::warn_log!("use_media_query: cannot listen for {}: {}", query, err),
	}
	matches
}

/// `navigator.onLine`, updated on `online` and `offline`.
pub fn use_online_status() -> Signal<bool> {
	let online = Signal::new(platform::is_online());
	for event in ["online", "offline"] {
		let online = online.clone();
		use_event_listener(event, move |_| online.set(platform::is_online()), Target::Window);
	}
	online
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mount;
	use crate::testing::{reset, set_media_query, set_online, set_window_size};
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_window_size_tracks_resize() {
		reset();
		let (scope, size) = mount(use_window_size);
		assert_eq!(size.get_untracked(), WindowSize { width: 1024.0, height: 768.0 });

		set_window_size(375.0, 812.0);
		assert_eq!(size.get_untracked(), WindowSize { width: 375.0, height: 812.0 });

		scope.dispose();
		set_window_size(800.0, 600.0);
		assert_eq!(size.get_untracked().width, 375.0);
	}

	#[test]
	#[serial]
	fn test_media_query_initial_and_change() {
		reset();
		set_media_query("(min-width: 200px)", true);
		let (_scope, (large, print)) =
			mount(|| (use_media_query("(min-width: 200px)"), use_media_query("print")));
		assert!(large.get_untracked());
		assert!(!print.get_untracked());

		set_media_query("(min-width: 200px)", false);
		assert!(!large.get_untracked());
		set_media_query("print", true);
		assert!(print.get_untracked());
	}

	#[test]
	#[serial]
	fn test_online_status() {
		reset();
		let (_scope, online) = mount(use_online_status);
		assert!(online.get_untracked());

		set_online(false);
		assert!(!online.get_untracked());
		set_online(true);
		assert!(online.get_untracked());
	}
}
