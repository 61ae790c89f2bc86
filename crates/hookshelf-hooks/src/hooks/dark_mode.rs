//! use_dark_mode
//!
//! An explicit choice is kept in `localStorage`; without one the system
//! preference decides. The result is mirrored onto `<body>` as a class.

use hookshelf_reactive::{Memo, Signal};

use super::effect::use_effect;
use super::storage::{UseStorage, use_local_storage};
use super::window::use_media_query;
use crate::platform;

/// `localStorage` key holding the explicit choice
pub const DARK_MODE_STORAGE_KEY: &str = "useDarkMode";
/// Media query for the system preference
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";
/// Class toggled on `document.body`
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// Dark mode state
#[derive(Debug, Clone)]
pub struct UseDarkMode {
	/// Explicit choice, if the user made one
	pub stored: UseStorage<bool>,
	/// Whether the system prefers a dark color scheme
	pub prefers_dark: Signal<bool>,
	enabled: Memo<bool>,
}

impl UseDarkMode {
	/// Whether dark mode is on (tracked)
	pub fn enabled(&self) -> bool {
		self.enabled.get()
	}

	/// Stores an explicit choice, or clears it with `None` to follow the system.
	pub fn set(&self, enabled: Option<bool>) {
		match enabled {
			Some(enabled) => self.stored.set(enabled),
			None => self.stored.remove(),
		}
	}

	/// Stores the opposite of the current state as an explicit choice.
	pub fn toggle(&self) {
		self.stored.set(!self.enabled.get_untracked());
	}
}

/// Dark mode that follows the system until the user picks a side.
pub fn use_dark_mode() -> UseDarkMode {
	let stored = use_local_storage::<bool>(DARK_MODE_STORAGE_KEY, None);
	let prefers_dark = use_media_query(PREFERS_DARK_QUERY);
	let enabled = Memo::new({
		let stored = stored.value.clone();
		let prefers_dark = prefers_dark.clone();
		move || stored.get().unwrap_or_else(|| prefers_dark.get())
	});

	use_effect({
		let enabled = enabled.clone();
		move || {
			let on = enabled.get();
			if let Err(err) = platform::set_body_class(DARK_MODE_CLASS, on) {
				crate::warn_log!("use_dark_mode: cannot update body class: {}", err);
			}
		}
	});

	UseDarkMode {
		stored,
		prefers_dark,
		enabled,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mount;
	use crate::testing::{body_has_class, flush, reset, set_media_query, set_storage, storage_snapshot};
	use crate::StorageArea;
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_follows_system_preference_without_choice() {
		reset();
		let (_scope, dark) = mount(use_dark_mode);
		flush();
		assert!(!dark.enabled());
		assert!(!body_has_class(DARK_MODE_CLASS));

		set_media_query(PREFERS_DARK_QUERY, true);
		assert!(dark.enabled());
		assert!(body_has_class(DARK_MODE_CLASS));
	}

	#[test]
	#[serial]
	fn test_explicit_choice_wins_and_persists() {
		reset();
		set_media_query(PREFERS_DARK_QUERY, true);
		let (_scope, dark) = mount(use_dark_mode);

		dark.toggle();
		flush();
		assert!(!dark.enabled());
		assert!(!body_has_class(DARK_MODE_CLASS));
		assert_eq!(
			storage_snapshot(StorageArea::Local).get(DARK_MODE_STORAGE_KEY).map(String::as_str),
			Some("false")
		);

		dark.set(None);
		flush();
		assert!(dark.enabled());
		assert!(!storage_snapshot(StorageArea::Local).contains_key(DARK_MODE_STORAGE_KEY));
	}

	#[test]
	#[serial]
	fn test_stored_choice_read_on_mount() {
		reset();
		set_storage(StorageArea::Local, DARK_MODE_STORAGE_KEY, "true");
		let (_scope, dark) = mount(use_dark_mode);
		flush();

		assert!(dark.enabled());
		assert!(body_has_class(DARK_MODE_CLASS));
	}
}
