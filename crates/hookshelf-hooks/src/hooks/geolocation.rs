//! use_geolocation

use hookshelf_reactive::{Signal, own};

use crate::error::HookError;
use crate::platform::{self, Position};

/// Options passed to `watchPosition`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeolocationOptions {
	/// Ask for the most accurate fix available
	pub enable_high_accuracy: bool,
	/// Accept a cached fix at most this old, in milliseconds
	pub maximum_age: Option<u32>,
	/// Give up on a fix after this long, in milliseconds
	pub timeout: Option<u32>,
}

impl GeolocationOptions {
	/// Requests (or stops requesting) a high accuracy fix.
	pub fn enable_high_accuracy(mut self, enabled: bool) -> Self {
		self.enable_high_accuracy = enabled;
		self
	}

	/// Sets the maximum age of a cached fix, in milliseconds.
	pub fn maximum_age(mut self, millis: u32) -> Self {
		self.maximum_age = Some(millis);
		self
	}

	/// Sets the fix timeout, in milliseconds.
	pub fn timeout(mut self, millis: u32) -> Self {
		self.timeout = Some(millis);
		self
	}
}

/// Position watch state
#[derive(Debug, Clone)]
pub struct UseGeolocation {
	/// `true` until the first fix or error
	pub loading: Signal<bool>,
	/// Latest error, cleared by the next fix
	pub error: Signal<Option<HookError>>,
	/// Latest fix
	pub data: Signal<Option<Position>>,
}

/// Watches the device position until unmount.
pub fn use_geolocation(options: GeolocationOptions) -> UseGeolocation {
	let state = UseGeolocation {
		loading: Signal::new(true),
		error: Signal::new(None),
		data: Signal::new(None),
	};

	let on_position = {
		let state = state.clone();
		move |position| {
			state.loading.set(false);
			state.error.set(None);
			state.data.set(Some(position));
		}
	};
	let on_error = {
		let state = state.clone();
		move |error| {
			state.error.set(Some(error));
			state.loading.set(false);
		}
	};

	match platform::watch_position(&options, on_position, on_error) {
		Ok(watch) => own(watch),
		Err(err) => {
			crate::warn_log!("use_geolocation: {}", err);
			state.error.set(Some(err));
			state.loading.set(false);
		}
	}

	state
}
