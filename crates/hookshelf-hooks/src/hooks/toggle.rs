//! use_toggle

use hookshelf_reactive::Signal;

/// Boolean state with a toggle action
#[derive(Debug, Clone)]
pub struct UseToggle {
	/// Current value
	pub value: Signal<bool>,
}

impl UseToggle {
	/// Current value (tracked)
	pub fn get(&self) -> bool {
		self.value.get()
	}

	/// Flips the value.
	pub fn toggle(&self) {
		self.value.update(|value| *value = !*value);
	}

	/// Sets the value explicitly.
	pub fn set(&self, value: bool) {
		self.value.set(value);
	}
}

/// Creates a boolean that can be flipped or set.
pub fn use_toggle(default: bool) -> UseToggle {
	UseToggle {
		value: Signal::new(default),
	}
}
