//! use_state_with_history

use hookshelf_reactive::Signal;

/// Default number of entries kept by [`use_state_with_history`]
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// State that remembers its previous values
///
/// `history` holds at most `capacity` entries, oldest first, and `pointer`
/// is the index of the entry `value` currently shows.
#[derive(Debug, Clone)]
pub struct UseStateWithHistory<T: 'static> {
	/// Current value
	pub value: Signal<T>,
	/// Recorded values, oldest first
	pub history: Signal<Vec<T>>,
	/// Index into `history` of the current value
	pub pointer: Signal<usize>,
	capacity: usize,
}

impl<T: Clone + PartialEq + 'static> UseStateWithHistory<T> {
	/// Current value (tracked)
	pub fn get(&self) -> T {
		self.value.get()
	}

	/// Sets a new value and records it.
	///
	/// Entries after the pointer are discarded first. A value equal to the
	/// current entry is not recorded again.
	pub fn set(&self, value: T) {
		let pointer = self.pointer.get_untracked();
		let unchanged = self
			.history
			.with_untracked(|history| history.get(pointer) == Some(&value));
		if !unchanged {
			let capacity = self.capacity.max(1);
			let mut history = self.history.get_untracked();
			history.truncate(pointer + 1);
			history.push(value.clone());
			if history.len() > capacity {
				history.drain(..history.len() - capacity);
			}
			let last = history.len() - 1;
			self.history.set(history);
			self.pointer.set(last);
		}
		self.value.set(value);
	}

	/// Steps one entry back. Does nothing at the oldest entry.
	pub fn back(&self) {
		let pointer = self.pointer.get_untracked();
		if pointer == 0 {
			return;
		}
		self.go(pointer - 1);
	}

	/// Steps one entry forward. Does nothing at the newest entry.
	pub fn forward(&self) {
		self.go(self.pointer.get_untracked() + 1);
	}

	/// Jumps to the entry at `index`. Out-of-range indices are ignored.
	pub fn go(&self, index: usize) {
		let Some(value) = self.history.with_untracked(|history| history.get(index).cloned()) else {
			return;
		};
		self.pointer.set(index);
		self.value.set(value);
	}
}

/// Creates state that records up to `capacity` past values.
///
/// Pass `None` for the default capacity of [`DEFAULT_HISTORY_CAPACITY`].
pub fn use_state_with_history<T>(
	default: T,
	capacity: Option<usize>,
) -> UseStateWithHistory<T>
where
	T: Clone + PartialEq + 'static,
{
	UseStateWithHistory {
		value: Signal::new(default.clone()),
		history: Signal::new(vec![default]),
		pointer: Signal::new(0),
		capacity: capacity.unwrap_or(DEFAULT_HISTORY_CAPACITY),
	}
}
