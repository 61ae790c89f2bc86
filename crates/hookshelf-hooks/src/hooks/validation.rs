//! use_state_with_validation

use hookshelf_reactive::Signal;

use crate::callback::Callback;

/// State paired with the result of validating it
#[derive(Debug, Clone)]
pub struct UseStateWithValidation<T: 'static> {
	/// Current value
	pub value: Signal<T>,
	/// Whether `value` passed the validator
	pub is_valid: Signal<bool>,
	validator: Callback<T, bool>,
}

impl<T: Clone + 'static> UseStateWithValidation<T> {
	/// Sets the value and re-validates it.
	pub fn set(&self, value: T) {
		self.is_valid.set(self.validator.call(value.clone()));
		self.value.set(value);
	}

	/// Derives the next value from the current one, then re-validates.
	pub fn update(&self, f: impl FnOnce(&T) -> T) {
		let next = self.value.with_untracked(f);
		self.set(next);
	}
}

/// Creates state whose validity is recomputed on every write.
///
/// # Example
///
/// ```ignore
/// let username = use_state_with_validation(|name: String| name.len() > 5, String::new());
/// username.set("kyle".into());
/// assert!(!username.is_valid.get());
/// ```
pub fn use_state_with_validation<T, V>(validator: V, initial: T) -> UseStateWithValidation<T>
where
	T: Clone + 'static,
	V: Fn(T) -> bool + 'static,
{
	let validator = Callback::new(validator);
	UseStateWithValidation {
		is_valid: Signal::new(validator.call(initial.clone())),
		value: Signal::new(initial),
		validator,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("", false)]
	#[case("kyle", false)]
	#[case("kyle_cook", true)]
	fn test_validates_on_set(#[case] input: &str, #[case] expected: bool) {
		let name = use_state_with_validation(|name: String| name.len() > 5, "initial".to_string());
		assert!(name.is_valid.get_untracked());

		name.set(input.to_string());
		assert_eq!(name.value.get_untracked(), input);
		assert_eq!(name.is_valid.get_untracked(), expected);
	}

	#[rstest]
	fn test_update_uses_current_value() {
		let even = use_state_with_validation(|n: i32| n % 2 == 0, 1);
		assert!(!even.is_valid.get_untracked());

		even.update(|n| n + 1);
		assert_eq!(even.value.get_untracked(), 2);
		assert!(even.is_valid.get_untracked());
	}
}
