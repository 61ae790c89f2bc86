//! use_array

use hookshelf_reactive::Signal;

/// A reactive `Vec<T>` with array helpers
///
/// Every helper replaces the value and notifies dependents once.
/// `update` and `remove` with an index past the end do nothing.
#[derive(Debug, Clone)]
pub struct UseArray<T: 'static> {
	/// Current elements
	pub value: Signal<Vec<T>>,
}

impl<T: Clone + 'static> UseArray<T> {
	/// Current elements (tracked)
	pub fn get(&self) -> Vec<T> {
		self.value.get()
	}

	/// Replaces every element.
	pub fn set(&self, elements: Vec<T>) {
		self.value.set(elements);
	}

	/// Appends an element.
	pub fn push(&self, element: T) {
		self.value.update(|items| items.push(element));
	}

	/// Keeps only the elements for which `predicate` returns true.
	pub fn filter(&self, predicate: impl Fn(&T) -> bool) {
		self.value.update(|items| items.retain(|item| predicate(item)));
	}

	/// Replaces the element at `index`.
	pub fn update(&self, index: usize, element: T) {
		if index >= self.value.with_untracked(Vec::len) {
			return;
		}
		self.value.update(|items| items[index] = element);
	}

	/// Removes the element at `index`.
	pub fn remove(&self, index: usize) {
		if index >= self.value.with_untracked(Vec::len) {
			return;
		}
		self.value.update(|items| {
			items.remove(index);
		});
	}

	/// Removes every element.
	pub fn clear(&self) {
		self.value.set(Vec::new());
	}
}

/// Creates an array state seeded with `default`.
pub fn use_array<T: Clone + 'static>(default: Vec<T>) -> UseArray<T> {
	UseArray {
		value: Signal::new(default),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn numbers() -> UseArray<i32> {
		use_array(vec![1, 2, 3, 4, 5, 6])
	}

	#[rstest]
	fn test_push_and_filter() {
		let array = numbers();
		array.push(7);
		array.filter(|n| n % 2 == 0);
		assert_eq!(array.value.get_untracked(), vec![2, 4, 6]);
	}

	#[rstest]
	#[case(1, Some(9), vec![1, 9, 3, 4, 5, 6])]
	#[case(6, Some(9), vec![1, 2, 3, 4, 5, 6])]
	#[case(0, None, vec![2, 3, 4, 5, 6])]
	#[case(42, None, vec![1, 2, 3, 4, 5, 6])]
	fn test_update_and_remove_by_index(
		#[case] index: usize,
		#[case] replacement: Option<i32>,
		#[case] expected: Vec<i32>,
	) {
		let array = numbers();
		match replacement {
			Some(value) => array.update(index, value),
			None => array.remove(index),
		}
		assert_eq!(array.value.get_untracked(), expected);
	}

	#[rstest]
	fn test_set_and_clear() {
		let array = numbers();
		array.set(vec![10]);
		assert_eq!(array.value.get_untracked(), vec![10]);
		array.clear();
		assert!(array.value.get_untracked().is_empty());
	}
}
