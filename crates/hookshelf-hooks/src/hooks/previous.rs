//! use_previous

use core::cell::RefCell;
use std::rc::Rc;

use hookshelf_reactive::Signal;

use super::effect::use_layout_effect;

/// Tracks the value `source` held before its latest change.
///
/// `None` until `source` changes for the first time. Writing a value equal to
/// the current one is not a change.
///
/// # Example
///
/// ```ignore
/// let (count, set_count) = use_state(0);
/// let previous = use_previous(&count);
/// set_count(1);
/// assert_eq!(previous.get(), Some(0));
/// ```
pub fn use_previous<T>(source: &Signal<T>) -> Signal<Option<T>>
where
	T: Clone + PartialEq + 'static,
{
	let previous = Signal::new(None);
	let current = Rc::new(RefCell::new(source.get_untracked()));

	use_layout_effect({
		let source = source.clone();
		let previous = previous.clone();
		move || {
			let value = source.get();
			if *current.borrow() == value {
				return;
			}
			let old = current.replace(value);
			previous.set(Some(old));
		}
	});

	previous
}
