//! State hook: use_state

use hookshelf_reactive::Signal;

/// Creates a piece of reactive state.
///
/// This is the React-like equivalent of `useState`. It returns the signal and
/// a setter. The signal can be read (and tracked) anywhere; the setter is a
/// plain cloneable closure convenient for handing to event handlers.
///
/// # Example
///
/// ```ignore
/// use hookshelf_hooks::use_state;
///
/// let (count, set_count) = use_state(0);
/// set_count(count.get() + 1);
/// ```
pub fn use_state<T: 'static>(initial: T) -> (Signal<T>, impl Fn(T) + Clone + 'static) {
	let signal = Signal::new(initial);
	let setter = {
		let signal = signal.clone();
		move |value: T| signal.set(value)
	};
	(signal, setter)
}
