//! Memoization hooks: use_memo and use_callback

use hookshelf_reactive::Memo;

use crate::callback::Callback;

/// Memoizes a computed value.
///
/// This is the React-like equivalent of `useMemo`. Dependencies are tracked
/// automatically: the value is recomputed on the first read after any signal
/// read by `f` changes.
///
/// # Example
///
/// ```ignore
/// use hookshelf_hooks::{use_memo, use_state};
///
/// let (items, _) = use_state(vec![1, 2, 3, 4, 5]);
/// let total = use_memo({
///     let items = items.clone();
///     move || items.get().iter().sum::<i32>()
/// });
/// ```
pub fn use_memo<T, F>(f: F) -> Memo<T>
where
	T: Clone + 'static,
	F: FnMut() -> T + 'static,
{
	Memo::new(f)
}

/// Wraps a function in a [`Callback`] that stays the same for the lifetime of
/// the component.
///
/// This is the React-like equivalent of `useCallback`. Since hooks run once
/// per mount, there is no dependency list: the callback reads whatever
/// signals it needs when it is called.
pub fn use_callback<Args, Ret, F>(f: F) -> Callback<Args, Ret>
where
	F: Fn(Args) -> Ret + 'static,
{
	Callback::new(f)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::use_state;

	#[test]
	fn test_memo_follows_state() {
		let (count, set_count) = use_state(2);
		let squared = use_memo({
			let count = count.clone();
			move || count.get() * count.get()
		});

		assert_eq!(squared.get_untracked(), 4);
		set_count(3);
		assert_eq!(squared.get_untracked(), 9);
	}

	#[test]
	fn test_callback_reads_latest_state() {
		let (count, set_count) = use_state(0);
		let describe = use_callback({
			let count = count.clone();
			move |prefix: String| format!("{prefix}{}", count.get_untracked())
		});

		set_count(5);
		assert_eq!(describe.call("count=".to_string()), "count=5");
	}
}
