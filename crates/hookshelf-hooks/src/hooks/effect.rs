//! Effect hooks: use_effect, use_layout_effect and their variants
//!
//! These hooks provide React-like side effect management built on top of
//! [`Effect`]. Every effect created here is owned by the surrounding scope and
//! disposed on unmount.
//!
//! Hooks that take a `deps` closure re-run when the value it returns differs
//! from the previous one. Signals read inside `deps` are tracked; signals read
//! by the callback itself are not.

use core::cell::RefCell;
use std::rc::Rc;

use hookshelf_reactive::{Effect, EffectTiming, Scope, on_cleanup, own, untrack};

/// Runs a side effect with automatic dependency tracking.
///
/// This is the React-like equivalent of `useEffect`. The effect runs once
/// immediately and again after every change to a signal it read. Cleanups
/// registered with [`on_cleanup`](crate::on_cleanup) inside the effect run
/// before the next run and on unmount.
///
/// # Example
///
/// ```ignore
/// use hookshelf_hooks::{on_cleanup, use_effect, use_state};
///
/// let (count, _) = use_state(0);
/// use_effect(move || {
///     let current = count.get();
///     on_cleanup(move || println!("leaving {current}"));
/// });
/// ```
pub fn use_effect<F>(f: F)
where
	F: FnMut() + 'static,
{
	own(Effect::new(f));
}

/// Runs a side effect synchronously whenever a dependency changes.
///
/// This is the React-like equivalent of `useLayoutEffect`. Use it when the
/// effect must observe every intermediate value rather than waiting for the
/// next flush.
pub fn use_layout_effect<F>(f: F)
where
	F: FnMut() + 'static,
{
	own(Effect::new_with_timing(f, EffectTiming::Layout));
}

/// Runs `callback` whenever `deps` changes, but not on mount.
///
/// # Example
///
/// ```ignore
/// use_update_effect(
///     move || alert(&format!("count changed to {}", count.get_untracked())),
///     move || count.get(),
/// );
/// ```
pub fn use_update_effect<D, F, C>(mut callback: F, deps: D)
where
	F: FnMut() + 'static,
	D: Fn() -> C + 'static,
	C: PartialEq + 'static,
{
	use_changed_effect(deps, move |on_mount| {
		if !on_mount {
			callback();
		}
	});
}

/// Runs `callback` exactly once, on mount.
///
/// Cleanups registered by the callback run on unmount.
pub fn use_effect_once<F>(callback: F)
where
	F: FnOnce() + 'static,
{
	let mut callback = Some(callback);
	use_effect(move || {
		if let Some(callback) = callback.take() {
			untrack(callback);
		}
	});
}

/// Runs `callback` on mount and whenever the value returned by `deps`
/// changes by value.
///
/// Unlike [`use_effect`], a dependency signal being set to an equal value
/// does not re-run the callback. Cleanups registered by the callback run
/// before the next callback run and on unmount.
pub fn use_deep_compare_effect<D, F, C>(mut callback: F, deps: D)
where
	F: FnMut() + 'static,
	D: Fn() -> C + 'static,
	C: PartialEq + 'static,
{
	use_changed_effect(deps, move |_| callback());
}

/// Calls `on_change(on_mount)` on mount and whenever `deps` returns a value
/// unequal to the previous one.
///
/// Only `deps` is tracked. Cleanups registered by `on_change` run before its
/// next call and on unmount, so an equal write leaves them in place.
pub(crate) fn use_changed_effect<D, F, C>(deps: D, mut on_change: F)
where
	F: FnMut(bool) + 'static,
	D: Fn() -> C + 'static,
	C: PartialEq + 'static,
{
	let previous: Rc<RefCell<Option<C>>> = Rc::new(RefCell::new(None));
	let callback_scope: Rc<RefCell<Option<Scope>>> = Rc::new(RefCell::new(None));

	on_cleanup({
		let callback_scope = callback_scope.clone();
		move || {
			let last = callback_scope.borrow_mut().take();
			if let Some(scope) = last {
				scope.dispose();
			}
		}
	});

	use_effect(move || {
		let current = deps();
		let on_mount = previous.borrow().is_none();
		if previous.borrow().as_ref() == Some(&current) {
			return;
		}
		*previous.borrow_mut() = Some(current);

		let stale = callback_scope.borrow_mut().take();
		if let Some(scope) = stale {
			scope.dispose();
		}
		let scope = Scope::new();
		untrack(|| scope.run(|| on_change(on_mount)));
		*callback_scope.borrow_mut() = Some(scope);
	});
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{flush, reset};
	use crate::{Signal, mount};
	use core::cell::Cell;
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_use_effect_reruns_and_cleans_up() {
		reset();
		let count = Signal::new(0);
		let log = Rc::new(RefCell::new(Vec::new()));

		let (scope, ()) = mount({
			let count = count.clone();
			let log = log.clone();
			move || {
				use_effect(move || {
					let value = count.get();
					log.borrow_mut().push(format!("run {value}"));
					let log = log.clone();
					on_cleanup(move || log.borrow_mut().push(format!("cleanup {value}")));
				})
			}
		});

		count.set(1);
		flush();
		scope.dispose();
		count.set(2);
		flush();

		assert_eq!(
			*log.borrow(),
			vec!["run 0", "cleanup 0", "run 1", "cleanup 1"]
		);
	}

	#[test]
	#[serial]
	fn test_use_update_effect_skips_mount() {
		reset();
		let count = Signal::new(0);
		let calls = Rc::new(Cell::new(0));

		let (_scope, ()) = mount({
			let count = count.clone();
			let calls = calls.clone();
			move || {
				use_update_effect(move || calls.set(calls.get() + 1), move || count.get())
			}
		});
		assert_eq!(calls.get(), 0);

		count.set(1);
		flush();
		assert_eq!(calls.get(), 1);

		count.set(2);
		flush();
		assert_eq!(calls.get(), 2);
	}

	#[test]
	#[serial]
	fn test_use_update_effect_ignores_equal_write() {
		reset();
		let (count, set_count) = crate::use_state(0);
		let calls = Rc::new(Cell::new(0));

		let (_scope, ()) = mount({
			let count = count.clone();
			let calls = calls.clone();
			move || {
				use_update_effect(move || calls.set(calls.get() + 1), move || count.get())
			}
		});

		set_count(0);
		flush();
		assert_eq!(calls.get(), 0);

		set_count(3);
		flush();
		set_count(3);
		flush();
		assert_eq!(calls.get(), 1);
	}

	#[test]
	#[serial]
	fn test_use_effect_once_runs_once_and_cleans_up_on_unmount() {
		reset();
		let trigger = Signal::new(0);
		let runs = Rc::new(Cell::new(0));
		let cleaned = Rc::new(Cell::new(false));

		let (scope, ()) = mount({
			let trigger = trigger.clone();
			let runs = runs.clone();
			let cleaned = cleaned.clone();
			move || {
				use_effect_once(move || {
					let _ = trigger.get();
					runs.set(runs.get() + 1);
					on_cleanup(move || cleaned.set(true));
				})
			}
		});

		trigger.set(1);
		flush();
		assert_eq!(runs.get(), 1);
		assert!(!cleaned.get());

		scope.dispose();
		assert!(cleaned.get());
	}

	#[test]
	#[serial]
	fn test_use_deep_compare_effect_ignores_equal_values() {
		reset();
		let filters = Signal::new(vec!["open".to_string()]);
		let log = Rc::new(RefCell::new(Vec::new()));

		let (scope, ()) = mount({
			let filters = filters.clone();
			let log = log.clone();
			move || {
				use_deep_compare_effect(
					{
						let filters = filters.clone();
						move || {
							let current = filters.get_untracked().join(",");
							log.borrow_mut().push(format!("run {current}"));
							let log = log.clone();
							on_cleanup(move || log.borrow_mut().push(format!("cleanup {current}")));
						}
					},
					move || filters.get(),
				)
			}
		});

		filters.set(vec!["open".to_string()]);
		flush();
		assert_eq!(*log.borrow(), vec!["run open"]);

		filters.set(vec!["closed".to_string()]);
		flush();
		assert_eq!(
			*log.borrow(),
			vec!["run open", "cleanup open", "run closed"]
		);

		scope.dispose();
		assert_eq!(log.borrow().last().map(String::as_str), Some("cleanup closed"));
	}
}
