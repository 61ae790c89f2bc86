//! Scope - ownership of effects and teardown callbacks
//!
//! A `Scope` stands for the lifetime of one mounted component. Hooks register
//! their teardown with [`on_cleanup`] while the scope is active, and disposing
//! the scope (unmount) runs those callbacks in reverse registration order.
//!
//! Effects open a fresh scope for every run, so cleanups registered inside an
//! effect body run before that effect runs again.
//!
//! ## Example
//!
//! ```ignore
//! use hookshelf_reactive::{mount, on_cleanup};
//!
//! let (scope, ()) = mount(|| {
//!     on_cleanup(|| println!("unmounted"));
//! });
//!
//! scope.dispose(); // prints "unmounted"
//! ```

use core::cell::{Cell, RefCell};
use core::fmt;
use std::rc::Rc;

type CleanupFn = Box<dyn FnOnce()>;

struct ScopeInner {
	cleanups: RefCell<Vec<CleanupFn>>,
	disposed: Cell<bool>,
}

/// An ownership region whose disposal runs registered cleanups
#[derive(Clone)]
pub struct Scope {
	inner: Rc<ScopeInner>,
}

thread_local! {
	static SCOPE_STACK: RefCell<Vec<Scope>> = const { RefCell::new(Vec::new()) };
}

impl Scope {
	/// Creates an empty, active scope.
	pub fn new() -> Self {
		Self {
			inner: Rc::new(ScopeInner {
				cleanups: RefCell::new(Vec::new()),
				disposed: Cell::new(false),
			}),
		}
	}

	/// Runs `f` with this scope as the innermost owner.
	pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
		SCOPE_STACK.with(|stack| stack.borrow_mut().push(self.clone()));
		let result = f();
		SCOPE_STACK.with(|stack| {
			stack.borrow_mut().pop();
		});
		result
	}

	/// Registers a cleanup on this scope.
	///
	/// If the scope is already disposed the cleanup runs immediately.
	pub fn add_cleanup(&self, f: impl FnOnce() + 'static) {
		if self.inner.disposed.get() {
			f();
			return;
		}
		self.inner.cleanups.borrow_mut().push(Box::new(f));
	}

	/// Disposes the scope, running cleanups newest first.
	///
	/// Disposing twice is a no-op.
	pub fn dispose(&self) {
		if self.inner.disposed.replace(true) {
			return;
		}
		let cleanups = core::mem::take(&mut *self.inner.cleanups.borrow_mut());
		for cleanup in cleanups.into_iter().rev() {
			cleanup();
		}
	}

	/// Whether [`Scope::dispose`] has been called
	pub fn is_disposed(&self) -> bool {
		self.inner.disposed.get()
	}

	/// Number of cleanups waiting to run (for testing)
	pub fn cleanup_count(&self) -> usize {
		self.inner.cleanups.borrow().len()
	}

	/// The innermost active scope, if any
	pub fn current() -> Option<Scope> {
		SCOPE_STACK
			.try_with(|stack| stack.borrow().last().cloned())
			.ok()
			.flatten()
	}
}

impl Default for Scope {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Scope")
			.field("cleanups", &self.inner.cleanups.borrow().len())
			.field("disposed", &self.inner.disposed.get())
			.finish()
	}
}

/// Registers `f` to run when the innermost active scope is disposed.
///
/// Outside any scope there is nothing that will ever dispose the callback, so
/// it is leaked: whatever it keeps alive (listeners, timers) stays registered.
pub fn on_cleanup(f: impl FnOnce() + 'static) {
	match Scope::current() {
		Some(scope) => scope.add_cleanup(f),
		None => {
			tracing::warn!("on_cleanup called outside of a scope; teardown will never run");
			core::mem::forget(f);
		}
	}
}

/// Keeps `value` alive until the innermost active scope is disposed.
pub fn own<T: 'static>(value: T) {
	on_cleanup(move || drop(value));
}

/// Mounts a component: runs `setup` inside a new scope and returns both.
///
/// Disposing the returned scope is the unmount.
pub fn mount<R>(setup: impl FnOnce() -> R) -> (Scope, R) {
	let scope = Scope::new();
	let result = scope.run(setup);
	(scope, result)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_cleanups_run_in_reverse_order() {
		let order = Rc::new(RefCell::new(Vec::new()));

		let (scope, ()) = mount(|| {
			for i in 0..3 {
				let order = order.clone();
				on_cleanup(move || order.borrow_mut().push(i));
			}
		});

		assert_eq!(scope.cleanup_count(), 3);
		scope.dispose();
		assert_eq!(*order.borrow(), vec![2, 1, 0]);
	}

	#[rstest]
	fn test_dispose_is_idempotent() {
		let runs = Rc::new(Cell::new(0));
		let (scope, ()) = mount({
			let runs = runs.clone();
			move || on_cleanup(move || runs.set(runs.get() + 1))
		});

		scope.dispose();
		scope.dispose();
		assert_eq!(runs.get(), 1);
		assert!(scope.is_disposed());
	}

	#[rstest]
	fn test_nested_scope_is_innermost_owner() {
		let outer_ran = Rc::new(Cell::new(false));
		let inner_ran = Rc::new(Cell::new(false));
		let inner = Scope::new();

		let (outer, ()) = mount({
			let outer_ran = outer_ran.clone();
			let inner_ran = inner_ran.clone();
			let inner = inner.clone();
			move || {
				inner.run(move || on_cleanup(move || inner_ran.set(true)));
				on_cleanup(move || outer_ran.set(true));
			}
		});

		inner.dispose();
		assert!(inner_ran.get());
		assert!(!outer_ran.get());

		outer.dispose();
		assert!(outer_ran.get());
	}

	#[rstest]
	fn test_cleanup_added_after_dispose_runs_immediately() {
		let scope = Scope::new();
		scope.dispose();

		let ran = Rc::new(Cell::new(false));
		let flag = ran.clone();
		scope.add_cleanup(move || flag.set(true));
		assert!(ran.get());
	}

	#[rstest]
	fn test_own_drops_value_on_dispose() {
		let tracker = Rc::new(());
		let (scope, ()) = mount({
			let tracker = tracker.clone();
			move || own(tracker)
		});

		assert_eq!(Rc::strong_count(&tracker), 2);
		scope.dispose();
		assert_eq!(Rc::strong_count(&tracker), 1);
	}

	#[rstest]
	fn test_on_cleanup_outside_scope_is_leaked() {
		let tracker = Rc::new(());
		assert!(Scope::current().is_none());

		let held = tracker.clone();
		on_cleanup(move || drop(held));

		assert_eq!(Rc::strong_count(&tracker), 2);
	}
}
