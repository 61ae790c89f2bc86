//! use_async
//!
//! Runs a future and exposes its lifecycle as state. There is no cancellation:
//! when `deps` changes while a future is in flight, both results are applied
//! in the order they complete. A dependency set to an equal value does not
//! start a new run.

use std::future::Future;

use hookshelf_reactive::Signal;

use super::effect::use_changed_effect;
use crate::platform;

/// Lifecycle of an asynchronous operation
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncState<T, E> {
	/// The future has not completed yet
	Loading,
	/// The future resolved to `Ok`
	Success(T),
	/// The future resolved to `Err`
	Error(E),
}

impl<T, E> AsyncState<T, E> {
	/// Whether the future is still pending
	pub fn is_loading(&self) -> bool {
		matches!(self, AsyncState::Loading)
	}
}

/// State of the future started by [`use_async`]
#[derive(Debug, Clone)]
pub struct UseAsync<T: 'static, E: 'static> {
	/// Current lifecycle state
	pub state: Signal<AsyncState<T, E>>,
}

impl<T: Clone + 'static, E: Clone + 'static> UseAsync<T, E> {
	/// Whether the latest run is still pending (tracked)
	pub fn loading(&self) -> bool {
		self.state.with(AsyncState::is_loading)
	}

	/// Value of the latest successful run, if the latest run succeeded (tracked)
	pub fn value(&self) -> Option<T> {
		self.state.with(|state| match state {
			AsyncState::Success(value) => Some(value.clone()),
			_ => None,
		})
	}

	/// Error of the latest run, if it failed (tracked)
	pub fn error(&self) -> Option<E> {
		self.state.with(|state| match state {
			AsyncState::Error(error) => Some(error.clone()),
			_ => None,
		})
	}
}

/// Starts `factory()` on mount and again whenever `deps` changes.
///
/// Each run resets the state to [`AsyncState::Loading`] and then settles it
/// with the future's output.
///
/// # Example
///
/// ```ignore
/// let user_id = Signal::new(1);
/// let user = use_async(
///     { let user_id = user_id.clone(); move || load_user(user_id.get_untracked()) },
///     { let user_id = user_id.clone(); move || user_id.get() },
/// );
/// ```
pub fn use_async<T, E, F, Fut, D, C>(factory: F, deps: D) -> UseAsync<T, E>
where
	T: 'static,
	E: 'static,
	F: Fn() -> Fut + 'static,
	Fut: Future<Output = Result<T, E>> + 'static,
	D: Fn() -> C + 'static,
	C: PartialEq + 'static,
{
	let state = Signal::new(AsyncState::Loading);

	use_changed_effect(deps, {
		let state = state.clone();
		move |_| {
			let is_loading = state.with_untracked(AsyncState::is_loading);
			if !is_loading {
				state.set(AsyncState::Loading);
			}
			let future = factory();
			let state = state.clone();
			platform::spawn_local(async move {
				let settled = match future.await {
					Ok(value) => AsyncState::Success(value),
					Err(error) => AsyncState::Error(error),
				};
				state.set(settled);
			});
		}
	});

	UseAsync { state }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mount;
	use crate::testing::{flush, reset};
	use core::cell::{Cell, RefCell};
	use futures::channel::oneshot;
	use serial_test::serial;
	use std::rc::Rc;

	#[test]
	#[serial]
	fn test_resolves_to_success() {
		reset();
		let (_scope, result) = mount(|| use_async(|| async { Ok::<_, String>(42) }, || ()));
		assert!(result.loading());

		flush();
		assert!(!result.loading());
		assert_eq!(result.value(), Some(42));
		assert_eq!(result.error(), None);
	}

	#[test]
	#[serial]
	fn test_rejection_is_stored() {
		reset();
		let (_scope, result) =
			mount(|| use_async(|| async { Err::<u8, _>("boom".to_string()) }, || ()));
		flush();

		assert_eq!(result.state.get_untracked(), AsyncState::Error("boom".to_string()));
	}

	#[test]
	#[serial]
	fn test_stays_loading_until_future_completes() {
		reset();
		let (tx, rx) = oneshot::channel::<u32>();
		let receiver = Rc::new(RefCell::new(Some(rx)));
		let (_scope, result) = mount(move || {
			use_async(
				move || {
					let rx = receiver.borrow_mut().take();
					async move {
						match rx {
							Some(rx) => rx.await.map_err(|_| "cancelled"),
							None => Err("already consumed"),
						}
					}
				},
				|| (),
			)
		});

		flush();
		assert!(result.loading());

		tx.send(7).unwrap();
		flush();
		assert_eq!(result.value(), Some(7));
	}

	#[test]
	#[serial]
	fn test_reruns_when_deps_change() {
		reset();
		let id = Signal::new(1);
		let calls = Rc::new(Cell::new(0));
		let (_scope, result) = mount({
			let id = id.clone();
			let calls = calls.clone();
			move || {
				use_async(
					{
						let id = id.clone();
						move || {
							calls.set(calls.get() + 1);
							let id = id.get_untracked();
							async move { Ok::<_, ()>(id * 10) }
						}
					},
					move || id.get(),
				)
			}
		});
		flush();
		assert_eq!(result.value(), Some(10));

		id.set(2);
		assert_eq!(result.value(), Some(10), "rerun waits for the next flush");
		flush();
		assert_eq!(result.value(), Some(20));
		assert_eq!(calls.get(), 2);

		id.set(2);
		flush();
		assert_eq!(calls.get(), 2, "equal write does not rerun");
		assert_eq!(result.value(), Some(20));
	}
}
