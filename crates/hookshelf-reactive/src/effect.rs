//! Effect - Reactive Side Effects
//!
//! `Effect` runs a closure immediately and re-runs it whenever a Signal it read
//! during its previous run changes.
//!
//! Each run happens inside a fresh [`Scope`]. Anything registered with
//! [`on_cleanup`](crate::on_cleanup) during a run is torn down right before the
//! next run and when the effect is disposed. That is how listeners and timers
//! created by an effect get released.
//!
//! ## Example
//!
//! ```ignore
//! use hookshelf_reactive::{Signal, Effect};
//!
//! let count = Signal::new(0);
//!
//! let _effect = Effect::new(move || {
//!     println!("Count is: {}", count.get());
//! });
//!
//! count.set(42);
//! ```

use core::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::runtime::{
	EffectTiming, NodeId, NodeType, Observer, try_with_runtime, untrack, with_runtime,
};
use crate::scope::Scope;

type EffectFn = Rc<RefCell<Box<dyn FnMut() + 'static>>>;

// Effect closures by id, so the runtime can re-execute them
thread_local! {
	static EFFECT_FUNCTIONS: RefCell<BTreeMap<NodeId, EffectFn>> = const { RefCell::new(BTreeMap::new()) };
}

// Execution timing (Layout vs Passive) per effect
thread_local! {
	static EFFECT_TIMING: RefCell<BTreeMap<NodeId, EffectTiming>> = const { RefCell::new(BTreeMap::new()) };
}

/// Get the timing for an effect by its ID.
///
/// Returns `None` if the id does not belong to a live effect.
pub(crate) fn get_effect_timing(effect_id: NodeId) -> Option<EffectTiming> {
	EFFECT_TIMING.with(|storage| storage.borrow().get(&effect_id).copied())
}

/// A reactive effect that automatically re-runs when its dependencies change
///
/// Dropping the `Effect` disposes it.
pub struct Effect {
	/// Unique identifier for this effect
	id: NodeId,
	/// Whether this effect has been disposed
	disposed: Rc<Cell<bool>>,
	/// Scope of the latest run
	run_scope: Rc<RefCell<Option<Scope>>>,
}

impl Effect {
	/// Create a new passive Effect
	///
	/// The function runs immediately. Re-runs happen on the next flush after a
	/// dependency changes.
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		Self::new_with_timing(f, EffectTiming::Passive)
	}

	/// Create a new Effect with specified execution timing
	pub fn new_with_timing<F>(mut f: F, timing: EffectTiming) -> Self
	where
		F: FnMut() + 'static,
	{
		let id = NodeId::new();
		let disposed = Rc::new(Cell::new(false));
		let run_scope: Rc<RefCell<Option<Scope>>> = Rc::new(RefCell::new(None));

		let wrapped: Box<dyn FnMut()> = Box::new({
			let disposed = disposed.clone();
			let run_scope = run_scope.clone();
			move || {
				if disposed.get() {
					return;
				}
				let previous = run_scope.borrow_mut().take();
				if let Some(previous) = previous {
					// Reads made by cleanups are not dependencies of the next run
					untrack(|| previous.dispose());
				}
				let scope = Scope::new();
				scope.run(&mut f);
				*run_scope.borrow_mut() = Some(scope);
			}
		});

		EFFECT_FUNCTIONS.with(|storage| {
			storage
				.borrow_mut()
				.insert(id, Rc::new(RefCell::new(wrapped)));
		});
		EFFECT_TIMING.with(|storage| {
			storage.borrow_mut().insert(id, timing);
		});

		Self::execute_effect(id);

		Self {
			id,
			disposed,
			run_scope,
		}
	}

	/// Execute an effect by its ID
	///
	/// A re-entrant request for an effect that is already running is ignored.
	pub(crate) fn execute_effect(effect_id: NodeId) {
		let Some(effect_fn) =
			EFFECT_FUNCTIONS.with(|storage| storage.borrow().get(&effect_id).cloned())
		else {
			return;
		};
		let Ok(mut effect_fn) = effect_fn.try_borrow_mut() else {
			return;
		};

		let timing = get_effect_timing(effect_id).unwrap_or_default();

		let saved_depth = with_runtime(|rt| {
			rt.clear_dependencies(effect_id);
			rt.push_observer(Observer {
				id: effect_id,
				node_type: NodeType::Effect,
				timing,
			})
		});

		effect_fn();

		with_runtime(|rt| {
			rt.pop_observer(saved_depth);
		});
	}

	/// Get the NodeId of this effect
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Whether [`Effect::dispose`] has been called
	pub fn is_disposed(&self) -> bool {
		self.disposed.get()
	}

	/// Dispose this effect
	///
	/// Runs the cleanups of the latest run. The effect will not run again.
	pub fn dispose(&self) {
		if self.disposed.replace(true) {
			return;
		}

		let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		let _ = EFFECT_FUNCTIONS.try_with(|storage| {
			storage.borrow_mut().remove(&self.id);
		});
		let _ = EFFECT_TIMING.try_with(|storage| {
			storage.borrow_mut().remove(&self.id);
		});

		let last_run = self.run_scope.borrow_mut().take();
		if let Some(scope) = last_run {
			scope.dispose();
		}
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl core::fmt::Debug for Effect {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Effect")
			.field("id", &self.id)
			.field("disposed", &self.disposed.get())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Signal, on_cleanup};
	use serial_test::serial;

	fn flush() {
		with_runtime(|rt| rt.flush_updates_enhanced());
	}

	#[test]
	#[serial]
	fn test_effect_runs_immediately() {
		let run_count = Rc::new(Cell::new(0));
		let run_count_clone = run_count.clone();

		let _effect = Effect::new(move || {
			run_count_clone.set(run_count_clone.get() + 1);
		});

		assert_eq!(run_count.get(), 1);
	}

	#[test]
	#[serial]
	fn test_effect_reruns_on_signal_change() {
		let signal = Signal::new(0);
		let values = Rc::new(RefCell::new(Vec::new()));

		let _effect = Effect::new({
			let signal = signal.clone();
			let values = values.clone();
			move || values.borrow_mut().push(signal.get())
		});

		assert_eq!(*values.borrow(), vec![0]);

		signal.set(10);
		assert_eq!(*values.borrow(), vec![0], "passive effects wait for a flush");
		flush();
		assert_eq!(*values.borrow(), vec![0, 10]);

		signal.set(20);
		flush();
		assert_eq!(*values.borrow(), vec![0, 10, 20]);
	}

	#[test]
	#[serial]
	fn test_layout_effect_runs_synchronously() {
		let signal = Signal::new(1);
		let seen = Rc::new(Cell::new(0));

		let _effect = Effect::new_with_timing(
			{
				let signal = signal.clone();
				let seen = seen.clone();
				move || seen.set(signal.get())
			},
			EffectTiming::Layout,
		);

		signal.set(7);
		assert_eq!(seen.get(), 7);
	}

	#[test]
	#[serial]
	fn test_cleanup_runs_before_rerun_and_on_dispose() {
		let signal = Signal::new(0);
		let log = Rc::new(RefCell::new(Vec::new()));

		let effect = Effect::new({
			let signal = signal.clone();
			let log = log.clone();
			move || {
				let value = signal.get();
				log.borrow_mut().push(format!("run {value}"));
				let log = log.clone();
				on_cleanup(move || log.borrow_mut().push(format!("cleanup {value}")));
			}
		});

		signal.set(1);
		flush();
		effect.dispose();

		assert_eq!(
			*log.borrow(),
			vec!["run 0", "cleanup 0", "run 1", "cleanup 1"]
		);
	}

	#[test]
	#[serial]
	fn test_effect_drop_cleans_up() {
		let signal = Signal::new(0);
		let run_count = Rc::new(Cell::new(0));

		{
			let signal = signal.clone();
			let run_count = run_count.clone();
			let _effect = Effect::new(move || {
				let _ = signal.get();
				run_count.set(run_count.get() + 1);
			});
		}

		signal.set(10);
		flush();
		assert_eq!(run_count.get(), 1);
	}

	#[test]
	#[serial]
	fn test_effect_created_inside_effect_is_released_on_rerun() {
		let outer = Signal::new(0);
		let inner = Signal::new(0);
		let inner_runs = Rc::new(Cell::new(0));

		let _effect = Effect::new({
			let outer = outer.clone();
			let inner = inner.clone();
			let inner_runs = inner_runs.clone();
			move || {
				let _ = outer.get();
				let inner = inner.clone();
				let inner_runs = inner_runs.clone();
				crate::own(Effect::new(move || {
					let _ = inner.get();
					inner_runs.set(inner_runs.get() + 1);
				}));
			}
		});
		assert_eq!(inner_runs.get(), 1);

		outer.set(1);
		flush();
		assert_eq!(inner_runs.get(), 2);

		inner.set(1);
		flush();
		assert_eq!(inner_runs.get(), 3, "only the live inner effect re-runs");
	}

	#[test]
	#[serial]
	fn test_cleanup_reads_are_not_tracked() {
		let trigger = Signal::new(0);
		let other = Signal::new(0);
		let runs = Rc::new(Cell::new(0));

		let _effect = Effect::new({
			let trigger = trigger.clone();
			let other = other.clone();
			let runs = runs.clone();
			move || {
				let _ = trigger.get();
				runs.set(runs.get() + 1);
				let other = other.clone();
				on_cleanup(move || {
					let _ = other.get();
				});
			}
		});

		trigger.set(1);
		flush();
		assert_eq!(runs.get(), 2);

		other.set(1);
		flush();
		assert_eq!(runs.get(), 2);
		assert_eq!(with_runtime(|rt| rt.subscriber_count(other.id())), 0);
	}
}
