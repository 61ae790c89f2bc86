//! Reactive Runtime
//!
//! The runtime owns the dependency graph between Signals and the Effects or
//! Memos that read them, plus the queue of passive effects waiting to re-run.
//!
//! ## Architecture
//!
//! 1. **Observer Stack**: the Effect or Memo currently executing
//! 2. **Dependency Tracking**: `Signal::get()` records an edge to the top observer
//! 3. **Update Scheduling**: passive effects are queued and flushed together
//! 4. **Layout Effects**: executed synchronously as soon as a dependency changes
//!
//! There is one runtime per thread. In the browser that means one runtime.

use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicUsize, Ordering};
use std::collections::BTreeMap;

/// Unique identifier for reactive nodes (Signals, Effects, Memos)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Create a new unique NodeId
	pub fn new() -> Self {
		static COUNTER: AtomicUsize = AtomicUsize::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

/// Type of reactive node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
	/// A Signal node (source of reactivity)
	Signal,
	/// An Effect node (side effect that runs when dependencies change)
	Effect,
	/// A Memo node (cached computation)
	Memo,
}

/// Effect execution timing.
///
/// - Layout effects run synchronously when a dependency changes (`use_layout_effect`)
/// - Passive effects are queued and run on the next flush (`use_effect`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectTiming {
	/// Runs synchronously on change
	Layout,
	/// Runs on the next flush
	#[default]
	Passive,
}

/// Observer represents a currently executing Effect or Memo
#[derive(Debug, Clone)]
pub struct Observer {
	/// Unique identifier for this observer
	pub id: NodeId,
	/// Type of this observer
	pub node_type: NodeType,
	/// Effect execution timing (only meaningful for Effect nodes)
	pub timing: EffectTiming,
}

/// Dependency graph node
#[derive(Debug, Default)]
pub(crate) struct DependencyNode {
	/// IDs of nodes that depend on this node
	pub(crate) subscribers: Vec<NodeId>,
	/// IDs of nodes this node depends on
	pub(crate) dependencies: Vec<NodeId>,
}

/// Type for async task scheduler function
type SchedulerFn = Box<dyn Fn(Box<dyn FnOnce()>)>;

/// Upper bound on flush passes; effects that keep re-triggering each other
/// beyond this are assumed to be cycling.
const MAX_FLUSH_PASSES: usize = 100;

/// Global reactive runtime
///
/// Thread-local. Use [`with_runtime`] to access it.
pub struct Runtime {
	/// Observer stack for tracking currently executing effects
	observer_stack: RefCell<Vec<Observer>>,
	/// Dependency graph: NodeId -> DependencyNode
	pub(crate) dependency_graph: RefCell<BTreeMap<NodeId, DependencyNode>>,
	/// Pending updates (nodes that need to be re-executed)
	pub(crate) pending_updates: RefCell<Vec<NodeId>>,
	/// Whether an update is currently scheduled
	pub(crate) update_scheduled: Cell<bool>,
	/// Nesting depth of `untrack` calls for the current observer
	untracked_depth: Cell<usize>,
	/// How scheduled flushes are dispatched
	scheduler: RefCell<Option<SchedulerFn>>,
}

impl Runtime {
	/// Create a new Runtime instance
	pub fn new() -> Self {
		Self {
			observer_stack: RefCell::new(Vec::new()),
			dependency_graph: RefCell::new(BTreeMap::new()),
			pending_updates: RefCell::new(Vec::new()),
			update_scheduled: Cell::new(false),
			untracked_depth: Cell::new(0),
			scheduler: RefCell::new(None),
		}
	}

	/// Get the current observer (the currently executing Effect or Memo)
	pub fn current_observer(&self) -> Option<NodeId> {
		self.observer_stack
			.borrow()
			.last()
			.map(|observer| observer.id)
	}

	/// Push an observer onto the stack
	///
	/// Tracking is re-enabled for the new observer even inside `untrack`.
	/// Returns the untracked depth that [`Runtime::pop_observer`] must restore.
	pub fn push_observer(&self, observer: Observer) -> usize {
		self.observer_stack.borrow_mut().push(observer);
		self.untracked_depth.replace(0)
	}

	/// Pop an observer from the stack, restoring the saved untracked depth
	pub fn pop_observer(&self, saved_depth: usize) -> Option<Observer> {
		self.untracked_depth.set(saved_depth);
		self.observer_stack.borrow_mut().pop()
	}

	/// Track a dependency between the current observer and a signal
	///
	/// Called by `Signal::get()`. Does nothing outside an observer or inside `untrack`.
	pub fn track_dependency(&self, signal_id: NodeId) {
		if self.untracked_depth.get() > 0 {
			return;
		}
		let Some(observer_id) = self.current_observer() else {
			return;
		};
		if observer_id == signal_id {
			return;
		}

		let mut graph = self.dependency_graph.borrow_mut();

		let signal_node = graph.entry(signal_id).or_default();
		if !signal_node.subscribers.contains(&observer_id) {
			signal_node.subscribers.push(observer_id);
		}

		let observer_node = graph.entry(observer_id).or_default();
		if !observer_node.dependencies.contains(&signal_id) {
			observer_node.dependencies.push(signal_id);
		}
	}

	/// Notify that a Signal (or Memo) has changed
	///
	/// Memos are invalidated immediately and propagate further. Layout effects
	/// execute synchronously. Passive effects are scheduled.
	pub fn notify_signal_change(&self, signal_id: NodeId) {
		let subscribers = match self.dependency_graph.borrow().get(&signal_id) {
			Some(node) => node.subscribers.clone(),
			None => return,
		};

		let mut layout_effects = Vec::new();
		for subscriber_id in subscribers {
			if crate::memo::invalidate_memo(subscriber_id) {
				self.notify_signal_change(subscriber_id);
				continue;
			}
			match crate::effect::get_effect_timing(subscriber_id) {
				Some(EffectTiming::Layout) => layout_effects.push(subscriber_id),
				Some(EffectTiming::Passive) => self.schedule_update(subscriber_id),
				None => {}
			}
		}

		for effect_id in layout_effects {
			crate::effect::Effect::execute_effect(effect_id);
		}
	}

	/// Schedule a node for update
	///
	/// Without a scheduler installed, updates wait for an explicit
	/// [`Runtime::flush_updates_enhanced`] call.
	pub fn schedule_update(&self, node_id: NodeId) {
		{
			let mut pending = self.pending_updates.borrow_mut();
			if !pending.contains(&node_id) {
				pending.push(node_id);
			}
		}

		if !self.update_scheduled.replace(true) {
			if let Some(scheduler) = self.scheduler.borrow().as_ref() {
				scheduler(Box::new(|| {
					with_runtime(|rt| rt.flush_updates_enhanced());
				}));
			}
		}
	}

	/// Whether any passive effect is waiting for a flush
	pub fn has_pending_updates(&self) -> bool {
		!self.pending_updates.borrow().is_empty()
	}

	/// Clear all dependencies of a node
	///
	/// Called before an Effect re-runs so stale edges are dropped.
	pub fn clear_dependencies(&self, node_id: NodeId) {
		let mut graph = self.dependency_graph.borrow_mut();

		let dependencies = match graph.get_mut(&node_id) {
			Some(node) => core::mem::take(&mut node.dependencies),
			None => return,
		};

		for dep_id in dependencies {
			if let Some(dep_node) = graph.get_mut(&dep_id) {
				dep_node.subscribers.retain(|&id| id != node_id);
			}
		}
	}

	/// Remove a node from the dependency graph
	pub fn remove_node(&self, node_id: NodeId) {
		self.clear_dependencies(node_id);
		self.dependency_graph.borrow_mut().remove(&node_id);
		self.pending_updates.borrow_mut().retain(|&id| id != node_id);
	}

	/// Check if a node exists in the dependency graph (for testing)
	pub fn has_node(&self, node_id: NodeId) -> bool {
		self.dependency_graph.borrow().contains_key(&node_id)
	}

	/// Get the number of subscribers for a node (for testing)
	pub fn subscriber_count(&self, node_id: NodeId) -> usize {
		self.dependency_graph
			.borrow()
			.get(&node_id)
			.map(|node| node.subscribers.len())
			.unwrap_or(0)
	}

	/// Flush all pending updates
	///
	/// Effects that schedule further updates while running are picked up in
	/// the same flush.
	pub fn flush_updates_enhanced(&self) {
		for _ in 0..MAX_FLUSH_PASSES {
			self.update_scheduled.set(false);
			let pending = core::mem::take(&mut *self.pending_updates.borrow_mut());
			if pending.is_empty() {
				return;
			}
			for node_id in pending {
				crate::effect::Effect::execute_effect(node_id);
			}
		}
		tracing::warn!(
			passes = MAX_FLUSH_PASSES,
			"reactive flush did not settle; effects may be updating each other in a cycle"
		);
	}

	pub(crate) fn enter_untracked(&self) {
		self.untracked_depth.set(self.untracked_depth.get() + 1);
	}

	pub(crate) fn exit_untracked(&self) {
		self.untracked_depth
			.set(self.untracked_depth.get().saturating_sub(1));
	}
}

impl Default for Runtime {
	fn default() -> Self {
		Self::new()
	}
}

// Thread-local runtime instance
//
// In WASM, there is only one thread, so this effectively provides a global runtime.
thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Set the scheduler used to dispatch passive effect flushes.
///
/// In the browser this is typically `wasm_bindgen_futures::spawn_local`.
///
/// # Example
///
/// ```ignore
/// hookshelf_reactive::set_scheduler(|task| {
///     wasm_bindgen_futures::spawn_local(async move { task() });
/// });
/// ```
pub fn set_scheduler<F>(scheduler: F)
where
	F: Fn(Box<dyn FnOnce()>) + 'static,
{
	RUNTIME.with(|rt| {
		*rt.scheduler.borrow_mut() = Some(Box::new(scheduler));
	});
}

/// Get a reference to the thread's runtime
pub fn with_runtime<F, R>(f: F) -> R
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.with(f)
}

/// Try to access the runtime (safe version for Drop implementations)
///
/// Returns None if the thread-local storage has been destroyed.
pub(crate) fn try_with_runtime<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.try_with(f).ok()
}

/// Runs `f` without recording any signal reads as dependencies.
///
/// # Example
///
/// ```ignore
/// Effect::new(move || {
///     let tracked = a.get();
///     let not_tracked = untrack(|| b.get());
/// });
/// ```
pub fn untrack<F, R>(f: F) -> R
where
	F: FnOnce() -> R,
{
	with_runtime(|rt| rt.enter_untracked());
	let result = f();
	with_runtime(|rt| rt.exit_untracked());
	result
}
