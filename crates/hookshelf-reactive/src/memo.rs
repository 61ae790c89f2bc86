//! Memo - cached derived values
//!
//! A `Memo<T>` computes its value lazily and caches it until one of the
//! signals it read changes. Reading a memo inside an Effect tracks it like a
//! Signal.

use core::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::runtime::{NodeId, NodeType, Observer, try_with_runtime, with_runtime};

trait Invalidate {
	fn mark_dirty(&self);
}

thread_local! {
	static MEMOS: RefCell<BTreeMap<NodeId, Weak<dyn Invalidate>>> = const { RefCell::new(BTreeMap::new()) };
}

/// Marks the memo with this id dirty. Returns false if the id is not a memo.
pub(crate) fn invalidate_memo(id: NodeId) -> bool {
	let Some(memo) = MEMOS.with(|memos| memos.borrow().get(&id).and_then(Weak::upgrade)) else {
		return false;
	};
	memo.mark_dirty();
	true
}

struct MemoInner<T> {
	value: RefCell<Option<T>>,
	dirty: Cell<bool>,
	compute: RefCell<Box<dyn FnMut() -> T>>,
}

impl<T> Invalidate for MemoInner<T> {
	fn mark_dirty(&self) {
		self.dirty.set(true);
	}
}

/// A lazily computed, cached reactive value
pub struct Memo<T: 'static> {
	id: NodeId,
	inner: Rc<MemoInner<T>>,
}

impl<T: Clone + 'static> Memo<T> {
	/// Creates a memo. Nothing is computed until the first `get`.
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() -> T + 'static,
	{
		let id = NodeId::new();
		let inner = Rc::new(MemoInner {
			value: RefCell::new(None),
			dirty: Cell::new(true),
			compute: RefCell::new(Box::new(f)),
		});
		let weak: Weak<dyn Invalidate> = Rc::downgrade(&inner) as Weak<dyn Invalidate>;
		MEMOS.with(|memos| memos.borrow_mut().insert(id, weak));
		Self { id, inner }
	}

	/// Returns the cached value, recomputing first if a dependency changed.
	pub fn get(&self) -> T {
		with_runtime(|rt| rt.track_dependency(self.id));
		self.get_untracked()
	}

	/// Like [`Memo::get`] without registering a dependency
	pub fn get_untracked(&self) -> T {
		if !self.inner.dirty.get() {
			if let Some(value) = self.inner.value.borrow().as_ref() {
				return value.clone();
			}
		}
		self.recompute()
	}

	/// Forces the next read to recompute.
	pub fn mark_dirty(&self) {
		self.inner.mark_dirty();
	}

	/// Get the NodeId of this memo
	pub fn id(&self) -> NodeId {
		self.id
	}

	fn recompute(&self) -> T {
		let saved_depth = with_runtime(|rt| {
			rt.clear_dependencies(self.id);
			rt.push_observer(Observer {
				id: self.id,
				node_type: NodeType::Memo,
				timing: Default::default(),
			})
		});

		let value = (self.inner.compute.borrow_mut())();

		with_runtime(|rt| {
			rt.pop_observer(saved_depth);
		});

		*self.inner.value.borrow_mut() = Some(value.clone());
		self.inner.dirty.set(false);
		value
	}
}

impl<T: 'static> Clone for Memo<T> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: 'static> Drop for Memo<T> {
	fn drop(&mut self) {
		if Rc::strong_count(&self.inner) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
			let _ = MEMOS.try_with(|memos| memos.borrow_mut().remove(&self.id));
		}
	}
}

impl<T: core::fmt::Debug + 'static> core::fmt::Debug for Memo<T> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Memo")
			.field("id", &self.id)
			.field("value", &*self.inner.value.borrow())
			.field("dirty", &self.inner.dirty.get())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Effect, Signal};
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_memo_caches_until_dependency_changes() {
		let count = Signal::new(5);
		let computations = Rc::new(Cell::new(0));

		let doubled = Memo::new({
			let count = count.clone();
			let computations = computations.clone();
			move || {
				computations.set(computations.get() + 1);
				count.get() * 2
			}
		});

		assert_eq!(computations.get(), 0, "memos are lazy");
		assert_eq!(doubled.get(), 10);
		assert_eq!(doubled.get(), 10);
		assert_eq!(computations.get(), 1);

		count.set(10);
		assert_eq!(doubled.get(), 20);
		assert_eq!(computations.get(), 2);
	}

	#[test]
	#[serial]
	fn test_effect_reading_memo_reruns_on_source_change() {
		let count = Signal::new(1);
		let doubled = Memo::new({
			let count = count.clone();
			move || count.get() * 2
		});
		let seen = Rc::new(RefCell::new(Vec::new()));

		let _effect = Effect::new({
			let doubled = doubled.clone();
			let seen = seen.clone();
			move || seen.borrow_mut().push(doubled.get())
		});

		count.set(3);
		with_runtime(|rt| rt.flush_updates_enhanced());

		assert_eq!(*seen.borrow(), vec![2, 6]);
	}
}
