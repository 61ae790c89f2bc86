//! Callback type for user-supplied handlers.
//!
//! Hooks store the functions their callers pass in (timeout bodies, event
//! handlers, validators) as [`Callback`]s so they can be cloned into listeners
//! and effects without boxing at every call site.
//!
//! ## Example
//!
//! ```ignore
//! use hookshelf_hooks::Callback;
//!
//! let on_tick = Callback::new(|n: u32| n + 1);
//! assert_eq!(on_tick.call(1), 2);
//! ```

use std::rc::Rc;

/// A cloneable, reference-counted function (single-threaded: not `Send`)
pub struct Callback<Args = (), Ret = ()> {
	inner: Rc<dyn Fn(Args) -> Ret + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}

	/// Whether both callbacks wrap the same function
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> std::fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

impl<F, Args, Ret> From<F> for Callback<Args, Ret>
where
	F: Fn(Args) -> Ret + 'static,
{
	fn from(f: F) -> Self {
		Self::new(f)
	}
}
