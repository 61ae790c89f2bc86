//! Hookshelf Reactive - Fine-grained reactivity for browser hooks
//!
//! This crate is the host side of the hooks in `hookshelf-hooks`: it decides
//! when side effects run, when they re-run, and when they are torn down.
//!
//! - [`Signal`]: a value whose reads are tracked
//! - [`Effect`]: a side effect re-run when tracked signals change
//! - [`Memo`]: a cached derived value
//! - [`Scope`]: the lifetime of a mounted component; disposing it is the unmount
//!
//! ## Example
//!
//! ```ignore
//! use hookshelf_reactive::{Effect, Signal, mount, on_cleanup, own, with_runtime};
//!
//! let count = Signal::new(0);
//!
//! let (scope, ()) = mount(|| {
//!     let count = count.clone();
//!     own(Effect::new(move || {
//!         println!("count = {}", count.get());
//!         on_cleanup(|| println!("before next run or unmount"));
//!     }));
//! });
//!
//! count.set(1);
//! with_runtime(|rt| rt.flush_updates_enhanced());
//! scope.dispose();
//! ```

#![warn(missing_docs)]

mod effect;
mod memo;
pub mod runtime;
mod scope;
mod signal;

pub use effect::Effect;
pub use memo::Memo;
pub use runtime::{
	EffectTiming, NodeId, NodeType, Observer, Runtime, set_scheduler, untrack, with_runtime,
};
pub use scope::{Scope, mount, on_cleanup, own};
pub use signal::Signal;
