//! # Hookshelf
//!
//! Browser UI hooks for Rust and WebAssembly.
//!
//! This facade re-exports the two workspace crates:
//!
//! - [`reactive`]: the fine-grained runtime (signals, effects, memos, scopes)
//! - [`hooks`]: the hooks themselves, plus [`mount`] and the browser platform layer
//!
//! ## Quick Start
//!
//! ```ignore
//! use hookshelf::prelude::*;
//!
//! let (scope, counter) = mount(|| {
//!     let (count, set_count) = use_state(0);
//!     let saved = use_local_storage("count", Some(0));
//!     use_effect({
//!         let count = count.clone();
//!         move || saved.set(count.get())
//!     });
//!     (count, set_count)
//! });
//!
//! scope.dispose();
//! ```
//!
//! ## Feature Flags
//!
//! - `debug-hooks` - verbose hook tracing through `debug_log!` in debug builds

#![warn(missing_docs)]

pub use hookshelf_hooks as hooks;
pub use hookshelf_reactive as reactive;

pub use hookshelf_hooks::{Callback, HookError, mount};

/// Everything needed to write a component with hooks
pub mod prelude {
	pub use hookshelf_hooks::*;
}
