//! Hookshelf Hooks - reusable browser-UI hooks
//!
//! Thirty small hooks, each wrapping one browser capability (timers, storage,
//! observers, fetch, geolocation, clipboard, cookies, ...) behind a reactive
//! [`Signal`]. Hooks are called once while a component is set up inside
//! [`mount`]. They register their browser listeners right away and release
//! them when the returned [`Scope`] is disposed.
//!
//! ## Example
//!
//! ```ignore
//! use hookshelf_hooks::{mount, use_toggle, use_window_size};
//!
//! let (scope, (size, menu)) = mount(|| (use_window_size(), use_toggle(false)));
//!
//! if size.get().width < 600.0 {
//!     menu.set(false);
//! }
//!
//! scope.dispose(); // removes the resize listener
//! ```
//!
//! ## Platforms
//!
//! On `wasm32` every hook talks to the real browser through `web-sys`. On
//! other targets the hooks run against an in-memory browser that the
//! [`testing`] module drives.

#![warn(missing_docs)]

pub mod callback;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod platform;

#[cfg(not(target_arch = "wasm32"))]
pub mod testing;

pub use callback::Callback;
pub use error::HookError;
pub use hooks::*;
pub use hookshelf_reactive::{Effect, EffectTiming, Memo, Scope, Signal, on_cleanup, own, untrack};
pub use platform::{Element, Event, Position, Rect, StorageArea, Target, WindowSize};

#[doc(hidden)]
pub use tracing as __tracing;

#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub use web_sys as __web_sys;

/// Mounts a component: runs `setup` inside a new [`Scope`] and returns both.
///
/// Disposing the returned scope is the unmount. In the browser the first call
/// also installs the scheduler that flushes passive effects.
pub fn mount<R>(setup: impl FnOnce() -> R) -> (Scope, R) {
	platform::install_scheduler();
	hookshelf_reactive::mount(setup)
}
