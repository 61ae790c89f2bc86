//! The hooks
//!
//! Every hook is meant to be called once, inside [`crate::mount`]. Anything a
//! hook subscribes to (listeners, timers, observers, watches) lives until the
//! surrounding scope is disposed.
//!
//! ## Available Hooks
//!
//! | Group | Hooks |
//! |-------|-------|
//! | Primitives | [`use_state`], [`use_effect`], [`use_layout_effect`], [`use_memo`], [`use_callback`] |
//! | State | [`use_toggle`], [`use_array`], [`use_previous`], [`use_state_with_history`], [`use_state_with_validation`] |
//! | Effects | [`use_update_effect`], [`use_effect_once`], [`use_deep_compare_effect`] |
//! | Timers | [`use_timeout`], [`use_debounce`] |
//! | Storage | [`use_local_storage`], [`use_session_storage`], [`use_cookie`] |
//! | Async | [`use_async`], [`use_fetch`], [`use_script`] |
//! | DOM events | [`use_event_listener`], [`use_click_outside`], [`use_hover`], [`use_long_press`] |
//! | Observers | [`use_on_screen`], [`use_size`] |
//! | Window | [`use_window_size`], [`use_media_query`], [`use_online_status`] |
//! | Browser APIs | [`use_geolocation`], [`use_copy_to_clipboard`], [`use_dark_mode`], [`use_translation`] |
//! | Debugging | [`use_render_count`], [`use_debug_information`] |

pub mod array;
pub mod async_state;
pub mod clipboard;
pub mod cookie;
pub mod dark_mode;
pub mod debug;
pub mod effect;
pub mod event_listener;
pub mod fetch;
pub mod geolocation;
pub mod history;
pub mod long_press;
pub mod memo;
pub mod observer;
pub mod previous;
pub mod script;
pub mod state;
pub mod storage;
pub mod timeout;
pub mod toggle;
pub mod translation;
pub mod validation;
pub mod window;

pub use array::{UseArray, use_array};
pub use async_state::{AsyncState, UseAsync, use_async};
pub use clipboard::{UseCopyToClipboard, use_copy_to_clipboard};
pub use cookie::{CookieOptions, SameSite, UseCookie, use_cookie};
pub use dark_mode::{UseDarkMode, use_dark_mode};
pub use debug::{DebugInformation, PropChange, use_debug_information, use_render_count};
pub use effect::{
	use_deep_compare_effect, use_effect, use_effect_once, use_layout_effect, use_update_effect,
};
pub use event_listener::{use_click_outside, use_event_listener, use_hover};
pub use fetch::{FetchOptions, use_fetch};
pub use geolocation::{GeolocationOptions, UseGeolocation, use_geolocation};
pub use history::{UseStateWithHistory, use_state_with_history};
pub use long_press::{LongPressOptions, use_long_press};
pub use memo::{use_callback, use_memo};
pub use observer::{use_on_screen, use_size};
pub use previous::use_previous;
pub use script::use_script;
pub use state::use_state;
pub use storage::{UseStorage, use_local_storage, use_session_storage, use_storage};
pub use timeout::{UseTimeout, use_debounce, use_timeout};
pub use toggle::{UseToggle, use_toggle};
pub use translation::{Translations, UseTranslation, use_translation};
pub use validation::{UseStateWithValidation, use_state_with_validation};
pub use window::{use_media_query, use_online_status, use_window_size};
