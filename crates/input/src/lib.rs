//! Input: pointer and window events in a window-system-agnostic form.
//!
//! # Invariants
//! - Consumers see [`InputEvent`]s, never raw windowing events.
//! - Events are drained in arrival order, once.

pub mod event;
pub mod queue;

pub use event::{InputEvent, PointerButton};
pub use queue::{ClickTracker, InputQueue, PointerGesture};
