//! Card interaction core: click selection and damped pose animation.
//!
//! Input events only change [`SelectionState`]; object poses change only in
//! [`PoseAnimator::tick`], once per frame. [`Session`] owns both halves and
//! [`Stage`] wires a session to a scene, an orbit camera and a viewport.
//!
//! # Invariants
//! - At most one object is selected, and so at most one object animates.
//! - A click on another object while one is selected only sends the selected
//!   object home; the new one can be selected after the first has arrived.
//! - Damping factors lie in (0, 1); this is checked when a session is built.

pub mod animator;
pub mod config;
pub mod selection;
pub mod session;
pub mod stage;

pub use animator::{PoseAnimator, TickOutcome};
pub use config::{AnimationConfig, ConfigError, StageConfig};
pub use selection::{ClickOutcome, SelectionController, SelectionState};
pub use session::Session;
pub use stage::{Stage, StageResponse};
