//! Scene: the set of interactive objects, static props and lights that the
//! animation core and the renderers read from.
//!
//! # Invariants
//! - Objects are created at setup and never removed during a session.
//! - An object's home pose is captured when it is created and only changes
//!   through its [`HomeFlip`] policy.
//! - Ray picking only considers interactive objects.

pub mod object;
pub mod room;
pub mod scene;

pub use object::{HomeFlip, InteractiveObject, MaterialHandle, Prop};
pub use room::{CardPlacement, RoomLayout, build_room};
pub use scene::{DirectionalLight, RayHit, Scene, SceneError};
