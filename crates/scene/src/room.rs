//! The card room: two walls, a floor, two lights and a row of cards.

use crate::object::{HomeFlip, InteractiveObject, MaterialHandle, Prop};
use crate::scene::{DirectionalLight, Scene};
use cardroom_common::Pose;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

pub const BACK_WALL: MaterialHandle = MaterialHandle(0);
pub const SIDE_WALL: MaterialHandle = MaterialHandle(1);
pub const FLOOR: MaterialHandle = MaterialHandle(2);
pub const CARD: MaterialHandle = MaterialHandle(3);

/// Card box dimensions: width, thickness, length.
pub const CARD_SIZE: Vec3 = Vec3::new(0.5, 0.05, 0.7);

/// Where a card rests and how its home orientation behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardPlacement {
    pub name: String,
    pub position: Vec3,
    /// Rotation about +Y, in degrees.
    pub yaw_degrees: f32,
    pub home_flip: HomeFlip,
}

impl Default for CardPlacement {
    fn default() -> Self {
        Self {
            name: "card".into(),
            position: Vec3::new(2.0, 0.5, 0.0),
            yaw_degrees: 0.0,
            home_flip: HomeFlip::Never,
        }
    }
}

impl CardPlacement {
    pub fn home(&self) -> Pose {
        Pose::new(
            self.position,
            Quat::from_rotation_y(self.yaw_degrees.to_radians()),
        )
    }
}

/// Card layout for [`build_room`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomLayout {
    pub cards: Vec<CardPlacement>,
}

impl Default for RoomLayout {
    fn default() -> Self {
        Self {
            cards: vec![
                CardPlacement::default(),
                CardPlacement {
                    name: "card-2".into(),
                    position: Vec3::new(0.8, 0.5, 1.8),
                    yaw_degrees: 20.0,
                    ..CardPlacement::default()
                },
                CardPlacement {
                    name: "card-3".into(),
                    position: Vec3::new(2.9, 0.5, 2.4),
                    yaw_degrees: -35.0,
                    home_flip: HomeFlip::OnFirstReturn,
                },
            ],
        }
    }
}

impl RoomLayout {
    /// A layout with only the first default card.
    pub fn single_card() -> Self {
        Self {
            cards: vec![CardPlacement::default()],
        }
    }
}

/// Build the room scene with the given card layout.
pub fn build_room(layout: &RoomLayout) -> Scene {
    let mut scene = Scene::new();
    scene.set_background([0.941, 0.941, 0.941]);

    scene.add_prop(Prop::new(
        "back-wall",
        Vec3::new(0.0, 5.5, -4.5),
        Vec3::new(10.0, 10.0, 1.0),
        BACK_WALL,
    ));
    scene.add_prop(Prop::new(
        "side-wall",
        Vec3::new(-4.5, 5.5, 0.0),
        Vec3::new(1.0, 10.0, 10.0),
        SIDE_WALL,
    ));
    scene.add_prop(Prop::new(
        "floor",
        Vec3::ZERO,
        Vec3::new(10.0, 1.0, 10.0),
        FLOOR,
    ));

    scene.add_light(DirectionalLight::white(Vec3::new(-2.0, 15.0, -2.0)));
    scene.add_light(DirectionalLight::white(Vec3::new(5.0, 5.0, 5.0)));

    for card in &layout.cards {
        scene.add_object(
            InteractiveObject::new(card.name.clone(), card.home(), CARD_SIZE, CARD)
                .with_home_flip(card.home_flip),
        );
    }

    tracing::info!(
        cards = scene.object_count(),
        props = scene.props().len(),
        "room built"
    );
    scene
}
