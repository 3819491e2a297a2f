use cardroom_common::Viewport;
use glam::Vec2;

/// Pointer button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// An input event from the host window.
///
/// Positions are viewport pixels with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to a new position.
    PointerMoved(Vec2),
    /// A button went down at the given position.
    PointerPressed { button: PointerButton, position: Vec2 },
    /// A button went up at the given position.
    PointerReleased { button: PointerButton, position: Vec2 },
    /// Scroll wheel, in lines; positive scrolls away from the user.
    Wheel(f32),
    /// The output surface changed size.
    Resized(Viewport),
}

impl InputEvent {
    /// A primary-button press immediately followed by a release at the same
    /// spot, i.e. a click.
    pub fn click(position: Vec2) -> [InputEvent; 2] {
        [
            InputEvent::PointerPressed {
                button: PointerButton::Primary,
                position,
            },
            InputEvent::PointerReleased {
                button: PointerButton::Primary,
                position,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_is_press_then_release() {
        let [press, release] = InputEvent::click(Vec2::new(3.0, 4.0));
        assert!(matches!(
            press,
            InputEvent::PointerPressed {
                button: PointerButton::Primary,
                ..
            }
        ));
        assert!(matches!(
            release,
            InputEvent::PointerReleased {
                button: PointerButton::Primary,
                ..
            }
        ));
    }

    #[test]
    fn resized_carries_viewport() {
        let e = InputEvent::Resized(Viewport::new(10, 20));
        assert_eq!(e, InputEvent::Resized(Viewport::new(10, 20)));
    }
}
