use crate::event::{InputEvent, PointerButton};
use glam::Vec2;
use std::collections::VecDeque;

/// Single-threaded FIFO of pending input events.
///
/// The window callback pushes; the frame loop drains once per frame before
/// the animation tick, so event handling never interleaves with a tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and yield all pending events in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}

impl Extend<InputEvent> for InputQueue {
    fn extend<T: IntoIterator<Item = InputEvent>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

/// What a primary-button interaction turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerGesture {
    /// Released without travelling past the drag threshold.
    Click(Vec2),
    /// Pointer moved by this many pixels while held past the threshold.
    Drag(Vec2),
}

/// Tells clicks apart from drags on the primary button.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    threshold: f32,
    pressed_at: Option<Vec2>,
    last: Vec2,
    dragging: bool,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl ClickTracker {
    /// `threshold` is the travel in pixels after which a press becomes a drag.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            pressed_at: None,
            last: Vec2::ZERO,
            dragging: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed one event; returns a gesture when one completes or progresses.
    pub fn observe(&mut self, event: &InputEvent) -> Option<PointerGesture> {
        match *event {
            InputEvent::PointerPressed {
                button: PointerButton::Primary,
                position,
            } => {
                self.pressed_at = Some(position);
                self.last = position;
                self.dragging = false;
                None
            }
            InputEvent::PointerMoved(position) => {
                let pressed_at = self.pressed_at?;
                let delta = position - self.last;
                self.last = position;
                if !self.dragging && position.distance(pressed_at) > self.threshold {
                    self.dragging = true;
                    return Some(PointerGesture::Drag(position - pressed_at));
                }
                self.dragging.then_some(PointerGesture::Drag(delta))
            }
            InputEvent::PointerReleased {
                button: PointerButton::Primary,
                position,
            } => {
                let was_dragging = std::mem::take(&mut self.dragging);
                match self.pressed_at.take() {
                    Some(_) if !was_dragging => Some(PointerGesture::Click(position)),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardroom_common::Viewport;

    #[test]
    fn queue_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Wheel(1.0));
        q.push(InputEvent::Resized(Viewport::new(1, 1)));
        assert_eq!(q.len(), 2);
        let drained: Vec<_> = q.drain().collect();
        assert_eq!(drained[0], InputEvent::Wheel(1.0));
        assert!(q.is_empty());
    }

    #[test]
    fn press_release_is_click() {
        let mut t = ClickTracker::default();
        let mut gestures = Vec::new();
        for e in InputEvent::click(Vec2::new(10.0, 20.0)) {
            gestures.extend(t.observe(&e));
        }
        assert_eq!(gestures, vec![PointerGesture::Click(Vec2::new(10.0, 20.0))]);
    }

    #[test]
    fn small_jitter_still_clicks() {
        let mut t = ClickTracker::new(4.0);
        let [press, release] = InputEvent::click(Vec2::new(10.0, 10.0));
        assert!(t.observe(&press).is_none());
        assert!(t.observe(&InputEvent::PointerMoved(Vec2::new(11.0, 11.0))).is_none());
        assert!(matches!(t.observe(&release), Some(PointerGesture::Click(_))));
    }

    #[test]
    fn drag_suppresses_click() {
        let mut t = ClickTracker::new(4.0);
        let [press, release] = InputEvent::click(Vec2::ZERO);
        t.observe(&press);
        let g = t.observe(&InputEvent::PointerMoved(Vec2::new(10.0, 0.0)));
        assert_eq!(g, Some(PointerGesture::Drag(Vec2::new(10.0, 0.0))));
        let g = t.observe(&InputEvent::PointerMoved(Vec2::new(12.0, 1.0)));
        assert_eq!(g, Some(PointerGesture::Drag(Vec2::new(2.0, 1.0))));
        assert!(t.is_dragging());
        assert!(t.observe(&release).is_none());
        assert!(!t.is_dragging());
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut t = ClickTracker::default();
        assert!(t.observe(&InputEvent::PointerMoved(Vec2::new(50.0, 50.0))).is_none());
        let release = InputEvent::PointerReleased {
            button: PointerButton::Primary,
            position: Vec2::ZERO,
        };
        assert!(t.observe(&release).is_none());
    }
}
