use cardroom_common::{ObjectId, Viewport};
use cardroom_render::OrbitCamera;
use cardroom_scene::Scene;
use glam::Vec2;

/// Which object is selected, and whether it is raised toward the camera or
/// returning home.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<ObjectId>,
    raised: bool,
}

impl SelectionState {
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn is_raised(&self) -> bool {
        self.raised
    }

    /// Nothing selected, nothing animating.
    pub fn is_idle(&self) -> bool {
        self.selected.is_none()
    }

    pub(crate) fn clear(&mut self) {
        self.selected = None;
        self.raised = false;
    }
}

/// Result of one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click hit no interactive object.
    Missed,
    /// Nothing was selected; the clicked object is now selected and raised.
    Selected(ObjectId),
    /// The selected object was clicked while returning; it rises again.
    Raised(ObjectId),
    /// The selected object was clicked while raised; it returns home.
    Lowered(ObjectId),
    /// Another object was clicked; the selected one is sent home and the
    /// clicked one is not selected.
    SentHome { selected: ObjectId, clicked: ObjectId },
}

/// Turns pointer clicks into selection transitions. Never moves objects.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut SelectionState {
        &mut self.state
    }

    /// Pick the nearest interactive object under `pointer` and apply the
    /// selection transition for it.
    pub fn on_pointer_click(
        &mut self,
        pointer: Vec2,
        viewport: Viewport,
        camera: &OrbitCamera,
        scene: &Scene,
    ) -> ClickOutcome {
        let ray = camera.pointer_ray(pointer, viewport);
        let hit = scene.raycast(&ray).map(|hit| hit.id);
        self.apply(hit)
    }

    /// Apply the transition for a click that hit `clicked` (or nothing).
    pub fn apply(&mut self, clicked: Option<ObjectId>) -> ClickOutcome {
        let Some(clicked) = clicked else {
            return ClickOutcome::Missed;
        };

        let outcome = match self.state.selected {
            None => {
                self.state.selected = Some(clicked);
                self.state.raised = true;
                ClickOutcome::Selected(clicked)
            }
            Some(selected) if selected == clicked => {
                self.state.raised = !self.state.raised;
                if self.state.raised {
                    ClickOutcome::Raised(selected)
                } else {
                    ClickOutcome::Lowered(selected)
                }
            }
            Some(selected) => {
                self.state.raised = false;
                ClickOutcome::SentHome { selected, clicked }
            }
        };
        tracing::debug!(?outcome, "selection transition");
        outcome
    }
}
