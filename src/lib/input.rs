//! Input events and how they move the camera.
//!
//! The window layer translates platform events into [InputEvent]s and feeds them through
//! [transition]. Nothing in here knows about GLFW.

use crate::{camera::Camera, vector::Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Tunables for camera movement.
pub struct Controls {
    /// Translation speed in world units per second.
    pub move_speed: f32,
    /// Degrees of rotation per pixel of cursor travel while dragging.
    pub sensitivity: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            move_speed: 5.,
            sensitivity: 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Directional keys currently held down.
#[allow(missing_docs)]
pub struct HeldKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Mouse buttons the camera cares about.
pub enum MouseButton {
    /// Drags the view while held.
    Primary,
    /// Any other button, ignored.
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
/// What happened to a button.
pub enum ButtonAction {
    Press,
    Release,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Platform-independent input.
pub enum InputEvent {
    /// A mouse button changed state with the cursor at `(x, y)`.
    MouseButton {
        #[allow(missing_docs)]
        button: MouseButton,
        #[allow(missing_docs)]
        action: ButtonAction,
        #[allow(missing_docs)]
        x: f64,
        #[allow(missing_docs)]
        y: f64,
    },
    /// Cursor moved to absolute window coordinates `(x, y)`.
    CursorMoved {
        #[allow(missing_docs)]
        x: f64,
        #[allow(missing_docs)]
        y: f64,
    },
    /// A frame went by, `dt` seconds long, with `held` keys down.
    Frame {
        #[allow(missing_docs)]
        dt: f32,
        #[allow(missing_docs)]
        held: HeldKeys,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Camera plus the bit of input state needed to interpret cursor motion.
pub struct ViewState {
    /// The camera being driven.
    pub camera: Camera,
    /// Last cursor position seen while the primary button is held.
    drag_anchor: Option<(f64, f64)>,
}

impl ViewState {
    /// Whether cursor motion currently rotates the camera.
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }
}

/// Apply one event to the view state.
///
/// Cursor offsets are `(x - last_x, last_y - y)`: moving right turns right, moving up looks up.
/// Pitch is clamped and the basis recomputed after every rotation.
pub fn transition(mut state: ViewState, event: &InputEvent, controls: &Controls) -> ViewState {
    match *event {
        InputEvent::MouseButton {
            button: MouseButton::Primary,
            action,
            x,
            y,
        } => {
            state.drag_anchor = match action {
                ButtonAction::Press => Some((x, y)),
                ButtonAction::Release => None,
            };
        }
        InputEvent::MouseButton { .. } => {}
        InputEvent::CursorMoved { x, y } => {
            if let Some((last_x, last_y)) = state.drag_anchor {
                let x_offset = (x - last_x) as f32;
                let y_offset = (last_y - y) as f32;

                let camera = &mut state.camera;
                camera.yaw += x_offset * controls.sensitivity;
                camera.pitch += y_offset * controls.sensitivity;
                camera.clamp_pitch();
                camera.update_orientation();

                state.drag_anchor = Some((x, y));
            }
        }
        InputEvent::Frame { dt, held } => {
            let step = controls.move_speed * dt;
            let camera = &mut state.camera;

            let mut delta = Vec3::ZERO;
            if held.forward {
                delta += camera.forward();
            }
            if held.backward {
                delta -= camera.forward();
            }
            if held.right {
                delta += camera.right();
            }
            if held.left {
                delta -= camera.right();
            }

            camera.position += delta * step;
        }
    }

    state
}

#[cfg(test)]
mod test {
    use float_eq::assert_float_eq;

    use super::*;

    const EPSILON: f32 = 0.000_1;

    fn forward_only() -> HeldKeys {
        HeldKeys {
            forward: true,
            ..Default::default()
        }
    }

    fn press(x: f64, y: f64) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Primary,
            action: ButtonAction::Press,
            x,
            y,
        }
    }

    #[test]
    fn holding_forward_for_a_second() {
        let controls = Controls::default();
        let start = ViewState::default();
        let initial_forward = start.camera.forward();

        let mut state = start;
        for _ in 0..60 {
            state = transition(
                state,
                &InputEvent::Frame {
                    dt: 1. / 60.,
                    held: forward_only(),
                },
                &controls,
            );
        }

        let position = state.camera.position;
        assert_float_eq!(5., position.len(), abs <= 0.001);
        assert_float_eq!(5., position.dot_product(&initial_forward), abs <= 0.001);
    }

    #[test]
    fn opposite_keys_cancel() {
        let state = transition(
            ViewState::default(),
            &InputEvent::Frame {
                dt: 1.,
                held: HeldKeys {
                    forward: true,
                    backward: true,
                    left: true,
                    right: true,
                },
            },
            &Controls::default(),
        );

        assert_float_eq!(0., state.camera.position.len(), abs <= EPSILON);
    }

    #[test]
    fn strafe_moves_along_right() {
        let state = transition(
            ViewState::default(),
            &InputEvent::Frame {
                dt: 0.5,
                held: HeldKeys {
                    right: true,
                    ..Default::default()
                },
            },
            &Controls::default(),
        );

        assert_float_eq!(2.5, state.camera.position[0], abs <= EPSILON);
        assert_float_eq!(0., state.camera.position[2], abs <= EPSILON);
    }

    #[test]
    fn drag_rotates_camera() {
        let controls = Controls::default();

        let state = transition(ViewState::default(), &press(400., 300.), &controls);
        assert!(state.is_dragging());

        let moved = InputEvent::CursorMoved { x: 410., y: 305. };
        let state = transition(state, &moved, &controls);

        assert_float_eq!(-87., state.camera.yaw, abs <= EPSILON);
        assert_float_eq!(-1.5, state.camera.pitch, abs <= EPSILON);

        let mut expected = state.camera;
        expected.update_orientation();
        assert_eq!(expected, state.camera);

        let camera = state.camera;
        let (forward, right, up) = (camera.forward(), camera.right(), camera.up());
        assert_float_eq!(1., forward.len(), abs <= EPSILON);
        assert_float_eq!(0., forward.dot_product(&right), abs <= EPSILON);
        assert_float_eq!(0., forward.dot_product(&up), abs <= EPSILON);
        assert_float_eq!(0., right.dot_product(&up), abs <= EPSILON);
    }

    #[test]
    fn motion_without_drag_is_ignored() {
        let controls = Controls::default();

        let state = transition(
            ViewState::default(),
            &InputEvent::CursorMoved { x: 10., y: 10. },
            &controls,
        );
        assert_eq!(ViewState::default(), state);

        let state = transition(state, &press(0., 0.), &controls);
        let state = transition(
            state,
            &InputEvent::MouseButton {
                button: MouseButton::Primary,
                action: ButtonAction::Release,
                x: 0.,
                y: 0.,
            },
            &controls,
        );
        let state = transition(state, &InputEvent::CursorMoved { x: 5., y: 5. }, &controls);

        assert!(!state.is_dragging());
        assert_eq!(Camera::default(), state.camera);
    }

    #[test]
    fn secondary_button_does_not_drag() {
        let state = transition(
            ViewState::default(),
            &InputEvent::MouseButton {
                button: MouseButton::Other,
                action: ButtonAction::Press,
                x: 0.,
                y: 0.,
            },
            &Controls::default(),
        );

        assert!(!state.is_dragging());
    }

    #[test]
    fn dragging_past_vertical_clamps_pitch() {
        let controls = Controls::default();

        let state = transition(ViewState::default(), &press(0., 1000.), &controls);
        let state = transition(state, &InputEvent::CursorMoved { x: 0., y: 0. }, &controls);

        assert_eq!(crate::camera::PITCH_LIMIT, state.camera.pitch);
        assert!(state.camera.up()[1] > 0.);
    }
}
