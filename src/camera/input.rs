use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions};

/// Input units per pixel of mouse motion.
pub const MOUSE_AXIS_SCALE: f32 = 0.1;

/// Pointer motion of the current frame in input units.
#[derive(Resource, Reflect, Default, Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
#[reflect(Resource)]
pub struct LookInput(pub Vec2);

/// While set, orbit cameras hold their pose and state.
#[derive(Resource, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq, Deref, DerefMut)]
#[reflect(Resource)]
pub struct CameraPaused(pub bool);

/// Grabs the cursor on click, releases it on Escape, and collects this
/// frame's mouse motion into [`LookInput`].
pub fn handle_mouse_look(
    mut cursor_query: Query<&mut CursorOptions>,
    mut look: ResMut<LookInput>,
    mut cursor_events: MessageReader<MouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
) {
    let delta: Vec2 = cursor_events.read().map(|event| event.delta).sum();

    let Ok(mut cursor_options) = cursor_query.single_mut() else {
        look.0 = Vec2::ZERO;
        return;
    };

    if mouse.just_pressed(MouseButton::Left) {
        cursor_options.grab_mode = CursorGrabMode::Locked;
        cursor_options.visible = false;
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        cursor_options.grab_mode = CursorGrabMode::None;
        cursor_options.visible = true;
    }

    look.0 = if cursor_options.grab_mode == CursorGrabMode::Locked {
        // Positive yaw turns counter-clockwise seen from above, so rightward
        // motion has to turn negative
        Vec2::new(-delta.x, delta.y) * MOUSE_AXIS_SCALE
    } else {
        Vec2::ZERO
    };
}
