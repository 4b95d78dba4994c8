use glam::Vec2;
use imgui::{Key, MouseButton};

use crate::{camera::CameraInput, demo::DemoState, projection::Projection, ui};

pub fn update(
    state: &mut DemoState,
    projection: &Projection,
    ui: &imgui::Ui,
) -> anyhow::Result<()> {
    let input = sample_camera_input(ui);
    state.update(&input, ui.io().delta_time, projection);

    if let Some(preset) = ui::view_controls(ui, &state.camera) {
        state.apply_preset(preset);
    }
    ui::help_panel(ui);

    Ok(())
}

fn sample_camera_input(ui: &imgui::Ui) -> CameraInput {
    // Consume the drag so the next frame only sees new movement.
    let drag_delta = ui.is_mouse_dragging(MouseButton::Left).then(|| {
        let [x, y] = ui.mouse_drag_delta_with_button(MouseButton::Left);
        ui.reset_mouse_drag_delta(MouseButton::Left);
        Vec2::new(x, y)
    });

    CameraInput {
        drag_delta,
        wheel: ui.io().mouse_wheel,
        pan_up: ui.is_key_down(Key::UpArrow),
        pan_down: ui.is_key_down(Key::DownArrow),
        pan_left: ui.is_key_down(Key::LeftArrow),
        pan_right: ui.is_key_down(Key::RightArrow),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        f32::consts::FRAC_PI_4,
        sync::{Mutex, MutexGuard},
    };

    use imgui::{Io, Key, MouseButton};

    use super::*;
    use crate::config::DemoConfig;

    // Dear ImGui keeps one global current context, so tests take turns.
    static IMGUI_CONTEXT: Mutex<()> = Mutex::new(());

    fn lock_imgui() -> MutexGuard<'static, ()> {
        IMGUI_CONTEXT
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn headless_context() -> imgui::Context {
        let mut context = imgui::Context::create();
        context.set_ini_filename(None);
        context.io_mut().display_size = [800.0, 600.0];
        context.fonts().build_rgba32_texture();
        context
    }

    /// Queues `events`, runs one frame through `body` and ends the frame.
    fn frame<R>(
        context: &mut imgui::Context,
        events: impl FnOnce(&mut Io),
        body: impl FnOnce(&imgui::Ui) -> R,
    ) -> R {
        let io = context.io_mut();
        io.display_size = [800.0, 600.0];
        io.delta_time = 1.0 / 60.0;
        events(io);

        let ui = context.new_frame();
        let result = body(ui);
        context.render();
        result
    }

    #[test]
    fn drag_is_consumed_every_frame() {
        let _lock = lock_imgui();
        let mut context = headless_context();

        let idle = frame(
            &mut context,
            |io| io.add_mouse_pos_event([100.0, 300.0]),
            sample_camera_input,
        );
        assert_eq!(idle.drag_delta, None);

        let pressed = frame(
            &mut context,
            |io| io.add_mouse_button_event(MouseButton::Left, true),
            sample_camera_input,
        );
        assert_eq!(pressed.drag_delta, None);

        let first = frame(
            &mut context,
            |io| io.add_mouse_pos_event([150.0, 300.0]),
            sample_camera_input,
        );
        assert_eq!(first.drag_delta, Some(Vec2::new(50.0, 0.0)));

        let second = frame(
            &mut context,
            |io| io.add_mouse_pos_event([160.0, 300.0]),
            sample_camera_input,
        );
        assert_eq!(second.drag_delta, Some(Vec2::new(10.0, 0.0)));

        let released = frame(
            &mut context,
            |io| io.add_mouse_button_event(MouseButton::Left, false),
            sample_camera_input,
        );
        assert_eq!(released.drag_delta, None);
    }

    #[test]
    fn drag_turns_the_camera_by_new_movement_only() {
        let _lock = lock_imgui();
        let mut context = headless_context();
        let mut state = DemoState::new(&DemoConfig::default());
        let projection = Projection::new(800, 600);

        let mut run = |context: &mut imgui::Context, events: &dyn Fn(&mut Io)| {
            frame(context, events, |ui| update(&mut state, &projection, ui)).unwrap();
            state.camera.yaw
        };

        run(&mut context, &|io| io.add_mouse_pos_event([100.0, 300.0]));
        run(&mut context, &|io| io.add_mouse_button_event(MouseButton::Left, true));
        let after_first = run(&mut context, &|io| {
            io.add_mouse_pos_event([150.0, 300.0])
        });
        let after_second = run(&mut context, &|io| {
            io.add_mouse_pos_event([160.0, 300.0])
        });

        assert!((after_first - 0.25).abs() < 1e-5);
        assert!((after_second - 0.30).abs() < 1e-5);
    }

    #[test]
    fn arrow_keys_map_to_pan_flags() {
        let _lock = lock_imgui();
        let mut context = headless_context();

        let up = frame(
            &mut context,
            |io| io.add_key_event(Key::UpArrow, true),
            sample_camera_input,
        );
        assert!(up.pan_up);
        assert!(!up.pan_down && !up.pan_left && !up.pan_right);

        let none = frame(
            &mut context,
            |io| io.add_key_event(Key::UpArrow, false),
            sample_camera_input,
        );
        assert!(!none.pan_up && !none.pan_down && !none.pan_left && !none.pan_right);

        let right = frame(
            &mut context,
            |io| io.add_key_event(Key::RightArrow, true),
            sample_camera_input,
        );
        assert!(right.pan_right);
        assert!(!right.pan_up && !right.pan_down && !right.pan_left);
    }

    #[test]
    fn wheel_is_read_for_one_frame_and_zooms() {
        let _lock = lock_imgui();
        let mut context = headless_context();
        let mut state = DemoState::new(&DemoConfig::default());
        let projection = Projection::new(800, 600);

        let input = frame(
            &mut context,
            |io| io.add_mouse_wheel_event([0.0, 1.0]),
            sample_camera_input,
        );
        assert_eq!(input.wheel, 1.0);

        let input = frame(&mut context, |_| {}, sample_camera_input);
        assert_eq!(input.wheel, 0.0);

        frame(
            &mut context,
            |io| io.add_mouse_wheel_event([0.0, 1.0]),
            |ui| update(&mut state, &projection, ui),
        )
        .unwrap();
        assert!((state.camera.distance - 18.0).abs() < 1e-5);
    }

    #[test]
    fn clicking_a_preset_button_applies_it() {
        let _lock = lock_imgui();
        let mut context = headless_context();
        let mut state = DemoState::new(&DemoConfig::default());
        let projection = Projection::new(800, 600);

        // "Front-Right" is the first button: the panel sits at x 450, y 10 and
        // the button row follows two text lines, a separator and the group title.
        let button = [480.0, 83.0];

        let mut run = |context: &mut imgui::Context, events: &dyn Fn(&mut Io)| {
            frame(context, events, |ui| update(&mut state, &projection, ui)).unwrap();
        };
        run(&mut context, &|_| {});
        run(&mut context, &|io| io.add_mouse_pos_event(button));
        run(&mut context, &|io| io.add_mouse_button_event(MouseButton::Left, true));
        run(&mut context, &|io| io.add_mouse_button_event(MouseButton::Left, false));

        assert!((state.camera.yaw - FRAC_PI_4).abs() < 1e-6);
        assert!((state.camera.pitch - FRAC_PI_4).abs() < 1e-6);
    }
}
