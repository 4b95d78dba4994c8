use imgui::{Condition, WindowFlags};

use crate::camera::{OrbitCamera, ViewPreset};

const VIEW_CONTROLS_SIZE: [f32; 2] = [340.0, 220.0];
const HELP_SIZE: [f32; 2] = [220.0, 100.0];
const MARGIN: f32 = 10.0;

pub struct PresetGroup {
    pub title: &'static str,
    pub rows: &'static [&'static [ViewPreset]],
}

pub const PRESET_GROUPS: &[PresetGroup] = &[
    PresetGroup {
        title: "Top Diagonal Views",
        rows: &[&[
            ViewPreset::FrontRight,
            ViewPreset::TopFront,
            ViewPreset::FrontLeft,
        ]],
    },
    PresetGroup {
        title: "Main Views",
        rows: &[
            &[ViewPreset::Right, ViewPreset::Top, ViewPreset::Front],
            &[ViewPreset::Left, ViewPreset::Bottom, ViewPreset::Back],
        ],
    },
    PresetGroup {
        title: "Bottom Diagonal Views",
        rows: &[&[
            ViewPreset::RightBottom,
            ViewPreset::FrontBottom,
            ViewPreset::LeftBottom,
        ]],
    },
];

pub const HELP_LINES: &[&str] = &[
    "Camera controls:",
    "- Left drag: rotate",
    "- Arrow keys: pan",
    "- Mouse wheel: zoom",
];

fn fixed_panel_flags() -> WindowFlags {
    WindowFlags::NO_TITLE_BAR | WindowFlags::NO_RESIZE | WindowFlags::NO_MOVE
}

/// Preset buttons in the top-right corner. Returns the preset clicked this frame.
pub fn view_controls(ui: &imgui::Ui, camera: &OrbitCamera) -> Option<ViewPreset> {
    let [display_width, _] = ui.io().display_size;
    let mut clicked = None;

    ui.window("View Controls")
        .position(
            [display_width - VIEW_CONTROLS_SIZE[0] - MARGIN, MARGIN],
            Condition::Always,
        )
        .size(VIEW_CONTROLS_SIZE, Condition::Always)
        .flags(fixed_panel_flags())
        .build(|| {
            ui.text("View Orientation");
            ui.text(format!(
                "yaw {:.2}  pitch {:.2}  distance {:.1}",
                camera.yaw, camera.pitch, camera.distance
            ));

            for group in PRESET_GROUPS {
                ui.separator();
                ui.text(group.title);

                for row in group.rows {
                    for (column, preset) in row.iter().enumerate() {
                        if column > 0 {
                            ui.same_line();
                        }
                        if ui.button(preset.label()) {
                            clicked = Some(*preset);
                        }
                    }
                }
            }
        });

    clicked
}

pub fn help_panel(ui: &imgui::Ui) {
    ui.window("Help")
        .position([MARGIN, MARGIN], Condition::Always)
        .size(HELP_SIZE, Condition::Always)
        .flags(fixed_panel_flags())
        .build(|| {
            for line in HELP_LINES {
                ui.text(line);
            }
        });
}
