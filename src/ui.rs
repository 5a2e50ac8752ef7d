//! The on-screen control: one two-value mode switch plus an fps readout,
//! anchored to the bottom edge.

use crate::morph::SceneMode;

/// Draw the overlay for this frame.
///
/// Returns the mode the user clicked, if any.
pub fn draw(ctx: &egui::Context, mode: SceneMode, fps: f32) -> Option<SceneMode> {
    let mut picked = None;

    egui::Area::new(egui::Id::new("mode-switch"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -16.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui
                        .selectable_label(mode == SceneMode::Scattered, "Scatter")
                        .clicked()
                    {
                        picked = Some(SceneMode::Scattered);
                    }
                    if ui
                        .selectable_label(mode == SceneMode::Formed, "Tree")
                        .clicked()
                    {
                        picked = Some(SceneMode::Formed);
                    }
                    ui.separator();
                    ui.weak(format!("{fps:.0} fps"));
                });
            });
        });

    picked
}
