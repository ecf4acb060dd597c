use egui::Color32;

use crate::PixelApp;
use crate::color::to_hex;

const SWATCH_SIZE: f32 = 24.0;

pub fn tools_panel(app: &mut PixelApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Colors");

            let brush = app.session.brush();
            ui.horizontal_wrapped(|ui| {
                for &color in &app.palette {
                    let swatch = egui::Button::new("")
                        .fill(color)
                        .min_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE))
                        .selected(color == brush);
                    if ui.add(swatch).on_hover_text(to_hex(color)).clicked() {
                        log::info!("Brush color selected: {}", to_hex(color));
                        app.session.set_brush(color);
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.label("Custom:");
                let mut custom: Color32 = brush;
                egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut custom,
                    egui::color_picker::Alpha::Opaque,
                );
                if custom != brush {
                    app.session.set_brush(custom);
                }
            });

            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.session.can_undo();
                let can_redo = app.session.can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            ui.horizontal(|ui| {
                if ui.selectable_label(app.renderer.show_grid(), "Show grid").clicked() {
                    app.renderer.toggle_grid();
                }
                if ui.button("Clear").clicked() {
                    app.clear();
                }
                if ui.button("Save").clicked() {
                    app.save();
                }
            });

            if let Some(status) = &app.status {
                ui.label(status);
            }

            ui.separator();

            let history = app.session.history();
            ui.horizontal(|ui| {
                ui.label(format!("State: {}", app.session.state().name()));
                ui.label(format!("Undo: {}/{}", history.undo_len(), history.max_depth()));
                ui.label(format!("Redo: {}", history.redo_len()));
            });

            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("history_grid")
                    .num_columns(2)
                    .spacing([40.0, 4.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Undo Stack");
                        ui.strong("Redo Stack");
                        ui.end_row();

                        let undo: Vec<String> = history.undo_stack().map(describe).collect();
                        let redo: Vec<String> = history.redo_stack().iter().map(describe).collect();

                        for i in 0..undo.len().max(redo.len()) {
                            ui.label(undo.get(i).map(String::as_str).unwrap_or(""));
                            ui.label(redo.get(i).map(String::as_str).unwrap_or(""));
                            ui.end_row();
                        }
                    });
            });
        });
}

fn describe(stroke: &crate::stroke::Stroke) -> String {
    format!("{} ({} cells)", stroke.kind().label(), stroke.len())
}
