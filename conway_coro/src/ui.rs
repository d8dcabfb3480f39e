// ui.rs - egui front end for the simulation controller
// Reads the engine every frame; all changes go through GameOfLife's methods
// or the controller, which refuses edits while the simulation runs.

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use std::time::Duration;
use crate::GameOfLife;

const MAX_PITCH: f32 = 15.5;    // 15px cells plus spacing
const MIN_PITCH: f32 = 2.0;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            let controls = self.controller.controls();

            // Run controls
            ui.horizontal(|ui| {
                if ui.add_enabled(controls.start, egui::Button::new("▶ Start")).clicked() {
                    self.controller.start();
                }
                if ui.add_enabled(controls.pause, egui::Button::new("⏸ Pause")).clicked() {
                    self.controller.pause();
                }
                if ui.add_enabled(controls.clear, egui::Button::new("⏹ Clear")).clicked() {
                    self.clear();
                }
                if ui.add_enabled(controls.edit, egui::Button::new("⏭ Step")).clicked() {
                    self.step();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.controller.engine().generation()));
            });

            ui.separator();

            // Size controls
            ui.horizontal(|ui| {
                ui.label("Width:");
                ui.add(egui::TextEdit::singleline(&mut self.width_input).desired_width(48.0));
                ui.label("Height:");
                ui.add(egui::TextEdit::singleline(&mut self.height_input).desired_width(48.0));
                if ui.button("Resize").clicked() {
                    self.resize_from_inputs();
                }

                ui.separator();

                ui.label("Share:");
                ui.code(self.share.as_str());
            });

            // Speed control
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.controller.tick_interval().as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.controller
                        .set_tick_interval(Duration::from_millis((1000.0 / speed) as u64));
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            if let Some(message) = &self.message {
                ui.colored_label(Color32::LIGHT_RED, message.as_str());
            }

            ui.separator();

            ui.label("Click cells to toggle them alive/dead while paused. Use Start/Pause to run the simulation.");

            ui.separator();

            egui::ScrollArea::both()
                .max_height((ui.available_height() - 40.0).max(100.0))
                .show(ui, |ui| self.draw_grid(ui, controls.edit));

            ui.separator();

            // Statistics
            let (live_cells, area) = {
                let engine = self.controller.engine();
                (engine.population(), engine.dimensions().area())
            };
            let percent = if area == 0 { 0.0 } else { live_cells as f32 / area as f32 * 100.0 };
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", area - live_cells));
                ui.label(format!("Population: {:.1}%", percent));
            });
        });

        // Keep repainting while the ticker is changing the grid
        if self.controller.is_running() {
            ctx.request_repaint();
        }
    }
}

impl GameOfLife {
    /// Paints the grid and toggles the clicked cell when editing is allowed.
    fn draw_grid(&mut self, ui: &mut egui::Ui, editable: bool) {
        let clicked = {
            let engine = self.controller.engine();
            let grid = engine.grid();
            let (width, height) = (grid.width(), grid.height());

            let pitch = (ui.available_width() / width.max(1) as f32).clamp(MIN_PITCH, MAX_PITCH);
            let spacing = if pitch > 4.0 { 0.5 } else { 0.0 };
            let box_size = pitch - spacing;
            let total_size = Vec2::new(pitch * width as f32, pitch * height as f32);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
            let origin = response.rect.min;

            // Dead background, then live cells on top
            painter.rect_filled(response.rect, 0.0, self.dead_color);
            for (x, y) in grid.live_cells() {
                painter.rect_filled(cell_rect(origin, pitch, box_size, x, y), 1.0, self.live_color);
            }

            // Subtle cell borders when the cells are big enough to show them
            if pitch >= 6.0 {
                let stroke = Stroke::new(0.2, Color32::from_gray(160));
                for y in 0..height {
                    for x in 0..width {
                        painter.rect_stroke(cell_rect(origin, pitch, box_size, x, y), 1.0, stroke);
                    }
                }
            }

            response
                .clicked()
                .then(|| response.interact_pointer_pos())
                .flatten()
                .and_then(|pos| cell_at(origin, pitch, pos))
                .filter(|&(x, y)| x < width && y < height)
        };

        if let Some((x, y)) = clicked.filter(|_| editable) {
            self.toggle_cell(x, y);
        }
    }
}

fn cell_rect(origin: Pos2, pitch: f32, box_size: f32, x: usize, y: usize) -> Rect {
    Rect::from_min_size(
        egui::pos2(origin.x + x as f32 * pitch, origin.y + y as f32 * pitch),
        Vec2::splat(box_size),
    )
}

fn cell_at(origin: Pos2, pitch: f32, pos: Pos2) -> Option<(usize, usize)> {
    let offset = pos - origin;
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    Some(((offset.x / pitch) as usize, (offset.y / pitch) as usize))
}
