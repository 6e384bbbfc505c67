// src/gui/components/district_chart.rs
//
// Grouped bars per administrative district: opened next to closed.
// Drawn with the painter; one row per district, scaled to the largest count.

use eframe::egui::{ self, Align2, Color32, FontId, Pos2, Rect, Sense, Vec2 };

use crate::data::{ melt, Status };
use crate::gui::app::App;

const OPENED_COLOR: Color32 = Color32::from_rgb(0x5D, 0xAD, 0xE2);
const CLOSED_COLOR: Color32 = Color32::from_rgb(0xEC, 0x70, 0x63);

const LABEL_W: f32 = 90.0;
const BAR_H: f32 = 9.0;
const ROW_GAP: f32 = 6.0;

fn color(status: Status) -> Color32 {
    match status {
        Status::Opened => OPENED_COLOR,
        Status::Closed => CLOSED_COLOR,
    }
}

pub fn draw(ui: &mut egui::Ui, app: &App) {
    ui.strong("Opened vs. closed by district");

    if app.groups.is_empty() {
        ui.colored_label(Color32::from_rgb(0xF0, 0xD2, 0x3C), "No data matches the selected filters.");
        return;
    }

    ui.horizontal(|ui| {
        for status in [Status::Opened, Status::Closed] {
            ui.colored_label(color(status), "■");
            ui.label(status.label());
        }
    });

    let long = melt(&app.groups);
    let max = long.iter().map(|c| c.count).max().unwrap_or(0).max(1) as f32;
    let n = app.groups.len();

    egui::ScrollArea::vertical()
        .id_salt("district_chart_scroll")
        .max_height(260.0)
        .show(ui, |ui| {
            let width = ui.available_width();
            let row_h = 2.0 * BAR_H + ROW_GAP;
            let (rect, _) = ui.allocate_exact_size(Vec2::new(width, row_h * n as f32), Sense::hover());
            let painter = ui.painter_at(rect);
            let text_color = ui.visuals().text_color();
            let bar_w = (width - LABEL_W - 50.0).max(10.0);

            for (i, g) in app.groups.iter().enumerate() {
                let top = rect.top() + i as f32 * row_h;
                painter.text(
                    Pos2::new(rect.left(), top + BAR_H),
                    Align2::LEFT_CENTER,
                    &g.signgu,
                    FontId::proportional(12.0),
                    text_color,
                );
            }

            // melt() lists every Opened entry, then every Closed one, in group order.
            for (k, c) in long.iter().enumerate() {
                let i = k % n;
                let lane = if c.status == Status::Opened { 0.0 } else { BAR_H };
                let y = rect.top() + i as f32 * row_h + lane;
                let x0 = rect.left() + LABEL_W;
                let len = bar_w * c.count as f32 / max;
                let bar = Rect::from_min_size(Pos2::new(x0, y), Vec2::new(len, BAR_H - 1.0));
                painter.rect_filled(bar, 0.0, color(c.status));
                painter.text(
                    Pos2::new(x0 + len + 4.0, y + BAR_H / 2.0),
                    Align2::LEFT_CENTER,
                    c.count.to_string(),
                    FontId::proportional(10.0),
                    text_color,
                );
            }
        });
}
