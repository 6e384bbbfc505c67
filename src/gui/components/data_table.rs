// src/gui/components/data_table.rs
//
// Raw rows behind the current view, behind a toggle. Read-only.

use eframe::egui::{ self, Align, Layout, RichText, TextWrapMode };
use egui_extras::{ Column, TableBuilder };
use tracing::debug;

use crate::config::consts::STORE_SEP;
use crate::csv::rows_to_string;
use crate::data::RAW_VIEW_HEADERS;
use crate::gui::app::App;

const WIDTHS: [f32; 5] = [200.0, 110.0, 80.0, 80.0, 80.0];

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    if !app.state.gui.show_raw_rows {
        return;
    }
    let Some(view) = app.view() else { return };
    let rows = view.display_rows();
    drop(view);

    ui.horizontal(|ui| {
        ui.strong(format!("Matching rows ({})", rows.len()));
        if ui.button("Copy").clicked() {
            if rows.is_empty() {
                app.status = s!("Nothing to copy");
            } else {
                let headers: Vec<String> = RAW_VIEW_HEADERS.iter().map(|h| s!(*h)).collect();
                ui.ctx().copy_text(rows_to_string(&headers, &rows, STORE_SEP));
                debug!("Copy: {} rows", rows.len());
                app.status = s!("Copied to clipboard");
            }
        }
    });

    let avail_h = ui.available_height();
    let mut table = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(avail_h)
        .id_salt("raw_rows_table");
    for w in WIDTHS {
        table = table.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
    }

    table
        .header(24.0, |mut header| {
            for h in RAW_VIEW_HEADERS {
                header.col(|ui| {
                    ui.add(egui::Label::new(RichText::new(h).strong()).selectable(false));
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let Some(data) = rows.get(row.index()) else { return };
                for (ci, cell) in data.iter().enumerate() {
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        // first two columns are names, the rest counts
                        let layout = if ci < 2 {
                            Layout::left_to_right(Align::Center)
                        } else {
                            Layout::right_to_left(Align::Center)
                        };
                        ui.with_layout(layout, |ui| { ui.label(cell.as_str()); });
                    });
                }
            });
        });
}
