// src/gui/components/kpis.rs
use eframe::egui::{ self, RichText };

use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &App) {
    let t = app.totals;
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Total stores", t.stores);
        metric(&mut cols[1], "Opened", t.opened);
        metric(&mut cols[2], "Closed", t.closed);
    });
}

fn metric(ui: &mut egui::Ui, label: &str, value: u64) {
    ui.vertical_centered(|ui| {
        ui.label(label);
        ui.label(RichText::new(value.to_string()).size(26.0).strong());
    });
}
