// src/gui/components/filter_panel.rs
//
// Left panel: one industry (required) and any number of districts.
// Writes the choice straight into app state and rebuilds the view.

use eframe::egui;
use tracing::debug;

use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Filters");
    ui.add_space(4.0);

    let mut changed = false;

    let before = app.state.gui.selected_industry.clone();
    egui::ComboBox::from_label("Industry")
        .selected_text(app.state.gui.selected_industry.as_str())
        .width(180.0)
        .show_ui(ui, |ui| {
            for name in &app.industries {
                ui.selectable_value(&mut app.state.gui.selected_industry, name.clone(), name.as_str());
            }
        });
    if app.state.gui.selected_industry != before {
        debug!("UI: industry -> {:?}", app.state.gui.selected_industry);
        changed = true;
    }

    ui.separator();
    ui.label("Districts (none = all)");

    ui.horizontal(|ui| {
        if ui.button("All").clicked() {
            app.state.gui.selected_districts = app.districts.iter().cloned().collect();
            changed = true;
        }
        if ui.button("None").clicked() {
            app.state.gui.selected_districts.clear();
            changed = true;
        }
    });

    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    egui::ScrollArea::vertical()
        .id_salt("district_filter_scroll")
        .max_height((ui.available_height() - 40.0).max(80.0))
        .show(ui, |ui| {
            let w = ui.available_width();
            ui.set_min_width(w);

            for name in &app.districts {
                let mut on = app.state.gui.selected_districts.contains(name);
                if ui.checkbox(&mut on, name.as_str()).changed() {
                    if on {
                        app.state.gui.selected_districts.insert(name.clone());
                    } else {
                        app.state.gui.selected_districts.remove(name);
                    }
                    changed = true;
                }
            }
        });

    ui.separator();
    ui.checkbox(&mut app.state.gui.show_raw_rows, "Show matching rows");

    if changed {
        app.rebuild_view();
        debug!("UI: {} districts selected", app.state.gui.selected_districts.len());
    }
}
