// src/gui/app.rs
use std::error::Error;

use eframe::egui;
use tracing::{ debug, info, warn };

use crate::{
    config::state::AppState,
    data::{ AggregateRow, RawData, Selection, SelectionView, Totals },
};

use super::components;

pub fn run(options: eframe::NativeOptions, state: AppState) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Seoul local commercial districts",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(state)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // read-only final table; None when it could not be loaded
    pub raw: Option<RawData>,
    pub load_error: Option<String>,

    // filter choices, computed once from `raw`
    pub industries: Vec<String>,
    pub districts: Vec<String>,

    // derived view for the current selection
    pub row_ix: Vec<usize>,
    pub totals: Totals,
    pub groups: Vec<AggregateRow>,

    pub status: String,
}

impl App {
    pub fn new(mut state: AppState) -> Self {
        let (raw, load_error) = match RawData::load(&state.source) {
            Ok(raw) => {
                info!("Loaded {} ({} rows)", state.source.display(), raw.len());
                (Some(raw), None)
            }
            Err(e) => {
                warn!("Dashboard has no data: {e}");
                (None, Some(e.to_string()))
            }
        };

        let (industries, districts) = raw
            .as_ref()
            .map(|r| (r.industries(), r.districts()))
            .unwrap_or_default();

        if state.gui.selected_industry.is_empty() {
            if let Some(default) = raw.as_ref().and_then(|r| r.default_industry()) {
                state.gui.selected_industry = default;
            }
        }

        let mut app = Self {
            state,
            raw,
            load_error,
            industries,
            districts,
            row_ix: Vec::new(),
            totals: Totals::default(),
            groups: Vec::new(),
            status: s!("Idle"),
        };
        app.rebuild_view();
        app
    }

    /// Recompute filtered rows and aggregates from the current selection.
    pub fn rebuild_view(&mut self) {
        let Some(raw) = self.raw.as_ref() else { return };
        let gui = &self.state.gui;

        let view = SelectionView::from_raw(raw, Selection::new(&gui.selected_industry, &gui.selected_districts));
        self.totals = view.totals();
        self.groups = view.by_district();
        self.row_ix = view.row_ix;

        debug!(
            "View: industry={:?} districts={} rows={}",
            gui.selected_industry,
            gui.selected_districts.len(),
            self.row_ix.len()
        );
        self.status = format!("{} matching rows", self.row_ix.len());
    }

    /// Borrow the current view again without recomputing the filter.
    pub fn view(&self) -> Option<SelectionView<'_>> {
        let raw = self.raw.as_ref()?;
        Some(SelectionView::from_indices(raw, self.row_ix.clone()))
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.raw.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading("No data");
                ui.colored_label(
                    egui::Color32::from_rgb(0xEC, 0x70, 0x63),
                    "The final data file could not be loaded. Run `cli run` (collect + preprocess) first.",
                );
                if let Some(e) = &self.load_error {
                    ui.label(e.as_str());
                }
            });
            return;
        }

        egui::SidePanel::left("filters")
            .resizable(false)
            .show(ctx, |ui| {
                components::filter_panel::draw(ui, self);
            });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("Seoul '{}' commercial districts", self.state.gui.selected_industry));
            ui.label("Source: Seoul Open Data Plaza");

            ui.separator();
            components::kpis::draw(ui, self);
            ui.separator();
            components::district_chart::draw(ui, self);
            ui.separator();
            components::data_table::draw(ui, self);
        });
    }
}
