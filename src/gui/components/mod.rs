// src/gui/components/mod.rs
pub mod data_table;
pub mod district_chart;
pub mod filter_panel;
pub mod kpis;
