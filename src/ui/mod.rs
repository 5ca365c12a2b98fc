//! egui rendering: input panels and the two charts.

pub mod charts;
pub mod panels;
