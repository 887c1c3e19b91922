//! egui rendering layer: control panels, table previews, and charts.

pub mod panels;
pub mod plot;
pub mod table;
