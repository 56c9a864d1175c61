//! Charts module - dashboard chart rendering

mod plotter;

pub use plotter::{palette_color, ChartPlotter, PieSlice, PALETTE, TAGGED_COLOR, UNTAGGED_COLOR};
