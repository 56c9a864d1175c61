//! TagScope - Cloud Resource Tagging Compliance & Cost Governance Dashboard
//!
//! A Rust application for analyzing cloud billing exports: tagging
//! compliance, cost visibility and interactive tag remediation.

mod analysis;
mod charts;
mod data;
mod gui;
mod report;

use eframe::egui;
use gui::TagScopeApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional billing export to load at startup.
    let initial_csv = std::env::args().nth(1).map(PathBuf::from);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("TagScope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "TagScope",
        options,
        Box::new(move |cc| Ok(Box::new(TagScopeApp::new(cc, initial_csv)))),
    )
}
