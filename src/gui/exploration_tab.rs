//! Exploration Tab
//! Dataset shape, preview, missing values and the tagging-status pie.

use crate::analysis::{explore, ExplorationSummary};
use crate::charts::{ChartPlotter, PieSlice, TAGGED_COLOR, UNTAGGED_COLOR};
use crate::data::{ResourceRecord, REQUIRED_COLUMNS};
use crate::gui::widgets;
use egui::RichText;

const PREVIEW_ROWS: usize = 5;

pub struct ExplorationTab;

impl ExplorationTab {
    pub fn show(ui: &mut egui::Ui, records: &[ResourceRecord]) {
        let summary = explore(records);

        ui.columns(2, |cols| {
            Self::show_overview(&mut cols[0], records, &summary);
            Self::show_tagging_status(&mut cols[1], &summary);
        });
    }

    fn show_overview(ui: &mut egui::Ui, records: &[ResourceRecord], summary: &ExplorationSummary) {
        widgets::section_heading(ui, "Dataset Overview");
        ui.label(format!(
            "Shape: {} rows, {} columns",
            summary.rows, summary.columns
        ));
        ui.add_space(6.0);

        egui::ScrollArea::horizontal()
            .id_salt("exploration_preview")
            .show(ui, |ui| {
                egui::Grid::new("preview_grid")
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for col in REQUIRED_COLUMNS {
                            ui.label(RichText::new(col).strong().size(11.0));
                        }
                        ui.end_row();

                        for r in records.iter().take(PREVIEW_ROWS) {
                            let opt = |v: &Option<String>| v.clone().unwrap_or_default();
                            ui.label(RichText::new(&r.resource_id).size(11.0));
                            ui.label(RichText::new(&r.service).size(11.0));
                            ui.label(RichText::new(&r.region).size(11.0));
                            ui.label(RichText::new(&r.account_id).size(11.0));
                            ui.label(RichText::new(opt(&r.department)).size(11.0));
                            ui.label(RichText::new(opt(&r.project)).size(11.0));
                            ui.label(RichText::new(opt(&r.environment)).size(11.0));
                            ui.label(RichText::new(opt(&r.owner)).size(11.0));
                            ui.label(RichText::new(opt(&r.cost_center)).size(11.0));
                            ui.label(RichText::new(widgets::money(r.monthly_cost)).size(11.0));
                            ui.label(RichText::new(r.tagged.as_flag()).size(11.0));
                            ui.end_row();
                        }
                    });
            });

        widgets::section_heading(ui, "Missing Values");
        egui::Grid::new("missing_grid")
            .striped(true)
            .min_col_width(110.0)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Column").strong().size(11.0));
                ui.label(RichText::new("Missing Count").strong().size(11.0));
                ui.end_row();
                for (col, missing) in &summary.missing_by_column {
                    ui.label(RichText::new(col).size(11.0));
                    ui.label(RichText::new(missing.to_string()).size(11.0));
                    ui.end_row();
                }
            });
    }

    fn show_tagging_status(ui: &mut egui::Ui, summary: &ExplorationSummary) {
        widgets::section_heading(ui, "Tagging Status");

        ui.horizontal_wrapped(|ui| {
            widgets::metric(ui, "Total Resources", &summary.rows.to_string());
            widgets::metric(ui, "Tagged Resources", &summary.tagged.to_string());
            widgets::metric(ui, "Untagged Resources", &summary.untagged.to_string());
            widgets::metric(ui, "Untagged Percentage", &widgets::pct(summary.untagged_pct));
        });

        ui.add_space(10.0);
        ui.label(RichText::new("Resource Tagging Status Distribution").strong());
        ui.add_space(4.0);
        ChartPlotter::draw_pie_chart(
            ui,
            &[
                PieSlice {
                    label: "Tagged".to_string(),
                    value: summary.tagged as f64,
                    color: TAGGED_COLOR,
                },
                PieSlice {
                    label: "Untagged".to_string(),
                    value: summary.untagged as f64,
                    color: UNTAGGED_COLOR,
                },
            ],
            180.0,
        );
    }
}
