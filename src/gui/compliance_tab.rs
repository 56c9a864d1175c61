//! Compliance Tab
//! Completeness scores, missing tag fields and the untagged worklist.

use crate::analysis::{analyze_compliance, UntaggedRow};
use crate::charts::{palette_color, ChartPlotter};
use crate::data::ResourceRecord;
use crate::gui::widgets;
use egui::RichText;

const LOWEST_N: usize = 5;
const WORKLIST_PREVIEW: usize = 10;

/// Action the compliance tab hands back to the app.
pub enum ComplianceAction {
    ExportUntagged(Vec<UntaggedRow>),
}

pub struct ComplianceTab;

impl ComplianceTab {
    pub fn show(ui: &mut egui::Ui, records: &[ResourceRecord]) -> Option<ComplianceAction> {
        let mut action = None;
        let overview = analyze_compliance(records, LOWEST_N);

        ui.columns(2, |cols| {
            let left = &mut cols[0];
            widgets::section_heading(left, "Lowest Tag Completeness Scores");
            egui::Grid::new("lowest_completeness_grid")
                .striped(true)
                .min_col_width(90.0)
                .spacing([8.0, 4.0])
                .show(left, |ui| {
                    ui.label(RichText::new("ResourceID").strong().size(11.0));
                    ui.label(RichText::new("Service").strong().size(11.0));
                    ui.label(RichText::new("Completeness").strong().size(11.0));
                    ui.label(RichText::new("Monthly Cost").strong().size(11.0));
                    ui.end_row();
                    for row in &overview.lowest_completeness {
                        ui.label(RichText::new(&row.resource_id).size(11.0));
                        ui.label(RichText::new(&row.service).size(11.0));
                        ui.label(RichText::new(widgets::pct(row.completeness_pct)).size(11.0));
                        ui.label(RichText::new(widgets::money(row.monthly_cost)).size(11.0));
                        ui.end_row();
                    }
                });

            widgets::section_heading(left, "Most Frequently Missing Tag Fields");
            let missing: Vec<(String, f64)> = overview
                .missing_fields
                .iter()
                .map(|(field, count)| (field.clone(), *count as f64))
                .collect();
            ChartPlotter::draw_bar_chart(left, "missing_fields", &missing, palette_color(3), 200.0);

            let right = &mut cols[1];
            widgets::section_heading(right, "Untagged Resources");
            right.label(format!(
                "{} untagged resources found",
                overview.untagged.len()
            ));
            ui_worklist(right, &overview.untagged);

            right.add_space(6.0);
            if right.button("Export Untagged Resources CSV").clicked() {
                action = Some(ComplianceAction::ExportUntagged(overview.untagged.clone()));
            }

            widgets::section_heading(right, "Tag Completeness Score Distribution");
            ChartPlotter::draw_completeness_histogram(
                right,
                "completeness_hist",
                &overview.histogram,
                200.0,
            );
        });

        action
    }
}

fn ui_worklist(ui: &mut egui::Ui, rows: &[UntaggedRow]) {
    egui::Grid::new("untagged_grid")
        .striped(true)
        .min_col_width(90.0)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label(RichText::new("ResourceID").strong().size(11.0));
            ui.label(RichText::new("Service").strong().size(11.0));
            ui.label(RichText::new("Department").strong().size(11.0));
            ui.label(RichText::new("Monthly Cost").strong().size(11.0));
            ui.end_row();
            for row in rows.iter().take(WORKLIST_PREVIEW) {
                ui.label(RichText::new(&row.resource_id).size(11.0));
                ui.label(RichText::new(&row.service).size(11.0));
                ui.label(
                    RichText::new(row.department.clone().unwrap_or_default()).size(11.0),
                );
                ui.label(RichText::new(widgets::money(row.monthly_cost)).size(11.0));
                ui.end_row();
            }
        });
}
