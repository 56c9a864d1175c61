//! Cost Visibility Tab
//! Cost totals, top projects and the department/environment breakdowns.

use crate::analysis::{
    cost_by_project, cost_summary, dashboard_breakdowns, untagged_cost_by_department,
};
use crate::charts::{ChartPlotter, UNTAGGED_COLOR};
use crate::data::ResourceRecord;
use crate::gui::widgets;
use egui::RichText;

const TOP_PROJECTS: usize = 10;
const TOP_DEPARTMENTS: usize = 10;

pub struct CostTab;

impl CostTab {
    pub fn show(ui: &mut egui::Ui, records: &[ResourceRecord]) {
        let summary = cost_summary(records);

        ui.columns(2, |cols| {
            let left = &mut cols[0];
            widgets::section_heading(left, "Cost Summary");
            left.horizontal_wrapped(|ui| {
                widgets::metric(ui, "Total Monthly Cost", &widgets::money(summary.total));
                widgets::metric(ui, "Tagged Cost", &widgets::money(summary.tagged_cost));
                widgets::metric(ui, "Untagged Cost", &widgets::money(summary.untagged_cost));
                widgets::metric(
                    ui,
                    "Untagged Cost Percentage",
                    &widgets::pct(summary.untagged_cost_pct),
                );
            });

            widgets::section_heading(left, "Top Projects by Cost");
            egui::Grid::new("project_cost_grid")
                .striped(true)
                .min_col_width(120.0)
                .spacing([8.0, 4.0])
                .show(left, |ui| {
                    ui.label(RichText::new("Project").strong().size(11.0));
                    ui.label(RichText::new("Monthly Cost").strong().size(11.0));
                    ui.end_row();
                    for (project, cost) in cost_by_project(records).iter().take(TOP_PROJECTS) {
                        ui.label(RichText::new(project).size(11.0));
                        ui.label(RichText::new(widgets::money(*cost)).size(11.0));
                        ui.end_row();
                    }
                });

            let right = &mut cols[1];
            widgets::section_heading(right, "Untagged Cost by Department");
            let by_dept: Vec<(String, f64)> = untagged_cost_by_department(records)
                .into_iter()
                .take(TOP_DEPARTMENTS)
                .collect();
            if by_dept.is_empty() {
                right.label(RichText::new("No untagged cost").size(12.0));
            } else {
                ChartPlotter::draw_bar_chart(
                    right,
                    "untagged_by_dept",
                    &by_dept,
                    UNTAGGED_COLOR,
                    220.0,
                );
            }

            widgets::section_heading(right, "Cost by Environment and Tagging Status");
            let breakdowns = dashboard_breakdowns(records);
            ChartPlotter::draw_split_bar_chart(
                right,
                "env_split",
                &breakdowns.environment_split,
                220.0,
            );
        });
    }
}
