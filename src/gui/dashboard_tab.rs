//! Dashboard Tab
//! Multi-select filters and the four filtered breakdown charts.

use crate::analysis::{dashboard_breakdowns, distinct_values, ResourceFilter};
use crate::charts::{palette_color, ChartPlotter, PieSlice};
use crate::data::ResourceRecord;
use crate::gui::widgets;
use egui::RichText;
use std::collections::HashSet;

/// Distinct values per filterable dimension, captured at load time.
#[derive(Default)]
struct FilterOptions {
    services: Vec<String>,
    regions: Vec<String>,
    departments: Vec<String>,
    environments: Vec<String>,
    projects: Vec<String>,
}

pub struct DashboardTab {
    options: FilterOptions,
    filter: Option<ResourceFilter>,
}

impl Default for DashboardTab {
    fn default() -> Self {
        Self {
            options: FilterOptions::default(),
            filter: None,
        }
    }
}

impl DashboardTab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild filter options for a fresh dataset; everything starts selected.
    pub fn reset(&mut self, records: &[ResourceRecord]) {
        self.options = FilterOptions {
            services: distinct_values(records, |r| Some(r.service.as_str())),
            regions: distinct_values(records, |r| Some(r.region.as_str())),
            departments: distinct_values(records, |r| r.department.as_deref()),
            environments: distinct_values(records, |r| r.environment.as_deref()),
            projects: distinct_values(records, |r| r.project.as_deref()),
        };
        self.filter = Some(ResourceFilter::select_all(records));
    }

    pub fn show(&mut self, ui: &mut egui::Ui, records: &[ResourceRecord]) {
        if self.filter.is_none() {
            self.reset(records);
        }
        let Some(filter) = self.filter.as_mut() else {
            return;
        };

        ui.columns(3, |cols| {
            dimension_picker(&mut cols[0], "Service", &self.options.services, &mut filter.services);
            dimension_picker(&mut cols[0], "Region", &self.options.regions, &mut filter.regions);
            dimension_picker(
                &mut cols[1],
                "Department",
                &self.options.departments,
                &mut filter.departments,
            );
            dimension_picker(
                &mut cols[1],
                "Environment",
                &self.options.environments,
                &mut filter.environments,
            );
            dimension_picker(&mut cols[2], "Project", &self.options.projects, &mut filter.projects);
        });

        let filtered = filter.apply(records);
        ui.add_space(6.0);
        ui.label(
            RichText::new(format!("Showing {} resources after filtering", filtered.len()))
                .strong(),
        );
        ui.separator();

        let breakdowns = dashboard_breakdowns(&filtered);

        ui.columns(2, |cols| {
            let left = &mut cols[0];
            widgets::section_heading(left, "Cost per Department by Tagging Status");
            ChartPlotter::draw_split_bar_chart(
                left,
                "dash_dept_split",
                &breakdowns.department_split,
                220.0,
            );

            widgets::section_heading(left, "Total Cost per Service");
            ChartPlotter::draw_hbar_chart(
                left,
                "dash_service_cost",
                &breakdowns.service_costs,
                palette_color(0),
                220.0,
            );

            let right = &mut cols[1];
            widgets::section_heading(right, "Cost Distribution by Environment");
            let slices: Vec<PieSlice> = breakdowns
                .environment_costs
                .iter()
                .enumerate()
                .map(|(i, (env, cost))| PieSlice {
                    label: env.clone(),
                    value: *cost,
                    color: palette_color(i),
                })
                .collect();
            ChartPlotter::draw_pie_chart(right, &slices, 180.0);

            widgets::section_heading(right, "Cost per Account by Tagging Status");
            ChartPlotter::draw_split_bar_chart(
                right,
                "dash_account_split",
                &breakdowns.account_split,
                220.0,
            );
        });
    }
}

/// Checkbox list for one filter dimension with select-all/clear shortcuts.
fn dimension_picker(
    ui: &mut egui::Ui,
    label: &str,
    options: &[String],
    selected: &mut HashSet<String>,
) {
    egui::CollapsingHeader::new(format!("Filter by {}", label))
        .default_open(false)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.small_button("All").clicked() {
                    selected.extend(options.iter().cloned());
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
            });
            egui::ScrollArea::vertical()
                .id_salt(format!("picker_{}", label))
                .max_height(120.0)
                .show(ui, |ui| {
                    for value in options {
                        let mut checked = selected.contains(value);
                        if ui.checkbox(&mut checked, value).changed() {
                            if checked {
                                selected.insert(value.clone());
                            } else {
                                selected.remove(value);
                            }
                        }
                    }
                });
        });
}
