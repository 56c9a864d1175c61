//! Remediation Tab
//! Editable grid of untagged resources plus before/after governance metrics.

use crate::analysis::{GovernanceDelta, GovernanceSnapshot};
use crate::data::{non_empty, SessionData, TagEdit};
use crate::gui::widgets;
use egui::{Color32, RichText};

/// Action the remediation tab hands back to the app.
pub enum RemediationAction {
    Apply(Vec<TagEdit>),
    ExportRemediated,
    ExportReport,
}

/// Edit buffers for one untagged resource.
struct EditRow {
    resource_id: String,
    service: String,
    monthly_cost: f64,
    department: String,
    project: String,
    environment: String,
    owner: String,
    cost_center: String,
}

#[derive(Default)]
pub struct RemediationTab {
    rows: Vec<EditRow>,
}

impl RemediationTab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refill the edit grid from the session's current untagged rows.
    pub fn rebuild(&mut self, session: &SessionData) {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        self.rows = session
            .untagged_remediated()
            .into_iter()
            .map(|r| EditRow {
                resource_id: r.resource_id.clone(),
                service: r.service.clone(),
                monthly_cost: r.monthly_cost,
                department: text(&r.department),
                project: text(&r.project),
                environment: text(&r.environment),
                owner: text(&r.owner),
                cost_center: text(&r.cost_center),
            })
            .collect();
    }

    fn collect_edits(&self) -> Vec<TagEdit> {
        self.rows
            .iter()
            .map(|row| TagEdit {
                resource_id: row.resource_id.clone(),
                department: non_empty(Some(&row.department)),
                project: non_empty(Some(&row.project)),
                environment: non_empty(Some(&row.environment)),
                owner: non_empty(Some(&row.owner)),
                cost_center: non_empty(Some(&row.cost_center)),
            })
            .collect()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, session: &SessionData) -> Option<RemediationAction> {
        let mut action = None;

        widgets::section_heading(ui, "Interactive Tag Remediation");
        ui.label("Edit untagged resources to improve tagging compliance:");
        ui.add_space(6.0);

        if self.rows.is_empty() {
            ui.label(
                RichText::new("All resources are properly tagged!")
                    .color(Color32::from_rgb(40, 167, 69))
                    .strong(),
            );
        } else {
            self.show_edit_grid(ui);
            ui.add_space(8.0);
            if ui
                .button(RichText::new("Apply Remediation").strong())
                .clicked()
            {
                action = Some(RemediationAction::Apply(self.collect_edits()));
            }
        }

        ui.add_space(10.0);
        ui.separator();
        widgets::section_heading(ui, "Before vs After Comparison");

        let before = GovernanceSnapshot::of(session.original());
        let after = GovernanceSnapshot::of(session.remediated());
        let delta = GovernanceDelta::between(&before, &after);
        Self::show_comparison(ui, &before, &after, &delta);

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Export Remediated Dataset CSV").clicked() {
                action = Some(RemediationAction::ExportRemediated);
            }
            if ui.button("Export Governance Report JSON").clicked() {
                action = Some(RemediationAction::ExportReport);
            }
        });

        ui.add_space(10.0);
        egui::CollapsingHeader::new("Key Insights")
            .default_open(false)
            .show(ui, |ui| {
                ui.label(format!(
                    "Compliance improvement: {} reduction in untagged resources",
                    widgets::pct(delta.untagged_reduction_pct)
                ));
                ui.label(format!(
                    "Cost visibility gain: {} in previously hidden costs now attributed",
                    widgets::money(delta.recovered_cost)
                ));
            });

        action
    }

    fn show_edit_grid(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_salt("remediation_grid_scroll")
            .max_height(260.0)
            .show(ui, |ui| {
                egui::Grid::new("remediation_grid")
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "ResourceID",
                            "Service",
                            "Department",
                            "Project",
                            "Environment",
                            "Owner",
                            "CostCenter",
                            "Monthly Cost",
                        ] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in &mut self.rows {
                            ui.label(RichText::new(&row.resource_id).size(11.0));
                            ui.label(RichText::new(&row.service).size(11.0));
                            ui.text_edit_singleline(&mut row.department);
                            ui.text_edit_singleline(&mut row.project);
                            ui.text_edit_singleline(&mut row.environment);
                            ui.text_edit_singleline(&mut row.owner);
                            ui.text_edit_singleline(&mut row.cost_center);
                            ui.label(RichText::new(widgets::money(row.monthly_cost)).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }

    fn show_comparison(
        ui: &mut egui::Ui,
        before: &GovernanceSnapshot,
        after: &GovernanceSnapshot,
        delta: &GovernanceDelta,
    ) {
        ui.columns(2, |cols| {
            let left = &mut cols[0];
            left.label(RichText::new("Original Data").strong());
            left.horizontal_wrapped(|ui| {
                widgets::metric(ui, "Tagged Resources", &before.tagged.to_string());
                widgets::metric(ui, "Untagged Resources", &before.untagged.to_string());
                widgets::metric(ui, "Untagged Cost", &widgets::money(before.untagged_cost));
            });

            let right = &mut cols[1];
            right.label(RichText::new("After Remediation").strong());
            right.horizontal_wrapped(|ui| {
                widgets::metric_with_delta(
                    ui,
                    "Tagged Resources",
                    &after.tagged.to_string(),
                    Some((widgets::signed(delta.tagged), delta.tagged >= 0)),
                );
                widgets::metric_with_delta(
                    ui,
                    "Untagged Resources",
                    &after.untagged.to_string(),
                    Some((widgets::signed(delta.untagged), delta.untagged <= 0)),
                );
                widgets::metric_with_delta(
                    ui,
                    "Untagged Cost",
                    &widgets::money(after.untagged_cost),
                    Some((widgets::money(delta.untagged_cost), delta.untagged_cost <= 0.0)),
                );
            });
        });
    }
}
