//! TagScope Main Application
//! Main window with tab bar, executive summary and async CSV loading.

use crate::analysis::{cost_summary, explore, GovernanceSnapshot, UntaggedRow};
use crate::data::{ExportLoader, LoadedExport, ResourceRecord, SessionData};
use crate::gui::compliance_tab::{ComplianceAction, ComplianceTab};
use crate::gui::cost_tab::CostTab;
use crate::gui::dashboard_tab::DashboardTab;
use crate::gui::exploration_tab::ExplorationTab;
use crate::gui::remediation_tab::{RemediationAction, RemediationTab};
use crate::gui::widgets;
use crate::report::{self, GovernanceReport};
use egui::{Color32, RichText};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(Box<LoadedExport>),
    Error(String),
}

/// The five analysis tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Exploration,
    Costs,
    Compliance,
    Dashboard,
    Remediation,
}

impl Tab {
    const ALL: [Tab; 5] = [
        Tab::Exploration,
        Tab::Costs,
        Tab::Compliance,
        Tab::Dashboard,
        Tab::Remediation,
    ];

    fn label(&self) -> &'static str {
        match self {
            Tab::Exploration => "Data Exploration",
            Tab::Costs => "Cost Visibility",
            Tab::Compliance => "Tagging Compliance",
            Tab::Dashboard => "Visualizations",
            Tab::Remediation => "Tag Remediation",
        }
    }
}

/// Main application window.
pub struct TagScopeApp {
    session: Option<SessionData>,
    source_path: Option<PathBuf>,
    active_tab: Tab,
    dashboard: DashboardTab,
    remediation: RemediationTab,
    status: String,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl TagScopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, initial_csv: Option<PathBuf>) -> Self {
        let mut app = Self {
            session: None,
            source_path: None,
            active_tab: Tab::Exploration,
            dashboard: DashboardTab::new(),
            remediation: RemediationTab::new(),
            status: "Load a billing export CSV to begin".to_string(),
            load_rx: None,
            is_loading: false,
        };
        if let Some(path) = initial_csv {
            app.start_load(path);
        }
        app
    }

    /// Handle CSV file selection.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Kick off loading on a background thread.
    fn start_load(&mut self, path: PathBuf) {
        info!(path = %path.display(), "loading billing export");
        self.status = format!("Loading {}...", path.display());
        self.source_path = Some(path.clone());
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));
            match ExportLoader::load(&path) {
                Ok(export) => {
                    let _ = tx.send(LoadResult::Complete(Box::new(export)));
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.status = status;
                    }
                    LoadResult::Complete(export) => {
                        let summary = explore(&export.records);
                        self.status = format!(
                            "Loaded {} resources across {} accounts",
                            summary.rows, summary.account_count
                        );
                        info!(
                            rows = export.row_count(),
                            columns = export.columns().len(),
                            accounts = summary.account_count,
                            "billing export loaded"
                        );
                        let session = SessionData::new(export.records);
                        self.dashboard.reset(session.original());
                        self.remediation.rebuild(&session);
                        self.session = Some(session);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        warn!(%error, "billing export load failed");
                        self.status = format!("Error: {}", error);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn handle_compliance_action(&mut self, action: ComplianceAction) {
        match action {
            ComplianceAction::ExportUntagged(rows) => match export_untagged(&rows) {
                Ok(Some(path)) => {
                    info!(path = %path.display(), rows = rows.len(), "untagged worklist exported");
                    self.status = format!("Untagged resources exported to {}", path.display());
                }
                Ok(None) => {} // User cancelled
                Err(e) => {
                    warn!(error = %e, "untagged export failed");
                    self.status = format!("Error: {}", e);
                }
            },
        }
    }

    fn handle_remediation_action(&mut self, action: RemediationAction) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match action {
            RemediationAction::Apply(edits) => {
                let flipped = session.apply_edits(&edits);
                self.remediation.rebuild(session);
                info!(flipped, "remediation applied");
                self.status = format!("Remediation applied: {} resources now tagged", flipped);
            }
            RemediationAction::ExportRemediated => match export_remediated(session.remediated()) {
                Ok(Some(path)) => {
                    info!(path = %path.display(), "remediated dataset exported");
                    self.status = format!("Remediated dataset exported to {}", path.display());
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "remediated export failed");
                    self.status = format!("Error: {}", e);
                }
            },
            RemediationAction::ExportReport => {
                let before = GovernanceSnapshot::of(session.original());
                let after = GovernanceSnapshot::of(session.remediated());
                match export_report(GovernanceReport::new(before, after)) {
                    Ok(Some(path)) => {
                        info!(path = %path.display(), "governance report exported");
                        self.status = format!("Governance report exported to {}", path.display());
                        // Pop the report open so the numbers are right there.
                        if let Err(e) = open::that(&path) {
                            warn!(error = %e, "could not open exported report");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(error = %e, "report export failed");
                        self.status = format!("Error: {}", e);
                    }
                }
            }
        }
    }

    fn show_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("TagScope")
                        .size(20.0)
                        .color(Color32::from_rgb(100, 149, 237)),
                );
                ui.label(
                    RichText::new("Resource Tagging Cost Governance")
                        .size(12.0)
                        .color(Color32::GRAY),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Browse CSV").clicked() {
                        self.handle_browse_csv();
                    }
                    if let Some(name) = self
                        .source_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                    {
                        ui.label(RichText::new(name).size(12.0));
                    }
                });
            });
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    if ui
                        .selectable_label(self.active_tab == tab, tab.label())
                        .clicked()
                    {
                        self.active_tab = tab;
                    }
                }
            });
            ui.add_space(4.0);

            let status_color = if self.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
            ui.add_space(2.0);
        });
    }

    /// Executive summary over the original load (bottom panel).
    fn show_summary_panel(&self, ctx: &egui::Context) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let summary = explore(session.original());
        let costs = cost_summary(session.original());

        egui::TopBottomPanel::bottom("executive_summary").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(RichText::new("Executive Summary").size(13.0).strong());
            ui.horizontal_wrapped(|ui| {
                widgets::metric(ui, "Total Resources", &summary.rows.to_string());
                widgets::metric(
                    ui,
                    "Untagged Resources",
                    &widgets::pct(summary.untagged_pct),
                );
                widgets::metric(ui, "Total Monthly Cost", &widgets::money(costs.total));
                widgets::metric(ui, "Untagged Cost", &widgets::pct(costs.untagged_cost_pct));
            });
            ui.add_space(4.0);
        });
    }
}

impl eframe::App for TagScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        self.show_top_panel(ctx);
        self.show_summary_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
                return;
            }

            let mut compliance_action = None;
            let mut remediation_action = None;

            if let Some(session) = self.session.as_ref() {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| match self.active_tab {
                        Tab::Exploration => ExplorationTab::show(ui, session.original()),
                        Tab::Costs => CostTab::show(ui, session.original()),
                        Tab::Compliance => {
                            compliance_action = ComplianceTab::show(ui, session.original());
                        }
                        Tab::Dashboard => {
                            self.dashboard.show(ui, session.original());
                        }
                        Tab::Remediation => {
                            remediation_action = self.remediation.show(ui, session);
                        }
                    });
            }

            if let Some(action) = compliance_action {
                self.handle_compliance_action(action);
            }
            if let Some(action) = remediation_action {
                self.handle_remediation_action(action);
            }
        });
    }
}

fn export_untagged(rows: &[UntaggedRow]) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_file_name("untagged_resources.csv")
        .save_file()
    else {
        return Ok(None);
    };
    report::export_untagged_csv(rows, &path)?;
    Ok(Some(path))
}

fn export_remediated(records: &[ResourceRecord]) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_file_name("remediated_resources.csv")
        .save_file()
    else {
        return Ok(None);
    };
    report::export_records_csv(records, &path)?;
    Ok(Some(path))
}

fn export_report(report: GovernanceReport) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .set_file_name("governance_report.json")
        .save_file()
    else {
        return Ok(None);
    };
    report.export_json(&path)?;
    Ok(Some(path))
}
