//! Shared Widgets
//! Metric cards and formatting helpers used across the tabs.

use egui::{Color32, RichText};

/// A labeled metric card, Streamlit-metric style.
pub fn metric(ui: &mut egui::Ui, label: &str, value: &str) {
    metric_with_delta(ui, label, value, None);
}

/// Metric card with an optional delta line. `good` controls delta color.
pub fn metric_with_delta(
    ui: &mut egui::Ui,
    label: &str,
    value: &str,
    delta: Option<(String, bool)>,
) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(5.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(label).size(11.0).color(Color32::GRAY));
                ui.label(RichText::new(value).size(18.0).strong());
                if let Some((text, good)) = delta {
                    let color = if good {
                        Color32::from_rgb(40, 167, 69)
                    } else {
                        Color32::from_rgb(220, 53, 69)
                    };
                    ui.label(RichText::new(text).size(11.0).color(color));
                }
            });
        });
}

/// Section heading in the tabs' shared style.
pub fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.add_space(6.0);
    ui.label(RichText::new(text).size(14.0).strong());
    ui.add_space(4.0);
}

/// Format a dollar amount with thousands separators, e.g. `$12,345.67`.
pub fn money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        frac
    )
}

/// Format a percentage with one decimal, e.g. `42.5%`.
pub fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Signed count delta, e.g. `+3` / `-2`.
pub fn signed(value: i64) -> String {
    format!("{:+}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(12.5), "$12.50");
        assert_eq!(money(1234.0), "$1,234.00");
        assert_eq!(money(1234567.891), "$1,234,567.89");
        assert_eq!(money(-980.25), "-$980.25");
    }

    #[test]
    fn pct_and_signed_formats() {
        assert_eq!(pct(42.55), "42.6%");
        assert_eq!(signed(3), "+3");
        assert_eq!(signed(-2), "-2");
        assert_eq!(signed(0), "+0");
    }
}
