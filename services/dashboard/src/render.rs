use chrono::Local;
use credit_risk::scoring::dashboard::ChartBar;
use credit_risk::scoring::{DashboardView, FeatureImportance, ImportanceSummary};

const BAR_WIDTH: usize = 40;

pub(crate) fn render_dashboard(view: &DashboardView) {
    let metrics = &view.metrics;
    println!("Credit risk assessment ({})", Local::now().format("%Y-%m-%d %H:%M"));
    println!("- Probability of default: {}", metrics.probability_display);
    println!("- Risk segment: {}", metrics.risk_segment);
    println!("- Prediction: {}", metrics.prediction);

    println!("\nApplicant record");
    for (column, value) in view.record.cells() {
        println!("  {column:<18} {value}");
    }

    if let Some(top) = &view.top_feature {
        println!("\nMost important feature: {} ({})", top.feature, top.percent_display);
    }

    println!("\nTop {} feature importances", view.feature_importances.len());
    print_table(&view.feature_importances);

    println!();
    for line in chart_lines(&view.chart) {
        println!("{line}");
    }

    println!("\n{}", view.caption);
}

pub(crate) fn render_importances(summary: &ImportanceSummary) {
    if let Some(top) = &summary.top_feature {
        println!("Most important feature: {} ({})", top.feature, top.percent_display);
    }
    println!("Top {} feature importances", summary.features.len());
    print_table(&summary.features);
}

fn print_table(entries: &[FeatureImportance]) {
    let width = name_width(entries.iter().map(|entry| entry.feature.as_str()));
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "  {:>2}. {:<width$}  {:.4}",
            rank + 1,
            entry.feature,
            entry.importance
        );
    }
}

/// Horizontal bars, largest at the top. `chart` arrives least important first.
fn chart_lines(chart: &[ChartBar]) -> Vec<String> {
    let max = chart
        .iter()
        .map(|bar| bar.importance)
        .fold(0.0_f64, f64::max);
    let width = name_width(chart.iter().map(|bar| bar.feature.as_str()));

    chart
        .iter()
        .rev()
        .map(|bar| {
            format!(
                "{:<width$} | {} {:.3}",
                bar.feature,
                "#".repeat(bar_length(bar.importance, max)),
                bar.importance
            )
        })
        .collect()
}

fn bar_length(importance: f64, max: f64) -> usize {
    if max <= 0.0 || importance <= 0.0 {
        return 0;
    }
    ((importance / max) * BAR_WIDTH as f64).round() as usize
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|name| name.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(feature: &str, importance: f64) -> ChartBar {
        ChartBar {
            feature: feature.to_string(),
            importance,
        }
    }

    #[test]
    fn largest_bar_fills_the_width() {
        assert_eq!(bar_length(0.18, 0.18), BAR_WIDTH);
        assert_eq!(bar_length(0.09, 0.18), BAR_WIDTH / 2);
        assert_eq!(bar_length(0.0, 0.18), 0);
        assert_eq!(bar_length(0.1, 0.0), 0);
    }

    #[test]
    fn chart_prints_most_important_first() {
        let lines = chart_lines(&[bar("num__Age", 0.12), bar("num__Credit amount", 0.18)]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("num__Credit amount |"));
        assert!(lines[1].starts_with("num__Age           |"));
        assert!(lines[0].ends_with("0.180"));
    }
}
