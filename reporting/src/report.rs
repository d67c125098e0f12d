use std::fmt::Write as _;

use chrono::Local;
use serde::{Deserialize, Serialize};

use finsim::prelude::{SimulationParameters, SummaryStatistics};

use crate::utils::errors::Result;

/// Money amount with thousands separators and two decimals, e.g.
/// "Rs. 1,234,567.89". Non-finite amounts are printed verbatim.
pub fn format_rupees(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("Rs. {}", amount);
    }
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("Rs. {}{}.{:02}", sign, grouped, frac)
}

/// Canned insight lines attached to every report.
pub fn default_insights(metrics: &SummaryStatistics, run_count: usize) -> Vec<String> {
    vec![
        "Higher growth rate improves profits.".to_string(),
        format!("Standard deviation = {}", format_rupees(metrics.std_dev)),
        format!("Simulation runs = {}", run_count),
    ]
}

/// Everything the document-export collaborator needs for one report:
/// label, inputs, metrics, free-text insights and chart artifact paths.
/// Layout and pagination stay with the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub student: String,
    pub generated_at: String,
    pub parameters: SimulationParameters,
    pub run_count: usize,
    pub metrics: SummaryStatistics,
    pub insights: Vec<String>,
    pub chart_paths: Vec<String>,
}

impl SimulationReport {
    pub fn new(
        student: impl Into<String>,
        parameters: SimulationParameters,
        run_count: usize,
        metrics: SummaryStatistics,
    ) -> SimulationReport {
        SimulationReport {
            student: student.into(),
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            parameters,
            run_count,
            metrics,
            insights: default_insights(&metrics, run_count),
            chart_paths: Vec::new(),
        }
    }

    pub fn with_chart(mut self, path: impl Into<String>) -> SimulationReport {
        self.chart_paths.push(path.into());
        self
    }

    pub fn with_insight(mut self, line: impl Into<String>) -> SimulationReport {
        self.insights.push(line.into());
        self
    }

    /// Cover/summary page as plain text.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Financial Simulation Report");
        let _ = writeln!(out, "===========================");
        let _ = writeln!(out);
        let _ = writeln!(out, "Student: {}", self.student);
        let _ = writeln!(out, "Date: {}", self.generated_at);
        let _ = writeln!(out);
        let _ = writeln!(out, "Simulation Parameters");
        let _ = writeln!(
            out,
            "- Base Sales: {}",
            format_rupees(self.parameters.base_sales())
        );
        let _ = writeln!(
            out,
            "- Growth Rate: {:.2}%",
            self.parameters.growth_rate() * 100.0
        );
        let _ = writeln!(
            out,
            "- Cost % of Revenue: {:.2}%",
            self.parameters.cost_fraction() * 100.0
        );
        let _ = writeln!(
            out,
            "- Tax %: {:.2}%",
            self.parameters.tax_fraction() * 100.0
        );
        let _ = writeln!(out, "- Runs: {}", self.run_count);
        let _ = writeln!(out);
        let _ = writeln!(out, "Key Metrics");
        let _ = writeln!(out, "- Average Profit: {}", format_rupees(self.metrics.mean));
        let _ = writeln!(out, "- Max Profit: {}", format_rupees(self.metrics.max));
        let _ = writeln!(out, "- Min Profit: {}", format_rupees(self.metrics.min));
        let _ = writeln!(out, "- Std Dev: {}", format_rupees(self.metrics.std_dev));
        let _ = writeln!(out);
        let _ = writeln!(out, "Insights");
        for line in &self.insights {
            let _ = writeln!(out, "- {}", line);
        }
        if !self.chart_paths.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Charts");
            for path in &self.chart_paths {
                let _ = writeln!(out, "- {}", path);
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
