use colored::*;
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::Write;

use crate::core::{AnalysisReport, RoiReport};
use crate::formatting::{
    bp_band, bucket_colored, format_currency, format_pct, hba1c_flagged, BpBand,
};
use crate::io::output::OutputWriter;
use crate::risk::{RiskBucket, TierDistribution};
use crate::roi::RoiSummary;

pub struct TerminalWriter<W: Write> {
    writer: W,
    verbosity: u8,
    plain: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, verbosity: u8, plain: bool) -> Self {
        Self {
            writer,
            verbosity,
            plain,
        }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_banner("RISK STRATIFICATION REPORT")?;
        writeln!(self.writer, "Source: {}", report.source.display())?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;

        self.write_distribution(&report.distribution)?;

        let mut table = self.new_table(vec![
            "ID",
            "Age/Sex",
            "BP",
            "HbA1c",
            "Tier",
            "Risk",
            "Early ($)",
            "Late ($)",
            "Savings ($)",
            "Savings (%)",
        ]);
        for row in &report.patients {
            let bucket = row.assessment.bucket;
            table.add_row(vec![
                Cell::new(&row.record.patient_id),
                Cell::new(format!("{}/{}", row.record.age, row.record.sex)),
                Cell::new(row.record.blood_pressure_systolic)
                    .fg(bp_color(bp_band(row.record.blood_pressure_systolic))),
                Cell::new(row.record.hba1c_level).fg(if hba1c_flagged(row.record.hba1c_level) {
                    Color::Red
                } else {
                    Color::Green
                }),
                Cell::new(row.assessment.tier).fg(bucket_color(bucket)),
                Cell::new(bucket.name()).fg(bucket_color(bucket)),
                Cell::new(format_currency(row.projection.early_cost)),
                Cell::new(format_currency(row.projection.late_cost)),
                Cell::new(format_currency(row.projection.savings())).fg(Color::Green),
                Cell::new(format_pct(row.projection.savings_pct())).fg(Color::Green),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;

        if self.verbosity >= 1 {
            self.write_section("Key Risk Factors")?;
            for row in &report.patients {
                if row.assessment.key_risk_factors.is_empty() {
                    continue;
                }
                writeln!(
                    self.writer,
                    "  {}: {}",
                    row.record.patient_id.as_str().bold(),
                    row.assessment.key_risk_factors.join(", ")
                )?;
            }
            writeln!(self.writer)?;
        }

        self.write_roi_summary(&report.roi)
    }

    fn write_roi_report(&mut self, report: &RoiReport) -> anyhow::Result<()> {
        self.write_banner("ROI ANALYSIS REPORT")?;
        writeln!(self.writer, "Source: {}", report.source.display())?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;

        self.write_distribution(&report.distribution)?;

        let mut table = self.new_table(vec![
            "Patient",
            "Primary Condition",
            "Risk",
            "Conditions",
            "Early ($)",
            "Late ($)",
            "Savings ($)",
        ]);
        for prediction in &report.predictions {
            let early: f64 = prediction.projections.iter().map(|p| p.early_cost).sum();
            let late: f64 = prediction.projections.iter().map(|p| p.late_cost).sum();
            table.add_row(vec![
                Cell::new(&prediction.patient_id),
                Cell::new(prediction.primary_condition.as_deref().unwrap_or("-")),
                Cell::new(prediction.bucket.name()).fg(bucket_color(prediction.bucket)),
                Cell::new(prediction.projections.len()),
                Cell::new(format_currency(early)),
                Cell::new(format_currency(late)),
                Cell::new(format_currency(late - early)).fg(Color::Green),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;

        if self.verbosity >= 1 {
            self.write_section("Per-Condition Projections")?;
            for prediction in &report.predictions {
                for projection in &prediction.projections {
                    writeln!(
                        self.writer,
                        "  {} / {}: {} proactive vs {} reactive",
                        prediction.patient_id.as_str().bold(),
                        projection.condition.as_deref().unwrap_or("unspecified"),
                        format_currency(projection.early_cost).green(),
                        format_currency(projection.late_cost).red(),
                    )?;
                }
            }
            writeln!(self.writer)?;
        }

        self.write_roi_summary(&report.roi)
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_banner(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "═".repeat(43).cyan())?;
        writeln!(self.writer, "{}", format!("      {title}").bold().cyan())?;
        writeln!(self.writer, "{}", "═".repeat(43).cyan())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_section(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", title.bold())?;
        writeln!(self.writer, "{}", "─".repeat(43))?;
        Ok(())
    }

    fn write_distribution(&mut self, distribution: &TierDistribution) -> anyhow::Result<()> {
        self.write_section("Risk Distribution")?;
        writeln!(
            self.writer,
            "  {}: {}  {}: {}  {}: {}  {}: {}",
            bucket_colored(RiskBucket::Low, "Low"),
            distribution.low_count,
            bucket_colored(RiskBucket::Moderate, "Moderate"),
            distribution.moderate_count,
            bucket_colored(RiskBucket::Elevated, "Elevated"),
            distribution.elevated_count,
            bucket_colored(RiskBucket::High, "High"),
            distribution.high_count,
        )?;
        if distribution.unclassified_count > 0 {
            writeln!(
                self.writer,
                "  Unclassified: {}",
                distribution.unclassified_count
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_roi_summary(&mut self, roi: &RoiSummary) -> anyhow::Result<()> {
        self.write_section("ROI Summary")?;
        writeln!(
            self.writer,
            "  Total Savings:      {}  (hospital-wide with early intervention)",
            format_currency(roi.total_savings).green().bold()
        )?;
        writeln!(
            self.writer,
            "  Cost Reduction:     {}  (reduction in treatment costs)",
            format_pct(roi.savings_pct).green()
        )?;
        writeln!(
            self.writer,
            "  Avg. Savings:       {}  (per patient, {} patients)",
            format_currency(roi.avg_savings_per_patient).green(),
            roi.patient_count
        )?;
        writeln!(
            self.writer,
            "  Risk Reduction:     {}",
            match roi.risk_reduction_pct {
                Some(pct) => format_pct(pct).normal(),
                None => "n/a (no model scores in input)".dimmed(),
            }
        )?;
        writeln!(
            self.writer,
            "  Early vs Late:      {} vs {}",
            format_currency(roi.early_total),
            format_currency(roi.late_total).red()
        )?;
        Ok(())
    }

    fn new_table(&self, header: Vec<&str>) -> Table {
        let mut table = Table::new();
        table
            .load_preset(if self.plain { ASCII_FULL } else { UTF8_FULL })
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(header);
        if self.plain {
            table.force_no_tty();
        }
        table
    }
}

fn bp_color(band: BpBand) -> Color {
    match band {
        BpBand::Normal => Color::Cyan,
        BpBand::Elevated => Color::Yellow,
        BpBand::High => Color::Red,
    }
}

fn bucket_color(bucket: RiskBucket) -> Color {
    match bucket {
        RiskBucket::Low => Color::Green,
        RiskBucket::Moderate => Color::Yellow,
        RiskBucket::Elevated => Color::DarkYellow,
        RiskBucket::High => Color::Red,
        RiskBucket::Unclassified => Color::Grey,
    }
}
