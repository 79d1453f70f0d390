use crate::core::{AnalysisReport, RoiReport};
use crate::formatting::{format_currency, format_pct};
use crate::io::output::OutputWriter;
use crate::risk::TierDistribution;
use crate::roi::RoiSummary;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
    verbosity: u8,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            verbosity: 0,
        }
    }

    pub fn with_verbosity(writer: W, verbosity: u8) -> Self {
        Self { writer, verbosity }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header("Riskmap Analysis Report", report.generated_at)?;
        writeln!(self.writer, "Source: `{}`", report.source.display())?;
        writeln!(self.writer)?;

        self.write_roi_summary(&report.roi)?;
        self.write_distribution(&report.distribution)?;

        writeln!(self.writer, "## Patients")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| ID | Age/Sex | Tier | Risk | Early Cost | Late Cost | Savings | Savings % |"
        )?;
        writeln!(
            self.writer,
            "|----|---------|------|------|------------|-----------|---------|-----------|"
        )?;
        for row in &report.patients {
            writeln!(
                self.writer,
                "| {} | {}/{} | {} | {} | {} | {} | {} | {} |",
                row.record.patient_id,
                row.record.age,
                row.record.sex,
                row.assessment.tier,
                row.assessment.bucket,
                format_currency(row.projection.early_cost),
                format_currency(row.projection.late_cost),
                format_currency(row.projection.savings()),
                format_pct(row.projection.savings_pct()),
            )?;
        }
        writeln!(self.writer)?;

        if self.verbosity >= 1 {
            writeln!(self.writer, "### Key risk factors")?;
            writeln!(self.writer)?;
            for row in &report.patients {
                if row.assessment.key_risk_factors.is_empty() {
                    continue;
                }
                writeln!(
                    self.writer,
                    "- **{}**: {}",
                    row.record.patient_id,
                    row.assessment.key_risk_factors.join(", ")
                )?;
            }
            writeln!(self.writer)?;
        }

        Ok(())
    }

    fn write_roi_report(&mut self, report: &RoiReport) -> anyhow::Result<()> {
        self.write_header("Riskmap ROI Report", report.generated_at)?;
        writeln!(self.writer, "Source: `{}`", report.source.display())?;
        writeln!(self.writer)?;

        self.write_roi_summary(&report.roi)?;
        self.write_distribution(&report.distribution)?;

        writeln!(self.writer, "## Predictions")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Patient | Primary Condition | Risk | Conditions | Early Cost | Late Cost | Savings |"
        )?;
        writeln!(
            self.writer,
            "|---------|-------------------|------|------------|------------|-----------|---------|"
        )?;
        for prediction in &report.predictions {
            let early: f64 = prediction.projections.iter().map(|p| p.early_cost).sum();
            let late: f64 = prediction.projections.iter().map(|p| p.late_cost).sum();
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} | {} |",
                prediction.patient_id,
                prediction.primary_condition.as_deref().unwrap_or("-"),
                prediction.bucket,
                prediction.projections.len(),
                format_currency(early),
                format_currency(late),
                format_currency(late - early),
            )?;
        }
        writeln!(self.writer)?;

        if self.verbosity >= 1 {
            writeln!(self.writer, "### Per-condition projections")?;
            writeln!(self.writer)?;
            for prediction in &report.predictions {
                for projection in &prediction.projections {
                    writeln!(
                        self.writer,
                        "- **{}** / {}: {} proactive vs {} reactive ({} saved)",
                        prediction.patient_id,
                        projection.condition.as_deref().unwrap_or("unspecified"),
                        format_currency(projection.early_cost),
                        format_currency(projection.late_cost),
                        format_currency(projection.savings()),
                    )?;
                }
            }
            writeln!(self.writer)?;
        }

        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(
        &mut self,
        title: &str,
        generated_at: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "# {title}")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }

    fn write_roi_summary(&mut self, roi: &RoiSummary) -> anyhow::Result<()> {
        writeln!(self.writer, "## ROI Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Patients | {} |", roi.patient_count)?;
        writeln!(
            self.writer,
            "| Early-intervention total | {} |",
            format_currency(roi.early_total)
        )?;
        writeln!(
            self.writer,
            "| Late-treatment total | {} |",
            format_currency(roi.late_total)
        )?;
        writeln!(
            self.writer,
            "| Total savings | {} |",
            format_currency(roi.total_savings)
        )?;
        writeln!(
            self.writer,
            "| Cost reduction | {} |",
            format_pct(roi.savings_pct)
        )?;
        writeln!(
            self.writer,
            "| Avg. savings per patient | {} |",
            format_currency(roi.avg_savings_per_patient)
        )?;
        writeln!(
            self.writer,
            "| Risk reduction | {} |",
            roi.risk_reduction_pct
                .map(format_pct)
                .unwrap_or_else(|| "n/a".to_string())
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_distribution(&mut self, distribution: &TierDistribution) -> anyhow::Result<()> {
        writeln!(self.writer, "## Risk Distribution")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Bucket | Patients |")?;
        writeln!(self.writer, "|--------|----------|")?;
        writeln!(self.writer, "| Low | {} |", distribution.low_count)?;
        writeln!(self.writer, "| Moderate | {} |", distribution.moderate_count)?;
        writeln!(self.writer, "| Elevated | {} |", distribution.elevated_count)?;
        writeln!(self.writer, "| High | {} |", distribution.high_count)?;
        if distribution.unclassified_count > 0 {
            writeln!(
                self.writer,
                "| Unclassified | {} |",
                distribution.unclassified_count
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}
