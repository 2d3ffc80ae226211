//! Report rendering: JSON, Markdown, and colored terminal output.

use std::io::Write;

use colored::*;
use serde::Serialize;

use crate::core::{AnalysisReport, AnalyzeError, Priority, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
    fn write_error(&mut self, error: &AnalyzeError) -> anyhow::Result<()>;
}

/// Wire shape for error results: exactly one top-level key
#[derive(Debug, Serialize)]
struct ErrorResult {
    error: String,
}

pub fn create_writer<W: Write + 'static>(writer: W, format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn write_error(&mut self, error: &AnalyzeError) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&ErrorResult {
            error: error.to_string(),
        })?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "# Patternmap Analysis Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Functions | {} |",
            report.function_metrics.len()
        )?;
        writeln!(self.writer, "| Classes | {} |", report.class_metrics.len())?;
        writeln!(
            self.writer,
            "| Refactoring Suggestions | {} |",
            report.refactoring_suggestions.len()
        )?;
        writeln!(
            self.writer,
            "| Detected Patterns | {} |",
            report.detected_patterns.len()
        )?;
        writeln!(
            self.writer,
            "| Architectural Insights | {} |",
            report.architectural_insights.len()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_suggestions(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.refactoring_suggestions.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Refactoring Suggestions")?;
        writeln!(self.writer)?;
        for suggestion in &report.refactoring_suggestions {
            writeln!(
                self.writer,
                "- **{}** at `{}` ({:?} priority): {}",
                suggestion.kind, suggestion.location, suggestion.priority, suggestion.description
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_patterns(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.detected_patterns.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Detected Patterns")?;
        writeln!(self.writer)?;
        for pattern in &report.detected_patterns {
            writeln!(
                self.writer,
                "- **{}** ({}, confidence {:.2}): {}",
                pattern.name,
                pattern.category.display_name(),
                pattern.confidence,
                pattern.description
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_insights(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.architectural_insights.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Architectural Insights")?;
        writeln!(self.writer)?;
        for insight in &report.architectural_insights {
            writeln!(
                self.writer,
                "- [{:?}] {}: {}",
                insight.severity, insight.description, insight.recommendation
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header()?;
        self.write_summary(report)?;
        self.write_suggestions(report)?;
        self.write_patterns(report)?;
        self.write_insights(report)?;
        Ok(())
    }

    fn write_error(&mut self, error: &AnalyzeError) -> anyhow::Result<()> {
        writeln!(self.writer, "# Patternmap Analysis Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Error: {}", error)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

fn priority_label(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "high".red().bold(),
        Priority::Medium => "medium".yellow(),
        Priority::Low => "low".green(),
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Warning => "warning".yellow(),
        Severity::Info => "info".cyan(),
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} {} function(s), {} class(es) analyzed",
            "patternmap:".bold(),
            report.function_metrics.len(),
            report.class_metrics.len()
        )?;
        writeln!(self.writer)?;

        if !report.refactoring_suggestions.is_empty() {
            writeln!(self.writer, "{}", "Refactoring Suggestions".bold().underline())?;
            for suggestion in &report.refactoring_suggestions {
                writeln!(
                    self.writer,
                    "  [{}] {} {} - {}",
                    priority_label(suggestion.priority),
                    suggestion.kind.cyan(),
                    suggestion.location,
                    suggestion.description
                )?;
            }
            writeln!(self.writer)?;
        }

        if !report.detected_patterns.is_empty() {
            writeln!(self.writer, "{}", "Detected Patterns".bold().underline())?;
            for pattern in &report.detected_patterns {
                writeln!(
                    self.writer,
                    "  {} ({}, {:.2}) - {}",
                    pattern.name.magenta(),
                    pattern.category.display_name(),
                    pattern.confidence,
                    pattern.description
                )?;
            }
            writeln!(self.writer)?;
        }

        if !report.architectural_insights.is_empty() {
            writeln!(self.writer, "{}", "Architectural Insights".bold().underline())?;
            for insight in &report.architectural_insights {
                writeln!(
                    self.writer,
                    "  [{}] {} - {}",
                    severity_label(insight.severity),
                    insight.description,
                    insight.recommendation
                )?;
            }
            writeln!(self.writer)?;
        }

        if report.finding_count() == 0 {
            writeln!(self.writer, "{}", "No findings.".green())?;
        }
        Ok(())
    }

    fn write_error(&mut self, error: &AnalyzeError) -> anyhow::Result<()> {
        writeln!(self.writer, "{} {}", "error:".red().bold(), error)?;
        Ok(())
    }
}
