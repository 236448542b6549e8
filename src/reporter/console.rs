use crate::app::error::Error;
use crate::app::metrics::{RiskLevel, StabilityLabel};
use crate::app::profile::Profile;
use crate::app::telemetry::{two_columns, SystemTelemetry};
use crate::configuration::constants::layout::{
    HEADER_WIDTH, METRIC_COLUMN_WIDTH, NAME_COLUMN_WIDTH, QUALITY_BAR_WIDTH, SEPARATOR_WIDTH,
    STATUS_COLUMN_WIDTH, SUITE_COLUMN_WIDTH, TELEMETRY_COLUMN_WIDTH, VERDICT_ART_WIDTH,
};
use crate::configuration::settings::Policy;
use crate::reporter::banner::{
    gradient_color, pad_center, title, MUSHROOM_FAILURE, MUSHROOM_SUCCESS,
};
use crate::reporter::color::Rgb;
use crate::reporter::model::{fit_column, MetricStatus, Report, Row, StatusLabel, Verdict};
use colored::{ColoredString, Colorize};
use std::io::{self, Write};
use std::path::Path;

const TITLE: &str = "RUNNER-COGU";
const SUBTITLE: &str = " QUALITY ASSURANCE CLI v1.0 ";
const SEPARATOR_GREY: Rgb = Rgb::new(0x33, 0x33, 0x33);
const TELEMETRY_GREY: Rgb = Rgb::new(0xA0, 0xA0, 0xA0);

fn paint(text: &str, color: Rgb) -> ColoredString {
    text.truecolor(color.r, color.g, color.b)
}

fn separator(c: char, width: usize) -> ColoredString {
    paint(&c.to_string().repeat(width), SEPARATOR_GREY)
}

fn border(left: char, middle: char, right: char, widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("    {}{}{}", left, segments.join(middle.to_string().as_str()), right)
}

/// Writes the report sections to a terminal stream, themed with the
/// operator profile's colors.
pub struct ConsoleRenderer<'a> {
    profile: &'a Profile,
    title_font: Option<&'a Path>,
}

impl<'a> ConsoleRenderer<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self {
            profile,
            title_font: None,
        }
    }

    /// FIGlet font file for the header title.
    pub fn with_title_font(mut self, font: Option<&'a Path>) -> Self {
        self.title_font = font;
        self
    }

    fn heading(&self, text: &str) -> ColoredString {
        paint(&format!(" ➤ {}", text), self.profile.theme_primary).bold()
    }

    pub fn render_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        for (i, line) in title(TITLE, self.title_font).iter().enumerate() {
            writeln!(out, "{}", paint(line, gradient_color(i)))?;
        }
        let subtitle = pad_center(SUBTITLE, HEADER_WIDTH);
        writeln!(out, "{}", subtitle.white().on_black().bold())?;
        writeln!(out, "\n{}", separator('━', HEADER_WIDTH))
    }

    pub fn render_telemetry<W: Write>(
        &self,
        out: &mut W,
        telemetry: &SystemTelemetry,
    ) -> io::Result<()> {
        writeln!(out, "{}", self.heading("ADVANCED SYSTEM TELEMETRY"))?;
        let lines = telemetry.lines();
        for (left, right) in two_columns(&lines) {
            let row = format!(
                "   ▒ {:<width$} ▒ {}",
                left,
                right.unwrap_or(""),
                width = TELEMETRY_COLUMN_WIDTH
            );
            writeln!(out, "{}", paint(&row, TELEMETRY_GREY))?;
        }
        writeln!(out, "{}", separator('─', SEPARATOR_WIDTH))
    }

    pub fn render_profile<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let profile = self.profile;
        writeln!(out, "{}", self.heading("USER PROFILE LOADED"))?;
        writeln!(
            out,
            "{}{}",
            "   USER    : ".white(),
            paint(&profile.name, profile.theme_primary).bold()
        )?;
        writeln!(
            out,
            "{}{}",
            "   ROLE    : ".white(),
            paint(&profile.role, profile.theme_secondary)
        )?;
        writeln!(out, "{}{}", "   ACCESS  : ".white(), profile.access.green())?;
        writeln!(out, "{}", separator('─', SEPARATOR_WIDTH))
    }

    pub fn render_engine_start<W: Write>(&self, out: &mut W, target: &str) -> io::Result<()> {
        writeln!(
            out,
            "{}",
            paint("  STARTING TEST ENGINE...  ", self.profile.theme_primary)
                .on_truecolor(0x33, 0x33, 0x33)
                .bold()
        )?;
        writeln!(out, "{}\n", format!("   {}", target).bright_black())
    }

    pub fn render_report<W: Write>(
        &self,
        out: &mut W,
        report: &Report,
        policy: &Policy,
    ) -> io::Result<()> {
        writeln!(out, "\n{}", separator('━', SEPARATOR_WIDTH))?;
        self.render_analysis(out, report, policy)?;
        self.render_kpis(out, report, policy)?;
        writeln!(out, "\n{}", separator('─', SEPARATOR_WIDTH))?;
        self.render_breakdown(out, report)?;
        writeln!(out, "{}", separator('━', SEPARATOR_WIDTH))?;
        self.render_verdict(out, report)
    }

    fn render_analysis<W: Write>(
        &self,
        out: &mut W,
        report: &Report,
        policy: &Policy,
    ) -> io::Result<()> {
        let widths = [METRIC_COLUMN_WIDTH; 3];
        writeln!(out, "{}", self.heading("EXECUTION REPORT AND ANALYSIS"))?;
        writeln!(out, "{}", border('┌', '┬', '┐', &widths))?;
        writeln!(
            out,
            "    │ {:<w$} │ {:<w$} │ {:<w$} │",
            "METRIC",
            "VALUE",
            "STATUS",
            w = METRIC_COLUMN_WIDTH
        )?;
        writeln!(out, "{}", border('├', '┼', '┤', &widths))?;
        for row in report.metric_rows(policy) {
            let value = fit_column(&row.value, METRIC_COLUMN_WIDTH);
            let value = match row.metric {
                "Passed" => value.green(),
                "Failed" if report.summary.failed > 0 => value.red(),
                "Failed" => value.bright_black(),
                "Pending/Skipped" => value.yellow(),
                _ => value.normal(),
            };
            writeln!(
                out,
                "    │ {:<w$} │ {} │ {} │",
                row.metric,
                value,
                metric_status(row.status),
                w = METRIC_COLUMN_WIDTH
            )?;
        }
        writeln!(out, "{}", border('└', '┴', '┘', &widths))?;
        writeln!(out)
    }

    fn render_kpis<W: Write>(
        &self,
        out: &mut W,
        report: &Report,
        policy: &Policy,
    ) -> io::Result<()> {
        let kpis = &report.kpis;
        writeln!(out, "{}", self.heading("KPI & QUALITY"))?;

        let score = kpis.quality_score;
        let filled = quality_bar_cells(score);
        let bar = format!(
            "{}{}",
            score_color("█".repeat(filled).as_str(), score),
            paint(&"░".repeat(QUALITY_BAR_WIDTH - filled), SEPARATOR_GREY)
        );
        writeln!(
            out,
            "   Quality score     : [{}] {}",
            bar,
            score_color(&format!("{}%", score), score)
        )?;
        let stability = match kpis.stability_label() {
            StabilityLabel::Excellent => "A+ (Excellent)".green(),
            StabilityLabel::NeedsReview => "B (Needs Review)".yellow(),
        };
        writeln!(out, "   Stability index   : {}", stability)?;
        let risk = match kpis.risk_level {
            RiskLevel::Low => "LOW".green(),
            RiskLevel::Medium => "MEDIUM".yellow(),
            RiskLevel::High => "HIGH".red(),
        };
        writeln!(out, "   Risk assessment   : {}", risk)?;
        let gate = if kpis.meets_quality_gate(policy) {
            format!("MET (>= {}%)", policy.quality_gate).green()
        } else {
            format!("NOT MET (< {}%)", policy.quality_gate).yellow()
        };
        writeln!(out, "   Quality gate      : {}", gate)
    }

    fn render_breakdown<W: Write>(&self, out: &mut W, report: &Report) -> io::Result<()> {
        let widths = [STATUS_COLUMN_WIDTH, SUITE_COLUMN_WIDTH, NAME_COLUMN_WIDTH];
        writeln!(out, "{}", self.heading("TEST CASE BREAKDOWN"))?;
        writeln!(out, "{}", border('┌', '┬', '┐', &widths))?;
        writeln!(
            out,
            "    │ {:<s$} │ {:<t$} │ {:<n$} │",
            "STATUS",
            "SUITE / FILE",
            "SCENARIO",
            s = STATUS_COLUMN_WIDTH,
            t = SUITE_COLUMN_WIDTH,
            n = NAME_COLUMN_WIDTH
        )?;
        writeln!(out, "{}", border('├', '┼', '┤', &widths))?;
        for row in &report.rows {
            match row {
                Row::Test { status, suite, name } => {
                    let label = format!("{} {}", status.glyph(), status.text());
                    let label = fit_column(&label, STATUS_COLUMN_WIDTH);
                    writeln!(
                        out,
                        "    │ {} │ {} │ {} │",
                        status_color(&label, *status),
                        suite.cyan(),
                        name.white()
                    )?;
                }
                Row::NoTestsFound => {
                    writeln!(
                        out,
                        "    │ {} │ {} │ {} │",
                        fit_column("N/A", STATUS_COLUMN_WIDTH).bright_black(),
                        fit_column("No tests found", SUITE_COLUMN_WIDTH).bright_black(),
                        fit_column("Check your spec files", NAME_COLUMN_WIDTH).bright_black()
                    )?;
                }
            }
        }
        writeln!(out, "{}", border('└', '┴', '┘', &widths))
    }

    fn render_verdict<W: Write>(&self, out: &mut W, report: &Report) -> io::Result<()> {
        let (art, color) = match report.verdict {
            Verdict::Failure => {
                writeln!(
                    out,
                    "{}{}",
                    "  FAILURE  ".on_red().white().bold(),
                    format!(
                        " {} tests did not pass the quality gates.",
                        report.summary.failed
                    )
                    .red()
                )?;
                (MUSHROOM_FAILURE, Rgb::new(0xFF, 0x00, 0x00))
            }
            Verdict::Success => {
                writeln!(
                    out,
                    "{}{}",
                    "  SUCCESS  ".on_green().black().bold(),
                    " All quality criteria were met.".green()
                )?;
                (MUSHROOM_SUCCESS, Rgb::new(0x00, 0xFF, 0x00))
            }
        };
        for line in art.lines().filter(|l| !l.trim().is_empty()) {
            writeln!(out, "{}", paint(&pad_center(line, VERDICT_ART_WIDTH), color))?;
        }
        Ok(())
    }

    /// The engine reported it could not start; nothing was scored.
    pub fn render_failed_to_start<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "\n{}", separator('━', SEPARATOR_WIDTH))?;
        writeln!(out, "{}", "CRITICAL: FAILED TO START THE TEST RUNNER".red().bold())?;
        writeln!(out, "{}", message.red())
    }

    pub fn render_fatal<W: Write>(&self, out: &mut W, error: &Error) -> io::Result<()> {
        if let Error::ExecutionFailedToStart(message) = error {
            return self.render_failed_to_start(out, message);
        }
        writeln!(out, "{}", separator('!', SEPARATOR_WIDTH))?;
        writeln!(out, "{}", " FATAL ERROR".red().bold())?;
        writeln!(out, "{}", error.to_string().red())?;
        writeln!(out, "{}", separator('!', SEPARATOR_WIDTH))
    }
}

fn metric_status(status: MetricStatus) -> ColoredString {
    let text = fit_column(status.text(), METRIC_COLUMN_WIDTH);
    match status {
        MetricStatus::Info | MetricStatus::Speed => text.blue(),
        MetricStatus::Ok | MetricStatus::Fast => text.green(),
        MetricStatus::Critical => text.red(),
        MetricStatus::Attention | MetricStatus::Slow => text.yellow(),
    }
}

fn status_color(text: &str, status: StatusLabel) -> ColoredString {
    match status {
        StatusLabel::Passed => text.green(),
        StatusLabel::Failed => text.red(),
        StatusLabel::Skipped => text.yellow(),
        StatusLabel::Unknown => text.bright_black(),
    }
}

fn score_color(text: &str, score: u64) -> ColoredString {
    if score < 50 {
        text.red()
    } else if score < 80 {
        text.yellow()
    } else {
        text.green()
    }
}

fn quality_bar_cells(score: u64) -> usize {
    let filled = (score as f64 / 100.0 * QUALITY_BAR_WIDTH as f64).round() as usize;
    filled.min(QUALITY_BAR_WIDTH)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::app::adapter::{RunSummary, TestOutcome, TestState};
    use crate::app::metrics::compute_kpis;
    use crate::app::profile::default_profiles;
    use crate::reporter::model::build_report;

    fn render(report: &Report) -> String {
        colored::control::set_override(false);
        let profile = &default_profiles()[0];
        let mut out = Vec::new();
        ConsoleRenderer::new(profile)
            .render_report(&mut out, report, &Policy::default())
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn report(summary: RunSummary, outcomes: &[TestOutcome]) -> Report {
        build_report(summary, compute_kpis(&summary, &Policy::default()), outcomes)
    }

    #[test]
    fn test_render_failure_report() {
        let summary = RunSummary {
            total_suites: 1,
            total: 4,
            passed: 3,
            failed: 1,
            pending: 0,
            skipped: 0,
            duration_ms: 800,
        };
        let outcomes = vec![TestOutcome {
            title_path: vec!["Login".to_owned(), "rejects bad password".to_owned()],
            state: TestState::Failed,
            spec_file_name: "login.cy.js".to_owned(),
        }];
        let output = render(&report(summary, &outcomes));

        assert!(output.contains(&format!(
            "    │ {} │ {} │ {} │",
            fit_column("✖ FAILED", STATUS_COLUMN_WIDTH),
            fit_column("Login", SUITE_COLUMN_WIDTH),
            fit_column("rejects bad password", NAME_COLUMN_WIDTH)
        )));
        assert!(output.contains("Throughput (T/s)"));
        assert!(output.contains("5.00"));
        assert!(output.contains("Risk assessment   : MEDIUM"));
        assert!(output.contains("Stability index   : B (Needs Review)"));
        assert!(output.contains("Quality gate      : NOT MET (< 85%)"));
        assert!(output.contains("75%"));
        assert!(output.contains("  FAILURE   1 tests did not pass the quality gates."));
    }

    #[test]
    fn test_render_empty_report_has_sentinel_row() {
        let output = render(&report(RunSummary::default(), &[]));

        assert!(output.contains("No tests found"));
        assert!(output.contains("Check your spec files"));
        assert_eq!(output.matches("No tests found").count(), 1);
        assert!(output.contains("  SUCCESS   All quality criteria were met."));
    }

    #[test]
    fn test_rows_keep_table_width() {
        let summary = RunSummary {
            total_suites: 1,
            total: 1,
            passed: 1,
            ..RunSummary::default()
        };
        let outcomes = vec![TestOutcome {
            title_path: vec!["x".repeat(60), "y".repeat(70)],
            state: TestState::Passed,
            spec_file_name: "a.cy.js".to_owned(),
        }];
        let output = render(&report(summary, &outcomes));
        let widths = [STATUS_COLUMN_WIDTH, SUITE_COLUMN_WIDTH, NAME_COLUMN_WIDTH];
        let top = border('┌', '┬', '┐', &widths);
        let row = output
            .lines()
            .find(|l| l.contains("✔ PASSED"))
            .unwrap();

        assert_eq!(row.chars().count(), top.chars().count());
        assert!(row.contains(&format!("{}...", "x".repeat(35))));
    }

    #[test]
    fn test_render_fatal_error() {
        colored::control::set_override(false);
        let profile = &default_profiles()[0];
        let renderer = ConsoleRenderer::new(profile);
        let mut out = Vec::new();

        renderer
            .render_fatal(&mut out, &Error::Engine("boom".to_owned()))
            .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains(" FATAL ERROR"));
        assert!(output.contains("Execution engine error: boom"));

        let mut out = Vec::new();
        renderer
            .render_fatal(
                &mut out,
                &Error::ExecutionFailedToStart("no config".to_owned()),
            )
            .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("CRITICAL: FAILED TO START THE TEST RUNNER"));
        assert!(!output.contains("FATAL ERROR"));
    }

    #[test]
    fn test_quality_bar_cells() {
        assert_eq!(quality_bar_cells(0), 0);
        assert_eq!(quality_bar_cells(75), 30);
        assert_eq!(quality_bar_cells(99), 40);
        assert_eq!(quality_bar_cells(100), 40);
    }
}
