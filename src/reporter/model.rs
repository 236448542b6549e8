use crate::app::adapter::{RunSummary, TestOutcome, TestState};
use crate::app::metrics::QualityKpis;
use crate::configuration::constants::layout::{ELLIPSIS, NAME_COLUMN_WIDTH, SUITE_COLUMN_WIDTH};
use crate::configuration::settings::Policy;

const BREADCRUMB_SEPARATOR: &str = " > ";
const UNNAMED_TEST: &str = "Unnamed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Success,
    Failure,
}

impl Verdict {
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Success => 0,
            Verdict::Failure => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Passed,
    Failed,
    Skipped,
    Unknown,
}

impl From<TestState> for StatusLabel {
    fn from(state: TestState) -> Self {
        match state {
            TestState::Passed => StatusLabel::Passed,
            TestState::Failed => StatusLabel::Failed,
            TestState::Pending | TestState::Skipped => StatusLabel::Skipped,
            TestState::Unknown => StatusLabel::Unknown,
        }
    }
}

impl StatusLabel {
    pub fn text(self) -> &'static str {
        match self {
            StatusLabel::Passed => "PASSED",
            StatusLabel::Failed => "FAILED",
            StatusLabel::Skipped => "SKIPPED",
            StatusLabel::Unknown => "UNKNOWN",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            StatusLabel::Passed => '✔',
            StatusLabel::Failed => '✖',
            StatusLabel::Skipped => '○',
            StatusLabel::Unknown => '?',
        }
    }
}

/// One line of the per-test breakdown. Cells are already fitted to their
/// column widths.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Test {
        status: StatusLabel,
        suite: String,
        name: String,
    },
    NoTestsFound,
}

impl Row {
    pub fn from_outcome(outcome: &TestOutcome) -> Self {
        let breadcrumb = outcome.suite_path().join(BREADCRUMB_SEPARATOR);
        let suite = if breadcrumb.is_empty() {
            outcome.spec_file_name.as_str()
        } else {
            breadcrumb.as_str()
        };
        let name = match outcome.name() {
            "" => UNNAMED_TEST,
            name => name,
        };
        Row::Test {
            status: outcome.state.into(),
            suite: fit_column(suite, SUITE_COLUMN_WIDTH),
            name: fit_column(name, NAME_COLUMN_WIDTH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricStatus {
    Info,
    Ok,
    Critical,
    Attention,
    Slow,
    Fast,
    Speed,
}

impl MetricStatus {
    pub fn text(self) -> &'static str {
        match self {
            MetricStatus::Info => "INFO",
            MetricStatus::Ok => "OK",
            MetricStatus::Critical => "CRITICAL",
            MetricStatus::Attention => "ATTENTION",
            MetricStatus::Slow => "SLOW",
            MetricStatus::Fast => "FAST",
            MetricStatus::Speed => "SPEED",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub metric: &'static str,
    pub value: String,
    pub status: MetricStatus,
}

impl MetricRow {
    fn new(metric: &'static str, value: String, status: MetricStatus) -> Self {
        Self {
            metric,
            value,
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub summary: RunSummary,
    pub kpis: QualityKpis,
    pub rows: Vec<Row>,
    pub verdict: Verdict,
}

impl Report {
    pub fn build(summary: RunSummary, kpis: QualityKpis, outcomes: &[TestOutcome]) -> Self {
        let rows = if outcomes.is_empty() {
            vec![Row::NoTestsFound]
        } else {
            outcomes.iter().map(Row::from_outcome).collect()
        };
        let verdict = if summary.failed > 0 {
            Verdict::Failure
        } else {
            Verdict::Success
        };
        Self {
            summary,
            kpis,
            rows,
            verdict,
        }
    }

    /// Rows of the execution and analysis table.
    pub fn metric_rows(&self, policy: &Policy) -> Vec<MetricRow> {
        let summary = &self.summary;
        let kpis = &self.kpis;
        vec![
            MetricRow::new("Total suites", summary.total_suites.to_string(), MetricStatus::Info),
            MetricRow::new("Total tests", summary.total.to_string(), MetricStatus::Info),
            MetricRow::new("Passed", summary.passed.to_string(), MetricStatus::Ok),
            MetricRow::new(
                "Failed",
                summary.failed.to_string(),
                if summary.failed > 0 {
                    MetricStatus::Critical
                } else {
                    MetricStatus::Ok
                },
            ),
            MetricRow::new(
                "Pending/Skipped",
                summary.pending.saturating_add(summary.skipped).to_string(),
                MetricStatus::Attention,
            ),
            MetricRow::new("Total time", format!("{}ms", summary.duration_ms), MetricStatus::Info),
            MetricRow::new(
                "Average per test",
                format!("{:.2}ms", kpis.avg_time_per_test_ms),
                if kpis.avg_time_per_test_ms > policy.slow_test_ms {
                    MetricStatus::Slow
                } else {
                    MetricStatus::Fast
                },
            ),
            MetricRow::new(
                "Throughput (T/s)",
                format!("{:.2}", kpis.throughput_per_sec),
                MetricStatus::Speed,
            ),
        ]
    }
}

pub fn build_report(summary: RunSummary, kpis: QualityKpis, outcomes: &[TestOutcome]) -> Report {
    Report::build(summary, kpis, outcomes)
}

/// Truncates `text` with an ellipsis when it exceeds `width` characters,
/// otherwise pads it with spaces to exactly `width`.
pub fn fit_column(text: &str, width: usize) -> String {
    let length = text.chars().count();
    if length > width {
        let keep = width.saturating_sub(ELLIPSIS.len());
        let mut fitted: String = text.chars().take(keep).collect();
        fitted.push_str(ELLIPSIS);
        fitted
    } else {
        let mut fitted = text.to_owned();
        fitted.extend(std::iter::repeat(' ').take(width - length));
        fitted
    }
}
