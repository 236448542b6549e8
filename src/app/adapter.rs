use crate::app::error::Error;
use serde_derive::Deserialize;

const FAILED_STATUS: &str = "failed";

/// Result object as emitted by the execution engine.
///
/// Every field is optional; defaults are applied in [`normalize`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRunResult {
    #[serde(deserialize_with = "crate::configuration::deserialize::lenient_string::deserialize")]
    pub status: Option<String>,
    #[serde(deserialize_with = "crate::configuration::deserialize::lenient_string::deserialize")]
    pub message: Option<String>,
    #[serde(deserialize_with = "crate::configuration::deserialize::counter::deserialize")]
    pub total_suites: Option<u64>,
    #[serde(deserialize_with = "crate::configuration::deserialize::counter::deserialize")]
    pub total_tests: Option<u64>,
    #[serde(deserialize_with = "crate::configuration::deserialize::counter::deserialize")]
    pub total_passed: Option<u64>,
    #[serde(deserialize_with = "crate::configuration::deserialize::counter::deserialize")]
    pub total_failed: Option<u64>,
    #[serde(deserialize_with = "crate::configuration::deserialize::counter::deserialize")]
    pub total_pending: Option<u64>,
    #[serde(deserialize_with = "crate::configuration::deserialize::counter::deserialize")]
    pub total_skipped: Option<u64>,
    #[serde(deserialize_with = "crate::configuration::deserialize::counter::deserialize")]
    pub total_duration: Option<u64>,
    pub runs: Option<Vec<RawRun>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawRun {
    pub spec: Option<RawSpec>,
    pub tests: Option<Vec<RawTest>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSpec {
    #[serde(deserialize_with = "crate::configuration::deserialize::lenient_string::deserialize")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTest {
    pub title: Option<Vec<Option<String>>>,
    #[serde(deserialize_with = "crate::configuration::deserialize::lenient_string::deserialize")]
    pub state: Option<String>,
}

impl RawRunResult {
    pub fn from_slice(data: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// Immutable snapshot of one execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_suites: u64,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub pending: u64,
    pub skipped: u64,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn is_consistent(&self) -> bool {
        [self.failed, self.pending, self.skipped]
            .iter()
            .try_fold(self.passed, |sum, n| sum.checked_add(*n))
            == Some(self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestState {
    Passed,
    Failed,
    Pending,
    Skipped,
    Unknown,
}

impl From<&str> for TestState {
    fn from(state: &str) -> Self {
        match state {
            "passed" => TestState::Passed,
            "failed" => TestState::Failed,
            "pending" => TestState::Pending,
            "skipped" => TestState::Skipped,
            _ => TestState::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestOutcome {
    /// Suite path ending with the test name, never empty.
    pub title_path: Vec<String>,
    pub state: TestState,
    pub spec_file_name: String,
}

impl TestOutcome {
    pub fn name(&self) -> &str {
        self.title_path.last().map(String::as_str).unwrap_or_default()
    }

    pub fn suite_path(&self) -> &[String] {
        match self.title_path.split_last() {
            Some((_, suites)) => suites,
            None => &[],
        }
    }
}

/// Base name of a spec path, whichever separator the engine host uses.
pub fn spec_file_name(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path)
}

/// Turns the raw engine result into a summary and the ordered outcomes.
///
/// Missing counters default to zero and missing collections to empty; the
/// only failure is an engine that reports it never started.
pub fn normalize(raw: RawRunResult) -> Result<(RunSummary, Vec<TestOutcome>), Error> {
    if raw.status.as_deref() == Some(FAILED_STATUS) {
        let message = raw
            .message
            .unwrap_or_else(|| "engine reported status 'failed'".to_owned());
        return Err(Error::ExecutionFailedToStart(message));
    }

    let summary = RunSummary {
        total_suites: raw.total_suites.unwrap_or(0),
        total: raw.total_tests.unwrap_or(0),
        passed: raw.total_passed.unwrap_or(0),
        failed: raw.total_failed.unwrap_or(0),
        pending: raw.total_pending.unwrap_or(0),
        skipped: raw.total_skipped.unwrap_or(0),
        duration_ms: raw.total_duration.unwrap_or(0),
    };
    if !summary.is_consistent() {
        warn!(
            "Engine counters do not add up: {} passed + {} failed + {} pending + {} skipped != {} total",
            summary.passed, summary.failed, summary.pending, summary.skipped, summary.total
        );
    }

    let mut outcomes = vec![];
    for run in raw.runs.unwrap_or_default() {
        let spec_name = run
            .spec
            .and_then(|spec| spec.name)
            .map(|name| spec_file_name(&name).to_owned())
            .unwrap_or_default();
        for test in run.tests.unwrap_or_default() {
            let mut title_path: Vec<String> = test
                .title
                .unwrap_or_default()
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect();
            if title_path.is_empty() {
                title_path.push(String::new());
            }
            let state = test
                .state
                .as_deref()
                .map(TestState::from)
                .unwrap_or(TestState::Unknown);
            trace!("{:?} {:?} in {}", state, title_path, spec_name);
            outcomes.push(TestOutcome {
                title_path,
                state,
                spec_file_name: spec_name.clone(),
            });
        }
    }
    debug!("Normalized {:?} with {} outcomes", summary, outcomes.len());

    Ok((summary, outcomes))
}
