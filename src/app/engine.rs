use crate::app::adapter::RawRunResult;
use crate::app::error::Error;
use crate::configuration::settings::EngineSettings;
use futures::future::{BoxFuture, FutureExt};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// The external test-execution engine. One call, one raw result.
pub trait ExecutionEngine {
    /// Short human description of the target, shown before the run.
    fn describe(&self) -> String;
    fn execute(&self) -> BoxFuture<'_, Result<RawRunResult, Error>>;
}

/// Runs the engine bridge process and decodes the result it prints.
pub struct CommandEngine {
    settings: EngineSettings,
}

impl CommandEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }
}

impl ExecutionEngine for CommandEngine {
    fn describe(&self) -> String {
        let mode = if self.settings.headless {
            "Headless"
        } else {
            "Headed"
        };
        format!(
            "Target: {} ({}) | Spec Pattern: {}",
            capitalize(&self.settings.browser),
            mode,
            self.settings.spec_pattern
        )
    }

    fn execute(&self) -> BoxFuture<'_, Result<RawRunResult, Error>> {
        async move {
            let args = self.settings.command_args();
            info!("Spawning engine: {} {}", self.settings.command, args.join(" "));
            let mut command = Command::new(&self.settings.command);
            command
                .args(&args)
                .stdin(Stdio::null())
                .stderr(Stdio::inherit());
            let output = command.output().await.map_err(|e| {
                Error::Engine(format!("cannot spawn '{}': {}", self.settings.command, e))
            })?;
            // The engine exits with its failure count, so a non-zero status is
            // only meaningful when no result was printed.
            debug!("Engine exited with {}", output.status);
            match result_line(&output.stdout) {
                Some(line) => RawRunResult::from_slice(line),
                None => Err(Error::Engine(format!(
                    "engine exited with {} without printing a result",
                    output.status
                ))),
            }
        }
        .boxed()
    }
}

/// Replays a result previously saved to disk.
pub struct RecordedEngine {
    path: PathBuf,
}

impl RecordedEngine {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ExecutionEngine for RecordedEngine {
    fn describe(&self) -> String {
        format!("Target: recorded result | File: {}", self.path.display())
    }

    fn execute(&self) -> BoxFuture<'_, Result<RawRunResult, Error>> {
        async move {
            info!("Reading recorded result {}", self.path.display());
            let data = tokio::fs::read(&self.path).await?;
            RawRunResult::from_slice(&data)
        }
        .boxed()
    }
}

/// Last stdout line that looks like a JSON object.
fn result_line(stdout: &[u8]) -> Option<&[u8]> {
    stdout
        .split(|b| *b == b'\n')
        .map(<[u8]>::trim_ascii)
        .filter(|line| line.first() == Some(&b'{'))
        .last()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_result_line_picks_last_json_object() {
        let stdout = b"Opening Cypress...\n{\"totalTests\": 1}\r\nnoise\n  {\"totalTests\": 2}  \n\n";

        assert_eq!(result_line(stdout), Some(&b"{\"totalTests\": 2}"[..]));
        assert_eq!(result_line(b"no result here\n"), None);
        assert_eq!(result_line(b""), None);
    }

    #[test]
    fn test_describe_command_engine() {
        let engine = CommandEngine::new(EngineSettings::default());
        assert_eq!(
            engine.describe(),
            "Target: Electron (Headless) | Spec Pattern: cypress/e2e/**/*"
        );
    }

    #[tokio::test]
    async fn test_recorded_engine_reads_result() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"totalTests": 3, "totalPassed": 3, "runs": []}}"#).unwrap();

        let raw = RecordedEngine::new(file.path().to_path_buf())
            .execute()
            .await
            .unwrap();

        assert_eq!(raw.total_tests, Some(3));
        assert_eq!(raw.total_passed, Some(3));
    }

    #[tokio::test]
    async fn test_recorded_engine_missing_file_is_io_error() {
        let result = RecordedEngine::new(PathBuf::from("/nonexistent/run.json"))
            .execute()
            .await;

        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_command_engine_missing_binary_is_engine_error() {
        let settings = EngineSettings {
            command: "runner-cogu-engine-that-does-not-exist".to_owned(),
            ..EngineSettings::default()
        };

        let result = CommandEngine::new(settings).execute().await;

        assert!(matches!(result, Err(Error::Engine(_))));
    }
}
