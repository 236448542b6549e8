pub(crate) mod adapter;
pub(crate) mod engine;
pub(crate) mod error;
pub(crate) mod metrics;
pub(crate) mod profile;
pub(crate) mod telemetry;

use crate::app::adapter::normalize;
use crate::app::engine::ExecutionEngine;
use crate::app::error::Error;
use crate::app::metrics::compute_kpis;
use crate::app::profile::Profile;
use crate::app::telemetry::SystemTelemetry;
use crate::configuration::settings::Policy;
use crate::reporter::console::ConsoleRenderer;
use crate::reporter::model::{build_report, Verdict};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// One run: invoke the engine once, score the result, print the report.
pub struct App<E> {
    engine: E,
    policy: Policy,
    profile: Profile,
    title_font: Option<PathBuf>,
}

impl<E: ExecutionEngine> App<E> {
    pub fn new(engine: E, policy: Policy, profile: Profile) -> Self {
        Self {
            engine,
            policy,
            profile,
            title_font: None,
        }
    }

    pub fn with_title_font(mut self, font: Option<PathBuf>) -> Self {
        self.title_font = font;
        self
    }

    pub fn renderer(&self) -> ConsoleRenderer<'_> {
        ConsoleRenderer::new(&self.profile).with_title_font(self.title_font.as_deref())
    }

    /// Prints the header, telemetry and profile sections.
    pub fn introduce<W: Write>(
        &self,
        out: &mut W,
        telemetry: &SystemTelemetry,
    ) -> Result<(), Error> {
        let renderer = self.renderer();
        renderer.render_header(out)?;
        renderer.render_telemetry(out, telemetry)?;
        renderer.render_profile(out)?;
        Ok(())
    }

    pub async fn run<W: Write>(&self, out: &mut W) -> Result<Verdict, Error> {
        let renderer = self.renderer();
        renderer.render_engine_start(out, &self.engine.describe())?;
        out.flush()?;

        let started = Instant::now();
        let raw = self.engine.execute().await?;
        info!("Engine finished in {} ms", started.elapsed().as_millis());

        let (summary, outcomes) = normalize(raw)?;
        let kpis = compute_kpis(&summary, &self.policy);
        let report = build_report(summary, kpis, &outcomes);
        info!(
            "Run scored {}% with {:?} risk, verdict {:?}",
            report.kpis.quality_score, report.kpis.risk_level, report.verdict
        );

        renderer.render_report(out, &report, &self.policy)?;
        out.flush()?;
        Ok(report.verdict)
    }

    /// Introduces and runs, returning the process exit code. The report goes
    /// to `out`; a fatal error section goes to `err`.
    pub async fn score<W: Write, X: Write>(
        &self,
        out: &mut W,
        err: &mut X,
        telemetry: &SystemTelemetry,
    ) -> i32 {
        let result = match self.introduce(out, telemetry) {
            Ok(()) => self.run(out).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(verdict) => {
                info!("Finished with {:?}", verdict);
                verdict.exit_code()
            }
            Err(e) => {
                error!("{}", e);
                let _ = out.flush();
                let _ = self.renderer().render_fatal(err, &e);
                let _ = err.flush();
                1
            }
        }
    }
}
