use crate::app::adapter::RunSummary;
use crate::configuration::settings::Policy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Display-only reading of the stability index: anything short of a
/// perfect run needs review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityLabel {
    Excellent,
    NeedsReview,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityKpis {
    /// Percentage of passed tests, 0..=100.
    pub quality_score: u64,
    /// 100 minus a fixed penalty per failure, floored at 0.
    pub stability_index: u64,
    pub avg_time_per_test_ms: f64,
    /// Tests per wall-clock second over the whole run.
    pub throughput_per_sec: f64,
    pub risk_level: RiskLevel,
}

impl QualityKpis {
    pub fn stability_label(&self) -> StabilityLabel {
        if self.stability_index == 100 {
            StabilityLabel::Excellent
        } else {
            StabilityLabel::NeedsReview
        }
    }

    pub fn meets_quality_gate(&self, policy: &Policy) -> bool {
        self.quality_score >= policy.quality_gate
    }
}

pub fn compute_kpis(summary: &RunSummary, policy: &Policy) -> QualityKpis {
    let quality_score = if summary.total > 0 {
        let ratio = summary.passed as f64 / summary.total as f64;
        ((ratio * 100.0).round() as u64).min(100)
    } else {
        0
    };
    let stability_index =
        100u64.saturating_sub(summary.failed.saturating_mul(policy.stability_penalty));
    let avg_time_per_test_ms = if summary.total > 0 {
        summary.duration_ms as f64 / summary.total as f64
    } else {
        0.0
    };
    let throughput_per_sec = if summary.duration_ms > 0 {
        summary.total as f64 / (summary.duration_ms as f64 / 1000.0)
    } else {
        0.0
    };

    let mut risk_level = RiskLevel::Low;
    if summary.failed > 0 {
        risk_level = RiskLevel::Medium;
    }
    if summary.failed > policy.high_risk_failures || quality_score < policy.high_risk_quality {
        risk_level = RiskLevel::High;
    }

    let kpis = QualityKpis {
        quality_score,
        stability_index,
        avg_time_per_test_ms,
        throughput_per_sec,
        risk_level,
    };
    debug!("Computed {:?}", kpis);
    kpis
}
