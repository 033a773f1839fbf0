use super::domain::{ComplianceReport, ProperRating};
use super::scoring::ScoringConfig;

/// Blend the ESG score, compliance submission ratio, and PROPER rating into
/// one 0-100 environmental health index.
///
/// The ESG part is clamped to [0, 100] at the boundary rather than trusting
/// upstream producers. A missing rating falls back to the Blue tier, a
/// deliberate conservative default rather than 0 or 100.
pub fn compute_health(
    esg_score: f64,
    reports: &[ComplianceReport],
    rating: Option<ProperRating>,
    config: &ScoringConfig,
) -> u32 {
    let esg_part = esg_score.clamp(0.0, 100.0);

    let fulfilled = reports
        .iter()
        .filter(|report| report.status.is_fulfilled())
        .count();
    let compliance_part = (fulfilled as f64 / reports.len().max(1) as f64) * 100.0;

    let proper_part = match rating {
        Some(rating) => config.rating_scale.score(rating),
        None => config.rating_scale.fallback(),
    };

    let weights = &config.health_weights;
    let total =
        esg_part * weights.esg + compliance_part * weights.compliance + proper_part * weights.proper;

    total.round() as u32
}
