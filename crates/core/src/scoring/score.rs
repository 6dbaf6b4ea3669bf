//! Score normalization and duration-weighted aggregation.
//!
//! A score is `Option<u8>` in `0..=100` everywhere: `None` means "no data",
//! `Some(0)` means "measured and bad".

/// Normalize a provider score to an integer percentage.
///
/// Values `<= 1` are read as fractions and scaled by 100, larger values as
/// percentages. The result is clamped to `0..=100` and rounded. Missing or
/// non-finite input gives `None`.
pub fn normalize_score(raw: Option<f64>) -> Option<u8> {
    let v = raw?;
    if !v.is_finite() {
        return None;
    }
    let pct = if v <= 1.0 { v * 100.0 } else { v };
    Some(pct.clamp(0.0, 100.0).round() as u8)
}

/// One input to [`weighted_average`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem {
    pub score: Option<u8>,
    pub weight: f64,
}

impl ScoredItem {
    pub fn new(score: Option<u8>, weight: f64) -> Self {
        Self { score, weight }
    }

    /// Weight by span duration, falling back to 1 when the duration is unknown.
    pub fn with_duration(score: Option<u8>, duration: Option<f64>) -> Self {
        let weight = match duration {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => 1.0,
        };
        Self { score, weight }
    }
}

/// Weighted mean of the scored items, rounded to an integer percentage.
///
/// Unscored items are ignored entirely. Returns `None` when nothing is
/// scored (or every scored item has zero weight).
pub fn weighted_average<I>(items: I) -> Option<u8>
where
    I: IntoIterator<Item = ScoredItem>,
{
    let mut total = 0.0;
    let mut total_weight = 0.0;
    for item in items {
        let Some(score) = item.score else { continue };
        if !item.weight.is_finite() || item.weight <= 0.0 {
            continue;
        }
        total += score as f64 * item.weight;
        total_weight += item.weight;
    }
    if total_weight <= 0.0 {
        return None;
    }
    Some((total / total_weight).round().clamp(0.0, 100.0) as u8)
}

/// Blend two chunk scores in proportion to their phoneme counts.
pub fn blend_scores(a: Option<u8>, a_count: usize, b: Option<u8>, b_count: usize) -> Option<u8> {
    weighted_average([
        ScoredItem::new(a, a_count as f64),
        ScoredItem::new(b, b_count as f64),
    ])
}
