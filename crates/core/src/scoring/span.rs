//! Provider time units → seconds, and playback padding.

use crate::config::SpanPadding;
use crate::types::{RawSpan, Span};

/// Provider time unit most services use: hundredths of a second.
pub const DEFAULT_UNIT_TO_SECONDS: f64 = 0.01;

/// Convert a raw start/end pair to seconds.
///
/// Both ends must be present and finite with `end > start`; anything else
/// is `None`, never a zero- or negative-length span.
pub fn resolve_span(raw_start: Option<f64>, raw_end: Option<f64>, unit_to_seconds: f64) -> Option<Span> {
    let (start, end) = (raw_start?, raw_end?);
    if !start.is_finite() || !end.is_finite() || end <= start {
        return None;
    }
    let span = Span {
        start: start * unit_to_seconds,
        end: end * unit_to_seconds,
    };
    (span.end > span.start).then_some(span)
}

/// [`resolve_span`] over an optional [`RawSpan`].
pub fn resolve_raw_span(raw: Option<&RawSpan>, unit_to_seconds: f64) -> Option<Span> {
    raw.and_then(|r| resolve_span(r.start, r.end, unit_to_seconds))
}

/// Widen a span by the padding margins for audio playback.
///
/// The start never goes below zero and, when the clip length is known, the
/// end never passes it. A span that starts beyond the clip end collapses to
/// the clip end.
pub fn pad_span(span: &Span, padding: &SpanPadding, clip_duration: Option<f64>) -> Span {
    let start = (span.start - padding.pre).max(0.0);
    let mut end = span.end + padding.post;
    if let Some(clip) = clip_duration {
        end = end.min(clip);
    }
    Span {
        start: start.min(end),
        end,
    }
}
