/// Scores at or above this count as a pass.
pub const PASS_THRESHOLD: f64 = 40.0;
pub const HIGH_THRESHOLD: f64 = 80.0;

/// Whole-number pass percentage; 0 when there is nothing to divide by.
pub fn pass_rate(pass_count: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (pass_count as f64 / total as f64 * 100.0).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Mid,
    Low,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            ScoreBand::High
        } else if score >= PASS_THRESHOLD {
            ScoreBand::Mid
        } else {
            ScoreBand::Low
        }
    }

    /// CSS class used by the dashboards.
    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::High => "score-high",
            ScoreBand::Mid => "score-mid",
            ScoreBand::Low => "score-low",
        }
    }
}

/// `72.456` -> `"72.5"`.
pub fn format_score(score: f64) -> String {
    format!("{score:.1}")
}
