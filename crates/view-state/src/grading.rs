use shared_types::AppError;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Validate the instructor's score input before any request is made.
pub fn parse_score(input: &str) -> Result<f64, AppError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::validation("Enter a score first"));
    }
    match input.parse::<f64>() {
        Ok(score) if score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score) => Ok(score),
        _ => Err(AppError::validation("Score must be 0-100")),
    }
}
