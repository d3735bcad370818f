use super::solver::SolveError;

/// Parses a free-text amount as typed into a form field.
///
/// Accepts a single decimal comma (`"1785,46"`) in addition to a decimal
/// point. Thousands separators are not supported.
pub fn parse_input(field: &'static str, text: &str) -> Result<f64, SolveError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SolveError::invalid(field, "is empty"));
    }

    let normalized = if trimmed.contains(',') {
        if trimmed.contains('.') || trimmed.matches(',').count() > 1 {
            return Err(SolveError::invalid(
                field,
                format!("'{}' is not a number", trimmed),
            ));
        }
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    let value = normalized
        .parse::<f64>()
        .map_err(|_| SolveError::invalid(field, format!("'{}' is not a number", trimmed)))?;

    // "NaN" and "inf" parse as f64 but are never valid amounts.
    if !value.is_finite() {
        return Err(SolveError::invalid(
            field,
            format!("'{}' is not a number", trimmed),
        ));
    }

    Ok(value)
}
