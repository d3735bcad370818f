use super::solver::SolveError;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum FeeType {
    Flat(f64),
    Percentage(f64),
}

impl FeeType {
    pub fn validate(&self) -> Result<(), SolveError> {
        let value = match self {
            FeeType::Flat(fee) => *fee,
            FeeType::Percentage(percentage) => *percentage,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(SolveError::invalid(
                "fees",
                format!("must be a non-negative number, got {}", value),
            ));
        }
        Ok(())
    }

    pub fn fee_for(&self, amount: f64) -> f64 {
        match self {
            FeeType::Flat(fee) => *fee,
            FeeType::Percentage(percentage) => amount * percentage,
        }
    }
}
