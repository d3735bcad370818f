use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("target price equals the market price ({0}); no finite purchase reaches it")]
    Degenerate(f64),
}

impl SolveError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SolveError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub quantity: f64,
    pub average_price: f64,
    pub market_price: f64,
    pub target_price: f64,
}

impl CalculationRequest {
    pub fn solve(&self) -> Result<CalculationResult, SolveError> {
        solve(
            self.quantity,
            self.average_price,
            self.market_price,
            self.target_price,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    pub required_quantity: f64,
    pub required_cost: f64,
    pub feasible: bool,
}

impl CalculationResult {
    fn infeasible() -> Self {
        CalculationResult {
            required_quantity: 0.0,
            required_cost: 0.0,
            feasible: false,
        }
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), SolveError> {
    if !value.is_finite() {
        return Err(SolveError::invalid(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(SolveError::invalid(
            field,
            format!("must be greater than zero, got {}", value),
        ));
    }
    Ok(())
}

/// Number of units to buy at `market_price` so that the weighted average of
/// the holding becomes `target_price`.
///
/// Solves `(q * avg + x * market) / (q + x) = target` for `x`. A target outside
/// the open band between the current average and the market price cannot be
/// reached by buying and yields an infeasible result rather than an error.
pub fn solve(
    quantity: f64,
    average_price: f64,
    market_price: f64,
    target_price: f64,
) -> Result<CalculationResult, SolveError> {
    ensure_positive("quantity", quantity)?;
    ensure_positive("average_price", average_price)?;
    ensure_positive("market_price", market_price)?;
    ensure_positive("target_price", target_price)?;

    if target_price == average_price {
        return Ok(CalculationResult {
            required_quantity: 0.0,
            required_cost: 0.0,
            feasible: true,
        });
    }

    if target_price == market_price {
        return Err(SolveError::Degenerate(market_price));
    }

    let low = average_price.min(market_price);
    let high = average_price.max(market_price);
    if target_price <= low || target_price >= high {
        tracing::debug!(
            average_price,
            market_price,
            target_price,
            "target outside reachable band"
        );
        return Ok(CalculationResult::infeasible());
    }

    // Ratio first so `quantity * (average - target)` cannot overflow on its own.
    let required_quantity =
        quantity * ((average_price - target_price) / (target_price - market_price));
    let required_cost = required_quantity * market_price;

    // The band check rules out a negative quantity, except for float edge cases.
    if !required_quantity.is_finite() || required_quantity < 0.0 || !required_cost.is_finite() {
        tracing::debug!(
            required_quantity,
            required_cost,
            "purchase size outside the representable range"
        );
        return Ok(CalculationResult::infeasible());
    }

    Ok(CalculationResult {
        required_quantity,
        required_cost,
        feasible: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averaging_down_reaches_target() {
        let result = solve(10.0, 100.0, 80.0, 90.0).unwrap();

        assert!(result.feasible);
        assert_eq!(result.required_quantity, 10.0);
        assert_eq!(result.required_cost, 800.0);

        // (10 * 100 + 10 * 80) / 20 = 90
        let new_average = (10.0 * 100.0 + result.required_quantity * 80.0)
            / (10.0 + result.required_quantity);
        assert_eq!(new_average, 90.0);
    }

    #[test]
    fn averaging_up_reaches_target() {
        // Buying above the current average pulls it up.
        let result = solve(4.0, 50.0, 70.0, 60.0).unwrap();

        assert!(result.feasible);
        assert_eq!(result.required_quantity, 4.0);
        assert_eq!(result.required_cost, 280.0);
    }

    #[test]
    fn target_below_market_is_infeasible() {
        let result = solve(10.0, 100.0, 80.0, 70.0).unwrap();

        assert!(!result.feasible);
        assert_eq!(result.required_quantity, 0.0);
        assert_eq!(result.required_cost, 0.0);
    }

    #[test]
    fn target_above_average_is_infeasible() {
        let result = solve(10.0, 100.0, 80.0, 110.0).unwrap();
        assert!(!result.feasible);
    }

    #[test]
    fn target_equal_to_average_needs_nothing() {
        let result = solve(10.0, 100.0, 80.0, 100.0).unwrap();

        assert!(result.feasible);
        assert_eq!(result.required_quantity, 0.0);
        assert_eq!(result.required_cost, 0.0);
    }

    #[test]
    fn all_prices_equal_needs_nothing() {
        let result = solve(3.0, 25.0, 25.0, 25.0).unwrap();
        assert!(result.feasible);
        assert_eq!(result.required_quantity, 0.0);
    }

    #[test]
    fn market_equal_to_average_is_infeasible() {
        let result = solve(10.0, 100.0, 100.0, 90.0).unwrap();
        assert!(!result.feasible);
    }

    #[test]
    fn target_equal_to_market_is_degenerate() {
        let err = solve(10.0, 100.0, 80.0, 80.0).unwrap_err();
        assert_eq!(err, SolveError::Degenerate(80.0));
    }

    #[test]
    fn non_positive_inputs_are_rejected() {
        let cases = [
            (0.0, 100.0, 80.0, 90.0, "quantity"),
            (10.0, -1.0, 80.0, 90.0, "average_price"),
            (10.0, 100.0, 0.0, 90.0, "market_price"),
            (10.0, 100.0, 80.0, -90.0, "target_price"),
        ];

        for (quantity, average, market, target, expected) in cases {
            match solve(quantity, average, market, target) {
                Err(SolveError::InvalidInput { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn nan_and_infinity_are_rejected() {
        assert!(matches!(
            solve(f64::NAN, 100.0, 80.0, 90.0),
            Err(SolveError::InvalidInput { field: "quantity", .. })
        ));
        assert!(matches!(
            solve(10.0, 100.0, f64::INFINITY, 90.0),
            Err(SolveError::InvalidInput { field: "market_price", .. })
        ));
    }

    #[test]
    fn huge_holding_does_not_overflow_before_dividing() {
        // 1e300 * (3e9 - 2e9) alone would overflow.
        let result = solve(1e300, 3e9, 1.0, 2e9).unwrap();

        assert!(result.feasible);
        let expected = 1e300 * (1e9 / (2e9 - 1.0));
        assert!((result.required_quantity - expected).abs() <= expected * 1e-12);
        assert!(result.required_cost.is_finite());
    }

    #[test]
    fn overflowing_cost_is_infeasible() {
        let result = solve(1e290, 1e11, 1e10, 1e10 + 2e-5).unwrap();

        assert!(!result.feasible);
        assert_eq!(result.required_quantity, 0.0);
        assert_eq!(result.required_cost, 0.0);
    }

    #[test]
    fn request_delegates_to_solve() {
        let request = CalculationRequest {
            quantity: 10.0,
            average_price: 100.0,
            market_price: 80.0,
            target_price: 90.0,
        };
        assert_eq!(request.solve(), solve(10.0, 100.0, 80.0, 90.0));
    }
}
