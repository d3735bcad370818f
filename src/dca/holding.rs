use super::solver::{solve, CalculationResult, SolveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub quantity: f64,
    pub average_price: f64,
}

impl Holding {
    pub fn new(quantity: f64, average_price: f64) -> Self {
        Holding {
            quantity,
            average_price,
        }
    }

    // Weighted average if `quantity` more units were bought at `price`
    pub fn average_after(&self, quantity: f64, price: f64) -> f64 {
        let total_cost = self.average_price * self.quantity + price * quantity;
        total_cost / (self.quantity + quantity)
    }

    pub fn buy(&mut self, quantity: f64, price: f64) {
        self.average_price = self.average_after(quantity, price);
        self.quantity += quantity;
    }

    pub fn solve_for(
        &self,
        market_price: f64,
        target_price: f64,
    ) -> Result<CalculationResult, SolveError> {
        solve(
            self.quantity,
            self.average_price,
            market_price,
            target_price,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_updates_average() {
        let mut holding = Holding::new(1.0, 100.0);
        holding.buy(1.0, 110.0);

        // (100 * 1 + 110 * 1) / 2 = 105
        assert_eq!(holding.quantity, 2.0);
        assert_eq!(holding.average_price, 105.0);
    }

    #[test]
    fn average_after_does_not_mutate() {
        let holding = Holding::new(10.0, 100.0);
        assert_eq!(holding.average_after(10.0, 80.0), 90.0);
        assert_eq!(holding, Holding::new(10.0, 100.0));
    }

    #[test]
    fn buying_the_solved_quantity_lands_on_target() {
        let mut holding = Holding::new(0.870377, 1785.46);
        let result = holding.solve_for(1500.0, 1700.0).unwrap();
        assert!(result.feasible);

        holding.buy(result.required_quantity, 1500.0);
        assert!((holding.average_price - 1700.0).abs() < 1e-9);
    }
}
