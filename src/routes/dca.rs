use crate::dca::{parse_input, solve, CalculationResult, FeeType, SolveError};
use crate::error::ApiResult;
use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

/// A numeric field that may arrive as a JSON number or as form text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub fn resolve(&self, field: &'static str) -> Result<f64, SolveError> {
        match self {
            Amount::Number(value) => Ok(*value),
            Amount::Text(text) => parse_input(field, text),
        }
    }
}

#[derive(Deserialize)]
pub struct Body {
    quantity: Amount,
    average_price: Amount,
    market_price: Amount,
    target_price: Amount,
    fees: Option<FeeType>,
}

#[derive(Debug, Serialize)]
pub struct Formatted {
    pub required_quantity: String,
    pub required_cost: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Quote {
    #[serde(flatten)]
    pub result: CalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    pub display: Formatted,
    pub message: String,
}

fn format_quantity(value: f64) -> String {
    format!("{:.6}", value)
}

fn format_currency(value: f64) -> String {
    format!("{:.2}", value)
}

impl Quote {
    pub fn new(result: CalculationResult, fees: Option<FeeType>) -> Self {
        let buys = result.feasible && result.required_quantity > 0.0;

        let fees = fees
            .filter(|_| buys)
            .map(|fee| fee.fee_for(result.required_cost));
        let total_cost = fees.map(|fee| result.required_cost + fee);

        let message = if !result.feasible {
            "target not achievable at this market price".to_string()
        } else if !buys {
            "target already reached, no purchase needed".to_string()
        } else {
            format!(
                "buy {} units for {}",
                format_quantity(result.required_quantity),
                format_currency(total_cost.unwrap_or(result.required_cost)),
            )
        };

        Quote {
            result,
            fees,
            total_cost,
            display: Formatted {
                required_quantity: format_quantity(result.required_quantity),
                required_cost: format_currency(result.required_cost),
                total_cost: total_cost.map(format_currency),
            },
            message,
        }
    }
}

pub(crate) fn quote(
    quantity: f64,
    average_price: f64,
    market_price: f64,
    target_price: f64,
    fees: Option<FeeType>,
) -> ApiResult<Quote> {
    if let Some(fee) = &fees {
        fee.validate()?;
    }

    let result = solve(quantity, average_price, market_price, target_price)?;
    tracing::debug!(
        quantity,
        average_price,
        market_price,
        target_price,
        feasible = result.feasible,
        required_quantity = result.required_quantity,
        "Solved DCA target"
    );

    Ok(Quote::new(result, fees))
}

pub async fn calculate(payload: Result<Json<Body>, JsonRejection>) -> ApiResult<Json<Quote>> {
    let Json(payload) = payload?;
    let quote = quote(
        payload.quantity.resolve("quantity")?,
        payload.average_price.resolve("average_price")?,
        payload.market_price.resolve("market_price")?,
        payload.target_price.resolve("target_price")?,
        payload.fees,
    )?;
    Ok(Json(quote))
}
