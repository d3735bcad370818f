use super::dca::{quote, Amount, Quote};
use super::AppState;
use crate::dca::FeeType;
use crate::error::{ApiError, ApiResult};
use crate::portfolio::Asset;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct Body {
    market_price: Amount,
    target_price: Amount,
    fees: Option<FeeType>,
}

fn find_asset<'a>(state: &'a AppState, ticker: &str) -> ApiResult<&'a Asset> {
    state
        .portfolio
        .find(ticker)
        .ok_or_else(|| ApiError::NotFound(ticker.to_string()))
}

pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Asset>> {
    Json(state.portfolio.assets().to_vec())
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> ApiResult<Json<Asset>> {
    Ok(Json(find_asset(&state, &ticker)?.clone()))
}

pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
    payload: Result<Json<Body>, JsonRejection>,
) -> ApiResult<Json<Quote>> {
    let Json(payload) = payload?;
    let holding = find_asset(&state, &ticker)?.holding();

    let quote = quote(
        holding.quantity,
        holding.average_price,
        payload.market_price.resolve("market_price")?,
        payload.target_price.resolve("target_price")?,
        payload.fees,
    )?;
    Ok(Json(quote))
}
