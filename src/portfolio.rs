use crate::dca::Holding;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid asset {ticker}: {reason}")]
    InvalidAsset { ticker: String, reason: String },

    #[error("Duplicate ticker: {0}")]
    DuplicateTicker(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    Crypto,
    Stock,
    Etf,
    Commodity,
}

// Tickers match case-insensitively, for both duplicate checks and lookups.
fn ticker_key(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    pub ticker: String,
    pub quantity: f64,
    pub average_price: f64,
    pub asset_type: AssetType,
}

impl Asset {
    pub fn holding(&self) -> Holding {
        Holding::new(self.quantity, self.average_price)
    }

    fn validate(&self) -> Result<(), PortfolioError> {
        let invalid = |reason: &str| PortfolioError::InvalidAsset {
            ticker: self.ticker.clone(),
            reason: reason.to_string(),
        };

        if self.ticker.trim().is_empty() {
            return Err(invalid("ticker is empty"));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(invalid("quantity must be greater than zero"));
        }
        if !self.average_price.is_finite() || self.average_price <= 0.0 {
            return Err(invalid("average price must be greater than zero"));
        }
        Ok(())
    }
}

/// Read-only list of holdings, loaded once and shared between requests.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    assets: Vec<Asset>,
}

impl Portfolio {
    pub fn empty() -> Self {
        Portfolio::default()
    }

    pub fn new(assets: Vec<Asset>) -> Result<Self, PortfolioError> {
        let mut seen = HashSet::new();
        for asset in &assets {
            asset.validate()?;
            if !seen.insert(ticker_key(&asset.ticker)) {
                return Err(PortfolioError::DuplicateTicker(asset.ticker.clone()));
            }
        }
        Ok(Portfolio { assets })
    }

    pub fn from_json_str(json: &str) -> Result<Self, PortfolioError> {
        let assets: Vec<Asset> = serde_json::from_str(json)?;
        Portfolio::new(assets)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PortfolioError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let portfolio = Portfolio::from_json_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            assets = portfolio.assets.len(),
            "Loaded portfolio"
        );
        Ok(portfolio)
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn find(&self, ticker: &str) -> Option<&Asset> {
        let key = ticker_key(ticker);
        self.assets
            .iter()
            .find(|asset| ticker_key(&asset.ticker) == key)
    }
}
