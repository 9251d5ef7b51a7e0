use crate::errors::Result;
use crate::holdings::holdings_model::Holding;
use async_trait::async_trait;

/// Trait for current-holdings repository operations.
#[async_trait]
pub trait HoldingsRepositoryTrait: Send + Sync {
    /// Loads the current holdings of one fund. Order is unspecified;
    /// consumers sort as needed.
    fn get_holdings_by_fund(&self, fund_id: &str) -> Result<Vec<Holding>>;

    /// Distinct fund ids present in the holdings store.
    fn get_fund_ids(&self) -> Result<Vec<String>>;

    /// Overwrites one fund's holdings wholesale within a single transaction.
    /// This is the ingestion-side write path; the engine itself only reads.
    async fn replace_holdings(&self, fund_id: String, holdings: Vec<Holding>) -> Result<usize>;
}
