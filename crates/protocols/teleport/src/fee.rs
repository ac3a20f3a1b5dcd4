//! Teleport fee table cache
//!
//! Holds the per-chain fee quotes and the user's fee-balance snapshot for
//! the session. The fee table is fetched once at session start; the balance
//! snapshot is refetched when the user identity changes and after a top-up.
//! Transport failures degrade to "fees unknown" (empty table / missing
//! snapshot), never to zero fees.

use chain_clients::ProtonChain;
use teleport_core::{Actor, FeeBalance, FeeQuote};

use crate::constants::DEFAULT_FEE_CHAIN_ID;

/// Session cache of fee quotes and the user's fee balance
#[derive(Debug, Clone, Default)]
pub struct FeeTable {
    quotes: Vec<FeeQuote>,
    balance: Option<FeeBalance>,
}

impl FeeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the fee table has been fetched
    pub fn is_loaded(&self) -> bool {
        !self.quotes.is_empty()
    }

    pub fn quotes(&self) -> &[FeeQuote] {
        &self.quotes
    }

    /// The user's fee-balance snapshot, if one has been fetched
    pub fn snapshot(&self) -> Option<&FeeBalance> {
        self.balance.as_ref()
    }

    /// Fetch the fee table and, when a user identity is present, the
    /// fee-balance snapshot. Transport failures leave empty defaults.
    pub async fn load(&mut self, chain: &dyn ProtonChain, actor: Option<&Actor>) {
        match chain.get_teleport_fees().await {
            Ok(quotes) => {
                tracing::info!("Loaded {} teleport fee rows", quotes.len());
                self.quotes = quotes;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch teleport fees: {}", e);
                self.quotes = Vec::new();
            }
        }

        if let Some(actor) = actor {
            self.refresh_balance(chain, actor).await;
        }
    }

    /// Refetch the fee-balance snapshot for the given user
    pub async fn refresh_balance(&mut self, chain: &dyn ProtonChain, actor: &Actor) {
        match chain.get_fees_balance(actor).await {
            Ok(balance) => {
                if balance.available() < 0.0 {
                    tracing::warn!(
                        owner = %balance.owner,
                        balance = balance.balance,
                        reserved = balance.reserved,
                        "Fee balance snapshot is inconsistent (reserved exceeds balance)"
                    );
                }
                self.balance = Some(balance);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch fee balance for {}: {}", actor, e);
                self.balance = None;
            }
        }
    }

    /// Drop the snapshot (user signed out)
    pub fn clear_balance(&mut self) {
        self.balance = None;
    }

    /// Resolve the fee row for a connected chain.
    ///
    /// Falls back to the `chain_id == 0` default row when the exact chain is
    /// absent (or no chain is connected), and to the `chain_id == -1`
    /// sentinel when no default exists either. Callers must treat the
    /// sentinel as "cannot validate, block the transfer".
    pub fn resolve_fee(&self, chain_id: Option<i64>) -> FeeQuote {
        if let Some(id) = chain_id {
            if let Some(quote) = self.quotes.iter().find(|q| q.chain_id == id) {
                return quote.clone();
            }
        }

        self.quotes
            .iter()
            .find(|q| q.chain_id == DEFAULT_FEE_CHAIN_ID)
            .cloned()
            .unwrap_or_else(FeeQuote::sentinel)
    }

    #[cfg(test)]
    pub(crate) fn with_data(quotes: Vec<FeeQuote>, balance: Option<FeeBalance>) -> Self {
        Self { quotes, balance }
    }
}
