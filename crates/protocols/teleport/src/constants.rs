//! Teleport protocol constants

use std::time::Duration;

/// Fee table row that serves as the fallback for unknown chains
pub const DEFAULT_FEE_CHAIN_ID: i64 = 0;

/// Fixed fee-balance top-up amount in XPR (not user-configurable)
pub const TOP_UP_AMOUNT: f64 = 1.0;

/// Delay between a confirmed lock and opening the claim prompt,
/// giving the counterpart chain time to observe the lock
pub const CLAIM_PROMPT_DELAY: Duration = Duration::from_secs(2);

/// Memo attached to NFT transfers into bridge custody
pub const TELEPORT_MEMO: &str = "Transfer NFTs to teleport";

/// Quantity locked per ERC-1155 teleport
pub const ERC1155_LOCK_AMOUNT: u64 = 1;
