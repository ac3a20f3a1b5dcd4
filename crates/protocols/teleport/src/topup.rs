//! Fee-balance top-up and withdrawal
//!
//! Entered when a transfer attempt finds the fee balance too low. The
//! deposit amount is fixed; after a confirmed deposit the balance snapshot
//! is refetched and the user retries the transfer themselves. The blocked
//! transfer is never resumed automatically.

use chain_clients::{ProtonChain, TeleportSigner};
use teleport_core::{format_xpr, Actor};

use crate::constants::TOP_UP_AMOUNT;
use crate::director::{NoticeLevel, Notifier};
use crate::fee::FeeTable;

/// Deposit the fixed top-up amount into the user's fee balance.
///
/// On success the fee-balance snapshot in `fees` is refetched so the next
/// transfer attempt sees the new balance. Returns whether the deposit went
/// through; signing rejections and submission failures are surfaced to the
/// user with the chain's own message.
pub async fn top_up(
    actor: &Actor,
    fees: &mut FeeTable,
    chain: &dyn ProtonChain,
    signer: &dyn TeleportSigner,
    notifier: &dyn Notifier,
) -> bool {
    if let Err(e) = signer.deposit_fee(actor, TOP_UP_AMOUNT).await {
        tracing::warn!("Fee deposit failed for {}: {}", actor, e);
        notifier.notify(NoticeLevel::Error, &format!("Deposit failed: {}", e));
        return false;
    }

    notifier.notify(
        NoticeLevel::Success,
        &format!("Deposited {} XPR for teleport fees.", format_xpr(TOP_UP_AMOUNT)),
    );
    fees.refresh_balance(chain, actor).await;
    true
}

/// Withdraw XPR from the user's fee balance back to their account.
///
/// Rejects amounts that are not positive or exceed the available balance
/// before touching the signer.
pub async fn withdraw(
    actor: &Actor,
    amount: f64,
    fees: &mut FeeTable,
    chain: &dyn ProtonChain,
    signer: &dyn TeleportSigner,
    notifier: &dyn Notifier,
) -> bool {
    if amount <= 0.0 {
        notifier.notify(NoticeLevel::Warning, "Enter a positive amount to withdraw.");
        return false;
    }

    let available = fees.snapshot().map(|s| s.available()).unwrap_or(0.0);
    if amount > available {
        notifier.notify(
            NoticeLevel::Warning,
            &format!(
                "Cannot withdraw {} XPR; only {} XPR available.",
                format_xpr(amount),
                format_xpr(available)
            ),
        );
        return false;
    }

    if let Err(e) = signer.withdraw_fee(actor, amount).await {
        tracing::warn!("Fee withdrawal failed for {}: {}", actor, e);
        notifier.notify(NoticeLevel::Error, &format!("Withdraw failed: {}", e));
        return false;
    }

    notifier.notify(
        NoticeLevel::Success,
        &format!("Withdrew {} XPR from teleport fees.", format_xpr(amount)),
    );
    fees.refresh_balance(chain, actor).await;
    true
}
