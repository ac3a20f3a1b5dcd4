//! Transfer director
//!
//! Drives one teleport end to end: validate preconditions, submit the lock
//! transaction on the source chain, wait for its confirmation through the
//! chain collaborator, then schedule the destination-chain claim prompt.
//! One transfer may be in flight at a time.
//!
//! Validation failures emit a user-facing notice and return the director to
//! idle; nothing propagates as an error and the staged selection is kept so
//! the user can retry. An insufficient fee balance is not a failure: it
//! routes into the top-up flow.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chain_clients::{BridgeOracle, EvmBridge, TeleportSigner};
use teleport_core::{
    hexutil::bytes_to_hex, Actor, ChainAsset, EvmAddress, TokenKind, TransferDirection,
};

use crate::constants::{CLAIM_PROMPT_DELAY, ERC1155_LOCK_AMOUNT, TELEPORT_MEMO};
use crate::fee::FeeTable;
use crate::selection::SelectionSet;
use crate::state::ClaimPrompt;

/// Director phase. Exactly one transfer may be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    AwaitingChainConfirmation,
    AwaitingClaimPrompt,
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// Fire-and-forget notification sink (toasts in the frontend)
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Receives the claim prompt once the post-lock delay elapses
pub trait ClaimSink: Send + Sync {
    fn open_claim_prompt(&self, prompt: ClaimPrompt);
}

/// Session inputs for a transfer attempt
#[derive(Debug, Clone, Copy)]
pub struct TransferContext<'a> {
    pub direction: TransferDirection,
    /// Connected EVM wallet account, if any
    pub eth_account: Option<&'a EvmAddress>,
    /// Chain id of the connected EVM wallet, if any
    pub chain_id: Option<i64>,
    /// Signed-in Proton account, if any
    pub proton_actor: Option<&'a Actor>,
    /// Manually entered receiving address (Proton → ETH only)
    pub manual_receiver: Option<&'a str>,
}

/// External collaborators the director drives
pub struct Collaborators<'a> {
    pub oracle: &'a dyn BridgeOracle,
    pub evm: &'a dyn EvmBridge,
    pub signer: &'a dyn TeleportSigner,
    pub notifier: &'a dyn Notifier,
    pub claims: Arc<dyn ClaimSink>,
}

/// Result of a transfer attempt
#[derive(Debug, Clone)]
pub enum TransferOutcome {
    /// A precondition failed; a notice was emitted and nothing was submitted
    Blocked,
    /// Fee balance is too low; route into the top-up flow
    TopUpRequired { required: f64, available: f64 },
    /// Lock confirmed; the claim prompt has been scheduled
    LockConfirmed(ClaimPrompt),
}

/// The teleport transfer state machine
pub struct TransferDirector {
    bridge_account: String,
    phase: Phase,
}

impl TransferDirector {
    pub fn new(bridge_account: impl Into<String>) -> Self {
        Self {
            bridge_account: bridge_account.into(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Attempt a teleport for the active direction.
    ///
    /// Precondition checks run in a fixed order, each short-circuiting with
    /// its own notice. Only the first staged asset is teleported; extra
    /// staged assets are ignored with a visible notice (current bridge
    /// limitation, one asset per lock).
    pub async fn initiate_transfer(
        &mut self,
        ctx: &TransferContext<'_>,
        selection: &SelectionSet,
        fees: &FeeTable,
        collab: &Collaborators<'_>,
    ) -> TransferOutcome {
        if self.phase != Phase::Idle {
            collab.notifier.notify(
                NoticeLevel::Warning,
                "A teleport is already in progress. Wait for it to finish.",
            );
            return TransferOutcome::Blocked;
        }

        self.phase = Phase::Validating;
        let outcome = self.run(ctx, selection, fees, collab).await;
        self.phase = Phase::Idle;
        outcome
    }

    async fn run(
        &mut self,
        ctx: &TransferContext<'_>,
        selection: &SelectionSet,
        fees: &FeeTable,
        collab: &Collaborators<'_>,
    ) -> TransferOutcome {
        let notifier = collab.notifier;

        if !collab.oracle.is_up().await {
            notifier.notify(NoticeLevel::Warning, "Oracle is down");
            return TransferOutcome::Blocked;
        }

        let snapshot = match (fees.is_loaded(), fees.snapshot()) {
            (true, Some(snapshot)) => snapshot,
            _ => {
                notifier.notify(NoticeLevel::Warning, "Refresh the page!");
                return TransferOutcome::Blocked;
            }
        };

        let quote = fees.resolve_fee(ctx.chain_id);
        if !quote.is_usable() {
            notifier.notify(
                NoticeLevel::Error,
                "Teleport fees are unavailable for this chain.",
            );
            return TransferOutcome::Blocked;
        }

        let staged = selection.staged(ctx.direction);
        if staged.is_empty() {
            notifier.notify(NoticeLevel::Info, "Please select NFTs to send.");
            return TransferOutcome::Blocked;
        }

        // Direction-specific wallet and receiver resolution
        let mut eth_owner: Option<&EvmAddress> = None;
        let (actor, receiver) = match ctx.direction {
            TransferDirection::EthToProton => {
                match ctx.eth_account {
                    Some(account) => eth_owner = Some(account),
                    None => {
                        notifier.notify(NoticeLevel::Info, "Please connect ethereum wallet.");
                        return TransferOutcome::Blocked;
                    }
                }
                match ctx.proton_actor {
                    Some(actor) => (actor, actor.as_str().to_string()),
                    None => {
                        notifier
                            .notify(NoticeLevel::Info, "Please sign in with your Proton account.");
                        return TransferOutcome::Blocked;
                    }
                }
            }
            TransferDirection::ProtonToEth => {
                let actor = match ctx.proton_actor {
                    Some(actor) => actor,
                    None => {
                        notifier
                            .notify(NoticeLevel::Info, "Please sign in with your Proton account.");
                        return TransferOutcome::Blocked;
                    }
                };
                let receiver = ctx
                    .eth_account
                    .map(|a| a.as_str().to_string())
                    .or_else(|| ctx.manual_receiver.map(str::to_string));
                match receiver {
                    Some(receiver) => (actor, receiver),
                    None => {
                        notifier.notify(NoticeLevel::Info, "Please enter a receiving address.");
                        return TransferOutcome::Blocked;
                    }
                }
            }
        };

        if snapshot.available() < 0.0 {
            // Inconsistent chain state; surface it, do not clamp
            notifier.notify(
                NoticeLevel::Warning,
                &format!(
                    "Fee balance is inconsistent: {} reserved exceeds {} held.",
                    snapshot.reserved, snapshot.balance
                ),
            );
        }

        // Insufficient balance is a recoverable branch, not an error
        let required = quote.fee_for(ctx.direction);
        let available = snapshot.available();
        if available < required {
            notifier.notify(
                NoticeLevel::Warning,
                "Too low balance for fee. please top up firstly!",
            );
            return TransferOutcome::TopUpRequired {
                required,
                available,
            };
        }

        if staged.len() > 1 {
            notifier.notify(
                NoticeLevel::Info,
                "Currently only 1 NFT can be teleported; sending the first selected.",
            );
        }
        let asset = &staged[0];

        self.phase = Phase::AwaitingChainConfirmation;

        let prompt = match ctx.direction {
            TransferDirection::EthToProton => match eth_owner {
                Some(owner) => self.lock_evm_asset(asset, owner, &receiver, collab).await,
                None => None,
            },
            TransferDirection::ProtonToEth => {
                self.lock_native_asset(asset, actor, &receiver, collab).await
            }
        };

        let prompt = match prompt {
            Some(prompt) => prompt,
            None => return TransferOutcome::Blocked,
        };

        self.phase = Phase::AwaitingClaimPrompt;
        schedule_claim_prompt(collab.claims.clone(), prompt.clone());

        TransferOutcome::LockConfirmed(prompt)
    }

    /// ETH → Proton: lock the ERC-721/1155 into bridge custody.
    /// The collaborator resolves only once the transaction is confirmed.
    async fn lock_evm_asset(
        &self,
        asset: &ChainAsset,
        owner: &EvmAddress,
        receiver: &str,
        collab: &Collaborators<'_>,
    ) -> Option<ClaimPrompt> {
        let evm_asset = match asset {
            ChainAsset::Evm(a) => a,
            ChainAsset::Native(_) => {
                collab.notifier.notify(
                    NoticeLevel::Error,
                    "Staged asset does not belong to the Ethereum side.",
                );
                return None;
            }
        };

        let result = match evm_asset.kind {
            TokenKind::Erc721 => {
                collab
                    .evm
                    .lock_erc721(&evm_asset.contract_address, &evm_asset.token_id, owner)
                    .await
            }
            TokenKind::Erc1155 => {
                collab
                    .evm
                    .lock_erc1155(
                        &evm_asset.contract_address,
                        &evm_asset.token_id,
                        owner,
                        ERC1155_LOCK_AMOUNT,
                    )
                    .await
            }
        };

        if let Err(e) = result {
            tracing::warn!("EVM lock failed: {}", e);
            collab
                .notifier
                .notify(NoticeLevel::Error, &format!("Transfer failed: {}", e));
            return None;
        }

        collab.notifier.notify(
            NoticeLevel::Success,
            "Transfered to Ethereum NFT Bridge successfully.",
        );

        Some(ClaimPrompt {
            eth_to_proton: true,
            token_contract: evm_asset.contract_address.clone(),
            token_id: evm_asset.token_id.clone(),
            asset_id: None,
            receiver: receiver.to_string(),
            created_at: unix_now(),
        })
    }

    /// Proton → ETH: transfer the asset to the bridge custody account.
    async fn lock_native_asset(
        &self,
        asset: &ChainAsset,
        actor: &Actor,
        receiver: &str,
        collab: &Collaborators<'_>,
    ) -> Option<ClaimPrompt> {
        let native = match asset {
            ChainAsset::Native(a) => a,
            ChainAsset::Evm(_) => {
                collab.notifier.notify(
                    NoticeLevel::Error,
                    "Staged asset does not belong to the Proton side.",
                );
                return None;
            }
        };

        let result = collab
            .signer
            .transfer_to_bridge(
                actor,
                &self.bridge_account,
                &[native.asset_id.clone()],
                TELEPORT_MEMO,
            )
            .await;

        if let Err(e) = result {
            tracing::warn!("Bridge transfer failed: {}", e);
            collab
                .notifier
                .notify(NoticeLevel::Error, &format!("Transfer failed: {}", e));
            return None;
        }

        collab
            .notifier
            .notify(NoticeLevel::Success, "Transfered NFTs to the bridge account.");

        Some(ClaimPrompt {
            eth_to_proton: false,
            token_contract: bytes_to_hex(&native.contract_address_bytes),
            token_id: bytes_to_hex(&native.token_id_bytes),
            asset_id: Some(native.asset_id.clone()),
            receiver: receiver.to_string(),
            created_at: unix_now(),
        })
    }

    #[cfg(test)]
    pub(crate) fn set_phase_for_test(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

/// Hand the prompt to the sink after the post-lock delay. The director does
/// not wait; it is idle again as soon as the task is spawned.
fn schedule_claim_prompt(sink: Arc<dyn ClaimSink>, prompt: ClaimPrompt) {
    tokio::spawn(async move {
        tokio::time::sleep(CLAIM_PROMPT_DELAY).await;
        sink.open_claim_prompt(prompt);
    });
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
