//! Teleport: cross-chain NFT bridge protocol
//!
//! Moves NFTs between an EVM chain and the Proton chain: lock the asset into
//! bridge custody on the source chain, then claim it on the destination
//! chain. This crate owns the fee table cache, the staged asset selection,
//! the transfer director state machine, the fee-balance top-up flow, and the
//! deposit tracking read path. Chain access goes through the collaborator
//! traits in `chain-clients`.

pub mod constants;
pub mod director;
pub mod fee;
pub mod selection;
pub mod state;
pub mod topup;
pub mod tracking;

pub use director::{
    ClaimSink, Collaborators, NoticeLevel, Notifier, Phase, TransferContext, TransferDirector,
    TransferOutcome,
};
pub use fee::FeeTable;
pub use selection::SelectionSet;
pub use state::{ClaimPrompt, FeeInfo, TeleportState};
pub use topup::{top_up, withdraw};
pub use tracking::{list_deposits, DepositView};
