//! Staged asset selection
//!
//! The user stages assets to teleport per direction. Each direction has an
//! independent staged set and an active token-kind filter; switching the
//! kind clears that direction's staged set, since a pending transfer may
//! only carry one kind (mixing ERC-721 and ERC-1155 payloads in one lock
//! call is not supported by the bridge contract).

use teleport_core::{AssetKey, ChainAsset, TokenKind, TransferDirection};

/// Per-direction staged selection with an active token-kind filter
#[derive(Debug, Clone)]
pub struct SelectionSet {
    eth_staged: Vec<ChainAsset>,
    proton_staged: Vec<ChainAsset>,
    eth_kind: TokenKind,
    proton_kind: TokenKind,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self {
            eth_staged: Vec::new(),
            proton_staged: Vec::new(),
            eth_kind: TokenKind::Erc721,
            proton_kind: TokenKind::Erc721,
        }
    }
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The staged assets for a direction, in selection order
    pub fn staged(&self, direction: TransferDirection) -> &[ChainAsset] {
        match direction {
            TransferDirection::EthToProton => &self.eth_staged,
            TransferDirection::ProtonToEth => &self.proton_staged,
        }
    }

    /// First staged asset for a direction
    pub fn first(&self, direction: TransferDirection) -> Option<&ChainAsset> {
        self.staged(direction).first()
    }

    pub fn is_empty(&self, direction: TransferDirection) -> bool {
        self.staged(direction).is_empty()
    }

    /// Replace the staged set for a direction.
    ///
    /// A guard against accidental clears: an empty `assets` is a no-op and
    /// returns false. Duplicates under asset identity are dropped, keeping
    /// the first occurrence.
    pub fn set_selection(
        &mut self,
        direction: TransferDirection,
        assets: Vec<ChainAsset>,
    ) -> bool {
        if assets.is_empty() {
            return false;
        }

        let mut seen: Vec<AssetKey> = Vec::with_capacity(assets.len());
        let deduped: Vec<ChainAsset> = assets
            .into_iter()
            .filter(|asset| {
                let key = asset.identity();
                if seen.contains(&key) {
                    false
                } else {
                    seen.push(key);
                    true
                }
            })
            .collect();

        *self.staged_mut(direction) = deduped;
        true
    }

    /// Clear the entire staged set for a direction
    pub fn clear(&mut self, direction: TransferDirection) {
        self.staged_mut(direction).clear();
    }

    /// The active token-kind filter for a direction
    pub fn active_kind(&self, direction: TransferDirection) -> TokenKind {
        match direction {
            TransferDirection::EthToProton => self.eth_kind,
            TransferDirection::ProtonToEth => self.proton_kind,
        }
    }

    /// Switch the active token-kind filter for a direction.
    ///
    /// A switch clears that direction's staged set. Setting the kind already
    /// active is a no-op; returns whether a switch occurred.
    pub fn set_kind(&mut self, direction: TransferDirection, kind: TokenKind) -> bool {
        let current = match direction {
            TransferDirection::EthToProton => &mut self.eth_kind,
            TransferDirection::ProtonToEth => &mut self.proton_kind,
        };

        if *current == kind {
            return false;
        }

        *current = kind;
        self.clear(direction);
        true
    }

    /// Read-only view of the staged assets whose token kind matches.
    /// Native assets carry no EVM token kind and are excluded.
    pub fn filter_by_kind(
        &self,
        direction: TransferDirection,
        kind: TokenKind,
    ) -> Vec<&ChainAsset> {
        self.staged(direction)
            .iter()
            .filter(|asset| asset.kind() == Some(kind))
            .collect()
    }

    fn staged_mut(&mut self, direction: TransferDirection) -> &mut Vec<ChainAsset> {
        match direction {
            TransferDirection::EthToProton => &mut self.eth_staged,
            TransferDirection::ProtonToEth => &mut self.proton_staged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teleport_core::{EvmAsset, NativeAsset};

    fn evm(contract: &str, token_id: &str, kind: TokenKind) -> ChainAsset {
        ChainAsset::Evm(EvmAsset {
            contract_address: contract.to_string(),
            token_id: token_id.to_string(),
            kind,
            token_uri: None,
        })
    }

    fn native(asset_id: &str) -> ChainAsset {
        ChainAsset::Native(NativeAsset {
            asset_id: asset_id.to_string(),
            collection_author: "prtbridge".to_string(),
            token_uri: None,
            contract_address_bytes: vec![0xab],
            token_id_bytes: vec![0x01],
        })
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let mut set = SelectionSet::new();
        set.set_selection(
            TransferDirection::EthToProton,
            vec![evm("0xa", "1", TokenKind::Erc721)],
        );

        assert!(!set.set_selection(TransferDirection::EthToProton, vec![]));
        assert_eq!(set.staged(TransferDirection::EthToProton).len(), 1);
    }

    #[test]
    fn test_duplicates_rejected_under_identity() {
        let mut set = SelectionSet::new();
        set.set_selection(
            TransferDirection::EthToProton,
            vec![
                evm("0xa", "1", TokenKind::Erc721),
                evm("0xa", "1", TokenKind::Erc721),
                evm("0xa", "2", TokenKind::Erc721),
            ],
        );
        assert_eq!(set.staged(TransferDirection::EthToProton).len(), 2);
    }

    #[test]
    fn test_directions_are_independent() {
        let mut set = SelectionSet::new();
        set.set_selection(
            TransferDirection::EthToProton,
            vec![evm("0xa", "1", TokenKind::Erc721)],
        );
        set.set_selection(TransferDirection::ProtonToEth, vec![native("42")]);

        set.clear(TransferDirection::EthToProton);
        assert!(set.is_empty(TransferDirection::EthToProton));
        assert_eq!(set.staged(TransferDirection::ProtonToEth).len(), 1);
    }

    #[test]
    fn test_kind_switch_clears_selection() {
        let mut set = SelectionSet::new();
        set.set_selection(
            TransferDirection::EthToProton,
            vec![evm("0xa", "1", TokenKind::Erc721)],
        );

        assert!(set.set_kind(TransferDirection::EthToProton, TokenKind::Erc1155));
        assert!(set.is_empty(TransferDirection::EthToProton));
        assert_eq!(
            set.active_kind(TransferDirection::EthToProton),
            TokenKind::Erc1155
        );
    }

    #[test]
    fn test_same_kind_is_noop() {
        let mut set = SelectionSet::new();
        set.set_selection(
            TransferDirection::EthToProton,
            vec![evm("0xa", "1", TokenKind::Erc721)],
        );

        // No switch occurred, so the selection survives
        assert!(!set.set_kind(TransferDirection::EthToProton, TokenKind::Erc721));
        assert_eq!(set.staged(TransferDirection::EthToProton).len(), 1);
    }

    #[test]
    fn test_filter_by_kind_excludes_other_kinds_and_native() {
        let mut set = SelectionSet::new();
        set.set_selection(
            TransferDirection::EthToProton,
            vec![
                evm("0xa", "1", TokenKind::Erc721),
                evm("0xb", "2", TokenKind::Erc1155),
            ],
        );
        set.set_selection(TransferDirection::ProtonToEth, vec![native("42")]);

        let erc721 = set.filter_by_kind(TransferDirection::EthToProton, TokenKind::Erc721);
        assert_eq!(erc721.len(), 1);

        let native_kinds =
            set.filter_by_kind(TransferDirection::ProtonToEth, TokenKind::Erc721);
        assert!(native_kinds.is_empty());

        // Filtering never mutates the underlying storage
        assert_eq!(set.staged(TransferDirection::EthToProton).len(), 2);
    }
}
