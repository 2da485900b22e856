// SPDX-License-Identifier: CC0-1.0

//! Per-network chain parameters.
//!
//! One [`ChainParams`] value bundles everything a network is configured with: magic bytes,
//! ports, prefixes, the genesis parameters and the ordered list of consensus regimes. The
//! bundles are immutable statics; `select_network` resolves a `-chain` style name to one, and
//! a process that wants a global current network can [`install`] it exactly once.

use core::fmt;

use once_cell::sync::OnceCell;

use crate::chain::BlockIndexEntry;
use crate::consensus::params::{regime_for, Params};
use crate::constants;
use crate::hash_types::{BlockHash, TxMerkleNode};
use crate::network::{Magic, Network, ParseNetworkError};
use crate::pow::CompactTarget;

/// The inputs a network's genesis block was built from, plus the digests the build must
/// reproduce.
///
/// Actually constructing and hashing the block is the job of an external collaborator; at
/// start-up it hands the computed hash to [`ChainParams::check_genesis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisParams {
    /// Genesis block timestamp.
    pub time: u32,
    /// Genesis block nonce.
    pub nonce: u32,
    /// Compact target in the genesis header.
    pub bits: CompactTarget,
    /// Coinbase subsidy, in base units.
    pub reward: u64,
    /// The expected proof-of-work hash of the built block.
    pub hash: BlockHash,
    /// The expected merkle root of the built block.
    pub merkle_root: TxMerkleNode,
}

impl GenesisParams {
    /// The genesis block as a block index entry, the root every [`crate::ChainView`] grows from.
    pub fn index_entry(&self) -> BlockIndexEntry {
        BlockIndexEntry { height: 0, time: self.time, bits: self.bits }
    }
}

/// Parameters of one MmpCoin network.
#[derive(Debug, Clone)]
pub struct ChainParams {
    /// Network this set of parameters is for.
    pub network: Network,
    /// Message start bytes.
    pub magic: Magic,
    /// Default peer-to-peer port.
    pub default_port: u16,
    /// Blocks before this height may be pruned.
    pub prune_after_height: u32,
    /// DNS seed consulted for peer discovery.
    pub dns_seed: &'static str,
    /// Base58 version byte for pay-to-pubkey-hash addresses.
    pub pubkey_address_prefix: u8,
    /// Base58 version byte for pay-to-script-hash addresses.
    pub script_address_prefix: u8,
    /// Base58 version byte for WIF private keys.
    pub secret_key_prefix: u8,
    /// BIP32 extended public key version bytes.
    pub ext_public_key_prefix: [u8; 4],
    /// BIP32 extended secret key version bytes.
    pub ext_secret_key_prefix: [u8; 4],
    /// Merged-mining chain identifier.
    pub auxpow_chain_id: u32,
    /// Whether AuxPoW commitments must carry this chain's id.
    pub strict_chain_id: bool,
    /// Majority window: blocks counted when gauging upgrade adoption.
    pub majority_window: u32,
    /// Blocks of the majority window that make an upgrade enforced.
    pub majority_enforce_block_upgrade: u32,
    /// Blocks of the majority window that make outdated blocks rejected.
    pub majority_reject_block_outdated: u32,
    /// Number of blocks including miner confirmation required for a rule change.
    pub rule_change_activation_threshold: u32,
    /// Number of blocks with the same set of rules.
    pub miner_confirmation_window: u32,
    /// Subsidy halving interval, in blocks.
    pub subsidy_halving_interval: u32,
    /// Genesis parameters and expected digests.
    pub genesis: GenesisParams,
    /// Known-good block hashes by height.
    pub checkpoints: &'static [(u32, BlockHash)],
    /// Consensus regimes in declaration order; the first activates at height zero.
    pub regimes: &'static [Params],
}

impl ChainParams {
    /// Returns the consensus regime active at `height`.
    pub fn consensus(&self, height: u32) -> &Params { regime_for(self.regimes, height) }

    /// The regime active at height zero, which every other bundle field assumes.
    pub fn base(&self) -> &Params { &self.regimes[0] }

    /// Verifies an externally computed genesis hash against the expected one.
    ///
    /// A mismatch means the process is configured for the wrong chain; callers treat it as
    /// fatal.
    pub fn check_genesis(&self, computed: BlockHash) -> Result<(), GenesisMismatchError> {
        if computed == self.genesis.hash {
            Ok(())
        } else {
            Err(GenesisMismatchError {
                network: self.network,
                expected: self.genesis.hash,
                computed,
            })
        }
    }

    /// Returns the parameters of the given network.
    pub fn for_network(network: Network) -> &'static ChainParams {
        match network {
            Network::Mmpcoin => &MAINNET,
            Network::Testnet => &TESTNET,
            Network::Regtest => &REGTEST,
        }
    }
}

/// An externally computed genesis hash did not match the configured chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisMismatchError {
    /// Network the process was configured for.
    pub network: Network,
    /// The hash the configuration expects.
    pub expected: BlockHash,
    /// The hash that was actually computed.
    pub computed: BlockHash,
}

impl fmt::Display for GenesisMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "genesis hash mismatch on {}: expected {}, computed {}",
            self.network, self.expected, self.computed
        )
    }
}

impl std::error::Error for GenesisMismatchError {}

/// The mainnet parameters.
pub static MAINNET: ChainParams = ChainParams {
    network: Network::Mmpcoin,
    magic: Magic::MMPCOIN,
    default_port: 10320,
    prune_after_height: 100_000,
    dns_seed: "seeder.mmpcoin.com",
    pubkey_address_prefix: constants::PUBKEY_ADDRESS_PREFIX,
    script_address_prefix: constants::SCRIPT_ADDRESS_PREFIX,
    secret_key_prefix: constants::SECRET_KEY_PREFIX,
    ext_public_key_prefix: constants::EXT_PUBLIC_KEY_PREFIX,
    ext_secret_key_prefix: constants::EXT_SECRET_KEY_PREFIX,
    auxpow_chain_id: constants::AUXPOW_CHAIN_ID,
    strict_chain_id: false,
    majority_window: 2000,
    majority_enforce_block_upgrade: 1500,
    majority_reject_block_outdated: 1900,
    rule_change_activation_threshold: 9576, // 95% of 10,080
    miner_confirmation_window: 10_080,      // 60 * 24 * 7 blocks, or one week
    subsidy_halving_interval: 100_000,
    genesis: GenesisParams {
        time: constants::GENESIS_TIME,
        nonce: constants::GENESIS_NONCE_MAINNET,
        bits: constants::GENESIS_BITS,
        reward: constants::GENESIS_REWARD,
        hash: constants::GENESIS_HASH_MAINNET,
        merkle_root: constants::GENESIS_MERKLE_ROOT,
    },
    checkpoints: &[(0, constants::GENESIS_HASH_MAINNET)],
    regimes: &[
        Params::MMPCOIN_BASE,
        Params::MMPCOIN_DIGISHIELD,
        Params::MMPCOIN_MIN_DIFFICULTY,
        Params::MMPCOIN_AUXPOW,
    ],
};

/// The testnet parameters.
pub static TESTNET: ChainParams = ChainParams {
    network: Network::Testnet,
    magic: Magic::TESTNET,
    default_port: 10420,
    prune_after_height: 100_000,
    dns_seed: "testnetseed.mmpcoin.com",
    pubkey_address_prefix: constants::PUBKEY_ADDRESS_PREFIX,
    script_address_prefix: constants::SCRIPT_ADDRESS_PREFIX,
    secret_key_prefix: constants::SECRET_KEY_PREFIX,
    ext_public_key_prefix: constants::EXT_PUBLIC_KEY_PREFIX,
    ext_secret_key_prefix: constants::EXT_SECRET_KEY_PREFIX,
    auxpow_chain_id: constants::AUXPOW_CHAIN_ID,
    strict_chain_id: true,
    majority_window: 2000,
    majority_enforce_block_upgrade: 1500,
    majority_reject_block_outdated: 1900,
    rule_change_activation_threshold: 9576,
    miner_confirmation_window: 10_080,
    subsidy_halving_interval: 100_000,
    genesis: GenesisParams {
        time: constants::GENESIS_TIME,
        nonce: constants::GENESIS_NONCE_TESTNET,
        bits: constants::GENESIS_BITS,
        reward: constants::GENESIS_REWARD,
        hash: constants::GENESIS_HASH_TESTNET,
        merkle_root: constants::GENESIS_MERKLE_ROOT,
    },
    checkpoints: &[(0, constants::GENESIS_HASH_TESTNET)],
    regimes: &[
        Params::TESTNET_BASE,
        Params::TESTNET_DIGISHIELD,
        Params::TESTNET_MIN_DIFFICULTY,
        Params::TESTNET_AUXPOW,
    ],
};

/// The regtest parameters.
pub static REGTEST: ChainParams = ChainParams {
    network: Network::Regtest,
    magic: Magic::REGTEST,
    default_port: 10520,
    prune_after_height: 100_000,
    dns_seed: "testnetseed.mmpcoin.com",
    pubkey_address_prefix: constants::PUBKEY_ADDRESS_PREFIX,
    script_address_prefix: constants::SCRIPT_ADDRESS_PREFIX,
    secret_key_prefix: constants::SECRET_KEY_PREFIX,
    ext_public_key_prefix: constants::EXT_PUBLIC_KEY_PREFIX,
    ext_secret_key_prefix: constants::EXT_SECRET_KEY_PREFIX,
    auxpow_chain_id: constants::AUXPOW_CHAIN_ID,
    strict_chain_id: true,
    majority_window: 2000,
    majority_enforce_block_upgrade: 1500,
    majority_reject_block_outdated: 1900,
    rule_change_activation_threshold: 9576,
    miner_confirmation_window: 10_080,
    subsidy_halving_interval: 100_000,
    genesis: GenesisParams {
        time: constants::GENESIS_TIME,
        nonce: constants::GENESIS_NONCE_REGTEST,
        bits: constants::GENESIS_BITS_REGTEST,
        reward: constants::GENESIS_REWARD,
        hash: constants::GENESIS_HASH_REGTEST,
        merkle_root: constants::GENESIS_MERKLE_ROOT,
    },
    checkpoints: &[(0, constants::GENESIS_HASH_REGTEST)],
    regimes: &[
        Params::REGTEST_BASE,
        Params::REGTEST_DIGISHIELD,
        Params::REGTEST_MIN_DIFFICULTY,
        Params::REGTEST_AUXPOW,
    ],
};

/// Resolves a `-chain` style network name (`main`, `test`, `regtest`) to its parameters.
pub fn select_network(name: &str) -> Result<&'static ChainParams, ParseNetworkError> {
    let network = Network::from_core_arg(name)?;
    Ok(ChainParams::for_network(network))
}

static INSTALLED: OnceCell<&'static ChainParams> = OnceCell::new();

/// A second network was installed into a process that already has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlreadyInstalledError {
    /// The network that is already installed.
    pub current: Network,
}

impl fmt::Display for AlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "chain parameters already installed for {}", self.current)
    }
}

impl std::error::Error for AlreadyInstalledError {}

/// Installs the process-wide current network. One-shot: the first call wins and any later call
/// fails, even with the same network.
///
/// The engine itself never reads this; every entry point takes parameters explicitly. The
/// global exists for the surrounding application's convenience.
pub fn install(network: Network) -> Result<&'static ChainParams, AlreadyInstalledError> {
    let params = ChainParams::for_network(network);
    let mut fresh = false;
    let current = INSTALLED.get_or_init(|| {
        fresh = true;
        params
    });
    if fresh {
        Ok(current)
    } else {
        Err(AlreadyInstalledError { current: current.network })
    }
}

/// Returns the installed network parameters, if [`install`] has been called.
pub fn installed() -> Option<&'static ChainParams> { INSTALLED.get().copied() }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pow::Target;

    #[test]
    fn select_network_by_core_arg() {
        assert_eq!(select_network("main").unwrap().network, Network::Mmpcoin);
        assert_eq!(select_network("test").unwrap().network, Network::Testnet);
        assert_eq!(select_network("regtest").unwrap().network, Network::Regtest);
        assert!(select_network("signet").is_err());
        assert!(select_network("").is_err());
    }

    #[test]
    fn bundles_are_consistent() {
        for params in [&MAINNET, &TESTNET, &REGTEST] {
            assert_eq!(params.base().height_effective, 0);
            assert_eq!(params.base().pow_limit, Target::MAX_ATTAINABLE);
            assert_eq!(params.base().pow_target_spacing, 60);
            assert_eq!(params.base().pow_target_timespan, 1200);
            assert_eq!(params.genesis.time, constants::GENESIS_TIME);
            assert_eq!(params.genesis.reward, constants::GENESIS_REWARD);
            assert_eq!(params.auxpow_chain_id, 0x00e6);
            // The checkpoint table anchors at genesis.
            assert_eq!(params.checkpoints[0], (0, params.genesis.hash));
        }
    }

    #[test]
    fn ports_and_magic() {
        assert_eq!(MAINNET.default_port, 10320);
        assert_eq!(TESTNET.default_port, 10420);
        assert_eq!(REGTEST.default_port, 10520);
        assert_eq!(MAINNET.magic, Magic::MMPCOIN);
        assert_eq!(TESTNET.magic, Magic::TESTNET);
        // Regtest ships with the mainnet message start bytes.
        assert_eq!(REGTEST.magic, MAINNET.magic);
    }

    #[test]
    fn regime_lookup_through_bundle() {
        // Any realistic height resolves to the launch regime on all networks.
        for params in [&MAINNET, &TESTNET, &REGTEST] {
            let active = params.consensus(200_000);
            assert_eq!(active.height_effective, 0);
            assert!(!active.digishield_difficulty_calculation);
        }
    }

    #[test]
    fn check_genesis() {
        assert!(MAINNET.check_genesis(constants::GENESIS_HASH_MAINNET).is_ok());
        let err = MAINNET.check_genesis(constants::GENESIS_HASH_TESTNET).unwrap_err();
        assert_eq!(err.network, Network::Mmpcoin);
        assert_eq!(err.expected, constants::GENESIS_HASH_MAINNET);
        assert!(err.to_string().contains("genesis hash mismatch"));
    }

    #[test]
    fn genesis_index_entry() {
        let entry = MAINNET.genesis.index_entry();
        assert_eq!(entry.height, 0);
        assert_eq!(entry.time, 1732866195);
        assert_eq!(entry.bits.to_consensus(), 0x1e0ffff0);
    }

    #[test]
    fn install_is_one_shot() {
        // Tests share one process, so exercise both arms through whichever call wins.
        match install(Network::Regtest) {
            Ok(params) => assert_eq!(params.network, Network::Regtest),
            Err(err) => assert_eq!(err.current, installed().unwrap().network),
        }
        // A repeat install always fails.
        assert!(install(Network::Regtest).is_err());
        assert!(installed().is_some());
    }
}
