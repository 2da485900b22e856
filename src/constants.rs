// SPDX-License-Identifier: CC0-1.0

//! Blockchain constants.
//!
//! The genesis parameters every network was launched with, and the address-prefix tables shared
//! by all of them. Genesis construction itself (coinbase script, merkle tree, Scrypt hashing)
//! belongs to external collaborators; the engine only carries the inputs and the expected
//! digests so that initialisation can assert it is on the right chain.

use crate::hash_types::{BlockHash, TxMerkleNode};
use crate::pow::CompactTarget;

/// How many base units one coin is divided into.
pub const COIN: u64 = 100_000_000;

/// The subsidy paid by the genesis block: 88 coin.
pub const GENESIS_REWARD: u64 = 88 * COIN;

/// The message embedded in the genesis coinbase script.
pub const GENESIS_TIMESTAMP_MESSAGE: &str = "29/11/2024 MmpCoin started.";

/// The timestamp every network's genesis block carries.
pub const GENESIS_TIME: u32 = 1732866195;

/// Compact target the mainnet and testnet genesis blocks were mined at.
pub const GENESIS_BITS: CompactTarget = CompactTarget::from_consensus(0x1e0ffff0);

/// Compact target the regtest genesis block carries. Above the shared powLimit, as shipped.
pub const GENESIS_BITS_REGTEST: CompactTarget = CompactTarget::from_consensus(0x207fffff);

/// Nonce of the mainnet genesis block.
pub const GENESIS_NONCE_MAINNET: u32 = 2000076429;

/// Nonce of the testnet genesis block.
pub const GENESIS_NONCE_TESTNET: u32 = 542590;

/// Nonce of the regtest genesis block.
pub const GENESIS_NONCE_REGTEST: u32 = 0;

/// The merged-mining chain identifier, shared by all three networks.
pub const AUXPOW_CHAIN_ID: u32 = 0x00e6;

/// Base58 version byte for pay-to-pubkey-hash addresses (all networks).
pub const PUBKEY_ADDRESS_PREFIX: u8 = 50;

/// Base58 version byte for pay-to-script-hash addresses (all networks).
pub const SCRIPT_ADDRESS_PREFIX: u8 = 30;

/// Base58 version byte for WIF private keys (all networks).
pub const SECRET_KEY_PREFIX: u8 = 153;

/// BIP32 extended public key version bytes (all networks).
pub const EXT_PUBLIC_KEY_PREFIX: [u8; 4] = [0x02, 0xFA, 0xCA, 0xFD];

/// BIP32 extended secret key version bytes (all networks).
pub const EXT_SECRET_KEY_PREFIX: [u8; 4] = [0x02, 0xFA, 0xC3, 0x98];

/// Expected Scrypt hash of the mainnet genesis block.
// 05de8a722d49871f48a9b8e52c72ce7ab76f68d8ebef21abd595a171d874c8c7
pub const GENESIS_HASH_MAINNET: BlockHash = BlockHash::from_byte_array([
    0xc7, 0xc8, 0x74, 0xd8, 0x71, 0xa1, 0x95, 0xd5,
    0xab, 0x21, 0xef, 0xeb, 0xd8, 0x68, 0x6f, 0xb7,
    0x7a, 0xce, 0x72, 0x2c, 0xe5, 0xb8, 0xa9, 0x48,
    0x1f, 0x87, 0x49, 0x2d, 0x72, 0x8a, 0xde, 0x05,
]);

/// Expected Scrypt hash of the testnet genesis block.
// 2bef638807102e42c3055778f1ecb7f262edf00c28fcce07c7984e902a89260c
pub const GENESIS_HASH_TESTNET: BlockHash = BlockHash::from_byte_array([
    0x0c, 0x26, 0x89, 0x2a, 0x90, 0x4e, 0x98, 0xc7,
    0x07, 0xce, 0xfc, 0x28, 0x0c, 0xf0, 0xed, 0x62,
    0xf2, 0xb7, 0xec, 0xf1, 0x78, 0x57, 0x05, 0xc3,
    0x42, 0x2e, 0x10, 0x07, 0x88, 0x63, 0xef, 0x2b,
]);

/// Expected Scrypt hash of the regtest genesis block.
// 2c02e61349707b8e6ddc8dfe8889983167a35a0d20e0f212e82d426e021328ef
pub const GENESIS_HASH_REGTEST: BlockHash = BlockHash::from_byte_array([
    0xef, 0x28, 0x13, 0x02, 0x6e, 0x42, 0x2d, 0xe8,
    0x12, 0xf2, 0xe0, 0x20, 0x0d, 0x5a, 0xa3, 0x67,
    0x31, 0x98, 0x89, 0x88, 0xfe, 0x8d, 0xdc, 0x6d,
    0x8e, 0x7b, 0x70, 0x49, 0x13, 0xe6, 0x02, 0x2c,
]);

/// Merkle root of the genesis block, identical on every network (same coinbase).
// d9b31d73546d5dbc8316d8d6b8e3c1c54b9cf8a5b399c17a71dece0e8c593261
pub const GENESIS_MERKLE_ROOT: TxMerkleNode = TxMerkleNode::from_byte_array([
    0x61, 0x32, 0x59, 0x8c, 0x0e, 0xce, 0xde, 0x71,
    0x7a, 0xc1, 0x99, 0xb3, 0xa5, 0xf8, 0x9c, 0x4b,
    0xc5, 0xc1, 0xe3, 0xb8, 0xd6, 0xd8, 0x16, 0x83,
    0xbc, 0x5d, 0x6d, 0x54, 0x73, 0x1d, 0xb3, 0xd9,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_hashes_render_in_display_order() {
        assert_eq!(
            GENESIS_HASH_MAINNET.to_string(),
            "05de8a722d49871f48a9b8e52c72ce7ab76f68d8ebef21abd595a171d874c8c7"
        );
        assert_eq!(
            GENESIS_HASH_TESTNET.to_string(),
            "2bef638807102e42c3055778f1ecb7f262edf00c28fcce07c7984e902a89260c"
        );
        assert_eq!(
            GENESIS_HASH_REGTEST.to_string(),
            "2c02e61349707b8e6ddc8dfe8889983167a35a0d20e0f212e82d426e021328ef"
        );
        assert_eq!(
            GENESIS_MERKLE_ROOT.to_string(),
            "d9b31d73546d5dbc8316d8d6b8e3c1c54b9cf8a5b399c17a71dece0e8c593261"
        );
    }

    #[test]
    fn genesis_reward() {
        assert_eq!(GENESIS_REWARD, 8_800_000_000);
    }
}
