// SPDX-License-Identifier: CC0-1.0

//! The static per-network configuration: genesis assertions, magic bytes, ports and prefix
//! tables, exercised the way a node does at start-up.

use mmpcoin_consensus::{constants, select_network, ChainParams, Magic, Network};

#[test]
fn genesis_hashes_are_asserted_at_init() {
    // A node computes the genesis hash with its Scrypt collaborator and hands it over; the
    // configured digests must match the published chain.
    let cases = [
        (Network::Mmpcoin, "05de8a722d49871f48a9b8e52c72ce7ab76f68d8ebef21abd595a171d874c8c7"),
        (Network::Testnet, "2bef638807102e42c3055778f1ecb7f262edf00c28fcce07c7984e902a89260c"),
        (Network::Regtest, "2c02e61349707b8e6ddc8dfe8889983167a35a0d20e0f212e82d426e021328ef"),
    ];

    for (network, hash_str) in cases {
        let params = ChainParams::for_network(network);
        let computed = hash_str.parse().unwrap();
        assert!(params.check_genesis(computed).is_ok(), "{}", network);
        assert_eq!(params.genesis.hash.to_string(), hash_str);
    }

    // Wrong chain: fatal configuration error.
    let mainnet = ChainParams::for_network(Network::Mmpcoin);
    let testnet_hash = ChainParams::for_network(Network::Testnet).genesis.hash;
    assert!(mainnet.check_genesis(testnet_hash).is_err());
}

#[test]
fn genesis_parameters_match_the_published_chain() {
    let mainnet = ChainParams::for_network(Network::Mmpcoin);
    assert_eq!(mainnet.genesis.time, 1732866195);
    assert_eq!(mainnet.genesis.nonce, 2000076429);
    assert_eq!(mainnet.genesis.bits.to_consensus(), 0x1e0ffff0);
    assert_eq!(mainnet.genesis.reward, 88 * constants::COIN);

    let testnet = ChainParams::for_network(Network::Testnet);
    assert_eq!(testnet.genesis.nonce, 542590);
    assert_eq!(testnet.genesis.bits.to_consensus(), 0x1e0ffff0);

    let regtest = ChainParams::for_network(Network::Regtest);
    assert_eq!(regtest.genesis.nonce, 0);
    assert_eq!(regtest.genesis.bits.to_consensus(), 0x207fffff);

    // All three share the coinbase message and merkle root.
    assert_eq!(constants::GENESIS_TIMESTAMP_MESSAGE, "29/11/2024 MmpCoin started.");
    for params in [mainnet, testnet, regtest] {
        assert_eq!(params.genesis.merkle_root, constants::GENESIS_MERKLE_ROOT);
    }
}

#[test]
fn network_magic_and_ports() {
    let table = [
        (Network::Mmpcoin, [0xc0u8, 0xc0, 0xc0, 0xc0], 10320u16),
        (Network::Testnet, [0xfc, 0xc1, 0xb7, 0xdc], 10420),
        (Network::Regtest, [0xc0, 0xc0, 0xc0, 0xc0], 10520),
    ];

    for (network, magic, port) in table {
        let params = ChainParams::for_network(network);
        assert_eq!(params.magic, Magic::from_bytes(magic));
        assert_eq!(params.default_port, port);
    }
}

#[test]
fn select_network_names() {
    assert_eq!(select_network("main").unwrap().network, Network::Mmpcoin);
    assert_eq!(select_network("test").unwrap().network, Network::Testnet);
    assert_eq!(select_network("regtest").unwrap().network, Network::Regtest);

    for bad in ["signet", "mainnet", "MAIN", ""] {
        assert!(select_network(bad).is_err(), "{:?}", bad);
    }
}

#[test]
fn prefix_tables_are_shared() {
    // All three networks ship the same base58 and BIP32 prefixes and AuxPoW chain id.
    for network in [Network::Mmpcoin, Network::Testnet, Network::Regtest] {
        let params = ChainParams::for_network(network);
        assert_eq!(params.pubkey_address_prefix, 50);
        assert_eq!(params.script_address_prefix, 30);
        assert_eq!(params.secret_key_prefix, 153);
        assert_eq!(params.ext_public_key_prefix, [0x02, 0xFA, 0xCA, 0xFD]);
        assert_eq!(params.ext_secret_key_prefix, [0x02, 0xFA, 0xC3, 0x98]);
        assert_eq!(params.auxpow_chain_id, 0x00e6);
    }
}

#[test]
fn consensus_flags_as_shipped() {
    for network in [Network::Mmpcoin, Network::Testnet, Network::Regtest] {
        let base = ChainParams::for_network(network).base();
        assert!(!base.no_pow_retargeting);
        assert!(!base.allow_min_difficulty_blocks);
        assert!(!base.allow_digishield_min_difficulty_blocks);
        assert!(!base.digishield_difficulty_calculation);
        assert_eq!(base.difficulty_adjustment_interval(), 20);
    }
}
