// SPDX-License-Identifier: CC0-1.0

//! # MmpCoin Consensus Engine
//!
//! The consensus-critical difficulty machinery of the MmpCoin network: 256-bit targets with
//! their compact (`nBits`) encoding, the per-network consensus parameter tables, and the
//! retargeting rules — the inherited Bitcoin/Litecoin/Dogecoin retarget below the fork height
//! and the adaptive spacing-window algorithm above it.
//!
//! The crate is a library for validators and miners: given a read-only view of the block index
//! and a candidate timestamp, [`next_work_required`] returns the compact target the next block
//! must satisfy, bit-exact, and [`check_proof_of_work`] verifies a header hash against a
//! claimed target. Everything else a node needs (serialization, Scrypt hashing, networking,
//! chain storage) lives in its own crates; this one only ever reads.
//!
//! ```
//! use mmpcoin_consensus::{next_work_required, ChainParams, ChainView, MemoryChain, Network};
//!
//! let params = ChainParams::for_network(Network::Mmpcoin);
//! let mut chain = MemoryChain::new();
//! let genesis = params.genesis.index_entry();
//! chain.push(genesis.time, genesis.bits);
//!
//! // The block extending genesis is off the retarget boundary: difficulty carries over.
//! let tip = chain.tip();
//! let bits = next_work_required(&chain, tip.as_ref(), i64::from(genesis.time) + 60, params);
//! assert_eq!(bits, genesis.bits);
//! ```
//!
//! ## Available feature flags
//!
//! * `serde` - (dependency), implements `serde`-based serialization and deserialization for the
//!   public value types.

// Coding conventions.
#![warn(missing_docs)]
// Exclude lints we don't think are valuable.
#![allow(clippy::manual_range_contains)] // More readable than clippy's format.

pub mod chain;
pub mod consensus;
pub mod constants;
pub mod hash_types;
pub mod network;
pub mod pow;
pub mod retarget;

pub use crate::chain::{BlockIndexEntry, ChainView, MemoryChain};
pub use crate::consensus::{install, installed, select_network, ChainParams, Params};
pub use crate::hash_types::{BlockHash, TxMerkleNode};
pub use crate::network::{Magic, Network};
pub use crate::pow::{check_proof_of_work, CompactTarget, Target};
pub use crate::retarget::{next_work_required, FORK_HEIGHT, POST_FORK_FREEZE};
