// SPDX-License-Identifier: CC0-1.0

//! Consensus parameters.
//!
//! MmpCoin inherits Dogecoin's trick of keeping several consensus parameter sets per network,
//! each tagged with the height it activates at; [`params::regime_for`] picks the active one.
//! [`chain_params::ChainParams`] bundles the regimes with the per-network constants.

pub mod chain_params;
pub mod params;

pub use self::chain_params::{
    install, installed, select_network, AlreadyInstalledError, ChainParams, GenesisMismatchError,
    GenesisParams, MAINNET, REGTEST, TESTNET,
};
pub use self::params::Params;
