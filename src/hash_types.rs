// SPDX-License-Identifier: CC0-1.0

//! MmpCoin hash types.
//!
//! Block hashes on this chain are Scrypt digests computed by an external collaborator; the
//! consensus engine only ever consumes them as opaque 256-bit values. The types here store the
//! digest in the byte order it is produced in (little-endian, like every Bitcoin-derived chain)
//! and display it byte-reversed, matching RPC and explorer conventions.

use core::fmt;
use core::str::FromStr;

use hex::FromHex;

macro_rules! impl_hash_newtype {
    ($ty:ident) => {
        impl $ty {
            /// Constructs a hash from the underlying byte array (digest byte order).
            pub const fn from_byte_array(bytes: [u8; 32]) -> Self { $ty(bytes) }

            /// Returns the underlying byte array.
            pub const fn to_byte_array(self) -> [u8; 32] { self.0 }

            /// Returns a reference to the underlying byte array.
            pub const fn as_byte_array(&self) -> &[u8; 32] { &self.0 }

            /// The all-zeros hash, used where a predecessor does not exist.
            pub const fn all_zeros() -> Self { $ty([0; 32]) }
        }

        impl fmt::LowerHex for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                hex::fmt_hex_exact!(f, 32, self.0.iter().rev(), hex::Case::Lower)
            }
        }

        impl fmt::UpperHex for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                hex::fmt_hex_exact!(f, 32, self.0.iter().rev(), hex::Case::Upper)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::LowerHex::fmt(self, f) }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}({})", stringify!($ty), self)
            }
        }

        impl FromStr for $ty {
            type Err = ParseHashError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut bytes =
                    <[u8; 32]>::from_hex(s).map_err(|e| ParseHashError { error: e })?;
                bytes.reverse(); // display order is the reverse of digest order
                Ok($ty(bytes))
            }
        }

        impl AsRef<[u8]> for $ty {
            fn as_ref(&self) -> &[u8] { &self.0 }
        }
    };
}

/// The Scrypt proof-of-work hash of a block header.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockHash([u8; 32]);
impl_hash_newtype!(BlockHash);

/// The merkle root of the transactions in a block.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxMerkleNode([u8; 32]);
impl_hash_newtype!(TxMerkleNode);

/// An error in parsing a hash from a hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHashError {
    error: hex::HexToArrayError,
}

impl fmt::Display for ParseHashError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "failed to parse hash: {}", self.error)
    }
}

impl std::error::Error for ParseHashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { Some(&self.error) }
}
