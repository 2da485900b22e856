// SPDX-License-Identifier: CC0-1.0

//! MmpCoin network identity.
//!
//! The [`Network`] type selects which chain the process operates on, and [`Magic`] carries the
//! message start bytes that identify it on the wire. The peer-to-peer protocol itself lives in
//! other crates; consensus only needs to know which network's parameters apply.

use core::fmt;
use core::str::FromStr;

use hex::FromHex;

/// The cryptocurrency network to act on.
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Network {
    /// Mainnet MmpCoin.
    Mmpcoin,
    /// MmpCoin's testnet network.
    Testnet,
    /// MmpCoin's regtest network.
    Regtest,
}

impl Network {
    /// Creates a `Network` from the magic bytes.
    ///
    /// Note that regtest reuses the mainnet magic, so those bytes resolve to
    /// [`Network::Mmpcoin`].
    pub fn from_magic(magic: Magic) -> Option<Network> { Network::try_from(magic).ok() }

    /// Return the network magic bytes, which should be encoded little-endian at the start of
    /// every message.
    pub fn magic(self) -> Magic { Magic::from(self) }

    /// Converts a `Network` to its equivalent `-chain` argument name.
    ///
    /// Allowed values: main, test, regtest.
    pub fn to_core_arg(self) -> &'static str {
        match self {
            Network::Mmpcoin => "main",
            Network::Testnet => "test",
            Network::Regtest => "regtest",
        }
    }

    /// Converts a `-chain` argument name to its equivalent `Network`.
    pub fn from_core_arg(core_arg: &str) -> Result<Self, ParseNetworkError> {
        use Network::*;

        let network = match core_arg {
            "main" => Mmpcoin,
            "test" => Testnet,
            "regtest" => Regtest,
            _ => return Err(ParseNetworkError(core_arg.to_owned())),
        };
        Ok(network)
    }
}

/// An error in parsing network string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNetworkError(pub(crate) String);

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "failed to parse {} as network", self.0)
    }
}

impl std::error::Error for ParseNetworkError {}

impl FromStr for Network {
    type Err = ParseNetworkError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Network::*;

        let network = match s {
            "mmpcoin" => Mmpcoin,
            "testnet" => Testnet,
            "regtest" => Regtest,
            _ => return Err(ParseNetworkError(s.to_owned())),
        };
        Ok(network)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Network::*;

        let s = match *self {
            Mmpcoin => "mmpcoin",
            Testnet => "testnet",
            Regtest => "regtest",
        };
        write!(f, "{}", s)
    }
}

/// Network magic bytes to identify the cryptocurrency network the message was intended for.
///
/// The message start string is designed to be unlikely to occur in normal data: rarely used
/// upper ASCII, not valid as UTF-8, and producing a large 32-bit integer at any alignment.
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash)]
pub struct Magic([u8; 4]);

impl Magic {
    /// MmpCoin mainnet network magic bytes.
    pub const MMPCOIN: Self = Self([0xC0, 0xC0, 0xC0, 0xC0]);
    /// MmpCoin testnet network magic bytes.
    pub const TESTNET: Self = Self([0xFC, 0xC1, 0xB7, 0xDC]);
    /// MmpCoin regtest network magic bytes. Identical to mainnet's, as shipped.
    pub const REGTEST: Self = Self([0xC0, 0xC0, 0xC0, 0xC0]);

    /// Create network magic from bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Magic { Magic(bytes) }

    /// Get network magic bytes.
    pub const fn to_bytes(self) -> [u8; 4] { self.0 }
}

/// An error in parsing magic bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMagicError {
    /// The error that occurred when parsing the string.
    error: hex::HexToArrayError,
    /// The byte string that failed to parse.
    magic: String,
}

impl FromStr for Magic {
    type Err = ParseMagicError;

    fn from_str(s: &str) -> Result<Magic, Self::Err> {
        match <[u8; 4]>::from_hex(s) {
            Ok(magic) => Ok(Magic::from_bytes(magic)),
            Err(e) => Err(ParseMagicError { error: e, magic: s.to_owned() }),
        }
    }
}

impl From<Network> for Magic {
    fn from(network: Network) -> Magic {
        match network {
            // Note: new network entries must explicitly be matched in `try_from` below.
            Network::Mmpcoin => Magic::MMPCOIN,
            Network::Testnet => Magic::TESTNET,
            Network::Regtest => Magic::REGTEST,
        }
    }
}

/// Error in parsing magic from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMagic(Magic);

impl TryFrom<Magic> for Network {
    type Error = UnknownMagic;

    fn try_from(magic: Magic) -> Result<Self, Self::Error> {
        match magic {
            // Note: any new network entries must be matched against here. Regtest shares the
            // mainnet bytes, so this arm also covers Magic::REGTEST.
            Magic::MMPCOIN => Ok(Network::Mmpcoin),
            Magic::TESTNET => Ok(Network::Testnet),
            _ => Err(UnknownMagic(magic)),
        }
    }
}

impl fmt::Display for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        hex::fmt_hex_exact!(f, 4, &self.0, hex::Case::Lower)
    }
}

impl fmt::Debug for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(self, f) }
}

impl fmt::LowerHex for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        hex::fmt_hex_exact!(f, 4, &self.0, hex::Case::Lower)
    }
}

impl fmt::UpperHex for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        hex::fmt_hex_exact!(f, 4, &self.0, hex::Case::Upper)
    }
}

impl AsRef<[u8]> for Magic {
    fn as_ref(&self) -> &[u8] { &self.0 }
}

impl AsRef<[u8; 4]> for Magic {
    fn as_ref(&self) -> &[u8; 4] { &self.0 }
}

impl fmt::Display for ParseMagicError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "failed to parse {} as network magic: {}", self.magic, self.error)
    }
}

impl std::error::Error for ParseMagicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { Some(&self.error) }
}

impl fmt::Display for UnknownMagic {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "unknown network magic {}", self.0)
    }
}

impl std::error::Error for UnknownMagic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_bytes() {
        assert_eq!(Network::Mmpcoin.magic().to_bytes(), [0xc0, 0xc0, 0xc0, 0xc0]);
        assert_eq!(Network::Testnet.magic().to_bytes(), [0xfc, 0xc1, 0xb7, 0xdc]);
        assert_eq!(Network::Regtest.magic().to_bytes(), [0xc0, 0xc0, 0xc0, 0xc0]);
    }

    #[test]
    fn magic_resolution() {
        assert_eq!(Network::from_magic(Magic::TESTNET), Some(Network::Testnet));
        // Regtest shares the mainnet bytes and resolves to mainnet.
        assert_eq!(Network::from_magic(Magic::REGTEST), Some(Network::Mmpcoin));
        assert_eq!(Network::from_magic(Magic::from_bytes([0xff; 4])), None);
    }

    #[test]
    fn string_round_trip() {
        assert_eq!(Network::Mmpcoin.to_string(), "mmpcoin");
        assert_eq!(Network::Testnet.to_string(), "testnet");
        assert_eq!(Network::Regtest.to_string(), "regtest");

        assert_eq!("mmpcoin".parse::<Network>().unwrap(), Network::Mmpcoin);
        assert_eq!("testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("regtest".parse::<Network>().unwrap(), Network::Regtest);
        assert!("fakenet".parse::<Network>().is_err());
    }

    #[test]
    fn core_arg_round_trip() {
        for network in [Network::Mmpcoin, Network::Testnet, Network::Regtest] {
            assert_eq!(Network::from_core_arg(network.to_core_arg()), Ok(network));
        }
        assert!(Network::from_core_arg("signet").is_err());
    }

    #[test]
    fn magic_from_str() {
        let magic: Magic = "fcc1b7dc".parse().unwrap();
        assert_eq!(magic, Magic::TESTNET);
        assert_eq!(magic.to_string(), "fcc1b7dc");
        assert!("beef".parse::<Magic>().is_err());
        assert!("not hex!".parse::<Magic>().is_err());
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_round_trip() {
        let want = "\"mmpcoin\"";
        let got = serde_json::to_string(&Network::Mmpcoin).expect("serialize network");
        assert_eq!(got, want);
        let back: Network = serde_json::from_str(&got).expect("deserialize network");
        assert_eq!(back, Network::Mmpcoin);
    }
}
