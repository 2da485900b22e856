// SPDX-License-Identifier: CC0-1.0

//! Proof-of-work target types.
//!
//! Provides [`Target`], the expanded 256-bit threshold a block's Scrypt hash must not exceed,
//! and [`CompactTarget`], the packed `nBits` form block headers carry. All retarget arithmetic
//! happens on the expanded form; the compact form is only ever an encoding at the edges.
//!
//! The arithmetic surface is deliberately small. Retargeting scales a target by a timespan or
//! percentage and compares the result against the proof-of-work limit, so the backing integer
//! implements exactly that: byte conversions, comparison, bit length, shifts for the compact
//! codec, and multiplication/division by small scalars. Anything more would be untested
//! consensus surface.

use core::cmp::Ordering;
use core::fmt;

use crate::consensus::Params;
use crate::hash_types::BlockHash;

/// A 256 bit integer representing a proof-of-work threshold.
///
/// The Scrypt hash of a block's header must be lower than or equal to the current target for
/// the block to be accepted by the network. The lower the target, the more difficult it is to
/// generate a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target(U256);

impl Target {
    /// When parsing nBits, a negative target threshold is converted into a target of zero.
    pub const ZERO: Target = Target(U256::ZERO);

    /// The smallest positive target.
    pub const ONE: Target = Target(U256::ONE);

    /// The proof of work limit shared by every MmpCoin network (`~uint256(0) >> 20`).
    ///
    /// This is the highest target the retarget engine will ever return, i.e. the minimum
    /// difficulty. Note that the regtest genesis block was mined at `0x207fffff`, above this
    /// limit; the limit constrains retargeting, not hand-built genesis headers.
    pub const MAX_ATTAINABLE: Self =
        Target(U256([u64::MAX, u64::MAX, u64::MAX, 0x0000_0fff_ffff_ffff]));

    /// Computes the [`Target`] value from a compact representation.
    ///
    /// This is the forgiving parse used on values already stored in the block index: a negative
    /// mantissa decodes to [`Target::ZERO`] and overflow shifts everything out. Validation of
    /// untrusted headers goes through [`CompactTarget::unpack`] instead.
    pub fn from_compact(c: CompactTarget) -> Target {
        let bits = c.to_consensus();
        let exponent = bits >> 24;

        // Exponents of three or less shrink the mantissa instead of shifting the value up.
        let (mantissa, shift) = if exponent <= 3 {
            ((bits & 0x00ff_ffff) >> (8 * (3 - exponent)), 0)
        } else {
            (bits & 0x00ff_ffff, 8 * (exponent - 3))
        };

        // The mantissa is signed but a valid target may not be negative.
        if mantissa > 0x007f_ffff {
            Target::ZERO
        } else {
            Target(U256::from_u64(u64::from(mantissa)).shl(shift))
        }
    }

    /// Computes the compact value from a [`Target`] representation.
    ///
    /// The compact form is by definition lossy, this means that
    /// `t == Target::from_compact(t.to_compact_lossy())` does not always hold. The encoding is
    /// canonical: the top mantissa byte is nonzero and the sign bit is clear (the exponent is
    /// bumped when it would not be). Zero encodes to `0`.
    pub fn to_compact_lossy(self) -> CompactTarget {
        let mut size = (self.0.bit_len() + 7) / 8;
        let mut compact = if size <= 3 {
            (self.0.low_u64() << (8 * (3 - size))) as u32
        } else {
            self.0.shr(8 * (size - 3)).low_u32()
        };

        // A set sign bit would read back as a negative threshold; renormalise with a larger
        // exponent instead.
        if compact & 0x0080_0000 != 0 {
            compact >>= 8;
            size += 1;
        }

        CompactTarget::from_consensus(compact | (size << 24))
    }

    /// Returns true if block hash is less than or equal to this [`Target`].
    ///
    /// Proof-of-work validity for a block requires the hash of the block to be less than or
    /// equal to the target.
    pub fn is_met_by(&self, hash: BlockHash) -> bool {
        U256::from_le_bytes(hash.to_byte_array()) <= self.0
    }

    /// Is this target zero?
    pub fn is_zero(&self) -> bool { self.0.is_zero() }

    /// Multiplies the target by a small scalar, saturating at `2^256 - 1`.
    ///
    /// Every factor used by retargeting (timespans, percentages) fits comfortably in 32 bits.
    pub fn mul_small(self, k: u32) -> Target {
        let (res, overflow) = self.0.overflowing_mul_u64(u64::from(k));
        if overflow {
            Target(U256::MAX)
        } else {
            Target(res)
        }
    }

    /// Divides the target by a small scalar, flooring.
    ///
    /// # Panics
    ///
    /// If `k` is zero; a zero divisor on the retarget path is a programming error.
    pub fn div_small(self, k: u32) -> Target { Target(self.0.div_u64(u64::from(k))) }

    /// Creates a target from a big-endian byte array.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Target { Target(U256::from_be_bytes(bytes)) }

    /// Creates a target from a little-endian byte array.
    pub fn from_le_bytes(bytes: [u8; 32]) -> Target { Target(U256::from_le_bytes(bytes)) }

    /// Converts the target to a big-endian byte array.
    pub fn to_be_bytes(self) -> [u8; 32] { self.0.to_be_bytes() }

    /// Converts the target to a little-endian byte array.
    pub fn to_le_bytes(self) -> [u8; 32] { self.0.to_le_bytes() }
}

impl fmt::LowerHex for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::LowerHex::fmt(&self.0, f) }
}

impl fmt::UpperHex for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::UpperHex::fmt(&self.0, f) }
}

/// Encoding of 256-bit target as 32-bit float.
///
/// This is used to encode a target into the block header. Satoshi made this part of consensus
/// code in the original version of Bitcoin, likely copying an idea from OpenSSL, and every
/// descendant chain is stuck with it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompactTarget(u32);

impl CompactTarget {
    /// Creates a [`CompactTarget`] from a consensus encoded `u32`.
    pub const fn from_consensus(bits: u32) -> Self { Self(bits) }

    /// Returns the consensus encoded `u32` representation of this [`CompactTarget`].
    pub const fn to_consensus(self) -> u32 { self.0 }

    /// Fully decodes the compact form, keeping the flags the packed encoding can carry.
    ///
    /// Mirrors the reference `SetCompact` semantics: the returned target is computed from the
    /// sign-masked mantissa, `negative` is set when the sign bit is set on a nonzero mantissa,
    /// and `overflow` is set when the mantissa shift does not fit 256 bits. Never panics, on
    /// any input.
    pub fn unpack(self) -> (Target, bool, bool) {
        let size = self.0 >> 24;
        let mut word = self.0 & 0x007f_ffff;
        let value = if size <= 3 {
            // The flags below are computed on the word with its truncated low bytes already
            // dropped, exactly as the reference does.
            word >>= 8 * (3 - size);
            U256::from_u64(u64::from(word))
        } else {
            U256::from_u64(u64::from(word)).shl(8 * (size - 3))
        };
        let negative = word != 0 && (self.0 & 0x0080_0000) != 0;
        let overflow = word != 0
            && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
        (Target(value), negative, overflow)
    }
}

impl From<CompactTarget> for Target {
    fn from(c: CompactTarget) -> Self { Target::from_compact(c) }
}

impl fmt::LowerHex for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::LowerHex::fmt(&self.0, f) }
}

impl fmt::UpperHex for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::UpperHex::fmt(&self.0, f) }
}

/// Checks that a block hash satisfies the claimed compact target.
///
/// Returns `false` when the compact form is negative, zero or overflowing, when the decoded
/// target exceeds the network's proof of work limit, or when the hash is above the target.
pub fn check_proof_of_work(hash: BlockHash, bits: CompactTarget, params: &Params) -> bool {
    let (target, negative, overflow) = bits.unpack();

    // Check range.
    if negative || target.is_zero() || overflow || target > params.pow_limit {
        return false;
    }

    // Check proof of work matches claimed amount.
    target.is_met_by(hash)
}

/// 256-bit unsigned integer backing [`Target`]: four 64-bit limbs, least significant first.
///
/// Carries only what the compact codec and the retarget scaling need. Shifts discard bits
/// pushed past either end, multiplication reports overflow so the caller can saturate, and
/// division is the flooring short division of a multi-limb value by a single limb.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
struct U256([u64; 4]);

impl U256 {
    const ZERO: U256 = U256([0; 4]);

    const ONE: U256 = U256([1, 0, 0, 0]);

    const MAX: U256 = U256([u64::MAX; 4]);

    const fn from_u64(n: u64) -> U256 { U256([n, 0, 0, 0]) }

    fn from_be_bytes(bytes: [u8; 32]) -> U256 {
        let mut limbs = [0u64; 4];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut limb = [0u8; 8];
            limb.copy_from_slice(chunk);
            limbs[3 - i] = u64::from_be_bytes(limb);
        }
        U256(limbs)
    }

    fn from_le_bytes(bytes: [u8; 32]) -> U256 {
        let mut limbs = [0u64; 4];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut limb = [0u8; 8];
            limb.copy_from_slice(chunk);
            limbs[i] = u64::from_le_bytes(limb);
        }
        U256(limbs)
    }

    fn to_be_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, chunk) in out.chunks_exact_mut(8).enumerate() {
            chunk.copy_from_slice(&self.0[3 - i].to_be_bytes());
        }
        out
    }

    fn to_le_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, chunk) in out.chunks_exact_mut(8).enumerate() {
            chunk.copy_from_slice(&self.0[i].to_le_bytes());
        }
        out
    }

    fn is_zero(&self) -> bool { self.0 == [0; 4] }

    /// Number of bits needed to represent the value; zero for zero.
    fn bit_len(&self) -> u32 {
        for i in (0..4).rev() {
            if self.0[i] != 0 {
                return 64 * i as u32 + 64 - self.0[i].leading_zeros();
            }
        }
        0
    }

    /// The lowest 64 bits, truncating.
    fn low_u64(&self) -> u64 { self.0[0] }

    /// The lowest 32 bits, truncating.
    fn low_u32(&self) -> u32 { self.0[0] as u32 }

    /// Shifts left; bits pushed past the top, or the whole value for `shift >= 256`, are
    /// discarded.
    fn shl(self, shift: u32) -> U256 {
        if shift >= 256 {
            return U256::ZERO;
        }
        let word = (shift / 64) as usize;
        let bit = shift % 64;

        let mut limbs = [0u64; 4];
        for i in word..4 {
            limbs[i] = self.0[i - word] << bit;
            if bit > 0 && i > word {
                limbs[i] |= self.0[i - word - 1] >> (64 - bit);
            }
        }
        U256(limbs)
    }

    /// Shifts right; bits pushed past the bottom, or the whole value for `shift >= 256`, are
    /// discarded.
    fn shr(self, shift: u32) -> U256 {
        if shift >= 256 {
            return U256::ZERO;
        }
        let word = (shift / 64) as usize;
        let bit = shift % 64;

        let mut limbs = [0u64; 4];
        for i in 0..4 - word {
            limbs[i] = self.0[i + word] >> bit;
            if bit > 0 && i + word + 1 < 4 {
                limbs[i] |= self.0[i + word + 1] << (64 - bit);
            }
        }
        U256(limbs)
    }

    /// Multiplies by a 64-bit scalar, carrying limb to limb.
    ///
    /// Returns the (wrapped) product and whether it overflowed 256 bits.
    fn overflowing_mul_u64(self, rhs: u64) -> (U256, bool) {
        let mut limbs = [0u64; 4];
        let mut carry = 0u128;
        for i in 0..4 {
            let product = u128::from(self.0[i]) * u128::from(rhs) + carry;
            limbs[i] = product as u64;
            carry = product >> 64;
        }
        (U256(limbs), carry != 0)
    }

    /// Divides by a 64-bit scalar, flooring: short division, high limb first, remainder
    /// carried down.
    ///
    /// # Panics
    ///
    /// If `rhs` is zero.
    fn div_u64(self, rhs: u64) -> U256 {
        assert!(rhs != 0, "attempted to divide a target by zero");
        let rhs = u128::from(rhs);

        let mut limbs = [0u64; 4];
        let mut rem = 0u128;
        for i in (0..4).rev() {
            let cur = (rem << 64) | u128::from(self.0[i]);
            limbs[i] = (cur / rhs) as u64;
            rem = cur % rhs;
        }
        U256(limbs)
    }
}

// Limbs are stored least significant first, so the derived lexicographic order would be
// wrong; compare from the top limb down.
impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "0x{:x}", self) }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        hex::fmt_hex_exact!(f, 32, &self.to_be_bytes(), hex::Case::Lower)
    }
}

impl fmt::UpperHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        hex::fmt_hex_exact!(f, 32, &self.to_be_bytes(), hex::Case::Upper)
    }
}
