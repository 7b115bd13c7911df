// src/core/mask.rs

//! Bitmask selection of qubits.

use super::error::{QpuError, QpuResult};
use super::qubit::{QubitId, QubitRegister};
use std::fmt;

/// Selects a subset of a [`QubitRegister`] by bit position.
///
/// Bit `i` of a [`Bits`](QubitMask::Bits) mask selects the register's qubit at
/// position `i`. "Every allocated qubit" is the explicit [`All`](QubitMask::All)
/// variant rather than an all-ones integer, so it stays valid whatever the
/// register size.
///
/// ```
/// use qpu::{QubitMask, QubitRegister, QubitId};
///
/// let reg = QubitRegister::new(4).unwrap();
/// assert_eq!(QubitMask::from(0b1010).resolve(&reg).unwrap(), vec![QubitId(1), QubitId(3)]);
/// assert_eq!(QubitMask::All.resolve(&reg).unwrap().len(), 4);
/// assert!(QubitMask::from(0x10).resolve(&reg).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QubitMask {
    /// Every qubit of the register.
    #[default]
    All,
    /// The qubits whose positions are set in the 64-bit word.
    Bits(u64),
}

impl QubitMask {
    /// The mask selecting nothing; used as "no control".
    pub const NONE: QubitMask = QubitMask::Bits(0);

    /// Returns `true` if the mask cannot select any qubit.
    ///
    /// [`All`](QubitMask::All) is never empty, even against an empty register.
    pub fn is_empty(&self) -> bool {
        matches!(self, QubitMask::Bits(0))
    }

    /// Concrete bit pattern of this mask for a register of `size` qubits.
    pub fn bits_for(&self, size: usize) -> u64 {
        match self {
            QubitMask::All if size >= 64 => u64::MAX,
            QubitMask::All => (1u64 << size) - 1,
            QubitMask::Bits(bits) => *bits,
        }
    }

    /// Resolves the mask to handles in ascending bit order.
    ///
    /// Fails with [`QpuError::MaskOutOfRange`] if any bit at or beyond the
    /// register size is set. No side effects.
    pub fn resolve(&self, register: &QubitRegister) -> QpuResult<Vec<QubitId>> {
        let size = register.len();
        let bits = match self {
            QubitMask::All => return Ok(register.qubits().to_vec()),
            QubitMask::Bits(bits) => *bits,
        };
        let overflow = if size >= 64 { 0 } else { bits >> size };
        if overflow != 0 {
            return Err(QpuError::MaskOutOfRange {
                mask: bits,
                bit: size as u32 + overflow.trailing_zeros(),
                size,
            });
        }
        Ok((0..size)
            .filter(|i| bits & (1u64 << i) != 0)
            .filter_map(|i| register.get(i))
            .collect())
    }

    /// Bitwise union of two masks.
    pub fn union(self, other: QubitMask) -> QubitMask {
        match (self, other) {
            (QubitMask::Bits(a), QubitMask::Bits(b)) => QubitMask::Bits(a | b),
            _ => QubitMask::All,
        }
    }
}

impl From<u64> for QubitMask {
    fn from(bits: u64) -> Self {
        QubitMask::Bits(bits)
    }
}

impl std::ops::BitOr for QubitMask {
    type Output = QubitMask;

    fn bitor(self, rhs: QubitMask) -> QubitMask {
        self.union(rhs)
    }
}

impl fmt::Display for QubitMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitMask::All => write!(f, "all"),
            QubitMask::Bits(bits) => write!(f, "{bits:#x}"),
        }
    }
}
