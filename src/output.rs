//! The output domain of truth tables.

use crate::TruthError;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::str::FromStr;

/// The value of a Boolean function on a single point.
///
/// Binary tables only use [Output::Zero] and [Output::One]. Plane-coded tables also accept
/// the don't-care and unresolved values. Each value is encoded with two independent bits:
///
/// | may be 0 | may be 1 | bits   | variant    |
/// |----------|----------|--------|------------|
/// | 0        | 0        | `0b00` | `Void`     |
/// | 0        | 1        | `0b01` | `One`      |
/// | 1        | 0        | `0b10` | `Zero`     |
/// | 1        | 1        | `0b11` | `DontCare` |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Output {
    /// Neither value is acceptable (unresolved or conflicting)
    Void = 0b00,
    /// Definitely true
    One = 0b01,
    /// Definitely false
    Zero = 0b10,
    /// Both values are acceptable
    DontCare = 0b11,
}

const FROM_BITS: [Output; 4] = [Output::Void, Output::One, Output::Zero, Output::DontCare];

/// Storage mode of a truth table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// One bit per point, outputs are 0 or 1
    Binary,
    /// Two bits per point, outputs use the four plane-coded values
    PlaneCoded,
}

impl Output {
    /// Rebuild an output from its two planes
    pub const fn from_planes(may_be_one: bool, may_be_zero: bool) -> Self {
        FROM_BITS[(may_be_one as usize) | ((may_be_zero as usize) << 1)]
    }

    /// Rebuild an output from its 2-bit plane code (higher bits are ignored)
    pub const fn from_bits(bits: u8) -> Self {
        FROM_BITS[(bits & 0b11) as usize]
    }

    /// The 2-bit plane code of this output
    pub const fn bits(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn may_be_one(self) -> bool {
        self as u8 & 0b01 != 0
    }

    #[inline]
    pub const fn may_be_zero(self) -> bool {
        self as u8 & 0b10 != 0
    }

    /// Returns `true` if this value is exactly [Output::Zero] or [Output::One].
    pub const fn is_definite(self) -> bool {
        matches!(self, Output::Zero | Output::One)
    }

    /// Converts to `bool` if the value is exactly [Output::Zero] or [Output::One].
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            Output::One => Some(true),
            Output::Zero => Some(false),
            _ => None,
        }
    }

    /// The single character used to display this value
    pub const fn symbol(self) -> char {
        match self {
            Output::Zero => '0',
            Output::One => '1',
            Output::DontCare => '-',
            Output::Void => '?',
        }
    }

    /// Encode this output in a field of the given storage mode.
    ///
    /// Binary tables can only store definite values.
    pub(crate) fn encode(self, mode: Mode) -> Result<u8, TruthError> {
        match (mode, self.is_definite()) {
            (Mode::Binary, false) => Err(TruthError::InvalidOutput(self.symbol().to_string())),
            _ => Ok(self.field(mode)),
        }
    }

    /// The packed field of this output, binary tables only keep the "may be 1" plane
    pub(crate) fn field(self, mode: Mode) -> u8 {
        match mode {
            Mode::Binary => self.may_be_one() as u8,
            Mode::PlaneCoded => self.bits(),
        }
    }

    /// Decode a field extracted from a table with the given storage mode
    pub(crate) fn decode(field: u8, mode: Mode) -> Self {
        match mode {
            Mode::Binary => (field & 1 == 1).into(),
            Mode::PlaneCoded => Self::from_bits(field),
        }
    }
}

impl Mode {
    /// Number of bits used to store one output
    pub const fn width(self) -> usize {
        match self {
            Mode::Binary => 1,
            Mode::PlaneCoded => 2,
        }
    }

    /// Mask selecting a single field
    pub const fn mask(self) -> u8 {
        (1 << self.width()) - 1
    }

    /// The mode able to store the outputs of both modes
    pub fn join(self, other: Mode) -> Mode {
        match (self, other) {
            (Mode::Binary, Mode::Binary) => Mode::Binary,
            _ => Mode::PlaneCoded,
        }
    }
}

impl From<bool> for Output {
    fn from(b: bool) -> Self {
        match b {
            true => Output::One,
            false => Output::Zero,
        }
    }
}

impl TryFrom<char> for Output {
    type Error = TruthError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Output::Zero),
            '1' => Ok(Output::One),
            '-' | 'x' | 'X' => Ok(Output::DontCare),
            '?' => Ok(Output::Void),
            _ => Err(TruthError::InvalidOutput(c.to_string())),
        }
    }
}

impl TryFrom<u8> for Output {
    type Error = TruthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Output::Zero),
            1 => Ok(Output::One),
            _ => Err(TruthError::InvalidOutput(value.to_string())),
        }
    }
}

impl TryFrom<i32> for Output {
    type Error = TruthError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Output::Zero),
            1 => Ok(Output::One),
            _ => Err(TruthError::InvalidOutput(value.to_string())),
        }
    }
}

impl TryFrom<&str> for Output {
    type Error = TruthError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Output {
    type Err = TruthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Output::try_from(c),
            _ => Err(TruthError::InvalidOutput(s.to_string())),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Swap the two planes: exchange 0 and 1, keep the other values
impl Not for Output {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_planes(self.may_be_zero(), self.may_be_one())
    }
}

/// Disjunction: may be 1 if one side may be 1, may be 0 only if both sides may be 0
impl BitOr for Output {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_planes(
            self.may_be_one() | rhs.may_be_one(),
            self.may_be_zero() & rhs.may_be_zero(),
        )
    }
}

/// Conjunction: the dual of the disjunction
impl BitAnd for Output {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::from_planes(
            self.may_be_one() & rhs.may_be_one(),
            self.may_be_zero() | rhs.may_be_zero(),
        )
    }
}
