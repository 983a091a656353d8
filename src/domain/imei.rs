//! IMEI normalization and validation.
//!
//! A candidate is normalized (every non-digit stripped) and then run through an ordered list of
//! checks; the first failing check decides the rejection. Invalid input is a normal outcome, so
//! `validate` returns a [`Validation`] instead of an error.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Number of digits in a normalized IMEI.
pub const IMEI_LEN: usize = 15;

/// Number of leading digits forming the Type Allocation Code.
pub const TAC_LEN: usize = 8;

/// Why a candidate was rejected. Variants are listed in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    #[error("IMEI must be exactly 15 digits")]
    WrongLength,
    #[error("IMEI must contain only numbers")]
    NonNumeric,
    #[error("Invalid IMEI: cannot be all zeros")]
    AllZeros,
    #[error("Invalid IMEI: cannot be all ones")]
    AllOnes,
    #[error("Invalid Type Allocation Code (TAC)")]
    InvalidTac,
    #[error("Invalid IMEI checksum")]
    BadChecksum,
}

impl Rejection {
    /// Stable machine-readable code, identical to the serde representation.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::WrongLength => "wrong_length",
            Rejection::NonNumeric => "non_numeric",
            Rejection::AllZeros => "all_zeros",
            Rejection::AllOnes => "all_ones",
            Rejection::InvalidTac => "invalid_tac",
            Rejection::BadChecksum => "bad_checksum",
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(Rejection),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(reason) => Some(*reason),
        }
    }
}

/// Strips every character that is not an ASCII digit.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validates a raw, untrusted IMEI candidate.
///
/// Spaces, dashes and any other non-digit characters are dropped before the checks run, so
/// `"49 0154 203237518"` and `"490154203237518"` always classify the same way.
pub fn validate(raw: &str) -> Validation {
    match check_normalized(&normalize(raw)) {
        Ok(()) => Validation::Valid,
        Err(reason) => Validation::Invalid(reason),
    }
}

fn check_normalized(digits: &str) -> Result<(), Rejection> {
    if digits.len() != IMEI_LEN {
        return Err(Rejection::WrongLength);
    }
    // Unreachable after normalization; kept so the check order holds for any caller.
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rejection::NonNumeric);
    }
    if digits.bytes().all(|b| b == b'0') {
        return Err(Rejection::AllZeros);
    }
    if digits.bytes().all(|b| b == b'1') {
        return Err(Rejection::AllOnes);
    }
    // Structural only for now. A TAC registry lookup would slot in here.
    let tac = &digits.as_bytes()[..TAC_LEN];
    if tac.len() != TAC_LEN || !tac.iter().all(u8::is_ascii_digit) {
        return Err(Rejection::InvalidTac);
    }

    let values: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
    if !luhn_valid(&values) {
        return Err(Rejection::BadChecksum);
    }
    Ok(())
}

/// Luhn check over digit values (0..=9), rightmost digit included as the check digit.
///
/// Walking from the right, every second digit is doubled and reduced by 9 when it exceeds 9;
/// the slice passes when the total is a multiple of 10.
pub fn luhn_valid(digits: &[u8]) -> bool {
    let mut sum: u32 = 0;
    let mut double = false;
    for &d in digits.iter().rev() {
        let mut value = u32::from(d);
        if double {
            value *= 2;
            if value > 9 {
                value -= 9;
            }
        }
        sum += value;
        double = !double;
    }
    sum % 10 == 0
}

/// Normalizes and groups digits in blocks of four: `"4901 5420 3237 518"`.
pub fn format_grouped(raw: &str) -> String {
    let digits = normalize(raw);
    let mut out = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// A validated, normalized IMEI. The only way to build one is through validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Imei(String);

impl Imei {
    pub fn parse(raw: &str) -> Result<Self, Rejection> {
        let digits = normalize(raw);
        check_normalized(&digits)?;
        Ok(Imei(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type Allocation Code (manufacturer / model).
    pub fn tac(&self) -> &str {
        &self.0[..TAC_LEN]
    }

    /// Serial number assigned within the TAC.
    pub fn serial(&self) -> &str {
        &self.0[TAC_LEN..IMEI_LEN - 1]
    }

    pub fn check_digit(&self) -> u8 {
        self.0.as_bytes()[IMEI_LEN - 1] - b'0'
    }

    pub fn grouped(&self) -> String {
        format_grouped(&self.0)
    }
}

impl fmt::Display for Imei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Imei {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Imei::parse(s)
    }
}

impl TryFrom<&str> for Imei {
    type Error = Rejection;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Imei::parse(value)
    }
}

impl AsRef<str> for Imei {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
