use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the six glyphs which can appear in the code matrix.
///
/// Every code also has a single-character "compact" form. Sequences of codes
/// are compared, merged and searched through their compact strings; the compact
/// form never leaves this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HexCode {
    HexBD,
    Hex1C,
    Hex55,
    Hex7A,
    HexE9,
    HexFF,
}

impl HexCode {
    pub const ALL: [HexCode; 6] = [
        HexCode::HexBD,
        HexCode::Hex1C,
        HexCode::Hex55,
        HexCode::Hex7A,
        HexCode::HexE9,
        HexCode::HexFF,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HexCode::HexBD => "BD",
            HexCode::Hex1C => "1C",
            HexCode::Hex55 => "55",
            HexCode::Hex7A => "7A",
            HexCode::HexE9 => "E9",
            HexCode::HexFF => "FF",
        }
    }

    pub(crate) fn compact(self) -> char {
        match self {
            HexCode::HexBD => 'B',
            HexCode::Hex1C => '1',
            HexCode::Hex55 => '5',
            HexCode::Hex7A => '7',
            HexCode::HexE9 => 'E',
            HexCode::HexFF => 'F',
        }
    }

    pub(crate) fn from_compact(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.compact() == c)
    }
}

/// Build the compact string for a list of codes.
pub(crate) fn to_compact(codes: &[HexCode]) -> String {
    codes.iter().map(|code| code.compact()).collect()
}

/// Turn a compact string back into codes.
///
/// Compact strings are only ever produced by [`to_compact`] and by merging such
/// strings, so every character is known.
pub(crate) fn from_compact(compact: &str) -> Vec<HexCode> {
    compact
        .chars()
        .map(|c| HexCode::from_compact(c).expect("compact strings only contain known codes"))
        .collect()
}

impl fmt::Display for HexCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HexCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Unknown(s.to_owned()))
    }
}

impl TryFrom<String> for HexCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexCode> for String {
    fn from(code: HexCode) -> Self {
        code.as_str().to_owned()
    }
}

/// Parse whitespace-separated codes such as `"1C 55 E9"`.
pub fn parse_codes(s: &str) -> Result<Vec<HexCode>, Error> {
    s.split_ascii_whitespace().map(str::parse).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown hex code: \"{0}\"")]
    Unknown(String),
}
