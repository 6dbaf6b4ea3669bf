//! The canonical phoneme inventory (ARPABET, stress-free).
//!
//! Every symbol coming out of the canonicalizer is a [`Phone`]. The set is
//! closed: anything the translation table cannot place ends up in
//! [`Phone::Unknown`] so it stays visible instead of disappearing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One symbol of the canonical inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phone {
    // Vowels
    Aa,
    Ae,
    Ah,
    Ao,
    Aw,
    Ay,
    Eh,
    Er,
    Ey,
    Ih,
    Iy,
    Ow,
    Oy,
    Uh,
    Uw,
    // Consonants
    B,
    Ch,
    D,
    Dh,
    F,
    G,
    Hh,
    Jh,
    K,
    L,
    M,
    N,
    Ng,
    P,
    R,
    S,
    Sh,
    T,
    Th,
    V,
    W,
    Y,
    Z,
    Zh,
    /// A symbol outside the inventory, kept uppercased as received.
    Unknown(String),
}

/// All known phones, vowels first.
pub const INVENTORY: &[Phone] = &[
    Phone::Aa, Phone::Ae, Phone::Ah, Phone::Ao, Phone::Aw, Phone::Ay,
    Phone::Eh, Phone::Er, Phone::Ey, Phone::Ih, Phone::Iy,
    Phone::Ow, Phone::Oy, Phone::Uh, Phone::Uw,
    Phone::B, Phone::Ch, Phone::D, Phone::Dh, Phone::F, Phone::G,
    Phone::Hh, Phone::Jh, Phone::K, Phone::L, Phone::M, Phone::N,
    Phone::Ng, Phone::P, Phone::R, Phone::S, Phone::Sh, Phone::T,
    Phone::Th, Phone::V, Phone::W, Phone::Y, Phone::Z, Phone::Zh,
];

impl Phone {
    /// Look up an inventory code exactly (uppercase, no stress digit).
    pub fn from_code(code: &str) -> Option<Phone> {
        let phone = match code {
            "AA" => Phone::Aa,
            "AE" => Phone::Ae,
            "AH" => Phone::Ah,
            "AO" => Phone::Ao,
            "AW" => Phone::Aw,
            "AY" => Phone::Ay,
            "EH" => Phone::Eh,
            "ER" => Phone::Er,
            "EY" => Phone::Ey,
            "IH" => Phone::Ih,
            "IY" => Phone::Iy,
            "OW" => Phone::Ow,
            "OY" => Phone::Oy,
            "UH" => Phone::Uh,
            "UW" => Phone::Uw,
            "B" => Phone::B,
            "CH" => Phone::Ch,
            "D" => Phone::D,
            "DH" => Phone::Dh,
            "F" => Phone::F,
            "G" => Phone::G,
            "HH" => Phone::Hh,
            "JH" => Phone::Jh,
            "K" => Phone::K,
            "L" => Phone::L,
            "M" => Phone::M,
            "N" => Phone::N,
            "NG" => Phone::Ng,
            "P" => Phone::P,
            "R" => Phone::R,
            "S" => Phone::S,
            "SH" => Phone::Sh,
            "T" => Phone::T,
            "TH" => Phone::Th,
            "V" => Phone::V,
            "W" => Phone::W,
            "Y" => Phone::Y,
            "Z" => Phone::Z,
            "ZH" => Phone::Zh,
            _ => return None,
        };
        Some(phone)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Phone::Aa => "AA",
            Phone::Ae => "AE",
            Phone::Ah => "AH",
            Phone::Ao => "AO",
            Phone::Aw => "AW",
            Phone::Ay => "AY",
            Phone::Eh => "EH",
            Phone::Er => "ER",
            Phone::Ey => "EY",
            Phone::Ih => "IH",
            Phone::Iy => "IY",
            Phone::Ow => "OW",
            Phone::Oy => "OY",
            Phone::Uh => "UH",
            Phone::Uw => "UW",
            Phone::B => "B",
            Phone::Ch => "CH",
            Phone::D => "D",
            Phone::Dh => "DH",
            Phone::F => "F",
            Phone::G => "G",
            Phone::Hh => "HH",
            Phone::Jh => "JH",
            Phone::K => "K",
            Phone::L => "L",
            Phone::M => "M",
            Phone::N => "N",
            Phone::Ng => "NG",
            Phone::P => "P",
            Phone::R => "R",
            Phone::S => "S",
            Phone::Sh => "SH",
            Phone::T => "T",
            Phone::Th => "TH",
            Phone::V => "V",
            Phone::W => "W",
            Phone::Y => "Y",
            Phone::Z => "Z",
            Phone::Zh => "ZH",
            Phone::Unknown(raw) => raw.as_str(),
        }
    }

    /// Vowel nucleus test used by the chunker. Diphthongs and ER count.
    pub fn is_vowel(&self) -> bool {
        matches!(
            self,
            Phone::Aa
                | Phone::Ae
                | Phone::Ah
                | Phone::Ao
                | Phone::Aw
                | Phone::Ay
                | Phone::Eh
                | Phone::Er
                | Phone::Ey
                | Phone::Ih
                | Phone::Iy
                | Phone::Ow
                | Phone::Oy
                | Phone::Uh
                | Phone::Uw
        )
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Phone::Unknown(_))
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Phone {
    fn from(code: String) -> Self {
        Phone::from_code(&code).unwrap_or(Phone::Unknown(code))
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        match phone {
            Phone::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}
