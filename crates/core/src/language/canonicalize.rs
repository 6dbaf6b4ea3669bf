//! Symbol canonicalization: provider phoneme symbols → [`Phone`].
//!
//! Providers mix ARPABET (with or without stress digits), extended ARPABET
//! codes and IPA, sometimes wrapped in slashes or carrying stress/length
//! marks. Everything is reduced to the canonical inventory through two
//! static tables; symbols neither table knows are passed through uppercased.

use std::collections::HashMap;

use super::inventory::Phone;

/// Characters removed before lookup: delimiters, stress and length marks,
/// tie bars and the diacritics that never change the canonical phone.
const STRIP_CHARS: &[char] = &[
    '/', '[', ']', 'ˈ', 'ˌ', '\'', 'ː', 'ˑ', 'ʰ', '\u{0306}', '\u{0329}', '\u{032F}',
    '\u{0361}', '\u{035C}',
];

lazy_static::lazy_static! {
    /// IPA-to-inventory mapping. Diphthongs and r-colored vowels are single keys.
    static ref IPA_TABLE: HashMap<&'static str, Phone> = {
        let entries: Vec<(&'static str, Phone)> = vec![
            // Diphthongs
            ("aɪ", Phone::Ay), ("ai", Phone::Ay), ("aʊ", Phone::Aw), ("au", Phone::Aw),
            ("eɪ", Phone::Ey), ("ei", Phone::Ey), ("oʊ", Phone::Ow), ("əʊ", Phone::Ow),
            ("ou", Phone::Ow), ("ɔɪ", Phone::Oy), ("oi", Phone::Oy),
            ("ɪə", Phone::Ih), ("eə", Phone::Eh), ("ɛə", Phone::Eh), ("ʊə", Phone::Uh),
            // R-colored vowels
            ("ɚ", Phone::Er), ("ɝ", Phone::Er), ("ə˞", Phone::Er), ("ɜ˞", Phone::Er),
            ("ər", Phone::Er), ("əɹ", Phone::Er), ("ɜr", Phone::Er), ("ɜɹ", Phone::Er),
            ("ɜ", Phone::Er),
            // Monophthongs
            ("i", Phone::Iy), ("ɪ", Phone::Ih), ("ᵻ", Phone::Ih), ("ɨ", Phone::Ih),
            ("e", Phone::Ey), ("ɛ", Phone::Eh), ("æ", Phone::Ae),
            ("a", Phone::Aa), ("ɑ", Phone::Aa), ("ɒ", Phone::Ao), ("ɔ", Phone::Ao),
            ("o", Phone::Ow), ("ʊ", Phone::Uh), ("u", Phone::Uw), ("ʉ", Phone::Uw),
            ("ɯ", Phone::Uw), ("ə", Phone::Ah), ("ɐ", Phone::Ah), ("ʌ", Phone::Ah),
            // Stops
            ("ɡ", Phone::G), ("ʔ", Phone::T), ("ɾ", Phone::T),
            // Nasals
            ("ŋ", Phone::Ng), ("ɲ", Phone::N), ("ɴ", Phone::Ng), ("ɱ", Phone::M),
            // Fricatives and affricates
            ("θ", Phone::Th), ("ð", Phone::Dh), ("ʃ", Phone::Sh), ("ʒ", Phone::Zh),
            ("ɦ", Phone::Hh), ("ç", Phone::Hh), ("x", Phone::Hh), ("χ", Phone::Hh),
            ("ɣ", Phone::G), ("tʃ", Phone::Ch), ("ʧ", Phone::Ch), ("dʒ", Phone::Jh),
            ("ʤ", Phone::Jh),
            // Liquids
            ("ɫ", Phone::L), ("ɬ", Phone::L), ("ɮ", Phone::L),
            ("ɹ", Phone::R), ("ɻ", Phone::R), ("ɽ", Phone::R), ("ʁ", Phone::R), ("ʀ", Phone::R),
            // Glides
            ("j", Phone::Y), ("ʍ", Phone::W), ("ɥ", Phone::W),
        ];
        entries.into_iter().collect()
    };

    /// Extended ARPABET / TIMIT codes folded onto the 39-symbol inventory.
    static ref ARPABET_ALIASES: HashMap<&'static str, Phone> = {
        [
            ("AX", Phone::Ah), ("AXR", Phone::Er), ("IX", Phone::Ih), ("UX", Phone::Uw),
            ("DX", Phone::T), ("NX", Phone::N), ("Q", Phone::T),
            ("EL", Phone::L), ("EM", Phone::M), ("EN", Phone::N),
            ("H", Phone::Hh), ("WH", Phone::W),
        ]
        .into_iter()
        .collect()
    };
}

/// Strip delimiters, stress/length marks and all whitespace (removed, not
/// collapsed, so `"a ɪ"` reads as `aɪ`); drop a trailing ARPABET stress digit.
pub fn clean_symbol(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !STRIP_CHARS.contains(c))
        .collect();
    let destressed = stripped.trim_end_matches(['0', '1', '2']);
    if destressed.is_empty() {
        stripped
    } else {
        destressed.to_string()
    }
}

/// A bare 1–3 letter ASCII token is already written in inventory syntax.
fn is_canonical_syntax(token: &str) -> bool {
    (1..=3).contains(&token.len()) && token.chars().all(|c| c.is_ascii_alphabetic())
}

/// Map an arbitrary provider symbol onto the canonical inventory.
///
/// Never fails. Idempotent: feeding the output's code back in returns the
/// same phone.
pub fn canonicalize(raw: &str) -> Phone {
    let trimmed = raw.trim();
    if is_canonical_syntax(trimmed) {
        return from_code_or_alias(&trimmed.to_ascii_uppercase());
    }

    let cleaned = clean_symbol(raw);
    let upper = cleaned.to_uppercase();
    if let Some(phone) = Phone::from_code(&upper) {
        return phone;
    }
    if let Some(phone) = ARPABET_ALIASES.get(upper.as_str()) {
        return phone.clone();
    }

    let ipa = IPA_TABLE
        .get(cleaned.as_str())
        .or_else(|| IPA_TABLE.get(cleaned.to_lowercase().as_str()));
    if let Some(phone) = ipa {
        return phone.clone();
    }

    log::debug!("Unrecognized phoneme symbol {:?}, passing through as {:?}", raw, upper);
    Phone::Unknown(upper)
}

fn from_code_or_alias(upper: &str) -> Phone {
    Phone::from_code(upper)
        .or_else(|| ARPABET_ALIASES.get(upper).cloned())
        .unwrap_or_else(|| {
            log::debug!("Unrecognized phoneme code {:?}, passing through", upper);
            Phone::Unknown(upper.to_string())
        })
}

/// Canonicalize a whole sequence, preserving order.
pub fn canonicalize_all<S: AsRef<str>>(raw: &[S]) -> Vec<Phone> {
    raw.iter().map(|s| canonicalize(s.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_codes_pass_through() {
        assert_eq!(canonicalize("K"), Phone::K);
        assert_eq!(canonicalize("NG"), Phone::Ng);
        assert_eq!(canonicalize("ae"), Phone::Ae);
        assert_eq!(canonicalize("sh"), Phone::Sh);
    }

    #[test]
    fn test_stress_digits_stripped() {
        assert_eq!(canonicalize("AE1"), Phone::Ae);
        assert_eq!(canonicalize("IY0"), Phone::Iy);
        assert_eq!(canonicalize("ER2"), Phone::Er);
    }

    #[test]
    fn test_ipa_vowels() {
        assert_eq!(canonicalize("æ"), Phone::Ae);
        assert_eq!(canonicalize("ɪ"), Phone::Ih);
        assert_eq!(canonicalize("ə"), Phone::Ah);
        assert_eq!(canonicalize("/a/"), Phone::Aa);
        assert_eq!(canonicalize("iː"), Phone::Iy);
    }

    #[test]
    fn test_bare_ascii_letters_are_codes_not_ipa() {
        assert_eq!(canonicalize("a"), Phone::Unknown("A".into()));
        assert_eq!(canonicalize("x"), Phone::Unknown("X".into()));
        assert_eq!(canonicalize("j"), Phone::Unknown("J".into()));
        assert_eq!(canonicalize("e"), Phone::Unknown("E".into()));
        assert_eq!(canonicalize(" ai "), Phone::Unknown("AI".into()));
        assert_eq!(canonicalize("iy"), Phone::Iy);
        assert_eq!(canonicalize("q"), Phone::T);
        // lowercase codes keep their vowel status for chunking
        assert!(canonicalize("ah").is_vowel());
        assert!(!canonicalize("a").is_vowel());
    }

    #[test]
    fn test_rounded_open_back_maps_to_ao() {
        assert_eq!(canonicalize("ɒ"), Phone::Ao);
        assert_eq!(canonicalize("ɔ"), Phone::Ao);
    }

    #[test]
    fn test_r_colored_vowels() {
        assert_eq!(canonicalize("ɚ"), Phone::Er);
        assert_eq!(canonicalize("ɝ"), Phone::Er);
        assert_eq!(canonicalize("ər"), Phone::Er);
    }

    #[test]
    fn test_diphthongs_are_single_keys() {
        assert_eq!(canonicalize("aɪ"), Phone::Ay);
        assert_eq!(canonicalize("oʊ"), Phone::Ow);
        assert_eq!(canonicalize("eɪ"), Phone::Ey);
        assert_eq!(canonicalize("ɔɪ"), Phone::Oy);
    }

    #[test]
    fn test_ipa_consonants() {
        assert_eq!(canonicalize("ʃ"), Phone::Sh);
        assert_eq!(canonicalize("θ"), Phone::Th);
        assert_eq!(canonicalize("ŋ"), Phone::Ng);
        assert_eq!(canonicalize("ɡ"), Phone::G);
        assert_eq!(canonicalize("j"), Phone::Y);
        assert_eq!(canonicalize("t͡ʃ"), Phone::Ch);
        assert_eq!(canonicalize("dʒ"), Phone::Jh);
    }

    #[test]
    fn test_delimiters_and_marks_stripped() {
        assert_eq!(canonicalize("/ˈæ/"), Phone::Ae);
        assert_eq!(canonicalize("iː"), Phone::Iy);
        assert_eq!(canonicalize(" [ɑː] "), Phone::Aa);
        assert_eq!(canonicalize("pʰ"), Phone::P);
        assert_eq!(canonicalize("a ɪ"), Phone::Ay);
    }

    #[test]
    fn test_arpabet_aliases() {
        assert_eq!(canonicalize("AX0"), Phone::Ah);
        assert_eq!(canonicalize("axr"), Phone::Er);
        assert_eq!(canonicalize("DX"), Phone::T);
    }

    #[test]
    fn test_unknown_passes_through_uppercased() {
        assert_eq!(canonicalize("ts"), Phone::Unknown("TS".into()));
        assert_eq!(canonicalize("A"), Phone::Unknown("A".into()));
        assert_eq!(canonicalize("ʕ"), Phone::Unknown("ʕ".into()));
        assert_eq!(canonicalize(""), Phone::Unknown(String::new()));
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "AE1", "æ", "/ˈɒ/", "ɚ", "tʃ", "x", "X", "ts", "ʕ", "Ʃ", "ʃ", "a", "A", "ax",
            "1", "", "  ", "q", "ŋ̍", "iː", "ß", "kʷ", "ɹ̩", "zzz", "WH", "ɜ˞",
        ];
        for raw in inputs {
            let once = canonicalize(raw);
            let twice = canonicalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_canonicalize_all_preserves_order() {
        let phones = canonicalize_all(&["b", "ɛ", "ɾ", "ɚ"]);
        assert_eq!(phones, vec![Phone::B, Phone::Eh, Phone::T, Phone::Er]);
    }
}
