// src/core/converter.rs
use crate::core::table::{SymbolTable, HALANTA, NUKTA, SCHWA};
use crate::core::types::{CharClass, NuktaPolicy, Scheme};
use crate::error::{Result, TranslitError};

/// Output under construction. The nukta rule rewrites the last emitted char
/// in place instead of appending.
#[derive(Debug, Default)]
struct OutputBuffer {
    chars: Vec<char>,
}

impl OutputBuffer {
    fn with_capacity(capacity: usize) -> Self {
        Self { chars: Vec::with_capacity(capacity) }
    }

    fn push(&mut self, ch: char) {
        self.chars.push(ch);
    }

    fn last(&self) -> Option<char> {
        self.chars.last().copied()
    }

    fn replace_last(&mut self, ch: char) {
        if let Some(last) = self.chars.last_mut() {
            *last = ch;
        }
    }

    fn into_string(self) -> String {
        self.chars.into_iter().collect()
    }
}

/// Converts phonetic tokens to Devanagari and back.
///
/// The orthographic rules (dependent vowel signs after consonants, a halanta
/// between adjacent consonants) are applied only when `orthographic` is set;
/// otherwise conversion is a direct symbol-for-symbol mapping.
#[derive(Debug, Clone, Copy)]
pub struct Transliterator {
    table: &'static SymbolTable,
    orthographic: bool,
    nukta_policy: NuktaPolicy,
}

impl Transliterator {
    pub fn new(scheme: Scheme) -> Self {
        Self::with_rules(scheme.table(), scheme.is_orthographic(), scheme.nukta_policy())
    }

    pub fn with_rules(
        table: &'static SymbolTable,
        orthographic: bool,
        nukta_policy: NuktaPolicy,
    ) -> Self {
        Self { table, orthographic, nukta_policy }
    }

    /// Transliterates one token of Latin symbols into Devanagari.
    pub fn transliterate(&self, token: &str) -> Result<String> {
        let decoded = token
            .chars()
            .map(|symbol| {
                self.table.decode(symbol).ok_or_else(|| TranslitError::UnknownSymbol {
                    symbol,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<char>>>()?;

        let mut result = OutputBuffer::with_capacity(2 * decoded.len());
        let mut last_was_consonant = false;

        for &ch in &decoded {
            let class = self.table.classify(ch);

            if ch == NUKTA {
                self.apply_nukta(&mut result, token)?;
            } else if self.orthographic && last_was_consonant {
                match class {
                    CharClass::Vowel => {
                        if let Some(sign) = self.table.vowel_sign(ch) {
                            result.push(sign);
                        }
                    }
                    CharClass::Consonant => {
                        result.push(HALANTA);
                        result.push(ch);
                    }
                }
            } else {
                result.push(ch);
            }

            last_was_consonant = class == CharClass::Consonant;
        }

        Ok(result.into_string())
    }

    fn apply_nukta(&self, result: &mut OutputBuffer, token: &str) -> Result<()> {
        let strict = self.nukta_policy == NuktaPolicy::Strict;
        match result.last() {
            Some(previous) => match self.table.nukta_form(previous) {
                Some(form) => result.replace_last(form),
                None if strict => {
                    return Err(TranslitError::MissingNukta {
                        base: previous,
                        token: token.to_string(),
                    })
                }
                None => {}
            },
            None if strict => {
                return Err(TranslitError::DanglingNukta { token: token.to_string() })
            }
            None => {}
        }
        Ok(())
    }

    /// Converts Devanagari text back into this scheme's Latin symbols.
    ///
    /// For orthographic schemes the inherent vowel is written out wherever a
    /// consonant is followed by another consonant or a vowel-class char, and
    /// dropped after a halanta or at the end of the word. Text the forward
    /// direction could never produce is rejected: a dependent vowel sign must
    /// follow a consonant, and a combining nukta must follow a consonant that
    /// has a nukta form.
    pub fn to_latin(&self, devanagari: &str) -> Result<String> {
        let invalid = || TranslitError::InvalidDevanagari { text: devanagari.to_string() };
        let nukta_symbol = self.table.nukta_symbol().ok_or_else(invalid)?;
        let mut result = String::with_capacity(2 * devanagari.len());
        // Last char a combining nukta may still attach to.
        let mut nukta_target: Option<char> = None;

        if !self.orthographic {
            for x in devanagari.chars() {
                if x == NUKTA {
                    nukta_target.take().and_then(|base| self.table.nukta_form(base)).ok_or_else(invalid)?;
                    result.push(nukta_symbol);
                    continue;
                }
                match self.table.nukta_base(x) {
                    Some(base) => {
                        result.push(self.table.encode(base).ok_or_else(invalid)?);
                        result.push(nukta_symbol);
                        nukta_target = None;
                    }
                    None => {
                        result.push(self.table.encode(x).ok_or_else(invalid)?);
                        nukta_target = Some(x);
                    }
                }
            }
            return Ok(result);
        }

        let schwa = self.table.encode(SCHWA).ok_or_else(invalid)?;
        let mut prev_consonant = false;

        for x in devanagari.chars() {
            if x == HALANTA {
                if !prev_consonant {
                    return Err(invalid());
                }
                prev_consonant = false;
                nukta_target = None;
                continue;
            }
            if x == NUKTA {
                nukta_target.take().and_then(|base| self.table.nukta_form(base)).ok_or_else(invalid)?;
                result.push(nukta_symbol);
                continue;
            }

            let is_vowel = self.table.is_vowel_key(x);
            let sign_of = self.table.vowel_of_sign(x);
            if sign_of.is_some() && !is_vowel && !prev_consonant {
                return Err(invalid());
            }
            let next_consonant = !is_vowel && sign_of.is_none();
            if prev_consonant && (next_consonant || is_vowel) {
                result.push(schwa);
            }

            let nukta_base = self.table.nukta_base(x);
            let lookup = nukta_base.or(sign_of).unwrap_or(x);
            result.push(self.table.encode(lookup).ok_or_else(invalid)?);
            if nukta_base.is_some() {
                result.push(nukta_symbol);
            }
            nukta_target = if next_consonant && nukta_base.is_none() { Some(x) } else { None };
            prev_consonant = next_consonant;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WX_PAIRS: [[&str; 2]; 8] = [
        ["apane", "अपने"],
        ["badZe", "ब\u{95c}े"],
        ["evaM", "एवं"],
        ["ladZakiyoM", "ल\u{95c}कियों"],
        ["miSr", "मिश्र"],
        ["nahIM", "नहीं"],
        ["pAMc", "पांच"],
        ["hiMxI", "हिंदी"],
    ];

    fn wx() -> Transliterator {
        Transliterator::new(Scheme::Wx)
    }

    fn slp() -> Transliterator {
        Transliterator::new(Scheme::Slp)
    }

    #[test]
    fn inherent_vowel_is_not_written() {
        assert_eq!(wx().transliterate("ka").unwrap(), "क");
    }

    #[test]
    fn adjacent_consonants_get_halanta() {
        assert_eq!(wx().transliterate("kk").unwrap(), "क\u{94d}क");
        assert_eq!(wx().transliterate("kyA").unwrap(), "क\u{94d}य\u{93e}");
    }

    #[test]
    fn vowel_after_consonant_uses_sign() {
        assert_eq!(wx().transliterate("ki").unwrap(), "क\u{93f}");
    }

    #[test]
    fn vowel_after_vowel_stays_independent() {
        assert_eq!(wx().transliterate("ai").unwrap(), "अइ");
        assert_eq!(wx().transliterate("Ak").unwrap(), "आक");
    }

    #[test]
    fn nukta_replaces_previous_char() {
        let out = wx().transliterate("kZ").unwrap();
        assert_eq!(out, "\u{958}");
        assert_eq!(out.chars().count(), 1);
    }

    #[test]
    fn nukta_counts_as_consonant() {
        // The trigger itself is consonant-class, so the next consonant gets a halanta.
        assert_eq!(wx().transliterate("kZy").unwrap(), "\u{958}\u{94d}य");
    }

    #[test]
    fn nukta_passthrough_in_wx() {
        assert_eq!(wx().transliterate("aZ").unwrap(), "अ");
        assert_eq!(wx().transliterate("mZ").unwrap(), "म");
        assert_eq!(wx().transliterate("Z").unwrap(), "");
    }

    #[test]
    fn nasalization_is_vowel_bearing_in_wx() {
        assert_eq!(wx().transliterate("mAz").unwrap(), "म\u{93e}\u{901}");
        assert_eq!(wx().transliterate("kz").unwrap(), "क\u{901}");
    }

    #[test]
    fn wx_known_words() {
        for [latin, hindi] in WX_PAIRS {
            assert_eq!(wx().transliterate(latin).unwrap(), hindi, "{latin}");
        }
    }

    #[test]
    fn wx_reverse_known_words() {
        for [latin, hindi] in WX_PAIRS {
            assert_eq!(wx().to_latin(hindi).unwrap(), latin, "{hindi}");
        }
    }

    #[test]
    fn reverse_accepts_combining_nukta() {
        assert_eq!(wx().to_latin("ब\u{921}\u{93c}\u{947}").unwrap(), "badZe");
    }

    #[test]
    fn reverse_rejects_stray_halanta() {
        assert!(matches!(
            wx().to_latin("\u{94d}क"),
            Err(TranslitError::InvalidDevanagari { .. })
        ));
        assert!(wx().to_latin("abc").is_err());
    }

    #[test]
    fn reverse_rejects_unattached_signs_and_nuktas() {
        // A dependent sign needs a consonant to attach to.
        assert!(wx().to_latin("\u{905}\u{93f}").is_err());
        assert!(wx().to_latin("\u{93f}").is_err());
        assert!(wx().to_latin("क\u{93f}\u{93f}").is_err());
        // A combining nukta needs a base with a nukta form.
        assert!(wx().to_latin("म\u{93c}").is_err());
        assert!(wx().to_latin("\u{958}\u{93c}").is_err());
        assert!(slp().to_latin("म\u{93c}").is_err());
        assert_eq!(slp().to_latin("क\u{93c}").unwrap(), "kZ");
    }

    #[test]
    fn reverse_output_converts_back() {
        let wx = wx();
        for hindi in ["क\u{93f}", "क\u{94d}य\u{93e}", "म\u{93e}\u{901}", "आक", "अइ"] {
            let latin = wx.to_latin(hindi).unwrap();
            assert_eq!(wx.transliterate(&latin).unwrap(), hindi, "{latin}");
        }
    }

    #[test]
    fn unknown_symbol_fails() {
        match wx().transliterate("k1") {
            Err(TranslitError::UnknownSymbol { symbol, token }) => {
                assert_eq!(symbol, '1');
                assert_eq!(token, "k1");
            }
            other => panic!("expected unknown symbol, got {other:?}"),
        }
    }

    #[test]
    fn slp_is_symbol_for_symbol() {
        assert_eq!(slp().transliterate("rAma").unwrap(), "रआमअ");
        assert_eq!(slp().transliterate("kk").unwrap(), "कक");
        assert_eq!(slp().transliterate("SivaH").unwrap(), "शइवअ\u{903}");
        assert_eq!(slp().transliterate("kZ").unwrap(), "\u{958}");
    }

    #[test]
    fn slp_nukta_without_base_fails() {
        assert!(matches!(
            slp().transliterate("Z"),
            Err(TranslitError::DanglingNukta { .. })
        ));
        assert!(matches!(
            slp().transliterate("mZ"),
            Err(TranslitError::MissingNukta { base: 'म', .. })
        ));
    }

    #[test]
    fn slp_reverse_is_inverse() {
        let slp = slp();
        for token in ["rAma", "kZ", "SivaH", "wWqQR"] {
            let hindi = slp.transliterate(token).unwrap();
            assert_eq!(slp.to_latin(&hindi).unwrap(), token);
        }
    }

    #[test]
    fn empty_token_converts_to_empty() {
        assert_eq!(wx().transliterate("").unwrap(), "");
        assert_eq!(wx().to_latin("").unwrap(), "");
    }

    proptest! {
        #[test]
        fn conversion_is_deterministic(token in "[aAiIuUeEoOkKgGfcCjJFtTdDNwWxXnpPbBmyrlvSRshqQLMHzZ]{0,16}") {
            let wx = wx();
            let first = wx.transliterate(&token).unwrap();
            let second = wx.transliterate(&token).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn slp_conversion_is_deterministic(token in "[aAiIuUeEoOkKgGNcCjJYwWqQRtTdDnpPbBmyrlvSzshfFxXMH]{0,16}") {
            let slp = slp();
            let first = slp.transliterate(&token).unwrap();
            let second = slp.transliterate(&token).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn slp_conversion_with_nukta_is_deterministic(token in "[kKgGjqQPMaZ]{0,16}") {
            let slp = slp();
            let first = slp.transliterate(&token).map_err(|e| e.to_string());
            let second = slp.transliterate(&token).map_err(|e| e.to_string());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn output_is_devanagari_only(token in "[aAiIuUeEoOkKgGfcCjJFtTdDNwWxXnpPbBmyrlvSRshqQLMHzZ]{0,16}") {
            let out = wx().transliterate(&token).unwrap();
            prop_assert!(out.chars().all(|c| ('\u{900}'..='\u{97f}').contains(&c)), "output contains non-Devanagari chars: {:?}", out);
        }
    }
}
