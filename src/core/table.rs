// src/core/table.rs
use crate::core::types::CharClass;
use crate::error::{Result, TranslitError};
use serde::Serialize;
use std::collections::HashMap;

pub const HALANTA: char = '\u{094d}';
pub const NUKTA: char = '\u{093c}';
pub const SCHWA: char = '\u{0905}';

/// The fixed data a scheme's table is built from.
pub struct SchemeDef {
    pub name: &'static str,
    pub latin: &'static str,
    pub devanagari: &'static str,
    /// Latin symbols for anusvara, visarga, nukta and friends.
    pub modifier_latin: &'static str,
    pub modifier_devanagari: &'static str,
    /// Whether the nasal/aspiration modifiers count as vowel-class.
    pub vowel_bearing_modifiers: bool,
}

pub const SLP_DEF: SchemeDef = SchemeDef {
    name: "slp",
    latin: "aAiIuUeEoOkKgGNcCjJYwWqQRtTdDnpPbBmyrlvSzshfFxX",
    devanagari: "अआइईउऊएऐओऔकखगघङचछजझञटठडढणतथदधनपफबभमयरलवशषसहऋॠऌॡ",
    modifier_latin: "MHZ",
    modifier_devanagari: "\u{902}\u{903}\u{93c}",
    vowel_bearing_modifiers: false,
};

pub const WX_DEF: SchemeDef = SchemeDef {
    name: "wx",
    latin: "aAiIuUeEoOkKgGfcCjJFtTdDNwWxXnpPbBmyrlvSRshqQL",
    devanagari: "अआइईउऊएऐओऔकखगघङचछजझञटठडढणतथदधनपफबभमयरलवशषसहऋॠऌ",
    modifier_latin: "MHzZ",
    modifier_devanagari: "\u{902}\u{903}\u{901}\u{93c}",
    vowel_bearing_modifiers: true,
};

const NUKTA_BASES: &str = "कखगजडढफ";
const NUKTA_FORMS: &str = "\u{958}\u{959}\u{95a}\u{95b}\u{95c}\u{95d}\u{95e}";

/// Independent vowel letters and their dependent signs. The inherent vowel
/// has no visible sign.
const VOWEL_SIGNS: [(char, Option<char>); 16] = [
    (SCHWA, None),
    ('आ', Some('\u{93e}')),
    ('इ', Some('\u{93f}')),
    ('ई', Some('\u{940}')),
    ('उ', Some('\u{941}')),
    ('ऊ', Some('\u{942}')),
    ('ऋ', Some('\u{943}')),
    ('ऌ', Some('\u{962}')),
    ('ऍ', Some('\u{946}')),
    ('ए', Some('\u{947}')),
    ('ऐ', Some('\u{948}')),
    ('ऑ', Some('\u{94a}')),
    ('ओ', Some('\u{94b}')),
    ('औ', Some('\u{94c}')),
    ('ॠ', Some('\u{944}')),
    ('ॡ', Some('\u{963}')),
];

fn make_dict(table: &'static str, keys: &str, values: &str) -> Result<HashMap<char, char>> {
    let (k, v) = (keys.chars().count(), values.chars().count());
    if k != v {
        return Err(TranslitError::TableMismatch { table, keys: k, values: v });
    }
    Ok(keys.chars().zip(values.chars()).collect())
}

fn flip_dict(dict: &HashMap<char, char>) -> HashMap<char, char> {
    dict.iter().map(|(&k, &v)| (v, k)).collect()
}

/// Immutable lookup tables for one scheme, in both directions.
#[derive(Debug)]
pub struct SymbolTable {
    conversion: HashMap<char, char>,
    nuktas: HashMap<char, char>,
    vowels: HashMap<char, Option<char>>,
    to_latin: HashMap<char, char>,
    nukta_bases: HashMap<char, char>,
    sign_to_vowel: HashMap<char, char>,
}

/// One row of a table dump.
#[derive(Debug, Clone, Serialize)]
pub struct TableEntry {
    pub latin: char,
    pub devanagari: char,
    pub class: CharClass,
}

impl SymbolTable {
    pub fn build(def: &SchemeDef) -> Result<Self> {
        let mut conversion = make_dict(def.name, def.latin, def.devanagari)?;
        conversion.extend(make_dict(def.name, def.modifier_latin, def.modifier_devanagari)?);
        let nuktas = make_dict("nukta", NUKTA_BASES, NUKTA_FORMS)?;

        let mut vowels: HashMap<char, Option<char>> = VOWEL_SIGNS.iter().copied().collect();
        if def.vowel_bearing_modifiers {
            for ch in def.modifier_devanagari.chars().filter(|&ch| ch != NUKTA) {
                vowels.insert(ch, Some(ch));
            }
        }

        let sign_to_vowel = vowels
            .iter()
            .filter_map(|(&vowel, &sign)| sign.map(|s| (s, vowel)))
            .collect();

        Ok(Self {
            to_latin: flip_dict(&conversion),
            nukta_bases: flip_dict(&nuktas),
            conversion,
            nuktas,
            vowels,
            sign_to_vowel,
        })
    }

    /// Decodes one Latin symbol.
    pub fn decode(&self, symbol: char) -> Option<char> {
        self.conversion.get(&symbol).copied()
    }

    pub fn classify(&self, ch: char) -> CharClass {
        if self.vowels.contains_key(&ch) {
            CharClass::Vowel
        } else {
            CharClass::Consonant
        }
    }

    /// The dependent form of a vowel-class char, `None` for the inherent vowel.
    pub fn vowel_sign(&self, vowel: char) -> Option<char> {
        self.vowels.get(&vowel).copied().flatten()
    }

    pub fn nukta_form(&self, base: char) -> Option<char> {
        self.nuktas.get(&base).copied()
    }

    pub fn nukta_base(&self, form: char) -> Option<char> {
        self.nukta_bases.get(&form).copied()
    }

    /// Maps a dependent vowel sign back to its independent letter.
    pub fn vowel_of_sign(&self, sign: char) -> Option<char> {
        self.sign_to_vowel.get(&sign).copied()
    }

    pub fn encode(&self, ch: char) -> Option<char> {
        self.to_latin.get(&ch).copied()
    }

    /// The Latin symbol that triggers the nukta rule.
    pub fn nukta_symbol(&self) -> Option<char> {
        self.encode(NUKTA)
    }

    pub fn is_vowel_key(&self, ch: char) -> bool {
        self.vowels.contains_key(&ch)
    }

    /// Every Latin symbol with its decoded char and class, sorted by symbol.
    pub fn entries(&self) -> Vec<TableEntry> {
        let mut entries: Vec<TableEntry> = self
            .conversion
            .iter()
            .map(|(&latin, &devanagari)| TableEntry {
                latin,
                devanagari,
                class: self.classify(devanagari),
            })
            .collect();
        entries.sort_by_key(|e| e.latin);
        entries
    }
}
