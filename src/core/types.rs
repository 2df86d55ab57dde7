// src/core/types.rs
use crate::core::table::SymbolTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// One of the two supported Latin phonetic encodings of Hindi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Direct symbol-for-symbol scheme; input is already spelled out in
    /// Devanagari-equivalent terms, so no vowel signs or viramas are inserted.
    Slp,
    /// WX, developed at IIT Kanpur. Every symbol is a single ASCII letter and
    /// orthographic rules are applied on conversion.
    Wx,
}

impl Scheme {
    /// The process-wide symbol table for this scheme, built on first use.
    ///
    /// # Panics
    ///
    /// Panics if the built-in table fails its self-check, which can only
    /// happen if the hardcoded sequences were edited inconsistently.
    pub fn table(self) -> &'static SymbolTable {
        static SLP: OnceLock<SymbolTable> = OnceLock::new();
        static WX: OnceLock<SymbolTable> = OnceLock::new();
        let (cell, def) = match self {
            Scheme::Slp => (&SLP, &crate::core::table::SLP_DEF),
            Scheme::Wx => (&WX, &crate::core::table::WX_DEF),
        };
        cell.get_or_init(|| {
            SymbolTable::build(def).unwrap_or_else(|e| panic!("built-in table: {e}"))
        })
    }

    /// Whether vowel signs and viramas are inserted during conversion.
    pub fn is_orthographic(self) -> bool {
        matches!(self, Scheme::Wx)
    }

    pub fn nukta_policy(self) -> NuktaPolicy {
        match self {
            Scheme::Slp => NuktaPolicy::Strict,
            Scheme::Wx => NuktaPolicy::Passthrough,
        }
    }

    pub fn default_unconvertible(self) -> UnconvertiblePolicy {
        match self {
            Scheme::Slp => UnconvertiblePolicy::Skip,
            Scheme::Wx => UnconvertiblePolicy::PassthroughWithMarker,
        }
    }

    pub fn default_layout(self) -> OutputLayout {
        match self {
            Scheme::Slp => OutputLayout::Pair,
            Scheme::Wx => OutputLayout::Triple,
        }
    }

    /// Characters marking a token as a placeholder or otherwise not meant
    /// for conversion.
    pub fn default_markers(self) -> &'static str {
        match self {
            Scheme::Slp => "V@0123456789_",
            Scheme::Wx => "VY@0123456789_",
        }
    }

    /// Dataset file read when no input path is given.
    pub fn default_input(self) -> &'static str {
        match self {
            Scheme::Slp => "datasets/slp.txt",
            Scheme::Wx => "datasets/wx.txt",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scheme::Slp => "slp",
            Scheme::Wx => "wx",
        })
    }
}

/// Classification of a decoded Devanagari character for the insertion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Vowel,
    Consonant,
}

/// What to do when the nukta trigger cannot modify the previous output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NuktaPolicy {
    /// An empty buffer or a base without a nukta form is an error.
    Strict,
    /// Leave the previous output unchanged.
    Passthrough,
}

/// What the batch driver emits for a token containing a marker character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum UnconvertiblePolicy {
    #[serde(rename = "skip")]
    Skip,
    /// Emit the row with `#<token>` in place of the conversion.
    #[serde(rename = "passthrough")]
    #[value(name = "passthrough")]
    PassthroughWithMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// `<id>\t<converted>`
    Pair,
    /// `<id> <token> <converted>`
    Triple,
    /// One JSON object per line.
    Json,
}

/// A single processed input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub token: String,
    /// `None` when the token was not convertible.
    pub converted: Option<String>,
}

impl Record {
    /// The third output field: the conversion, or `#<token>` as a sentinel.
    pub fn converted_or_marker(&self) -> String {
        match &self.converted {
            Some(converted) => converted.clone(),
            None => format!("#{}", self.token),
        }
    }
}
