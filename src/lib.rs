// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::core::converter::Transliterator;
pub use crate::core::engine::BatchEngine;
pub use crate::core::types::Scheme;
pub use crate::error::{Result, TranslitError};
