//! Short code generation and validation utilities.
//!
//! Codes are drawn uniformly from a fixed alphabet by rejection sampling over
//! single bytes from the operating system's secure random source.

use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Alphabet used for generated codes: digits, then lowercase, then uppercase.
pub const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of every generated code.
pub const CODE_LENGTH: usize = 9;

/// Compiled pattern for the public code shape.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]{9}$").expect("valid code regex"));

/// Returns true if `code` has the shape of a generated code.
///
/// Anything else is treated as "no such resource" at the boundary and never
/// reaches storage.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Normalizes a domain for storage and lookup: trims surrounding whitespace
/// and lower-cases it.
///
/// Returns `None` if nothing is left after trimming.
pub fn normalize_domain(domain: &str) -> Option<String> {
    let normalized = domain.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Failure of the underlying random source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entropy source failed: {0}")]
pub struct EntropyError(pub String);

/// A source of random bytes, one at a time.
pub trait EntropySource: Send + Sync {
    fn next_byte(&self) -> Result<u8, EntropyError>;
}

/// The operating system CSPRNG via `getrandom`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn next_byte(&self) -> Result<u8, EntropyError> {
        let mut buf = [0u8; 1];
        getrandom::fill(&mut buf).map_err(|e| EntropyError(e.to_string()))?;
        Ok(buf[0])
    }
}

/// What to do when the secure source fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntropyPolicy {
    /// Fail the generation. Nothing weaker than the secure source is ever used.
    #[default]
    Strict,
    /// Substitute a byte derived from the wall clock for that single draw.
    /// Trades unpredictability for liveness; every substitution is logged.
    ClockFallback,
}

impl EntropyPolicy {
    /// Parses `strict` or `clock-fallback` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "clock-fallback" | "clock_fallback" => Some(Self::ClockFallback),
            _ => None,
        }
    }
}

impl fmt::Display for EntropyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::ClockFallback => f.write_str("clock-fallback"),
        }
    }
}

/// Generates fixed-length random codes over a fixed alphabet.
///
/// Each position is sampled independently: bytes are drawn one at a time and
/// accepted only below the largest multiple of the alphabet size that fits in
/// a byte (248 for 62 symbols), so every accepted byte maps to a symbol with
/// equal probability.
#[derive(Clone)]
pub struct CodeGenerator {
    alphabet: Vec<u8>,
    length: usize,
    /// Exclusive upper bound for accepted bytes.
    limit: u16,
    policy: EntropyPolicy,
    source: Arc<dyn EntropySource>,
}

impl CodeGenerator {
    /// Generator over [`ALPHABET`] producing [`CODE_LENGTH`]-character codes
    /// from the OS random source.
    pub fn new(policy: EntropyPolicy) -> Self {
        Self::with_alphabet(ALPHABET, CODE_LENGTH, policy, Arc::new(OsEntropy))
    }

    /// Generator with a custom alphabet, length and random source.
    ///
    /// # Panics
    ///
    /// Panics if the alphabet is empty or has more than 256 symbols, or if
    /// `length` is zero.
    pub fn with_alphabet(
        alphabet: &[u8],
        length: usize,
        policy: EntropyPolicy,
        source: Arc<dyn EntropySource>,
    ) -> Self {
        assert!(
            !alphabet.is_empty() && alphabet.len() <= 256,
            "alphabet must have 1..=256 symbols"
        );
        assert!(length > 0, "code length must be positive");

        let size = alphabet.len() as u16;
        Self {
            alphabet: alphabet.to_vec(),
            length,
            limit: (256 / size) * size,
            policy,
            source,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn policy(&self) -> EntropyPolicy {
        self.policy
    }

    /// Produces a code of exactly [`Self::length`] symbols.
    ///
    /// # Errors
    ///
    /// Returns [`EntropyError`] if the random source fails under
    /// [`EntropyPolicy::Strict`].
    pub fn generate(&self) -> Result<String, EntropyError> {
        let mut code = String::with_capacity(self.length);
        for _ in 0..self.length {
            code.push(self.next_symbol()? as char);
        }
        Ok(code)
    }

    /// Returns true if `code` could have been produced by this generator.
    pub fn accepts(&self, code: &str) -> bool {
        code.len() == self.length && code.bytes().all(|b| self.alphabet.contains(&b))
    }

    fn next_symbol(&self) -> Result<u8, EntropyError> {
        let size = self.alphabet.len() as u16;
        loop {
            let byte = self.draw_byte()? as u16;
            if byte < self.limit {
                return Ok(self.alphabet[(byte % size) as usize]);
            }
        }
    }

    fn draw_byte(&self) -> Result<u8, EntropyError> {
        match self.source.next_byte() {
            Ok(byte) => Ok(byte),
            Err(e) => match self.policy {
                EntropyPolicy::Strict => Err(e),
                EntropyPolicy::ClockFallback => {
                    tracing::warn!(error = %e, "Secure random source failed, using clock-derived byte");
                    Ok(clock_byte())
                }
            },
        }
    }
}

impl fmt::Debug for CodeGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeGenerator")
            .field("alphabet_size", &self.alphabet.len())
            .field("length", &self.length)
            .field("policy", &self.policy)
            .finish()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(EntropyPolicy::default())
    }
}

fn clock_byte() -> u8 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    (nanos % 256) as u8
}
