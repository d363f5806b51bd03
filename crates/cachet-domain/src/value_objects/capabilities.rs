//! Backend capability sets
//!
//! Not every backend implements the whole contract. Each handle declares the
//! operations it supports so callers can check before invoking; the
//! unsupported operations still fail at run time with
//! [`Error::Unsupported`](crate::error::Error::Unsupported).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cache contract operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Get,
    GetMulti,
    Set,
    Add,
    Replace,
    Delete,
    Increment,
    Decrement,
    Flush,
}

impl Operation {
    /// Every contract operation, in declaration order
    pub const ALL: [Operation; 9] = [
        Operation::Get,
        Operation::GetMulti,
        Operation::Set,
        Operation::Add,
        Operation::Replace,
        Operation::Delete,
        Operation::Increment,
        Operation::Decrement,
        Operation::Flush,
    ];

    /// Lowercase operation name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::GetMulti => "get_multi",
            Self::Set => "set",
            Self::Add => "add",
            Self::Replace => "replace",
            Self::Delete => "delete",
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Flush => "flush",
        }
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of operations a backend supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    bits: u16,
}

impl Capabilities {
    /// Every contract operation
    pub const fn all() -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < Operation::ALL.len() {
            bits |= Operation::ALL[i].bit();
            i += 1;
        }
        Self { bits }
    }

    /// This set with `operation` removed
    #[must_use]
    pub const fn without(self, operation: Operation) -> Self {
        Self {
            bits: self.bits & !operation.bit(),
        }
    }

    /// Whether `operation` is supported
    pub const fn supports(self, operation: Operation) -> bool {
        self.bits & operation.bit() != 0
    }

    /// Iterate over the operations missing from this set
    pub fn unsupported(self) -> impl Iterator<Item = Operation> {
        Operation::ALL
            .into_iter()
            .filter(move |op| !self.supports(*op))
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}
