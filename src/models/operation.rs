//! HTTP operation verbs
//!
//! The verb of a queued request selects which variant of the target's
//! request API gets issued.

use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP verb for a queued request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Operation {
    /// Canonical upper-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "GET",
            Operation::Post => "POST",
            Operation::Put => "PUT",
            Operation::Patch => "PATCH",
            Operation::Delete => "DELETE",
            Operation::Head => "HEAD",
            Operation::Options => "OPTIONS",
        }
    }

    /// Parse a method name, case-insensitively
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(Operation::Get),
            "POST" => Some(Operation::Post),
            "PUT" => Some(Operation::Put),
            "PATCH" => Some(Operation::Patch),
            "DELETE" => Some(Operation::Delete),
            "HEAD" => Some(Operation::Head),
            "OPTIONS" => Some(Operation::Options),
            _ => None,
        }
    }

    pub fn all() -> Vec<Operation> {
        vec![
            Operation::Get,
            Operation::Post,
            Operation::Put,
            Operation::Patch,
            Operation::Delete,
            Operation::Head,
            Operation::Options,
        ]
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
