// src/models/options.rs

//! Casing and duplication policies applied while building the model.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// How identifiers become map keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    /// Keys are the identifier exactly as found
    Sensitive,

    /// Keys are lower-cased; the stored name keeps its casing
    #[default]
    Insensitive,
}

impl CasePolicy {
    /// Map key for an identifier under this policy.
    pub fn key(self, name: &str) -> Cow<'_, str> {
        match self {
            CasePolicy::Sensitive => Cow::Borrowed(name),
            CasePolicy::Insensitive => Cow::Owned(name.to_lowercase()),
        }
    }
}

/// Which comparison decides that a type function already exists at
/// package level when it is duplicated there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCheck {
    /// Compare identifiers as written, then insert under the policy key
    BeforeCasing,

    /// Compare policy keys
    #[default]
    AfterCasing,
}

/// Options handed to a parser for one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub case: CasePolicy,

    /// Also insert a type's functions into the package function map
    pub duplicate_type_functions: bool,

    pub duplicate_check: DuplicateCheck,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            case: CasePolicy::default(),
            duplicate_type_functions: true,
            duplicate_check: DuplicateCheck::default(),
        }
    }
}
