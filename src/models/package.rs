// src/models/package.rs

//! Documentation model populated by the site parsers.

use std::collections::BTreeMap;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{DocError, Result};
use crate::models::Comment;

/// Root of the documentation model; one per successful extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Canonical import path
    pub url: String,

    /// Display name
    pub name: String,

    /// Package-level documentation
    pub overview: Comment,

    /// Package-level runnable examples
    pub examples: Vec<Example>,

    /// Constant declaration blocks, in page order
    #[serde(default)]
    pub constants: Vec<Variable>,

    /// Variable declaration blocks, in page order
    #[serde(default)]
    pub variables: Vec<Variable>,

    /// Constants keyed by identifier
    #[serde(default)]
    pub constant_map: BTreeMap<String, Variable>,

    /// Variables keyed by identifier
    #[serde(default)]
    pub variable_map: BTreeMap<String, Variable>,

    pub functions: BTreeMap<String, Function>,

    pub types: BTreeMap<String, Type>,
}

impl Package {
    /// Create an empty package with the given header fields.
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Resolve the type a method belongs to.
    ///
    /// Types may be keyed verbatim or lower-cased, so both keys are tried and
    /// the stored name must match exactly.
    pub fn owner(&self, method: &Method) -> Option<&Type> {
        self.types
            .get(&method.for_type)
            .or_else(|| self.types.get(&method.for_type.to_lowercase()))
            .filter(|t| t.name == method.for_type)
    }

    /// Check that every method names a type of this package as its owner,
    /// and that it is stored under that type.
    pub fn check_ownership(&self) -> Result<()> {
        for ty in self.types.values() {
            for method in ty.methods.values() {
                if method.for_type != ty.name || self.owner(method).is_none() {
                    return Err(DocError::validation(format!(
                        "method {} is stored under {} but belongs to {}",
                        method.name, ty.name, method.for_type
                    )));
                }
            }
        }
        Ok(())
    }

    /// Total number of methods across all types.
    pub fn method_count(&self) -> usize {
        self.types.values().map(|t| t.methods.len()).sum()
    }
}

/// A named type with its associated functions and methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Type {
    pub name: String,
    pub signature: String,
    pub comment: Comment,
    pub examples: Vec<Example>,

    /// Functions returning or operating on the type
    pub type_functions: BTreeMap<String, Function>,

    pub methods: BTreeMap<String, Method>,
}

impl Type {
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
            ..Self::default()
        }
    }
}

/// A function declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub signature: String,
    pub comment: Comment,
    pub examples: Vec<Example>,
}

/// A method; `for_type` names the owning type rather than pointing at it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Method {
    #[serde(rename = "for")]
    pub for_type: String,

    #[serde(flatten)]
    pub function: Function,
}

impl Deref for Method {
    type Target = Function;

    fn deref(&self) -> &Self::Target {
        &self.function
    }
}

/// A constant or variable; which one is decided by the holding field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Identifier, empty for the shared declaration block entry
    pub name: String,
    pub signature: String,
    pub comment: Comment,
}

/// A runnable example.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub name: String,
    pub code: String,

    /// Expected output, empty when the page shows none
    pub output: String,
}

impl Example {
    /// Build an example from its two blocks; identical blocks mean no output.
    pub fn new(name: impl Into<String>, code: String, output: String) -> Self {
        let output = if code == output { String::new() } else { output };
        Self {
            name: name.into(),
            code,
            output,
        }
    }

    pub fn has_output(&self) -> bool {
        !self.output.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(for_type: &str, name: &str) -> Method {
        Method {
            for_type: for_type.to_string(),
            function: Function {
                name: name.to_string(),
                ..Function::default()
            },
        }
    }

    #[test]
    fn test_example_identical_blocks() {
        let ex = Example::new("Example", "fmt.Println(1)".into(), "fmt.Println(1)".into());
        assert!(!ex.has_output());

        let ex = Example::new("Example", "fmt.Println(1)".into(), "1".into());
        assert_eq!(ex.output, "1");
    }

    #[test]
    fn test_owner_lookup_with_lowercase_keys() {
        let mut ty = Type::new("Bar", "type Bar struct{}");
        ty.methods.insert("baz".into(), method("Bar", "Baz"));
        let mut pkg = Package::new("example.com/x", "x");
        pkg.types.insert("bar".into(), ty);

        let m = &pkg.types["bar"].methods["baz"];
        assert_eq!(pkg.owner(m).map(|t| t.name.as_str()), Some("Bar"));
        assert_eq!(m.name, "Baz");
        assert!(pkg.check_ownership().is_ok());
    }

    #[test]
    fn test_check_ownership_dangling() {
        let mut ty = Type::new("Bar", "");
        ty.methods.insert("baz".into(), method("Qux", "Baz"));
        let mut pkg = Package::default();
        pkg.types.insert("bar".into(), ty);

        assert!(matches!(
            pkg.check_ownership(),
            Err(DocError::Validation(_))
        ));
    }

    #[test]
    fn test_method_serializes_flat() {
        let json = serde_json::to_value(method("Bar", "Baz")).unwrap();
        assert_eq!(json["for"], "Bar");
        assert_eq!(json["name"], "Baz");
    }
}
