// src/parsers/mod.rs

//! Site-specific documentation parsers.
//!
//! Each documentation site gets one adapter implementing [`Parser`]:
//! - `GodocsParser`: godocs.io, an ordered walk over kind-tagged headings
//! - `PkgsiteParser`: pkg.go.dev, nested declaration blocks plus constants
//!   and variables

mod dom;
pub mod godocs;
pub mod pkgsite;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    CasePolicy, DuplicateCheck, Function, Method, Package, ParseOptions, Type, Variable,
};

pub use godocs::GodocsParser;
pub use pkgsite::PkgsiteParser;

/// Interface implemented by documentation site adapters.
pub trait Parser: Send + Sync {
    /// Which site this adapter reads.
    fn site(&self) -> Site;

    /// Page URL documenting `module`.
    fn url(&self, module: &str) -> String;

    /// Reduce a parsed page into a package.
    ///
    /// The first structural problem aborts the extraction; no partial
    /// package is returned.
    fn parse(&self, document: &Html, options: &ParseOptions) -> Result<Package>;
}

/// Supported documentation sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Godocs,
    Pkgsite,
}

impl Site {
    /// Default base URL of the site.
    pub fn base_url(self) -> &'static str {
        match self {
            Site::Godocs => godocs::BASE,
            Site::Pkgsite => pkgsite::BASE,
        }
    }

    /// Build the adapter for this site, optionally against another base URL.
    pub fn parser(self, base_url: Option<&str>) -> Arc<dyn Parser> {
        let base = base_url.unwrap_or(self.base_url());
        match self {
            Site::Godocs => Arc::new(GodocsParser::with_base(base)),
            Site::Pkgsite => Arc::new(PkgsiteParser::with_base(base)),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Godocs => write!(f, "godocs"),
            Site::Pkgsite => write!(f, "pkgsite"),
        }
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "godocs" | "godocs.io" => Ok(Site::Godocs),
            "pkgsite" | "pkg.go.dev" => Ok(Site::Pkgsite),
            other => Err(format!("unknown site '{other}' (expected godocs or pkgsite)")),
        }
    }
}

/// Entities stored in name-keyed maps.
pub(crate) trait Named {
    fn name(&self) -> &str;
}

impl Named for Function {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Method {
    fn name(&self) -> &str {
        &self.function.name
    }
}

impl Named for Type {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Variable {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Insert under the key the casing policy derives from the entity's name.
pub(crate) fn put<V: Named>(map: &mut BTreeMap<String, V>, value: V, case: CasePolicy) {
    let key = case.key(value.name()).into_owned();
    map.insert(key, value);
}

/// Mirror a type function into the package function map, if enabled.
pub(crate) fn put_type_function(
    functions: &mut BTreeMap<String, Function>,
    function: &Function,
    options: &ParseOptions,
) {
    if options.duplicate_type_functions {
        mirror_type_function(functions, function, options);
    }
}

/// Insert a type function into the package function map under its policy key.
///
/// The type function always wins, so the package entry carries the same
/// signature as the type's own. [`DuplicateCheck`] decides whether a
/// colliding entry counts as the same function or a different one shadowed
/// by the key.
pub(crate) fn mirror_type_function(
    functions: &mut BTreeMap<String, Function>,
    function: &Function,
    options: &ParseOptions,
) {
    let key = options.case.key(&function.name).into_owned();
    if let Some(existing) = functions.get(&key) {
        let duplicate = match options.duplicate_check {
            DuplicateCheck::BeforeCasing => existing.name == function.name,
            DuplicateCheck::AfterCasing => true,
        };
        if duplicate {
            log::debug!("Type function {} replaces package function", function.name);
        } else {
            log::debug!(
                "Type function {} shadows package function {} under key {key}",
                function.name,
                existing.name
            );
        }
    }

    functions.insert(key, function.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(name: &str, signature: &str) -> Function {
        Function {
            name: name.to_string(),
            signature: signature.to_string(),
            ..Function::default()
        }
    }

    #[test]
    fn test_site_from_str() {
        assert_eq!("godocs".parse::<Site>(), Ok(Site::Godocs));
        assert_eq!("pkg.go.dev".parse::<Site>(), Ok(Site::Pkgsite));
        assert!("docs.rs".parse::<Site>().is_err());
        assert_eq!(Site::Pkgsite.to_string(), "pkgsite");
    }

    #[test]
    fn test_site_urls() {
        assert_eq!(
            Site::Godocs.parser(None).url("net/http"),
            "https://godocs.io/net/http"
        );
        assert_eq!(
            Site::Pkgsite.parser(None).url("net/http"),
            "https://pkg.go.dev/net/http"
        );
        assert_eq!(
            Site::Godocs.parser(Some("http://127.0.0.1:9000/")).url("fmt"),
            "http://127.0.0.1:9000/fmt"
        );
    }

    #[test]
    fn test_put_respects_case_policy() {
        let mut map = BTreeMap::new();
        put(&mut map, function("ReadAll", ""), CasePolicy::Insensitive);
        put(&mut map, function("Copy", ""), CasePolicy::Sensitive);
        assert_eq!(map["readall"].name, "ReadAll");
        assert_eq!(map["Copy"].name, "Copy");
    }

    #[test]
    fn test_duplicate_disabled() {
        let mut functions = BTreeMap::new();
        let options = ParseOptions {
            duplicate_type_functions: false,
            ..ParseOptions::default()
        };
        put_type_function(&mut functions, &function("NewBar", "func NewBar()"), &options);
        assert!(functions.is_empty());
    }

    #[test]
    fn test_type_function_replaces_colliding_key() {
        for check in [DuplicateCheck::AfterCasing, DuplicateCheck::BeforeCasing] {
            let mut functions = BTreeMap::new();
            put(&mut functions, function("URL", "func URL() string"), CasePolicy::Insensitive);

            let options = ParseOptions {
                duplicate_check: check,
                ..ParseOptions::default()
            };
            let url = function("Url", "func Url() T");
            put_type_function(&mut functions, &url, &options);

            assert_eq!(functions.len(), 1);
            assert_eq!(functions["url"], url);
        }
    }

    #[test]
    fn test_type_function_case_sensitive_keeps_both() {
        let mut functions = BTreeMap::new();
        put(&mut functions, function("URL", "func URL() string"), CasePolicy::Sensitive);

        let options = ParseOptions {
            case: CasePolicy::Sensitive,
            ..ParseOptions::default()
        };
        put_type_function(&mut functions, &function("Url", "func Url() T"), &options);

        assert_eq!(functions.len(), 2);
        assert_eq!(functions["URL"].signature, "func URL() string");
        assert_eq!(functions["Url"].signature, "func Url() T");
    }

    #[test]
    fn test_mirror_ignores_duplicate_flag() {
        let mut functions = BTreeMap::new();
        let options = ParseOptions {
            duplicate_type_functions: false,
            ..ParseOptions::default()
        };
        mirror_type_function(&mut functions, &function("NewBar", "func NewBar()"), &options);
        assert_eq!(functions["newbar"].signature, "func NewBar()");
    }
}
