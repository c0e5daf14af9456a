// src/parsers/godocs.rs

//! godocs.io adapter.
//!
//! The page lists functions, types and methods as flat `h3`/`h4` headings
//! tagged with `data-kind`. Ownership is recovered from document order: a
//! type heading opens a type, and the methods and functions that follow
//! attach to it until the next type heading.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::dom::{self, ExampleSelectors};
use super::{Parser, Site, mirror_type_function, put};
use crate::error::{DocError, Result};
use crate::models::{Function, Method, Package, ParseOptions, Type};

/// Base URL of godocs.io.
pub const BASE: &str = "https://godocs.io/";

const NOT_FOUND_TITLE: &str = "Not Found - godocs.io";

const KINDS: &str =
    r#"[data-kind="function"], [data-kind="type"], [data-kind="method"]:not([class*="decl"])"#;

/// Parser for godocs.io pages.
#[derive(Debug, Clone)]
pub struct GodocsParser {
    base: String,
}

impl GodocsParser {
    pub fn new() -> Self {
        Self::with_base(BASE)
    }

    /// Parser against a mirror or a local test server.
    pub fn with_base(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for GodocsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for GodocsParser {
    fn site(&self) -> Site {
        Site::Godocs
    }

    fn url(&self, module: &str) -> String {
        format!("{}{}", self.base, module)
    }

    fn parse(&self, document: &Html, options: &ParseOptions) -> Result<Package> {
        let selectors = Selectors::new()?;

        let title = document
            .select(&selectors.title)
            .next()
            .map(dom::text)
            .unwrap_or_default();
        if title.trim() == NOT_FOUND_TITLE {
            return Err(DocError::NotFound);
        }

        let package = header(document, &selectors)?;
        let mut state = State::new(package, &selectors, *options);

        for node in document.select(&selectors.kinds) {
            match node.value().attr("data-kind") {
                Some("function") => state.function(node)?,
                Some("type") => state.typ(node)?,
                Some("method") => state.method(node)?,
                _ => {}
            }
        }

        let package = state.finish();
        log::debug!(
            "Parsed {} from godocs.io: {} functions, {} types",
            package.url,
            package.functions.len(),
            package.types.len()
        );
        Ok(package)
    }
}

struct Selectors {
    title: Selector,
    overview: Selector,
    index: Selector,
    code: Selector,
    kinds: Selector,
    section_end: Selector,
    examples: ExampleSelectors,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            title: dom::parse_selector("head title")?,
            overview: dom::parse_selector("#pkg-overview")?,
            index: dom::parse_selector("#pkg-index")?,
            code: dom::parse_selector("code")?,
            kinds: dom::parse_selector(KINDS)?,
            section_end: dom::parse_selector("h3, h4")?,
            examples: ExampleSelectors {
                panel: dom::parse_selector(".panel")?,
                summary: dom::parse_selector("summary")?,
                blocks: dom::parse_selector("pre")?,
            },
        })
    }
}

/// Package name, import path, overview and package examples.
fn header(document: &Html, selectors: &Selectors) -> Result<Package> {
    let heading = document
        .select(&selectors.overview)
        .next()
        .ok_or_else(|| DocError::parse("#pkg-overview", "could not find package heading"))?;

    let title = dom::text(heading);
    let name = title.trim();
    let name = name.strip_prefix("package ").unwrap_or(name).trim();

    let range = dom::next_until(heading, &selectors.index);
    let url = range
        .iter()
        .find_map(|node| {
            if selectors.code.matches(node) {
                Some(*node)
            } else {
                node.select(&selectors.code).next()
            }
        })
        .and_then(|code| import_path(&dom::text(code)))
        .ok_or_else(|| DocError::parse("#pkg-overview code", "could not get import path"))?;

    let mut package = Package::new(url, name);
    // The first note is the import line
    package.overview = dom::comments(&range).into_iter().skip(1).collect();
    package.examples = dom::examples(&range, &selectors.examples);
    Ok(package)
}

/// Extract `<path>` from `import "<path>"`.
fn import_path(code: &str) -> Option<String> {
    let re = Regex::new(r#"^import\s+"([^"]+)"$"#).ok()?;
    re.captures(code.trim()).map(|caps| caps[1].to_string())
}

/// One heading's section: signature, comment and examples.
struct Section {
    id: String,
    signature: String,
    function: Function,
}

/// Reduction state; `current` is the type whose methods are being read.
struct State<'s> {
    package: Package,
    current: Option<Type>,
    selectors: &'s Selectors,
    options: ParseOptions,
}

impl<'s> State<'s> {
    fn new(package: Package, selectors: &'s Selectors, options: ParseOptions) -> Self {
        Self {
            package,
            current: None,
            selectors,
            options,
        }
    }

    fn section(&self, node: ElementRef<'_>, kind: &str) -> Result<Section> {
        let Some(id) = node.value().attr("id").filter(|id| !id.is_empty()) else {
            let context = format!("{}[data-kind={kind}]", node.value().name());
            return Err(DocError::parse(context, "could not get id"));
        };
        let id = id.to_string();

        let next = dom::next_until(node, &self.selectors.section_end);
        let signature = next
            .first()
            .map(|first| dom::strip_markers(&dom::text(*first)).to_string())
            .unwrap_or_default();
        let body = next.get(1..).unwrap_or_default();

        let function = Function {
            name: id.clone(),
            signature: signature.clone(),
            comment: dom::comments(body),
            examples: dom::examples(&next, &self.selectors.examples),
        };
        Ok(Section {
            id,
            signature,
            function,
        })
    }

    fn function(&mut self, node: ElementRef<'_>) -> Result<()> {
        let function = self.section(node, "function")?.function;

        match self.current.as_mut() {
            // Listed at package level too, whatever the duplication setting
            Some(ty) => {
                mirror_type_function(&mut self.package.functions, &function, &self.options);
                put(&mut ty.type_functions, function, self.options.case);
            }
            None => put(&mut self.package.functions, function, self.options.case),
        }
        Ok(())
    }

    fn typ(&mut self, node: ElementRef<'_>) -> Result<()> {
        self.flush();

        let section = self.section(node, "type")?;
        let mut ty = Type::new(section.id, section.signature);
        ty.comment = section.function.comment;
        ty.examples = section.function.examples;

        self.current = Some(ty);
        Ok(())
    }

    fn method(&mut self, node: ElementRef<'_>) -> Result<()> {
        let context = format!("{}[data-kind=method]", node.value().name());
        // A failure below aborts the scan, so the type need not be restored
        let Some(mut ty) = self.current.take() else {
            return Err(DocError::parse(context, "could not get method type"));
        };
        let section = self.section(node, "method")?;

        let (owner, name) = match section.id.split_once('.') {
            Some((owner, name)) => (owner.to_string(), name.to_string()),
            None => (ty.name.clone(), section.id.clone()),
        };
        if owner != ty.name {
            return Err(DocError::parse(
                context,
                format!("method {name} belongs to {owner}, not {}", ty.name),
            ));
        }

        let method = Method {
            for_type: owner,
            function: Function {
                name,
                ..section.function
            },
        };
        put(&mut ty.methods, method, self.options.case);
        self.current = Some(ty);
        Ok(())
    }

    /// Move the open type, if any, into the package.
    fn flush(&mut self) {
        if let Some(ty) = self.current.take() {
            put(&mut self.package.types, ty, self.options.case);
        }
    }

    fn finish(mut self) -> Package {
        self.flush();
        self.package
    }
}
