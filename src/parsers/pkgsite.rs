// src/parsers/pkgsite.rs

//! pkg.go.dev adapter.
//!
//! Unlike godocs.io, pkg.go.dev nests type functions and methods inside the
//! block of the type they belong to, so ownership comes from the DOM tree.
//! The page also documents constants and variables.

use scraper::{ElementRef, Html, Selector};

use super::dom::{self, ExampleSelectors};
use super::{Parser, Site, put, put_type_function};
use crate::error::{DocError, Result};
use crate::models::{Function, Method, Package, ParseOptions, Type, Variable};

/// Base URL of pkg.go.dev.
pub const BASE: &str = "https://pkg.go.dev/";

const NOT_FOUND_MESSAGE: &str = "404 Not Found";

/// Parser for pkg.go.dev pages.
#[derive(Debug, Clone)]
pub struct PkgsiteParser {
    base: String,
}

impl PkgsiteParser {
    pub fn new() -> Self {
        Self::with_base(BASE)
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for PkgsiteParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for PkgsiteParser {
    fn site(&self) -> Site {
        Site::Pkgsite
    }

    fn url(&self, module: &str) -> String {
        format!("{}{}", self.base, module)
    }

    fn parse(&self, document: &Html, options: &ParseOptions) -> Result<Package> {
        let selectors = Selectors::new()?;

        let not_found = document
            .select(&selectors.error_message)
            .any(|e| dom::text(e).trim() == NOT_FOUND_MESSAGE);
        if not_found {
            return Err(DocError::NotFound);
        }

        let mut package = header(document, &selectors)?;

        for section in document.select(&selectors.constants) {
            for (shared, named) in variables(section, &selectors) {
                package.constants.push(shared);
                for v in named {
                    put(&mut package.constant_map, v, options.case);
                }
            }
        }
        for section in document.select(&selectors.variables) {
            for (shared, named) in variables(section, &selectors) {
                package.variables.push(shared);
                for v in named {
                    put(&mut package.variable_map, v, options.case);
                }
            }
        }

        for node in document.select(&selectors.function) {
            let function = member(node, &selectors.function_header, &selectors)?;
            put(&mut package.functions, function, options.case);
        }

        for node in document.select(&selectors.ty) {
            let ty = typ(node, &mut package, &selectors, options)?;
            put(&mut package.types, ty, options.case);
        }

        log::debug!(
            "Parsed {} from pkg.go.dev: {} constants, {} variables, {} functions, {} types",
            package.url,
            package.constants.len(),
            package.variables.len(),
            package.functions.len(),
            package.types.len()
        );
        Ok(package)
    }
}

struct Selectors {
    error_message: Selector,
    title: Selector,
    breadcrumb: Selector,
    link: Selector,
    overview: Selector,
    details: Selector,

    constants: Selector,
    variables: Selector,
    declaration: Selector,
    pre: Selector,
    identifier: Selector,

    function: Selector,
    function_header: Selector,
    ty: Selector,
    type_header: Selector,
    type_func: Selector,
    type_func_header: Selector,
    type_method: Selector,
    type_method_header: Selector,
    member_declaration: Selector,

    /// Ends a member's comment
    comment_end: Selector,
    /// Ends a member's own section inside a type block
    nested_member: Selector,

    examples: ExampleSelectors,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            error_message: dom::parse_selector("h3.Error-message")?,
            title: dom::parse_selector("h1.UnitHeader-titleHeading")?,
            breadcrumb: dom::parse_selector("nav.go-Breadcrumb ol li")?,
            link: dom::parse_selector("a[href]")?,
            overview: dom::parse_selector("div.UnitDoc .Documentation-overview")?,
            details: dom::parse_selector("details")?,

            constants: dom::parse_selector("section.Documentation-constants")?,
            variables: dom::parse_selector("section.Documentation-variables")?,
            declaration: dom::parse_selector(".Documentation-declaration")?,
            pre: dom::parse_selector("pre")?,
            identifier: dom::parse_selector("span[data-kind]")?,

            function: dom::parse_selector(".Documentation-function")?,
            function_header: dom::parse_selector("h4.Documentation-functionHeader a")?,
            ty: dom::parse_selector(".Documentation-type")?,
            type_header: dom::parse_selector("h4.Documentation-typeHeader a")?,
            type_func: dom::parse_selector(".Documentation-typeFunc")?,
            type_func_header: dom::parse_selector("h4.Documentation-typeFuncHeader a")?,
            type_method: dom::parse_selector(".Documentation-typeMethod")?,
            type_method_header: dom::parse_selector("h4.Documentation-typeMethodHeader a")?,
            member_declaration: dom::parse_selector("div.Documentation-declaration")?,

            comment_end: dom::parse_selector(
                "details, .Documentation-typeFunc, .Documentation-typeMethod",
            )?,
            nested_member: dom::parse_selector(".Documentation-typeFunc, .Documentation-typeMethod")?,

            examples: ExampleSelectors {
                panel: dom::parse_selector("details.Documentation-exampleDetails")?,
                summary: dom::parse_selector("summary")?,
                blocks: dom::parse_selector(
                    ".Documentation-exampleCode, .Documentation-exampleOutput",
                )?,
            },
        })
    }
}

fn header(document: &Html, selectors: &Selectors) -> Result<Package> {
    let name = document
        .select(&selectors.title)
        .next()
        .map(|e| dom::text(e).trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            DocError::parse("h1.UnitHeader-titleHeading", "could not get package name")
        })?;

    let url = document
        .select(&selectors.breadcrumb)
        .last()
        .and_then(|li| li.select(&selectors.link).next())
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.trim_start_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| DocError::parse("nav.go-Breadcrumb", "could not get package url"))?;

    let mut package = Package::new(url, name);

    if let Some(overview) = document.select(&selectors.overview).next() {
        // The first child is the section header
        if let Some(first) = overview.children().find_map(ElementRef::wrap) {
            package.overview = dom::comments(&dom::next_until(first, &selectors.details));
        }
        package.examples = dom::examples(&[overview], &selectors.examples);
    }

    Ok(package)
}

/// One shared entry per declaration block, plus one entry per identifier.
fn variables(section: ElementRef<'_>, selectors: &Selectors) -> Vec<(Variable, Vec<Variable>)> {
    section
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| selectors.declaration.matches(child))
        .map(|decl| {
            let signature: String = decl.select(&selectors.pre).map(dom::text).collect();
            let comment = dom::comments(&dom::next_until(decl, &selectors.declaration));

            let named = decl
                .select(&selectors.identifier)
                .filter_map(|span| {
                    let name = span
                        .value()
                        .attr("id")
                        .map(str::to_string)
                        .unwrap_or_else(|| dom::text(span).trim().to_string());
                    if name.is_empty() {
                        log::debug!("Skipping unnamed identifier in {signature:?}");
                        return None;
                    }
                    Some(Variable {
                        name,
                        signature: signature.clone(),
                        comment: comment.clone(),
                    })
                })
                .collect();

            let shared = Variable {
                name: String::new(),
                signature,
                comment,
            };
            (shared, named)
        })
        .collect()
}

/// Read a function-like block: header link, declaration, comment, examples.
fn member(node: ElementRef<'_>, header: &Selector, selectors: &Selectors) -> Result<Function> {
    let name = node
        .select(header)
        .next()
        .map(|a| dom::strip_markers(&dom::text(a)).to_string())
        .unwrap_or_default();
    if name.is_empty() {
        let classes: Vec<_> = node.value().classes().collect();
        let context = format!("{}.{}", node.value().name(), classes.join("."));
        return Err(DocError::parse(context, "could not get name"));
    }

    let Some(decl) = node.select(&selectors.member_declaration).next() else {
        return Ok(Function {
            name,
            ..Function::default()
        });
    };

    let signature = dom::text(decl).trim().to_string();
    let comment = dom::comments(&dom::next_until(decl, &selectors.comment_end));
    let examples = dom::examples(
        &dom::next_until(decl, &selectors.nested_member),
        &selectors.examples,
    );

    Ok(Function {
        name,
        signature,
        comment,
        examples,
    })
}

/// Build a type with its nested functions and methods.
fn typ(
    node: ElementRef<'_>,
    package: &mut Package,
    selectors: &Selectors,
    options: &ParseOptions,
) -> Result<Type> {
    let base = member(node, &selectors.type_header, selectors)?;
    let mut ty = Type::new(base.name, base.signature);
    ty.comment = base.comment;
    ty.examples = base.examples;

    for func in node.select(&selectors.type_func) {
        let function = member(func, &selectors.type_func_header, selectors)?;
        put_type_function(&mut package.functions, &function, options);
        put(&mut ty.type_functions, function, options.case);
    }

    for method in node.select(&selectors.type_method) {
        let function = member(method, &selectors.type_method_header, selectors)?;
        let method = Method {
            for_type: ty.name.clone(),
            function,
        };
        put(&mut ty.methods, method, options.case);
    }

    Ok(ty)
}
