// src/render.rs

//! Plain-text renderings of a package for the command line.
//!
//! `Markdown` produces the full documentation page, `Outline` a bulleted
//! index of its sections. Entries are listed in key order.

use std::fmt::{self, Display, Formatter};

use crate::models::{Comment, Package, Type, Variable};

const RULE: &str = "---";
const EMPTY: &str = "This section is empty";

/// Full Markdown rendering of a package.
pub struct Markdown<'a>(pub &'a Package);

/// Bulleted section index of a package.
pub struct Outline<'a>(pub &'a Package);

pub fn markdown(package: &Package) -> String {
    Markdown(package).to_string()
}

pub fn outline(package: &Package) -> String {
    Outline(package).to_string()
}

impl Display for Markdown<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let pkg = self.0;

        writeln!(f, "# Package {}", pkg.name)?;
        writeln!(f, "{RULE}")?;
        if !pkg.url.is_empty() {
            writeln!(f, "`import \"{}\"`\n", pkg.url)?;
        }
        writeln!(f, "{}\n", pkg.overview.markdown())?;
        for example in &pkg.examples {
            writeln!(f, "#### {}\n```go\n{}\n```\n", example.name, example.code)?;
            if example.has_output() {
                writeln!(f, "Output:\n```\n{}\n```\n", example.output)?;
            }
        }
        writeln!(f, "{RULE}\n")?;

        writeln!(f, "# Constants\n")?;
        declarations(f, &pkg.constants)?;

        writeln!(f, "# Variables\n")?;
        declarations(f, &pkg.variables)?;

        writeln!(f, "# Functions\n")?;
        if pkg.functions.is_empty() {
            writeln!(f, "{EMPTY}\n\n{RULE}\n")?;
        }
        for function in pkg.functions.values() {
            entry(f, "func", &function.name, &function.signature, &function.comment)?;
        }

        writeln!(f, "# Types\n")?;
        if pkg.types.is_empty() {
            writeln!(f, "{EMPTY}\n\n{RULE}")?;
        }
        for ty in pkg.types.values() {
            typ(f, ty)?;
        }
        Ok(())
    }
}

fn declarations(f: &mut Formatter<'_>, items: &[Variable]) -> fmt::Result {
    if items.is_empty() {
        return writeln!(f, "{EMPTY}\n\n{RULE}\n");
    }
    for item in items {
        writeln!(f, "```go\n{}\n```\n", item.signature)?;
        comment(f, &item.comment)?;
        writeln!(f, "{RULE}\n")?;
    }
    Ok(())
}

fn entry(
    f: &mut Formatter<'_>,
    keyword: &str,
    name: &str,
    signature: &str,
    doc: &Comment,
) -> fmt::Result {
    writeln!(f, "## {keyword} {name}\n```go\n{signature}\n```\n")?;
    comment(f, doc)?;
    writeln!(f, "{RULE}\n")
}

fn comment(f: &mut Formatter<'_>, doc: &Comment) -> fmt::Result {
    if doc.is_empty() {
        return Ok(());
    }
    writeln!(f, "{}\n", doc.markdown())
}

fn typ(f: &mut Formatter<'_>, ty: &Type) -> fmt::Result {
    entry(f, "type", &ty.name, &ty.signature, &ty.comment)?;
    for function in ty.type_functions.values() {
        entry(f, "func", &function.name, &function.signature, &function.comment)?;
    }
    for method in ty.methods.values() {
        entry(f, "func", &method.name, &method.signature, &method.comment)?;
    }
    Ok(())
}

impl Display for Outline<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let pkg = self.0;

        writeln!(f, "• Overview")?;
        writeln!(f, "• Constants")?;
        writeln!(f, "• Variables")?;
        writeln!(f, "• Functions")?;
        for function in pkg.functions.values() {
            writeln!(f, " • {}", function.name)?;
        }
        write!(f, "• Types")?;
        for ty in pkg.types.values() {
            write!(f, "\n • {}", ty.name)?;
            for function in ty.type_functions.values() {
                write!(f, "\n  • {}", function.name)?;
            }
            for method in ty.methods.values() {
                write!(f, "\n  • {}", method.name)?;
            }
        }
        Ok(())
    }
}
