use super::EXIT_NOT_FOUND;
use miette::{IntoDiagnostic, Result};
use noderesolve_core::Specifier;
use serde::Serialize;

/// JSON output for `noderesolve parse`.
#[derive(Serialize)]
struct ParseResult {
    ok: bool,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scoped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subpath: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(input: &str, json: bool) -> Result<()> {
    match Specifier::parse(input) {
        Ok(spec) => {
            if json {
                let result = ParseResult {
                    ok: true,
                    scoped: Some(spec.is_scoped()),
                    input: input.to_string(),
                    protocol: spec.protocol,
                    scope: spec.scope,
                    package: Some(spec.package),
                    name: Some(spec.name),
                    subpath: Some(spec.subpath),
                    error: None,
                };
                println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
            } else {
                if let Some(protocol) = &spec.protocol {
                    println!("protocol: {protocol}");
                }
                if let Some(scope) = &spec.scope {
                    println!("scope:    @{scope}");
                }
                println!("package:  {}", spec.package);
                println!("name:     {}", spec.name);
                println!("subpath:  {}", spec.subpath);
            }
            Ok(())
        }
        Err(err) => {
            if json {
                let result = ParseResult {
                    ok: false,
                    input: input.to_string(),
                    protocol: None,
                    scope: None,
                    scoped: None,
                    package: None,
                    name: None,
                    subpath: None,
                    error: Some(err.to_string()),
                };
                println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
            } else {
                eprintln!("error: {err}");
            }
            std::process::exit(EXIT_NOT_FOUND);
        }
    }
}
