//! Compare command
//!
//! Usage: apiassert compare <ACTUAL> <EXPECTED> [--path <P>]... [--include <P=K1,K2>]...
//!        [--exclude <P=K1,K2>]... [--ordered] [--strict-keys]

use apiassert_core::document::{parse_document, Document};
use apiassert_core::logging_facility::{self, Profile};
use apiassert_core::{assert_structure, AssertError, AssertionSpec, ExError, KeyCoverage};
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Actual JSON document
    pub actual: PathBuf,

    /// Expected JSON document
    pub expected: PathBuf,

    /// Path expression to compare (repeatable; default: whole document)
    #[arg(short, long = "path")]
    pub paths: Vec<String>,

    /// Compare only these keys below a path: `PATH=key1,key2`
    #[arg(long, value_parser = parse_key_spec)]
    pub include: Vec<(String, Vec<String>)>,

    /// Skip these keys below a path: `PATH=key1,key2`
    #[arg(long, value_parser = parse_key_spec)]
    pub exclude: Vec<(String, Vec<String>)>,

    /// Require arrays to match element by element
    #[arg(long)]
    pub ordered: bool,

    /// Also fail when an expected key is missing from the actual document
    #[arg(long)]
    pub strict_keys: bool,
}

/// Execute compare command
pub fn execute(args: CompareArgs, profile: Option<Profile>) -> Result<(), Box<dyn std::error::Error>> {
    logging_facility::init(profile.unwrap_or(Profile::Test));

    let actual = read_document(&args.actual)?;
    let expected = read_document(&args.expected)?;

    let spec = build_spec(expected, &args);
    assert_structure(&actual, &spec).map_err(ExError::from)?;

    println!("✓ {} matches {}", args.actual.display(), args.expected.display());
    Ok(())
}

fn build_spec(expected: Document, args: &CompareArgs) -> AssertionSpec {
    let mut spec = AssertionSpec::new(expected)
        .with_paths(args.paths.iter().cloned())
        .ordered(args.ordered);
    if args.strict_keys {
        spec = spec.with_key_coverage(KeyCoverage::Both);
    }
    for (path, keys) in &args.include {
        spec = spec.include(path.clone(), keys.iter().cloned());
    }
    for (path, keys) in &args.exclude {
        spec = spec.exclude(path.clone(), keys.iter().cloned());
    }
    spec
}

fn read_document(path: &Path) -> Result<Document, ExError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ExError::from(AssertError::from(e)).with_path(path.display().to_string())
    })?;
    parse_document(&text)
        .map_err(|e| ExError::from(e).with_path(path.display().to_string()))
}

/// Parse `PATH=key1,key2`; the last `=` separates the keys.
fn parse_key_spec(raw: &str) -> Result<(String, Vec<String>), String> {
    let (path, keys) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected PATH=key1,key2, got `{}`", raw))?;
    let path = path.trim();
    if path.is_empty() {
        return Err(format!("missing path in `{}`", raw));
    }
    let keys = keys
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();
    Ok((path.to_string(), keys))
}
