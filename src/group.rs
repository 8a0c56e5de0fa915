// Purpose: Detect and expand brace-enclosed sibling groups in require paths.
// Inputs/Outputs: Takes raw request strings; yields ordered member request paths.
// Invariants: Nested groups stay intact so they can re-enter expansion recursively.
// Gotchas: Spaces are insignificant at every depth; empty tokens never become member paths.

use anyhow::bail;
use regex::Regex;

/// Splits the interior of a brace group at top-level commas; a nested
/// `{...}` token is kept intact, braces included, for recursive expansion.
pub fn split_group_members(interior: &str) -> anyhow::Result<Vec<String>> {
    let mut members = Vec::new();
    let mut current = String::new();
    let mut depth: u32 = 0;

    for c in interior.chars() {
        match c {
            ' ' => {}
            ',' if depth == 0 => members.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
        // Depth changes after the split decision: the comma right before a
        // `{` still splits, the one right after a `}` splits again.
        if c == '{' {
            depth += 1;
        } else if c == '}' {
            if depth == 0 {
                bail!("unbalanced braces in group \"{{{}}}\"", interior);
            }
            depth -= 1;
        }
    }
    if depth != 0 {
        bail!("unbalanced braces in group \"{{{}}}\"", interior);
    }

    members.push(current);
    Ok(members)
}

// Splits a request at the first path separator immediately followed by `{`:
// directory prefix (separator excluded) and group literal (that `{` through
// the end of the request).
pub fn detect_group(request: &str) -> Option<(&str, &str)> {
    let re = Regex::new(r"^(.*?)/(\{.*)$").unwrap();
    let caps = re.captures(request)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Expands a grouped request into one member request per sibling, in source
/// order. `None` when the request carries no group.
pub fn expand_group(request: &str) -> anyhow::Result<Option<Vec<String>>> {
    let Some((dir, literal)) = detect_group(request) else {
        return Ok(None);
    };
    let interior = match literal.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some(s) => s,
        None => bail!("group \"{}\" in \"{}\" does not end with '}}'", literal, request),
    };

    let mut members = Vec::new();
    for token in split_group_members(interior)? {
        // An empty token ({}, {a,}, {,b}) names no sibling; skip it instead
        // of producing a member path that ends in a bare separator.
        if token.is_empty() {
            continue;
        }
        members.push(format!("{}/{}", dir, token));
    }
    Ok(Some(members))
}
