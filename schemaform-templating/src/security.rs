//! Size and nesting limits for template sources
//!
//! Templates read from a user-supplied directory are untrusted unless the
//! configuration says otherwise. Builtin templates are always trusted.

use regex::Regex;

use crate::error::{Result, TemplatingError};

/// Maximum allowed template size in bytes for untrusted templates
pub const MAX_TEMPLATE_SIZE: usize = 100_000;

/// Trusted templates may be this many times larger
pub const TRUSTED_SIZE_FACTOR: usize = 10;

/// Maximum control-flow nesting for untrusted templates
pub const MAX_TEMPLATE_NESTING: usize = 10;

/// Check a template source against the limits for its trust level
pub fn check_template(name: &str, source: &str, trusted: bool) -> Result<()> {
    let reject = |message: String| TemplatingError::Security {
        name: name.to_string(),
        message,
    };

    let max_size = if trusted {
        MAX_TEMPLATE_SIZE * TRUSTED_SIZE_FACTOR
    } else {
        MAX_TEMPLATE_SIZE
    };
    if source.len() > max_size {
        return Err(reject(format!(
            "too large: {} bytes (max allowed: {max_size})",
            source.len()
        )));
    }
    if trusted {
        return Ok(());
    }

    let depth = nesting_depth(source).map_err(|e| reject(e.to_string()))?;
    if depth > MAX_TEMPLATE_NESTING {
        return Err(reject(format!(
            "nesting too deep: {depth} levels (max allowed: {MAX_TEMPLATE_NESTING})"
        )));
    }
    Ok(())
}

/// Deepest nesting of block tags in `source`
fn nesting_depth(source: &str) -> std::result::Result<usize, regex::Error> {
    let tag = Regex::new(
        r"\{%-?\s*(if|unless|for|case|capture|tablerow|endif|endunless|endfor|endcase|endcapture|endtablerow)\b",
    )?;

    let mut depth: usize = 0;
    let mut deepest = 0;
    for cap in tag.captures_iter(source) {
        if cap[1].starts_with("end") {
            depth = depth.saturating_sub(1);
        } else {
            depth += 1;
            deepest = deepest.max(depth);
        }
    }
    Ok(deepest)
}
