//! Request path normalization.
//!
//! # Responsibilities
//! - Reduce a raw request-target to its path component
//! - Trim trailing slashes (root excepted)
//! - Strip the deployment's mount prefix
//!
//! # Design Decisions
//! - Pure functions of (request-target, script name), no ambient state
//! - Mount prefix comes from the entry script's directory; a `/public`
//!   directory also offers its parent as a candidate
//! - Only the first matching candidate is stripped

/// Directory portion of a path, with the semantics of POSIX `dirname`.
///
/// `""` stays `""`, a bare file name yields `"."`, and anything directly under
/// the root yields `"/"`.
pub fn dirname(path: &str) -> &str {
    if path.is_empty() {
        return "";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        None => ".",
        Some(idx) => {
            let parent = trimmed[..idx].trim_end_matches('/');
            if parent.is_empty() {
                "/"
            } else {
                parent
            }
        }
    }
}

/// Path component of a request-target: query string and fragment removed.
///
/// Absolute-form targets (`http://host/path`) are reduced to their path.
pub fn request_path(target: &str) -> &str {
    let mut path = target;
    if let Some(scheme_end) = path.find("://") {
        if !path[..scheme_end].contains(['/', '?', '#']) {
            let after = &path[scheme_end + 3..];
            path = match after.find(['/', '?', '#']) {
                Some(idx) => &after[idx..],
                None => "",
            };
        }
    }
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Trailing slashes removed; an empty result becomes `/`.
pub fn trim_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Mount prefixes to try for a given entry script, in priority order.
pub fn mount_candidates(script_name: &str) -> Vec<&str> {
    let script_dir = dirname(script_name);
    let parent_dir = dirname(script_dir).trim_end_matches('/');

    let mut candidates = vec![script_dir];
    if !parent_dir.is_empty() && script_dir.ends_with("/public") {
        candidates.push(parent_dir);
    }
    candidates.dedup();
    candidates.retain(|c| !c.is_empty() && *c != "/" && *c != ".");
    candidates
}

/// Canonical lookup path for a request-target under the given entry script.
pub fn canonical_path(target: &str, script_name: &str) -> String {
    let path = request_path(target);
    let path = if path.is_empty() { "/" } else { path };
    let path = trim_trailing_slash(path);

    for base in mount_candidates(script_name) {
        if let Some(rest) = path.strip_prefix(base) {
            return if rest.is_empty() {
                "/".to_string()
            } else {
                rest.to_string()
            };
        }
    }
    path.to_string()
}
