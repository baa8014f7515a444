//! Pure helpers for route path manipulation: optional-segment expansion,
//! operation id derivation and OpenAPI path formatting.

use regex::Regex;
use std::sync::OnceLock;

fn optional_segment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/:\w+\?").expect("valid optional-segment pattern"))
}

fn param_segment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":([^/]+)").expect("valid param-segment pattern"))
}

/// Capitalize the first character of a word.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Expand a path with optional `:name?` segments into every concrete
/// variant: for each optional segment, one branch keeps it and one removes
/// the segment together with its leading slash.
///
/// The expansion is recursive and intentionally keeps duplicate variants
/// produced by overlapping branches; callers deduplicate by inserting into
/// the paths map. A path with no optional segments expands to itself.
pub fn expand_optional_path(path: &str) -> Vec<String> {
    let optional_segments: Vec<String> = optional_segment_re()
        .find_iter(path)
        .map(|m| m.as_str().to_string())
        .collect();

    if optional_segments.is_empty() {
        return vec![path.to_string()];
    }

    // Fully-concrete variant first: every optional marker stripped.
    let mut paths = vec![path.replace('?', "")];

    for segment in &optional_segments {
        let elided = path.replacen(segment.as_str(), "", 1);
        paths.extend(expand_optional_path(&elided));
    }

    paths
}

/// Derive a deterministic operation id from a method and a concrete path.
///
/// The method is lowercased, each literal segment is capitalized and
/// concatenated, and each `:name` parameter contributes `By{Name}`. Any
/// leftover `?` markers become the token `Optional`. The root path maps to
/// `{method}Index`.
pub fn operation_id(method: &str, path: &str) -> String {
    let mut id = method.to_lowercase();

    if path.is_empty() || path == "/" {
        id.push_str("Index");
        return id;
    }

    for segment in path.split('/') {
        if segment.contains(':') {
            id.push_str("By");
            id.push_str(&capitalize(&segment.replacen(':', "", 1)));
        } else {
            id.push_str(&capitalize(segment));
        }
    }

    id.replace('?', "Optional")
}

/// The "loose" variant of a path: trailing slash toggled. Used as the
/// fallback key when looking a route up in a reference table.
pub fn loose_path(path: &str) -> String {
    if let Some(stripped) = path.strip_suffix('/') {
        stripped.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Convert `:name` path parameters to the OpenAPI `{name}` format.
pub fn convert_path_format(path: &str) -> String {
    param_segment_re().replace_all(path, "{$1}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_no_optional_segments() {
        assert_eq!(expand_optional_path("/users/:id"), vec!["/users/:id"]);
        assert_eq!(expand_optional_path("/"), vec!["/"]);
    }

    #[test]
    fn test_expand_single_optional_segment() {
        assert_eq!(
            expand_optional_path("/user/:id?"),
            vec!["/user/:id", "/user"]
        );
    }

    #[test]
    fn test_expand_two_optional_segments_exact_order() {
        // The nested expansion revisits the fully-elided form; the duplicate
        // is expected and collapses when inserted into the paths map.
        assert_eq!(
            expand_optional_path("/user/:user?/name/:name?"),
            vec![
                "/user/:user/name/:name",
                "/user/name/:name",
                "/user/name",
                "/user/:user/name",
                "/user/name",
            ]
        );
    }

    #[test]
    fn test_operation_id_index() {
        assert_eq!(operation_id("GET", "/"), "getIndex");
        assert_eq!(operation_id("POST", ""), "postIndex");
    }

    #[test]
    fn test_operation_id_literal_segments() {
        assert_eq!(operation_id("GET", "/user/profile"), "getUserProfile");
    }

    #[test]
    fn test_operation_id_parameter_segments() {
        assert_eq!(operation_id("GET", "/user/:id"), "getUserById");
        assert_eq!(
            operation_id("delete", "/user/:user/name/:name"),
            "deleteUserByUserNameByName"
        );
    }

    #[test]
    fn test_operation_id_optional_marker() {
        assert_eq!(operation_id("GET", "/user/:id?"), "getUserByIdOptional");
    }

    #[test]
    fn test_loose_path_toggles_trailing_slash() {
        assert_eq!(loose_path("/user"), "/user/");
        assert_eq!(loose_path("/user/"), "/user");
    }

    #[test]
    fn test_convert_path_format() {
        assert_eq!(
            convert_path_format("/users/:id/posts/:post_id"),
            "/users/{id}/posts/{post_id}"
        );
        assert_eq!(convert_path_format("/users/list"), "/users/list");
    }
}
