//! Name normalization for controllers and controller functions.

use http::Method;

/// Controller used when TAG mapping has no tag, or PATH mapping has no usable segment.
pub const INDEX_CONTROLLER: &str = "index";

/// Non-empty segments of a path template.
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// `{id}` and `:id` segments.
#[must_use]
pub fn is_param_segment(segment: &str) -> bool {
    (segment.starts_with('{') && segment.ends_with('}')) || segment.starts_with(':')
}

/// Lower-case a tag or path segment into a controller name.
///
/// Letters, digits, `_` and `-` survive; every other run of characters
/// becomes a single `_`. Leading and trailing separators are dropped.
/// Returns `None` when nothing usable is left.
#[must_use]
pub fn normalize_controller_name(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for c in raw.trim().chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    let trimmed = out.trim_matches(|c| c == '_' || c == '-');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Turn an `operationId` into a valid member name.
///
/// Characters other than letters, digits and `_` split the id into words
/// that are joined in camelCase (`get-pet by.id` → `getPetById`). Existing
/// camelCase is kept. A leading digit gets a `_` prefix. Returns `None` when
/// no word is left.
#[must_use]
pub fn normalize_function_name(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    for (i, word) in raw
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        if i == 0 {
            out.push_str(word);
        } else {
            push_capitalized(&mut out, word);
        }
    }
    if out.is_empty() {
        return None;
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    Some(out)
}

/// Derive a function name from the method and the remaining path segments.
///
/// Static segments are PascalCased; parameter segments become `By<Name>`:
/// `get` + `["users", "{id}"]` → `getUsersById`, `delete` + `[]` → `delete`.
/// Pure in its inputs.
#[must_use]
pub fn derive_function_name<'a, I>(method: &Method, segments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = method.as_str().to_ascii_lowercase();
    for segment in segments {
        if is_param_segment(segment) {
            let name = segment
                .trim_start_matches(':')
                .trim_start_matches('{')
                .trim_end_matches('}');
            out.push_str("By");
            push_pascal(&mut out, name);
        } else {
            push_pascal(&mut out, segment);
        }
    }
    out
}

fn push_pascal(out: &mut String, raw: &str) {
    for word in raw.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        push_capitalized(out, word);
    }
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}
