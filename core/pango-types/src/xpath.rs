//! Xpath segment helpers.
//!
//! An address is kept as a `Vec<String>` of segments so namespaces can drop or
//! overwrite trailing segments; it is only joined into a string at the edge.

/// Builds the entry selector segment for the given names.
///
/// No names selects every entry (`entry`); otherwise the names are or'ed
/// together in the order given.
pub fn as_entry_xpath<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return "entry".to_string();
    }

    let clauses: Vec<String> = names
        .iter()
        .map(|name| format!("@name='{}'", name.as_ref()))
        .collect();
    format!("entry[{}]", clauses.join(" or "))
}

/// Reverses [`as_entry_xpath`].
///
/// Returns `None` when the segment is not an entry selector, and an empty list
/// for the bare `entry` selector.
pub fn parse_entry_xpath(segment: &str) -> Option<Vec<String>> {
    if segment == "entry" {
        return Some(Vec::new());
    }

    let inner = segment.strip_prefix("entry[")?.strip_suffix(']')?;
    inner
        .split(" or ")
        .map(|clause| {
            clause
                .trim()
                .strip_prefix("@name='")
                .and_then(|rest| rest.strip_suffix('\''))
                .map(str::to_string)
        })
        .collect()
}

/// Joins segments into the `/a/b/c` form sent on the wire.
pub fn render_xpath<S: AsRef<str>>(path: &[S]) -> String {
    let mut ans = String::new();
    for segment in path {
        ans.push('/');
        ans.push_str(segment.as_ref());
    }
    ans
}
