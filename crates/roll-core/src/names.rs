//! Contributor name cleaning.
//!
//! Credits decorate names with nicknames (`Marin 'Bai' Krunzov`) and remarks
//! (`Jane Doe (Lead)`). Cleaning strips both and normalizes whitespace; alias
//! resolution happens on top of this in `roll-parser`.

use std::sync::LazyLock;

use regex::Regex;

/// A single-quoted word, e.g. `'Bai'`.
static NICKNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'\w+'").expect("Invalid nickname regex"));

/// A parenthesized remark, e.g. `(Lead)`.
static REMARK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("Invalid remark regex"));

/// Strip nicknames and remarks, collapse whitespace, and trim.
///
/// Repeats until nothing changes, so the result is already clean. An empty
/// result means the input held no name.
#[must_use]
pub fn clean_name(raw: &str) -> String {
    let mut current = clean_once(raw);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(raw: &str) -> String {
    let without_nicknames = NICKNAME_RE.replace_all(raw, "");
    let without_remarks = REMARK_RE.replace_all(&without_nicknames, "");
    without_remarks.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn strips_nickname_and_remark() {
        assert_eq!(clean_name("Marin 'Bai' Krunzov"), "Marin Krunzov");
        assert_eq!(clean_name("Jane Doe (Lead)"), "Jane Doe");
        assert_eq!(clean_name("  Jane   'JD'  Doe (Lead) "), "Jane Doe");
    }

    #[test]
    fn apostrophes_in_names_survive() {
        assert_eq!(clean_name("Shane O'Brien"), "Shane O'Brien");
    }

    #[test]
    fn remark_only_input_is_empty() {
        assert_eq!(clean_name("(uncredited)"), "");
        assert_eq!(clean_name("   "), "");
    }

    #[test]
    fn nested_decoration_reaches_a_fixed_point() {
        let once = clean_name("A 'b(x)c' D");
        assert_eq!(once, "A D");
        assert_eq!(clean_name(&once), once);
    }
}
