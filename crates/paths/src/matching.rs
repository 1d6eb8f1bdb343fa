//! Case-insensitive literal matching.
//!
//! Comparison is per character using Unicode simple lowercase mapping, so
//! `É` matches `é` and byte offsets always land on character boundaries of
//! the haystack.

/// Compare two characters ignoring case.
pub fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Compare two strings ignoring case.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if chars_eq_ignore_case(x, y) => continue,
            _ => return false,
        }
    }
}

/// If `haystack` starts with `needle` (ignoring case), return the byte length
/// of the matched prefix of `haystack`.
pub fn strip_prefix_len(haystack: &str, needle: &str) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for expected in needle.chars() {
        let (_, actual) = chars.next()?;
        if !chars_eq_ignore_case(actual, expected) {
            return None;
        }
    }
    Some(chars.next().map_or(haystack.len(), |(index, _)| index))
}

/// Whether `haystack` starts with `needle`, ignoring case.
pub fn starts_with_ignore_case(haystack: &str, needle: &str) -> bool {
    strip_prefix_len(haystack, needle).is_some()
}

/// Iterate over `(start, end)` byte ranges of every non-overlapping match of
/// `needle` in `haystack`, ignoring case.
pub fn match_ranges<'a>(haystack: &'a str, needle: &'a str) -> MatchRanges<'a> {
    MatchRanges {
        haystack,
        needle,
        position: 0,
    }
}

/// Iterator returned by [`match_ranges`].
#[derive(Debug, Clone)]
pub struct MatchRanges<'a> {
    haystack: &'a str,
    needle: &'a str,
    position: usize,
}

impl Iterator for MatchRanges<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.needle.is_empty() {
            return None;
        }
        while self.position < self.haystack.len() {
            let start = self.position;
            let rest = &self.haystack[start..];
            if let Some(len) = strip_prefix_len(rest, self.needle) {
                self.position = start + len;
                return Some((start, start + len));
            }
            let step = rest.chars().next().map_or(1, char::len_utf8);
            self.position += step;
        }
        None
    }
}

/// Whether `haystack` contains `needle`, ignoring case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || match_ranges(haystack, needle).next().is_some()
}

/// Replace every occurrence of `from` with `to`, ignoring case.
///
/// Returns the new string and whether anything was replaced.
pub fn replace_ignore_case(haystack: &str, from: &str, to: &str) -> (String, bool) {
    let mut result = String::with_capacity(haystack.len());
    let mut last = 0;
    let mut replaced = false;

    for (start, end) in match_ranges(haystack, from) {
        result.push_str(&haystack[last..start]);
        result.push_str(to);
        last = end;
        replaced = true;
    }
    result.push_str(&haystack[last..]);

    (result, replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("Movies", "mOVIES"));
        assert!(eq_ignore_case("Élan", "élan"));
        assert!(!eq_ignore_case("movie", "movies"));
        assert!(eq_ignore_case("", ""));
    }

    #[test]
    fn test_strip_prefix_len() {
        assert_eq!(strip_prefix_len("/Data/media", "/data"), Some(5));
        assert_eq!(strip_prefix_len("/da", "/data"), None);
        assert_eq!(strip_prefix_len("ÉCOLE/x", "école"), Some("ÉCOLE".len()));
    }

    #[test]
    fn test_match_ranges_non_overlapping() {
        let ranges: Vec<_> = match_ranges("aAaA", "aa").collect();
        assert_eq!(ranges, vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_match_ranges_empty_needle() {
        assert_eq!(match_ranges("abc", "").count(), 0);
    }

    #[test]
    fn test_replace_ignore_case() {
        let (result, replaced) = replace_ignore_case("/MOVIES/a/movies", "/movies", "/m");
        assert_eq!(result, "/m/a/m");
        assert!(replaced);

        let (result, replaced) = replace_ignore_case("/tv/a", "/movies", "/m");
        assert_eq!(result, "/tv/a");
        assert!(!replaced);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("C:\\Media\\TV", "media\\"));
        assert!(!contains_ignore_case("C:\\Media", "music"));
        assert!(contains_ignore_case("anything", ""));
    }
}
