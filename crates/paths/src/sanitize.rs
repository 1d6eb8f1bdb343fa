//! Invalid filename characters and filename sanitization.
//!
//! The active character set is picked once from an [`InvalidCharPolicy`]:
//! either whatever the host itself rejects, or a fixed strict table that is
//! safe on every supported host. The strict table lets names created on a
//! permissive host (Linux accepts `:` and `?`) survive being copied to a
//! restrictive one.

use serde::{Deserialize, Serialize};

use crate::error::{require_non_empty, PathResult};

/// The most restrictive filename convention: every C0 control character plus
/// `"` `<` `>` `|` `:` `*` `?` `\` `/`.
pub const STRICT_INVALID_FILENAME_CHARS: [char; 41] = [
    '"', '<', '>', '|', '\0', '\u{1}', '\u{2}', '\u{3}', '\u{4}', '\u{5}', '\u{6}', '\u{7}',
    '\u{8}', '\t', '\n', '\u{b}', '\u{c}', '\r', '\u{e}', '\u{f}', '\u{10}', '\u{11}', '\u{12}',
    '\u{13}', '\u{14}', '\u{15}', '\u{16}', '\u{17}', '\u{18}', '\u{19}', '\u{1a}', '\u{1b}',
    '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}', ':', '*', '?', '\\', '/',
];

/// Characters the host itself rejects in filenames.
#[cfg(windows)]
pub const NATIVE_INVALID_FILENAME_CHARS: &[char] = &STRICT_INVALID_FILENAME_CHARS;

/// Characters the host itself rejects in filenames.
#[cfg(not(windows))]
pub const NATIVE_INVALID_FILENAME_CHARS: &[char] = &['\0', '/'];

/// Which invalid-character table a filesystem uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidCharPolicy {
    /// The host's own restrictions.
    #[default]
    Native,
    /// The fixed 41-character table, regardless of host.
    Strict,
}

impl InvalidCharPolicy {
    /// The characters this policy rejects.
    pub fn chars(&self) -> &'static [char] {
        match self {
            Self::Native => NATIVE_INVALID_FILENAME_CHARS,
            Self::Strict => &STRICT_INVALID_FILENAME_CHARS,
        }
    }
}

impl std::str::FromStr for InvalidCharPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown invalid character policy: {other}")),
        }
    }
}

impl std::fmt::Display for InvalidCharPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// An ordered, duplicate-free set of characters that may not appear in a
/// filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCharacterSet {
    chars: Vec<char>,
}

impl InvalidCharacterSet {
    /// Build a set from arbitrary characters, keeping first-seen order.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut unique = Vec::new();
        for c in chars {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        Self { chars: unique }
    }

    /// Build the set selected by `policy`.
    pub fn for_policy(policy: InvalidCharPolicy) -> Self {
        Self::new(policy.chars().iter().copied())
    }

    /// Whether `c` is in the set.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// The characters in the set, in order.
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Number of distinct invalid characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether no character is rejected.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Whether `name` contains none of the characters in the set.
    pub fn is_valid_filename(&self, name: &str) -> bool {
        !name.is_empty() && !name.chars().any(|c| self.contains(c))
    }

    /// Replace every character of the set found in `name` with a space.
    ///
    /// The character count is preserved. Only this set is enforced; reserved
    /// device names and trailing dots are the caller's concern.
    pub fn get_valid_filename(&self, name: &str) -> PathResult<String> {
        require_non_empty("filename", name)?;

        Ok(name
            .chars()
            .map(|c| if self.contains(c) { ' ' } else { c })
            .collect())
    }
}

impl Default for InvalidCharacterSet {
    fn default() -> Self {
        Self::for_policy(InvalidCharPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::separators::DIRECTORY_SEPARATOR;

    #[test]
    fn test_strict_table_contents() {
        let set = InvalidCharacterSet::for_policy(InvalidCharPolicy::Strict);
        assert_eq!(set.len(), 41);
        for code in 0u32..0x20 {
            assert!(set.contains(char::from_u32(code).unwrap()));
        }
        for c in ['"', '<', '>', '|', ':', '*', '?', '\\', '/'] {
            assert!(set.contains(c), "missing {c:?}");
        }
        assert!(!set.contains('a'));
        assert!(!set.contains(' '));
    }

    #[test]
    fn test_native_table_contains_separator_once() {
        let set = InvalidCharacterSet::for_policy(InvalidCharPolicy::Native);
        let count = set
            .as_slice()
            .iter()
            .filter(|&&c| c == DIRECTORY_SEPARATOR)
            .count();
        assert_eq!(count, 1);
        assert!(set.contains('\0'));
    }

    #[test]
    fn test_new_deduplicates_in_order() {
        let set = InvalidCharacterSet::new(['/', ':', '/', '?', ':']);
        assert_eq!(set.as_slice(), &['/', ':', '?']);
    }

    #[test]
    fn test_get_valid_filename_strict() {
        let set = InvalidCharacterSet::for_policy(InvalidCharPolicy::Strict);
        let name = "Movie: The \"Sequel\" <Part 2>?.mkv";
        let valid = set.get_valid_filename(name).unwrap();
        assert_eq!(valid, "Movie  The  Sequel   Part 2  .mkv");
        assert_eq!(valid.chars().count(), name.chars().count());
        assert!(set.is_valid_filename(&valid));
    }

    #[test]
    fn test_get_valid_filename_processes_whole_name() {
        let set = InvalidCharacterSet::for_policy(InvalidCharPolicy::Strict);
        let valid = set.get_valid_filename("a/b\\c|d*e\u{1}f\tg").unwrap();
        assert_eq!(valid, "a b c d e f g");
    }

    #[test]
    fn test_get_valid_filename_removes_every_invalid_char() {
        for policy in [InvalidCharPolicy::Native, InvalidCharPolicy::Strict] {
            let set = InvalidCharacterSet::for_policy(policy);
            let name: String = STRICT_INVALID_FILENAME_CHARS
                .iter()
                .chain(['x', 'é', '.'].iter())
                .collect();
            let valid = set.get_valid_filename(&name).unwrap();
            assert!(!valid.chars().any(|c| set.contains(c)));
            assert_eq!(valid.chars().count(), name.chars().count());
        }
    }

    #[test]
    fn test_get_valid_filename_keeps_unicode() {
        let set = InvalidCharacterSet::for_policy(InvalidCharPolicy::Strict);
        assert_eq!(set.get_valid_filename("Amélie (2001)").unwrap(), "Amélie (2001)");
    }

    #[test]
    fn test_get_valid_filename_rejects_empty() {
        let set = InvalidCharacterSet::default();
        assert!(set.get_valid_filename("").is_err());
        assert!(!set.is_valid_filename(""));
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!("strict".parse::<InvalidCharPolicy>(), Ok(InvalidCharPolicy::Strict));
        assert_eq!(" Native ".parse::<InvalidCharPolicy>(), Ok(InvalidCharPolicy::Native));
        assert!("lenient".parse::<InvalidCharPolicy>().is_err());
        assert_eq!(InvalidCharPolicy::Strict.to_string(), "strict");
    }
}
