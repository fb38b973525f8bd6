//! Addon specifier parsing.
//!
//! Turns the comma-separated batch string (`owner/repo, owner/repo`) into
//! validated [`AddonSpecifier`]s.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{AddonError, AddonSpecifier};

/// `owner/repo`, each side made of word characters and dashes.
#[allow(clippy::unwrap_used)]
static SPECIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_-]+)/([A-Za-z0-9_-]+)$").unwrap());

/// Separator between specifiers: a comma followed by optional whitespace.
#[allow(clippy::unwrap_used)]
static SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*").unwrap());

/// Validates a single `owner/repo` token.
pub fn parse_specifier(token: &str) -> Result<AddonSpecifier, AddonError> {
    SPECIFIER_REGEX
        .captures(token)
        .and_then(|caps| Some(AddonSpecifier::new(caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .ok_or_else(|| AddonError::InvalidSpecifier(token.to_string()))
}

/// Parses a comma-separated list of addons.
///
/// An empty string is an empty list. Any malformed token fails the whole
/// parse.
pub fn parse_addons(addons: &str) -> Result<Vec<AddonSpecifier>, AddonError> {
    if addons.is_empty() {
        return Ok(Vec::new());
    }

    SEPARATOR_REGEX.split(addons).map(parse_specifier).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(specs: &[AddonSpecifier]) -> Vec<(&str, &str)> {
        specs.iter().map(|s| (s.owner(), s.repo())).collect()
    }

    /// Test parse empty.
    #[test]
    fn test_parse_empty() {
        assert!(parse_addons("").unwrap().is_empty());
    }

    /// Test parse single.
    #[test]
    fn test_parse_single() {
        let specs = parse_addons("foo/bar").unwrap();
        assert_eq!(pairs(&specs), vec![("foo", "bar")]);
    }

    /// Test parse multiple.
    #[test]
    fn test_parse_multiple() {
        let specs = parse_addons("foo/bar,fizz/buzz").unwrap();
        assert_eq!(pairs(&specs), vec![("foo", "bar"), ("fizz", "buzz")]);

        let specs = parse_addons("foo/bar,  fizz/buzz").unwrap();
        assert_eq!(pairs(&specs), vec![("foo", "bar"), ("fizz", "buzz")]);
    }

    /// Test parse dashes and underscores.
    #[test]
    fn test_parse_dashes_and_underscores() {
        let specs = parse_addons("slack-rpg/addon_official").unwrap();
        assert_eq!(pairs(&specs), vec![("slack-rpg", "addon_official")]);
    }

    /// Test parse rejects malformed.
    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["foo", "foo/bar/baz", "/bar", "foo/", "fo o/bar", "foo.bar/baz"] {
            assert_eq!(
                parse_addons(bad).unwrap_err(),
                AddonError::InvalidSpecifier(bad.to_string()),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    /// Test parse is all or nothing.
    #[test]
    fn test_parse_is_all_or_nothing() {
        let err = parse_addons("good/one, bad, good/two").unwrap_err();
        assert_eq!(err, AddonError::InvalidSpecifier("bad".to_string()));
        assert_eq!(err.to_string(), "Invalid Addon Name: bad");
    }

    /// Test parse trailing comma is empty token.
    #[test]
    fn test_parse_trailing_comma_is_empty_token() {
        let err = parse_addons("foo/bar,").unwrap_err();
        assert_eq!(err, AddonError::InvalidSpecifier(String::new()));
    }

    proptest! {
        /// Test prop valid lists round trip.
        #[test]
        fn prop_valid_lists_round_trip(
            parts in proptest::collection::vec(("[A-Za-z0-9_-]{1,12}", "[A-Za-z0-9_-]{1,12}"), 1..6),
            spacing in "[ \t]{0,3}",
        ) {
            let input = parts
                .iter()
                .map(|(o, r)| format!("{}/{}", o, r))
                .collect::<Vec<_>>()
                .join(&format!(",{}", spacing));
            let specs = parse_addons(&input).unwrap();
            prop_assert_eq!(specs.len(), parts.len());
            for (spec, (owner, repo)) in specs.iter().zip(parts.iter()) {
                prop_assert_eq!(spec.owner(), owner.as_str());
                prop_assert_eq!(spec.repo(), repo.as_str());
            }
        }

        /// Test prop tokens without slash rejected.
        #[test]
        fn prop_tokens_without_slash_rejected(token in "[A-Za-z0-9_-]{1,20}") {
            prop_assert_eq!(
                parse_specifier(&token).unwrap_err(),
                AddonError::InvalidSpecifier(token.clone())
            );
        }
    }
}
