//! `document.cookie` wire format.
//!
//! Reading yields `name=value` pairs separated by `;`. Writing is one
//! assignment per cookie: `name=value` followed by `; attribute` pairs.
//! Names and values are percent-encoded on write and decoded on read so that
//! `;`, `=` and whitespace inside either cannot bleed into neighbouring
//! cookies. Plain token names such as `branch_session` encode to themselves.

use crate::config::{CookieConfig, CookieLifetime};
use crate::error::{StorageError, StorageResult};
use std::borrow::Cow;
use std::collections::HashMap;

/// An `expires` value that is always in the past.
pub const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:01 GMT";

/// Splits a raw cookie string into undecoded `(name, value)` pairs.
///
/// Entries without `=` or with an empty name are skipped. The value is
/// everything after the first `=`, so values may contain further `=`.
pub fn pairs(raw: &str) -> impl Iterator<Item = (&str, &str)> {
    raw.split(';').filter_map(split_pair)
}

/// Splits one `name=value` entry, trimming surrounding whitespace.
pub fn split_pair(entry: &str) -> Option<(&str, &str)> {
    let entry = entry.trim();
    let (name, value) = entry.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}

/// Parses a raw cookie string into decoded name/value entries.
///
/// When a name appears more than once (same name set on different paths) the
/// first occurrence wins, matching the browser's most-specific-path-first
/// ordering.
pub fn parse(raw: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    for (name, value) in pairs(raw) {
        entries
            .entry(decode_name(name).into_owned())
            .or_insert_with(|| decode_value(value).into_owned());
    }
    entries
}

/// Finds one cookie by its decoded name and decodes its value.
pub fn find(raw: &str, name: &str) -> Option<String> {
    pairs(raw)
        .find(|(candidate, _)| decode_name(candidate) == name)
        .map(|(_, value)| decode_value(value).into_owned())
}

/// Percent-encodes a cookie value.
pub fn encode_value(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Percent-encodes a cookie name.
pub fn encode_name(name: &str) -> Cow<'_, str> {
    urlencoding::encode(name)
}

/// Decodes a cookie value.
///
/// Values written by other scripts may not be valid percent-encoded UTF-8;
/// those are returned unchanged.
pub fn decode_value(value: &str) -> Cow<'_, str> {
    decode(value, "value")
}

/// Decodes a cookie name, returning names that do not decode unchanged.
pub fn decode_name(name: &str) -> Cow<'_, str> {
    decode(name, "name")
}

fn decode<'a>(text: &'a str, part: &str) -> Cow<'a, str> {
    match urlencoding::decode(text) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::warn!(%err, "cookie {part} is not percent-encoded UTF-8, using raw text");
            Cow::Borrowed(text)
        }
    }
}

/// Checks that `name` can be written.
///
/// Any name encodes to a safe token; only the empty name is rejected, since
/// browsers read `=value` as a nameless cookie.
pub fn validate_name(name: &str) -> StorageResult<()> {
    if name.is_empty() {
        return Err(StorageError::InvalidCookieName(name.to_string()));
    }
    Ok(())
}

/// Builds the assignment that stores `name=value` with the configured attributes.
pub fn serialize_set(name: &str, value: &str, config: &CookieConfig) -> StorageResult<String> {
    validate_name(name)?;
    let mut out = format!("{}={}", encode_name(name), encode_value(value));
    if let CookieLifetime::Persistent { max_age_secs } = config.lifetime {
        out.push_str(&format!("; max-age={max_age_secs}"));
    }
    push_scope(&mut out, config);
    if config.secure {
        out.push_str("; secure");
    }
    if let Some(same_site) = config.same_site {
        out.push_str("; samesite=");
        out.push_str(same_site.as_str());
    }
    Ok(out)
}

/// Builds the assignment that deletes `name`.
///
/// Deletion writes an empty value with an expiry in the past. Path and domain
/// must match the original write or the browser keeps the old cookie.
pub fn serialize_remove(name: &str, config: &CookieConfig) -> StorageResult<String> {
    validate_name(name)?;
    let mut out = format!("{}=; expires={EXPIRED}", encode_name(name));
    push_scope(&mut out, config);
    Ok(out)
}

fn push_scope(out: &mut String, config: &CookieConfig) {
    out.push_str("; path=");
    out.push_str(&config.path);
    if let Some(domain) = &config.domain {
        out.push_str("; domain=");
        out.push_str(domain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SameSite;

    #[test]
    fn parse_trims_and_splits_on_first_equals() {
        let entries = parse("a=1;  b = x=y ; c=");
        assert_eq!(entries.get("a").map(String::as_str), Some("1"));
        assert_eq!(entries.get("b").map(String::as_str), Some("x=y"));
        assert_eq!(entries.get("c").map(String::as_str), Some(""));
    }

    #[test]
    fn parse_skips_malformed_entries() {
        let entries = parse("good=1; novalue; =orphan; ;; also_good=2");
        assert_eq!(entries.len(), 2);
        assert!(entries.contains_key("good"));
        assert!(entries.contains_key("also_good"));
    }

    #[test]
    fn parse_empty_string() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn parse_keeps_first_duplicate() {
        let entries = parse("dup=first; dup=second");
        assert_eq!(entries.get("dup").map(String::as_str), Some("first"));
    }

    #[test]
    fn parse_decodes_values() {
        let entries = parse("v=a%3Bb%3Dc%20d");
        assert_eq!(entries.get("v").map(String::as_str), Some("a;b=c d"));
    }

    #[test]
    fn undecodable_value_is_returned_raw() {
        assert_eq!(decode_value("%FF%FE"), "%FF%FE");
    }

    #[test]
    fn find_matches_exact_name_only() {
        let raw = "branch_session_first=1; branch_session=2";
        assert_eq!(find(raw, "branch_session").as_deref(), Some("2"));
        assert_eq!(find(raw, "branch").as_deref(), None);
    }

    #[test]
    fn serialize_set_defaults_to_session_cookie_on_root_path() {
        let out = serialize_set("branch_session", "abc", &CookieConfig::default()).unwrap();
        assert_eq!(out, "branch_session=abc; path=/");
    }

    #[test]
    fn serialize_set_encodes_delimiters() {
        let out = serialize_set("k", "a;b=c", &CookieConfig::default()).unwrap();
        assert_eq!(out, "k=a%3Bb%3Dc; path=/");
        let (_, value) = split_pair(out.split(';').next().unwrap()).unwrap();
        assert_eq!(decode_value(value), "a;b=c");
    }

    #[test]
    fn serialize_set_emits_all_attributes() {
        let config = CookieConfig::default()
            .path("/app")
            .domain("example.com")
            .lifetime(CookieLifetime::Persistent { max_age_secs: 86400 })
            .secure(true)
            .same_site(SameSite::Strict);
        let out = serialize_set("k", "v", &config).unwrap();
        assert_eq!(
            out,
            "k=v; max-age=86400; path=/app; domain=example.com; secure; samesite=strict"
        );
    }

    #[test]
    fn serialize_remove_expires_in_the_past() {
        let out = serialize_remove("branch_session", &CookieConfig::default()).unwrap();
        assert_eq!(
            out,
            "branch_session=; expires=Thu, 01 Jan 1970 00:00:01 GMT; path=/"
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(
            serialize_set("", "v", &CookieConfig::default()),
            Err(StorageError::InvalidCookieName(String::new()))
        );
        assert!(serialize_remove("", &CookieConfig::default()).is_err());
    }

    #[test]
    fn names_with_delimiters_are_encoded() {
        let config = CookieConfig::default();
        assert_eq!(
            serialize_set("key unstored", "v", &config).unwrap(),
            "key%20unstored=v; path=/"
        );
        assert_eq!(serialize_set("a=b", "v", &config).unwrap(), "a%3Db=v; path=/");
        assert_eq!(
            serialize_remove("path/seg", &config).unwrap(),
            "path%2Fseg=; expires=Thu, 01 Jan 1970 00:00:01 GMT; path=/"
        );
    }

    #[test]
    fn token_names_are_written_verbatim() {
        for name in ["branch_session", "branch_session_first", "key_1"] {
            assert_eq!(encode_name(name), name);
        }
    }

    #[test]
    fn encoded_names_are_found_by_logical_name() {
        let raw = "other=1; a%3Bb%20c=2; caf%C3%A9=3";
        assert_eq!(find(raw, "a;b c").as_deref(), Some("2"));
        assert_eq!(find(raw, "café").as_deref(), Some("3"));
        let entries = parse(raw);
        assert_eq!(entries.get("a;b c").map(String::as_str), Some("2"));
        assert_eq!(entries.get("café").map(String::as_str), Some("3"));
    }

    proptest::proptest! {
        #[test]
        fn parse_never_panics(raw in ".*") {
            let _ = parse(&raw);
        }

        #[test]
        fn encoded_values_carry_no_delimiters(value in "\\PC*") {
            let encoded = encode_value(&value);
            proptest::prop_assert!(!encoded.contains(';'));
            proptest::prop_assert!(!encoded.contains('='));
            proptest::prop_assert!(!encoded.contains(' '));
        }

        #[test]
        fn any_name_survives_a_set_and_find(name in "\\PC{1,12}", value in "\\PC*") {
            let assignment = serialize_set(&name, &value, &CookieConfig::default()).unwrap();
            let (pair, _) = assignment.split_once(';').unwrap();
            proptest::prop_assert_eq!(find(pair, &name), Some(value));
        }
    }
}
