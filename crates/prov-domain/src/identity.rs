//! Identity & Encoding Primitives (§4.1).
//!
//! Every domain record's PROV identifier lives under a single default
//! namespace and is built by percent-encoding the query value the same way
//! Python's `urllib.parse.quote_plus` does (space -> `+`, everything else
//! outside the unreserved set percent-escaped).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Default namespace URI all qualified names are resolved against.
pub const DEFAULT_NAMESPACE: &str = "https://example.org/provgraph/";

const QUOTE_PLUS_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single query value the way `quote_plus` does.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUOTE_PLUS_SET)
        .to_string()
        .replace("%20", "+")
}

/// Build the fully qualified PROV identifier string for a localpart that has
/// already had its query value(s) percent-encoded.
pub fn qualified_name(localpart: &str) -> String {
    format!("{DEFAULT_NAMESPACE}{localpart}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_spaces_as_plus() {
        assert_eq!(encode_component("a b"), "a+b");
    }

    #[test]
    fn leaves_alphanumeric_untouched() {
        assert_eq!(encode_component("abc123"), "abc123");
    }

    #[test]
    fn qualified_name_carries_namespace() {
        assert!(qualified_name("Operator?id=7").starts_with(DEFAULT_NAMESPACE));
    }
}
