//! # Filter Grammar Primitives
//!
//! Fixed characters of the tag and edge filter grammars.
//!
//! ```text
//! tag filter   := group (',' group)*        group := alt ('|' alt)*
//! alt          := prefix? tag               prefix := '+' | '-' | '>' | '/'
//! tag          := '*' | label (':' label)*
//!
//! edge filter  := position (',' position)*  position := step ('|' step)*
//! step         := dirmark? typename dirmark?
//! dirmark      := '<' | '>'                 typename := '`' any* '`' | bareword | ''
//! ```

/// Separates per-depth positions in both grammars.
pub const SEQUENCE_SEPARATOR: char = ',';

/// Separates alternatives within one position.
pub const ALTERNATIVE_SEPARATOR: char = '|';

/// Universal-accept tag token.
pub const WILDCARD_TAG: &str = "*";

/// Separates the members of a compound tag requirement.
pub const COMPOUND_SEPARATOR: char = ':';

/// Prefix routing a tag to the whitelist matcher (also the default).
pub const WHITELIST_PREFIX: char = '+';

/// Prefix routing a tag to the blacklist matcher.
pub const BLACKLIST_PREFIX: char = '-';

/// Prefix routing a tag to the end-vertex matcher.
pub const END_VERTEX_PREFIX: char = '>';

/// Prefix routing a tag to the terminator-vertex matcher.
pub const TERMINATOR_PREFIX: char = '/';

/// Marks an incoming edge step.
pub const INCOMING_MARK: char = '<';

/// Marks an outgoing edge step.
pub const OUTGOING_MARK: char = '>';

/// Quotes an edge type name containing grammar characters.
pub const TYPE_QUOTE: char = '`';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_distinct() {
        let prefixes = [
            WHITELIST_PREFIX,
            BLACKLIST_PREFIX,
            END_VERTEX_PREFIX,
            TERMINATOR_PREFIX,
        ];
        for (i, a) in prefixes.iter().enumerate() {
            for b in &prefixes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn separators_do_not_collide_with_markers() {
        for sep in [SEQUENCE_SEPARATOR, ALTERNATIVE_SEPARATOR] {
            assert_ne!(sep, INCOMING_MARK);
            assert_ne!(sep, OUTGOING_MARK);
            assert_ne!(sep, TYPE_QUOTE);
        }
    }
}
