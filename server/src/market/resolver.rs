//! Token Resolution
//!
//! Maps a user-supplied token name, symbol or id to a registry id.

use super::types::TokenRecord;

/// Return the id of the first registry entry whose id, symbol or name equals
/// `query` case-insensitively.
///
/// First match in registry order wins. A missing query never matches, and
/// empty registry fields never match anything.
pub fn resolve_token_id<'a>(query: Option<&str>, registry: &'a [TokenRecord]) -> Option<&'a str> {
    let needle = query?.to_lowercase();
    let matches = |field: &str| !field.is_empty() && field.to_lowercase() == needle;

    registry
        .iter()
        .filter(|token| !token.id.is_empty())
        .find(|token| matches(&token.id) || matches(&token.symbol) || matches(&token.name))
        .map(|token| token.id.as_str())
}
