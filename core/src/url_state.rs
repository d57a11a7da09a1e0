//! Bidirectional mapping between [`QueryState`] and its URL query string.
//!
//! The URL is advisory input: decoding never fails, absent or malformed
//! fields silently fall back to their defaults.

use crate::query::QueryState;
use url::form_urlencoded;

/// Decode a query string (with or without a leading `?`) into a state.
///
/// `page` defaults to 1 when absent, non-numeric, or zero; `category_id`
/// to none; `q` to empty. On repeated keys the last occurrence wins.
pub fn decode(query: &str) -> QueryState {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut state = QueryState::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "page" => {
                state.page = match value.parse::<u32>() {
                    Ok(page) if page >= 1 => page,
                    _ => 1,
                };
            }
            "q" => state.search = value.into_owned(),
            "category_id" => state.category_id = value.parse::<i64>().ok(),
            _ => {}
        }
    }
    state
}

/// Encode a state as a query string (no leading `?`).
///
/// `page` and `q` are always emitted; `category_id` only when no search
/// text is active, mirroring the filter precedence rule.
pub fn encode(state: &QueryState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    out.append_pair("page", &state.page.to_string());
    out.append_pair("q", &state.search);
    if state.search.is_empty()
        && let Some(id) = state.category_id
    {
        out.append_pair("category_id", &id.to_string());
    }
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_of_empty_query_yields_defaults() {
        assert_eq!(decode(""), QueryState::default());
        assert_eq!(decode("?"), QueryState::default());
    }

    #[test]
    fn decode_tolerates_malformed_fields() {
        let state = decode("?page=banana&category_id=soup&q=boots");
        assert_eq!(state.page, 1);
        assert_eq!(state.category_id, None);
        assert_eq!(state.search, "boots");
    }

    #[test]
    fn decode_rejects_page_zero_and_negatives() {
        assert_eq!(decode("page=0").page, 1);
        assert_eq!(decode("page=-3").page, 1);
    }

    #[test]
    fn decode_last_occurrence_wins() {
        let state = decode("page=2&page=5&q=a&q=b");
        assert_eq!(state.page, 5);
        assert_eq!(state.search, "b");
    }

    #[test]
    fn encode_always_emits_page_and_q() {
        assert_eq!(encode(&QueryState::default()), "page=1&q=");
    }

    #[test]
    fn encode_category_click_url() {
        let state = QueryState {
            page: 1,
            category_id: Some(7),
            search: String::new(),
        };
        assert_eq!(encode(&state), "page=1&q=&category_id=7");
    }

    #[test]
    fn encode_drops_category_while_searching() {
        let state = QueryState {
            page: 2,
            category_id: Some(7),
            search: "boots".to_string(),
        };
        assert_eq!(encode(&state), "page=2&q=boots");
    }

    #[test]
    fn encode_escapes_search_text() {
        let state = QueryState {
            page: 1,
            category_id: None,
            search: "running shoes & socks".to_string(),
        };
        let encoded = encode(&state);
        assert_eq!(encoded, "page=1&q=running+shoes+%26+socks");
        assert_eq!(decode(&encoded), state);
    }

    #[test]
    fn round_trip_holds_for_canonical_states() {
        let states = [
            QueryState::default(),
            QueryState {
                page: 12,
                category_id: Some(3),
                search: String::new(),
            },
            QueryState {
                page: 2,
                category_id: None,
                search: "wool socks".to_string(),
            },
        ];
        for state in states {
            assert_eq!(decode(&encode(&state)), state);
        }
    }
}
