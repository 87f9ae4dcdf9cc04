//! URL querystring <-> `ProductFilters`.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::api::{ProductFilters, SortField, SortOrder};

/// `application/x-www-form-urlencoded` byte set, as `URLSearchParams` uses it.
const FORM_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, FORM_ENCODE)
        .to_string()
        .replace("%20", "+")
}

fn decode_component(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Decoded `key=value` pairs in order; a leading `?` is ignored.
pub fn parse_pairs(search: &str) -> Vec<(String, String)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((k, v)) => (decode_component(k), decode_component(v)),
            None => (decode_component(part), String::new()),
        })
        .collect()
}

fn positive_int(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

fn finite_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Reads the product filters out of a querystring. Unknown keys and
/// invalid values are ignored; the first occurrence of a key wins.
pub fn parse_filters(search: &str) -> ProductFilters {
    let mut filters = ProductFilters::default();
    let mut seen: Vec<String> = Vec::new();
    for (key, value) in parse_pairs(search) {
        if seen.contains(&key) {
            continue;
        }
        seen.push(key.clone());
        match key.as_str() {
            "q" if !value.is_empty() => filters.q = Some(value),
            "category" if !value.is_empty() => filters.category = Some(value),
            "categories" => {
                filters.categories = value
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "min_price" => filters.min_price = finite_float(&value),
            "max_price" => filters.max_price = finite_float(&value),
            "sort" => filters.sort = SortField::parse(&value),
            "order" => filters.order = SortOrder::parse(&value),
            "page" => filters.page = positive_int(&value),
            "per_page" => filters.per_page = positive_int(&value),
            _ => {}
        }
    }
    filters
}

/// Encodes the present fields, without a leading `?`.
pub fn build_query(filters: &ProductFilters) -> String {
    filters
        .to_query_pairs()
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, encode_component(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `path?query`, or just `path` when there is nothing to encode.
pub fn href_with_filters(path: &str, filters: &ProductFilters) -> String {
    let query = build_query(filters);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}
