// -*- coding: utf-8 -*-
//
// Request echo CGI
//
// Copyright (C) 2011-2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use indexmap::IndexMap;

/// Decode one form encoded name or value.
/// `+` is a space. Broken escapes stay as they are.
fn decode_component(s: &str) -> String {
    let s = s.replace('+', " ");
    url_escape::decode(&s).into_owned()
}

/// Decoded `application/x-www-form-urlencoded` data.
///
/// Names are kept in order of first appearance.
/// The values of a name are kept in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamMap {
    items: IndexMap<String, Vec<String>>,
}

impl ParamMap {
    pub fn new() -> Self {
        Default::default()
    }

    /// Parse a query string or form body.
    ///
    /// Pairs without `=` and pairs with an empty value are dropped.
    pub fn parse(encoded: &str) -> Self {
        let mut map = Self::new();
        for pair in encoded.split('&') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            map.insert(decode_component(name), decode_component(value));
        }
        map
    }

    /// Parse a raw form body. Invalid UTF-8 is replaced.
    pub fn parse_bytes(encoded: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(encoded))
    }

    pub fn insert(&mut self, name: String, value: String) {
        self.items.entry(name).or_default().push(value);
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.items.get(name).map(|v| &v[..])
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.items.iter().map(|(n, v)| (n.as_str(), &v[..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component(""), "");
        assert_eq!(decode_component("abc"), "abc");
        assert_eq!(decode_component("a+b"), "a b");
        assert_eq!(decode_component("a%20b%2Bc"), "a b+c");
        assert_eq!(decode_component("%C3%A4"), "ä");
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
        assert_eq!(decode_component("%FF"), "\u{FFFD}");
    }

    #[test]
    fn test_parse() {
        let p = ParamMap::parse("name=Alice&tag=x&tag=y");
        assert_eq!(p.len(), 2);
        assert_eq!(p.get("name"), Some(&["Alice".to_string()][..]));
        assert_eq!(p.get("tag"), Some(&["x".to_string(), "y".to_string()][..]));
        assert_eq!(p.get("nope"), None);

        let names: Vec<&str> = p.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["name", "tag"]);
    }

    #[test]
    fn test_parse_blank() {
        assert!(ParamMap::parse("").is_empty());
        assert!(ParamMap::parse("&&&").is_empty());
        assert!(ParamMap::parse("flag").is_empty());
        assert!(ParamMap::parse("a=").is_empty());

        let p = ParamMap::parse("a=&b=1&c&=x&d=+");
        let items: Vec<(&str, &[String])> = p.iter().collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], ("b", &["1".to_string()][..]));
        assert_eq!(items[1], ("", &["x".to_string()][..]));
        assert_eq!(items[2], ("d", &[" ".to_string()][..]));
    }

    #[test]
    fn test_parse_split() {
        // Only the first '=' separates name and value.
        let p = ParamMap::parse("eq=a=b;c");
        assert_eq!(p.get("eq"), Some(&["a=b;c".to_string()][..]));

        let p = ParamMap::parse("first+name=J%C3%BCrgen+M");
        assert_eq!(p.get("first name"), Some(&["Jürgen M".to_string()][..]));
    }

    #[test]
    fn test_parse_bytes() {
        let p = ParamMap::parse_bytes(b"a=1&b=2");
        assert_eq!(p.get("a"), Some(&["1".to_string()][..]));
        assert_eq!(p.get("b"), Some(&["2".to_string()][..]));

        let p = ParamMap::parse_bytes(b"x=\xff");
        assert_eq!(p.get("x"), Some(&["\u{FFFD}".to_string()][..]));
    }

    #[test]
    fn test_many_names() {
        let encoded: Vec<String> = (0..100_000).map(|i| format!("k{i}={i}")).collect();
        let encoded = encoded.join("&") + "&k7=again";
        let start = std::time::Instant::now();
        let p = ParamMap::parse(&encoded);
        assert!(start.elapsed() < std::time::Duration::from_secs(2));

        assert_eq!(p.len(), 100_000);
        assert_eq!(p.get("k99999"), Some(&["99999".to_string()][..]));
        assert_eq!(p.get("k7"), Some(&["7".to_string(), "again".to_string()][..]));
        let names: Vec<&str> = p.iter().take(3).map(|(n, _)| n).collect();
        assert_eq!(names, ["k0", "k1", "k2"]);
    }

    #[test]
    fn test_encode_decode() {
        let src = [
            ("name", "Alice & Bob"),
            ("tag", "x=1"),
            ("tag", "y+z"),
            ("säge", "100% <b>"),
            ("tag", "a b"),
        ];
        let encoded: Vec<String> = src
            .iter()
            .map(|(n, v)| {
                format!(
                    "{}={}",
                    url_escape::encode_component(n),
                    url_escape::encode_component(v)
                )
            })
            .collect();
        let p = ParamMap::parse(&encoded.join("&"));

        let mut expected = ParamMap::new();
        for (n, v) in src {
            expected.insert(n.to_string(), v.to_string());
        }
        assert_eq!(p, expected);
        assert_eq!(
            p.get("tag"),
            Some(&["x=1".to_string(), "y+z".to_string(), "a b".to_string()][..])
        );
    }
}

// vim: ts=4 sw=4 expandtab
