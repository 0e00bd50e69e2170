// -*- coding: utf-8 -*-
//
// Request echo CGI
//
// Copyright (C) 2011-2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::params::ParamMap;
use std::fmt::Write as _;

pub const METHOD_NOT_ALLOWED: &str =
    "<html><body><h1>405 Method Not Allowed</h1></body></html>\n";

pub fn html_text_escape(text: &str) -> String {
    html_escape::encode_text(text).to_string()
}

/// Wording of an echo page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EchoKind {
    Query,
    Form,
}

impl EchoKind {
    fn title(&self) -> &'static str {
        match self {
            Self::Query => "GET Request",
            Self::Form => "POST Request",
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            Self::Query => "Query Parameters:",
            Self::Form => "Form Data:",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            Self::Query => "No query parameters provided.",
            Self::Form => "No form data provided.",
        }
    }
}

/// Render all parameters as one paragraph per name.
pub fn render_echo(kind: EchoKind, params: &ParamMap) -> String {
    let title = kind.title();
    let mut html = String::with_capacity(256);
    let _ = writeln!(html, "<html><head><title>{title}</title></head><body>");
    let _ = writeln!(html, "<h1>{title}</h1>");
    if params.is_empty() {
        let _ = writeln!(html, "<p>{}</p>", kind.placeholder());
    } else {
        let _ = writeln!(html, "<h2>{}</h2>", kind.heading());
        for (name, values) in params.iter() {
            let values: Vec<String> = values.iter().map(|v| html_text_escape(v)).collect();
            let _ = writeln!(html, "<p>{}: {}</p>", html_text_escape(name), values.join(", "));
        }
    }
    html.push_str("</body></html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_page() {
        let p = ParamMap::parse("name=Alice&tag=x&tag=y");
        let html = render_echo(EchoKind::Query, &p);
        assert_eq!(
            html,
            "<html><head><title>GET Request</title></head><body>\n\
             <h1>GET Request</h1>\n\
             <h2>Query Parameters:</h2>\n\
             <p>name: Alice</p>\n\
             <p>tag: x, y</p>\n\
             </body></html>\n"
        );
    }

    #[test]
    fn test_placeholders() {
        let html = render_echo(EchoKind::Query, &ParamMap::new());
        assert_eq!(
            html,
            "<html><head><title>GET Request</title></head><body>\n\
             <h1>GET Request</h1>\n\
             <p>No query parameters provided.</p>\n\
             </body></html>\n"
        );

        let html = render_echo(EchoKind::Form, &ParamMap::new());
        assert!(html.contains("<title>POST Request</title>"));
        assert!(html.contains("<p>No form data provided.</p>"));
        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn test_form_page() {
        let html = render_echo(EchoKind::Form, &ParamMap::parse("a=1&b=2"));
        assert!(html.contains("<h1>POST Request</h1>\n<h2>Form Data:</h2>\n"));
        assert!(html.contains("<p>a: 1</p>\n<p>b: 2</p>\n"));
    }

    #[test]
    fn test_one_paragraph_per_name() {
        let p = ParamMap::parse("a=1&b=2&a=3&c=4&b=5");
        let html = render_echo(EchoKind::Query, &p);
        assert_eq!(html.matches("<p>").count(), 3);
        assert!(html.contains("<p>a: 1, 3</p>"));
        assert!(html.contains("<p>b: 2, 5</p>"));
        assert!(html.contains("<p>c: 4</p>"));
    }

    #[test]
    fn test_escape() {
        let p = ParamMap::parse("%3Cb%3E=%3Cscript%3Ealert(1)%3C%2Fscript%3E");
        let html = render_echo(EchoKind::Query, &p);
        assert!(!html.contains("<script>"));
        assert!(html.contains("<p>&lt;b&gt;: &lt;script&gt;alert(1)&lt;/script&gt;</p>"));

        let p = ParamMap::parse("u=%2Ftmp&q=%22it%27s%22&amp=a%26b");
        let html = render_echo(EchoKind::Query, &p);
        assert!(html.contains("<p>u: /tmp</p>"));
        assert!(html.contains("<p>q: \"it's\"</p>"));
        assert!(html.contains("<p>amp: a&amp;b</p>"));
    }
}

// vim: ts=4 sw=4 expandtab
