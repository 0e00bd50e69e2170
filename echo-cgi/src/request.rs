// -*- coding: utf-8 -*-
//
// Request echo CGI
//
// Copyright (C) 2011-2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{
    env,
    ffi::OsString,
    fmt,
    io::{self, Read},
};

const MAX_CGIENV_LEN: usize = 1024 * 4;
const MAX_BODY_PREALLOC: usize = 1024 * 64;

/// Source of the CGI request meta variables.
pub trait CgiEnv {
    fn var_os(&self, name: &str) -> Option<OsString>;
}

/// The environment of the running process, as set up by the web server.
pub struct ProcessEnv;

impl CgiEnv for ProcessEnv {
    fn var_os(&self, name: &str) -> Option<OsString> {
        env::var_os(name)
    }
}

#[cfg(test)]
impl CgiEnv for std::collections::HashMap<&str, &str> {
    fn var_os(&self, name: &str) -> Option<OsString> {
        self.get(name).map(OsString::from)
    }
}

#[cfg(test)]
impl CgiEnv for std::collections::HashMap<&str, OsString> {
    fn var_os(&self, name: &str) -> Option<OsString> {
        self.get(name).cloned()
    }
}

/// Request failures that are reported to the client instead of a page.
#[derive(Debug)]
pub enum RequestError {
    EnvTooLong(&'static str),
    EnvNotUtf8(&'static str),
    BadContentLength(String),
    BodyTooLarge { len: usize, max: usize },
    TruncatedBody { expected: usize, got: usize },
    BodyRead(io::Error),
}

impl RequestError {
    /// Whether the client caused the failure (as opposed to us).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::BodyRead(_))
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvTooLong(name) => write!(f, "Environment variable '{name}' is too long."),
            Self::EnvNotUtf8(name) => {
                write!(f, "Environment variable '{name}' is not valid UTF-8.")
            }
            Self::BadContentLength(v) => write!(f, "POST: Invalid CONTENT_LENGTH '{v}'."),
            Self::BodyTooLarge { len, max } => {
                write!(f, "POST: CONTENT_LENGTH {len} exceeds the limit of {max} bytes.")
            }
            Self::TruncatedBody { expected, got } => {
                write!(f, "POST: Truncated body: got {got} of {expected} bytes.")
            }
            Self::BodyRead(e) => write!(f, "CGI stdin read failed: {e}"),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BodyRead(e) => Some(e),
            _ => None,
        }
    }
}

fn get_cgienv_str(
    env: &impl CgiEnv,
    name: &'static str,
    max_len: usize,
) -> Result<Option<String>, RequestError> {
    let Some(value) = env.var_os(name) else {
        return Ok(None);
    };
    if value.len() > max_len {
        return Err(RequestError::EnvTooLong(name));
    }
    value
        .into_string()
        .map(Some)
        .map_err(|_| RequestError::EnvNotUtf8(name))
}

/// Absent or blank means zero.
fn get_content_length(env: &impl CgiEnv) -> Result<usize, RequestError> {
    let value = get_cgienv_str(env, "CONTENT_LENGTH", MAX_CGIENV_LEN)?.unwrap_or_default();
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse::<usize>()
        .map_err(|_| RequestError::BadContentLength(value.to_string()))
}

/// Read exactly `len` bytes. A short stream is a truncated body.
/// The buffer grows with the data that actually arrives.
fn read_body(src: &mut impl Read, len: usize) -> Result<Vec<u8>, RequestError> {
    let mut body = Vec::with_capacity(len.min(MAX_BODY_PREALLOC));
    src.take(len as u64)
        .read_to_end(&mut body)
        .map_err(RequestError::BodyRead)?;
    if body.len() < len {
        return Err(RequestError::TruncatedBody {
            expected: len,
            got: body.len(),
        });
    }
    Ok(body)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other(String),
}

impl Method {
    /// Case sensitive. A missing method is a GET.
    pub fn from_meta(meth: Option<&str>) -> Self {
        match meth {
            None | Some("GET") => Self::Get,
            Some("POST") => Self::Post,
            Some(other) => Self::Other(other.to_string()),
        }
    }
}

/// Everything the handler gets to see of one CGI invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Raw query string. Only filled for GET.
    pub query: String,
    /// Raw body. Only filled for POST.
    pub body: Vec<u8>,
}

impl Request {
    #[cfg(test)]
    pub fn new(method: Method, query: &str, body: &[u8]) -> Self {
        Self {
            method,
            query: query.to_string(),
            body: body.to_vec(),
        }
    }

    /// Build the request from CGI meta variables and the body stream.
    ///
    /// The query string is only looked at for GET and the body
    /// (including CONTENT_LENGTH) only for POST.
    /// The query string may be as long as a body.
    pub fn from_cgi(
        env: &impl CgiEnv,
        body_src: &mut impl Read,
        max_body_len: usize,
    ) -> Result<Self, RequestError> {
        let meth = get_cgienv_str(env, "REQUEST_METHOD", MAX_CGIENV_LEN)?;
        let method = Method::from_meta(meth.as_deref());

        let mut query = String::new();
        let mut body = Vec::new();
        match method {
            Method::Get => {
                query = get_cgienv_str(env, "QUERY_STRING", max_body_len)?.unwrap_or_default();
            }
            Method::Post => {
                let len = get_content_length(env)?;
                if len > max_body_len {
                    return Err(RequestError::BodyTooLarge {
                        len,
                        max: max_body_len,
                    });
                }
                body = read_body(body_src, len)?;
            }
            Method::Other(_) => (),
        }

        Ok(Self {
            method,
            query,
            body,
        })
    }
}


// vim: ts=4 sw=4 expandtab
