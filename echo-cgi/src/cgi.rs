// -*- coding: utf-8 -*-
//
// Request echo CGI
//
// Copyright (C) 2011-2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    page::{render_echo, EchoKind, METHOD_NOT_ALLOWED},
    params::ParamMap,
    reply::Reply,
    request::{CgiEnv, Method, Request},
};
use anyhow as ah;
use std::{
    io::{Read, Write},
    time::Instant,
};

pub const MAX_POST_BODY_LEN: usize = 1024 * 1024;

/// Produce the page for one request.
pub fn handle(request: &Request) -> Reply {
    match &request.method {
        Method::Get => {
            let params = ParamMap::parse(&request.query);
            Reply::html(render_echo(EchoKind::Query, &params))
        }
        Method::Post => {
            let params = ParamMap::parse_bytes(&request.body);
            Reply::html(render_echo(EchoKind::Form, &params))
        }
        Method::Other(_) => Reply::html(METHOD_NOT_ALLOWED.to_string()),
    }
}

pub struct Cgi {
    max_body_len: usize,
    start_stamp: Option<Instant>,
}

impl Cgi {
    pub fn new(max_body_len: usize) -> Self {
        Self {
            max_body_len,
            start_stamp: None,
        }
    }

    /// Report the processing time in a reply header.
    pub fn with_runtime_header(mut self, start_stamp: Instant) -> Self {
        self.start_stamp = Some(start_stamp);
        self
    }

    /// Build the reply for the request described by `env` and `stdin`.
    pub fn reply(&self, env: &impl CgiEnv, stdin: &mut impl Read) -> Reply {
        let request = match Request::from_cgi(env, stdin, self.max_body_len) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("echo-cgi: {e}");
                return if e.is_client_error() {
                    Reply::bad_request(&e.to_string())
                } else {
                    Reply::internal_error(&e.to_string())
                };
            }
        };

        let mut reply = handle(&request);
        if let Some(start_stamp) = self.start_stamp {
            let runtime = (Instant::now() - start_stamp).as_micros();
            reply.add_header(format!("X-Echo-Cgi-Runtime: {runtime} us"));
        }
        reply
    }

    pub fn run(
        &self,
        env: &impl CgiEnv,
        stdin: &mut impl Read,
        stdout: &mut impl Write,
    ) -> ah::Result<()> {
        self.reply(env, stdin).write_to(stdout)
    }
}


// vim: ts=4 sw=4 expandtab
