// -*- coding: utf-8 -*-
//
// Request echo CGI
//
// Copyright (C) 2011-2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{self as ah, Context as _};
use std::{fmt, io::Write};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum HttpStatus {
    #[default]
    Ok = 200,
    BadRequest = 400,
    InternalServerError = 500,
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let text = match self {
            Self::Ok => "Ok",
            Self::BadRequest => "Bad Request",
            Self::InternalServerError => "Internal Server Error",
        };
        write!(f, "{} {}", *self as u16, text)
    }
}

/// A complete CGI response: header block and body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reply {
    status: HttpStatus,
    body: Vec<u8>,
    mime: String,
    extra_headers: Vec<String>,
}

impl Reply {
    /// A normal page. The web server supplies the 200 status.
    pub fn html(body: String) -> Self {
        Self {
            status: HttpStatus::Ok,
            body: body.into_bytes(),
            mime: "text/html".to_string(),
            ..Default::default()
        }
    }

    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: HttpStatus::BadRequest,
            body: msg.as_bytes().to_vec(),
            mime: "text/plain".to_string(),
            ..Default::default()
        }
    }

    pub fn internal_error(msg: &str) -> Self {
        Self {
            status: HttpStatus::InternalServerError,
            body: msg.as_bytes().to_vec(),
            mime: "text/plain".to_string(),
            ..Default::default()
        }
    }

    pub fn status(&self) -> HttpStatus {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status() == HttpStatus::Ok
    }

    pub fn add_header(&mut self, header: String) {
        self.extra_headers.push(header);
    }

    /// Serialize the header block, blank line and body.
    pub fn write_to(&self, f: &mut impl Write) -> ah::Result<()> {
        let mut head = format!("Content-Type: {}\n", self.mime);
        for header in &self.extra_headers {
            head.push_str(header);
            head.push('\n');
        }
        if !self.is_ok() {
            head.push_str(&format!("Status: {}\n", self.status));
        }
        head.push('\n');
        f.write_all(head.as_bytes()).context("Write reply header")?;
        f.write_all(&self.body).context("Write reply body")?;
        f.flush().context("Flush reply")
    }
}


// vim: ts=4 sw=4 expandtab
