// -*- coding: utf-8 -*-
//
// Request echo CGI
//
// Copyright (C) 2011-2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![forbid(unsafe_code)]

//! Diagnostic CGI that echoes GET query parameters
//! or POST form data back as an HTML page.

pub mod cgi;
pub mod page;
pub mod params;
pub mod reply;
pub mod request;

// vim: ts=4 sw=4 expandtab
