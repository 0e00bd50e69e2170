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

use anyhow::{self as ah, Context as _};
use clap::Parser;
use echo_cgi::{
    cgi::{Cgi, MAX_POST_BODY_LEN},
    request::ProcessEnv,
};
use echo_seccomp::{seccomp_compile, seccomp_install, Allow};
use std::{io, time::Instant};

#[derive(Parser, Debug, Clone)]
struct Opts {
    /// Maximum accepted POST body length, in bytes.
    #[arg(long, default_value_t = MAX_POST_BODY_LEN)]
    max_body_len: usize,

    /// Do not install the seccomp sandbox.
    #[arg(long, default_value = "false")]
    no_seccomp: bool,

    /// Report the processing time in a reply header.
    #[arg(long, default_value = "false")]
    debug: bool,
}

fn main() -> ah::Result<()> {
    let start_stamp = Instant::now();
    let opts = Opts::parse();

    // From here on we only read stdin and write stdout/stderr.
    if !opts.no_seccomp {
        let filter = seccomp_compile(&[Allow::Mmap, Allow::Read, Allow::Write, Allow::Futex])
            .context("Compile seccomp filter")?;
        seccomp_install(filter)?;
    }

    let mut cgi = Cgi::new(opts.max_body_len);
    if opts.debug {
        cgi = cgi.with_runtime_header(start_stamp);
    }
    cgi.run(&ProcessEnv, &mut io::stdin().lock(), &mut io::stdout().lock())
}

// vim: ts=4 sw=4 expandtab
