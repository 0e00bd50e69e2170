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

//! Minimal seccomp sandbox for short lived CGI processes.
//!
//! A CGI process only needs to read its request from stdin,
//! allocate some memory and write the reply to stdout.
//! Everything else is denied.

use anyhow::{self as ah, Context as _};
use seccompiler::{apply_filter_all_threads, BpfProgram, SeccompAction, SeccompFilter};
use std::{collections::BTreeMap, env::consts::ARCH};

/// Syscall groups that can be allowed in addition to the base set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Allow {
    /// Heap growth beyond `brk`.
    Mmap,
    /// Reading from file descriptors.
    Read,
    /// Writing to file descriptors.
    Write,
    /// Uncontended and contended std locks.
    Futex,
}

/// A compiled BPF filter, ready to be installed.
pub struct Filter(BpfProgram);

#[cfg(test)]
impl Filter {
    /// Number of BPF instructions in the program.
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Syscalls every process needs to terminate cleanly.
const BASE_SYSCALLS: &[libc::c_long] = &[
    libc::SYS_brk,
    libc::SYS_close,
    libc::SYS_exit,
    libc::SYS_exit_group,
    libc::SYS_madvise,
    libc::SYS_munmap,
    libc::SYS_rt_sigprocmask,
    libc::SYS_rt_sigreturn,
    libc::SYS_sigaltstack,
];

fn syscalls_for(allow: Allow) -> &'static [libc::c_long] {
    match allow {
        Allow::Mmap => &[libc::SYS_mmap, libc::SYS_mremap, libc::SYS_munmap],
        Allow::Read => &[libc::SYS_read, libc::SYS_readv],
        Allow::Write => &[libc::SYS_write, libc::SYS_writev],
        Allow::Futex => &[libc::SYS_futex],
    }
}

/// Compile a filter that allows the base set plus `allow`
/// and kills the process on everything else.
pub fn seccomp_compile(allow: &[Allow]) -> ah::Result<Filter> {
    let rules: BTreeMap<_, _> = BASE_SYSCALLS
        .iter()
        .chain(allow.iter().flat_map(|a| syscalls_for(*a)))
        .map(|nr| (*nr, vec![]))
        .collect();

    let filter = SeccompFilter::new(
        rules,
        SeccompAction::KillProcess,
        SeccompAction::Allow,
        ARCH.try_into().context("Unsupported CPU ARCH")?,
    )
    .context("Create seccomp filter")?;

    let filter: BpfProgram = filter.try_into().context("Seccomp to BPF")?;

    Ok(Filter(filter))
}

/// Install the filter for all threads of the process.
/// There is no way back after this.
pub fn seccomp_install(filter: Filter) -> ah::Result<()> {
    apply_filter_all_threads(&filter.0).context("Apply seccomp filter")
}


// vim: ts=4 sw=4 expandtab
