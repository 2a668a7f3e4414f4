// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Find repositories on a Git server by approximate name.
//!
//! Users rarely remember the exact name of a repository, let alone its exact
//! case. Given whatever they typed, reposcout either points them at the
//! repository they meant, or tells them which repositories come close.
//!
//! # See Also
//!
//! 1. [`resolve`] for the name resolution engine.
//! 2. [`store`] for the repository store layout.

pub mod config;
pub mod path;
pub mod report;
pub mod resolve;
pub mod store;
