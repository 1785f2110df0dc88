//! ninjacc core library.
//!
//! Translates a manifest of C and C++ targets into a Ninja build file. The
//! pipeline is: [`manifest`] loads the resolved configuration, [`variables`]
//! and [`rules`] form the preamble, [`ir`] lowers each target into build
//! edges, and [`ninja_gen`] writes everything out in a single pass driven by
//! [`runner`].

pub mod ast;
pub mod cli;
pub mod ir;
pub mod manifest;
pub mod ninja_gen;
pub mod rules;
pub mod runner;
pub mod target;
pub mod variables;
