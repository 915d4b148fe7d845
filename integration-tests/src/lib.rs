//! Cross-contract test support for the mutual insurance workspace.
//!
//! `fixtures` deploys and wires a full protocol instance around either
//! pricing engine generation; `comparison` drives two instances through
//! identical purchases and checks that their curve outputs agree.

pub mod comparison;
pub mod fixtures;
