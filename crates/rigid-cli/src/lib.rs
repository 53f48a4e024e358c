// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `rigid-probe`: loads a JSON probe scene of convex meshes, placed objects
//! and rays, then validates it, reports world bounds, or casts the rays.
//!
//! # Usage
//! ```text
//! rigid-probe --scene scene.json check
//! rigid-probe --scene scene.json bounds --format json
//! rigid-probe --scene scene.json cast --log-level rigid_geom=debug
//! ```
//!
//! Exits with code `0` on success and non-zero with an error chain on stderr.
#![forbid(unsafe_code)]

pub mod cli;
pub mod report;
pub mod scene;
