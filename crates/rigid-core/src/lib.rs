// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! rigid-core: deterministic math shared by the Rigid3D collision crates.
//!
//! Everything here is plain `f32` value math with no fused multiply-add, so
//! identical inputs give identical bits on every target. Higher-level
//! geometry (bounding boxes, shapes, ray casts) lives in `rigid-geom`.
#![forbid(unsafe_code)]

pub mod math;
