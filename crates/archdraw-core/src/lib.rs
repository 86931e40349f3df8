//! Archdraw Core Types and Drawing Primitives
//!
//! This crate provides the foundational types for describing and drawing a
//! static architecture diagram. It includes:
//!
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Canvas**: The logical drawing surface and its coordinate mapping ([`canvas::Canvas`])
//! - **Palette**: Named color categories referenced by a scene ([`palette::Palette`])
//! - **Scene**: The immutable list of draw commands for one diagram ([`scene`] module)
//! - **Draw**: SVG rendering of boxes, frames, arrows and labels ([`draw`] module)
//! - **Errors**: Geometry and palette contract violations ([`error`] module)

pub mod canvas;
pub mod color;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod scene;
