//! Scored shooting-target diagrams
//!
//! A [`Target`] draws the ring face when it is created, a marker for every
//! shot as it is added, and finally the results table and the mean point of
//! impact. All drawing goes through the [`render::Surface`] trait; the
//! default surface is a raster [`render::canvas::Canvas`].

pub mod assets;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod target;

pub use config::{OutputFormat, Rgba, TargetConfig, TargetKind};
pub use domain::{Precision, Score, Shot, ShotRecord, Tier};
pub use error::TargetError;
pub use target::{Layout, Target};
