//! One render session: layout metrics, the shots and the surface they land on

use image::RgbaImage;
use log::{debug, info};

use crate::assets::Assets;
use crate::config::{BACKGROUND, CENTER_CROSS, OutputFormat, Rgba, TargetConfig, TargetKind};
use crate::domain::{
    DESIGN_WIDTH, DesignPoint, PixelRect, Precision, Shot, length_to_pixel, to_pixel,
};
use crate::error::TargetError;
use crate::render::Surface;
use crate::render::canvas::Canvas;
use crate::render::face::{self, Face};
use crate::render::geometry::{marker, page, table};
use crate::render::table::{TableLayout, draw_table};

/// Page metrics fixed at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Pixels per design unit
    pub scale: f64,
    /// Target center in design units
    pub midx: f64,
    pub midy: f64,
    /// Design y where the results table begins
    pub bottom: f64,
    /// Final canvas size in pixels
    pub width: u32,
    pub height: u32,
}

impl Layout {
    pub fn new(config: &TargetConfig) -> Self {
        let scale = f64::from(config.width) / DESIGN_WIDTH;
        let midx = f64::from(config.width / 2) / scale;
        let mut midy = f64::from(config.height / 2) / scale;

        let px = |length: f64| length_to_pixel(length, scale).max(0) as u32;
        let (cell_px, margin_px, headline_px) =
            (px(table::CELL), px(page::MARGIN), px(page::HEADLINE));

        let mut height = config.height;
        if config.kind.is_teiler_only() {
            height = height.saturating_add(cell_px + margin_px);
        } else if config.expected_shots > 0 {
            let rows = u32::try_from((config.expected_shots - 1) / table::COLUMNS + 2)
                .unwrap_or(u32::MAX);
            height = height
                .saturating_add(rows.saturating_mul(cell_px))
                .saturating_add(margin_px);
        }

        let mut bottom = 2.0 * midy;
        if config.headline().is_some() {
            height = height.saturating_add(headline_px + margin_px);
            bottom += page::HEADLINE + page::MARGIN;
            midy += page::HEADLINE + page::MARGIN;
        }

        Self {
            scale,
            midx,
            midy,
            bottom,
            width: config.width,
            height,
        }
    }

    pub fn center(&self) -> DesignPoint {
        DesignPoint::new(self.midx, self.midy)
    }
}

/// A target being drawn.
///
/// Shots are drawn as soon as they are added. The table and the center cross
/// summarize whatever shots exist at the time they are called, so call them
/// last.
pub struct Target<S: Surface = Canvas> {
    layout: Layout,
    kind: TargetKind,
    surface: S,
    shots: Vec<Shot>,
}

impl Target<Canvas> {
    /// Load assets, create the canvas and draw the empty target face
    pub fn new(config: &TargetConfig) -> Result<Self, TargetError> {
        let layout = Layout::new(config);
        let canvas = Canvas::new(layout.width, layout.height, BACKGROUND, config.transparent)?;
        let assets = Assets::load(config, layout.scale)?;
        Ok(Self::with_surface(
            config,
            canvas.with_font(assets.font),
            assets.logo.as_ref(),
        ))
    }

    /// End the session and encode the picture
    pub fn finish(self, format: OutputFormat) -> Result<Vec<u8>, TargetError> {
        info!(
            "Finishing target with {} shots as {}",
            self.shots.len(),
            format.extension()
        );
        self.surface.encode(format)
    }
}

impl<S: Surface> Target<S> {
    /// Draw the empty target face onto `surface`
    pub fn with_surface(config: &TargetConfig, mut surface: S, logo: Option<&RgbaImage>) -> Self {
        let layout = Layout::new(config);
        info!(
            "New {:?} target {}x{} px, scale {}",
            config.kind, layout.width, layout.height, layout.scale
        );
        debug!("{:?}", layout);

        if let Some(headline) = config.headline() {
            face::draw_headline(&mut surface, headline, layout.scale);
        }

        let face = Face {
            center: layout.center(),
            scale: layout.scale,
            background: BACKGROUND,
            ring: config.kind.ring_color(),
        };
        face.draw_rings(&mut surface);
        face.draw_labels(&mut surface);

        if let Some(logo) = logo {
            face::draw_logo(&mut surface, logo, layout.scale);
        }

        Self {
            layout,
            kind: config.kind,
            surface,
            shots: Vec::new(),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn is_teiler_only(&self) -> bool {
        self.kind.is_teiler_only()
    }

    /// Add a shot and draw its marker
    pub fn draw_shot(&mut self, shot: Shot) {
        let at = self.layout.center().offset(shot.x(), shot.y());
        let r = marker::SHOT_RADIUS;
        let bounds = PixelRect::from_design(at.offset(-r, -r), at.offset(r, r), self.layout.scale);
        debug!(
            "Shot {} at ({}, {}), teiler {:.1}",
            self.shots.len() + 1,
            shot.x(),
            shot.y(),
            shot.teiler()
        );
        self.surface.ellipse(bounds, Rgba::BLACK, Some(shot.color()));
        self.shots.push(shot);
    }

    /// Add a shot scored from its position
    pub fn draw_shot_by_coordinates(&mut self, x: f64, y: f64) {
        self.draw_shot(Shot::at(x, y));
    }

    /// Add a shot with externally measured teiler and value
    pub fn draw_shot_by_all_info(&mut self, x: f64, y: f64, teiler: f64, value: f64) {
        self.draw_shot(Shot::measured(x, y, teiler, value));
    }

    /// Mean point of impact relative to center, floored to whole design units
    pub fn mean_of_impact(&self) -> Option<DesignPoint> {
        if self.shots.is_empty() {
            return None;
        }
        let n = self.shots.len() as f64;
        let (sx, sy) = self
            .shots
            .iter()
            .fold((0.0, 0.0), |(sx, sy), s| (sx + s.x(), sy + s.y()));
        Some(DesignPoint::new((sx / n).floor(), (sy / n).floor()))
    }

    /// Mark the mean point of impact with a small cross
    pub fn draw_center(&mut self) {
        if self.is_teiler_only() {
            return;
        }
        let Some(mean) = self.mean_of_impact() else {
            return;
        };

        let at = self.layout.center().offset(mean.x, mean.y);
        let size = marker::CROSS_SIZE;
        let scale = self.layout.scale;
        self.surface.line(
            to_pixel(at.offset(-size, 0.0), scale),
            to_pixel(at.offset(size, 0.0), scale),
            CENTER_CROSS,
            marker::CROSS_WIDTH_PX,
        );
        self.surface.line(
            to_pixel(at.offset(0.0, -size), scale),
            to_pixel(at.offset(0.0, size), scale),
            CENTER_CROSS,
            marker::CROSS_WIDTH_PX,
        );
    }

    /// Draw the results table below the target face
    pub fn draw_table(&mut self, precision: Precision) {
        let Some(layout) = TableLayout::plan(&self.shots, self.is_teiler_only(), precision) else {
            debug!("No shots, teiler cell skipped");
            return;
        };
        let origin = DesignPoint::new(self.layout.midx - table::HALF_WIDTH, self.layout.bottom);
        draw_table(
            &mut self.surface,
            &layout,
            &self.shots,
            origin,
            self.layout.scale,
        );
    }
}
