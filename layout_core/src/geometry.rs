// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned geometry shared by the typesetter and decoration engine.

/// An axis-aligned rectangle in layout units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rect.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (`x + width`).
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// The bottom edge (`y + height`).
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }
}

/// A point in layout-unit space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

/// An accumulating axis-aligned bounding box.
///
/// Starts empty (no bounds); grows to cover every point or rect added to it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BBox {
    min: Option<Point>,
    max: Option<Point>,
}

impl BBox {
    /// An empty accumulator.
    pub const fn new() -> Self {
        Self { min: None, max: None }
    }

    /// Expands the box to cover `point`.
    pub fn add_point(&mut self, point: Point) {
        self.min = Some(match self.min {
            Some(min) => Point { x: min.x.min(point.x), y: min.y.min(point.y) },
            None => point,
        });
        self.max = Some(match self.max {
            Some(max) => Point { x: max.x.max(point.x), y: max.y.max(point.y) },
            None => point,
        });
    }

    /// Expands the box to cover `rect`.
    pub fn add_rect(&mut self, rect: Rect) {
        self.add_point(Point { x: rect.x, y: rect.y });
        self.add_point(Point { x: rect.max_x(), y: rect.max_y() });
    }

    /// Returns the accumulated rect, or `None` if nothing was ever added.
    pub fn to_rect(&self) -> Option<Rect> {
        let min = self.min?;
        let max = self.max?;
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

/// A single glyph's advance and offset, in font units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    /// Horizontal distance to the next glyph's origin.
    pub x_advance: f32,
    /// Vertical distance to the next glyph's origin (usually zero in horizontal text).
    pub y_advance: f32,
    /// Horizontal offset of the glyph outline from its origin.
    pub x_offset: f32,
    /// Vertical offset of the glyph outline from its origin.
    pub y_offset: f32,
}
