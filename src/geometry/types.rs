//! Data model for print areas and design placements.
//!
//! All types derive `Serialize + Deserialize` with camelCase field names so
//! the admin editor's JSON records deserialize directly. Validation of that
//! JSON is the editor's job; these types only carry it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use crate::config::{DEFAULT_PHYSICAL_HEIGHT_IN, DEFAULT_PHYSICAL_WIDTH_IN};
use crate::shape::{self, RefinementParams};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// A 2D point. Units depend on context (inches, editor pixels, mockup pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    #[inline]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    #[inline]
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        (len > f64::EPSILON).then(|| Point::new(self.x / len, self.y / len))
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned box in some pixel space.
///
/// Used for a print area in editor pixels and in raw mockup pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintAreaPixels {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation of the print area in degrees
    #[serde(default)]
    pub rotation_deg: f64,
}

impl PrintAreaPixels {
    /// Width / height, or 1 for a degenerate box.
    pub fn aspect_ratio(&self) -> f64 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// A design's bounds in pixel space, top-left anchored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation_deg: f64,
}

/// A design's transform in render-stage space: center anchored, radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTransform {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation_rad: f64,
}

/// Absolute placement of a design in raw mockup-image pixels.
///
/// This is what the compositor consumes: position and size within the
/// original mockup image, before any output scaling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockupPlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation_deg: f64,
    /// Optional clip outline in mockup pixels; the design is masked to it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_polygon: Option<Vec<Point>>,
}

// ============================================================================
// VIEWS
// ============================================================================

/// One physical side of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKey {
    #[default]
    Front,
    Back,
    Left,
    Right,
}

impl ViewKey {
    pub const ALL: [ViewKey; 4] = [ViewKey::Front, ViewKey::Back, ViewKey::Left, ViewKey::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKey::Front => "front",
            ViewKey::Back => "back",
            ViewKey::Left => "left",
            ViewKey::Right => "right",
        }
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "front" => Ok(ViewKey::Front),
            "back" => Ok(ViewKey::Back),
            "left" => Ok(ViewKey::Left),
            "right" => Ok(ViewKey::Right),
            other => Err(format!("Unknown view '{}'", other)),
        }
    }
}

// ============================================================================
// PRODUCT DATA
// ============================================================================

/// Real-world printable extents of a product, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalDimensions {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub length: Option<f64>,
}

impl Default for PhysicalDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_PHYSICAL_WIDTH_IN,
            height: DEFAULT_PHYSICAL_HEIGHT_IN,
            length: None,
        }
    }
}

impl PhysicalDimensions {
    /// True when both extents can serve as a divisor.
    pub fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// The given dimensions if usable, otherwise the 20x24in default.
    pub fn usable_or_default(physical: Option<&PhysicalDimensions>) -> PhysicalDimensions {
        match physical {
            Some(dims) if dims.is_usable() => *dims,
            Some(dims) => {
                log::warn!(
                    "Non-positive physical dimensions {}x{}, using default",
                    dims.width,
                    dims.height
                );
                PhysicalDimensions::default()
            }
            None => PhysicalDimensions::default(),
        }
    }
}

/// Outline kind of a placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Rectangle,
    Polygon,
}

/// An admin-defined print area on one product view, in inches.
///
/// For polygon placeholders, `render_polygon` is a cache derived from
/// `points` and `refinement`. Use [`Placeholder::set_points`] and
/// [`Placeholder::set_refinement`] (or call [`Placeholder::refresh_render_polygon`]
/// after editing fields directly) so it never goes stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    pub id: String,
    pub x_in: f64,
    pub y_in: f64,
    pub width_in: f64,
    pub height_in: f64,
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub lock_size: bool,
    #[serde(default)]
    pub shape_type: ShapeType,
    /// Outline in inches, polygon shapes only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
    #[serde(flatten)]
    pub refinement: RefinementParams,
    /// Smoothed outline derived from `points` and `refinement`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_polygon: Option<Vec<Point>>,
}

impl Placeholder {
    /// A rectangular placeholder.
    pub fn rect(id: impl Into<String>, x_in: f64, y_in: f64, width_in: f64, height_in: f64) -> Self {
        Self {
            id: id.into(),
            x_in,
            y_in,
            width_in: width_in.max(0.0),
            height_in: height_in.max(0.0),
            rotation_deg: 0.0,
            lock_size: false,
            shape_type: ShapeType::Rectangle,
            points: Vec::new(),
            refinement: RefinementParams::default(),
            render_polygon: None,
        }
    }

    /// A polygon placeholder whose bounding box is derived from its points.
    pub fn polygon(id: impl Into<String>, points: Vec<Point>, refinement: RefinementParams) -> Self {
        let mut placeholder = Self::rect(id, 0.0, 0.0, 0.0, 0.0);
        placeholder.shape_type = ShapeType::Polygon;
        placeholder.refinement = refinement;
        placeholder.set_points(points);
        placeholder
    }

    /// True for polygon placeholders with at least three points.
    pub fn is_valid_polygon(&self) -> bool {
        self.shape_type == ShapeType::Polygon && self.points.len() >= 3
    }

    /// Replace the outline, refit the bounding box and refresh the render polygon.
    pub fn set_points(&mut self, points: Vec<Point>) {
        if let Some((min, max)) = shape::bounding_box(&points) {
            self.x_in = min.x;
            self.y_in = min.y;
            self.width_in = max.x - min.x;
            self.height_in = max.y - min.y;
        }
        self.points = points;
        self.refresh_render_polygon();
    }

    /// Replace the refinement parameters and refresh the render polygon.
    pub fn set_refinement(&mut self, refinement: RefinementParams) {
        self.refinement = refinement;
        self.refresh_render_polygon();
    }

    /// Recompute the cached render polygon from the base points.
    ///
    /// Rectangles and invalid polygons carry no render polygon.
    pub fn refresh_render_polygon(&mut self) {
        self.render_polygon = if self.is_valid_polygon() {
            Some(shape::compute_refined_polygon_points(
                &self.points,
                &self.refinement,
            ))
        } else {
            None
        };
    }

    /// Outline in inches.
    ///
    /// Valid polygons are refined from `points` and `refinement` on every
    /// call, so a stale or missing `render_polygon` (as deserialized) never
    /// leaks out. Everything else yields the bounding box corners.
    pub fn outline(&self) -> Vec<Point> {
        if self.is_valid_polygon() {
            return shape::compute_refined_polygon_points(&self.points, &self.refinement);
        }
        vec![
            Point::new(self.x_in, self.y_in),
            Point::new(self.x_in + self.width_in, self.y_in),
            Point::new(self.x_in + self.width_in, self.y_in + self.height_in),
            Point::new(self.x_in, self.y_in + self.height_in),
        ]
    }
}

/// One physical view of a product: its mockup image and print areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    pub key: ViewKey,
    pub mockup_image_url: String,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

impl ViewConfig {
    /// Find a placeholder on this view by id.
    pub fn placeholder(&self, id: &str) -> Option<&Placeholder> {
        self.placeholders.iter().find(|p| p.id == id)
    }
}

/// Normalized position of a design within one placeholder.
///
/// `x`, `y`, `w`, `h` are fractions of the placeholder's bounding box.
/// Containment is not enforced on construction; call
/// [`clamp_placement`](super::clamp_placement) after a drag or resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignPlacement {
    pub view: ViewKey,
    pub placeholder_id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub rotation_deg: f64,
    /// Width / height of the design as uploaded (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_aspect_ratio: Option<f64>,
}

impl DesignPlacement {
    /// True when the placement lies entirely inside its placeholder.
    pub fn is_contained(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x + self.w <= 1.0 && self.y + self.h <= 1.0
    }
}
