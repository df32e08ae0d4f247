//! Basketball court markings derived from the drawing-surface size.
//!
//! The court is vertical: one basket at the top baseline, one at the bottom.
//! Every dimension is a fraction of the surface size, so the layout scales
//! uniformly with the surface.

use crate::geometry;
use kurbo::{BezPath, Point, Rect, Size};

/// Key (painted zone) width as a fraction of court width.
const KEY_WIDTH_RATIO: f64 = 0.32;
/// Key depth as a fraction of court height.
const KEY_HEIGHT_RATIO: f64 = 0.18;
/// Free-throw circle radius as a fraction of key width.
const FREE_THROW_RATIO: f64 = 0.28;
/// Rim radius as a fraction of the shorter side.
const RIM_RATIO: f64 = 0.02;
/// Rim center distance from the baseline as a fraction of key depth.
const RIM_OFFSET_RATIO: f64 = 0.18;
/// Three-point radius as a fraction of key depth.
const THREE_POINT_RATIO: f64 = 1.3;
/// Center circle radius as a fraction of the shorter side.
const CENTER_CIRCLE_RATIO: f64 = 0.09;
/// Boundary corner radius as a fraction of the shorter side.
const CORNER_RATIO: f64 = 0.03;
/// Backboard length in rim radii.
const BACKBOARD_RIMS: f64 = 3.0;
/// Backboard distance behind the rim center, in rim radii.
const BACKBOARD_GAP_RIMS: f64 = 1.5;

/// Identifies a single court marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourtMarking {
    Boundary,
    Midline,
    CenterCircle,
    KeyTop,
    KeyBottom,
    FreeThrowTop,
    FreeThrowBottom,
    RimTop,
    RimBottom,
    BackboardTop,
    BackboardBottom,
    ThreePointTop,
    ThreePointBottom,
}

impl CourtMarking {
    pub const ALL: [CourtMarking; 13] = [
        CourtMarking::Boundary,
        CourtMarking::Midline,
        CourtMarking::CenterCircle,
        CourtMarking::KeyTop,
        CourtMarking::KeyBottom,
        CourtMarking::FreeThrowTop,
        CourtMarking::FreeThrowBottom,
        CourtMarking::RimTop,
        CourtMarking::RimBottom,
        CourtMarking::BackboardTop,
        CourtMarking::BackboardBottom,
        CourtMarking::ThreePointTop,
        CourtMarking::ThreePointBottom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CourtMarking::Boundary => "boundary",
            CourtMarking::Midline => "midline",
            CourtMarking::CenterCircle => "center-circle",
            CourtMarking::KeyTop => "key-top",
            CourtMarking::KeyBottom => "key-bottom",
            CourtMarking::FreeThrowTop => "free-throw-top",
            CourtMarking::FreeThrowBottom => "free-throw-bottom",
            CourtMarking::RimTop => "rim-top",
            CourtMarking::RimBottom => "rim-bottom",
            CourtMarking::BackboardTop => "backboard-top",
            CourtMarking::BackboardBottom => "backboard-bottom",
            CourtMarking::ThreePointTop => "three-point-top",
            CourtMarking::ThreePointBottom => "three-point-bottom",
        }
    }

    pub fn is_rim(self) -> bool {
        matches!(self, CourtMarking::RimTop | CourtMarking::RimBottom)
    }

    pub fn is_backboard(self) -> bool {
        matches!(self, CourtMarking::BackboardTop | CourtMarking::BackboardBottom)
    }
}

/// The full set of court markings for one surface size.
#[derive(Debug, Clone)]
pub struct CourtLayout {
    size: Size,
    boundary: BezPath,
    midline: BezPath,
    center_circle: BezPath,
    keys: [BezPath; 2],
    free_throws: [BezPath; 2],
    rims: [BezPath; 2],
    backboards: [BezPath; 2],
    three_points: [BezPath; 2],
}

/// Which basket a marking belongs to.
#[derive(Clone, Copy)]
enum End {
    Top,
    Bottom,
}

impl CourtLayout {
    /// Generate the layout, or `None` when either dimension is not positive.
    pub fn generate(size: Size) -> Option<Self> {
        let (w, h) = (size.width, size.height);
        if !(w > 0.0 && h > 0.0) {
            return None;
        }
        let short = w.min(h);
        let cx = w / 2.0;
        let cy = h / 2.0;
        let key_w = w * KEY_WIDTH_RATIO;
        let key_h = h * KEY_HEIGHT_RATIO;
        let rim_r = short * RIM_RATIO;

        let per_end = |end: End| {
            // Distance `d` from this end's baseline, measured into the court.
            let y = |d: f64| match end {
                End::Top => d,
                End::Bottom => h - d,
            };
            let key = geometry::rect(Rect::new(cx - key_w / 2.0, y(0.0), cx + key_w / 2.0, y(key_h)));
            let free_throw = geometry::circle(Point::new(cx, y(key_h)), key_w * FREE_THROW_RATIO);
            let rim_center = Point::new(cx, y(key_h * RIM_OFFSET_RATIO));
            let rim = geometry::circle(rim_center, rim_r);

            let bb_y = y(key_h * RIM_OFFSET_RATIO - rim_r * BACKBOARD_GAP_RIMS);
            let bb_half = rim_r * BACKBOARD_RIMS / 2.0;
            let backboard = geometry::straight_path(Point::new(cx - bb_half, bb_y), Point::new(cx + bb_half, bb_y));

            let three_point = three_point_arc(rim_center, key_h * THREE_POINT_RATIO, y(0.0), end);
            (key, free_throw, rim, backboard, three_point)
        };

        let (key_t, ft_t, rim_t, bb_t, tp_t) = per_end(End::Top);
        let (key_b, ft_b, rim_b, bb_b, tp_b) = per_end(End::Bottom);

        Some(Self {
            size,
            boundary: geometry::rounded_rect(Rect::new(0.0, 0.0, w, h), short * CORNER_RATIO),
            midline: geometry::straight_path(Point::new(0.0, cy), Point::new(w, cy)),
            center_circle: geometry::circle(Point::new(cx, cy), short * CENTER_CIRCLE_RATIO),
            keys: [key_t, key_b],
            free_throws: [ft_t, ft_b],
            rims: [rim_t, rim_b],
            backboards: [bb_t, bb_b],
            three_points: [tp_t, tp_b],
        })
    }

    /// Size the layout was generated for.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Path of a single marking.
    pub fn path(&self, marking: CourtMarking) -> &BezPath {
        match marking {
            CourtMarking::Boundary => &self.boundary,
            CourtMarking::Midline => &self.midline,
            CourtMarking::CenterCircle => &self.center_circle,
            CourtMarking::KeyTop => &self.keys[0],
            CourtMarking::KeyBottom => &self.keys[1],
            CourtMarking::FreeThrowTop => &self.free_throws[0],
            CourtMarking::FreeThrowBottom => &self.free_throws[1],
            CourtMarking::RimTop => &self.rims[0],
            CourtMarking::RimBottom => &self.rims[1],
            CourtMarking::BackboardTop => &self.backboards[0],
            CourtMarking::BackboardBottom => &self.backboards[1],
            CourtMarking::ThreePointTop => &self.three_points[0],
            CourtMarking::ThreePointBottom => &self.three_points[1],
        }
    }

    /// All markings in drawing order.
    pub fn markings(&self) -> impl Iterator<Item = (CourtMarking, &BezPath)> {
        CourtMarking::ALL.into_iter().map(move |m| (m, self.path(m)))
    }
}

/// Semicircle around the rim opening into the court, closed by two straight
/// side segments running back to the baseline at `baseline_y`.
fn three_point_arc(rim: Point, radius: f64, baseline_y: f64, end: End) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((rim.x - radius, baseline_y));
    path.line_to((rim.x - radius, rim.y));
    // Start at 180° and sweep through 90° (down) or 270° (up), into the court.
    let sweep = match end {
        End::Top => -180.0,
        End::Bottom => 180.0,
    };
    geometry::append_arc(&mut path, rim, radius, 180.0, sweep);
    path.line_to((rim.x + radius, baseline_y));
    path
}

/// Caches the layout, regenerating only when the surface size changes.
#[derive(Debug, Clone, Default)]
pub struct CourtCache {
    size: Option<Size>,
    layout: Option<CourtLayout>,
}

impl CourtCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout for `size`, regenerated if the size differs from the cached one.
    pub fn get(&mut self, size: Size) -> Option<&CourtLayout> {
        if self.size != Some(size) {
            log::debug!("Regenerating court layout for {}x{}", size.width, size.height);
            self.layout = CourtLayout::generate(size);
            self.size = Some(size);
        }
        self.layout.as_ref()
    }
}
