// ============================================================================
// DIAL GEOMETRY
// ============================================================================
//
// Angles are degrees in the usual math convention (0° at three o'clock,
// counter-clockwise positive). The y axis is flipped when converting to
// viewport coordinates, so a decreasing angle travels clockwise on screen.

use crate::value::Value;

/// Where the track and the indicator both begin.
pub const TRACK_START_DEG: f64 = 240.0;
/// Where the track ends; the indicator reaches it at `Value::MAX`.
pub const TRACK_END_DEG: f64 = -60.0;
/// Angular travel per unit of value (300° over 100 units).
pub const DEGREES_PER_UNIT: f64 = 3.0;
/// End angles above this are drawn as the short arc.
///
/// Only correct for the fixed 300° track with its 60° gap at the bottom.
pub const LARGE_ARC_THRESHOLD_DEG: f64 = 60.0;
/// SVG sweep flag, constant for every arc the dial emits.
pub const SWEEP_FLAG: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Angle at which the indicator stops for `value`.
pub fn end_angle(value: Value) -> f64 {
    TRACK_START_DEG - DEGREES_PER_UNIT * f64::from(value)
}

/// Point on the circle around `center` at `degrees`.
pub fn degree_to_position(degrees: f64, center: Point, radius: f64) -> Point {
    let rad = degrees * std::f64::consts::PI / 180.0;
    Point {
        x: center.x + radius * rad.cos(),
        y: center.y - radius * rad.sin(),
    }
}

/// Angular range on a circle, traced clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub start_deg: f64,
    pub end_deg: f64,
    pub center: Point,
    pub radius: f64,
}

impl Arc {
    pub fn new(start_deg: f64, end_deg: f64, center: Point, radius: f64) -> Self {
        Self {
            start_deg,
            end_deg,
            center,
            radius,
        }
    }

    pub fn start_point(&self) -> Point {
        degree_to_position(self.start_deg, self.center, self.radius)
    }

    pub fn end_point(&self) -> Point {
        degree_to_position(self.end_deg, self.center, self.radius)
    }

    pub fn large_arc_flag(&self) -> u8 {
        if self.end_deg > LARGE_ARC_THRESHOLD_DEG {
            0
        } else {
            1
        }
    }

    /// Degrees covered going clockwise on screen from start to end.
    pub fn sweep_deg(&self) -> f64 {
        (self.start_deg - self.end_deg).rem_euclid(360.0)
    }

    /// SVG path data: a move to the start point, then one elliptical arc.
    pub fn to_path_data(&self) -> String {
        let begin = self.start_point();
        let end = self.end_point();
        format!(
            "M {} {} A {} {} 0 {} {} {} {}",
            format_number(begin.x),
            format_number(begin.y),
            format_number(self.radius),
            format_number(self.radius),
            self.large_arc_flag(),
            SWEEP_FLAG,
            format_number(end.x),
            format_number(end.y),
        )
    }
}

/// Shortest decimal that round-trips, with negative zero printed as `0`.
pub fn format_number(v: f64) -> String {
    format!("{}", v + 0.0)
}
