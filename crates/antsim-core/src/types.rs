//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Number of competing colonies in a world
pub const NUM_COLONIES: usize = 2;

/// Identifier of a colony, shared by its ants and pheromone marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColonyId(pub u8);

impl ColonyId {
    pub const ALL: [ColonyId; NUM_COLONIES] = [ColonyId(0), ColonyId(1)];

    /// Index into per-colony arrays
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ColonyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "colony-{}", self.0)
    }
}

/// 2D position or displacement in world units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians)
    pub fn from_angle(angle: f64) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        (other - *self).length()
    }

    /// Absolute bearing of this vector, `atan2(y, x)`
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Rotate counter-clockwise around the origin
    pub fn rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Apply toroidal wrapping for given world dimensions.
    ///
    /// A coordinate that left the `[0, width] x [0, height]` box reappears
    /// exactly on the opposite edge.
    pub fn wrap(&self, width: f64, height: f64) -> Self {
        Self {
            x: wrap_coordinate(self.x, width),
            y: wrap_coordinate(self.y, height),
        }
    }
}

fn wrap_coordinate(value: f64, extent: f64) -> f64 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Normalize an angle into `(-PI, PI]`
pub fn wrap_angle(angle: f64) -> f64 {
    let mut wrapped = angle % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Range plus angular field-of-view test shared by every perception query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisionCone {
    pub range: f64,
    /// Total field of view in radians
    pub angle: f64,
}

impl VisionCone {
    pub fn new(range: f64, angle: f64) -> Self {
        Self { range, angle }
    }

    pub fn range_squared(&self) -> f64 {
        self.range * self.range
    }

    /// Whether `target` is perceptible from `origin` while facing `heading`
    pub fn contains(&self, origin: Vec2, heading: f64, target: Vec2) -> bool {
        let delta = target - origin;
        if delta.length_squared() > self.range_squared() {
            return false;
        }

        let angle_diff = wrap_angle(delta.angle() - heading);
        angle_diff.abs() <= self.angle / 2.0
    }
}
