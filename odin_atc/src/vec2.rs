/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

//! planar vector algebra on airport-relative coordinates.
//!
//! All angles in here follow the aviation convention: radians, clockwise from north, i.e. a
//! heading of 0 points along +y and a heading of π/2 points along +x. This is why [`radial_angle`]
//! is `atan2(x,y)` and not `atan2(y,x)` - everything that computes bearings from vectors depends on it

use std::{fmt, ops};
use std::f64::consts::{PI,TAU};
use serde::{Serialize,Deserialize};
use tracing::warn;

/* #region Point2D ***********************************************************************************************/

/// a point or vector in the airport-relative frame, x = km east, y = km north
#[derive(Debug,Clone,Copy,PartialEq,Default,Serialize,Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    #[inline] pub const fn new (x: f64, y: f64)->Self { Point2D { x, y } }

    /// unit vector for a clockwise-from-north angle
    #[inline] pub fn from_heading (hdg: f64)->Self { Point2D { x: hdg.sin(), y: hdg.cos() } }

    #[inline] pub fn length (&self)->f64 { self.x.hypot(self.y) }
    #[inline] pub fn dot (&self, other: &Point2D)->f64 { self.x*other.x + self.y*other.y }
    #[inline] pub fn cross (&self, other: &Point2D)->f64 { self.x*other.y - self.y*other.x }
    #[inline] pub fn scale (&self, k: f64)->Point2D { Point2D::new( self.x*k, self.y*k) }
    #[inline] pub fn distance_to (&self, other: &Point2D)->f64 { (*other - *self).length() }

    /// clockwise-from-north angle of this vector
    #[inline] pub fn radial (&self)->f64 { radial_angle(self) }

    /// counter-clockwise rotation by `theta` radians (standard math orientation)
    pub fn rotate (&self, theta: f64)->Point2D {
        let (s,c) = theta.sin_cos();
        Point2D::new( self.x*c - self.y*s, self.x*s + self.y*c)
    }

    #[inline] pub fn is_finite (&self)->bool { self.x.is_finite() && self.y.is_finite() }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3},{:.3}]", self.x, self.y)
    }
}

impl ops::Add for Point2D {
    type Output = Point2D;
    fn add (self, rhs: Point2D)->Point2D { Point2D::new( self.x + rhs.x, self.y + rhs.y) }
}

impl ops::Sub for Point2D {
    type Output = Point2D;
    fn sub (self, rhs: Point2D)->Point2D { Point2D::new( self.x - rhs.x, self.y - rhs.y) }
}

impl ops::Mul<f64> for Point2D {
    type Output = Point2D;
    fn mul (self, k: f64)->Point2D { self.scale(k) }
}

impl ops::Neg for Point2D {
    type Output = Point2D;
    fn neg (self)->Point2D { Point2D::new( -self.x, -self.y) }
}

impl From<[f64;2]> for Point2D {
    fn from (a: [f64;2])->Self { Point2D::new( a[0], a[1]) }
}

impl From<Point2D> for [f64;2] {
    fn from (p: Point2D)->Self { [p.x, p.y] }
}

/* #endregion Point2D */

/* #region n-dimensional tuple ops ****************************************************************************/

// these operate on arbitrary dimension tuples as they come in from outside of the simulation.
// Dimension mismatches are reported but do not abort the frame

pub fn vector_length (v: &[f64])->f64 {
    v.iter().map(|x| x*x).sum::<f64>().sqrt()
}

fn zip_with (op: &str, v1: &[f64], v2: &[f64], f: impl Fn(f64,f64)->f64)->Option<Vec<f64>> {
    if v1.len() != v2.len() {
        warn!("{op}: dimension mismatch {} != {}", v1.len(), v2.len());
        None
    } else if v1.iter().chain(v2.iter()).any(|x| !x.is_finite()) {
        warn!("{op}: non-finite input {:?} {:?}", v1, v2);
        None
    } else {
        Some( v1.iter().zip(v2.iter()).map(|(a,b)| f(*a,*b)).collect())
    }
}

pub fn add (v1: &[f64], v2: &[f64])->Option<Vec<f64>> { zip_with( "add", v1, v2, |a,b| a + b) }

pub fn subtract (v1: &[f64], v2: &[f64])->Option<Vec<f64>> { zip_with( "subtract", v1, v2, |a,b| a - b) }

pub fn scale (v: &[f64], k: f64)->Option<Vec<f64>> {
    if !k.is_finite() {
        warn!("scale: non-finite factor {k}");
        None
    } else {
        Some( v.iter().map(|x| x*k).collect())
    }
}

/* #endregion n-dimensional tuple ops */

/* #region angles **********************************************************************************************/

/// clockwise-from-north angle of a vector, in [-π,π]
#[inline]
pub fn radial_angle (v: &Point2D)->f64 { v.x.atan2(v.y) }

/// normalize to [0,2π)
#[inline]
pub fn normalize_radians (a: f64)->f64 {
    let x = a % TAU;
    if x < 0.0 { x + TAU } else { x }
}

/// signed difference a - b, normalized to (-π,π]
pub fn angle_difference (a: f64, b: f64)->f64 {
    let mut d = (a - b) % TAU;
    if d <= -PI { d += TAU }
    else if d > PI { d -= TAU }
    d
}

/* #endregion angles */

/* #region ray intersection ************************************************************************************/

/// result of intersecting two forward rays
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum RayIntersection {
    /// both rays reach this point moving forward
    Point(Point2D),
    /// (nearly) parallel and on the same line
    Collinear,
    /// parallel but offset, or the lines cross behind at least one of the origins
    None
}

impl RayIntersection {
    pub fn point (&self)->Option<Point2D> {
        if let RayIntersection::Point(p) = self { Some(*p) } else { None }
    }
}

/// lateral distance (km) below which two near-parallel rays count as collinear
const COLLINEAR_TOLERANCE: f64 = 0.001;

/// intersect the rays `pos1 + t·dir1` and `pos2 + s·dir2` (t,s ≥ 0), directions given as headings.
/// Lines whose directions differ by less than `tolerance_deg` (or lie within that much of being
/// opposite) are treated as parallel to avoid the near-zero denominator
pub fn ray_intersection (pos1: &Point2D, dir1: f64, pos2: &Point2D, dir2: f64, tolerance_deg: f64)->RayIntersection {
    let d1 = Point2D::from_heading( dir1);
    let d2 = Point2D::from_heading( dir2);
    let tol = tolerance_deg.to_radians();
    let diff = angle_difference( dir1, dir2).abs();

    if diff < tol || (PI - diff) < tol {
        let offset = *pos2 - *pos1;
        return if d1.cross( &offset).abs() < COLLINEAR_TOLERANCE { RayIntersection::Collinear } else { RayIntersection::None }
    }

    let denom = d1.cross( &d2);
    let offset = *pos2 - *pos1;
    let t = offset.cross( &d2) / denom;
    let s = offset.cross( &d1) / denom;

    if t >= 0.0 && s >= 0.0 {
        RayIntersection::Point( *pos1 + d1 * t)
    } else {
        RayIntersection::None
    }
}

/* #endregion ray intersection */

/* #region polygons ********************************************************************************************/

/// even-odd rule ray casting. The vertex list is implicitly closed
pub fn point_in_polygon (p: &Point2D, vertices: &[Point2D])->bool {
    let n = vertices.len();
    if n < 3 { return false }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = &vertices[i];
        let vj = &vertices[j];
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_cross { inside = !inside }
        }
        j = i;
    }
    inside
}

/// distance from `p` to the closest point on the segment `a`-`b`
pub fn distance_to_segment (p: &Point2D, a: &Point2D, b: &Point2D)->f64 {
    let edge = *b - *a;
    let len2 = edge.dot( &edge);
    if len2 == 0.0 { return p.distance_to(a) } // degenerate edge

    // project onto the directed edge - outside of [0,1] the closest feature is a vertex
    let t = (*p - *a).dot( &edge) / len2;
    if t <= 0.0 {
        p.distance_to(a)
    } else if t >= 1.0 {
        p.distance_to(b)
    } else {
        (*p - *a).cross( &edge).abs() / len2.sqrt()
    }
}

/// minimum distance from `p` to any edge of the (implicitly closed) polygon
pub fn distance_to_polygon (p: &Point2D, vertices: &[Point2D])->f64 {
    match vertices.len() {
        0 => {
            warn!("distance_to_polygon: empty polygon");
            f64::INFINITY
        }
        1 => p.distance_to( &vertices[0]),
        n => {
            let mut d_min = f64::INFINITY;
            for i in 0..n {
                let d = distance_to_segment( p, &vertices[i], &vertices[(i+1) % n]);
                if d < d_min { d_min = d }
            }
            d_min
        }
    }
}

/* #endregion polygons */

/// position of `p` relative to a course line through `datum` with heading `course`:
/// (lateral offset - positive right of course, along-course distance - positive ahead of datum, total distance)
pub fn course_offset (p: &Point2D, datum: &Point2D, course: f64)->(f64,f64,f64) {
    let v = *p - *datum;
    let (s,c) = course.sin_cos();
    let lateral = v.x * c - v.y * s;
    let along = v.x * s + v.y * c;
    (lateral, along, v.length())
}
