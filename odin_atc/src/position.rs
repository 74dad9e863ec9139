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

//! geographic positions with an airport-relative planar offset.
//!
//! The offset is given in km east/north of a reference position (normally the airport reference
//! point) and is rotated into the magnetic frame, i.e. headings computed from offsets are
//! magnetic headings. Positions come in two flavors that share the [`GeoPosition`] trait:
//!   - [`StaticPosition`] computes its offset once (runway thresholds, fixes, airspace vertices)
//!   - [`DynamicPosition`] recomputes it on each access (aircraft, which move every tick)

use std::fmt;
use serde::{Serialize,Deserialize};

use crate::geodesy::{great_circle_distance_km, great_circle_distance_nm, initial_bearing, destination, LatLonSpec};
use crate::vec2::{Point2D, normalize_radians};
use crate::errors::Result;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoCoord {
    pub lat: f64, // degrees
    pub lon: f64  // degrees
}

impl GeoCoord {
    pub fn new (lat: f64, lon: f64)->Self { GeoCoord { lat, lon } }
}

impl fmt::Display for GeoCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6},{:.6}]", self.lat, self.lon)
    }
}

/// planar offset of `coord` from `reference` in km, rotated by `magnetic_north` (radians east).
/// North/south and east/west components are haversine distances along each axis (not a single
/// great circle distance that is decomposed afterwards)
pub fn calculate_relative_position (coord: &GeoCoord, reference: &GeoCoord, magnetic_north: f64)->Point2D {
    let ns = great_circle_distance_km( reference.lat, reference.lon, coord.lat, reference.lon);
    let ew = great_circle_distance_km( reference.lat, reference.lon, reference.lat, coord.lon);

    let x = if coord.lon < reference.lon { -ew } else { ew };
    let y = if coord.lat < reference.lat { -ns } else { ns };

    Point2D::new( x, y).rotate( magnetic_north)
}

/// what static and dynamic positions have in common
pub trait GeoPosition {
    fn coord (&self)->GeoCoord;
    fn elevation (&self)->f64; // ft
    fn magnetic_north (&self)->f64; // radians east

    /// km east/north of the reference in the magnetic frame, [0,0] without reference
    fn relative_position (&self)->Point2D;

    #[inline] fn latitude (&self)->f64 { self.coord().lat }
    #[inline] fn longitude (&self)->f64 { self.coord().lon }

    /// magnetic initial bearing (radians) from this position to `other`
    fn bearing_to (&self, other: &dyn GeoPosition)->f64 {
        let a = self.coord();
        let b = other.coord();
        normalize_radians( initial_bearing( a.lat, a.lon, b.lat, b.lon) - self.magnetic_north())
    }

    /// magnetic initial bearing (radians) from `other` to this position
    fn bearing_from (&self, other: &dyn GeoPosition)->f64 {
        let a = other.coord();
        let b = self.coord();
        normalize_radians( initial_bearing( a.lat, a.lon, b.lat, b.lon) - self.magnetic_north())
    }

    /// great circle distance in nm
    fn distance_to (&self, other: &dyn GeoPosition)->f64 {
        let a = self.coord();
        let b = other.coord();
        great_circle_distance_nm( a.lat, a.lon, b.lat, b.lon)
    }

    /// the coordinate at magnetic `bearing` (radians) and `distance_nm` from here.
    /// This is the inverse of bearing_to/distance_to
    fn generate_position_from_bearing_and_distance (&self, bearing: f64, distance_nm: f64)->GeoCoord {
        let c = self.coord();
        let (lat,lon) = destination( c.lat, c.lon, bearing + self.magnetic_north(), distance_nm);
        GeoCoord::new( lat, lon)
    }
}

/* #region StaticPosition **************************************************************************************/

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct StaticPosition {
    coord: GeoCoord,
    elevation: f64,
    reference: Option<GeoCoord>,
    magnetic_north: f64,
    relative: Point2D,
}

impl StaticPosition {
    pub fn new (coord: GeoCoord, elevation: f64, reference: Option<GeoCoord>, magnetic_north: f64)->Self {
        let relative = match &reference {
            Some(r) => calculate_relative_position( &coord, r, magnetic_north),
            None => Point2D::ORIGIN
        };
        StaticPosition { coord, elevation, reference, magnetic_north, relative }
    }

    pub fn from_spec (spec: &LatLonSpec, reference: Option<GeoCoord>, magnetic_north: f64)->Result<Self> {
        let (lat,lon,elev) = spec.resolve()?;
        Ok( StaticPosition::new( GeoCoord::new(lat,lon), elev, reference, magnetic_north) )
    }

    pub fn reference (&self)->Option<GeoCoord> { self.reference }
}

impl GeoPosition for StaticPosition {
    fn coord (&self)->GeoCoord { self.coord }
    fn elevation (&self)->f64 { self.elevation }
    fn magnetic_north (&self)->f64 { self.magnetic_north }
    fn relative_position (&self)->Point2D { self.relative }
}

/* #endregion StaticPosition */

/* #region DynamicPosition *************************************************************************************/

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct DynamicPosition {
    coord: GeoCoord,
    elevation: f64,
    reference: Option<GeoCoord>,
    magnetic_north: f64,
}

impl DynamicPosition {
    pub fn new (coord: GeoCoord, elevation: f64, reference: Option<GeoCoord>, magnetic_north: f64)->Self {
        DynamicPosition { coord, elevation, reference, magnetic_north }
    }

    /// a dynamic position at the same place and in the same frame as `pos`
    pub fn from_position (pos: &StaticPosition)->Self {
        DynamicPosition::new( pos.coord, pos.elevation, pos.reference, pos.magnetic_north)
    }

    pub fn set_coord (&mut self, coord: GeoCoord) { self.coord = coord }

    pub fn set_reference (&mut self, reference: Option<GeoCoord>) { self.reference = reference }

    /// move along magnetic `bearing` by `distance_nm`
    pub fn set_coordinates_by_bearing_and_distance (&mut self, bearing: f64, distance_nm: f64) {
        if distance_nm != 0.0 { // projecting a zero distance is not bit-exact
            self.coord = self.generate_position_from_bearing_and_distance( bearing, distance_nm);
        }
    }
}

impl GeoPosition for DynamicPosition {
    fn coord (&self)->GeoCoord { self.coord }
    fn elevation (&self)->f64 { self.elevation }
    fn magnetic_north (&self)->f64 { self.magnetic_north }

    fn relative_position (&self)->Point2D {
        match &self.reference {
            Some(r) => calculate_relative_position( &self.coord, r, self.magnetic_north),
            None => Point2D::ORIGIN
        }
    }
}

/* #endregion DynamicPosition */
