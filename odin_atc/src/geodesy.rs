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

//! great circle math on a spherical earth, plus parsers for the textual coordinate and
//! elevation formats used in airport configs

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize,Deserialize};

use crate::units::{EARTH_RADIUS_KM, EARTH_RADIUS_NM, m_to_ft};
use crate::vec2::normalize_radians;
use crate::errors::{Result, parse_error};

fn haversine_central_angle (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * a.sqrt().atan2( (1.0 - a).sqrt())
}

/// haversine distance in km (R = 6371km). Used for relative offsets and polygon math
pub fn great_circle_distance_km (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    EARTH_RADIUS_KM * haversine_central_angle( lat1, lon1, lat2, lon2)
}

/// haversine distance in nautical miles (R = 3440nm). Used for bearing/distance projections
pub fn great_circle_distance_nm (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    EARTH_RADIUS_NM * haversine_central_angle( lat1, lon1, lat2, lon2)
}

/// true initial bearing from point 1 to point 2 in radians [0,2π)
pub fn initial_bearing (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    normalize_radians( y.atan2(x))
}

/// direct geodetic problem: the point at `distance_nm` along true `bearing` (radians) from lat/lon.
/// Returns (lat,lon) in degrees
pub fn destination (lat: f64, lon: f64, bearing: f64, distance_nm: f64)->(f64,f64) {
    let delta = distance_nm / EARTH_RADIUS_NM;
    let phi1 = lat.to_radians();
    let lambda1 = lon.to_radians();

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * bearing.cos()).asin();
    let lambda2 = lambda1 + (bearing.sin() * delta.sin() * phi1.cos()).atan2( delta.cos() - phi1.sin() * phi2.sin());

    let lon2 = (lambda2.to_degrees() + 540.0) % 360.0 - 180.0;
    (phi2.to_degrees(), lon2)
}

/* #region textual formats *************************************************************************************/

lazy_static! {
    static ref CARDINAL_COORD: Regex = Regex::new(
        r"^([NSEW])\s*(\d+(?:\.\d+)?)(?:d(\d+(?:\.\d+)?))?(?:m(\d+(?:\.\d+)?))?$"
    ).unwrap();
}

/// parse a latitude or longitude given as `[NSEW]<deg>[d<min>][m<sec>]` (e.g. "N47d26m56.04")
/// or as signed decimal degrees (e.g. "-122.3092")
pub fn parse_coordinate (s: &str)->Result<f64> {
    let s = s.trim();
    if let Some(caps) = CARDINAL_COORD.captures(s) {
        let part = |i: usize|->Result<f64> {
            match caps.get(i) {
                Some(m) => m.as_str().parse::<f64>().map_err(|e| parse_error!("invalid coordinate component in '{}': {}", s, e)),
                None => Ok(0.0)
            }
        };
        let deg = part(2)? + part(3)? / 60.0 + part(4)? / 3600.0;
        match &caps[1] {
            "S" | "W" => Ok(-deg),
            _ => Ok(deg)
        }
    } else {
        s.parse::<f64>().map_err(|_| parse_error!("invalid coordinate '{}'", s))
    }
}

/// elevation as it can appear in configs
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(untagged)]
pub enum Elevation {
    Feet(f64),
    Text(String)
}

impl Elevation {
    /// value in feet. Strings can carry a `ft` or `m` suffix, or be `Infinity`
    pub fn feet (&self)->Result<f64> {
        match self {
            Elevation::Feet(ft) => Ok(*ft),
            Elevation::Text(s) => parse_elevation(s)
        }
    }
}

pub fn parse_elevation (s: &str)->Result<f64> {
    let s = s.trim();
    if s == "Infinity" {
        Ok(f64::INFINITY)
    } else if let Some(v) = s.strip_suffix("ft") {
        v.trim().parse::<f64>().map_err(|_| parse_error!("invalid elevation '{}'", s))
    } else if let Some(v) = s.strip_suffix("m") {
        let m = v.trim().parse::<f64>().map_err(|_| parse_error!("invalid elevation '{}'", s))?;
        Ok( m_to_ft(m))
    } else {
        s.parse::<f64>().map_err(|_| parse_error!("invalid elevation '{}'", s))
    }
}

/// a coordinate value that is either a number (decimal degrees) or a string in one of the
/// formats accepted by [`parse_coordinate`]
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(untagged)]
pub enum CoordValue {
    Degrees(f64),
    Text(String)
}

impl CoordValue {
    pub fn degrees (&self)->Result<f64> {
        match self {
            CoordValue::Degrees(d) => Ok(*d),
            CoordValue::Text(s) => parse_coordinate(s)
        }
    }
}

/// the `[latitude, longitude, elevation?]` list used in configs
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(try_from="Vec<CoordValue>", into="Vec<CoordValue>")]
pub struct LatLonSpec (pub CoordValue, pub CoordValue, pub Option<Elevation>);

impl TryFrom<Vec<CoordValue>> for LatLonSpec {
    type Error = String;

    fn try_from (v: Vec<CoordValue>)->std::result::Result<Self,String> {
        let mut it = v.into_iter();
        let lat = it.next().ok_or("missing latitude")?;
        let lon = it.next().ok_or("missing longitude")?;
        let elev = match it.next() {
            Some(CoordValue::Degrees(ft)) => Some( Elevation::Feet(ft)),
            Some(CoordValue::Text(s)) => Some( Elevation::Text(s)),
            None => None
        };
        if it.next().is_some() { return Err("too many position components".to_string()) }
        Ok( LatLonSpec( lat, lon, elev) )
    }
}

impl From<LatLonSpec> for Vec<CoordValue> {
    fn from (spec: LatLonSpec)->Self {
        let mut v = vec![spec.0, spec.1];
        match spec.2 {
            Some(Elevation::Feet(ft)) => v.push( CoordValue::Degrees(ft)),
            Some(Elevation::Text(s)) => v.push( CoordValue::Text(s)),
            None => {}
        }
        v
    }
}

impl LatLonSpec {
    pub fn from_degrees (lat: f64, lon: f64)->Self {
        LatLonSpec( CoordValue::Degrees(lat), CoordValue::Degrees(lon), None)
    }

    /// (lat, lon, elevation_ft) - elevation defaults to 0
    pub fn resolve (&self)->Result<(f64,f64,f64)> {
        let lat = self.0.degrees()?;
        let lon = self.1.degrees()?;
        if !(-90.0..=90.0).contains(&lat) { return Err( parse_error!("latitude out of range: {}", lat)) }
        if !(-180.0..=180.0).contains(&lon) { return Err( parse_error!("longitude out of range: {}", lon)) }
        let elev = match &self.2 {
            Some(e) => e.feet()?,
            None => 0.0
        };
        Ok( (lat, lon, elev) )
    }
}

/* #endregion textual formats */
