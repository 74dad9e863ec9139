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

//! unit conversions and earth constants used throughout the simulation.
//! The simulation state itself is kept in plain f64 values (ft, kt, km, nm, radians) since it is
//! integrated many times per second - conversions go through [uom](https://docs.rs/uom/latest/uom/)
//! so that we don't have to maintain our own conversion factors

use uom::si::f64::{Length,Velocity};
use uom::si::length::{foot,meter,kilometer,nautical_mile};
use uom::si::velocity::{knot,meter_per_second};

/// mean earth radius used for relative (planar) offsets and polygon math
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// earth radius used for bearing/distance projections.
/// Note this is NOT derived from EARTH_RADIUS_KM - both values are used as-is by their call sites
pub const EARTH_RADIUS_NM: f64 = 3440.0;

/// standard gravity in m/s²
pub const G: f64 = 9.81;

pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;

#[inline] pub fn km_to_nm (km: f64)->f64 { Length::new::<kilometer>(km).get::<nautical_mile>() }
#[inline] pub fn nm_to_km (nm: f64)->f64 { Length::new::<nautical_mile>(nm).get::<kilometer>() }
#[inline] pub fn km_to_ft (km: f64)->f64 { Length::new::<kilometer>(km).get::<foot>() }
#[inline] pub fn ft_to_km (ft: f64)->f64 { Length::new::<foot>(ft).get::<kilometer>() }
#[inline] pub fn m_to_ft (m: f64)->f64 { Length::new::<meter>(m).get::<foot>() }
#[inline] pub fn nm_to_ft (nm: f64)->f64 { Length::new::<nautical_mile>(nm).get::<foot>() }

#[inline] pub fn kt_to_mps (kt: f64)->f64 { Velocity::new::<knot>(kt).get::<meter_per_second>() }

/// distance in nm covered at `kt` knots during `secs` seconds
#[inline] pub fn nm_travelled (kt: f64, secs: f64)->f64 { kt * secs / SECONDS_PER_HOUR }
