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

//! the simulated aircraft.
//!
//! Each tick an aircraft goes through three stages that live in their own modules:
//!   1. [`phase::update_phase`] advances the flight phase state machine (at most one step)
//!   2. [`autopilot::update_targets`] resolves phase, mode control panel and flight plan into a [`Target`]
//!   3. [`physics::update_physics`] moves the true state towards the target over the time step
//!
//! Aircraft never reference each other or the pool. Everything they need from their environment
//! comes in through the [`SimContext`](crate::SimContext)

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};
use serde::{Serialize,Deserialize};
use strum::{Display,EnumString};
use tracing::warn;

use crate::airport::Airport;
use crate::conflict::PairKey;
use crate::config::load_config;
use crate::position::{DynamicPosition, GeoPosition};
use crate::vec2::{Point2D, angle_difference};
use crate::units::km_to_ft;
use crate::errors::Result;

pub mod fms;
use fms::Fms;

pub mod autopilot;
pub mod physics;
pub mod phase;

/// height above ground elevation (ft) below which an airborne phase counts as on the ground
pub const ON_GROUND_TOLERANCE_FT: f64 = 5.0;

/// arena handle of an aircraft. Handles are never reused within a pool
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize)]
pub struct AircraftId(pub u64);

impl fmt::Display for AircraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all="lowercase")]
#[strum(serialize_all="lowercase")]
pub enum Category {
    Arrival,
    Departure
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum FlightPhase {
    Apron,
    Taxi,
    Waiting,
    Takeoff,
    Climb,
    Cruise,
    Hold,
    Descent,
    Approach,
    Landing
}

impl FlightPhase {
    pub fn is_ground_phase (&self)->bool {
        matches!( self, FlightPhase::Apron | FlightPhase::Taxi | FlightPhase::Waiting)
    }

    /// phases that can be preempted by a hold
    pub fn is_airborne_phase (&self)->bool {
        matches!( self, FlightPhase::Climb | FlightPhase::Cruise | FlightPhase::Descent | FlightPhase::Approach)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all="lowercase")]
#[strum(serialize_all="lowercase")]
pub enum TurnDirection {
    Left,
    Right
}

/* #region mode control panel ***********************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum HeadingMode {
    #[default] Off,
    Hold,
    Lnav,
    VorLoc
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum AltitudeMode {
    #[default] Off,
    Hold,
    Vnav,
    Approach
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum SpeedMode {
    #[default] Off,
    Hold,
    N1,
    Vnav
}

/// parse a mode name coming from outside the simulation. Unknown names fall back to `Off`,
/// which makes the autopilot keep the current value on that axis
pub fn parse_mode<M> (s: &str)->M where M: FromStr + Default {
    match M::from_str(s.trim()) {
        Ok(mode) => mode,
        Err(_) => {
            warn!("unknown autopilot mode '{}', falling back to OFF", s);
            M::default()
        }
    }
}

/// the mode control panel: what the crew has selected on each axis
#[derive(Debug,Clone,Default,Serialize)]
pub struct Mcp {
    pub heading_mode: HeadingMode,
    pub altitude_mode: AltitudeMode,
    pub speed_mode: SpeedMode,
    pub heading: f64,  // radians
    pub altitude: f64, // ft
    pub speed: f64,    // kt
    pub turn: Option<TurnDirection>,
    pub expedite: bool,
}

/* #endregion mode control panel */

/// what the physics integrator steers towards. Recomputed every tick
#[derive(Debug,Clone,Default,PartialEq,Serialize)]
pub struct Target {
    pub heading: f64,  // radians
    pub altitude: f64, // ft
    pub speed: f64,    // kt
    pub expedite: bool,
    pub turn: Option<TurnDirection>,
}

/* #region aircraft types ***************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all="lowercase")]
#[strum(serialize_all="lowercase")]
pub enum EngineKind {
    Jet,
    Turboprop,
    Piston
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct PerformanceRates {
    pub climb: f64,      // ft/min
    pub descent: f64,    // ft/min
    pub accelerate: f64, // kt/s
    pub decelerate: f64, // kt/s
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SpeedEnvelope {
    pub min: f64,
    pub landing: f64,
    pub cruise: f64,
    pub max: f64,
}

/// performance data of an aircraft type
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct AircraftType {
    pub icao: String,
    pub name: String,
    pub engine: EngineKind,
    pub ceiling: f64, // ft
    pub rate: PerformanceRates,
    pub speed: SpeedEnvelope,
}

impl AircraftType {
    /// climb rate (ft/min) that is still available at the service ceiling
    pub fn service_ceiling_climb_rate (&self)->f64 {
        match self.engine {
            EngineKind::Jet => 500.0,
            _ => 100.0
        }
    }
}

pub type AircraftTypes = HashMap<String,Arc<AircraftType>>;

pub fn load_aircraft_types (filename: &str)->Result<AircraftTypes> {
    let types: Vec<AircraftType> = load_config( filename)?;
    Ok( aircraft_types_from( types) )
}

pub fn aircraft_types_from (types: Vec<AircraftType>)->AircraftTypes {
    types.into_iter().map(|t| (t.icao.clone(), Arc::new(t))).collect()
}

/* #endregion aircraft types */

/* #region Aircraft *********************************************************************************************/

#[derive(Debug,Clone)]
pub struct Aircraft {
    pub id: AircraftId,
    pub callsign: String,
    pub airline: String,
    pub category: Category,
    pub model: Arc<AircraftType>,
    pub model_name: String,
    pub route: String,

    // true state
    pub position: DynamicPosition,
    pub heading: f64,      // magnetic, radians
    pub altitude: f64,     // ft
    pub speed: f64,        // indicated, kt
    pub ground_speed: f64, // kt
    pub ground_track: f64, // magnetic, radians

    pub phase: FlightPhase,
    pub target: Target,
    pub mcp: Mcp,
    pub fms: Fms,

    /// active conflicts, keyed by the callsign of the other aircraft
    pub conflicts: HashMap<String,PairKey>,

    pub hit: bool,
    pub takeoff_time: Option<f64>,
    pub taxi_start: Option<f64>,
}

impl Aircraft {
    #[inline] pub fn relative_position (&self)->Point2D { self.position.relative_position() }

    #[inline] pub fn is_arrival (&self)->bool { self.category == Category::Arrival }
    #[inline] pub fn is_departure (&self)->bool { self.category == Category::Departure }

    /// the runway this aircraft is using (departure runway for departures, arrival runway otherwise)
    pub fn assigned_runway (&self)->Option<usize> {
        match self.category {
            Category::Departure => self.fms.departure_runway,
            Category::Arrival => self.fms.arrival_runway
        }
    }

    /// elevation of the ground below (ft), the assigned runway if there is one
    pub fn ground_elevation (&self, airport: &Airport)->f64 {
        self.assigned_runway()
            .and_then(|i| airport.runway(i))
            .map(|r| r.elevation)
            .unwrap_or( airport.elevation)
    }

    pub fn is_on_ground (&self, airport: &Airport)->bool {
        self.phase.is_ground_phase() || (self.altitude - self.ground_elevation(airport)) < ON_GROUND_TOLERANCE_FT
    }

    /// still on the apron or taxiing to the runway
    pub fn is_taxiing (&self)->bool {
        matches!( self.phase, FlightPhase::Apron | FlightPhase::Taxi)
    }

    /// flying the localizer of the arrival runway within lateral and heading tolerances
    pub fn is_established_on_course (&self, airport: &Airport, lateral_ft: f64, heading_deg: f64)->bool {
        if self.mcp.heading_mode != HeadingMode::VorLoc { return false }
        let Some(rwy) = self.fms.arrival_runway.and_then(|i| airport.runway(i)) else { return false };

        let (lateral,_,_) = rwy.offset( &self.relative_position());
        km_to_ft( lateral.abs()) <= lateral_ft && angle_difference( self.heading, rwy.angle).abs() <= heading_deg.to_radians()
    }

    /// flying towards a waypoint under LNAV
    pub fn has_active_route (&self)->bool {
        self.mcp.heading_mode == HeadingMode::Lnav && self.fms.current_waypoint().is_some()
    }

    pub fn snapshot (&self)->KinematicState {
        let c = self.position.coord();
        KinematicState {
            callsign: self.callsign.clone(),
            phase: self.phase,
            heading: self.heading,
            altitude: self.altitude,
            speed: self.speed,
            ground_speed: self.ground_speed,
            ground_track: self.ground_track,
            lat: c.lat,
            lon: c.lon,
        }
    }
}

/// the serializable kinematic state of an aircraft
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct KinematicState {
    pub callsign: String,
    pub phase: FlightPhase,
    pub heading: f64,
    pub altitude: f64,
    pub speed: f64,
    pub ground_speed: f64,
    pub ground_track: f64,
    pub lat: f64,
    pub lon: f64,
}

/* #endregion Aircraft */
