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

//! flight management: the resolved route of an aircraft and the cursor into it

use serde::{Serialize,Deserialize};

use crate::airport::Airport;
use crate::aircraft::TurnDirection;
use crate::position::StaticPosition;
use crate::units::SECONDS_PER_MINUTE;
use crate::vec2::normalize_radians;
use crate::errors::{OdinAtcError, Result};

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub enum AltitudeRestriction {
    At(f64),
    AtOrAbove(f64),
    AtOrBelow(f64),
}

impl AltitudeRestriction {
    /// apply to a planned altitude
    pub fn apply (&self, altitude: f64)->f64 {
        match self {
            AltitudeRestriction::At(a) => *a,
            AltitudeRestriction::AtOrAbove(a) => altitude.max(*a),
            AltitudeRestriction::AtOrBelow(a) => altitude.min(*a),
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub enum LegLength {
    Minutes(f64),
    Nm(f64),
}

impl LegLength {
    /// outbound leg duration at `ground_speed` kt
    pub fn seconds (&self, ground_speed: f64)->f64 {
        match self {
            LegLength::Minutes(m) => m * SECONDS_PER_MINUTE,
            LegLength::Nm(nm) => {
                if ground_speed > 0.0 { nm / ground_speed * 3600.0 } else { SECONDS_PER_MINUTE }
            }
        }
    }
}

impl Default for LegLength {
    fn default()->Self { LegLength::Minutes(1.0) }
}

#[derive(Debug,Clone,Serialize)]
pub struct HoldParameters {
    pub inbound: Option<f64>, // radians, set on entry if not given
    pub turn: TurnDirection,
    pub leg: LegLength,
}

/// runtime state of a holding pattern
#[derive(Debug,Clone,Default,Serialize)]
pub struct HoldState {
    pub established: bool,
    pub timer: Option<f64>, // game time at which the outbound leg ends
}

#[derive(Debug,Clone,Serialize)]
pub struct Waypoint {
    pub name: String,
    pub position: StaticPosition,
    pub altitude: Option<AltitudeRestriction>,
    pub speed: Option<f64>,
    pub fly_over: bool,
    pub hold: Option<HoldParameters>,
    pub hold_state: HoldState,
}

impl Waypoint {
    pub fn new (name: &str, position: StaticPosition)->Self {
        Waypoint {
            name: name.to_string(),
            position,
            altitude: None,
            speed: None,
            fly_over: false,
            hold: None,
            hold_state: HoldState::default(),
        }
    }

    #[inline] pub fn is_hold (&self)->bool { self.hold.is_some() }
}

/* #region waypoint input ***************************************************************************************/

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct HoldSpec {
    #[serde(default)]
    pub inbound_deg: Option<f64>,
    #[serde(default="default_hold_turn")]
    pub turn: TurnDirection,
    #[serde(default)]
    pub leg: LegLength,
}

fn default_hold_turn ()->TurnDirection { TurnDirection::Right }

impl HoldSpec {
    pub fn to_parameters (&self)->HoldParameters {
        HoldParameters { inbound: self.inbound_deg.map(|d| normalize_radians( d.to_radians())), turn: self.turn, leg: self.leg }
    }
}

/// a route entry as it comes in with a spawn descriptor, referring to a named fix
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct WaypointSpec {
    pub fix: String,
    #[serde(default)]
    pub altitude: Option<AltitudeRestriction>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub fly_over: bool,
    #[serde(default)]
    pub hold: Option<HoldSpec>,
}

impl WaypointSpec {
    pub fn resolve (&self, airport: &Airport)->Result<Waypoint> {
        let position = airport.fix( &self.fix).ok_or_else(|| OdinAtcError::UnknownFix( self.fix.clone()))?;
        let mut wp = Waypoint::new( &self.fix, position.clone());
        wp.altitude = self.altitude;
        wp.speed = self.speed;
        wp.fly_over = self.fly_over;
        wp.hold = self.hold.as_ref().map(|h| h.to_parameters());
        Ok(wp)
    }
}

/* #endregion waypoint input */

#[derive(Debug,Clone,Default,Serialize)]
pub struct Fms {
    pub waypoints: Vec<Waypoint>,
    pub current: usize,
    pub flight_plan_altitude: f64,
    pub departure_runway: Option<usize>,
    pub arrival_runway: Option<usize>,
    pub approach_cleared: bool,
}

impl Fms {
    pub fn current_waypoint (&self)->Option<&Waypoint> { self.waypoints.get( self.current) }

    pub fn current_waypoint_mut (&mut self)->Option<&mut Waypoint> { self.waypoints.get_mut( self.current) }

    pub fn next_waypoint (&self)->Option<&Waypoint> { self.waypoints.get( self.current + 1) }

    pub fn is_last_waypoint (&self)->bool { self.current + 1 >= self.waypoints.len() }

    pub fn is_holding_at_current (&self)->bool {
        self.current_waypoint().map( |wp| wp.is_hold()).unwrap_or(false)
    }

    /// move the cursor past the current waypoint. Returns false if there was none
    pub fn advance (&mut self)->bool {
        if self.current < self.waypoints.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// continue at a fix of the route, or replace the remaining route with it
    pub fn direct_to (&mut self, wp: Waypoint) {
        if let Some(idx) = self.waypoints.iter().skip( self.current).position(|w| w.name == wp.name) {
            self.current += idx;
        } else {
            self.waypoints.truncate( self.current);
            self.waypoints.push( wp);
        }
    }

    /// hold at `wp`, which becomes the current waypoint
    pub fn hold_at (&mut self, wp: Waypoint, hold: HoldParameters) {
        self.direct_to( wp);
        if let Some(cur) = self.current_waypoint_mut() {
            cur.hold = Some(hold);
            cur.hold_state = HoldState::default();
        }
    }

    /// leave the hold at the current waypoint and continue with the route
    pub fn exit_hold (&mut self)->bool {
        if let Some(cur) = self.current_waypoint_mut() {
            if cur.hold.take().is_some() {
                cur.hold_state = HoldState::default();
                self.advance();
                return true
            }
        }
        false
    }
}
