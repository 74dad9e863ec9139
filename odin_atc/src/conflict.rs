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

//! pairwise separation monitoring.
//!
//! A [`Conflict`] exists for every unordered pair of aircraft that came within the bounding box
//! of each other and has not yet separated beyond the maximum radius. Records do not hold
//! references to aircraft, the pool passes both aircraft into [`Conflict::update`] and applies
//! the returned [`ConflictUpdate`] (hit flags, queue removal, scored events)

use std::collections::BTreeMap;
use std::fmt;
use serde::Serialize;
use strum::{Display,EnumString};
use tracing::{info,warn};

use crate::SimContext;
use crate::aircraft::{Aircraft, AircraftId};
use crate::config::SeparationConfig;
use crate::vec2::{angle_difference, ray_intersection, RayIntersection};
use crate::units::nm_to_km;

/// order independent key of an aircraft pair
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize)]
pub struct PairKey (AircraftId, AircraftId);

impl PairKey {
    pub fn new (a: AircraftId, b: AircraftId)->Self {
        if a <= b { PairKey(a,b) } else { PairKey(b,a) }
    }

    #[inline] pub fn first (&self)->AircraftId { self.0 }
    #[inline] pub fn second (&self)->AircraftId { self.1 }

    pub fn contains (&self, id: AircraftId)->bool { self.0 == id || self.1 == id }

    pub fn other (&self, id: AircraftId)->Option<AircraftId> {
        if self.0 == id { Some(self.1) } else if self.1 == id { Some(self.0) } else { None }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Display,EnumString)]
#[serde(rename_all="camelCase")]
#[strum(serialize_all="camelCase")]
pub enum ConflictCheck {
    ProximityConflict,
    ProximityViolation,
    RunwayCollision,
}

/// what the pool has to do after a conflict update
#[derive(Debug,Clone,Copy,Default,PartialEq,Eq)]
pub struct ConflictUpdate {
    pub retire: bool,
    pub collision: bool,         // new collision, both aircraft are hit
    pub separation_loss: bool,   // proximity violation started
    pub runway_collision: bool,  // runway collision notice started
}

/// are the two aircraft within the bounding box of each other
pub fn in_bounding_box (a: &Aircraft, b: &Aircraft, cfg: &SeparationConfig)->bool {
    let half = nm_to_km( cfg.bounding_box_nm);
    let d = a.relative_position() - b.relative_position();
    d.x.abs() < half && d.y.abs() < half
}

#[derive(Debug,Clone,Serialize)]
pub struct Conflict {
    pub key: PairKey,
    pub callsigns: (String,String),
    pub distance: f64,       // lateral, km
    pub altitude: f64,       // vertical separation, ft
    pub distance_delta: f64, // km/s, positive if separating
    pub collided: bool,
    pub conflicts: BTreeMap<ConflictCheck,bool>,
    pub violations: BTreeMap<ConflictCheck,bool>,
}

impl Conflict {
    pub fn new (a: &Aircraft, b: &Aircraft)->Self {
        let (first, second) = if a.id <= b.id { (a,b) } else { (b,a) };
        Conflict {
            key: PairKey::new( a.id, b.id),
            callsigns: (first.callsign.clone(), second.callsign.clone()),
            distance: lateral_distance( a, b),
            altitude: (a.altitude - b.altitude).abs(),
            distance_delta: 0.0,
            collided: false,
            conflicts: BTreeMap::new(),
            violations: BTreeMap::new(),
        }
    }

    pub fn has_conflict (&self)->bool { self.conflicts.values().any(|v| *v) }
    pub fn has_violation (&self)->bool { self.violations.values().any(|v| *v) }

    pub fn is_conflict (&self, check: ConflictCheck)->bool { self.conflicts.get(&check).copied().unwrap_or(false) }
    pub fn is_violation (&self, check: ConflictCheck)->bool { self.violations.get(&check).copied().unwrap_or(false) }

    /// re-evaluate the pair. `duplicate` is set by the owner if this record is not the one the aircraft refer to
    pub fn update (&mut self, a: &Aircraft, b: &Aircraft, ctx: &SimContext, dt: f64, duplicate: bool)->ConflictUpdate {
        let cfg = &ctx.config.separation;
        let mut result = ConflictUpdate::default();

        let distance = lateral_distance( a, b);
        if dt > 0.0 {
            self.distance_delta = (distance - self.distance) / dt;
        }
        self.distance = distance;
        self.altitude = (a.altitude - b.altitude).abs();

        if duplicate || self.distance > cfg.max_radius_km {
            result.retire = true;
            return result
        }

        if self.collided {
            return result
        }

        if self.check_collision( a, b, ctx) {
            result.collision = true;
            return result
        }

        result.runway_collision = self.check_runway_collision( a, b, ctx);

        if !self.is_checked_for_proximity( a, b, ctx) {
            self.set_proximity_flags( false, false);
            return result
        }

        result.separation_loss = self.check_proximity( a, b, ctx);
        result
    }

    fn check_collision (&mut self, a: &Aircraft, b: &Aircraft, ctx: &SimContext)->bool {
        let cfg = &ctx.config.separation;
        let airport = &ctx.airport;

        if a.is_on_ground( airport) || b.is_on_ground( airport) { return false }
        if self.altitude >= cfg.collision_vertical_ft || self.distance >= cfg.collision_lateral_km { return false }
        if !airport.is_inside_airspace( &a.relative_position(), a.altitude) || !airport.is_inside_airspace( &b.relative_position(), b.altitude) {
            return false
        }

        self.collided = true;
        warn!("collision between {} and {}", a.callsign, b.callsign);
        true
    }

    /// departures and arrivals using opposite ends of the same runway. Returns true on the rising edge
    fn check_runway_collision (&mut self, a: &Aircraft, b: &Aircraft, ctx: &SimContext)->bool {
        let cfg = &ctx.config.separation;
        let was_set = self.is_conflict( ConflictCheck::RunwayCollision);

        let is_set = !a.is_taxiing() && !b.is_taxiing() && self.distance < cfg.runway_collision_km && {
            match (a.assigned_runway(), b.assigned_runway()) {
                (Some(ra), Some(rb)) => ctx.airport.is_opposite_end( ra, rb),
                _ => false
            }
        };

        self.conflicts.insert( ConflictCheck::RunwayCollision, is_set);
        if is_set && !was_set {
            info!("runway conflict between {} and {}", a.callsign, b.callsign);
        }
        is_set && !was_set
    }

    /// low aircraft and fresh departures are exempt
    fn is_checked_for_proximity (&self, a: &Aircraft, b: &Aircraft, ctx: &SimContext)->bool {
        let cfg = &ctx.config.separation;
        let floor = ctx.airport.elevation + cfg.min_check_agl_ft;
        let recent_takeoff = |ac: &Aircraft| ac.takeoff_time.map(|t| ctx.game_time - t < cfg.takeoff_grace_secs).unwrap_or(false);

        a.altitude >= floor && b.altitude >= floor && !recent_takeoff(a) && !recent_takeoff(b)
    }

    fn set_proximity_flags (&mut self, conflict: bool, violation: bool) {
        self.conflicts.insert( ConflictCheck::ProximityConflict, conflict);
        self.violations.insert( ConflictCheck::ProximityViolation, violation);
    }

    /// returns true if a violation started with this update
    fn check_proximity (&mut self, a: &Aircraft, b: &Aircraft, ctx: &SimContext)->bool {
        let cfg = &ctx.config.separation;
        let was_violation = self.is_violation( ConflictCheck::ProximityViolation);

        if self.altitude >= cfg.vertical_minimum_ft {
            self.set_proximity_flags( false, false);
            return false
        }

        let (minimum, exempt) = applicable_minimum( a, b, ctx);
        let mut violation = self.distance < minimum;
        let mut conflict = !exempt && self.distance < minimum + cfg.conflict_buffer_km;

        if (conflict || violation) && self.is_passing( a, b, cfg) {
            conflict = false;
            violation = false;
        }

        self.set_proximity_flags( conflict, violation);
        violation && !was_violation
    }

    /// aircraft that already passed each other or are diverging
    fn is_passing (&self, a: &Aircraft, b: &Aircraft, cfg: &SeparationConfig)->bool {
        let heading_diff = angle_difference( a.heading, b.heading).abs();
        if heading_diff < cfg.passing_min_angle_deg.to_radians() {
            return false // same direction, in trail
        }

        if heading_diff > cfg.head_on_angle_deg.to_radians() {
            self.distance_delta > 0.0
        } else {
            let pa = a.relative_position();
            let pb = b.relative_position();
            matches!( ray_intersection( &pa, a.ground_track, &pb, b.ground_track, cfg.convergence_tolerance_deg), RayIntersection::None)
        }
    }
}

/// lateral minimum (km) for the pair, and whether the pair is exempt from conflict notices.
/// Aircraft established on the localizers of parallel runways use the reduced minimum of the runway pair
pub fn applicable_minimum (a: &Aircraft, b: &Aircraft, ctx: &SimContext)->(f64,bool) {
    let cfg = &ctx.config.separation;
    let perf = &ctx.config.performance;
    let airport = &ctx.airport;

    let established = |ac: &Aircraft| ac.is_established_on_course( airport, perf.localizer_established_ft, perf.localizer_established_heading_deg);

    if let (Some(ra), Some(rb)) = (a.fms.arrival_runway, b.fms.arrival_runway) {
        if ra != rb && established(a) && established(b) {
            if let Some(rel) = airport.relationship( ra, rb) {
                if rel.parallel {
                    return (rel.separation_minimum_km(), true)
                }
            }
        }
    }

    (cfg.standard_minimum_km, false)
}

fn lateral_distance (a: &Aircraft, b: &Aircraft)->f64 {
    a.relative_position().distance_to( &b.relative_position())
}
