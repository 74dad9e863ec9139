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

//! the flight phase state machine
//! ```text
//! APRON -> TAXI -> WAITING -> TAKEOFF -> CLIMB -> CRUISE <-> HOLD
//!                                               CRUISE -> DESCENT -> APPROACH -> LANDING
//! ```
//! APRON->TAXI and WAITING->TAKEOFF are controller clearances (see [`AircraftPool`](crate::pool::AircraftPool)),
//! all other transitions are guarded here. Holds preempt every airborne phase

use tracing::{debug,warn};

use crate::SimContext;
use crate::aircraft::{Aircraft, FlightPhase, HeadingMode, AltitudeMode, SpeedMode};
use crate::position::GeoPosition;
use crate::units::km_to_nm;

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct PhaseTransition {
    pub from: FlightPhase,
    pub to: FlightPhase,
}

/// evaluate the guards of the current phase and advance at most one step
pub fn update_phase (ac: &mut Aircraft, ctx: &SimContext)->Option<PhaseTransition> {
    let from = ac.phase;
    let to = next_phase( ac, ctx)?;

    enter_phase( ac, ctx, to);
    debug!("{} {} -> {}", ac.callsign, from, to);
    Some( PhaseTransition { from, to })
}

fn next_phase (ac: &Aircraft, ctx: &SimContext)->Option<FlightPhase> {
    let perf = &ctx.config.performance;

    if ac.phase.is_airborne_phase() && is_approaching_hold( ac, perf.hold_capture_distance_nm) {
        return Some( FlightPhase::Hold)
    }

    match ac.phase {
        FlightPhase::Taxi => {
            let elapsed = ac.taxi_start.map(|t| ctx.game_time - t).unwrap_or(0.0);
            (elapsed > perf.taxi_time_secs).then_some( FlightPhase::Waiting)
        }
        FlightPhase::Takeoff => {
            (ac.altitude - ac.ground_elevation( &ctx.airport) > perf.takeoff_turn_altitude_ft).then_some( FlightPhase::Climb)
        }
        // exact match, an aircraft that overshoots the planned altitude stays in CLIMB
        FlightPhase::Climb => (ac.altitude == ac.fms.flight_plan_altitude).then_some( FlightPhase::Cruise),
        FlightPhase::Cruise => (ac.altitude < ac.fms.flight_plan_altitude).then_some( FlightPhase::Descent),
        FlightPhase::Descent => ac.fms.approach_cleared.then_some( FlightPhase::Approach),
        FlightPhase::Approach => {
            let rwy = ac.fms.arrival_runway.and_then(|i| ctx.airport.runway(i))?;
            let dtg_nm = km_to_nm( rwy.distance_to_go( &ac.relative_position()));
            let inside_faf = (0.0..=rwy.faf_distance_nm( perf.default_faf_distance_nm)).contains( &dtg_nm);
            let established = ac.is_established_on_course( &ctx.airport, perf.localizer_established_ft, perf.localizer_established_heading_deg);
            (inside_faf && established).then_some( FlightPhase::Landing)
        }
        FlightPhase::Hold => (!ac.fms.is_holding_at_current()).then_some( FlightPhase::Cruise),
        _ => None
    }
}

/// holds are captured when flying LNAV towards a hold fix that is close
fn is_approaching_hold (ac: &Aircraft, capture_nm: f64)->bool {
    if ac.mcp.heading_mode != HeadingMode::Lnav { return false }
    match ac.fms.current_waypoint() {
        Some(wp) if wp.is_hold() => ac.position.distance_to( &wp.position) < capture_nm,
        _ => false
    }
}

fn enter_phase (ac: &mut Aircraft, ctx: &SimContext, to: FlightPhase) {
    match to {
        FlightPhase::Waiting => {
            match ac.fms.departure_runway.and_then(|i| ctx.airport.runway(i)) {
                Some(rwy) => { // line up on the threshold
                    ac.position.set_coord( rwy.position.coord());
                    ac.heading = rwy.angle;
                    ac.altitude = rwy.elevation;
                    ac.speed = 0.0;
                }
                None => warn!("{} finished taxiing without departure runway", ac.callsign)
            }
        }
        FlightPhase::Climb => arm_autopilot( ac),
        _ => {}
    }
    ac.phase = to;
}

/// hand over from takeoff to the autopilot
fn arm_autopilot (ac: &mut Aircraft) {
    if ac.fms.current_waypoint().is_some() {
        ac.mcp.heading_mode = HeadingMode::Lnav;
    } else {
        ac.mcp.heading_mode = HeadingMode::Hold;
        ac.mcp.heading = ac.heading;
    }
    ac.mcp.altitude_mode = AltitudeMode::Hold;
    ac.mcp.speed_mode = SpeedMode::Vnav;
}
