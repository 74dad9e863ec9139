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

//! target calculation: flight phase + mode control panel + flight plan -> [`Target`]

use std::f64::consts::PI;
use tracing::warn;

use crate::SimContext;
use crate::aircraft::{Aircraft, FlightPhase, HeadingMode, AltitudeMode, SpeedMode, Target, TurnDirection};
use crate::config::PerformanceConfig;
use crate::position::GeoPosition;
use crate::runway::Runway;
use crate::vec2::{angle_difference, normalize_radians, radial_angle, ray_intersection, RayIntersection};
use crate::units::{G, km_to_ft, kt_to_mps, nm_to_km};

/// direction tolerance for intercepting the extended final with the current heading
const INTERCEPT_TOLERANCE_DEG: f64 = 1.0;

/// how close (radians) the heading has to be to the outbound heading to start the leg timer
const HOLD_HEADING_TOLERANCE: f64 = 1e-6;

/// distance (km) before a waypoint at which a turn for `course_change` (radians) has to start
/// at `ground_speed` kt with a `bank_angle_deg` coordinated turn. Includes one second of reaction
pub fn turn_initiation_distance_km (ground_speed: f64, course_change: f64, bank_angle_deg: f64)->f64 {
    let v = kt_to_mps( ground_speed);
    let turn_radius = v * v / (G * bank_angle_deg.to_radians().tan());
    (turn_radius * (course_change / 2.0).tan() + v) / 1000.0
}

pub fn update_targets (ac: &mut Aircraft, ctx: &SimContext) {
    let perf = &ctx.config.performance;

    let mut target = Target {
        heading: ac.heading,
        altitude: ac.altitude,
        speed: ac.speed,
        expedite: ac.mcp.expedite,
        turn: None,
    };

    match ac.phase {
        FlightPhase::Apron | FlightPhase::Taxi => {
            target.speed = 0.0;
        }
        FlightPhase::Waiting => {
            if let Some(rwy) = departure_runway( ac, ctx) {
                target.heading = rwy.angle;
            }
            target.speed = 0.0;
        }
        FlightPhase::Takeoff => takeoff_targets( ac, ctx, &mut target),
        FlightPhase::Landing => landing_targets( ac, ctx, &mut target),
        _ => {
            let (heading, turn) = heading_target( ac, ctx);
            target.heading = heading;
            target.turn = turn;
            target.altitude = altitude_target( ac, ctx);
            target.speed = speed_target( ac);
        }
    }

    // speed limit below the restriction altitude, never slower than the aircraft can fly
    if ac.altitude < perf.speed_restriction_altitude_ft {
        let limit = perf.speed_restriction_kt.max( ac.model.speed.min);
        target.speed = target.speed.min( limit);
    }

    target.heading = normalize_radians( target.heading);
    ac.target = target;
}

/// targets for the current state, leaving phase, flight plan and mode control panel untouched
pub fn preview_targets (ac: &Aircraft, ctx: &SimContext)->Target {
    let mut scratch = ac.clone();
    update_targets( &mut scratch, ctx);
    scratch.target
}

fn departure_runway<'a> (ac: &Aircraft, ctx: &'a SimContext)->Option<&'a Runway> {
    ac.fms.departure_runway.and_then(|i| ctx.airport.runway(i))
}

fn arrival_runway<'a> (ac: &Aircraft, ctx: &'a SimContext)->Option<&'a Runway> {
    ac.fms.arrival_runway.and_then(|i| ctx.airport.runway(i))
}

fn takeoff_targets (ac: &Aircraft, ctx: &SimContext, target: &mut Target) {
    match departure_runway( ac, ctx) {
        Some(rwy) => {
            target.heading = rwy.angle;
            target.speed = ac.model.speed.min;
            // don't rotate before reaching flying speed
            target.altitude = if ac.speed >= ac.model.speed.min { ac.mcp.altitude } else { rwy.elevation };
        }
        None => {
            warn!("{} is taking off without departure runway", ac.callsign);
            target.speed = ac.model.speed.min;
            target.altitude = if ac.speed >= ac.model.speed.min { ac.mcp.altitude } else { ac.altitude };
        }
    }
}

fn landing_targets (ac: &Aircraft, ctx: &SimContext, target: &mut Target) {
    match arrival_runway( ac, ctx) {
        Some(rwy) => {
            target.heading = localizer_heading( ac, rwy, &ctx.config.performance);
            let dtg = rwy.distance_to_go( &ac.relative_position());
            target.altitude = rwy.glideslope_altitude( dtg).max( rwy.elevation);
        }
        None => warn!("{} is landing without arrival runway", ac.callsign)
    }
    target.speed = if ac.is_on_ground( &ctx.airport) { 0.0 } else { ac.model.speed.landing };
}

/* #region lateral **********************************************************************************************/

fn heading_target (ac: &mut Aircraft, ctx: &SimContext)->(f64,Option<TurnDirection>) {
    match ac.mcp.heading_mode {
        HeadingMode::Off => (ac.heading, None),
        HeadingMode::Hold => {
            if ac.heading == ac.mcp.heading {
                ac.mcp.turn = None; // turn direction only applies to the turn onto the assigned heading
            }
            (ac.mcp.heading, ac.mcp.turn)
        }
        HeadingMode::Lnav => lnav_heading( ac, ctx),
        HeadingMode::VorLoc => {
            match arrival_runway( ac, ctx) {
                Some(rwy) => (localizer_heading( ac, rwy, &ctx.config.performance), None),
                None => {
                    warn!("{} in VOR_LOC mode without arrival runway, flying assigned heading", ac.callsign);
                    (ac.mcp.heading, None)
                }
            }
        }
    }
}

/// switch to heading hold on the present heading
fn hold_present_heading (ac: &mut Aircraft)->(f64,Option<TurnDirection>) {
    ac.mcp.heading_mode = HeadingMode::Hold;
    ac.mcp.heading = ac.heading;
    ac.mcp.turn = None;
    (ac.heading, None)
}

fn lnav_heading (ac: &mut Aircraft, ctx: &SimContext)->(f64,Option<TurnDirection>) {
    let perf = &ctx.config.performance;

    let (bearing, advance) = {
        let Some(wp) = ac.fms.current_waypoint() else { return hold_present_heading(ac) };

        if wp.is_hold() {
            if ac.phase == FlightPhase::Hold {
                return hold_heading( ac, ctx)
            } else {
                return (ac.position.bearing_to( &wp.position), None) // fly to the holding fix
            }
        }

        let bearing = ac.position.bearing_to( &wp.position);
        let distance = ac.position.distance_to( &wp.position);

        let mut advance = distance < perf.waypoint_pass_distance_nm;
        if !advance && !wp.fly_over && distance < perf.fly_by_max_distance_nm {
            if let Some(next) = ac.fms.next_waypoint() {
                let course_change = angle_difference( wp.position.bearing_to( &next.position), bearing).abs();
                let d_turn = turn_initiation_distance_km( ac.ground_speed, course_change, perf.nominal_bank_angle_deg);
                advance = nm_to_km(distance) <= d_turn;
            }
        }
        (bearing, advance)
    };

    if advance {
        let was_last = ac.fms.is_last_waypoint();
        ac.fms.advance();
        if was_last {
            return hold_present_heading(ac)
        }
        if let Some(wp) = ac.fms.current_waypoint() {
            return (ac.position.bearing_to( &wp.position), None)
        }
    }

    (bearing, None)
}

/// racetrack pattern at the current waypoint. Only called in HOLD phase
fn hold_heading (ac: &mut Aircraft, ctx: &SimContext)->(f64,Option<TurnDirection>) {
    let perf = &ctx.config.performance;
    let now = ctx.game_time;
    let heading = ac.heading;
    let ground_speed = ac.ground_speed;

    let (bearing, distance) = match ac.fms.current_waypoint() {
        Some(wp) => (ac.position.bearing_to( &wp.position), ac.position.distance_to( &wp.position)),
        None => return hold_present_heading(ac)
    };

    let Some(wp) = ac.fms.current_waypoint_mut() else { return hold_present_heading(ac) };
    let Some(hold) = wp.hold.as_mut() else { return (bearing, None) };

    let inbound = *hold.inbound.get_or_insert( bearing);
    let turn = hold.turn;
    let leg_secs = hold.leg.seconds( ground_speed);
    let outbound = normalize_radians( inbound + PI);

    let state = &mut wp.hold_state;
    if distance < perf.hold_fix_crossing_nm { // crossing the fix starts a new circuit
        state.established = true;
        state.timer = None;
    }

    if !state.established {
        return (bearing, None)
    }

    let hdg = match state.timer {
        None => {
            if angle_difference( heading, outbound).abs() < HOLD_HEADING_TOLERANCE {
                state.timer = Some( now + leg_secs);
            }
            outbound
        }
        Some(t) => if now >= t { bearing } else { outbound }
    };

    (hdg, Some(turn))
}

/// heading to intercept and track the localizer of `rwy`
pub fn localizer_heading (ac: &Aircraft, rwy: &Runway, perf: &PerformanceConfig)->f64 {
    let assigned = ac.mcp.heading;
    let course = rwy.angle;
    let p = ac.relative_position();
    let datum = rwy.relative_position();
    let (lateral, along, _) = rwy.offset( &p);

    if -along > rwy.ils.loc_range_km {
        return assigned
    }

    if km_to_ft( lateral.abs()) <= perf.localizer_established_ft
        && angle_difference( ac.heading, course).abs() <= perf.localizer_established_heading_deg.to_radians() {
        return course
    }

    // positive if right of course, as seen from the datum
    let final_course = normalize_radians( course + PI);
    let angle_off_course = angle_difference( final_course, radial_angle( &(p - datum)));

    let intercept_angle = angle_difference( assigned, course);
    let d_turn = turn_initiation_distance_km( ac.ground_speed, angle_difference( ac.heading, course).abs(), perf.nominal_bank_angle_deg)
        + nm_to_km( perf.localizer_early_turn_nm);

    let in_window = angle_off_course.abs() <= perf.localizer_capture_angle_deg.to_radians() || {
        match ray_intersection( &p, ac.heading, &datum, final_course, INTERCEPT_TOLERANCE_DEG) {
            RayIntersection::Point(x) => p.distance_to( &x) <= d_turn,
            _ => false
        }
    };
    if !in_window {
        return assigned
    }

    let max_correction = perf.localizer_max_correction_deg.to_radians();
    let mut correction = (-perf.localizer_correction_gain * angle_off_course).clamp( -max_correction, max_correction);
    if correction.signum() == intercept_angle.signum() && correction.abs() > intercept_angle.abs() {
        correction = intercept_angle;
    }

    normalize_radians( course + correction)
}

/* #endregion lateral */

/* #region vertical and speed ***********************************************************************************/

fn altitude_target (ac: &Aircraft, ctx: &SimContext)->f64 {
    match ac.mcp.altitude_mode {
        AltitudeMode::Off => ac.altitude,
        AltitudeMode::Hold => ac.mcp.altitude,
        AltitudeMode::Vnav => {
            let planned = ac.fms.flight_plan_altitude;
            ac.fms.current_waypoint()
                .and_then(|wp| wp.altitude)
                .map(|r| r.apply( planned))
                .unwrap_or( planned)
        }
        AltitudeMode::Approach => {
            match arrival_runway( ac, ctx) {
                Some(rwy) => {
                    let dtg = rwy.distance_to_go( &ac.relative_position());
                    if dtg < 0.0 { // past the threshold there is no glideslope to follow
                        ac.mcp.altitude
                    } else {
                        ac.mcp.altitude.min( rwy.glideslope_altitude( dtg))
                    }
                }
                None => {
                    warn!("{} in APPROACH altitude mode without arrival runway", ac.callsign);
                    ac.mcp.altitude
                }
            }
        }
    }
}

fn speed_target (ac: &Aircraft)->f64 {
    match ac.mcp.speed_mode {
        SpeedMode::Off => ac.speed,
        SpeedMode::Hold => ac.mcp.speed,
        SpeedMode::N1 => ac.model.speed.max,
        SpeedMode::Vnav => {
            ac.fms.current_waypoint()
                .and_then(|wp| wp.speed)
                .unwrap_or( ac.model.speed.cruise)
        }
    }
}

/* #endregion vertical and speed */
