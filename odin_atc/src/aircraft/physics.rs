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

//! integration of the true aircraft state towards its [`Target`](crate::aircraft::Target).
//!
//! All steps are proportional to `dt` and snap to the target instead of overshooting, which
//! makes a tick with `dt = 0` leave the state untouched

use std::f64::consts::PI;

use crate::SimContext;
use crate::aircraft::{Aircraft, AircraftType, TurnDirection};
use crate::airport::Wind;
use crate::config::PerformanceConfig;
use crate::vec2::{Point2D, angle_difference, normalize_radians};
use crate::units::{SECONDS_PER_MINUTE, nm_travelled};

/// upper limit of the troposphere climb model (ft)
pub const TROPOPAUSE_FT: f64 = 36_152.0;

pub fn update_physics (ac: &mut Aircraft, ctx: &SimContext, dt: f64) {
    let perf = &ctx.config.performance;

    if ac.hit {
        update_hit( ac, perf, dt);
        return
    }

    let on_ground = ac.is_on_ground( &ctx.airport);

    update_turn( ac, perf, on_ground, dt);
    update_altitude( ac, perf, dt);
    update_speed( ac, perf, on_ground, dt);
    update_ground_vector( ac, perf, &ctx.airport.wind, on_ground);
    update_position( ac, dt);
}

/// a crashing aircraft only falls and slows down
fn update_hit (ac: &mut Aircraft, perf: &PerformanceConfig, dt: f64) {
    ac.altitude -= perf.hit_fall_rate_fps * dt;
    ac.speed *= perf.hit_speed_decay.powf( dt);
}

fn update_turn (ac: &mut Aircraft, perf: &PerformanceConfig, on_ground: bool, dt: f64) {
    if on_ground || ac.heading == ac.target.heading {
        return
    }

    let diff = angle_difference( ac.target.heading, ac.heading);
    let step = perf.turn_rate_deg.to_radians() * dt;

    if diff.abs() <= step {
        ac.heading = ac.target.heading;
    } else {
        let dir = match ac.target.turn {
            Some(TurnDirection::Left) => -1.0,
            Some(TurnDirection::Right) => 1.0,
            None => diff.signum()
        };
        ac.heading = normalize_radians( ac.heading + dir * step);
    }
}

/// climb rate (ft/min) at `altitude`, derated towards the service ceiling rate
pub fn climb_rate_at (model: &AircraftType, rate: f64, altitude: f64)->f64 {
    if altitude >= TROPOPAUSE_FT || model.ceiling <= 0.0 {
        return rate
    }

    let temp = 518.6 - 0.00356 * altitude; // Rankine
    let uncorrected = rate * 420.7 * ((1.232 * (temp / 518.6).powf(5.256)) / temp);
    let f = altitude / model.ceiling;
    uncorrected - f * uncorrected + f * model.service_ceiling_climb_rate()
}

fn update_altitude (ac: &mut Aircraft, perf: &PerformanceConfig, dt: f64) {
    let diff = ac.target.altitude - ac.altitude;
    if diff == 0.0 {
        return
    }

    let rate = if diff > 0.0 {
        let rated = if ac.target.expedite { ac.model.rate.climb } else { ac.model.rate.climb * perf.typical_climb_factor };
        climb_rate_at( &ac.model, rated, ac.altitude)
    } else {
        if ac.target.expedite { ac.model.rate.descent } else { ac.model.rate.descent * perf.typical_descent_factor }
    };

    let step = rate.max(0.0) * dt / SECONDS_PER_MINUTE;
    if step >= diff.abs() {
        ac.altitude = ac.target.altitude;
    } else {
        ac.altitude += diff.signum() * step;
    }
}

fn update_speed (ac: &mut Aircraft, perf: &PerformanceConfig, on_ground: bool, dt: f64) {
    let diff = ac.target.speed - ac.speed;
    if diff == 0.0 {
        return
    }

    let change = if diff > 0.0 {
        // accelerating is easier at low speed, full effect below minimum flying speed
        let min = ac.model.speed.min;
        let factor = if min > 0.0 && ac.speed < min { 2.0 - (ac.speed / min).max(0.0) } else { 1.0 };
        ac.model.rate.accelerate / 2.0 * factor * dt
    } else {
        let braking = if on_ground { perf.ground_braking_factor } else { 1.0 };
        -(ac.model.rate.decelerate / 2.0 * braking * dt)
    };

    if change.abs() > diff.abs() {
        ac.speed = ac.target.speed;
    } else {
        ac.speed += change;
    }
}

/// compose true airspeed and wind into ground speed and track
fn update_ground_vector (ac: &mut Aircraft, perf: &PerformanceConfig, wind: &Wind, on_ground: bool) {
    let tas = ac.speed * (1.0 + ac.altitude * perf.tas_altitude_factor);

    if on_ground {
        ac.ground_speed = tas;
        ac.ground_track = ac.heading;
    } else {
        let air = Point2D::from_heading( ac.heading) * tas;
        let wind_speed = wind.speed * (1.0 + ac.altitude * perf.wind_altitude_factor);
        let wind_vec = Point2D::from_heading( wind.angle + PI) * wind_speed; // blowing towards
        let ground = air + wind_vec;

        ac.ground_speed = ground.length();
        ac.ground_track = if ac.ground_speed > 0.0 { normalize_radians( ground.radial()) } else { ac.heading };
    }
}

fn update_position (ac: &mut Aircraft, dt: f64) {
    let distance = nm_travelled( ac.ground_speed, dt);
    ac.position.set_coordinates_by_bearing_and_distance( ac.ground_track, distance);
}

/// ground vector for a newly spawned aircraft, so that the first tick projects along the right track
pub fn init_ground_vector (ac: &mut Aircraft, ctx: &SimContext) {
    let on_ground = ac.is_on_ground( &ctx.airport);
    update_ground_vector( ac, &ctx.config.performance, &ctx.airport.wind, on_ground);
}
