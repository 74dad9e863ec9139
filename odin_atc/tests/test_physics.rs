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

mod common;
use common::*;

use odin_atc::airport::Wind;
use odin_atc::aircraft::{TurnDirection, physics::climb_rate_at};
use odin_atc::position::GeoPosition;
use odin_atc::vec2::angle_difference;

// run with "cargo test test_turn -- --nocapture"

#[test]
fn test_turn() {
    let mut pool = test_pool();
    pool.spawn( &arrival( "TRN1", 0.05, 0.0, 8000.0, 250.0, 0.0)).unwrap();
    pool.spawn( &arrival( "TRN2", -0.05, 0.0, 8000.0, 250.0, 0.0)).unwrap();

    pool.cmd_heading( "TRN1", 90.0, None).unwrap();
    pool.cmd_heading( "TRN2", 90.0, Some(TurnDirection::Left)).unwrap();
    pool.update( 1.0);

    let h1 = pool.by_callsign("TRN1").unwrap().heading.to_degrees();
    let h2 = pool.by_callsign("TRN2").unwrap().heading.to_degrees();
    println!("after 1s: shortest turn {h1}°, left turn {h2}°");
    assert!( (h1 - 3.0).abs() < 1e-9);
    assert!( (h2 - 357.0).abs() < 1e-9);

    // the turn snaps onto the assigned heading
    run( &mut pool, 40, 1.0);
    let ac = pool.by_callsign("TRN1").unwrap();
    assert_eq!( ac.heading, 90f64.to_radians());
    assert!( ac.mcp.turn.is_none());
}

#[test]
fn test_altitude_change() {
    let mut pool = test_pool();
    pool.spawn( &arrival( "DSC1", 0.05, 0.0, 8000.0, 250.0, 0.0)).unwrap();
    pool.spawn( &arrival( "DSC2", -0.05, 0.0, 8000.0, 250.0, 0.0)).unwrap();
    pool.spawn( &arrival( "CLB1", 0.0, 0.15, 8000.0, 250.0, 0.0)).unwrap();

    pool.cmd_altitude( "DSC1", 6000.0, false).unwrap();
    pool.cmd_altitude( "DSC2", 6000.0, true).unwrap();
    pool.cmd_altitude( "CLB1", 9000.0, false).unwrap();
    pool.update( 1.0);

    let a1 = pool.by_callsign("DSC1").unwrap().altitude;
    let a2 = pool.by_callsign("DSC2").unwrap().altitude;
    let clb = pool.by_callsign("CLB1").unwrap();
    println!("after 1s: normal descent {a1}, expedited {a2}, climb {}", clb.altitude);

    assert!( (a1 - (8000.0 - 3500.0 * 0.7 / 60.0)).abs() < 1e-9);
    assert!( (a2 - (8000.0 - 3500.0 / 60.0)).abs() < 1e-9);
    let expected = 8000.0 + climb_rate_at( &clb.model, 2500.0 * 0.7, 8000.0) / 60.0;
    assert!( (clb.altitude - expected).abs() < 1e-9);

    // ceiling is enforced
    assert!( pool.cmd_altitude( "CLB1", 45000.0, false).is_err());

    // no overshoot
    run( &mut pool, 120, 1.0);
    assert_eq!( pool.by_callsign("DSC1").unwrap().altitude, 6000.0);
    assert_eq!( pool.by_callsign("CLB1").unwrap().altitude, 9000.0);
}

#[test]
fn test_climb_rate_model() {
    let types = test_types();
    let b738 = types.get("B738").unwrap();

    let sea_level = climb_rate_at( b738, 2000.0, 0.0);
    let high = climb_rate_at( b738, 2000.0, 30000.0);
    println!("climb rate at 0ft: {sea_level}, at 30000ft: {high}");
    assert!( (sea_level - 2000.0).abs() < 2.0);
    assert!( high < sea_level);
    assert_eq!( climb_rate_at( b738, 2000.0, 40000.0), 2000.0);
}

#[test]
fn test_speed_change() {
    let mut pool = test_pool();
    pool.spawn( &arrival( "SLOW", 0.05, 0.0, 5000.0, 250.0, 0.0)).unwrap();
    pool.spawn( &arrival( "FAST", -0.05, 0.0, 5000.0, 200.0, 0.0)).unwrap();
    pool.spawn( &arrival( "LOW", 0.0, 0.15, 5000.0, 100.0, 0.0)).unwrap();

    pool.cmd_speed( "SLOW", 200.0).unwrap();
    pool.cmd_speed( "FAST", 250.0).unwrap();
    pool.cmd_speed( "LOW", 200.0).unwrap();
    pool.update( 1.0);

    let slow = pool.by_callsign("SLOW").unwrap().speed;
    let fast = pool.by_callsign("FAST").unwrap().speed;
    let low = pool.by_callsign("LOW").unwrap().speed;
    println!("after 1s: decelerating {slow}, accelerating {fast}, accelerating below min {low}");
    assert!( (slow - 248.25).abs() < 1e-9);
    assert!( (fast - 203.0).abs() < 1e-9);
    assert!( (low - (100.0 + 3.0 * (2.0 - 100.0/135.0))).abs() < 1e-9);

    // assigned speeds are clamped to the envelope
    pool.cmd_speed( "SLOW", 600.0).unwrap();
    assert_eq!( pool.by_callsign("SLOW").unwrap().mcp.speed, 470.0);
}

#[test]
fn test_speed_restriction() {
    let mut pool = test_pool();
    pool.spawn( &arrival( "LIMIT", 0.05, 0.0, 8000.0, 250.0, 0.0)).unwrap();
    pool.cmd_speed( "LIMIT", 300.0).unwrap();
    pool.update( 1.0);

    let ac = pool.by_callsign("LIMIT").unwrap();
    assert_eq!( ac.target.speed, 250.0);
    assert_eq!( ac.speed, 250.0);
}

#[test]
fn test_wind() {
    let mut pool = test_pool();
    pool.ctx_mut().airport.wind = Wind { speed: 20.0, angle: 0.0 }; // from north
    pool.spawn( &arrival( "HEAD", 0.05, 0.0, 5000.0, 250.0, 0.0)).unwrap();
    pool.spawn( &arrival( "CROSS", -0.05, 0.0, 5000.0, 250.0, 270.0)).unwrap();
    pool.update( 1.0);

    let head = pool.by_callsign("HEAD").unwrap();
    println!("headwind: gs {} track {}°", head.ground_speed, head.ground_track.to_degrees());
    let tas = 250.0 * (1.0 + 5000.0 * 0.000016);
    let wind = 20.0 * (1.0 + 5000.0 * 0.000045);
    assert!( (head.ground_speed - (tas - wind)).abs() < 1e-9);
    assert!( angle_difference( head.ground_track, 0.0).abs() < 1e-9);

    // westbound with wind from the north drifts south
    let cross = pool.by_callsign("CROSS").unwrap();
    println!("crosswind: gs {} track {}°", cross.ground_speed, cross.ground_track.to_degrees());
    assert!( (cross.ground_speed - tas.hypot(wind)).abs() < 1e-9);
    assert!( angle_difference( cross.ground_track, 270f64.to_radians()) < 0.0);
}

#[test]
fn test_position_integration() {
    let mut pool = test_pool();
    pool.spawn( &arrival( "EASTBOUND", 0.0, -0.2, 3000.0, 240.0, 90.0)).unwrap();
    let start = pool.by_callsign("EASTBOUND").unwrap().position.clone();

    run( &mut pool, 60, 1.0);

    let ac = pool.by_callsign("EASTBOUND").unwrap();
    let gs = 240.0 * (1.0 + 3000.0 * 0.000016);
    let d = start.distance_to( &ac.position);
    println!("flew {d} nm in 60s at {gs} kt");
    assert!( (d - gs / 60.0).abs() < 1e-6);
    assert!( ac.position.latitude().abs() < 1e-9);
}

#[test]
fn test_hit_aircraft() {
    let mut pool = test_pool();
    pool.spawn( &arrival( "DOWN", 0.05, 0.0, 5000.0, 250.0, 0.0)).unwrap();
    pool.cmd_heading( "DOWN", 90.0, None).unwrap();
    pool.by_callsign_mut("DOWN").unwrap().hit = true;

    pool.update( 2.0);
    let ac = pool.by_callsign("DOWN").unwrap();
    println!("hit aircraft after 2s: alt {} speed {}", ac.altitude, ac.speed);
    assert!( (ac.altitude - 4820.0).abs() < 1e-9);
    assert!( (ac.speed - 250.0 * 0.99f64.powi(2)).abs() < 1e-9);
    assert_eq!( ac.heading, 0.0);

    // removed once it reaches the ground, without scoring
    run( &mut pool, 60, 1.0);
    assert!( pool.is_empty());
    assert_eq!( pool.events().events().len(), 0);
}

#[test]
fn test_zero_time_step() {
    let mut pool = test_pool();
    pool.spawn( &arrival( "TURN", 0.1, -0.1, 8000.0, 250.0, 0.0)).unwrap();
    pool.spawn( &arrival( "DESC", -0.1, 0.1, 9000.0, 250.0, 180.0)).unwrap();
    pool.spawn( &on_final( "FINAL", "36L", 8.0, 2500.0)).unwrap();
    pool.spawn( &departure( "ROLL", "36R")).unwrap();

    pool.cmd_heading( "TURN", 180.0, None).unwrap();
    pool.cmd_altitude( "DESC", 7000.0, false).unwrap();
    pool.cmd_taxi( "ROLL", "36R").unwrap();
    run( &mut pool, 4, 1.0);
    pool.cmd_takeoff( "ROLL").unwrap();
    run( &mut pool, 3, 1.0);

    let t = pool.game_time();
    let snapshot = pool.snapshot();
    let json = pool.snapshot_json().unwrap();
    println!("{}", json);

    for _ in 0..3 { pool.update( 0.0) }
    pool.update( -1.0);
    pool.update( f64::NAN);

    assert_eq!( pool.game_time(), t);
    assert_eq!( pool.snapshot(), snapshot);
    assert_eq!( pool.snapshot_json().unwrap(), json);
}
