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

//! a synthetic airport on the equator with two parallel north/south runways about 3000ft apart,
//! no magnetic variation and no wind. Everything is built in code so that tests do not depend
//! on config files

use std::collections::BTreeMap;

use odin_atc::{AircraftPool, SimContext};
use odin_atc::airport::Airport;
use odin_atc::aircraft::{
    AircraftType, AircraftTypes, Category, EngineKind, FlightPhase, PerformanceRates, SpeedEnvelope, aircraft_types_from
};
use odin_atc::aircraft::fms::WaypointSpec;
use odin_atc::config::{
    AirportConfig, AirspaceConfig, IlsConfig, ParallelMinimumConfig, RunwayEndConfig, RunwayPairConfig, SimConfig, WindConfig
};
use odin_atc::geodesy::{destination, LatLonSpec};
use odin_atc::pool::SpawnDescriptor;

pub const RWY_LAT: f64 = 0.02;    // thresholds at +- this latitude
pub const RWY_LON: f64 = 0.0041;  // centerlines at +- this longitude

pub fn deg (lat: f64, lon: f64)->LatLonSpec { LatLonSpec::from_degrees( lat, lon) }

fn runway_end (name: &str, lat: f64, lon: f64)->RunwayEndConfig {
    RunwayEndConfig { name: name.to_string(), threshold: deg( lat, lon), ils: IlsConfig::default() }
}

pub fn test_airport_config ()->AirportConfig {
    let mut fixes = BTreeMap::new();
    fixes.insert( "NORTH".to_string(), deg( 0.2, 0.0));
    fixes.insert( "SOUTH".to_string(), deg( -0.2, 0.0));
    fixes.insert( "EAST".to_string(), deg( 0.0, 0.2));
    fixes.insert( "WEST".to_string(), deg( 0.0, -0.2));
    fixes.insert( "HOLDX".to_string(), deg( 0.1, 0.1));

    AirportConfig {
        icao: "TEST".to_string(),
        name: "Equator Test Field".to_string(),
        position: deg( 0.0, 0.0),
        magnetic_variation_deg: 0.0,
        radar_range_nm: 40.0,
        ceiling_ft: 10000.0,
        wind: WindConfig::default(),
        runways: vec![
            RunwayPairConfig { ends: vec![ runway_end( "36L", -RWY_LAT, -RWY_LON), runway_end( "18R", RWY_LAT, -RWY_LON) ] },
            RunwayPairConfig { ends: vec![ runway_end( "36R", -RWY_LAT, RWY_LON), runway_end( "18L", RWY_LAT, RWY_LON) ] },
        ],
        airspace: vec![
            AirspaceConfig {
                poly: vec![ deg(-0.5,-0.5), deg(-0.5,0.5), deg(0.5,0.5), deg(0.5,-0.5), deg(-0.5,-0.5) ],
                floor_ft: 0.0,
                ceiling_ft: 10000.0,
                airspace_class: "B".to_string(),
            }
        ],
        fixes,
        parallel_minima: Vec::new(),
    }
}

pub fn test_types ()->AircraftTypes {
    aircraft_types_from( vec![
        AircraftType {
            icao: "B738".to_string(),
            name: "Boeing 737-800".to_string(),
            engine: EngineKind::Jet,
            ceiling: 41000.0,
            rate: PerformanceRates { climb: 2500.0, descent: 3500.0, accelerate: 6.0, decelerate: 3.5 },
            speed: SpeedEnvelope { min: 135.0, landing: 145.0, cruise: 460.0, max: 470.0 },
        },
        AircraftType {
            icao: "C172".to_string(),
            name: "Cessna 172".to_string(),
            engine: EngineKind::Piston,
            ceiling: 14000.0,
            rate: PerformanceRates { climb: 700.0, descent: 1000.0, accelerate: 3.0, decelerate: 2.0 },
            speed: SpeedEnvelope { min: 50.0, landing: 60.0, cruise: 120.0, max: 160.0 },
        },
    ])
}

pub fn test_context_from (cfg: &AirportConfig)->SimContext {
    let sim = SimConfig::default();
    let airport = Airport::from_config( cfg, &sim.separation).unwrap();
    SimContext::new( airport, sim, test_types())
}

pub fn test_context ()->SimContext { test_context_from( &test_airport_config()) }

pub fn test_pool ()->AircraftPool { AircraftPool::new( test_context()) }

/// a B738 arrival without route, holding heading/altitude/speed
pub fn arrival (callsign: &str, lat: f64, lon: f64, altitude: f64, speed: f64, heading_deg: f64)->SpawnDescriptor {
    SpawnDescriptor {
        category: Category::Arrival,
        callsign: callsign.to_string(),
        airline: callsign.chars().take(3).collect(),
        altitude,
        speed,
        heading: Some(heading_deg),
        position: Some( deg( lat, lon)),
        icao: "B738".to_string(),
        model: None,
        route: String::new(),
        waypoints: Vec::new(),
        phase: None,
        flight_plan_altitude: None,
        departure_runway: None,
        arrival_runway: None,
    }
}

/// a B738 departure on the apron, assigned to `runway`
pub fn departure (callsign: &str, runway: &str)->SpawnDescriptor {
    SpawnDescriptor {
        category: Category::Departure,
        callsign: callsign.to_string(),
        airline: callsign.chars().take(3).collect(),
        altitude: 0.0,
        speed: 0.0,
        heading: None,
        position: Some( deg( 0.0, 0.01)),
        icao: "B738".to_string(),
        model: None,
        route: String::new(),
        waypoints: Vec::new(),
        phase: None,
        flight_plan_altitude: Some(5000.0),
        departure_runway: Some( runway.to_string()),
        arrival_runway: None,
    }
}

/// an arrival established on the localizer of a northbound runway, `dist_nm` before its threshold
pub fn on_final (callsign: &str, runway: &str, dist_nm: f64, altitude: f64)->SpawnDescriptor {
    let lon = if runway.ends_with('L') { -RWY_LON } else { RWY_LON };
    let (lat, lon) = destination( -RWY_LAT, lon, std::f64::consts::PI, dist_nm);

    let mut desc = arrival( callsign, lat, lon, altitude, 160.0, 0.0);
    desc.phase = Some( FlightPhase::Approach);
    desc.arrival_runway = Some( runway.to_string());
    desc
}

pub fn waypoint (fix: &str)->WaypointSpec {
    WaypointSpec { fix: fix.to_string(), altitude: None, speed: None, fly_over: false, hold: None }
}

pub fn run (pool: &mut AircraftPool, ticks: usize, dt: f64) {
    for _ in 0..ticks { pool.update( dt) }
}
