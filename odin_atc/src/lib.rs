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

//! odin_atc is an air traffic control simulation engine. It integrates aircraft that fly
//! departures, arrivals, holds and ILS approaches under a flight phase state machine and an
//! autopilot, and continuously monitors all aircraft pairs for separation conflicts and collisions.
//!
//! The entry point is [`AircraftPool`], which owns a [`SimContext`] (airport geometry, tunables,
//! aircraft types and game time) and is advanced by calling [`AircraftPool::update`] with the
//! elapsed seconds of each frame

pub mod errors;
pub use errors::*;

pub mod units;
pub mod vec2;
pub mod geodesy;
pub mod position;

pub mod config;
use config::{SimConfig, load_config};

pub mod runway;
pub mod airspace;
pub mod airport;
use airport::Airport;

pub mod aircraft;
use aircraft::{AircraftTypes, load_aircraft_types};

pub mod conflict;
pub mod events;

pub mod pool;
pub use pool::AircraftPool;

/// everything the aircraft updates need from their environment
#[derive(Debug,Clone)]
pub struct SimContext {
    pub airport: Airport,
    pub config: SimConfig,
    pub aircraft_types: AircraftTypes,
    pub game_time: f64, // seconds since start
}

impl SimContext {
    pub fn new (airport: Airport, config: SimConfig, aircraft_types: AircraftTypes)->Self {
        SimContext { airport, config, aircraft_types, game_time: 0.0 }
    }

    /// load the context from config files. Without `sim_config` all tunables have their defaults
    pub fn load (airport_config: &str, aircraft_types_config: &str, sim_config: Option<&str>)->Result<Self> {
        let config: SimConfig = match sim_config {
            Some(filename) => load_config( filename)?,
            None => SimConfig::default()
        };
        let airport = Airport::load( airport_config, &config.separation)?;
        let aircraft_types = load_aircraft_types( aircraft_types_config)?;
        Ok( SimContext::new( airport, config, aircraft_types) )
    }
}
