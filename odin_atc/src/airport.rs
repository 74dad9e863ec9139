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

//! the static airport geometry: runways and their pairwise relationships, fixes, airspace and
//! wind. Everything in here is built once from an [`AirportConfig`] and only the runway takeoff
//! queues change afterwards

use std::collections::{BTreeMap,HashMap};
use serde::Serialize;
use tracing::{debug,warn};

use crate::aircraft::AircraftId;
use crate::airspace::Airspace;
use crate::config::{AirportConfig, SeparationConfig, load_config};
use crate::position::{GeoCoord, GeoPosition, StaticPosition};
use crate::runway::{Runway, RunwayRelationship};
use crate::vec2::Point2D;
use crate::units::nm_to_km;
use crate::errors::{Result, config_error};

#[derive(Debug,Clone,Copy,Default,Serialize)]
pub struct Wind {
    pub speed: f64, // kt
    pub angle: f64, // direction the wind comes from, magnetic radians
}

#[derive(Debug,Clone,Serialize)]
pub struct Airport {
    pub icao: String,
    pub name: String,
    pub position: StaticPosition,
    pub magnetic_north: f64,
    pub elevation: f64,
    pub radar_range_km: f64,
    pub ceiling: f64,
    pub wind: Wind,
    pub runways: Vec<Runway>,
    pub fixes: BTreeMap<String,StaticPosition>,
    pub airspace: Vec<Airspace>,

    #[serde(skip)]
    relationships: HashMap<(usize,usize),RunwayRelationship>,
}

impl Airport {
    pub fn load (filename: &str, separation: &SeparationConfig)->Result<Self> {
        let cfg: AirportConfig = load_config( filename)?;
        Airport::from_config( &cfg, separation)
    }

    pub fn from_config (cfg: &AirportConfig, separation: &SeparationConfig)->Result<Self> {
        let magnetic_north = cfg.magnetic_variation_deg.to_radians();
        let (lat,lon,elevation) = cfg.position.resolve()?;
        let reference = GeoCoord::new( lat, lon);
        let position = StaticPosition::new( reference, elevation, Some(reference), magnetic_north);

        let mut runways = Vec::with_capacity( cfg.runways.len() * 2);
        for (pair_index, pair) in cfg.runways.iter().enumerate() {
            if pair.ends.len() != 2 {
                return Err( config_error!("runway {} needs exactly two ends, got {}", pair_index, pair.ends.len()))
            }
            runways.push( Runway::new( pair_index, &pair.ends[0], &pair.ends[1], reference, magnetic_north)?);
            runways.push( Runway::new( pair_index, &pair.ends[1], &pair.ends[0], reference, magnetic_north)?);
        }
        for (i,rwy) in runways.iter().enumerate() {
            if runways[..i].iter().any(|r| r.name == rwy.name) {
                return Err( config_error!("duplicate runway name {}", rwy.name))
            }
        }

        let mut fixes = BTreeMap::new();
        for (name,spec) in &cfg.fixes {
            fixes.insert( name.clone(), StaticPosition::from_spec( spec, Some(reference), magnetic_north)?);
        }

        let mut airspace = Vec::with_capacity( cfg.airspace.len());
        for a in &cfg.airspace {
            airspace.push( Airspace::new( a, reference, magnetic_north)?);
        }

        let wind = Wind { speed: cfg.wind.speed_kt, angle: cfg.wind.direction_deg.to_radians() };

        let mut airport = Airport {
            icao: cfg.icao.clone(),
            name: cfg.name.clone(),
            position,
            magnetic_north,
            elevation,
            radar_range_km: nm_to_km( cfg.radar_range_nm),
            ceiling: cfg.ceiling_ft,
            wind,
            runways,
            fixes,
            airspace,
            relationships: HashMap::new(),
        };

        airport.relationships = airport.compute_relationships( cfg, separation)?;
        debug!("loaded airport {} with {} runway ends, {} fixes", airport.icao, airport.runways.len(), airport.fixes.len());
        Ok(airport)
    }

    fn compute_relationships (&self, cfg: &AirportConfig, separation: &SeparationConfig)->Result<HashMap<(usize,usize),RunwayRelationship>> {
        let mut overrides: HashMap<(usize,usize),f64> = HashMap::new();
        for pm in &cfg.parallel_minima {
            let i = self.runway_index( &pm.runways.0).ok_or_else(|| config_error!("unknown runway {} in parallel minima", pm.runways.0))?;
            let j = self.runway_index( &pm.runways.1).ok_or_else(|| config_error!("unknown runway {} in parallel minima", pm.runways.1))?;
            overrides.insert( (i,j), pm.separation_nm);
            overrides.insert( (j,i), pm.separation_nm);
        }

        let mut relationships = HashMap::new();
        for (i,a) in self.runways.iter().enumerate() {
            for (j,b) in self.runways.iter().enumerate() {
                if a.pair_index != b.pair_index {
                    let rel = RunwayRelationship::new( a, b, overrides.get(&(i,j)).copied(), separation);
                    relationships.insert( (i,j), rel);
                }
            }
        }
        Ok(relationships)
    }

    #[inline] pub fn reference (&self)->GeoCoord { self.position.coord() }

    pub fn runway_index (&self, name: &str)->Option<usize> {
        self.runways.iter().position(|r| r.name == name)
    }

    pub fn runway (&self, idx: usize)->Option<&Runway> { self.runways.get(idx) }

    pub fn runway_mut (&mut self, idx: usize)->Option<&mut Runway> { self.runways.get_mut(idx) }

    pub fn runway_by_name (&self, name: &str)->Option<&Runway> {
        self.runways.iter().find(|r| r.name == name)
    }

    pub fn fix (&self, name: &str)->Option<&StaticPosition> { self.fixes.get(name) }

    /// relationship between runway ends of different physical runways
    pub fn relationship (&self, a: usize, b: usize)->Option<&RunwayRelationship> {
        self.relationships.get( &(a,b))
    }

    /// true for the two different ends of one physical runway
    pub fn is_opposite_end (&self, a: usize, b: usize)->bool {
        match (self.runways.get(a), self.runways.get(b)) {
            (Some(ra), Some(rb)) => a != b && ra.pair_index == rb.pair_index,
            _ => false
        }
    }

    /// inside the controlled airspace. Airports without airspace polygons use radar range and ceiling
    pub fn is_inside_airspace (&self, p: &Point2D, altitude: f64)->bool {
        if self.airspace.is_empty() {
            p.length() <= self.radar_range_km && altitude <= self.ceiling
        } else {
            self.airspace.iter().any(|a| a.contains( p, altitude))
        }
    }

    pub fn is_inside_radar_range (&self, p: &Point2D)->bool {
        p.length() <= self.radar_range_km
    }

    /// distance (km) to the closest airspace boundary, or to the radar range circle
    pub fn distance_to_boundary (&self, p: &Point2D)->f64 {
        if self.airspace.is_empty() {
            (self.radar_range_km - p.length()).abs()
        } else {
            self.airspace.iter().map(|a| a.distance_to_boundary(p)).fold( f64::INFINITY, f64::min)
        }
    }

    pub fn remove_from_all_runway_queues (&mut self, id: AircraftId) {
        for rwy in &mut self.runways {
            rwy.remove_from_queue(id);
        }
    }
}
