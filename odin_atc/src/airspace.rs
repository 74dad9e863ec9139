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

use geo::{Centroid, LineString, Polygon};
use serde::Serialize;
use tracing::warn;

use crate::config::AirspaceConfig;
use crate::position::{GeoCoord, GeoPosition, StaticPosition};
use crate::vec2::{Point2D, point_in_polygon, distance_to_polygon};
use crate::errors::{Result, config_error};

/// a controlled airspace volume given as polygon with floor and ceiling
#[derive(Debug,Clone,Serialize)]
pub struct Airspace {
    pub poly: Vec<StaticPosition>,
    pub relative_poly: Vec<Point2D>,
    pub floor: f64,   // ft
    pub ceiling: f64, // ft
    pub airspace_class: String,
    pub label_position: Point2D,
}

impl Airspace {
    pub fn new (cfg: &AirspaceConfig, reference: GeoCoord, magnetic_north: f64)->Result<Self> {
        let mut poly = Vec::with_capacity( cfg.poly.len());
        for spec in &cfg.poly {
            poly.push( StaticPosition::from_spec( spec, Some(reference), magnetic_north)?);
        }

        // polygons are implicitly closed
        if poly.len() > 1 && poly.first().map(|p| p.coord()) == poly.last().map(|p| p.coord()) {
            poly.pop();
        }
        if poly.len() < 3 {
            return Err( config_error!("airspace {} needs at least 3 distinct vertices, got {}", cfg.airspace_class, poly.len()))
        }
        if cfg.floor_ft > cfg.ceiling_ft {
            return Err( config_error!("airspace {} floor above ceiling", cfg.airspace_class))
        }

        let relative_poly: Vec<Point2D> = poly.iter().map(|p| p.relative_position()).collect();
        let label_position = centroid( &relative_poly);

        Ok( Airspace {
            poly,
            relative_poly,
            floor: cfg.floor_ft,
            ceiling: cfg.ceiling_ft,
            airspace_class: cfg.airspace_class.clone(),
            label_position
        })
    }

    pub fn contains (&self, p: &Point2D, altitude: f64)->bool {
        self.floor <= altitude && altitude <= self.ceiling && point_in_polygon( p, &self.relative_poly)
    }

    /// lateral distance (km) from `p` to the closest polygon edge
    pub fn distance_to_boundary (&self, p: &Point2D)->f64 {
        distance_to_polygon( p, &self.relative_poly)
    }
}

fn centroid (vertices: &[Point2D])->Point2D {
    let ls: LineString<f64> = vertices.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>().into();
    match Polygon::new( ls, vec![]).centroid() {
        Some(c) => Point2D::new( c.x(), c.y()),
        None => {
            warn!("degenerate airspace polygon, using vertex mean as label position");
            let n = vertices.len().max(1) as f64;
            let sum = vertices.iter().fold( Point2D::ORIGIN, |acc,p| acc + *p);
            sum * (1.0 / n)
        }
    }
}
