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

use std::collections::VecDeque;
use std::f64::consts::PI;
use serde::Serialize;
use tracing::warn;

use crate::aircraft::AircraftId;
use crate::config::{RunwayEndConfig, SeparationConfig};
use crate::position::{GeoCoord, GeoPosition, StaticPosition};
use crate::vec2::{Point2D, angle_difference, course_offset, normalize_radians, ray_intersection, RayIntersection};
use crate::units::{km_to_ft, km_to_nm, nm_to_km, ft_to_km};
use crate::errors::Result;

#[derive(Debug,Clone,Serialize)]
pub struct Ils {
    pub enabled: bool,
    pub glideslope_gradient: f64, // radians
    pub loc_range_km: f64,
    pub faf_distance_nm: Option<f64>,
}

/// one end of a physical runway. Landing and departing traffic on this end flies `angle`
#[derive(Debug,Clone,Serialize)]
pub struct Runway {
    pub name: String,
    pub pair_index: usize, // index of the physical runway this end belongs to
    pub position: StaticPosition, // threshold
    pub angle: f64,        // magnetic, radians
    pub length_km: f64,
    pub elevation: f64,    // ft
    pub ils: Ils,

    #[serde(skip)]
    pub queue: VecDeque<AircraftId>,

    #[serde(skip)]
    pub last_departure: Option<AircraftId>,
}

impl Runway {
    /// build the end `this` of a physical runway whose opposite end is `other`
    pub fn new (pair_index: usize, this: &RunwayEndConfig, other: &RunwayEndConfig, reference: GeoCoord, magnetic_north: f64)->Result<Self> {
        let position = StaticPosition::from_spec( &this.threshold, Some(reference), magnetic_north)?;
        let far_end = StaticPosition::from_spec( &other.threshold, Some(reference), magnetic_north)?;

        let angle = position.bearing_to( &far_end);
        let length_km = nm_to_km( position.distance_to( &far_end));
        let elevation = position.elevation();

        let ils = Ils {
            enabled: this.ils.enabled,
            glideslope_gradient: this.ils.glideslope_deg.to_radians(),
            loc_range_km: nm_to_km( this.ils.loc_range_nm),
            faf_distance_nm: this.ils.faf_distance_nm,
        };

        Ok( Runway { name: this.name.clone(), pair_index, position, angle, length_km, elevation, ils, queue: VecDeque::new(), last_departure: None } )
    }

    #[inline] pub fn relative_position (&self)->Point2D { self.position.relative_position() }

    /// altitude (ft) of the glideslope at `distance_km` before the threshold
    pub fn glideslope_altitude (&self, distance_km: f64)->f64 {
        self.elevation + self.ils.glideslope_gradient.tan() * km_to_ft( distance_km.max(0.0))
    }

    /// (lateral, along, total) offset of `p` from the extended centerline, lateral positive right
    /// of the landing direction, along positive past the threshold
    pub fn offset (&self, p: &Point2D)->(f64,f64,f64) {
        course_offset( p, &self.relative_position(), self.angle)
    }

    /// along-track distance (km) from `p` to the threshold, negative once past it
    pub fn distance_to_go (&self, p: &Point2D)->f64 {
        let (_,along,_) = self.offset(p);
        -along
    }

    pub fn faf_distance_nm (&self, default_nm: f64)->f64 {
        self.ils.faf_distance_nm.unwrap_or( default_nm)
    }

    //--- takeoff queue

    pub fn add_to_queue (&mut self, id: AircraftId) {
        if !self.queue.contains(&id) {
            self.queue.push_back(id)
        }
    }

    pub fn remove_from_queue (&mut self, id: AircraftId)->bool {
        if let Some(idx) = self.queue.iter().position(|e| *e == id) {
            self.queue.remove(idx);
            true
        } else {
            false
        }
    }

    pub fn queue_position (&self, id: AircraftId)->Option<usize> {
        self.queue.iter().position(|e| *e == id)
    }

    pub fn is_queue_head (&self, id: AircraftId)->bool {
        self.queue.front() == Some(&id)
    }
}

/// derived facts about two runway ends of different physical runways
#[derive(Debug,Clone,Serialize)]
pub struct RunwayRelationship {
    pub angle: f64,              // absolute difference of runway angles, radians
    pub lateral_offset_ft: f64,  // centerline distance, measured from the first runway
    pub converging: bool,
    pub parallel: bool,
    pub separation_minimum_nm: f64,
}

/// lateral separation between simultaneous approaches to parallel runways, by centerline distance
pub fn parallel_separation_minimum_nm (lateral_offset_ft: f64, standard_nm: f64)->f64 {
    if lateral_offset_ft < 2500.0 {
        standard_nm
    } else if lateral_offset_ft < 3600.0 {
        1.0
    } else if lateral_offset_ft < 9000.0 {
        1.5
    } else {
        0.0 // independent approaches
    }
}

impl RunwayRelationship {
    pub fn new (a: &Runway, b: &Runway, override_nm: Option<f64>, cfg: &SeparationConfig)->Self {
        let angle = angle_difference( a.angle, b.angle).abs();
        let (lateral,_,_) = a.offset( &b.relative_position());
        let lateral_offset_ft = km_to_ft( lateral.abs());

        // final approach courses extend outward from the thresholds
        let converging = matches!(
            ray_intersection( &a.relative_position(), normalize_radians(a.angle + PI), &b.relative_position(), normalize_radians(b.angle + PI), cfg.parallel_max_angle_deg),
            RayIntersection::Point(_)
        );
        let parallel = angle < cfg.parallel_max_angle_deg.to_radians();

        let separation_minimum_nm = match override_nm {
            Some(nm) => nm,
            None => parallel_separation_minimum_nm( lateral_offset_ft, km_to_nm( cfg.standard_minimum_km))
        };

        RunwayRelationship { angle, lateral_offset_ft, converging, parallel, separation_minimum_nm }
    }

    pub fn separation_minimum_km (&self)->f64 { nm_to_km( self.separation_minimum_nm) }
}
