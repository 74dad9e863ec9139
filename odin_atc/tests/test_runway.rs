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

use std::f64::consts::PI;
use odin_atc::airport::Airport;
use odin_atc::aircraft::AircraftId;
use odin_atc::config::{ParallelMinimumConfig, SeparationConfig};
use odin_atc::runway::parallel_separation_minimum_nm;
use odin_atc::vec2::{Point2D, angle_difference};
use odin_atc::units::{nm_to_km, km_to_ft};

// run with "cargo test test_runway_geometry -- --nocapture"

#[test]
fn test_runway_geometry() {
    let ctx = test_context();
    let airport = &ctx.airport;
    assert_eq!( airport.runways.len(), 4);

    let r36l = airport.runway_by_name("36L").unwrap();
    let r18r = airport.runway_by_name("18R").unwrap();
    println!("36L: angle {}°, length {} km, threshold at {}", r36l.angle.to_degrees(), r36l.length_km, r36l.relative_position());

    assert!( angle_difference( r36l.angle, 0.0).abs() < 1e-9);
    assert!( angle_difference( r18r.angle, PI).abs() < 1e-9);
    assert!( (r36l.length_km - 4.4478).abs() < 1e-3);
    assert_eq!( r36l.pair_index, r18r.pair_index);

    // 5km south of the threshold on the extended centerline
    let datum = r36l.relative_position();
    let p = Point2D::new( datum.x, datum.y - 5.0);
    let (lateral, along, _) = r36l.offset( &p);
    assert!( lateral.abs() < 1e-9);
    assert!( (r36l.distance_to_go( &p) - 5.0).abs() < 1e-9);

    // 1km east of the centerline is right of course for a northbound runway
    let (lateral,_,_) = r36l.offset( &Point2D::new( datum.x + 1.0, datum.y - 5.0));
    assert!( (lateral - 1.0).abs() < 1e-9);

    assert_eq!( r36l.faf_distance_nm( 5.0), 5.0);
}

#[test]
fn test_glideslope() {
    let ctx = test_context();
    let rwy = ctx.airport.runway_by_name("36L").unwrap();

    let alt = rwy.glideslope_altitude( nm_to_km(2.0));
    println!("glideslope at 2nm: {} ft", alt);
    assert!( (alt - 637.0).abs() < 25.0);

    assert_eq!( rwy.glideslope_altitude( 0.0), rwy.elevation);
    assert_eq!( rwy.glideslope_altitude( -1.0), rwy.elevation);
    assert!( rwy.glideslope_altitude( nm_to_km(10.0)) > 3000.0);
}

#[test]
fn test_parallel_minimum_table() {
    assert_eq!( parallel_separation_minimum_nm( 2000.0, 3.0), 3.0);
    assert_eq!( parallel_separation_minimum_nm( 3000.0, 3.0), 1.0);
    assert_eq!( parallel_separation_minimum_nm( 5000.0, 3.0), 1.5);
    assert_eq!( parallel_separation_minimum_nm( 9500.0, 3.0), 0.0);
}

#[test]
fn test_runway_relationships() {
    let ctx = test_context();
    let airport = &ctx.airport;
    let i36l = airport.runway_index("36L").unwrap();
    let i18r = airport.runway_index("18R").unwrap();
    let i36r = airport.runway_index("36R").unwrap();
    let i18l = airport.runway_index("18L").unwrap();

    let rel = airport.relationship( i36l, i36r).unwrap();
    println!("36L/36R: {:?}", rel);
    assert!( rel.parallel);
    assert!( !rel.converging);
    assert!( (rel.lateral_offset_ft - 2991.0).abs() < 5.0);
    assert_eq!( rel.separation_minimum_nm, 1.0);
    assert!( (rel.separation_minimum_km() - 1.852).abs() < 1e-9);

    let rel = airport.relationship( i36l, i18l).unwrap();
    assert!( !rel.parallel);
    assert!( (rel.angle - PI).abs() < 1e-9);

    // ends of the same physical runway have no relationship, they are opposite ends
    assert!( airport.relationship( i36l, i18r).is_none());
    assert!( airport.is_opposite_end( i36l, i18r));
    assert!( !airport.is_opposite_end( i36l, i36r));
    assert!( !airport.is_opposite_end( i36l, i36l));
}

#[test]
fn test_parallel_minimum_override() {
    let mut cfg = test_airport_config();
    cfg.parallel_minima.push( ParallelMinimumConfig { runways: ("36L".to_string(), "36R".to_string()), separation_nm: 2.0 });
    let ctx = test_context_from( &cfg);
    let airport = &ctx.airport;

    let i36l = airport.runway_index("36L").unwrap();
    let i36r = airport.runway_index("36R").unwrap();
    assert_eq!( airport.relationship( i36l, i36r).unwrap().separation_minimum_nm, 2.0);
    assert_eq!( airport.relationship( i36r, i36l).unwrap().separation_minimum_nm, 2.0);

    let mut cfg = test_airport_config();
    cfg.parallel_minima.push( ParallelMinimumConfig { runways: ("36L".to_string(), "09".to_string()), separation_nm: 2.0 });
    assert!( Airport::from_config( &cfg, &SeparationConfig::default()).is_err());
}

#[test]
fn test_invalid_runways() {
    let mut cfg = test_airport_config();
    cfg.runways[0].ends.pop();
    assert!( Airport::from_config( &cfg, &SeparationConfig::default()).is_err());

    let mut cfg = test_airport_config();
    cfg.runways[1].ends[0].name = "36L".to_string();
    assert!( Airport::from_config( &cfg, &SeparationConfig::default()).is_err());
}

#[test]
fn test_takeoff_queue() {
    let mut ctx = test_context();
    let rwy = ctx.airport.runway_mut(0).unwrap();
    let (a, b) = (AircraftId(1), AircraftId(2));

    rwy.add_to_queue( a);
    rwy.add_to_queue( b);
    rwy.add_to_queue( a);
    assert_eq!( rwy.queue.len(), 2);
    assert!( rwy.is_queue_head( a));
    assert_eq!( rwy.queue_position( b), Some(1));

    assert!( rwy.remove_from_queue( a));
    assert!( !rwy.remove_from_queue( a));
    assert!( rwy.is_queue_head( b));

    ctx.airport.remove_from_all_runway_queues( b);
    assert!( ctx.airport.runways.iter().all(|r| r.queue.is_empty()));
}

#[test]
fn test_airspace() {
    let ctx = test_context();
    let airport = &ctx.airport;
    let airspace = &airport.airspace[0];

    assert_eq!( airspace.relative_poly.len(), 4); // closing vertex dropped
    println!("airspace label at {}", airspace.label_position);
    assert!( airspace.label_position.length() < 0.1);

    assert!( airport.is_inside_airspace( &Point2D::ORIGIN, 5000.0));
    assert!( !airport.is_inside_airspace( &Point2D::ORIGIN, 12000.0));
    assert!( !airport.is_inside_airspace( &Point2D::new( 0.0, 70.0), 5000.0));
    assert!( (airport.distance_to_boundary( &Point2D::ORIGIN) - 55.6).abs() < 0.1);

    // without polygons the radar range and ceiling define the airspace
    let mut cfg = test_airport_config();
    cfg.airspace.clear();
    let ctx = test_context_from( &cfg);
    assert!( ctx.airport.is_inside_airspace( &Point2D::new( 0.0, 70.0), 5000.0));
    assert!( !ctx.airport.is_inside_airspace( &Point2D::new( 0.0, 80.0), 5000.0));
    assert!( !ctx.airport.is_inside_airspace( &Point2D::ORIGIN, 10001.0));

    // degenerate polygons are rejected
    let mut cfg = test_airport_config();
    cfg.airspace[0].poly.truncate(2);
    assert!( Airport::from_config( &cfg, &SeparationConfig::default()).is_err());
}

#[test]
fn test_load_ksea() {
    let airport = Airport::load( "ksea.ron", &SeparationConfig::default()).unwrap();
    println!("{} {}: {} runway ends, {} fixes", airport.icao, airport.name, airport.runways.len(), airport.fixes.len());

    assert_eq!( airport.icao, "KSEA");
    assert_eq!( airport.runways.len(), 6);
    assert_eq!( airport.fixes.len(), 6);
    assert_eq!( airport.airspace[0].relative_poly.len(), 6);
    assert_eq!( airport.elevation, 433.0);

    let r16l = airport.runway_by_name("16L").unwrap();
    let hdg = r16l.angle.to_degrees();
    println!("16L magnetic heading: {}", hdg);
    assert!( hdg > 160.0 && hdg < 170.0);
    assert_eq!( r16l.ils.faf_distance_nm, Some(5.0));

    let i16l = airport.runway_index("16L").unwrap();
    let i16c = airport.runway_index("16C").unwrap();
    let i16r = airport.runway_index("16R").unwrap();
    assert_eq!( airport.relationship( i16l, i16r).unwrap().separation_minimum_nm, 1.0);

    let rel = airport.relationship( i16l, i16c).unwrap();
    assert!( rel.parallel);
    assert!( rel.lateral_offset_ft < 2500.0);
    assert!( (rel.separation_minimum_nm - 3.0).abs() < 1e-9);
}
