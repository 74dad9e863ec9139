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

use std::f64::consts::{PI, FRAC_PI_2};
use odin_atc::geodesy::*;
use odin_atc::vec2::*;
use odin_atc::units::*;

// run with "cargo test test_great_circle -- --nocapture"

#[test]
fn test_great_circle() {
    let d_km = great_circle_distance_km( 0.0, 0.0, 1.0, 0.0);
    let d_nm = great_circle_distance_nm( 0.0, 0.0, 1.0, 0.0);
    println!("1° of latitude: {} km, {} nm", d_km, d_nm);
    assert!( (d_km - 6371.0 * PI / 180.0).abs() < 1e-9);
    assert!( (d_nm - 3440.0 * PI / 180.0).abs() < 1e-9);

    assert!( initial_bearing( 0.0, 0.0, 1.0, 0.0).abs() < 1e-12);
    assert!( (initial_bearing( 0.0, 0.0, 0.0, 1.0) - FRAC_PI_2).abs() < 1e-12);
    assert!( (initial_bearing( 0.0, 0.0, -1.0, 0.0) - PI).abs() < 1e-12);
    assert!( (initial_bearing( 0.0, 0.0, 0.0, -1.0) - 3.0 * FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn test_destination() {
    let (lat0, lon0) = (47.45, -122.31);
    let (lat, lon) = destination( lat0, lon0, 1.0, 25.0);
    println!("25nm on bearing 1.0 rad from ({lat0},{lon0}): ({lat},{lon})");

    let d = great_circle_distance_nm( lat0, lon0, lat, lon);
    let b = initial_bearing( lat0, lon0, lat, lon);
    assert!( (d - 25.0).abs() < 1e-6);
    assert!( (b - 1.0).abs() < 1e-6);
}

#[test]
fn test_parse_coordinates() {
    let lat = parse_coordinate("N47d26m56.04").unwrap();
    let lon = parse_coordinate("W122d18m33").unwrap();
    println!("N47d26m56.04 = {}, W122d18m33 = {}", lat, lon);
    assert!( (lat - (47.0 + 26.0/60.0 + 56.04/3600.0)).abs() < 1e-12);
    assert!( (lon + (122.0 + 18.0/60.0 + 33.0/3600.0)).abs() < 1e-12);

    assert_eq!( parse_coordinate("S33").unwrap(), -33.0);
    assert_eq!( parse_coordinate(" -122.5 ").unwrap(), -122.5);
    assert!( parse_coordinate("X12d30").is_err());
    assert!( parse_coordinate("north").is_err());

    assert_eq!( parse_elevation("433ft").unwrap(), 433.0);
    assert!( (parse_elevation("100m").unwrap() - 328.0839895).abs() < 1e-6);
    assert_eq!( parse_elevation("Infinity").unwrap(), f64::INFINITY);
    assert!( parse_elevation("high").is_err());
}

#[test]
fn test_latlon_spec() {
    let spec: LatLonSpec = ron::from_str( r#"["N47d26m56", "W122d18m33", "433ft"]"#).unwrap();
    let (lat,lon,elev) = spec.resolve().unwrap();
    println!("{:?} -> ({lat},{lon},{elev})", spec);
    assert!( (lat - 47.448888).abs() < 1e-5);
    assert!( (lon + 122.309166).abs() < 1e-5);
    assert_eq!( elev, 433.0);

    let spec: LatLonSpec = ron::from_str( "[47.5, -122.25]").unwrap();
    assert_eq!( spec.resolve().unwrap(), (47.5, -122.25, 0.0));

    let spec: LatLonSpec = ron::from_str( "[47.5, -122.25, 120.0]").unwrap();
    assert_eq!( spec.resolve().unwrap().2, 120.0);

    assert!( ron::from_str::<LatLonSpec>( "[47.5]").is_err());
    assert!( ron::from_str::<LatLonSpec>( "[1.0, 2.0, 3.0, 4.0]").is_err());
    assert!( LatLonSpec::from_degrees( 91.0, 0.0).resolve().is_err());
}

#[test]
fn test_angles() {
    assert!( (radial_angle( &Point2D::new(1.0,0.0)) - FRAC_PI_2).abs() < 1e-12);
    assert!( radial_angle( &Point2D::new(0.0,1.0)).abs() < 1e-12);

    assert!( (normalize_radians( -FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
    assert!( (normalize_radians( 5.0 * PI) - PI).abs() < 1e-12);

    let d = angle_difference( 0.1, 2.0 * PI - 0.1);
    println!("angle_difference(0.1, 2π-0.1) = {}", d);
    assert!( (d - 0.2).abs() < 1e-12);
    assert!( (angle_difference( 2.0 * PI - 0.1, 0.1) + 0.2).abs() < 1e-12);

    // rotating by magnetic variation turns true north into a negative magnetic radial
    let p = Point2D::new( 0.0, 1.0).rotate( 10f64.to_radians());
    assert!( (p.radial() + 10f64.to_radians()).abs() < 1e-12);
}

#[test]
fn test_tuple_ops() {
    assert_eq!( vector_length( &[3.0, 4.0]), 5.0);
    assert_eq!( add( &[1.0, 2.0], &[3.0, 4.0]), Some( vec![4.0, 6.0]));
    assert_eq!( subtract( &[1.0, 2.0, 3.0], &[1.0, 1.0, 1.0]), Some( vec![0.0, 1.0, 2.0]));
    assert_eq!( scale( &[1.0, -2.0], 2.0), Some( vec![2.0, -4.0]));

    assert_eq!( add( &[1.0, 2.0], &[3.0]), None);
    assert_eq!( add( &[1.0, f64::NAN], &[3.0, 4.0]), None);
    assert_eq!( scale( &[1.0], f64::INFINITY), None);
}

#[test]
fn test_ray_intersection() {
    let origin = Point2D::ORIGIN;

    // north from origin, west from (5,5): cross at (0,5)
    let r = ray_intersection( &origin, 0.0, &Point2D::new(5.0,5.0), 3.0 * FRAC_PI_2, 9.9);
    println!("converging: {:?}", r);
    let p = r.point().unwrap();
    assert!( p.x.abs() < 1e-9 && (p.y - 5.0).abs() < 1e-9);

    // east from (5,5) never meets the northbound ray
    assert_eq!( ray_intersection( &origin, 0.0, &Point2D::new(5.0,5.0), FRAC_PI_2, 9.9), RayIntersection::None);

    // same line, same direction
    assert_eq!( ray_intersection( &origin, 0.0, &Point2D::new(0.0,5.0), 0.0, 9.9), RayIntersection::Collinear);

    // parallel but offset
    assert_eq!( ray_intersection( &origin, 0.0, &Point2D::new(1.0,0.0), 0.0, 9.9), RayIntersection::None);

    // within tolerance of parallel counts as parallel
    assert_eq!( ray_intersection( &origin, 0.0, &Point2D::new(1.0,0.0), 5f64.to_radians(), 9.9), RayIntersection::None);
}

#[test]
fn test_polygons() {
    let square = [ Point2D::new(0.0,0.0), Point2D::new(1.0,0.0), Point2D::new(1.0,1.0), Point2D::new(0.0,1.0) ];

    assert!( point_in_polygon( &Point2D::new(0.5,0.5), &square));
    assert!( !point_in_polygon( &Point2D::new(1.5,0.5), &square));
    assert!( !point_in_polygon( &Point2D::new(0.5,0.5), &square[..2]));

    assert!( (distance_to_polygon( &Point2D::new(0.5,2.0), &square) - 1.0).abs() < 1e-12);
    assert!( (distance_to_polygon( &Point2D::new(2.0,2.0), &square) - 2f64.sqrt()).abs() < 1e-12);
    assert!( (distance_to_polygon( &Point2D::new(0.5,0.25), &square) - 0.25).abs() < 1e-12);

    // a degenerate edge reduces to the vertex distance
    let a = Point2D::new(1.0,1.0);
    assert!( (distance_to_segment( &Point2D::new(4.0,5.0), &a, &a) - 5.0).abs() < 1e-12);

    assert_eq!( distance_to_polygon( &Point2D::ORIGIN, &[]), f64::INFINITY);
}

#[test]
fn test_course_offset() {
    let (lateral, along, total) = course_offset( &Point2D::new(1.0,-3.0), &Point2D::ORIGIN, 0.0);
    println!("offset from northbound course: lateral={lateral} along={along} total={total}");
    assert!( (lateral - 1.0).abs() < 1e-12);
    assert!( (along + 3.0).abs() < 1e-12);
    assert!( (total - 10f64.sqrt()).abs() < 1e-12);

    // eastbound course: a point north of it is left of course
    let (lateral, along, _) = course_offset( &Point2D::new(2.0,1.0), &Point2D::ORIGIN, FRAC_PI_2);
    assert!( (lateral + 1.0).abs() < 1e-12);
    assert!( (along - 2.0).abs() < 1e-12);
}

#[test]
fn test_units() {
    assert!( (nm_to_km(1.0) - 1.852).abs() < 1e-12);
    assert!( (km_to_nm(1.852) - 1.0).abs() < 1e-12);
    assert!( (nm_to_ft(1.0) - 6076.115).abs() < 1e-3);
    assert!( (km_to_ft( ft_to_km(1234.0)) - 1234.0).abs() < 1e-9);
    assert_eq!( nm_travelled( 360.0, 10.0), 1.0);
}
