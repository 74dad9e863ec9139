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

//! RON configuration for the simulation.
//!
//! Configs are looked up by filename in (1) `$ODIN_ATC_CONFIG_DIR`, (2) `./configs` and (3) the
//! `configs/` dir of this crate. All tunables of [`SimConfig`] have defaults so that a config
//! file only has to list what it changes:
//! ```ron
//! SimConfig(
//!     separation: ( standard_minimum_km: 5.556 ),
//! )
//! ```

use std::{collections::BTreeMap, env, fs, path::{Path,PathBuf}};
use serde::{Serialize,Deserialize};
use tracing::debug;

use crate::geodesy::LatLonSpec;
use crate::pool::{SpawnDescriptor, ScheduledCommand};
use crate::errors::{Result, config_error};

pub const CONFIG_DIR_ENV: &str = "ODIN_ATC_CONFIG_DIR";

/* #region tunables *********************************************************************************************/

#[derive(Debug,Clone,Default,Serialize,Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub performance: PerformanceConfig,
    pub separation: SeparationConfig,
}

/// flight dynamics and autopilot constants
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub turn_rate_deg: f64,             // deg/s
    pub typical_climb_factor: f64,      // fraction of rated climb used without expedite
    pub typical_descent_factor: f64,
    pub ground_braking_factor: f64,
    pub nominal_bank_angle_deg: f64,    // for turn initiation distance
    pub tas_altitude_factor: f64,       // TAS = IAS * (1 + alt * f)
    pub wind_altitude_factor: f64,      // wind = speed * (1 + alt * f)
    pub hit_fall_rate_fps: f64,         // ft/s
    pub hit_speed_decay: f64,           // per second
    pub takeoff_turn_altitude_ft: f64,  // above runway
    pub taxi_time_secs: f64,
    pub speed_restriction_altitude_ft: f64,
    pub speed_restriction_kt: f64,
    pub waypoint_pass_distance_nm: f64,
    pub fly_by_max_distance_nm: f64,
    pub hold_capture_distance_nm: f64,
    pub hold_fix_crossing_nm: f64,
    pub default_faf_distance_nm: f64,
    pub localizer_capture_angle_deg: f64,
    pub localizer_established_ft: f64,
    pub localizer_established_heading_deg: f64,
    pub localizer_correction_gain: f64,
    pub localizer_max_correction_deg: f64,
    pub localizer_early_turn_nm: f64,
    pub landing_stop_speed_kt: f64,     // arrivals slower than this on the ground have landed
}

impl Default for PerformanceConfig {
    fn default()->Self {
        PerformanceConfig {
            turn_rate_deg: 3.0,
            typical_climb_factor: 0.7,
            typical_descent_factor: 0.7,
            ground_braking_factor: 3.5,
            nominal_bank_angle_deg: 25.0,
            tas_altitude_factor: 0.000016,
            wind_altitude_factor: 0.000045,
            hit_fall_rate_fps: 90.0,
            hit_speed_decay: 0.99,
            takeoff_turn_altitude_ft: 400.0,
            taxi_time_secs: 3.0,
            speed_restriction_altitude_ft: 10_000.0,
            speed_restriction_kt: 250.0,
            waypoint_pass_distance_nm: 0.5,
            fly_by_max_distance_nm: 5.0,
            hold_capture_distance_nm: 3.0,
            hold_fix_crossing_nm: 0.5,
            default_faf_distance_nm: 5.0,
            localizer_capture_angle_deg: 1.5,
            localizer_established_ft: 500.0,
            localizer_established_heading_deg: 5.0,
            localizer_correction_gain: 50.0,
            localizer_max_correction_deg: 10.0,
            localizer_early_turn_nm: 0.5,
            landing_stop_speed_kt: 1.0,
        }
    }
}

/// separation minima and conflict detection thresholds
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct SeparationConfig {
    pub bounding_box_nm: f64,
    pub max_radius_km: f64,
    pub standard_minimum_km: f64,
    pub vertical_minimum_ft: f64,
    pub conflict_buffer_km: f64,
    pub collision_lateral_km: f64,
    pub collision_vertical_ft: f64,
    pub runway_collision_km: f64,
    pub min_check_agl_ft: f64,
    pub takeoff_grace_secs: f64,
    pub passing_min_angle_deg: f64,
    pub head_on_angle_deg: f64,
    pub convergence_tolerance_deg: f64,
    pub parallel_max_angle_deg: f64,
}

impl Default for SeparationConfig {
    fn default()->Self {
        SeparationConfig {
            bounding_box_nm: 8.0,
            max_radius_km: 14.816,
            standard_minimum_km: 5.556,
            vertical_minimum_ft: 1000.0,
            conflict_buffer_km: 1.852,
            collision_lateral_km: 0.05,
            collision_vertical_ft: 160.0,
            runway_collision_km: 10.0,
            min_check_agl_ft: 990.0,
            takeoff_grace_secs: 60.0,
            passing_min_angle_deg: 15.0,
            head_on_angle_deg: 165.0,
            convergence_tolerance_deg: 9.9,
            parallel_max_angle_deg: 10.0,
        }
    }
}

/* #endregion tunables */

/* #region airport data *****************************************************************************************/

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct AirportConfig {
    pub icao: String,
    pub name: String,
    pub position: LatLonSpec,         // airport reference point, elevation is the airport elevation
    pub magnetic_variation_deg: f64,  // east positive
    pub radar_range_nm: f64,
    pub ceiling_ft: f64,              // used if there is no airspace polygon

    #[serde(default)]
    pub wind: WindConfig,

    pub runways: Vec<RunwayPairConfig>,

    #[serde(default)]
    pub airspace: Vec<AirspaceConfig>,

    #[serde(default)]
    pub fixes: BTreeMap<String,LatLonSpec>,

    /// explicit lateral minima for runway end pairs, overriding the centerline offset table
    #[serde(default)]
    pub parallel_minima: Vec<ParallelMinimumConfig>,
}

#[derive(Debug,Clone,Default,Serialize,Deserialize)]
pub struct WindConfig {
    pub speed_kt: f64,
    pub direction_deg: f64, // where the wind is coming from (magnetic)
}

/// a physical runway, given as its two ends
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct RunwayPairConfig {
    pub ends: Vec<RunwayEndConfig>,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct RunwayEndConfig {
    pub name: String,
    pub threshold: LatLonSpec,

    #[serde(default)]
    pub ils: IlsConfig,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct IlsConfig {
    pub enabled: bool,
    pub glideslope_deg: f64,
    pub loc_range_nm: f64,
    pub faf_distance_nm: Option<f64>,
}

impl Default for IlsConfig {
    fn default()->Self {
        IlsConfig { enabled: true, glideslope_deg: 3.0, loc_range_nm: 25.0, faf_distance_nm: None }
    }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct AirspaceConfig {
    pub poly: Vec<LatLonSpec>,
    pub floor_ft: f64,
    pub ceiling_ft: f64,
    pub airspace_class: String,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ParallelMinimumConfig {
    pub runways: (String,String),
    pub separation_nm: f64,
}

/* #endregion airport data */

/// what the `run_scenario` binary executes
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ScenarioConfig {
    pub airport: String,         // config filename
    pub aircraft_types: String,  // config filename

    #[serde(default)]
    pub sim: Option<String>,     // config filename, defaults if not set

    pub aircraft: Vec<SpawnDescriptor>,

    #[serde(default)]
    pub commands: Vec<ScheduledCommand>,
}

/* #region loading **********************************************************************************************/

fn config_dirs ()->Vec<PathBuf> {
    let mut dirs = Vec::with_capacity(3);
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        dirs.push( PathBuf::from(dir));
    }
    dirs.push( PathBuf::from("configs"));
    dirs.push( Path::new( env!("CARGO_MANIFEST_DIR")).join("configs"));
    dirs
}

/// find `filename` in the config dirs. Absolute paths are taken as they are
pub fn find_config (filename: &str)->Result<PathBuf> {
    let p = Path::new(filename);
    if p.is_absolute() || p.is_file() {
        return if p.is_file() { Ok(p.to_path_buf()) } else { Err( config_error!("config file not found: {}", filename)) }
    }

    for dir in config_dirs() {
        let path = dir.join(filename);
        if path.is_file() {
            debug!("using config {:?}", path);
            return Ok(path)
        }
    }
    Err( config_error!("config file {} not found in config dirs", filename))
}

pub fn load_config<C> (filename: &str)->Result<C> where C: for <'a> Deserialize<'a> {
    load_config_path( find_config(filename)?)
}

pub fn load_config_path<C,P> (path: P)->Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = fs::read( path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/* #endregion loading */
