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

//! the aircraft population: spawning, the per-tick update, conflict bookkeeping, removal,
//! controller clearances and the query surface for displays.
//!
//! The pool owns the [`SimContext`] and all aircraft. A tick is a single synchronous call of
//! [`AircraftPool::update`], which completes all per-aircraft and pairwise work before it returns

use std::collections::{BTreeMap,HashMap};
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};

use crate::SimContext;
use crate::aircraft::{
    Aircraft, AircraftId, Category, FlightPhase, HeadingMode, AltitudeMode, SpeedMode, Mcp, Target, TurnDirection,
    KinematicState, autopilot, physics, phase
};
use crate::aircraft::fms::{Fms, WaypointSpec, HoldParameters, LegLength, Waypoint};
use crate::conflict::{Conflict, ConflictCheck, PairKey, in_bounding_box};
use crate::events::{EventLog, GameEventKind};
use crate::geodesy::LatLonSpec;
use crate::position::{DynamicPosition, GeoCoord, GeoPosition};
use crate::vec2::{Point2D, normalize_radians};
use crate::units::km_to_nm;
use crate::errors::{OdinAtcError, Result, config_error, op_failed};

/// altitude above ground (ft) an aircraft climbs to on a go-around, if not assigned higher
pub const GO_AROUND_ALTITUDE_AGL: f64 = 2000.0;

/// what is needed to create an aircraft. Routes are already resolved into named fixes
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SpawnDescriptor {
    pub category: Category,
    pub callsign: String,
    #[serde(default)]
    pub airline: String,
    #[serde(default)]
    pub altitude: f64,              // ft, ignored for departures
    #[serde(default)]
    pub speed: f64,                 // kt, ignored for departures
    #[serde(default)]
    pub heading: Option<f64>,       // magnetic degrees
    #[serde(default)]
    pub position: Option<LatLonSpec>,
    pub icao: String,               // aircraft type
    #[serde(default)]
    pub model: Option<String>,      // display name, defaults to the type name
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub waypoints: Vec<WaypointSpec>,
    #[serde(default)]
    pub phase: Option<FlightPhase>,
    #[serde(default)]
    pub flight_plan_altitude: Option<f64>,
    #[serde(default)]
    pub departure_runway: Option<String>,
    #[serde(default)]
    pub arrival_runway: Option<String>,
}

/// an already parsed controller clearance
#[derive(Debug,Clone,Serialize,Deserialize)]
pub enum Command {
    Heading { heading_deg: f64, #[serde(default)] turn: Option<TurnDirection> },
    Altitude { altitude_ft: f64, #[serde(default)] expedite: bool },
    Speed { speed_kt: f64 },
    Direct { fix: String },
    Hold {
        fix: String,
        #[serde(default)] turn: Option<TurnDirection>,
        #[serde(default)] leg: Option<LegLength>,
        #[serde(default)] inbound_deg: Option<f64>
    },
    ResumeRoute,
    Taxi { runway: String },
    Takeoff,
    ClearApproach { runway: String },
    GoAround,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ScheduledCommand {
    pub at_secs: f64,
    pub callsign: String,
    pub command: Command,
}

/// alert state of an aircraft, derived from its conflicts
#[derive(Debug,Clone,Copy,Default,PartialEq,Eq,Serialize)]
pub struct AlertState {
    pub conflict: bool,
    pub violation: bool,
}

/// what a flight strip shows
#[derive(Debug,Clone,Serialize)]
pub struct StripData {
    pub callsign: String,
    pub icao: String,
    pub category: Category,
    pub phase: FlightPhase,
    pub altitude: f64,
    pub target_altitude: f64,
    pub speed: f64,
    pub target_speed: f64,
    pub heading_deg: f64,
    pub target_heading_deg: f64,
    pub runway: Option<String>,
    pub next_fix: Option<String>,
    pub route: String,
    pub alert: AlertState,
}

fn lookup_mut<'a> (aircraft: &'a mut BTreeMap<AircraftId,Aircraft>, callsigns: &HashMap<String,AircraftId>, callsign: &str)->Result<&'a mut Aircraft> {
    callsigns.get(callsign)
        .and_then(|id| aircraft.get_mut(id))
        .ok_or_else(|| OdinAtcError::UnknownAircraft( callsign.to_string()))
}

pub struct AircraftPool {
    ctx: SimContext,
    aircraft: BTreeMap<AircraftId,Aircraft>,
    callsigns: HashMap<String,AircraftId>,
    conflicts: HashMap<PairKey,Conflict>,
    events: EventLog,
    next_id: u64,
}

impl AircraftPool {
    pub fn new (ctx: SimContext)->Self {
        AircraftPool {
            ctx,
            aircraft: BTreeMap::new(),
            callsigns: HashMap::new(),
            conflicts: HashMap::new(),
            events: EventLog::default(),
            next_id: 1,
        }
    }

    /* #region spawn ****************************************************************************************/

    pub fn spawn (&mut self, desc: &SpawnDescriptor)->Result<AircraftId> {
        if self.callsigns.contains_key( &desc.callsign) {
            return Err( OdinAtcError::DuplicateCallsign( desc.callsign.clone()))
        }

        let ctx = &self.ctx;
        let airport = &ctx.airport;
        let model = ctx.aircraft_types.get( &desc.icao).cloned()
            .ok_or_else(|| OdinAtcError::UnknownAircraftType( desc.icao.clone()))?;

        let runway_idx = |name: &Option<String>|->Result<Option<usize>> {
            match name {
                Some(name) => airport.runway_index(name).map(Some).ok_or_else(|| OdinAtcError::UnknownRunway( name.clone())),
                None => Ok(None)
            }
        };
        let departure_runway = runway_idx( &desc.departure_runway)?;
        let arrival_runway = runway_idx( &desc.arrival_runway)?;

        let mut waypoints = Vec::with_capacity( desc.waypoints.len());
        for spec in &desc.waypoints {
            waypoints.push( spec.resolve( airport)?);
        }

        let phase = match (desc.category, desc.phase) {
            (Category::Departure, None | Some(FlightPhase::Apron)) => FlightPhase::Apron,
            (Category::Arrival, None) => FlightPhase::Cruise,
            (Category::Arrival, Some(p @ (FlightPhase::Cruise | FlightPhase::Descent | FlightPhase::Approach))) => p,
            (cat, Some(p)) => return Err( op_failed!("{} cannot spawn as {} in phase {}", desc.callsign, cat, p))
        };

        let coord = match &desc.position {
            Some(spec) => {
                let (lat,lon,_) = spec.resolve()?;
                GeoCoord::new( lat, lon)
            }
            None => match desc.category {
                Category::Departure => departure_runway.and_then(|i| airport.runway(i)).map(|r| r.position.coord()).unwrap_or( airport.reference()),
                Category::Arrival => waypoints.first().map(|wp| wp.position.coord())
                    .ok_or_else(|| op_failed!("arrival {} needs a position or a route", desc.callsign))?
            }
        };
        let position = DynamicPosition::new( coord, airport.elevation, Some(airport.reference()), airport.magnetic_north);

        let (altitude, speed) = match desc.category {
            Category::Departure => (departure_runway.and_then(|i| airport.runway(i)).map(|r| r.elevation).unwrap_or( airport.elevation), 0.0),
            Category::Arrival => (desc.altitude, desc.speed)
        };
        if desc.category == Category::Arrival {
            let ground = arrival_runway.and_then(|i| airport.runway(i)).map(|r| r.elevation).unwrap_or( airport.elevation);
            if altitude <= ground || speed <= 0.0 {
                return Err( config_error!("arrival {} needs to be airborne (altitude {} ft, speed {} kt)", desc.callsign, altitude, speed))
            }
        }

        let heading = match desc.heading {
            Some(deg) => normalize_radians( deg.to_radians()),
            None => match (desc.category, departure_runway.and_then(|i| airport.runway(i)), waypoints.first()) {
                (Category::Departure, Some(rwy), _) => rwy.angle,
                (_, _, Some(wp)) if wp.position.coord() != coord => position.bearing_to( &wp.position),
                _ => 0.0
            }
        };

        let flight_plan_altitude = desc.flight_plan_altitude.unwrap_or_else(|| match desc.category {
            Category::Arrival => desc.altitude,
            Category::Departure => airport.ceiling.min( model.ceiling)
        });

        let mut mcp = Mcp { heading, altitude, speed, ..Mcp::default() };
        let mut approach_cleared = false;
        match desc.category {
            Category::Departure => {
                mcp.altitude = flight_plan_altitude; // armed on climb-out
            }
            Category::Arrival => {
                mcp.heading_mode = if waypoints.is_empty() { HeadingMode::Hold } else { HeadingMode::Lnav };
                mcp.altitude_mode = if waypoints.is_empty() { AltitudeMode::Hold } else { AltitudeMode::Vnav };
                mcp.speed_mode = SpeedMode::Hold;
                if phase == FlightPhase::Approach {
                    if arrival_runway.is_none() {
                        return Err( op_failed!("{} spawns on approach without arrival runway", desc.callsign))
                    }
                    approach_cleared = true;
                    mcp.heading_mode = HeadingMode::VorLoc;
                    mcp.altitude_mode = AltitudeMode::Approach;
                }
            }
        }

        let id = AircraftId( self.next_id);
        self.next_id += 1;

        let mut ac = Aircraft {
            id,
            callsign: desc.callsign.clone(),
            airline: desc.airline.clone(),
            category: desc.category,
            model_name: desc.model.clone().unwrap_or_else(|| model.name.clone()),
            model,
            route: desc.route.clone(),
            position,
            heading,
            altitude,
            speed,
            ground_speed: 0.0,
            ground_track: heading,
            phase,
            target: Target { heading, altitude, speed, expedite: false, turn: None },
            mcp,
            fms: Fms { waypoints, current: 0, flight_plan_altitude, departure_runway, arrival_runway, approach_cleared },
            conflicts: HashMap::new(),
            hit: false,
            takeoff_time: None,
            taxi_start: None,
        };
        physics::init_ground_vector( &mut ac, &self.ctx);

        info!("spawned {} {} ({}) in {}", ac.category, ac.callsign, ac.model.icao, ac.phase);
        self.callsigns.insert( ac.callsign.clone(), id);
        self.aircraft.insert( id, ac);
        Ok(id)
    }

    /* #endregion spawn */

    /* #region tick *****************************************************************************************/

    /// advance the simulation by `dt` seconds. `dt = 0` re-evaluates targets and conflicts but
    /// does not change phases, flight plans, positions or the set of aircraft
    pub fn update (&mut self, dt: f64) {
        let dt = if dt.is_finite() && dt >= 0.0 { dt } else {
            warn!("ignoring invalid time step {}", dt);
            0.0
        };
        self.ctx.game_time += dt;
        let paused = dt == 0.0;

        let mut lined_up: Vec<(usize,AircraftId)> = Vec::new();
        for ac in self.aircraft.values_mut() {
            if !ac.hit {
                if paused { // no phase steps, no route sequencing
                    ac.target = autopilot::preview_targets( ac, &self.ctx);
                } else {
                    if let Some(t) = phase::update_phase( ac, &self.ctx) {
                        if t.to == FlightPhase::Waiting {
                            if let Some(rwy) = ac.fms.departure_runway { lined_up.push( (rwy, ac.id)) }
                        }
                    }
                    autopilot::update_targets( ac, &self.ctx);
                }
            }
            physics::update_physics( ac, &self.ctx, dt);
        }

        for (rwy, id) in lined_up {
            if let Some(rwy) = self.ctx.airport.runway_mut( rwy) {
                rwy.add_to_queue( id);
            }
        }

        self.update_conflicts( dt);
        if !paused {
            self.remove_completed();
        }
    }

    fn update_conflicts (&mut self, dt: f64) {
        let keys: Vec<PairKey> = self.conflicts.keys().copied().collect();
        for key in keys {
            self.update_conflict( key, dt);
        }

        let ids: Vec<AircraftId> = self.aircraft.keys().copied().collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i+1..] {
                let key = PairKey::new( *a, *b);
                if self.conflicts.contains_key( &key) { continue }

                let (Some(ac_a), Some(ac_b)) = (self.aircraft.get(a), self.aircraft.get(b)) else { continue };
                if !in_bounding_box( ac_a, ac_b, &self.ctx.config.separation) { continue }

                let conflict = Conflict::new( ac_a, ac_b);
                let (cs_a, cs_b) = (ac_a.callsign.clone(), ac_b.callsign.clone());
                self.conflicts.insert( key, conflict);
                if let Some(ac) = self.aircraft.get_mut(a) { ac.conflicts.insert( cs_b, key); }
                if let Some(ac) = self.aircraft.get_mut(b) { ac.conflicts.insert( cs_a, key); }

                self.update_conflict( key, dt);
            }
        }
    }

    fn update_conflict (&mut self, key: PairKey, dt: f64) {
        let (Some(a), Some(b)) = (self.aircraft.get( &key.first()), self.aircraft.get( &key.second())) else {
            self.retire_conflict( key);
            return
        };
        let Some(conflict) = self.conflicts.get_mut( &key) else { return };

        let duplicate = a.conflicts.get( &b.callsign) != Some(&key) || b.conflicts.get( &a.callsign) != Some(&key);
        let outcome = conflict.update( a, b, &self.ctx, dt, duplicate);
        let subject = format!("{} {}", conflict.callsigns.0, conflict.callsigns.1);

        if outcome.retire {
            self.retire_conflict( key);
            return
        }

        let now = self.ctx.game_time;
        if outcome.collision {
            for id in [key.first(), key.second()] {
                if let Some(ac) = self.aircraft.get_mut( &id) { ac.hit = true }
                self.ctx.airport.remove_from_all_runway_queues( id);
            }
            self.events.record( now, GameEventKind::Collision, subject);
        } else if outcome.separation_loss {
            self.events.record( now, GameEventKind::SeparationLoss, subject);
        }
    }

    fn retire_conflict (&mut self, key: PairKey) {
        self.conflicts.remove( &key);
        for id in [key.first(), key.second()] {
            if let Some(ac) = self.aircraft.get_mut( &id) {
                ac.conflicts.retain(|_,k| *k != key);
            }
        }
    }

    fn remove_completed (&mut self) {
        let airport = &self.ctx.airport;
        let perf = &self.ctx.config.performance;

        let mut removals: Vec<(AircraftId,Option<GameEventKind>)> = Vec::new();
        for ac in self.aircraft.values() {
            let on_ground = ac.is_on_ground( airport);

            if ac.hit {
                if on_ground { removals.push( (ac.id, None)) }
            } else if ac.is_arrival() && on_ground && ac.speed <= perf.landing_stop_speed_kt {
                removals.push( (ac.id, Some(GameEventKind::Arrival)));
            } else if !airport.is_inside_radar_range( &ac.relative_position()) && !ac.has_active_route() {
                let kind = if ac.is_departure() { GameEventKind::Departure } else { GameEventKind::AirspaceExit };
                removals.push( (ac.id, Some(kind)));
            }
        }

        let now = self.ctx.game_time;
        for (id, kind) in removals {
            if let Some(ac) = self.remove( id) {
                if let Some(kind) = kind {
                    self.events.record( now, kind, ac.callsign.as_str());
                } else {
                    info!("{} crashed", ac.callsign);
                }
            }
        }
    }

    /// take an aircraft out of the simulation, together with its queue entries, callsign and conflicts
    pub fn remove (&mut self, id: AircraftId)->Option<Aircraft> {
        let ac = self.aircraft.remove( &id)?;
        self.ctx.airport.remove_from_all_runway_queues( id);
        self.callsigns.remove( &ac.callsign);

        let keys: Vec<PairKey> = self.conflicts.keys().filter(|k| k.contains(id)).copied().collect();
        for key in keys {
            self.retire_conflict( key);
        }

        debug!("removed {}", ac.callsign);
        Some(ac)
    }

    /* #endregion tick */

    /* #region controller clearances ************************************************************************/

    pub fn execute (&mut self, callsign: &str, cmd: &Command)->Result<()> {
        match cmd {
            Command::Heading { heading_deg, turn } => self.cmd_heading( callsign, *heading_deg, *turn),
            Command::Altitude { altitude_ft, expedite } => self.cmd_altitude( callsign, *altitude_ft, *expedite),
            Command::Speed { speed_kt } => self.cmd_speed( callsign, *speed_kt),
            Command::Direct { fix } => self.cmd_direct( callsign, fix),
            Command::Hold { fix, turn, leg, inbound_deg } => {
                let hold = HoldParameters {
                    inbound: inbound_deg.map(|d| normalize_radians( d.to_radians())),
                    turn: turn.unwrap_or( TurnDirection::Right),
                    leg: leg.unwrap_or_default()
                };
                self.cmd_hold( callsign, fix, hold)
            }
            Command::ResumeRoute => self.cmd_resume_route( callsign),
            Command::Taxi { runway } => self.cmd_taxi( callsign, runway),
            Command::Takeoff => self.cmd_takeoff( callsign),
            Command::ClearApproach { runway } => self.clear_approach( callsign, runway),
            Command::GoAround => self.go_around( callsign),
        }
    }

    /// fly a heading. On a cleared approach this sets the localizer intercept heading
    pub fn cmd_heading (&mut self, callsign: &str, heading_deg: f64, turn: Option<TurnDirection>)->Result<()> {
        let ac = lookup_mut( &mut self.aircraft, &self.callsigns, callsign)?;
        if ac.mcp.heading_mode != HeadingMode::VorLoc {
            ac.mcp.heading_mode = HeadingMode::Hold;
        }
        ac.mcp.heading = normalize_radians( heading_deg.to_radians());
        ac.mcp.turn = turn;
        Ok(())
    }

    pub fn cmd_altitude (&mut self, callsign: &str, altitude_ft: f64, expedite: bool)->Result<()> {
        let ac = lookup_mut( &mut self.aircraft, &self.callsigns, callsign)?;
        if altitude_ft > ac.model.ceiling {
            return Err( op_failed!("{} cannot climb to {} ft, ceiling is {} ft", callsign, altitude_ft, ac.model.ceiling))
        }
        if ac.mcp.altitude_mode != AltitudeMode::Approach {
            ac.mcp.altitude_mode = AltitudeMode::Hold;
        }
        ac.mcp.altitude = altitude_ft;
        ac.mcp.expedite = expedite;
        Ok(())
    }

    pub fn cmd_speed (&mut self, callsign: &str, speed_kt: f64)->Result<()> {
        let ac = lookup_mut( &mut self.aircraft, &self.callsigns, callsign)?;
        let clamped = speed_kt.clamp( ac.model.speed.min, ac.model.speed.max);
        if clamped != speed_kt {
            warn!("{} speed {} kt outside of envelope, using {} kt", callsign, speed_kt, clamped);
        }
        ac.mcp.speed_mode = SpeedMode::Hold;
        ac.mcp.speed = clamped;
        Ok(())
    }

    pub fn cmd_direct (&mut self, callsign: &str, fix: &str)->Result<()> {
        let wp = self.waypoint_for( fix)?;
        let ac = lookup_mut( &mut self.aircraft, &self.callsigns, callsign)?;
        ac.fms.direct_to( wp);
        ac.mcp.heading_mode = HeadingMode::Lnav;
        ac.mcp.turn = None;
        Ok(())
    }

    pub fn cmd_hold (&mut self, callsign: &str, fix: &str, hold: HoldParameters)->Result<()> {
        let wp = self.waypoint_for( fix)?;
        let ac = lookup_mut( &mut self.aircraft, &self.callsigns, callsign)?;
        if ac.phase.is_ground_phase() {
            return Err( op_failed!("{} is on the ground", callsign))
        }
        ac.fms.hold_at( wp, hold);
        ac.mcp.heading_mode = HeadingMode::Lnav;
        ac.mcp.turn = None;
        Ok(())
    }

    /// leave a hold, or continue the route after vectors
    pub fn cmd_resume_route (&mut self, callsign: &str)->Result<()> {
        let ac = lookup_mut( &mut self.aircraft, &self.callsigns, callsign)?;
        ac.fms.exit_hold();
        if ac.fms.current_waypoint().is_none() {
            return Err( op_failed!("{} has no route to resume", callsign))
        }
        ac.mcp.heading_mode = HeadingMode::Lnav;
        ac.mcp.turn = None;
        Ok(())
    }

    pub fn cmd_taxi (&mut self, callsign: &str, runway: &str)->Result<()> {
        let rwy = self.ctx.airport.runway_index( runway).ok_or_else(|| OdinAtcError::UnknownRunway( runway.to_string()))?;
        let now = self.ctx.game_time;
        let ac = lookup_mut( &mut self.aircraft, &self.callsigns, callsign)?;
        if !ac.is_departure() || ac.phase != FlightPhase::Apron {
            return Err( op_failed!("{} cannot taxi in phase {}", callsign, ac.phase))
        }
        ac.fms.departure_runway = Some(rwy);
        ac.taxi_start = Some(now);
        ac.phase = FlightPhase::Taxi;
        debug!("{} taxiing to runway {}", callsign, runway);
        Ok(())
    }

    /// clear the head of the departure runway queue for takeoff
    pub fn cmd_takeoff (&mut self, callsign: &str)->Result<()> {
        let now = self.ctx.game_time;
        let standard_km = self.ctx.config.separation.standard_minimum_km;
        let id = *self.callsigns.get( callsign).ok_or_else(|| OdinAtcError::UnknownAircraft( callsign.to_string()))?;

        let (rwy_idx, phase) = match self.aircraft.get( &id) {
            Some(ac) => (ac.fms.departure_runway, ac.phase),
            None => return Err( OdinAtcError::UnknownAircraft( callsign.to_string()))
        };
        let rwy_idx = rwy_idx.ok_or_else(|| op_failed!("{} has no departure runway", callsign))?;
        if phase != FlightPhase::Waiting {
            return Err( op_failed!("{} is not waiting for takeoff (phase {})", callsign, phase))
        }

        let rwy = self.ctx.airport.runway( rwy_idx).ok_or_else(|| op_failed!("invalid runway index {}", rwy_idx))?;
        if !rwy.is_queue_head( id) {
            return Err( op_failed!("{} is not first in line for runway {}", callsign, rwy.name))
        }

        // the previous departure has to be clear of the runway
        let too_close = rwy.last_departure
            .and_then(|prev| self.aircraft.get( &prev))
            .map(|prev| prev.relative_position().distance_to( &rwy.relative_position()) < standard_km)
            .unwrap_or(false);

        if let Some(rwy) = self.ctx.airport.runway_mut( rwy_idx) {
            rwy.remove_from_queue( id);
            rwy.last_departure = Some(id);
        }
        if too_close {
            self.events.record( now, GameEventKind::NoTakeoffSeparation, callsign);
        }

        let ac = lookup_mut( &mut self.aircraft, &self.callsigns, callsign)?;
        ac.phase = FlightPhase::Takeoff;
        ac.takeoff_time = Some(now);
        ac.mcp.altitude = ac.fms.flight_plan_altitude;
        info!("{} cleared for takeoff", callsign);
        Ok(())
    }

    pub fn clear_approach (&mut self, callsign: &str, runway: &str)->Result<()> {
        let rwy_idx = self.ctx.airport.runway_index( runway).ok_or_else(|| OdinAtcError::UnknownRunway( runway.to_string()))?;
        let ils_enabled = self.ctx.airport.runway( rwy_idx).map(|r| r.ils.enabled).unwrap_or(false);
        if !ils_enabled {
            return Err( op_failed!("runway {} has no ILS", runway))
        }

        let ac = lookup_mut( &mut self.aircraft, &self.callsigns, callsign)?;
        if !ac.is_arrival() {
            return Err( op_failed!("{} is not an arrival", callsign))
        }

        ac.fms.arrival_runway = Some(rwy_idx);
        ac.fms.approach_cleared = true;
        if ac.mcp.heading_mode != HeadingMode::Hold {
            ac.mcp.heading = ac.heading; // intercept on the present heading
        }
        if ac.mcp.altitude_mode != AltitudeMode::Hold {
            ac.mcp.altitude = ac.altitude;
        }
        ac.mcp.heading_mode = HeadingMode::VorLoc;
        ac.mcp.altitude_mode = AltitudeMode::Approach;
        ac.mcp.turn = None;
        Ok(())
    }

    /// cancel an approach clearance. Aircraft on final record a go-around
    pub fn go_around (&mut self, callsign: &str)->Result<()> {
        let now = self.ctx.game_time;
        let airport = &self.ctx.airport;
        let ac = lookup_mut( &mut self.aircraft, &self.callsigns, callsign)?;

        if !ac.fms.approach_cleared && !matches!( ac.phase, FlightPhase::Approach | FlightPhase::Landing) {
            return Err( op_failed!("{} is not on approach", callsign))
        }

        let on_final = matches!( ac.phase, FlightPhase::Approach | FlightPhase::Landing);
        let runway_heading = ac.fms.arrival_runway.and_then(|i| airport.runway(i)).map(|r| r.angle);
        let min_altitude = ac.ground_elevation( airport) + GO_AROUND_ALTITUDE_AGL;

        ac.fms.approach_cleared = false;
        ac.mcp.heading_mode = HeadingMode::Hold;
        ac.mcp.heading = runway_heading.unwrap_or( ac.heading);
        ac.mcp.turn = None;
        ac.mcp.altitude_mode = AltitudeMode::Hold;
        ac.mcp.altitude = ac.mcp.altitude.max( min_altitude);
        if ac.mcp.speed_mode == SpeedMode::Off {
            ac.mcp.speed_mode = SpeedMode::Hold;
            ac.mcp.speed = ac.speed.max( ac.model.speed.min);
        }

        if on_final {
            ac.phase = FlightPhase::Descent;
            self.events.record( now, GameEventKind::GoAround, callsign);
        }
        Ok(())
    }

    fn waypoint_for (&self, fix: &str)->Result<Waypoint> {
        let pos = self.ctx.airport.fix( fix).ok_or_else(|| OdinAtcError::UnknownFix( fix.to_string()))?;
        Ok( Waypoint::new( fix, pos.clone()))
    }

    /* #endregion controller clearances */

    /* #region queries **************************************************************************************/

    pub fn ctx (&self)->&SimContext { &self.ctx }

    /// for scenario setup. Changing the airport geometry of a running simulation is not supported
    pub fn ctx_mut (&mut self)->&mut SimContext { &mut self.ctx }

    pub fn game_time (&self)->f64 { self.ctx.game_time }

    pub fn events (&self)->&EventLog { &self.events }

    pub fn len (&self)->usize { self.aircraft.len() }

    pub fn is_empty (&self)->bool { self.aircraft.is_empty() }

    pub fn aircraft (&self)->impl Iterator<Item=&Aircraft> { self.aircraft.values() }

    pub fn get (&self, id: AircraftId)->Option<&Aircraft> { self.aircraft.get( &id) }

    pub fn by_callsign (&self, callsign: &str)->Option<&Aircraft> {
        self.callsigns.get( callsign).and_then(|id| self.aircraft.get(id))
    }

    pub fn by_callsign_mut (&mut self, callsign: &str)->Option<&mut Aircraft> {
        lookup_mut( &mut self.aircraft, &self.callsigns, callsign).ok()
    }

    /// closest aircraft to `p` (airport relative km), with its distance
    pub fn nearest (&self, p: &Point2D)->Option<(&Aircraft,f64)> {
        self.aircraft.values()
            .map(|ac| (ac, ac.relative_position().distance_to(p)))
            .min_by(|a,b| a.1.total_cmp( &b.1))
    }

    pub fn conflicts (&self)->impl Iterator<Item=&Conflict> { self.conflicts.values() }

    pub fn conflict_between (&self, callsign_a: &str, callsign_b: &str)->Option<&Conflict> {
        let a = self.callsigns.get( callsign_a)?;
        let b = self.callsigns.get( callsign_b)?;
        self.conflicts.get( &PairKey::new( *a, *b))
    }

    pub fn alerts (&self, callsign: &str)->Option<AlertState> {
        let ac = self.by_callsign( callsign)?;
        let mut alert = AlertState::default();
        for key in ac.conflicts.values() {
            if let Some(c) = self.conflicts.get(key) {
                alert.conflict |= c.has_conflict();
                alert.violation |= c.has_violation();
            }
        }
        Some(alert)
    }

    pub fn strips (&self)->Vec<StripData> {
        let airport = &self.ctx.airport;
        self.aircraft.values().map(|ac| {
            StripData {
                callsign: ac.callsign.clone(),
                icao: ac.model.icao.clone(),
                category: ac.category,
                phase: ac.phase,
                altitude: ac.altitude,
                target_altitude: ac.target.altitude,
                speed: ac.speed,
                target_speed: ac.target.speed,
                heading_deg: ac.heading.to_degrees(),
                target_heading_deg: ac.target.heading.to_degrees(),
                runway: ac.assigned_runway().and_then(|i| airport.runway(i)).map(|r| r.name.clone()),
                next_fix: ac.fms.current_waypoint().map(|wp| wp.name.clone()),
                route: ac.route.clone(),
                alert: self.alerts( &ac.callsign).unwrap_or_default(),
            }
        }).collect()
    }

    pub fn snapshot (&self)->Vec<KinematicState> {
        self.aircraft.values().map(|ac| ac.snapshot()).collect()
    }

    pub fn snapshot_json (&self)->Result<String> {
        Ok( serde_json::to_string( &self.snapshot())? )
    }

    /* #endregion queries */
}
