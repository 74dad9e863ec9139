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

//! run a scenario file headless and print the scored events and the final flight strips.
//! Use RUST_LOG (e.g. `RUST_LOG=odin_atc=debug`) to see phase transitions

use anyhow::Result;
use clap::Parser;
use tracing::{info,warn};
use tracing_subscriber::EnvFilter;

use odin_atc::{AircraftPool, SimContext};
use odin_atc::config::{ScenarioConfig, load_config};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "run an odin_atc scenario without display")]
pub struct Args {
    /// simulated seconds to run
    #[arg(short,long, default_value_t = 600.0)]
    pub duration: f64,

    /// seconds per tick
    #[arg(short,long, default_value_t = 1.0)]
    pub step: f64,

    /// print the strips every n ticks (0 = only at the end)
    #[arg(short,long, default_value_t = 0)]
    pub print_every: usize,

    /// scenario config file
    #[arg(default_value = "scenario.ron")]
    pub scenario: String,
}

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.step <= 0.0 {
        anyhow::bail!("step has to be positive, got {}", args.step);
    }

    let scenario: ScenarioConfig = load_config( &args.scenario)?;
    let ctx = SimContext::load( &scenario.airport, &scenario.aircraft_types, scenario.sim.as_deref())?;
    let mut pool = AircraftPool::new( ctx);

    for desc in &scenario.aircraft {
        pool.spawn( desc)?;
    }

    let mut commands = scenario.commands.clone();
    commands.sort_by(|a,b| a.at_secs.total_cmp( &b.at_secs));
    let mut commands = commands.into_iter().peekable();

    let mut tick = 0;
    while pool.game_time() < args.duration {
        while let Some(cmd) = commands.next_if(|c| c.at_secs <= pool.game_time()) {
            if let Err(e) = pool.execute( &cmd.callsign, &cmd.command) {
                warn!("{:.0}s {} {:?} rejected: {}", pool.game_time(), cmd.callsign, cmd.command, e);
            }
        }

        pool.update( args.step);
        tick += 1;

        if args.print_every > 0 && tick % args.print_every == 0 {
            print_strips( &pool);
        }
    }

    println!("---- events");
    for e in pool.events().events() {
        println!("{:7.1}s  {:<22} {:<16} {:+}", e.time, e.kind.to_string(), e.subject, e.kind.score());
    }
    println!("score: {}", pool.events().score());

    print_strips( &pool);
    Ok(())
}

fn print_strips (pool: &AircraftPool) {
    println!("---- t = {:.0}s, {} aircraft", pool.game_time(), pool.len());
    println!("{:<9} {:<5} {:<9} {:>7} {:>7} {:>5} {:>5} {:>5} {:>5} {:<5} {:<7} alert", "callsign", "type", "phase", "alt", "t.alt", "spd", "t.spd", "hdg", "t.hdg", "rwy", "next");
    for s in pool.strips() {
        let alert = if s.alert.violation { "VIOL" } else if s.alert.conflict { "CONF" } else { "" };
        println!("{:<9} {:<5} {:<9} {:>7.0} {:>7.0} {:>5.0} {:>5.0} {:>5.0} {:>5.0} {:<5} {:<7} {}",
            s.callsign, s.icao, s.phase.to_string(), s.altitude, s.target_altitude, s.speed, s.target_speed,
            s.heading_deg, s.target_heading_deg, s.runway.as_deref().unwrap_or("-"), s.next_fix.as_deref().unwrap_or("-"), alert);
    }
}
