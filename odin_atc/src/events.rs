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

use serde::Serialize;
use strum::{Display,EnumString};
use tracing::info;

/// things that happen in the simulated world and count towards the score
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Display,EnumString)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum GameEventKind {
    Arrival,
    Departure,
    AirspaceExit,
    Collision,
    NoTakeoffSeparation,
    SeparationLoss,
    GoAround,
}

impl GameEventKind {
    pub fn score (&self)->i64 {
        match self {
            GameEventKind::Arrival => 10,
            GameEventKind::Departure => 10,
            GameEventKind::AirspaceExit => -100,
            GameEventKind::Collision => -1000,
            GameEventKind::NoTakeoffSeparation => -200,
            GameEventKind::SeparationLoss => -200,
            GameEventKind::GoAround => -50,
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct GameEvent {
    pub time: f64, // game time in seconds
    pub kind: GameEventKind,
    pub subject: String,
}

#[derive(Debug,Clone,Default,Serialize)]
pub struct EventLog {
    events: Vec<GameEvent>,
    score: i64,
}

impl EventLog {
    pub fn record (&mut self, time: f64, kind: GameEventKind, subject: impl Into<String>) {
        let subject = subject.into();
        info!("{:.1}s {} {} ({:+})", time, kind, subject, kind.score());
        self.score += kind.score();
        self.events.push( GameEvent { time, kind, subject });
    }

    pub fn events (&self)->&[GameEvent] { self.events.as_slice() }

    pub fn score (&self)->i64 { self.score }

    pub fn count (&self, kind: GameEventKind)->usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}
