//! Crossover signal generation.
//!
//! A day is `Long` when the short average is strictly above the long
//! average and `Flat` otherwise. Days where either average is absent carry
//! no state at all: they are skipped, never treated as `Flat`, so the first
//! day both averages exist cannot produce a spurious transition.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::moving_average::MovingAverageSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalState {
    Long,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalPoint {
    pub date: NaiveDate,
    pub state: Option<SignalState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransitionKind {
    EnterLong,
    ExitLong,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionKind::EnterLong => write!(f, "ENTER_LONG"),
            TransitionKind::ExitLong => write!(f, "EXIT_LONG"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionEvent {
    pub date: NaiveDate,
    pub kind: TransitionKind,
}

/// Per-day state from two averages aligned to the same price series.
pub fn signal_states(short: &MovingAverageSeries, long: &MovingAverageSeries) -> Vec<SignalPoint> {
    short
        .values
        .iter()
        .zip(&long.values)
        .map(|(s, l)| {
            let state = match (s.value, l.value) {
                (Some(sv), Some(lv)) if s.date == l.date => Some(if sv > lv {
                    SignalState::Long
                } else {
                    SignalState::Flat
                }),
                _ => None,
            };
            SignalPoint {
                date: s.date,
                state,
            }
        })
        .collect()
}

/// Transitions between consecutive present states.
pub fn generate_transitions(states: &[SignalPoint]) -> Vec<TransitionEvent> {
    let mut events = Vec::new();
    let mut previous: Option<SignalState> = None;

    for point in states {
        let Some(current) = point.state else {
            continue;
        };
        let kind = match (previous, current) {
            (Some(SignalState::Flat), SignalState::Long) => Some(TransitionKind::EnterLong),
            (Some(SignalState::Long), SignalState::Flat) => Some(TransitionKind::ExitLong),
            _ => None,
        };
        if let Some(kind) = kind {
            events.push(TransitionEvent {
                date: point.date,
                kind,
            });
        }
        previous = Some(current);
    }

    events
}

pub fn crossover_events(
    short: &MovingAverageSeries,
    long: &MovingAverageSeries,
) -> Vec<TransitionEvent> {
    generate_transitions(&signal_states(short, long))
}
