//! Resolved liturgical day snapshot.

use super::command::Command;
use super::commemoration::{Commemoration, CycleSource, ServiceType};
use crate::calendar::JDate;
use serde::Serialize;

/// Output of one resolution pass for a date and language.
///
/// Adjacent days resolved during transfers are separate snapshots; nothing
/// here points back at the day that requested them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiturgicalDay {
    pub date: JDate,
    /// Chant tone; 1..=8 for well-formed content.
    pub tone: i64,
    /// Highest fixed-cycle rank, or -1 when no fixed commemoration has one.
    #[serde(rename = "dayRank")]
    pub day_rank: i64,
    #[serde(rename = "fastingCode")]
    pub fasting_code: Option<String>,
    #[serde(rename = "saints")]
    pub commemorations: Vec<Commemoration>,
    /// Empty unless some commemoration has a liturgy.
    pub commands: Vec<Command>,
}

impl LiturgicalDay {
    pub fn movable(&self) -> impl Iterator<Item = &Commemoration> {
        self.commemorations
            .iter()
            .filter(|saint| saint.source == CycleSource::Movable)
    }

    pub fn fixed(&self) -> impl Iterator<Item = &Commemoration> {
        self.commemorations
            .iter()
            .filter(|saint| saint.source == CycleSource::Fixed)
    }

    pub fn has_liturgy(&self) -> bool {
        self.commemorations
            .iter()
            .any(|saint| saint.has_service(ServiceType::Liturgy))
    }

    /// Highest rank across every commemoration, unset ranks counting as 0.
    pub fn max_rank(&self) -> i64 {
        self.commemorations
            .iter()
            .map(|saint| saint.rank_number().unwrap_or(0))
            .max()
            .unwrap_or(0)
    }
}

/// Sum of the movable-cycle ranks; a zero sum means tone 8.
pub fn tone_of<'a>(movable: impl IntoIterator<Item = &'a Commemoration>) -> i64 {
    let tone: i64 = movable
        .into_iter()
        .filter_map(Commemoration::rank_number)
        .sum();
    if tone == 0 {
        8
    } else {
        tone
    }
}

/// Highest fixed-cycle rank, or -1.
pub fn day_rank_of<'a>(commemorations: impl IntoIterator<Item = &'a Commemoration>) -> i64 {
    commemorations
        .into_iter()
        .filter(|saint| saint.source == CycleSource::Fixed)
        .filter_map(Commemoration::rank_number)
        .fold(-1, i64::max)
}
