//! Reading transfer and suppression across adjacent days.
//!
//! # Invariants
//! - Only movable-cycle lesson placeholders (cid 9000..=9315, 9849..=9900)
//!   are touched, and only their liturgy services that carry readings.
//! - An adjacent day is resolved at most once per call, without transfers.

use super::day_facts::DayFacts;
use super::day_service::DayService;
use super::ResolveResult;
use crate::calendar::JDate;
use crate::expr::Context;
use crate::model::command::names;
use crate::model::{
    any_command_holds, Command, Commemoration, LiturgicalDay, Reading, ServiceType,
};
use crate::store::ContentStore;
use log::info;
use std::ops::RangeInclusive;

const LESSON_PLACEHOLDERS: [RangeInclusive<i64>; 2] = [9000..=9315, 9849..=9900];

fn is_lesson_placeholder(saint: &Commemoration) -> bool {
    saint.is_movable()
        && saint
            .cid_number()
            .is_some_and(|cid| LESSON_PLACEHOLDERS.iter().any(|range| range.contains(&cid)))
}

/// True when some `Transfer` command is false under `ctx`.
fn transfer_disabled(commands: &[Command], ctx: &Context) -> ResolveResult<bool> {
    for command in commands.iter().filter(|command| command.name == names::TRANSFER) {
        if !command.holds(ctx)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// True when a `Suppress` or `Class3Transfers` command holds under `ctx`.
///
/// Every command is evaluated in table order until one of those holds, so a
/// malformed command of any name ahead of it is an error.
fn readings_suppressed(commands: &[Command], ctx: &Context) -> ResolveResult<bool> {
    for command in commands {
        if command.holds(ctx)?
            && (command.name == names::SUPPRESS || command.name == names::CLASS3_TRANSFERS)
        {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Readings borrowed from one adjacent day, resolved on first use.
#[derive(Default)]
struct Borrowed {
    next: Option<Vec<Reading>>,
    previous: Option<Vec<Reading>>,
}

impl<S: ContentStore + ?Sized> DayService<'_, S> {
    /// Resolves `date` and applies transfer rules.
    ///
    /// `target_rank` defaults to the highest rank among the day's
    /// commemorations.
    pub fn resolve_with_transfers(
        &self,
        date: JDate,
        target_rank: Option<i64>,
    ) -> ResolveResult<LiturgicalDay> {
        let day = self.resolve(date)?;
        let target_rank = target_rank.unwrap_or_else(|| day.max_rank());
        self.apply_transfer(day, target_rank)
    }

    /// Applies the transfer algorithm to a resolved day at `target_rank`.
    ///
    /// # Side effects
    /// - Emits one `transfer_apply` event per eligible liturgy service.
    pub fn apply_transfer(
        &self,
        mut day: LiturgicalDay,
        target_rank: i64,
    ) -> ResolveResult<LiturgicalDay> {
        let date = day.date;
        let today = DayFacts::for_date(date).context_with_rank(target_rank);
        let mut borrowed = Borrowed::default();

        let commands = &day.commands;
        for saint in day
            .commemorations
            .iter_mut()
            .filter(|saint| is_lesson_placeholder(saint))
        {
            let cid = saint.cid.clone();
            let services = saint.services.iter_mut().flatten().filter(|service| {
                service.kind == ServiceType::Liturgy && service.readings.is_some()
            });

            for service in services {
                if transfer_disabled(commands, &today)? {
                    info!(
                        "event=transfer_apply module=service status=skipped date={date} cid={cid} rank={target_rank}"
                    );
                    continue;
                }

                if readings_suppressed(commands, &today)? {
                    service.readings = None;
                    info!(
                        "event=transfer_apply module=service status=suppressed date={date} cid={cid} rank={target_rank}"
                    );
                    continue;
                }

                let mut merged = 0;
                if any_command_holds(commands, names::TRANSFER_RULES_B, &today)? {
                    if borrowed.next.is_none() {
                        borrowed.next = Some(self.borrow_readings(date.add_days(1), commands)?);
                    }
                    let extra = borrowed.next.as_deref().unwrap_or_default();
                    service.readings.get_or_insert_with(Vec::new).extend_from_slice(extra);
                    merged += extra.len();
                }
                if any_command_holds(commands, names::TRANSFER_RULES_F, &today)? {
                    if borrowed.previous.is_none() {
                        borrowed.previous =
                            Some(self.borrow_readings(date.add_days(-1), commands)?);
                    }
                    let extra = borrowed.previous.as_deref().unwrap_or_default();
                    service.readings.get_or_insert_with(Vec::new).extend_from_slice(extra);
                    merged += extra.len();
                }

                info!(
                    "event=transfer_apply module=service status=ok date={date} cid={cid} rank={target_rank} merged={merged}"
                );
            }
        }

        Ok(day)
    }

    /// Movable-cycle liturgy readings of `date`, if its `Class3Transfers` holds.
    ///
    /// The command definitions come from the requesting day; the context is
    /// the adjacent day's own, with its own day rank.
    fn borrow_readings(&self, date: JDate, commands: &[Command]) -> ResolveResult<Vec<Reading>> {
        let adjacent = self.resolve(date)?;
        let ctx = DayFacts::for_date(date).context_with_rank(adjacent.day_rank);
        if !any_command_holds(commands, names::CLASS3_TRANSFERS, &ctx)? {
            return Ok(Vec::new());
        }

        Ok(adjacent
            .movable()
            .flat_map(Commemoration::services)
            .filter(|service| service.kind == ServiceType::Liturgy)
            .flat_map(|service| service.readings.iter().flatten())
            .cloned()
            .collect())
    }
}
