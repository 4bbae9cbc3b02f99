//! Day resolution engine.
//!
//! # Responsibility
//! - Read the movable, fixed, biography, fasting and command documents of a
//!   date and fold them into one `LiturgicalDay`.
//!
//! # Invariants
//! - The movable-cycle document must yield at least one commemoration.
//! - Tone is computed before biographies are merged; day rank after.
//! - Commands are loaded only when some commemoration has a liturgy.

use super::day_facts::DayFacts;
use super::{ResolveError, ResolveResult};
use crate::calendar::JDate;
use crate::expr::{vars, Context, Value};
use crate::model::day::{day_rank_of, tone_of};
use crate::model::{Command, Commemoration, CycleSource, LiturgicalDay, ServiceType};
use crate::parse::{
    parse_commands, parse_commemorations, parse_fasting_rules, parse_life, ParseResult,
};
use crate::store::{ContentStore, Library};
use log::{error, info, warn};
use std::time::Instant;

/// Resolves liturgical days from one content store and language.
pub struct DayService<'s, S: ContentStore + ?Sized> {
    library: Library<'s, S>,
}

impl<'s, S: ContentStore + ?Sized> DayService<'s, S> {
    /// Binds the engine to `store` and a language tag such as `en` or `cu/ru`.
    pub fn new(store: &'s S, lang: &str) -> ResolveResult<Self> {
        Ok(Self {
            library: Library::new(store, lang)?,
        })
    }

    pub fn library(&self) -> &Library<'s, S> {
        &self.library
    }

    /// Resolves a Julian date given as year, month and day.
    pub fn resolve_ymd(&self, year: i32, month: u32, day: u32) -> ResolveResult<LiturgicalDay> {
        self.resolve(JDate::new(year, month, day)?)
    }

    /// Builds the day snapshot without applying transfer rules.
    ///
    /// # Side effects
    /// - Emits `day_resolve` events with date, language and duration.
    pub fn resolve(&self, date: JDate) -> ResolveResult<LiturgicalDay> {
        let started_at = Instant::now();
        let lang = self.library.language();
        info!("event=day_resolve module=service status=start date={date} lang={lang}");

        let result = self.build_day(date);
        match &result {
            Ok(day) => info!(
                "event=day_resolve module=service status=ok date={date} lang={lang} duration_ms={} saints={} tone={} day_rank={}",
                started_at.elapsed().as_millis(),
                day.commemorations.len(),
                day.tone,
                day.day_rank
            ),
            Err(err) => error!(
                "event=day_resolve module=service status=error date={date} lang={lang} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn build_day(&self, date: JDate) -> ResolveResult<LiturgicalDay> {
        let facts = DayFacts::for_date(date);
        let mut ctx = facts.context();

        let movable = facts.movable_cycle().read(&self.library)?;
        let mut commemorations = in_document(
            &movable.path,
            parse_commemorations(&movable.text, CycleSource::Movable, &ctx),
        )?;
        if commemorations.is_empty() {
            return Err(ResolveError::MissingMovableCommemoration { path: movable.path });
        }

        let tone = tone_of(&commemorations);
        if !(1..=8).contains(&tone) {
            warn!(
                "event=tone_out_of_range module=service status=ok date={date} tone={tone} path={}",
                movable.path
            );
        }

        let fixed = self.library.menaion(date.month(), date.day())?;
        commemorations.extend(in_document(
            &fixed.path,
            parse_commemorations(&fixed.text, CycleSource::Fixed, &ctx),
        )?);

        for saint in &mut commemorations {
            self.merge_lives(saint, &ctx)?;
        }

        let day_rank = day_rank_of(&commemorations);
        ctx.set(vars::DAY_RANK, day_rank);

        let mut fasting_code = None;
        for document in self.library.fasting()? {
            let codes = in_document(&document.path, parse_fasting_rules(&document.text, &ctx))?;
            if let Some(code) = codes.into_iter().last() {
                fasting_code = Some(code);
            }
        }

        let has_liturgy = commemorations
            .iter()
            .any(|saint| saint.has_service(ServiceType::Liturgy));
        let commands: Vec<Command> = if has_liturgy {
            let document = self.library.divine_liturgy()?;
            in_document(&document.path, parse_commands(&document.text, &ctx))?
        } else {
            Vec::new()
        };

        Ok(LiturgicalDay {
            date,
            tone,
            day_rank,
            fasting_code,
            commemorations,
            commands,
        })
    }

    /// Layers every biography document of `saint`, general to specific.
    ///
    /// Each document sees `dRank` equal to the saint's current rank.
    fn merge_lives(&self, saint: &mut Commemoration, ctx: &Context) -> ResolveResult<()> {
        for document in self.library.lives(&saint.cid)? {
            let mut life_ctx = ctx.clone();
            let rank = saint.rank.as_ref().map_or(0.0, Value::to_number);
            life_ctx.set(vars::DAY_RANK, rank);
            let life = in_document(&document.path, parse_life(&document.text, &mut life_ctx))?;
            saint.merge_life(life);
        }
        Ok(())
    }
}

fn in_document<T>(path: &str, result: ParseResult<T>) -> ResolveResult<T> {
    result.map_err(|err| ResolveError::in_document(path, err))
}
