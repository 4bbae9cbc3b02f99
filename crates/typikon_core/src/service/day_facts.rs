//! Calendar-derived facts about one date.

use crate::calendar::{pascha, JDate};
use crate::expr::{vars, Context};
use crate::store::Library;
use crate::store::{ContentStore, Document, StoreResult};

/// Days before Pascha covered by the Triodion.
const TRIODION_SPAN: i64 = 70;

/// Which movable-cycle document a date reads, and its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovableCycle {
    /// Lenten Triodion, counted in days before Pascha.
    Triodion(i64),
    /// Pentecostarion and the weeks after Pentecost, counted from day 1 = Pascha.
    Pentecostarion(i64),
}

impl MovableCycle {
    pub fn read<S: ContentStore + ?Sized>(&self, library: &Library<'_, S>) -> StoreResult<Document> {
        match *self {
            Self::Triodion(day) => library.triodion(day),
            Self::Pentecostarion(day) => library.pentecostarion(day),
        }
    }
}

/// Offsets and counters every predicate may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayFacts {
    pub date: JDate,
    pub day_of_week: u32,
    pub day_of_year: u32,
    /// Days since this year's Pascha.
    pub nday: i64,
    /// Days since last year's Pascha.
    pub nday_previous: i64,
    /// Days since next year's Pascha (negative).
    pub nday_next: i64,
}

impl DayFacts {
    pub fn for_date(date: JDate) -> Self {
        let year = date.year();
        Self {
            date,
            day_of_week: date.day_of_week(),
            day_of_year: date.day_of_year(),
            nday: date.days_since(&pascha(year)),
            nday_previous: date.days_since(&pascha(year - 1)),
            nday_next: date.days_since(&pascha(year + 1)),
        }
    }

    /// Context without a day rank; `dRank` is set once ranks are known.
    pub fn context(&self) -> Context {
        Context::new()
            .with(vars::DAY_OF_WEEK, self.day_of_week)
            .with(vars::DAY_OF_YEAR, self.day_of_year)
            .with(vars::NDAY, self.nday)
            .with(vars::NDAY_PREVIOUS, self.nday_previous)
            .with(vars::NDAY_NEXT, self.nday_next)
            .with(vars::YEAR, self.date.year())
            .with(vars::GS, 1)
    }

    pub fn context_with_rank(&self, rank: i64) -> Context {
        self.context().with(vars::DAY_RANK, rank)
    }

    pub fn movable_cycle(&self) -> MovableCycle {
        if (-TRIODION_SPAN..0).contains(&self.nday) {
            MovableCycle::Triodion(-self.nday)
        } else if self.nday < -TRIODION_SPAN {
            MovableCycle::Pentecostarion(self.nday_previous + 1)
        } else {
            MovableCycle::Pentecostarion(self.nday + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Value;

    #[test]
    fn pascha_itself_is_pentecostarion_day_one() {
        let facts = DayFacts::for_date(pascha(2019));
        assert_eq!(facts.nday, 0);
        assert_eq!(facts.day_of_week, 0);
        assert_eq!(facts.movable_cycle(), MovableCycle::Pentecostarion(1));
    }

    #[test]
    fn lent_reads_triodion_counted_backwards() {
        let facts = DayFacts::for_date(pascha(2019).add_days(-70));
        assert_eq!(facts.movable_cycle(), MovableCycle::Triodion(70));
        let facts = DayFacts::for_date(pascha(2019).add_days(-1));
        assert_eq!(facts.movable_cycle(), MovableCycle::Triodion(1));
    }

    #[test]
    fn winter_continues_last_years_pentecostarion() {
        let date = pascha(2019).add_days(-71);
        let facts = DayFacts::for_date(date);
        assert_eq!(
            facts.movable_cycle(),
            MovableCycle::Pentecostarion(date.days_since(&pascha(2018)) + 1)
        );
    }

    #[test]
    fn context_exposes_all_day_variables() {
        let ctx = DayFacts::for_date(pascha(2019)).context_with_rank(4);
        assert_eq!(ctx.get(vars::NDAY), Some(&Value::from(0)));
        assert_eq!(ctx.get(vars::YEAR), Some(&Value::from(2019)));
        assert_eq!(ctx.get(vars::GS), Some(&Value::from(1)));
        assert_eq!(ctx.get(vars::DAY_RANK), Some(&Value::from(4)));
        assert_eq!(ctx.len(), 8);
    }
}
