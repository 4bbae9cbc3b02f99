//! Conditional subtree suppression driven by `Cmd` predicates.

use super::{Event, CMD_ATTRIBUTE};
use crate::expr::{evaluate, Context, EvaluationError};

/// Incremental scanner state.
///
/// Callers that need to change the context mid-walk drive `feed` directly;
/// everyone else uses [`scan_filter`].
#[derive(Debug, Default)]
pub struct ScanFilter {
    skipping: bool,
    // One marker per open element: `true` when that element started the skip.
    stack: Vec<bool>,
}

impl ScanFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_skipping(&self) -> bool {
        self.skipping
    }

    /// Consumes one raw event; returns it when it survives filtering.
    pub fn feed(&mut self, event: Event, ctx: &Context) -> Result<Option<Event>, EvaluationError> {
        match event {
            Event::Enter { ref attrib, .. } => {
                if self.skipping {
                    self.stack.push(false);
                    return Ok(None);
                }
                if let Some(predicate) = attrib.get(CMD_ATTRIBUTE) {
                    if !evaluate(predicate, ctx)?.is_truthy() {
                        self.skipping = true;
                        self.stack.push(true);
                        return Ok(None);
                    }
                }
                self.stack.push(false);
                Ok(Some(event))
            }
            Event::Exit { .. } => {
                if self.stack.pop().unwrap_or(false) {
                    self.skipping = false;
                    Ok(None)
                } else if self.skipping {
                    Ok(None)
                } else {
                    Ok(Some(event))
                }
            }
            Event::Text(_) if self.skipping => Ok(None),
            Event::Text(_) => Ok(Some(event)),
        }
    }
}

/// Lazily filtered event stream; stops after the first evaluation error.
pub struct Filtered<'c, I> {
    events: I,
    ctx: &'c Context,
    state: ScanFilter,
    failed: bool,
}

impl<I: Iterator<Item = Event>> Iterator for Filtered<'_, I> {
    type Item = Result<Event, EvaluationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for event in self.events.by_ref() {
            match self.state.feed(event, self.ctx) {
                Ok(Some(kept)) => return Some(Ok(kept)),
                Ok(None) => continue,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

pub fn scan_filter<I>(events: I, ctx: &Context) -> Filtered<'_, I::IntoIter>
where
    I: IntoIterator<Item = Event>,
{
    Filtered {
        events: events.into_iter(),
        ctx,
        state: ScanFilter::new(),
        failed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::read_events;

    fn tags(text: &str, ctx: &Context) -> Vec<String> {
        scan_filter(read_events(text).unwrap(), ctx)
            .map(|event| match event.unwrap() {
                Event::Enter { tag, .. } => format!("+{tag}"),
                Event::Exit { tag } => format!("-{tag}"),
                Event::Text(text) => text,
            })
            .collect()
    }

    #[test]
    fn suppresses_whole_subtree_of_false_predicate() {
        let ctx = Context::new().with("x", 1);
        let out = tags(
            r#"<A><B Cmd="x == 0"><C Cmd="x == 1">t</C></B><D/></A>"#,
            &ctx,
        );
        assert_eq!(out, vec!["+A", "+D", "-D", "-A"]);
    }

    #[test]
    fn true_predicate_keeps_element() {
        let ctx = Context::new().with("x", 1);
        let out = tags(r#"<A Cmd="x">t</A>"#, &ctx);
        assert_eq!(out, vec!["+A", "t", "-A"]);
    }

    #[test]
    fn depth_returns_to_zero_after_document() {
        let ctx = Context::new().with("x", 0);
        let mut state = ScanFilter::new();
        for event in read_events(r#"<A><B Cmd="x"><C/></B></A>"#).unwrap() {
            state.feed(event, &ctx).unwrap();
        }
        assert_eq!(state.depth(), 0);
        assert!(!state.is_skipping());
    }
}
