use typikon_core::scan::{read_events, scan_filter, Event, ScanFilter};
use typikon_core::{Context, EvaluationError};

const DOCUMENT: &str = r#"<DAY>
<SAINT CId="1" Cmd="x == 0"><NAME Short="first"/>kept text</SAINT>
<SAINT CId="2" Cmd="x != 0"><NAME Short="second"/><NOTE Cmd="y">inner</NOTE></SAINT>
<SAINT CId="3"/>
</DAY>"#;

fn surviving_cids(ctx: &Context) -> Vec<String> {
    scan_filter(read_events(DOCUMENT).unwrap(), ctx)
        .filter_map(|event| match event.unwrap() {
            Event::Enter { tag, attrib } if tag == "SAINT" => attrib.get("CId").cloned(),
            _ => None,
        })
        .collect()
}

#[test]
fn guard_selects_exactly_one_branch() {
    let zero = Context::new().with("x", 0).with("y", 1);
    assert_eq!(surviving_cids(&zero), vec!["1", "3"]);

    let other = Context::new().with("x", 5).with("y", 1);
    assert_eq!(surviving_cids(&other), vec!["2", "3"]);
}

#[test]
fn pruned_subtree_predicates_are_never_evaluated() {
    // `y` is unbound; it only guards an element inside a pruned subtree.
    let ctx = Context::new().with("x", 0);
    assert_eq!(surviving_cids(&ctx), vec!["1", "3"]);
}

#[test]
fn surviving_events_keep_enter_exit_balance() {
    let ctx = Context::new().with("x", 0).with("y", 1);
    let mut depth = 0i32;
    for event in scan_filter(read_events(DOCUMENT).unwrap(), &ctx) {
        match event.unwrap() {
            Event::Enter { .. } => depth += 1,
            Event::Exit { .. } => {
                depth -= 1;
                assert!(depth >= 0);
            }
            Event::Text(_) => {}
        }
    }
    assert_eq!(depth, 0);
}

#[test]
fn text_inside_pruned_subtree_is_dropped() {
    let ctx = Context::new().with("x", 5).with("y", 0);
    let texts: Vec<String> = scan_filter(read_events(DOCUMENT).unwrap(), &ctx)
        .filter_map(|event| match event.unwrap() {
            Event::Text(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        })
        .collect();
    assert!(texts.is_empty());
}

#[test]
fn evaluation_error_stops_the_stream() {
    let events = read_events(r#"<DAY><SAINT Cmd="missing"/><SAINT CId="9"/></DAY>"#).unwrap();
    let results: Vec<_> = scan_filter(events, &Context::new()).collect();

    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Ok(Event::Enter { ref tag, .. }) if tag == "DAY"));
    assert!(matches!(
        results[1],
        Err(EvaluationError::UnknownVariable { ref name, .. }) if name == "missing"
    ));
}

#[test]
fn incremental_filter_sees_context_changes() {
    let events =
        read_events(r#"<A><B Cmd="flag"/><C/><D Cmd="flag"/></A>"#).unwrap();
    let mut ctx = Context::new().with("flag", false);
    let mut filter = ScanFilter::new();
    let mut kept = Vec::new();

    for event in events {
        if let Some(Event::Enter { tag, .. }) = filter.feed(event, &ctx).unwrap() {
            if tag == "C" {
                ctx.set("flag", true);
            }
            kept.push(tag);
        }
    }

    assert_eq!(kept, vec!["A", "C", "D"]);
    assert_eq!(filter.depth(), 0);
    assert!(!filter.is_skipping());
}

#[test]
fn documents_without_guards_pass_through_unchanged() {
    let doc = r#"<DAY><SAINT CId="7" Tone="2"><NAME Short="plain"/>text &amp; more</SAINT>
tail</DAY>"#;
    let ctx = Context::new();
    let events = read_events(doc).unwrap();
    assert!(events.iter().any(|event| matches!(event, Event::Text(_))));

    let filtered: Vec<Event> = scan_filter(read_events(doc).unwrap(), &ctx)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(filtered, events);
}
