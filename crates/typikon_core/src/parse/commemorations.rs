use super::{expect_tag, filtered_elements, required, ParseResult};
use crate::expr::{evaluate, Context};
use crate::model::{Commemoration, CycleSource};

const TAGS: &[&str] = &["DAY", "SAINT"];

/// Parses a cycle document (`DAY` root, `SAINT` children).
///
/// `Tone` is evaluated against `ctx`; `Src` becomes the menologion tag.
pub fn parse_commemorations(
    text: &str,
    source: CycleSource,
    ctx: &Context,
) -> ParseResult<Vec<Commemoration>> {
    let mut commemorations = Vec::new();
    for (tag, attrib) in filtered_elements(text, ctx)? {
        expect_tag(&tag, TAGS)?;
        if tag != "SAINT" {
            continue;
        }

        let mut saint = Commemoration::new(required(&tag, &attrib, "CId")?, source);
        if let Some(menologion) = attrib.get("Src") {
            saint.menologion = menologion.clone();
        }
        if let Some(tone) = attrib.get("Tone") {
            saint.rank = Some(evaluate(tone, ctx)?);
        }
        commemorations.push(saint);
    }
    Ok(commemorations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Value;
    use crate::parse::ParseError;

    #[test]
    fn evaluates_tone_and_keeps_menologion() {
        let ctx = Context::new().with("nday", 10);
        let saints = parse_commemorations(
            r#"<DAY><SAINT CId="9010" Src="MS" Tone="nday % 8"/><SAINT CId="9011"/></DAY>"#,
            CycleSource::Movable,
            &ctx,
        )
        .unwrap();

        assert_eq!(saints.len(), 2);
        assert_eq!(saints[0].menologion, "MS");
        assert_eq!(saints[0].rank, Some(Value::from(2)));
        assert_eq!(saints[1].rank, None);
        assert_eq!(saints[1].menologion, "");
    }

    #[test]
    fn rejects_foreign_elements() {
        let err = parse_commemorations(
            r#"<DAY><RULE Case="x"/></DAY>"#,
            CycleSource::Fixed,
            &Context::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedTag { ref tag, .. } if tag == "RULE"));
    }

    #[test]
    fn requires_identifier() {
        let err = parse_commemorations("<DAY><SAINT/></DAY>", CycleSource::Fixed, &Context::new())
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { attribute: "CId", .. }));
    }
}
