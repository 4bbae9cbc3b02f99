use super::{expect_tag, filtered_elements, required, ParseError, ParseResult};
use crate::expr::Context;

const TAGS: &[&str] = &["FASTING", "PERIOD", "RULE"];

/// Returns the `Case` code of every surviving `RULE`, in document order.
///
/// Callers keep the last code; earlier matches are overridden.
pub fn parse_fasting_rules(text: &str, ctx: &Context) -> ParseResult<Vec<String>> {
    let mut codes = Vec::new();
    for (tag, attrib) in filtered_elements(text, ctx)? {
        expect_tag(&tag, TAGS)?;
        if attrib.contains_key("Tone") {
            return Err(ParseError::UnexpectedAttribute {
                tag,
                attribute: "Tone",
            });
        }
        if tag == "RULE" {
            codes.push(required(&tag, &attrib, "Case")?.to_string());
        }
    }
    Ok(codes)
}
