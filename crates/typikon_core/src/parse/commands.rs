use super::{expect_tag, filtered_elements, required, ParseResult};
use crate::expr::Context;
use crate::model::Command;

const TAGS: &[&str] = &["DATA", "COMMAND"];

/// Parses a command table. Values stay unevaluated.
pub fn parse_commands(text: &str, ctx: &Context) -> ParseResult<Vec<Command>> {
    let mut commands = Vec::new();
    for (tag, attrib) in filtered_elements(text, ctx)? {
        expect_tag(&tag, TAGS)?;
        if tag != "COMMAND" {
            continue;
        }
        commands.push(Command {
            name: required(&tag, &attrib, "Name")?.to_string(),
            value: required(&tag, &attrib, "Value")?.to_string(),
            comment: attrib.get("Comment").cloned(),
        });
    }
    Ok(commands)
}
