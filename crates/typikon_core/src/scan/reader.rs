//! XML text to depth-first event list.

use super::{Attributes, Event, XmlError};
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;

/// Reads a whole document into `Enter`/`Exit`/`Text` events.
///
/// Self-closing elements produce an `Enter` immediately followed by its
/// `Exit`. Declarations, comments, processing instructions and doctypes
/// are dropped.
pub fn read_events(text: &str) -> Result<Vec<Event>, XmlError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(false);

    let mut events = Vec::new();
    let mut open_tags: Vec<String> = Vec::new();

    loop {
        let position = reader.buffer_position();
        let event = reader.read_event().map_err(|err| XmlError {
            position,
            message: err.to_string(),
        })?;

        match event {
            XmlEvent::Start(start) => {
                let (tag, attrib) = element(&start, position)?;
                open_tags.push(tag.clone());
                events.push(Event::Enter { tag, attrib });
            }
            XmlEvent::Empty(start) => {
                let (tag, attrib) = element(&start, position)?;
                events.push(Event::Enter {
                    tag: tag.clone(),
                    attrib,
                });
                events.push(Event::Exit { tag });
            }
            XmlEvent::End(end) => {
                let tag = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                if open_tags.pop().is_none() {
                    return Err(XmlError {
                        position,
                        message: format!("closing tag </{tag}> has no matching opening tag"),
                    });
                }
                events.push(Event::Exit { tag });
            }
            XmlEvent::Text(text) => {
                let content = text.unescape().map_err(|err| XmlError {
                    position,
                    message: err.to_string(),
                })?;
                push_text(&mut events, &content);
            }
            XmlEvent::CData(data) => {
                let content = String::from_utf8_lossy(&data.into_inner()).into_owned();
                push_text(&mut events, &content);
            }
            XmlEvent::Eof => break,
            _ => {}
        }
    }

    if let Some(tag) = open_tags.last() {
        return Err(XmlError {
            position: text.len(),
            message: format!("unexpected end of document inside <{tag}>"),
        });
    }
    Ok(events)
}

fn element(start: &BytesStart<'_>, position: usize) -> Result<(String, Attributes), XmlError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attrib = Attributes::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| XmlError {
            position,
            message: err.to_string(),
        })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(|err| XmlError {
            position,
            message: err.to_string(),
        })?;
        attrib.insert(key, value.into_owned());
    }
    Ok((tag, attrib))
}

// Adjacent text and CDATA runs collapse into one event.
fn push_text(events: &mut Vec<Event>, content: &str) {
    if content.is_empty() {
        return;
    }
    if let Some(Event::Text(previous)) = events.last_mut() {
        previous.push_str(content);
    } else {
        events.push(Event::Text(content.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_element_yields_enter_and_exit() {
        let events = read_events(r#"<DAY><SAINT CId="1"/></DAY>"#).unwrap();
        assert_eq!(events.len(), 4);
        assert!(matches!(&events[1], Event::Enter { tag, attrib } if tag == "SAINT" && attrib["CId"] == "1"));
        assert!(matches!(&events[2], Event::Exit { tag } if tag == "SAINT"));
    }

    #[test]
    fn text_is_unescaped_and_preserved() {
        let events = read_events("<LIFE>a &amp; b\n</LIFE>").unwrap();
        assert_eq!(events[1], Event::Text("a & b\n".to_string()));
    }

    #[test]
    fn declarations_and_comments_are_dropped() {
        let events =
            read_events("<?xml version=\"1.0\"?><!-- note --><DATA></DATA>").unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn unclosed_element_is_an_error() {
        assert!(read_events("<DAY><SAINT CId=\"1\">").is_err());
    }
}
