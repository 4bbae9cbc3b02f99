use super::{required, ParseResult};
use crate::expr::{vars, Context, Value};
use crate::model::{merge_attributes, Life, LifeDocument, Reading, Service, ServiceType};
use crate::scan::{read_events, Attributes, Event, ScanFilter, CMD_ATTRIBUTE};

/// Parses a biography document (names, info, life text, services).
///
/// Entering a `SERVICE` element sets the context's `dRank` to the declared
/// `Type` (0 when absent), so predicates later in the same document see the
/// new rank.
pub fn parse_life(text: &str, ctx: &mut Context) -> ParseResult<LifeDocument> {
    let mut walk = LifeWalk::default();
    let mut filter = ScanFilter::new();

    for event in read_events(text)? {
        let Some(event) = filter.feed(event, ctx)? else {
            continue;
        };
        match event {
            Event::Enter { tag, attrib } => walk.enter(&tag, attrib, ctx)?,
            Event::Exit { tag } => walk.exit(&tag),
            Event::Text(content) => walk.text(&content),
        }
    }

    Ok(walk.finish())
}

#[derive(Default)]
struct LifeWalk {
    document: LifeDocument,
    services: Vec<(ServiceType, Vec<Reading>)>,
    current: Option<ServiceType>,
    in_life: bool,
}

impl LifeWalk {
    fn enter(&mut self, tag: &str, mut attrib: Attributes, ctx: &mut Context) -> ParseResult<()> {
        match tag {
            "NAME" => {
                attrib.remove(CMD_ATTRIBUTE);
                merge_attributes(&mut self.document.name, Some(attrib));
            }
            "INFO" => {
                attrib.remove(CMD_ATTRIBUTE);
                merge_attributes(&mut self.document.info, Some(attrib));
            }
            "REF" => {
                if !attrib.contains_key("Type") {
                    self.document.reference = attrib.get("CId").cloned();
                }
            }
            "SERVICE" => {
                let rank = attrib
                    .get("Type")
                    .filter(|rank| !rank.is_empty())
                    .map(|rank| Value::from(rank.as_str()));
                let numeric = rank.as_ref().map_or(0.0, Value::to_number);
                ctx.set(vars::DAY_RANK, numeric);
                self.document.rank = Some(rank);
            }
            "SCRIPTURE" => {
                let Some(kind) = self.current else {
                    return Ok(());
                };
                let reading = Reading {
                    effective_week: non_empty(&attrib, "EffWeek"),
                    pericope: non_empty(&attrib, "Pericope"),
                    citation: required(tag, &attrib, "Reading")?.to_string(),
                    kind: non_empty(&attrib, "Type"),
                };
                for (service, readings) in &mut self.services {
                    if *service == kind {
                        readings.push(reading.clone());
                    }
                }
            }
            "LIFE" => {
                attrib.remove(CMD_ATTRIBUTE);
                self.document.life = Some(Life {
                    attributes: attrib,
                    text: String::new(),
                });
                self.in_life = true;
            }
            other => {
                if let Some(kind) = ServiceType::from_tag(other) {
                    self.current = Some(kind);
                    self.services.push((kind, Vec::new()));
                }
            }
        }
        Ok(())
    }

    fn exit(&mut self, tag: &str) {
        if tag == "LIFE" {
            self.in_life = false;
        } else if ServiceType::from_tag(tag).is_some() {
            self.current = None;
        }
    }

    fn text(&mut self, content: &str) {
        if !self.in_life {
            return;
        }
        if let Some(life) = self.document.life.as_mut() {
            life.text.extend(content.chars().filter(|ch| *ch != '\r'));
        }
    }

    fn finish(mut self) -> LifeDocument {
        self.document.services = self
            .services
            .into_iter()
            .map(|(kind, readings)| Service {
                kind,
                readings: (!readings.is_empty()).then_some(readings),
            })
            .collect();
        self.document
    }
}

fn non_empty(attrib: &Attributes, name: &str) -> Option<String> {
    attrib.get(name).filter(|value| !value.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_names_life_text_and_reference() {
        let mut ctx = Context::new();
        let doc = parse_life(
            "<SAINT>\
               <NAME Nominative=\"Nicholas\" Cmd=\"1\"/>\
               <NAME Short=\"Nick\"/>\
               <INFO Repose=\"343\"/>\
               <REF CId=\"4100\"/>\
               <REF CId=\"4200\" Type=\"see also\"/>\
               <LIFE Copyright=\"x\">Born in\r\n Patara</LIFE>\
             </SAINT>",
            &mut ctx,
        )
        .unwrap();

        let name = doc.name.unwrap();
        assert_eq!(name.len(), 2);
        assert_eq!(name["Short"], "Nick");
        assert!(!name.contains_key("Cmd"));
        assert_eq!(doc.info.unwrap()["Repose"], "343");
        assert_eq!(doc.reference.as_deref(), Some("4100"));
        let life = doc.life.unwrap();
        assert_eq!(life.text, "Born in\n Patara");
        assert_eq!(life.attributes["Copyright"], "x");
        assert!(doc.services.is_empty());
        assert_eq!(doc.rank, None);
    }

    #[test]
    fn services_without_readings_have_no_reading_list() {
        let mut ctx = Context::new();
        let doc = parse_life(
            "<SAINT><SERVICE Type=\"4\"><VESPERS/><PRIMES/></SERVICE></SAINT>",
            &mut ctx,
        )
        .unwrap();

        assert_eq!(doc.rank, Some(Some(Value::from("4"))));
        assert_eq!(ctx.get(vars::DAY_RANK), Some(&Value::from(4)));
        assert_eq!(doc.services.len(), 2);
        assert_eq!(doc.services[1].kind, ServiceType::Prime);
        assert!(doc.services.iter().all(|service| service.readings.is_none()));
    }
}
