use serde_json::json;
use std::collections::BTreeMap;
use typikon_core::{
    Command, Commemoration, CycleSource, JDate, LiturgicalDay, Reading, Service, ServiceType,
    Value,
};

#[test]
fn commemoration_uses_renderer_field_names() {
    let mut saint = Commemoration::new("9208", CycleSource::Movable);
    saint.rank = Some(Value::from(4));
    saint.reference = Some("4100".to_string());
    saint.name = Some(BTreeMap::from([("Short".to_string(), "Nick".to_string())]));
    saint.services = Some(vec![Service {
        kind: ServiceType::Liturgy,
        readings: Some(vec![Reading {
            effective_week: Some("3".to_string()),
            pericope: None,
            citation: "Luke_8:5-15".to_string(),
            kind: Some("gospel".to_string()),
        }]),
    }]);

    let value = serde_json::to_value(&saint).unwrap();
    assert_eq!(value["cid"], json!("9208"));
    assert_eq!(value["src"], json!("pentecostarion"));
    assert_eq!(value["type"], json!(4.0));
    assert_eq!(value["ref"], json!("4100"));
    assert_eq!(value["name"]["Short"], json!("Nick"));
    assert_eq!(value["services"][0]["type"], json!("liturgy"));
    assert_eq!(
        value["services"][0]["readings"][0],
        json!({
            "effWeek": "3",
            "pericope": null,
            "reading": "Luke_8:5-15",
            "type": "gospel"
        })
    );

    let back: Commemoration = serde_json::from_value(value).unwrap();
    assert_eq!(back, saint);
}

#[test]
fn services_without_readings_omit_the_field() {
    let value = serde_json::to_value(Service::new(ServiceType::Nones)).unwrap();
    assert_eq!(value, json!({ "type": "none" }));

    let value = serde_json::to_value(Service::new(ServiceType::Prime)).unwrap();
    assert_eq!(value, json!({ "type": "prime" }));
}

#[test]
fn liturgical_day_uses_renderer_field_names() {
    let day = LiturgicalDay {
        date: JDate::new(2019, 5, 1).unwrap(),
        tone: 3,
        day_rank: -1,
        fasting_code: Some("w".to_string()),
        commemorations: vec![Commemoration::new("501", CycleSource::Fixed)],
        commands: vec![Command::new("Suppress", "nday == 0")],
    };

    let value = serde_json::to_value(&day).unwrap();
    assert_eq!(value["date"], json!({ "year": 2019, "month": 5, "day": 1 }));
    assert_eq!(value["tone"], json!(3));
    assert_eq!(value["dayRank"], json!(-1));
    assert_eq!(value["fastingCode"], json!("w"));
    assert_eq!(value["saints"][0]["src"], json!("menaion"));
    assert!(value["saints"][0].get("services").is_none());
    assert_eq!(value["commands"][0]["name"], json!("Suppress"));
    assert_eq!(value["commands"][0]["value"], json!("nday == 0"));
}

#[test]
fn values_serialize_untagged() {
    assert_eq!(serde_json::to_value(Value::from("5")).unwrap(), json!("5"));
    assert_eq!(serde_json::to_value(Value::from(true)).unwrap(), json!(true));
    let value: Value = serde_json::from_str("2.5").unwrap();
    assert_eq!(value, Value::Number(2.5));
}
