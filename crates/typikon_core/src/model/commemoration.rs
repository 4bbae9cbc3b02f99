//! Commemoration records and their services.
//!
//! # Responsibility
//! - Define the per-saint record assembled from cycle and biography documents.
//! - Merge successive biography layers onto one record.
//!
//! # Invariants
//! - `cid` and `source` never change after the cycle document is parsed.
//! - `name`/`info` merges are key-wise; later layers win per key.
//! - `life`/`ref` always take the later layer's value, absent included.
//! - `services` only grows; layers append, never replace.

use crate::expr::Value;
use crate::scan::Attributes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Which calendar cycle a commemoration was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleSource {
    /// Movable cycle, anchored on Pascha (Triodion and Pentecostarion).
    #[serde(rename = "pentecostarion")]
    Movable,
    /// Fixed cycle, keyed by month and day.
    #[serde(rename = "menaion")]
    Fixed,
}

impl CycleSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movable => "pentecostarion",
            Self::Fixed => "menaion",
        }
    }
}

impl Display for CycleSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical hours and the Eucharistic service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Vespers,
    Matins,
    Liturgy,
    Sexte,
    Prime,
    Terce,
    #[serde(rename = "none")]
    Nones,
}

impl ServiceType {
    /// Maps a document element name to its service type.
    ///
    /// The `PRIMES` element is stored as the singular `prime`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "VESPERS" => Some(Self::Vespers),
            "MATINS" => Some(Self::Matins),
            "LITURGY" => Some(Self::Liturgy),
            "SEXTE" => Some(Self::Sexte),
            "PRIMES" => Some(Self::Prime),
            "TERCE" => Some(Self::Terce),
            "NONE" => Some(Self::Nones),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "effWeek", default)]
    pub effective_week: Option<String>,
    #[serde(default)]
    pub pericope: Option<String>,
    /// Scripture citation, e.g. `Luke_8:5-15`.
    #[serde(rename = "reading")]
    pub citation: String,
    /// Lesson kind (epistle, gospel, ...), when the document names one.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "type")]
    pub kind: ServiceType,
    /// `None` when the service carries no readings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readings: Option<Vec<Reading>>,
}

impl Service {
    pub fn new(kind: ServiceType) -> Self {
        Self {
            kind,
            readings: None,
        }
    }

    pub fn has_readings(&self) -> bool {
        self.readings.is_some()
    }
}

/// Biography text plus the attributes of its `LIFE` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Life {
    #[serde(flatten)]
    pub attributes: Attributes,
    #[serde(rename = "Text")]
    pub text: String,
}

/// Everything one biography document contributes to a commemoration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LifeDocument {
    pub name: Option<Attributes>,
    pub info: Option<Attributes>,
    pub life: Option<Life>,
    pub reference: Option<String>,
    /// `None` when no `SERVICE` element was seen; `Some(None)` when one was
    /// seen without a `Type`.
    pub rank: Option<Option<Value>>,
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commemoration {
    pub cid: String,
    #[serde(rename = "src")]
    pub source: CycleSource,
    #[serde(default)]
    pub menologion: String,
    /// Rank (fixed cycle) or tone contribution (movable cycle).
    #[serde(rename = "type", default)]
    pub rank: Option<Value>,
    #[serde(default)]
    pub name: Option<Attributes>,
    #[serde(default)]
    pub info: Option<Attributes>,
    #[serde(default)]
    pub life: Option<Life>,
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
}

impl Commemoration {
    pub fn new(cid: impl Into<String>, source: CycleSource) -> Self {
        Self {
            cid: cid.into(),
            source,
            menologion: String::new(),
            rank: None,
            name: None,
            info: None,
            life: None,
            reference: None,
            services: None,
        }
    }

    /// Integer view of `rank`; `None` when unset or not numeric.
    pub fn rank_number(&self) -> Option<i64> {
        self.rank.as_ref().and_then(Value::as_integer)
    }

    /// Numeric `cid`, when the identifier is an integer.
    pub fn cid_number(&self) -> Option<i64> {
        self.cid.trim().parse().ok()
    }

    pub fn is_movable(&self) -> bool {
        self.source == CycleSource::Movable
    }

    pub fn services(&self) -> &[Service] {
        self.services.as_deref().unwrap_or(&[])
    }

    pub fn has_service(&self, kind: ServiceType) -> bool {
        self.services().iter().any(|service| service.kind == kind)
    }

    /// Layers one biography document onto this record.
    pub fn merge_life(&mut self, document: LifeDocument) {
        merge_attributes(&mut self.name, document.name);
        merge_attributes(&mut self.info, document.info);
        self.life = document.life;
        self.reference = document.reference;
        if let Some(rank) = document.rank {
            self.rank = rank;
        }
        if !document.services.is_empty() {
            self.services
                .get_or_insert_with(Vec::new)
                .extend(document.services);
        }
    }
}

/// Merges `layer` into `base`, later keys overriding earlier ones.
pub fn merge_attributes(base: &mut Option<Attributes>, layer: Option<Attributes>) {
    let Some(layer) = layer else {
        return;
    };
    match base {
        Some(existing) => existing.extend(layer),
        None => *base = Some(layer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn merge_keeps_earlier_keys_and_overrides_shared_ones() {
        let mut base = Some(attrs(&[("Short", "Nicholas"), ("Long", "St. Nicholas")]));
        merge_attributes(&mut base, Some(attrs(&[("Long", "Holy Nicholas")])));
        assert_eq!(
            base,
            Some(attrs(&[("Short", "Nicholas"), ("Long", "Holy Nicholas")]))
        );
    }

    #[test]
    fn merge_life_appends_services_and_clears_reference_on_empty_layer() {
        let mut saint = Commemoration::new("9208", CycleSource::Movable);
        saint.rank = Some(Value::from(2));
        saint.merge_life(LifeDocument {
            reference: Some("100".into()),
            services: vec![Service::new(ServiceType::Liturgy)],
            ..LifeDocument::default()
        });
        assert_eq!(saint.reference.as_deref(), Some("100"));
        assert_eq!(saint.rank, Some(Value::from(2)));

        saint.merge_life(LifeDocument {
            services: vec![Service::new(ServiceType::Vespers)],
            ..LifeDocument::default()
        });
        assert_eq!(saint.reference, None);
        assert_eq!(saint.services().len(), 2);
        assert!(saint.has_service(ServiceType::Liturgy));
    }

    #[test]
    fn untyped_service_clears_rank() {
        let mut saint = Commemoration::new("501", CycleSource::Fixed);
        saint.rank = Some(Value::from(4));
        saint.merge_life(LifeDocument {
            rank: Some(None),
            ..LifeDocument::default()
        });
        assert_eq!(saint.rank, None);
    }

    #[test]
    fn service_tags_normalize_primes() {
        assert_eq!(ServiceType::from_tag("PRIMES"), Some(ServiceType::Prime));
        assert_eq!(ServiceType::from_tag("NONE"), Some(ServiceType::Nones));
        assert_eq!(ServiceType::from_tag("SERVICE"), None);
    }
}
