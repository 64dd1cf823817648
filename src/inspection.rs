use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::calendar::CalendarDate;
use crate::error::{Error, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "worn")]
    Worn,
    #[serde(rename = "damaged")]
    Damaged,
    #[serde(rename = "missing")]
    Missing,
    #[serde(rename = "n/a")]
    NotApplicable,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Ok => "OK",
            Condition::Worn => "Worn",
            Condition::Damaged => "Damaged",
            Condition::Missing => "Missing",
            Condition::NotApplicable => "N/A",
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Ok
    }
}

impl FromStr for Condition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ok" => Ok(Condition::Ok),
            "worn" => Ok(Condition::Worn),
            "damaged" => Ok(Condition::Damaged),
            "missing" => Ok(Condition::Missing),
            "n/a" | "na" => Ok(Condition::NotApplicable),
            _ => Err(Error::new(
                ErrorKind::StoreFormat,
                format!("unknown condition '{}'", s).as_str(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InspectionType {
    #[serde(rename = "move-in")]
    MoveIn,
    #[serde(rename = "move-out")]
    MoveOut,
    #[serde(rename = "periodic")]
    Periodic,
}

impl InspectionType {
    pub fn label(&self) -> &'static str {
        match self {
            InspectionType::MoveIn => "Move-in",
            InspectionType::MoveOut => "Move-out",
            InspectionType::Periodic => "Periodic",
        }
    }
}

impl Default for InspectionType {
    fn default() -> Self {
        InspectionType::MoveIn
    }
}

impl FromStr for InspectionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "move-in" | "movein" => Ok(InspectionType::MoveIn),
            "move-out" | "moveout" => Ok(InspectionType::MoveOut),
            "periodic" => Ok(InspectionType::Periodic),
            _ => Err(Error::new(
                ErrorKind::StoreFormat,
                format!("unknown inspection type '{}'", s).as_str(),
            )),
        }
    }
}

impl fmt::Display for InspectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InspectionType::MoveIn => "move-in",
            InspectionType::MoveOut => "move-out",
            InspectionType::Periodic => "periodic",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub label: String,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub evidence_ref: String,
}

impl Item {
    pub fn new(label: &str) -> Self {
        Item {
            id: Uuid::new_v4(),
            label: label.to_owned(),
            condition: Condition::Ok,
            note: String::new(),
            evidence_ref: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub title: String,
    pub items: Vec<Item>,
}

impl Section {
    pub fn new(title: &str, item_labels: &[&str]) -> Self {
        Section {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            items: item_labels.iter().map(|label| Item::new(label)).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub sections: Vec<Section>,
}

impl Default for Template {
    fn default() -> Self {
        Template {
            name: "Default Inspection".to_owned(),
            sections: vec![
                Section::new(
                    "Entrance / Hall",
                    &["Door & lock", "Walls/paint", "Flooring", "Lights/switches"],
                ),
                Section::new(
                    "Living / Bedroom",
                    &[
                        "Walls/paint",
                        "Flooring",
                        "Windows/frames",
                        "Heating/radiator",
                        "Curtains/blinds",
                    ],
                ),
                Section::new(
                    "Kitchen",
                    &[
                        "Cabinets/countertop",
                        "Sink & taps",
                        "Appliances (if included)",
                        "Tiles/splashback",
                        "Ventilation",
                    ],
                ),
                Section::new(
                    "Bathroom",
                    &[
                        "Bath/shower",
                        "Tiles/grout",
                        "Toilet",
                        "Sink & taps",
                        "Ventilation",
                    ],
                ),
                Section::new(
                    "Utilities / Electrical",
                    &["Sockets", "Light fixtures", "Water shutoff", "Smoke detector"],
                ),
                Section::new(
                    "Windows / Exterior",
                    &[
                        "Windows open/close",
                        "Seals",
                        "Balcony/terrace (if any)",
                        "Mailbox/keys",
                    ],
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: u32,
    pub damaged: u32,
    pub worn: u32,
    pub missing: u32,
}

/// A change to a single checklist item; unset fields stay as they are.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub condition: Option<Condition>,
    pub note: Option<String>,
    pub evidence_ref: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: Uuid,
    pub created_at: String,
    pub date: CalendarDate,
    pub inspection_type: InspectionType,
    #[serde(default)]
    pub property_label: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub occupants: String,
    #[serde(default)]
    pub notes: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub summary: Summary,
}

impl Inspection {
    /// Starts a fresh inspection from a template: same section and item
    /// labels, all conditions reset to ok, notes and evidence cleared.
    pub fn from_template(
        template: &Template,
        date: CalendarDate,
        inspection_type: InspectionType,
    ) -> Self {
        let sections = template
            .sections
            .iter()
            .map(|s| Section {
                id: s.id,
                title: s.title.clone(),
                items: s
                    .items
                    .iter()
                    .map(|it| Item {
                        id: it.id,
                        label: it.label.clone(),
                        condition: Condition::Ok,
                        note: String::new(),
                        evidence_ref: String::new(),
                    })
                    .collect(),
            })
            .collect();

        let mut inspection = Inspection {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now().to_rfc3339(),
            date,
            inspection_type,
            property_label: String::new(),
            address: String::new(),
            occupants: String::new(),
            notes: String::new(),
            sections,
            summary: Summary::default(),
        };
        inspection.summary = inspection.summarize();

        inspection
    }

    pub fn summarize(&self) -> Summary {
        let mut summary = Summary::default();

        for section in &self.sections {
            for item in &section.items {
                summary.total += 1;
                match item.condition {
                    Condition::Damaged => summary.damaged += 1,
                    Condition::Worn => summary.worn += 1,
                    Condition::Missing => summary.missing += 1,
                    _ => {}
                }
            }
        }

        summary
    }

    /// Applies a patch to the item addressed by section and item id and
    /// recomputes the summary. Returns false when no such item exists.
    pub fn update_item(&mut self, section_id: Uuid, item_id: Uuid, patch: ItemPatch) -> bool {
        let item = self
            .sections
            .iter_mut()
            .filter(|s| s.id == section_id)
            .flat_map(|s| s.items.iter_mut())
            .find(|it| it.id == item_id);

        let item = match item {
            Some(item) => item,
            None => return false,
        };

        if let Some(condition) = patch.condition {
            item.condition = condition;
        }
        if let Some(note) = patch.note {
            item.note = note;
        }
        if let Some(evidence_ref) = patch.evidence_ref {
            item.evidence_ref = evidence_ref;
        }

        self.summary = self.summarize();
        true
    }
}
