// STIX object model and in-memory store
//
// A deliberately thin envelope over STIX 2.x bundles: the fields the store
// queries on are typed, everything else is kept verbatim in `extra` so an
// object serializes back to its full upstream shape.

use crate::error::IntelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A STIX bundle as served by the mitre/cti repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StixBundle {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub spec_version: Option<String>,
    pub objects: Vec<StixObject>,
}

/// One STIX domain or relationship object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StixObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub revoked: Option<bool>,
    #[serde(default, rename = "x_mitre_deprecated")]
    pub deprecated: Option<bool>,
    #[serde(default)]
    pub external_references: Vec<ExternalReference>,

    // Relationship objects only
    #[serde(default)]
    pub relationship_type: Option<String>,
    #[serde(default)]
    pub source_ref: Option<String>,
    #[serde(default)]
    pub target_ref: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalReference {
    pub source_name: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl StixObject {
    /// Neither revoked nor deprecated.
    pub fn is_active(&self) -> bool {
        !self.revoked.unwrap_or(false) && !self.deprecated.unwrap_or(false)
    }

    /// The ATT&CK id (T1059, G0016, ...) from the MITRE external reference.
    pub fn attack_id(&self) -> Option<&str> {
        self.external_references
            .iter()
            .find(|r| r.source_name.starts_with("mitre-") && r.external_id.is_some())
            .and_then(|r| r.external_id.as_deref())
    }
}

/// Select a group by its display name or STIX id.
///
/// The two selectors are mutually exclusive by construction.
#[derive(Debug, Clone)]
pub enum GroupRef {
    Name(String),
    StixId(String),
}

/// In-memory index over the objects of one STIX bundle
#[derive(Debug)]
pub struct StixStore {
    objects: Vec<StixObject>,
    index_by_id: HashMap<String, usize>,
}

impl StixStore {
    pub fn from_bundle(bundle: StixBundle) -> Self {
        let objects = bundle.objects;
        let index_by_id = objects
            .iter()
            .enumerate()
            .map(|(i, obj)| (obj.id.clone(), i))
            .collect();
        Self {
            objects,
            index_by_id,
        }
    }

    /// Build a store straight from a raw bundle payload.
    pub fn from_value(payload: &Value) -> Result<Self, IntelError> {
        let bundle = StixBundle::deserialize(payload)?;
        Ok(Self::from_bundle(bundle))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, stix_id: &str) -> Option<&StixObject> {
        self.index_by_id.get(stix_id).map(|&i| &self.objects[i])
    }

    /// Object name for a STIX id.
    pub fn name_of(&self, stix_id: &str) -> Option<&str> {
        self.get(stix_id).and_then(|obj| obj.name.as_deref())
    }

    /// ATT&CK id for a STIX id.
    pub fn attack_id_of(&self, stix_id: &str) -> Option<&str> {
        self.get(stix_id).and_then(StixObject::attack_id)
    }

    fn of_types(&self, types: &[&str], include_revoked: bool) -> Vec<&StixObject> {
        self.objects
            .iter()
            .filter(|obj| types.contains(&obj.object_type.as_str()))
            .filter(|obj| include_revoked || obj.is_active())
            .collect()
    }

    /// Threat groups (intrusion-set objects).
    pub fn groups(&self, include_revoked: bool) -> Vec<&StixObject> {
        self.of_types(&["intrusion-set"], include_revoked)
    }

    /// Mitigations (course-of-action objects).
    pub fn mitigations(&self, include_revoked: bool) -> Vec<&StixObject> {
        self.of_types(&["course-of-action"], include_revoked)
    }

    /// Software used by attackers: both tools and malware.
    pub fn software(&self, include_revoked: bool) -> Vec<&StixObject> {
        self.of_types(&["tool", "malware"], include_revoked)
    }

    /// Intrusion campaigns.
    pub fn campaigns(&self, include_revoked: bool) -> Vec<&StixObject> {
        self.of_types(&["campaign"], include_revoked)
    }

    /// Campaigns attributed to one group via `attributed-to` relationships.
    pub fn campaigns_attributed_to(&self, group: &GroupRef) -> Result<Vec<&StixObject>, IntelError> {
        let group_id = match group {
            GroupRef::StixId(id) => self
                .get(id)
                .map(|obj| obj.id.as_str())
                .ok_or_else(|| IntelError::missing(format!("no STIX object with id {id}")))?,
            GroupRef::Name(name) => self
                .groups(true)
                .into_iter()
                .find(|obj| {
                    obj.name
                        .as_deref()
                        .is_some_and(|n| n.eq_ignore_ascii_case(name))
                })
                .map(|obj| obj.id.as_str())
                .ok_or_else(|| IntelError::missing(format!("no group named `{name}`")))?,
        };

        Ok(self
            .objects
            .iter()
            .filter(|obj| {
                obj.object_type == "relationship"
                    && obj.relationship_type.as_deref() == Some("attributed-to")
                    && obj.target_ref.as_deref() == Some(group_id)
            })
            .filter_map(|rel| rel.source_ref.as_deref())
            .filter_map(|campaign_id| self.get(campaign_id))
            .filter(|obj| obj.object_type == "campaign")
            .collect())
    }
}
