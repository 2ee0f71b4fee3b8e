use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gesture::types::LandmarkFrame;
use crate::store::keys;
use crate::store::{Store, StoreError};

/// A trained gesture: its name and the raw recording it was trained from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub frames: Vec<LandmarkFrame>,
    pub created_at: DateTime<Utc>,
}

/// Library listing entry without the frame payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureSummary {
    pub id: String,
    pub name: String,
    pub frame_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&GestureTemplate> for GestureSummary {
    fn from(value: &GestureTemplate) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
            frame_count: value.frames.len(),
            created_at: value.created_at,
        }
    }
}

/// Record shape of an exported or legacy dataset blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureDataset {
    pub name: String,
    #[serde(default)]
    pub frames: Vec<LandmarkFrame>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<GestureTemplate> for GestureDataset {
    fn from(value: GestureTemplate) -> Self {
        Self {
            name: value.name,
            frames: value.frames,
            created_at: Some(value.created_at),
        }
    }
}

impl Store {
    pub fn create_gesture(
        &self,
        name: &str,
        frames: Vec<LandmarkFrame>,
    ) -> Result<GestureTemplate, StoreError> {
        let template = GestureTemplate {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            frames,
            created_at: Utc::now(),
        };
        self.insert_gesture(&template)?;
        Ok(template)
    }

    fn insert_gesture(&self, template: &GestureTemplate) -> Result<(), StoreError> {
        let key = keys::gesture_key(self.raw_db().generate_id()?, &template.id);
        self.gestures
            .insert(key.as_bytes(), Self::serialize(template)?)?;
        Ok(())
    }

    /// Whole library in creation order. Records that fail to decode are
    /// logged and skipped.
    pub fn list_gestures(&self) -> Result<Vec<GestureTemplate>, StoreError> {
        let mut templates = Vec::new();
        for item in self.gestures.iter() {
            let (key, raw) = item?;
            if let Some(template) = decode_gesture(&key, &raw) {
                templates.push(template);
            }
        }
        Ok(templates)
    }

    pub fn list_gesture_summaries(&self) -> Result<Vec<GestureSummary>, StoreError> {
        Ok(self
            .list_gestures()?
            .iter()
            .map(GestureSummary::from)
            .collect())
    }

    pub fn get_gesture(&self, gesture_id: &str) -> Result<Option<GestureTemplate>, StoreError> {
        match self.find_gesture_key(gesture_id)? {
            Some(key) => match self.gestures.get(&key)? {
                Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    pub fn delete_gesture(&self, gesture_id: &str) -> Result<bool, StoreError> {
        match self.find_gesture_key(gesture_id)? {
            Some(key) => Ok(self.gestures.remove(key)?.is_some()),
            None => Ok(false),
        }
    }

    /// Delete the gesture at `index` in creation order, counting the same
    /// records `list_gestures` returns.
    pub fn delete_gesture_at(&self, index: usize) -> Result<GestureTemplate, StoreError> {
        let mut position = 0;
        for item in self.gestures.iter() {
            let (key, raw) = item?;
            let Some(template) = decode_gesture(&key, &raw) else {
                continue;
            };
            if position == index {
                self.gestures.remove(key)?;
                return Ok(template);
            }
            position += 1;
        }
        Err(StoreError::NotFound {
            entity: "gesture".to_string(),
            key: index.to_string(),
        })
    }

    /// Removes every gesture and returns how many were deleted.
    pub fn delete_all_gestures(&self) -> Result<usize, StoreError> {
        let count = self.gestures.len();
        self.gestures.clear()?;
        Ok(count)
    }

    pub fn count_gestures(&self) -> usize {
        self.gestures.len()
    }

    pub fn export_gestures(&self) -> Result<Vec<GestureDataset>, StoreError> {
        Ok(self
            .list_gestures()?
            .into_iter()
            .map(GestureDataset::from)
            .collect())
    }

    /// Append datasets to the library, preserving their order.
    ///
    /// Records without a timestamp are stamped with the import time. Blank
    /// names are rejected before anything is written.
    pub fn import_gestures(
        &self,
        datasets: Vec<GestureDataset>,
    ) -> Result<Vec<GestureTemplate>, StoreError> {
        if let Some(pos) = datasets.iter().position(|d| d.name.trim().is_empty()) {
            return Err(StoreError::Validation(format!(
                "dataset {pos} has an empty name"
            )));
        }

        let base = Utc::now();
        let mut batch = sled::Batch::default();
        let mut imported = Vec::with_capacity(datasets.len());
        for dataset in datasets {
            let template = GestureTemplate {
                id: uuid::Uuid::new_v4().to_string(),
                name: dataset.name.trim().to_string(),
                frames: dataset.frames,
                created_at: dataset.created_at.unwrap_or(base),
            };
            let key = keys::gesture_key(self.raw_db().generate_id()?, &template.id);
            batch.insert(key.as_bytes(), Self::serialize(&template)?);
            imported.push(template);
        }
        self.gestures.apply_batch(batch)?;
        Ok(imported)
    }

    fn find_gesture_key(&self, gesture_id: &str) -> Result<Option<sled::IVec>, StoreError> {
        for item in self.gestures.iter().keys() {
            let key = item?;
            if keys::gesture_id_from_key(&key).as_deref() == Some(gesture_id) {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}

fn decode_gesture(key: &[u8], raw: &[u8]) -> Option<GestureTemplate> {
    match Store::deserialize(raw) {
        Ok(template) => Some(template),
        Err(e) => {
            tracing::warn!(
                key = %String::from_utf8_lossy(key),
                error = %e,
                "Skipping undecodable gesture record"
            );
            None
        }
    }
}
