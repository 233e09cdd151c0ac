//! Prestige ledger aggregate - All prestige records of one save
//!
//! Each record sits behind its own mutex so the purchase and reset
//! transactions serialize per skill while different skills proceed
//! independently. The map lock is only held to find or create a slot.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::domain::entities::PrestigeRecord;
use crate::domain::value_objects::SkillId;

pub(crate) type RecordSlot = Arc<Mutex<PrestigeRecord>>;

/// The per-skill prestige records of a save
#[derive(Default)]
pub struct PrestigeLedger {
    records: RwLock<HashMap<SkillId, RecordSlot>>,
}

impl PrestigeLedger {
    /// Rebuild a ledger from persisted records
    ///
    /// If the same skill appears twice the later record wins.
    pub fn from_records(records: impl IntoIterator<Item = PrestigeRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.skill.clone(), Arc::new(Mutex::new(record))))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// Create zero records for any of `skills` that have none yet
    pub async fn ensure_skills<'a>(&self, skills: impl IntoIterator<Item = &'a SkillId>) -> usize {
        let mut records = self.records.write().await;
        let mut created = 0;
        for skill in skills {
            if !records.contains_key(skill) {
                records.insert(skill.clone(), Arc::new(Mutex::new(PrestigeRecord::new(skill.clone()))));
                created += 1;
            }
        }
        created
    }

    /// Snapshot of the record for `skill`, created empty if missing
    pub async fn get_record(&self, skill: &SkillId) -> PrestigeRecord {
        let slot = self.slot(skill).await;
        let record = slot.lock().await;
        record.clone()
    }

    /// Snapshots of every known record, sorted by skill
    pub async fn all_records(&self) -> Vec<PrestigeRecord> {
        let slots: Vec<RecordSlot> = self.records.read().await.values().cloned().collect();

        let mut snapshots = Vec::with_capacity(slots.len());
        for slot in slots {
            snapshots.push(slot.lock().await.clone());
        }
        snapshots.sort_by(|a, b| a.skill.cmp(&b.skill));
        snapshots
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Live slot for `skill`; only the prestige transactions lock it mutably
    pub(crate) async fn slot(&self, skill: &SkillId) -> RecordSlot {
        if let Some(slot) = self.records.read().await.get(skill) {
            return slot.clone();
        }

        let mut records = self.records.write().await;
        records
            .entry(skill.clone())
            .or_insert_with(|| Arc::new(Mutex::new(PrestigeRecord::new(skill.clone()))))
            .clone()
    }
}
