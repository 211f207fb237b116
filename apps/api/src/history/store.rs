//! Analysis Record Store: the persisted, most-recent-first analysis history.
//!
//! The whole history is one JSON array stored under a single key. Every
//! mutation is a read-modify-write of that array, serialized through one lock
//! per store so concurrent requests cannot overwrite each other's changes.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::scoring::Confidence;
use crate::errors::AppError;
use crate::history::kv::KeyValueStore;
use crate::history::validation::validate_history;
use crate::models::analysis::{AnalysisDraft, AnalysisRecord};

/// Storage key holding the serialized history array.
pub const STORAGE_KEY: &str = "placement_analysis_history";

/// Oldest entries beyond this are dropped on append.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Clone)]
pub struct AnalysisStore {
    kv: Arc<dyn KeyValueStore>,
    // Held across load and write. Loading may itself write back a cleaned list.
    lock: Arc<Mutex<()>>,
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Analysis {id} not found"))
}

impl AnalysisStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// All valid records, most recent first.
    ///
    /// A blob that is not a JSON array reads as empty. Individual malformed
    /// records are dropped and the cleaned list is written back straight away.
    pub async fn list(&self) -> Result<Vec<AnalysisRecord>, AppError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Assigns an id and timestamps, stores the record at the head of the
    /// history, and returns it.
    pub async fn append_new(&self, draft: AnalysisDraft) -> Result<AnalysisRecord, AppError> {
        let record = AnalysisRecord::from_draft(draft, Uuid::new_v4().to_string(), Utc::now());

        let _guard = self.lock.lock().await;
        let mut history = self.load().await?;
        history.insert(0, record.clone());
        history.truncate(HISTORY_LIMIT);
        self.write(&history).await?;

        info!(
            "Stored analysis {} ({} categories, base score {})",
            record.id,
            record.extracted_skills.len(),
            record.base_score
        );
        Ok(record)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<AnalysisRecord>, AppError> {
        Ok(self.list().await?.into_iter().find(|r| r.id == id))
    }

    pub async fn latest(&self) -> Result<Option<AnalysisRecord>, AppError> {
        Ok(self.list().await?.into_iter().next())
    }

    /// Removes the record with `id`. Returns whether anything was removed.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        let _guard = self.lock.lock().await;
        let mut history = self.load().await?;
        let before = history.len();
        history.retain(|r| r.id != id);

        if history.len() == before {
            return Ok(false);
        }
        self.write(&history).await?;
        Ok(true)
    }

    /// Sets one skill's confidence and recomputes the record's final score.
    ///
    /// `skill` must be one of the labels extracted for the record.
    pub async fn update_skill_confidence(
        &self,
        id: &str,
        skill: &str,
        confidence: Confidence,
    ) -> Result<AnalysisRecord, AppError> {
        let _guard = self.lock.lock().await;
        let mut history = self.load().await?;
        let mut record = history
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))?;

        if !record.extracted_skills.contains_label(skill) {
            return Err(AppError::Validation(format!(
                "'{skill}' is not a detected skill for analysis {id}"
            )));
        }

        record.set_skill_confidence(skill, confidence, Utc::now());
        Self::replace(&mut history, id, record.clone())?;
        self.write(&history).await?;
        Ok(record)
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        self.kv.delete(STORAGE_KEY).await
    }

    /// Reads and cleans the stored history. Callers must hold `lock`.
    async fn load(&self) -> Result<Vec<AnalysisRecord>, AppError> {
        let Some(raw) = self.kv.get(STORAGE_KEY).await? else {
            return Ok(Vec::new());
        };

        let entries: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Stored analysis history is unreadable, treating as empty: {e}");
                return Ok(Vec::new());
            }
        };

        let validation = validate_history(entries);
        if !validation.is_clean() {
            warn!(
                "Removed {} malformed analysis record(s) from history",
                validation.rejected.len()
            );
            self.write(&validation.records).await?;
        }

        Ok(validation.records)
    }

    /// Overwrites the record with `id` in place, keeping its position.
    fn replace(
        history: &mut [AnalysisRecord],
        id: &str,
        record: AnalysisRecord,
    ) -> Result<(), AppError> {
        let slot = history
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        *slot = record;
        Ok(())
    }

    async fn write(&self, history: &[AnalysisRecord]) -> Result<(), AppError> {
        let serialized = serde_json::to_string(history)?;
        self.kv.set(STORAGE_KEY, &serialized).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pipeline::{analyze, AnalysisInput};
    use crate::history::kv::{FileKv, MemoryKv};

    fn store() -> (AnalysisStore, Arc<MemoryKv>) {
        let kv = Arc::new(MemoryKv::new());
        (AnalysisStore::new(kv.clone()), kv)
    }

    fn draft(jd: &str) -> AnalysisDraft {
        analyze(&AnalysisInput {
            jd_text: jd.to_string(),
            company: "Amazon".to_string(),
            role: "SDE".to_string(),
        })
    }

    async fn raw_history(kv: &MemoryKv) -> Vec<Value> {
        serde_json::from_str(&kv.get(STORAGE_KEY).await.unwrap().unwrap()).unwrap()
    }

    async fn overwrite_history(kv: &MemoryKv, entries: &[Value]) {
        kv.set(STORAGE_KEY, &serde_json::to_string(entries).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let (store, _) = store();
        assert!(store.list().await.unwrap().is_empty());
        assert!(store.latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_then_find_round_trips() {
        let (store, _) = store();
        let draft = draft("Java and React");
        let stored = store.append_new(draft.clone()).await.unwrap();
        assert!(Uuid::parse_str(&stored.id).is_ok());

        let found = store.find_by_id(&stored.id).await.unwrap().unwrap();
        assert_eq!(found, stored);
        assert!(found.matches_draft(&draft));
        assert_eq!(found.final_score, found.base_score);
    }

    #[tokio::test]
    async fn test_history_is_most_recent_first() {
        let (store, _) = store();
        let first = store.append_new(draft("python")).await.unwrap();
        let second = store.append_new(draft("react")).await.unwrap();

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id.clone(), first.id]);
        assert_eq!(store.latest().await.unwrap().unwrap().id, second.id);
    }

    #[tokio::test]
    async fn test_history_is_capped() {
        let (store, _) = store();
        let first = store.append_new(draft("python")).await.unwrap();
        for _ in 0..HISTORY_LIMIT {
            store.append_new(draft("react")).await.unwrap();
        }

        let history = store.list().await.unwrap();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert!(history.iter().all(|r| r.id != first.id));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let kv = Arc::new(FileKv::new(dir.path().join("history.json")));
        let store = AnalysisStore::new(kv);

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.append_new(draft(&format!("java {i}"))).await })
            })
            .collect();

        let mut appended = Vec::new();
        for task in tasks {
            appended.push(task.await.unwrap().unwrap().id);
        }

        let stored = store.list().await.unwrap();
        assert_eq!(stored.len(), 20);
        for id in &appended {
            assert!(stored.iter().any(|r| &r.id == id), "lost {id}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_confidence_updates_are_all_kept() {
        let (store, _) = store();
        let record = store
            .append_new(draft("java python react sql aws jest"))
            .await
            .unwrap();
        let labels = ["Java", "Python", "React", "Sql", "Aws", "Jest"];

        let tasks: Vec<_> = labels
            .iter()
            .map(|&label| {
                let store = store.clone();
                let id = record.id.clone();
                tokio::spawn(async move {
                    store
                        .update_skill_confidence(&id, label, Confidence::Know)
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let reloaded = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(reloaded.skill_confidence_map.len(), labels.len());
        assert_eq!(reloaded.final_score, record.base_score + labels.len() as u8);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let (store, _) = store();
        let keep = store.append_new(draft("python")).await.unwrap();
        let gone = store.append_new(draft("react")).await.unwrap();

        assert!(store.delete_by_id(&gone.id).await.unwrap());
        assert!(!store.delete_by_id(&gone.id).await.unwrap());

        let history = store.list().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_replace_unknown_id_is_not_found() {
        let (store, _) = store();
        let record = store.append_new(draft("python")).await.unwrap();
        let mut history = store.list().await.unwrap();
        let err = AnalysisStore::replace(&mut history, "missing", record).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_skill_confidence_persists_live_score() {
        let (store, _) = store();
        let record = store.append_new(draft("Java and React")).await.unwrap();
        let base = record.base_score;

        store
            .update_skill_confidence(&record.id, "Java", Confidence::Know)
            .await
            .unwrap();
        let updated = store
            .update_skill_confidence(&record.id, "React", Confidence::Practice)
            .await
            .unwrap();
        assert_eq!(updated.final_score, base);

        let updated = store
            .update_skill_confidence(&record.id, "React", Confidence::Know)
            .await
            .unwrap();
        assert_eq!(updated.final_score, base + 2);

        let reloaded = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(reloaded.final_score, base + 2);
        assert_eq!(reloaded.base_score, base);
        assert_eq!(reloaded.created_at, record.created_at);
        assert!(reloaded.updated_at >= record.updated_at);
    }

    #[tokio::test]
    async fn test_update_skill_confidence_rejects_undetected_labels() {
        let (store, _) = store();
        let record = store.append_new(draft("no keywords here")).await.unwrap();

        for skill in ["zzz", "a", "java"] {
            let err = store
                .update_skill_confidence(&record.id, skill, Confidence::Know)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }

        let reloaded = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert!(reloaded.skill_confidence_map.is_empty());
        assert_eq!(reloaded.final_score, record.base_score);
    }

    #[tokio::test]
    async fn test_update_skill_confidence_unknown_id() {
        let (store, _) = store();
        let err = store
            .update_skill_confidence("missing", "Java", Confidence::Know)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_tampered_final_score_is_recomputed_on_load() {
        let (store, kv) = store();
        let record = store.append_new(draft("python")).await.unwrap();

        let mut raw = raw_history(&kv).await;
        raw[0]["finalScore"] = serde_json::json!(250);
        overwrite_history(&kv, &raw).await;

        let found = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(found.final_score, record.base_score);
        assert!(found.skill_confidence_map.is_empty());
    }

    #[tokio::test]
    async fn test_legacy_records_are_kept() {
        let (store, kv) = store();
        let legacy = serde_json::json!({
            "id": "1700000000000",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "jdText": "java",
            "extractedSkills": {}
        });
        overwrite_history(&kv, &[legacy]).await;

        let history = store.list().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "1700000000000");
        assert_eq!(raw_history(&kv).await.len(), 1);

        assert!(store.delete_by_id("1700000000000").await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_entries_are_dropped_and_written_back() {
        let (store, kv) = store();
        let good = store.append_new(draft("python")).await.unwrap();

        let mut raw = raw_history(&kv).await;
        raw.push(serde_json::json!({"id": "broken"}));
        overwrite_history(&kv, &raw).await;

        let history = store.list().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, good.id);
        assert_eq!(raw_history(&kv).await.len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_blob_reads_as_empty() {
        let (store, kv) = store();
        kv.set(STORAGE_KEY, "{not json").await.unwrap();
        assert!(store.list().await.unwrap().is_empty());

        // A fresh append replaces the unreadable blob.
        store.append_new(draft("python")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let (store, kv) = store();
        store.append_new(draft("python")).await.unwrap();
        store.clear().await.unwrap();
        assert!(kv.get(STORAGE_KEY).await.unwrap().is_none());
        assert!(store.list().await.unwrap().is_empty());
    }
}
