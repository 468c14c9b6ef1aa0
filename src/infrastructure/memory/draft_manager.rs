//! In-Memory Draft Manager Implementation

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{DraftFieldsPatch, DraftManagerPort, DraftStoreError};
use crate::domain::podcast::{
    CreationForm, DraftError, DraftId, GeneratedAudio, GeneratedImage, NewPodcast, PodcastId,
    VoiceType,
};
use crate::domain::Navigation;

/// 内存草稿管理器
///
/// 对同一草稿的修改在 dashmap 分片锁内完成，状态迁移因此串行
pub struct InMemoryDraftManager {
    drafts: DashMap<DraftId, CreationForm>,
}

impl InMemoryDraftManager {
    pub fn new() -> Self {
        Self {
            drafts: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn with_form<T>(
        &self,
        id: &DraftId,
        f: impl FnOnce(&mut CreationForm) -> Result<T, DraftError>,
    ) -> Result<T, DraftStoreError> {
        let mut form = self
            .drafts
            .get_mut(id)
            .ok_or(DraftStoreError::NotFound(*id))?;
        Ok(f(form.value_mut())?)
    }
}

impl Default for InMemoryDraftManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftManagerPort for InMemoryDraftManager {
    fn create(&self, form: CreationForm) -> Result<DraftId, DraftStoreError> {
        let draft_id = *form.id();
        if self.drafts.contains_key(&draft_id) {
            return Err(DraftStoreError::AlreadyExists(draft_id));
        }
        self.drafts.insert(draft_id, form);
        tracing::info!(draft_id = %draft_id, "Draft created");
        Ok(draft_id)
    }

    fn get(&self, id: &DraftId) -> Result<CreationForm, DraftStoreError> {
        self.drafts
            .get(id)
            .map(|f| f.clone())
            .ok_or(DraftStoreError::NotFound(*id))
    }

    fn update_fields(
        &self,
        id: &DraftId,
        patch: DraftFieldsPatch,
    ) -> Result<CreationForm, DraftStoreError> {
        self.with_form(id, |form| {
            if let Some(title) = patch.title {
                form.set_title(title)?;
            }
            if let Some(description) = patch.description {
                form.set_description(description)?;
            }
            if let Some(prompt) = patch.voice_prompt {
                form.set_voice_prompt(prompt)?;
            }
            if let Some(prompt) = patch.image_prompt {
                form.set_image_prompt(prompt)?;
            }
            Ok(form.clone())
        })
    }

    fn select_voice(&self, id: &DraftId, voice_type: VoiceType) -> Result<(), DraftStoreError> {
        self.with_form(id, |form| form.select_voice(voice_type))?;
        tracing::debug!(draft_id = %id, voice_type = %voice_type, "Draft voice selected");
        Ok(())
    }

    fn apply_audio(
        &self,
        id: &DraftId,
        audio: GeneratedAudio,
    ) -> Result<Option<GeneratedAudio>, DraftStoreError> {
        self.with_form(id, |form| form.apply_audio(audio))
    }

    fn apply_image(
        &self,
        id: &DraftId,
        image: GeneratedImage,
    ) -> Result<Option<GeneratedImage>, DraftStoreError> {
        self.with_form(id, |form| form.apply_image(image))
    }

    fn begin_submit(&self, id: &DraftId) -> Result<NewPodcast, DraftStoreError> {
        self.with_form(id, |form| form.begin_submit())
    }

    fn complete_submit(
        &self,
        id: &DraftId,
        podcast_id: PodcastId,
    ) -> Result<Navigation, DraftStoreError> {
        self.with_form(id, |form| form.complete_submit(podcast_id))
    }

    fn fail_submit(&self, id: &DraftId) -> Result<(), DraftStoreError> {
        self.with_form(id, |form| form.fail_submit())
    }

    fn remove(&self, id: &DraftId) -> Result<(), DraftStoreError> {
        self.drafts
            .remove(id)
            .map(|_| {
                tracing::info!(draft_id = %id, "Draft removed");
            })
            .ok_or(DraftStoreError::NotFound(*id))
    }

    fn remove_if_idle(&self, id: &DraftId) -> Result<CreationForm, DraftStoreError> {
        match self.drafts.remove_if(id, |_, form| !form.is_submitting()) {
            Some((_, form)) => {
                tracing::info!(draft_id = %id, "Draft removed");
                Ok(form)
            }
            None if self.drafts.contains_key(id) => {
                Err(DraftStoreError::Rejected(DraftError::AlreadySubmitting))
            }
            None => Err(DraftStoreError::NotFound(*id)),
        }
    }

    fn get_stale_drafts(&self, idle_timeout_secs: u64) -> Vec<DraftId> {
        let now = Utc::now();
        self.drafts
            .iter()
            .filter(|entry| {
                let form = entry.value();
                !form.is_submitting()
                    && (now - form.updated_at()).num_seconds() > idle_timeout_secs as i64
            })
            .map(|entry| *entry.key())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::podcast::{StorageId, SubmissionState};

    fn ready_form() -> CreationForm {
        let mut form = CreationForm::new("clerk_abc");
        form.set_title("My Pod").unwrap();
        form.set_description("desc").unwrap();
        form.select_voice(VoiceType::Nova).unwrap();
        form.apply_audio(GeneratedAudio {
            url: "http://localhost/a".to_string(),
            storage_id: StorageId::new(),
            duration_secs: 3.0,
        })
        .unwrap();
        form.apply_image(GeneratedImage {
            url: "http://localhost/i".to_string(),
            storage_id: StorageId::new(),
        })
        .unwrap();
        form
    }

    #[test]
    fn test_draft_lifecycle() {
        let manager = InMemoryDraftManager::new();
        let id = manager.create(CreationForm::new("clerk_abc")).unwrap();

        let patch = DraftFieldsPatch {
            title: Some("My Pod".to_string()),
            voice_prompt: Some("intro".to_string()),
            ..Default::default()
        };
        let form = manager.update_fields(&id, patch).unwrap();
        assert_eq!(form.draft().title, "My Pod");
        assert_eq!(form.draft().voice_prompt, "intro");
        assert_eq!(form.draft().description, "");

        manager.select_voice(&id, VoiceType::Echo).unwrap();
        assert_eq!(
            manager.get(&id).unwrap().draft().voice_type,
            Some(VoiceType::Echo)
        );

        manager.remove(&id).unwrap();
        assert!(matches!(
            manager.get(&id),
            Err(DraftStoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_second_submit_is_rejected() {
        let manager = InMemoryDraftManager::new();
        let id = manager.create(ready_form()).unwrap();

        manager.begin_submit(&id).unwrap();
        let second = manager.begin_submit(&id);

        assert!(matches!(
            second,
            Err(DraftStoreError::Rejected(DraftError::AlreadySubmitting))
        ));
        assert_eq!(manager.get(&id).unwrap().state(), SubmissionState::Submitting);

        manager.fail_submit(&id).unwrap();
        assert_eq!(manager.get(&id).unwrap().state(), SubmissionState::Idle);
    }

    #[test]
    fn test_remove_if_idle_spares_submitting_draft() {
        let manager = InMemoryDraftManager::new();
        let id = manager.create(ready_form()).unwrap();
        manager.begin_submit(&id).unwrap();

        assert!(matches!(
            manager.remove_if_idle(&id),
            Err(DraftStoreError::Rejected(DraftError::AlreadySubmitting))
        ));
        assert!(manager.get(&id).unwrap().is_submitting());

        manager.fail_submit(&id).unwrap();
        let removed = manager.remove_if_idle(&id).unwrap();
        assert_eq!(removed.id(), &id);
        assert!(matches!(
            manager.remove_if_idle(&id),
            Err(DraftStoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_apply_returns_replaced_asset() {
        let manager = InMemoryDraftManager::new();
        let first = StorageId::new();
        let mut form = CreationForm::new("clerk_abc");
        form.apply_audio(GeneratedAudio {
            url: "http://localhost/a1".to_string(),
            storage_id: first,
            duration_secs: 1.0,
        })
        .unwrap();
        let id = manager.create(form).unwrap();

        let replaced = manager
            .apply_audio(
                &id,
                GeneratedAudio {
                    url: "http://localhost/a2".to_string(),
                    storage_id: StorageId::new(),
                    duration_secs: 2.0,
                },
            )
            .unwrap();
        assert_eq!(replaced.map(|a| a.storage_id), Some(first));

        let none = manager
            .apply_image(
                &id,
                GeneratedImage {
                    url: "http://localhost/i".to_string(),
                    storage_id: StorageId::new(),
                },
            )
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_stale_drafts() {
        let manager = InMemoryDraftManager::new();
        let id = manager.create(CreationForm::new("clerk_abc")).unwrap();
        assert!(manager.get_stale_drafts(3600).is_empty());

        // 提交中的草稿不参与清理
        let submitting = manager.create(ready_form()).unwrap();
        manager.begin_submit(&submitting).unwrap();
        assert!(!manager.get_stale_drafts(3600).contains(&submitting));
        assert!(manager.get(&id).is_ok());
    }
}
