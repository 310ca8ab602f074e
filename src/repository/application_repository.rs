use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationDraft, ApplicationPatch, ApplicationStatus,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Persistence boundary for application records. Implementations must make
/// `update` atomic per application: a concurrent reader of the same record
/// never observes a half-applied patch, and fields a patch does not name
/// are never lost.
#[cfg_attr(test, mockall::automock)]
pub trait ApplicationRepository: Send + Sync {
    fn create(&self, draft: ApplicationDraft) -> Result<Application>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Application>>;

    /// Ownership-scoped lookup: returns `None` both when the id does not
    /// exist and when it exists under a different owner.
    fn find_by_id_for_owner(&self, id: Uuid, applicant_id: Uuid) -> Result<Option<Application>>;

    fn update(&self, id: Uuid, patch: ApplicationPatch) -> Result<Application>;

    fn list_for_owner(&self, applicant_id: Uuid) -> Result<Vec<Application>>;
}

#[derive(Default)]
pub struct InMemoryApplicationRepository {
    store: RwLock<HashMap<Uuid, Application>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn create(&self, draft: ApplicationDraft) -> Result<Application> {
        let now = Utc::now();
        let application = Application {
            id: Uuid::new_v4(),
            job_id: draft.job_id,
            applicant_id: draft.applicant_id,
            status: ApplicationStatus::Submitted,
            resume: draft.resume,
            cover_letter: draft.cover_letter,
            score: None,
            strength: None,
            weakness: None,
            keywords: draft.keywords,
            comments: None,
            created_at: now,
            updated_at: now,
        };
        let mut store = self.store.write().expect("application store poisoned");
        store.insert(application.id, application.clone());
        Ok(application)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Application>> {
        let store = self.store.read().expect("application store poisoned");
        Ok(store.get(&id).cloned())
    }

    fn find_by_id_for_owner(&self, id: Uuid, applicant_id: Uuid) -> Result<Option<Application>> {
        let store = self.store.read().expect("application store poisoned");
        Ok(store
            .get(&id)
            .filter(|app| app.applicant_id == applicant_id)
            .cloned())
    }

    fn update(&self, id: Uuid, patch: ApplicationPatch) -> Result<Application> {
        let mut store = self.store.write().expect("application store poisoned");
        let app = store
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        if let Some(status) = patch.status {
            app.status = status;
        }
        if let Some(score) = patch.score {
            app.score = Some(score);
        }
        if let Some(strength) = patch.strength {
            app.strength = Some(strength);
        }
        if let Some(weakness) = patch.weakness {
            app.weakness = Some(weakness);
        }
        if let Some(comments) = patch.comments {
            app.comments = Some(comments);
        }
        app.updated_at = Utc::now();

        Ok(app.clone())
    }

    fn list_for_owner(&self, applicant_id: Uuid) -> Result<Vec<Application>> {
        let store = self.store.read().expect("application store poisoned");
        let mut apps: Vec<Application> = store
            .values()
            .filter(|app| app.applicant_id == applicant_id)
            .cloned()
            .collect();
        apps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(apps)
    }
}
