//! Storage collaborator.
//!
//! The rest of the application only sees the [`Storage`] trait: typed
//! read/write operations keyed by entity id. The in-memory implementation
//! backs the running server and the tests; nothing outside this module
//! knows or cares how records are kept.

pub mod seed;

use crate::analytics::aggregate::build_analytics;
use crate::domain::assessment::AssessmentResult;
use crate::domain::models::{
    Analytics, AssessmentQuestion, Course, LearningPath, ProgressPatch, Project, User,
    UserPreferences, UserProgress,
};
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError>;

    async fn get_courses(&self) -> Result<Vec<Course>, StorageError>;
    async fn get_course(&self, id: &str) -> Result<Option<Course>, StorageError>;

    async fn get_learning_paths(&self) -> Result<Vec<LearningPath>, StorageError>;
    async fn get_learning_path(&self, id: &str) -> Result<Option<LearningPath>, StorageError>;

    async fn get_assessment_questions(&self) -> Result<Vec<AssessmentQuestion>, StorageError>;
    async fn save_assessment_result(
        &self,
        result: AssessmentResult,
    ) -> Result<AssessmentResult, StorageError>;
    async fn get_assessment_results(&self) -> Result<Vec<AssessmentResult>, StorageError>;

    async fn get_user_progress(&self) -> Result<Vec<UserProgress>, StorageError>;
    async fn get_course_progress(
        &self,
        course_id: &str,
    ) -> Result<Option<UserProgress>, StorageError>;
    async fn update_progress(
        &self,
        course_id: &str,
        patch: ProgressPatch,
    ) -> Result<UserProgress, StorageError>;

    async fn get_projects(&self) -> Result<Vec<Project>, StorageError>;
    async fn get_project(&self, id: &str) -> Result<Option<Project>, StorageError>;

    async fn get_analytics(&self) -> Result<Analytics, StorageError>;

    async fn get_preferences(&self) -> Result<Option<UserPreferences>, StorageError>;
    async fn save_preferences(
        &self,
        preferences: UserPreferences,
    ) -> Result<UserPreferences, StorageError>;
}

/// In-memory collection service. Catalog collections are written once at
/// seed time; progress, results and preferences mutate at runtime.
#[derive(Default)]
pub struct MemStorage {
    user: RwLock<Option<User>>,
    courses: RwLock<Vec<Course>>,
    paths: RwLock<Vec<LearningPath>>,
    questions: RwLock<Vec<AssessmentQuestion>>,
    projects: RwLock<Vec<Project>>,
    results: RwLock<Vec<AssessmentResult>>,
    progress: RwLock<Vec<UserProgress>>,
    preferences: RwLock<Option<UserPreferences>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog collections. Called once from the seeder.
    pub async fn load_catalog(
        &self,
        courses: Vec<Course>,
        paths: Vec<LearningPath>,
        questions: Vec<AssessmentQuestion>,
        projects: Vec<Project>,
    ) {
        *self.courses.write().await = courses;
        *self.paths.write().await = paths;
        *self.questions.write().await = questions;
        *self.projects.write().await = projects;
    }

    pub async fn load_user(&self, user: User) {
        *self.user.write().await = Some(user);
    }

    pub async fn load_progress(&self, records: Vec<UserProgress>) {
        *self.progress.write().await = records;
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        Ok(self
            .user
            .read()
            .await
            .clone()
            .filter(|user| user.id == id))
    }

    async fn get_courses(&self) -> Result<Vec<Course>, StorageError> {
        Ok(self.courses.read().await.clone())
    }

    async fn get_course(&self, id: &str) -> Result<Option<Course>, StorageError> {
        Ok(self
            .courses
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn get_learning_paths(&self) -> Result<Vec<LearningPath>, StorageError> {
        Ok(self.paths.read().await.clone())
    }

    async fn get_learning_path(&self, id: &str) -> Result<Option<LearningPath>, StorageError> {
        Ok(self
            .paths
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn get_assessment_questions(&self) -> Result<Vec<AssessmentQuestion>, StorageError> {
        Ok(self.questions.read().await.clone())
    }

    async fn save_assessment_result(
        &self,
        result: AssessmentResult,
    ) -> Result<AssessmentResult, StorageError> {
        self.results.write().await.push(result.clone());
        Ok(result)
    }

    async fn get_assessment_results(&self) -> Result<Vec<AssessmentResult>, StorageError> {
        Ok(self.results.read().await.clone())
    }

    async fn get_user_progress(&self) -> Result<Vec<UserProgress>, StorageError> {
        Ok(self.progress.read().await.clone())
    }

    async fn get_course_progress(
        &self,
        course_id: &str,
    ) -> Result<Option<UserProgress>, StorageError> {
        Ok(self
            .progress
            .read()
            .await
            .iter()
            .find(|p| p.course_id == course_id)
            .cloned())
    }

    /// Upsert: a patch for an unknown course starts a fresh record.
    async fn update_progress(
        &self,
        course_id: &str,
        patch: ProgressPatch,
    ) -> Result<UserProgress, StorageError> {
        let now = Utc::now();
        let mut records = self.progress.write().await;
        let index = match records.iter().position(|p| p.course_id == course_id) {
            Some(index) => index,
            None => {
                records.push(UserProgress {
                    id: Uuid::new_v4(),
                    course_id: course_id.to_string(),
                    completed_modules: Vec::new(),
                    progress_percent: 0,
                    started_at: now,
                    last_accessed_at: now,
                    time_spent_minutes: 0,
                });
                records.len() - 1
            }
        };
        let record = &mut records[index];
        if let Some(modules) = patch.completed_modules {
            record.completed_modules = modules;
        }
        if let Some(percent) = patch.progress_percent {
            record.progress_percent = percent.min(100);
        }
        if let Some(minutes) = patch.time_spent_minutes {
            record.time_spent_minutes = minutes;
        }
        record.last_accessed_at = now;
        Ok(record.clone())
    }

    async fn get_projects(&self) -> Result<Vec<Project>, StorageError> {
        Ok(self.projects.read().await.clone())
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, StorageError> {
        Ok(self
            .projects
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    /// Aggregation happens here, behind the storage boundary. Callers only
    /// ever see the finished snapshot.
    async fn get_analytics(&self) -> Result<Analytics, StorageError> {
        let progress = self.progress.read().await;
        let courses = self.courses.read().await;
        Ok(build_analytics(&progress, &courses))
    }

    async fn get_preferences(&self) -> Result<Option<UserPreferences>, StorageError> {
        Ok(self.preferences.read().await.clone())
    }

    async fn save_preferences(
        &self,
        preferences: UserPreferences,
    ) -> Result<UserPreferences, StorageError> {
        *self.preferences.write().await = Some(preferences.clone());
        Ok(preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Category;

    #[tokio::test]
    async fn update_progress_upserts_and_merges() {
        let storage = MemStorage::new();

        let created = storage
            .update_progress(
                "42",
                ProgressPatch {
                    progress_percent: Some(25),
                    time_spent_minutes: Some(30),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(created.progress_percent, 25);
        assert_eq!(created.time_spent_minutes, 30);

        let updated = storage
            .update_progress(
                "42",
                ProgressPatch {
                    completed_modules: Some(vec![1, 2]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        // Untouched fields keep their values, the record is not recreated.
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.progress_percent, 25);
        assert_eq!(updated.completed_modules, vec![1, 2]);

        let all = storage.get_user_progress().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn progress_percent_is_clamped_to_100() {
        let storage = MemStorage::new();
        let record = storage
            .update_progress(
                "1",
                ProgressPatch {
                    progress_percent: Some(250),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(record.progress_percent, 100);
    }

    #[tokio::test]
    async fn missing_entities_come_back_as_none() {
        let storage = MemStorage::new();
        assert!(storage.get_course("nope").await.unwrap().is_none());
        assert!(storage.get_learning_path("nope").await.unwrap().is_none());
        assert!(storage.get_project("nope").await.unwrap().is_none());
        assert!(storage.get_course_progress("nope").await.unwrap().is_none());
        assert!(storage.get_preferences().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seeded_storage_serves_the_catalog() {
        let storage = MemStorage::new();
        seed::seed_all(&storage).await.unwrap();

        let courses = storage.get_courses().await.unwrap();
        assert!(!courses.is_empty());

        let questions = storage.get_assessment_questions().await.unwrap();
        assert!(questions.len() >= 10);
        // Every enumerated category is represented in the question bank.
        for category in Category::ALL {
            assert!(
                questions.iter().any(|q| q.category == category),
                "no question for {category:?}"
            );
        }

        let paths = storage.get_learning_paths().await.unwrap();
        assert!(!paths.is_empty());
        // Path course ids resolve against the catalog.
        for id in &paths[0].courses {
            assert!(storage.get_course(id).await.unwrap().is_some());
        }

        let analytics = storage.get_analytics().await.unwrap();
        assert!(analytics.total_courses_started > 0);
        assert_eq!(analytics.weekly_activity.len(), 7);
    }
}
