use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Learning domain a course, question or path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Development,
    Design,
    Business,
    DataScience,
    Marketing,
    PersonalDevelopment,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Development,
        Category::Design,
        Category::Business,
        Category::DataScience,
        Category::Marketing,
        Category::PersonalDevelopment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Development => "development",
            Category::Design => "design",
            Category::Business => "business",
            Category::DataScience => "data-science",
            Category::Marketing => "marketing",
            Category::PersonalDevelopment => "personal-development",
        }
    }

    /// Human-readable label, shown in place of the raw tag.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Development => "Development",
            Category::Design => "Design",
            Category::Business => "Business",
            Category::DataScience => "Data Science",
            Category::Marketing => "Marketing",
            Category::PersonalDevelopment => "Personal Development",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "development" => Ok(Category::Development),
            "design" => Ok(Category::Design),
            "business" => Ok(Category::Business),
            "data-science" | "data_science" => Ok(Category::DataScience),
            "marketing" => Ok(Category::Marketing),
            "personal-development" | "personal_development" => Ok(Category::PersonalDevelopment),
            _ => Err(()),
        }
    }
}

/// Proficiency tier. Used both as course difficulty and as the level
/// classification derived from an assessment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Tier thresholds are inclusive at the lower bound: 80 is already
    /// advanced, 50 is already intermediate.
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Difficulty::Advanced
        } else if score >= 50 {
            Difficulty::Intermediate
        } else {
            Difficulty::Beginner
        }
    }
}

impl TryFrom<&str> for Difficulty {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseProvider {
    Coursera,
    Udemy,
}

impl CourseProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseProvider::Coursera => "coursera",
            CourseProvider::Udemy => "udemy",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusWeek {
    pub week: u32,
    pub title: String,
    pub topics: Vec<String>,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub provider: CourseProvider,
    pub category: Category,
    pub difficulty: Difficulty,
    pub duration: String,
    pub rating: f32,
    pub review_count: u32,
    pub instructor: String,
    pub thumbnail_url: String,
    pub syllabus: Vec<SyllabusWeek>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub estimated_duration: String,
    /// Course ids, in recommended order.
    pub courses: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub id: Uuid,
    pub course_id: String,
    pub completed_modules: Vec<u32>,
    pub progress_percent: u8,
    pub started_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub time_spent_minutes: u32,
}

/// Partial update applied to a course's progress record. Absent fields keep
/// their stored value; `last_accessed_at` is always refreshed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPatch {
    pub completed_modules: Option<Vec<u32>>,
    pub progress_percent: Option<u8>,
    pub time_spent_minutes: Option<u32>,
}

/// Immutable once issued to a quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub category: Category,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    pub skills: Vec<String>,
    pub requirements: Vec<String>,
    pub learning_outcomes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayActivity {
    pub day: String,
    pub minutes: u32,
}

/// Aggregated read model consumed by the dashboard and analytics views.
/// Treated as an immutable snapshot per fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_courses_started: u32,
    pub total_courses_completed: u32,
    pub total_time_spent_minutes: u32,
    pub average_progress: u8,
    pub skills_acquired: Vec<String>,
    /// Always exactly 7 entries, Mon..Sun, producer-defined order.
    pub weekly_activity: Vec<DayActivity>,
    /// Percentages, rendered verbatim. Rounding may keep the sum off 100.
    pub category_distribution: BTreeMap<Category, u8>,
    pub streak_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub id: String,
    pub learning_goals: Vec<String>,
    pub preferred_categories: Vec<Category>,
    pub weekly_time_commitment: u32,
    pub skill_level: Difficulty,
}

/// Identity itself lives with an external provider; only the record shape
/// is part of this schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
}
