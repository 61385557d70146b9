//! Demo catalog loaded at startup so a fresh instance has courses, paths,
//! questions and projects to serve without any external data source.

use crate::domain::models::{
    AssessmentQuestion, Category, Course, CourseProvider, Difficulty, LearningPath, Project,
    SyllabusWeek, User, UserProgress,
};
use crate::storage::MemStorage;
use anyhow::Result;
use chrono::{Duration, Utc};
use uuid::Uuid;

pub async fn seed_all(storage: &MemStorage) -> Result<()> {
    let courses = courses();
    let paths = learning_paths();
    let questions = assessment_questions();
    let projects = projects();
    tracing::info!(
        "Seeding catalog: {} courses, {} paths, {} questions, {} projects",
        courses.len(),
        paths.len(),
        questions.len(),
        projects.len()
    );
    storage
        .load_catalog(courses, paths, questions, projects)
        .await;
    storage
        .load_user(User {
            id: "demo".to_string(),
            username: "demo".to_string(),
        })
        .await;
    storage.load_progress(demo_progress()).await;
    Ok(())
}

struct CourseSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    provider: CourseProvider,
    category: Category,
    difficulty: Difficulty,
    duration: &'static str,
    rating: f32,
    review_count: u32,
    instructor: &'static str,
    skills: &'static [&'static str],
    price: Option<f32>,
}

fn courses() -> Vec<Course> {
    let seeds = [
        CourseSeed {
            id: "1",
            title: "Web Development Fundamentals",
            description: "HTML, CSS and JavaScript from the ground up, ending with a deployed multi-page site.",
            provider: CourseProvider::Udemy,
            category: Category::Development,
            difficulty: Difficulty::Beginner,
            duration: "6 weeks",
            rating: 4.7,
            review_count: 12840,
            instructor: "Maya Lindqvist",
            skills: &["HTML", "CSS", "JavaScript"],
            price: Some(49.99),
        },
        CourseSeed {
            id: "2",
            title: "UI Design with Figma",
            description: "Design systems, components and prototyping workflows for product interfaces.",
            provider: CourseProvider::Coursera,
            category: Category::Design,
            difficulty: Difficulty::Beginner,
            duration: "4 weeks",
            rating: 4.6,
            review_count: 5310,
            instructor: "Tomás Herrera",
            skills: &["Figma", "Prototyping", "Design Systems"],
            price: None,
        },
        CourseSeed {
            id: "3",
            title: "Data Analysis with Python",
            description: "Pandas, visualization and exploratory analysis on real datasets.",
            provider: CourseProvider::Coursera,
            category: Category::DataScience,
            difficulty: Difficulty::Intermediate,
            duration: "8 weeks",
            rating: 4.8,
            review_count: 21055,
            instructor: "Amara Obi",
            skills: &["Python", "Pandas", "Data Visualization"],
            price: None,
        },
        CourseSeed {
            id: "4",
            title: "Digital Marketing Essentials",
            description: "Channels, funnels and campaign measurement for modern marketing teams.",
            provider: CourseProvider::Udemy,
            category: Category::Marketing,
            difficulty: Difficulty::Beginner,
            duration: "5 weeks",
            rating: 4.4,
            review_count: 8670,
            instructor: "Claire Dubois",
            skills: &["SEO", "Content Marketing", "Analytics"],
            price: Some(34.99),
        },
        CourseSeed {
            id: "5",
            title: "Business Strategy Foundations",
            description: "Competitive analysis, positioning and strategic planning frameworks.",
            provider: CourseProvider::Coursera,
            category: Category::Business,
            difficulty: Difficulty::Intermediate,
            duration: "6 weeks",
            rating: 4.5,
            review_count: 6420,
            instructor: "Daniel Appiah",
            skills: &["Strategy", "Market Analysis", "Finance Basics"],
            price: None,
        },
        CourseSeed {
            id: "6",
            title: "Effective Time Management",
            description: "Prioritization systems and sustainable habits for focused work.",
            provider: CourseProvider::Udemy,
            category: Category::PersonalDevelopment,
            difficulty: Difficulty::Beginner,
            duration: "2 weeks",
            rating: 4.3,
            review_count: 3980,
            instructor: "Sofia Marchetti",
            skills: &["Productivity", "Planning"],
            price: Some(19.99),
        },
        CourseSeed {
            id: "7",
            title: "React and Modern Frontend",
            description: "Component architecture, hooks and state management for production apps.",
            provider: CourseProvider::Udemy,
            category: Category::Development,
            difficulty: Difficulty::Intermediate,
            duration: "7 weeks",
            rating: 4.8,
            review_count: 17230,
            instructor: "Maya Lindqvist",
            skills: &["React", "TypeScript", "State Management"],
            price: Some(59.99),
        },
        CourseSeed {
            id: "8",
            title: "Machine Learning Foundations",
            description: "Supervised learning, model evaluation and feature engineering in scikit-learn.",
            provider: CourseProvider::Coursera,
            category: Category::DataScience,
            difficulty: Difficulty::Advanced,
            duration: "10 weeks",
            rating: 4.9,
            review_count: 28940,
            instructor: "Amara Obi",
            skills: &["Machine Learning", "Python", "scikit-learn"],
            price: None,
        },
    ];

    seeds
        .into_iter()
        .map(|seed| Course {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            provider: seed.provider,
            category: seed.category,
            difficulty: seed.difficulty,
            duration: seed.duration.to_string(),
            rating: seed.rating,
            review_count: seed.review_count,
            instructor: seed.instructor.to_string(),
            thumbnail_url: format!("/static/thumbnails/course-{}.jpg", seed.id),
            syllabus: default_syllabus(seed.duration),
            skills: seed.skills.iter().map(|s| s.to_string()).collect(),
            price: seed.price,
        })
        .collect()
}

/// Two-part syllabus placeholder; real content would come from the provider
/// feed.
fn default_syllabus(duration: &str) -> Vec<SyllabusWeek> {
    vec![
        SyllabusWeek {
            week: 1,
            title: "Getting started".to_string(),
            topics: vec!["Orientation".to_string(), "Core concepts".to_string()],
            duration: "2 hours".to_string(),
        },
        SyllabusWeek {
            week: 2,
            title: "Hands-on practice".to_string(),
            topics: vec!["Guided project".to_string()],
            duration: duration.to_string(),
        },
    ]
}

fn learning_paths() -> Vec<LearningPath> {
    vec![
        LearningPath {
            id: "path-1".to_string(),
            title: "Full-Stack Web Developer".to_string(),
            description: "From first markup to production React applications.".to_string(),
            category: Category::Development,
            difficulty: Difficulty::Beginner,
            estimated_duration: "6 months".to_string(),
            courses: vec!["1".to_string(), "7".to_string()],
            skills: vec![
                "HTML".to_string(),
                "CSS".to_string(),
                "JavaScript".to_string(),
                "React".to_string(),
            ],
        },
        LearningPath {
            id: "path-2".to_string(),
            title: "Data Analyst".to_string(),
            description: "Work with data end to end, from wrangling to modeling.".to_string(),
            category: Category::DataScience,
            difficulty: Difficulty::Intermediate,
            estimated_duration: "8 months".to_string(),
            courses: vec!["3".to_string(), "8".to_string()],
            skills: vec![
                "Python".to_string(),
                "Pandas".to_string(),
                "Machine Learning".to_string(),
            ],
        },
        LearningPath {
            id: "path-3".to_string(),
            title: "Product Designer".to_string(),
            description: "Design skills paired with the business context they serve.".to_string(),
            category: Category::Design,
            difficulty: Difficulty::Beginner,
            estimated_duration: "5 months".to_string(),
            courses: vec!["2".to_string(), "5".to_string()],
            skills: vec![
                "Figma".to_string(),
                "Design Systems".to_string(),
                "Strategy".to_string(),
            ],
        },
    ]
}

struct QuestionSeed {
    id: &'static str,
    question: &'static str,
    options: [&'static str; 4],
    correct: usize,
    category: Category,
    difficulty: Difficulty,
}

fn assessment_questions() -> Vec<AssessmentQuestion> {
    let seeds = [
        QuestionSeed {
            id: "q1",
            question: "Which HTML element creates a hyperlink?",
            options: ["<link>", "<a>", "<href>", "<url>"],
            correct: 1,
            category: Category::Development,
            difficulty: Difficulty::Beginner,
        },
        QuestionSeed {
            id: "q2",
            question: "What does CSS flexbox primarily help with?",
            options: [
                "Database queries",
                "One-dimensional layout",
                "Image compression",
                "Form validation",
            ],
            correct: 1,
            category: Category::Development,
            difficulty: Difficulty::Beginner,
        },
        QuestionSeed {
            id: "q3",
            question: "In JavaScript, what does `Array.prototype.map` return?",
            options: [
                "The original array, mutated",
                "A new array of transformed elements",
                "The first matching element",
                "A boolean",
            ],
            correct: 1,
            category: Category::Development,
            difficulty: Difficulty::Intermediate,
        },
        QuestionSeed {
            id: "q4",
            question: "What is a design system?",
            options: [
                "A collection of reusable components and usage rules",
                "A file naming convention",
                "A color picker tool",
                "A project management method",
            ],
            correct: 0,
            category: Category::Design,
            difficulty: Difficulty::Beginner,
        },
        QuestionSeed {
            id: "q5",
            question: "Which principle improves readability through whitespace?",
            options: ["Contrast", "Proximity", "Negative space", "Saturation"],
            correct: 2,
            category: Category::Design,
            difficulty: Difficulty::Intermediate,
        },
        QuestionSeed {
            id: "q6",
            question: "What does a SWOT analysis evaluate?",
            options: [
                "Server uptime",
                "Strengths, weaknesses, opportunities, threats",
                "Software testing coverage",
                "Sales tax obligations",
            ],
            correct: 1,
            category: Category::Business,
            difficulty: Difficulty::Beginner,
        },
        QuestionSeed {
            id: "q7",
            question: "Gross margin is revenue minus what?",
            options: [
                "Operating expenses",
                "Cost of goods sold",
                "Net income",
                "Taxes",
            ],
            correct: 1,
            category: Category::Business,
            difficulty: Difficulty::Intermediate,
        },
        QuestionSeed {
            id: "q8",
            question: "Which Python library is the standard for tabular data manipulation?",
            options: ["NumPy", "Matplotlib", "Pandas", "Requests"],
            correct: 2,
            category: Category::DataScience,
            difficulty: Difficulty::Beginner,
        },
        QuestionSeed {
            id: "q9",
            question: "What does overfitting mean?",
            options: [
                "The model performs well on training data but poorly on new data",
                "The model is too small for the dataset",
                "The training ran too few epochs",
                "The data has too many columns",
            ],
            correct: 0,
            category: Category::DataScience,
            difficulty: Difficulty::Advanced,
        },
        QuestionSeed {
            id: "q10",
            question: "What does SEO aim to improve?",
            options: [
                "Server response time",
                "Organic search visibility",
                "Email deliverability",
                "Ad spend efficiency",
            ],
            correct: 1,
            category: Category::Marketing,
            difficulty: Difficulty::Beginner,
        },
        QuestionSeed {
            id: "q11",
            question: "A conversion funnel describes what?",
            options: [
                "The stages users pass through toward a goal action",
                "A type of display ad",
                "A social media algorithm",
                "A billing model",
            ],
            correct: 0,
            category: Category::Marketing,
            difficulty: Difficulty::Intermediate,
        },
        QuestionSeed {
            id: "q12",
            question: "Which habit most supports deliberate skill practice?",
            options: [
                "Multitasking across topics",
                "Scheduled focused sessions with feedback",
                "Only passive reading",
                "Practicing without goals",
            ],
            correct: 1,
            category: Category::PersonalDevelopment,
            difficulty: Difficulty::Beginner,
        },
    ];

    seeds
        .into_iter()
        .map(|seed| AssessmentQuestion {
            id: seed.id.to_string(),
            question: seed.question.to_string(),
            options: seed.options.iter().map(|o| o.to_string()).collect(),
            correct_answer: seed.correct,
            category: seed.category,
            difficulty: seed.difficulty,
        })
        .collect()
}

struct ProjectSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    estimated_time: &'static str,
    skills: &'static [&'static str],
    requirements: &'static [&'static str],
    learning_outcomes: &'static [&'static str],
    course_id: Option<&'static str>,
}

fn projects() -> Vec<Project> {
    [
        ProjectSeed {
            id: "p1",
            title: "Personal Portfolio Site",
            description: "A responsive portfolio with project cards and a contact form.",
            difficulty: Difficulty::Beginner,
            estimated_time: "10 hours",
            skills: &["HTML", "CSS", "JavaScript"],
            requirements: &["Responsive layout", "Accessible navigation", "Contact form"],
            learning_outcomes: &["Semantic markup", "Layout techniques", "Basic interactivity"],
            course_id: Some("1"),
        },
        ProjectSeed {
            id: "p2",
            title: "Interactive Web Dashboard",
            description: "A dashboard rendering live data with charts and filters.",
            difficulty: Difficulty::Intermediate,
            estimated_time: "20 hours",
            skills: &["React", "TypeScript", "REST APIs"],
            requirements: &["Data visualization", "API integration", "Loading and error states"],
            learning_outcomes: &["Component design", "State management", "Async data handling"],
            course_id: Some("7"),
        },
        ProjectSeed {
            id: "p3",
            title: "Sales Data Explorer",
            description: "An exploratory analysis notebook over a public sales dataset.",
            difficulty: Difficulty::Intermediate,
            estimated_time: "15 hours",
            skills: &["Python", "Pandas", "Data Visualization"],
            requirements: &["Data cleaning", "Aggregation", "At least three charts"],
            learning_outcomes: &["Wrangling workflows", "Visual storytelling"],
            course_id: Some("3"),
        },
        ProjectSeed {
            id: "p4",
            title: "Campaign Performance Report",
            description: "A mock multi-channel campaign analysis with recommendations.",
            difficulty: Difficulty::Beginner,
            estimated_time: "8 hours",
            skills: &["Analytics", "Content Marketing"],
            requirements: &["Channel comparison", "Funnel metrics", "Action items"],
            learning_outcomes: &["Metric literacy", "Reporting structure"],
            course_id: Some("4"),
        },
    ]
    .into_iter()
    .map(|seed| Project {
        id: seed.id.to_string(),
        title: seed.title.to_string(),
        description: seed.description.to_string(),
        difficulty: seed.difficulty,
        estimated_time: seed.estimated_time.to_string(),
        skills: seed.skills.iter().map(|s| s.to_string()).collect(),
        requirements: seed.requirements.iter().map(|s| s.to_string()).collect(),
        learning_outcomes: seed
            .learning_outcomes
            .iter()
            .map(|s| s.to_string())
            .collect(),
        course_id: seed.course_id.map(|id| id.to_string()),
    })
    .collect()
}

/// A little history for the demo user so the dashboard is not empty on
/// first run.
fn demo_progress() -> Vec<UserProgress> {
    let now = Utc::now();
    vec![
        UserProgress {
            id: Uuid::new_v4(),
            course_id: "1".to_string(),
            completed_modules: vec![1, 2, 3, 4],
            progress_percent: 100,
            started_at: now - Duration::days(40),
            last_accessed_at: now - Duration::days(2),
            time_spent_minutes: 840,
        },
        UserProgress {
            id: Uuid::new_v4(),
            course_id: "7".to_string(),
            completed_modules: vec![1, 2],
            progress_percent: 45,
            started_at: now - Duration::days(12),
            last_accessed_at: now - Duration::days(1),
            time_spent_minutes: 390,
        },
        UserProgress {
            id: Uuid::new_v4(),
            course_id: "3".to_string(),
            completed_modules: vec![1],
            progress_percent: 15,
            started_at: now - Duration::days(5),
            last_accessed_at: now,
            time_spent_minutes: 120,
        },
    ]
}
