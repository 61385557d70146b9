//! Derivation of the dashboard analytics snapshot from progress records and
//! the course catalog.
//!
//! The output is a read model: consumers render `category_distribution`
//! verbatim even when rounding keeps the sum off 100, and an all-zero
//! snapshot is the legitimate state for a new user, not an error.

use crate::domain::models::{Analytics, Category, Course, DayActivity, UserProgress};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Producer-defined weekly order. Consumers must not assume any other.
pub const WEEK_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const COMPLETED_PERCENT: u8 = 100;

pub fn build_analytics(progress: &[UserProgress], courses: &[Course]) -> Analytics {
    let by_id: HashMap<&str, &Course> = courses.iter().map(|c| (c.id.as_str(), c)).collect();

    let total_courses_started = progress.len() as u32;
    let total_courses_completed = progress
        .iter()
        .filter(|p| p.progress_percent >= COMPLETED_PERCENT)
        .count() as u32;
    let total_time_spent_minutes: u32 = progress.iter().map(|p| p.time_spent_minutes).sum();

    let average_progress = if progress.is_empty() {
        0
    } else {
        let sum: u32 = progress.iter().map(|p| p.progress_percent as u32).sum();
        (sum as f64 / progress.len() as f64).round() as u8
    };

    Analytics {
        total_courses_started,
        total_courses_completed,
        total_time_spent_minutes,
        average_progress,
        skills_acquired: acquired_skills(progress, &by_id),
        weekly_activity: weekly_activity(progress),
        category_distribution: category_distribution(progress, &by_id),
        streak_days: streak_days(progress),
    }
}

/// Skills from completed courses, first-seen order, no duplicates.
fn acquired_skills(progress: &[UserProgress], by_id: &HashMap<&str, &Course>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut skills = Vec::new();
    for record in progress {
        if record.progress_percent < COMPLETED_PERCENT {
            continue;
        }
        let Some(course) = by_id.get(record.course_id.as_str()) else {
            continue;
        };
        for skill in &course.skills {
            if seen.insert(skill.clone()) {
                skills.push(skill.clone());
            }
        }
    }
    skills
}

/// Minutes bucketed per weekday of last activity. Always exactly 7 entries,
/// Mon..Sun.
fn weekly_activity(progress: &[UserProgress]) -> Vec<DayActivity> {
    let mut minutes = [0u32; 7];
    for record in progress {
        let day = record.last_accessed_at.weekday().num_days_from_monday() as usize;
        minutes[day] += record.time_spent_minutes;
    }
    WEEK_DAYS
        .iter()
        .zip(minutes)
        .map(|(day, minutes)| DayActivity {
            day: day.to_string(),
            minutes,
        })
        .collect()
}

/// Share of started courses per category, as rounded percentages. Only
/// categories with at least one started course appear.
fn category_distribution(
    progress: &[UserProgress],
    by_id: &HashMap<&str, &Course>,
) -> BTreeMap<Category, u8> {
    let mut counts: BTreeMap<Category, u32> = BTreeMap::new();
    let mut started = 0u32;
    for record in progress {
        let Some(course) = by_id.get(record.course_id.as_str()) else {
            continue;
        };
        *counts.entry(course.category).or_insert(0) += 1;
        started += 1;
    }
    if started == 0 {
        return BTreeMap::new();
    }
    counts
        .into_iter()
        .map(|(category, count)| {
            let percent = (count as f64 / started as f64 * 100.0).round() as u8;
            (category, percent)
        })
        .collect()
}

/// Consecutive distinct days of activity ending at the most recent one.
fn streak_days(progress: &[UserProgress]) -> u32 {
    let mut days: Vec<NaiveDate> = progress
        .iter()
        .map(|p| p.last_accessed_at.date_naive())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    days.sort_unstable();

    let Some(&latest) = days.last() else {
        return 0;
    };
    let mut streak = 1u32;
    let mut cursor = latest;
    for &day in days.iter().rev().skip(1) {
        if cursor - day == Duration::days(1) {
            streak += 1;
            cursor = day;
        } else {
            break;
        }
    }
    streak
}
