//! Recommendation request contract.
//!
//! The request shape sent to the AI collaborator, the response shape it (or
//! the deterministic fallback) must produce, and the single-dispatch slot
//! that keeps one recommendation request in flight per assessment session
//! and drops responses that outlive their session.

use crate::domain::assessment::AssessmentOutcome;
use crate::domain::models::Difficulty;
use serde::{Deserialize, Serialize};

/// Fixed synthetic goal set merged into every profile-driven request.
pub const DEFAULT_GOALS: [&str; 2] = ["career advancement", "skill development"];

/// Nominal weekly time budget sent when the caller has not stated one.
pub const DEFAULT_TIME_AVAILABLE: &str = "10 hours per week";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub skills: Vec<String>,
    pub goals: Vec<String>,
    pub current_level: Difficulty,
    pub time_available: String,
}

impl RecommendationRequest {
    /// Build the outbound request from an assessment profile: the caller
    /// supplies skills and level, the fixed goal set and time budget are
    /// merged in.
    pub fn from_profile(skills: Vec<String>, level: Difficulty) -> Self {
        Self {
            skills,
            goals: DEFAULT_GOALS.iter().map(|g| g.to_string()).collect(),
            current_level: level,
            time_available: DEFAULT_TIME_AVAILABLE.to_string(),
        }
    }

    /// Request as built straight from a scored assessment: the strongest
    /// category's label stands in for the skill list.
    pub fn from_assessment(outcome: &AssessmentOutcome) -> Self {
        Self::from_profile(
            vec![outcome.strongest_category.label().to_string()],
            outcome.level,
        )
    }
}

/// Response contract shared by the live provider and the fallback. Nothing
/// in the shape reveals which one produced it.
///
/// `courses` holds ids that should resolve against the catalog but are not
/// guaranteed to; consumers count them rather than dereferencing and
/// failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub estimated_duration: String,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub reasoning: String,
}

/// Ticket handed out for one dispatch. Settling with a ticket from an
/// earlier epoch is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTicket {
    epoch: u64,
}

/// Holds at most one recommendation per assessment session and enforces the
/// dispatch rules: one request in flight at a time, no effect from stale
/// responses after the session was reset.
#[derive(Debug, Default)]
pub struct RecommendationSlot {
    epoch: u64,
    in_flight: bool,
    value: Option<Recommendation>,
}

impl RecommendationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the dispatch. Returns `None` while an earlier request for this
    /// session is still unsettled.
    pub fn begin(&mut self) -> Option<DispatchTicket> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(DispatchTicket { epoch: self.epoch })
    }

    /// Apply a received recommendation. Returns whether it was accepted;
    /// stale tickets are dropped without touching the slot.
    pub fn fulfill(&mut self, ticket: DispatchTicket, value: Recommendation) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.in_flight = false;
        self.value = Some(value);
        true
    }

    /// Settle a failed dispatch so the caller may re-invoke. No result is
    /// recorded; retry stays a user decision.
    pub fn fail(&mut self, ticket: DispatchTicket) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Discard the session: whatever is still in flight belongs to an
    /// abandoned session and will be ignored when it lands.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.in_flight = false;
        self.value = None;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn value(&self) -> Option<&Recommendation> {
        self.value.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommendation(title: &str) -> Recommendation {
        Recommendation {
            title: title.to_string(),
            description: "a path".into(),
            estimated_duration: "6 months".into(),
            courses: vec!["1".into(), "7".into()],
            skills: vec!["HTML".into()],
            reasoning: "fits the profile".into(),
        }
    }

    #[test]
    fn profile_request_carries_fixed_goals_and_time_budget() {
        let req = RecommendationRequest::from_profile(
            vec!["Design".into()],
            Difficulty::Intermediate,
        );
        assert_eq!(req.goals, vec!["career advancement", "skill development"]);
        assert_eq!(req.time_available, "10 hours per week");
        assert_eq!(req.current_level, Difficulty::Intermediate);
    }

    #[test]
    fn assessment_profile_uses_the_strongest_category_label() {
        use crate::domain::assessment::CategoryBreakdown;
        use crate::domain::models::Category;

        let outcome = AssessmentOutcome {
            overall_score: 75,
            correct_count: 3,
            total_questions: 4,
            breakdown: vec![CategoryBreakdown {
                category: Category::DataScience,
                correct: 3,
                total: 4,
                percent: 75,
            }],
            strongest_category: Category::DataScience,
            level: Difficulty::Intermediate,
        };
        let req = RecommendationRequest::from_assessment(&outcome);
        assert_eq!(req.skills, vec!["Data Science"]);
        assert_eq!(req.current_level, Difficulty::Intermediate);
    }

    #[test]
    fn second_dispatch_is_refused_while_in_flight() {
        let mut slot = RecommendationSlot::new();
        let ticket = slot.begin().unwrap();
        assert!(slot.begin().is_none());

        assert!(slot.fulfill(ticket, recommendation("first")));
        assert_eq!(slot.value().unwrap().title, "first");

        // Settled: a new dispatch may go out again.
        assert!(slot.begin().is_some());
    }

    #[test]
    fn failure_releases_the_slot_without_a_value() {
        let mut slot = RecommendationSlot::new();
        let ticket = slot.begin().unwrap();
        assert!(slot.fail(ticket));
        assert!(slot.value().is_none());
        assert!(!slot.in_flight());
        assert!(slot.begin().is_some());
    }

    #[test]
    fn stale_response_after_reset_is_dropped() {
        let mut slot = RecommendationSlot::new();
        let stale = slot.begin().unwrap();

        // User abandons the session before the response lands.
        slot.reset();

        assert!(!slot.fulfill(stale, recommendation("stale")));
        assert!(slot.value().is_none());
        assert!(!slot.in_flight());

        // The new session is unaffected and can dispatch normally.
        let fresh = slot.begin().unwrap();
        assert!(slot.fulfill(fresh, recommendation("fresh")));
        assert_eq!(slot.value().unwrap().title, "fresh");
    }

    #[test]
    fn stale_failure_does_not_release_a_newer_dispatch() {
        let mut slot = RecommendationSlot::new();
        let stale = slot.begin().unwrap();
        slot.reset();
        let _current = slot.begin().unwrap();

        assert!(!slot.fail(stale));
        assert!(slot.in_flight());
    }
}
