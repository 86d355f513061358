//! Lesson entity with its embedded enrollment collection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{LessonId, ParticipantId, Timestamp};

/// Difficulty rating of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a lesson.
///
/// Like enrollment statuses, transitions are intentionally permissive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl LessonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::Scheduled => "scheduled",
            LessonStatus::Completed => "completed",
            LessonStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled class with capacity, price, and content metadata.
///
/// The lesson document is the unit of consistency: it owns its
/// enrollments exclusively, and every enrollment mutation rewrites the
/// whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    pub skill_level: SkillLevel,
    /// Duration in minutes.
    pub duration: u32,
    pub max_participants: u32,
    pub price: f64,
    pub date_time: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub techniques: Vec<String>,
    pub status: LessonStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
}

/// Input for scheduling a new lesson.
///
/// `id`, `created_at`, `updated_at`, and the enrollment collection are
/// always assigned by the service, never by the caller.
#[derive(Debug, Clone)]
pub struct NewLesson {
    pub title: String,
    pub description: String,
    pub skill_level: SkillLevel,
    pub duration: u32,
    pub max_participants: u32,
    pub price: f64,
    pub date_time: Timestamp,
    pub location: Option<String>,
    pub instructor: Option<String>,
    pub ingredients: Vec<String>,
    pub equipment: Vec<String>,
    pub techniques: Vec<String>,
    pub status: Option<LessonStatus>,
}

/// Partial update of a lesson. Only supplied fields are replaced;
/// `updated_at` is refreshed by the service regardless.
#[derive(Debug, Clone, Default)]
pub struct LessonPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub skill_level: Option<SkillLevel>,
    pub duration: Option<u32>,
    pub max_participants: Option<u32>,
    pub price: Option<f64>,
    pub date_time: Option<Timestamp>,
    pub location: Option<String>,
    pub instructor: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub equipment: Option<Vec<String>>,
    pub techniques: Option<Vec<String>>,
    pub status: Option<LessonStatus>,
}

impl Lesson {
    /// Builds a lesson from scheduling input with an empty enrollment
    /// collection and fresh timestamps.
    pub fn schedule(input: NewLesson) -> Self {
        let now = Timestamp::now();
        Self {
            id: LessonId::new(),
            title: input.title,
            description: input.description,
            skill_level: input.skill_level,
            duration: input.duration,
            max_participants: input.max_participants,
            price: input.price,
            date_time: input.date_time,
            location: input.location,
            instructor: input.instructor,
            ingredients: input.ingredients,
            equipment: input.equipment,
            techniques: input.techniques,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            enrollments: Vec::new(),
        }
    }

    /// Shallow-merges a patch over this record and refreshes `updated_at`.
    pub fn merge(&mut self, patch: LessonPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(skill_level) = patch.skill_level {
            self.skill_level = skill_level;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(max_participants) = patch.max_participants {
            self.max_participants = max_participants;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(date_time) = patch.date_time {
            self.date_time = date_time;
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(instructor) = patch.instructor {
            self.instructor = Some(instructor);
        }
        if let Some(ingredients) = patch.ingredients {
            self.ingredients = ingredients;
        }
        if let Some(equipment) = patch.equipment {
            self.equipment = equipment;
        }
        if let Some(techniques) = patch.techniques {
            self.techniques = techniques;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.touch();
    }

    /// Refreshes `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    /// Number of enrollments currently occupying a seat.
    pub fn enrolled_count(&self) -> usize {
        self.enrollments.iter().filter(|e| e.is_active()).count()
    }

    /// Returns true when another participant can still enroll.
    pub fn has_capacity(&self) -> bool {
        self.enrolled_count() < self.max_participants as usize
    }

    /// Returns true when at least one enrollment still occupies a seat.
    pub fn has_active_enrollments(&self) -> bool {
        self.enrollments.iter().any(|e| e.is_active())
    }

    /// Finds the embedded enrollment for a participant, if any.
    pub fn find_enrollment(&self, participant_id: &ParticipantId) -> Option<&Enrollment> {
        self.enrollments
            .iter()
            .find(|e| &e.participant_id == participant_id)
    }

    /// Mutable variant of [`find_enrollment`](Self::find_enrollment).
    pub fn find_enrollment_mut(
        &mut self,
        participant_id: &ParticipantId,
    ) -> Option<&mut Enrollment> {
        self.enrollments
            .iter_mut()
            .find(|e| &e.participant_id == participant_id)
    }
}
