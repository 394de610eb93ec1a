//! User profiles for students and teachers.
//!
//! A signed-in person is either a [`Student`] (anonymous identity plus a
//! class code) or a [`Teacher`] (email/password identity). Both are wrapped
//! in the [`User`] tagged union the auth state carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Grade assigned to a student until a teacher changes it.
pub const DEFAULT_GRADE: u8 = 1;

/// Level a fresh student profile starts at.
pub const STARTING_LEVEL: u32 = 1;

/// Display name used when an anonymous identity carries none.
pub const DEFAULT_STUDENT_NAME: &str = "User";

/// Display name used when a teacher identity carries none.
pub const DEFAULT_TEACHER_NAME: &str = "Teacher";

/// Record of a finished quest. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestCompletion {
    /// Identifier of the quest that was completed.
    pub quest_id: String,
    /// When the quest was completed.
    pub completed_at: DateTime<Utc>,
    /// Points scored.
    pub score: u32,
    /// Fraction of correct answers in `0.0..=1.0`.
    pub accuracy: f32,
}

impl QuestCompletion {
    /// Creates a completion record.
    #[must_use]
    pub fn new(
        quest_id: impl Into<String>,
        completed_at: DateTime<Utc>,
        score: u32,
        accuracy: f32,
    ) -> Self {
        Self {
            quest_id: quest_id.into(),
            completed_at,
            score,
            accuracy: accuracy.clamp(0.0, 1.0),
        }
    }
}

/// A student profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Identity provider id.
    pub id: String,
    /// Display name typed on the login form.
    pub name: String,
    /// Upper-cased class code.
    pub class_code: String,
    /// School grade.
    pub grade: u8,
    /// Coins earned.
    pub coins: u32,
    /// Consecutive days played.
    pub streak: u32,
    /// Total experience points.
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    /// Current level.
    pub level: u32,
    /// Time of the most recent sign-in.
    pub last_login: DateTime<Utc>,
    /// Quests finished so far.
    #[serde(default)]
    pub completed_quests: Vec<QuestCompletion>,
}

impl Student {
    /// Creates a fresh student profile with zeroed counters and no history.
    ///
    /// The name is trimmed and the class code is trimmed and upper-cased.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: &str,
        class_code: &str,
        last_login: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.trim().to_string(),
            class_code: class_code.trim().to_uppercase(),
            grade: DEFAULT_GRADE,
            coins: 0,
            streak: 0,
            total_xp: 0,
            level: STARTING_LEVEL,
            last_login,
            completed_quests: Vec::new(),
        }
    }
}

/// A class owned by a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    /// Class id.
    pub id: String,
    /// Human readable class name.
    pub name: String,
    /// Code students type to join.
    pub code: String,
    /// Grade taught.
    pub grade: u8,
    /// Enrolled students.
    #[serde(default)]
    pub students: Vec<Student>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Class {
    /// Creates an empty class with a fresh local id and an upper-cased code.
    #[must_use]
    pub fn new(name: &str, code: &str, grade: u8, created_at: DateTime<Utc>) -> Self {
        Self {
            id: crate::generate_id(),
            name: name.trim().to_string(),
            code: code.trim().to_uppercase(),
            grade,
            students: Vec::new(),
            created_at,
        }
    }
}

/// A teacher profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Identity provider id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Sign-in email.
    pub email: String,
    /// Classes owned by this teacher.
    #[serde(default)]
    pub classes: Vec<Class>,
}

impl Teacher {
    /// Creates a teacher with no classes.
    ///
    /// Falls back to [`DEFAULT_TEACHER_NAME`] when `name` is absent or blank.
    #[must_use]
    pub fn new(id: impl Into<String>, name: Option<&str>, email: impl Into<String>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_TEACHER_NAME);
        Self {
            id: id.into(),
            name: name.to_string(),
            email: email.into(),
            classes: Vec::new(),
        }
    }
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum User {
    /// A student.
    Student(Student),
    /// A teacher.
    Teacher(Teacher),
}

impl User {
    /// Identity provider id of the user.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Student(s) => &s.id,
            Self::Teacher(t) => &t.id,
        }
    }

    /// Display name of the user.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Student(s) => &s.name,
            Self::Teacher(t) => &t.name,
        }
    }

    /// Returns true for students.
    #[must_use]
    pub const fn is_student(&self) -> bool {
        matches!(self, Self::Student(_))
    }

    /// Returns true for teachers.
    #[must_use]
    pub const fn is_teacher(&self) -> bool {
        matches!(self, Self::Teacher(_))
    }
}

impl From<Student> for User {
    fn from(student: Student) -> Self {
        Self::Student(student)
    }
}

impl From<Teacher> for User {
    fn from(teacher: Teacher) -> Self {
        Self::Teacher(teacher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn login_time() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default()
    }

    #[test]
    fn class_gets_local_id() {
        let class = Class::new(" Room 4 ", "mth4a", 4, login_time());
        assert_eq!(class.name, "Room 4");
        assert_eq!(class.code, "MTH4A");
        assert_eq!(class.id.len(), 36);
        assert!(class.students.is_empty());
    }

    #[test]
    fn student_defaults() {
        let student = Student::new("uid-1", "  Alice ", " abc123 ", login_time());
        assert_eq!(student.name, "Alice");
        assert_eq!(student.class_code, "ABC123");
        assert_eq!(student.grade, 1);
        assert_eq!(student.coins, 0);
        assert_eq!(student.streak, 0);
        assert_eq!(student.total_xp, 0);
        assert_eq!(student.level, 1);
        assert!(student.completed_quests.is_empty());
        assert_eq!(student.last_login, login_time());
    }

    #[test]
    fn teacher_name_falls_back() {
        assert_eq!(Teacher::new("t", None, "a@b.c").name, "Teacher");
        assert_eq!(Teacher::new("t", Some("   "), "a@b.c").name, "Teacher");
        assert_eq!(Teacher::new("t", Some("Ms. Frizzle"), "a@b.c").name, "Ms. Frizzle");
        assert!(Teacher::new("t", None, "a@b.c").classes.is_empty());
    }

    #[test]
    fn user_accessors() {
        let user = User::from(Teacher::new("t-9", Some("Bo"), "bo@school.org"));
        assert_eq!(user.id(), "t-9");
        assert_eq!(user.name(), "Bo");
        assert!(user.is_teacher());
        assert!(!user.is_student());
    }

    #[test]
    fn user_serializes_with_role_tag() {
        let user = User::from(Student::new("s-1", "Al", "xyz", login_time()));
        let json = serde_json::to_value(&user).unwrap_or_default();
        assert_eq!(json["role"], "student");
        assert_eq!(json["classCode"], "XYZ");
        assert_eq!(json["totalXP"], 0);
    }

    #[test]
    fn quest_accuracy_is_clamped() {
        let quest = QuestCompletion::new("q1", login_time(), 10, 1.5);
        assert!((quest.accuracy - 1.0).abs() < f32::EPSILON);
    }
}
