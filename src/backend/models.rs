use serde::{Deserialize, Serialize};

/// Unit and topic the student is studying when asking a question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// A syllabus unit found in an uploaded document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedUnit {
    pub name: String,
    pub topics: Vec<String>,
}

impl ExtractedUnit {
    pub fn new<I, S>(name: impl Into<String>, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            topics: topics.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Student,
    Faculty,
}

impl AccountRole {
    pub fn label(&self) -> &'static str {
        match self {
            AccountRole::Student => "Student",
            AccountRole::Faculty => "Faculty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub credentials: Credentials,
    pub role: AccountRole,
}

/// The signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub display_name: String,
    pub email: String,
    pub role: AccountRole,
    pub new_account: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDoubts {
    pub unit: String,
    pub label: String,
    pub doubts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultTopic {
    pub topic: String,
    pub unit: String,
    /// Share of students struggling, 0..=100
    pub difficulty: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Primary,
    Warning,
    Destructive,
}

impl DifficultTopic {
    pub fn severity(&self) -> Severity {
        if self.difficulty > 85 {
            Severity::Destructive
        } else if self.difficulty > 75 {
            Severity::Warning
        } else {
            Severity::Primary
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDoubt {
    pub student: String,
    pub question: String,
    pub time: String,
}

/// Everything the faculty insights screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyInsights {
    pub doubts_by_unit: Vec<UnitDoubts>,
    pub difficult_topics: Vec<DifficultTopic>,
    pub recent_doubts: Vec<StudentDoubt>,
    pub active_students: u64,
    pub questions_generated: u64,
    /// Week-over-week change in doubts, percent
    pub doubts_trend: i32,
}

impl FacultyInsights {
    pub fn total_doubts(&self) -> u64 {
        self.doubts_by_unit.iter().map(|u| u.doubts).sum()
    }

    /// The unit with the most doubts; the first one wins a tie.
    pub fn most_difficult_unit(&self) -> Option<&UnitDoubts> {
        self.doubts_by_unit
            .iter()
            .fold(None, |best: Option<&UnitDoubts>, u| match best {
                Some(b) if b.doubts >= u.doubts => Some(b),
                _ => Some(u),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doubts(unit: &str, n: u64) -> UnitDoubts {
        UnitDoubts {
            unit: unit.to_string(),
            label: String::new(),
            doubts: n,
        }
    }

    #[test]
    fn test_summary_derivation() {
        let insights = FacultyInsights {
            doubts_by_unit: vec![doubts("Unit 1", 5), doubts("Unit 2", 9), doubts("Unit 3", 9)],
            difficult_topics: vec![],
            recent_doubts: vec![],
            active_students: 0,
            questions_generated: 0,
            doubts_trend: 0,
        };
        assert_eq!(insights.total_doubts(), 23);
        assert_eq!(
            insights.most_difficult_unit().map(|u| u.unit.as_str()),
            Some("Unit 2")
        );
    }

    #[test]
    fn test_severity_thresholds() {
        let topic = |difficulty| DifficultTopic {
            topic: String::new(),
            unit: String::new(),
            difficulty,
        };
        assert_eq!(topic(92).severity(), Severity::Destructive);
        assert_eq!(topic(85).severity(), Severity::Warning);
        assert_eq!(topic(76).severity(), Severity::Warning);
        assert_eq!(topic(75).severity(), Severity::Primary);
    }
}
