//! Stand-ins for the real services: a fixed delay, then canned data.
//! None of these ever fail.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use super::models::{
    AccountRole, Credentials, DifficultTopic, ExtractedUnit, FacultyInsights, Session,
    SignupForm, StudentDoubt, StudyContext, UnitDoubts,
};
use super::{AnalyticsService, AssistantService, AuthService, IngestionService};
use crate::catalog::Unit;
use crate::error::AppError;
use crate::state::upload::FileHandle;

const EXPLANATION_HEADING: &str = "**Explanation (Exam-Oriented)**";

const BST_EXPLANATION: &str = "A Binary Search Tree (BST) is a node-based binary tree data structure where:

1. **Left subtree** contains only nodes with keys lesser than the node's key
2. **Right subtree** contains only nodes with keys greater than the node's key
3. Both subtrees must also be BSTs

**Key Operations:**
- Search: O(log n) average, O(n) worst case
- Insert: O(log n) average
- Delete: O(log n) average

**Important for Exams:**
- Know inorder traversal gives sorted sequence
- Understand difference between BST and AVL tree
- Practice deletion cases (leaf, one child, two children)";

const GENERIC_EXPLANATION: &str = "This topic is covered in your syllabus. Here's an exam-oriented explanation:

1. **Definition**: Understand the core concept clearly
2. **Properties**: Know the key characteristics
3. **Operations**: Practice the main operations with examples
4. **Applications**: Be aware of real-world use cases

**Exam Tips:**
- Focus on algorithm steps
- Practice time complexity analysis
- Prepare comparison tables for similar concepts";

const EXAM_QUESTIONS: &str = "**Important Exam Questions**

1. Explain the time complexity of various operations in a Binary Search Tree.

2. Compare and contrast AVL trees and Red-Black trees.

3. Write an algorithm for inorder traversal of a binary tree (both recursive and iterative).

4. What is the difference between BFS and DFS? When would you use each?

5. Explain the concept of balancing in AVL trees with rotation examples.";

/// Canned answer for a question. The keyword match is case-sensitive.
pub fn canned_answer(question: &str) -> String {
    let body = if question.contains("binary") {
        BST_EXPLANATION
    } else {
        GENERIC_EXPLANATION
    };
    format!("{}\n\n{}", EXPLANATION_HEADING, body)
}

fn display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

pub struct SimulatedAuth {
    delay: Duration,
}

impl SimulatedAuth {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AuthService for SimulatedAuth {
    async fn login(&self, credentials: &Credentials) -> Result<Session, AppError> {
        sleep(self.delay).await;
        Ok(Session {
            display_name: display_name(&credentials.email),
            email: credentials.email.clone(),
            role: AccountRole::Student,
            new_account: false,
        })
    }

    async fn signup(&self, form: &SignupForm) -> Result<Session, AppError> {
        sleep(self.delay).await;
        Ok(Session {
            display_name: form.name.clone(),
            email: form.credentials.email.clone(),
            role: form.role,
            new_account: true,
        })
    }
}

pub struct SimulatedIngestion {
    delay: Duration,
}

impl SimulatedIngestion {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn mock_units() -> Vec<ExtractedUnit> {
        vec![
            ExtractedUnit::new(
                "Unit 1: Introduction to Data Structures",
                ["Arrays", "Linked Lists", "Stacks", "Queues", "Time Complexity Analysis"],
            ),
            ExtractedUnit::new(
                "Unit 2: Trees and Graphs",
                ["Binary Trees", "BST", "AVL Trees", "Graph Representation", "BFS & DFS"],
            ),
            ExtractedUnit::new(
                "Unit 3: Sorting and Searching",
                ["Bubble Sort", "Quick Sort", "Merge Sort", "Binary Search", "Hashing"],
            ),
            ExtractedUnit::new(
                "Unit 4: Advanced Data Structures",
                ["Heaps", "Tries", "B-Trees", "Red-Black Trees", "Skip Lists"],
            ),
        ]
    }
}

#[async_trait]
impl IngestionService for SimulatedIngestion {
    async fn extract_units(&self, file: &FileHandle) -> Result<Vec<ExtractedUnit>, AppError> {
        tracing::debug!(file = %file.name, "simulating syllabus extraction");
        sleep(self.delay).await;
        Ok(Self::mock_units())
    }
}

pub struct SimulatedAssistant {
    reply_delay: Duration,
    regenerate_delay: Duration,
}

impl SimulatedAssistant {
    pub fn new(reply_delay: Duration, regenerate_delay: Duration) -> Self {
        Self {
            reply_delay,
            regenerate_delay,
        }
    }
}

#[async_trait]
impl AssistantService for SimulatedAssistant {
    async fn answer(&self, question: &str, context: &StudyContext) -> Result<String, AppError> {
        tracing::debug!(unit = ?context.unit, topic = ?context.topic, "simulating answer");
        sleep(self.reply_delay).await;
        Ok(canned_answer(question))
    }

    async fn generate_questions(&self, _unit: Option<&Unit>) -> Result<String, AppError> {
        sleep(self.reply_delay).await;
        Ok(EXAM_QUESTIONS.to_string())
    }

    async fn regenerate_questions(&self, _unit_id: Option<&str>) -> Result<(), AppError> {
        sleep(self.regenerate_delay).await;
        Ok(())
    }
}

pub struct SimulatedAnalytics {
    delay: Duration,
}

impl SimulatedAnalytics {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn mock_insights() -> FacultyInsights {
        let unit = |unit: &str, doubts, label: &str| UnitDoubts {
            unit: unit.to_string(),
            label: label.to_string(),
            doubts,
        };
        let topic = |topic: &str, unit: &str, difficulty| DifficultTopic {
            topic: topic.to_string(),
            unit: unit.to_string(),
            difficulty,
        };
        let doubt = |student: &str, question: &str, time: &str| StudentDoubt {
            student: student.to_string(),
            question: question.to_string(),
            time: time.to_string(),
        };

        FacultyInsights {
            doubts_by_unit: vec![
                unit("Unit 1", 45, "Data Structures"),
                unit("Unit 2", 78, "Trees & Graphs"),
                unit("Unit 3", 32, "Sorting"),
                unit("Unit 4", 56, "Advanced DS"),
            ],
            difficult_topics: vec![
                topic("AVL Tree Rotations", "Unit 2", 92),
                topic("Red-Black Trees", "Unit 4", 88),
                topic("Dijkstra's Algorithm", "Unit 2", 85),
                topic("B-Tree Operations", "Unit 4", 82),
                topic("Quick Sort Partition", "Unit 3", 75),
            ],
            recent_doubts: vec![
                doubt("Student A", "How do AVL rotations work?", "2 hours ago"),
                doubt("Student B", "Difference between heap and BST?", "4 hours ago"),
                doubt("Student C", "When to use DFS vs BFS?", "Yesterday"),
            ],
            active_students: 48,
            questions_generated: 156,
            doubts_trend: 12,
        }
    }
}

#[async_trait]
impl AnalyticsService for SimulatedAnalytics {
    async fn insights(&self) -> Result<FacultyInsights, AppError> {
        sleep(self.delay).await;
        Ok(Self::mock_insights())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_binary_question_gets_bst_explanation() -> anyhow::Result<()> {
        let assistant = SimulatedAssistant::new(Duration::ZERO, Duration::ZERO);
        let reply = assistant
            .answer("explain binary search trees", &StudyContext::default())
            .await?;
        assert!(reply.contains("Explanation (Exam-Oriented)"));
        assert!(reply.contains("Binary Search Tree (BST)"));
        assert!(reply.contains("Practice deletion cases"));
        Ok(())
    }

    #[tokio::test]
    async fn test_other_question_gets_generic_explanation() -> anyhow::Result<()> {
        let assistant = SimulatedAssistant::new(Duration::ZERO, Duration::ZERO);
        let reply = assistant
            .answer("What is a Binary heap?", &StudyContext::default())
            .await?;
        assert!(reply.starts_with("**Explanation (Exam-Oriented)**"));
        assert!(reply.contains("This topic is covered in your syllabus."));
        assert!(!reply.contains("BST"));
        Ok(())
    }

    #[tokio::test]
    async fn test_generated_questions() -> anyhow::Result<()> {
        let assistant = SimulatedAssistant::new(Duration::ZERO, Duration::ZERO);
        let reply = assistant.generate_questions(None).await?;
        assert!(reply.starts_with("**Important Exam Questions**"));
        assert!(reply.contains("5. Explain the concept of balancing"));
        Ok(())
    }

    #[tokio::test]
    async fn test_signup_session_keeps_role() -> anyhow::Result<()> {
        let auth = SimulatedAuth::new(Duration::ZERO);
        let session = auth
            .signup(&SignupForm {
                name: "Grace".to_string(),
                credentials: Credentials {
                    email: "grace@uni.edu".to_string(),
                    password: "pw".to_string(),
                },
                role: AccountRole::Faculty,
            })
            .await?;
        assert_eq!(session.role, AccountRole::Faculty);
        assert!(session.new_account);

        let session = auth
            .login(&Credentials {
                email: "grace@uni.edu".to_string(),
                password: "pw".to_string(),
            })
            .await?;
        assert_eq!(session.display_name, "grace");
        Ok(())
    }

    #[test]
    fn test_mock_insights_summary() {
        let insights = SimulatedAnalytics::mock_insights();
        assert_eq!(insights.total_doubts(), 211);
        let unit = insights.most_difficult_unit().map(|u| (u.unit.as_str(), u.label.as_str()));
        assert_eq!(unit, Some(("Unit 2", "Trees & Graphs")));
    }
}
