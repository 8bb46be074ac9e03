//! Static course data the screens display until a syllabus service exists.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub id: &'static str,
    pub name: &'static str,
}

pub const UNITS: [Unit; 4] = [
    Unit { id: "1", name: "Unit 1: Introduction to Data Structures" },
    Unit { id: "2", name: "Unit 2: Trees and Graphs" },
    Unit { id: "3", name: "Unit 3: Sorting and Searching" },
    Unit { id: "4", name: "Unit 4: Advanced Data Structures" },
];

lazy_static! {
    static ref TOPICS_BY_UNIT: HashMap<&'static str, Vec<&'static str>> = {
        let mut topics = HashMap::new();
        topics.insert("1", vec!["Arrays", "Linked Lists", "Stacks", "Queues"]);
        topics.insert("2", vec!["Binary Trees", "BST", "AVL Trees", "Graph Algorithms"]);
        topics.insert("3", vec!["Bubble Sort", "Quick Sort", "Merge Sort", "Binary Search"]);
        topics.insert("4", vec!["Heaps", "Tries", "B-Trees", "Red-Black Trees"]);
        topics
    };

    static ref QUESTION_BANK: Vec<UnitQuestions> = vec![
        UnitQuestions {
            unit_id: "1",
            unit_name: "Unit 1: Introduction to Data Structures",
            questions: vec![
                Question::new("1-1", "Explain the concept of Abstract Data Types (ADT) with examples.", Difficulty::Easy, 5),
                Question::new("1-2", "Compare and contrast arrays and linked lists in terms of memory allocation and operations.", Difficulty::Medium, 10),
                Question::new("1-3", "Implement a stack using two queues. Analyze the time complexity of push and pop operations.", Difficulty::Hard, 15),
                Question::new("1-4", "What is the difference between static and dynamic memory allocation? Explain with examples.", Difficulty::Easy, 5),
            ],
        },
        UnitQuestions {
            unit_id: "2",
            unit_name: "Unit 2: Trees and Graphs",
            questions: vec![
                Question::new("2-1", "Explain the properties of a Binary Search Tree. Write algorithms for insertion and deletion.", Difficulty::Medium, 10),
                Question::new("2-2", "What is an AVL tree? Explain all four types of rotations with examples.", Difficulty::Hard, 15),
                Question::new("2-3", "Compare BFS and DFS traversal techniques. When would you prefer one over the other?", Difficulty::Medium, 10),
                Question::new("2-4", "Explain Dijkstra's shortest path algorithm with a suitable example.", Difficulty::Hard, 15),
            ],
        },
        UnitQuestions {
            unit_id: "3",
            unit_name: "Unit 3: Sorting and Searching",
            questions: vec![
                Question::new("3-1", "Compare the time complexities of Bubble Sort, Selection Sort, and Insertion Sort.", Difficulty::Easy, 5),
                Question::new("3-2", "Explain the Quick Sort algorithm. What is the worst case and how can it be avoided?", Difficulty::Medium, 10),
                Question::new("3-3", "Prove that comparison-based sorting algorithms have a lower bound of O(n log n).", Difficulty::Hard, 15),
                Question::new("3-4", "Explain hashing with chaining and open addressing. Compare their performance.", Difficulty::Medium, 10),
            ],
        },
        UnitQuestions {
            unit_id: "4",
            unit_name: "Unit 4: Advanced Data Structures",
            questions: vec![
                Question::new("4-1", "What is a heap? Explain the heapify operation and its application in heap sort.", Difficulty::Medium, 10),
                Question::new("4-2", "Explain the structure and operations of a B-tree. Why is it used in databases?", Difficulty::Hard, 15),
                Question::new("4-3", "What is a Trie? Implement insert and search operations for a Trie.", Difficulty::Medium, 10),
                Question::new("4-4", "Explain Red-Black trees and their balancing properties. How do they differ from AVL trees?", Difficulty::Hard, 15),
            ],
        },
    ];
}

pub fn unit(id: &str) -> Option<&'static Unit> {
    UNITS.iter().find(|u| u.id == id)
}

/// Topics of a unit. Unknown or empty ids have none.
pub fn topics_for(unit_id: &str) -> &'static [&'static str] {
    TOPICS_BY_UNIT
        .get(unit_id)
        .map(|topics| topics.as_slice())
        .unwrap_or(&[])
}

pub const EXAM_TIPS: [&str; 4] = [
    "Focus on time complexity analysis - frequently asked in exams",
    "Practice drawing tree/graph diagrams",
    "Remember the key differences between similar algorithms",
    "Understand both iterative and recursive approaches",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub difficulty: Difficulty,
    pub marks: u32,
}

impl Question {
    const fn new(id: &'static str, text: &'static str, difficulty: Difficulty, marks: u32) -> Self {
        Self { id, text, difficulty, marks }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitQuestions {
    pub unit_id: &'static str,
    pub unit_name: &'static str,
    pub questions: Vec<Question>,
}

impl UnitQuestions {
    pub fn total_marks(&self) -> u32 {
        self.questions.iter().map(|q| q.marks).sum()
    }
}

pub fn question_bank() -> &'static [UnitQuestions] {
    QUESTION_BANK.as_slice()
}

pub struct Stat {
    pub label: &'static str,
    pub value: &'static str,
}

pub const DASHBOARD_STATS: [Stat; 3] = [
    Stat { label: "Subjects", value: "4" },
    Stat { label: "Units Covered", value: "12" },
    Stat { label: "Questions Generated", value: "48" },
];

pub struct Activity {
    pub action: &'static str,
    pub subject: &'static str,
    pub time: &'static str,
}

pub const RECENT_ACTIVITY: [Activity; 4] = [
    Activity { action: "Uploaded syllabus", subject: "Data Structures", time: "2 hours ago" },
    Activity { action: "Generated questions", subject: "Unit 3 - Trees", time: "4 hours ago" },
    Activity { action: "Asked AXION", subject: "Binary Search Trees", time: "Yesterday" },
    Activity { action: "Uploaded syllabus", subject: "Database Systems", time: "2 days ago" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_for_known_units() {
        assert_eq!(
            topics_for("2"),
            &["Binary Trees", "BST", "AVL Trees", "Graph Algorithms"]
        );
        for unit in UNITS.iter() {
            assert_eq!(topics_for(unit.id).len(), 4);
        }
    }

    #[test]
    fn test_topics_for_unknown_or_empty_unit() {
        assert!(topics_for("").is_empty());
        assert!(topics_for("9").is_empty());
    }

    #[test]
    fn test_question_bank_marks() {
        let bank = question_bank();
        assert_eq!(bank.len(), UNITS.len());
        let marks: Vec<u32> = bank.iter().map(|u| u.total_marks()).collect();
        assert_eq!(marks, vec![35, 50, 40, 50]);
    }
}
