//! Shared test data for client integration tests

use shared::{Category, Points, ResultDraft, ResultId, ResultRecord};

pub fn draft(student: &str, program: &str, category: Category, points: f64) -> ResultDraft {
    ResultDraft {
        student_name: student.to_string(),
        team_name: Some(format!("Team {}", &student[..1])),
        program_name: program.to_string(),
        category,
        points: Points::Number(points),
        prize: "First".to_string(),
    }
}

pub fn record(id: &str, student: &str, category: Category, points: f64) -> ResultRecord {
    draft(student, "Essay", category, points).into_record(ResultId::from(id))
}

/// Three single-category records and one group record
pub fn seed_records() -> Vec<ResultRecord> {
    vec![
        record("1", "Asha", Category::Single, 7.0),
        record("2", "Bilal", Category::Single, 9.0),
        record("3", "Chen", Category::Group, 10.0),
        record("4", "Dara", Category::Single, 8.0),
    ]
}
