//! Request payloads for relay tests

#![allow(dead_code)]

use serde_json::{Value, json};

pub fn draft_json(student: &str, category: &str, points: Value) -> Value {
    json!({
        "studentName": student,
        "teamName": "Team Alpha",
        "programName": "Essay Writing",
        "category": category,
        "points": points,
        "prize": "First",
    })
}

pub fn single_draft(student: &str) -> Value {
    draft_json(student, "SINGLE", json!(7))
}
