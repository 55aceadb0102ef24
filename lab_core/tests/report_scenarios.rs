//! Grading scenarios for the career plan report, built from plain values.

use chrono::{TimeZone, Utc};
use lab_core::report::{FILL_IN_GRADES, MISSING_GRADE};
use lab_core::{build_career_plan_report, Answers, RawGrades, SectionKey, Submission, CAPSTONE_EXERCISE_ID};
use serde_json::json;

fn career_plan(answers: Answers) -> Submission {
    Submission {
        id: 7,
        exercise_id: CAPSTONE_EXERCISE_ID.to_string(),
        user_id: "joao.silva".to_string(),
        answers,
        created_at: Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap(),
    }
}

fn filled_plan() -> Submission {
    let answers = SectionKey::ALL
        .iter()
        .map(|k| (k.as_str().to_string(), format!("Resposta para {}", k.as_str())))
        .chain(std::iter::once((
            "titulo_plano".to_string(),
            "De analista a gerente de projetos".to_string(),
        )))
        .collect();
    career_plan(answers)
}

fn grades(value: serde_json::Value) -> RawGrades {
    serde_json::from_value(value).unwrap()
}

fn all_sections(grade: serde_json::Value) -> RawGrades {
    SectionKey::ALL
        .iter()
        .map(|k| (k.as_str().to_string(), grade.clone()))
        .collect()
}

#[test]
fn malformed_grade_is_ignored_not_zero() {
    let g = grades(json!({"contexto_atual": "abc", "visao_futuro": 8}));
    let report = build_career_plan_report(&filled_plan(), Some(&g));
    assert_eq!(report.final_score, Some(8.0));
    assert!(report.markdown.contains("**Nota final (0–10): 8.00**"));
    assert!(report
        .markdown
        .contains(&format!("| 1. Contexto atual | 15% | {} |", MISSING_GRADE)));
}

#[test]
fn full_marks_score_ten() {
    let report = build_career_plan_report(&filled_plan(), Some(&all_sections(json!(10))));
    assert_eq!(report.final_score, Some(10.0));
    assert!(report.markdown.contains("**Nota final (0–10): 10.00**"));
}

#[test]
fn empty_grades_show_placeholder() {
    let report = build_career_plan_report(&filled_plan(), Some(&RawGrades::new()));
    assert_eq!(report.final_score, None);
    assert!(report.markdown.contains(FILL_IN_GRADES));
    assert!(!report.markdown.contains("**Nota final (0–10):"));
}

#[test]
fn no_grades_at_all_matches_empty_grades() {
    let ungraded = build_career_plan_report(&filled_plan(), None);
    let empty = build_career_plan_report(&filled_plan(), Some(&RawGrades::new()));
    assert_eq!(ungraded, empty);
}

#[test]
fn single_section_is_normalized() {
    let g = grades(json!({"visao_futuro": 5}));
    let report = build_career_plan_report(&filled_plan(), Some(&g));
    assert_eq!(report.final_score, Some(5.0));
    assert!(report.markdown.contains("**Nota final (0–10): 5.00**"));
}

#[test]
fn subset_is_not_diluted_by_ungraded_sections() {
    // 20×9 + 20×6 + 10×3 = 330 over 50 → 6.6
    let g = grades(json!({"visao_futuro": 9, "acoes_12_meses": 6, "rede_apoio": 3}));
    let report = build_career_plan_report(&filled_plan(), Some(&g));
    assert_eq!(report.final_score, Some(6.6));
}

#[test]
fn out_of_range_null_and_nan_are_excluded() {
    let g = grades(json!({
        "contexto_atual": 15,
        "visao_futuro": null,
        "forcas": "NaN",
        "gaps": -2,
        "acoes_12_meses": "4",
    }));
    let report = build_career_plan_report(&filled_plan(), Some(&g));
    assert_eq!(report.final_score, Some(4.0));
}

#[test]
fn only_malformed_grades_leave_score_absent() {
    let g = grades(json!({"contexto_atual": "abc", "forcas": 42, "gaps": null}));
    let report = build_career_plan_report(&filled_plan(), Some(&g));
    assert_eq!(report.final_score, None);
    assert!(report.markdown.contains(FILL_IN_GRADES));
}

#[test]
fn empty_answers_with_full_grades() {
    let report = build_career_plan_report(&career_plan(Answers::new()), Some(&all_sections(json!(7))));
    assert_eq!(report.final_score, Some(7.0));
    for (i, key) in SectionKey::ALL.iter().enumerate() {
        let heading = format!("## {}. {}\n\n\n### Comentários do professor", i + 1, key.heading());
        assert!(report.markdown.contains(&heading), "missing empty body for {}", key.as_str());
    }
}

#[test]
fn score_stays_within_scale() {
    for grade in [0.0, 0.5, 3.3, 6.75, 9.99, 10.0] {
        let report = build_career_plan_report(&filled_plan(), Some(&all_sections(json!(grade))));
        let score = report.final_score.unwrap();
        assert!((0.0..=10.0).contains(&score), "{} out of range", score);
    }
}

#[test]
fn identical_inputs_give_identical_output() {
    let g = grades(json!({"forcas": 7.25, "gaps": "9"}));
    let plan = filled_plan();
    let first = build_career_plan_report(&plan, Some(&g));
    let second = build_career_plan_report(&plan, Some(&g));
    assert_eq!(first.markdown, second.markdown);
    assert_eq!(first.final_score, second.final_score);
}
