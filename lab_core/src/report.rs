//! Career Plan Report
//!
//! Renders a capstone submission as a Markdown document for the grader:
//! preamble, rubric table, suggested final score, then one block per section
//! with the student's answer and room for commentary.
//!
//! Pure function of its inputs; calling it twice yields identical text.

use crate::rubric::{GradeSet, SectionKey};
use crate::types::{RawGrades, Submission};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

/// Answer key holding the plan title
pub const TITLE_KEY: &str = "titulo_plano";

/// Title used when the student left it blank
pub const UNTITLED_PLAN: &str = "Plano de carreira sem título";

/// Shown in the rubric table for a section without a valid grade
pub const MISSING_GRADE: &str = "____";

/// Shown instead of a score when no section has a valid grade
pub const FILL_IN_GRADES: &str = "> Preencha as notas nas colunas acima para calcular a nota final.";

/// Generated report plus the score it embeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPlanReport {
    pub markdown: String,
    pub final_score: Option<f64>,
}

/// Builds the graded (or ungraded, when `grades` is `None`) career plan report
pub fn build_career_plan_report(
    submission: &Submission,
    grades: Option<&RawGrades>,
) -> CareerPlanReport {
    let grade_set = grades.map(GradeSet::from_raw).unwrap_or_default();
    let final_score = grade_set.final_score();

    let title = match submission.answer(TITLE_KEY).trim() {
        "" => UNTITLED_PLAN,
        t => t,
    };

    let mut lines: Vec<String> = vec![
        format!("# Plano de Carreira — {}", title),
        String::new(),
        format!("**Aluno:** {}", submission.user_id),
        format!(
            "**Submetido em:** {}",
            submission
                .created_at
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        format!("**Exercício:** {}", submission.exercise_id),
        String::new(),
    ];

    lines.extend(rubric_table(&grade_set));
    lines.push(String::new());

    lines.push("### Nota final sugerida".to_string());
    lines.push(String::new());
    match final_score {
        Some(score) => lines.push(format!("**Nota final (0–10): {:.2}**", score)),
        None => lines.push(FILL_IN_GRADES.to_string()),
    }
    lines.push(String::new());

    for (index, key) in SectionKey::ALL.iter().enumerate() {
        lines.push("---".to_string());
        lines.push(String::new());
        lines.push(format!("## {}. {}", index + 1, key.heading()));
        lines.push(submission.answer(key.as_str()).to_string());
        lines.push(String::new());
        lines.push(format!(
            "### Comentários do professor — {}",
            key.commentary_label()
        ));
        lines.push("- Comentário:".to_string());
        lines.push(String::new());
    }

    CareerPlanReport {
        markdown: lines.join("\n"),
        final_score,
    }
}

fn rubric_table(grades: &GradeSet) -> Vec<String> {
    let mut rows = vec![
        "## Estrutura de avaliação sugerida (rubrica)".to_string(),
        String::new(),
        "| Seção | Peso | Nota (0–10) |".to_string(),
        "|-------|------|-------------|".to_string(),
    ];
    for key in SectionKey::ALL {
        let grade = grades
            .get(key)
            .map(|g| g.to_string())
            .unwrap_or_else(|| MISSING_GRADE.to_string());
        rows.push(format!(
            "| {} | {}% | {} |",
            key.rubric_label(),
            key.weight(),
            grade
        ));
    }
    rows
}
