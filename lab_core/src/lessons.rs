//! Lesson catalogue of the course. Fixed at compile time.

use crate::types::Lesson;
use std::sync::OnceLock;

/// Lesson code of the capstone
pub const CAPSTONE_LESSON_CODE: &str = "CAP";

const LESSONS: [(u32, &str, &str); 13] = [
    (1, "T1", "Projeto x Produto x Operação"),
    (2, "T2", "Triângulo de Ferro e Trade-offs"),
    (3, "T3", "Ciclo de Vida e Gates"),
    (4, "T4", "Problema, Hipótese e KPIs"),
    (5, "T5", "Stakeholders, Comunicação e Rituais"),
    (6, "T6", "Charter, MVP, Backlog e DOD"),
    (7, "T7", "Arquitetura e Medallion"),
    (8, "T8", "Estimativas, Roadmap e Riscos"),
    (9, "T9", "Qualidade, Testes e Observabilidade"),
    (10, "T10", "Custos e FinOps"),
    (11, "T11", "Governança e LGPD"),
    (12, "T12", "Go-live, Adoção e Encerramento"),
    (13, CAPSTONE_LESSON_CODE, "Capstone — Plano de Desenvolvimento de Carreira"),
];

/// All lessons, in course order
pub fn lessons() -> &'static [Lesson] {
    static CATALOGUE: OnceLock<Vec<Lesson>> = OnceLock::new();
    CATALOGUE.get_or_init(|| {
        LESSONS
            .iter()
            .map(|(id, code, title)| Lesson {
                id: *id,
                code: code.to_string(),
                title: title.to_string(),
            })
            .collect()
    })
}

/// Looks up a lesson by its exact code
pub fn lesson_by_code(code: &str) -> Option<&'static Lesson> {
    lessons().iter().find(|l| l.code == code)
}
