//! Rubric Scoring Module
//!
//! DETERMINISTIC scoring of the capstone career plan against a fixed rubric.
//!
//! Formula: final_score = Σ(weight × grade) / Σ(weight)
//! Where:
//! - the sums run only over sections with a valid grade (a number in [0, 10])
//! - weights are fixed percentages summing to 100
//!
//! Sections without a valid grade are left out of both sums, so a partially
//! graded plan is still scored on the 0–10 scale.

use crate::types::RawGrades;
use serde::{Deserialize, Serialize};

/// Lowest accepted grade
pub const MIN_GRADE: f64 = 0.0;
/// Highest accepted grade
pub const MAX_GRADE: f64 = 10.0;

// ============================================================
// SECTION KEYS
// ============================================================

/// A rubric dimension of the career plan exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    ContextoAtual,
    VisaoFuturo,
    Forcas,
    Gaps,
    #[serde(rename = "acoes_12_meses")]
    Acoes12Meses,
    IndicadoresSucesso,
    RedeApoio,
}

impl SectionKey {
    /// All sections in report order
    pub const ALL: [SectionKey; 7] = [
        SectionKey::ContextoAtual,
        SectionKey::VisaoFuturo,
        SectionKey::Forcas,
        SectionKey::Gaps,
        SectionKey::Acoes12Meses,
        SectionKey::IndicadoresSucesso,
        SectionKey::RedeApoio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::ContextoAtual => "contexto_atual",
            SectionKey::VisaoFuturo => "visao_futuro",
            SectionKey::Forcas => "forcas",
            SectionKey::Gaps => "gaps",
            SectionKey::Acoes12Meses => "acoes_12_meses",
            SectionKey::IndicadoresSucesso => "indicadores_sucesso",
            SectionKey::RedeApoio => "rede_apoio",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        SectionKey::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Rubric weight in percent
    pub fn weight(&self) -> u32 {
        match self {
            SectionKey::ContextoAtual => 15,
            SectionKey::VisaoFuturo => 20,
            SectionKey::Forcas => 10,
            SectionKey::Gaps => 15,
            SectionKey::Acoes12Meses => 20,
            SectionKey::IndicadoresSucesso => 10,
            SectionKey::RedeApoio => 10,
        }
    }

    /// Label used in the rubric table
    pub fn rubric_label(&self) -> &'static str {
        match self {
            SectionKey::ContextoAtual => "1. Contexto atual",
            SectionKey::VisaoFuturo => "2. Visão de futuro (3–5 anos)",
            SectionKey::Forcas => "3. Forças e diferenciais",
            SectionKey::Gaps => "4. Lacunas (gaps)",
            SectionKey::Acoes12Meses => "5. Ações para 12 meses",
            SectionKey::IndicadoresSucesso => "6. Indicadores de sucesso",
            SectionKey::RedeApoio => "7. Rede de apoio e rituais",
        }
    }

    /// Heading of the answer block
    pub fn heading(&self) -> &'static str {
        match self {
            SectionKey::ContextoAtual => "Contexto atual",
            SectionKey::VisaoFuturo => "Visão de futuro (3–5 anos)",
            SectionKey::Forcas => "Forças e diferenciais",
            SectionKey::Gaps => "Lacunas de habilidades e experiências",
            SectionKey::Acoes12Meses => "Ações para os próximos 12 meses",
            SectionKey::IndicadoresSucesso => "Indicadores de sucesso",
            SectionKey::RedeApoio => "Rede de apoio e rituais",
        }
    }

    /// Short name used in the grader commentary heading
    pub fn commentary_label(&self) -> &'static str {
        match self {
            SectionKey::ContextoAtual => "Contexto atual",
            SectionKey::VisaoFuturo => "Visão de futuro",
            SectionKey::Forcas => "Forças",
            SectionKey::Gaps => "Lacunas (gaps)",
            SectionKey::Acoes12Meses => "Ações 12 meses",
            SectionKey::IndicadoresSucesso => "Indicadores",
            SectionKey::RedeApoio => "Rede de apoio",
        }
    }
}

// ============================================================
// GRADE PARSING
// ============================================================

/// Interprets one raw grade value.
///
/// JSON numbers are used as-is, strings are trimmed and parsed strictly.
/// Anything else, non-finite values and values outside [0, 10] count as
/// not provided.
pub fn parse_grade(value: &serde_json::Value) -> Option<f64> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if n.is_finite() && (MIN_GRADE..=MAX_GRADE).contains(&n) {
        Some(n)
    } else {
        None
    }
}

/// Best-effort coercion of a grade typed by a person.
///
/// The first comma becomes a decimal point and the longest numeric prefix is
/// used, so "7,5" and "7.5 pts" both give 7.5. Returns `None` when no prefix
/// is numeric. Range is not checked here.
pub fn coerce_grade_input(input: &str) -> Option<f64> {
    let normalized = input.trim().replacen(',', ".", 1);
    let candidate_len = normalized
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')))
        .unwrap_or(normalized.len());
    let candidate = &normalized[..candidate_len];

    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// The valid grades of a raw grade mapping, in report order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeSet {
    grades: Vec<(SectionKey, f64)>,
}

impl GradeSet {
    /// Keeps only recognized keys whose value parses as a grade
    pub fn from_raw(raw: &RawGrades) -> Self {
        let grades = SectionKey::ALL
            .into_iter()
            .filter_map(|key| {
                raw.get(key.as_str())
                    .and_then(parse_grade)
                    .map(|grade| (key, grade))
            })
            .collect();
        Self { grades }
    }

    pub fn get(&self, key: SectionKey) -> Option<f64> {
        self.grades
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, grade)| *grade)
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    /// Sum of the weights of the graded sections
    pub fn weight_used(&self) -> u32 {
        self.grades.iter().map(|(key, _)| key.weight()).sum()
    }

    /// Weighted partial average, rounded to two decimals.
    ///
    /// Divides by the weight actually used, not by 100: grading three of
    /// seven sections still yields a 0–10 score over those three.
    pub fn final_score(&self) -> Option<f64> {
        let weight_used = self.weight_used();
        if weight_used == 0 {
            return None;
        }
        let weighted_sum: f64 = self
            .grades
            .iter()
            .map(|(key, grade)| f64::from(key.weight()) * grade)
            .sum();
        Some(round2(weighted_sum / f64::from(weight_used)))
    }
}

/// Rounds to two decimals, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
