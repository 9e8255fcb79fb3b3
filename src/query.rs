use std::sync::OnceLock;

use regex::Regex;

use crate::models::ExpenseFilter;

/// Keyword that selects the subscriptions category.
const SUBSCRIPTION_KEYWORD: &str = "assinatura";
const SUBSCRIPTION_CATEGORY: &str = "Assinaturas";

fn month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"mes\s*([0-9]{1,2})").expect("valid month pattern"))
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(20[0-9]{2})").expect("valid year pattern"))
}

/// A single field found in the question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Month(i64),
    Year(i64),
    Category(String),
}

// ---------------------------------------------------------------------------
// Extractors — enum dispatch, each one scans for one field
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extractor {
    Month,
    Year,
    Category,
}

impl Extractor {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Month => "mes",
            Self::Year => "ano",
            Self::Category => "categoria",
        }
    }

    /// Scan already case-folded text. First match wins.
    pub fn extract(&self, folded: &str) -> Option<Constraint> {
        match self {
            Self::Month => extract_month(folded),
            Self::Year => extract_year(folded),
            Self::Category => extract_category(folded),
        }
    }
}

const ALL_EXTRACTORS: &[Extractor] = &[Extractor::Month, Extractor::Year, Extractor::Category];

fn extract_month(folded: &str) -> Option<Constraint> {
    let caps = month_re().captures(folded)?;
    let month: i64 = caps.get(1)?.as_str().parse().ok()?;
    // "mes 0" never constrains anything
    (month != 0).then_some(Constraint::Month(month))
}

fn extract_year(folded: &str) -> Option<Constraint> {
    let caps = year_re().captures(folded)?;
    caps.get(1)?.as_str().parse().ok().map(Constraint::Year)
}

fn extract_category(folded: &str) -> Option<Constraint> {
    folded
        .contains(SUBSCRIPTION_KEYWORD)
        .then(|| Constraint::Category(SUBSCRIPTION_CATEGORY.to_string()))
}

impl ExpenseFilter {
    fn apply(&mut self, constraint: Constraint) {
        match constraint {
            Constraint::Month(m) => self.mes = Some(m),
            Constraint::Year(y) => self.ano = Some(y),
            Constraint::Category(c) => self.categoria = Some(c),
        }
    }
}

/// Turn a free-text question into a filter. Fields that are not mentioned
/// stay unconstrained.
pub fn interpret(question: &str) -> ExpenseFilter {
    let folded = question.to_lowercase();
    let mut filter = ExpenseFilter::default();
    for extractor in ALL_EXTRACTORS {
        if let Some(constraint) = extractor.extract(&folded) {
            tracing::debug!(extractor = extractor.key(), ?constraint, "matched");
            filter.apply(constraint);
        }
    }
    filter
}
