//! Rendering compiled listing predicates into SurrealQL.
//!
//! User text never becomes part of the statement: every value is bound as a
//! parameter, and text matches are case-folded literal comparisons rather than
//! patterns.

use board_core::{Field, MatchMode, Predicate};
use serde_json::Value;

/// A WHERE clause plus the parameters it references.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WhereClause {
    pub sql: String,
    pub bindings: Vec<(String, Value)>,
}

/// Render a conjunction of clauses.
pub(crate) fn render_where(clauses: &[Predicate]) -> WhereClause {
    let mut bindings = Vec::new();
    let parts: Vec<String> = clauses
        .iter()
        .map(|c| render(c, &mut bindings))
        .collect();

    let sql = if parts.is_empty() {
        "true".to_string()
    } else {
        parts.join(" AND ")
    };
    WhereClause { sql, bindings }
}

fn render(predicate: &Predicate, bindings: &mut Vec<(String, Value)>) -> String {
    match predicate {
        Predicate::Flag { field, value } => {
            let param = bind(bindings, Value::Bool(*value));
            format!("{} = ${param}", column(*field))
        }
        Predicate::Text(text) => {
            let param = bind(bindings, Value::String(text.text.to_lowercase()));
            let folded = format!("string::lowercase({} ?? '')", column(text.field));
            match text.mode {
                MatchMode::Contains => format!("string::contains({folded}, ${param})"),
                MatchMode::Exact => format!("{folded} = ${param}"),
            }
        }
        Predicate::AnyOf { clauses } => {
            let parts: Vec<String> = clauses.iter().map(|c| render(c, bindings)).collect();
            format!("({})", parts.join(" OR "))
        }
        Predicate::AtMost { field, value } => {
            let param = bind(bindings, number(*value));
            let col = column(*field);
            format!("({col} != NONE AND {col} <= ${param})")
        }
        Predicate::AtLeast { field, value } => {
            let param = bind(bindings, number(*value));
            let col = column(*field);
            format!("({col} != NONE AND {col} >= ${param})")
        }
    }
}

fn bind(bindings: &mut Vec<(String, Value)>, value: Value) -> String {
    let name = format!("p{}", bindings.len());
    bindings.push((name.clone(), value));
    name
}

fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Column backing a posting field.
pub(crate) fn column(field: Field) -> &'static str {
    match field {
        Field::Title => "title",
        Field::Company => "company",
        Field::Location => "location",
        Field::JobType => "job_type",
        Field::SalaryMin => "salary_min",
        Field::SalaryMax => "salary_max",
        Field::IsActive => "is_active",
    }
}

#[cfg(test)]
mod tests {
    use board_core::{FilterParams, compile};
    use serde_json::json;

    use super::*;

    #[test]
    fn active_only() {
        let clause = render_where(&compile(&FilterParams::default()).clauses);
        assert_eq!(clause.sql, "is_active = $p0");
        assert_eq!(clause.bindings, vec![("p0".to_string(), json!(true))]);
    }

    #[test]
    fn full_filter() {
        let params = FilterParams::default()
            .with_query("C++")
            .with_location("Delhi")
            .with_job_type("full-time")
            .with_salary_min(800_000)
            .with_salary_max(1_000_000);
        let clause = render_where(&compile(&params).clauses);

        assert_eq!(
            clause.sql,
            "is_active = $p0 \
             AND (string::contains(string::lowercase(title ?? ''), $p1) \
             OR string::contains(string::lowercase(company ?? ''), $p2)) \
             AND string::contains(string::lowercase(location ?? ''), $p3) \
             AND string::lowercase(job_type ?? '') = $p4 \
             AND (salary_min != NONE AND salary_min <= $p5) \
             AND (salary_max != NONE AND salary_max >= $p6)"
        );
        assert_eq!(clause.bindings[1].1, json!("c++"));
        assert_eq!(clause.bindings[4].1, json!("full-time"));
        assert_eq!(clause.bindings[5].1, json!(1_000_000.0));
        assert_eq!(clause.bindings[6].1, json!(800_000.0));
    }

    #[test]
    fn user_text_stays_out_of_the_statement() {
        let params = FilterParams::default().with_query("'); DELETE posting; --");
        let clause = render_where(&compile(&params).clauses);
        assert!(!clause.sql.contains("DELETE"));
    }
}
