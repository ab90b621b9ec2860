//! Dynamic UPDATE statement assembly.
//!
//! Partial updates touch only the columns the caller supplied. The builder
//! derives the SET clause list and the positional parameter list from the same
//! sequence of `push` calls, so placeholder numbering and bind order cannot
//! drift apart.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no fields supplied to update")]
pub struct EmptyUpdate;

/// Builder for `UPDATE <table> SET .. WHERE <id_column> = $k+1` statements.
///
/// Each pushed assignment takes the next placeholder number, starting at `$1`;
/// the row id is always the final parameter and is bound by the caller after
/// the collected values.
#[derive(Debug, Default)]
pub struct UpdateBuilder {
    clauses: Vec<String>,
    timestamps: Vec<String>,
    params: Vec<String>,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an assignment. The placeholder index is derived from the current
    /// parameter count, never tracked separately.
    pub fn push(&mut self, column: &str, value: impl Into<String>) -> &mut Self {
        self.params.push(value.into());
        self.clauses.push(format!("{} = ${}", column, self.params.len()));
        self
    }

    /// Add an assignment only when a value is present.
    pub fn push_opt(&mut self, column: &str, value: Option<impl Into<String>>) -> &mut Self {
        if let Some(value) = value {
            self.push(column, value);
        }
        self
    }

    /// Stamp `column = CURRENT_TIMESTAMP`. Takes no placeholder and does not
    /// count as a supplied field.
    pub fn touch(&mut self, column: &str) -> &mut Self {
        self.timestamps.push(format!("{column} = CURRENT_TIMESTAMP"));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render the statement and hand back the field values in bind order.
    /// Fails rather than emitting an UPDATE with an empty SET clause.
    pub fn build(
        self,
        table: &str,
        id_column: &str,
        returning: &str,
    ) -> Result<(String, Vec<String>), EmptyUpdate> {
        if self.clauses.is_empty() {
            return Err(EmptyUpdate);
        }

        let Self {
            mut clauses,
            timestamps,
            params,
        } = self;
        let id_placeholder = params.len() + 1;
        clauses.extend(timestamps);

        let sql = format!(
            "UPDATE {table} SET {} WHERE {id_column} = ${id_placeholder} RETURNING {returning}",
            clauses.join(", ")
        );
        Ok((sql, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_number_sequentially_with_id_last() {
        let mut builder = UpdateBuilder::new();
        builder.push("name", "Acme");
        builder.push("phone_number", "0700000000");
        let (sql, params) = builder.build("smes", "id", "*").unwrap();

        assert_eq!(
            sql,
            "UPDATE smes SET name = $1, phone_number = $2 WHERE id = $3 RETURNING *"
        );
        assert_eq!(params, vec!["Acme", "0700000000"]);
    }

    #[test]
    fn test_k_fields_produce_k_params() {
        let mut builder = UpdateBuilder::new();
        builder.push_opt("name", Some("a"));
        builder.push_opt("company_name", None::<String>);
        builder.push_opt("phone_number", Some("b"));
        builder.push_opt("company_logo_url", Some("c"));
        let (sql, params) = builder.build("smes", "id", "id").unwrap();

        assert_eq!(params.len(), 3);
        assert!(sql.contains("company_logo_url = $3"));
        assert!(sql.contains("WHERE id = $4"));
        assert!(!sql.contains("company_name"));
    }

    #[test]
    fn test_empty_build_fails() {
        let builder = UpdateBuilder::new();
        assert_eq!(builder.build("smes", "id", "*"), Err(EmptyUpdate));
    }

    #[test]
    fn test_timestamp_alone_does_not_count_as_a_field() {
        let mut builder = UpdateBuilder::new();
        builder.touch("updated_at");
        assert!(builder.is_empty());
        assert_eq!(builder.build("smes", "id", "*"), Err(EmptyUpdate));
    }

    #[test]
    fn test_timestamp_takes_no_placeholder() {
        let mut builder = UpdateBuilder::new();
        builder.push("name", "Acme");
        builder.touch("updated_at");
        let (sql, params) = builder.build("smes", "id", "*").unwrap();

        assert_eq!(
            sql,
            "UPDATE smes SET name = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *"
        );
        assert_eq!(params.len(), 1);
    }
}
