use crate::models::TableBatches;
use crate::sql::{self, ParseError, SplitOptions};
use crate::ui::messages::warning;

/// A statement that looked like an insert but was skipped.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    /// 1-based position of the statement in the dump
    pub index: usize,
    pub error: ParseError,
}

#[derive(Debug, Default)]
pub struct ParseReport {
    pub statements: usize,
    pub inserts: usize,
    pub batches: TableBatches,
    pub failures: Vec<ParseFailure>,
}

impl ParseReport {
    pub fn rows(&self) -> usize {
        self.batches.row_count()
    }
}

pub struct ParseLogic;

impl ParseLogic {
    /// Split the dump, parse every insert and group the rows per table.
    /// Bad statements are reported and skipped.
    pub fn parse_dump(text: &str, opts: &SplitOptions) -> ParseReport {
        let statements = sql::split_sql_statements_with(text, *opts);
        let mut report = ParseReport {
            statements: statements.len(),
            ..Default::default()
        };

        for (i, stmt) in statements.iter().enumerate() {
            if !sql::is_insert(stmt) {
                continue;
            }
            report.inserts += 1;

            match sql::parse_insert(stmt) {
                Ok(Some(insert)) => {
                    let table = insert.table.clone();
                    for row in insert.into_rows() {
                        report.batches.push(&table, row);
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    warning(format!("Skipping statement #{}: {}", i + 1, error));
                    report.failures.push(ParseFailure {
                        index: i + 1,
                        error,
                    });
                }
            }
        }

        report
    }
}
