//! Replay order for the tables of a dump.
//!
//! Tables listed in `table_order` come first, in that order, followed by the
//! remaining tables in the order the dump mentions them. That priority is
//! then made dependency-safe: a table is only emitted once every table it
//! depends on (and that is present) has been emitted.

use crate::errors::{AppError, AppResult};
use indexmap::{IndexMap, IndexSet};

pub fn plan_table_order(
    seen: &[String],
    declared: &[String],
    dependencies: &IndexMap<String, Vec<String>>,
) -> AppResult<Vec<String>> {
    let present: IndexSet<&str> = seen.iter().map(String::as_str).collect();

    let mut priority: IndexSet<&str> = declared
        .iter()
        .map(String::as_str)
        .filter(|t| present.contains(t))
        .collect();
    priority.extend(present.iter().copied());

    let deps_of = |table: &str| -> Vec<&str> {
        dependencies
            .get(table)
            .map(|deps| {
                deps.iter()
                    .map(String::as_str)
                    .filter(|d| *d != table && present.contains(d))
                    .collect()
            })
            .unwrap_or_default()
    };

    let mut emitted: IndexSet<&str> = IndexSet::with_capacity(priority.len());
    while emitted.len() < priority.len() {
        let next = priority
            .iter()
            .copied()
            .filter(|t| !emitted.contains(t))
            .find(|t| deps_of(t).iter().all(|d| emitted.contains(d)));

        match next {
            Some(table) => {
                emitted.insert(table);
            }
            None => {
                let stuck: Vec<&str> = priority
                    .iter()
                    .copied()
                    .filter(|t| !emitted.contains(t))
                    .collect();
                return Err(AppError::TableOrder(format!(
                    "dependency cycle between {}",
                    stuck.join(", ")
                )));
            }
        }
    }

    Ok(emitted.into_iter().map(str::to_string).collect())
}
