/// Options for [`split_sql_statements_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitOptions {
    /// Drop `-- ...` comments found outside string literals.
    pub strip_line_comments: bool,
}

/// Split a dump into trimmed statements on semicolons outside string literals.
pub fn split_sql_statements(text: &str) -> Vec<String> {
    split_sql_statements_with(text, SplitOptions::default())
}

pub fn split_sql_statements_with(text: &str, opts: SplitOptions) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            // '' inside a literal is an escaped quote: keep both, stay in the literal
            '\'' if in_string && chars.peek() == Some(&'\'') => {
                current.push('\'');
                current.push('\'');
                chars.next();
            }
            '\'' => {
                in_string = !in_string;
                current.push(c);
            }
            ';' if !in_string => {
                push_trimmed(&mut statements, &current);
                current.clear();
            }
            '-' if !in_string && opts.strip_line_comments && chars.peek() == Some(&'-') => {
                // skip to end of line, keep the newline as a separator
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        current.push('\n');
                        break;
                    }
                }
            }
            _ => current.push(c),
        }
    }

    push_trimmed(&mut statements, &current);
    statements
}

fn push_trimmed(statements: &mut Vec<String>, buf: &str) {
    let trimmed = buf.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}
