//! Name lookup variants and raw-SQL parameter binding.
//!
//! Templates use either positional (`?1`, `?2`, ...) or named (`:first_name`)
//! placeholders. Binding rewrites them to the placeholder syntax of the target
//! backend (`$n` for Postgres, `?` otherwise) and lays the values out in the
//! order the rewritten placeholders appear.

use std::fmt;
use std::str::FromStr;

use sea_orm::{DbBackend, Statement, Value};

use super::errors::EmployeeError;

/// How parameters are written in a raw-SQL template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParamStyle {
    #[default]
    Positional,
    Named,
}

/// Access path for the `(first_name, last_name)` lookup.
///
/// Every variant selects the same rows; they differ only in how the statement
/// is written and bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameQuery {
    /// Portable SQL with `?1`/`?2` parameters.
    #[default]
    Positional,
    /// Portable SQL with `:first_name`/`:last_name` parameters.
    Named,
    /// Backend-native SQL (dialect identifier quoting) with either style.
    Native(ParamStyle),
}

impl NameQuery {
    pub const ALL: [NameQuery; 4] = [
        NameQuery::Positional,
        NameQuery::Named,
        NameQuery::Native(ParamStyle::Positional),
        NameQuery::Native(ParamStyle::Named),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NameQuery::Positional => "positional",
            NameQuery::Named => "named",
            NameQuery::Native(ParamStyle::Positional) => "native",
            NameQuery::Native(ParamStyle::Named) => "native-named",
        }
    }
}

impl fmt::Display for NameQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for NameQuery {
    type Err = EmployeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "positional" => Ok(NameQuery::Positional),
            "named" => Ok(NameQuery::Named),
            "native" | "native-positional" => Ok(NameQuery::Native(ParamStyle::Positional)),
            "native-named" => Ok(NameQuery::Native(ParamStyle::Named)),
            other => Err(EmployeeError::Query(format!("unknown name query style '{other}'"))),
        }
    }
}

/// SQL rewritten for one backend, with values in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundSql {
    pub backend: DbBackend,
    pub sql: String,
    pub values: Vec<Value>,
}

impl BoundSql {
    pub fn into_statement(self) -> Statement {
        Statement::from_sql_and_values(self.backend, self.sql, self.values)
    }
}

enum Placeholder<'a> {
    Index(usize),
    Name(&'a str),
}

/// Bind a template written with `?N` (1-based) placeholders.
/// Indexes may repeat or appear out of order.
pub fn bind_positional(template: &str, values: &[Value], backend: DbBackend) -> Result<BoundSql, EmployeeError> {
    rewrite(template, backend, |p| match p {
        Placeholder::Index(i) => values
            .get(i.wrapping_sub(1))
            .cloned()
            .ok_or_else(|| EmployeeError::Query(format!("parameter ?{i} out of range (have {})", values.len()))),
        Placeholder::Name(name) => Err(EmployeeError::Query(format!("named parameter :{name} in positional query"))),
    })
}

/// Bind a template written with `:name` placeholders.
pub fn bind_named(template: &str, params: &[(&str, Value)], backend: DbBackend) -> Result<BoundSql, EmployeeError> {
    rewrite(template, backend, |p| match p {
        Placeholder::Name(name) => params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| EmployeeError::Query(format!("no value bound for :{name}"))),
        Placeholder::Index(i) => Err(EmployeeError::Query(format!("positional parameter ?{i} in named query"))),
    })
}

fn push_placeholder(sql: &mut String, backend: DbBackend, n: usize) {
    match backend {
        DbBackend::Postgres => {
            sql.push('$');
            sql.push_str(&n.to_string());
        }
        _ => sql.push('?'),
    }
}

fn is_ident_start(b: u8) -> bool { b.is_ascii_alphabetic() || b == b'_' }

fn is_ident_char(b: u8) -> bool { b.is_ascii_alphanumeric() || b == b'_' }

fn scan_while(bytes: &[u8], mut i: usize, pred: fn(u8) -> bool) -> usize {
    while i < bytes.len() && pred(bytes[i]) {
        i += 1;
    }
    i
}

fn rewrite<'t, F>(template: &'t str, backend: DbBackend, mut resolve: F) -> Result<BoundSql, EmployeeError>
where
    F: FnMut(Placeholder<'t>) -> Result<Value, EmployeeError>,
{
    let bytes = template.as_bytes();
    let mut sql = String::with_capacity(template.len() + 8);
    let mut values = Vec::new();
    let mut copied = 0;
    let mut in_literal = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\'' {
            in_literal = !in_literal;
            i += 1;
            continue;
        }
        if in_literal {
            i += 1;
            continue;
        }
        let next = bytes.get(i + 1).copied();
        let (placeholder, end) = match (b, next) {
            // Postgres cast, not a parameter
            (b':', Some(b':')) => {
                i += 2;
                continue;
            }
            (b':', Some(n)) if is_ident_start(n) => {
                let end = scan_while(bytes, i + 1, is_ident_char);
                (Placeholder::Name(&template[i + 1..end]), end)
            }
            (b'?', Some(n)) if n.is_ascii_digit() => {
                let end = scan_while(bytes, i + 1, |c| c.is_ascii_digit());
                let index = template[i + 1..end]
                    .parse::<usize>()
                    .map_err(|e| EmployeeError::Query(format!("bad parameter index: {e}")))?;
                if index == 0 {
                    return Err(EmployeeError::Query("parameter indexes start at ?1".into()));
                }
                (Placeholder::Index(index), end)
            }
            (b'?', _) => {
                return Err(EmployeeError::Query(format!("bare '?' at byte {i}; write ?N")));
            }
            _ => {
                i += 1;
                continue;
            }
        };

        sql.push_str(&template[copied..i]);
        values.push(resolve(placeholder)?);
        push_placeholder(&mut sql, backend, values.len());
        copied = end;
        i = end;
    }

    if in_literal {
        return Err(EmployeeError::Query("unterminated string literal".into()));
    }
    sql.push_str(&template[copied..]);
    Ok(BoundSql { backend, sql, values })
}
