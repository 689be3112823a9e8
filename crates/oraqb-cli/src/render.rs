//! Turn a parsed [`QueryFile`] into builders and print the result.

use crate::cli::{OutputArgs, OutputFormat};
use crate::config::{
    CaseColumn, ColumnSpec, ConditionSpec, InnerColumn, LimitIfSpec, NestedCaseColumn,
    OuterColumnSpec, OuterSpec, PlainColumn, QueryFile, QuerySpec,
};
use oraqb::{BuiltQuery, OuterQueryBuilder, PlaceholderStyle, QueryBuilder, SqlQb, Value};
use serde::Serialize;
use std::io::Write;

/// Build the root query (wrapped in the outer layer if configured).
pub fn build_root(file: &QueryFile) -> anyhow::Result<Box<dyn SqlQb>> {
    let mut stack = Vec::new();
    let root = build_query(file, &file.root, &mut stack)?;
    Ok(match file.outer {
        Some(ref outer) => Box::new(build_outer(root, outer)),
        None => Box::new(root),
    })
}

/// Build `name`, resolving its unions depth-first. `stack` holds the names being built.
fn build_query(file: &QueryFile, name: &str, stack: &mut Vec<String>) -> anyhow::Result<QueryBuilder> {
    if stack.iter().any(|n| n == name) {
        anyhow::bail!("union cycle: {} -> {name}", stack.join(" -> "));
    }
    let Some(spec) = file.queries.get(name) else {
        anyhow::bail!("query `{name}` is not defined");
    };

    stack.push(name.to_string());
    let mut qb = apply_spec(QueryBuilder::new(spec.from.as_str()), spec)?;
    for union in &spec.unions {
        let other = build_query(file, &union.query, stack)?;
        qb = if union.all {
            qb.union_all(&other)
        } else {
            qb.union(&other)
        };
    }
    stack.pop();

    tracing::debug!(query = name, union = %qb.union_mode(), "built query");
    Ok(qb)
}

fn apply_spec(mut qb: QueryBuilder, spec: &QuerySpec) -> anyhow::Result<QueryBuilder> {
    for column in &spec.columns {
        qb = match column {
            ColumnSpec::Plain(PlainColumn { expr, alias }) => qb.select_column(expr, alias.as_deref()),
            ColumnSpec::Case(CaseColumn { case, alias }) => {
                let parts: Vec<&str> = case.iter().map(String::as_str).collect();
                qb.select_case(alias.as_deref().unwrap_or_default(), &parts)
            }
            ColumnSpec::NestedCase(NestedCaseColumn { nested_case, alias }) => qb.select_nested_case(
                alias.as_deref().unwrap_or_default(),
                &nested_case.outer,
                &nested_case.inner,
                &nested_case.then,
                &nested_case.otherwise,
            ),
        };
    }
    for join in &spec.joins {
        qb = qb.join(join);
    }
    for condition in &spec.where_ {
        qb = qb.r#where(condition.sql.as_str(), condition_params(condition)?);
    }
    for condition in &spec.and_where {
        qb = qb.and_where(condition.sql.as_str(), condition_params(condition)?);
    }
    for group in &spec.or_groups {
        qb = qb.or_where_group(group.iter());
    }
    if let Some(ref order_by) = spec.order_by {
        qb = qb.order_by(order_by);
    }
    let limit = effective_limit(spec.limit, spec.limit_if.as_ref());
    Ok(qb.limit_opt(limit).offset_opt(spec.offset))
}

fn build_outer(inner: QueryBuilder, spec: &OuterSpec) -> OuterQueryBuilder {
    let mut outer = OuterQueryBuilder::new(inner);
    for column in &spec.columns {
        outer = match column {
            OuterColumnSpec::Inner(InnerColumn { inner, alias }) => {
                outer.select_from_inner(inner, alias.as_deref())
            }
            OuterColumnSpec::Static(PlainColumn { expr, alias }) => {
                outer.select_static(expr, alias.as_deref())
            }
        };
    }
    if let Some(ref order_by) = spec.order_by {
        outer = outer.order_by(order_by);
    }
    let limit = effective_limit(spec.limit, spec.limit_if.as_ref());
    outer.limit_opt(limit).offset_opt(spec.offset)
}

/// `limit_if` wins over a plain `limit` when both are present.
fn effective_limit(limit: Option<i64>, limit_if: Option<&LimitIfSpec>) -> Option<i64> {
    match limit_if {
        Some(cond) => Some(if cond.condition { cond.when_true } else { cond.when_false }),
        None => limit,
    }
}

fn condition_params(condition: &ConditionSpec) -> anyhow::Result<Vec<Value>> {
    condition
        .params
        .iter()
        .map(|v| {
            toml_to_value(v).map_err(|e| anyhow::anyhow!("condition `{}`: {e}", condition.sql))
        })
        .collect()
}

/// Map a TOML parameter onto a bind value. Arrays and tables become JSON.
pub fn toml_to_value(value: &toml::Value) -> anyhow::Result<Value> {
    Ok(match value {
        toml::Value::String(s) => Value::Text(s.clone()),
        toml::Value::Integer(n) => Value::Int(*n),
        toml::Value::Float(f) => Value::Float(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => datetime_to_value(dt)?,
        toml::Value::Array(_) | toml::Value::Table(_) => Value::Json(serde_json::to_value(value)?),
    })
}

fn datetime_to_value(dt: &toml::value::Datetime) -> anyhow::Result<Value> {
    let text = dt.to_string();
    match (dt.date, dt.time) {
        (Some(_), None) => Ok(Value::Date(chrono::NaiveDate::parse_from_str(&text, "%Y-%m-%d")?)),
        (Some(_), Some(_)) if dt.offset.is_none() => {
            let normalized = text.replacen(' ', "T", 1);
            Ok(Value::Timestamp(chrono::NaiveDateTime::parse_from_str(
                &normalized,
                "%Y-%m-%dT%H:%M:%S%.f",
            )?))
        }
        // Offset datetimes and bare times have no lossless Value; bind as text.
        _ => Ok(Value::Text(text)),
    }
}

#[derive(Debug, Serialize)]
struct RenderedQuery<'a> {
    sql: &'a str,
    params: &'a [Value],
}

/// Validate, then write `query` to `out` in the requested format.
pub fn write_query(
    out: &mut impl Write,
    query: &dyn SqlQb,
    args: &OutputArgs,
    file_style: PlaceholderStyle,
) -> anyhow::Result<()> {
    if let Err(e) = query.validate() {
        if args.strict {
            return Err(anyhow::Error::new(e).context("validation failed"));
        }
        tracing::warn!("validation: {e}");
    }

    let built: BuiltQuery = query.to_query();
    let style = if args.numbered {
        PlaceholderStyle::Numbered
    } else {
        file_style
    };
    let sql = built.to_sql_with(style);

    match args.format {
        OutputFormat::Text => {
            writeln!(out, "{sql}")?;
            let params: Vec<String> = built.params().iter().map(ToString::to_string).collect();
            writeln!(out, "-- params: [{}]", params.join(", "))?;
        }
        OutputFormat::Json => {
            let rendered = RenderedQuery {
                sql: &sql,
                params: built.params(),
            };
            serde_json::to_writer_pretty(&mut *out, &rendered)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(raw: &str) -> (String, Vec<Value>) {
        let file = QueryFile::parse(raw).unwrap();
        let query = build_root(&file).unwrap();
        (query.build_sql(), query.params().into_vec())
    }

    #[test]
    fn test_renders_flat_and_grouped_conditions() {
        let (sql, params) = render(
            r#"
root = "q"
[queries.q]
from = "T t"
columns = [{ expr = "t.id", alias = "id" }]
where = [{ sql = "t.x = ?", params = [5] }]
and_where = [{ sql = "t.y = ? OR t.z = ?", params = ["a", true] }]
or_groups = [["t.c = 1", "", "t.c = 2"]]
order_by = "t.id"
limit = 10
offset = 20
"#,
        );
        assert_eq!(
            sql,
            "SELECT t.id AS id FROM T t WHERE t.x = ? AND (t.y = ? OR t.z = ?) AND (t.c = 1 OR t.c = 2) \
             ORDER BY t.id OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
        );
        assert_eq!(params, vec![Value::Int(5), Value::Text("a".into()), Value::Bool(true)]);
    }

    #[test]
    fn test_renders_union_inside_outer() {
        let (sql, params) = render(
            r#"
root = "a"
[queries.a]
from = "A"
where = [{ sql = "a = ?", params = [1] }]
unions = [{ query = "b", all = true }]
[queries.b]
from = "B"
where = [{ sql = "b = ?", params = [2] }]
[outer]
columns = [{ inner = "id", alias = "RollNo" }]
order_by = "RollNo"
limit_if = { condition = false, when_true = 100, when_false = 2000 }
"#,
        );
        assert_eq!(
            sql,
            "SELECT inner_table.id AS RollNo FROM (SELECT * FROM A WHERE a = ? UNION ALL \
             SELECT * FROM B WHERE b = ?) inner_table ORDER BY RollNo FETCH FIRST 2000 ROWS ONLY"
        );
        assert_eq!(params, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_union_cycle_is_an_error() {
        let file = QueryFile::parse(
            r#"
root = "a"
[queries.a]
from = "A"
unions = [{ query = "b" }]
[queries.b]
from = "B"
unions = [{ query = "a" }]
"#,
        )
        .unwrap();
        let err = build_root(&file).err().unwrap();
        assert!(err.to_string().contains("union cycle: a -> b -> a"));
    }

    #[test]
    fn test_toml_dates_become_typed_values() {
        let file = QueryFile::parse(
            r#"
root = "q"
[queries.q]
from = "T"
where = [{ sql = "d = ? AND ts = ?", params = [2024-05-01, 2024-05-01T10:30:00] }]
"#,
        )
        .unwrap();
        let params = build_root(&file).unwrap().params().into_vec();
        assert!(matches!(params[0], Value::Date(_)));
        assert!(matches!(params[1], Value::Timestamp(_)));
    }

    #[test]
    fn test_write_query_json() {
        let qb = QueryBuilder::new("T").r#where("a = ?", oraqb::params![1]);
        let args = OutputArgs {
            format: OutputFormat::Json,
            numbered: true,
            strict: true,
        };
        let mut out = Vec::new();
        write_query(&mut out, &qb, &args, PlaceholderStyle::Question).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["sql"], "SELECT * FROM T WHERE a = :1");
        assert_eq!(json["params"], serde_json::json!([1]));
    }

    #[test]
    fn test_write_query_strict_rejects_mismatch() {
        let qb = QueryBuilder::new("T").r#where("a = ? AND b = ?", oraqb::params![1]);
        let args = OutputArgs {
            format: OutputFormat::Text,
            numbered: false,
            strict: true,
        };
        let mut out = Vec::new();
        let err = write_query(&mut out, &qb, &args, PlaceholderStyle::Question).unwrap_err();
        assert!(format!("{err:#}").contains("Parameter mismatch"));
        assert!(out.is_empty());
    }
}
