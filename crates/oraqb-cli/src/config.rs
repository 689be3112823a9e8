use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub config_path: PathBuf,
    pub file: QueryFile,
}

impl QueryConfig {
    pub fn load(config_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref().to_path_buf();

        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!("failed to read query file {}: {e}", config_path.display())
        })?;

        let file = QueryFile::parse(&raw).map_err(|e| {
            anyhow::anyhow!("invalid query file {}: {e:#}", config_path.display())
        })?;

        Ok(Self { config_path, file })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryFile {
    /// Name of the query to render.
    pub root: String,

    #[serde(default)]
    pub placeholder_style: PlaceholderStyleConfig,

    pub queries: BTreeMap<String, QuerySpec>,

    /// Optional derived-table wrapper around `root`.
    pub outer: Option<OuterSpec>,
}

impl QueryFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let file: QueryFile = toml::from_str(raw)?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !self.queries.contains_key(&self.root) {
            anyhow::bail!("root query `{}` is not defined under [queries]", self.root);
        }
        for (name, spec) in &self.queries {
            if spec.from.trim().is_empty() {
                anyhow::bail!("query `{name}`: `from` must not be empty");
            }
            for union in &spec.unions {
                if !self.queries.contains_key(&union.query) {
                    anyhow::bail!("query `{name}`: union references unknown query `{}`", union.query);
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyleConfig {
    #[default]
    Question,
    Numbered,
}

impl From<PlaceholderStyleConfig> for oraqb::PlaceholderStyle {
    fn from(style: PlaceholderStyleConfig) -> Self {
        match style {
            PlaceholderStyleConfig::Question => oraqb::PlaceholderStyle::Question,
            PlaceholderStyleConfig::Numbered => oraqb::PlaceholderStyle::Numbered,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuerySpec {
    pub from: String,

    #[serde(default)]
    pub columns: Vec<ColumnSpec>,

    #[serde(default)]
    pub joins: Vec<String>,

    #[serde(default, rename = "where")]
    pub where_: Vec<ConditionSpec>,

    #[serde(default)]
    pub and_where: Vec<ConditionSpec>,

    #[serde(default)]
    pub or_groups: Vec<Vec<String>>,

    pub order_by: Option<String>,

    pub limit: Option<i64>,

    pub offset: Option<i64>,

    /// Takes precedence over `limit`.
    pub limit_if: Option<LimitIfSpec>,

    #[serde(default)]
    pub unions: Vec<UnionSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitIfSpec {
    pub condition: bool,
    pub when_true: i64,
    pub when_false: i64,
}

/// Each shape rejects unknown keys, so a misspelled key fails every variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    Case(CaseColumn),
    NestedCase(NestedCaseColumn),
    Plain(PlainColumn),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseColumn {
    pub case: Vec<String>,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NestedCaseColumn {
    pub nested_case: NestedCaseSpec,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlainColumn {
    pub expr: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NestedCaseSpec {
    pub outer: String,
    pub inner: String,
    pub then: String,
    pub otherwise: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionSpec {
    pub sql: String,
    #[serde(default)]
    pub params: Vec<toml::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnionSpec {
    pub query: String,
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OuterSpec {
    #[serde(default)]
    pub columns: Vec<OuterColumnSpec>,

    pub order_by: Option<String>,

    pub limit: Option<i64>,

    pub offset: Option<i64>,

    pub limit_if: Option<LimitIfSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OuterColumnSpec {
    /// `inner_table.<inner> [AS alias]`
    Inner(InnerColumn),
    /// `<expr> [AS alias]`, unqualified
    Static(PlainColumn),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InnerColumn {
    pub inner: String,
    pub alias: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
root = "active"
placeholder_style = "numbered"

[queries.active]
from = "EMPLOYEE e"
columns = [
    { expr = "e.id", alias = "id" },
    { case = ["e.status = 'A'", "Active", "Unknown"], alias = "Status" },
    { nested_case = { outer = "e.exp > 5", inner = "e.role = 'M'", then = "Senior", otherwise = "Junior" }, alias = "Level" },
]
where = [{ sql = "e.status = ?", params = ["A"] }]
limit = 10
unions = [{ query = "inactive", all = true }]

[queries.inactive]
from = "EMPLOYEE e"
columns = [{ expr = "e.id", alias = "id" }]

[outer]
columns = [{ inner = "id", alias = "RollNo" }, { expr = "'X'" }]
limit_if = { condition = true, when_true = 100, when_false = 2000 }
"#;

    #[test]
    fn test_parses_sample() {
        let file = QueryFile::parse(SAMPLE).unwrap();
        assert_eq!(file.root, "active");
        assert_eq!(file.placeholder_style, PlaceholderStyleConfig::Numbered);

        let active = &file.queries["active"];
        assert_eq!(active.columns.len(), 3);
        assert!(matches!(active.columns[0], ColumnSpec::Plain(_)));
        assert!(matches!(active.columns[1], ColumnSpec::Case(_)));
        assert!(matches!(active.columns[2], ColumnSpec::NestedCase(_)));
        assert_eq!(active.limit, Some(10));
        assert!(active.unions[0].all);

        let outer = file.outer.unwrap();
        assert!(matches!(outer.columns[0], OuterColumnSpec::Inner(_)));
        assert!(matches!(outer.columns[1], OuterColumnSpec::Static(PlainColumn { alias: None, .. })));
        assert!(outer.limit_if.unwrap().condition);
    }

    #[test]
    fn test_rejects_unknown_root() {
        let err = QueryFile::parse("root = \"missing\"\n[queries.a]\nfrom = \"T\"\n").unwrap_err();
        assert!(err.to_string().contains("root query `missing`"));
    }

    #[test]
    fn test_rejects_unknown_union_reference() {
        let raw = "root = \"a\"\n[queries.a]\nfrom = \"T\"\nunions = [{ query = \"b\" }]\n";
        let err = QueryFile::parse(raw).unwrap_err();
        assert!(err.to_string().contains("unknown query `b`"));
    }

    #[test]
    fn test_rejects_empty_from() {
        let err = QueryFile::parse("root = \"a\"\n[queries.a]\nfrom = \" \"\n").unwrap_err();
        assert!(err.to_string().contains("`from` must not be empty"));
    }

    #[test]
    fn test_rejects_misspelled_query_key() {
        let raw = "root = \"a\"\n[queries.a]\nfrom = \"T\"\nwher = [{ sql = \"x = 1\" }]\n";
        let err = QueryFile::parse(raw).unwrap_err();
        assert!(format!("{err:#}").contains("unknown field `wher`"));
    }

    #[test]
    fn test_rejects_misspelled_outer_key() {
        let raw = "root = \"a\"\n[queries.a]\nfrom = \"T\"\n[outer]\nlimt = 5\n";
        let err = QueryFile::parse(raw).unwrap_err();
        assert!(format!("{err:#}").contains("unknown field `limt`"));
    }

    #[test]
    fn test_rejects_misspelled_column_alias() {
        let raw = "root = \"a\"\n[queries.a]\nfrom = \"T\"\ncolumns = [{ expr = \"t.id\", alais = \"id\" }]\n";
        assert!(QueryFile::parse(raw).is_err());
    }
}
