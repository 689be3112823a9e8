//! End-to-end scenarios through the public API only.

use oraqb::prelude::*;

#[test]
fn single_filtered_select() {
    let qb = QueryBuilder::new("T t")
        .select_column("t.id", Some("id"))
        .r#where("t.x = ?", params![5]);

    assert_eq!(qb.build(), "SELECT t.id AS id FROM T t WHERE t.x = ?");
    assert_eq!(qb.parameters(), params![5]);
}

#[test]
fn conditional_limit_without_offset() {
    let top = QueryBuilder::new("T").limit_based_on_condition(true, 10, 50);
    assert!(top.build().ends_with("FETCH FIRST 10 ROWS ONLY"));

    let wide = QueryBuilder::new("T").limit_based_on_condition(false, 10, 50);
    assert!(wide.build().ends_with("FETCH FIRST 50 ROWS ONLY"));
}

#[test]
fn union_all_of_two_plain_selects() {
    let b = QueryBuilder::new("B_SRC").select_column("b", Some("b"));
    let a = QueryBuilder::new("A_SRC")
        .select_column("a", Some("a"))
        .union_all(&b);

    assert_eq!(
        a.build(),
        "SELECT a AS a FROM A_SRC UNION ALL SELECT b AS b FROM B_SRC"
    );
}

#[test]
fn outer_wrapper_realiases_inner_columns() {
    let inner = QueryBuilder::new("T t").select_column("t.id", Some("id"));
    let inner_sql = inner.build();
    let outer = OuterQueryBuilder::new(inner)
        .select_from_inner("id", Some("RollNo"))
        .select_static("'X'", Some("Label"));

    assert_eq!(
        outer.build(),
        format!("SELECT inner_table.id AS RollNo, 'X' AS Label FROM ({inner_sql}) inner_table")
    );
}

#[test]
fn flat_and_grouped_conditions_render_one_where() {
    let qb = QueryBuilder::new("T t")
        .r#where("t.a = ?", params![1])
        .and_where("t.b = ?", params![2]);

    let sql = qb.build();
    assert_eq!(sql.matches(" WHERE ").count(), 1);
    assert_eq!(sql, "SELECT * FROM T t WHERE t.a = ? AND (t.b = ?)");
}

#[test]
fn employee_report() {
    let query1 = QueryBuilder::new("EMPLOYEE e")
        .select_column("e.id", Some("EmployeeId"))
        .select_column("e.name", Some("Name"))
        .select_case(
            "Status",
            &["e.status = 'A'", "Active", "e.status = 'I'", "Inactive", "Unknown"],
        )
        .select_nested_case(
            "SeniorityLevel",
            "e.experience > 5",
            "e.role = 'Manager'",
            "Senior Manager",
            "Experienced",
        )
        .and_where("e.department = ?", params!["IT"])
        .or_where_group(["e.city = 'New York'", "e.city = 'Chicago'"])
        .order_by("e.name")
        .limit(10);

    assert_eq!(query1.parameters(), params!["IT"]);
    assert!(query1.validate().is_ok());

    let query2 = QueryBuilder::new("EMPLOYEE e")
        .select_column("e.id", Some("id"))
        .select_column("e.name", Some("name"))
        .r#where("e.status = ?", params!["inactive"])
        .order_by("e.name DESC");

    let union = query1.union_all(&query2);
    let outer = OuterQueryBuilder::new(union)
        .select_from_inner("id", Some("RollNo"))
        .select_from_inner("name", Some("FirstName"))
        .select_static("'Sidhant Gupta'", Some("TeacherName"))
        .select_static(
            "CASE WHEN inner_table.id IS NULL THEN 'NO ID' ELSE 'IS ID' END",
            Some("Status"),
        )
        .order_by("RollNo ASC")
        .limit_based_on_condition(true, 100, 2000);

    let sql = outer.build();
    assert!(sql.starts_with(
        "SELECT inner_table.id AS RollNo, inner_table.name AS FirstName, 'Sidhant Gupta' AS TeacherName"
    ));
    assert!(sql.contains(
        "ORDER BY e.name UNION ALL SELECT e.id AS id, e.name AS name FROM EMPLOYEE e WHERE e.status = ? ORDER BY e.name DESC"
    ));
    assert!(!sql.contains("e.department"));
    assert!(sql.ends_with(") inner_table ORDER BY RollNo ASC FETCH FIRST 100 ROWS ONLY"));

    // The IT group was not part of the first member, so only the flat bind survives.
    assert_eq!(outer.parameters(), params!["inactive"]);
    let built = outer.build_checked().unwrap();
    assert_eq!(built.params(), &[Value::from("inactive")]);
}

#[test]
fn numbered_placeholders_for_native_binds() {
    let built = QueryBuilder::new("T")
        .r#where("a = ?", params![1])
        .r#where("b = ?", params![2])
        .to_query();

    assert_eq!(
        built.to_sql_with(PlaceholderStyle::Numbered),
        "SELECT * FROM T WHERE a = :1 AND b = :2"
    );
    let (sql, params) = built.into_parts();
    assert_eq!(sql, "SELECT * FROM T WHERE a = ? AND b = ?");
    assert_eq!(params.len(), 2);
}

#[test]
fn quote_literal_hardens_inlined_text() {
    let qb = QueryBuilder::new("T").select_column(&quote_literal("D'Souza"), Some("Name"));
    assert_eq!(qb.build(), "SELECT 'D''Souza' AS Name FROM T");
}
