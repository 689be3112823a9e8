//! The built-in employee report: two employee selects joined with
//! `UNION ALL`, re-projected through the outer wrapper.

use oraqb::prelude::*;

pub fn employee_report(all_rows: bool) -> OuterQueryBuilder {
    let active = QueryBuilder::new("EMPLOYEE e")
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

    let inactive = QueryBuilder::new("EMPLOYEE e")
        .select_column("e.id", Some("id"))
        .select_column("e.name", Some("name"))
        .r#where("e.status = ?", params!["inactive"])
        .order_by("e.name DESC");

    OuterQueryBuilder::new(active.union_all(&inactive))
        .select_from_inner("id", Some("RollNo"))
        .select_from_inner("name", Some("FirstName"))
        .select_static("'Sidhant Gupta'", Some("TeacherName"))
        .select_static(
            "CASE WHEN inner_table.id IS NULL THEN 'NO ID' ELSE 'IS ID' END",
            Some("Status"),
        )
        .order_by("RollNo ASC")
        .limit_based_on_condition(!all_rows, 100, 2000)
}
