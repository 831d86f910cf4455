use rollcall_core::{
    aggregate, render_text, Duty, Person, ReportMode, UNKNOWN_DUTY,
};

fn person(name: &str, unit: &str, group: &str) -> Person {
    Person::new(name, unit, group)
}

#[test]
fn unit_report_counts_match_the_roster() {
    let leave = Duty::new("leave");
    let mut a = person("A", "1", "");
    let b = person("B", "1", "");
    let c = person("C", "2", "");
    a.set_assignment("S", Some(leave.id));

    let report = aggregate(&[a, b, c], &[leave], "S", ReportMode::Unit);

    assert_eq!(report.groups.len(), 2);
    let unit1 = &report.groups[0];
    assert_eq!(unit1.key, "1");
    assert_eq!(unit1.should_attend, 2);
    assert_eq!(unit1.duty_total, 1);
    assert_eq!(unit1.actual_attend, 1);

    let unit2 = &report.groups[1];
    assert_eq!(unit2.key, "2");
    assert_eq!(unit2.should_attend, 1);
    assert_eq!(unit2.duty_total, 0);
    assert_eq!(unit2.actual_attend, 1);

    assert_eq!(report.total.should_attend, 3);
    assert_eq!(report.total.duty_total, 1);
    assert_eq!(report.total.actual_attend, 2);
}

#[test]
fn unlisted_keys_sort_by_first_code_point() {
    // Neither "7" nor "9" appears in the unit priority list.
    let people = vec![person("甲", "9", ""), person("乙", "7", "")];
    let report = aggregate(&people, &[], "S", ReportMode::Unit);
    let keys: Vec<&str> = report.groups.iter().map(|group| group.key.as_str()).collect();
    assert_eq!(keys, vec!["7", "9"]);
}

#[test]
fn listed_keys_outrank_everything_else() {
    let people = vec![
        person("甲", "7", ""),
        person("乙", "隊部", ""),
        person("丙", "", ""),
    ];
    let report = aggregate(&people, &[], "S", ReportMode::Unit);
    let keys: Vec<&str> = report.groups.iter().map(|group| group.key.as_str()).collect();
    // Priority list order first (隊部, 預設建置班), then unlisted labels.
    assert_eq!(keys, vec!["隊部", "預設建置班", "7"]);
}

#[test]
fn group_mode_partitions_by_the_secondary_label() {
    let people = vec![
        person("甲", "一班", "通信組"),
        person("乙", "二班", "通信組"),
        person("丙", "一班", ""),
    ];
    let report = aggregate(&people, &[], "S", ReportMode::Group);
    let keys: Vec<&str> = report.groups.iter().map(|group| group.key.as_str()).collect();
    // The default group is listed in the priority list and sorts first.
    assert_eq!(keys, vec!["未分組", "通信組"]);
    assert_eq!(report.groups[1].should_attend, 2);
}

#[test]
fn dangling_duty_reference_reads_as_unknown() {
    let mut a = person("甲", "一班", "");
    a.set_assignment("S", Some(uuid::Uuid::new_v4()));
    let known = Duty::new("公差");

    let report = aggregate(&[a], &[known], "S", ReportMode::Unit);
    assert_eq!(report.duty_names, vec!["公差", UNKNOWN_DUTY]);
    assert_eq!(report.groups[0].duty_total, 1);
    assert_eq!(report.groups[0].actual_attend, 0);

    let text = render_text(&report);
    assert!(text.contains(&format!("{UNKNOWN_DUTY}1:甲")));
}

#[test]
fn empty_roster_reports_zeroes_without_error() {
    let report = aggregate(&[], &[], "S", ReportMode::Unit);
    assert!(report.groups.is_empty());
    assert_eq!(report.total.should_attend, 0);
    assert_eq!(report.total.actual_attend, 0);
}

#[test]
fn matrix_renders_zero_as_a_dash() {
    let duty = Duty::new("公差");
    let other = Duty::new("休假");
    let mut a = person("甲", "一班", "");
    a.set_assignment("S", Some(duty.id));
    let b = person("乙", "二班", "");

    let report = aggregate(&[a, b], &[duty, other], "S", ReportMode::Unit);
    let matrix = report.matrix();

    // Rows: 一班, 二班, 總計. Columns: key, 應到, 公差, 休假, 實到.
    assert_eq!(matrix.len(), 3);
    assert_eq!(matrix[0], vec!["一班", "1", "1", "-", "0"]);
    assert_eq!(matrix[1], vec!["二班", "1", "-", "-", "1"]);
    assert_eq!(matrix[2], vec!["總計", "2", "1", "-", "1"]);
}

#[test]
fn report_only_counts_the_requested_session() {
    let duty = Duty::new("公差");
    let mut a = person("甲", "一班", "");
    a.set_assignment("morning", Some(duty.id));

    let report = aggregate(std::slice::from_ref(&a), std::slice::from_ref(&duty), "evening", ReportMode::Unit);
    assert_eq!(report.groups[0].duty_total, 0);
    assert_eq!(report.groups[0].actual_attend, 1);
}

#[test]
fn duty_names_listed_with_assignee_names_in_text_output() {
    let duty = Duty::new("衛哨");
    let mut a = person("甲", "一班", "");
    let mut b = person("乙", "一班", "");
    a.set_assignment("S", Some(duty.id));
    b.set_assignment("S", Some(duty.id));

    let report = aggregate(&[a, b], &[duty], "S", ReportMode::Unit);
    let text = render_text(&report);
    assert!(text.contains("衛哨2:甲、乙"));
    assert!(text.contains("應到：2"));
    assert!(text.contains("實到：0"));
}
