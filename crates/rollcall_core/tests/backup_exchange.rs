use rollcall_core::db::open_db_in_memory;
use rollcall_core::{import_state, MemoryRosterStore, RosterService, SqliteRosterStore};

fn sqlite_service() -> RosterService<SqliteRosterStore> {
    let conn = open_db_in_memory().unwrap();
    RosterService::load(SqliteRosterStore::new(conn)).unwrap()
}

#[test]
fn export_then_import_round_trips_the_roster() {
    let mut source = sqlite_service();
    let duty = source.add_duty("公差").unwrap();
    let person = source.add_person("王小明", "一班", "甲組").unwrap().unwrap();
    assert!(source.set_assignment(person, "morning", Some(duty)));

    let payload = source.export_json().unwrap();

    let mut target = RosterService::load(MemoryRosterStore::new()).unwrap();
    target.import_backup(&payload).unwrap();

    assert_eq!(target.duties().len(), 1);
    assert_eq!(target.duties()[0].id, duty);
    assert_eq!(target.people().len(), 1);

    let imported = &target.people()[0];
    assert_eq!(imported.name, "王小明");
    assert_eq!(imported.unit, "一班");
    assert_eq!(imported.group, "甲組");
    // Assignments survive because duty ids are preserved...
    assert_eq!(imported.assignment("morning"), Some(duty));
    // ...but people are re-identified on import.
    assert_ne!(imported.id, person);
}

#[test]
fn export_payload_is_human_readable_json() {
    let mut service = sqlite_service();
    service.add_person("王小明", "一班", "").unwrap();

    let payload = service.export_json().unwrap();
    assert!(payload.contains("\"people\""));
    assert!(payload.contains("\"duties\""));
    assert!(payload.contains('\n'), "export should be pretty-printed");

    let snapshot = import_state(&payload).unwrap();
    assert_eq!(snapshot.people.len(), 1);
    assert!(snapshot.duties.is_empty());
}

#[test]
fn import_rejects_malformed_payloads() {
    let mut service = sqlite_service();
    assert!(service.import_backup("not json at all").is_err());
    assert!(service.people().is_empty());
}

#[test]
fn bulk_import_adds_people_and_skips_blank_names() {
    let mut service = sqlite_service();
    let added = service.import_bulk("王小明, 一班, 甲組\n  \n李大華 二班\n,一班,\n陳一");
    assert_eq!(added, 3);

    let names: Vec<&str> = service.people().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["王小明", "李大華", "陳一"]);
    assert_eq!(service.people()[0].unit, "一班");
    assert_eq!(service.people()[0].group, "甲組");
    assert_eq!(service.people()[2].unit, rollcall_core::DEFAULT_UNIT);
}
