use rollcall_core::{
    BackendKind, Duty, MemoryRosterStore, Person, RosterService, RosterSnapshot, RosterStore,
    StoreResult,
};
use std::cell::Cell;
use std::rc::Rc;
use uuid::Uuid;

/// Remote-mirror store that counts person writes, for idempotence checks.
struct CountingStore {
    inner: MemoryRosterStore,
    person_writes: Rc<Cell<usize>>,
}

impl CountingStore {
    fn new() -> (Self, Rc<Cell<usize>>) {
        let counter = Rc::new(Cell::new(0));
        (
            Self {
                inner: MemoryRosterStore::new(),
                person_writes: Rc::clone(&counter),
            },
            counter,
        )
    }
}

impl RosterStore for CountingStore {
    fn backend_kind(&self) -> BackendKind {
        self.inner.backend_kind()
    }

    fn load(&self) -> StoreResult<RosterSnapshot> {
        self.inner.load()
    }

    fn insert_person(&mut self, person: &Person) -> StoreResult<()> {
        self.inner.insert_person(person)
    }

    fn update_person(&mut self, person: &Person) -> StoreResult<()> {
        self.person_writes.set(self.person_writes.get() + 1);
        self.inner.update_person(person)
    }

    fn delete_person(&mut self, id: rollcall_core::PersonId) -> StoreResult<()> {
        self.inner.delete_person(id)
    }

    fn insert_duty(&mut self, duty: &Duty) -> StoreResult<()> {
        self.inner.insert_duty(duty)
    }

    fn delete_duty(&mut self, id: rollcall_core::DutyId) -> StoreResult<usize> {
        self.inner.delete_duty(id)
    }

    fn replace_all(&mut self, snapshot: &RosterSnapshot) -> StoreResult<()> {
        self.inner.replace_all(snapshot)
    }
}

#[test]
fn repeated_identical_assignment_persists_only_once() {
    let (store, writes) = CountingStore::new();
    let mut service = RosterService::load(store).unwrap();
    let person = service.add_person("王小明", "一班", "").unwrap().unwrap();
    let duty = service.add_duty("公差").unwrap();

    assert!(service.set_assignment(person, "morning", Some(duty)));
    assert_eq!(writes.get(), 1);

    // Second identical call is a no-op with no persistence.
    assert!(!service.set_assignment(person, "morning", Some(duty)));
    assert_eq!(writes.get(), 1);
}

#[test]
fn assign_then_unassign_leaves_no_session_entry() {
    let (store, _) = CountingStore::new();
    let mut service = RosterService::load(store).unwrap();
    let person = service.add_person("王小明", "一班", "").unwrap().unwrap();
    let duty = service.add_duty("公差").unwrap();

    assert!(service.set_assignment(person, "S", Some(duty)));
    assert!(service.set_assignment(person, "S", None));

    let record = service.person(person).unwrap();
    assert!(!record.assignments.contains_key("S"));

    // Unassigning an already-unassigned session is a no-op too.
    assert!(!service.set_assignment(person, "S", None));
}

#[test]
fn unknown_person_or_duty_is_rejected_without_effect() {
    let (store, writes) = CountingStore::new();
    let mut service = RosterService::load(store).unwrap();
    let person = service.add_person("王小明", "一班", "").unwrap().unwrap();
    service.add_duty("公差").unwrap();

    assert!(!service.set_assignment(Uuid::new_v4(), "S", None));
    assert!(!service.set_assignment(person, "S", Some(Uuid::new_v4())));
    assert!(!service.set_assignment(person, "   ", None));
    assert_eq!(writes.get(), 0);
}

#[test]
fn sessions_are_independent_free_form_keys() {
    let (store, _) = CountingStore::new();
    let mut service = RosterService::load(store).unwrap();
    let person = service.add_person("王小明", "一班", "").unwrap().unwrap();
    let guard = service.add_duty("衛哨").unwrap();
    let leave = service.add_duty("休假").unwrap();

    assert!(service.set_assignment(person, "morning roll-call", Some(guard)));
    assert!(service.set_assignment(person, "晚點名", Some(leave)));

    let record = service.person(person).unwrap();
    assert_eq!(record.assignment("morning roll-call"), Some(guard));
    assert_eq!(record.assignment("晚點名"), Some(leave));
    assert_eq!(record.assignment("noon"), None);
}

#[test]
fn board_queries_follow_assignment_state() {
    let (store, _) = CountingStore::new();
    let mut service = RosterService::load(store).unwrap();
    let a = service.add_person("甲", "一班", "").unwrap().unwrap();
    let b = service.add_person("乙", "一班", "").unwrap().unwrap();
    let c = service.add_person("丙", "二班", "").unwrap().unwrap();
    let duty = service.add_duty("公差").unwrap();

    assert!(service.set_assignment(a, "S", Some(duty)));

    let unassigned: Vec<_> = service
        .unassigned_people("S", None)
        .iter()
        .map(|person| person.id)
        .collect();
    assert_eq!(unassigned, vec![b, c]);

    let filtered: Vec<_> = service
        .unassigned_people("S", Some("一班"))
        .iter()
        .map(|person| person.id)
        .collect();
    assert_eq!(filtered, vec![b]);

    let on_duty: Vec<_> = service
        .people_on_duty("S", duty)
        .iter()
        .map(|person| person.id)
        .collect();
    assert_eq!(on_duty, vec![a]);

    assert_eq!(service.units(), vec!["一班", "二班"]);
}
