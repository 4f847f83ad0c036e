//! Student-record façade end to end over the redb host.

use ledger_apps::student::{self, StudentRecord, STUDENT_TABLE};
use ledger_core::AppKind;
use ledger_engine::{ErrorKind, FixedClock, Host, Namespace};
use ledger_table::RedbRowStorage;

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn add_and_get_detail() {
    let storage = RedbRowStorage::open_in_memory().unwrap();
    let clock = FixedClock::new("t0");
    let host = Host::new(&storage, &clock);
    let ledger = ledger_apps::ledger_for(AppKind::Student);

    ledger.invoke(host, "init", &args(&["student"])).unwrap();
    assert_eq!(storage.list_tables().unwrap(), [STUDENT_TABLE]);

    let reply = ledger
        .invoke(host, "addDetail", &args(&["B00123", "Ada", "90", "85", "77"]))
        .unwrap();
    let reply = String::from_utf8(reply).unwrap();
    assert!(reply.starts_with("Record successfully added"));
    assert!(reply.contains("BannerID : B00123"));
    assert!(reply.contains("Marks3 : 77"));

    let payload = ledger.query(host, "getDetail", &args(&["B00123"])).unwrap();
    let record: StudentRecord = serde_json::from_slice(&payload).unwrap();
    assert_eq!(
        record,
        StudentRecord {
            banner_id: "B00123".into(),
            name: "Ada".into(),
            subject1: "90".into(),
            subject2: "85".into(),
            subject3: "77".into(),
        }
    );
}

#[test]
fn duplicate_banner_id_is_rejected() {
    let storage = RedbRowStorage::open_in_memory().unwrap();
    let clock = FixedClock::new("t0");
    let host = Host::new(&storage, &clock);
    let ledger = student::ledger();
    ledger.initialize(host, &[]).unwrap();

    ledger
        .invoke(host, "addDetail", &args(&["B1", "Ada", "1", "2", "3"]))
        .unwrap();
    let err = ledger
        .invoke(host, "addDetail", &args(&["B1", "Grace", "4", "5", "6"]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateKey);

    let payload = ledger.query(host, "getDetail", &args(&["B1"])).unwrap();
    assert!(String::from_utf8_lossy(&payload).contains("Ada"));
}

#[test]
fn student_argument_and_name_checks() {
    let storage = RedbRowStorage::open_in_memory().unwrap();
    let clock = FixedClock::new("t0");
    let host = Host::new(&storage, &clock);
    let ledger = student::ledger();
    ledger.initialize(host, &[]).unwrap();

    let err = ledger
        .invoke(host, "addDetail", &args(&["B1", "Ada", "1"]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("expects 5"));

    // Names are case-sensitive.
    let err = ledger.query(host, "GetDetail", &args(&["B1"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = ledger.query(host, "getDetail", &args(&["missing"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(ledger.dispatch().names(Namespace::Mutating), ["addDetail"]);
    assert_eq!(ledger.dispatch().names(Namespace::ReadOnly), ["getDetail"]);
}
