//! Student records: one row per banner id with a name and three marks.

use ledger_engine::{Context, DispatchRegistry, Ledger, LedgerResult};
use ledger_table::SchemaRegistry;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{encode, lookup};

pub const STUDENT_TABLE: &str = "Student_Record";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "BannerID")]
    pub banner_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Subject1")]
    pub subject1: String,
    #[serde(rename = "Subject2")]
    pub subject2: String,
    #[serde(rename = "Subject3")]
    pub subject3: String,
}

pub fn schemas() -> SchemaRegistry {
    SchemaRegistry::new().register(STUDENT_TABLE, 1)
}

pub fn dispatch() -> DispatchRegistry {
    DispatchRegistry::new()
        .mutating("addDetail", add_detail)
        .read_only("getDetail", lookup(STUDENT_TABLE))
}

pub fn ledger() -> Ledger {
    Ledger::new("student", schemas(), dispatch())
}

/// `addDetail(bannerId, name, mark1, mark2, mark3)`; answers with a
/// human-readable confirmation rather than the stored payload.
fn add_detail(ctx: &Context<'_>, args: &[String]) -> LedgerResult<Vec<u8>> {
    ctx.expect_args(args, 5)?;
    let record = StudentRecord {
        banner_id: args[0].clone(),
        name: args[1].clone(),
        subject1: args[2].clone(),
        subject2: args[3].clone(),
        subject3: args[4].clone(),
    };

    let payload = encode(ctx, &record)?;
    ctx.tables().insert_row(STUDENT_TABLE, &[&record.banner_id], &payload)?;
    info!(banner_id = %record.banner_id, "student record added");

    Ok(format!(
        "Record successfully added\nBannerID : {} Name : {} Marks1 : {} Marks2 : {} Marks3 : {}",
        record.banner_id, record.name, record.subject1, record.subject2, record.subject3
    )
    .into_bytes())
}
