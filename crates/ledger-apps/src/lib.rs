//! ledger-apps — business façades over the ledger engine.
//!
//! - **catalogue**: inventory items and purchase records
//! - **student**: student detail records with three marks
//!
//! Each façade is a [`Ledger`] assembled from a schema registry and a
//! dispatch registry. Handlers are thin: check arguments, build a JSON
//! record, insert or look it up by key.

mod common;

pub mod catalogue;
pub mod student;

use ledger_core::AppKind;
use ledger_engine::Ledger;

/// Build the ledger for the configured application.
pub fn ledger_for(app: AppKind) -> Ledger {
    match app {
        AppKind::Catalogue => catalogue::ledger(),
        AppKind::Student => student::ledger(),
    }
}
