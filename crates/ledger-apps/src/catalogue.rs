//! Product catalogue: items on offer and the purchases made against them.
//!
//! | Namespace | Function             | Arguments                                      |
//! |-----------|----------------------|------------------------------------------------|
//! | invoke    | `AddItem`            | item id, name, description, price, quantity    |
//! | invoke    | `BuyItem`            | purchase id, item id, buyer id, quantity[, cost] |
//! | query     | `GetItem`            | item id                                        |
//! | query     | `GetPurchase`        | purchase id                                    |
//! | query     | `GetPurchasebyBuyer` | purchase id                                    |
//! | query     | `GetPurchaselog`     | purchase id                                    |
//! | query     | `GetItemlog`         | purchase id                                    |
//!
//! Purchases are keyed by their own id so that buying the same item twice
//! records two rows. There is no index by buyer or by item:
//! `GetPurchasebyBuyer`, `GetPurchaselog` and `GetItemlog` are all exact
//! lookups on the purchase id.

use ledger_engine::{Context, DispatchRegistry, Ledger, LedgerResult};
use ledger_table::SchemaRegistry;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{encode, lookup};

pub const ITEM_TABLE: &str = "Item";
pub const PURCHASE_TABLE: &str = "Purchase";

/// An item available in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "ItemID")]
    pub item_id: String,
    #[serde(rename = "ItemName")]
    pub item_name: String,
    #[serde(rename = "ItemDesc")]
    pub item_desc: String,
    #[serde(rename = "ItemPrice")]
    pub item_price: String,
    #[serde(rename = "ItemQuantity")]
    pub item_quantity: String,
}

/// One purchase of an item by a buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(rename = "PurchaseID")]
    pub purchase_id: String,
    #[serde(rename = "ItemID")]
    pub item_id: String,
    #[serde(rename = "BuyerID")]
    pub buyer_id: String,
    #[serde(rename = "ItemQuantity")]
    pub item_quantity: String,
    /// Total price, when the caller supplies it.
    #[serde(rename = "ItemCost", default, skip_serializing_if = "Option::is_none")]
    pub item_cost: Option<String>,
    /// Server-side time the purchase was recorded.
    #[serde(rename = "Date")]
    pub date: String,
}

pub fn schemas() -> SchemaRegistry {
    SchemaRegistry::new()
        .register(ITEM_TABLE, 1)
        .register(PURCHASE_TABLE, 1)
}

pub fn dispatch() -> DispatchRegistry {
    DispatchRegistry::new()
        .mutating("AddItem", add_item)
        .mutating("BuyItem", buy_item)
        .read_only("GetItem", lookup(ITEM_TABLE))
        .read_only("GetPurchase", lookup(PURCHASE_TABLE))
        .read_only("GetPurchasebyBuyer", lookup(PURCHASE_TABLE))
        .read_only("GetPurchaselog", lookup(PURCHASE_TABLE))
        .read_only("GetItemlog", lookup(PURCHASE_TABLE))
}

pub fn ledger() -> Ledger {
    Ledger::new("catalogue", schemas(), dispatch())
}

fn add_item(ctx: &Context<'_>, args: &[String]) -> LedgerResult<Vec<u8>> {
    ctx.expect_args(args, 5)?;
    let record = ItemRecord {
        item_id: args[0].clone(),
        item_name: args[1].clone(),
        item_desc: args[2].clone(),
        item_price: args[3].clone(),
        item_quantity: args[4].clone(),
    };

    let payload = encode(ctx, &record)?;
    ctx.tables().insert_row(ITEM_TABLE, &[&record.item_id], &payload)?;
    info!(item_id = %record.item_id, name = %record.item_name, "item added");
    Ok(payload)
}

fn buy_item(ctx: &Context<'_>, args: &[String]) -> LedgerResult<Vec<u8>> {
    ctx.expect_args_between(args, 4, 5)?;
    let record = PurchaseRecord {
        purchase_id: args[0].clone(),
        item_id: args[1].clone(),
        buyer_id: args[2].clone(),
        item_quantity: args[3].clone(),
        item_cost: args.get(4).cloned(),
        date: ctx.now(),
    };

    let payload = encode(ctx, &record)?;
    ctx.tables().insert_row(PURCHASE_TABLE, &[&record.purchase_id], &payload)?;
    info!(
        purchase_id = %record.purchase_id,
        item_id = %record.item_id,
        buyer_id = %record.buyer_id,
        "purchase recorded"
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_engine::Namespace;

    #[test]
    fn registers_both_tables_with_single_keys() {
        let schemas = schemas();
        assert_eq!(schemas.key_arity(ITEM_TABLE), 1);
        assert_eq!(schemas.key_arity(PURCHASE_TABLE), 1);
        assert_eq!(schemas.len(), 2);
    }

    #[test]
    fn function_catalogue() {
        let dispatch = dispatch();
        assert_eq!(dispatch.names(Namespace::Mutating), ["AddItem", "BuyItem"]);
        assert_eq!(
            dispatch.names(Namespace::ReadOnly),
            ["GetItem", "GetItemlog", "GetPurchase", "GetPurchasebyBuyer", "GetPurchaselog"]
        );
    }

    #[test]
    fn purchase_without_cost_omits_the_field() {
        let record = PurchaseRecord {
            purchase_id: "P1".into(),
            item_id: "1000".into(),
            buyer_id: "B1".into(),
            item_quantity: "2".into(),
            item_cost: None,
            date: "2016-06-01T10:00:00Z".into(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("ItemCost"));
        assert_eq!(serde_json::from_str::<PurchaseRecord>(&json).unwrap(), record);
    }
}
