use std::env;

use anyhow::{Context, Result};
use itertools::Itertools;
use joinplan_repr::{
    BuildSide, ColumnHandle, ColumnType, JoinHandle, JoinHandleMemo, JoinInput, JoinType,
    TableHandle,
};
use tracing::{info, Level};

pub fn main() -> Result<()> {
    let level = match env::var("JOINPLAN_LOG") {
        Ok(level) => level
            .parse::<Level>()
            .with_context(|| format!("invalid JOINPLAN_LOG level `{level}`"))?,
        Err(_) => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .init();

    // The plan: orders join customers on orders.cust_id = customers.id
    let orders = TableHandle::new("pixels", "tpch", "orders");
    let customers = TableHandle::new("pixels", "tpch", "customers");
    let column = |table: &str, name: &str, typ: ColumnType, ordinal: u32| {
        ColumnHandle::new("pixels", table, name, typ, ordinal)
    };
    let handle = JoinHandle::new(
        JoinInput::new(
            orders,
            column("orders", "cust_id", ColumnType::Long, 1),
            vec![
                column("orders", "id", ColumnType::Long, 0),
                column("orders", "total", ColumnType::Decimal, 2),
            ],
        ),
        JoinInput::new(
            customers,
            column("customers", "id", ColumnType::Long, 0),
            vec![column("customers", "name", ColumnType::Utf8String, 1)],
        ),
        false,
        BuildSide::Right,
        JoinType::Inner,
    );
    println!("{}", handle.explain_to_string());

    let payload = handle.to_json_pretty()?;
    println!("{}", payload);
    let received = JoinHandle::from_json(&payload).context("worker failed to decode the join")?;
    info!(
        event = "received",
        build = %received.build_input().table,
        probe = %received.probe_input().table,
        output = %received.output_columns().join(", ")
    );

    let memo = JoinHandleMemo::new();
    let (plan_id, _) = memo.add_or_get(handle.clone());
    let (again, added) = memo.add_or_get(received.with_build_side(BuildSide::Left));
    info!(event = "dedup", plan_id = %plan_id, again = %again, added = added);
    if let Some(commuted) = handle.commute() {
        memo.add_or_get(commuted);
    }
    memo.dump();
    Ok(())
}
