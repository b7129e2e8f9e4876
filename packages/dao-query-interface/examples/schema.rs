use std::env::current_dir;
use std::fs::create_dir_all;

use cosmwasm_schema::{export_schema, remove_schemas, schema_for};
use dao_query_interface::{PageLimits, QueryMsg, RangeOrder};

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(QueryMsg), &out_dir);
    export_schema(&schema_for!(RangeOrder), &out_dir);
    export_schema(&schema_for!(PageLimits), &out_dir);
}
