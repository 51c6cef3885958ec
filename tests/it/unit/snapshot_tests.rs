//! Snapshot tests using the insta crate.
//!
//! These pin the serialized shapes the persistence layer and replay scripts
//! depend on. To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::cells;
use floorgrid::outline::extract;
use floorgrid::script::{Script, Step};
use floorgrid::types::GridBounds;
use floorgrid::{Region, RegionId};

#[test]
fn snapshot_region_record() {
    let region = Region::new(RegionId(7), "Closet", cells(&[(3, 1), (3, 2)]), GridBounds::new(8)).unwrap();
    insta::assert_json_snapshot!(region.record(), @r#"
    {
      "id": 7,
      "name": "Closet",
      "cells": [
        {
          "x": 3,
          "y": 1
        },
        {
          "x": 3,
          "y": 2
        }
      ]
    }
    "#);
}

#[test]
fn snapshot_single_cell_outline() {
    let outline = extract(&cells(&[(2, 5)])).unwrap();
    insta::assert_json_snapshot!(outline, @r#"
    {
      "chains": [
        [
          {
            "x": 2,
            "y": 5
          },
          {
            "x": 3,
            "y": 5
          },
          {
            "x": 3,
            "y": 6
          },
          {
            "x": 2,
            "y": 6
          }
        ]
      ]
    }
    "#);
}

#[test]
fn snapshot_script_steps() {
    let script = Script::new(vec![
        Step::SetTool { tool: "cleanup".into() },
        Step::DeleteRegion { id: RegionId(2) },
        Step::Undo,
    ]);
    insta::assert_json_snapshot!(script, @r#"
    [
      {
        "op": "set_tool",
        "tool": "cleanup"
      },
      {
        "op": "delete_region",
        "id": 2
      },
      {
        "op": "undo"
      }
    ]
    "#);
}
