use contribution_merge::config::MergeConfig;
use contribution_merge::descriptor::ContributionDescriptor;
use contribution_merge::merge::{ContributionMerger, ElementBuilder};
use contribution_merge::model::{CommandRegistry, ControlRegistry};

// Pins the JSON shape handed to the renderer. Field order follows struct
// declaration order, so this doubles as a layout regression test.

fn normalize(json: &str) -> String {
    json.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn golden_popup_contribution() {
    let commands = CommandRegistry::new();
    let controls = ControlRegistry::new();
    let mut merger = ContributionMerger::new(
        MergeConfig::v0(),
        ElementBuilder::new(&commands, &controls),
    );

    let root = ContributionDescriptor::addition("popup:org.eclipse.ui.popup.any")
        .with_source("org.example.editor")
        .with_child(
            ContributionDescriptor::command("cmd.save", "cmd.save")
                .with_attribute("label", "Save")
                .with_source("org.example.editor"),
        );
    merger.merge(&root).unwrap();

    let json_str = serde_json::to_string_pretty(merger.output()).unwrap();

    const EXPECTED_JSON: &str = r#"{
      "menu": [
        {
          "kind": "menu",
          "parent_id": "popup",
          "position_in_parent": "after=additions",
          "tags": [
            "menuContribution:popup",
            "scheme:popup"
          ],
          "contributor_uri": "platform:/plugin/org.example.editor",
          "children": [
            {
              "type": "MenuItem",
              "element_id": "cmd.save",
              "label": "Save",
              "contributor_uri": "platform:/plugin/org.example.editor",
              "visible": true,
              "to_be_rendered": true,
              "command": {
                "id": "cmd.save",
                "name": "cmd.save"
              },
              "item_type": "push"
            }
          ]
        }
      ],
      "toolbar": [],
      "trim": []
    }"#;

    assert_eq!(
        normalize(&json_str),
        normalize(EXPECTED_JSON),
        "JSON structure mismatch against golden snapshot"
    );
}

#[test]
fn golden_trim_contribution() {
    let commands = CommandRegistry::new();
    let controls = ControlRegistry::new();
    let mut merger = ContributionMerger::new(
        MergeConfig::v0(),
        ElementBuilder::new(&commands, &controls),
    );

    let root = ContributionDescriptor::addition("toolbar:org.eclipse.ui.trim.vertical1?before=end")
        .with_id("side.tools")
        .with_child(
            ContributionDescriptor::toolbar("side.bar")
                .with_child(
                    ContributionDescriptor::command("side.zoom", "view.zoom")
                        .with_attribute("label", "Zoom")
                        .with_attribute("style", "radio"),
                )
                .with_child(ContributionDescriptor::separator("side.group", false)),
        );
    merger.merge(&root).unwrap();

    let json_str = serde_json::to_string(merger.output()).unwrap();

    const EXPECTED_JSON: &str = r#"{
      "menu": [],
      "toolbar": [
        {
          "element_id": "side.bar",
          "kind": "toolbar",
          "parent_id": "side.bar",
          "position_in_parent": "after=additions",
          "tags": ["scheme:toolbar"],
          "children": [
            {
              "type": "ToolItem",
              "element_id": "side.zoom",
              "label": "Zoom",
              "visible": true,
              "to_be_rendered": true,
              "command": { "id": "view.zoom", "name": "view.zoom" },
              "item_type": "radio"
            },
            {
              "type": "ToolSeparator",
              "element_id": "side.group",
              "tags": ["org.eclipse.jface.action.GroupMarker.GroupMarker(String)"],
              "visible": true,
              "to_be_rendered": false
            }
          ]
        }
      ],
      "trim": [
        {
          "element_id": "side.tools",
          "kind": "trim",
          "parent_id": "org.eclipse.ui.trim.vertical1",
          "position_in_parent": "before=end",
          "tags": ["scheme:toolbar"],
          "children": [
            {
              "type": "ToolBar",
              "element_id": "side.bar",
              "visible": true,
              "to_be_rendered": true
            }
          ]
        }
      ]
    }"#;

    assert_eq!(normalize(&json_str), normalize(EXPECTED_JSON));
}
