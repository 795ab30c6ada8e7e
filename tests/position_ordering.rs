use contribution_merge::config::MergeConfig;
use contribution_merge::descriptor::ContributionDescriptor;
use contribution_merge::merge::{
    resolve_index, ContributionMerger, ElementBuilder, PositionDirective,
};
use contribution_merge::model::{
    CommandRegistry, ContainerKey, ContainerSet, ControlRegistry, ElementData, ModelElement,
};
use contribution_merge::types::{Contribution, ContributionKind, OriginKey};

fn record(id: &str) -> Contribution {
    let mut contribution = Contribution::new(
        ContributionKind::Menu,
        "edit",
        "after=additions",
        OriginKey::new(id, "menu:edit"),
    );
    contribution.element_id = Some(id.to_string());
    contribution
}

fn separator(id: &str) -> ModelElement {
    ModelElement::MenuSeparator(ElementData::new(Some(id)))
}

fn commands_at(location: &str, ids: &[&str]) -> ContributionDescriptor {
    ids.iter().fold(ContributionDescriptor::addition(location), |root, id| {
        root.with_child(ContributionDescriptor::command(*id, format!("cmd.{id}")))
    })
}

#[test]
fn directive_against_contribution_siblings() {
    let siblings = vec![record("A"), record("B"), record("C")];

    let before_b = PositionDirective::parse("before=B").unwrap();
    assert_eq!(resolve_index(&siblings, &before_b), 1);

    let missing = PositionDirective::parse("after=nope").unwrap();
    assert_eq!(resolve_index(&siblings, &missing), siblings.len());
}

#[test]
fn contributions_land_in_order_inside_their_container() {
    let commands = CommandRegistry::new();
    let controls = ControlRegistry::new();
    let mut merger = ContributionMerger::new(
        MergeConfig::v0(),
        ElementBuilder::new(&commands, &controls),
    );

    let descriptors = vec![
        commands_at("menu:file", &["a1", "a2"]),
        commands_at("menu:file", &["b1"]),
        commands_at("menu:file?before=top", &["c1"]),
        commands_at("menu:file?after=ghost", &["d1"]),
        commands_at("menu:file?endof=top", &["e1"]),
    ];
    merger.merge_all(&descriptors).unwrap();

    let mut containers = ContainerSet::new();
    {
        let file = containers.container_mut(ContainerKey::new(ContributionKind::Menu, "file"));
        file.push(separator("top"));
        file.push(separator("additions"));
        file.push(separator("bottom"));
    }
    containers.apply_all(merger.into_output());

    let file = containers
        .get(ContributionKind::Menu, "file")
        .expect("file menu exists");
    let ids: Vec<&str> = file.ids().into_iter().flatten().collect();
    assert_eq!(
        ids,
        vec!["c1", "top", "e1", "additions", "a1", "a2", "b1", "bottom", "d1"]
    );
}

#[test]
fn unknown_targets_get_placeholder_containers_per_namespace() {
    let commands = CommandRegistry::new();
    let controls = ControlRegistry::new();
    let mut merger = ContributionMerger::new(
        MergeConfig::v0(),
        ElementBuilder::new(&commands, &controls),
    );

    let descriptors = vec![
        commands_at("menu:shared.id", &["in.menu"]),
        commands_at("toolbar:shared.id", &["in.toolbar"]),
    ];
    merger.merge_all(&descriptors).unwrap();

    let mut containers = ContainerSet::new();
    containers.apply_all(merger.into_output());
    assert_eq!(containers.len(), 2);

    let menu = containers.get(ContributionKind::Menu, "shared.id").unwrap();
    let toolbar = containers.get(ContributionKind::ToolBar, "shared.id").unwrap();
    assert_eq!(menu.ids(), vec![Some("in.menu")]);
    assert_eq!(toolbar.ids(), vec![Some("in.toolbar")]);
    assert!(matches!(menu.children().next(), Some(ModelElement::MenuItem(_))));
    assert!(matches!(toolbar.children().next(), Some(ModelElement::ToolItem(_))));
}

#[test]
fn trim_toolbars_are_filled_by_their_toolbar_records() {
    let commands = CommandRegistry::new();
    let controls = ControlRegistry::new();
    let mut merger = ContributionMerger::new(
        MergeConfig::v0(),
        ElementBuilder::new(&commands, &controls),
    );

    let root = ContributionDescriptor::addition("toolbar:org.eclipse.ui.trim.status")
        .with_child(
            ContributionDescriptor::toolbar("status.tools")
                .with_child(ContributionDescriptor::command("status.ping", "cmd.ping")),
        );
    merger.merge(&root).unwrap();

    let mut containers = ContainerSet::new();
    containers.apply_all(merger.into_output());

    let status = containers
        .get(ContributionKind::Trim, "org.eclipse.ui.trim.status")
        .unwrap();
    assert_eq!(status.ids(), vec![Some("status.tools")]);

    let tools = containers.get(ContributionKind::ToolBar, "status.tools").unwrap();
    assert_eq!(tools.ids(), vec![Some("status.ping")]);
}
