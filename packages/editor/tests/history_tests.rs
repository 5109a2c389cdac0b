//! Undo/redo behavior across whole editing flows.

use mosaic_editor::{
    Catalog, ChildTemplate, ComponentDefinition, ComponentSource, ConfigMap, ConfigValue,
    DefinitionRef, EditSession, InsertLocation, SelectionSource,
};

fn text_definition(version: &str) -> ComponentDefinition {
    ComponentDefinition {
        name: "Text".to_string(),
        description: "A simple text component".to_string(),
        component_type: "text".to_string(),
        version: version.to_string(),
        icon: "T".to_string(),
        hide_from_ui: false,
        default_config: ConfigMap::from([("text".to_string(), ConfigValue::from("Hello World"))]),
        default_children: Vec::new(),
        config_fields: Default::default(),
    }
}

fn container_definition() -> ComponentDefinition {
    ComponentDefinition {
        name: "Container".to_string(),
        description: "Groups children".to_string(),
        component_type: "container".to_string(),
        version: "1.0.0".to_string(),
        icon: "C".to_string(),
        hide_from_ui: false,
        default_config: ConfigMap::new(),
        default_children: vec![ChildTemplate {
            component_type: Some("text".to_string()),
            ..Default::default()
        }],
        config_fields: Default::default(),
    }
}

fn session() -> EditSession {
    EditSession::new(Catalog::from_definitions(vec![
        text_definition("1.0.0"),
        container_definition(),
    ]))
}

fn add_text(session: &mut EditSession) -> String {
    session
        .add_component(
            ComponentSource::Definition(DefinitionRef::new("text")),
            InsertLocation::root(isize::MAX),
            true,
        )
        .unwrap()
}

#[test]
fn undo_and_redo_replay_the_exact_states() {
    let mut session = session();
    let f0 = session.document();

    let id = add_text(&mut session);
    let f1 = session.document();

    session.delete_component(&id, true).unwrap();
    let f2 = session.document();
    assert!(f2.is_empty());

    assert!(session.undo().unwrap());
    assert_eq!(session.document(), f1);

    assert!(session.undo().unwrap());
    assert_eq!(session.document(), f0);

    assert!(session.redo().unwrap());
    assert_eq!(session.document(), f1);

    assert!(session.redo().unwrap());
    assert_eq!(session.document(), f2);
    assert!(!session.can_redo());
}

#[test]
fn undo_at_the_beginning_reports_false() {
    let mut session = session();

    assert!(!session.undo().unwrap());
    assert!(!session.redo().unwrap());

    add_text(&mut session);
    assert!(session.undo().unwrap());
    assert!(!session.undo().unwrap(), "already back at the empty state");
}

#[test]
fn a_new_commit_after_undo_truncates_the_redo_branch() {
    let mut session = session();

    add_text(&mut session);
    let doomed = add_text(&mut session);

    assert!(session.undo().unwrap());
    assert!(session.can_redo());

    let replacement = add_text(&mut session);

    assert!(!session.can_redo(), "the undone state must be unreachable");
    let ids: Vec<String> = session.document().iter().map(|c| c.id.clone()).collect();
    assert!(ids.contains(&replacement));
    assert!(!ids.contains(&doomed));
}

#[test]
fn suppressed_commits_leave_no_snapshot() {
    let mut session = session();

    session
        .add_component(
            ComponentSource::Definition(DefinitionRef::new("text")),
            InsertLocation::root(0),
            false,
        )
        .unwrap();

    assert_eq!(session.document().len(), 1);
    assert!(!session.can_undo());
}

#[test]
fn one_move_undoes_in_one_step() {
    let mut session = session();

    let first = add_text(&mut session);
    let second = add_text(&mut session);
    let before_move = session.document();

    session
        .move_component(&first, InsertLocation::after(&second), true)
        .unwrap();

    assert!(session.undo().unwrap());
    assert_eq!(
        session.document(),
        before_move,
        "a single undo must reverse the whole move"
    );
}

#[test]
fn undo_clears_selection_redo_does_not() {
    let mut session = session();

    let id = add_text(&mut session);
    session.set_active_component(Some(id.clone()), Some(SelectionSource::Canvas));

    assert!(session.undo().unwrap());
    assert_eq!(session.active_component().component_id, None);

    session.set_active_component(Some("whatever".to_string()), Some(SelectionSource::Tree));
    assert!(session.redo().unwrap());
    assert_eq!(
        session.active_component().component_id.as_deref(),
        Some("whatever")
    );
}

#[test]
fn undo_restores_deleted_subtrees_deeply() {
    let mut session = session();

    let container = session
        .add_component(
            ComponentSource::Definition(DefinitionRef::new("container")),
            InsertLocation::root(0),
            true,
        )
        .unwrap();
    let with_children = session.document();

    session.delete_component(&container, true).unwrap();
    assert!(session.document().is_empty());

    assert!(session.undo().unwrap());
    assert_eq!(session.document(), with_children);
    // The restored tree is addressable again under its original ids.
    assert_eq!(
        session.component(&container).unwrap().children.len(),
        1
    );
}

#[test]
fn clear_history_drops_both_directions() {
    let mut session = session();

    add_text(&mut session);
    add_text(&mut session);
    assert!(session.undo().unwrap());
    assert!(session.can_redo());

    session.clear_history();

    assert!(!session.can_undo());
    assert!(!session.can_redo());
    // The live document is untouched by clearing history.
    assert_eq!(session.document().len(), 1);
}

#[test]
fn bounded_history_sheds_oldest_entries() {
    let mut session = EditSession::with_max_history(
        Catalog::from_definitions(vec![text_definition("1.0.0")]),
        3,
    );

    for _ in 0..5 {
        session
            .add_component(
                ComponentSource::Definition(DefinitionRef::new("text")),
                InsertLocation::root(isize::MAX),
                true,
            )
            .unwrap();
    }

    // Only two undo steps survive a depth of three.
    assert!(session.undo().unwrap());
    assert!(session.undo().unwrap());
    assert!(!session.undo().unwrap());
    assert_eq!(session.document().len(), 3);
}
