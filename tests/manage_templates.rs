//! Integration tests for the template management view.
//!
//! These tests drive ManageTemplates against the mock executor and check
//! both the persisted state and the notices a user would see.

use chrono::Utc;

use templatework::core::model::{Container, Template};
use templatework::core::types::{BlockName, ContainerId, TemplateName};
use templatework::engine::command::{Actor, CommandKind};
use templatework::engine::mock::{FailOn, MockExecutor};
use templatework::manage::{ManageTemplates, SaveAction, NO_TEMPLATES_NOTICE};
use templatework::ui::notify::{RecordingSink, Severity};

// =============================================================================
// Test Helpers
// =============================================================================

type Page = ManageTemplates<MockExecutor, MockExecutor, RecordingSink>;

fn template(name: &str) -> Template {
    Template::new(
        TemplateName::new(name).unwrap(),
        ContainerId::new(0),
        Utc::now(),
    )
}

fn citation() -> Vec<BlockName> {
    vec![BlockName::new("citation").unwrap()]
}

fn open(executor: &MockExecutor, sink: &RecordingSink, id: u64) -> Page {
    ManageTemplates::open(
        executor.clone(),
        executor.clone(),
        sink.clone(),
        Actor::new("curator"),
        ContainerId::new(id),
    )
    .unwrap()
}

fn names(page: &Page) -> Vec<String> {
    page.templates()
        .iter()
        .map(|v| v.template.name.as_str().to_string())
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn root_container_default_lifecycle() {
    let t1 = template("T1");
    let t2 = template("T2");
    let t1_id = t1.id;
    let executor = MockExecutor::with_containers(vec![Container::new(ContainerId::new(1), "A")
        .with_template(t1)
        .with_template(t2)]);
    let sink = RecordingSink::new();
    let mut page = open(&executor, &sink, 1);

    assert_eq!(names(&page), ["T1", "T2"]);
    assert!(page.default_template().is_none());

    assert!(page.make_default(t1_id));
    assert_eq!(page.default_template().map(|t| t.id), Some(t1_id));
    assert_eq!(
        executor.container(ContainerId::new(1)).unwrap().default_template,
        Some(t1_id)
    );

    assert!(page.unselect_default());
    assert!(page.default_template().is_none());
    assert_eq!(
        executor.container(ContainerId::new(1)).unwrap().default_template,
        None
    );
    assert_eq!(
        sink.last().unwrap().text,
        SaveAction::UnselectDefault.success_message()
    );
    assert!(!sink.has_failure());
}

#[test]
fn inheritance_round_trip_adopts_and_clears_default() {
    let t1 = template("T1");
    let t1_id = t1.id;
    let mut parent = Container::new(ContainerId::new(1), "P")
        .with_blocks(citation())
        .with_template(t1);
    parent.default_template = Some(t1_id);
    let child = Container::new(ContainerId::new(2), "C")
        .with_owner(ContainerId::new(1))
        .with_blocks(citation())
        .with_template(template("T2"));
    let executor = MockExecutor::with_containers(vec![parent, child]);
    let sink = RecordingSink::new();
    let mut page = open(&executor, &sink, 2);

    assert!(page.inherit_allowed());
    assert_eq!(names(&page), ["T2"]);

    assert!(page.update_templates_root(true));
    assert_eq!(names(&page), ["T1", "T2"]);
    assert!(page
        .templates()
        .iter()
        .all(|v| v.display_owner == ContainerId::new(2)));
    assert_eq!(page.default_template().map(|t| t.id), Some(t1_id));

    // The parent's template keeps its persisted owner.
    let stored_parent = executor.container(ContainerId::new(1)).unwrap();
    assert_eq!(stored_parent.templates[0].owner, ContainerId::new(1));

    assert!(page.update_templates_root(false));
    assert_eq!(names(&page), ["T2"]);
    assert!(page.default_template().is_none());

    let stored = executor.container(ContainerId::new(2)).unwrap();
    assert!(!stored.inherit_templates);
    assert_eq!(stored.default_template, None);
}

#[test]
fn grandparent_default_is_not_passed_down() {
    let tg = template("TG");
    let tg_id = tg.id;
    let mut grandparent = Container::new(ContainerId::new(1), "G")
        .with_blocks(citation())
        .with_template(tg);
    grandparent.default_template = Some(tg_id);
    let parent = Container::new(ContainerId::new(2), "P")
        .with_owner(ContainerId::new(1))
        .with_blocks(citation())
        .with_template(template("TP"));
    let child = Container::new(ContainerId::new(3), "C")
        .with_owner(ContainerId::new(2))
        .with_blocks(citation())
        .with_template(template("TC"));
    let executor = MockExecutor::with_containers(vec![grandparent, parent, child]);
    let sink = RecordingSink::new();

    let mut middle = open(&executor, &sink, 2);
    assert!(middle.update_templates_root(true));
    assert_eq!(middle.default_template().map(|t| t.id), Some(tg_id));

    let mut page = open(&executor, &sink, 3);
    assert!(page.update_templates_root(true));
    assert_eq!(names(&page), ["TP", "TC"]);
    assert!(page.default_template().is_none());
    assert_eq!(
        executor.container(ContainerId::new(3)).unwrap().default_template,
        None
    );

    assert!(middle.update_templates_root(false));
    assert!(middle.default_template().is_none());

    sink.clear();
    assert!(page.save());
    assert!(!sink.has_failure());
    assert_eq!(
        executor.container(ContainerId::new(3)).unwrap().default_template,
        None
    );
}

#[test]
fn copy_of_inherited_template_is_owned_here() {
    let t1 = template("Survey");
    let t1_id = t1.id;
    let parent = Container::new(ContainerId::new(1), "P")
        .with_blocks(citation())
        .with_template(t1);
    let mut child = Container::new(ContainerId::new(2), "C")
        .with_owner(ContainerId::new(1))
        .with_blocks(citation());
    child.inherit_templates = true;
    let executor = MockExecutor::with_containers(vec![parent, child]);
    let sink = RecordingSink::new();
    let mut page = open(&executor, &sink, 2);

    let copy = page.clone_template(t1_id).unwrap();
    assert_eq!(copy.name.as_str(), "Copy of Survey");
    assert_eq!(copy.owner, ContainerId::new(2));
    assert_eq!(copy.usage_count, 0);
    assert_eq!(names(&page), ["Survey", "Copy of Survey"]);

    let stored = executor.container(ContainerId::new(2)).unwrap();
    assert_eq!(stored.templates.len(), 1);
    assert_eq!(stored.templates[0].id, copy.id);
    assert_eq!(
        executor.container(ContainerId::new(1)).unwrap().templates.len(),
        1
    );
}

#[test]
fn delete_default_template_clears_default() {
    let t1 = template("T1");
    let t1_id = t1.id;
    let mut container = Container::new(ContainerId::new(1), "A").with_template(t1);
    container.default_template = Some(t1_id);
    let executor = MockExecutor::with_containers(vec![container]);
    let sink = RecordingSink::new();
    let mut page = open(&executor, &sink, 1);

    assert!(page.select_template(t1_id));
    assert!(page.delete_selected());
    assert!(page.templates().is_empty());
    assert!(page.default_template().is_none());
    assert!(page.selected().is_none());

    let stored = executor.container(ContainerId::new(1)).unwrap();
    assert!(stored.templates.is_empty());
    assert_eq!(stored.default_template, None);
}

#[test]
fn empty_container_announces_no_templates() {
    let executor = MockExecutor::with_containers(vec![Container::new(ContainerId::new(1), "A")]);
    let sink = RecordingSink::new();
    let _page = open(&executor, &sink, 1);

    let notice = sink.last().unwrap();
    assert_eq!(notice.severity, Severity::Info);
    assert_eq!(notice.text, NO_TEMPLATES_NOTICE);
}

#[test]
fn commands_carry_the_actor() {
    let t1 = template("T1");
    let t1_id = t1.id;
    let executor =
        MockExecutor::with_containers(vec![Container::new(ContainerId::new(1), "A").with_template(t1)]);
    let sink = RecordingSink::new();
    let mut page = open(&executor, &sink, 1);

    page.make_default(t1_id);

    let ops = executor.operations();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].actor.name(), "curator");
    assert!(ops[0].succeeded);
}

// =============================================================================
// Failure Handling
// =============================================================================

mod failures {
    use super::*;

    #[test]
    fn failed_default_update_keeps_view() {
        let t1 = template("T1");
        let t1_id = t1.id;
        let executor = MockExecutor::with_containers(vec![
            Container::new(ContainerId::new(1), "A").with_template(t1),
        ])
        .fail_on(FailOn::new(CommandKind::UpdateContainer, "permission denied"));
        let sink = RecordingSink::new();
        let mut page = open(&executor, &sink, 1);

        assert!(!page.make_default(t1_id));
        assert!(page.default_template().is_none());

        let notice = sink.last().unwrap();
        assert_eq!(notice.severity, Severity::Fatal);
        assert_eq!(notice.text, SaveAction::MakeDefault.failure_message());
    }

    #[test]
    fn failed_delete_keeps_template_listed() {
        let t1 = template("T1");
        let t1_id = t1.id;
        let executor = MockExecutor::with_containers(vec![
            Container::new(ContainerId::new(1), "A").with_template(t1),
        ])
        .fail_on(FailOn::new(CommandKind::DeleteTemplate, "in use"));
        let sink = RecordingSink::new();
        let mut page = open(&executor, &sink, 1);

        assert!(page.select_template(t1_id));
        assert!(!page.delete_selected());
        assert_eq!(names(&page), ["T1"]);
        assert_eq!(page.selected(), Some(t1_id));
        assert_eq!(
            sink.last().unwrap().text,
            SaveAction::Delete.failure_message()
        );

        // The user can retry once the executor recovers.
        executor.clear_fail_on();
        assert!(page.delete_selected());
        assert!(page.templates().is_empty());
    }

    #[test]
    fn failed_copy_adds_nothing() {
        let t1 = template("T1");
        let t1_id = t1.id;
        let executor = MockExecutor::with_containers(vec![
            Container::new(ContainerId::new(1), "A").with_template(t1),
        ])
        .fail_on(FailOn::new(CommandKind::CreateTemplate, "quota exceeded"));
        let sink = RecordingSink::new();
        let mut page = open(&executor, &sink, 1);

        assert!(page.clone_template(t1_id).is_none());
        assert_eq!(names(&page), ["T1"]);
        assert_eq!(
            sink.last().unwrap().text,
            SaveAction::Copy.failure_message()
        );
    }

    #[test]
    fn failed_inheritance_update_keeps_flag_and_default() {
        let t1 = template("T1");
        let t1_id = t1.id;
        let mut parent = Container::new(ContainerId::new(1), "P")
            .with_blocks(citation())
            .with_template(t1);
        parent.default_template = Some(t1_id);
        let child = Container::new(ContainerId::new(2), "C")
            .with_owner(ContainerId::new(1))
            .with_blocks(citation());
        let executor = MockExecutor::with_containers(vec![parent, child])
            .fail_on(FailOn::new(CommandKind::UpdateInheritanceRoot, "locked"));
        let sink = RecordingSink::new();
        let mut page = open(&executor, &sink, 2);

        assert!(!page.update_templates_root(true));
        assert!(!page.inherit_value());
        assert!(page.default_template().is_none());
        assert!(page.templates().is_empty());
        assert_eq!(
            sink.last().unwrap().text,
            SaveAction::InheritanceRoot.failure_message()
        );
    }

    #[test]
    fn ineligible_container_cannot_inherit() {
        let parent = Container::new(ContainerId::new(1), "P").with_blocks(citation());
        let child = Container::new(ContainerId::new(2), "C").with_owner(ContainerId::new(1));
        let executor = MockExecutor::with_containers(vec![parent, child]);
        let sink = RecordingSink::new();
        let mut page = open(&executor, &sink, 2);

        assert!(!page.inherit_allowed());
        assert!(!page.update_templates_root(true));
        assert!(executor.operations().is_empty());
        assert_eq!(sink.last().unwrap().severity, Severity::Warn);
    }
}
