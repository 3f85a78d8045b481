//! Property-based tests for the template inheritance resolver.
//!
//! These tests use proptest to verify the effective-list, eligibility and
//! inheritance-flag invariants across randomly generated containers.

use std::collections::BTreeSet;

use chrono::Utc;
use proptest::prelude::*;

use templatework::core::model::{Container, Lineage, Template};
use templatework::core::types::{BlockName, ContainerId, TemplateId, TemplateName};
use templatework::resolver::TemplateInheritanceResolver;

const PARENT: u64 = 1;
const CHILD: u64 = 2;

fn template(name: &str, owner: u64) -> Template {
    Template::new(
        TemplateName::new(name).unwrap(),
        ContainerId::new(owner),
        Utc::now(),
    )
}

fn templates(count: usize, owner: u64) -> Vec<Template> {
    (0..count)
        .map(|i| template(&format!("T{}-{}", owner, i), owner))
        .collect()
}

fn block_set(names: &BTreeSet<String>) -> Vec<BlockName> {
    names.iter().map(|n| BlockName::new(n.as_str()).unwrap()).collect()
}

/// Strategy for generating metadata-block name sets.
fn blocks() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(
        prop::sample::select(vec![
            "citation".to_string(),
            "geospatial".to_string(),
            "socialscience".to_string(),
            "astrophysics".to_string(),
            "biomedical".to_string(),
        ]),
        0..5,
    )
}

fn parent(owned: Vec<Template>, default: Option<TemplateId>) -> Container {
    let mut parent = owned
        .into_iter()
        .fold(Container::new(ContainerId::new(PARENT), "parent"), Container::with_template);
    parent.default_template = default;
    parent
}

fn child(owned: Vec<Template>, inherit: bool, default: Option<TemplateId>) -> Container {
    let mut child = owned.into_iter().fold(
        Container::new(ContainerId::new(CHILD), "child").with_owner(ContainerId::new(PARENT)),
        Container::with_template,
    );
    child.inherit_templates = inherit;
    child.default_template = default;
    child
}

proptest! {
    /// Without inheritance only the container's own templates are listed, in order.
    #[test]
    fn not_inheriting_lists_exactly_own(own in 0usize..6, inherited in 0usize..6) {
        let own = templates(own, CHILD);
        let expected: Vec<_> = own.iter().map(|t| t.id).collect();
        let lineage = Lineage::with_parent(
            child(own, false, None),
            parent(templates(inherited, PARENT), None),
        );

        let views = TemplateInheritanceResolver::effective_list(&lineage);
        let got: Vec<_> = views.iter().map(|v| v.id()).collect();
        prop_assert_eq!(got, expected);
    }

    /// With inheritance the parent's templates come first, all displayed under the child.
    #[test]
    fn inheriting_prepends_parent(own in 0usize..6, inherited in 0usize..6) {
        let own = templates(own, CHILD);
        let parents = templates(inherited, PARENT);
        let expected: Vec<_> = parents.iter().chain(own.iter()).map(|t| t.id).collect();
        let lineage = Lineage::with_parent(child(own, true, None), parent(parents, None));

        let views = TemplateInheritanceResolver::effective_list(&lineage);
        let got: Vec<_> = views.iter().map(|v| v.id()).collect();
        prop_assert_eq!(got, expected);
        prop_assert!(views.iter().all(|v| v.display_owner == ContainerId::new(CHILD)));
        prop_assert_eq!(views.iter().filter(|v| v.inherited).count(), inherited);
    }

    /// Projection never rewrites a parent template's persisted owner.
    #[test]
    fn projection_keeps_persisted_owner(inherited in 1usize..6) {
        let lineage = Lineage::with_parent(
            child(Vec::new(), true, None),
            parent(templates(inherited, PARENT), None),
        );

        let views = TemplateInheritanceResolver::effective_list(&lineage);
        prop_assert!(views.iter().all(|v| v.template.owner == ContainerId::new(PARENT)));
    }

    /// Eligibility is exact set equality with the parent's blocks.
    #[test]
    fn eligibility_is_set_equality(mine in blocks(), theirs in blocks()) {
        let lineage = Lineage::with_parent(
            child(Vec::new(), false, None).with_blocks(block_set(&mine)),
            parent(Vec::new(), None).with_blocks(block_set(&theirs)),
        );

        prop_assert_eq!(
            TemplateInheritanceResolver::is_inheritance_eligible(&lineage),
            mine == theirs
        );
    }

    /// A root container is never eligible.
    #[test]
    fn root_never_eligible(mine in blocks()) {
        let lineage = Lineage::root(
            Container::new(ContainerId::new(PARENT), "root").with_blocks(block_set(&mine)),
        );
        prop_assert!(!TemplateInheritanceResolver::is_inheritance_eligible(&lineage));
    }

    /// Enabling inheritance without a local default adopts the parent's default.
    #[test]
    fn enabling_adopts_parent_default(inherited in 1usize..6, pick in 0usize..6) {
        let parents = templates(inherited, PARENT);
        let default = parents[pick % parents.len()].id;
        let mut lineage =
            Lineage::with_parent(child(Vec::new(), false, None), parent(parents, Some(default)));

        TemplateInheritanceResolver::update_inheritance_flag(&mut lineage, true);
        prop_assert_eq!(lineage.container.default_template, Some(default));
        prop_assert!(lineage.container.inherit_templates);
    }

    /// Enabling inheritance keeps an existing local default.
    #[test]
    fn enabling_keeps_local_default(own in 1usize..4, inherited in 1usize..4) {
        let own = templates(own, CHILD);
        let parents = templates(inherited, PARENT);
        let local = own[0].id;
        let parent_default = parents[0].id;
        let mut lineage = Lineage::with_parent(
            child(own, false, Some(local)),
            parent(parents, Some(parent_default)),
        );

        TemplateInheritanceResolver::update_inheritance_flag(&mut lineage, true);
        prop_assert_eq!(lineage.container.default_template, Some(local));
    }

    /// Disabling inheritance clears an inherited default and keeps an own one.
    #[test]
    fn disabling_clears_only_inherited(
        own in 1usize..4,
        inherited in 1usize..4,
        pick_own in any::<bool>(),
    ) {
        let own = templates(own, CHILD);
        let parents = templates(inherited, PARENT);
        let default = if pick_own { own[0].id } else { parents[0].id };
        let mut lineage =
            Lineage::with_parent(child(own, true, Some(default)), parent(parents, None));

        TemplateInheritanceResolver::update_inheritance_flag(&mut lineage, false);
        let expected = if pick_own { Some(default) } else { None };
        prop_assert_eq!(lineage.container.default_template, expected);
        prop_assert!(!lineage.container.inherit_templates);
    }

    /// Cloning yields a fresh, unused copy and leaves the source alone.
    #[test]
    fn clone_is_fresh(name in "[A-Za-z][A-Za-z0-9]{0,20}", usage in 0u64..1000) {
        let mut source = template(&name, CHILD);
        source.usage_count = usage;
        let before = source.clone();
        let mut container = child(vec![source.clone()], false, None);

        let copy = TemplateInheritanceResolver::clone_template(&mut container, &source, Utc::now());

        prop_assert_ne!(copy.id, source.id);
        prop_assert_eq!(copy.usage_count, 0);
        prop_assert_eq!(copy.name.as_str().to_string(), format!("Copy of {}", name));
        prop_assert_eq!(source, before);
        prop_assert_eq!(container.templates.len(), 2);
        prop_assert_eq!(container.templates[0].usage_count, usage);
    }
}

#[test]
fn enabling_with_no_defaults_is_noop() {
    let mut lineage = Lineage::with_parent(
        child(templates(1, CHILD), false, None),
        parent(templates(1, PARENT), None),
    );

    TemplateInheritanceResolver::update_inheritance_flag(&mut lineage, true);
    assert_eq!(lineage.container.default_template, None);
    assert!(lineage.container.inherit_templates);
}
