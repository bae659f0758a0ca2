//! Rendering of one dispatch factory per completed group.
//!
//! Emission is split in two: a [`DispatchPlan`] captures the branch data
//! (identifier → concrete type, in member order) so matching semantics can
//! be tested without string comparison, and [`DispatchPlan::render`]
//! serializes the plan to Java source at the end.

use crate::error::ProcessingError;
use crate::model::QualifiedName;
use crate::registry::Group;
use std::fmt::Write as _;
use tracing::{debug, info};

/// Suffix appended to the group's simple name to form the factory name.
pub const DEFAULT_FACTORY_SUFFIX: &str = "Factory";

/// One dispatch branch: an identifier literal and the type it constructs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchBranch {
    /// The identifier literal compared against the `create` argument.
    pub identifier: String,
    /// The concrete type constructed on a match.
    pub concrete_type: QualifiedName,
}

/// The structured form of one generated factory.
#[derive(Debug, Clone)]
pub struct DispatchPlan {
    group_type: QualifiedName,
    factory_name: String,
    branches: Vec<DispatchBranch>,
}

impl DispatchPlan {
    /// Builds the plan for a group, one branch per member in stable order.
    #[must_use]
    pub fn from_group(group: &Group, suffix: &str) -> Self {
        let branches = group
            .members()
            .iter()
            .map(|record| DispatchBranch {
                identifier: record.identifier().to_owned(),
                concrete_type: record.declaration().clone(),
            })
            .collect();
        Self {
            group_type: group.group_type().clone(),
            factory_name: format!("{}{suffix}", group.group_type().simple_name()),
            branches,
        }
    }

    /// Canonical name of the group type the factory constructs.
    #[must_use]
    pub fn group_type(&self) -> &QualifiedName {
        &self.group_type
    }

    /// Name of the generated factory type (e.g. `DrinkFactory`).
    #[must_use]
    pub fn factory_name(&self) -> &str {
        &self.factory_name
    }

    /// Branches in generation order.
    #[must_use]
    pub fn branches(&self) -> &[DispatchBranch] {
        &self.branches
    }

    /// The branch a given identifier dispatches to, if any.
    ///
    /// `None` models the generated program's unknown-identifier fault:
    /// any input without a branch, including the empty string, falls
    /// through to the rendered throw.
    #[must_use]
    pub fn resolve(&self, identifier: &str) -> Option<&DispatchBranch> {
        self.branches.iter().find(|b| b.identifier == identifier)
    }

    /// Serializes the plan to Java source text.
    #[must_use]
    pub fn render(&self, header: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(header) = header {
            for line in header.lines() {
                let _ = writeln!(out, "// {line}");
            }
        }
        if let Some(package) = self.group_type.package() {
            let _ = writeln!(out, "package {package};");
            out.push('\n');
        }
        let _ = writeln!(out, "public class {} {{", self.factory_name);
        out.push('\n');
        let _ = writeln!(
            out,
            "    public {} create(String id) {{",
            self.group_type
        );
        let _ = writeln!(out, "        if (id == null) {{");
        let _ = writeln!(
            out,
            "            throw new IllegalArgumentException(\"id is null!\");"
        );
        let _ = writeln!(out, "        }}");
        for branch in &self.branches {
            let _ = writeln!(
                out,
                "        if ({}.equals(id)) {{",
                java_string_literal(&branch.identifier)
            );
            let _ = writeln!(out, "            return new {}();", branch.concrete_type);
            let _ = writeln!(out, "        }}");
        }
        let _ = writeln!(
            out,
            "        throw new IllegalArgumentException(\"Unknown id = \" + id + \" for factory {}\");",
            self.group_type
        );
        let _ = writeln!(out, "    }}");
        let _ = writeln!(out, "}}");
        out
    }
}

/// Escapes an identifier into a Java string literal.
fn java_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// A generated source artifact, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Generated type name; doubles as the file identity.
    pub type_name: String,
    /// Package the artifact belongs to, `None` for the root package.
    pub package: Option<String>,
    /// Full source text.
    pub source: String,
}

/// Receives generated artifacts; the generated-sources area of the build.
///
/// Implemented by host integrations (filesystem, in-memory). A failed
/// write surfaces as [`ProcessingError::ArtifactWrite`], with no artifact
/// left behind for the group.
pub trait ArtifactSink {
    /// Writes one artifact.
    ///
    /// # Errors
    ///
    /// Any IO failure of the underlying medium.
    fn write(&mut self, artifact: &Artifact) -> std::io::Result<()>;
}

/// Renders groups into factory artifacts and hands them to a sink.
#[derive(Debug, Clone)]
pub struct FactoryEmitter {
    suffix: String,
    header: Option<String>,
}

impl Default for FactoryEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryEmitter {
    /// Creates an emitter with the default suffix and header.
    #[must_use]
    pub fn new() -> Self {
        Self {
            suffix: DEFAULT_FACTORY_SUFFIX.to_owned(),
            header: Some("Generated by facto. Do not edit.".to_owned()),
        }
    }

    /// Overrides the factory type-name suffix.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Overrides or removes the generated-file header comment.
    #[must_use]
    pub fn header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }

    /// Builds the dispatch plan for a group without writing anything.
    #[must_use]
    pub fn plan(&self, group: &Group) -> DispatchPlan {
        DispatchPlan::from_group(group, &self.suffix)
    }

    /// Renders one group and writes the artifact to the sink.
    ///
    /// # Errors
    ///
    /// [`ProcessingError::ArtifactWrite`] when the sink rejects the
    /// artifact.
    pub fn emit(&self, group: &Group, sink: &mut dyn ArtifactSink) -> Result<(), ProcessingError> {
        debug_assert!(!group.is_empty(), "emitter input groups have >= 1 member");
        let plan = self.plan(group);
        debug!(
            factory = %plan.factory_name(),
            branches = plan.branches().len(),
            "rendering factory"
        );
        let artifact = Artifact {
            type_name: plan.factory_name().to_owned(),
            package: group.group_type().package().map(str::to_owned),
            source: plan.render(self.header.as_deref()),
        };
        sink.write(&artifact)
            .map_err(|source| ProcessingError::ArtifactWrite {
                artifact: artifact.type_name.clone(),
                source,
            })?;
        info!(factory = %artifact.type_name, "factory artifact written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FactoryAnnotation, TypeDecl, TypeRef};
    use crate::provider::InMemoryProvider;
    use crate::record::AnnotatedRecord;
    use crate::registry::GroupRegistry;

    fn drink_group(registry: &mut GroupRegistry) {
        for (class, id) in [
            ("com.example.drinks.Coffee", "Coffee"),
            ("com.example.drinks.Wodka", "Wodka"),
        ] {
            let decl = TypeDecl::concrete_class(class);
            let ann = FactoryAnnotation {
                identifier: id.into(),
                target: TypeRef::Direct(QualifiedName::new("com.example.drinks.Drink")),
            };
            let record = AnnotatedRecord::from_annotation(&decl, &ann, &InMemoryProvider::new())
                .expect("extraction succeeds");
            registry.add(record).expect("add succeeds");
        }
    }

    struct VecSink(Vec<Artifact>);

    impl ArtifactSink for VecSink {
        fn write(&mut self, artifact: &Artifact) -> std::io::Result<()> {
            self.0.push(artifact.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl ArtifactSink for FailingSink {
        fn write(&mut self, _artifact: &Artifact) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn plan_resolves_registered_identifiers_only() {
        let mut registry = GroupRegistry::new();
        drink_group(&mut registry);
        let plan = FactoryEmitter::new().plan(&registry.all_groups()[0]);

        let coffee = plan.resolve("Coffee").expect("Coffee branch exists");
        assert_eq!(coffee.concrete_type.as_str(), "com.example.drinks.Coffee");
        assert!(plan.resolve("Wodka").is_some());
        assert!(plan.resolve("Tea").is_none());
        assert!(plan.resolve("").is_none());
    }

    #[test]
    fn branches_follow_member_insertion_order() {
        let mut registry = GroupRegistry::new();
        drink_group(&mut registry);
        let plan = FactoryEmitter::new().plan(&registry.all_groups()[0]);
        let ids: Vec<&str> = plan.branches().iter().map(|b| b.identifier.as_str()).collect();
        assert_eq!(ids, ["Coffee", "Wodka"]);
    }

    #[test]
    fn rendered_source_has_the_factory_surface() {
        let mut registry = GroupRegistry::new();
        drink_group(&mut registry);
        let plan = FactoryEmitter::new().plan(&registry.all_groups()[0]);
        let source = plan.render(None);

        assert!(source.contains("package com.example.drinks;"));
        assert!(source.contains("public class DrinkFactory {"));
        assert!(source.contains("public com.example.drinks.Drink create(String id) {"));
        assert!(source.contains("if (\"Coffee\".equals(id)) {"));
        assert!(source.contains("return new com.example.drinks.Coffee();"));
        // The unknown-identifier fault names both the id and the group.
        assert!(source.contains(
            "throw new IllegalArgumentException(\"Unknown id = \" + id + \" for factory com.example.drinks.Drink\");"
        ));
    }

    #[test]
    fn root_package_group_renders_without_package_line() {
        let mut registry = GroupRegistry::new();
        let decl = TypeDecl::concrete_class("Coffee");
        let ann = FactoryAnnotation {
            identifier: "Coffee".into(),
            target: TypeRef::Direct(QualifiedName::new("Drink")),
        };
        let record = AnnotatedRecord::from_annotation(&decl, &ann, &InMemoryProvider::new())
            .expect("extraction succeeds");
        registry.add(record).expect("add succeeds");

        let plan = FactoryEmitter::new().plan(&registry.all_groups()[0]);
        assert!(!plan.render(None).contains("package "));
    }

    #[test]
    fn header_lines_are_commented() {
        let mut registry = GroupRegistry::new();
        drink_group(&mut registry);
        let plan = FactoryEmitter::new().plan(&registry.all_groups()[0]);
        let source = plan.render(Some("Generated by facto. Do not edit."));
        assert!(source.starts_with("// Generated by facto. Do not edit.\n"));
    }

    #[test]
    fn identifier_literals_are_escaped() {
        assert_eq!(java_string_literal("Co\"ffee"), "\"Co\\\"ffee\"");
        assert_eq!(java_string_literal("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn emit_writes_one_artifact_per_group() {
        let mut registry = GroupRegistry::new();
        drink_group(&mut registry);
        let mut sink = VecSink(Vec::new());
        FactoryEmitter::new()
            .emit(&registry.all_groups()[0], &mut sink)
            .expect("emit succeeds");

        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].type_name, "DrinkFactory");
        assert_eq!(sink.0[0].package.as_deref(), Some("com.example.drinks"));
    }

    #[test]
    fn sink_failure_surfaces_as_artifact_write() {
        let mut registry = GroupRegistry::new();
        drink_group(&mut registry);
        let err = FactoryEmitter::new()
            .emit(&registry.all_groups()[0], &mut FailingSink)
            .expect_err("failing sink must error");
        assert!(matches!(err, ProcessingError::ArtifactWrite { .. }));
    }

    #[test]
    fn custom_suffix_changes_the_factory_name() {
        let mut registry = GroupRegistry::new();
        drink_group(&mut registry);
        let plan = FactoryEmitter::new()
            .suffix("Builder")
            .plan(&registry.all_groups()[0]);
        assert_eq!(plan.factory_name(), "DrinkBuilder");
    }
}
