//! Integration test: full pass through `FactoryProcessor`.
//!
//! Builds the Drink/Meal metadata fixture programmatically and verifies
//! dispatch semantics, duplicate handling, per-declaration error
//! isolation, and pass-to-pass hygiene.

use facto_core::{
    Artifact, ArtifactSink, CollectingSink, DeclKind, FactoryAnnotation, FactoryEmitter,
    FactoryProcessor, InMemoryProvider, QualifiedName, TypeDecl, TypeRef,
};

#[derive(Default)]
struct VecSink(Vec<Artifact>);

impl ArtifactSink for VecSink {
    fn write(&mut self, artifact: &Artifact) -> std::io::Result<()> {
        self.0.push(artifact.clone());
        Ok(())
    }
}

fn interface(name: &str) -> TypeDecl {
    let mut decl = TypeDecl::concrete_class(name);
    decl.kind = DeclKind::Interface;
    decl.constructors.clear();
    decl
}

fn implementation(name: &str, implements: &str) -> TypeDecl {
    let mut decl = TypeDecl::concrete_class(name);
    decl.interfaces.push(QualifiedName::new(implements));
    decl
}

fn fixture() -> InMemoryProvider {
    let mut provider = InMemoryProvider::new();
    provider.add_decls([
        interface("com.example.drinks.Drink"),
        implementation("com.example.drinks.Coffee", "com.example.drinks.Drink"),
        implementation("com.example.drinks.Wodka", "com.example.drinks.Drink"),
        interface("com.example.meals.Meal"),
        implementation("com.example.meals.Pizza", "com.example.meals.Meal"),
    ]);
    provider
}

fn annotated(class: &str, id: &str, group: &str) -> (QualifiedName, FactoryAnnotation) {
    (
        QualifiedName::new(class),
        FactoryAnnotation {
            identifier: id.into(),
            target: TypeRef::Direct(QualifiedName::new(group)),
        },
    )
}

#[test]
fn one_factory_per_group_with_correct_dispatch() {
    let provider = fixture();
    let mut processor = FactoryProcessor::new();
    let mut diagnostics = CollectingSink::new();

    processor
        .process_round(
            &[
                annotated("com.example.drinks.Coffee", "Coffee", "com.example.drinks.Drink"),
                annotated("com.example.drinks.Wodka", "Wodka", "com.example.drinks.Drink"),
                annotated("com.example.meals.Pizza", "Margherita", "com.example.meals.Meal"),
            ],
            &provider,
            &mut diagnostics,
        )
        .expect("round should run");

    // Dispatch semantics, checked on the structured plan before any text.
    let drink_group = &processor.registry().all_groups()[0];
    let plan = FactoryEmitter::new().plan(drink_group);
    assert_eq!(
        plan.resolve("Coffee")
            .map(|b| b.concrete_type.as_str()),
        Some("com.example.drinks.Coffee")
    );
    assert!(plan.resolve("Tea").is_none());
    assert!(plan.resolve("").is_none());

    let mut sink = VecSink::default();
    let summary = processor
        .finish(&mut sink, &mut diagnostics)
        .expect("finish should run");

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.diagnostics());
    assert_eq!(summary.artifacts_written, 2);
    assert_eq!(sink.0[0].type_name, "DrinkFactory");
    assert_eq!(sink.0[1].type_name, "MealFactory");

    let drink_source = &sink.0[0].source;
    assert!(drink_source.contains("public com.example.drinks.Drink create(String id)"));
    assert!(drink_source.contains("return new com.example.drinks.Coffee();"));
    assert!(drink_source.contains("return new com.example.drinks.Wodka();"));
    // Unknown identifiers fault at the generated program's runtime,
    // naming the id and the group.
    assert!(drink_source
        .contains("\"Unknown id = \" + id + \" for factory com.example.drinks.Drink\""));
}

#[test]
fn duplicate_identifier_is_rejected_but_group_still_emits() {
    let mut provider = fixture();
    provider.add_decl(implementation(
        "com.example.drinks.Decaf",
        "com.example.drinks.Drink",
    ));

    let mut processor = FactoryProcessor::new();
    let mut diagnostics = CollectingSink::new();
    let round = processor
        .process_round(
            &[
                annotated("com.example.drinks.Coffee", "Coffee", "com.example.drinks.Drink"),
                annotated("com.example.drinks.Decaf", "Coffee", "com.example.drinks.Drink"),
                annotated("com.example.drinks.Wodka", "Wodka", "com.example.drinks.Drink"),
            ],
            &provider,
            &mut diagnostics,
        )
        .expect("round should run");

    assert_eq!(round.accepted, 2);
    assert_eq!(round.failed, 1);
    let conflict = &diagnostics.diagnostics()[0];
    assert_eq!(
        conflict.element,
        Some(QualifiedName::new("com.example.drinks.Decaf"))
    );
    assert!(conflict.message.contains("com.example.drinks.Coffee"));

    let mut sink = VecSink::default();
    processor
        .finish(&mut sink, &mut diagnostics)
        .expect("finish should run");
    assert_eq!(sink.0.len(), 1);
    assert!(!sink.0[0].source.contains("Decaf"));
}

#[test]
fn same_identifier_across_groups_is_fine() {
    let provider = fixture();
    let mut processor = FactoryProcessor::new();
    let mut diagnostics = CollectingSink::new();
    processor
        .process_round(
            &[
                annotated("com.example.drinks.Coffee", "House", "com.example.drinks.Drink"),
                annotated("com.example.meals.Pizza", "House", "com.example.meals.Meal"),
            ],
            &provider,
            &mut diagnostics,
        )
        .expect("round should run");
    assert!(diagnostics.is_empty());
}

#[test]
fn mirror_resolved_target_reaches_the_same_group() {
    let mut provider = fixture();
    provider.add_mirror_alias("drinks.Drink.class", "com.example.drinks.Drink");

    let mut processor = FactoryProcessor::new();
    let mut diagnostics = CollectingSink::new();
    processor
        .process_round(
            &[
                annotated("com.example.drinks.Coffee", "Coffee", "com.example.drinks.Drink"),
                (
                    QualifiedName::new("com.example.drinks.Wodka"),
                    FactoryAnnotation {
                        identifier: "Wodka".into(),
                        target: TypeRef::Mirror("drinks.Drink.class".into()),
                    },
                ),
            ],
            &provider,
            &mut diagnostics,
        )
        .expect("round should run");

    assert!(diagnostics.is_empty());
    assert_eq!(processor.registry().len(), 1);
    assert_eq!(processor.registry().all_groups()[0].len(), 2);
}

#[test]
fn superclass_group_accepts_deep_chains() {
    let mut provider = InMemoryProvider::new();
    provider.add_decls([TypeDecl::concrete_class("com.example.meals.Meal")]);
    let mut pizza = TypeDecl::concrete_class("com.example.meals.Pizza");
    pizza.superclass = Some(QualifiedName::new("com.example.meals.Meal"));
    provider.add_decl(pizza);
    let mut calzone = TypeDecl::concrete_class("com.example.meals.Calzone");
    calzone.superclass = Some(QualifiedName::new("com.example.meals.Pizza"));
    provider.add_decl(calzone);

    let mut processor = FactoryProcessor::new();
    let mut diagnostics = CollectingSink::new();
    let round = processor
        .process_round(
            &[annotated(
                "com.example.meals.Calzone",
                "Calzone",
                "com.example.meals.Meal",
            )],
            &provider,
            &mut diagnostics,
        )
        .expect("round should run");
    assert_eq!(round.accepted, 1, "{:?}", diagnostics.diagnostics());
}
