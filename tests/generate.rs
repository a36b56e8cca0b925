use modelgen::{
    modelgen, ClassDecl, Expr, GrammarModel, ModelGenConfig, ModelGenerator, RuleModel, TargetKind,
};
use rstest::rstest;
use serde_json::json;

fn fixture(name: &str) -> GrammarModel {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    GrammarModel::load(&path).unwrap()
}

fn rule(name: &str, spec: &str, defines: &[&str]) -> RuleModel {
    RuleModel {
        name: name.into(),
        params: vec![json!(spec)],
        exp: Expr::Sequence {
            items: defines
                .iter()
                .map(|d| Expr::Named { name: d.to_string(), exp: Box::new(Expr::Void) })
                .collect(),
        },
    }
}

fn class_index(text: &str, header: &str) -> usize {
    text.find(header).unwrap_or_else(|| panic!("missing `{header}` in:\n{text}"))
}

#[test]
fn single_rule_matches_golden_output() {
    let text = modelgen(&fixture("foo.json"), ModelGenConfig::default()).unwrap();
    assert_eq!(text, include_str!("fixtures/foo_model.py"));
}

#[test]
fn calc_declaration_order() {
    let generator = ModelGenerator::new(ModelGenConfig::default()).unwrap();
    let plan = generator.plan(&fixture("calc.json")).unwrap();
    let names: Vec<_> = plan.class_names().collect();
    assert_eq!(
        names,
        vec!["ModelBase", "Expression", "Number", "BinaryOp", "Group", "Add", "Subtract"]
    );
}

#[test]
fn calc_rule_classes_carry_attributes() {
    let generator = ModelGenerator::new(ModelGenConfig::default()).unwrap();
    let plan = generator.plan(&fixture("calc.json")).unwrap();
    let attrs = |class: &str| {
        plan.decls
            .iter()
            .find_map(|d| match d {
                ClassDecl::Rule { class_name, attributes, .. } if class_name == class => {
                    Some(attributes.clone())
                }
                _ => None,
            })
            .unwrap_or_else(|| panic!("{class} is not a rule class"))
    };
    assert_eq!(attrs("Add"), vec!["left", "op", "right"]);
    assert_eq!(attrs("Number"), vec!["value"]);
    assert!(attrs("Group").is_empty());
    assert!(matches!(
        plan.decls.iter().find(|d| d.class_name() == "BinaryOp"),
        Some(ClassDecl::Base { base: Some(b), .. }) if b == "Expression"
    ));
}

#[test]
fn builtin_class_absent_from_output() {
    let text = modelgen(&fixture("calc.json"), ModelGenConfig::default()).unwrap();
    assert!(!text.contains("class list("));
    assert!(!text.contains("elements"));
}

#[test]
fn non_textual_annotation_is_ignored() {
    let text = modelgen(&fixture("calc.json"), ModelGenConfig::default()).unwrap();
    assert!(!text.contains("ignored"));
}

#[test]
fn two_level_chain_orders_base_first() {
    let grammar = GrammarModel { name: "G".into(), rules: vec![rule("a", "A::B", &["v"])] };
    let cfg = ModelGenConfig { base_type: Some("pkg.R".into()), ..Default::default() };
    let text = modelgen(&grammar, cfg).unwrap();
    let b = class_index(&text, "class B(ModelBase):");
    let a = class_index(&text, "class A(B):");
    assert!(class_index(&text, "class ModelBase(R):") < b);
    assert!(b < a);
}

#[test]
fn three_level_chain_terminates_at_model_base() {
    let grammar = GrammarModel { name: "G".into(), rules: vec![rule("a", "A::B::C", &[])] };
    let text = modelgen(&grammar, ModelGenConfig::default()).unwrap();
    let c = class_index(&text, "class C(ModelBase):");
    let b = class_index(&text, "class B(C):");
    let a = class_index(&text, "class A(B):");
    assert!(c < b && b < a);
}

#[test]
fn attributes_emitted_lexicographically() {
    let grammar = GrammarModel {
        name: "G".into(),
        rules: vec![rule("r", "R", &["z", "a", "m", "z", "a"])],
    };
    let text = modelgen(&grammar, ModelGenConfig::default()).unwrap();
    assert!(text.ends_with(
        "class R(ModelBase):\n    a: Any = None\n    m: Any = None\n    z: Any = None\n"
    ));
}

#[test]
fn shared_hierarchy_declares_base_once() {
    let grammar = GrammarModel {
        name: "G".into(),
        rules: vec![rule("plain", "Shared::Root", &[]), rule("rich", "Shared::Root", &["x"])],
    };
    let text = modelgen(&grammar, ModelGenConfig::default()).unwrap();
    assert_eq!(text.matches("class Root(ModelBase):").count(), 1);
    assert_eq!(text.matches("class Shared(").count(), 1);
    // the later rule owns the leaf class
    assert!(text.ends_with("class Shared(Root):\n    x: Any = None\n"));
}

#[test]
fn strict_mode_rejects_builtin_names() {
    let cfg = ModelGenConfig { strict: true, ..Default::default() };
    let err = modelgen(&fixture("calc.json"), cfg).unwrap_err();
    assert!(err.to_string().contains("`list`"), "{err}");
}

#[test]
fn cyclic_annotations_produce_no_output() {
    let grammar = GrammarModel {
        name: "G".into(),
        rules: vec![rule("a", "A::B", &[]), rule("b", "B::A", &[])],
    };
    assert!(modelgen(&grammar, ModelGenConfig::default()).is_err());
}

#[test]
fn rust_target_never_redeclares_imported_root() {
    let grammar = GrammarModel { name: "G".into(), rules: vec![rule("n", "Node", &["x"])] };
    let cfg = ModelGenConfig { target: TargetKind::Rust, ..Default::default() };
    let text = modelgen(&grammar, cfg).unwrap();
    assert!(text.contains("use crate::ast::Node;"));
    assert!(!text.contains("pub struct Node"), "{text}");
    assert!(!text.contains("impl Deref for Node"), "{text}");
    assert!(text.contains("pub struct ModelBase {\n    pub base: Node,\n}"));
}

#[test]
fn strict_mode_rejects_imported_root_name() {
    let grammar = GrammarModel { name: "G".into(), rules: vec![rule("n", "Node", &[])] };
    let cfg = ModelGenConfig { target: TargetKind::Rust, strict: true, ..Default::default() };
    let err = modelgen(&grammar, cfg).unwrap_err();
    assert!(err.to_string().contains("`Node`"), "{err}");
}

#[rstest]
#[case(TargetKind::Python)]
#[case(TargetKind::Rust)]
fn generation_is_idempotent(#[case] target: TargetKind) {
    let cfg = ModelGenConfig { target, ..Default::default() };
    let grammar = fixture("calc.json");
    let first = modelgen(&grammar, cfg.clone()).unwrap();
    let second = modelgen(&grammar, cfg).unwrap();
    assert_eq!(first, second);
}

#[test]
fn rust_target_registry_and_embedding() {
    let cfg = ModelGenConfig { target: TargetKind::Rust, ..Default::default() };
    let text = modelgen(&fixture("calc.json"), cfg).unwrap();
    assert!(text.contains("use crate::ast::Node;"));
    assert!(text.contains("    \"Subtract\",\n];"));
    assert!(text.contains("pub struct ModelBase {\n    pub base: Node,\n}"));
    assert!(text.contains(
        "pub struct Add {\n    pub base: BinaryOp,\n    pub left: Option<Value>,\n    pub op: Option<Value>,\n    pub right: Option<Value>,\n}"
    ));
    assert!(text.contains("pub struct CalcModelBuilderSemantics {"));
}
