//! Rust structs. Inheritance becomes embedding: each struct holds its base in a
//! `base` field and derefs to it. Generated types are listed in `MODEL_TYPES`
//! instead of being discovered at runtime.
use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::{print_provenance, Target};
use crate::ir::ModelPlan;
use crate::writer::CodeWriter;

/// Field holding the embedded base; attributes with this name get a `_` suffix.
const BASE_FIELD: &str = "base";

static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
        "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
        "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box",
        "do", "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual",
        "yield", BASE_FIELD,
    ]
    .into_iter()
    .collect()
});

// primitives, std prelude, and the names the generated file imports itself
static BUILTINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32",
        "i64", "i128", "isize", "f32", "f64", "Option", "Some", "None", "Result", "Ok", "Err",
        "Vec", "String", "Box", "ToOwned", "ToString", "Clone", "Copy", "Send", "Sync", "Sized",
        "Unpin", "Drop", "Fn", "FnMut", "FnOnce", "Default", "Eq", "PartialEq", "Ord",
        "PartialOrd", "Iterator", "IntoIterator", "Extend", "DoubleEndedIterator",
        "ExactSizeIterator", "FromIterator", "AsRef", "AsMut", "Into", "From", "TryFrom",
        "TryInto", "Value", "Deref", "MODEL_TYPES",
    ]
    .into_iter()
    .collect()
});

pub struct RustTarget;

impl RustTarget {
    fn print_struct(&self, w: &mut CodeWriter, class_name: &str, base: Option<&str>, attributes: &[String]) {
        w.newline();
        w.print("#[derive(Debug, Clone, Default)]");
        if base.is_none() && attributes.is_empty() {
            w.print(format!("pub struct {class_name};"));
            return;
        }
        w.print(format!("pub struct {class_name} {{"));
        w.indented(|w| {
            if let Some(base) = base {
                w.print(format!("pub {BASE_FIELD}: {base},"));
            }
            for attr in attributes {
                w.print(format!("pub {attr}: Option<Value>,"));
            }
        });
        w.print("}");

        if let Some(base) = base {
            w.newline();
            w.print(format!("impl Deref for {class_name} {{"));
            w.indented(|w| {
                w.print(format!("type Target = {base};"));
                w.newline();
                w.print(format!("fn deref(&self) -> &{base} {{"));
                w.indented(|w| w.print(format!("&self.{BASE_FIELD}")));
                w.print("}");
            });
            w.print("}");
        }
    }
}

impl Target for RustTarget {
    fn language(&self) -> &'static str { "rust" }
    fn file_extension(&self) -> &'static str { "rs" }
    fn path_separator(&self) -> &'static str { "::" }
    fn default_base_type(&self) -> &'static str { "crate::ast::Node" }

    fn is_keyword(&self, name: &str) -> bool { KEYWORDS.contains(name) }
    fn is_builtin(&self, name: &str) -> bool { BUILTINS.contains(name) }

    fn emit_preamble(&self, w: &mut CodeWriter, plan: &ModelPlan) {
        let semantics = format!("{}ModelBuilderSemantics", self.safe_name(&plan.name));
        print_provenance(w, "//");
        w.newline();
        w.print("use std::ops::Deref;");
        w.newline();
        w.print("use serde_json::Value;");
        if !plan.base_type.module.is_empty() {
            w.newline();
            w.print(format!("use {}::{};", plan.base_type.module, plan.base_type.name));
        }
        w.newline();
        w.print("/// Every model type declared in this file, bases first.");
        w.print("pub const MODEL_TYPES: &[&str] = &[");
        w.indented(|w| {
            for name in plan.class_names() {
                w.print(format!("\"{name}\","));
            }
        });
        w.print("];");
        w.newline();
        w.print("#[derive(Debug, Clone, Default)]");
        w.print(format!("pub struct {semantics} {{"));
        w.indented(|w| w.print("pub types: Vec<String>,"));
        w.print("}");
        w.newline();
        w.print(format!("impl {semantics} {{"));
        w.indented(|w| {
            w.print("pub fn new(types: Option<Vec<String>>) -> Self {");
            w.indented(|w| {
                w.print("let mut all: Vec<String> = MODEL_TYPES.iter().map(|t| t.to_string()).collect();");
                w.print("all.extend(types.unwrap_or_default());");
                w.print("Self { types: all }");
            });
            w.print("}");
        });
        w.print("}");
    }

    fn emit_rule_class(&self, w: &mut CodeWriter, class_name: &str, base: &str, attributes: &[String]) {
        self.print_struct(w, class_name, Some(base), attributes);
    }

    fn emit_base_class(&self, w: &mut CodeWriter, class_name: &str, base: Option<&str>) {
        self.print_struct(w, class_name, base, &[]);
    }
}
