//! Output languages. A [`Target`] knows its identifier rules and how to print
//! each kind of declaration; [`render`] drives it over a [`ModelPlan`].
pub mod python;
pub mod rust;

use serde::{Deserialize, Serialize};

use crate::ir::{ClassDecl, ModelPlan};
use crate::writer::CodeWriter;

pub use python::PythonTarget;
pub use rust::RustTarget;

pub trait Target: Sync {
    fn language(&self) -> &'static str;
    fn file_extension(&self) -> &'static str;
    /// Separator of a qualified type path (`tatsu.objectmodel.Node`, `crate::ast::Node`).
    fn path_separator(&self) -> &'static str;
    fn default_base_type(&self) -> &'static str;

    fn is_keyword(&self, name: &str) -> bool;
    /// Names that live in the global namespace of generated code and cannot be redeclared.
    fn is_builtin(&self, name: &str) -> bool;

    fn safe_name(&self, name: &str) -> String {
        crate::naming::safe_name(name, |n| self.is_keyword(n))
    }

    fn emit_preamble(&self, w: &mut CodeWriter, plan: &ModelPlan);
    fn emit_rule_class(&self, w: &mut CodeWriter, class_name: &str, base: &str, attributes: &[String]);
    fn emit_base_class(&self, w: &mut CodeWriter, class_name: &str, base: Option<&str>);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[default]
    Python,
    Rust,
}

impl TargetKind {
    pub fn target(self) -> &'static dyn Target {
        match self {
            TargetKind::Python => &PythonTarget,
            TargetKind::Rust => &RustTarget,
        }
    }
}

pub fn render(target: &dyn Target, plan: &ModelPlan) -> String {
    let mut w = CodeWriter::new();
    target.emit_preamble(&mut w, plan);
    for decl in &plan.decls {
        match decl {
            ClassDecl::Rule { class_name, base, attributes, .. } => {
                target.emit_rule_class(&mut w, class_name, base, attributes)
            }
            ClassDecl::Base { class_name, base } => {
                target.emit_base_class(&mut w, class_name, base.as_deref())
            }
        }
    }
    w.into_string()
}

pub(crate) const PROVENANCE: &str = "
    WARNING: CAVEAT UTILITOR

    This file was automatically generated by modelgen.

    Any changes you make to it will be overwritten the next time
    the file is generated.
";

/// Print [`PROVENANCE`] as a comment block using `prefix` (`#`, `//`).
pub(crate) fn print_provenance(w: &mut CodeWriter, prefix: &str) {
    let mut block = CodeWriter::new();
    block.print_block(PROVENANCE);
    for line in block.as_str().lines() {
        if line.is_empty() {
            w.print(prefix);
        } else {
            w.print(format!("{prefix} {line}"));
        }
    }
}
