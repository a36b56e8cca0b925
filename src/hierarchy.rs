//! Per-rule class hierarchy extraction.
//!
//! A rule declared as `foo[Foo::Expr::Node]` names its own class (`Foo`) and the
//! chain of bases above it. Every chain ends at [`MODEL_BASE_NAME`], which in turn
//! derives from the caller's root type.
use crate::grammar::Rule;
use crate::ir::ClassSpec;

pub const MODEL_BASE_NAME: &str = "ModelBase";
pub const HIERARCHY_SEPARATOR: &str = "::";

/// `(class, base)` edges for one rule, leaf first. Rules whose first parameter
/// is missing or not a string yield nothing.
pub fn base_class_specs<R, F>(rule: &R, safe_name: F) -> Vec<ClassSpec>
where
    R: Rule + ?Sized,
    F: Fn(&str) -> String,
{
    let Some(spec) = rule.params().first().and_then(|p| p.as_str()) else {
        return Vec::new();
    };
    let chain: Vec<String> = spec
        .split(HIERARCHY_SEPARATOR)
        .map(&safe_name)
        .chain(std::iter::once(MODEL_BASE_NAME.to_string()))
        .collect();
    chain
        .windows(2)
        .map(|pair| ClassSpec::new(pair[0].clone(), pair[1].clone()))
        .collect()
}
