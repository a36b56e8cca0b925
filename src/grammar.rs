//! Grammar model consumed by the generator.
//!
//! The generator only needs three things from a rule: its name, its declared
//! parameters (the first one may carry a `Class::Base` annotation) and the names
//! its body binds. [`Grammar`] and [`Rule`] capture exactly that, so any grammar
//! representation can be plugged in. [`GrammarModel`] is the JSON-loadable one the
//! CLI uses.
use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ————————————————————————————————————————————————————————————————————————————
// INTERFACE
// ————————————————————————————————————————————————————————————————————————————

pub trait Rule {
    fn name(&self) -> &str;
    /// Declared parameters, in order. Only the first is ever inspected.
    fn params(&self) -> &[Value];
    /// Names bound by the rule body, duplicates collapsed, first occurrence first.
    fn defines(&self) -> Vec<Define>;
}

pub trait Grammar {
    type Rule: Rule;
    fn name(&self) -> &str;
    fn rules(&self) -> &[Self::Rule];
}

/// One binding in a rule body: `name:exp` or `name+:exp`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Define {
    pub name: String,
    pub is_list: bool,
}

impl Define {
    pub fn single(name: impl Into<String>) -> Self { Self { name: name.into(), is_list: false } }
    pub fn list(name: impl Into<String>) -> Self { Self { name: name.into(), is_list: true } }
}

/// Collapse repeated bindings by name, keeping the first occurrence of each.
pub fn compress_defines<I>(defines: I) -> Vec<Define>
where
    I: IntoIterator<Item = Define>,
{
    let mut seen = IndexSet::<String>::new();
    defines
        .into_iter()
        .filter(|d| seen.insert(d.name.clone()))
        .collect()
}

// ————————————————————————————————————————————————————————————————————————————
// JSON MODEL
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammarModel {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<RuleModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleModel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,
    #[serde(default)]
    pub exp: Expr,
}

/// Parsing-expression tree of a rule body. Only the shape matters here: which
/// sub-expressions can bind names and which cannot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    #[default]
    Void,
    Cut,
    Token { token: String },
    Pattern { pattern: String },
    Call { rule: String },
    Named { name: String, exp: Box<Expr> },
    NamedList { name: String, exp: Box<Expr> },
    /// `@:exp` replaces the node instead of binding into it.
    Override { exp: Box<Expr> },
    Sequence { items: Vec<Expr> },
    Choice { options: Vec<Expr> },
    Optional { exp: Box<Expr> },
    Closure { exp: Box<Expr> },
    PositiveClosure { exp: Box<Expr> },
    Group { exp: Box<Expr> },
    Lookahead { exp: Box<Expr> },
    NegativeLookahead { exp: Box<Expr> },
}

impl Expr {
    /// Every binding reachable from this expression, in textual order, with repeats.
    pub fn defines(&self) -> Vec<Define> {
        let mut out = Vec::new();
        self.collect_defines(&mut out);
        out
    }

    fn collect_defines(&self, out: &mut Vec<Define>) {
        match self {
            Expr::Named { name, exp } => {
                out.push(Define::single(name.clone()));
                exp.collect_defines(out);
            }
            Expr::NamedList { name, exp } => {
                out.push(Define::list(name.clone()));
                exp.collect_defines(out);
            }
            Expr::Sequence { items } => items.iter().for_each(|e| e.collect_defines(out)),
            Expr::Choice { options } => options.iter().for_each(|e| e.collect_defines(out)),
            Expr::Optional { exp }
            | Expr::Closure { exp }
            | Expr::PositiveClosure { exp }
            | Expr::Group { exp }
            | Expr::Lookahead { exp } => exp.collect_defines(out),
            // a negative lookahead never matches, so nothing it names survives
            Expr::Override { .. }
            | Expr::NegativeLookahead { .. }
            | Expr::Void
            | Expr::Cut
            | Expr::Token { .. }
            | Expr::Pattern { .. }
            | Expr::Call { .. } => {}
        }
    }
}

impl Rule for RuleModel {
    fn name(&self) -> &str { &self.name }
    fn params(&self) -> &[Value] { &self.params }
    fn defines(&self) -> Vec<Define> { compress_defines(self.exp.defines()) }
}

impl Grammar for GrammarModel {
    type Rule = RuleModel;
    fn name(&self) -> &str { &self.name }
    fn rules(&self) -> &[RuleModel] { &self.rules }
}

impl GrammarModel {
    pub fn from_json(src: &str) -> crate::Result<Self> {
        crate::path_de::from_str_with_path(src)
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        crate::path_de::from_file_with_path(path)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
