//! Synthesize model classes from a grammar's rule annotations.
//!
//! Rules declared as `rule[Class::Base::...]` describe a path in a class
//! hierarchy. All paths are merged into one DAG, ordered bases-first, and
//! emitted as data classes whose fields are the names each rule binds.
pub mod config;
pub mod error;
pub mod generate;
pub mod grammar;
pub mod hierarchy;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod path_de;
pub mod target;
pub mod writer;

pub use config::ModelGenConfig;
pub use error::{Error, Result};
pub use generate::{modelgen, ModelGenerator, SpecsReport};
pub use grammar::{Define, Expr, Grammar, GrammarModel, Rule, RuleModel};
pub use ir::{BaseType, ClassDecl, ClassSpec, ModelPlan};
pub use target::{Target, TargetKind};
