//! Front API: grammar in, model source out.
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::config::ModelGenConfig;
use crate::error::Result;
use crate::grammar::Grammar;
use crate::ir::{BaseType, ClassSpec, ModelPlan};
use crate::lower::{lower_to_plan, rule_specs, LowerOptions};
use crate::target::{render, Target};

pub struct ModelGenerator {
    config: ModelGenConfig,
    base_type: BaseType,
}

/// Debug view: each annotated rule's chain plus the final declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct SpecsReport {
    pub grammar: String,
    pub rules: IndexMap<String, Vec<ClassSpec>>,
    pub order: Vec<String>,
}

impl ModelGenerator {
    pub fn new(config: ModelGenConfig) -> Result<Self> {
        let base_type = config.resolve_base_type()?;
        Ok(Self { config, base_type })
    }

    pub fn target(&self) -> &'static dyn Target { self.config.target.target() }

    pub fn base_type(&self) -> &BaseType { &self.base_type }

    pub fn plan<G: Grammar>(&self, grammar: &G) -> Result<ModelPlan> {
        let name = self.config.name.as_deref().unwrap_or(grammar.name());
        lower_to_plan(grammar, &LowerOptions {
            name,
            base_type: &self.base_type,
            target: self.target(),
            strict: self.config.strict,
        })
    }

    /// Full source text for `grammar`. Nothing is returned unless every step succeeds.
    pub fn generate_model<G: Grammar>(&self, grammar: &G) -> Result<String> {
        let plan = self.plan(grammar)?;
        info!(
            grammar = grammar.name(),
            target = self.target().language(),
            classes = plan.decls.len(),
            "generated model"
        );
        Ok(render(self.target(), &plan))
    }

    pub fn specs<G: Grammar>(&self, grammar: &G) -> Result<SpecsReport> {
        let rules = rule_specs(grammar, self.target())
            .into_iter()
            .map(|(name, (_, specs))| (name.to_string(), specs))
            .collect();
        let plan = self.plan(grammar)?;
        Ok(SpecsReport {
            grammar: grammar.name().to_string(),
            rules,
            order: plan.class_names().map(String::from).collect(),
        })
    }
}

/// Convenience: build a generator and run it once.
pub fn modelgen<G: Grammar>(grammar: &G, config: ModelGenConfig) -> Result<String> {
    ModelGenerator::new(config)?.generate_model(grammar)
}
