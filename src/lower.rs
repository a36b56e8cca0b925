//! Lower a grammar to a [`ModelPlan`]: aggregate every rule's hierarchy chain,
//! order the classes so bases come first, and attach rule attributes to leaf
//! classes.
use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::grammar::{Grammar, Rule};
use crate::hierarchy::{base_class_specs, MODEL_BASE_NAME};
use crate::ir::{BaseType, ClassDecl, ClassSpec, ModelPlan};
use crate::target::Target;

pub struct LowerOptions<'a> {
    pub name: &'a str,
    pub base_type: &'a BaseType,
    pub target: &'a dyn Target,
    /// Fail on classes named like a built-in instead of dropping them.
    pub strict: bool,
}

/// Per-rule chains for every rule that declares a hierarchy, keyed by rule name.
pub fn rule_specs<'g, G: Grammar>(
    grammar: &'g G,
    target: &dyn Target,
) -> IndexMap<&'g str, (&'g G::Rule, Vec<ClassSpec>)> {
    grammar
        .rules()
        .iter()
        .map(|rule| (rule.name(), (rule, base_class_specs(rule, |n| target.safe_name(n)))))
        .filter(|(_, (_, specs))| !specs.is_empty())
        .collect()
}

pub fn lower_to_plan<G: Grammar>(grammar: &G, opts: &LowerOptions<'_>) -> Result<ModelPlan> {
    let target = opts.target;
    let rule_specs = rule_specs(grammar, target);
    debug!(rules = grammar.rules().len(), annotated = rule_specs.len(), "collected class specs");

    // last writer wins; rules naming the same class are assumed to agree on its base
    let mut bases = IndexMap::<String, String>::new();
    for (_, specs) in rule_specs.values() {
        for spec in specs {
            bases.insert(spec.class_name.clone(), spec.base.clone());
        }
    }
    bases.insert(MODEL_BASE_NAME.to_string(), opts.base_type.name.clone());

    let edges: IndexSet<ClassSpec> = rule_specs
        .values()
        .flat_map(|(_, specs)| specs.iter().cloned())
        .collect();

    let order = topsort(bases.keys().map(String::as_str), &edges)?;
    debug!(order = ?order, "declaration order");

    let leaf_rules: IndexMap<&str, (&G::Rule, &ClassSpec)> = rule_specs
        .values()
        .map(|(rule, specs)| (specs[0].class_name.as_str(), (*rule, &specs[0])))
        .collect();

    // the root type is imported by name, so a class of that name would redeclare it
    let imported_root =
        (!opts.base_type.module.is_empty()).then_some(opts.base_type.name.as_str());

    let mut decls = Vec::with_capacity(order.len());
    for class_name in order {
        if imported_root == Some(class_name.as_str()) {
            if opts.strict {
                return Err(Error::ShadowsBaseType {
                    class_name,
                    base_type: opts.base_type.name.clone(),
                });
            }
            debug!(%class_name, "skipping class named like the imported base type");
            continue;
        }
        if target.is_builtin(&class_name) {
            if opts.strict {
                return Err(Error::ReservedName {
                    class_name,
                    language: target.language().to_string(),
                });
            }
            debug!(%class_name, "skipping class named like a built-in");
            continue;
        }
        let decl = match leaf_rules.get(class_name.as_str()) {
            Some((rule, spec)) => ClassDecl::Rule {
                attributes: rule_attributes(*rule, target),
                base: spec.base.clone(),
                rule: rule.name().to_string(),
                class_name,
            },
            None => ClassDecl::Base {
                base: bases.get(&class_name).cloned(),
                class_name,
            },
        };
        trace!(?decl, "lowered");
        decls.push(decl);
    }

    Ok(ModelPlan {
        name: opts.name.to_string(),
        base_type: opts.base_type.clone(),
        decls,
    })
}

/// Sanitized attribute names of a rule, unique and sorted.
pub fn rule_attributes<R: Rule + ?Sized>(rule: &R, target: &dyn Target) -> Vec<String> {
    let mut names: Vec<String> = rule
        .defines()
        .iter()
        .map(|d| target.safe_name(&d.name))
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();
    names.sort();
    names
}

/// Kahn's algorithm over `(class, base)` edges: every base precedes the classes
/// deriving from it. Ready names are released in first-seen order (`nodes`
/// first, then edge endpoints), which makes the result deterministic.
pub fn topsort<'a, I>(nodes: I, edges: &'a IndexSet<ClassSpec>) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut unmet = IndexMap::<&str, usize>::new();
    for node in nodes {
        unmet.entry(node).or_insert(0);
    }
    let mut derived = IndexMap::<&str, Vec<&str>>::new();
    for edge in edges {
        unmet.entry(edge.base.as_str()).or_insert(0);
        *unmet.entry(edge.class_name.as_str()).or_insert(0) += 1;
        derived.entry(edge.base.as_str()).or_default().push(edge.class_name.as_str());
    }

    let mut ready: VecDeque<&str> = unmet
        .iter()
        .filter(|(_, n)| **n == 0)
        .map(|(name, _)| *name)
        .collect();
    let mut order = Vec::with_capacity(unmet.len());
    while let Some(name) = ready.pop_front() {
        order.push(name.to_string());
        for class in derived.get(name).into_iter().flatten() {
            if let Some(n) = unmet.get_mut(class) {
                *n -= 1;
                if *n == 0 {
                    ready.push_back(*class);
                }
            }
        }
    }

    if order.len() < unmet.len() {
        let mut classes: Vec<String> = unmet
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(name, _)| name.to_string())
            .collect();
        classes.sort();
        return Err(Error::CyclicHierarchy { classes });
    }
    Ok(order)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
