// Strongly-typed IR between the grammar and the emitters. No rule objects here.

use serde::Serialize;

/// One edge of the synthesized hierarchy: `class_name` directly extends `base`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassSpec {
    pub class_name: String,
    pub base: String,
}

impl ClassSpec {
    pub fn new(class_name: impl Into<String>, base: impl Into<String>) -> Self {
        Self { class_name: class_name.into(), base: base.into() }
    }
}

/// Root type every generated class ultimately derives from, split into the
/// path it is imported from and its simple name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseType {
    /// Empty when the type is already in scope.
    pub module: String,
    pub name: String,
}

impl BaseType {
    /// Split a qualified path such as `tatsu.objectmodel.Node` on `separator`.
    pub fn parse(path: &str, separator: &str) -> crate::Result<Self> {
        let path = path.trim();
        let (module, name) = match path.rsplit_once(separator) {
            Some((module, name)) => (module, name),
            None => ("", path),
        };
        let valid = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace);
        if !valid(name) || (!module.is_empty() && module.contains(char::is_whitespace)) {
            return Err(crate::Error::InvalidBaseType(path.to_string()));
        }
        Ok(Self { module: module.to_string(), name: name.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassDecl {
    /// Leaf class of a rule; carries the rule's attributes.
    Rule {
        class_name: String,
        base: String,
        rule: String,
        /// Sanitized and sorted.
        attributes: Vec<String>,
    },
    /// Intermediate or terminal base that no rule names as its own class.
    Base {
        class_name: String,
        /// `None` only for malformed input.
        base: Option<String>,
    },
}

impl ClassDecl {
    pub fn class_name(&self) -> &str {
        match self {
            ClassDecl::Rule { class_name, .. } | ClassDecl::Base { class_name, .. } => class_name,
        }
    }

    pub fn base(&self) -> Option<&str> {
        match self {
            ClassDecl::Rule { base, .. } => Some(base),
            ClassDecl::Base { base, .. } => base.as_deref(),
        }
    }
}

/// Everything an emitter needs, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelPlan {
    pub name: String,
    pub base_type: BaseType,
    pub decls: Vec<ClassDecl>,
}

impl ModelPlan {
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.decls.iter().map(ClassDecl::class_name)
    }
}
