//! Python dataclasses for a TatSu-style `ModelBuilderSemantics`.
use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::{print_provenance, Target};
use crate::ir::ModelPlan;
use crate::writer::CodeWriter;

static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise",
        "return", "try", "while", "with", "yield",
    ]
    .into_iter()
    .collect()
});

// contents of `vars(builtins)`
static BUILTINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ArithmeticError", "AssertionError", "AttributeError", "BaseException",
        "BaseExceptionGroup", "BlockingIOError", "BrokenPipeError", "BufferError",
        "BytesWarning", "ChildProcessError", "ConnectionAbortedError", "ConnectionError",
        "ConnectionRefusedError", "ConnectionResetError", "DeprecationWarning", "EOFError",
        "Ellipsis", "EncodingWarning", "EnvironmentError", "Exception", "ExceptionGroup",
        "False", "FileExistsError", "FileNotFoundError", "FloatingPointError", "FutureWarning",
        "GeneratorExit", "IOError", "ImportError", "ImportWarning", "IndentationError",
        "IndexError", "InterruptedError", "IsADirectoryError", "KeyError", "KeyboardInterrupt",
        "LookupError", "MemoryError", "ModuleNotFoundError", "NameError", "None",
        "NotADirectoryError", "NotImplemented", "NotImplementedError", "OSError",
        "OverflowError", "PendingDeprecationWarning", "PermissionError", "ProcessLookupError",
        "RecursionError", "ReferenceError", "ResourceWarning", "RuntimeError", "RuntimeWarning",
        "StopAsyncIteration", "StopIteration", "SyntaxError", "SyntaxWarning", "SystemError",
        "SystemExit", "TabError", "TimeoutError", "True", "TypeError", "UnboundLocalError",
        "UnicodeDecodeError", "UnicodeEncodeError", "UnicodeError", "UnicodeTranslateError",
        "UnicodeWarning", "UserWarning", "ValueError", "Warning", "ZeroDivisionError",
        "__build_class__", "__debug__", "__doc__", "__import__", "__loader__", "__name__",
        "__package__", "__spec__", "abs", "aiter", "all", "anext", "any", "ascii", "bin",
        "bool", "breakpoint", "bytearray", "bytes", "callable", "chr", "classmethod", "compile",
        "complex", "copyright", "credits", "delattr", "dict", "dir", "divmod", "enumerate",
        "eval", "exec", "exit", "filter", "float", "format", "frozenset", "getattr", "globals",
        "hasattr", "hash", "help", "hex", "id", "input", "int", "isinstance", "issubclass",
        "iter", "len", "license", "list", "locals", "map", "max", "memoryview", "min", "next",
        "object", "oct", "open", "ord", "pow", "print", "property", "quit", "range", "repr",
        "reversed", "round", "set", "setattr", "slice", "sorted", "staticmethod", "str", "sum",
        "super", "tuple", "type", "vars", "zip",
    ]
    .into_iter()
    .collect()
});

pub struct PythonTarget;

impl Target for PythonTarget {
    fn language(&self) -> &'static str { "python" }
    fn file_extension(&self) -> &'static str { "py" }
    fn path_separator(&self) -> &'static str { "." }
    fn default_base_type(&self) -> &'static str { "tatsu.objectmodel.Node" }

    fn is_keyword(&self, name: &str) -> bool { KEYWORDS.contains(name) }
    fn is_builtin(&self, name: &str) -> bool { BUILTINS.contains(name) }

    fn emit_preamble(&self, w: &mut CodeWriter, plan: &ModelPlan) {
        let base_type = &plan.base_type.name;
        w.print("#!/usr/bin/env python3");
        w.newline();
        print_provenance(w, "#");
        w.newline();
        w.print_block(
            "
            from __future__ import annotations

            from typing import Any
            from dataclasses import dataclass

            from tatsu.semantics import ModelBuilderSemantics
            ",
        );
        if !plan.base_type.module.is_empty() {
            w.print(format!("from {} import {base_type}", plan.base_type.module));
        }
        w.newline();
        w.newline();
        w.print(format!(
            "class {}ModelBuilderSemantics(ModelBuilderSemantics):",
            self.safe_name(&plan.name)
        ));
        w.indented(|w| {
            w.print("def __init__(self, context=None, types=None):");
            w.indented(|w| {
                w.print("types = [");
                w.indented(|w| {
                    w.print("t for t in globals().values()");
                    w.print(format!("if type(t) is type and issubclass(t, {base_type})"));
                });
                w.print("] + (types or [])");
                w.print("super().__init__(context=context, types=types)");
            });
        });
    }

    fn emit_rule_class(&self, w: &mut CodeWriter, class_name: &str, base: &str, attributes: &[String]) {
        w.newline();
        w.newline();
        w.print("@dataclass(eq=False)");
        w.print(format!("class {class_name}({base}):"));
        w.indented(|w| {
            if attributes.is_empty() {
                w.print("pass");
            }
            for attr in attributes {
                w.print(format!("{attr}: Any = None"));
            }
        });
    }

    fn emit_base_class(&self, w: &mut CodeWriter, class_name: &str, base: Option<&str>) {
        w.newline();
        w.newline();
        w.print("@dataclass(eq=False)");
        match base {
            Some(base) => w.print(format!("class {class_name}({base}):")),
            None => w.print(format!("class {class_name}:")),
        }
        w.indented(|w| w.print("pass"));
    }
}
