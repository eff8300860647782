//! JavaScript backend.
//!
//! The program is wrapped in an immediately-invoked function expression.
//! Each procedure becomes a nested function declaration, and the IIFE ends
//! by calling the entry procedure, or the first procedure when none is named
//! `MAIN`. JavaScript is untyped, so every declaration renders as `let`.

use std::fmt::Write as _;

use crate::ast::{Declaration, Procedure, Program, Statement};
use crate::emit::{indent, Emitter, Target};

/// Emits a JavaScript program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JavaScriptEmitter;

impl JavaScriptEmitter {
    fn emit_procedure(&self, out: &mut String, proc: &Procedure, depth: usize) {
        let pad = indent(depth);
        let _ = writeln!(out, "{pad}function {}() {{", proc.name);
        self.emit_block(out, &proc.statements, depth + 1);
        let _ = writeln!(out, "{pad}}}");
    }

    fn emit_block(&self, out: &mut String, stmts: &[Statement], depth: usize) {
        for stmt in stmts {
            self.emit_statement(out, stmt, depth);
        }
    }

    fn emit_statement(&self, out: &mut String, stmt: &Statement, depth: usize) {
        let pad = indent(depth);
        match stmt {
            Statement::Declaration(decl) => {
                let _ = writeln!(out, "{pad}{}", declaration(decl));
            }
            Statement::Assignment(a) => {
                let _ = writeln!(out, "{pad}{} = {};", a.target, a.value);
            }
            Statement::DoLoop(d) => {
                let _ = writeln!(
                    out,
                    "{pad}for (let {v} = {}; {v} <= {}; {v} += {}) {{",
                    d.start,
                    d.end,
                    d.step_or_default(),
                    v = d.var,
                );
                self.emit_block(out, &d.body, depth + 1);
                let _ = writeln!(out, "{pad}}}");
            }
            Statement::If(i) => {
                let _ = writeln!(out, "{pad}if ({}) {{", i.condition);
                self.emit_block(out, &i.then_body, depth + 1);
                if i.has_else {
                    let _ = writeln!(out, "{pad}}} else {{");
                    self.emit_block(out, &i.else_body, depth + 1);
                }
                let _ = writeln!(out, "{pad}}}");
            }
            Statement::Call(c) => {
                let _ = writeln!(out, "{pad}{}();", c.target);
            }
        }
    }
}

fn declaration(decl: &Declaration) -> String {
    match &decl.initial {
        Some(init) => format!("let {} = {init};", decl.name),
        None => format!("let {};", decl.name),
    }
}

impl Emitter for JavaScriptEmitter {
    fn target(&self) -> Target {
        Target::JavaScript
    }

    fn emit(&self, program: &Program) -> String {
        let mut out = String::from("(function () {\n");

        for (i, proc) in program.procedures.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.emit_procedure(&mut out, proc, 1);
        }

        if let Some(entry) = program.startup_procedure() {
            out.push('\n');
            let _ = writeln!(out, "{}{}();", indent(1), entry.name);
        }

        out.push_str("})();\n");
        out
    }
}
