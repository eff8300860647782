//! C# backend.
//!
//! Every procedure becomes a method of one class. The [`crate::ast::ENTRY_POINT`]
//! procedure becomes `static void Main`; when there is none, a `Main` is
//! synthesized that calls the first procedure, when it has a name, on a
//! fresh instance.

use std::fmt::Write as _;

use crate::ast::{DataType, Declaration, Procedure, Program, Statement};
use crate::emit::{indent, Emitter, Target};

/// Emits a C# program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSharpEmitter {
    pub namespace: String,
    pub class_name: String,
}

impl Default for CSharpEmitter {
    fn default() -> Self {
        Self {
            namespace: "PLIProgram".to_string(),
            class_name: "Program".to_string(),
        }
    }
}

/// C# spelling of a declared type. Untyped declarations use `var`.
pub fn type_name(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Integer => "int",
        DataType::FloatingPoint => "double",
        DataType::Text => "string",
        DataType::Inferred => "var",
    }
}

impl CSharpEmitter {
    pub fn new(namespace: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            class_name: class_name.into(),
        }
    }

    fn emit_entry_stub(&self, out: &mut String, program: &Program) {
        let pad = indent(2);
        let body = indent(3);
        let _ = writeln!(out, "{pad}public static void Main(string[] args)");
        let _ = writeln!(out, "{pad}{{");
        let _ = writeln!(out, "{body}// Entry point");
        if let Some(first) = program.startup_procedure() {
            let _ = writeln!(out, "{body}var program = new {}();", self.class_name);
            let _ = writeln!(out, "{body}program.{}();", first.name);
        }
        let _ = writeln!(out, "{pad}}}");
        out.push('\n');
    }

    fn emit_procedure(&self, out: &mut String, proc: &Procedure, depth: usize) {
        let pad = indent(depth);
        let is_static = proc.is_entry_point();
        if is_static {
            let _ = writeln!(out, "{pad}public static void Main(string[] args)");
        } else {
            let _ = writeln!(out, "{pad}public void {}()", proc.name);
        }
        let _ = writeln!(out, "{pad}{{");
        self.emit_block(out, &proc.statements, depth + 1, is_static);
        let _ = writeln!(out, "{pad}}}");
    }

    fn emit_block(&self, out: &mut String, stmts: &[Statement], depth: usize, in_static: bool) {
        for stmt in stmts {
            self.emit_statement(out, stmt, depth, in_static);
        }
    }

    fn emit_statement(&self, out: &mut String, stmt: &Statement, depth: usize, in_static: bool) {
        let pad = indent(depth);
        match stmt {
            Statement::Declaration(decl) => {
                let _ = writeln!(out, "{pad}{}", declaration(decl));
            }
            Statement::Assignment(a) => {
                let _ = writeln!(out, "{pad}{} = {};", a.target, a.value);
            }
            Statement::DoLoop(d) => {
                // Ascending only: the bound test is `<=` whatever the step's sign.
                let _ = writeln!(
                    out,
                    "{pad}for (int {v} = {}; {v} <= {}; {v} += {}) {{",
                    d.start,
                    d.end,
                    d.step_or_default(),
                    v = d.var,
                );
                self.emit_block(out, &d.body, depth + 1, in_static);
                let _ = writeln!(out, "{pad}}}");
            }
            Statement::If(i) => {
                let _ = writeln!(out, "{pad}if ({}) {{", i.condition);
                self.emit_block(out, &i.then_body, depth + 1, in_static);
                if i.has_else {
                    let _ = writeln!(out, "{pad}}} else {{");
                    self.emit_block(out, &i.else_body, depth + 1, in_static);
                }
                let _ = writeln!(out, "{pad}}}");
            }
            Statement::Call(c) => {
                // Procedures are instance methods; Main has no `this`.
                if in_static {
                    let _ = writeln!(out, "{pad}new {}().{}();", self.class_name, c.target);
                } else {
                    let _ = writeln!(out, "{pad}{}();", c.target);
                }
            }
        }
    }
}

fn declaration(decl: &Declaration) -> String {
    let ty = type_name(decl.data_type);
    match &decl.initial {
        Some(init) if decl.data_type == DataType::Text && !init.starts_with('"') => {
            format!("{ty} {} = \"{init}\";", decl.name)
        }
        Some(init) => format!("{ty} {} = {init};", decl.name),
        None => format!("{ty} {};", decl.name),
    }
}

impl Emitter for CSharpEmitter {
    fn target(&self) -> Target {
        Target::CSharp
    }

    fn emit(&self, program: &Program) -> String {
        let mut out = String::new();
        out.push_str("using System;\n\n");
        let _ = writeln!(out, "namespace {}", self.namespace);
        out.push_str("{\n");
        let _ = writeln!(out, "{}public class {}", indent(1), self.class_name);
        let _ = writeln!(out, "{}{{", indent(1));

        if !program.has_entry_procedure() {
            self.emit_entry_stub(&mut out, program);
        }

        for proc in &program.procedures {
            self.emit_procedure(&mut out, proc, 2);
        }

        let _ = writeln!(out, "{}}}", indent(1));
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Assignment, CallStatement, DoLoop, IfStatement};

    fn decl(name: &str, data_type: DataType, initial: Option<&str>) -> Declaration {
        Declaration {
            name: name.to_string(),
            data_type,
            initial: initial.map(str::to_string),
        }
    }

    fn assign(target: &str, value: &str) -> Statement {
        Statement::Assignment(Assignment {
            target: target.to_string(),
            value: value.to_string(),
        })
    }

    fn body_of(stmts: Vec<Statement>, depth: usize, in_static: bool) -> String {
        let mut out = String::new();
        CSharpEmitter::default().emit_block(&mut out, &stmts, depth, in_static);
        out
    }

    #[test]
    fn test_type_mapping() {
        assert_eq!(type_name(DataType::Integer), "int");
        assert_eq!(type_name(DataType::FloatingPoint), "double");
        assert_eq!(type_name(DataType::Text), "string");
        assert_eq!(type_name(DataType::Inferred), "var");
    }

    #[test]
    fn test_declarations() {
        assert_eq!(declaration(&decl("X", DataType::Integer, Some("5"))), "int X = 5;");
        assert_eq!(declaration(&decl("R", DataType::FloatingPoint, None)), "double R;");
        assert_eq!(declaration(&decl("V", DataType::Inferred, Some("Y"))), "var V = Y;");
    }

    #[test]
    fn test_text_initial_auto_quoted() {
        assert_eq!(
            declaration(&decl("S", DataType::Text, Some("HELLO"))),
            "string S = \"HELLO\";"
        );
        assert_eq!(
            declaration(&decl("S", DataType::Text, Some("\"HI\""))),
            "string S = \"HI\";"
        );
        // Only CHARACTER declarations are quoted.
        assert_eq!(declaration(&decl("N", DataType::Integer, Some("ABC"))), "int N = ABC;");
    }

    #[test]
    fn test_do_loop_default_step() {
        let out = body_of(
            vec![Statement::DoLoop(DoLoop {
                var: "I".to_string(),
                start: "1".to_string(),
                end: "10".to_string(),
                step: None,
                body: vec![assign("X", "X + I")],
            })],
            1,
            false,
        );
        assert_eq!(
            out,
            "    for (int I = 1; I <= 10; I += 1) {\n        X = X + I;\n    }\n"
        );
    }

    #[test]
    fn test_if_else() {
        let out = body_of(
            vec![Statement::If(IfStatement {
                condition: "X > 0".to_string(),
                then_body: vec![assign("Y", "1")],
                else_body: vec![assign("Y", "2")],
                has_else: true,
            })],
            0,
            false,
        );
        assert_eq!(out, "if (X > 0) {\n    Y = 1;\n} else {\n    Y = 2;\n}\n");
    }

    #[test]
    fn test_if_without_else() {
        let out = body_of(
            vec![Statement::If(IfStatement {
                condition: "X > 0".to_string(),
                then_body: vec![],
                else_body: vec![],
                has_else: false,
            })],
            0,
            false,
        );
        assert_eq!(out, "if (X > 0) {\n}\n");
    }

    #[test]
    fn test_call_instance_and_static() {
        let call = || {
            vec![Statement::Call(CallStatement {
                target: "WORK".to_string(),
            })]
        };
        assert_eq!(body_of(call(), 0, false), "WORK();\n");
        assert_eq!(body_of(call(), 0, true), "new Program().WORK();\n");
    }

    #[test]
    fn test_synthesized_entry_point() {
        let mut sub = Procedure::new("SUB");
        sub.statements.push(assign("A", "1"));
        let program = Program {
            procedures: vec![sub],
        };
        let expected = "\
using System;

namespace PLIProgram
{
    public class Program
    {
        public static void Main(string[] args)
        {
            // Entry point
            var program = new Program();
            program.SUB();
        }

        public void SUB()
        {
            A = 1;
        }
    }
}
";
        assert_eq!(CSharpEmitter::default().emit(&program), expected);
    }

    #[test]
    fn test_unnamed_first_procedure_not_invoked() {
        let program = Program {
            procedures: vec![Procedure::new(""), Procedure::new("LATER")],
        };
        let out = CSharpEmitter::default().emit(&program);
        assert!(out.contains("            // Entry point\n        }\n"), "{out}");
        assert!(!out.contains("var program"));
        assert!(out.contains("        public void LATER()\n"));
    }

    #[test]
    fn test_empty_program() {
        let out = CSharpEmitter::default().emit(&Program::default());
        assert!(out.contains("        {\n            // Entry point\n        }\n"));
        assert!(!out.contains("new Program()"));
    }

    #[test]
    fn test_custom_namespace_and_class() {
        let mut main = Procedure::new("MAIN");
        main.statements.push(Statement::Call(CallStatement {
            target: "SUB".to_string(),
        }));
        let program = Program {
            procedures: vec![main, Procedure::new("SUB")],
        };
        let out = CSharpEmitter::new("Legacy.Payroll", "Batch").emit(&program);
        assert!(out.contains("namespace Legacy.Payroll\n"));
        assert!(out.contains("    public class Batch\n"));
        assert!(out.contains("            new Batch().SUB();\n"));
        assert!(!out.contains("// Entry point"));
    }
}
