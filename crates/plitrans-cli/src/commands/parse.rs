//! Parse command - show the program structure.

use std::fmt::Write as _;
use std::path::PathBuf;

use miette::Result;
use plitrans::{DataType, Program, Statement};

use crate::output::{print_json, OutputFormat};

/// Run the parse command.
pub fn run(input: PathBuf, format: OutputFormat) -> Result<()> {
    let source = super::read_source(&input)?;
    tracing::info!("Parsing {}", input.display());

    let (program, diagnostics) = plitrans::parse_source(&source);
    if !diagnostics.is_empty() {
        tracing::info!(
            "{} recovery diagnostic(s); run `plitrans check` for details",
            diagnostics.len()
        );
    }

    if format.is_json() {
        return print_json(&program);
    }

    print!("{}", outline(&program));
    Ok(())
}

/// Render an indented outline of the program.
fn outline(program: &Program) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Program ({} procedures)", program.procedures.len());
    for proc in &program.procedures {
        let marker = if proc.is_entry_point() { " [entry]" } else { "" };
        let _ = writeln!(out, "  PROCEDURE {}{marker}", proc.name);
        outline_block(&mut out, &proc.statements, 2);
    }
    out
}

fn outline_block(out: &mut String, stmts: &[Statement], depth: usize) {
    let pad = "  ".repeat(depth);
    for stmt in stmts {
        match stmt {
            Statement::Declaration(d) => {
                let ty = match d.data_type {
                    DataType::Integer => "FIXED",
                    DataType::FloatingPoint => "FLOAT",
                    DataType::Text => "CHARACTER",
                    DataType::Inferred => "(untyped)",
                };
                match &d.initial {
                    Some(init) => {
                        let _ = writeln!(out, "{pad}DECLARE {} {ty} = {init}", d.name);
                    }
                    None => {
                        let _ = writeln!(out, "{pad}DECLARE {} {ty}", d.name);
                    }
                }
            }
            Statement::Assignment(a) => {
                let _ = writeln!(out, "{pad}ASSIGN {} = {}", a.target, a.value);
            }
            Statement::DoLoop(d) => {
                let _ = writeln!(
                    out,
                    "{pad}DO {} = {} TO {} BY {}",
                    d.var,
                    d.start,
                    d.end,
                    d.step_or_default()
                );
                outline_block(out, &d.body, depth + 1);
            }
            Statement::If(i) => {
                let _ = writeln!(out, "{pad}IF {}", i.condition);
                outline_block(out, &i.then_body, depth + 1);
                if i.has_else {
                    let _ = writeln!(out, "{pad}ELSE");
                    outline_block(out, &i.else_body, depth + 1);
                }
            }
            Statement::Call(c) => {
                let _ = writeln!(out, "{pad}CALL {}", c.target);
            }
        }
    }
}
