use plitrans::{
    parse_source, tokenize, transpile, transpile_with, CSharpEmitter, DataType, Severity,
    Statement, Target, TokenKind,
};

// ============================================================================
// C# OUTPUT
// ============================================================================

#[test]
fn test_minimal_program_csharp() {
    let cs = transpile("DECLARE X FIXED = 5; X = X + 1;", Target::CSharp);
    let expected = "\
using System;

namespace PLIProgram
{
    public class Program
    {
        public static void Main(string[] args)
        {
            int X = 5;
            X = X + 1;
        }
    }
}
";
    assert_eq!(cs, expected);
}

#[test]
fn test_do_loop_default_step_csharp() {
    let cs = transpile("DO I = 1 TO 10; END;", Target::CSharp);
    assert!(cs.contains("for (int I = 1; I <= 10; I += 1) {"), "{cs}");
}

#[test]
fn test_do_loop_explicit_step_csharp() {
    let cs = transpile("DO K = 10 TO 1 BY -1; END;", Target::CSharp);
    // Descending steps keep the ascending bound test.
    assert!(cs.contains("for (int K = 10; K <= 1; K += - 1) {"), "{cs}");
}

#[test]
fn test_procedures_csharp() {
    let source = "
        MAIN: PROCEDURE;
            DCL TOTAL FLOAT = 0;
            CALL ACCUMULATE;
        END;

        ACCUMULATE: PROCEDURE;
            DO I = 1 TO 3;
                IF I > 1 THEN
                    TOTAL = TOTAL + I;
                ELSE
                    TOTAL = 0;
                END;
            END;
        END;
    ";
    let cs = transpile(source, Target::CSharp);
    let expected = "\
using System;

namespace PLIProgram
{
    public class Program
    {
        public static void Main(string[] args)
        {
            double TOTAL = 0;
            new Program().ACCUMULATE();
        }
        public void ACCUMULATE()
        {
            for (int I = 1; I <= 3; I += 1) {
                if (I > 1) {
                    TOTAL = TOTAL + I;
                } else {
                    TOTAL = 0;
                }
            }
        }
    }
}
";
    assert_eq!(cs, expected);
}

#[test]
fn test_character_declaration_quoted() {
    let cs = transpile("DCL NAME CHAR = WORLD;", Target::CSharp);
    assert!(cs.contains("string NAME = \"WORLD\";"), "{cs}");
}

#[test]
fn test_custom_emitter_settings() {
    let emitter = CSharpEmitter::new("Migrated", "Job");
    let result = transpile_with("WORK: PROC; END;", &emitter);
    assert!(result.output.contains("namespace Migrated"));
    assert!(result.output.contains("var program = new Job();"));
    assert!(result.output.contains("program.WORK();"));
}

// ============================================================================
// JAVASCRIPT OUTPUT
// ============================================================================

#[test]
fn test_minimal_program_javascript() {
    let js = transpile("DECLARE X FIXED = 5; X = X + 1;", Target::JavaScript);
    let expected = "\
(function () {
    function MAIN() {
        let X = 5;
        X = X + 1;
    }

    MAIN();
})();
";
    assert_eq!(js, expected);
}

#[test]
fn test_control_flow_javascript() {
    let source = "
        SUM: PROCEDURE;
            DO I = 1 TO 10 BY 2;
                IF I >= 5 THEN CALL REPORT; END;
            END;
        END;
    ";
    let js = transpile(source, Target::JavaScript);
    assert!(js.contains("    function SUM() {\n"), "{js}");
    assert!(js.contains("        for (let I = 1; I <= 10; I += 2) {\n"), "{js}");
    assert!(js.contains("            if (I >= 5) {\n"), "{js}");
    assert!(js.contains("                REPORT();\n"), "{js}");
    assert!(js.ends_with("    SUM();\n})();\n"), "{js}");
}

// ============================================================================
// FRONT END PROPERTIES
// ============================================================================

#[test]
fn test_whitespace_idempotence() {
    let compact = "DCL X FIXED=1;DO I=1 TO 3;X=X*I;END;";
    let spread = "DCL X FIXED = 1 ;\n\nDO I = 1\n   TO 3 ;\r\n\tX = X * I ;\nEND ;\n";

    let mut a = tokenize(compact);
    let mut b = tokenize(spread);
    assert_eq!(a.pop().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(b.pop().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(a, b);

    for target in Target::ALL {
        assert_eq!(transpile(compact, target), transpile(spread, target));
    }
}

#[test]
fn test_stray_token_does_not_abort() {
    let (program, diagnostics) = parse_source("A = 1; THEN B = 2; ) C = 3;");
    let stmts = &program.procedures[0].statements;
    assert_eq!(stmts.len(), 3);
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
}

#[test]
fn test_unrecognized_characters_reported() {
    let (program, diagnostics) = parse_source("DCL X FIXED = 1; # X = 2; @");
    assert_eq!(program.procedures[0].statements.len(), 2);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].code, "PLI-W001");
    assert_eq!(diagnostics[0].span.line_col("DCL X FIXED = 1; # X = 2; @"), (1, 18));
}

#[test]
fn test_deeply_nested_input_recovers() {
    let source = "DO I = 1 TO 2; ".repeat(10_000);
    let (_, diagnostics) = parse_source(&source);
    assert!(diagnostics.iter().any(|d| d.severity == Severity::Error));

    for target in Target::ALL {
        let out = transpile(&source, target);
        assert!(!out.is_empty());
    }
}

#[test]
fn test_implicit_entry_only_top_level() {
    let (program, _) = parse_source("DCL A FIXED; A = 1; A = A + 2;");
    assert_eq!(program.procedures.len(), 1);
    assert_eq!(program.procedures[0].name, "MAIN");
    assert!(matches!(
        &program.procedures[0].statements[0],
        Statement::Declaration(d) if d.data_type == DataType::Integer && d.initial.is_none()
    ));
}

#[test]
fn test_empty_source() {
    assert!(transpile("", Target::CSharp).contains("// Entry point"));
    assert_eq!(transpile("", Target::JavaScript), "(function () {\n})();\n");
}

#[test]
fn test_ast_serializes() {
    let (program, _) = parse_source("DO I = 1 TO 2; CALL X; END;");
    let json = serde_json::to_string(&program).unwrap();
    assert!(json.contains("\"DoLoop\""));
    assert!(json.contains("\"target\":\"X\""));
}
