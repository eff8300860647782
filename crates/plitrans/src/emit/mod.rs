//! Source emitters.
//!
//! Each backend is a pure tree walk over a [`Program`]. Indentation is the
//! nesting depth times [`INDENT`]. Expressions are written exactly as the
//! parser captured them.

pub mod csharp;
pub mod javascript;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ast::Program;
use crate::error::TranspileError;

pub use csharp::CSharpEmitter;
pub use javascript::JavaScriptEmitter;

/// One level of indentation in emitted code.
pub const INDENT: &str = "    ";

pub(crate) fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// A backend that renders a [`Program`] as target-language source.
pub trait Emitter {
    /// The language this emitter writes.
    fn target(&self) -> Target;

    /// Render the whole program.
    fn emit(&self, program: &Program) -> String;
}

/// Output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Statically typed, C#-style output.
    #[default]
    CSharp,
    /// Dynamically typed, JavaScript output.
    JavaScript,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::CSharp, Target::JavaScript];

    pub fn name(self) -> &'static str {
        match self {
            Target::CSharp => "csharp",
            Target::JavaScript => "javascript",
        }
    }

    /// Conventional file extension for the target, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Target::CSharp => "cs",
            Target::JavaScript => "js",
        }
    }

    /// The target's emitter with default settings.
    pub fn emitter(self) -> Box<dyn Emitter> {
        match self {
            Target::CSharp => Box::new(CSharpEmitter::default()),
            Target::JavaScript => Box::new(JavaScriptEmitter),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = TranspileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csharp" | "cs" | "c#" => Ok(Target::CSharp),
            "javascript" | "js" => Ok(Target::JavaScript),
            _ => Err(TranspileError::UnknownTarget {
                name: s.to_string(),
            }),
        }
    }
}
