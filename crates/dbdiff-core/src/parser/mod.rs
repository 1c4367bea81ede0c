//! DDL Parser
//!
//! A hand-written recursive descent parser that walks a script statement
//! by statement, parses `CREATE TABLE` statements into the AST and skips
//! everything else. A malformed statement is reported and parsing resumes
//! after its terminating `;`.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;
