pub mod ast;
pub mod error;
pub mod id_generator;
pub mod lexer;
pub mod parser;
pub mod roots;
pub mod serializer;

pub use ast::*;
pub use error::{format_error, GenerateError, ParseError, ParseResult};
pub use id_generator::{module_seed, IDGenerator};
pub use lexer::{tokenize, Token};
pub use parser::{parse, parse_with_path, Parser, DEFAULT_MODULE_PATH};
pub use roots::{component_roots, ComponentRoot};
pub use serializer::{serialize, CodeGenerator, Serializer};
