// Gold Language Front-End Library
//
// Tokenizer and runtime value layer for the Gold scripting language: typed
// mutable/literal bindings and a small set of builtins with declared
// call contracts.

// Public modules
pub mod builtins;
pub mod error;
pub mod lexer;
pub mod logging;
pub mod object;
pub mod repl;
pub mod runner;
pub mod token;

// Re-export commonly used items
pub use builtins::{registry, ArgSpec, Attribute, BuiltinEntry, Registry};
pub use error::{GoldError, Span};
pub use lexer::{tokenize, Lexer};
pub use object::{HashKey, Object, ObjectType, NULL};
pub use token::{lookup_ident, BindingType, Token, TokenKind};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::run;
