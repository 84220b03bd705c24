mod term;
pub use term::*;

mod operators;
pub use operators::*;

mod parse;
pub use parse::*;

mod symbols;
pub use symbols::*;
