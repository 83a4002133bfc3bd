pub mod error;
pub mod symbol;

pub use error::{LensError, Result};
pub use symbol::{
    ArgInfo, ClassInfo, ConfigBinding, EXPR_MARKER, Extraction, FileContribution, FileRecord,
    FunctionInfo, MethodInfo, SymbolSet,
};
