pub mod body;
pub mod expr;
pub mod file;
pub mod package;
pub mod prim_ty;
pub mod stmt;
pub mod type_info;
pub mod types;

pub use body::*;
pub use expr::*;
pub use file::*;
pub use package::*;
pub use prim_ty::*;
pub use stmt::*;
pub use type_info::*;
pub use types::*;
