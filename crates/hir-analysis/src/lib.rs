pub mod analysis_pass;
pub mod diagnostics;
pub mod enum_check;
