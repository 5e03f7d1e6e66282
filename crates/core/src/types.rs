/// All entity identifiers are backend-assigned integers.
pub type DbId = i64;
