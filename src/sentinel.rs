// src/sentinel.rs
// =============================================================================
// Placeholder values for data that could not be fetched.
//
// Downstream spreadsheets match on the literal strings below, so the three
// "missing" encodings stay distinct in the CSV output:
//
//   False      a boolean false, or a value that does not apply
//   {False}    a whole branch map that could not be fetched
//   not avail  a branch column that a given repository does not have
//
// An absent repository link is simply an empty cell.
// =============================================================================

pub const FALSE: &str = "False";
pub const TRUE: &str = "True";
pub const UNAVAILABLE_MAP: &str = "{False}";
pub const NOT_AVAIL: &str = "not avail";

/// Result of a lookup whose failures are reported as a placeholder
/// instead of an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Unavailable,
}

impl<T> Lookup<T> {
    pub fn as_found(&self) -> Option<&T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Unavailable => None,
        }
    }
}

pub fn render_bool(value: bool) -> String {
    if value { TRUE } else { FALSE }.to_string()
}
