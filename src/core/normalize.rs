use crate::domain::model::{Id, IdSpec};

/// Flattens an ID specification into the comma-joined form used in URL paths.
///
/// Sequences are joined in order; any string input has its spaces turned into commas.
/// Nothing is deduplicated, trimmed or validated, so empty segments pass straight through.
pub fn normalize(spec: &IdSpec) -> String {
    match spec {
        IdSpec::Single(Id::Int(n)) => n.to_string(),
        IdSpec::Single(Id::Text(s)) | IdSpec::Delimited(s) => s.replace(' ', ","),
        IdSpec::List(ids) => ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
            .replace(' ', ","),
    }
}
