/// Normalize a partition name for collision checks: collapse each whitespace
/// run to a single `-`, drop outer whitespace, lowercase the rest.
///
/// Display names keep their original spelling; only uniqueness is decided on
/// the normalized form, so "My Group" and "my   group" collide.
pub fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
