pub mod tree_render;

/// Case folding shared by every name lookup: catalog keys, relations, columns
/// and declared variables.
pub fn fold_case(name: &str) -> String {
    name.to_lowercase()
}

pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    left == right || fold_case(left) == fold_case(right)
}
