/// Normalizes an addon name into an archive-safe stem: lowercase, spaces to
/// hyphens. `"Test Addon"` becomes `"test-addon"`.
pub fn to_archive_name(s: &str) -> String {
    s.trim().replace(' ', "-").to_lowercase()
}

/// Turns free text into a Python package name (`"Material Marshall"` ->
/// `"material_marshall"`).
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::new();

    for (i, c) in s.trim().chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            for lower in c.to_lowercase() {
                out.push(lower);
            }
        } else if c.is_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
        }
    }

    out.trim_end_matches('_').to_string()
}

/// `"material_marshall"` -> `"MaterialMarshall"`.
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
