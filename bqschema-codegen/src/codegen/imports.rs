//! Import block rendering

use std::collections::BTreeSet;

/// Render the `use` block for a set of import paths.
///
/// Duplicates are collapsed and paths are emitted in sorted order:
/// nothing for no imports, a single `use` line for one, and one grouped
/// `use { .. };` for several. Non-empty output ends with a blank line.
pub fn render_imports<S: AsRef<str>>(imports: &[S]) -> String {
    let unique: BTreeSet<&str> = imports.iter().map(|i| i.as_ref()).collect();

    match unique.len() {
        0 => String::new(),
        1 => {
            let mut code = String::new();
            for import in &unique {
                code.push_str(&format!("use {};\n", import));
            }
            code.push('\n');
            code
        }
        _ => {
            let mut code = String::from("use {\n");
            for import in &unique {
                code.push_str(&format!("    {},\n", import));
            }
            code.push_str("};\n\n");
            code
        }
    }
}
