// Module display names
//
// Module symbols are named after their source path (`"/abs/path/to/mod"`)
// or, for ambient modules, after the quoted specifier. Entries show a
// package-relative name instead.

use std::path::{Component, Path, PathBuf};

/// Rewrites module symbol names relative to the entry units
#[derive(Debug, Clone)]
pub struct ModuleNamer {
    base: PathBuf,
    package_name: String,
}

impl ModuleNamer {
    pub fn new(base: impl Into<PathBuf>, package_name: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            package_name: package_name.into(),
        }
    }

    /// Build a namer rooted at the common directory of `entry_units`
    pub fn for_entry_units<S: AsRef<str>>(entry_units: &[S], package_name: &str) -> Self {
        let dirs: Vec<PathBuf> = entry_units
            .iter()
            .map(|unit| {
                Path::new(unit.as_ref())
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default()
            })
            .collect();
        Self::new(common_dir(&dirs), package_name)
    }

    /// Display name for a module symbol name
    pub fn rewrite(&self, symbol_name: &str) -> String {
        let name = symbol_name.replace('"', "").replace('\\', "/");
        let absolute = name.starts_with('/') || name.contains(":/");

        let mut parts: Vec<String> = if absolute {
            let relative = relative_to(Path::new(&name), &self.base);
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        } else {
            name.split('/').map(str::to_string).collect()
        };

        if absolute {
            match parts.iter().rposition(|p| p == "node_modules") {
                Some(index) => {
                    parts.drain(..=index);
                }
                None => parts.insert(0, self.package_name.clone()),
            }
        }
        if parts.len() > 1 && parts.last().map(String::as_str) == Some("index") {
            parts.pop();
        }
        parts.join("/")
    }
}

/// Longest directory prefix shared by all `dirs`
pub fn common_dir(dirs: &[PathBuf]) -> PathBuf {
    let mut iter = dirs.iter();
    let first = match iter.next() {
        Some(first) => first,
        None => return PathBuf::new(),
    };
    let mut common: Vec<Component> = first.components().collect();
    for dir in iter {
        let shared = common
            .iter()
            .zip(dir.components())
            .take_while(|(a, b)| **a == *b)
            .count();
        common.truncate(shared);
    }
    common.iter().collect()
}

/// `path` relative to `base`, walking up with `..` where needed
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();
    let shared = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in shared..base_parts.len() {
        out.push("..");
    }
    for part in &path_parts[shared..] {
        out.push(part.as_os_str());
    }
    out
}
