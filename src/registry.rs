// Identifier registries
//
// Three independent, append-only namespaces. None of them owns domain
// objects; they only hand out string keys. Ids are unique within one
// generation run and depend only on the order in which things are
// registered, so an unchanged traversal yields unchanged ids.

use crate::oracle::SymbolId;
use std::collections::{HashMap, HashSet};

/// Id of the root page
pub const ROOT_PAGE_ID: &str = "index";

/// Dotted entry ids built from the chain of parent entries
#[derive(Debug, Default)]
pub struct EntryIdRegistry {
    assigned: HashSet<String>,
}

impl EntryIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an id for `name` under the entry id `parent` (empty for the root).
    ///
    /// A `$n` suffix is appended only when the plain path is already taken.
    pub fn assign(&mut self, parent: &str, name: &str) -> String {
        let base = if parent.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", parent, name)
        };
        let id = disambiguate(&self.assigned, base, '$');
        self.assigned.insert(id.clone());
        id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.assigned.contains(id)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

/// File and URL safe page ids (the page list)
#[derive(Debug)]
pub struct PageList {
    assigned: HashSet<String>,
}

impl Default for PageList {
    fn default() -> Self {
        Self::new()
    }
}

impl PageList {
    /// Create a page list with the root id already reserved
    pub fn new() -> Self {
        let mut assigned = HashSet::new();
        assigned.insert(ROOT_PAGE_ID.to_string());
        Self { assigned }
    }

    /// Assign a page id derived from the entry id of the page's parent entry
    pub fn assign(&mut self, parent_entry_id: &str) -> String {
        let id = disambiguate(&self.assigned, slugify(parent_entry_id), '_');
        self.assigned.insert(id.clone());
        id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.assigned.contains(id)
    }

    /// Number of page ids handed out, root included
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

/// Opaque `<name>$<n>` ids for alias-resolved symbols
#[derive(Debug)]
pub struct SymbolRegistry {
    ids: HashMap<SymbolId, String>,
    order: Vec<SymbolId>,
    next: usize,
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            order: Vec::new(),
            next: 1,
        }
    }

    /// Return the id of `symbol`, assigning one on first sight.
    ///
    /// Callers pass the resolved symbol; aliases must not reach this point.
    /// The boolean is true when the id was newly assigned.
    pub fn register(&mut self, symbol: SymbolId, name: &str) -> (String, bool) {
        if let Some(id) = self.ids.get(&symbol) {
            return (id.clone(), false);
        }
        let id = format!("{}${}", name, self.next);
        self.next += 1;
        self.ids.insert(symbol, id.clone());
        self.order.push(symbol);
        (id, true)
    }

    pub fn get(&self, symbol: SymbolId) -> Option<&str> {
        self.ids.get(&symbol).map(String::as_str)
    }

    /// Registered symbols in registration order
    pub fn symbols(&self) -> &[SymbolId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Replace every non-word character with a hyphen
pub fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '-' })
        .collect()
}

fn disambiguate(taken: &HashSet<String>, base: String, separator: char) -> String {
    if !taken.contains(&base) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}{}{}", base, separator, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_ids_follow_parent_chain() {
        let mut reg = EntryIdRegistry::new();
        assert_eq!(reg.assign("", "a"), "a");
        assert_eq!(reg.assign("a", "Thing"), "a.Thing");
        assert_eq!(reg.assign("a.Thing", "create"), "a.Thing.create");
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_entry_id_collisions_get_suffix() {
        let mut reg = EntryIdRegistry::new();
        assert_eq!(reg.assign("a", "name"), "a.name");
        assert_eq!(reg.assign("a", "name"), "a.name$1");
        assert_eq!(reg.assign("a", "name"), "a.name$2");
        // same name under another parent is not a collision
        assert_eq!(reg.assign("b", "name"), "b.name");
        assert!(reg.contains("a.name$2"));
    }

    #[test]
    fn test_page_list_reserves_root() {
        let list = PageList::new();
        assert!(list.contains(ROOT_PAGE_ID));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_page_ids_are_slugs() {
        let mut list = PageList::new();
        assert_eq!(list.assign("a.Thing"), "a-Thing");
        assert_eq!(list.assign("./lib/util"), "--lib-util");
        assert_eq!(list.assign("(globals)"), "-globals-");
    }

    #[test]
    fn test_page_id_collisions_get_suffix() {
        let mut list = PageList::new();
        assert_eq!(list.assign("a.b"), "a-b");
        assert_eq!(list.assign("a-b"), "a-b_1");
        assert_eq!(list.assign("a/b"), "a-b_2");
        assert_eq!(list.assign("index"), "index_1");
    }

    #[test]
    fn test_symbol_ids_are_stable() {
        let mut reg = SymbolRegistry::new();
        let (first, fresh) = reg.register(SymbolId(4), "Thing");
        assert_eq!(first, "Thing$1");
        assert!(fresh);
        let (again, fresh) = reg.register(SymbolId(4), "Thing");
        assert_eq!(again, "Thing$1");
        assert!(!fresh);
        let (other, _) = reg.register(SymbolId(9), "Thing");
        assert_eq!(other, "Thing$2");
        assert_eq!(reg.symbols(), &[SymbolId(4), SymbolId(9)]);
        assert_eq!(reg.get(SymbolId(9)), Some("Thing$2"));
        assert_eq!(reg.get(SymbolId(1)), None);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("foo_bar.baz$1"), "foo_bar-baz-1");
        assert_eq!(slugify(""), "");
    }
}
