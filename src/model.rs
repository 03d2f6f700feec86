// Page, section and entry model
//
// The output document tree lives in one arena. Pages hold a fixed set of
// sections, sections hold entries, and an entry is the only thing that can
// parent a page, so the pages form a tree even when the symbol graph behind
// them has cycles.

use crate::oracle::{SignatureId, SymbolId};
use crate::registry::ROOT_PAGE_ID;
use serde::{Deserialize, Serialize};

/// Handle to a page in a [`PageTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageKey(pub usize);

/// Handle to an entry in a [`PageTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryKey(pub usize);

/// Kind of documentation page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Root,
    Module,
    Namespace,
    Class,
    Function,
    Interface,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Root => "root",
            PageKind::Module => "module",
            PageKind::Namespace => "namespace",
            PageKind::Class => "class",
            PageKind::Function => "function",
            PageKind::Interface => "interface",
        }
    }
}

/// How the entries of a section are serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStrategy {
    /// Entry references a symbol
    SymbolReference,
    /// Entry describes a call or construct signature
    Signature,
    /// Entry points at the page grouping global declarations
    GlobalsGrouping,
}

/// The named sections every page carries, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKey {
    Modules,
    Globals,
    Namespaces,
    Classes,
    Enumerations,
    Types,
    CallSignatures,
    Constructors,
    Properties,
    InstanceCallSignatures,
    InstanceConstructors,
    InstanceProperties,
}

impl SectionKey {
    pub const ALL: [SectionKey; 12] = [
        SectionKey::Modules,
        SectionKey::Globals,
        SectionKey::Namespaces,
        SectionKey::Classes,
        SectionKey::Enumerations,
        SectionKey::Types,
        SectionKey::CallSignatures,
        SectionKey::Constructors,
        SectionKey::Properties,
        SectionKey::InstanceCallSignatures,
        SectionKey::InstanceConstructors,
        SectionKey::InstanceProperties,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Modules => "modules",
            SectionKey::Globals => "globals",
            SectionKey::Namespaces => "namespaces",
            SectionKey::Classes => "classes",
            SectionKey::Enumerations => "enumerations",
            SectionKey::Types => "types",
            SectionKey::CallSignatures => "call-signatures",
            SectionKey::Constructors => "constructors",
            SectionKey::Properties => "properties",
            SectionKey::InstanceCallSignatures => "instance-call-signatures",
            SectionKey::InstanceConstructors => "instance-constructors",
            SectionKey::InstanceProperties => "instance-properties",
        }
    }

    pub fn strategy(&self) -> SectionStrategy {
        match self {
            SectionKey::Globals => SectionStrategy::GlobalsGrouping,
            SectionKey::CallSignatures
            | SectionKey::Constructors
            | SectionKey::InstanceCallSignatures
            | SectionKey::InstanceConstructors => SectionStrategy::Signature,
            _ => SectionStrategy::SymbolReference,
        }
    }

    fn index(&self) -> usize {
        SectionKey::ALL
            .iter()
            .position(|k| k == self)
            .unwrap_or_default()
    }
}

/// What an entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTarget {
    Symbol(SymbolId),
    Page(PageKey),
    Signature(SignatureId),
}

/// A named reference placed in one section of one page
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub id: String,
    pub target: EntryTarget,
    /// Page owning the section this entry sits in
    pub page: PageKey,
    pub section: SectionKey,
    /// Whether the entry was placed as a subpage (and enqueued)
    pub subpage: bool,
}

/// Ordered entries under one page
#[derive(Debug, Clone)]
pub struct Section {
    pub key: SectionKey,
    pub entries: Vec<EntryKey>,
}

impl Section {
    pub fn strategy(&self) -> SectionStrategy {
        self.key.strategy()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One documentation page
#[derive(Debug, Clone)]
pub struct Page {
    pub kind: PageKind,
    pub name: String,
    pub id: String,
    /// Entry that caused this page to be created; `None` only for the root
    pub parent: Option<EntryKey>,
    /// Symbol backing the page, if any
    pub symbol: Option<SymbolId>,
    pub subpages: Vec<PageKey>,
    sections: Vec<Section>,
}

impl Page {
    fn new(
        kind: PageKind,
        name: String,
        id: String,
        parent: Option<EntryKey>,
        symbol: Option<SymbolId>,
    ) -> Self {
        Self {
            kind,
            name,
            id,
            parent,
            symbol,
            subpages: Vec::new(),
            sections: SectionKey::ALL
                .iter()
                .map(|&key| Section {
                    key,
                    entries: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn section(&self, key: SectionKey) -> &Section {
        &self.sections[key.index()]
    }

    /// All sections in output order, empty ones included
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

/// Arena holding every page and entry of one generation run
#[derive(Debug, Clone)]
pub struct PageTree {
    pages: Vec<Page>,
    entries: Vec<Entry>,
}

impl PageTree {
    /// Create a tree containing only the root page
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = Page::new(
            PageKind::Root,
            root_name.into(),
            ROOT_PAGE_ID.to_string(),
            None,
            None,
        );
        Self {
            pages: vec![root],
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> PageKey {
        PageKey(0)
    }

    pub fn page(&self, key: PageKey) -> &Page {
        &self.pages[key.0]
    }

    pub fn entry(&self, key: EntryKey) -> &Entry {
        &self.entries[key.0]
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Id of the parent entry of `page`, empty for the root
    pub fn entry_prefix(&self, page: PageKey) -> &str {
        match self.page(page).parent {
            Some(parent) => &self.entry(parent).id,
            None => "",
        }
    }

    /// Append an entry to a section of `page`
    pub fn add_entry(
        &mut self,
        page: PageKey,
        section: SectionKey,
        name: impl Into<String>,
        id: String,
        target: EntryTarget,
        subpage: bool,
    ) -> EntryKey {
        let key = EntryKey(self.entries.len());
        self.entries.push(Entry {
            name: name.into(),
            id,
            target,
            page,
            section,
            subpage,
        });
        self.pages[page.0].sections[section.index()].entries.push(key);
        key
    }

    /// Create a page under the page owning `parent`
    pub fn add_page(
        &mut self,
        parent: EntryKey,
        kind: PageKind,
        id: String,
        symbol: Option<SymbolId>,
    ) -> PageKey {
        let key = PageKey(self.pages.len());
        let (owner, name) = {
            let entry = self.entry(parent);
            (entry.page, entry.name.clone())
        };
        self.pages.push(Page::new(kind, name, id, Some(parent), symbol));
        self.pages[owner.0].subpages.push(key);
        key
    }

    /// Create a page not backed by any symbol, together with the entry
    /// pointing at it
    pub fn add_grouping_page(
        &mut self,
        page: PageKey,
        section: SectionKey,
        name: String,
        entry_id: String,
        kind: PageKind,
        page_id: String,
    ) -> (EntryKey, PageKey) {
        let entry = EntryKey(self.entries.len());
        let grouped = PageKey(self.pages.len());
        self.entries.push(Entry {
            name: name.clone(),
            id: entry_id,
            target: EntryTarget::Page(grouped),
            page,
            section,
            subpage: false,
        });
        self.pages[page.0].sections[section.index()].entries.push(entry);
        self.pages.push(Page::new(kind, name, page_id, Some(entry), None));
        self.pages[page.0].subpages.push(grouped);
        (entry, grouped)
    }

    /// Pages in pre-order: root first, then depth-first through subpages
    pub fn pre_order(&self) -> Vec<PageKey> {
        let mut order = Vec::with_capacity(self.pages.len());
        let mut stack = vec![self.root()];
        while let Some(key) = stack.pop() {
            order.push(key);
            stack.extend(self.page(key).subpages.iter().rev().copied());
        }
        order
    }

    /// Human readable location of a page, e.g. `index » modules » a`
    pub fn page_path(&self, page: PageKey) -> String {
        match self.page(page).parent {
            Some(parent) => self.entry_path(parent),
            None => self.page(page).id.clone(),
        }
    }

    /// Human readable location of an entry: `parent » section » name`
    pub fn entry_path(&self, entry: EntryKey) -> String {
        let e = self.entry(entry);
        format!(
            "{} » {} » {}",
            self.page_path(e.page),
            e.section.as_str(),
            e.name
        )
    }
}
