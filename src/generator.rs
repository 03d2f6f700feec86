// Worklist driver
//
// Seeds the root page from the entry units, then drains a queue of subpage
// entries breadth first. Each pass takes the current queue, clears it and
// elaborates every entry whose target has not been elaborated yet;
// populating a page may enqueue more entries for the next pass. Every
// symbol is elaborated at most once, so the loop reaches a fixed point even
// when modules re-export each other.

use crate::classify::{
    declarations_or_empty, Classification, Classifier, PlacementMode, Population, SymbolKind,
};
use crate::config::Config;
use crate::error::Result;
use crate::model::{EntryKey, EntryTarget, PageKey, PageKind, PageTree, SectionKey};
use crate::naming::ModuleNamer;
use crate::oracle::{SignatureId, SymbolId, TypeOracle};
use crate::registry::{EntryIdRegistry, PageList, SymbolRegistry};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Knobs for one generation run
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Name of the root page
    pub root_name: String,
    /// Prefix for module names that live inside the project
    pub package_name: String,
    pub include_ambient_modules: bool,
    pub document_globals: bool,
    pub globals_page_name: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            root_name: "index".to_string(),
            package_name: ".".to_string(),
            include_ambient_modules: true,
            document_globals: true,
            globals_page_name: "(globals)".to_string(),
        }
    }
}

impl From<&Config> for GeneratorOptions {
    fn from(config: &Config) -> Self {
        Self {
            root_name: config.project.name.clone(),
            package_name: config.project.package_name.clone(),
            include_ambient_modules: config.generator.include_ambient_modules,
            document_globals: config.generator.document_globals,
            globals_page_name: config.generator.globals_page_name.clone(),
        }
    }
}

/// Counters describing a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub pages: usize,
    pub entries: usize,
    pub symbols: usize,
    pub elaborated: usize,
    pub passes: usize,
}

/// The finished page tree together with the registries needed to serialize it
#[derive(Debug)]
pub struct Generation {
    pub tree: PageTree,
    pub symbols: SymbolRegistry,
    pub classifier: Classifier,
    symbol_pages: HashMap<SymbolId, PageKey>,
    symbol_owners: HashMap<SymbolId, EntryKey>,
    pub stats: GenerationStats,
}

impl Generation {
    /// Page documenting `symbol`, if it got one
    pub fn page_of(&self, symbol: SymbolId) -> Option<PageKey> {
        self.symbol_pages.get(&symbol).copied()
    }

    /// First entry that referenced `symbol`
    pub fn owner_of(&self, symbol: SymbolId) -> Option<EntryKey> {
        self.symbol_owners.get(&symbol).copied()
    }

    pub fn kind_of(&self, symbol: SymbolId) -> Option<SymbolKind> {
        self.classifier.kind_of(symbol)
    }

    /// Pages backed by `symbol`
    pub fn pages_for(&self, symbol: SymbolId) -> Vec<PageKey> {
        self.tree
            .pre_order()
            .into_iter()
            .filter(|&key| self.tree.page(key).symbol == Some(symbol))
            .collect()
    }
}

/// Builds a [`Generation`] by walking the program through an oracle
pub struct Generator<'a, O: TypeOracle + ?Sized> {
    oracle: &'a O,
    options: GeneratorOptions,
    namer: ModuleNamer,
    classifier: Classifier,
    tree: PageTree,
    symbols: SymbolRegistry,
    entry_ids: EntryIdRegistry,
    page_ids: PageList,
    symbol_pages: HashMap<SymbolId, PageKey>,
    symbol_owners: HashMap<SymbolId, EntryKey>,
    queue: Vec<EntryKey>,
    elaborated: HashSet<SymbolId>,
    globals_page: Option<PageKey>,
    passes: usize,
}

impl<'a, O: TypeOracle + ?Sized> Generator<'a, O> {
    pub fn new(oracle: &'a O, options: GeneratorOptions) -> Self {
        let tree = PageTree::new(options.root_name.clone());
        let namer = ModuleNamer::new("", options.package_name.clone());
        Self {
            oracle,
            options,
            namer,
            classifier: Classifier::new(),
            tree,
            symbols: SymbolRegistry::new(),
            entry_ids: EntryIdRegistry::new(),
            page_ids: PageList::new(),
            symbol_pages: HashMap::new(),
            symbol_owners: HashMap::new(),
            queue: Vec::new(),
            elaborated: HashSet::new(),
            globals_page: None,
            passes: 0,
        }
    }

    /// Seed from `entry_units` and elaborate until the queue is empty
    pub fn run<S: AsRef<str>>(mut self, entry_units: &[S]) -> Result<Generation> {
        self.namer = ModuleNamer::for_entry_units(entry_units, &self.options.package_name);
        self.seed(entry_units)?;
        while !self.queue.is_empty() {
            self.drain_pass()?;
        }
        Ok(self.finish())
    }

    fn seed<S: AsRef<str>>(&mut self, entry_units: &[S]) -> Result<()> {
        let units: HashSet<&str> = entry_units.iter().map(|u| u.as_ref()).collect();
        let root = self.tree.root();

        for unit in entry_units {
            match self.oracle.module_of_source_unit(unit.as_ref())? {
                Some(module) => self.seed_module(root, module)?,
                None => warn!(unit = unit.as_ref(), "Entry unit is not a module, skipping"),
            }
        }

        if self.options.include_ambient_modules {
            for module in self.oracle.ambient_modules()? {
                if self.declared_in(module, &units) {
                    self.seed_module(root, module)?;
                }
            }
        }

        if self.options.document_globals {
            for global in self.oracle.globals()? {
                if !self.declared_in(global, &units) {
                    continue;
                }
                let page = self.globals_page();
                let classification = self.classifier.classify(self.oracle, global)?;
                let name = self.oracle.symbol_name(global)?;
                self.place(page, &name, &classification)?;
            }
        }
        Ok(())
    }

    fn seed_module(&mut self, root: PageKey, module: SymbolId) -> Result<()> {
        let classification = self.classifier.classify(self.oracle, module)?;
        if classification.kind == SymbolKind::Unclassified {
            warn!(symbol = module.0, "Entry module has no declarations, skipping");
            return Ok(());
        }
        let name = self.namer.rewrite(&self.oracle.symbol_name(module)?);
        self.add_symbol_entry(root, SectionKey::Modules, &name, classification.symbol, true)?;
        Ok(())
    }

    /// Whether any declaration of `symbol` sits in one of `units`
    fn declared_in(&self, symbol: SymbolId, units: &HashSet<&str>) -> bool {
        declarations_or_empty(self.oracle, symbol)
            .into_iter()
            .filter_map(|d| self.oracle.source_location_of(d).ok())
            .any(|location| units.contains(location.file.as_str()))
    }

    /// The single page grouping globals, created on first use
    fn globals_page(&mut self) -> PageKey {
        if let Some(page) = self.globals_page {
            return page;
        }
        let root = self.tree.root();
        let name = self.options.globals_page_name.clone();
        let entry_id = self.entry_ids.assign("", &name);
        let page_id = self.page_ids.assign(&entry_id);
        let (_, page) = self.tree.add_grouping_page(
            root,
            SectionKey::Globals,
            name,
            entry_id,
            PageKind::Namespace,
            page_id,
        );
        self.globals_page = Some(page);
        page
    }

    fn drain_pass(&mut self) -> Result<()> {
        self.passes += 1;
        let batch = std::mem::take(&mut self.queue);
        debug!(pass = self.passes, entries = batch.len(), "Draining worklist");
        for entry in batch {
            self.elaborate(entry)?;
        }
        Ok(())
    }

    fn elaborate(&mut self, entry: EntryKey) -> Result<()> {
        let target = match self.tree.entry(entry).target {
            EntryTarget::Symbol(symbol) => symbol,
            _ => return Ok(()),
        };
        let classification = self.classifier.classify(self.oracle, target)?;
        let symbol = classification.symbol;
        if !self.elaborated.insert(symbol) {
            return Ok(());
        }
        debug!(symbol = symbol.0, entry = %self.tree.entry(entry).id, "Elaborating");

        if let Some(kind) = classification.page {
            if self.symbol_pages.contains_key(&symbol) {
                return Ok(());
            }
            let page_id = self.page_ids.assign(&self.tree.entry(entry).id);
            let page = self.tree.add_page(entry, kind, page_id, Some(symbol));
            self.symbol_pages.insert(symbol, page);
            if let Some(population) = classification.population {
                self.populate(page, symbol, population)?;
            }
        }
        Ok(())
    }

    fn populate(&mut self, page: PageKey, symbol: SymbolId, population: Population) -> Result<()> {
        if let Population::Value { ty } = population {
            let mut members = self.oracle.properties_of_type(ty)?;
            members.extend(self.oracle.exports_of_module(symbol)?);
            for (original, _) in self.dedupe(members)? {
                let classification = self.classifier.classify(self.oracle, original)?;
                if classification.placement.map(|p| p.target) == Some(symbol) {
                    continue;
                }
                let name = self.entry_name(original, &classification)?;
                self.place(page, &name, &classification)?;
            }
            let calls = self.oracle.call_signatures(ty)?;
            self.add_signatures(page, SectionKey::CallSignatures, "call", &calls)?;
            let constructs = self.oracle.construct_signatures(ty)?;
            self.add_signatures(page, SectionKey::Constructors, "new", &constructs)?;
        }
        self.populate_instance(page, symbol)
    }

    fn populate_instance(&mut self, page: PageKey, symbol: SymbolId) -> Result<()> {
        let declared = self.oracle.declared_type_of_symbol(symbol)?;
        let members = if self.oracle.is_class_or_interface(declared)? {
            let calls = self.oracle.call_signatures(declared)?;
            self.add_signatures(page, SectionKey::InstanceCallSignatures, "call", &calls)?;
            let constructs = self.oracle.construct_signatures(declared)?;
            self.add_signatures(page, SectionKey::InstanceConstructors, "new", &constructs)?;
            self.oracle.properties_of_type(declared)?
        } else if !self.oracle.has_value_declaration(symbol)? {
            self.oracle.members_of(symbol)?
        } else {
            return Ok(());
        };

        for (original, resolved) in self.dedupe(members)? {
            if declarations_or_empty(self.oracle, resolved).is_empty() {
                continue;
            }
            let name = self.oracle.symbol_name(original)?;
            self.add_symbol_entry(page, SectionKey::InstanceProperties, &name, resolved, false)?;
        }
        Ok(())
    }

    fn add_signatures(
        &mut self,
        page: PageKey,
        section: SectionKey,
        name: &str,
        signatures: &[SignatureId],
    ) -> Result<()> {
        for &signature in signatures {
            for parameter in self.oracle.signature_parameters(signature)? {
                let parameter = self.oracle.resolve_alias(parameter)?;
                self.register_symbol(parameter)?;
            }
            let id = self.entry_ids.assign(self.tree.entry_prefix(page), name);
            self.tree
                .add_entry(page, section, name, id, EntryTarget::Signature(signature), false);
        }
        Ok(())
    }

    /// Keep the first occurrence of each underlying symbol, in oracle order
    fn dedupe(&self, symbols: Vec<SymbolId>) -> Result<Vec<(SymbolId, SymbolId)>> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let resolved = self.oracle.resolve_alias(symbol)?;
            if seen.insert(resolved) {
                out.push((symbol, resolved));
            }
        }
        Ok(out)
    }

    fn entry_name(&self, original: SymbolId, classification: &Classification) -> Result<String> {
        let name = self.oracle.symbol_name(original)?;
        if classification.kind == SymbolKind::Module {
            return Ok(self.namer.rewrite(&name));
        }
        Ok(name)
    }

    /// Insert a reference according to a classification; unclassified symbols are dropped
    fn place(
        &mut self,
        page: PageKey,
        name: &str,
        classification: &Classification,
    ) -> Result<Option<EntryKey>> {
        match classification.placement {
            Some(placement) => {
                let subpage = placement.mode == PlacementMode::Subpage;
                let entry =
                    self.add_symbol_entry(page, placement.section, name, placement.target, subpage)?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    fn add_symbol_entry(
        &mut self,
        page: PageKey,
        section: SectionKey,
        name: &str,
        symbol: SymbolId,
        subpage: bool,
    ) -> Result<EntryKey> {
        self.register_symbol(symbol)?;
        let id = self.entry_ids.assign(self.tree.entry_prefix(page), name);
        let entry = self
            .tree
            .add_entry(page, section, name, id, EntryTarget::Symbol(symbol), subpage);
        self.symbol_owners.entry(symbol).or_insert(entry);
        if subpage {
            self.queue.push(entry);
        }
        Ok(entry)
    }

    fn register_symbol(&mut self, symbol: SymbolId) -> Result<String> {
        let name = self.oracle.symbol_name(symbol)?;
        let (id, fresh) = self.symbols.register(symbol, &name);
        if fresh {
            debug!(id = %id, "Reading");
        }
        Ok(id)
    }

    fn finish(self) -> Generation {
        let stats = GenerationStats {
            pages: self.tree.page_count(),
            entries: self.tree.entry_count(),
            symbols: self.symbols.len(),
            elaborated: self.elaborated.len(),
            passes: self.passes,
        };
        info!(
            pages = stats.pages,
            entries = stats.entries,
            symbols = stats.symbols,
            passes = stats.passes,
            "Documentation graph built"
        );
        Generation {
            tree: self.tree,
            symbols: self.symbols,
            classifier: self.classifier,
            symbol_pages: self.symbol_pages,
            symbol_owners: self.symbol_owners,
            stats,
        }
    }
}

/// Build the documentation graph for `entry_units` with default options
pub fn generate<O, S>(oracle: &O, entry_units: &[S]) -> Result<Generation>
where
    O: TypeOracle + ?Sized,
    S: AsRef<str>,
{
    Generator::new(oracle, GeneratorOptions::default()).run(entry_units)
}
