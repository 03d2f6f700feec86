// Symbol classification
//
// Decides, once per alias-resolved symbol, what a symbol is, where a
// reference to it goes on some other page, and whether it gets a page of its
// own. The answer is plain data; the generator acts on it. A second map from
// type handles to the symbol that first documented them collapses a class's
// static side, instance side and prototype onto a single page.

use crate::model::{PageKind, SectionKey};
use crate::oracle::{self, DeclarationId, SymbolId, TypeId, TypeOracle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

/// Descriptive kind of a classified symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolKind {
    /// No declarations; never placed anywhere
    Unclassified,
    Module,
    Namespace,
    Class,
    Function,
    Interface,
    TypeAlias,
    Enumeration,
    Member,
}

/// Whether an inserted entry also requests elaboration of its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    Subpage,
    Inline,
}

/// How a reference to the symbol is inserted into another page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub section: SectionKey,
    pub mode: PlacementMode,
    /// Symbol the entry points at; differs from the classified symbol after a redirect
    pub target: SymbolId,
}

/// How a page created for the symbol gets filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
    /// Properties and exports of the value type, then the instance side
    Value { ty: TypeId },
    /// Instance side only
    Interface,
}

/// Memoized classification of one symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub symbol: SymbolId,
    pub kind: SymbolKind,
    pub placement: Option<Placement>,
    /// Kind of the page the symbol wants, if it wants one
    pub page: Option<PageKind>,
    pub population: Option<Population>,
    /// Set when the symbol borrows the entry of an already documented type
    pub redirected: bool,
}

impl Classification {
    fn unclassified(symbol: SymbolId) -> Self {
        Self {
            symbol,
            kind: SymbolKind::Unclassified,
            placement: None,
            page: None,
            population: None,
            redirected: false,
        }
    }

    fn inline(symbol: SymbolId, kind: SymbolKind, section: SectionKey) -> Self {
        Self {
            symbol,
            kind,
            placement: Some(Placement {
                section,
                mode: PlacementMode::Inline,
                target: symbol,
            }),
            page: None,
            population: None,
            redirected: false,
        }
    }

    fn with_page(
        symbol: SymbolId,
        kind: SymbolKind,
        section: SectionKey,
        page: PageKind,
        population: Population,
    ) -> Self {
        Self {
            symbol,
            kind,
            placement: Some(Placement {
                section,
                mode: PlacementMode::Subpage,
                target: symbol,
            }),
            page: Some(page),
            population: Some(population),
            redirected: false,
        }
    }

    pub fn wants_page(&self) -> bool {
        self.page.is_some()
    }
}

/// Classification cache plus the type-to-target map used for deduplication
#[derive(Debug, Default)]
pub struct Classifier {
    cache: HashMap<SymbolId, Rc<Classification>>,
    type_targets: HashMap<TypeId, SymbolId>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `symbol` after resolving aliases.
    ///
    /// Repeated calls for the same underlying symbol return the same `Rc`
    /// without consulting the oracle again.
    pub fn classify<O: TypeOracle + ?Sized>(
        &mut self,
        oracle: &O,
        symbol: SymbolId,
    ) -> oracle::Result<Rc<Classification>> {
        let symbol = oracle.resolve_alias(symbol)?;
        if let Some(cached) = self.cache.get(&symbol) {
            return Ok(Rc::clone(cached));
        }
        let classification = Rc::new(self.decide(oracle, symbol)?);
        debug!(symbol = symbol.0, kind = ?classification.kind, "Classified");
        self.cache.insert(symbol, Rc::clone(&classification));
        Ok(classification)
    }

    pub fn kind_of(&self, symbol: SymbolId) -> Option<SymbolKind> {
        self.cache.get(&symbol).map(|c| c.kind)
    }

    /// Symbol whose page documents `ty`, if any
    pub fn documented_by(&self, ty: TypeId) -> Option<SymbolId> {
        self.type_targets.get(&ty).copied()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn decide<O: TypeOracle + ?Sized>(
        &mut self,
        oracle: &O,
        symbol: SymbolId,
    ) -> oracle::Result<Classification> {
        let declarations = declarations_or_empty(oracle, symbol);
        if declarations.is_empty() {
            return Ok(Classification::unclassified(symbol));
        }

        if oracle.is_module(symbol)? {
            let ty = oracle.type_of_symbol(symbol, declarations.first().copied())?;
            self.record_shape(oracle, ty, symbol)?;
            return Ok(Classification::with_page(
                symbol,
                SymbolKind::Module,
                SectionKey::Modules,
                PageKind::Module,
                Population::Value { ty },
            ));
        }

        if oracle.is_enum(symbol)? {
            let ty = oracle.type_of_symbol(symbol, declarations.first().copied())?;
            self.record_shape(oracle, ty, symbol)?;
            return Ok(Classification::with_page(
                symbol,
                SymbolKind::Enumeration,
                SectionKey::Enumerations,
                PageKind::Namespace,
                Population::Value { ty },
            ));
        }

        if !oracle.has_value_declaration(symbol)? {
            let declared = oracle.declared_type_of_symbol(symbol)?;
            if oracle.is_object_like(declared)? {
                return Ok(Classification::with_page(
                    symbol,
                    SymbolKind::Interface,
                    SectionKey::Types,
                    PageKind::Interface,
                    Population::Interface,
                ));
            }
            return Ok(Classification::inline(
                symbol,
                SymbolKind::TypeAlias,
                SectionKey::Types,
            ));
        }

        self.decide_value(oracle, symbol, declarations.first().copied())
    }

    fn decide_value<O: TypeOracle + ?Sized>(
        &mut self,
        oracle: &O,
        symbol: SymbolId,
        declaration: Option<DeclarationId>,
    ) -> oracle::Result<Classification> {
        let ty = oracle.type_of_symbol(symbol, declaration)?;

        if let Some(original) = self.documented_by(ty).filter(|&s| s != symbol) {
            return Ok(self.redirect(symbol, original));
        }

        let object_like = oracle.is_object_like(ty)?;
        let construct_signatures = oracle.construct_signatures(ty)?;
        let call_signatures = oracle.call_signatures(ty)?;
        let properties = oracle.properties_of_type(ty)?;
        let exports = oracle.exports_of_module(symbol)?;

        if object_like
            && (!construct_signatures.is_empty() || !exports.is_empty() || !properties.is_empty())
        {
            let (kind, section, page) = if !construct_signatures.is_empty() {
                (SymbolKind::Class, SectionKey::Classes, PageKind::Class)
            } else if !call_signatures.is_empty() {
                (SymbolKind::Function, SectionKey::Properties, PageKind::Function)
            } else {
                (SymbolKind::Namespace, SectionKey::Namespaces, PageKind::Namespace)
            };

            self.record(ty, symbol);
            if let Some(&first) = construct_signatures.first() {
                let instance = oracle.signature_return_type(first)?;
                if instance != ty {
                    self.record_shape(oracle, instance, symbol)?;
                }
            }
            for property in &properties {
                if oracle.symbol_name(*property)? == "prototype" {
                    let prototype = oracle.type_of_symbol(*property, None)?;
                    if prototype != ty {
                        self.record_shape(oracle, prototype, symbol)?;
                    }
                }
            }

            return Ok(Classification::with_page(
                symbol,
                kind,
                section,
                page,
                Population::Value { ty },
            ));
        }

        if object_like && !call_signatures.is_empty() {
            return Ok(Classification::inline(
                symbol,
                SymbolKind::Function,
                SectionKey::Properties,
            ));
        }

        Ok(Classification::inline(
            symbol,
            SymbolKind::Member,
            SectionKey::Properties,
        ))
    }

    /// Borrow the entry of `original` for `symbol`
    fn redirect(&self, symbol: SymbolId, original: SymbolId) -> Classification {
        let (kind, section) = match self.cache.get(&original) {
            Some(c) => (
                c.kind,
                c.placement
                    .map(|p| p.section)
                    .unwrap_or(SectionKey::Properties),
            ),
            None => (SymbolKind::Member, SectionKey::Properties),
        };
        debug!(symbol = symbol.0, original = original.0, "Redirected to documented type");
        Classification {
            symbol,
            kind,
            placement: Some(Placement {
                section,
                mode: PlacementMode::Inline,
                target: original,
            }),
            page: None,
            population: None,
            redirected: true,
        }
    }

    /// Record `ty` only when it has a shape of its own. Primitive and
    /// unknown types are shared by unrelated symbols.
    fn record_shape<O: TypeOracle + ?Sized>(
        &mut self,
        oracle: &O,
        ty: TypeId,
        symbol: SymbolId,
    ) -> oracle::Result<()> {
        if oracle.is_object_like(ty)? {
            self.record(ty, symbol);
        }
        Ok(())
    }

    fn record(&mut self, ty: TypeId, symbol: SymbolId) {
        self.type_targets.entry(ty).or_insert(symbol);
    }
}

/// Declarations of `symbol`, treating an oracle failure as "none"
pub fn declarations_or_empty<O: TypeOracle + ?Sized>(
    oracle: &O,
    symbol: SymbolId,
) -> Vec<DeclarationId> {
    match oracle.declarations_of(symbol) {
        Ok(declarations) => declarations,
        Err(e) => {
            warn!(symbol = symbol.0, error = %e, "Declarations unavailable, leaving unclassified");
            Vec::new()
        }
    }
}
