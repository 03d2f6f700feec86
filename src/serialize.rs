// Document serializer
//
// Turns a finished generation into the plain JSON document consumed by
// renderers: metadata, pages in pre-order, and a table of symbol records.
// A failure while formatting a page or entry is wrapped with the location
// of that node and returned; no partial document is produced.

use crate::classify::SymbolKind;
use crate::error::{Error, Result};
use crate::generator::Generation;
use crate::model::{EntryKey, EntryTarget, PageKey, PageKind, SectionKey, SectionStrategy};
use crate::oracle::{DocComment, DocTag, SignatureId, SourceLocation, SymbolId, TypeId, TypeOracle};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// The serialized documentation model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documentation {
    pub metadata: Metadata,
    pub pages: Vec<PageRecord>,
    pub symbols: BTreeMap<String, SymbolRecord>,
}

impl Documentation {
    pub fn page(&self, id: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub generator: String,
    pub generator_version: String,
    /// RFC 3339 timestamp, UTC
    pub generated_at: String,
}

impl Metadata {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generator: env!("CARGO_PKG_NAME").to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: String,
    pub name: String,
    pub kind: PageKind,
    pub subpages: Vec<String>,
    pub sections: Vec<SectionRecord>,
}

impl PageRecord {
    pub fn section(&self, key: SectionKey) -> Option<&SectionRecord> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Entry names of a section, empty if the section was omitted
    pub fn entry_names(&self, key: SectionKey) -> Vec<&str> {
        self.section(key)
            .map(|s| s.entries.iter().map(EntryRecord::name).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub key: SectionKey,
    pub entries: Vec<EntryRecord>,
}

/// An entry, shaped by the strategy of its section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryRecord {
    Signature(SignatureRecord),
    Symbol(SymbolEntryRecord),
    Globals(GlobalsRecord),
}

impl EntryRecord {
    pub fn name(&self) -> &str {
        match self {
            EntryRecord::Signature(r) => &r.name,
            EntryRecord::Symbol(r) => &r.name,
            EntryRecord::Globals(r) => &r.name,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EntryRecord::Signature(r) => &r.id,
            EntryRecord::Symbol(r) => &r.id,
            EntryRecord::Globals(r) => &r.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolEntryRecord {
    pub name: String,
    pub id: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SymbolKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Member declared outside the symbol that owns the page
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inherited: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    pub name: String,
    pub id: String,
    pub parameters: Vec<ParameterRecord>,
    pub return_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<DeclarationRecord>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub documentation_comment: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub js_doc_tags: Vec<DocTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRecord {
    pub name: String,
    pub symbol: String,
    pub type_string: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalsRecord {
    pub name: String,
    pub id: String,
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declarations: Option<Vec<DeclarationRecord>>,
    /// Printed type at the first declaration; the declared type for pure types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_string: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub documentation_comment: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub js_doc_tags: Vec<DocTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationRecord {
    pub line: usize,
    pub character: usize,
    pub position: usize,
    pub source_file: String,
}

impl From<SourceLocation> for DeclarationRecord {
    fn from(location: SourceLocation) -> Self {
        Self {
            line: location.line,
            character: location.character,
            position: location.position,
            source_file: location.file,
        }
    }
}

/// Walks a [`Generation`] and produces a [`Documentation`]
pub struct Serializer<'a, O: TypeOracle + ?Sized> {
    oracle: &'a O,
    generation: &'a Generation,
}

impl<'a, O: TypeOracle + ?Sized> Serializer<'a, O> {
    pub fn new(oracle: &'a O, generation: &'a Generation) -> Self {
        Self { oracle, generation }
    }

    pub fn serialize(&self, metadata: Metadata) -> Result<Documentation> {
        let tree = &self.generation.tree;
        let pages = tree
            .pre_order()
            .into_iter()
            .map(|key| {
                self.page_record(key)
                    .map_err(|e| e.at(tree.page_path(key)))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut symbols = BTreeMap::new();
        for &symbol in self.generation.symbols.symbols() {
            let id = self.symbol_id(symbol)?;
            let record = self
                .symbol_record(symbol)
                .map_err(|e| e.at(format!("symbol {}", id)))?;
            symbols.insert(id, record);
        }

        Ok(Documentation {
            metadata,
            pages,
            symbols,
        })
    }

    fn page_record(&self, key: PageKey) -> Result<PageRecord> {
        let tree = &self.generation.tree;
        let page = tree.page(key);

        let mut sections = Vec::new();
        for section in page.sections() {
            let mut entries = Vec::with_capacity(section.entries.len());
            for &entry in &section.entries {
                let record = self
                    .entry_record(entry, section.strategy())
                    .map_err(|e| e.at(tree.entry_path(entry)))?;
                entries.extend(record);
            }
            if !entries.is_empty() {
                sections.push(SectionRecord {
                    key: section.key,
                    entries,
                });
            }
        }

        Ok(PageRecord {
            id: page.id.clone(),
            name: page.name.clone(),
            kind: page.kind,
            subpages: page
                .subpages
                .iter()
                .map(|&sub| tree.page(sub).id.clone())
                .collect(),
            sections,
        })
    }

    /// `None` for entries that lead nowhere and are skipped
    fn entry_record(&self, key: EntryKey, strategy: SectionStrategy) -> Result<Option<EntryRecord>> {
        let entry = self.generation.tree.entry(key);
        let record = match (strategy, entry.target) {
            (SectionStrategy::SymbolReference, EntryTarget::Symbol(symbol)) => {
                let kind = self.generation.kind_of(symbol);
                if kind == Some(SymbolKind::Unclassified) {
                    return Ok(None);
                }
                let inherited = match (entry.section, self.generation.tree.page(entry.page).symbol) {
                    (SectionKey::Properties | SectionKey::InstanceProperties, Some(owner)) => {
                        self.oracle.is_inherited(symbol, owner)?
                    }
                    _ => false,
                };
                EntryRecord::Symbol(SymbolEntryRecord {
                    name: entry.name.clone(),
                    id: entry.id.clone(),
                    symbol: self.symbol_id(symbol)?,
                    kind,
                    page: self.page_id_of(symbol),
                    inherited,
                })
            }
            (SectionStrategy::Signature, EntryTarget::Signature(signature)) => {
                EntryRecord::Signature(self.signature_record(&entry.name, &entry.id, signature)?)
            }
            (SectionStrategy::GlobalsGrouping, EntryTarget::Page(page)) => {
                EntryRecord::Globals(GlobalsRecord {
                    name: entry.name.clone(),
                    id: entry.id.clone(),
                    page: self.generation.tree.page(page).id.clone(),
                })
            }
            (strategy, target) => {
                return Err(Error::registry(format!(
                    "entry {} targets {:?} in a {:?} section",
                    entry.id, target, strategy
                )))
            }
        };
        Ok(Some(record))
    }

    fn signature_record(&self, name: &str, id: &str, signature: SignatureId) -> Result<SignatureRecord> {
        let mut parameters = Vec::new();
        for parameter in self.oracle.signature_parameters(signature)? {
            let resolved = self.oracle.resolve_alias(parameter)?;
            parameters.push(ParameterRecord {
                name: self.oracle.symbol_name(parameter)?,
                symbol: self.symbol_id(resolved)?,
                type_string: self.type_string(self.oracle.type_of_symbol(resolved, None)?),
            });
        }
        let return_type = self.type_string(self.oracle.signature_return_type(signature)?);
        let declaration = match self.oracle.signature_declaration(signature)? {
            Some(d) => Some(self.oracle.source_location_of(d)?.into()),
            None => None,
        };
        let DocComment { text, tags } = self.oracle.signature_documentation(signature)?;
        Ok(SignatureRecord {
            name: name.to_string(),
            id: id.to_string(),
            parameters,
            return_type,
            declaration,
            documentation_comment: text,
            js_doc_tags: tags,
        })
    }

    fn symbol_record(&self, symbol: SymbolId) -> Result<SymbolRecord> {
        let tree = &self.generation.tree;
        let declared_at = self
            .oracle
            .declarations_of(symbol)
            .unwrap_or_default();
        let (declarations, type_string) = match declared_at.first().copied() {
            Some(first) => {
                let ty = if self.oracle.has_value_declaration(symbol)? {
                    self.oracle.type_of_symbol(symbol, Some(first))?
                } else {
                    self.oracle.declared_type_of_symbol(symbol)?
                };
                let declarations = declared_at
                    .into_iter()
                    .map(|d| self.oracle.source_location_of(d).map(DeclarationRecord::from))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                (Some(declarations), Some(self.type_string(ty)))
            }
            None => (None, None),
        };
        let DocComment { text, tags } = self.oracle.symbol_documentation(symbol)?;
        Ok(SymbolRecord {
            name: self.oracle.symbol_name(symbol)?,
            entry_id: self
                .generation
                .owner_of(symbol)
                .map(|entry| tree.entry(entry).id.clone()),
            page_id: self.page_id_of(symbol),
            declarations,
            type_string,
            documentation_comment: text,
            js_doc_tags: tags,
        })
    }

    fn symbol_id(&self, symbol: SymbolId) -> Result<String> {
        self.generation
            .symbols
            .get(symbol)
            .map(str::to_string)
            .ok_or_else(|| Error::registry(format!("symbol {:?} was never registered", symbol)))
    }

    fn page_id_of(&self, symbol: SymbolId) -> Option<String> {
        self.generation
            .page_of(symbol)
            .map(|page| self.generation.tree.page(page).id.clone())
    }

    /// Print a type, substituting a best-effort string when the oracle cannot
    fn type_string(&self, ty: TypeId) -> String {
        match self.oracle.type_to_string(ty) {
            Ok(text) => text,
            Err(e) => {
                let fallback = self.oracle.fallback_type_string(ty);
                warn!(error = %e, fallback = %fallback, "Type could not be printed");
                fallback
            }
        }
    }
}

/// Serialize `generation` with the given metadata
pub fn serialize<O: TypeOracle + ?Sized>(
    oracle: &O,
    generation: &Generation,
    metadata: Metadata,
) -> Result<Documentation> {
    Serializer::new(oracle, generation).serialize(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::oracle::{DeclarationId, OracleError, ProgramSnapshot};
    use chrono::TimeZone;
    use serde_json::json;

    fn class_unit() -> ProgramSnapshot {
        let decl = json!([{ "file": "/p/k.ts", "line": 0, "character": 0, "position": 0 }]);
        ProgramSnapshot::from_value(json!({
            "sourceUnits": [{ "path": "/p/k.ts", "module": "k" }],
            "symbols": {
                "k": { "name": "\"/p/k\"", "module": true, "value": true, "declarations": decl.clone(),
                       "exports": ["K"] },
                "K": { "value": true, "declarations": decl, "type": "K_static" }
            },
            "types": {
                "K_static": { "text": "typeof K", "constructSignatures": ["new_K"] },
                "K_inst": {}
            },
            "signatures": { "new_K": { "returnType": "K_inst" } }
        }))
        .unwrap()
    }

    /// Delegates to a snapshot but cannot list signature parameters
    struct NoParameters<'a>(&'a ProgramSnapshot);

    impl TypeOracle for NoParameters<'_> {
        fn resolve_alias(&self, symbol: SymbolId) -> crate::oracle::Result<SymbolId> {
            self.0.resolve_alias(symbol)
        }
        fn symbol_name(&self, symbol: SymbolId) -> crate::oracle::Result<String> {
            self.0.symbol_name(symbol)
        }
        fn declarations_of(&self, symbol: SymbolId) -> crate::oracle::Result<Vec<DeclarationId>> {
            self.0.declarations_of(symbol)
        }
        fn source_location_of(&self, declaration: DeclarationId) -> crate::oracle::Result<SourceLocation> {
            self.0.source_location_of(declaration)
        }
        fn has_value_declaration(&self, symbol: SymbolId) -> crate::oracle::Result<bool> {
            self.0.has_value_declaration(symbol)
        }
        fn is_module(&self, symbol: SymbolId) -> crate::oracle::Result<bool> {
            self.0.is_module(symbol)
        }
        fn type_of_symbol(
            &self,
            symbol: SymbolId,
            declaration: Option<DeclarationId>,
        ) -> crate::oracle::Result<TypeId> {
            self.0.type_of_symbol(symbol, declaration)
        }
        fn declared_type_of_symbol(&self, symbol: SymbolId) -> crate::oracle::Result<TypeId> {
            self.0.declared_type_of_symbol(symbol)
        }
        fn exports_of_module(&self, symbol: SymbolId) -> crate::oracle::Result<Vec<SymbolId>> {
            self.0.exports_of_module(symbol)
        }
        fn members_of(&self, symbol: SymbolId) -> crate::oracle::Result<Vec<SymbolId>> {
            self.0.members_of(symbol)
        }
        fn call_signatures(&self, ty: TypeId) -> crate::oracle::Result<Vec<SignatureId>> {
            self.0.call_signatures(ty)
        }
        fn construct_signatures(&self, ty: TypeId) -> crate::oracle::Result<Vec<SignatureId>> {
            self.0.construct_signatures(ty)
        }
        fn properties_of_type(&self, ty: TypeId) -> crate::oracle::Result<Vec<SymbolId>> {
            self.0.properties_of_type(ty)
        }
        fn is_object_like(&self, ty: TypeId) -> crate::oracle::Result<bool> {
            self.0.is_object_like(ty)
        }
        fn is_class_or_interface(&self, ty: TypeId) -> crate::oracle::Result<bool> {
            self.0.is_class_or_interface(ty)
        }
        fn type_to_string(&self, ty: TypeId) -> crate::oracle::Result<String> {
            self.0.type_to_string(ty)
        }
        fn signature_parameters(&self, signature: SignatureId) -> crate::oracle::Result<Vec<SymbolId>> {
            Err(OracleError::UnknownSignature(signature))
        }
        fn signature_return_type(&self, signature: SignatureId) -> crate::oracle::Result<TypeId> {
            self.0.signature_return_type(signature)
        }
        fn signature_declaration(
            &self,
            signature: SignatureId,
        ) -> crate::oracle::Result<Option<DeclarationId>> {
            self.0.signature_declaration(signature)
        }
        fn ambient_modules(&self) -> crate::oracle::Result<Vec<SymbolId>> {
            self.0.ambient_modules()
        }
        fn module_of_source_unit(&self, path: &str) -> crate::oracle::Result<Option<SymbolId>> {
            self.0.module_of_source_unit(path)
        }
        fn globals(&self) -> crate::oracle::Result<Vec<SymbolId>> {
            self.0.globals()
        }
    }

    #[test]
    fn test_metadata_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let metadata = Metadata::new(at);
        assert_eq!(metadata.generator, "docgraph");
        assert_eq!(metadata.generated_at, "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn test_entry_record_shapes() {
        let symbol = EntryRecord::Symbol(SymbolEntryRecord {
            name: "Thing".to_string(),
            id: "a.Thing".to_string(),
            symbol: "Thing$2".to_string(),
            kind: Some(SymbolKind::Class),
            page: Some("a-Thing".to_string()),
            inherited: false,
        });
        let json = serde_json::to_value(&symbol).unwrap();
        assert_eq!(json["kind"], "class");
        assert_eq!(json["page"], "a-Thing");
        assert!(json.get("inherited").is_none());

        let alias = EntryRecord::Symbol(SymbolEntryRecord {
            name: "YesNo".to_string(),
            id: "a.YesNo".to_string(),
            symbol: "YesNo$3".to_string(),
            kind: Some(SymbolKind::TypeAlias),
            page: None,
            inherited: true,
        });
        let json = serde_json::to_value(&alias).unwrap();
        assert_eq!(json["kind"], "type-alias");
        assert!(json.get("page").is_none());
        assert_eq!(json["inherited"], true);
    }

    #[test]
    fn test_symbol_record_omits_missing_fields() {
        let record = SymbolRecord {
            name: "ghost".to_string(),
            entry_id: None,
            page_id: None,
            declarations: None,
            type_string: None,
            documentation_comment: String::new(),
            js_doc_tags: Vec::new(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "ghost" }));
    }

    #[test]
    fn test_unprintable_type_falls_back() {
        let snap = class_unit();
        let generation = generate(&snap, &["/p/k.ts"]).unwrap();
        let doc = serialize(&snap, &generation, Metadata::now()).unwrap();

        let page = doc.page("--k-K").unwrap();
        match &page.section(SectionKey::Constructors).unwrap().entries[0] {
            EntryRecord::Signature(signature) => {
                assert_eq!(signature.return_type, "K_inst");
                assert!(signature.parameters.is_empty());
                assert!(signature.declaration.is_none());
            }
            other => panic!("Expected a signature entry, got {:?}", other),
        }
        assert_eq!(doc.pages[0].entry_names(SectionKey::Modules), vec!["./k"]);
    }

    #[test]
    fn test_oracle_failure_is_located() {
        let snap = class_unit();
        let generation = generate(&snap, &["/p/k.ts"]).unwrap();
        let result = serialize(&NoParameters(&snap), &generation, Metadata::now());

        match result {
            Err(Error::Serialize { path, source }) => {
                assert_eq!(path, "index » modules » ./k » classes » K » constructors » new");
                assert!(matches!(
                    *source,
                    Error::Oracle(OracleError::UnknownSignature(_))
                ));
            }
            Err(other) => panic!("Expected a located error, got {other}"),
            Ok(doc) => panic!("Expected no document, got {} pages", doc.pages.len()),
        }
    }

    #[test]
    fn test_symbol_documentation_and_type_strings() {
        let decl = json!([{ "file": "/p/m.ts", "line": 1, "character": 0, "position": 8 }]);
        let snap = ProgramSnapshot::from_value(json!({
            "sourceUnits": [{ "path": "/p/m.ts", "module": "m" }],
            "symbols": {
                "m": { "name": "\"/p/m\"", "module": true, "value": true, "declarations": decl.clone(),
                       "exports": ["Point", "origin", "scale"] },
                "Point": { "declarations": decl.clone(), "declaredType": "Point_t",
                           "documentationComment": "A point in the plane." },
                "Base#z": { "name": "z", "value": true, "declarations": decl.clone(), "type": "number",
                            "parent": "Base" },
                "Base": {},
                "Point#x": { "name": "x", "value": true, "declarations": decl.clone(), "type": "number",
                             "parent": "Point" },
                "origin": { "value": true, "declarations": decl.clone(), "type": "number",
                            "jsDocTags": [{ "name": "deprecated", "text": "use zero" }] },
                "scale": { "value": true, "declarations": decl.clone(), "type": "scale_t" },
                "scale.by": { "name": "by", "value": true, "declarations": decl, "type": "number" }
            },
            "types": {
                "Point_t": { "text": "Point", "classOrInterface": true, "properties": ["Point#x", "Base#z"] },
                "scale_t": { "text": "(by: number) => void", "callSignatures": ["scale_sig"] },
                "number": { "text": "number" },
                "void": { "text": "void" }
            },
            "signatures": {
                "scale_sig": { "parameters": ["scale.by"], "returnType": "void",
                               "documentationComment": "Scale everything." }
            }
        }))
        .unwrap();
        let generation = generate(&snap, &["/p/m.ts"]).unwrap();
        let doc = serialize(&snap, &generation, Metadata::now()).unwrap();

        let module = doc.page("--m").unwrap();
        let point_entry = module.section(SectionKey::Types).unwrap().entries[0].clone();
        let point = &doc.symbols[match &point_entry {
            EntryRecord::Symbol(record) => record.symbol.as_str(),
            other => panic!("Expected a symbol entry, got {:?}", other),
        }];
        assert_eq!(point.documentation_comment, "A point in the plane.");
        assert_eq!(point.type_string.as_deref(), Some("Point"));

        let point_page = doc.page("--m-Point").unwrap();
        let members = &point_page.section(SectionKey::InstanceProperties).unwrap().entries;
        let inherited: Vec<(&str, bool)> = members
            .iter()
            .map(|e| match e {
                EntryRecord::Symbol(record) => (record.name.as_str(), record.inherited),
                other => panic!("Expected a symbol entry, got {:?}", other),
            })
            .collect();
        assert_eq!(inherited, vec![("x", false), ("z", true)]);

        let origin = doc
            .symbols
            .values()
            .find(|record| record.name == "origin")
            .unwrap();
        assert_eq!(origin.type_string.as_deref(), Some("number"));
        assert_eq!(origin.js_doc_tags[0].text.as_deref(), Some("use zero"));
        let json = serde_json::to_value(origin).unwrap();
        assert!(json.get("documentationComment").is_none());
        assert_eq!(json["jsDocTags"][0]["name"], "deprecated");

        match &module.section(SectionKey::Properties).unwrap().entries[..] {
            [EntryRecord::Symbol(origin), EntryRecord::Symbol(scale)] => {
                assert_eq!(origin.name, "origin");
                assert_eq!(scale.name, "scale");
            }
            other => panic!("Unexpected properties {:?}", other),
        }
        let scale = doc
            .symbols
            .values()
            .find(|record| record.name == "scale")
            .unwrap();
        assert_eq!(scale.type_string.as_deref(), Some("(by: number) => void"));
    }

    #[test]
    fn test_declaration_record_from_location() {
        let record = DeclarationRecord::from(SourceLocation {
            file: "/p/a.ts".to_string(),
            line: 3,
            character: 2,
            position: 41,
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sourceFile"], "/p/a.ts");
        assert_eq!(json["position"], 41);
    }
}
