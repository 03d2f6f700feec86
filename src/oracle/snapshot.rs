// In-process oracle backed by a serialized program snapshot
//
// A snapshot is a JSON document produced by a type checker front end. It
// names every symbol, type and signature by a string key; loading interns
// those keys into handles and rejects dangling references up front so that
// queries afterwards can only fail for handles that came from elsewhere.

use super::{
    DeclarationId, DocComment, DocTag, OracleError, Result as OracleResult, SignatureId, SourceLocation, SymbolId,
    TypeId, TypeOracle,
};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

const UNKNOWN_TYPE_KEY: &str = "<unknown>";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSnapshot {
    source_units: Vec<RawSourceUnit>,
    ambient_modules: Vec<String>,
    globals: Vec<String>,
    symbols: BTreeMap<String, RawSymbol>,
    types: BTreeMap<String, RawType>,
    signatures: BTreeMap<String, RawSignature>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSourceUnit {
    path: String,
    module: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSymbol {
    name: Option<String>,
    alias_of: Option<String>,
    declarations: Vec<SourceLocation>,
    declarations_unavailable: bool,
    value: bool,
    module: bool,
    #[serde(rename = "enum")]
    enumeration: bool,
    #[serde(rename = "type")]
    ty: Option<String>,
    declared_type: Option<String>,
    exports: Vec<String>,
    members: Vec<String>,
    /// Symbol whose declaration encloses this one
    parent: Option<String>,
    documentation_comment: String,
    js_doc_tags: Vec<DocTag>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawType {
    text: Option<String>,
    object_like: Option<bool>,
    class_or_interface: bool,
    properties: Vec<String>,
    call_signatures: Vec<String>,
    construct_signatures: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSignature {
    parameters: Vec<String>,
    return_type: Option<String>,
    declaration: Option<SourceLocation>,
    documentation_comment: String,
    js_doc_tags: Vec<DocTag>,
}

#[derive(Debug, Clone)]
struct SourceUnit {
    path: String,
    module: Option<SymbolId>,
}

#[derive(Debug, Clone)]
struct SymbolEntry {
    name: String,
    alias_of: Option<SymbolId>,
    declarations: Option<Vec<DeclarationId>>,
    value: bool,
    module: bool,
    enumeration: bool,
    ty: Option<TypeId>,
    declared_type: Option<TypeId>,
    exports: Vec<SymbolId>,
    members: Vec<SymbolId>,
    parent: Option<SymbolId>,
    documentation: DocComment,
}

#[derive(Debug, Clone)]
struct TypeEntry {
    text: Option<String>,
    object_like: bool,
    class_or_interface: bool,
    properties: Vec<SymbolId>,
    call_signatures: Vec<SignatureId>,
    construct_signatures: Vec<SignatureId>,
}

#[derive(Debug, Clone)]
struct SignatureEntry {
    parameters: Vec<SymbolId>,
    return_type: TypeId,
    declaration: Option<DeclarationId>,
    documentation: DocComment,
}

/// A fully indexed program snapshot implementing [`TypeOracle`]
#[derive(Debug, Clone)]
pub struct ProgramSnapshot {
    source_units: Vec<SourceUnit>,
    ambient_modules: Vec<SymbolId>,
    globals: Vec<SymbolId>,
    symbols: Vec<SymbolEntry>,
    symbol_keys: Vec<String>,
    types: Vec<TypeEntry>,
    type_keys: Vec<String>,
    signatures: Vec<SignatureEntry>,
    declarations: Vec<SourceLocation>,
    unknown_type: TypeId,
}

/// Maps string keys to dense handles for one table
struct KeyTable {
    what: &'static str,
    ids: HashMap<String, usize>,
}

impl KeyTable {
    fn new<'a>(what: &'static str, keys: impl Iterator<Item = &'a String>) -> Self {
        let ids = keys.enumerate().map(|(i, k)| (k.clone(), i)).collect();
        Self { what, ids }
    }

    fn get(&self, key: &str, referrer: &str) -> Result<usize> {
        self.ids.get(key).copied().ok_or_else(|| {
            Error::snapshot(format!(
                "{} references unknown {} '{}'",
                referrer, self.what, key
            ))
        })
    }

    fn all(&self, keys: &[String], referrer: &str) -> Result<Vec<usize>> {
        keys.iter().map(|k| self.get(k, referrer)).collect()
    }
}

impl ProgramSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::PathNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSnapshot) -> Result<Self> {
        let symbol_table = KeyTable::new("symbol", raw.symbols.keys());
        let signature_table = KeyTable::new("signature", raw.signatures.keys());

        let mut type_keys: Vec<String> = raw.types.keys().cloned().collect();
        let unknown_type = TypeId(type_keys.len());
        type_keys.push(UNKNOWN_TYPE_KEY.to_string());
        let type_table = KeyTable::new("type", type_keys.iter());

        let mut declarations = Vec::new();
        let mut symbols = Vec::with_capacity(raw.symbols.len());
        for (key, sym) in &raw.symbols {
            let referrer = format!("symbol '{}'", key);
            let decl_ids = if sym.declarations_unavailable {
                None
            } else {
                let mut ids = Vec::with_capacity(sym.declarations.len());
                for location in &sym.declarations {
                    ids.push(DeclarationId(declarations.len()));
                    declarations.push(location.clone());
                }
                Some(ids)
            };
            symbols.push(SymbolEntry {
                name: sym.name.clone().unwrap_or_else(|| key.clone()),
                alias_of: sym
                    .alias_of
                    .as_deref()
                    .map(|k| symbol_table.get(k, &referrer).map(SymbolId))
                    .transpose()?,
                declarations: decl_ids,
                value: sym.value,
                module: sym.module,
                enumeration: sym.enumeration,
                ty: sym
                    .ty
                    .as_deref()
                    .map(|k| type_table.get(k, &referrer).map(TypeId))
                    .transpose()?,
                declared_type: sym
                    .declared_type
                    .as_deref()
                    .map(|k| type_table.get(k, &referrer).map(TypeId))
                    .transpose()?,
                exports: to_symbols(symbol_table.all(&sym.exports, &referrer)?),
                members: to_symbols(symbol_table.all(&sym.members, &referrer)?),
                parent: sym
                    .parent
                    .as_deref()
                    .map(|k| symbol_table.get(k, &referrer).map(SymbolId))
                    .transpose()?,
                documentation: DocComment {
                    text: sym.documentation_comment.clone(),
                    tags: sym.js_doc_tags.clone(),
                },
            });
        }

        let mut types = Vec::with_capacity(type_keys.len());
        for (key, ty) in &raw.types {
            let referrer = format!("type '{}'", key);
            let properties = to_symbols(symbol_table.all(&ty.properties, &referrer)?);
            let call_signatures = to_signatures(signature_table.all(&ty.call_signatures, &referrer)?);
            let construct_signatures =
                to_signatures(signature_table.all(&ty.construct_signatures, &referrer)?);
            let object_like = ty.object_like.unwrap_or(
                ty.class_or_interface
                    || !properties.is_empty()
                    || !call_signatures.is_empty()
                    || !construct_signatures.is_empty(),
            );
            types.push(TypeEntry {
                text: ty.text.clone(),
                object_like,
                class_or_interface: ty.class_or_interface,
                properties,
                call_signatures,
                construct_signatures,
            });
        }
        types.push(TypeEntry {
            text: Some("unknown".to_string()),
            object_like: false,
            class_or_interface: false,
            properties: Vec::new(),
            call_signatures: Vec::new(),
            construct_signatures: Vec::new(),
        });

        let mut signatures = Vec::with_capacity(raw.signatures.len());
        for (key, sig) in &raw.signatures {
            let referrer = format!("signature '{}'", key);
            let return_type = match &sig.return_type {
                Some(k) => TypeId(type_table.get(k, &referrer)?),
                None => unknown_type,
            };
            let declaration = sig.declaration.clone().map(|location| {
                declarations.push(location);
                DeclarationId(declarations.len() - 1)
            });
            signatures.push(SignatureEntry {
                parameters: to_symbols(symbol_table.all(&sig.parameters, &referrer)?),
                return_type,
                declaration,
                documentation: DocComment {
                    text: sig.documentation_comment.clone(),
                    tags: sig.js_doc_tags.clone(),
                },
            });
        }

        let mut source_units = Vec::with_capacity(raw.source_units.len());
        for unit in &raw.source_units {
            let referrer = format!("source unit '{}'", unit.path);
            source_units.push(SourceUnit {
                path: unit.path.clone(),
                module: unit
                    .module
                    .as_deref()
                    .map(|k| symbol_table.get(k, &referrer).map(SymbolId))
                    .transpose()?,
            });
        }

        let snapshot = Self {
            source_units,
            ambient_modules: to_symbols(symbol_table.all(&raw.ambient_modules, "ambientModules")?),
            globals: to_symbols(symbol_table.all(&raw.globals, "globals")?),
            symbols,
            symbol_keys: raw.symbols.keys().cloned().collect(),
            types,
            type_keys,
            signatures,
            declarations,
            unknown_type,
        };
        snapshot.check_alias_cycles()?;
        Ok(snapshot)
    }

    fn check_alias_cycles(&self) -> Result<()> {
        for start in 0..self.symbols.len() {
            let mut seen = HashSet::new();
            let mut current = start;
            while let Some(next) = self.symbols[current].alias_of {
                if !seen.insert(current) {
                    return Err(Error::snapshot(format!(
                        "alias cycle through symbol '{}'",
                        self.symbol_keys[start]
                    )));
                }
                current = next.0;
            }
        }
        Ok(())
    }

    /// Paths of all source units, in snapshot order
    pub fn source_units(&self) -> impl Iterator<Item = &str> {
        self.source_units.iter().map(|u| u.path.as_str())
    }

    /// Look up a symbol handle by its snapshot key
    pub fn symbol_by_key(&self, key: &str) -> Option<SymbolId> {
        self.symbol_keys.iter().position(|k| k == key).map(SymbolId)
    }

    pub fn symbol_key(&self, symbol: SymbolId) -> Option<&str> {
        self.symbol_keys.get(symbol.0).map(String::as_str)
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    fn symbol(&self, symbol: SymbolId) -> OracleResult<&SymbolEntry> {
        self.symbols
            .get(symbol.0)
            .ok_or(OracleError::UnknownSymbol(symbol))
    }

    fn ty(&self, ty: TypeId) -> OracleResult<&TypeEntry> {
        self.types.get(ty.0).ok_or(OracleError::UnknownType(ty))
    }

    fn signature(&self, signature: SignatureId) -> OracleResult<&SignatureEntry> {
        self.signatures
            .get(signature.0)
            .ok_or(OracleError::UnknownSignature(signature))
    }
}

fn to_symbols(ids: Vec<usize>) -> Vec<SymbolId> {
    ids.into_iter().map(SymbolId).collect()
}

fn to_signatures(ids: Vec<usize>) -> Vec<SignatureId> {
    ids.into_iter().map(SignatureId).collect()
}

impl TypeOracle for ProgramSnapshot {
    fn resolve_alias(&self, symbol: SymbolId) -> OracleResult<SymbolId> {
        let mut current = symbol;
        while let Some(target) = self.symbol(current)?.alias_of {
            current = target;
        }
        Ok(current)
    }

    fn symbol_name(&self, symbol: SymbolId) -> OracleResult<String> {
        Ok(self.symbol(symbol)?.name.clone())
    }

    fn declarations_of(&self, symbol: SymbolId) -> OracleResult<Vec<DeclarationId>> {
        self.symbol(symbol)?
            .declarations
            .clone()
            .ok_or(OracleError::NoDeclarations(symbol))
    }

    fn source_location_of(&self, declaration: DeclarationId) -> OracleResult<SourceLocation> {
        self.declarations
            .get(declaration.0)
            .cloned()
            .ok_or(OracleError::UnknownDeclaration(declaration))
    }

    fn has_value_declaration(&self, symbol: SymbolId) -> OracleResult<bool> {
        Ok(self.symbol(symbol)?.value)
    }

    fn is_module(&self, symbol: SymbolId) -> OracleResult<bool> {
        Ok(self.symbol(symbol)?.module)
    }

    fn is_enum(&self, symbol: SymbolId) -> OracleResult<bool> {
        Ok(self.symbol(symbol)?.enumeration)
    }

    fn symbol_documentation(&self, symbol: SymbolId) -> OracleResult<DocComment> {
        Ok(self.symbol(symbol)?.documentation.clone())
    }

    fn type_of_symbol(
        &self,
        symbol: SymbolId,
        _declaration: Option<DeclarationId>,
    ) -> OracleResult<TypeId> {
        Ok(self.symbol(symbol)?.ty.unwrap_or(self.unknown_type))
    }

    fn declared_type_of_symbol(&self, symbol: SymbolId) -> OracleResult<TypeId> {
        Ok(self.symbol(symbol)?.declared_type.unwrap_or(self.unknown_type))
    }

    fn exports_of_module(&self, symbol: SymbolId) -> OracleResult<Vec<SymbolId>> {
        Ok(self.symbol(symbol)?.exports.clone())
    }

    fn members_of(&self, symbol: SymbolId) -> OracleResult<Vec<SymbolId>> {
        Ok(self.symbol(symbol)?.members.clone())
    }

    fn call_signatures(&self, ty: TypeId) -> OracleResult<Vec<SignatureId>> {
        Ok(self.ty(ty)?.call_signatures.clone())
    }

    fn construct_signatures(&self, ty: TypeId) -> OracleResult<Vec<SignatureId>> {
        Ok(self.ty(ty)?.construct_signatures.clone())
    }

    fn properties_of_type(&self, ty: TypeId) -> OracleResult<Vec<SymbolId>> {
        Ok(self.ty(ty)?.properties.clone())
    }

    fn is_object_like(&self, ty: TypeId) -> OracleResult<bool> {
        Ok(self.ty(ty)?.object_like)
    }

    fn is_class_or_interface(&self, ty: TypeId) -> OracleResult<bool> {
        Ok(self.ty(ty)?.class_or_interface)
    }

    fn is_inherited(&self, member: SymbolId, owner: SymbolId) -> OracleResult<bool> {
        match self.symbol(member)?.parent {
            Some(parent) => Ok(self.resolve_alias(parent)? != self.resolve_alias(owner)?),
            None => Ok(false),
        }
    }

    fn type_to_string(&self, ty: TypeId) -> OracleResult<String> {
        self.ty(ty)?.text.clone().ok_or(OracleError::Unprintable(ty))
    }

    fn fallback_type_string(&self, ty: TypeId) -> String {
        self.type_keys
            .get(ty.0)
            .cloned()
            .unwrap_or_else(|| format!("type#{}", ty.0))
    }

    fn signature_parameters(&self, signature: SignatureId) -> OracleResult<Vec<SymbolId>> {
        Ok(self.signature(signature)?.parameters.clone())
    }

    fn signature_return_type(&self, signature: SignatureId) -> OracleResult<TypeId> {
        Ok(self.signature(signature)?.return_type)
    }

    fn signature_declaration(
        &self,
        signature: SignatureId,
    ) -> OracleResult<Option<DeclarationId>> {
        Ok(self.signature(signature)?.declaration)
    }

    fn signature_documentation(&self, signature: SignatureId) -> OracleResult<DocComment> {
        Ok(self.signature(signature)?.documentation.clone())
    }

    fn ambient_modules(&self) -> OracleResult<Vec<SymbolId>> {
        Ok(self.ambient_modules.clone())
    }

    fn module_of_source_unit(&self, path: &str) -> OracleResult<Option<SymbolId>> {
        Ok(self
            .source_units
            .iter()
            .find(|u| u.path == path)
            .and_then(|u| u.module))
    }

    fn globals(&self) -> OracleResult<Vec<SymbolId>> {
        Ok(self.globals.clone())
    }
}
