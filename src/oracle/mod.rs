// Type system oracle
//
// The generator never looks at source text. Everything it knows about the
// analyzed program comes through the `TypeOracle` trait, which hands out
// opaque, copyable handles for symbols, types, signatures and declarations.

mod snapshot;

pub use snapshot::ProgramSnapshot;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to a named declaration site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub usize);

/// Opaque handle to a type; identity is stable for one program snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub usize);

/// Opaque handle to a call or construct signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignatureId(pub usize);

/// Opaque handle to one physical declaration of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclarationId(pub usize);

/// Where a declaration starts in its source file (zero-based line/character)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub character: usize,
    pub position: usize,
}

/// One `@tag` of a documentation comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Documentation comment text and tags attached to a symbol or signature
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    pub text: String,
    pub tags: Vec<DocTag>,
}

/// Failures reported by an oracle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("unknown symbol {0:?}")]
    UnknownSymbol(SymbolId),

    #[error("unknown type {0:?}")]
    UnknownType(TypeId),

    #[error("unknown signature {0:?}")]
    UnknownSignature(SignatureId),

    #[error("unknown declaration {0:?}")]
    UnknownDeclaration(DeclarationId),

    #[error("no declarations available for {0:?}")]
    NoDeclarations(SymbolId),

    #[error("type {0:?} cannot be printed")]
    Unprintable(TypeId),
}

/// Result type for oracle queries
pub type Result<T> = std::result::Result<T, OracleError>;

/// Capabilities the generator consumes from the host type system.
///
/// Implementations must be deterministic for a fixed program snapshot: the
/// same query returns the same handles in the same order.
pub trait TypeOracle {
    /// Follow re-exports down to the underlying symbol. Non-aliases map to themselves.
    fn resolve_alias(&self, symbol: SymbolId) -> Result<SymbolId>;

    fn symbol_name(&self, symbol: SymbolId) -> Result<String>;

    fn declarations_of(&self, symbol: SymbolId) -> Result<Vec<DeclarationId>>;

    fn source_location_of(&self, declaration: DeclarationId) -> Result<SourceLocation>;

    /// Whether the symbol has a value side (as opposed to being a pure type)
    fn has_value_declaration(&self, symbol: SymbolId) -> Result<bool>;

    /// Whether the symbol is a source unit or ambient module
    fn is_module(&self, symbol: SymbolId) -> Result<bool>;

    fn is_enum(&self, _symbol: SymbolId) -> Result<bool> {
        Ok(false)
    }

    /// Documentation comment of a symbol; empty when the host keeps none
    fn symbol_documentation(&self, _symbol: SymbolId) -> Result<DocComment> {
        Ok(DocComment::default())
    }

    /// Type of the symbol as used in an expression
    fn type_of_symbol(&self, symbol: SymbolId, declaration: Option<DeclarationId>)
        -> Result<TypeId>;

    /// Type the symbol declares (the instance side of a class)
    fn declared_type_of_symbol(&self, symbol: SymbolId) -> Result<TypeId>;

    fn exports_of_module(&self, symbol: SymbolId) -> Result<Vec<SymbolId>>;

    /// Own member table of a symbol (merged across declarations)
    fn members_of(&self, symbol: SymbolId) -> Result<Vec<SymbolId>>;

    fn call_signatures(&self, ty: TypeId) -> Result<Vec<SignatureId>>;

    fn construct_signatures(&self, ty: TypeId) -> Result<Vec<SignatureId>>;

    fn properties_of_type(&self, ty: TypeId) -> Result<Vec<SymbolId>>;

    /// Whether the type has properties or signatures
    fn is_object_like(&self, ty: TypeId) -> Result<bool>;

    fn is_class_or_interface(&self, ty: TypeId) -> Result<bool>;

    /// Whether `member`, reached through the type of `owner`, is declared
    /// outside of `owner` (an inherited or mixed-in member)
    fn is_inherited(&self, _member: SymbolId, _owner: SymbolId) -> Result<bool> {
        Ok(false)
    }

    fn type_to_string(&self, ty: TypeId) -> Result<String>;

    /// Best-effort text used when `type_to_string` fails
    fn fallback_type_string(&self, ty: TypeId) -> String {
        format!("type#{}", ty.0)
    }

    fn signature_parameters(&self, signature: SignatureId) -> Result<Vec<SymbolId>>;

    fn signature_return_type(&self, signature: SignatureId) -> Result<TypeId>;

    fn signature_declaration(&self, signature: SignatureId) -> Result<Option<DeclarationId>>;

    fn signature_documentation(&self, _signature: SignatureId) -> Result<DocComment> {
        Ok(DocComment::default())
    }

    fn ambient_modules(&self) -> Result<Vec<SymbolId>>;

    /// Module symbol of an entry source unit, if the unit is a module
    fn module_of_source_unit(&self, path: &str) -> Result<Option<SymbolId>>;

    /// Symbols declared in the global scope
    fn globals(&self) -> Result<Vec<SymbolId>>;
}
