use std::fmt::Display;

use crate::{
    errors::errors::{Error, ErrorImpl},
    type_checker::type_checker::DataType,
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Procedure,
    Function,
}

impl SymbolKind {
    /// Declared type of a symbol, fixed by its kind.
    pub fn declared_type(&self) -> DataType {
        match self {
            SymbolKind::Variable | SymbolKind::Parameter => DataType::Numeric,
            SymbolKind::Procedure | SymbolKind::Function => DataType::Typeless,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, SymbolKind::Procedure | SymbolKind::Function)
    }

    pub fn is_storage(&self) -> bool {
        !self.is_callable()
    }
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Variable => write!(f, "variable"),
            SymbolKind::Parameter => write!(f, "parameter"),
            SymbolKind::Procedure => write!(f, "procedure"),
            SymbolKind::Function => write!(f, "function"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Procedure and function names.
    Everywhere,
    Global,
    Main,
    /// Parameters of a procedure.
    Procedure,
    /// Parameters of a function.
    Function,
    /// Local variables of a procedure or function.
    Local,
}

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Everywhere => write!(f, "Everywhere"),
            Scope::Global => write!(f, "Global"),
            Scope::Main => write!(f, "Main"),
            Scope::Procedure => write!(f, "Procedure"),
            Scope::Function => write!(f, "Function"),
            Scope::Local => write!(f, "Local"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub declared_type: DataType,
    pub scope: Scope,
    /// Name of the enclosing procedure or function, if any.
    pub context: Option<String>,
    pub position: Position,
}

impl Symbol {
    pub fn new(
        name: &str,
        kind: SymbolKind,
        scope: Scope,
        context: Option<&str>,
        position: Position,
    ) -> Self {
        Symbol {
            name: String::from(name),
            kind,
            declared_type: kind.declared_type(),
            scope,
            context: context.map(String::from),
            position,
        }
    }

    /// Scope-qualified name: `x` for a global, `main.x` for a main variable
    /// and `p.x` for a parameter or local of `p`.
    pub fn storage_key(&self) -> String {
        match (&self.scope, &self.context) {
            (Scope::Main, _) => format!("main.{}", self.name),
            (_, Some(context)) => format!("{}.{}", context, self.name),
            (_, None) => self.name.clone(),
        }
    }

    /// Whether declaring `other` next to `self` is a duplicate.
    ///
    /// Variables and procedures/functions may share a name at declare time;
    /// that case is reported after the traversal as a naming conflict.
    fn conflicts_with(&self, other: &Symbol) -> bool {
        if self.name != other.name {
            return false;
        }

        match (self.kind, other.kind) {
            (SymbolKind::Variable, SymbolKind::Variable) => {
                self.scope == other.scope && self.context == other.context
            }
            (SymbolKind::Parameter, SymbolKind::Parameter) => self.context == other.context,
            (first, second) if first.is_callable() && second.is_callable() => first == second,
            _ => false,
        }
    }
}

/// Every symbol of one compilation, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable { symbols: vec![] }
    }

    pub fn declare(&mut self, symbol: Symbol) -> Result<(), Error> {
        if self.symbols.iter().any(|existing| existing.conflicts_with(&symbol)) {
            return Err(Error::new(
                ErrorImpl::DuplicateSymbol {
                    name: symbol.name.clone(),
                    scope: symbol.scope.to_string(),
                },
                symbol.position,
            ));
        }

        self.symbols.push(symbol);
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Finds the variable or parameter `name` visible from `context`.
    ///
    /// Inside a definition the definition's own parameters and locals come
    /// first; inside main (`context` is `None`) the main variables do. Globals
    /// are visible from both.
    pub fn lookup_variable(&self, name: &str, context: Option<&str>) -> Option<&Symbol> {
        let storage = || {
            self.symbols
                .iter()
                .filter(move |symbol| symbol.name == name && symbol.kind.is_storage())
        };

        let inner = match context {
            Some(context) => storage().find(|symbol| symbol.context.as_deref() == Some(context)),
            None => storage().find(|symbol| symbol.scope == Scope::Main),
        };

        inner.or_else(|| storage().find(|symbol| symbol.scope == Scope::Global))
    }

    /// Finds the procedure or function `name`.
    pub fn lookup_callable(&self, name: &str) -> Option<&Symbol> {
        self.symbols
            .iter()
            .find(|symbol| symbol.name == name && symbol.kind.is_callable())
    }

    /// Resolves `name` as seen from `context`, requiring the given kind.
    ///
    /// Parameters satisfy a request for a variable.
    pub fn resolve(
        &self,
        name: &str,
        context: Option<&str>,
        expected: SymbolKind,
        position: Position,
    ) -> Result<&Symbol, Error> {
        let found = if expected.is_storage() {
            self.lookup_variable(name, context)
                .or_else(|| self.lookup_callable(name))
        } else {
            self.symbols
                .iter()
                .find(|symbol| symbol.name == name && symbol.kind == expected)
                .or_else(|| self.lookup_callable(name))
                .or_else(|| self.lookup_variable(name, context))
        };

        let symbol = match found {
            Some(symbol) => symbol,
            None => {
                let kind = if expected.is_storage() {
                    SymbolKind::Variable
                } else {
                    expected
                };
                return Err(Error::new(
                    ErrorImpl::UndeclaredName {
                        name: String::from(name),
                        kind: kind.to_string(),
                    },
                    position,
                ));
            }
        };

        let matches_kind = if expected.is_storage() {
            symbol.kind.is_storage()
        } else {
            symbol.kind == expected
        };

        if !matches_kind {
            return Err(Error::new(
                ErrorImpl::WrongKind {
                    name: String::from(name),
                    found: symbol.kind.to_string(),
                    expected: expected.to_string(),
                },
                position,
            ));
        }

        Ok(symbol)
    }
}
