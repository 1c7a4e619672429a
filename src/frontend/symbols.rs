//! Symbol table and scope management for tacfront
//!
//! Tracks every named entity the generator knows about (variables, constants, arrays, record types,
//! routines, parameters, temporaries and labels) in a stack of lexical scopes, and hands out storage
//! offsets from a single address counter.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Default size in bytes of one storage slot.
pub const DEFAULT_WORD_SIZE: usize = 8;

const RULE_WIDTH: usize = 90;

/// Kind of symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Var,
    Const,
    Array,
    Type,
    Func,
    Proc,
    Param,
    Temp,
    Label,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Var => "var",
            SymbolKind::Const => "const",
            SymbolKind::Array => "array",
            SymbolKind::Type => "type",
            SymbolKind::Func => "func",
            SymbolKind::Proc => "proc",
            SymbolKind::Param => "param",
            SymbolKind::Temp => "temp",
            SymbolKind::Label => "label",
        }
    }

    /// Return `true` if entries of this kind consume address space when added.
    pub fn allocates_storage(self) -> bool {
        matches!(
            self,
            SymbolKind::Var | SymbolKind::Const | SymbolKind::Param | SymbolKind::Array
        )
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A symbol in the symbol table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    pub kind: SymbolKind,
    pub declared_type: Option<String>,
    /// Depth of the scope the entry was added to (0 = global). Stamped by [`SymbolTable::add`].
    pub scope_level: usize,
    pub address: Option<usize>,
    /// Size in bytes.
    pub size: Option<usize>,
    pub params: Option<Vec<String>>,
    pub return_type: Option<String>,
    pub label: Option<String>,
    /// Free-form attributes (record field list, inferred call arity, ...).
    pub extra: BTreeMap<String, String>,
}

impl SymbolEntry {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            declared_type: None,
            scope_level: 0,
            address: None,
            size: None,
            params: None,
            return_type: None,
            label: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.declared_type = Some(ty.into());
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_return_type(mut self, ty: Option<String>) -> Self {
        self.return_type = ty;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

fn or_dash<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for SymbolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params.as_ref().map(|p| format!("[{}]", p.join(", ")));
        write!(
            f,
            "{} | {} | {} | {} | {} | {} | {} | {}",
            self.name,
            self.kind,
            or_dash(self.declared_type.as_deref()),
            or_dash(self.address),
            or_dash(self.size),
            or_dash(params),
            or_dash(self.return_type.as_deref()),
            or_dash(self.label.as_deref()),
        )
    }
}

/// Non-fatal signal that a name was declared twice in the same scope.
///
/// The later entry replaces the earlier one; callers log the warning and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("redeclaration of '{name}' in scope {scope_level}")]
#[diagnostic(code(tacfront::symbols::duplicate_declaration), severity(Warning))]
pub struct DuplicateDeclaration {
    pub name: String,
    pub scope_level: usize,
}

/// Fatal signal that an entry's storage would run past the end of the address space.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("no address space left for '{name}' ({size} bytes at offset {offset})")]
#[diagnostic(code(tacfront::symbols::address_space_exhausted))]
pub struct AddressSpaceExhausted {
    pub name: String,
    pub size: usize,
    pub offset: usize,
}

/// One lexical scope: entries in insertion order plus a name index.
#[derive(Debug, Default)]
struct Scope {
    entries: Vec<SymbolEntry>,
    index: HashMap<String, usize>,
}

/// Symbol table managing all named entities
///
/// ## Notes
/// - The global scope always exists; [`SymbolTable::exit_scope`] on it is a no-op.
/// - Addresses come from one counter shared by every scope and never move once assigned.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    next_address: usize,
    word_size: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::with_word_size(DEFAULT_WORD_SIZE)
    }

    /// Create a table whose default allocation size is `word_size` bytes.
    pub fn with_word_size(word_size: usize) -> Self {
        Self {
            scopes: vec![Scope::default()],
            next_address: 0,
            word_size,
        }
    }

    /// Depth of the innermost scope (0 = global).
    pub fn current_level(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Next address the allocator will hand out.
    pub fn next_address(&self) -> usize {
        self.next_address
    }

    /// Enter a new, empty scope
    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Exit the current scope, discarding its entries. The global scope is never popped.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Add an entry to the innermost scope.
    ///
    /// Storage kinds without an address get the next one (sized `word_size` unless the entry says
    /// otherwise) and the counter advances by the entry's size. A name already present in the
    /// innermost scope is replaced in place and reported back as a [`DuplicateDeclaration`].
    ///
    /// # Errors
    ///
    /// Returns [`AddressSpaceExhausted`] if the entry does not fit below `usize::MAX`; the table is
    /// left unchanged.
    pub fn add(&mut self, mut entry: SymbolEntry) -> Result<Option<DuplicateDeclaration>, AddressSpaceExhausted> {
        let level = self.current_level();

        if entry.kind.allocates_storage() && entry.address.is_none() {
            let size = *entry.size.get_or_insert(self.word_size);
            let end = self.next_address.checked_add(size).ok_or_else(|| AddressSpaceExhausted {
                name: entry.name.clone(),
                size,
                offset: self.next_address,
            })?;
            entry.address = Some(self.next_address);
            self.next_address = end;
        }
        entry.scope_level = level;

        let scope = self.innermost_mut();
        match scope.index.get(&entry.name) {
            Some(&slot) => {
                let name = entry.name.clone();
                scope.entries[slot] = entry;
                Ok(Some(DuplicateDeclaration {
                    name,
                    scope_level: level,
                }))
            }
            None => {
                scope.index.insert(entry.name.clone(), scope.entries.len());
                scope.entries.push(entry);
                Ok(None)
            }
        }
    }

    /// Look up a symbol by name, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.index.get(name).map(|&slot| &scope.entries[slot]))
    }

    /// Mutable variant of [`SymbolTable::lookup`].
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut SymbolEntry> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| match scope.index.get(name) {
                Some(&slot) => scope.entries.get_mut(slot),
                None => None,
            })
    }

    /// Look up a symbol in the innermost scope only.
    pub fn lookup_local(&self, name: &str) -> Option<&SymbolEntry> {
        let scope = self.scopes.last()?;
        scope.index.get(name).map(|&slot| &scope.entries[slot])
    }

    /// Every entry of every open scope, outermost scope first, then insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.scopes.iter().flat_map(|scope| scope.entries.iter())
    }

    pub fn len(&self) -> usize {
        self.scopes.iter().map(|s| s.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the table as the human-readable listing.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    fn innermost_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "======= Symbol Table =======")?;
        writeln!(f, "Name | kind | type | addr | size | params | return | label")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for entry in self.entries() {
            writeln!(f, "{entry}")?;
        }
        write!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_lookup() {
        let mut table = SymbolTable::new();
        table.add(SymbolEntry::new("x", SymbolKind::Var)).unwrap();

        table.enter_scope();
        assert!(table.lookup("x").is_some());
        table.add(SymbolEntry::new("y", SymbolKind::Var)).unwrap();
        assert_eq!(table.lookup("y").map(|e| e.scope_level), Some(1));
        table.exit_scope();

        // x still visible, y not
        assert!(table.lookup("x").is_some());
        assert!(table.lookup("y").is_none());
    }

    #[test]
    fn test_inner_declaration_shadows_outer() {
        let mut table = SymbolTable::new();
        table.add(SymbolEntry::new("x", SymbolKind::Var)).unwrap();
        table.enter_scope();
        table.add(SymbolEntry::new("x", SymbolKind::Param)).unwrap();
        assert_eq!(table.lookup("x").map(|e| e.kind), Some(SymbolKind::Param));
        assert!(table.lookup_local("x").is_some());
        table.exit_scope();
        assert_eq!(table.lookup("x").map(|e| e.kind), Some(SymbolKind::Var));
    }

    #[test]
    fn test_global_scope_is_never_popped() {
        let mut table = SymbolTable::new();
        table.add(SymbolEntry::new("g", SymbolKind::Const)).unwrap();
        table.exit_scope();
        table.exit_scope();
        assert_eq!(table.current_level(), 0);
        assert!(table.lookup("g").is_some());
    }

    #[test]
    fn test_addresses_are_sequential_and_arrays_reserve_blocks() {
        let mut table = SymbolTable::new();
        table.add(SymbolEntry::new("a", SymbolKind::Var)).unwrap();
        table.add(SymbolEntry::new("arr", SymbolKind::Array).with_size(8 * 4)).unwrap();
        table.add(SymbolEntry::new("c", SymbolKind::Const)).unwrap();
        table.enter_scope();
        table.add(SymbolEntry::new("p", SymbolKind::Param)).unwrap();

        let addr = |t: &SymbolTable, n: &str| t.lookup(n).and_then(|e| e.address);
        assert_eq!(addr(&table, "a"), Some(0));
        assert_eq!(addr(&table, "arr"), Some(8));
        assert_eq!(addr(&table, "c"), Some(40));
        assert_eq!(addr(&table, "p"), Some(48));
        assert_eq!(table.next_address(), 56);

        // Leaving a scope does not give address space back.
        table.exit_scope();
        table.add(SymbolEntry::new("d", SymbolKind::Var)).unwrap();
        assert_eq!(addr(&table, "d"), Some(56));
    }

    #[test]
    fn test_address_overflow_is_an_error() {
        let mut table = SymbolTable::new();
        table.add(SymbolEntry::new("big", SymbolKind::Array).with_size(usize::MAX - 4)).unwrap();
        let err = table.add(SymbolEntry::new("x", SymbolKind::Var)).unwrap_err();
        assert_eq!(
            err,
            AddressSpaceExhausted {
                name: "x".to_string(),
                size: 8,
                offset: usize::MAX - 4,
            }
        );
        // The failed entry was not recorded and the counter did not move.
        assert!(table.lookup("x").is_none());
        assert_eq!(table.next_address(), usize::MAX - 4);
    }

    #[test]
    fn test_non_storage_kinds_take_no_address() {
        let mut table = SymbolTable::new();
        table.add(SymbolEntry::new("t0", SymbolKind::Temp).with_size(8)).unwrap();
        table.add(SymbolEntry::new("L0", SymbolKind::Label).with_label("L0")).unwrap();
        table.add(SymbolEntry::new("f", SymbolKind::Func)).unwrap();
        table.add(SymbolEntry::new("Point", SymbolKind::Type)).unwrap();
        assert!(table.entries().all(|e| e.address.is_none()));
        assert_eq!(table.next_address(), 0);
    }

    #[test]
    fn test_custom_word_size() {
        let mut table = SymbolTable::with_word_size(4);
        table.add(SymbolEntry::new("a", SymbolKind::Var)).unwrap();
        table.add(SymbolEntry::new("b", SymbolKind::Var)).unwrap();
        assert_eq!(table.lookup("b").and_then(|e| e.address), Some(4));
        assert_eq!(table.lookup("b").and_then(|e| e.size), Some(4));
    }

    #[test]
    fn test_duplicate_warns_and_replaces_in_place() {
        let mut table = SymbolTable::new();
        assert!(table.add(SymbolEntry::new("f", SymbolKind::Func)).unwrap().is_none());
        table.add(SymbolEntry::new("x", SymbolKind::Var)).unwrap();
        let warning = table.add(SymbolEntry::new("f", SymbolKind::Proc)).unwrap();
        assert_eq!(
            warning,
            Some(DuplicateDeclaration {
                name: "f".to_string(),
                scope_level: 0
            })
        );
        let names: Vec<_> = table.entries().map(|e| (e.name.as_str(), e.kind)).collect();
        assert_eq!(names, vec![("f", SymbolKind::Proc), ("x", SymbolKind::Var)]);
    }

    #[test]
    fn test_same_name_in_nested_scope_is_not_a_duplicate() {
        let mut table = SymbolTable::new();
        table.add(SymbolEntry::new("x", SymbolKind::Var)).unwrap();
        table.enter_scope();
        assert!(table.add(SymbolEntry::new("x", SymbolKind::Var)).unwrap().is_none());
    }

    #[test]
    fn test_lookup_mut_updates_nearest_entry() {
        let mut table = SymbolTable::new();
        table.add(SymbolEntry::new("f", SymbolKind::Func)).unwrap();
        if let Some(entry) = table.lookup_mut("f") {
            entry.label = Some("func_f".to_string());
        }
        assert_eq!(table.lookup("f").and_then(|e| e.label.as_deref()), Some("func_f"));
    }

    #[test]
    fn test_dump_lists_open_scopes_in_order() {
        let mut table = SymbolTable::new();
        table.add(SymbolEntry::new("PI", SymbolKind::Const).with_type("float")).unwrap();
        table.add(
            SymbolEntry::new("add", SymbolKind::Func)
                .with_params(vec!["a".to_string(), "b".to_string()])
                .with_label("func_add"),
        )
        .unwrap();
        table.enter_scope();
        table.add(SymbolEntry::new("a", SymbolKind::Param)).unwrap();

        insta::assert_snapshot!(table.dump(), @r"
        ======= Symbol Table =======
        Name | kind | type | addr | size | params | return | label
        ------------------------------------------------------------------------------------------
        PI | const | float | 0 | 8 | - | - | -
        add | func | - | - | - | [a, b] | - | func_add
        a | param | - | 8 | 8 | - | - | -
        ==========================================================================================
        ");
    }
}
