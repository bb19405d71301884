use indexmap::IndexMap;
use vm::Segment;

/// Storage class of a named variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Static,
    Field,
    Argument,
    Local,
}

impl Kind {
    pub fn segment(self) -> Segment {
        match self {
            Kind::Static => Segment::Static,
            Kind::Field => Segment::This,
            Kind::Argument => Segment::Argument,
            Kind::Local => Segment::Local,
        }
    }

    pub fn is_class_level(self) -> bool {
        matches!(self, Kind::Static | Kind::Field)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub ty: String,
    pub kind: Kind,
    pub index: u32,
}

impl Symbol {
    pub fn segment(&self) -> Segment {
        self.kind.segment()
    }
}

/// Two-level scope: class (static, field) and subroutine (argument, local).
///
/// Indices are dense and zero based per kind; the subroutine scope shadows the
/// class scope on lookup.
#[derive(Debug, Default)]
pub struct SymbolTable {
    class_name: String,
    class: IndexMap<String, Symbol>,
    subroutine: IndexMap<String, Symbol>,
    counts: [u32; 4],
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_class(&mut self, name: &str) {
        self.class_name = name.to_string();
        self.class.clear();
        self.counts[Kind::Static.slot()] = 0;
        self.counts[Kind::Field.slot()] = 0;
    }

    pub fn start_subroutine(&mut self) {
        self.subroutine.clear();
        self.counts[Kind::Argument.slot()] = 0;
        self.counts[Kind::Local.slot()] = 0;
    }

    /// Define `name` with the next index of its kind.
    ///
    /// A second definition in the same scope replaces the first one; the
    /// counter still advances.
    pub fn define(&mut self, name: &str, ty: &str, kind: Kind) -> u32 {
        let index = self.counts[kind.slot()];
        self.counts[kind.slot()] += 1;

        let symbol = Symbol {
            name: name.to_string(),
            ty: ty.to_string(),
            kind,
            index,
        };
        let scope = if kind.is_class_level() {
            &mut self.class
        } else {
            &mut self.subroutine
        };
        if let Some(prev) = scope.insert(name.to_string(), symbol) {
            tracing::warn!(
                name,
                previous = ?prev.kind,
                "redefinition in the same scope overrides the earlier symbol"
            );
        }
        index
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.subroutine.get(name).or_else(|| self.class.get(name))
    }

    pub fn count(&self, kind: Kind) -> u32 {
        self.counts[kind.slot()]
    }

    pub fn field_count(&self) -> u32 {
        self.count(Kind::Field)
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_indices_follow_declaration_order() {
        let mut table = SymbolTable::new();
        table.start_class("Point");
        table.define("x", "int", Kind::Field);
        table.define("count", "int", Kind::Static);
        table.define("y", "int", Kind::Field);
        table.define("z", "int", Kind::Field);

        let fields: Vec<u32> = ["x", "y", "z"]
            .iter()
            .map(|n| table.lookup(n).unwrap().index)
            .collect();
        assert_eq!(fields, vec![0, 1, 2]);
        assert_eq!(table.lookup("count").unwrap().index, 0);
        assert_eq!(table.field_count(), 3);
        assert_eq!(table.count(Kind::Static), 1);
    }

    #[test]
    fn subroutine_scope_shadows_class_scope() {
        let mut table = SymbolTable::new();
        table.start_class("Main");
        table.define("a", "int", Kind::Field);
        table.start_subroutine();
        table.define("a", "boolean", Kind::Local);

        let a = table.lookup("a").unwrap();
        assert_eq!(a.kind, Kind::Local);
        assert_eq!(a.segment(), Segment::Local);
        assert_eq!(a.ty, "boolean");

        table.start_subroutine();
        let a = table.lookup("a").unwrap();
        assert_eq!(a.kind, Kind::Field);
        assert_eq!(a.segment(), Segment::This);
        assert_eq!(table.count(Kind::Local), 0);
    }

    #[test]
    fn start_class_resets_class_counters() {
        let mut table = SymbolTable::new();
        table.start_class("A");
        table.define("s", "int", Kind::Static);
        table.define("f", "int", Kind::Field);
        table.start_class("B");
        assert_eq!(table.class_name(), "B");
        assert!(table.lookup("s").is_none());
        assert_eq!(table.count(Kind::Static), 0);
        assert_eq!(table.field_count(), 0);
    }

    #[test]
    fn redefinition_overwrites_and_keeps_counting() {
        let mut table = SymbolTable::new();
        table.start_subroutine();
        assert_eq!(table.define("i", "int", Kind::Local), 0);
        assert_eq!(table.define("i", "char", Kind::Local), 1);
        let i = table.lookup("i").unwrap();
        assert_eq!((i.ty.as_str(), i.index), ("char", 1));
        assert_eq!(table.count(Kind::Local), 2);
    }

    #[test]
    fn unknown_name_is_absent() {
        let table = SymbolTable::new();
        assert!(table.lookup("Output").is_none());
    }
}
