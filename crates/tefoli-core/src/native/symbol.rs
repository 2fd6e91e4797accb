//! Ground terms as produced by the solver.

use std::fmt;

/// A ground term: a number, a string, a function (constants are
/// functions without arguments), or one of the two extremal symbols.
///
/// Variants are declared in the solver's total order, so the derived
/// `Ord` matches it.
///
/// # Examples
///
/// ```
/// use tefoli_core::native::Symbol;
///
/// let a = Symbol::id("a");
/// let dl = Symbol::function("dl", vec![a.clone(), Symbol::number(0)]);
///
/// assert_eq!(dl.to_string(), "dl(a,0)");
/// assert_eq!(dl.arguments(), Some(&[a, Symbol::number(0)][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// The smallest symbol, `#inf`.
    Infimum,
    /// An integer.
    Number(i32),
    /// A function term; `positive == false` is classical negation (`-f`).
    Function {
        name: String,
        arguments: Vec<Symbol>,
        positive: bool,
    },
    /// A string constant.
    String(String),
    /// The largest symbol, `#sup`.
    Supremum,
}

impl Symbol {
    /// Creates a number symbol.
    pub fn number(value: i32) -> Self {
        Symbol::Number(value)
    }

    /// Creates a string symbol.
    pub fn string(value: impl Into<String>) -> Self {
        Symbol::String(value.into())
    }

    /// Creates a constant, a function without arguments.
    pub fn id(name: impl Into<String>) -> Self {
        Self::function(name, Vec::new())
    }

    /// Creates a positive function symbol.
    pub fn function(name: impl Into<String>, arguments: Vec<Symbol>) -> Self {
        Symbol::Function {
            name: name.into(),
            arguments,
            positive: true,
        }
    }

    /// Creates a tuple, a function with the empty name.
    pub fn tuple(arguments: Vec<Symbol>) -> Self {
        Self::function("", arguments)
    }

    /// Returns the classically negated counterpart of a function symbol.
    ///
    /// Other symbols are returned unchanged.
    pub fn negate(self) -> Self {
        match self {
            Symbol::Function {
                name,
                arguments,
                positive,
            } => Symbol::Function {
                name,
                arguments,
                positive: !positive,
            },
            other => other,
        }
    }

    /// Returns the name of a function symbol.
    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Function { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the arguments of a function symbol.
    pub fn arguments(&self) -> Option<&[Symbol]> {
        match self {
            Symbol::Function { arguments, .. } => Some(arguments),
            _ => None,
        }
    }

    /// Returns the value of a number symbol.
    pub fn as_number(&self) -> Option<i32> {
        match self {
            Symbol::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true for a function symbol with the given name and arity.
    pub fn matches(&self, name: &str, arity: usize) -> bool {
        match self {
            Symbol::Function {
                name: own,
                arguments,
                ..
            } => own == name && arguments.len() == arity,
            _ => false,
        }
    }
}

impl From<i32> for Symbol {
    fn from(value: i32) -> Self {
        Symbol::Number(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Infimum => f.write_str("#inf"),
            Symbol::Supremum => f.write_str("#sup"),
            Symbol::Number(value) => write!(f, "{}", value),
            Symbol::String(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Symbol::Function {
                name,
                arguments,
                positive,
            } => {
                if !positive {
                    f.write_str("-")?;
                }
                f.write_str(name)?;
                if arguments.is_empty() && !name.is_empty() {
                    return Ok(());
                }
                f.write_str("(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", argument)?;
                }
                // A unary tuple keeps its trailing comma: (a,)
                if name.is_empty() && arguments.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
        }
    }
}
