//! Type annotations for the Zinc language.

use std::fmt;

/// A type in the Zinc language.
///
/// Zinc has four surface types that can be written in annotations, plus
/// [`Type::Unknown`] for positions where the program omits an annotation
/// (untyped parameters, inferred variables). `Unknown` acts as a wildcard
/// during type checking: it is compatible with every type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// 64-bit signed integer type (`int` in Zinc source code).
    Int,
    /// String type (`string` in Zinc source code).
    Str,
    /// Boolean type (`bool` in Zinc source code).
    Bool,
    /// The absence of a value (`void` in Zinc source code); only
    /// meaningful as a function return type.
    Void,
    /// A type the program has not named yet. Compatible with everything;
    /// the analyzer narrows it when an initializer or assignment reveals
    /// the actual type.
    Unknown,
}

impl Type {
    /// Parses a surface type name into a `Type`.
    ///
    /// Returns `None` for identifiers that do not name a type.
    pub fn from_name(name: &str) -> Option<Type> {
        match name {
            "int" => Some(Type::Int),
            "string" => Some(Type::Str),
            "bool" => Some(Type::Bool),
            "void" => Some(Type::Void),
            _ => None,
        }
    }

    /// Returns true when two types are compatible, treating
    /// [`Type::Unknown`] on either side as a wildcard.
    pub fn matches(self, other: Type) -> bool {
        self == Type::Unknown || other == Type::Unknown || self == other
    }
}

/// Displays the type as it would appear in Zinc source code.
///
/// This is used for generating user-facing error messages.
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Str => write!(f, "string"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::Unknown => write!(f, "unknown"),
        }
    }
}
