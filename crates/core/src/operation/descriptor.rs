//! Static operation table.
//!
//! Each caller-facing operation is defined once here: the (type, field) pair it
//! is invoked by, the arguments it accepts, the access path it resolves to, and
//! the shape of its result. The table is the only dispatch mechanism.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Root type an operation field lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeName {
    Query,
    Mutation,
}

impl TypeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Query => "Query",
            TypeName::Mutation => "Mutation",
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Query" => Ok(TypeName::Query),
            "Mutation" => Ok(TypeName::Mutation),
            other => Err(format!("Unknown type name: {other}")),
        }
    }
}

/// Strategy selected for an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListItems,
    GetItemByTitle,
    GetItem,
    AddItem,
}

impl Operation {
    /// Returns the static descriptor for this operation.
    pub fn descriptor(self) -> &'static OperationDescriptor {
        match self {
            Operation::ListItems => &OPERATIONS[0],
            Operation::GetItemByTitle => &OPERATIONS[1],
            Operation::GetItem => &OPERATIONS[2],
            Operation::AddItem => &OPERATIONS[3],
        }
    }
}

/// Storage access path an operation resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPath {
    /// Full table scan.
    Scan,
    /// Equality query on the secondary index.
    SecondaryIndex,
    /// Get-item by primary key.
    PrimaryRead,
    /// Put-item keyed by primary key.
    PrimaryWrite,
}

/// Shape of an operation's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// Sequence of items, in storage order.
    List,
    /// Exactly one item.
    Item,
    /// One item or `null`.
    OptionalItem,
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultShape::List => f.write_str("list"),
            ResultShape::Item => f.write_str("item"),
            ResultShape::OptionalItem => f.write_str("optional item"),
        }
    }
}

/// JSON kind an argument must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    String,
    Object,
}

impl ArgumentKind {
    /// Kind name with its article, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            ArgumentKind::String => "a string",
            ArgumentKind::Object => "an object",
        }
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentKind::String => f.write_str("string"),
            ArgumentKind::Object => f.write_str("object"),
        }
    }
}

/// A declared operation argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: &'static str,
    pub kind: ArgumentKind,
    pub required: bool,
}

/// Static definition of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub type_name: TypeName,
    pub field_name: &'static str,
    pub operation: Operation,
    pub access_path: AccessPath,
    pub result_shape: ResultShape,
    pub arguments: &'static [ArgumentSpec],
}

/// Every supported operation.
pub static OPERATIONS: [OperationDescriptor; 4] = [
    OperationDescriptor {
        type_name: TypeName::Query,
        field_name: "listItems",
        operation: Operation::ListItems,
        access_path: AccessPath::Scan,
        result_shape: ResultShape::List,
        arguments: &[],
    },
    OperationDescriptor {
        type_name: TypeName::Query,
        field_name: "getItemByTitle",
        operation: Operation::GetItemByTitle,
        access_path: AccessPath::SecondaryIndex,
        result_shape: ResultShape::List,
        arguments: &[ArgumentSpec {
            name: "title",
            kind: ArgumentKind::String,
            required: true,
        }],
    },
    OperationDescriptor {
        type_name: TypeName::Query,
        field_name: "getItem",
        operation: Operation::GetItem,
        access_path: AccessPath::PrimaryRead,
        result_shape: ResultShape::OptionalItem,
        arguments: &[ArgumentSpec {
            name: "id",
            kind: ArgumentKind::String,
            required: true,
        }],
    },
    OperationDescriptor {
        type_name: TypeName::Mutation,
        field_name: "addItem",
        operation: Operation::AddItem,
        access_path: AccessPath::PrimaryWrite,
        result_shape: ResultShape::Item,
        arguments: &[ArgumentSpec {
            name: "input",
            kind: ArgumentKind::Object,
            required: true,
        }],
    },
];

/// Finds the descriptor registered for a (type, field) pair.
pub fn lookup(type_name: TypeName, field_name: &str) -> Option<&'static OperationDescriptor> {
    OPERATIONS
        .iter()
        .find(|descriptor| descriptor.type_name == type_name && descriptor.field_name == field_name)
}
