use std::fmt;

/// A protocol buffer field type a native column type maps to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProtoType {
    Int32,
    Int64,
    Bool,
    String,
    Double,

    /// Emitted as `float64` for `float` and `real` columns.
    ///
    /// `float64` is not a protobuf scalar and `real` is a 32 bit type in most engines; the
    /// name is kept because generated consumers already depend on it.
    Float64,

    Bytes,

    /// `google.protobuf.Timestamp`
    Timestamp,
}

impl ProtoType {
    /// Maps a native column type name, falling back to `bytes` for unknown names.
    pub fn from_native(name: &str) -> ProtoType {
        Self::try_from_native(name).unwrap_or_else(|| {
            log::warn!("failed to map native type `{name}` to protobuf, using `bytes`");
            ProtoType::Bytes
        })
    }

    /// Maps a native column type name. Matching is case sensitive and the first rule that
    /// matches wins.
    pub fn try_from_native(name: &str) -> Option<ProtoType> {
        let starts = |prefixes: &[&str]| prefixes.iter().any(|p| name.starts_with(p));
        let exact = |names: &[&str]| names.contains(&name);

        let ty = if exact(&["bigint", "bigint[]", "bigserial", "serial8"]) {
            ProtoType::Int64
        } else if starts(&["int", "bit", "smallint"]) || exact(&["int2", "smallserial", "serial"])
        {
            ProtoType::Int32
        } else if starts(&["bool"]) {
            ProtoType::Bool
        } else if exact(&["jsonb"]) {
            ProtoType::Bytes
        } else if starts(&["json"]) {
            ProtoType::String
        } else if starts(&["char", "varchar", "text"]) || exact(&["xml", "uuid"]) {
            ProtoType::String
        } else if exact(&["money", "numeric", "float8", "double precision"])
            || starts(&["number", "decimal"])
        {
            ProtoType::Double
        } else if exact(&["float", "real"]) {
            ProtoType::Float64
        } else if (starts(&["time"]) && !starts(&["timestamp"])) || exact(&["date"]) {
            // Times of day and dates are carried as integers
            ProtoType::Int64
        } else if exact(&["bytea"]) {
            ProtoType::Bytes
        } else if starts(&["timestamp"]) {
            ProtoType::Timestamp
        } else {
            return None;
        };

        Some(ty)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProtoType::Int32 => "int32",
            ProtoType::Int64 => "int64",
            ProtoType::Bool => "bool",
            ProtoType::String => "string",
            ProtoType::Double => "double",
            ProtoType::Float64 => "float64",
            ProtoType::Bytes => "bytes",
            ProtoType::Timestamp => "google.protobuf.Timestamp",
        }
    }

    /// The file a schema using this type has to import.
    pub fn import(self) -> Option<&'static str> {
        match self {
            ProtoType::Timestamp => Some("google/protobuf/timestamp.proto"),
            _ => None,
        }
    }
}

impl fmt::Display for ProtoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
