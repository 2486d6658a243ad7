use crate::{FieldList, ProtoType};

use dbmap_core::{
    config::ProtoConfig,
    err,
    schema::db::{Database, Table},
    Error, Result,
};
use heck::ToUpperCamelCase;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

/// Writes one `.proto` file per table.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    proto: &'a ProtoConfig,

    /// Replace foreign key columns with fields of the referenced message type.
    embed_relationships: bool,
}

/// A rendered schema file for one table.
struct ProtoFile<'a> {
    proto: &'a ProtoConfig,
    table: &'a Table,
    fields: FieldList<'a>,

    /// Mapped type of each field; `None` for relation fields.
    types: Vec<Option<ProtoType>>,
}

impl<'a> Generator<'a> {
    pub fn new(proto: &'a ProtoConfig, embed_relationships: bool) -> Generator<'a> {
        Generator {
            proto,
            embed_relationships,
        }
    }

    /// Writes every table of `database` to `{root}/{proto.path}/{schema}/{table}.proto`
    /// and returns the written paths in generation order.
    pub fn generate(&self, root: impl AsRef<Path>, database: &Database) -> Result<Vec<PathBuf>> {
        let mut written = vec![];

        for schema in &database.schemas {
            let dir = root.as_ref().join(&self.proto.path).join(&schema.name);
            fs::create_dir_all(&dir).map_err(|e| Error::output_io(&dir, e))?;

            for table in &schema.tables {
                log::info!("{}/{}.proto", table.schema, table.name);

                let contents = self
                    .render(table)
                    .map_err(|e| e.context(err!("generating {}", table.qualified_name())))?;

                let path = dir.join(format!("{}.proto", table.name));
                fs::write(&path, contents).map_err(|e| Error::output_io(&path, e))?;
                written.push(path);
            }
        }

        Ok(written)
    }

    /// Renders the schema file of one table without touching the filesystem.
    pub fn render(&self, table: &Table) -> Result<String> {
        let fields = if self.embed_relationships {
            FieldList::resolve(table)?
        } else {
            FieldList::plain(table)
        };

        let types = fields
            .iter()
            .map(|field| match field.relation {
                Some(_) => None,
                None => Some(ProtoType::from_native(&field.column.udt_name)),
            })
            .collect();

        let file = ProtoFile {
            proto: self.proto,
            table,
            fields,
            types,
        };

        Ok(file.to_string())
    }
}

impl ProtoFile<'_> {
    /// Distinct foreign message files, in first-seen order.
    fn foreign_imports(&self) -> Vec<String> {
        let mut imports: Vec<String> = vec![];

        for resolved in self.fields.relations() {
            let import = format!(
                "{}/{}.proto",
                resolved.relation.foreign_schema, resolved.relation.foreign_table
            );
            if !imports.contains(&import) {
                imports.push(import);
            }
        }

        imports
    }

    fn type_imports(&self) -> Vec<&'static str> {
        let mut imports = vec![];

        for import in self.types.iter().flatten().filter_map(|ty| ty.import()) {
            if !imports.contains(&import) {
                imports.push(import);
            }
        }

        imports
    }
}

impl fmt::Display for ProtoFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schema = &self.table.schema;
        let message = self.table.name.to_upper_camel_case();

        writeln!(f, "//-------------------------------------------------------------------")?;
        writeln!(f, "// This file is automatically generated from the database schema.")?;
        writeln!(f, "// ---- DO NOT MAKE CHANGES DIRECTLY TO THIS FILE! ----")?;
        writeln!(f)?;

        writeln!(f, "syntax = \"{}\";", self.proto.version.as_str())?;
        writeln!(f)?;

        writeln!(f, "package {schema};")?;
        writeln!(f)?;

        writeln!(f, "option cc_enable_arenas = true;")?;
        writeln!(f, "option java_package = \"{}.{}\";", self.proto.java_package, schema)?;
        writeln!(f, "option java_outer_classname = \"{message}Proto\";")?;
        writeln!(f, "option objc_class_prefix = \"{}\";", self.proto.objc_prefix)?;
        writeln!(f)?;

        let foreign_imports = self.foreign_imports();
        if !foreign_imports.is_empty() {
            writeln!(f, "// Foreign Key Imports")?;
            writeln!(f)?;
            for import in &foreign_imports {
                writeln!(f, "import \"{import}\";")?;
            }
            writeln!(f)?;
        }

        let type_imports = self.type_imports();
        if !type_imports.is_empty() {
            writeln!(f, "// Other Datatype Imports")?;
            writeln!(f)?;
            for import in &type_imports {
                writeln!(f, "import \"{import}\";")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "message {message} {{")?;

        for ((number, field), ty) in self.fields.numbered().zip(&self.types) {
            match (&field.relation, ty) {
                (Some(resolved), _) => writeln!(
                    f,
                    "    optional {}.{} {} = {}; // => {}",
                    resolved.relation.foreign_schema,
                    resolved.relation.foreign_table.to_upper_camel_case(),
                    resolved.map_name,
                    number,
                    resolved.local_keys()
                )?,
                (None, Some(ty)) => {
                    let label = if field.column.is_array() {
                        "repeated "
                    } else if self.proto.version.requires_label() {
                        "optional "
                    } else {
                        ""
                    };
                    writeln!(f, "    {label}{ty} {} = {number};", field.column.name)?
                }
                (None, None) => {}
            }
        }

        writeln!(f, "}}")
    }
}
