//! Schema core: serialize/marshal orchestration and error aggregation.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::error::{MappingInvalid, SchemaError};
use crate::field::{Field, Patch};
use crate::role::Role;

/// Immutable mapping schema for entity type `E`.
///
/// Built once via [`Schema::builder`] and shared read-only across requests.
/// Fields keep their declaration order in every operation.
pub struct Schema<E> {
    fields: Vec<Field<E>>,
    roles: HashMap<String, Role>,
}

/// Per-call marshal settings: an optional role restriction and the partial
/// flag used for partial updates.
#[derive(Default, Clone, Copy)]
pub struct MarshalOptions<'a> {
    /// Restrict the marshal pass to fields whitelisted by this role.
    pub role: Option<&'a Role>,
    /// When set, missing fields are never treated as required-field errors.
    pub partial: bool,
}

impl MarshalOptions<'_> {
    /// Options for a partial update: no role restriction, missing fields
    /// allowed.
    #[must_use]
    pub fn partial_update() -> Self {
        Self {
            role: None,
            partial: true,
        }
    }
}

impl<E: 'static> Schema<E> {
    /// Start declaring a schema.
    #[must_use]
    pub fn builder() -> SchemaBuilder<E> {
        SchemaBuilder {
            fields: Vec::new(),
            roles: Vec::new(),
        }
    }

    /// Look up a role registered at build time.
    #[must_use]
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    /// Convert an entity into a plain JSON object.
    ///
    /// Fields are emitted in declaration order, restricted to `role` when
    /// one is given. Read-only fields are included. An attribute absent on
    /// the entity falls back to the field default when one exists and is
    /// otherwise omitted from the output.
    pub fn serialize(&self, entity: &E, role: Option<&Role>) -> Map<String, Value> {
        let mut out = Map::new();
        for field in self.selected(role) {
            match field.to_external(entity) {
                Some(value) => {
                    out.insert(field.name().to_owned(), value);
                }
                None => {
                    if let Some(default) = &field.default {
                        out.insert(field.name().to_owned(), default.clone());
                    }
                }
            }
        }
        out
    }

    /// Collation mode: serialize a sequence of entities with the same
    /// per-item rules as [`Schema::serialize`]. Marshal has no collection
    /// counterpart.
    pub fn serialize_many<'a, I>(&self, entities: I, role: Option<&Role>) -> Vec<Map<String, Value>>
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        entities
            .into_iter()
            .map(|entity| self.serialize(entity, role))
            .collect()
    }

    /// Validate external data and apply it to `entity`.
    ///
    /// Every selected non-read-only field is checked; failures accumulate
    /// per field name instead of short-circuiting. Only when the whole pass
    /// is clean are the staged writes applied, so an `Err` means no change
    /// was made to the entity at all. The result is never persisted here;
    /// that is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`MappingInvalid`] carrying the full field-to-message map
    /// when any selected field is missing, mistyped, or unresolvable.
    pub fn marshal(
        &self,
        data: &Map<String, Value>,
        mut entity: E,
        options: &MarshalOptions<'_>,
    ) -> Result<E, MappingInvalid> {
        let mut errors: BTreeMap<String, String> = BTreeMap::new();
        let mut patches: Vec<Patch<E>> = Vec::new();

        for field in self.selected(options.role) {
            if field.read_only {
                // Present-but-ignored by contract: never required, never
                // written from external data.
                continue;
            }

            match data.get(field.name()) {
                Some(raw) => match field.to_internal(raw) {
                    Ok(patch) => patches.push(patch),
                    Err(message) => {
                        errors.insert(field.name().to_owned(), message);
                    }
                },
                None => {
                    if options.partial {
                        // Partial updates leave absent attributes untouched;
                        // defaults only fill in on a full marshal.
                        continue;
                    }
                    if let Some(default) = &field.default {
                        match field.to_internal(default) {
                            Ok(patch) => patches.push(patch),
                            Err(message) => {
                                errors.insert(field.name().to_owned(), message);
                            }
                        }
                    } else if field.required {
                        errors.insert(
                            field.name().to_owned(),
                            "this field is required".to_owned(),
                        );
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(MappingInvalid::new(errors));
        }

        for patch in patches {
            patch(&mut entity);
        }
        Ok(entity)
    }

    fn selected<'a>(&'a self, role: Option<&'a Role>) -> impl Iterator<Item = &'a Field<E>> {
        self.fields
            .iter()
            .filter(move |field| role.is_none_or(|active| active.contains(field.name())))
    }
}

/// Ordered declaration of fields and roles, validated by [`SchemaBuilder::build`].
pub struct SchemaBuilder<E> {
    fields: Vec<Field<E>>,
    roles: Vec<Role>,
}

impl<E: 'static> SchemaBuilder<E> {
    /// Declare a field. Declaration order is the serialization order.
    #[must_use]
    pub fn field(mut self, field: Field<E>) -> Self {
        self.fields.push(field);
        self
    }

    /// Register a named role.
    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Validate the declaration and produce an immutable [`Schema`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when field names collide, a role references
    /// an undeclared field, a default does not type-check, or a writable
    /// field lacks a setter.
    pub fn build(self) -> Result<Schema<E>, SchemaError> {
        for (index, field) in self.fields.iter().enumerate() {
            if self.fields[..index]
                .iter()
                .any(|other| other.name() == field.name())
            {
                return Err(SchemaError::DuplicateField {
                    name: field.name().to_owned(),
                });
            }
            if !field.default_matches_kind() {
                return Err(SchemaError::InvalidDefault {
                    name: field.name().to_owned(),
                });
            }
            if !field.read_only && !field.has_setter() {
                return Err(SchemaError::MissingSetter {
                    name: field.name().to_owned(),
                });
            }
        }

        let mut roles = HashMap::with_capacity(self.roles.len());
        for role in self.roles {
            for name in role.names() {
                if !self.fields.iter().any(|field| field.name() == name) {
                    return Err(SchemaError::UnknownRoleField {
                        role: role.name().to_owned(),
                        name: name.to_owned(),
                    });
                }
            }
            if roles.insert(role.name().to_owned(), role.clone()).is_some() {
                return Err(SchemaError::DuplicateRole {
                    name: role.name().to_owned(),
                });
            }
        }

        Ok(Schema {
            fields: self.fields,
            roles,
        })
    }
}
