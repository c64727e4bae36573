//! Field descriptors binding one entity attribute to its external form.
//!
//! A [`Field`] names an attribute, fixes its semantic type, and carries the
//! explicit getter/setter pair that reads and writes the entity. There is no
//! reflection: every binding is a plain function handed over at definition
//! time.

use std::sync::Arc;

use serde_json::{Number, Value};

use crate::schema::Schema;

/// Staged write produced by a successful conversion of external input.
///
/// Patches accumulate during a marshal pass and are only applied once every
/// selected field has validated, so a failed marshal leaves the entity
/// untouched.
pub type Patch<E> = Box<dyn FnOnce(&mut E) + Send>;

/// Caller-supplied resolution of a nested field's raw payload into an
/// existing related entity, typically a by-id repository lookup captured in
/// the closure. Returning `None` becomes a field-level validation error.
pub type Resolver<R> = Arc<dyn Fn(&Value) -> Option<R> + Send + Sync>;

/// Describes one attribute: name, semantic type, required-ness, default,
/// read-only flag, and its (de)serialization binding.
pub struct Field<E> {
    pub(crate) name: &'static str,
    pub(crate) required: bool,
    pub(crate) read_only: bool,
    pub(crate) default: Option<Value>,
    pub(crate) kind: FieldKind<E>,
}

pub(crate) enum FieldKind<E> {
    String {
        get: fn(&E) -> Option<String>,
        set: Option<fn(&mut E, String)>,
    },
    Boolean {
        get: fn(&E) -> Option<bool>,
        set: Option<fn(&mut E, bool)>,
    },
    Integer {
        get: fn(&E) -> Option<i64>,
        set: Option<fn(&mut E, i64)>,
    },
    Nested(Box<dyn NestedField<E>>),
}

// Staged patches are boxed `FnOnce` trait objects, so the entity type must
// outlive the box's implicit `'static` bound. Every entity here is owned.
impl<E: 'static> Field<E> {
    /// Declare a string attribute. Pass `set: None` only for fields marked
    /// [`Field::read_only`]; the builder rejects writable fields without a
    /// setter.
    #[must_use]
    pub fn string(
        name: &'static str,
        get: fn(&E) -> Option<String>,
        set: Option<fn(&mut E, String)>,
    ) -> Self {
        Self::new(name, FieldKind::String { get, set })
    }

    /// Declare a boolean attribute.
    #[must_use]
    pub fn boolean(
        name: &'static str,
        get: fn(&E) -> Option<bool>,
        set: Option<fn(&mut E, bool)>,
    ) -> Self {
        Self::new(name, FieldKind::Boolean { get, set })
    }

    /// Declare an integer attribute.
    #[must_use]
    pub fn integer(
        name: &'static str,
        get: fn(&E) -> Option<i64>,
        set: Option<fn(&mut E, i64)>,
    ) -> Self {
        Self::new(name, FieldKind::Integer { get, set })
    }

    /// Declare a nested attribute whose value is produced by another schema
    /// run against a related entity.
    #[must_use]
    pub fn nested<R>(name: &'static str, binding: NestedBinding<E, R>) -> Self
    where
        R: Send + Sync + 'static,
    {
        Self::new(name, FieldKind::Nested(Box::new(binding)))
    }

    fn new(name: &'static str, kind: FieldKind<E>) -> Self {
        Self {
            name,
            required: true,
            read_only: false,
            default: None,
            kind,
        }
    }

    /// Mark the field as read-only: always emitted on serialize, silently
    /// dropped from marshal input.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Mark the field as not required on marshal input.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Substitute `value` when marshal input omits the field. The builder
    /// rejects defaults whose JSON type does not match the field kind.
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Field name as it appears in external payloads.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read the entity attribute and render its external JSON value.
    /// `None` means the attribute is absent on this entity.
    pub(crate) fn to_external(&self, entity: &E) -> Option<Value> {
        match &self.kind {
            FieldKind::String { get, .. } => get(entity).map(Value::String),
            FieldKind::Boolean { get, .. } => get(entity).map(Value::Bool),
            FieldKind::Integer { get, .. } => {
                get(entity).map(|v| Value::Number(Number::from(v)))
            }
            FieldKind::Nested(nested) => nested.to_external(entity),
        }
    }

    /// Type-check `raw` and stage the corresponding write. The message in
    /// the error position is the human-readable text recorded against this
    /// field's name in the aggregated error mapping.
    pub(crate) fn to_internal(&self, raw: &Value) -> Result<Patch<E>, String> {
        match &self.kind {
            FieldKind::String { set, .. } => {
                let set = set.ok_or_else(|| "cannot be written".to_owned())?;
                let value = raw
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| "must be a string".to_owned())?;
                Ok(Box::new(move |entity| set(entity, value)))
            }
            FieldKind::Boolean { set, .. } => {
                let set = set.ok_or_else(|| "cannot be written".to_owned())?;
                let value = raw
                    .as_bool()
                    .ok_or_else(|| "must be a boolean".to_owned())?;
                Ok(Box::new(move |entity| set(entity, value)))
            }
            FieldKind::Integer { set, .. } => {
                let set = set.ok_or_else(|| "cannot be written".to_owned())?;
                let value = raw
                    .as_i64()
                    .ok_or_else(|| "must be an integer".to_owned())?;
                Ok(Box::new(move |entity| set(entity, value)))
            }
            FieldKind::Nested(nested) => nested.to_internal(raw),
        }
    }

    /// Whether `default` matches the declared field kind.
    pub(crate) fn default_matches_kind(&self) -> bool {
        match (&self.kind, &self.default) {
            (_, None) => true,
            (FieldKind::String { .. }, Some(value)) => value.is_string(),
            (FieldKind::Boolean { .. }, Some(value)) => value.is_boolean(),
            (FieldKind::Integer { .. }, Some(value)) => value.as_i64().is_some(),
            // Nested fields resolve against the store; a canned default makes
            // no sense there.
            (FieldKind::Nested(_), Some(_)) => false,
        }
    }

    /// Whether the field can accept marshal input.
    pub(crate) fn has_setter(&self) -> bool {
        match &self.kind {
            FieldKind::String { set, .. } => set.is_some(),
            FieldKind::Boolean { set, .. } => set.is_some(),
            FieldKind::Integer { set, .. } => set.is_some(),
            FieldKind::Nested(_) => true,
        }
    }
}

/// Type-erased nested field behaviour; implemented by [`NestedBinding`].
pub(crate) trait NestedField<E>: Send + Sync {
    /// Serialize the related entity through the nested schema.
    fn to_external(&self, entity: &E) -> Option<Value>;

    /// Resolve raw input into a staged write of the related entity.
    fn to_internal(&self, raw: &Value) -> Result<Patch<E>, String>;
}

/// Binds a nested field to a related entity type `R`.
///
/// Serialization runs the related [`Schema`] over the entity returned by
/// `get`; marshalling hands the raw sub-payload to `resolve` and, on
/// success, stages `set` with the resolved entity.
pub struct NestedBinding<E, R> {
    schema: Arc<Schema<R>>,
    get: fn(&E) -> Option<&R>,
    set: fn(&mut E, R),
    resolve: Resolver<R>,
}

impl<E, R> NestedBinding<E, R> {
    /// Bind a nested field to the related schema and its accessors.
    #[must_use]
    pub fn new(
        schema: Arc<Schema<R>>,
        get: fn(&E) -> Option<&R>,
        set: fn(&mut E, R),
        resolve: Resolver<R>,
    ) -> Self {
        Self {
            schema,
            get,
            set,
            resolve,
        }
    }
}

impl<E, R> NestedField<E> for NestedBinding<E, R>
where
    E: 'static,
    R: Send + Sync + 'static,
{
    fn to_external(&self, entity: &E) -> Option<Value> {
        (self.get)(entity).map(|related| Value::Object(self.schema.serialize(related, None)))
    }

    fn to_internal(&self, raw: &Value) -> Result<Patch<E>, String> {
        match (self.resolve)(raw) {
            Some(related) => {
                let set = self.set;
                Ok(Box::new(move |entity| set(entity, related)))
            }
            None => Err("could not be resolved".to_owned()),
        }
    }
}
