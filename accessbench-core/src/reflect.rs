//! Runtime member lookup for [`TargetRecord`].
//!
//! This module is the introspection facility the always-resolve strategies
//! pay for: name-keyed tables of member descriptors, each wrapping one way of
//! writing a record field. Three tiers of typing are offered, mirroring the
//! mechanisms under comparison:
//!
//! - [`FieldDescriptor`]: untyped field write through `&dyn Any`, downcast
//!   per call.
//! - [`MethodDescriptor`]: setter invocation with an `&[&dyn Any]` argument
//!   slice, arity-checked and downcast per call.
//! - [`RecordFieldHandle`]: a resolved handle with one generic write
//!   signature over a [`FieldValue`], typed at the enum level.
//! - Typed setter pointers ([`TextSetter`], [`NumberSetter`]): monomorphic
//!   handles with no per-call type work at all.
//!
//! The registry itself is metadata, not the binding cache; it is forced
//! during cache resolution so nothing initializes lazily under measurement.

use crate::error::ResolutionError;
use crate::record::TargetRecord;
use fxhash::FxHashMap;
use std::any::Any;
use std::sync::LazyLock;

/// A typed handle to a text setter, invoked with an explicit receiver.
pub type TextSetter = fn(&mut TargetRecord, &str);

/// A typed handle to an integer setter, invoked with an explicit receiver.
pub type NumberSetter = fn(&mut TargetRecord, i64);

/// Argument for the generic-handle write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// A text payload.
    Text(&'static str),
    /// An integer payload.
    Number(i64),
}

/// A resolved field, written through an untyped `&dyn Any` value.
#[derive(Debug)]
pub struct FieldDescriptor {
    name: &'static str,
    write: fn(&mut TargetRecord, &dyn Any) -> Result<(), ResolutionError>,
}

impl FieldDescriptor {
    /// The field name this descriptor resolves.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Write `value` into the field, downcasting to the field's type.
    #[inline]
    pub fn write(&self, record: &mut TargetRecord, value: &dyn Any) -> Result<(), ResolutionError> {
        (self.write)(record, value)
    }
}

/// A resolved setter method, invoked with an untyped argument slice.
#[derive(Debug)]
pub struct MethodDescriptor {
    name: &'static str,
    invoke: fn(&mut TargetRecord, &[&dyn Any]) -> Result<(), ResolutionError>,
}

impl MethodDescriptor {
    /// The setter name this descriptor resolves.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invoke the setter with an argument slice, checking arity and types.
    #[inline]
    pub fn invoke(
        &self,
        record: &mut TargetRecord,
        args: &[&dyn Any],
    ) -> Result<(), ResolutionError> {
        (self.invoke)(record, args)
    }
}

/// A resolved field handle with one generic write signature.
#[derive(Debug, Clone, Copy)]
pub struct RecordFieldHandle {
    name: &'static str,
    write: fn(&mut TargetRecord, FieldValue) -> Result<(), ResolutionError>,
}

impl RecordFieldHandle {
    /// The field name this handle resolves.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Write a [`FieldValue`] into the field.
    #[inline]
    pub fn write(&self, record: &mut TargetRecord, value: FieldValue) -> Result<(), ResolutionError> {
        (self.write)(record, value)
    }
}

// Concrete member writers. These replicate the direct setters exactly so
// every mechanism pays the same field-write cost and differs only in its
// dispatch and type-checking overhead.

fn write_text_dyn(record: &mut TargetRecord, value: &dyn Any) -> Result<(), ResolutionError> {
    let text = value
        .downcast_ref::<&str>()
        .ok_or(ResolutionError::ArgumentMismatch {
            member: "text",
            expected: "&str",
        })?;
    record.text.clear();
    record.text.push_str(text);
    Ok(())
}

fn write_number_dyn(record: &mut TargetRecord, value: &dyn Any) -> Result<(), ResolutionError> {
    let number = value
        .downcast_ref::<i64>()
        .ok_or(ResolutionError::ArgumentMismatch {
            member: "number",
            expected: "i64",
        })?;
    record.number = *number;
    Ok(())
}

fn invoke_set_text(record: &mut TargetRecord, args: &[&dyn Any]) -> Result<(), ResolutionError> {
    if args.len() != 1 {
        return Err(ResolutionError::ArityMismatch {
            member: "set_text",
            expected: 1,
            got: args.len(),
        });
    }
    let text = args[0]
        .downcast_ref::<&str>()
        .ok_or(ResolutionError::ArgumentMismatch {
            member: "set_text",
            expected: "&str",
        })?;
    record.set_text(text);
    Ok(())
}

fn invoke_set_number(record: &mut TargetRecord, args: &[&dyn Any]) -> Result<(), ResolutionError> {
    if args.len() != 1 {
        return Err(ResolutionError::ArityMismatch {
            member: "set_number",
            expected: 1,
            got: args.len(),
        });
    }
    let number = args[0]
        .downcast_ref::<i64>()
        .ok_or(ResolutionError::ArgumentMismatch {
            member: "set_number",
            expected: "i64",
        })?;
    record.set_number(*number);
    Ok(())
}

fn write_text_generic(record: &mut TargetRecord, value: FieldValue) -> Result<(), ResolutionError> {
    match value {
        FieldValue::Text(text) => {
            record.text.clear();
            record.text.push_str(text);
            Ok(())
        }
        FieldValue::Number(_) => Err(ResolutionError::ArgumentMismatch {
            member: "text",
            expected: "FieldValue::Text",
        }),
    }
}

fn write_number_generic(
    record: &mut TargetRecord,
    value: FieldValue,
) -> Result<(), ResolutionError> {
    match value {
        FieldValue::Number(number) => {
            record.number = number;
            Ok(())
        }
        FieldValue::Text(_) => Err(ResolutionError::ArgumentMismatch {
            member: "number",
            expected: "FieldValue::Number",
        }),
    }
}

struct Registry {
    fields: FxHashMap<&'static str, FieldDescriptor>,
    methods: FxHashMap<&'static str, MethodDescriptor>,
    handles: FxHashMap<&'static str, RecordFieldHandle>,
    text_setters: FxHashMap<&'static str, TextSetter>,
    number_setters: FxHashMap<&'static str, NumberSetter>,
}

impl Registry {
    fn new() -> Self {
        let mut fields = FxHashMap::default();
        fields.insert(
            "text",
            FieldDescriptor {
                name: "text",
                write: write_text_dyn,
            },
        );
        fields.insert(
            "number",
            FieldDescriptor {
                name: "number",
                write: write_number_dyn,
            },
        );

        let mut methods = FxHashMap::default();
        methods.insert(
            "set_text",
            MethodDescriptor {
                name: "set_text",
                invoke: invoke_set_text,
            },
        );
        methods.insert(
            "set_number",
            MethodDescriptor {
                name: "set_number",
                invoke: invoke_set_number,
            },
        );

        let mut handles = FxHashMap::default();
        handles.insert(
            "text",
            RecordFieldHandle {
                name: "text",
                write: write_text_generic,
            },
        );
        handles.insert(
            "number",
            RecordFieldHandle {
                name: "number",
                write: write_number_generic,
            },
        );

        let mut text_setters = FxHashMap::default();
        text_setters.insert("set_text", TargetRecord::set_text as TextSetter);

        let mut number_setters = FxHashMap::default();
        number_setters.insert("set_number", TargetRecord::set_number as NumberSetter);

        Self {
            fields,
            methods,
            handles,
            text_setters,
            number_setters,
        }
    }
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Force the registry tables into existence. Called during binding-cache
/// resolution so the first name lookup a worker performs is never also the
/// table construction.
pub fn warm() {
    LazyLock::force(&REGISTRY);
}

/// Resolve a field descriptor by name.
pub fn field(name: &str) -> Result<&'static FieldDescriptor, ResolutionError> {
    REGISTRY
        .fields
        .get(name)
        .ok_or_else(|| ResolutionError::UnknownField(name.to_string()))
}

/// Resolve a setter method descriptor by name.
pub fn method(name: &str) -> Result<&'static MethodDescriptor, ResolutionError> {
    REGISTRY
        .methods
        .get(name)
        .ok_or_else(|| ResolutionError::UnknownMethod(name.to_string()))
}

/// Resolve a generic field handle by name.
pub fn field_handle(name: &str) -> Result<RecordFieldHandle, ResolutionError> {
    REGISTRY
        .handles
        .get(name)
        .copied()
        .ok_or_else(|| ResolutionError::UnknownField(name.to_string()))
}

/// Resolve the typed text setter by name.
pub fn text_setter(name: &str) -> Result<TextSetter, ResolutionError> {
    REGISTRY
        .text_setters
        .get(name)
        .copied()
        .ok_or_else(|| ResolutionError::UnknownMethod(name.to_string()))
}

/// Resolve the typed integer setter by name.
pub fn number_setter(name: &str) -> Result<NumberSetter, ResolutionError> {
    REGISTRY
        .number_setters
        .get(name)
        .copied()
        .ok_or_else(|| ResolutionError::UnknownMethod(name.to_string()))
}
