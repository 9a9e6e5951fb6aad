//! Accessor strategies: one mechanism per way of setting two fields on a
//! record whose members are not known at compile time.
//!
//! Every strategy exposes the same operation — overwrite the text field and
//! the integer field — and leaves a fresh record in an identical final state,
//! so the variants are semantically interchangeable and only their binding
//! and per-call costs differ.

use crate::cache::BindingCache;
use crate::error::ResolutionError;
use crate::record::TargetRecord;
use crate::reflect::{
    self, FieldDescriptor, FieldValue, MethodDescriptor, NumberSetter, RecordFieldHandle,
    TextSetter,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A callable synthesized once from the resolved setters, specialized to the
/// exact setter signature. One-time composition cost, near-direct steady
/// state.
pub type GeneratedApply = Arc<dyn Fn(&mut TargetRecord, &str, i64) + Send + Sync>;

/// The member names by which strategies resolve their bindings.
///
/// Defaults name the real members; tests and configuration can point a
/// strategy at a missing member to exercise resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberNames {
    /// Name of the text field.
    pub text_field: String,
    /// Name of the integer field.
    pub number_field: String,
    /// Name of the text setter.
    pub text_setter: String,
    /// Name of the integer setter.
    pub number_setter: String,
}

impl Default for MemberNames {
    fn default() -> Self {
        Self {
            text_field: "text".to_string(),
            number_field: "number".to_string(),
            text_setter: "set_text".to_string(),
            number_setter: "set_number".to_string(),
        }
    }
}

/// The closed set of benchmarked strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Compile-time-bound setter calls; the performance ceiling.
    Direct,
    /// Field descriptor resolved by name on every call.
    ReflectiveFieldUncached,
    /// Field descriptor resolved once, reused from the binding cache.
    ReflectiveFieldCached,
    /// Setter method descriptor resolved by name on every call.
    ReflectiveMethodUncached,
    /// Setter method descriptor resolved once, reused from the binding cache.
    ReflectiveMethodCached,
    /// Generic field handle resolved by name on every call.
    GenericHandleUncached,
    /// Generic field handle resolved once, reused from the binding cache.
    GenericHandleCached,
    /// Typed setter handles closed over the iteration's record instance.
    BoundMethodHandle,
    /// Typed setter handles invoked with an explicit receiver.
    UnboundMethodHandle,
    /// Specialized callable synthesized once from the resolved setters.
    GeneratedClosure,
}

impl StrategyKind {
    /// Every strategy, in report order.
    pub const ALL: [StrategyKind; 10] = [
        StrategyKind::Direct,
        StrategyKind::ReflectiveFieldUncached,
        StrategyKind::ReflectiveFieldCached,
        StrategyKind::ReflectiveMethodUncached,
        StrategyKind::ReflectiveMethodCached,
        StrategyKind::GenericHandleUncached,
        StrategyKind::GenericHandleCached,
        StrategyKind::BoundMethodHandle,
        StrategyKind::UnboundMethodHandle,
        StrategyKind::GeneratedClosure,
    ];

    /// Stable kebab-case identifier, used for filtering and reporting.
    pub fn id(self) -> &'static str {
        match self {
            StrategyKind::Direct => "direct",
            StrategyKind::ReflectiveFieldUncached => "reflective-field-uncached",
            StrategyKind::ReflectiveFieldCached => "reflective-field-cached",
            StrategyKind::ReflectiveMethodUncached => "reflective-method-uncached",
            StrategyKind::ReflectiveMethodCached => "reflective-method-cached",
            StrategyKind::GenericHandleUncached => "generic-handle-uncached",
            StrategyKind::GenericHandleCached => "generic-handle-cached",
            StrategyKind::BoundMethodHandle => "bound-method-handle",
            StrategyKind::UnboundMethodHandle => "unbound-method-handle",
            StrategyKind::GeneratedClosure => "generated-closure",
        }
    }

    /// Whether this strategy performs a fresh name lookup on every call.
    pub fn resolves_per_call(self) -> bool {
        matches!(
            self,
            StrategyKind::ReflectiveFieldUncached
                | StrategyKind::ReflectiveMethodUncached
                | StrategyKind::GenericHandleUncached
        )
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| format!("unknown strategy: {s}"))
    }
}

/// A bound accessor: the tagged-variant rendition of one strategy, ready to
/// apply. Read-only after binding and therefore race-free to share across
/// worker threads.
pub enum Accessor {
    /// Ordinary setter calls.
    Direct,
    /// Resolve field descriptors by name per call.
    FieldLookup {
        /// Names to resolve on every call.
        names: MemberNames,
    },
    /// Field descriptors resolved once from the cache.
    FieldCached {
        /// Resolved text field.
        text: &'static FieldDescriptor,
        /// Resolved integer field.
        number: &'static FieldDescriptor,
    },
    /// Resolve setter descriptors by name per call.
    MethodLookup {
        /// Names to resolve on every call.
        names: MemberNames,
    },
    /// Setter descriptors resolved once from the cache.
    MethodCached {
        /// Resolved text setter.
        text: &'static MethodDescriptor,
        /// Resolved integer setter.
        number: &'static MethodDescriptor,
    },
    /// Resolve generic field handles by name per call.
    HandleLookup {
        /// Names to resolve on every call.
        names: MemberNames,
    },
    /// Generic field handles resolved once from the cache.
    HandleCached {
        /// Resolved text handle.
        text: RecordFieldHandle,
        /// Resolved integer handle.
        number: RecordFieldHandle,
    },
    /// Typed setters bound per iteration to the record instance.
    Bound {
        /// Resolved text setter.
        set_text: TextSetter,
        /// Resolved integer setter.
        set_number: NumberSetter,
    },
    /// Typed setters invoked with an explicit receiver.
    Unbound {
        /// Resolved text setter.
        set_text: TextSetter,
        /// Resolved integer setter.
        set_number: NumberSetter,
    },
    /// The once-synthesized specialized callable.
    Generated {
        /// Composed setter closure.
        apply: GeneratedApply,
    },
}

impl Accessor {
    /// Bind a strategy. Cached variants copy their once-resolved bindings
    /// out of the cache; always-resolve variants carry only the member names
    /// and never touch the cache.
    ///
    /// Binding is infallible: any resolution failure already surfaced when
    /// the cache was resolved, before any measurement began.
    pub fn bind(kind: StrategyKind, cache: &BindingCache, names: &MemberNames) -> Accessor {
        match kind {
            StrategyKind::Direct => Accessor::Direct,
            StrategyKind::ReflectiveFieldUncached => Accessor::FieldLookup {
                names: names.clone(),
            },
            StrategyKind::ReflectiveFieldCached => Accessor::FieldCached {
                text: cache.text_field,
                number: cache.number_field,
            },
            StrategyKind::ReflectiveMethodUncached => Accessor::MethodLookup {
                names: names.clone(),
            },
            StrategyKind::ReflectiveMethodCached => Accessor::MethodCached {
                text: cache.text_method,
                number: cache.number_method,
            },
            StrategyKind::GenericHandleUncached => Accessor::HandleLookup {
                names: names.clone(),
            },
            StrategyKind::GenericHandleCached => Accessor::HandleCached {
                text: cache.text_handle,
                number: cache.number_handle,
            },
            StrategyKind::BoundMethodHandle => Accessor::Bound {
                set_text: cache.set_text,
                set_number: cache.set_number,
            },
            StrategyKind::UnboundMethodHandle => Accessor::Unbound {
                set_text: cache.set_text,
                set_number: cache.set_number,
            },
            StrategyKind::GeneratedClosure => Accessor::Generated {
                apply: Arc::clone(&cache.generated),
            },
        }
    }

    /// Overwrite both fields of `record`.
    ///
    /// The payload text is `&'static str` because the reflective paths pass
    /// it as `&dyn Any`, which requires an owned-lifetime-free type.
    #[inline]
    pub fn apply(
        &self,
        record: &mut TargetRecord,
        text: &'static str,
        number: i64,
    ) -> Result<(), ResolutionError> {
        match self {
            Accessor::Direct => {
                record.set_text(text);
                record.set_number(number);
                Ok(())
            }
            Accessor::FieldLookup { names } => {
                let text_field = reflect::field(&names.text_field)?;
                let number_field = reflect::field(&names.number_field)?;
                text_field.write(record, &text)?;
                number_field.write(record, &number)
            }
            Accessor::FieldCached { text: tf, number: nf } => {
                tf.write(record, &text)?;
                nf.write(record, &number)
            }
            Accessor::MethodLookup { names } => {
                let text_method = reflect::method(&names.text_setter)?;
                let number_method = reflect::method(&names.number_setter)?;
                text_method.invoke(record, &[&text])?;
                number_method.invoke(record, &[&number])
            }
            Accessor::MethodCached { text: tm, number: nm } => {
                tm.invoke(record, &[&text])?;
                nm.invoke(record, &[&number])
            }
            Accessor::HandleLookup { names } => {
                let text_handle = reflect::field_handle(&names.text_field)?;
                let number_handle = reflect::field_handle(&names.number_field)?;
                text_handle.write(record, FieldValue::Text(text))?;
                number_handle.write(record, FieldValue::Number(number))
            }
            Accessor::HandleCached { text: th, number: nh } => {
                th.write(record, FieldValue::Text(text))?;
                nh.write(record, FieldValue::Number(number))
            }
            Accessor::Bound {
                set_text,
                set_number,
            }
            | Accessor::Unbound {
                set_text,
                set_number,
            } => {
                set_text(record, text);
                set_number(record, number);
                Ok(())
            }
            Accessor::Generated { apply } => {
                apply(record, text, number);
                Ok(())
            }
        }
    }

    /// Start one measurement iteration: a fresh record, plus the instance
    /// binding for the bound-handle form.
    pub fn begin_iteration(&self) -> Applier<'_> {
        let mode = match self {
            Accessor::Bound {
                set_text,
                set_number,
            } => ApplierMode::Bound {
                set_text: *set_text,
                set_number: *set_number,
            },
            shared => ApplierMode::Shared(shared),
        };
        Applier {
            record: TargetRecord::new(),
            mode,
        }
    }
}

/// One iteration's view of a strategy: owns the fresh record and, for the
/// bound-handle form, the setters closed over it.
pub struct Applier<'a> {
    record: TargetRecord,
    mode: ApplierMode<'a>,
}

#[derive(Clone, Copy)]
enum ApplierMode<'a> {
    Shared(&'a Accessor),
    Bound {
        set_text: TextSetter,
        set_number: NumberSetter,
    },
}

impl Applier<'_> {
    /// Apply the strategy once to the iteration's record.
    #[inline]
    pub fn apply(&mut self, text: &'static str, number: i64) -> Result<(), ResolutionError> {
        match self.mode {
            ApplierMode::Shared(accessor) => accessor.apply(&mut self.record, text, number),
            ApplierMode::Bound {
                set_text,
                set_number,
            } => {
                set_text(&mut self.record, text);
                set_number(&mut self.record, number);
                Ok(())
            }
        }
    }

    /// The iteration's record, for sinking after each operation.
    pub fn record(&self) -> &TargetRecord {
        &self.record
    }
}
