//! One-shot resolution of every cached binding.

use crate::error::ResolutionError;
use crate::reflect::{
    self, FieldDescriptor, MethodDescriptor, NumberSetter, RecordFieldHandle, TextSetter,
};
use crate::strategy::{GeneratedApply, MemberNames};
use std::fmt;
use std::sync::Arc;

/// Every strategy's once-resolved binding, keyed by mechanism.
///
/// Resolved exactly once, single-threaded, before any worker thread is
/// spawned; read-only for the remainder of the run, so worker threads share
/// it without synchronization. No entry is ever invalidated or refreshed.
/// Always-resolve strategies never read it.
pub struct BindingCache {
    /// Resolved text field descriptor.
    pub text_field: &'static FieldDescriptor,
    /// Resolved integer field descriptor.
    pub number_field: &'static FieldDescriptor,
    /// Resolved text setter descriptor.
    pub text_method: &'static MethodDescriptor,
    /// Resolved integer setter descriptor.
    pub number_method: &'static MethodDescriptor,
    /// Resolved generic text field handle.
    pub text_handle: RecordFieldHandle,
    /// Resolved generic integer field handle.
    pub number_handle: RecordFieldHandle,
    /// Resolved typed text setter.
    pub set_text: TextSetter,
    /// Resolved typed integer setter.
    pub set_number: NumberSetter,
    /// The once-synthesized specialized callable.
    pub generated: GeneratedApply,
}

// The synthesized callable has no useful Debug form.
impl fmt::Debug for BindingCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingCache")
            .field("text_field", &self.text_field)
            .field("number_field", &self.number_field)
            .field("text_method", &self.text_method)
            .field("number_method", &self.number_method)
            .field("text_handle", &self.text_handle)
            .field("number_handle", &self.number_handle)
            .finish_non_exhaustive()
    }
}

impl BindingCache {
    /// Resolve every binding by name.
    ///
    /// Any missing member is a fatal setup error surfaced here, before any
    /// measurement begins; a run whose cache fails to resolve produces zero
    /// samples.
    pub fn resolve(names: &MemberNames) -> Result<Self, ResolutionError> {
        // Force the registry tables now so no worker's first lookup also
        // constructs them.
        reflect::warm();

        let set_text = reflect::text_setter(&names.text_setter)?;
        let set_number = reflect::number_setter(&names.number_setter)?;

        Ok(Self {
            text_field: reflect::field(&names.text_field)?,
            number_field: reflect::field(&names.number_field)?,
            text_method: reflect::method(&names.text_setter)?,
            number_method: reflect::method(&names.number_setter)?,
            text_handle: reflect::field_handle(&names.text_field)?,
            number_handle: reflect::field_handle(&names.number_field)?,
            set_text,
            set_number,
            generated: synthesize(set_text, set_number),
        })
    }
}

/// Compose the resolved setters into one callable specialized to the exact
/// setter signature.
fn synthesize(set_text: TextSetter, set_number: NumberSetter) -> GeneratedApply {
    Arc::new(move |record, text, number| {
        set_text(record, text);
        set_number(record, number);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TargetRecord;

    #[test]
    fn resolves_default_member_names() {
        let cache = BindingCache::resolve(&MemberNames::default()).unwrap();
        assert_eq!(cache.text_field.name(), "text");
        assert_eq!(cache.number_method.name(), "set_number");
    }

    #[test]
    fn wrong_field_name_fails_before_measurement() {
        let names = MemberNames {
            text_field: "strValue".to_string(),
            ..MemberNames::default()
        };
        let err = BindingCache::resolve(&names).unwrap_err();
        assert_eq!(err, ResolutionError::UnknownField("strValue".to_string()));
    }

    #[test]
    fn wrong_setter_name_fails_before_measurement() {
        let names = MemberNames {
            number_setter: "setIntValue".to_string(),
            ..MemberNames::default()
        };
        let err = BindingCache::resolve(&names).unwrap_err();
        assert_eq!(err, ResolutionError::UnknownMethod("setIntValue".to_string()));
    }

    #[test]
    fn cache_and_descriptors_are_debug_printable() {
        // unwrap_err on resolve results needs Debug on the Ok side.
        let cache = BindingCache::resolve(&MemberNames::default()).unwrap();
        let rendered = format!("{cache:?}");
        assert!(rendered.starts_with("BindingCache"));
        assert!(rendered.contains("text_field"));
        assert!(format!("{:?}", cache.text_method).contains("set_text"));
    }

    #[test]
    fn resolution_is_idempotent() {
        // Resolving twice yields bindings with identical observable effects.
        let first = BindingCache::resolve(&MemberNames::default()).unwrap();
        let second = BindingCache::resolve(&MemberNames::default()).unwrap();

        let mut a = TargetRecord::new();
        let mut b = TargetRecord::new();
        (first.generated)(&mut a, "same", 9);
        (second.generated)(&mut b, "same", 9);
        assert_eq!(a, b);

        first.text_field.write(&mut a, &"again").unwrap();
        second.text_field.write(&mut b, &"again").unwrap();
        assert_eq!(a, b);
    }
}
