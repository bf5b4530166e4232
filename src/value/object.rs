//! Class descriptors and object instances.
//!
//! Rust has no runtime reflection, so a comparable type registers its
//! fields once in a [`ClassDescriptor`] and its instances are materialized as
//! [`ObjectRef`]s. An instance holds one value slot per field of the whole
//! class hierarchy, most-derived class first, so a subclass field may shadow
//! a superclass field of the same name.

use super::Value;
use crate::error::{ReflectionError, Result};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Modifiers that exclude a field from structural comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldModifiers {
    pub is_static: bool,
    pub is_transient: bool,
}

/// A declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    modifiers: FieldModifiers,
}

impl FieldDescriptor {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn modifiers(&self) -> FieldModifiers {
        self.modifiers
    }

    /// Static and transient fields carry no instance state worth comparing.
    #[must_use]
    pub const fn is_compared(&self) -> bool {
        !self.modifiers.is_static && !self.modifiers.is_transient
    }
}

/// Position of a field inside an instance's slot table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSlot<'a> {
    pub index: usize,
    pub declaring_class: &'a ClassDescriptor,
    pub field: &'a FieldDescriptor,
}

/// Runtime type information for a registered class.
#[derive(Debug)]
pub struct ClassDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
    superclass: Option<Arc<ClassDescriptor>>,
}

impl ClassDescriptor {
    /// Start declaring a class.
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            fields: Vec::new(),
            superclass: None,
        }
    }

    /// Fully qualified name, e.g. `shop::Order`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without any module prefix.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name
            .rsplit("::")
            .next()
            .and_then(|s| s.rsplit('.').next())
            .unwrap_or(&self.name)
    }

    /// Fields declared directly on this class.
    #[must_use]
    pub fn declared_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub const fn superclass(&self) -> Option<&Arc<Self>> {
        self.superclass.as_ref()
    }

    /// This class followed by each superclass, nearest first.
    pub fn hierarchy(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |class| class.superclass.as_deref())
    }

    /// Every field slot of an instance, in comparison order.
    #[must_use]
    pub fn slots(&self) -> Vec<FieldSlot<'_>> {
        let mut slots = Vec::new();
        for class in self.hierarchy() {
            for field in &class.fields {
                slots.push(FieldSlot {
                    index: slots.len(),
                    declaring_class: class,
                    field,
                });
            }
        }
        slots
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.hierarchy().map(|class| class.fields.len()).sum()
    }

    /// Slot of the most-derived field with the given name.
    #[must_use]
    pub fn slot_of(&self, field: &str) -> Option<usize> {
        self.slots()
            .into_iter()
            .find(|slot| slot.field.name == field)
            .map(|slot| slot.index)
    }

    /// Slot of a field declared on a specific class of the hierarchy.
    #[must_use]
    pub fn declared_slot_of(&self, class: &str, field: &str) -> Option<usize> {
        self.slots()
            .into_iter()
            .find(|slot| slot.declaring_class.name == class && slot.field.name == field)
            .map(|slot| slot.index)
    }

    /// Names of all fields that take part in comparison.
    #[must_use]
    pub fn compared_field_names(&self) -> Vec<&str> {
        self.slots()
            .into_iter()
            .filter(|slot| slot.field.is_compared())
            .map(|slot| slot.field.name())
            .collect()
    }

    /// Classes are the same when they share the qualified name and declare
    /// the same fields, in the same order, on every level of the hierarchy.
    #[must_use]
    pub fn is_same_class(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || (self.name == other.name && self.has_same_layout(other))
    }

    /// True when both descriptors expose identical slots.
    #[must_use]
    pub fn has_same_layout(&self, other: &Self) -> bool {
        let (mine, theirs) = (self.slots(), other.slots());
        mine.len() == theirs.len()
            && mine.iter().zip(&theirs).all(|(a, b)| {
                a.declaring_class.name == b.declaring_class.name && a.field == b.field
            })
    }
}

/// Fluent builder for [`ClassDescriptor`].
#[derive(Debug)]
#[must_use]
pub struct ClassBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    superclass: Option<Arc<ClassDescriptor>>,
}

impl ClassBuilder {
    /// Declare a regular instance field.
    pub fn field(self, name: impl Into<String>) -> Self {
        self.field_with(name, FieldModifiers::default())
    }

    /// Declare a transient field, skipped by comparison and formatting.
    pub fn transient_field(self, name: impl Into<String>) -> Self {
        self.field_with(
            name,
            FieldModifiers {
                is_transient: true,
                ..FieldModifiers::default()
            },
        )
    }

    /// Declare a static field, skipped by comparison and formatting.
    pub fn static_field(self, name: impl Into<String>) -> Self {
        self.field_with(
            name,
            FieldModifiers {
                is_static: true,
                ..FieldModifiers::default()
            },
        )
    }

    pub fn field_with(mut self, name: impl Into<String>, modifiers: FieldModifiers) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            modifiers,
        });
        self
    }

    /// Inherit the fields of `superclass`.
    pub fn extends(mut self, superclass: &Arc<ClassDescriptor>) -> Self {
        self.superclass = Some(Arc::clone(superclass));
        self
    }

    #[must_use]
    pub fn build(self) -> Arc<ClassDescriptor> {
        Arc::new(ClassDescriptor {
            name: self.name,
            fields: self.fields,
            superclass: self.superclass,
        })
    }
}

struct ObjectData {
    class: Arc<ClassDescriptor>,
    slots: RwLock<Vec<Value>>,
}

/// Shared handle to an object instance.
///
/// Cloning the handle does not copy the object; both clones have the same
/// identity. Fields can be assigned after creation, which is how cyclic
/// graphs are built.
#[derive(Clone)]
pub struct ObjectRef(Arc<ObjectData>);

impl ObjectRef {
    /// Create an instance with every field set to `Value::Null`.
    #[must_use]
    pub fn new(class: &Arc<ClassDescriptor>) -> Self {
        let slots = vec![Value::Null; class.slot_count()];
        Self(Arc::new(ObjectData {
            class: Arc::clone(class),
            slots: RwLock::new(slots),
        }))
    }

    /// Create an instance and assign fields fluently.
    pub fn builder(class: &Arc<ClassDescriptor>) -> ObjectBuilder {
        ObjectBuilder {
            object: Self::new(class),
            error: None,
        }
    }

    #[must_use]
    pub fn class(&self) -> &Arc<ClassDescriptor> {
        &self.0.class
    }

    /// Address of the shared instance, used as its identity.
    #[must_use]
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Assign the most-derived field named `field`.
    pub fn set(&self, field: &str, value: impl Into<Value>) -> Result<()> {
        let index = self
            .class()
            .slot_of(field)
            .ok_or_else(|| ReflectionError::unknown_field(self.class().name(), field))?;
        self.write_slot(index, field, value.into())
    }

    /// Assign a field declared on a specific class of the hierarchy.
    pub fn set_declared(&self, class: &str, field: &str, value: impl Into<Value>) -> Result<()> {
        let index = self
            .class()
            .declared_slot_of(class, field)
            .ok_or_else(|| ReflectionError::unknown_field(class, field))?;
        self.write_slot(index, field, value.into())
    }

    /// Read the most-derived field named `field`.
    pub fn get(&self, field: &str) -> Result<Value> {
        let index = self
            .class()
            .slot_of(field)
            .ok_or_else(|| ReflectionError::unknown_field(self.class().name(), field))?;
        self.read_index(index, field)
    }

    /// Read a field declared on a specific class of the hierarchy.
    pub fn get_declared(&self, class: &str, field: &str) -> Result<Value> {
        let index = self
            .class()
            .declared_slot_of(class, field)
            .ok_or_else(|| ReflectionError::unknown_field(class, field))?;
        self.read_index(index, field)
    }

    /// Read the value held in `slot`.
    ///
    /// The slot may come from another descriptor with the same class name;
    /// a missing slot is a field access failure.
    pub fn read(&self, slot: &FieldSlot<'_>) -> Result<Value> {
        self.read_index(slot.index, slot.field.name())
    }

    fn read_index(&self, index: usize, field: &str) -> Result<Value> {
        let slots = self.0.slots.read().map_err(|_| {
            ReflectionError::field_access(self.class().name(), field, "instance lock poisoned")
        })?;
        slots.get(index).cloned().ok_or_else(|| {
            ReflectionError::field_access(
                self.class().name(),
                field,
                format!("instance has no slot {index}"),
            )
        })
    }

    fn write_slot(&self, index: usize, field: &str, value: Value) -> Result<()> {
        let mut slots = self.0.slots.write().map_err(|_| {
            ReflectionError::field_access(self.class().name(), field, "instance lock poisoned")
        })?;
        match slots.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ReflectionError::field_access(
                self.class().name(),
                field,
                format!("instance has no slot {index}"),
            )),
        }
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.class().simple_name(), self.id())
    }
}

/// Fluent builder returned by [`ObjectRef::builder`].
///
/// The first failed assignment is remembered and reported by [`build`](Self::build).
#[must_use]
pub struct ObjectBuilder {
    object: ObjectRef,
    error: Option<ReflectionError>,
}

impl ObjectBuilder {
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.object.set(field, value) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn set_declared(mut self, class: &str, field: &str, value: impl Into<Value>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.object.set_declared(class, field, value) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn build(self) -> Result<ObjectRef> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.object),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal() -> Arc<ClassDescriptor> {
        ClassDescriptor::builder("zoo::Animal")
            .field("name")
            .field("legs")
            .build()
    }

    #[test]
    fn test_hierarchy_slots_most_derived_first() {
        let base = animal();
        let dog = ClassDescriptor::builder("zoo::Dog")
            .field("breed")
            .transient_field("cache")
            .extends(&base)
            .build();

        let names: Vec<&str> = dog.slots().iter().map(|s| s.field.name()).collect();
        assert_eq!(names, vec!["breed", "cache", "name", "legs"]);
        assert_eq!(dog.slot_count(), 4);
        assert_eq!(dog.compared_field_names(), vec!["breed", "name", "legs"]);
        assert_eq!(dog.simple_name(), "Dog");
    }

    #[test]
    fn test_set_and_get() {
        let class = animal();
        let object = ObjectRef::builder(&class)
            .set("name", "rex")
            .set("legs", 4)
            .build()
            .expect("fields exist");

        assert!(matches!(object.get("name"), Ok(Value::String(ref s)) if s == "rex"));
        assert!(object.get("missing").is_err());
    }

    #[test]
    fn test_builder_reports_unknown_field() {
        let class = animal();
        let result = ObjectRef::builder(&class).set("wings", 2).build();
        assert!(matches!(
            result,
            Err(ReflectionError::UnknownField { ref field, .. }) if field == "wings"
        ));
    }

    #[test]
    fn test_shadowed_field() {
        let base = ClassDescriptor::builder("Base").field("id").build();
        let derived = ClassDescriptor::builder("Derived")
            .field("id")
            .extends(&base)
            .build();
        let object = ObjectRef::new(&derived);
        object.set("id", 1).expect("derived id");
        object.set_declared("Base", "id", 2).expect("base id");

        assert!(matches!(object.get("id"), Ok(Value::Number(n)) if n.as_f64() == 1.0));
        assert!(matches!(object.get_declared("Base", "id"), Ok(Value::Number(n)) if n.as_f64() == 2.0));
    }

    #[test]
    fn test_read_from_smaller_instance_fails() {
        let wide = ClassDescriptor::builder("Thing").field("a").field("b").build();
        let narrow = ClassDescriptor::builder("Thing").field("a").build();
        let object = ObjectRef::new(&narrow);

        let slots = wide.slots();
        assert!(matches!(
            object.read(&slots[1]),
            Err(ReflectionError::FieldAccess { .. })
        ));
    }

    #[test]
    fn test_identity() {
        let class = animal();
        let a = ObjectRef::new(&class);
        let b = a.clone();
        let c = ObjectRef::new(&class);
        assert!(a.ptr_eq(&b));
        assert_eq!(a.id(), b.id());
        assert!(!a.ptr_eq(&c));
    }
}
