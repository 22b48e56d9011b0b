//! Object registry: canonical digital-object records keyed by external id.

use provgraph_core::{DigitalObject, ObjectId, ProvenanceError};
use std::collections::BTreeMap;

/// Canonical table of digital objects.
///
/// Keyed by external identifier; iteration order is deterministic. The
/// registry assigns internal `base_id`s from a monotone counter on insert;
/// those ids are persistence artifacts and play no role in dedup or
/// equality anywhere in this subsystem.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    objects: BTreeMap<ObjectId, DigitalObject>,
    next_base_id: u64,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        ObjectRegistry::default()
    }

    /// Build a registry from fully-materialized records.
    ///
    /// Duplicate external ids resolve with deterministic last-write-wins
    /// semantics, matching snapshot overlay behavior. Records without a
    /// `base_id` get one assigned.
    pub fn from_objects(objects: Vec<DigitalObject>) -> Self {
        let mut registry = ObjectRegistry::new();
        for mut object in objects {
            if object.base_id.is_none() {
                object.base_id = Some(registry.allocate_base_id());
            } else {
                registry.next_base_id =
                    registry.next_base_id.max(object.base_id.unwrap_or(0));
            }
            registry.objects.insert(object.object_id.clone(), object);
        }
        registry
    }

    fn allocate_base_id(&mut self) -> u64 {
        self.next_base_id += 1;
        self.next_base_id
    }

    /// Register a new object.
    ///
    /// `external_id` of `None` generates a fresh random identifier. A
    /// supplied empty identifier fails with `InvalidArgument`; an already
    /// registered identifier fails with `DuplicateObject`.
    pub fn create(
        &mut self,
        external_id: Option<&str>,
    ) -> Result<&DigitalObject, ProvenanceError> {
        let object_id = match external_id {
            Some(id) => ObjectId::new(id)?,
            None => ObjectId::generate(),
        };
        if self.objects.contains_key(&object_id) {
            return Err(ProvenanceError::DuplicateObject(object_id));
        }

        let mut object = DigitalObject::new(object_id.clone());
        object.base_id = Some(self.allocate_base_id());
        self.objects.insert(object_id.clone(), object);
        Ok(&self.objects[&object_id])
    }

    /// Set the label and note on a registered object. Either field may be
    /// left unchanged by passing `None`.
    pub fn describe(
        &mut self,
        external_id: &str,
        label: Option<&str>,
        note: Option<&str>,
    ) -> Result<&DigitalObject, ProvenanceError> {
        let object_id = ObjectId::new(external_id)?;
        let object = self
            .objects
            .get_mut(&object_id)
            .ok_or_else(|| ProvenanceError::ObjectNotFound(object_id.clone()))?;
        if let Some(label) = label {
            object.label = label.to_string();
        }
        if let Some(note) = note {
            object.note = note.to_string();
        }
        Ok(&self.objects[&object_id])
    }

    /// Lookup one object by external identifier.
    pub fn lookup(&self, external_id: &str) -> Result<&DigitalObject, ProvenanceError> {
        let object_id = ObjectId::new(external_id)?;
        self.objects
            .get(&object_id)
            .ok_or(ProvenanceError::ObjectNotFound(object_id))
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.objects.contains_key(object_id)
    }

    /// Lookup one object (mutable). Internal to the store layer.
    pub(crate) fn get_mut(
        &mut self,
        object_id: &ObjectId,
    ) -> Option<&mut DigitalObject> {
        self.objects.get_mut(object_id)
    }

    /// Hide an object. The record stays in the graph; this subsystem never
    /// structurally deletes nodes.
    pub fn hide(&mut self, external_id: &str) -> Result<(), ProvenanceError> {
        let object_id = ObjectId::new(external_id)?;
        let object = self
            .get_mut(&object_id)
            .ok_or(ProvenanceError::ObjectNotFound(object_id))?;
        object.visible = false;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate all objects in deterministic external-id order.
    pub fn objects(&self) -> impl Iterator<Item = &DigitalObject> {
        self.objects.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_monotone_base_ids() {
        let mut registry = ObjectRegistry::new();
        let first = registry.create(Some("obj-1")).expect("create must succeed");
        assert_eq!(first.base_id, Some(1));
        let second = registry.create(None).expect("create must succeed");
        assert_eq!(second.base_id, Some(2));
    }

    #[test]
    fn create_rejects_empty_and_duplicate_ids() {
        let mut registry = ObjectRegistry::new();
        assert!(matches!(
            registry.create(Some("  ")),
            Err(ProvenanceError::InvalidArgument { .. })
        ));

        registry.create(Some("obj-1")).expect("create must succeed");
        assert!(matches!(
            registry.create(Some("obj-1")),
            Err(ProvenanceError::DuplicateObject(_))
        ));
    }

    #[test]
    fn lookup_misses_surface_not_found() {
        let registry = ObjectRegistry::new();
        assert!(matches!(
            registry.lookup("obj-missing"),
            Err(ProvenanceError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn external_id_never_changes_across_operations() {
        let mut registry = ObjectRegistry::new();
        registry.create(Some("obj-1")).expect("create must succeed");
        registry.hide("obj-1").expect("hide must succeed");

        let object = registry.lookup("obj-1").expect("lookup must succeed");
        assert_eq!(object.object_id.as_str(), "obj-1");
        assert!(!object.visible);
    }

    #[test]
    fn describe_updates_only_supplied_fields() {
        let mut registry = ObjectRegistry::new();
        registry.create(Some("obj-1")).expect("create must succeed");
        registry
            .describe("obj-1", Some("raw image"), None)
            .expect("describe must succeed");
        let object = registry
            .describe("obj-1", None, Some("camera 3"))
            .expect("describe must succeed");
        assert_eq!(object.label, "raw image");
        assert_eq!(object.note, "camera 3");

        assert!(matches!(
            registry.describe("obj-missing", Some("x"), None),
            Err(ProvenanceError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn from_objects_uses_last_write_wins_and_preserves_counter() {
        let id = ObjectId::new("obj-1").expect("id must build");
        let mut stale = DigitalObject::new(id.clone()).with_label("stale");
        stale.base_id = Some(7);
        let mut fresh = DigitalObject::new(id).with_label("fresh");
        fresh.base_id = Some(7);

        let mut registry = ObjectRegistry::from_objects(vec![stale, fresh]);
        assert_eq!(
            registry.lookup("obj-1").expect("object must exist").label,
            "fresh"
        );

        let next = registry.create(Some("obj-2")).expect("create must succeed");
        assert_eq!(next.base_id, Some(8));
    }
}
