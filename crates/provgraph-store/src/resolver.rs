//! Transition type registry and detail-entity resolution.
//!
//! A transition's detailed payload (a computation record, a preservation
//! task, ...) lives outside this subsystem, named by the transition's
//! entity id. The registry binds each transition type tag to a resolver
//! that knows how to load and interpret those payloads. Resolution is
//! deliberately non-fatal: any miss surfaces as `None`, never an error,
//! because missing detail must not invalidate the transition record.

use provgraph_core::{DigitalObjectTransition, ProvenanceError, TransitionType};
use serde_json::Value;
use std::collections::BTreeMap;

/// Opaque capability token handed to resolvers.
///
/// Authorization is an external collaborator; this subsystem forwards the
/// context and never interprets it. A resolver that cannot authorize the
/// access reports the entity as unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    pub user_id: String,
    pub group_id: String,
}

impl AccessContext {
    pub fn new(user_id: impl Into<String>, group_id: impl Into<String>) -> Self {
        AccessContext {
            user_id: user_id.into(),
            group_id: group_id.into(),
        }
    }
}

/// Loads and interprets externally stored transition entities for one
/// transition type.
pub trait TransitionResolver: Send + Sync {
    /// Fetch the entity named by `entity_id`, consulting `ctx` for access
    /// control. `None` means "detail unavailable" for any reason: entity
    /// missing, access denied, backend unreachable.
    fn resolve(&self, entity_id: &str, ctx: &AccessContext) -> Option<Value>;
}

/// Resolver that never produces an entity. Bound to types whose handlers
/// are not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl TransitionResolver for NullResolver {
    fn resolve(&self, _entity_id: &str, _ctx: &AccessContext) -> Option<Value> {
        None
    }
}

/// Process-wide map from transition type tag to resolver.
///
/// Populated once at startup from configuration; read-only thereafter.
#[derive(Default)]
pub struct TransitionTypeRegistry {
    resolvers: BTreeMap<TransitionType, Box<dyn TransitionResolver>>,
}

impl TransitionTypeRegistry {
    pub fn new() -> Self {
        TransitionTypeRegistry::default()
    }

    /// Bind a resolver to a type tag. A later bind for the same tag
    /// replaces the earlier one; registration happens once at startup.
    pub fn register(
        &mut self,
        transition_type: TransitionType,
        resolver: Box<dyn TransitionResolver>,
    ) {
        self.resolvers.insert(transition_type, resolver);
    }

    /// The resolver bound to a type tag.
    pub fn resolver_for(
        &self,
        transition_type: &TransitionType,
    ) -> Result<&dyn TransitionResolver, ProvenanceError> {
        self.resolvers
            .get(transition_type)
            .map(|resolver| resolver.as_ref())
            .ok_or_else(|| ProvenanceError::ResolverNotFound(transition_type.clone()))
    }

    pub fn is_registered(&self, transition_type: &TransitionType) -> bool {
        self.resolvers.contains_key(transition_type)
    }
}

impl std::fmt::Debug for TransitionTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionTypeRegistry")
            .field("types", &self.resolvers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Resolve a transition's external detail entity.
///
/// Returns `None` when the transition carries no entity id, when no
/// resolver is registered for its type, or when the resolver itself cannot
/// produce the entity. The transition record stays valid either way.
pub fn resolve_transition_entity(
    transition: &DigitalObjectTransition,
    registry: &TransitionTypeRegistry,
    ctx: &AccessContext,
) -> Option<Value> {
    let entity_id = transition.transition_entity_id.as_deref()?;
    let resolver = registry.resolver_for(&transition.transition_type).ok()?;
    resolver.resolve(entity_id, ctx)
}

/// Extract a transition entity id from caller-supplied entity data.
///
/// Entity data arriving over the wire may reference a previously persisted
/// entity as `{"transitionEntityId":"12345"}`; every handler supports that
/// shape. Any other shape returns `None`; creation then treats the raw
/// payload as the entity id itself.
pub fn parse_entity_id_from_data(data: &str) -> Option<String> {
    let value: Value = serde_json::from_str(data).ok()?;
    value
        .get("transitionEntityId")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedResolver {
        allow_group: String,
    }

    impl TransitionResolver for FixedResolver {
        fn resolve(&self, entity_id: &str, ctx: &AccessContext) -> Option<Value> {
            if ctx.group_id != self.allow_group {
                return None;
            }
            if entity_id == "task-7" {
                Some(json!({"taskId": "task-7", "status": "finished"}))
            } else {
                None
            }
        }
    }

    fn typed_transition(entity_id: Option<&str>) -> DigitalObjectTransition {
        let mut transition = DigitalObjectTransition::new();
        transition.transition_type = TransitionType::DataWorkflow;
        transition.transition_entity_id = entity_id.map(str::to_string);
        transition
    }

    #[test]
    fn unregistered_type_resolves_to_none() {
        let registry = TransitionTypeRegistry::new();
        let ctx = AccessContext::new("admin", "USERS");
        let transition = typed_transition(Some("task-7"));

        assert!(resolve_transition_entity(&transition, &registry, &ctx).is_none());
        assert!(matches!(
            registry.resolver_for(&TransitionType::DataWorkflow),
            Err(ProvenanceError::ResolverNotFound(_))
        ));
    }

    #[test]
    fn registered_resolver_produces_entity() {
        let mut registry = TransitionTypeRegistry::new();
        registry.register(
            TransitionType::DataWorkflow,
            Box::new(FixedResolver {
                allow_group: "USERS".to_string(),
            }),
        );
        let ctx = AccessContext::new("admin", "USERS");
        let transition = typed_transition(Some("task-7"));

        let entity = resolve_transition_entity(&transition, &registry, &ctx)
            .expect("entity must resolve");
        assert_eq!(entity["status"], "finished");
    }

    #[test]
    fn access_denial_is_indistinguishable_from_missing() {
        let mut registry = TransitionTypeRegistry::new();
        registry.register(
            TransitionType::DataWorkflow,
            Box::new(FixedResolver {
                allow_group: "USERS".to_string(),
            }),
        );
        let ctx = AccessContext::new("guest", "VISITORS");
        let transition = typed_transition(Some("task-7"));

        assert!(resolve_transition_entity(&transition, &registry, &ctx).is_none());
    }

    #[test]
    fn missing_entity_id_resolves_to_none() {
        let mut registry = TransitionTypeRegistry::new();
        registry.register(TransitionType::DataWorkflow, Box::new(NullResolver));
        let ctx = AccessContext::new("admin", "USERS");

        assert!(
            resolve_transition_entity(&typed_transition(None), &registry, &ctx).is_none()
        );
    }

    #[test]
    fn entity_id_parses_from_wire_convention() {
        assert_eq!(
            parse_entity_id_from_data(r#"{"transitionEntityId":"12345"}"#),
            Some("12345".to_string())
        );
        assert_eq!(parse_entity_id_from_data(r#"{"taskId":"12345"}"#), None);
        assert_eq!(parse_entity_id_from_data("not json"), None);
    }
}
