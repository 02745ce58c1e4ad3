//! Create-only resource lifecycle.
//!
//! Sealed resources have no update: any change to an input plans a
//! replacement, which discards the old state and seals again from scratch.
//! Read is a no-op because there is nothing remote to refresh, and delete
//! only drops the local state.

use crate::fingerprint::{ImmutableAttribute, InputFingerprint};
use sealedsecret_types::{ResourceId, Result};
use std::fmt;

/// State a sealed resource records after a successful create.
pub trait SealedState {
    /// Identifier of the resource.
    fn id(&self) -> &ResourceId;

    /// Digests of the inputs the state was sealed from.
    fn fingerprint(&self) -> &InputFingerprint;
}

/// What the host holds for a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tracked<S> {
    /// Adopted by identifier only; inputs and outputs are unknown
    Imported(ResourceId),
    /// Produced by a create
    Sealed(S),
}

impl<S: SealedState> Tracked<S> {
    /// Identifier of the tracked resource. Empty for cluster-wide secrets.
    pub fn id(&self) -> &ResourceId {
        match self {
            Tracked::Imported(id) => id,
            Tracked::Sealed(state) => state.id(),
        }
    }
}

/// Outcome of comparing a request with what is tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Nothing tracked yet
    Create,
    /// Inputs unchanged; keep the recorded state
    Keep,
    /// Inputs changed or unknown; seal again
    Replace {
        /// Attributes that forced the replacement. Empty for imported
        /// resources, whose inputs were never recorded.
        changed: Vec<ImmutableAttribute>,
    },
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Create => f.write_str("create"),
            Plan::Keep => f.write_str("no changes"),
            Plan::Replace { changed } if changed.is_empty() => f.write_str("replace (imported)"),
            Plan::Replace { changed } => {
                let names: Vec<&str> = changed.iter().map(|a| a.as_str()).collect();
                write!(f, "replace ({} changed)", names.join(", "))
            }
        }
    }
}

/// A resource type the host can manage.
pub trait SealedResource {
    /// Validated create request.
    type Request;
    /// Recorded state.
    type State: SealedState;

    /// Host-facing type name.
    fn type_name(&self) -> &'static str;

    /// Digest the request's inputs.
    ///
    /// # Errors
    ///
    /// `InvalidScope` when the scope token does not resolve.
    fn fingerprint(&self, request: &Self::Request) -> Result<InputFingerprint>;

    /// Seal the request into fresh state.
    fn create(&self, request: &Self::Request) -> Result<Self::State>;

    /// Refresh recorded state. Sealing is offline, so the state is returned unchanged.
    fn read(&self, state: Self::State) -> Self::State {
        state
    }

    /// Forget a resource.
    fn delete(&self, tracked: Tracked<Self::State>) {
        tracing::info!(resource = self.type_name(), id = %tracked.id(), "removing sealed resource from state");
    }

    /// Adopt an existing resource by identifier.
    fn import(&self, id: ResourceId) -> Tracked<Self::State> {
        tracing::info!(resource = self.type_name(), id = %id, "importing sealed resource");
        Tracked::Imported(id)
    }

    /// Compare a request with what is tracked.
    fn plan(&self, prior: Option<&Tracked<Self::State>>, request: &Self::Request) -> Result<Plan> {
        let proposed = self.fingerprint(request)?;
        let plan = match prior {
            None => Plan::Create,
            Some(Tracked::Imported(_)) => Plan::Replace { changed: Vec::new() },
            Some(Tracked::Sealed(state)) => {
                let changed = state.fingerprint().changed_attributes(&proposed);
                if changed.is_empty() {
                    Plan::Keep
                } else {
                    Plan::Replace { changed }
                }
            }
        };
        tracing::debug!(resource = self.type_name(), %plan, "planned");
        Ok(plan)
    }

    /// Plan and carry out the change.
    ///
    /// A failed create returns the error and records nothing; the caller
    /// must not keep a partially sealed state.
    fn apply(&self, prior: Option<Tracked<Self::State>>, request: &Self::Request) -> Result<Self::State> {
        let plan = self.plan(prior.as_ref(), request)?;
        match (plan, prior) {
            (Plan::Keep, Some(Tracked::Sealed(state))) => Ok(self.read(state)),
            (_, Some(tracked)) => {
                self.delete(tracked);
                self.create(request)
            }
            (_, None) => self.create(request),
        }
    }
}
