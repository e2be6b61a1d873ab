//! The resource lifecycle contract every policy kind implements.
//!
//! An external orchestration engine drives these providers: it calls
//! `diff` to decide whether remote state has drifted from the declared
//! configuration, then `create`/`update`/`delete` to converge it. The
//! engine owns the remote-assigned identity for the lifetime of the
//! resource; providers never cache it.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::graph::GraphClient;

/// Result of a successful `create`: the remote-assigned identifier plus the
/// last-applied outputs. Kinds without an independent remote identity (pure
/// assignment calls, enrollment-default patches) return a caller-supplied
/// name as a synthetic identifier.
#[derive(Debug, Clone)]
pub struct CreateResult<O> {
    pub id: String,
    pub outs: O,
}

#[derive(Debug, Clone)]
pub struct UpdateResult<O> {
    pub outs: O,
}

#[derive(Debug, Clone)]
pub struct ReadResult<O> {
    pub id: String,
    pub props: O,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffResult {
    pub changes: bool,
}

/// Desired-state reconciliation contract.
///
/// `create` is the only required operation; the defaults implement the
/// common cases: update-by-recreate for fire-and-replace kinds, a remote
/// no-op delete, and drift detection by deep equality.
///
/// State machine per resource instance: absent -> created -> (updated)* ->
/// deleted. No failed state is retried here; every error propagates to the
/// engine uninterpreted.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    type Inputs: Serialize + Send + Sync;
    type Outputs: Serialize + Send + Sync;

    /// Stable kind tag, used for logging and engine-side dispatch.
    fn kind(&self) -> &'static str;

    async fn create(
        &self,
        client: &GraphClient,
        inputs: Self::Inputs,
    ) -> Result<CreateResult<Self::Outputs>>;

    /// Rebuild the full payload from `news` and resubmit it. The default
    /// re-runs `create`, which matches the assignment-style kinds where the
    /// remote call replaces the whole resource.
    async fn update(
        &self,
        client: &GraphClient,
        id: &str,
        olds: Self::Outputs,
        news: Self::Inputs,
    ) -> Result<UpdateResult<Self::Outputs>> {
        let _ = (id, olds);
        let created = self.create(client, news).await?;
        Ok(UpdateResult { outs: created.outs })
    }

    /// Remove the remote resource. The default is a no-op for kinds whose
    /// remote state cannot (or deliberately must not) be deleted.
    async fn delete(&self, client: &GraphClient, id: &str, props: Self::Outputs) -> Result<()> {
        let _ = (client, id, props);
        Ok(())
    }

    /// Refresh outputs from remote state. The default trusts the last
    /// applied outputs.
    async fn read(
        &self,
        client: &GraphClient,
        id: &str,
        props: Self::Outputs,
    ) -> Result<ReadResult<Self::Outputs>> {
        let _ = client;
        Ok(ReadResult {
            id: id.to_string(),
            props,
        })
    }

    /// Report drift between the previously applied outputs and the new
    /// inputs. Governs whether the engine calls `update` at all, so it must
    /// not produce false positives on field reordering.
    fn diff(&self, id: &str, previous: &Self::Outputs, news: &Self::Inputs) -> Result<DiffResult> {
        let _ = id;
        Ok(DiffResult {
            changes: !deep_equal(previous, news)?,
        })
    }
}

/// Deep equality over the serialized form of both values.
///
/// `serde_json::Value` objects compare by key set (order-independent) while
/// arrays compare element-wise in order, which is exactly the comparison the
/// diff contract requires.
pub fn deep_equal<A: Serialize, B: Serialize>(a: &A, b: &B) -> Result<bool> {
    let a: Value = serde_json::to_value(a)?;
    let b: Value = serde_json::to_value(b)?;
    Ok(a == b)
}
