//! Batch lifecycle operations over a [`ToolHost`].
//!
//! Each operation plans (validates its whole input), executes (one
//! single-item primitive at a time, awaited in order), and reports. Plan-phase
//! problems fail the call before the registry is touched; per-item failures
//! during execution are recorded and never stop the batch. Operations are not
//! re-entrant against the same host: callers running concurrent batches must
//! serialise them. A cancelled batch leaves earlier mutations applied.

use std::collections::HashSet;

use commons_primitives::BatchId;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::error::{HostError, RegistryError, RegistryResult};
use crate::host::ToolHost;
use crate::outcome::{OperationOutcome, RegistrationReport, ReplaceOutcome};
use crate::spec::{AdaptedCatalog, ToolCatalog};

/// Registers every spec in catalog order.
///
/// A name that is already registered is overwritten, as the runtime's own
/// single-item add does. See [`register_catalog`] for the per-item detail.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidSpec`] before any mutation when a spec is
/// invalid, and [`RegistryError::HostConfiguration`] when the runtime reports
/// a configuration-level failure (tools registered before it stay registered).
pub async fn bulk_register<H>(
    host: &H,
    catalog: ToolCatalog,
) -> RegistryResult<Vec<(String, String)>>
where
    H: ToolHost + ?Sized,
{
    register_catalog(host, catalog)
        .await
        .map(RegistrationReport::into_registered)
}

/// Like [`bulk_register`], but also reports the names the runtime rejected
/// for non-configuration reasons.
///
/// # Errors
///
/// Same as [`bulk_register`].
pub async fn register_catalog<H>(
    host: &H,
    catalog: ToolCatalog,
) -> RegistryResult<RegistrationReport>
where
    H: ToolHost + ?Sized,
{
    catalog.validate()?;

    let span = info_span!(
        "bulk_register",
        batch_id = %BatchId::random(),
        size = catalog.len()
    );
    async move {
        let run = register_each(host, catalog).await;
        match run.aborted {
            Some((name, source)) => Err(RegistryError::HostConfiguration { name, source }),
            None => {
                info!(
                    registered = run.report.registered().len(),
                    failed = run.report.failed().len(),
                    "bulk registration finished"
                );
                Ok(run.report)
            }
        }
    }
    .instrument(span)
    .await
}

/// Wraps and registers a catalog assembled with [`AdaptedCatalog`].
///
/// # Errors
///
/// Same as [`bulk_register`].
pub async fn bulk_register_adapted<H>(
    host: &H,
    catalog: AdaptedCatalog,
) -> RegistryResult<Vec<(String, String)>>
where
    H: ToolHost + ?Sized,
{
    bulk_register(host, catalog.into_catalog()).await
}

/// Removes every name, best effort, in input order.
///
/// Names that fail to be removed, including ones that are not registered,
/// are recorded in the outcome. A name listed twice is attempted twice, so
/// its second entry fails as not registered.
///
/// # Errors
///
/// Never fails today; the `Result` leaves room for plan-phase checks.
pub async fn bulk_remove_tools<H, S>(host: &H, names: &[S]) -> RegistryResult<OperationOutcome>
where
    H: ToolHost + ?Sized,
    S: AsRef<str>,
{
    let span = info_span!(
        "bulk_remove_tools",
        batch_id = %BatchId::random(),
        size = names.len()
    );
    async move {
        let outcome = remove_each(host, names.iter().map(AsRef::<str>::as_ref)).await;
        info!(
            removed = outcome.removed().len(),
            failed = outcome.failed().len(),
            success_rate = outcome.success_rate(),
            "bulk removal finished"
        );
        Ok::<_, RegistryError>(outcome)
    }
    .instrument(span)
    .await
}

/// Removes `remove`, then registers `add`.
///
/// Listing a name in both produces an in-place replacement. This is not
/// atomic: if the add phase aborts, `rollback_performed` is set and the tools
/// that phase had registered under new names are removed again. Tools the
/// add phase overwrote, and tools removed in the first phase, cannot be
/// restored because their specs are not known here; each is reported in
/// `errors` and overwritten tools are left in place rather than deleted. Use
/// [`bulk_replace_tools_with_rollback`] to restore them.
///
/// # Errors
///
/// Returns plan-phase errors only: an invalid spec in `add`, or
/// [`RegistryError::Enumeration`] when the registry cannot be listed before
/// the first mutation.
pub async fn bulk_replace_tools<H, S>(
    host: &H,
    remove: &[S],
    add: ToolCatalog,
) -> RegistryResult<ReplaceOutcome>
where
    H: ToolHost + ?Sized,
    S: AsRef<str>,
{
    replace(host, remove, add, None).await
}

/// [`bulk_replace_tools`] with true rollback.
///
/// `originals` holds the specs the caller kept for the names in `remove` and
/// for any registered name `add` overwrites. If the add phase aborts, every
/// removed or overwritten name found in `originals` is registered again and
/// listed in `restored`; names missing from it are reported in `errors`.
///
/// # Errors
///
/// Same as [`bulk_replace_tools`].
pub async fn bulk_replace_tools_with_rollback<H, S>(
    host: &H,
    remove: &[S],
    add: ToolCatalog,
    originals: &ToolCatalog,
) -> RegistryResult<ReplaceOutcome>
where
    H: ToolHost + ?Sized,
    S: AsRef<str>,
{
    replace(host, remove, add, Some(originals)).await
}

/// Removes every registered tool whose name satisfies `predicate`.
///
/// The predicate runs once per registered name, in the host's enumeration
/// order, and the returned names keep that order. Only removed names are
/// returned; call [`bulk_remove_tools`] directly for failure detail.
///
/// # Errors
///
/// Returns [`RegistryError::Enumeration`] when the registry cannot be listed.
pub async fn conditional_remove_tools<H, P>(
    host: &H,
    mut predicate: P,
) -> RegistryResult<Vec<String>>
where
    H: ToolHost + ?Sized,
    P: FnMut(&str) -> bool,
{
    let span = info_span!("conditional_remove_tools", batch_id = %BatchId::random());
    async move {
        let registered = get_registered_tools(host).await?;
        let mut seen = HashSet::new();
        let targets: Vec<String> = registered
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .filter(|name| predicate(name.as_str()))
            .collect();
        debug!(matched = targets.len(), "predicate evaluated");

        let outcome = remove_each(host, targets.iter().map(String::as_str)).await;
        if !outcome.is_complete() {
            warn!(
                failed = outcome.failed().len(),
                "conditional removal left tools behind"
            );
        }
        Ok::<_, RegistryError>(outcome.into_removed())
    }
    .instrument(span)
    .await
}

/// Lists the names currently registered, live from the host.
///
/// # Errors
///
/// Returns [`RegistryError::Enumeration`] when the registry cannot be listed.
pub async fn get_registered_tools<H>(host: &H) -> RegistryResult<Vec<String>>
where
    H: ToolHost + ?Sized,
{
    host.list_tools()
        .await
        .map_err(|source| RegistryError::Enumeration { source })
}

/// Returns `true` if `name` is registered right now.
///
/// # Errors
///
/// Returns [`RegistryError::Enumeration`] when the registry cannot be listed.
pub async fn tool_exists<H>(host: &H, name: &str) -> RegistryResult<bool>
where
    H: ToolHost + ?Sized,
{
    Ok(get_registered_tools(host).await?.iter().any(|tool| tool == name))
}

/// Number of tools registered right now.
///
/// # Errors
///
/// Returns [`RegistryError::Enumeration`] when the registry cannot be listed.
pub async fn count_tools<H>(host: &H) -> RegistryResult<usize>
where
    H: ToolHost + ?Sized,
{
    Ok(get_registered_tools(host).await?.len())
}

struct RegisterRun {
    report: RegistrationReport,
    aborted: Option<(String, HostError)>,
}

async fn register_each<H>(host: &H, catalog: ToolCatalog) -> RegisterRun
where
    H: ToolHost + ?Sized,
{
    let mut report = RegistrationReport::default();
    for spec in catalog {
        let name = spec.name().to_owned();
        let description = spec.description().to_owned();
        match host.add_tool(spec).await {
            Ok(()) => {
                debug!(tool = %name, "registered tool");
                report.record_success(name, description);
            }
            Err(err) if err.is_configuration() => {
                warn!(tool = %name, error = %err, "runtime refused tool, aborting batch");
                return RegisterRun {
                    report,
                    aborted: Some((name, err)),
                };
            }
            Err(err) => {
                warn!(tool = %name, error = %err, "failed to register tool");
                report.record_failure(name, err.to_string());
            }
        }
    }
    RegisterRun {
        report,
        aborted: None,
    }
}

async fn remove_each<'a, H, I>(host: &H, names: I) -> OperationOutcome
where
    H: ToolHost + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut outcome = OperationOutcome::default();
    for name in names {
        match host.remove_tool(name).await {
            Ok(()) => {
                debug!(tool = %name, "removed tool");
                outcome.record_success(name.to_owned());
            }
            Err(err) => {
                if matches!(err, HostError::NotFound { .. }) {
                    debug!(tool = %name, "tool was not registered");
                } else {
                    warn!(tool = %name, error = %err, "failed to remove tool");
                }
                outcome.record_failure(name.to_owned(), err.to_string());
            }
        }
    }
    outcome
}

async fn replace<H, S>(
    host: &H,
    remove: &[S],
    add: ToolCatalog,
    originals: Option<&ToolCatalog>,
) -> RegistryResult<ReplaceOutcome>
where
    H: ToolHost + ?Sized,
    S: AsRef<str>,
{
    add.validate()?;
    let before: HashSet<String> = get_registered_tools(host).await?.into_iter().collect();

    let span = info_span!(
        "bulk_replace_tools",
        batch_id = %BatchId::random(),
        remove = remove.len(),
        add = add.len()
    );
    async move {
        let removal = remove_each(host, remove.iter().map(AsRef::<str>::as_ref)).await;
        let mut outcome = ReplaceOutcome {
            errors: removal.failed().to_vec(),
            removed: removal.into_removed(),
            ..ReplaceOutcome::default()
        };

        let run = register_each(host, add).await;
        outcome.errors.extend(run.report.failed().iter().cloned());
        let added: Vec<String> = run
            .report
            .registered()
            .iter()
            .map(|(name, _)| name.clone())
            .collect();

        let Some((failed_name, source)) = run.aborted else {
            outcome.added = added;
            info!(
                removed = outcome.removed.len(),
                added = outcome.added.len(),
                errors = outcome.errors.len(),
                "replacement finished"
            );
            return Ok(outcome);
        };

        warn!(tool = %failed_name, error = %source, "add phase aborted, rolling back");
        let err = RegistryError::HostConfiguration {
            name: failed_name.clone(),
            source,
        };
        outcome.errors.push((failed_name, err.to_string()));
        outcome.rollback_performed = true;

        // Names that were live before the call and survived the remove phase
        // were overwritten, not created; deleting them would lose a tool.
        let (overwritten, created): (Vec<String>, Vec<String>) = added
            .into_iter()
            .partition(|name| before.contains(name) && !outcome.removed.contains(name));

        let undo = remove_each(host, created.iter().map(String::as_str)).await;
        for (name, error) in undo.failed() {
            outcome
                .errors
                .push((name.clone(), format!("rollback could not remove: {error}")));
        }

        let to_restore: Vec<(String, &'static str)> = outcome
            .removed
            .iter()
            .map(|name| (name.clone(), "removed"))
            .chain(overwritten.into_iter().map(|name| (name, "overwritten")))
            .collect();
        for (name, how) in to_restore {
            match originals.and_then(|catalog| catalog.get(&name)) {
                Some(spec) => match host.add_tool(spec.clone()).await {
                    Ok(()) => outcome.restored.push(name),
                    Err(restore_err) => outcome.errors.push((
                        name,
                        format!("rollback could not restore {how} tool: {restore_err}"),
                    )),
                },
                None => outcome.errors.push((
                    name,
                    format!("rollback could not restore {how} tool: original spec not retained"),
                )),
            }
        }
        warn!(restored = outcome.restored.len(), "rollback finished");
        Ok(outcome)
    }
    .instrument(span)
    .await
}
