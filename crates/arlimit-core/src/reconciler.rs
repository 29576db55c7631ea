//! Limit reconciliation against the command registry.
//!
//! ## Logging Ownership
//!
//! The reconciler owns lifecycle logging for its operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Store adapters only use `tracing::debug!()` for internal details.

use std::time::Instant;

use crate::document_store::DocumentStore;
use crate::errors::{LimitError, Result};
use crate::model::{LimitBundle, LimitDocument, LimitSet};
use crate::registry::RegistryReader;
use crate::{log_op_end, log_op_error, log_op_start};

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Keeps the limit document in sync with the registry and guards the
/// global ceiling on every write.
///
/// State is loaded once by [`LimitReconciler::initialize`] and flushed to the
/// document store after every mutating call.
#[derive(Debug)]
pub struct LimitReconciler<S, R> {
    document: LimitDocument,
    /// Set when the document exists but could not be read; blocks every save
    unreadable: Option<LimitError>,
    store: S,
    registry: R,
}

impl<S: DocumentStore, R: RegistryReader> LimitReconciler<S, R> {
    /// Load the document, seed missing registry commands, and persist.
    ///
    /// Never fails: a missing or unparsable document starts from an empty
    /// limit set, a missing registry contributes no commands, and a failed
    /// persist is logged and otherwise ignored.
    ///
    /// A document that exists but cannot be read (`LimitError::Io`) also
    /// starts empty, but is never overwritten: the initial persist is
    /// skipped and later mutating calls fail with the read error.
    pub fn initialize(mut store: S, registry: R) -> Self {
        log_op_start!("initialize");
        let start = Instant::now();

        let (document, unreadable) = match store.load() {
            Ok(document) => (document, None),
            Err(e @ (LimitError::MissingFile { .. } | LimitError::Parse { .. })) => {
                log_op_error!("load_document", &e, duration_ms = elapsed_ms(start));
                (LimitDocument::default(), None)
            }
            Err(e) => {
                log_op_error!("load_document", &e, duration_ms = elapsed_ms(start));
                (LimitDocument::default(), Some(e))
            }
        };

        let mut reconciler = Self {
            document,
            unreadable,
            store,
            registry,
        };

        let added = reconciler.seed_from_registry(start);

        if reconciler.unreadable.is_some() {
            tracing::warn!(
                op = "initialize",
                "limit document could not be read, leaving it untouched"
            );
        } else if let Err(e) = reconciler.persist() {
            log_op_error!("initialize", &e, duration_ms = elapsed_ms(start));
            return reconciler;
        }

        log_op_end!(
            "initialize",
            duration_ms = elapsed_ms(start),
            added_len = added,
            limits_len = reconciler.document.custom_limits.len()
        );
        reconciler
    }

    /// Insert every registry command missing from the limit set at the
    /// effective global limit; returns how many were added.
    fn seed_from_registry(&mut self, start: Instant) -> usize {
        let commands = self.registry.list_commands().unwrap_or_else(|e| {
            log_op_error!("read_registry", &e, duration_ms = elapsed_ms(start));
            Default::default()
        });

        let default_limit = self.document.effective_global_limit();
        let mut added = 0;
        for command in commands {
            if !self.document.custom_limits.contains_key(&command) {
                tracing::debug!(command = %command, limit = default_limit, "seeding command");
                self.document
                    .custom_limits
                    .insert(command, Some(default_limit));
                added += 1;
            }
        }
        added
    }

    /// Limits for `commands`, or all limits when `commands` is `None`.
    ///
    /// Names without an entry are dropped silently.
    pub fn get_limits(&self, commands: Option<&[String]>) -> LimitSet {
        let limits = &self.document.custom_limits;
        match commands {
            None => limits.clone(),
            Some(commands) => commands
                .iter()
                .filter_map(|c| limits.get(c).map(|limit| (c.clone(), *limit)))
                .collect(),
        }
    }

    /// Overwrite limits of existing commands.
    ///
    /// The batch is validated as a whole before anything changes: if any
    /// explicit limit is above the effective global limit the call fails with
    /// `LimitExceedsGlobal` and nothing is mutated or persisted. Commands not
    /// already present are skipped.
    ///
    /// # Errors
    ///
    /// Returns `LimitExceedsGlobal` on a ceiling violation, `Persist` if the
    /// document cannot be written, or `Io` if it could not be read at startup.
    pub fn update_limits(&mut self, updates: &LimitSet) -> Result<()> {
        log_op_start!("update_limits", updates_len = updates.len());
        let start = Instant::now();

        self.update_limits_impl(updates).map_err(|e| {
            log_op_error!("update_limits", &e, duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!("update_limits", duration_ms = elapsed_ms(start));
        Ok(())
    }

    fn update_limits_impl(&mut self, updates: &LimitSet) -> Result<()> {
        let global_limit = self.document.effective_global_limit();
        if let Some((command, limit)) = updates
            .iter()
            .find_map(|(c, limit)| limit.filter(|l| *l > global_limit).map(|l| (c, l)))
        {
            return Err(LimitError::LimitExceedsGlobal {
                command: command.clone(),
                limit,
                global_limit,
            });
        }

        for (command, limit) in updates {
            match self.document.custom_limits.get_mut(command) {
                Some(slot) => {
                    tracing::debug!(command = %command, limit = ?limit, "updating limit");
                    *slot = *limit;
                }
                None => {
                    tracing::debug!(command = %command, "unknown command, skipping update");
                }
            }
        }

        self.persist()
    }

    /// Set the global limit (no range check) and persist.
    ///
    /// The in-memory value is kept even when persisting fails.
    ///
    /// # Errors
    ///
    /// Returns `Persist` if the document cannot be written, or `Io` if it
    /// could not be read at startup.
    pub fn update_global_limit(&mut self, new_value: u64) -> Result<()> {
        log_op_start!("update_global_limit", global_limit = new_value);
        let start = Instant::now();

        self.document.global_limit = Some(new_value);
        self.persist().map_err(|e| {
            log_op_error!("update_global_limit", &e, duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!("update_global_limit", duration_ms = elapsed_ms(start));
        Ok(())
    }

    /// Stored global limit, `None` if the document never had one.
    pub fn get_global_limit(&self) -> Option<u64> {
        self.document.global_limit
    }

    /// Custom and global limits together, for bulk export.
    pub fn get_bundle(&self) -> LimitBundle {
        LimitBundle {
            custom_limits: self.document.custom_limits.clone(),
            global_limit: self.document.global_limit,
        }
    }

    /// Apply custom limits and a new global limit in one write.
    ///
    /// Limits at or above the bundle's global limit are clamped down to it and
    /// commands not yet known are inserted. The global limit itself only
    /// changes when the bundle's value is positive.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if the bundle has no global limit (nothing is
    /// changed), or `Persist` if the document cannot be written.
    pub fn apply_bundle(&mut self, bundle: &LimitBundle) -> Result<()> {
        log_op_start!(
            "apply_bundle",
            updates_len = bundle.custom_limits.len(),
            global_limit = ?bundle.global_limit
        );
        let start = Instant::now();

        self.apply_bundle_impl(bundle).map_err(|e| {
            log_op_error!("apply_bundle", &e, duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!("apply_bundle", duration_ms = elapsed_ms(start));
        Ok(())
    }

    fn apply_bundle_impl(&mut self, bundle: &LimitBundle) -> Result<()> {
        let ceiling = bundle.global_limit.ok_or_else(|| LimitError::MissingField {
            field: "globalLimit".to_string(),
        })?;

        for (command, limit) in &bundle.custom_limits {
            let clamped = limit.map(|l| l.min(ceiling));
            self.document.custom_limits.insert(command.clone(), clamped);
        }

        if ceiling > 0 {
            self.document.global_limit = Some(ceiling);
        }

        self.persist()
    }

    /// Borrow the document store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the collaborators
    pub fn into_parts(self) -> (S, R) {
        (self.store, self.registry)
    }

    fn persist(&mut self) -> Result<()> {
        if let Some(e) = &self.unreadable {
            return Err(e.clone());
        }
        self.store.save(&self.document)
    }
}
