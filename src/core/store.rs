use std::path::PathBuf;

use crate::{
    errors::StoreError,
    ledger::{Expense, Summary},
    storage::StorageBackend,
};

/// Outcome of loading the persisted expense list when a store is opened.
#[derive(Debug)]
pub enum LoadStatus {
    /// No file existed; this is a first run.
    Fresh,
    Loaded { count: usize },
    /// The file existed but could not be read. The store starts empty.
    Recovered {
        error: StoreError,
        quarantined: Option<PathBuf>,
    },
}

/// A freshly opened store together with what happened during loading.
pub struct OpenReport {
    pub store: ExpenseStore,
    pub status: LoadStatus,
}

/// Options controlling how [`ExpenseStore::open_with`] treats unreadable files.
#[derive(Debug, Clone, Copy)]
pub struct OpenOptions {
    pub preserve_corrupt: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            preserve_corrupt: true,
        }
    }
}

/// Ordered, persisted list of expenses.
///
/// Every successful `add` or `delete` rewrites the whole backing file. A save
/// failure is returned to the caller but never undoes the in-memory change, so
/// memory and disk can differ until the next successful save.
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    storage: Box<dyn StorageBackend>,
}

impl ExpenseStore {
    pub fn open(storage: Box<dyn StorageBackend>) -> OpenReport {
        Self::open_with(storage, OpenOptions::default())
    }

    pub fn open_with(storage: Box<dyn StorageBackend>, options: OpenOptions) -> OpenReport {
        let (expenses, status) = match storage.load() {
            Ok(Some(expenses)) => {
                let count = expenses.len();
                tracing::info!(count, path = %storage.location().display(), "loaded expenses");
                (expenses, LoadStatus::Loaded { count })
            }
            Ok(None) => {
                tracing::info!(path = %storage.location().display(), "no expense file, starting fresh");
                (Vec::new(), LoadStatus::Fresh)
            }
            Err(err) => {
                tracing::debug!(path = %storage.location().display(), error = %err, "failed to load expenses");
                let quarantined = if options.preserve_corrupt {
                    match storage.quarantine() {
                        Ok(path) => path,
                        Err(quarantine_err) => {
                            tracing::info!(error = %quarantine_err, "could not preserve unreadable file");
                            None
                        }
                    }
                } else {
                    None
                };
                let status = LoadStatus::Recovered {
                    error: StoreError::Load(err),
                    quarantined,
                };
                (Vec::new(), status)
            }
        };

        OpenReport {
            store: Self { expenses, storage },
            status,
        }
    }

    /// Appends an expense and persists the list.
    ///
    /// The expense stays in memory even when the save fails.
    pub fn add(
        &mut self,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Result<(), StoreError> {
        let expense = Expense::new(description, amount, category);
        tracing::debug!(%expense, "adding expense");
        self.expenses.push(expense);
        self.persist()
    }

    /// Lazily yields `(position, expense)` pairs with 1-based positions, or
    /// `None` when nothing has been recorded.
    pub fn list(&self) -> Option<Entries<'_>> {
        if self.expenses.is_empty() {
            None
        } else {
            Some(Entries {
                inner: self.expenses.iter().enumerate(),
            })
        }
    }

    /// Removes the expense at the 1-based `position` and persists the list.
    ///
    /// Later expenses move down one position. Zero, negative, and out-of-range
    /// positions leave the list untouched. When the removal succeeds but the save does not, the
    /// removal stands and `StoreError::Save` is returned.
    pub fn delete(&mut self, position: i64) -> Result<Expense, StoreError> {
        let index = self.index_of(position)?;
        let removed = self.expenses.remove(index);
        tracing::debug!(position, expense = %removed, "deleted expense");
        self.persist()?;
        Ok(removed)
    }

    pub fn summarize(&self) -> Summary {
        Summary::from_expenses(&self.expenses)
    }

    pub fn get(&self, position: i64) -> Option<&Expense> {
        self.index_of(position)
            .ok()
            .and_then(|index| self.expenses.get(index))
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    fn index_of(&self, position: i64) -> Result<usize, StoreError> {
        let len = self.expenses.len();
        usize::try_from(position)
            .ok()
            .and_then(|position| position.checked_sub(1))
            .filter(|&index| index < len)
            .ok_or(StoreError::InvalidIndex { position, len })
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.storage.save(&self.expenses).map_err(|err| {
            tracing::debug!(path = %self.storage.location().display(), error = %err, "failed to save expenses");
            StoreError::Save(err)
        })
    }
}

/// Restartable view over the store's expenses with 1-based positions.
#[derive(Clone)]
pub struct Entries<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Expense>>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (usize, &'a Expense);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(index, expense)| (index + 1, expense))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}
