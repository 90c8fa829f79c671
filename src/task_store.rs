use crate::error::{Result, StoreError};
use crate::task::Task;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::{debug, info, warn};

pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Ordered task list plus the JSON file it is loaded from and saved to.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    recovered_from_malformed: bool,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tasks: Vec::new(),
            recovered_from_malformed: false,
        }
    }

    /// Reads the backing file. A missing or malformed file yields an empty
    /// store; any other I/O failure is returned.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self::new(path);
        let data = match fs::read_to_string(&store.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %store.path.display(), "no tasks file, starting empty");
                return Ok(store);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: store.path,
                    source,
                })
            }
        };

        match serde_json::from_str::<Vec<Task>>(&data) {
            Ok(mut tasks) => {
                let before = tasks.len();
                tasks.retain(|t| !t.description.trim().is_empty());
                if tasks.len() < before {
                    warn!(
                        path = %store.path.display(),
                        dropped = before - tasks.len(),
                        "skipped tasks with blank descriptions"
                    );
                }
                info!(path = %store.path.display(), count = tasks.len(), "loaded tasks");
                store.tasks = tasks;
            }
            Err(err) => {
                warn!(
                    path = %store.path.display(),
                    error = %err,
                    "tasks file is malformed, starting with an empty list"
                );
                store.recovered_from_malformed = true;
            }
        }
        Ok(store)
    }

    /// Overwrites the backing file with the whole list.
    pub fn save(&self) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.tasks.serialize(&mut serializer)?;

        fs::write(&self.path, buf).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }

    pub fn add(&mut self, description: &str) -> Result<()> {
        let description = description.trim();
        if description.is_empty() {
            return Err(StoreError::EmptyDescription);
        }
        self.tasks.push(Task::new(description));
        debug!(description, "added task");
        Ok(())
    }

    /// Marks the tasks at the given 1-based positions as done and returns how
    /// many distinct positions were touched. Nothing changes if any position
    /// is out of range.
    pub fn mark_done(&mut self, indices: &[usize]) -> Result<usize> {
        if self.tasks.is_empty() {
            return Err(StoreError::EmptyList);
        }
        let positions: BTreeSet<usize> = indices
            .iter()
            .map(|&index| self.position(index))
            .collect::<Result<_>>()?;

        for &pos in &positions {
            self.tasks[pos].done = true;
        }
        debug!(count = positions.len(), "marked tasks as done");
        Ok(positions.len())
    }

    /// Removes the task at the 1-based `index` and returns its description.
    pub fn delete(&mut self, index: usize) -> Result<String> {
        if self.tasks.is_empty() {
            return Err(StoreError::EmptyList);
        }
        let pos = self.position(index)?;
        let removed = self.tasks.remove(pos);
        debug!(index, description = %removed.description, "deleted task");
        Ok(removed.description)
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when `load` found the file but could not parse it.
    pub fn recovered_from_malformed(&self) -> bool {
        self.recovered_from_malformed
    }

    fn position(&self, index: usize) -> Result<usize> {
        if (1..=self.tasks.len()).contains(&index) {
            Ok(index - 1)
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }
}
