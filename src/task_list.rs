//! Ordered in-memory task list.
//!
//! Positions exposed to callers are 1-based, matching what the user types
//! (`done 2`, `delete 1`).

use crate::error::{Error, Result};
use crate::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, index: usize) -> Result<&Task> {
        let slot = self.slot(index)?;
        Ok(&self.tasks[slot])
    }

    /// Mark the task at `index` as done and return it.
    pub fn mark_done(&mut self, index: usize) -> Result<&Task> {
        let slot = self.slot(index)?;
        let task = &mut self.tasks[slot];
        task.mark_done();
        Ok(task)
    }

    /// Mark the task at `index` as not done and return it.
    pub fn unmark(&mut self, index: usize) -> Result<&Task> {
        let slot = self.slot(index)?;
        let task = &mut self.tasks[slot];
        task.unmark();
        Ok(task)
    }

    /// Remove the task at `index`; later tasks shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<Task> {
        let slot = self.slot(index)?;
        Ok(self.tasks.remove(slot))
    }

    /// Tasks whose description contains `query`, with their 1-based positions.
    ///
    /// Matching is case-sensitive. An empty query matches nothing.
    pub fn find(&self, query: &str) -> Vec<(usize, &Task)> {
        if query.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|(_, task)| task.description.contains(query))
            .collect()
    }

    /// Tasks paired with their 1-based positions, in list order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks.iter().enumerate().map(|(slot, task)| (slot + 1, task))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Durable encoding of every task, one line each, in list order.
    pub fn to_lines(&self) -> Vec<String> {
        self.tasks.iter().map(Task::format_text).collect()
    }

    fn slot(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.tasks.len() {
            return Err(Error::OutOfRange {
                index,
                size: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}
