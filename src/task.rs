//! Priority task queue on top of [`FibonacciHeap`].
//!
//! The heap itself accepts any keys; this layer enforces the business rules
//! of a task queue where the priority is also the task's identity:
//!
//! - priorities are unique (smaller value is served first)
//! - descriptions are non-empty and bounded in length
//! - the queue holds at most `max_tasks` tasks
//!
//! Rejections and completed mutations are reported as `tracing` events. The
//! queue behaves identically whether or not a subscriber is installed.

use std::fmt;

use tracing::{debug, info, warn};

use crate::config::{ConfigError, TaskQueueConfig};
use crate::fibonacci::FibonacciHeap;
use crate::lookup::{Indexed, KeyLookup};
use crate::node::NodeKey;
use crate::traits::HeapError;
use crate::traversal::Traverse;

pub type Priority = u32;

/// A queued task: what to do plus an optional caller-defined record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task<X = ()> {
    pub description: String,
    pub details: Option<X>,
}

impl<X> Task<X> {
    pub fn new(description: impl Into<String>) -> Self {
        Task {
            description: description.into(),
            details: None,
        }
    }

    pub fn with_details(description: impl Into<String>, details: X) -> Self {
        Task {
            description: description.into(),
            details: Some(details),
        }
    }
}

impl<X> fmt::Display for Task<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Error type for task queue operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    EmptyDescription,
    DescriptionTooLong { len: usize, max: usize },
    DuplicatePriority(Priority),
    QueueFull { capacity: usize },
    NoTasks,
    TaskNotFound(Priority),
    SamePriority(Priority),
    Heap(HeapError),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::EmptyDescription => write!(f, "description cannot be empty"),
            TaskError::DescriptionTooLong { len, max } => {
                write!(f, "description is {} characters, limit is {}", len, max)
            }
            TaskError::DuplicatePriority(p) => {
                write!(f, "a task with priority {} already exists", p)
            }
            TaskError::QueueFull { capacity } => {
                write!(f, "task queue is full ({} tasks)", capacity)
            }
            TaskError::NoTasks => write!(f, "no tasks in the queue"),
            TaskError::TaskNotFound(p) => write!(f, "no task with priority {}", p),
            TaskError::SamePriority(p) => {
                write!(f, "new priority {} is the same as the old priority", p)
            }
            TaskError::Heap(e) => write!(f, "heap error: {}", e),
        }
    }
}

impl std::error::Error for TaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TaskError::Heap(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HeapError> for TaskError {
    fn from(e: HeapError) -> Self {
        match e {
            HeapError::EmptyHeap => TaskError::NoTasks,
            other => TaskError::Heap(other),
        }
    }
}

/// Task queue serving the smallest priority first.
///
/// # Example
///
/// ```rust
/// use fibqueue::task::TaskQueue;
///
/// let mut queue: TaskQueue = TaskQueue::new();
/// queue.add_task("restock ward 3", 20).unwrap();
/// queue.add_task("triage arrival", 5).unwrap();
/// queue.update_priority(20, 1).unwrap();
///
/// let (priority, task) = queue.complete_highest_priority().unwrap();
/// assert_eq!(priority, 1);
/// assert_eq!(task.description, "restock ward 3");
/// ```
pub struct TaskQueue<X = (), L = Indexed<Priority>> {
    heap: FibonacciHeap<Priority, Task<X>, L>,
    config: TaskQueueConfig,
}

impl<X, L: KeyLookup<Priority>> Default for TaskQueue<X, L> {
    fn default() -> Self {
        Self {
            heap: FibonacciHeap::default(),
            config: TaskQueueConfig::default(),
        }
    }
}

impl<X, L> fmt::Debug for TaskQueue<X, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("len", &self.heap.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<X, L> fmt::Display for TaskQueue<X, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of Tasks: {}", self.heap.len())?;
        write!(f, "{}", self.heap)
    }
}

impl<X> TaskQueue<X> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<X, L: KeyLookup<Priority>> TaskQueue<X, L> {
    pub fn with_config(config: TaskQueueConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            heap: FibonacciHeap::with_capacity_and_lookup(config.max_tasks),
            config,
        })
    }

    pub fn config(&self) -> &TaskQueueConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queues a task without details.
    pub fn add_task(
        &mut self,
        description: impl Into<String>,
        priority: Priority,
    ) -> Result<NodeKey, TaskError> {
        self.enqueue(Task::new(description), priority)
    }

    /// Queues a task carrying an extension record.
    pub fn add_task_with_details(
        &mut self,
        description: impl Into<String>,
        priority: Priority,
        details: X,
    ) -> Result<NodeKey, TaskError> {
        self.enqueue(Task::with_details(description, details), priority)
    }

    fn enqueue(&mut self, task: Task<X>, priority: Priority) -> Result<NodeKey, TaskError> {
        if self.heap.contains_key(&priority) {
            return Err(self.reject(TaskError::DuplicatePriority(priority)));
        }
        self.check_description(&task.description)?;
        if self.heap.len() >= self.config.max_tasks {
            let capacity = self.config.max_tasks;
            return Err(self.reject(TaskError::QueueFull { capacity }));
        }

        info!(priority, description = %task.description, "task added");
        let handle = self.heap.insert(priority, task);
        self.trace_heap();
        Ok(handle)
    }

    /// Removes and returns the task with the smallest priority value.
    pub fn complete_highest_priority(&mut self) -> Result<(Priority, Task<X>), TaskError> {
        match self.heap.extract_min() {
            Ok((priority, task)) => {
                info!(priority, description = %task.description, "task completed");
                self.trace_heap();
                Ok((priority, task))
            }
            Err(e) => Err(self.reject(e.into())),
        }
    }

    /// Moves a task from `old` to `new` priority.
    pub fn update_priority(&mut self, old: Priority, new: Priority) -> Result<(), TaskError> {
        if !self.heap.contains_key(&old) {
            return Err(self.reject(TaskError::TaskNotFound(old)));
        }
        if old == new {
            return Err(self.reject(TaskError::SamePriority(old)));
        }
        if self.heap.contains_key(&new) {
            return Err(self.reject(TaskError::DuplicatePriority(new)));
        }

        if let Err(e) = self.heap.modify_key(&old, new) {
            return Err(self.reject(e.into()));
        }
        info!(old, new, "task priority updated");
        self.trace_heap();
        Ok(())
    }

    /// Drops a task before it is served.
    pub fn remove_task(&mut self, priority: Priority) -> Result<Task<X>, TaskError> {
        match self.heap.delete(&priority) {
            Ok((_, task)) => {
                info!(priority, description = %task.description, "task removed");
                self.trace_heap();
                Ok(task)
            }
            Err(HeapError::KeyNotFound) => Err(self.reject(TaskError::TaskNotFound(priority))),
            Err(e) => Err(self.reject(e.into())),
        }
    }

    /// The next task to be served.
    pub fn peek(&self) -> Option<(Priority, &Task<X>)> {
        self.heap.minimum().map(|(p, t)| (*p, t))
    }

    pub fn get(&self, priority: Priority) -> Option<&Task<X>> {
        let handle = self.heap.find(&priority)?;
        self.heap.get(handle).map(|(_, task)| task)
    }

    /// Every queued task in heap layout order, for display consumers.
    pub fn tasks(&self) -> Traverse<'_, Priority, Task<X>> {
        self.heap.iter()
    }

    fn check_description(&self, description: &str) -> Result<(), TaskError> {
        let len = description.chars().count();
        if len == 0 {
            return Err(self.reject(TaskError::EmptyDescription));
        }
        let max = self.config.max_description_len;
        if len > max {
            return Err(self.reject(TaskError::DescriptionTooLong { len, max }));
        }
        Ok(())
    }

    fn reject(&self, error: TaskError) -> TaskError {
        warn!(%error, queued = self.heap.len(), "task request rejected");
        error
    }

    fn trace_heap(&self) {
        if self.config.verbose {
            debug!(tasks = self.heap.len(), heap = %self.heap, "task heap");
        }
    }
}
