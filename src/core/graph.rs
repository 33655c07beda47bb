//! Task graph
//!
//! Holds every declared task, keyed by name and kept in declaration order.
//! Construction validates the whole graph: names are unique, every
//! dependency resolves, and there are no cycles. Traversal can therefore
//! assume a well-formed acyclic graph.

use std::collections::{HashMap, HashSet};

use crate::core::task::Task;
use crate::error::GraphError;

/// Validated, insertion-ordered task registry
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
}

impl TaskGraph {
    /// Build a graph from declared tasks
    pub fn new(tasks: Vec<Task>) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(tasks.len());
        for (i, task) in tasks.iter().enumerate() {
            if index.insert(task.name().to_string(), i).is_some() {
                return Err(GraphError::DuplicateTask {
                    name: task.name().to_string(),
                });
            }
        }

        for task in &tasks {
            for dep in task.dependencies() {
                if !index.contains_key(dep) {
                    return Err(GraphError::MissingDependency {
                        task: task.name().to_string(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        let graph = Self { tasks, index };
        graph.check_acyclic()?;
        Ok(graph)
    }

    /// Look up a task by name
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.index.get(name).map(|&i| &self.tasks[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Tasks in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    fn check_acyclic(&self) -> Result<(), GraphError> {
        let mut visited = HashSet::new();
        let mut on_path = HashSet::new();
        let mut path = Vec::new();

        for task in &self.tasks {
            if !visited.contains(task.name()) {
                self.visit(task.name(), &mut visited, &mut on_path, &mut path)?;
            }
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        visited: &mut HashSet<&'a str>,
        on_path: &mut HashSet<&'a str>,
        path: &mut Vec<&'a str>,
    ) -> Result<(), GraphError> {
        if on_path.contains(name) {
            // Report only the loop itself, not the path leading into it
            let start = path.iter().position(|n| *n == name).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(ToString::to_string).collect();
            cycle.push(name.to_string());
            return Err(GraphError::CircularDependency { cycle });
        }

        if visited.contains(name) {
            return Ok(());
        }

        on_path.insert(name);
        path.push(name);

        if let Some(task) = self.get(name) {
            for dep in task.dependencies() {
                self.visit(dep, visited, on_path, path)?;
            }
        }

        path.pop();
        on_path.remove(name);
        visited.insert(name);
        Ok(())
    }
}
