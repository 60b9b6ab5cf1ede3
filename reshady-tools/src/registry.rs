use std::collections::HashMap;
use std::sync::Arc;

use crate::methods::{
    ApplyPresetMethod, InstallMethod, ListGamesMethod, Method, RemoveMethod, ToggleMethod,
};
use crate::runner::CommandRunner;

pub struct MethodRegistry {
    methods: HashMap<String, Arc<dyn Method>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// The five methods the frontend calls, all sharing one runner.
    pub fn with_default_methods(runner: Arc<CommandRunner>) -> Self {
        let mut registry = Self::new();
        registry
            .register(Arc::new(ListGamesMethod::new(runner.clone())))
            .register(Arc::new(InstallMethod::new(runner.clone())))
            .register(Arc::new(ApplyPresetMethod::new(runner.clone())))
            .register(Arc::new(ToggleMethod::new(runner.clone())))
            .register(Arc::new(RemoveMethod::new(runner)));
        registry
    }

    pub fn register(&mut self, method: Arc<dyn Method>) -> &mut Self {
        self.methods.insert(method.name().to_string(), method);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Method>> {
        self.methods.get(name).cloned()
    }

    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn count(&self) -> usize {
        self.methods.len()
    }

    pub fn schemas(&self) -> Vec<serde_json::Value> {
        self.list()
            .iter()
            .filter_map(|name| self.methods.get(name))
            .map(|method| {
                serde_json::json!({
                    "name": method.name(),
                    "description": method.description(),
                    "parameters": method.schema()
                })
            })
            .collect()
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}
