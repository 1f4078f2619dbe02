//! Debug panel parameter model
//!
//! Mirrors what a tweak-panel widget shows: folders of named bindings, each
//! holding a typed value and an optional step. Drawing the panel is left to
//! the host; the map controller reacts to [`DebugPanel::set`] by writing the
//! new value back into the scene.

use pinmap_core::{Color, Error, Point3f, Result};
use serde::{Deserialize, Serialize};

/// A value shown by the debug panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f32),
    Point(Point3f),
    Color(Color),
}

impl ParamValue {
    fn same_kind(&self, other: &ParamValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            ParamValue::Color(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point3f> {
        match self {
            ParamValue::Point(v) => Some(*v),
            _ => None,
        }
    }
}

/// One editable entry
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub key: String,
    pub value: ParamValue,
    pub step: Option<f32>,
}

impl Binding {
    pub fn new(key: impl Into<String>, value: ParamValue) -> Self {
        Self {
            key: key.into(),
            value,
            step: None,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = Some(step);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub title: String,
    pub expanded: bool,
    pub bindings: Vec<Binding>,
}

impl Folder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            expanded: false,
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.key == key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebugPanel {
    pub title: String,
    pub expanded: bool,
    folders: Vec<Folder>,
}

impl DebugPanel {
    const CONTEXT: &'static str = "debug-panel";

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            expanded: false,
            folders: Vec::new(),
        }
    }

    pub fn add_folder(&mut self, folder: Folder) {
        self.folders.push(folder);
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn folder(&self, title: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.title == title)
    }

    pub fn value(&self, folder: &str, key: &str) -> Option<ParamValue> {
        self.folder(folder)?.get(key).map(|b| b.value)
    }

    /// Change a binding's value. The value must keep the binding's type.
    pub fn set(&mut self, folder: &str, key: &str, value: ParamValue) -> Result<()> {
        let folder_ref = self
            .folders
            .iter_mut()
            .find(|f| f.title == folder)
            .ok_or_else(|| Error::missing(Self::CONTEXT, folder))?;
        let binding = folder_ref
            .bindings
            .iter_mut()
            .find(|b| b.key == key)
            .ok_or_else(|| Error::missing(Self::CONTEXT, format!("{folder}/{key}")))?;

        if !binding.value.same_kind(&value) {
            return Err(Error::InvalidData(format!(
                "'{folder}/{key}' expects {:?}, got {:?}",
                binding.value, value
            )));
        }
        binding.value = value;
        Ok(())
    }
}
